use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sunolyrics::{
    api::{ClientOptions, GeminiClient},
    parser::CopyTarget,
    settings::Settings,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Draft SUNO AI song styles and lyrics with Gemini
#[derive(Parser)]
#[command(name = "sunolyrics", version, about)]
struct Cli {
    /// Gemini model to use instead of the saved or default one
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Save the Gemini API key for later sessions
    SetKey { api_key: String },

    /// Generate a song without the TUI and print it
    Generate {
        topic: String,

        /// Key to use for this request (falls back to GEMINI_API_KEY, then the saved key)
        #[arg(long)]
        api_key: Option<String>,

        /// Which section to print
        #[arg(long, value_enum, default_value_t = Section::All)]
        section: Section,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    All,
    Style,
    Lyrics,
}

impl From<Section> for CopyTarget {
    fn from(section: Section) -> Self {
        match section {
            Section::All => CopyTarget::All,
            Section::Style => CopyTarget::Style,
            Section::Lyrics => CopyTarget::Lyrics,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // File-based logging keeps the TUI and stdout clean
    let log_dir = sunolyrics::paths::get_log_dir()?;
    let file_appender = tracing_appender::rolling::never(&log_dir, "sunolyrics.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sunolyrics=debug,reqwest=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    let settings_path = sunolyrics::paths::get_settings_path()?;

    // set-key must still work when the settings file is corrupt, since it rewrites it
    let mut settings = match cli.command {
        Some(Command::SetKey { .. }) => Settings::load_or_default(&settings_path),
        _ => Settings::load(&settings_path)?,
    };
    if let Some(model) = cli.model {
        settings.model = Some(model);
    }

    match cli.command {
        None => run_tui(settings, settings_path).await,
        Some(Command::SetKey { api_key }) => {
            settings.set_api_key(&api_key)?;
            settings.save(&settings_path)?;
            println!("✓ API key saved to {}", settings_path.display());
            Ok(())
        }
        Some(Command::Generate {
            topic,
            api_key,
            section,
        }) => run_headless(&settings, &topic, api_key.as_deref(), section.into()).await,
    }
}

async fn run_tui(settings: Settings, settings_path: std::path::PathBuf) -> Result<()> {
    tracing::info!("Starting sunolyrics TUI");

    let options = ClientOptions::with_model(settings.model());

    let (worker_tx, worker_rx) = tokio::sync::mpsc::unbounded_channel();
    let (ui_tx, ui_rx) = tokio::sync::mpsc::unbounded_channel();

    let worker_handle = tokio::spawn(async move {
        if let Err(e) = sunolyrics::worker::run(options, worker_tx, ui_rx).await {
            tracing::error!("Worker error: {}", e);
        }
    });

    let mut app = sunolyrics::tui::App::new(settings, settings_path, worker_rx, ui_tx);
    app.run().await?;

    // Quit was already sent; a request still in flight is abandoned
    worker_handle.abort();
    let _ = worker_handle.await;

    Ok(())
}

async fn run_headless(
    settings: &Settings,
    topic: &str,
    explicit_key: Option<&str>,
    section: CopyTarget,
) -> Result<()> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(sunolyrics::error::InputError::MissingTopic.into());
    }

    let api_key = settings.resolve_api_key(explicit_key)?;
    let client = GeminiClient::new(api_key, ClientOptions::with_model(settings.model()));

    let sheet = sunolyrics::worker::generate_sheet(&client, topic)
        .await
        .context("Failed to generate lyrics")?;

    println!("{}", sheet.text_for(section));
    Ok(())
}
