pub mod state;
pub mod ui;
pub mod widgets;

use crate::clipboard::ClipboardController;
use crate::messages::{UiMessage, WorkerMessage};
use crate::parser::CopyTarget;
use crate::settings::{env_api_key, Settings};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::{AppState, Focus, Notice};
use std::io;
use std::path::PathBuf;
use tokio::sync::mpsc;

const SCROLL_STEP: u16 = 5;

pub struct App {
    state: AppState,
    settings: Settings,
    settings_path: PathBuf,
    clipboard: ClipboardController,
    worker_rx: mpsc::UnboundedReceiver<WorkerMessage>,
    ui_tx: mpsc::UnboundedSender<UiMessage>,
}

impl App {
    pub fn new(
        settings: Settings,
        settings_path: PathBuf,
        worker_rx: mpsc::UnboundedReceiver<WorkerMessage>,
        ui_tx: mpsc::UnboundedSender<UiMessage>,
    ) -> Self {
        Self {
            state: AppState::new(settings.prefill_api_key(env_api_key().as_deref())),
            settings,
            settings_path,
            clipboard: ClipboardController::new(),
            worker_rx,
            ui_tx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| ui::render(f, &self.state))?;

            // Handle events (non-blocking)
            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            // Process worker messages (non-blocking)
            while let Ok(msg) = self.worker_rx.try_recv() {
                self.state.update(msg);
            }

            if self.state.should_quit {
                let _ = self.ui_tx.send(UiMessage::Quit);
                break;
            }

            tokio::time::sleep(std::time::Duration::from_millis(16)).await;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        if ctrl && key.code == KeyCode::Char('c') {
            self.state.should_quit = true;
            return;
        }

        // A notice blocks everything else until dismissed
        if self.state.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_notice();
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.state.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.state.toggle_focus(),
            KeyCode::Char('g') if ctrl => self.generate(),
            KeyCode::Enter if alt => self.state.input_char('\n'),
            KeyCode::Enter => match self.state.focus {
                Focus::ApiKey => self.save_api_key(),
                Focus::Topic => self.generate(),
            },
            KeyCode::F(2) => self.copy(CopyTarget::All),
            KeyCode::F(3) => self.copy(CopyTarget::Style),
            KeyCode::F(4) => self.copy(CopyTarget::Lyrics),
            KeyCode::PageDown => self.state.scroll_lyrics_down(SCROLL_STEP),
            KeyCode::PageUp => self.state.scroll_lyrics_up(SCROLL_STEP),
            KeyCode::Backspace => self.state.backspace(),
            KeyCode::Char(c) if !ctrl => self.state.input_char(c),
            _ => {}
        }
    }

    fn save_api_key(&mut self) {
        if let Err(e) = self.settings.set_api_key(&self.state.api_key) {
            self.state.notify(Notice::error(e.to_string()));
            return;
        }

        match self.settings.save(&self.settings_path) {
            Ok(()) => {
                if let Some(key) = self.settings.api_key() {
                    self.state.api_key = key.to_string();
                }
                self.state.notify(Notice::info("API key saved!"));
            }
            Err(e) => {
                tracing::error!("Failed to save settings: {:#}", e);
                self.state
                    .notify(Notice::error(format!("Could not save the API key: {}", e)));
            }
        }
    }

    fn generate(&mut self) {
        if self.state.is_busy() {
            tracing::debug!("Ignoring generate request while one is in flight");
            return;
        }

        match self.state.request_generation() {
            Ok(msg) => {
                if self.ui_tx.send(msg).is_err() {
                    tracing::error!("Worker is gone, cannot generate");
                    self.state.update(WorkerMessage::Failed {
                        error: "background worker stopped".to_string(),
                    });
                }
            }
            Err(e) => self.state.notify(Notice::error(e.to_string())),
        }
    }

    fn copy(&mut self, target: CopyTarget) {
        let Some(text) = self.state.copy_text(target) else {
            self.state.notify(Notice::info("Nothing to copy yet."));
            return;
        };

        match self.clipboard.set_text(&text) {
            Ok(method) => {
                tracing::info!("Copied {} via {:?}", target.label(), method);
                self.state.notify(Notice::info("Copied to clipboard!"));
            }
            Err(e) => {
                tracing::error!("Copy failed: {}", e);
                self.state.notify(Notice::error(format!("Copy failed: {}", e)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(
        settings_path: PathBuf,
    ) -> (App, mpsc::UnboundedReceiver<UiMessage>, mpsc::UnboundedSender<WorkerMessage>) {
        let (worker_tx, worker_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let mut app = App::new(Settings::default(), settings_path, worker_rx, ui_tx);
        // GEMINI_API_KEY in the test environment must not leak into the form
        app.state.api_key.clear();
        (app, ui_rx, worker_tx)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_enter_on_key_field_saves_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let (mut app, _ui_rx, _worker_tx) = app_with(path.clone());

        app.handle_key(press(KeyCode::Tab));
        type_text(&mut app, " my-key ");
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.state.notice, Some(Notice::info("API key saved!")));
        assert_eq!(app.state.api_key, "my-key");
        assert_eq!(Settings::load(&path).unwrap().api_key(), Some("my-key"));
    }

    #[test]
    fn test_empty_key_is_not_saved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let (mut app, _ui_rx, _worker_tx) = app_with(path.clone());

        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(
            app.state.notice.as_ref().map(|n| n.message.as_str()),
            Some("Please enter an API key.")
        );
        assert!(!path.exists());
    }

    #[test]
    fn test_notice_swallows_keys_until_dismissed() {
        let dir = tempdir().unwrap();
        let (mut app, _ui_rx, _worker_tx) = app_with(dir.path().join("settings.json"));

        app.state.notify(Notice::info("hello"));
        type_text(&mut app, "abc");
        assert!(app.state.topic.is_empty());

        app.handle_key(press(KeyCode::Esc));
        assert!(app.state.notice.is_none());
        assert!(!app.state.should_quit);
    }

    #[test]
    fn test_generate_sends_once_while_busy() {
        let dir = tempdir().unwrap();
        let (mut app, mut ui_rx, _worker_tx) = app_with(dir.path().join("settings.json"));

        app.state.api_key = "key".to_string();
        type_text(&mut app, "autumn");
        app.handle_key(press(KeyCode::Enter));
        app.handle_key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL));

        match ui_rx.try_recv().unwrap() {
            UiMessage::Generate { api_key, topic } => {
                assert_eq!(api_key, "key");
                assert_eq!(topic, "autumn");
            }
            other => panic!("unexpected message: {other:?}"),
        }
        assert!(ui_rx.try_recv().is_err());
        assert!(app.state.is_busy());
    }

    #[test]
    fn test_generate_without_topic_notifies() {
        let dir = tempdir().unwrap();
        let (mut app, mut ui_rx, _worker_tx) = app_with(dir.path().join("settings.json"));

        app.state.api_key = "key".to_string();
        app.handle_key(press(KeyCode::Enter));

        assert!(ui_rx.try_recv().is_err());
        assert_eq!(
            app.state.notice.as_ref().map(|n| n.message.as_str()),
            Some("Please enter a topic for the song.")
        );
    }

    #[test]
    fn test_alt_enter_inserts_newline() {
        let dir = tempdir().unwrap();
        let (mut app, _ui_rx, _worker_tx) = app_with(dir.path().join("settings.json"));

        type_text(&mut app, "a");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
        type_text(&mut app, "b");

        assert_eq!(app.state.topic, "a\nb");
        assert!(!app.state.is_busy());
    }

    #[test]
    fn test_copy_before_result() {
        let dir = tempdir().unwrap();
        let (mut app, _ui_rx, _worker_tx) = app_with(dir.path().join("settings.json"));

        app.handle_key(press(KeyCode::F(2)));
        assert_eq!(app.state.notice, Some(Notice::info("Nothing to copy yet.")));
    }
}
