use crate::parser::SongSheet;

/// Messages sent from Worker to TUI
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    Generating { topic: String },
    Generated { sheet: SongSheet },
    Failed { error: String },
}

/// Messages sent from TUI to Worker
#[derive(Debug, Clone)]
pub enum UiMessage {
    Generate { api_key: String, topic: String },
    Quit,
}
