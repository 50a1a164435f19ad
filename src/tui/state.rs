use crate::error::InputError;
use crate::messages::{UiMessage, WorkerMessage};
use crate::parser::{CopyTarget, SongSheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ApiKey,
    Topic,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Generating,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Modal message that blocks input until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub api_key: String,
    pub topic: String,
    pub focus: Focus,
    pub status: Status,
    /// Most recent successful result
    pub sheet: Option<SongSheet>,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    pub lyrics_scroll: u16,
}

impl AppState {
    pub fn new(saved_api_key: Option<String>) -> Self {
        Self {
            api_key: saved_api_key.unwrap_or_default(),
            topic: String::new(),
            focus: Focus::Topic,
            status: Status::Idle,
            sheet: None,
            notice: None,
            should_quit: false,
            lyrics_scroll: 0,
        }
    }

    /// Update state based on worker messages (Elm Architecture - Update)
    pub fn update(&mut self, msg: WorkerMessage) {
        match msg {
            WorkerMessage::Generating { .. } => {
                self.status = Status::Generating;
                self.sheet = None;
            }
            WorkerMessage::Generated { sheet } => {
                self.sheet = Some(sheet);
                self.lyrics_scroll = 0;
                self.status = Status::Ready;
            }
            WorkerMessage::Failed { error } => {
                self.status = Status::Failed;
                self.notify(Notice::error(format!(
                    "Failed to generate lyrics: {}",
                    error
                )));
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.status == Status::Generating
    }

    /// Validate the form and mark a request in flight.
    /// The caller is expected to check [`Self::is_busy`] first.
    pub fn request_generation(&mut self) -> Result<UiMessage, InputError> {
        let api_key = self.api_key.trim();
        if api_key.is_empty() {
            return Err(InputError::ApiKeyNotSet);
        }

        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(InputError::MissingTopic);
        }

        let msg = UiMessage::Generate {
            api_key: api_key.to_string(),
            topic: topic.to_string(),
        };

        self.status = Status::Generating;
        self.sheet = None;
        Ok(msg)
    }

    /// Text for a copy action, if there is a result to copy
    pub fn copy_text(&self, target: CopyTarget) -> Option<String> {
        self.sheet.as_ref().map(|sheet| sheet.text_for(target))
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::ApiKey => Focus::Topic,
            Focus::Topic => Focus::ApiKey,
        };
    }

    fn focused_field(&mut self) -> &mut String {
        match self.focus {
            Focus::ApiKey => &mut self.api_key,
            Focus::Topic => &mut self.topic,
        }
    }

    pub fn input_char(&mut self, c: char) {
        // Keys are single-line
        if c == '\n' && self.focus == Focus::ApiKey {
            return;
        }
        self.focused_field().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_field().pop();
    }

    pub fn scroll_lyrics_down(&mut self, lines: u16) {
        self.lyrics_scroll = self.lyrics_scroll.saturating_add(lines);
    }

    pub fn scroll_lyrics_up(&mut self, lines: u16) {
        self.lyrics_scroll = self.lyrics_scroll.saturating_sub(lines);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sheet() -> SongSheet {
        SongSheet {
            style: "city pop".to_string(),
            lyrics: "[Chorus]\nla".to_string(),
        }
    }

    #[test]
    fn test_prefills_saved_key() {
        let state = AppState::new(Some("saved".to_string()));
        assert_eq!(state.api_key, "saved");
        assert_eq!(state.focus, Focus::Topic);
    }

    #[test]
    fn test_request_requires_key() {
        let mut state = AppState::new(None);
        state.topic = "summer".to_string();
        assert_eq!(state.request_generation().unwrap_err(), InputError::ApiKeyNotSet);
        assert_eq!(state.status, Status::Idle);
    }

    #[test]
    fn test_request_requires_topic() {
        let mut state = AppState::new(Some("key".to_string()));
        state.topic = "  \n ".to_string();
        assert_eq!(state.request_generation().unwrap_err(), InputError::MissingTopic);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_request_trims_and_marks_busy() {
        let mut state = AppState::new(Some(" key ".to_string()));
        state.topic = " summer rain \n".to_string();
        state.sheet = Some(sample_sheet());

        match state.request_generation().unwrap() {
            UiMessage::Generate { api_key, topic } => {
                assert_eq!(api_key, "key");
                assert_eq!(topic, "summer rain");
            }
            other => panic!("unexpected message: {other:?}"),
        }
        assert!(state.is_busy());
        assert!(state.sheet.is_none());
    }

    #[test]
    fn test_generated_shows_result() {
        let mut state = AppState::new(None);
        state.update(WorkerMessage::Generating {
            topic: "x".to_string(),
        });
        assert!(state.is_busy());

        state.update(WorkerMessage::Generated {
            sheet: sample_sheet(),
        });
        assert_eq!(state.status, Status::Ready);
        assert_eq!(state.sheet, Some(sample_sheet()));
        assert!(!state.is_busy());
    }

    #[test]
    fn test_failure_raises_notice_without_result() {
        let mut state = AppState::new(None);
        state.update(WorkerMessage::Generating {
            topic: "x".to_string(),
        });
        state.update(WorkerMessage::Failed {
            error: "boom".to_string(),
        });

        assert_eq!(state.status, Status::Failed);
        assert!(state.sheet.is_none());
        let notice = state.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Failed to generate lyrics: boom");

        state.dismiss_notice();
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_copy_text() {
        let mut state = AppState::new(None);
        assert!(state.copy_text(CopyTarget::All).is_none());

        state.sheet = Some(sample_sheet());
        assert_eq!(state.copy_text(CopyTarget::Style).unwrap(), "city pop");
        assert_eq!(state.copy_text(CopyTarget::Lyrics).unwrap(), "[Chorus]\nla");
    }

    #[test]
    fn test_editing_follows_focus() {
        let mut state = AppState::new(None);
        state.input_char('a');
        state.toggle_focus();
        state.input_char('k');
        state.input_char('\n');
        state.input_char('z');
        state.backspace();

        assert_eq!(state.topic, "a");
        assert_eq!(state.api_key, "k");
    }

    #[test]
    fn test_scroll_saturates() {
        let mut state = AppState::new(None);
        state.scroll_lyrics_up(5);
        assert_eq!(state.lyrics_scroll, 0);
        state.scroll_lyrics_down(3);
        assert_eq!(state.lyrics_scroll, 3);
    }
}
