//! Clipboard operations.

use arboard::Clipboard;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Terminal write failed: {0}")]
    Terminal(#[from] io::Error),
}

/// How a copy reached the user's clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    System,
    /// Escape sequence handled by the terminal emulator
    Osc52,
}

/// Clipboard controller.
///
/// Holds the system clipboard for the lifetime of the app, since on X11 the
/// copied text disappears once its owner is dropped.
pub struct ClipboardController {
    clipboard: Option<Clipboard>,
}

impl ClipboardController {
    pub fn new() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::warn!("System clipboard unavailable, using OSC 52: {}", e);
                None
            }
        };
        Self { clipboard }
    }

    /// Copy text, falling back to OSC 52 when the system clipboard fails
    pub fn set_text(&mut self, text: &str) -> Result<CopyMethod, ClipboardError> {
        if let Some(clipboard) = self.clipboard.as_mut() {
            match clipboard.set_text(text) {
                Ok(()) => return Ok(CopyMethod::System),
                Err(e) => tracing::warn!("System clipboard copy failed: {}", e),
            }
        }

        write_osc52(&mut io::stdout(), text)?;
        Ok(CopyMethod::Osc52)
    }
}

impl Default for ClipboardController {
    fn default() -> Self {
        Self::new()
    }
}

/// OSC 52 "set clipboard" sequence for `text`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

fn write_osc52<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_osc52_handles_utf8() {
        let seq = osc52_sequence("가사");
        let payload = seq
            .strip_prefix("\x1b]52;c;")
            .and_then(|s| s.strip_suffix('\x07'))
            .unwrap();
        let decoded = STANDARD.decode(payload).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "가사");
    }

    #[test]
    fn test_write_osc52() {
        let mut out = Vec::new();
        write_osc52(&mut out, "hi").unwrap();
        assert_eq!(out, b"\x1b]52;c;aGk=\x07");
    }
}
