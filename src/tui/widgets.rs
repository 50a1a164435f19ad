use crate::tui::state::{Notice, NoticeKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const MASK_CHAR: char = '•';

/// Single labeled text field
pub struct InputField<'a> {
    title: &'a str,
    value: &'a str,
    focused: bool,
    masked: bool,
}

impl<'a> InputField<'a> {
    pub fn new(title: &'a str, value: &'a str) -> Self {
        Self {
            title,
            value,
            focused: false,
            masked: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut text = if self.masked {
            mask(self.value)
        } else {
            self.value.to_string()
        };
        if self.focused {
            text.push('▏');
        }

        let widget = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(self.title),
            );

        frame.render_widget(widget, area);
    }
}

/// Replace every character with the mask glyph
pub fn mask(value: &str) -> String {
    value.chars().map(|_| MASK_CHAR).collect()
}

pub struct NoticePopup;

impl NoticePopup {
    pub fn render(frame: &mut Frame, notice: &Notice) {
        let area = centered_rect(60, 7, frame.area());

        let (title, color) = match notice.kind {
            NoticeKind::Info => ("Notice", Color::Green),
            NoticeKind::Error => ("Error", Color::Red),
        };

        let body = vec![
            Line::from(Span::styled(
                notice.message.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter or Esc to continue",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let popup = Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title),
            );

        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

/// Rect of `percent_x` width and fixed `height`, centered in `area`
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_counts_chars() {
        assert_eq!(mask("AIza가"), "•••••");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 7, area);
        assert_eq!(rect.height, 7);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.x, 20);
        assert!(rect.y > 0 && rect.y + rect.height < area.height);
    }

    #[test]
    fn test_centered_rect_clamps_height() {
        let rect = centered_rect(60, 7, Rect::new(0, 0, 50, 4));
        assert!(rect.height <= 4);
    }
}
