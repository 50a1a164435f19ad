use crate::tui::{
    state::{AppState, Focus, Status},
    widgets::{InputField, NoticePopup},
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the TUI (Elm Architecture - View)
pub fn render(frame: &mut Frame, state: &AppState) {
    // Clear the frame to prevent ghost characters
    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Reset)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // API key
            Constraint::Length(5), // Topic
            Constraint::Min(5),    // Result (responsive)
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state);

    InputField::new("Gemini API Key (Enter to save)", &state.api_key)
        .focused(state.focus == Focus::ApiKey)
        .masked(true)
        .render(frame, chunks[1]);

    InputField::new("Song topic (Enter to generate, Alt+Enter for newline)", &state.topic)
        .focused(state.focus == Focus::Topic)
        .render(frame, chunks[2]);

    render_result(frame, chunks[3], state);
    render_footer(frame, chunks[4], state);

    if let Some(notice) = &state.notice {
        NoticePopup::render(frame, notice);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let (title, color) = match &state.status {
        Status::Idle => ("sunolyrics - Idle", Color::Cyan),
        Status::Generating => ("sunolyrics - Generating...", Color::Yellow),
        Status::Ready => ("sunolyrics - Ready ✓", Color::Green),
        Status::Failed => ("sunolyrics - Failed", Color::Red),
    };

    let header = Paragraph::new(title)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn render_result(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.is_busy() {
        let loading = Paragraph::new("Generating lyrics, please wait...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title("Result"));
        frame.render_widget(loading, area);
        return;
    }

    let Some(sheet) = &state.sheet else {
        let hint = Paragraph::new("Enter a topic and press Enter to write a song.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Result"));
        frame.render_widget(hint, area);
        return;
    };

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let style = Paragraph::new(sheet.style.as_str())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Song Style"));
    frame.render_widget(style, panes[0]);

    let lyrics = Paragraph::new(sheet.lyrics.as_str())
        .wrap(Wrap { trim: false })
        .scroll((state.lyrics_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title("Lyrics"));
    frame.render_widget(lyrics, panes[1]);
}

fn key_span(key: &'static str, color: Color) -> Span<'static> {
    Span::styled(
        key,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![
        key_span("Esc", Color::Yellow),
        Span::raw(" Quit | "),
        key_span("Tab", Color::Yellow),
        Span::raw(" Switch field | "),
    ];

    // Generation is disabled while a request is in flight
    if state.is_busy() {
        spans.push(Span::styled(
            "Generating...",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(key_span("^G", Color::Green));
        spans.push(Span::raw(" Generate"));
    }

    if state.sheet.is_some() {
        spans.push(Span::raw(" | "));
        spans.push(key_span("F2", Color::Cyan));
        spans.push(Span::raw(" Copy all | "));
        spans.push(key_span("F3", Color::Cyan));
        spans.push(Span::raw(" Copy style | "));
        spans.push(key_span("F4", Color::Cyan));
        spans.push(Span::raw(" Copy lyrics"));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
