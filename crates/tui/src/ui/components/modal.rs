use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

/// Calculates a centered rect of the given size inside `area`.
pub fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Draws a bordered overlay box with wrapped content, clearing what is
/// behind it.
pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    titulo: &str,
    linhas: Vec<Line<'_>>,
    border_style: Style,
) {
    let height = (linhas.len() as u16 + 2).min(area.height);
    let width = area.width.saturating_mul(3) / 5;
    let rect = centered(width.max(30).min(area.width), height, area);

    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(format!(" {titulo} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(linhas).block(block).wrap(Wrap { trim: false }),
        rect,
    );
}
