use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, LoginField},
    ui::{components::modal, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let box_width = 36;
    let box_height = 7;
    let card_area = modal::centered(box_width, box_height, area);

    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" PixDesk — Perfil do Cliente ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // usuário
            Constraint::Length(1),
            Constraint::Length(1), // senha
            Constraint::Length(1),
        ])
        .margin(1)
        .split(inner);

    let login = &state.login;

    let username_focused = login.focus == LoginField::Usuario;
    render_input(
        frame,
        rows[0],
        "Usuário",
        &login.username,
        false,
        username_focused,
        theme,
    );

    let password_focused = login.focus == LoginField::Senha;
    render_input(
        frame,
        rows[2],
        "Senha",
        &login.password,
        true,
        password_focused,
        theme,
    );

    if login.submitting {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Entrando...",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            rows[3],
        );
    }

    // Error line below the box, only when the last attempt failed.
    if let Some(message) = &login.message {
        let error_area = Rect {
            x: card_area.x,
            y: card_area.y + card_area.height + 1,
            width: card_area.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            error_area,
        );
    }
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    is_password: bool,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };

    let shown = if is_password {
        mask_password(value)
    } else {
        value.to_string()
    };

    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.dim)
    };

    frame.render_widget(
        Paragraph::new(Span::styled(format!("{label}: {shown}{cursor}"), style)),
        area,
    );
}

/// Masks the password with bullets, one per character.
fn mask_password(password: &str) -> String {
    "•".repeat(password.chars().count())
}
