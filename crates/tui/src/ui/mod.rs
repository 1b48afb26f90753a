pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Screen};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();

    if state.screen == Screen::Login {
        screens::login::render(frame, area, state, &theme);
        return;
    }

    // Shell: info bar, page content, bottom hint bar.
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);

    match state.screen {
        Screen::Login => unreachable!("handled above"),
        Screen::Pesquisa => screens::pesquisa::render(frame, layout[1], state, &theme),
        Screen::Perfil => screens::perfil::render(frame, layout[1], state, &theme),
        Screen::Historico => screens::historico::render(frame, layout[1], state, &theme),
        Screen::MedPix => screens::medpix::render(frame, layout[1], state, &theme),
    }

    render_bottom_bar(frame, layout[2], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let titulo = match state.screen {
        Screen::Login => "Login",
        Screen::Pesquisa => "Acompanhamento de Perfil",
        Screen::Perfil => "Perfil do Cliente",
        Screen::Historico => "Histórico do Cliente",
        Screen::MedPix => "MED PIX",
    };
    let cliente = cliente_atual(state).unwrap_or("-");

    let line = Line::from(vec![
        Span::styled("PixDesk", Style::default().fg(theme.accent)),
        Span::raw(format!("  {titulo}  ")),
        Span::styled("Cliente", Style::default().fg(theme.dim)),
        Span::raw(format!(": {cliente}  ")),
        Span::styled("Servidor", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", state.base_url)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn cliente_atual(state: &AppState) -> Option<&str> {
    match state.screen {
        Screen::Perfil => state.perfil.as_ref().map(|p| p.cliente.nome.as_str()),
        Screen::Historico => state.historico.as_ref().map(|h| h.cliente.nome.as_str()),
        Screen::MedPix => state.medpix.as_ref().map(|m| m.cliente.nome.as_str()),
        _ => None,
    }
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = context_hints(state, theme);

    parts.push(Span::styled("  │  ", Style::default().fg(theme.dim)));
    parts.push(Span::styled("Ctrl+C", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" sair"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    match state.screen {
        Screen::Login => Vec::new(),
        Screen::Pesquisa => vec![
            Span::raw("digite para pesquisar  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" abrir perfil"),
        ],
        Screen::Perfil => vec![
            Span::styled("d", Style::default().fg(theme.accent)),
            Span::raw(" detalhes  "),
            Span::styled("h", Style::default().fg(theme.accent)),
            Span::raw(" histórico  "),
            Span::styled("m", Style::default().fg(theme.accent)),
            Span::raw(" med pix  "),
            Span::styled("s", Style::default().fg(theme.accent)),
            Span::raw(" pesquisa"),
        ],
        Screen::Historico => vec![
            Span::raw("digite para filtrar  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" motivo  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" perfil"),
        ],
        Screen::MedPix => vec![
            Span::raw("digite para filtrar  "),
            Span::styled("Del", Style::default().fg(theme.accent)),
            Span::raw(" arquivar  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" perfil"),
        ],
    }
}
