use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};

use api_types::medpix::ProtocoloStatus;

use crate::{
    app::{AppState, MedPixState},
    listing,
    ui::{
        components::{modal, money},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(medpix) = state.medpix.as_ref() else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_filtro(frame, layout[0], medpix, theme);
    render_tabela(frame, layout[1], medpix, theme);

    if let Some(erro) = medpix.erro_arquivamento.as_deref() {
        let linhas = vec![
            Line::from(erro),
            Line::from(""),
            Line::from(Span::styled(
                "Enter para continuar",
                Style::default().fg(theme.dim),
            )),
        ];
        modal::render(frame, area, "Erro", linhas, Style::default().fg(theme.error));
    }
}

fn render_filtro(frame: &mut Frame<'_>, area: Rect, medpix: &MedPixState, theme: &Theme) {
    let content = if medpix.filtro.is_empty() {
        Span::styled(
            "Pesquisar por protocolo, data, valor ou status",
            Style::default().fg(theme.dim),
        )
    } else {
        Span::styled(
            format!("{}│", medpix.filtro),
            Style::default().fg(theme.text),
        )
    };

    let block = Block::default()
        .title(" Filtro ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);
}

fn render_tabela(frame: &mut Frame<'_>, area: Rect, medpix: &MedPixState, theme: &Theme) {
    let block = Block::default()
        .title(" Protocolos ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim));

    if medpix.carregando {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Carregando dados do MedPix...",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let visiveis = listing::filtra_protocolos(&medpix.protocolos, &medpix.filtro);
    if visiveis.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Nenhum protocolo encontrado",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let header = Row::new(["Protocolo", "Data", "Hora", "Valor", "Status"]).style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let rows = visiveis
        .iter()
        .map(|p| {
            Row::new(vec![
                Span::raw(p.protocolo.clone()),
                Span::raw(data_brasileira(&p.data)),
                Span::raw(p.hora.chars().take(5).collect::<String>()),
                Span::raw(money::format_brl(p.valor)),
                Span::styled(
                    p.status.as_str(),
                    Style::default().fg(cor_do_status(p.status, theme)),
                ),
            ])
        })
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Min(12),
        Constraint::Length(10),
        Constraint::Length(6),
        Constraint::Length(14),
        Constraint::Min(11),
    ];

    let mut table_state = TableState::default();
    table_state.select(Some(medpix.selecionado.min(visiveis.len() - 1)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(table, area, &mut table_state);
}

fn cor_do_status(status: ProtocoloStatus, theme: &Theme) -> ratatui::style::Color {
    match status {
        ProtocoloStatus::EmAnalise => theme.info,
        ProtocoloStatus::Deferido => theme.positive,
        ProtocoloStatus::Indeferido => theme.dim,
    }
}

/// `aaaa-mm-dd` on the wire, `dd/mm/aaaa` on screen.
fn data_brasileira(data: &str) -> String {
    NaiveDate::parse_from_str(data, "%Y-%m-%d")
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| data.to_string())
}
