use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{AppState, HistoricoState},
    listing,
    ui::{
        components::{modal, money},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(historico) = state.historico.as_ref() else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_filtro(frame, layout[0], historico, theme);
    render_tabela(frame, layout[1], historico, theme);

    if let Some(id) = historico.motivo_aberto.as_deref() {
        render_motivo(frame, area, historico, id, theme);
    }
}

fn render_filtro(frame: &mut Frame<'_>, area: Rect, historico: &HistoricoState, theme: &Theme) {
    let content = if historico.filtro.is_empty() {
        Span::styled("Pesquisar transação...", Style::default().fg(theme.dim))
    } else {
        Span::styled(
            format!("{}│", historico.filtro),
            Style::default().fg(theme.text),
        )
    };

    let block = Block::default()
        .title(" Filtro ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);
}

fn render_tabela(frame: &mut Frame<'_>, area: Rect, historico: &HistoricoState, theme: &Theme) {
    let block = Block::default()
        .title(" Transações Anômalas ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim));

    if historico.carregando {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Carregando transações...",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let visiveis = listing::filtra_transacoes(&historico.transacoes, &historico.filtro);
    if visiveis.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Nenhuma transação encontrada.",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center)
            .block(block),
            area,
        );
        return;
    }

    let header = Row::new(["Data", "Hora", "Valor", "Chave PIX", "Dispositivo", "Tipo"])
        .style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );

    let rows = visiveis
        .iter()
        .map(|t| {
            Row::new(vec![
                t.data.clone(),
                t.hora.clone(),
                money::format_brl(t.valor),
                t.chavepix_destinatario.clone(),
                t.nome_dispositivo().to_string(),
                t.tipo_transacao.clone(),
            ])
        })
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Min(18),
        Constraint::Length(11),
        Constraint::Min(10),
    ];

    let mut table_state = TableState::default();
    table_state.select(Some(historico.selecionado.min(visiveis.len() - 1)));

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

fn render_motivo(
    frame: &mut Frame<'_>,
    area: Rect,
    historico: &HistoricoState,
    id: &str,
    theme: &Theme,
) {
    let Some(transacao) = historico.transacoes.iter().find(|t| t.id == id) else {
        return;
    };

    let linhas = vec![
        Line::from(transacao.motivo.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Esc para fechar",
            Style::default().fg(theme.dim),
        )),
    ];

    modal::render(
        frame,
        area,
        "Motivo",
        linhas,
        Style::default().fg(theme.warning),
    );
}
