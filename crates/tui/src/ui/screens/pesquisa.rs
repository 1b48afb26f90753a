use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{app::AppState, ui::components::modal, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_busca(frame, layout[0], state, theme);
    render_resultados(frame, layout[1], state, theme);

    if state.pesquisa.abrindo.is_some() {
        modal::render(
            frame,
            area,
            "Aguarde",
            vec![Line::from("Carregando perfil do cliente...")],
            Style::default().fg(theme.accent),
        );
    }
}

fn render_busca(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let query = state.pesquisa.query.as_str();
    let content = if query.is_empty() {
        Span::styled(
            "Digite o nome, CPF ou número da conta para encontrar o cliente",
            Style::default().fg(theme.dim),
        )
    } else {
        Span::styled(format!("{query}│"), Style::default().fg(theme.text))
    };

    let block = Block::default()
        .title(" Pesquisa de Clientes ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);
}

fn render_resultados(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let resultados = &state.pesquisa.resultados;
    let block = Block::default()
        .title(format!(" Resultados ({}) ", resultados.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim));

    if resultados.is_empty() {
        let texto = if state.pesquisa.buscando {
            "Buscando..."
        } else {
            "Nenhum cliente encontrado. Tente pesquisar com outros termos."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(texto, Style::default().fg(theme.dim)))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let items = resultados
        .iter()
        .map(|cliente| {
            let text = format!(
                "{}   CPF: {}   Email: {}   Telefone: {}",
                cliente.nome, cliente.cpf, cliente.email, cliente.telefone
            );
            ListItem::new(Line::from(text))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.pesquisa.selecionado));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}
