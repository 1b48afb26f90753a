use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use api_types::estatisticas::Estatisticas;

use crate::{
    app::{AppState, PerfilState},
    listing,
    ui::{
        components::{charts, modal, money},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(perfil) = state.perfil.as_ref() else {
        return;
    };

    // Rendering waits on the statistics fetch only; the anomaly cards
    // and the MedPix count fill in whenever their responses land.
    let Some(estatisticas) = perfil.estatisticas.as_ref() else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Carregando dados do cliente...",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            modal::centered(area.width, 1, area),
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(38)])
        .split(area);

    render_principal(frame, layout[0], perfil, estatisticas, theme);
    render_aside(frame, layout[1], perfil, estatisticas, theme);

    if perfil.mostrar_detalhes {
        render_detalhes(frame, area, perfil, theme);
    }
}

fn render_principal(
    frame: &mut Frame<'_>,
    area: Rect,
    perfil: &PerfilState,
    estatisticas: &Estatisticas,
    theme: &Theme,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(area);

    let cards = [
        (
            "Média Mensal no PIX",
            money::format_brl(estatisticas.media_mensal_pix),
        ),
        (
            "Valor Médio p/ Contas Novas",
            money::format_brl(estatisticas.media_valor_contas_novas),
        ),
        (
            "Média Mensal de Transações",
            money::format_brl(estatisticas.media_mensal_transacoes),
        ),
        (
            "Últimos 180 dias de PIX",
            money::format_brl(estatisticas.total_180_dias),
        ),
    ];
    render_linha_de_cards(frame, layout[0], &cards, theme);

    let cards = [
        (
            "PIX nos últimos 180 dias",
            estatisticas.qtd_pix_180_dias.to_string(),
        ),
        (
            "Dia da Semana Padrão",
            estatisticas.dia_semana_padrao.clone(),
        ),
        ("Dia do Mês Padrão", estatisticas.dia_mes_padrao.to_string()),
        ("Horário Padrão de PIX", estatisticas.horario_padrao.clone()),
    ];
    render_linha_de_cards(frame, layout[1], &cards, theme);

    render_distribuicao(frame, layout[2], estatisticas, theme);
    render_anomalias(frame, layout[3], perfil, theme);
}

/// Time-of-day PIX distribution over the four fixed bands, one bar per
/// band. Bands without data render as an empty bar.
fn render_distribuicao(
    frame: &mut Frame<'_>,
    area: Rect,
    estatisticas: &Estatisticas,
    theme: &Theme,
) {
    let bandas = charts::distribuicao_por_banda(estatisticas.horarios_distribuicao.as_ref());
    let total: f64 = bandas.iter().map(|(_, valor)| valor).sum();

    let lines = bandas
        .iter()
        .map(|(banda, valor)| {
            let pct = charts::percentual(*valor, total);
            Line::from(vec![
                Span::styled(format!("{banda:<16}"), Style::default().fg(theme.dim)),
                Span::styled(
                    charts::barra_percentual(pct, 20),
                    Style::default().fg(theme.accent),
                ),
            ])
        })
        .collect::<Vec<_>>();

    let block = Block::default()
        .title(" Distribuição de Horários de PIX ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_linha_de_cards(
    frame: &mut Frame<'_>,
    area: Rect,
    cards: &[(&str, String)],
    theme: &Theme,
) {
    let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (coluna, (titulo, valor)) in columns.iter().zip(cards) {
        let block = Block::default()
            .title(format!(" {titulo} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.dim));
        frame.render_widget(
            Paragraph::new(Span::styled(
                valor.as_str(),
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ))
            .block(block),
            *coluna,
        );
    }
}

fn render_anomalias(frame: &mut Frame<'_>, area: Rect, perfil: &PerfilState, theme: &Theme) {
    let block = Block::default()
        .title(" Transações Fora do Padrão ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.warning));

    if perfil.anomalias.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Nenhuma transação fora do padrão.",
                Style::default().fg(theme.dim),
            ))
            .block(block),
            area,
        );
        return;
    }

    let mut lines = Vec::new();
    for transacao in &perfil.anomalias {
        lines.push(Line::from(vec![
            Span::styled("Valor", Style::default().fg(theme.dim)),
            Span::raw(format!(": {}   ", money::format_brl(transacao.valor))),
            Span::styled("Horário", Style::default().fg(theme.dim)),
            Span::raw(format!(": {}, {}", transacao.data, transacao.hora)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Destinatário", Style::default().fg(theme.dim)),
            Span::raw(format!(": {}", transacao.chavepix_destinatario)),
        ]));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "h para acompanhar todas as transações",
        Style::default().fg(theme.dim),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_aside(
    frame: &mut Frame<'_>,
    area: Rect,
    perfil: &PerfilState,
    estatisticas: &Estatisticas,
    theme: &Theme,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(area);

    let cliente = &perfil.cliente;
    let dados = vec![
        linha_rotulada("Conta", &cliente.conta, theme),
        linha_rotulada("Agência", &cliente.agencia, theme),
        linha_rotulada("CPF", &cliente.cpf, theme),
        linha_rotulada("Dispositivo usual", &estatisticas.dispositivo_mais_usado, theme),
        Line::from(Span::styled(
            "d para mais detalhes",
            Style::default().fg(theme.dim),
        )),
    ];
    let block = Block::default()
        .title(" Dados do Cliente ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(dados).block(block), layout[0]);

    render_destinatarios(frame, layout[1], estatisticas, theme);

    let contagem = perfil
        .medpix_count
        .map(|count| count.to_string())
        .unwrap_or_else(|| "-".to_string());
    let medpix = vec![
        linha_rotulada("MED PIX solicitados", &contagem, theme),
        Line::from(Span::styled(
            "m para acompanhar protocolos",
            Style::default().fg(theme.dim),
        )),
    ];
    let block = Block::default()
        .title(" MED PIX ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(medpix).block(block), layout[2]);
}

fn render_destinatarios(
    frame: &mut Frame<'_>,
    area: Rect,
    estatisticas: &Estatisticas,
    theme: &Theme,
) {
    let block = Block::default()
        .title(" Destinatários Frequentes ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    if estatisticas.destinatarios_frequentes.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Nenhum dado encontrado.",
                Style::default().fg(theme.dim),
            ))
            .block(block),
            area,
        );
        return;
    }

    let mut lines = Vec::new();
    for destinatario in &estatisticas.destinatarios_frequentes {
        lines.push(linha_rotulada("Nome", &destinatario.nome, theme));
        lines.push(linha_rotulada("Chave PIX", &destinatario.chave, theme));
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_detalhes(frame: &mut Frame<'_>, area: Rect, perfil: &PerfilState, theme: &Theme) {
    let cliente = &perfil.cliente;
    let idade = listing::idade(&cliente.data_nascimento, Local::now().date_naive())
        .map(|anos| format!("{} ({anos} anos)", cliente.data_nascimento))
        .unwrap_or_else(|| format!("{} (idade desconhecida)", cliente.data_nascimento));

    let linhas = vec![
        linha_rotulada("Nome", &cliente.nome, theme),
        linha_rotulada("CPF", &cliente.cpf, theme),
        linha_rotulada("Data de Nascimento", &idade, theme),
        linha_rotulada("Sexo", &cliente.sexo, theme),
        linha_rotulada("Endereço", &cliente.endereco, theme),
        linha_rotulada("E-mail", &cliente.email, theme),
        linha_rotulada("Telefone", &cliente.telefone, theme),
        linha_rotulada("Conta", &cliente.conta, theme),
        linha_rotulada("Agência", &cliente.agencia, theme),
        Line::from(""),
        Line::from(Span::styled(
            "Esc para fechar",
            Style::default().fg(theme.dim),
        )),
    ];

    modal::render(
        frame,
        area,
        "Mais Detalhes",
        linhas,
        Style::default().fg(theme.accent),
    );
}

fn linha_rotulada<'a>(rotulo: &'a str, valor: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(rotulo, Style::default().fg(theme.dim)),
        Span::raw(format!(": {valor}")),
    ])
}
