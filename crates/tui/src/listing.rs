use api_types::{medpix::Protocolo, transacao::TransacaoAnomala};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Composes the sort key for an anomalous transaction.
///
/// `data` is `dd/mm/aaaa`, `hora` is `HH:MM` or `HH:MM:SS`. Both
/// operands of a comparison go through this same parse; entries that
/// fail to parse sort after every dated one.
fn momento(transacao: &TransacaoAnomala) -> Option<NaiveDateTime> {
    let data = NaiveDate::parse_from_str(&transacao.data, "%d/%m/%Y").ok()?;
    let hora = NaiveTime::parse_from_str(&transacao.hora, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&transacao.hora, "%H:%M"))
        .ok()?;
    Some(data.and_time(hora))
}

/// The 3 most recent transactions by composed date+time, descending.
///
/// The sort is stable, so ties keep the response order.
pub fn tres_mais_recentes(transacoes: &[TransacaoAnomala]) -> Vec<TransacaoAnomala> {
    let mut ordenado = transacoes.to_vec();
    ordenado.sort_by(|a, b| momento(b).cmp(&momento(a)));
    ordenado.truncate(3);
    ordenado
}

/// Case-insensitive substring filter over the displayed transaction
/// fields. An empty term keeps the full list.
pub fn filtra_transacoes<'a>(
    transacoes: &'a [TransacaoAnomala],
    termo: &str,
) -> Vec<&'a TransacaoAnomala> {
    let termo = termo.to_lowercase();
    transacoes
        .iter()
        .filter(|t| {
            [
                t.data.as_str(),
                t.hora.as_str(),
                &t.valor.to_string(),
                t.chavepix_destinatario.as_str(),
                t.nome_dispositivo(),
                t.tipo_transacao.as_str(),
            ]
            .iter()
            .any(|campo| campo.to_lowercase().contains(&termo))
        })
        .collect()
}

/// Same semantics as [`filtra_transacoes`], over protocol fields.
pub fn filtra_protocolos<'a>(protocolos: &'a [Protocolo], termo: &str) -> Vec<&'a Protocolo> {
    let termo = termo.to_lowercase();
    protocolos
        .iter()
        .filter(|p| {
            [
                p.protocolo.as_str(),
                p.data.as_str(),
                &p.valor.to_string(),
                p.status.as_str(),
            ]
            .iter()
            .any(|campo| campo.to_lowercase().contains(&termo))
        })
        .collect()
}

/// Whole elapsed years between `data_nascimento` and `hoje`.
///
/// Accepts ISO (`aaaa-mm-dd`) or Brazilian (`dd/mm/aaaa`) dates.
pub fn idade(data_nascimento: &str, hoje: NaiveDate) -> Option<i32> {
    let nascimento = NaiveDate::parse_from_str(data_nascimento, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(data_nascimento, "%d/%m/%Y"))
        .ok()?;

    let mut anos = hoje.year() - nascimento.year();
    if (hoje.month(), hoje.day()) < (nascimento.month(), nascimento.day()) {
        anos -= 1;
    }
    Some(anos)
}

#[cfg(test)]
mod tests {
    use api_types::medpix::{Protocolo, ProtocoloStatus};

    use super::*;

    fn transacao(id: &str, data: &str, hora: &str) -> TransacaoAnomala {
        TransacaoAnomala {
            id: id.to_string(),
            valor: 150.5,
            data: data.to_string(),
            hora: hora.to_string(),
            chavepix_destinatario: "chave@exemplo.com".to_string(),
            nome_destinatario: "Destinatário".to_string(),
            dispositivo: 1,
            tipo_transacao: "PIX".to_string(),
            motivo: "valor fora do padrão".to_string(),
        }
    }

    #[test]
    fn mantem_as_tres_mais_recentes_em_ordem_decrescente() {
        let transacoes = vec![
            transacao("T1", "05/01/2024", "10:00"),
            transacao("T2", "06/01/2024", "09:00"),
            transacao("T3", "04/01/2024", "08:00"),
            transacao("T4", "07/01/2024", "07:00"),
        ];

        let recentes = tres_mais_recentes(&transacoes);
        let ids: Vec<&str> = recentes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["T4", "T2", "T1"]);
    }

    #[test]
    fn empates_preservam_a_ordem_da_resposta() {
        let transacoes = vec![
            transacao("A", "05/01/2024", "10:00"),
            transacao("B", "05/01/2024", "10:00"),
            transacao("C", "06/01/2024", "10:00"),
            transacao("D", "05/01/2024", "10:00"),
        ];

        let recentes = tres_mais_recentes(&transacoes);
        let ids: Vec<&str> = recentes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["C", "A", "B"]);
    }

    #[test]
    fn data_invalida_ordena_por_ultimo() {
        let transacoes = vec![
            transacao("X", "not-a-date", "10:00"),
            transacao("Y", "05/01/2024", "10:00"),
        ];

        let recentes = tres_mais_recentes(&transacoes);
        let ids: Vec<&str> = recentes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["Y", "X"]);
    }

    #[test]
    fn hora_com_segundos_tambem_compoe_a_chave() {
        let transacoes = vec![
            transacao("A", "05/01/2024", "10:00:01"),
            transacao("B", "05/01/2024", "10:00:30"),
        ];

        let recentes = tres_mais_recentes(&transacoes);
        assert_eq!(recentes[0].id, "B");
    }

    #[test]
    fn filtro_vazio_mantem_a_lista_inteira() {
        let transacoes = vec![
            transacao("T1", "05/01/2024", "10:00"),
            transacao("T2", "06/01/2024", "09:00"),
        ];
        assert_eq!(filtra_transacoes(&transacoes, "").len(), 2);
    }

    #[test]
    fn filtro_ignora_maiusculas_e_cobre_nome_do_dispositivo() {
        let mut ios = transacao("T2", "06/01/2024", "09:00");
        ios.dispositivo = 2;
        let transacoes = vec![transacao("T1", "05/01/2024", "10:00"), ios];

        let filtradas = filtra_transacoes(&transacoes, "IOS");
        assert_eq!(filtradas.len(), 1);
        assert_eq!(filtradas[0].id, "T2");

        let filtradas = filtra_transacoes(&transacoes, "android");
        assert_eq!(filtradas.len(), 1);
        assert_eq!(filtradas[0].id, "T1");
    }

    #[test]
    fn filtro_sem_correspondencia_retorna_vazio() {
        let transacoes = vec![transacao("T1", "05/01/2024", "10:00")];
        assert!(filtra_transacoes(&transacoes, "zzz").is_empty());
    }

    fn protocolo(protocolo: &str, status: ProtocoloStatus) -> Protocolo {
        Protocolo {
            id: protocolo.to_string(),
            protocolo: protocolo.to_string(),
            data: "2024-02-10".to_string(),
            hora: "09:30:00".to_string(),
            valor: 320.0,
            status,
        }
    }

    #[test]
    fn filtro_de_protocolos_cobre_o_status() {
        let protocolos = vec![
            protocolo("P-100", ProtocoloStatus::EmAnalise),
            protocolo("P-200", ProtocoloStatus::Deferido),
        ];

        let filtrados = filtra_protocolos(&protocolos, "deferido");
        let ids: Vec<&str> = filtrados.iter().map(|p| p.protocolo.as_str()).collect();
        assert_eq!(ids, ["P-200"]);

        let filtrados = filtra_protocolos(&protocolos, "p-1");
        assert_eq!(filtrados.len(), 1);
        assert_eq!(filtrados[0].protocolo, "P-100");
    }

    #[test]
    fn idade_antes_e_depois_do_aniversario() {
        let nascimento = "1990-06-15";
        let vespera = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let aniversario = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        assert_eq!(idade(nascimento, vespera), Some(33));
        assert_eq!(idade(nascimento, aniversario), Some(34));
    }

    #[test]
    fn idade_aceita_data_brasileira_e_rejeita_lixo() {
        let hoje = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(idade("15/06/1990", hoje), Some(33));
        assert_eq!(idade("quinze de junho", hoje), None);
    }
}
