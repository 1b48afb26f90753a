use serde::{Deserialize, Serialize};

pub mod auth {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TokenResponse {
        pub access_token: String,
    }
}

pub mod cliente {
    use super::*;

    /// A customer record as returned by `/clientes/buscar/{query}`.
    ///
    /// Display-only: the client never writes any of these fields back.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Cliente {
        pub id: String,
        pub nome: String,
        pub cpf: String,
        pub conta: String,
        pub agencia: String,
        /// ISO date (`aaaa-mm-dd`).
        pub data_nascimento: String,
        pub sexo: String,
        pub endereco: String,
        pub email: String,
        pub telefone: String,
    }
}

pub mod estatisticas {
    use std::collections::BTreeMap;

    use super::*;

    /// Aggregate behavioral metrics for one customer.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Estatisticas {
        pub media_mensal_pix: f64,
        pub media_valor_contas_novas: f64,
        pub media_mensal_transacoes: f64,
        pub total_180_dias: f64,
        pub qtd_pix_180_dias: u32,
        pub dia_semana_padrao: String,
        pub dia_mes_padrao: u8,
        pub horario_padrao: String,
        pub dispositivo_mais_usado: String,
        #[serde(default)]
        pub destinatarios_frequentes: Vec<Destinatario>,
        /// Share of PIX per time-of-day band, keyed by band label.
        #[serde(default)]
        pub horarios_distribuicao: Option<BTreeMap<String, f64>>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Destinatario {
        pub nome: String,
        pub chave: String,
    }
}

pub mod transacao {
    use super::*;

    /// A transaction flagged by the backend as behaviorally unusual.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TransacaoAnomala {
        pub id: String,
        pub valor: f64,
        /// Brazilian date (`dd/mm/aaaa`).
        pub data: String,
        /// `HH:MM` or `HH:MM:SS`.
        pub hora: String,
        pub chavepix_destinatario: String,
        pub nome_destinatario: String,
        /// Device code: 1 = Android, 2 = iOS, 3 = Web.
        pub dispositivo: u8,
        pub tipo_transacao: String,
        /// Free text explaining why the transaction was flagged.
        pub motivo: String,
    }

    impl TransacaoAnomala {
        pub fn nome_dispositivo(&self) -> &'static str {
            match self.dispositivo {
                1 => "Android",
                2 => "iOS",
                3 => "Web",
                _ => "N/A",
            }
        }
    }
}

pub mod medpix {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum ProtocoloStatus {
        #[serde(rename = "EM ANÁLISE")]
        EmAnalise,
        #[serde(rename = "DEFERIDO")]
        Deferido,
        #[serde(rename = "INDEFERIDO")]
        Indeferido,
    }

    impl ProtocoloStatus {
        /// Returns the wire/display string for the status.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::EmAnalise => "EM ANÁLISE",
                Self::Deferido => "DEFERIDO",
                Self::Indeferido => "INDEFERIDO",
            }
        }
    }

    /// A MedPix dispute protocol.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Protocolo {
        pub id: String,
        pub protocolo: String,
        /// ISO date (`aaaa-mm-dd`).
        pub data: String,
        /// `HH:MM` or `HH:MM:SS`.
        pub hora: String,
        pub valor: f64,
        pub status: ProtocoloStatus,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Contagem {
        pub count: u64,
    }
}

#[cfg(test)]
mod tests {
    use super::medpix::{Protocolo, ProtocoloStatus};
    use super::transacao::TransacaoAnomala;

    #[test]
    fn protocolo_status_round_trips_wire_strings() {
        let protocolo: Protocolo = serde_json::from_str(
            r#"{"id":"1","protocolo":"P-100","data":"2024-02-10","hora":"09:30:00","valor":120.5,"status":"EM ANÁLISE"}"#,
        )
        .unwrap();
        assert_eq!(protocolo.status, ProtocoloStatus::EmAnalise);
        assert_eq!(protocolo.status.as_str(), "EM ANÁLISE");
    }

    #[test]
    fn dispositivo_maps_unknown_codes_to_na() {
        let tx: TransacaoAnomala = serde_json::from_str(
            r#"{"id":"t1","valor":10.0,"data":"05/01/2024","hora":"10:00","chavepix_destinatario":"k","nome_destinatario":"n","dispositivo":7,"tipo_transacao":"PIX","motivo":"m"}"#,
        )
        .unwrap();
        assert_eq!(tx.nome_dispositivo(), "N/A");
    }
}
