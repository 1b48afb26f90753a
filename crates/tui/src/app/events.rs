use api_types::{
    auth::TokenResponse,
    cliente::Cliente,
    estatisticas::Estatisticas,
    medpix::{Contagem, Protocolo},
    transacao::TransacaoAnomala,
};

use crate::client::ClientError;

/// Completion of a spawned fetch, delivered through the app channel.
///
/// Every event carries the navigation `generation` it was spawned
/// under; the handler drops events whose generation no longer matches,
/// which is how responses that arrive after the user left a view are
/// discarded. Search results additionally carry a per-query `seq` so
/// only the answer to the latest keystroke is applied.
#[derive(Debug)]
pub enum DataEvent {
    Login(Result<TokenResponse, ClientError>),
    Busca {
        generation: u64,
        seq: u64,
        result: Result<Cliente, ClientError>,
    },
    Estatisticas {
        generation: u64,
        result: Result<Estatisticas, ClientError>,
    },
    AnomalasRecentes {
        generation: u64,
        result: Result<Vec<TransacaoAnomala>, ClientError>,
    },
    MedPixCount {
        generation: u64,
        result: Result<Contagem, ClientError>,
    },
    Historico {
        generation: u64,
        result: Result<Vec<TransacaoAnomala>, ClientError>,
    },
    Protocolos {
        generation: u64,
        result: Result<Vec<Protocolo>, ClientError>,
    },
    Arquivamento {
        generation: u64,
        protocolo: String,
        result: Result<(), ClientError>,
    },
}
