use api_types::{
    auth::TokenResponse,
    cliente::Cliente,
    estatisticas::Estatisticas,
    medpix::{Contagem, Protocolo},
    transacao::TransacaoAnomala,
};
use reqwest::Url;

use serde::Deserialize;

use crate::error::{AppError, Result};

#[derive(Debug)]
pub enum ClientError {
    Unauthorized,
    NotFound,
    Server(String),
    Transport(reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|err| {
            AppError::Config(config::ConfigError::Message(format!(
                "invalid base_url: {err}"
            )))
        })?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Builds an endpoint URL from path segments.
    ///
    /// Segments go through the URL path encoder, so user-typed values
    /// (search queries, protocol ids) cannot break out of their segment.
    fn endpoint(&self, segments: &[&str]) -> std::result::Result<Url, ClientError> {
        let mut endpoint = self.base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|_| ClientError::Server("base_url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(endpoint)
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<TokenResponse, ClientError> {
        let endpoint = self.endpoint(&["auth", "login"])?;

        let res = self
            .http
            .post(endpoint)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<TokenResponse>()
                .await
                .map_err(ClientError::Transport);
        }
        Err(error_for(res).await)
    }

    pub async fn buscar_cliente(
        &self,
        token: &str,
        query: &str,
    ) -> std::result::Result<Cliente, ClientError> {
        let endpoint = self.endpoint(&["clientes", "buscar", query])?;

        let res = self
            .http
            .get(endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<Cliente>().await.map_err(ClientError::Transport);
        }
        Err(error_for(res).await)
    }

    pub async fn estatisticas(
        &self,
        token: &str,
        cliente_id: &str,
    ) -> std::result::Result<Estatisticas, ClientError> {
        let endpoint = self.endpoint(&["clientes", cliente_id, "estatisticas"])?;

        let res = self
            .http
            .get(endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<Estatisticas>()
                .await
                .map_err(ClientError::Transport);
        }
        Err(error_for(res).await)
    }

    pub async fn anomalas(
        &self,
        token: &str,
        cliente_id: &str,
    ) -> std::result::Result<Vec<TransacaoAnomala>, ClientError> {
        let endpoint = self.endpoint(&["clientes", cliente_id, "anomalas"])?;

        let res = self
            .http
            .get(endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<Vec<TransacaoAnomala>>()
                .await
                .map_err(ClientError::Transport);
        }
        Err(error_for(res).await)
    }

    pub async fn protocolos(
        &self,
        token: &str,
        cliente_id: &str,
    ) -> std::result::Result<Vec<Protocolo>, ClientError> {
        let endpoint = self.endpoint(&["medpix", cliente_id])?;

        let res = self
            .http
            .get(endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<Vec<Protocolo>>()
                .await
                .map_err(ClientError::Transport);
        }
        Err(error_for(res).await)
    }

    pub async fn protocolos_count(
        &self,
        token: &str,
        cliente_id: &str,
    ) -> std::result::Result<Contagem, ClientError> {
        let endpoint = self.endpoint(&["medpix", cliente_id, "count"])?;

        let res = self
            .http
            .get(endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<Contagem>().await.map_err(ClientError::Transport);
        }
        Err(error_for(res).await)
    }

    pub async fn arquivar_protocolo(
        &self,
        token: &str,
        protocolo: &str,
    ) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&["medpix", "protocolo", protocolo, "arquivar"])?;

        let res = self
            .http
            .post(endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(error_for(res).await)
    }
}

async fn error_for(res: reqwest::Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.detail)
        .unwrap_or_else(|_| "unknown error".to_string());

    match status.as_u16() {
        401 => ClientError::Unauthorized,
        404 => ClientError::NotFound,
        _ => ClientError::Server(body),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Form, Json, Router,
        extract::Path,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{get, post},
    };
    use serde_json::json;

    use super::*;

    async fn serve(router: Router) -> Client {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Client::new(&format!("http://{addr}")).unwrap()
    }

    #[derive(Deserialize)]
    struct Credenciais {
        username: String,
        password: String,
    }

    #[tokio::test]
    async fn login_envia_formulario_e_decodifica_o_token() {
        let client = serve(Router::new().route(
            "/auth/login",
            post(|Form(form): Form<Credenciais>| async move {
                if form.username == "ana" && form.password == "s3cret" {
                    Json(json!({"access_token": "tok123"})).into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({"detail": "invalid"}))).into_response()
                }
            }),
        ))
        .await;

        let token = client.login("ana", "s3cret").await.unwrap();
        assert_eq!(token.access_token, "tok123");

        let err = client.login("ana", "errada").await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[tokio::test]
    async fn busca_propaga_o_bearer_e_codifica_o_termo() {
        let client = serve(Router::new().route(
            "/clientes/buscar/{query}",
            get(|Path(query): Path<String>, headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                if auth != "Bearer tok123" {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "no token"})))
                        .into_response();
                }
                Json(json!({
                    "id": "c1",
                    "nome": query,
                    "cpf": "111",
                    "conta": "12345-6",
                    "agencia": "12",
                    "data_nascimento": "1990-06-15",
                    "sexo": "F",
                    "endereco": "Rua A, 1",
                    "email": "maria@exemplo.com",
                    "telefone": "(79) 99999-0000",
                }))
                .into_response()
            }),
        ))
        .await;

        // The slash must travel inside the segment, not split the path.
        let cliente = client
            .buscar_cliente("tok123", "Maria/Silva")
            .await
            .unwrap();
        assert_eq!(cliente.nome, "Maria/Silva");

        let err = client.buscar_cliente("outro", "Maria").await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[tokio::test]
    async fn busca_sem_correspondencia_vira_not_found() {
        let client = serve(Router::new().route(
            "/clientes/buscar/{query}",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"detail": "não encontrado"}))) }),
        ))
        .await;

        let err = client.buscar_cliente("tok", "ninguem").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound));
    }

    #[tokio::test]
    async fn erro_do_servidor_carrega_o_detalhe() {
        let client = serve(Router::new().route(
            "/clientes/{id}/estatisticas",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "banco indisponível"})),
                )
            }),
        ))
        .await;

        let err = client.estatisticas("tok", "c1").await.unwrap_err();
        match err {
            ClientError::Server(detail) => assert_eq!(detail, "banco indisponível"),
            other => panic!("esperava Server, veio {other:?}"),
        }
    }

    #[tokio::test]
    async fn estatisticas_aceita_os_campos_opcionais_ausentes() {
        let client = serve(Router::new().route(
            "/clientes/{id}/estatisticas",
            get(|| async {
                Json(json!({
                    "media_mensal_pix": 1200.5,
                    "media_valor_contas_novas": 300.0,
                    "media_mensal_transacoes": 950.0,
                    "total_180_dias": 7200.0,
                    "qtd_pix_180_dias": 48,
                    "dia_semana_padrao": "Sexta-feira",
                    "dia_mes_padrao": 5,
                    "horario_padrao": "14:00 às 19:00",
                    "dispositivo_mais_usado": "Android",
                }))
            }),
        ))
        .await;

        let estatisticas = client.estatisticas("tok", "c1").await.unwrap();
        assert!(estatisticas.destinatarios_frequentes.is_empty());
        assert!(estatisticas.horarios_distribuicao.is_none());
        assert_eq!(estatisticas.qtd_pix_180_dias, 48);
    }

    #[tokio::test]
    async fn arquivar_posta_no_caminho_do_protocolo() {
        let client = serve(Router::new().route(
            "/medpix/protocolo/{protocolo}/arquivar",
            post(|Path(protocolo): Path<String>| async move {
                if protocolo == "P-100" {
                    StatusCode::OK.into_response()
                } else {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"detail": "falhou"})),
                    )
                        .into_response()
                }
            }),
        ))
        .await;

        assert!(client.arquivar_protocolo("tok", "P-100").await.is_ok());

        let err = client.arquivar_protocolo("tok", "P-999").await.unwrap_err();
        assert!(matches!(err, ClientError::Server(_)));
    }

    #[tokio::test]
    async fn contagem_e_protocolos_compartilham_o_prefixo_medpix() {
        let client = serve(
            Router::new()
                .route(
                    "/medpix/{id}",
                    get(|| async {
                        Json(json!([{
                            "id": "p1",
                            "protocolo": "P-100",
                            "data": "2024-02-10",
                            "hora": "09:30:00",
                            "valor": 320.0,
                            "status": "DEFERIDO",
                        }]))
                    }),
                )
                .route(
                    "/medpix/{id}/count",
                    get(|| async { Json(json!({"count": 7})) }),
                ),
        )
        .await;

        let protocolos = client.protocolos("tok", "c1").await.unwrap();
        assert_eq!(protocolos.len(), 1);
        assert_eq!(protocolos[0].protocolo, "P-100");

        let contagem = client.protocolos_count("tok", "c1").await.unwrap();
        assert_eq!(contagem.count, 7);
    }
}
