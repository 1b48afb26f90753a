use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    listing,
    session::Session,
    ui,
};

use api_types::{
    cliente::Cliente, estatisticas::Estatisticas, medpix::Protocolo, transacao::TransacaoAnomala,
};

pub mod events;

use events::DataEvent;
use ui::keymap::AppAction;

/// Fixed overlay delay between picking a search result and opening the
/// profile.
const ABRIR_PERFIL_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Pesquisa,
    Perfil,
    Historico,
    MedPix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Usuario,
    Senha,
}

#[derive(Debug)]
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub submitting: bool,
    pub message: Option<String>,
}

#[derive(Debug, Default)]
pub struct PesquisaState {
    pub query: String,
    pub resultados: Vec<Cliente>,
    pub buscando: bool,
    pub selecionado: usize,
    /// Result picked by the operator, with the instant the overlay
    /// appeared. Input is blocked until the delay elapses.
    pub abrindo: Option<(Cliente, Instant)>,
    seq: u64,
}

#[derive(Debug)]
pub struct PerfilState {
    pub cliente: Cliente,
    pub estatisticas: Option<Estatisticas>,
    pub anomalias: Vec<TransacaoAnomala>,
    pub medpix_count: Option<u64>,
    pub mostrar_detalhes: bool,
}

impl PerfilState {
    /// The customer context is a constructor parameter: this view
    /// cannot exist without one.
    fn new(cliente: Cliente) -> Self {
        Self {
            cliente,
            estatisticas: None,
            anomalias: Vec::new(),
            medpix_count: None,
            mostrar_detalhes: false,
        }
    }
}

#[derive(Debug)]
pub struct HistoricoState {
    pub cliente: Cliente,
    pub transacoes: Vec<TransacaoAnomala>,
    pub carregando: bool,
    pub filtro: String,
    pub selecionado: usize,
    /// Id of the transaction whose `motivo` popup is open, if any.
    pub motivo_aberto: Option<String>,
}

impl HistoricoState {
    fn new(cliente: Cliente) -> Self {
        Self {
            cliente,
            transacoes: Vec::new(),
            carregando: true,
            filtro: String::new(),
            selecionado: 0,
            motivo_aberto: None,
        }
    }
}

#[derive(Debug)]
pub struct MedPixState {
    pub cliente: Cliente,
    pub protocolos: Vec<Protocolo>,
    pub carregando: bool,
    pub filtro: String,
    pub selecionado: usize,
    /// Blocking archive-failure message; dismissed before any other
    /// input reaches the view.
    pub erro_arquivamento: Option<String>,
}

impl MedPixState {
    fn new(cliente: Cliente) -> Self {
        Self {
            cliente,
            protocolos: Vec::new(),
            carregando: true,
            filtro: String::new(),
            selecionado: 0,
            erro_arquivamento: None,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub login: LoginState,
    pub pesquisa: PesquisaState,
    pub perfil: Option<PerfilState>,
    pub historico: Option<HistoricoState>,
    pub medpix: Option<MedPixState>,
    pub base_url: String,
}

pub struct App {
    config: AppConfig,
    client: Client,
    session: Session,
    pub state: AppState,
    events_tx: mpsc::UnboundedSender<DataEvent>,
    events_rx: mpsc::UnboundedReceiver<DataEvent>,
    /// Bumped on every navigation; events tagged with an older value
    /// belong to a view that no longer exists and are dropped.
    generation: u64,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let session = Session::load(&config.session_path)?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let screen = if session.is_authenticated() {
            Screen::Pesquisa
        } else {
            Screen::Login
        };
        let state = AppState {
            screen,
            login: LoginState {
                username: config.username.clone(),
                password: String::new(),
                focus: LoginField::Usuario,
                submitting: false,
                message: None,
            },
            pesquisa: PesquisaState::default(),
            perfil: None,
            historico: None,
            medpix: None,
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            config,
            client,
            session,
            state,
            events_tx,
            events_rx,
            generation: 0,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            while let Ok(data) = self.events_rx.try_recv() {
                self.handle_data(data);
            }
            self.abrir_perfil_pendente();

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = ui::keymap::map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.screen {
            Screen::Login => self.handle_login_key(action),
            Screen::Pesquisa => self.handle_pesquisa_key(action),
            Screen::Perfil => self.handle_perfil_key(action),
            Screen::Historico => self.handle_historico_key(action),
            Screen::MedPix => self.handle_medpix_key(action),
        }
    }

    // Session guard: protected screens call this before loading data
    // and abort when it returns false.
    fn ensure_authenticated(&mut self) -> bool {
        if self.session.is_authenticated() {
            return true;
        }
        self.state.screen = Screen::Login;
        false
    }

    /// Reaction to a 401 from any endpoint: clear and persist the
    /// token, drop every in-flight view, return to Login. Silent on
    /// purpose; there is no user-facing message for expiry.
    fn expire_session(&mut self) {
        self.session.clear();
        if let Err(err) = self.session.save(&self.config.session_path) {
            tracing::error!("falha ao persistir a sessão: {err}");
        }
        self.generation += 1;
        self.state.perfil = None;
        self.state.historico = None;
        self.state.medpix = None;
        self.state.pesquisa = PesquisaState::default();
        self.state.login.submitting = false;
        self.state.login.message = None;
        self.state.screen = Screen::Login;
    }

    fn token(&self) -> Option<String> {
        self.session.token().map(str::to_string)
    }

    // ---- Login ----

    fn handle_login_key(&mut self, action: AppAction) {
        match action {
            AppAction::NextField => {
                self.state.login.focus = match self.state.login.focus {
                    LoginField::Usuario => LoginField::Senha,
                    LoginField::Senha => LoginField::Usuario,
                };
            }
            AppAction::Submit => self.attempt_login(),
            AppAction::Backspace => {
                self.active_login_field_mut().pop();
            }
            AppAction::Input(ch) => {
                self.active_login_field_mut().push(ch);
            }
            _ => {}
        }
    }

    fn active_login_field_mut(&mut self) -> &mut String {
        match self.state.login.focus {
            LoginField::Usuario => &mut self.state.login.username,
            LoginField::Senha => &mut self.state.login.password,
        }
    }

    fn attempt_login(&mut self) {
        if self.state.login.submitting {
            return;
        }

        let username = self.state.login.username.trim().to_string();
        let password = self.state.login.password.trim().to_string();
        if username.is_empty() || password.is_empty() {
            self.state.login.message = Some("Preencha usuário e senha.".to_string());
            return;
        }

        self.state.login.submitting = true;
        self.state.login.message = None;

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.login(&username, &password).await;
            let _ = tx.send(DataEvent::Login(result));
        });
    }

    // ---- Pesquisa ----

    fn handle_pesquisa_key(&mut self, action: AppAction) {
        if self.state.pesquisa.abrindo.is_some() {
            return;
        }

        match action {
            AppAction::Input(ch) => {
                self.state.pesquisa.query.push(ch);
                self.spawn_busca();
            }
            AppAction::Backspace => {
                self.state.pesquisa.query.pop();
                self.spawn_busca();
            }
            AppAction::Up => {
                self.state.pesquisa.selecionado =
                    self.state.pesquisa.selecionado.saturating_sub(1);
            }
            AppAction::Down => {
                let len = self.state.pesquisa.resultados.len();
                if len > 0 {
                    self.state.pesquisa.selecionado =
                        (self.state.pesquisa.selecionado + 1).min(len - 1);
                }
            }
            AppAction::Submit => {
                let selecionado = self.state.pesquisa.selecionado;
                if let Some(cliente) = self.state.pesquisa.resultados.get(selecionado) {
                    self.state.pesquisa.abrindo = Some((cliente.clone(), Instant::now()));
                }
            }
            _ => {}
        }
    }

    /// One lookup per keystroke, no debounce. An empty (or whitespace)
    /// query clears the results without touching the network.
    fn spawn_busca(&mut self) {
        if !self.ensure_authenticated() {
            return;
        }

        let query = self.state.pesquisa.query.trim().to_string();
        if query.is_empty() {
            self.state.pesquisa.resultados.clear();
            self.state.pesquisa.buscando = false;
            return;
        }

        let Some(token) = self.token() else { return };
        self.state.pesquisa.seq += 1;
        self.state.pesquisa.buscando = true;
        let seq = self.state.pesquisa.seq;
        let generation = self.generation;

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.buscar_cliente(&token, &query).await;
            let _ = tx.send(DataEvent::Busca {
                generation,
                seq,
                result,
            });
        });
    }

    fn abrir_perfil_pendente(&mut self) {
        let pronto = self
            .state
            .pesquisa
            .abrindo
            .as_ref()
            .is_some_and(|(_, desde)| desde.elapsed() >= ABRIR_PERFIL_DELAY);
        if pronto {
            if let Some((cliente, _)) = self.state.pesquisa.abrindo.take() {
                self.abrir_perfil(cliente);
            }
        }
    }

    // ---- Perfil ----

    /// Opens the profile for `cliente` and spawns its three fetches.
    ///
    /// The fetches are independent: each one lands on its own slice of
    /// the view state, in whatever order the responses arrive.
    fn abrir_perfil(&mut self, cliente: Cliente) {
        if !self.ensure_authenticated() {
            return;
        }
        let Some(token) = self.token() else { return };

        self.generation += 1;
        let generation = self.generation;
        self.state.historico = None;
        self.state.medpix = None;
        self.state.perfil = Some(PerfilState::new(cliente.clone()));
        self.state.screen = Screen::Perfil;

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let auth = token.clone();
        let id = cliente.id.clone();
        tokio::spawn(async move {
            let result = client.estatisticas(&auth, &id).await;
            let _ = tx.send(DataEvent::Estatisticas { generation, result });
        });

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let auth = token.clone();
        let id = cliente.id.clone();
        tokio::spawn(async move {
            let result = client.anomalas(&auth, &id).await;
            let _ = tx.send(DataEvent::AnomalasRecentes { generation, result });
        });

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let id = cliente.id.clone();
        tokio::spawn(async move {
            let result = client.protocolos_count(&token, &id).await;
            let _ = tx.send(DataEvent::MedPixCount { generation, result });
        });
    }

    fn handle_perfil_key(&mut self, action: AppAction) {
        let Some(perfil) = self.state.perfil.as_mut() else {
            return;
        };

        if perfil.mostrar_detalhes {
            if matches!(action, AppAction::Cancel | AppAction::Submit) {
                perfil.mostrar_detalhes = false;
            }
            return;
        }

        match action {
            AppAction::Input('d') | AppAction::Input('D') => {
                perfil.mostrar_detalhes = true;
            }
            AppAction::Input('h') | AppAction::Input('H') => {
                let cliente = perfil.cliente.clone();
                self.abrir_historico(cliente);
            }
            AppAction::Input('m') | AppAction::Input('M') => {
                let cliente = perfil.cliente.clone();
                self.abrir_medpix(cliente);
            }
            AppAction::Input('s') | AppAction::Input('S') | AppAction::Cancel => {
                self.voltar_para_pesquisa();
            }
            _ => {}
        }
    }

    fn voltar_para_pesquisa(&mut self) {
        self.generation += 1;
        self.state.perfil = None;
        self.state.historico = None;
        self.state.medpix = None;
        self.state.pesquisa = PesquisaState::default();
        self.state.screen = Screen::Pesquisa;
    }

    // ---- Historico ----

    fn abrir_historico(&mut self, cliente: Cliente) {
        if !self.ensure_authenticated() {
            return;
        }
        let Some(token) = self.token() else { return };

        self.generation += 1;
        let generation = self.generation;
        self.state.perfil = None;
        self.state.medpix = None;
        self.state.historico = Some(HistoricoState::new(cliente.clone()));
        self.state.screen = Screen::Historico;

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.anomalas(&token, &cliente.id).await;
            let _ = tx.send(DataEvent::Historico { generation, result });
        });
    }

    fn handle_historico_key(&mut self, action: AppAction) {
        let Some(historico) = self.state.historico.as_mut() else {
            return;
        };

        if historico.motivo_aberto.is_some() {
            if matches!(action, AppAction::Cancel | AppAction::Submit) {
                historico.motivo_aberto = None;
            }
            return;
        }

        match action {
            AppAction::Input(ch) => {
                historico.filtro.push(ch);
                historico.selecionado = 0;
            }
            AppAction::Backspace => {
                historico.filtro.pop();
                historico.selecionado = 0;
            }
            AppAction::Up => {
                historico.selecionado = historico.selecionado.saturating_sub(1);
            }
            AppAction::Down => {
                let len = listing::filtra_transacoes(&historico.transacoes, &historico.filtro)
                    .len();
                if len > 0 {
                    historico.selecionado = (historico.selecionado + 1).min(len - 1);
                }
            }
            AppAction::Submit => {
                let visiveis =
                    listing::filtra_transacoes(&historico.transacoes, &historico.filtro);
                if let Some(transacao) = visiveis.get(historico.selecionado) {
                    historico.motivo_aberto = Some(transacao.id.clone());
                }
            }
            AppAction::Cancel => {
                let cliente = historico.cliente.clone();
                self.abrir_perfil(cliente);
            }
            _ => {}
        }
    }

    // ---- MedPix ----

    fn abrir_medpix(&mut self, cliente: Cliente) {
        if !self.ensure_authenticated() {
            return;
        }
        let Some(token) = self.token() else { return };

        self.generation += 1;
        let generation = self.generation;
        self.state.perfil = None;
        self.state.historico = None;
        self.state.medpix = Some(MedPixState::new(cliente.clone()));
        self.state.screen = Screen::MedPix;

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.protocolos(&token, &cliente.id).await;
            let _ = tx.send(DataEvent::Protocolos { generation, result });
        });
    }

    fn handle_medpix_key(&mut self, action: AppAction) {
        let Some(medpix) = self.state.medpix.as_mut() else {
            return;
        };

        // The archive-failure modal blocks the view until dismissed.
        if medpix.erro_arquivamento.is_some() {
            if matches!(action, AppAction::Cancel | AppAction::Submit) {
                medpix.erro_arquivamento = None;
            }
            return;
        }

        match action {
            AppAction::Input(ch) => {
                medpix.filtro.push(ch);
                medpix.selecionado = 0;
            }
            AppAction::Backspace => {
                medpix.filtro.pop();
                medpix.selecionado = 0;
            }
            AppAction::Up => {
                medpix.selecionado = medpix.selecionado.saturating_sub(1);
            }
            AppAction::Down => {
                let len = listing::filtra_protocolos(&medpix.protocolos, &medpix.filtro).len();
                if len > 0 {
                    medpix.selecionado = (medpix.selecionado + 1).min(len - 1);
                }
            }
            AppAction::Delete => self.arquivar_selecionado(),
            AppAction::Cancel => {
                let cliente = medpix.cliente.clone();
                self.abrir_perfil(cliente);
            }
            _ => {}
        }
    }

    fn arquivar_selecionado(&mut self) {
        let Some(medpix) = self.state.medpix.as_ref() else {
            return;
        };
        let visiveis = listing::filtra_protocolos(&medpix.protocolos, &medpix.filtro);
        let Some(protocolo) = visiveis.get(medpix.selecionado) else {
            return;
        };
        let protocolo = protocolo.protocolo.clone();

        if !self.ensure_authenticated() {
            return;
        }
        let Some(token) = self.token() else { return };
        let generation = self.generation;

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.arquivar_protocolo(&token, &protocolo).await;
            let _ = tx.send(DataEvent::Arquivamento {
                generation,
                protocolo,
                result,
            });
        });
    }

    // ---- Data events ----

    fn handle_data(&mut self, event: DataEvent) {
        match event {
            DataEvent::Login(result) => {
                self.state.login.submitting = false;
                match result {
                    Ok(token) => {
                        self.session.set_token(token.access_token);
                        if let Err(err) = self.session.save(&self.config.session_path) {
                            tracing::error!("falha ao persistir a sessão: {err}");
                        }
                        self.state.login.password.clear();
                        self.state.login.message = None;
                        self.state.pesquisa = PesquisaState::default();
                        self.state.screen = Screen::Pesquisa;
                    }
                    Err(err) => {
                        tracing::warn!("login recusado: {err:?}");
                        self.state.login.message = Some("Login ou senha incorretos".to_string());
                    }
                }
            }
            DataEvent::Busca {
                generation,
                seq,
                result,
            } => {
                if generation != self.generation || seq != self.state.pesquisa.seq {
                    return;
                }
                self.state.pesquisa.buscando = false;
                match result {
                    Ok(cliente) => {
                        self.state.pesquisa.resultados = vec![cliente];
                        self.state.pesquisa.selecionado = 0;
                    }
                    Err(ClientError::Unauthorized) => self.expire_session(),
                    Err(err) => {
                        // "no match" and transport failures look the same
                        // to the operator: an empty result list.
                        tracing::debug!("busca sem resultado: {err:?}");
                        self.state.pesquisa.resultados.clear();
                    }
                }
            }
            DataEvent::Estatisticas { generation, result } => {
                if generation != self.generation {
                    return;
                }
                match result {
                    Ok(estatisticas) => {
                        if let Some(perfil) = self.state.perfil.as_mut() {
                            perfil.estatisticas = Some(estatisticas);
                        }
                    }
                    Err(ClientError::Unauthorized) => self.expire_session(),
                    Err(err) => tracing::error!("falha ao buscar estatísticas: {err:?}"),
                }
            }
            DataEvent::AnomalasRecentes { generation, result } => {
                if generation != self.generation {
                    return;
                }
                match result {
                    Ok(transacoes) => {
                        if let Some(perfil) = self.state.perfil.as_mut() {
                            perfil.anomalias = listing::tres_mais_recentes(&transacoes);
                        }
                    }
                    Err(ClientError::Unauthorized) => self.expire_session(),
                    Err(err) => tracing::error!("falha ao buscar anomalias: {err:?}"),
                }
            }
            DataEvent::MedPixCount { generation, result } => {
                if generation != self.generation {
                    return;
                }
                match result {
                    Ok(contagem) => {
                        if let Some(perfil) = self.state.perfil.as_mut() {
                            perfil.medpix_count = Some(contagem.count);
                        }
                    }
                    Err(ClientError::Unauthorized) => self.expire_session(),
                    Err(err) => tracing::error!("falha ao buscar contagem de MedPix: {err:?}"),
                }
            }
            DataEvent::Historico { generation, result } => {
                if generation != self.generation {
                    return;
                }
                if let Some(historico) = self.state.historico.as_mut() {
                    historico.carregando = false;
                }
                match result {
                    Ok(transacoes) => {
                        if let Some(historico) = self.state.historico.as_mut() {
                            historico.transacoes = transacoes;
                            historico.selecionado = 0;
                        }
                    }
                    Err(ClientError::Unauthorized) => self.expire_session(),
                    Err(err) => tracing::error!("falha ao buscar histórico: {err:?}"),
                }
            }
            DataEvent::Protocolos { generation, result } => {
                if generation != self.generation {
                    return;
                }
                if let Some(medpix) = self.state.medpix.as_mut() {
                    medpix.carregando = false;
                }
                match result {
                    Ok(protocolos) => {
                        if let Some(medpix) = self.state.medpix.as_mut() {
                            medpix.protocolos = protocolos;
                            medpix.selecionado = 0;
                        }
                    }
                    Err(ClientError::Unauthorized) => self.expire_session(),
                    Err(err) => tracing::error!("falha ao buscar protocolos: {err:?}"),
                }
            }
            DataEvent::Arquivamento {
                generation,
                protocolo,
                result,
            } => {
                if generation != self.generation {
                    return;
                }
                match result {
                    Ok(()) => {
                        if let Some(medpix) = self.state.medpix.as_mut() {
                            medpix.protocolos.retain(|p| p.protocolo != protocolo);
                            let len = listing::filtra_protocolos(
                                &medpix.protocolos,
                                &medpix.filtro,
                            )
                            .len();
                            medpix.selecionado = medpix.selecionado.min(len.saturating_sub(1));
                        }
                    }
                    Err(ClientError::Unauthorized) => self.expire_session(),
                    Err(err) => {
                        tracing::error!("falha ao arquivar {protocolo}: {err:?}");
                        if let Some(medpix) = self.state.medpix.as_mut() {
                            medpix.erro_arquivamento =
                                Some("Falha ao arquivar o protocolo.".to_string());
                        }
                    }
                }
            }
        }
    }
}
