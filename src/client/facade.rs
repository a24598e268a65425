use oauth2::CsrfToken;
use url::Url;

use crate::auth::oauth::OAuthApp;
use crate::auth::storage::TokenStorage;
use crate::auth::token::AccessToken;
use crate::client::api::ApiTransport;
use crate::config::Config;
use crate::error::{ApiResult, Error};
use crate::resources::{Memberships, Projects, Tags, Tasks, Users, Workspaces};

/// Resultado da validação do token pelo facade
///
/// Condições de frequência esperada (sem token, refresh falhou) são valores,
/// não exceções - o chamador decide como reagir sem depender de catch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Valid,
    Invalid(InvalidReason),
}

/// Motivo pelo qual não há token válido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    NoToken,
    RefreshFailed,
}

/// Facade do cliente Asana
///
/// Dono exclusivo do token atual e do transporte construído preguiçosamente.
/// Token e transporte são trocados sempre em par: qualquer mudança de token
/// descarta o transporte, que é reconstruído no próximo acesso a recurso.
/// O `&mut self` nas operações de ciclo de vida garante que nenhum chamador
/// observe um par {token, transporte} pela metade.
pub struct Client {
    config: Config,
    oauth: OAuthApp,
    storage: TokenStorage,
    token: Option<AccessToken>,
    transport: Option<ApiTransport>,
    last_auth_error: Option<Error>,
}

impl Client {
    /// Cria um facade não autenticado
    pub fn new(config: Config) -> ApiResult<Self> {
        let oauth = OAuthApp::new(config.clone())?;
        let storage = TokenStorage::new(config.token_file.clone());

        Ok(Self {
            config,
            oauth,
            storage,
            token: None,
            transport: None,
            last_auth_error: None,
        })
    }

    /// Cria um facade com um token pré-existente, sem passar pelo handshake
    pub fn with_access_token(config: Config, token: AccessToken) -> ApiResult<Self> {
        let mut client = Self::new(config)?;
        client.replace_token(Some(token));
        Ok(client)
    }

    /// Cria um facade com um personal access token
    ///
    /// PATs não expiram e nunca passam pelo fluxo de refresh.
    pub fn with_personal_access_token(
        config: Config,
        pat: impl Into<String>,
    ) -> ApiResult<Self> {
        Self::with_access_token(config, AccessToken::personal(pat))
    }

    /// Troca o par {token, transporte} de uma vez
    fn replace_token(&mut self, token: Option<AccessToken>) {
        self.token = token;
        self.transport = None;
    }

    /// Indica se há um token em memória (expirado ou não)
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Token atual, se houver
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Último erro de autenticação engolido pelo facade
    ///
    /// Canal lateral de diagnóstico: falhas de refresh e de troca de código
    /// viram transição de estado, não exceção; o erro original fica acessível
    /// aqui até a próxima operação de autenticação bem sucedida.
    pub fn last_auth_error(&self) -> Option<&Error> {
        self.last_auth_error.as_ref()
    }

    /// URL de autorização do provedor, com o estado CSRF a validar no callback
    pub fn authorization_url(&self) -> ApiResult<(Url, CsrfToken)> {
        self.oauth.authorization_url()
    }

    /// Processa o callback OAuth2 trocando o código por um token
    ///
    /// Em caso de sucesso o token é armazenado e persistido; em caso de falha
    /// o facade permanece não autenticado e retorna `None` em vez de propagar
    /// o erro - a aplicação apresenta seu próprio fluxo de reautenticação.
    pub async fn handle_callback(&mut self, code: &str) -> Option<AccessToken> {
        match self.oauth.exchange_code(code).await {
            Ok(token) => {
                if let Err(e) = self.storage.save(&token) {
                    log::warn!("Falha ao persistir token: {}", e);
                }
                self.replace_token(Some(token.clone()));
                self.last_auth_error = None;
                Some(token)
            }
            Err(e) => {
                log::warn!("❌ Troca de código de autorização falhou: {}", e);
                self.last_auth_error = Some(e);
                None
            }
        }
    }

    /// Valida o token atual, renovando se expirado
    ///
    /// Porta de entrada de todo acesso a recurso:
    /// - sem token: `Invalid(NoToken)`, sem efeito colateral;
    /// - token vigente: `Valid`, sem efeito colateral;
    /// - token expirado: uma tentativa de refresh. Sucesso troca o par
    ///   {token, transporte} e persiste o token novo; falha descarta token e
    ///   transporte (o chamador observa `has_token() == false`) e registra o
    ///   erro em [`Self::last_auth_error`].
    pub async fn ensure_valid_token(&mut self) -> TokenStatus {
        let token = match &self.token {
            None => return TokenStatus::Invalid(InvalidReason::NoToken),
            Some(token) => token,
        };

        if !token.is_expired() {
            return TokenStatus::Valid;
        }

        log::info!("🔄 Token expirado, tentando renovar...");

        match self.oauth.refresh(token).await {
            Ok(renewed) => {
                if let Err(e) = self.storage.save(&renewed) {
                    log::warn!("Falha ao persistir token renovado: {}", e);
                }
                self.replace_token(Some(renewed));
                self.last_auth_error = None;
                TokenStatus::Valid
            }
            Err(e) => {
                log::warn!("❌ Renovação do token falhou: {}", e);
                self.last_auth_error = Some(e);
                self.replace_token(None);
                TokenStatus::Invalid(InvalidReason::RefreshFailed)
            }
        }
    }

    /// Carrega o token do armazenamento
    ///
    /// Arquivo ausente ou corrompido deixa o facade não autenticado.
    pub fn load_token(&mut self) {
        self.replace_token(self.storage.load());
    }

    /// Persiste o token atual, se houver
    pub fn save_token(&self) -> ApiResult<()> {
        match &self.token {
            Some(token) => self.storage.save(token),
            None => Ok(()),
        }
    }

    /// Encerra a sessão: limpa token e transporte e remove o arquivo persistido
    pub fn logout(&mut self) {
        self.replace_token(None);
        self.last_auth_error = None;
        if let Err(e) = self.storage.delete() {
            log::warn!("Falha ao remover arquivo de token: {}", e);
        }
    }

    /// Obtém o transporte, validando o token antes
    ///
    /// Constrói o transporte preguiçosamente no primeiro acesso válido; um
    /// transporte nunca é reaproveitado com token obsoleto porque qualquer
    /// troca de token o descarta.
    async fn transport(&mut self) -> ApiResult<&ApiTransport> {
        match self.ensure_valid_token().await {
            TokenStatus::Valid => {}
            TokenStatus::Invalid(_) => return Err(Error::NotAuthenticated),
        }

        if self.transport.is_none() {
            let token = self.token.as_ref().ok_or(Error::NotAuthenticated)?;
            self.transport = Some(ApiTransport::new(
                &token.access_token,
                &self.config.api_base_url,
                self.config.timeout_secs,
            )?);
        }

        self.transport.as_ref().ok_or(Error::NotAuthenticated)
    }

    /// Serviço de tags
    pub async fn tags(&mut self) -> ApiResult<Tags<'_>> {
        Ok(Tags::new(self.transport().await?))
    }

    /// Serviço de projects
    pub async fn projects(&mut self) -> ApiResult<Projects<'_>> {
        Ok(Projects::new(self.transport().await?))
    }

    /// Serviço de tasks
    pub async fn tasks(&mut self) -> ApiResult<Tasks<'_>> {
        Ok(Tasks::new(self.transport().await?))
    }

    /// Serviço de workspaces
    pub async fn workspaces(&mut self) -> ApiResult<Workspaces<'_>> {
        Ok(Workspaces::new(self.transport().await?))
    }

    /// Serviço de memberships
    pub async fn memberships(&mut self) -> ApiResult<Memberships<'_>> {
        Ok(Memberships::new(self.transport().await?))
    }

    /// Serviço de users
    pub async fn users(&mut self) -> ApiResult<Users<'_>> {
        Ok(Users::new(self.transport().await?))
    }

    /// Força a expiração do token atual mantendo o transporte em cache
    #[cfg(test)]
    pub(crate) fn force_expire(&mut self) {
        if let Some(token) = self.token.as_mut() {
            token.expires = Some(0);
        }
    }
}
