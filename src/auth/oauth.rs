use std::time::Duration;

use oauth2::{
    basic::BasicClient, AuthUrl, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope, TokenUrl,
};
use url::Url;

use crate::auth::token::{AccessToken, TokenResponse};
use crate::config::Config;
use crate::error::{ApiResult, Error};

/// Gerenciador do fluxo OAuth2 do Asana
///
/// Concentra toda a interação com o servidor de autorização: construção da
/// URL de autorização, troca de código por token e renovação via refresh
/// token. Qualquer falha nessas trocas (rejeição do provedor ou erro de rede)
/// é reportada como [`Error::AuthExchange`].
#[derive(Debug, Clone)]
pub struct OAuthApp {
    config: Config,
    http: reqwest::Client,
}

impl OAuthApp {
    /// Cria uma nova instância do fluxo OAuth
    ///
    /// Falha se o cliente HTTP não puder ser construído (por exemplo,
    /// inicialização do backend TLS).
    pub fn new(config: Config) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, http })
    }

    /// Gera a URL de autorização do provedor
    ///
    /// Construção pura, sem chamada de rede. Retorna também o estado CSRF que
    /// a aplicação deve validar no callback.
    pub fn authorization_url(&self) -> ApiResult<(Url, CsrfToken)> {
        let client = self.create_oauth_client()?;

        let (auth_url, csrf_token) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("default".to_string()))
            .url();

        log::debug!("URL de autorização gerada: {}", auth_url);
        Ok((auth_url, csrf_token))
    }

    /// Troca o código de autorização por um token de acesso
    pub async fn exchange_code(&self, code: &str) -> ApiResult<AccessToken> {
        log::info!("🔄 Trocando código de autorização por token...");

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
        ];

        self.token_grant(&params).await
    }

    /// Renova o token usando o refresh token
    ///
    /// Retorna um token novo; o anterior deve ser descartado pelo chamador.
    /// Se a resposta do provedor omitir `refresh_token`, o token renovado
    /// herda o refresh token anterior (comportamento padrão do OAuth2).
    pub async fn refresh(&self, token: &AccessToken) -> ApiResult<AccessToken> {
        let refresh_token = token
            .refresh_token
            .as_deref()
            .ok_or_else(|| Error::auth_exchange("Token não possui refresh_token"))?;

        log::info!("🔄 Renovando token de acesso...");

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("refresh_token", refresh_token),
        ];

        let mut renewed = self.token_grant(&params).await?;
        if renewed.refresh_token.is_none() {
            renewed.refresh_token = token.refresh_token.clone();
        }

        Ok(renewed)
    }

    /// Executa um grant no endpoint de token
    async fn token_grant(&self, params: &[(&str, &str)]) -> ApiResult<AccessToken> {
        let response = self
            .http
            .post(&self.config.token_url)
            .form(params)
            .send()
            .await
            .map_err(|e| Error::auth_exchange(format!("Falha na chamada ao endpoint de token: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::auth_exchange(format!("Falha ao ler resposta do provedor: {}", e)))?;

        if !status.is_success() {
            log::warn!("❌ Provedor rejeitou o grant ({}): {}", status, body);
            return Err(Error::auth_exchange(format!(
                "Provedor rejeitou o grant ({}): {}",
                status, body
            )));
        }

        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::auth_exchange(format!("Resposta de token inválida: {}", e)))?;

        log::info!("✅ Token de acesso obtido com sucesso");
        Ok(token_response.into_access_token(chrono::Utc::now().timestamp()))
    }

    /// Cria o cliente OAuth2 para construção da URL de autorização
    fn create_oauth_client(&self) -> ApiResult<BasicClient> {
        let auth_url = AuthUrl::new(self.config.authorization_url.clone())
            .map_err(|e| Error::config_error(format!("URL de autorização inválida: {}", e)))?;
        let token_url = TokenUrl::new(self.config.token_url.clone())
            .map_err(|e| Error::config_error(format!("URL de token inválida: {}", e)))?;
        let redirect_url = RedirectUrl::new(self.config.redirect_uri.clone())
            .map_err(|e| Error::config_error(format!("URL de redirecionamento inválida: {}", e)))?;

        Ok(BasicClient::new(
            ClientId::new(self.config.client_id.clone()),
            Some(ClientSecret::new(self.config.client_secret.clone())),
            auth_url,
            Some(token_url),
        )
        .set_redirect_uri(redirect_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> Config {
        Config::new("test_client_id", "test_client_secret", "http://localhost/callback")
    }

    fn config_for(server: &MockServer) -> Config {
        test_config().with_base_urls(
            format!("{}/api/1.0", server.uri()),
            format!("{}/-/oauth_authorize", server.uri()),
            format!("{}/-/oauth_token", server.uri()),
        )
    }

    #[test]
    fn test_authorization_url_embeds_credentials() {
        let oauth = OAuthApp::new(test_config()).unwrap();
        let (url, csrf) = oauth.authorization_url().unwrap();

        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(url.as_str().starts_with("https://app.asana.com/-/oauth_authorize"));
        assert!(query.contains(&("client_id".to_string(), "test_client_id".to_string())));
        assert!(query.contains(&("response_type".to_string(), "code".to_string())));
        assert!(query
            .contains(&("redirect_uri".to_string(), "http://localhost/callback".to_string())));
        assert!(query.contains(&("state".to_string(), csrf.secret().clone())));
    }

    #[test]
    fn test_authorization_url_invalid_config() {
        let config = test_config().with_base_urls("not-a-url", "also-not-a-url", "nope");
        let oauth = OAuthApp::new(config).unwrap();
        assert!(oauth.authorization_url().is_err());
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/-/oauth_token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=auth_code_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "abc",
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": "r1",
                "data": {"id": "42", "name": "Usuário"}
            })))
            .mount(&server)
            .await;

        let oauth = OAuthApp::new(config_for(&server)).unwrap();
        let token = oauth.exchange_code("auth_code_123").await.unwrap();

        assert_eq!(token.access_token, "abc");
        assert_eq!(token.refresh_token.as_deref(), Some("r1"));
        assert!(token.expires.is_some());
        assert_eq!(token.extra.get("data"), Some(&json!({"id": "42", "name": "Usuário"})));
    }

    #[tokio::test]
    async fn test_exchange_code_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/-/oauth_token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Code is invalid or expired"
            })))
            .mount(&server)
            .await;

        let oauth = OAuthApp::new(config_for(&server)).unwrap();
        let result = oauth.exchange_code("stale_code").await;

        match result {
            Err(Error::AuthExchange(msg)) => assert!(msg.contains("invalid_grant")),
            other => panic!("esperava AuthExchange, obteve {:?}", other.map(|t| t.access_token)),
        }
    }

    #[tokio::test]
    async fn test_refresh_requires_refresh_token() {
        let oauth = OAuthApp::new(test_config()).unwrap();
        let result = oauth.refresh(&AccessToken::personal("0/pat")).await;
        assert!(matches!(result, Err(Error::AuthExchange(_))));
    }

    #[tokio::test]
    async fn test_refresh_inherits_previous_refresh_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/-/oauth_token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "xyz",
                "token_type": "bearer",
                "expires_in": 3600
            })))
            .mount(&server)
            .await;

        let oauth = OAuthApp::new(config_for(&server)).unwrap();
        let old = AccessToken {
            access_token: "abc".to_string(),
            refresh_token: Some("r1".to_string()),
            expires: Some(0),
            extra: Default::default(),
        };

        let renewed = oauth.refresh(&old).await.unwrap();
        assert_eq!(renewed.access_token, "xyz");
        assert_eq!(renewed.refresh_token.as_deref(), Some("r1"));
    }
}
