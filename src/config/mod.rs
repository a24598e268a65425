use std::env;
use std::path::{Path, PathBuf};

use dotenv::dotenv;

use crate::error::{ApiResult, Error};

/// URL base padrão da API do Asana
pub const DEFAULT_API_BASE_URL: &str = "https://app.asana.com/api/1.0";

/// Endpoint de autorização OAuth2 do Asana
pub const DEFAULT_AUTHORIZATION_URL: &str = "https://app.asana.com/-/oauth_authorize";

/// Endpoint de token OAuth2 do Asana
pub const DEFAULT_TOKEN_URL: &str = "https://app.asana.com/-/oauth_token";

/// Arquivo padrão de persistência do token
pub const DEFAULT_TOKEN_FILE: &str = ".asana_token.json";

/// Configuração do cliente Asana
///
/// Todas as URLs são sobrescrevíveis (necessário para testes com servidores
/// de mock) e o timeout é repassado diretamente ao cliente HTTP.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub api_base_url: String,
    pub authorization_url: String,
    pub token_url: String,
    pub token_file: PathBuf,
    pub timeout_secs: u64,
}

impl Config {
    /// Cria uma configuração com as credenciais da aplicação OAuth2
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            authorization_url: DEFAULT_AUTHORIZATION_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            timeout_secs: 30,
        }
    }

    /// Carrega a configuração das variáveis de ambiente
    ///
    /// Variáveis reconhecidas: `ASANA_CLIENT_ID`, `ASANA_CLIENT_SECRET`,
    /// `ASANA_REDIRECT_URI`, `ASANA_API_BASE_URL`, `ASANA_TOKEN_FILE`.
    pub fn from_env() -> ApiResult<Self> {
        // Durante testes, as variáveis são configuradas diretamente
        if cfg!(not(test)) && Path::new(".env").exists() {
            dotenv().ok();
        }

        let client_id = Self::required_var("ASANA_CLIENT_ID")?;
        let client_secret = Self::required_var("ASANA_CLIENT_SECRET")?;
        let redirect_uri = env::var("ASANA_REDIRECT_URI")
            .unwrap_or_else(|_| "urn:ietf:wg:oauth:2.0:oob".to_string());

        let mut config = Self::new(client_id, client_secret, redirect_uri);

        if let Ok(base_url) = env::var("ASANA_API_BASE_URL") {
            config.api_base_url = base_url;
        }
        if let Ok(token_file) = env::var("ASANA_TOKEN_FILE") {
            config.token_file = PathBuf::from(token_file);
        }

        Ok(config)
    }

    /// Sobrescreve as URLs base (API e OAuth) apontando para outro host
    pub fn with_base_urls(
        mut self,
        api_base_url: impl Into<String>,
        authorization_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        self.api_base_url = api_base_url.into();
        self.authorization_url = authorization_url.into();
        self.token_url = token_url.into();
        self
    }

    /// Sobrescreve o arquivo de persistência do token
    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = path.into();
        self
    }

    /// Sobrescreve o timeout das requisições HTTP
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn required_var(key: &str) -> ApiResult<String> {
        env::var(key).map_err(|_| Error::config_error(format!("{} não encontrado", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = Config::new("id", "secret", "http://localhost/callback");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.token_file, PathBuf::from(DEFAULT_TOKEN_FILE));
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            vec![
                ("ASANA_CLIENT_ID", Some("test_client_id")),
                ("ASANA_CLIENT_SECRET", Some("test_client_secret")),
                ("ASANA_API_BASE_URL", Some("http://localhost:9999/api")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.client_id, "test_client_id");
                assert_eq!(config.client_secret, "test_client_secret");
                assert_eq!(config.api_base_url, "http://localhost:9999/api");
            },
        );
    }

    #[test]
    fn test_from_env_missing_credentials() {
        temp_env::with_vars_unset(vec!["ASANA_CLIENT_ID", "ASANA_CLIENT_SECRET"], || {
            let result = Config::from_env();
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_with_base_urls() {
        let config = Config::new("id", "secret", "http://localhost/callback")
            .with_base_urls("http://m/api", "http://m/authorize", "http://m/token");
        assert_eq!(config.api_base_url, "http://m/api");
        assert_eq!(config.authorization_url, "http://m/authorize");
        assert_eq!(config.token_url, "http://m/token");
    }
}
