use serde_json::Value;
use thiserror::Error;

/// Tipos de erro da biblioteca
///
/// A taxonomia separa falhas do provedor OAuth2 (`AuthExchange`), ausência de
/// token válido no facade (`NotAuthenticated`), respostas de erro da API
/// (`ApiRequest`, com status HTTP e payload do provedor) e falhas de rede
/// antes de qualquer status HTTP (`Transport`).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Provedor OAuth2 rejeitou a troca de credenciais: {0}")]
    AuthExchange(String),

    #[error("Nenhum token válido disponível - autentique antes de acessar recursos")]
    NotAuthenticated,

    #[error("Erro na API ({status}): {body}")]
    ApiRequest { status: u16, body: Value },

    #[error("Erro de rede: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Erro de armazenamento do token: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Erro de serialização: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuração inválida: {0}")]
    Config(String),
}

impl Error {
    pub fn auth_exchange(msg: impl Into<String>) -> Self {
        Self::AuthExchange(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Status HTTP quando o erro veio de uma resposta da API
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiRequest { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Tipo de resultado padrão para operações da biblioteca
pub type ApiResult<T> = Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display_messages() {
        let exchange = Error::auth_exchange("invalid_grant");
        assert!(exchange.to_string().contains("invalid_grant"));

        let not_auth = Error::NotAuthenticated;
        assert!(not_auth.to_string().contains("Nenhum token válido"));

        let api = Error::ApiRequest {
            status: 404,
            body: json!({"errors": [{"message": "Not Found"}]}),
        };
        assert!(api.to_string().contains("404"));
        assert!(api.to_string().contains("Not Found"));
    }

    #[test]
    fn test_status_accessor() {
        let api = Error::ApiRequest { status: 429, body: Value::Null };
        assert_eq!(api.status(), Some(429));
        assert_eq!(Error::NotAuthenticated.status(), None);
    }

    #[test]
    fn test_io_error_from() {
        use std::io::{Error as IoError, ErrorKind};
        let io_error = IoError::new(ErrorKind::NotFound, "token.json");
        let error = Error::from(io_error);
        assert!(error.to_string().contains("armazenamento"));
    }

    #[test]
    fn test_serialization_error_from() {
        let parse: Result<Value, _> = serde_json::from_str("{broken");
        let error = Error::from(parse.unwrap_err());
        assert!(error.to_string().contains("serialização"));
    }
}
