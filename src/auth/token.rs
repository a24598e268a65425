use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiResult;

/// Token de acesso OAuth2
///
/// Valor imutável: qualquer renovação produz um token novo em vez de mutar o
/// existente. O campo `extra` preserva claims específicos do provedor (por
/// exemplo o bloco `data` com o usuário autenticado que o Asana devolve na
/// troca de código) para que o round-trip com o armazenamento seja sem perdas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Expiração absoluta em epoch seconds; `None` nunca expira (PATs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AccessToken {
    /// Cria um token a partir de um personal access token
    ///
    /// PATs não expiram e nunca passam pelo fluxo de refresh.
    pub fn personal(pat: impl Into<String>) -> Self {
        Self {
            access_token: pat.into(),
            refresh_token: None,
            expires: None,
            extra: Map::new(),
        }
    }

    /// Verifica se o token está expirado em relação a `now` (epoch seconds)
    pub fn is_expired_at(&self, now: i64) -> bool {
        match self.expires {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Verifica se o token está expirado agora
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }

    /// Retorna o token no formato de autorização para requisições HTTP
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Serializa o token para a representação de armazenamento
    pub fn to_value(&self) -> ApiResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Reconstrói um token da representação de armazenamento
    ///
    /// Falha se o payload não contiver `access_token` - um token sem
    /// access_token é inválido e nunca chega ao transporte.
    pub fn from_value(raw: Value) -> ApiResult<Self> {
        Ok(serde_json::from_value(raw)?)
    }
}

/// Resposta do endpoint de token OAuth2 do Asana
///
/// Formato de wire: `expires_in` é relativo ao instante da emissão; a
/// conversão para [`AccessToken`] calcula a expiração absoluta.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenResponse {
    /// Converte a resposta de wire em um token com expiração absoluta
    pub fn into_access_token(self, issued_at: i64) -> AccessToken {
        let mut extra = self.extra;
        if let Some(token_type) = self.token_type {
            extra.insert("token_type".to_string(), Value::String(token_type));
        }

        AccessToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires: self.expires_in.map(|expires_in| issued_at + expires_in),
            extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_is_expired_at_past_expiry() {
        let token = AccessToken {
            access_token: "abc".to_string(),
            refresh_token: None,
            expires: Some(1_000),
            extra: Map::new(),
        };

        assert!(token.is_expired_at(1_000));
        assert!(token.is_expired_at(2_000));
        assert!(!token.is_expired_at(999));
    }

    #[test]
    fn test_personal_token_never_expires() {
        let token = AccessToken::personal("0/abcdef");

        assert!(!token.is_expired_at(0));
        assert!(!token.is_expired_at(i64::MAX));
        assert!(!token.is_expired());
    }

    #[test]
    fn test_authorization_header() {
        let token = AccessToken::personal("xyz");
        assert_eq!(token.authorization_header(), "Bearer xyz");
    }

    #[test]
    fn test_storage_round_trip_is_lossless() {
        let stored = json!({
            "access_token": "abc",
            "refresh_token": "r1",
            "expires": 1_700_000_000i64,
            "token_type": "bearer",
            "data": {"id": "123", "name": "Usuário"}
        });

        let token = AccessToken::from_value(stored.clone()).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.refresh_token.as_deref(), Some("r1"));
        assert_eq!(token.expires, Some(1_700_000_000));
        assert_eq!(token.extra.get("token_type"), Some(&json!("bearer")));

        assert_eq!(token.to_value().unwrap(), stored);
    }

    #[test]
    fn test_round_trip_without_optional_fields() {
        let stored = json!({"access_token": "abc"});
        let token = AccessToken::from_value(stored.clone()).unwrap();
        assert_eq!(token.to_value().unwrap(), stored);
    }

    #[test]
    fn test_from_value_rejects_missing_access_token() {
        let result = AccessToken::from_value(json!({"refresh_token": "r1"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_token_response_computes_absolute_expiry() {
        let response: TokenResponse = serde_json::from_value(json!({
            "access_token": "abc",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "r1",
            "data": {"id": "123"}
        }))
        .unwrap();

        let token = response.into_access_token(1_000);
        assert_eq!(token.expires, Some(4_600));
        assert_eq!(token.refresh_token.as_deref(), Some("r1"));
        assert_eq!(token.extra.get("token_type"), Some(&json!("bearer")));
        assert_eq!(token.extra.get("data"), Some(&json!({"id": "123"})));
    }

    #[test]
    fn test_token_response_without_expiry() {
        let response: TokenResponse =
            serde_json::from_value(json!({"access_token": "abc"})).unwrap();
        let token = response.into_access_token(1_000);
        assert_eq!(token.expires, None);
        assert!(!token.is_expired_at(i64::MAX));
    }
}
