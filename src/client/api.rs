use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Map, Value};

use crate::error::{ApiResult, Error};

/// Modo de formatação da resposta
///
/// - `Full`: status, reason phrase, headers, corpo parseado, corpo bruto e
///   eco da requisição;
/// - `Normal`: apenas o JSON parseado, com o envelope;
/// - `Data`: apenas o campo `data` do envelope (caso comum, padrão).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    Full,
    Normal,
    #[default]
    Data,
}

/// Opções de requisição reconhecidas pela API
///
/// Chaves enumeradas com verificação de tipo em compile time; campos
/// específicos do provedor passam pelo mapa `extra` sem interpretação.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Seleção de campos (`opt_fields`, unidos por vírgula no wire)
    pub opt_fields: Option<Vec<String>>,
    /// Formatação legível da resposta (`opt_pretty`)
    pub opt_pretty: Option<bool>,
    /// Limite de itens por página
    pub limit: Option<u32>,
    /// Token opaco de paginação
    pub offset: Option<String>,
    /// Parâmetros de passthrough específicos do provedor
    pub extra: Map<String, Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opt_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opt_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn opt_pretty(mut self, pretty: bool) -> Self {
        self.opt_pretty = Some(pretty);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Serializa as opções como pares de query string
    fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(fields) = &self.opt_fields {
            pairs.push(("opt_fields".to_string(), fields.join(",")));
        }
        if let Some(pretty) = self.opt_pretty {
            pairs.push(("opt_pretty".to_string(), pretty.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = &self.offset {
            pairs.push(("offset".to_string(), offset.clone()));
        }
        for (key, value) in &self.extra {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            pairs.push((key.clone(), rendered));
        }

        pairs
    }
}

/// Eco da requisição, devolvido no modo `Full`
#[derive(Debug, Clone)]
pub struct RequestEcho {
    pub method: String,
    pub url: String,
    pub body: Option<Value>,
}

/// Resposta completa da API (modo `Full`)
#[derive(Debug, Clone)]
pub struct FullResponse {
    pub status: u16,
    pub reason: String,
    pub headers: HashMap<String, String>,
    pub body: Value,
    pub raw_body: String,
    pub request: RequestEcho,
}

/// Resposta formatada conforme o [`ResponseMode`] pedido
#[derive(Debug, Clone)]
pub enum ShapedResponse {
    Full(FullResponse),
    Normal(Value),
    Data(Value),
}

impl ShapedResponse {
    /// Extrai o valor JSON da resposta, qualquer que seja o modo
    pub fn into_value(self) -> Value {
        match self {
            Self::Full(full) => full.body,
            Self::Normal(value) | Self::Data(value) => value,
        }
    }
}

/// Cliente HTTP autenticado para a API do Asana
///
/// Sem estado além do bearer token e da URL base; não interpreta as opções
/// além de serializá-las como query string e nunca faz retry - política de
/// repetição é responsabilidade do chamador.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    http: Client,
    base_url: String,
}

impl ApiTransport {
    /// Cria um novo transporte com o bearer token informado
    ///
    /// Falha se o token contiver bytes inválidos para o header de
    /// autorização - um token assim nunca chega ao wire - ou se o cliente
    /// HTTP não puder ser construído.
    pub fn new(access_token: &str, base_url: &str, timeout_secs: u64) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", access_token))
            .map_err(|e| {
                Error::config_error(format!("Token inválido para header de autorização: {}", e))
            })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Constrói a URL completa para um endpoint
    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Executa uma requisição autenticada e formata a resposta
    ///
    /// O corpo JSON, quando presente, é embrulhado no envelope
    /// `{"data": ...}` - toda chamada mutadora da API carrega esse envelope.
    /// Respostas 4xx/5xx viram [`Error::ApiRequest`]; falhas de rede antes de
    /// qualquer status viram [`Error::Transport`].
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: Option<&RequestOptions>,
        body: Option<Value>,
        mode: ResponseMode,
    ) -> ApiResult<ShapedResponse> {
        let url = self.build_url(path);
        let enveloped = body.map(|data| json!({ "data": data }));

        log::debug!("{} {}", method, url);

        let mut builder = self.http.request(method.clone(), &url);
        if let Some(options) = options {
            builder = builder.query(&options.to_query_pairs());
        }
        if let Some(payload) = &enveloped {
            builder = builder.json(payload);
        }

        let response = builder.send().await?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();
        let raw_body = response.text().await?;

        log::debug!("Resposta {} de {}: {}", status, url, raw_body);

        if status.is_client_error() || status.is_server_error() {
            return Err(self.error_response(status, &raw_body));
        }

        let parsed: Value = if raw_body.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&raw_body)?
        };

        Ok(match mode {
            ResponseMode::Full => ShapedResponse::Full(FullResponse {
                status: status.as_u16(),
                reason,
                headers,
                body: parsed,
                raw_body,
                request: RequestEcho {
                    method: method.to_string(),
                    url,
                    body: enveloped,
                },
            }),
            ResponseMode::Normal => ShapedResponse::Normal(parsed),
            ResponseMode::Data => {
                let data = match parsed {
                    Value::Object(mut map) => map.remove("data").unwrap_or(Value::Object(map)),
                    other => other,
                };
                ShapedResponse::Data(data)
            }
        })
    }

    /// Converte resposta de erro da API em [`Error::ApiRequest`]
    fn error_response(&self, status: StatusCode, raw_body: &str) -> Error {
        let body = serde_json::from_str(raw_body)
            .unwrap_or_else(|_| Value::String(raw_body.to_string()));
        Error::ApiRequest {
            status: status.as_u16(),
            body,
        }
    }

    /// GET no modo `Data`
    pub async fn get(&self, path: &str, options: Option<&RequestOptions>) -> ApiResult<Value> {
        Ok(self
            .request(Method::GET, path, options, None, ResponseMode::Data)
            .await?
            .into_value())
    }

    /// POST no modo `Data`, com o payload embrulhado no envelope
    pub async fn post(&self, path: &str, data: Value) -> ApiResult<Value> {
        Ok(self
            .request(Method::POST, path, None, Some(data), ResponseMode::Data)
            .await?
            .into_value())
    }

    /// PUT no modo `Data`, com o payload embrulhado no envelope
    pub async fn put(&self, path: &str, data: Value) -> ApiResult<Value> {
        Ok(self
            .request(Method::PUT, path, None, Some(data), ResponseMode::Data)
            .await?
            .into_value())
    }

    /// DELETE no modo `Data`
    pub async fn delete(&self, path: &str) -> ApiResult<Value> {
        Ok(self
            .request(Method::DELETE, path, None, None, ResponseMode::Data)
            .await?
            .into_value())
    }
}
