use std::fs;
use std::path::PathBuf;

use crate::auth::token::AccessToken;
use crate::error::ApiResult;

/// Persistência do token em arquivo JSON
///
/// O arquivo contém o objeto serializado de [`AccessToken`]: `access_token`,
/// opcionalmente `refresh_token` e `expires` (epoch seconds), mais os campos
/// de passthrough do provedor.
#[derive(Debug, Clone)]
pub struct TokenStorage {
    path: PathBuf,
}

impl TokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Carrega o token do arquivo, se existir e for válido
    ///
    /// Arquivo ausente ou conteúdo corrompido resulta em `None` - o facade
    /// permanece não autenticado em vez de propagar o erro.
    pub fn load(&self) -> Option<AccessToken> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return None,
        };

        match serde_json::from_str::<serde_json::Value>(&contents)
            .map_err(crate::error::Error::from)
            .and_then(AccessToken::from_value)
        {
            Ok(token) => Some(token),
            Err(e) => {
                log::warn!("Arquivo de token corrompido ({}): {}", self.path.display(), e);
                None
            }
        }
    }

    /// Salva o token no arquivo
    pub fn save(&self, token: &AccessToken) -> ApiResult<()> {
        let value = token.to_value()?;
        fs::write(&self.path, serde_json::to_string_pretty(&value)?)?;
        log::debug!("Token persistido em {}", self.path.display());
        Ok(())
    }

    /// Remove o arquivo de token
    pub fn delete(&self) -> ApiResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
