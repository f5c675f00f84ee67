//! Tipos de erro do recency-cache.

use std::num::ParseIntError;

use thiserror::Error;

/// Tipo de resultado padrão do recency-cache.
pub type RecencyResult<T> = Result<T, RecencyError>;

/// Erros possíveis no recency-cache.
#[derive(Error, Debug)]
pub enum RecencyError {
    #[error("Capacidade inválida: o cache precisa de pelo menos uma entrada")]
    ZeroCapacity,

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Comando desconhecido: '{0}'")]
    UnknownCommand(String),

    #[error("Comando '{command}' exige o argumento <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Número inválido '{value}': {source}")]
    InvalidNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[cfg(feature = "cli")]
    #[error("Erro no prompt interativo: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl RecencyError {
    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Indica se o erro vem de uma linha de comando mal formada.
    ///
    /// O console reporta esses erros e continua lendo; os demais encerram o loop.
    pub fn is_command_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand(_) | Self::MissingArgument { .. } | Self::InvalidNumber { .. }
        )
    }
}
