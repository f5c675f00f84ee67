//! Respostas do console e sua renderização (texto ou JSON).

use std::fmt;

use serde::Serialize;

use crate::cache::{CacheStats, RecencyCache};
use crate::types::config::OutputFormat;
use crate::RecencyResult;

use super::command::{Key, Value};

/// Par chave/valor exposto nas respostas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub key: Key,
    pub value: Value,
}

impl From<(&Key, &Value)> for EntryView {
    fn from((key, value): (&Key, &Value)) -> Self {
        Self {
            key: *key,
            value: *value,
        }
    }
}

impl fmt::Display for EntryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.key, self.value)
    }
}

/// Resposta a um comando.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    /// `put` aplicado; `evicted` é a entrada descartada para abrir espaço.
    Stored {
        key: Key,
        evicted: Option<EntryView>,
    },
    /// Chave encontrada.
    Value { key: Key, value: Value },
    /// Chave ausente.
    Miss { key: Key },
    /// Conteúdo do cache da entrada mais recente para a menos recente.
    State {
        entries: Vec<EntryView>,
        head: Option<EntryView>,
        tail: Option<EntryView>,
    },
    /// Contadores do cache.
    Stats(CacheStats),
    /// Texto de ajuda.
    Help { usage: &'static str },
    /// Linha rejeitada.
    Error { message: String },
}

impl Reply {
    /// Fotografa o estado atual do cache.
    pub fn state(cache: &RecencyCache<Key, Value>) -> Self {
        Reply::State {
            entries: cache.iter().map(EntryView::from).collect(),
            head: cache.most_recent().map(EntryView::from),
            tail: cache.least_recent().map(EntryView::from),
        }
    }

    /// Resultado de uma leitura (`get` ou `peek`).
    pub fn lookup(key: Key, value: Option<&Value>) -> Self {
        match value {
            Some(&value) => Reply::Value { key, value },
            None => Reply::Miss { key },
        }
    }

    /// Renderiza a resposta numa única string, sem newline final.
    pub fn render(&self, format: OutputFormat) -> RecencyResult<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string(self)?),
        }
    }
}

fn optional(entry: Option<&EntryView>) -> String {
    entry.map_or_else(|| "none".to_string(), |e| e.to_string())
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Stored { evicted: None, .. } => write!(f, "OK"),
            Reply::Stored {
                evicted: Some(entry),
                ..
            } => write!(f, "OK (evicted {})", entry.key),
            Reply::Value { value, .. } => write!(f, "{}", value),
            Reply::Miss { .. } => write!(f, "not found"),
            Reply::State {
                entries,
                head,
                tail,
            } => {
                for entry in entries {
                    writeln!(f, "{}", entry)?;
                }
                write!(
                    f,
                    "head = {}\ntail = {}",
                    optional(head.as_ref()),
                    optional(tail.as_ref())
                )
            }
            Reply::Stats(stats) => write!(
                f,
                "size={} capacity={} hits={} misses={} evictions={} hit_rate={:.2}",
                stats.size,
                stats.capacity,
                stats.hits,
                stats.misses,
                stats.evictions,
                stats.hit_rate()
            ),
            Reply::Help { usage } => write!(f, "{}", usage),
            Reply::Error { message } => write!(f, "error: {}", message),
        }
    }
}
