//! Parse das linhas de comando do console.

use crate::{RecencyError, RecencyResult};

/// Chave usada pelo console.
pub type Key = i64;

/// Valor usado pelo console.
pub type Value = i64;

/// Comando lido de uma linha de entrada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `put <key> <value>`
    Put { key: Key, value: Value },
    /// `get <key>`
    Get { key: Key },
    /// `peek <key>`
    Peek { key: Key },
    /// `state`
    State,
    /// `stats`
    Stats,
    /// `help`
    Help,
    /// `exit` ou `quit`
    Exit,
}

impl Command {
    /// Faz o parse de uma linha.
    ///
    /// Linhas em branco retornam `Ok(None)`. Argumentos extras são ignorados.
    pub fn parse(line: &str) -> RecencyResult<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "put" => Command::Put {
                key: number(words.next(), "put", "key")?,
                value: number(words.next(), "put", "value")?,
            },
            "get" => Command::Get {
                key: number(words.next(), "get", "key")?,
            },
            "peek" => Command::Peek {
                key: number(words.next(), "peek", "key")?,
            },
            "state" => Command::State,
            "stats" => Command::Stats,
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            _ => return Err(RecencyError::UnknownCommand(name.to_string())),
        };

        Ok(Some(command))
    }

    /// Nome do comando, para logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Put { .. } => "put",
            Command::Get { .. } => "get",
            Command::Peek { .. } => "peek",
            Command::State => "state",
            Command::Stats => "stats",
            Command::Help => "help",
            Command::Exit => "exit",
        }
    }
}

fn number(word: Option<&str>, command: &'static str, argument: &'static str) -> RecencyResult<i64> {
    let word = word.ok_or(RecencyError::MissingArgument { command, argument })?;
    word.parse().map_err(|source| RecencyError::InvalidNumber {
        value: word.to_string(),
        source,
    })
}

/// Texto do comando `help`.
pub const USAGE: &str = "\
commands:
  put <key> <value>   insert or update an entry
  get <key>           read an entry and mark it most recent
  peek <key>          read an entry without touching it
  state               show entries from most to least recent
  stats               show hit/miss/eviction counters
  help                show this message
  exit                leave the console";
