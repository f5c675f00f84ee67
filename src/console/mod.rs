//! Console de comandos orientado a linhas.
//!
//! Lê um comando por linha (`put <key> <value>`, `get <key>`, `exit`, ...)
//! de qualquer [`BufRead`] e escreve uma resposta por comando em qualquer
//! [`Write`]. O cache é recebido pelo construtor; o console não guarda
//! nenhum estado global.
//!
//! ## Exemplo
//!
//! ```text
//! put 1 11
//! OK
//! get 1
//! 11
//! get 2
//! not found
//! ```

mod command;
mod reply;

use std::io::{BufRead, Write};

use crate::cache::RecencyCache;
use crate::types::config::ConsoleConfig;
use crate::RecencyResult;

pub use command::{Command, Key, Value, USAGE};
pub use reply::{EntryView, Reply};

/// Prompt escrito antes de cada leitura quando `console.prompt` está ligado.
pub const PROMPT: &str = "> ";

/// Loop de leitura/execução sobre um [`RecencyCache`].
pub struct Console<R, W> {
    cache: RecencyCache<Key, Value>,
    reader: R,
    writer: W,
    settings: ConsoleConfig,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Cria um console sobre o cache informado.
    pub fn new(
        cache: RecencyCache<Key, Value>,
        reader: R,
        writer: W,
        settings: ConsoleConfig,
    ) -> Self {
        Self {
            cache,
            reader,
            writer,
            settings,
        }
    }

    /// Processa linhas até `exit` ou fim da entrada.
    ///
    /// Linhas inválidas geram uma resposta de erro e o loop continua.
    /// Erros de IO encerram o loop.
    pub fn run(&mut self) -> RecencyResult<()> {
        tracing::info!(capacity = self.cache.capacity(), "Console started");

        loop {
            if self.settings.prompt {
                self.writer.write_all(PROMPT.as_bytes())?;
                self.writer.flush()?;
            }

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                tracing::info!("End of input");
                break;
            }

            let command = match Command::parse(&line) {
                Ok(Some(Command::Exit)) => break,
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) if e.is_command_error() => {
                    tracing::warn!(error = %e, "Rejected command");
                    self.write_reply(&Reply::Error {
                        message: e.to_string(),
                    })?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            tracing::debug!(command = command.name(), "Executing command");
            for reply in self.execute(command) {
                self.write_reply(&reply)?;
            }
        }

        let stats = self.cache.stats();
        tracing::info!(
            size = stats.size,
            hits = stats.hits,
            misses = stats.misses,
            evictions = stats.evictions,
            "Console stopped"
        );
        Ok(())
    }

    /// Aplica um comando ao cache e devolve as respostas a escrever.
    ///
    /// Com `echo_state` ligado, `put` e `get` são seguidos do estado do cache.
    pub fn execute(&mut self, command: Command) -> Vec<Reply> {
        let reply = match command {
            Command::Put { key, value } => {
                let evicted = self.cache.push(key, value).map(|(key, value)| {
                    tracing::debug!(key, value, "Evicted least recently used entry");
                    EntryView { key, value }
                });
                Reply::Stored { key, evicted }
            }
            Command::Get { key } => Reply::lookup(key, self.cache.get(&key)),
            Command::Peek { key } => Reply::lookup(key, self.cache.peek(&key)),
            Command::State => Reply::state(&self.cache),
            Command::Stats => Reply::Stats(self.cache.stats()),
            Command::Help => Reply::Help { usage: USAGE },
            Command::Exit => return Vec::new(),
        };

        let echo = self.settings.echo_state
            && matches!(command, Command::Put { .. } | Command::Get { .. });
        if echo {
            vec![reply, Reply::state(&self.cache)]
        } else {
            vec![reply]
        }
    }

    /// Cache em uso.
    pub fn cache(&self) -> &RecencyCache<Key, Value> {
        &self.cache
    }

    /// Devolve o cache e o writer.
    pub fn into_parts(self) -> (RecencyCache<Key, Value>, W) {
        (self.cache, self.writer)
    }

    fn write_reply(&mut self, reply: &Reply) -> RecencyResult<()> {
        let body = reply.render(self.settings.output)?;
        self.writer.write_all(body.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
