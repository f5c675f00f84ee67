//! Implementação dos comandos CLI do recency-cache.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::cache::RecencyCache;
use crate::console::Console;
use crate::types::config::{Config, OutputFormat, DEFAULT_CONFIG_FILE};
use crate::RecencyResult;

/// Initializes configuration in the specified directory.
pub fn init(path: Option<PathBuf>) -> RecencyResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    // Create directory if it doesn't exist
    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join(DEFAULT_CONFIG_FILE);

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        println!("Use 'recency-cache config' to modify.");
        return Ok(());
    }

    let config = Config::default_config();
    config.save(&config_path)?;

    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Adjust the capacity: recency-cache config");
    println!("  2. Start the console: recency-cache run");

    Ok(())
}

/// Flags do comando `run` que sobrepõem o arquivo de configuração.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub capacity: Option<usize>,
    pub json: bool,
    pub echo_state: bool,
    pub prompt: bool,
}

impl RunOptions {
    /// Aplica as flags sobre a configuração carregada.
    pub fn apply(&self, config: &Config) -> Config {
        let mut effective = config.clone();
        if let Some(capacity) = self.capacity {
            effective.cache.capacity = capacity;
        }
        if self.json {
            effective.console.output = OutputFormat::Json;
        }
        effective.console.echo_state |= self.echo_state;
        effective.console.prompt |= self.prompt;
        effective
    }
}

/// Executa o console sobre stdin/stdout.
pub fn run(options: &RunOptions, config: &Config) -> RecencyResult<()> {
    let effective = options.apply(config);

    tracing::debug!(
        capacity = effective.cache.capacity,
        output = ?effective.console.output,
        "Configuração efetiva do console"
    );

    let cache = RecencyCache::new(effective.cache.capacity)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(
        cache,
        stdin.lock(),
        BufWriter::new(stdout.lock()),
        effective.console,
    );
    console.run()
}

/// Configura opções interativamente.
pub fn config_cmd(config_path: &Path) -> RecencyResult<()> {
    use super::interactive::{run_interactive_config, show_config_summary};

    // Mostra resumo antes de editar
    if config_path.exists() {
        let config = Config::load(config_path)?;
        show_config_summary(&config);
    }

    run_interactive_config(config_path)
}

/// Mostra versão.
pub fn version() {
    println!("recency-cache {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Cache LRU de capacidade fixa com console de comandos");
}
