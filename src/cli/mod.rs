//! Interface de linha de comando do recency-cache.

pub mod commands;
pub mod interactive;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::config::DEFAULT_CONFIG_FILE;

/// recency-cache - cache LRU de capacidade fixa com console de comandos.
#[derive(Parser, Debug)]
#[command(name = "recency-cache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cria um arquivo de configuração padrão.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Executa o console lendo comandos de stdin.
    Run {
        /// Capacidade do cache (sobrepõe o arquivo de configuração).
        #[arg(long)]
        capacity: Option<usize>,

        /// Respostas em JSON, uma por linha.
        #[arg(long)]
        json: bool,

        /// Mostra o estado do cache após cada put/get.
        #[arg(long)]
        echo_state: bool,

        /// Escreve um prompt antes de cada comando.
        #[arg(long)]
        prompt: bool,
    },

    /// Configura opções interativamente.
    Config,

    /// Mostra versão.
    Version,
}
