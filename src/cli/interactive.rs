//! Configuração interativa do recency-cache.
//!
//! Este módulo implementa a configuração interativa usando dialoguer.

use std::path::Path;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::types::config::{Config, OutputFormat};
use crate::RecencyResult;

/// Executa a configuração interativa.
pub fn run_interactive_config(config_path: &Path) -> RecencyResult<()> {
    let theme = ColorfulTheme::default();

    println!("\nConfiguração Interativa do recency-cache\n");

    // Carrega config existente ou cria nova
    let mut config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        println!("Criando nova configuração...\n");
        Config::default_config()
    };

    loop {
        let options = [
            "Configurações Gerais",
            "Cache",
            "Console",
            "Salvar e Sair",
            "Sair sem Salvar",
        ];

        let selection = Select::with_theme(&theme)
            .with_prompt("O que deseja configurar?")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 => configure_general(&theme, &mut config)?,
            1 => configure_cache(&theme, &mut config)?,
            2 => configure_console(&theme, &mut config)?,
            3 => {
                config.validate()?;
                config.save(config_path)?;
                println!("\n✓ Configuração salva em: {}\n", config_path.display());
                break;
            }
            4 => {
                if Confirm::with_theme(&theme)
                    .with_prompt("Deseja realmente sair sem salvar?")
                    .default(false)
                    .interact()?
                {
                    println!("\nSaindo sem salvar.\n");
                    break;
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Configura opções gerais.
fn configure_general(theme: &ColorfulTheme, config: &mut Config) -> RecencyResult<()> {
    let log_levels = ["error", "warn", "info", "debug", "trace"];
    let current_idx = log_levels
        .iter()
        .position(|&l| l == config.general.log_level)
        .unwrap_or(1);

    let log_level_idx = Select::with_theme(theme)
        .with_prompt("Nível de log")
        .items(&log_levels)
        .default(current_idx)
        .interact()?;

    config.general.log_level = log_levels[log_level_idx].to_string();

    let log_formats = ["text", "json"];
    let current_format_idx = log_formats
        .iter()
        .position(|&f| f == config.general.log_format)
        .unwrap_or(0);

    let log_format_idx = Select::with_theme(theme)
        .with_prompt("Formato de log")
        .items(&log_formats)
        .default(current_format_idx)
        .interact()?;

    config.general.log_format = log_formats[log_format_idx].to_string();

    println!("\n✓ Configurações gerais atualizadas.\n");
    Ok(())
}

/// Configura cache.
fn configure_cache(theme: &ColorfulTheme, config: &mut Config) -> RecencyResult<()> {
    let capacity: usize = Input::with_theme(theme)
        .with_prompt("Capacidade máxima (número de entradas)")
        .default(config.cache.capacity)
        .validate_with(|value: &usize| {
            if *value == 0 {
                Err("a capacidade precisa ser pelo menos 1")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    config.cache.capacity = capacity;

    println!("\n✓ Cache configurado.\n");
    Ok(())
}

/// Configura console.
fn configure_console(theme: &ColorfulTheme, config: &mut Config) -> RecencyResult<()> {
    config.console.prompt = Confirm::with_theme(theme)
        .with_prompt("Mostrar prompt antes de cada comando?")
        .default(config.console.prompt)
        .interact()?;

    config.console.echo_state = Confirm::with_theme(theme)
        .with_prompt("Mostrar o estado do cache após put/get?")
        .default(config.console.echo_state)
        .interact()?;

    let formats = ["text", "json"];
    let current_idx = match config.console.output {
        OutputFormat::Text => 0,
        OutputFormat::Json => 1,
    };

    let format_idx = Select::with_theme(theme)
        .with_prompt("Formato das respostas")
        .items(&formats)
        .default(current_idx)
        .interact()?;

    config.console.output = match format_idx {
        1 => OutputFormat::Json,
        _ => OutputFormat::Text,
    };

    println!("\n✓ Console configurado.\n");
    Ok(())
}

/// Mostra resumo da configuração.
pub fn show_config_summary(config: &Config) {
    println!("\nResumo da Configuração\n");
    println!("┌─────────────────────────────────────────┐");
    println!("│ Geral                                   │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Log level: {:<28} │", config.general.log_level);
    println!("│ Log format: {:<27} │", config.general.log_format);
    println!("├─────────────────────────────────────────┤");
    println!("│ Cache                                   │");
    println!("├─────────────────────────────────────────┤");
    println!("│ Capacidade: {:<27} │", config.cache.capacity);
    println!("├─────────────────────────────────────────┤");
    println!("│ Console                                 │");
    println!("├─────────────────────────────────────────┤");
    println!(
        "│ Prompt: {:<31} │",
        if config.console.prompt { "Sim" } else { "Não" }
    );
    println!(
        "│ Estado após put/get: {:<18} │",
        if config.console.echo_state {
            "Sim"
        } else {
            "Não"
        }
    );
    println!(
        "│ Respostas: {:<28} │",
        format!("{:?}", config.console.output)
    );
    println!("└─────────────────────────────────────────┘");
    println!();
}
