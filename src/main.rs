use clap::Parser;
use recency_cache::cli::commands::RunOptions;
use recency_cache::cli::{Cli, Commands};
use recency_cache::types::config::Config;
use recency_cache::RecencyResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> RecencyResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let loaded = if cli.config.exists() {
        Some(Config::load(&cli.config))
    } else {
        None
    };
    let config = match &loaded {
        Some(Ok(config)) => config.clone(),
        _ => Config::default_config(),
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("recency_cache={}", log_level)
            .parse()
            .unwrap_or_else(|_| {
                "recency_cache=warn"
                    .parse()
                    .expect("fallback directive is valid")
            }),
    );

    // Logs go to stderr so stdout carries only console replies
    let registry = tracing_subscriber::registry().with(filter);
    if config.general.log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    match loaded {
        Some(Ok(_)) => {
            tracing::debug!("Configuration loaded from: {}", cli.config.display())
        }
        // The console must not start on a capacity the user never asked for
        Some(Err(e)) if matches!(cli.command, Commands::Run { .. }) => return Err(e),
        Some(Err(e)) => tracing::warn!(
            error = %e,
            "Ignoring invalid configuration at {}",
            cli.config.display()
        ),
        None => tracing::debug!("No configuration file, using defaults"),
    }

    match cli.command {
        Commands::Init { path } => {
            recency_cache::cli::commands::init(path)?;
        }
        Commands::Run {
            capacity,
            json,
            echo_state,
            prompt,
        } => {
            let options = RunOptions {
                capacity,
                json,
                echo_state,
                prompt,
            };
            recency_cache::cli::commands::run(&options, &config)?;
        }
        Commands::Config => {
            recency_cache::cli::commands::config_cmd(&cli.config)?;
        }
        Commands::Version => {
            recency_cache::cli::commands::version();
        }
    }

    Ok(())
}
