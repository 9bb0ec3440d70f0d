mod cli;

use posterforge::config::{self, Config};
use posterforge::http::ReqwestHttp;
use posterforge::overlay::{FileFontLoader, FontLoader};
use posterforge::processor::{Processor, RunSummary};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "posterforge=debug".to_string()
        } else {
            "posterforge=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    let file_config = config::load_config_or_default(cli.config.as_deref())?;
    let mut config =
        config::resolve(file_config, &cli.overrides).context("Invalid configuration")?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(&config),
        Commands::Restore => {
            config.restore_mode = true;
            run(&config)
        }
        Commands::Validate => validate_config(&config),
    }
}

fn run(config: &Config) -> Result<()> {
    let http = Arc::new(ReqwestHttp::new());
    let summary = Processor::new(config, http).run(&FileFontLoader)?;
    print_summary(config, &summary);
    Ok(())
}

fn print_summary(config: &Config, summary: &RunSummary) {
    if config.restore_mode {
        println!("Restored {} posters", summary.restored);
    } else {
        println!(
            "Found {} folders: {} processed, {} skipped",
            summary.found, summary.processed, summary.skipped
        );
    }

    if let Some(ref refresh) = summary.refresh {
        println!(
            "Plex refresh: {} succeeded, {} failed",
            refresh.succeeded.len(),
            refresh.failed.len()
        );
    }
}

fn validate_config(config: &Config) -> Result<()> {
    println!("✓ Configuration is valid");
    println!("  TMDB API key: {}", mask(&config.api_key));
    println!("  Media root: {}", config.media_root.display());
    println!("  Restore mode: {}", config.restore_mode);
    println!("  Min vote count: {}", config.min_vote_count);
    println!("  Request delay: {}ms", config.request_delay.as_millis());
    println!(
        "  Static overlay: {} ({})",
        config.static_overlay.enabled,
        config.static_overlay.path.display()
    );
    println!(
        "  TMDB rating badge: {} ({})",
        config.rating_overlay.enabled,
        config.rating_overlay.dir.display()
    );
    println!(
        "  Rendered rating badge: {} ({})",
        config.rendered_badge.enabled,
        config.rendered_badge.font_path.display()
    );
    if config.rendered_badge.enabled {
        FileFontLoader
            .load(&config.rendered_badge.font_path)
            .context("Rendered rating badge is enabled but the font cannot be loaded")?;
        println!("    Font: ok");
    }

    let refresh = &config.refresh;
    println!("  Plex refresh: {}", refresh.enabled);
    if refresh.enabled {
        println!(
            "    Server: {}:{}",
            refresh.host.as_deref().unwrap_or("<unset>"),
            refresh
                .port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "<unset>".to_string())
        );
        println!(
            "    Token: {}",
            refresh.token.as_deref().map(mask).unwrap_or_else(|| "<unset>".to_string())
        );
        println!("    Library IDs: {}", refresh.library_ids.join(", "));
        if !refresh.is_complete() {
            println!("    ! Settings are incomplete, refresh will be skipped");
        }
    }

    Ok(())
}

/// Show only the last four characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
