// ABOUTME: Main entry point for the gallery CLI application
// ABOUTME: Wires argument parsing, config, logging and the Cloudinary client together

use anyhow::Result;
use clap::{CommandFactory, Parser};
use gallery_cli::cli::{Cli, Commands};
use gallery_cli::cli_output::CliOutput;
use gallery_cli::commands::{self, RenderOptions};
use gallery_cli::completions::generate_completions;
use gallery_cli::config::Config;
use gallery_cli::constants::timeouts;
use gallery_cli::input;
use gallery_sdk::{CloudinaryClient, GalleryError};
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::io::IsTerminal;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let use_color = !cli.no_color
        && env::var("NO_COLOR").is_err()
        && env::var("TERM").unwrap_or_default() != "dumb";
    let output = CliOutput::with_color(use_color && std::io::stderr().is_terminal());

    if let Err(err) = run(cli, use_color, &output).await {
        match err.downcast_ref::<GalleryError>() {
            Some(gallery_err) => output.gallery_error(gallery_err),
            None => output.error(&format!("{:#}", err)),
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Loads the config files and builds a client from the environment credentials
fn load_client(output: &CliOutput) -> Result<(Config, CloudinaryClient)> {
    let config = Config::load()?;
    let env_config = config.client_config(|name| env::var(name).ok())?;

    if let Some(cloud_name) = config.cloud_name_override(&env_config) {
        output.warning(&format!(
            "cloud_name '{}' from the config file replaces '{}' from the environment",
            cloud_name, env_config.cloud_name
        ));
    }

    let client = CloudinaryClient::from_config(config.apply_to(env_config))?;
    Ok((config, client))
}

fn spinner(message: String) -> Option<ProgressBar> {
    if !std::io::stderr().is_terminal() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(timeouts::PROGRESS_BAR_TICK_MS));
    Some(pb)
}

async fn run(cli: Cli, use_color: bool, output: &CliOutput) -> Result<()> {
    let use_color = use_color && std::io::stdout().is_terminal();

    match cli.command {
        Commands::Search { tag, output: args } => {
            let (config, client) = load_client(output)?;
            let render = RenderOptions {
                format: args.format(config.preferred_format),
                use_color,
                pretty: args.pretty,
                title: tag.trim().to_string(),
            };

            let pb = spinner(format!("Searching for images tagged {}", tag.trim()));
            let result = commands::search(&client, &tag, &render).await;
            if let Some(pb) = pb {
                pb.finish_and_clear();
            }
            println!("{}", result?);
        }
        Commands::Transform {
            kind,
            params,
            input,
            output: args,
        } => {
            let (config, client) = load_client(output)?;
            let images = input::load_descriptors(input.as_deref())?;
            let render = RenderOptions {
                format: args.format(config.preferred_format),
                use_color,
                pretty: args.pretty,
                title: format!("{} images", kind),
            };
            println!(
                "{}",
                commands::transform(&client, &kind, &params, &images, &render)?
            );
        }
        Commands::Url {
            public_id,
            kind,
            params,
        } => {
            let (_, client) = load_client(output)?;
            println!(
                "{}",
                commands::image_url(&client, &public_id, kind.as_deref(), &params)?
            );
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate_completions(shell, &mut cmd, &mut std::io::stdout());
        }
    }

    Ok(())
}
