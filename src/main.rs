use std::path::Path;

use clap::Parser;
use canvas_assist::cli::commands::{build_assistant, cmd_serve, render, request_for};
use canvas_assist::cli::config::{Cli, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = load_config(cli.config.as_deref());
    let mut assistant = build_assistant(&cli, &config)?;

    let all_ok = match request_for(&cli.command)? {
        Some(request) => {
            let response = assistant.handle(request);
            print!("{}", render(&response));
            response.is_success()
        }
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let handled = cmd_serve(&mut assistant, stdin.lock(), stdout.lock())?;
            tracing::info!(handled, "serve loop finished");
            true
        }
    };

    if cli.write {
        assistant.host().save(Path::new(&cli.doc))?;
    }

    if !all_ok {
        std::process::exit(1);
    }
    Ok(())
}
