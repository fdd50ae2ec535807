use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod context;
mod output;

use cli::{Cli, Commands};
use context::Context;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so structured output on stdout stays parseable
    let default_filter = if cli.verbose {
        "storefront_cli=debug,storefront_sdk=debug"
    } else {
        "storefront_cli=info,storefront_sdk=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = match Context::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&ctx, cli.command).await {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Auth(cmd) => commands::auth::execute(ctx, cmd).await,
        Commands::Products(cmd) => commands::products::execute(ctx, cmd).await,
        Commands::Users(cmd) => commands::users::execute(ctx, cmd).await,
        Commands::Profile(cmd) => commands::profile::execute(ctx, cmd).await,
        Commands::Config(cmd) => commands::config::execute(ctx, cmd).await,
    }
}
