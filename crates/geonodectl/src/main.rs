use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::CommandContext;
use connection::GeonodeApiConf;
use error::Result;
use geonode_client::GeonodeClient;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        eprintln!("{}", e.display_with_suggestions());
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let conf = if let Some(env_file) = &cli.env_file {
        debug!(file = %env_file.display(), "loading connection settings from env file");
        GeonodeApiConf::from_env_file(env_file)?
    } else {
        debug!("loading connection settings from environment");
        GeonodeApiConf::from_env()?
    };
    let client = connection::create_client(&conf, cli.not_verify_ssl)?;

    let ctx = CommandContext {
        raw: cli.raw,
        page: cli.page,
        page_size: cli.page_size,
    };

    let start = std::time::Instant::now();
    let result = execute_command(&client, &cli.command, &ctx).await;
    let duration = start.elapsed();
    match &result {
        Ok(()) => info!("command completed in {:?}", duration),
        Err(e) => error!("command failed after {:?}: {}", duration, e),
    }
    result
}

async fn execute_command(
    client: &GeonodeClient,
    command: &Commands,
    ctx: &CommandContext,
) -> Result<()> {
    match command {
        Commands::Resources { command } => commands::resources::handle(client, command, ctx).await,
        Commands::Dataset { command } => commands::datasets::handle(client, command, ctx).await,
        Commands::Documents { command } => commands::documents::handle(client, command, ctx).await,
        Commands::Maps { command } => commands::maps::handle(client, command, ctx).await,
        Commands::Users { command } => commands::users::handle(client, command, ctx).await,
        Commands::Geoapps { command } => commands::geoapps::handle(client, command, ctx).await,
        Commands::Uploads { command } => commands::uploads::handle(client, command, ctx).await,
        Commands::Executionrequest { command } => {
            commands::execution::handle(client, command, ctx).await
        }
        Commands::Keywords { command } => {
            commands::keywords::handle_keywords(client, command, ctx).await
        }
        Commands::Tkeywords { command } => {
            commands::keywords::handle_tkeywords(client, command, ctx).await
        }
        Commands::Tkeywordlabels { command } => {
            commands::keywords::handle_tkeywordlabels(client, command, ctx).await
        }
        Commands::Linkedresources { command } => {
            commands::linked::handle(client, command, ctx).await
        }
        Commands::Attributes { command } => {
            commands::attributes::handle(client, command, ctx).await
        }
    }
}

fn init_tracing(verbose: u8) {
    // RUST_LOG wins over the verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "geonodectl=warn,geonode_client=warn",
            1 => "geonodectl=info,geonode_client=info",
            2 => "geonodectl=debug,geonode_client=debug",
            _ => "geonodectl=trace,geonode_client=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("tracing initialized with verbosity level: {}", verbose);
}
