use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagination_kit::config::{init_config, Config};
use pagination_kit::models::Catalog;
use pagination_kit::routes::{create_routes, openapi_document, raw_openapi_document, AppState};

#[derive(Parser)]
#[command(name = "pagination-kit")]
#[command(about = "Demo API whose listings carry x-pagination-* headers")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Print the OpenAPI document as JSON
    Openapi {
        /// Print the document without the pagination headers
        #[arg(long)]
        raw: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagination_kit=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = init_config()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Openapi { raw } => print_openapi(config, raw),
    }
}

async fn serve(config: &Config) -> Result<()> {
    let state = AppState::new(config, Catalog::seeded());
    let app = create_routes(state)?;

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        public_url = %config.public_url,
        default_page_size = config.default_page_size,
        max_page_size = config.max_page_size,
        "listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

fn print_openapi(config: &Config, raw: bool) -> Result<()> {
    let document = if raw {
        raw_openapi_document()?
    } else {
        let state = AppState::new(config, Catalog::default());
        openapi_document(state.plugin.as_ref())?
    };
    println!("{}", serde_json::to_string_pretty(&document.to_json()?)?);
    Ok(())
}
