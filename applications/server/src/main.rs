/// Mus Server - track catalog server
use clap::{Parser, Subcommand};
use mus_server::{config::ServerConfig, create_router, jobs::UploadCleanup, AppState, AuthService};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const UPLOAD_CLEANUP_INTERVAL: Duration = Duration::from_secs(600);

#[derive(Parser)]
#[command(name = "mus-server")]
#[command(about = "Mus Player track catalog server", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./config.toml)
    #[arg(short, long, global = true, env = "MUS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Mint an identity token signed with the configured secret (development)
    IssueToken {
        /// Subject, unique per issuer
        #[arg(short, long)]
        subject: String,
        /// Email claim
        #[arg(short, long)]
        email: Option<String>,
        /// Display name claim
        #[arg(short, long)]
        name: Option<String>,
        /// Avatar URL claim
        #[arg(short, long)]
        picture: Option<String>,
    },
    /// List registered users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mus_server=info,mus_storage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::IssueToken {
            subject,
            email,
            name,
            picture,
        } => issue_token(&config, &subject, email, name, picture)?,
        Commands::ListUsers => list_users(&config).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Mus Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Public URL: {}", config.server.public_url);

    let app_state = AppState::from_config(&config).await?;

    UploadCleanup::new(app_state.pool().clone(), UPLOAD_CLEANUP_INTERVAL).start();

    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn issue_token(
    config: &ServerConfig,
    subject: &str,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
) -> anyhow::Result<()> {
    config.validate()?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.issuer.clone(),
        config.auth.token_expiration_hours,
    );

    let token = auth_service.issue_identity_token(
        subject,
        email.as_deref(),
        name.as_deref(),
        picture.as_deref(),
    )?;

    println!("{}", token);
    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let pool = mus_storage::create_pool(&config.storage.database_url).await?;
    mus_storage::run_migrations(&pool).await?;

    let users = mus_storage::users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!(
            "  {} - {} <{}> ({})",
            user.id, user.full_name, user.email, user.token_identifier
        );
    }

    Ok(())
}
