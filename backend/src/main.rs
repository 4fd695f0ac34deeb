//! Backend entry-point: configuration, migrations, pool, and server wiring.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use actix_web::cookie::Key;
use clap::Parser;
use color_eyre::eyre::{self, WrapErr, eyre};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use mockable::DefaultClock;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use invoices_backend::inbound::http::state::{HttpState, HttpStatePorts};
use invoices_backend::outbound::cache::InMemoryViewCache;
use invoices_backend::outbound::persistence::{
    CredentialsAuthService, DbPool, DieselInvoiceRepository, DieselUserRepository, PoolConfig,
};
use invoices_backend::server::{self, ServerConfig};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Command-line and environment configuration.
#[derive(Debug, Parser)]
#[command(name = "invoices-backend", about = "Invoice-management backend")]
struct Args {
    /// Socket address to bind.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// File holding the session signing key material (>= 32 bytes).
    #[arg(
        long,
        env = "SESSION_KEY_FILE",
        default_value = "/var/run/secrets/session_key"
    )]
    session_key_file: PathBuf,

    /// Allow an ephemeral session key when the key file is unreadable.
    #[arg(long, env = "SESSION_ALLOW_EPHEMERAL")]
    session_allow_ephemeral: bool,

    /// Set the Secure attribute on session cookies.
    #[arg(
        long,
        env = "SESSION_COOKIE_SECURE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    cookie_secure: bool,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Args::parse();
    let key = load_session_key(&args)?;

    run_migrations(args.database_url.clone()).await?;

    let pool = DbPool::new(PoolConfig::new(&args.database_url))
        .await
        .map_err(|err| eyre!("failed to build database pool: {err}"))?;

    let users = DieselUserRepository::new(pool.clone());
    let state = HttpState::new(HttpStatePorts {
        invoices: Arc::new(DieselInvoiceRepository::new(pool)),
        users: Arc::new(users.clone()),
        auth: Arc::new(CredentialsAuthService::new(users)),
        view_cache: Arc::new(InMemoryViewCache::new()),
        clock: Arc::new(DefaultClock),
    });

    let config = ServerConfig::new(key, args.cookie_secure, args.bind);
    server::run(config, state)
        .await
        .wrap_err("server terminated with an error")
}

fn load_session_key(args: &Args) -> eyre::Result<Key> {
    match std::fs::read(&args.session_key_file) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            if cfg!(debug_assertions) || args.session_allow_ephemeral {
                warn!(
                    path = %args.session_key_file.display(),
                    error = %e,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(eyre!(
                    "failed to read session key at {}: {e}",
                    args.session_key_file.display()
                ))
            }
        }
    }
}

/// Apply pending migrations on a blocking thread before serving traffic.
async fn run_migrations(database_url: String) -> eyre::Result<()> {
    tokio::task::spawn_blocking(move || -> eyre::Result<()> {
        use diesel::Connection;

        let mut conn = diesel::PgConnection::establish(&database_url)
            .wrap_err("failed to connect for migrations")?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| eyre!("migrations failed: {err}"))?;
        Ok(())
    })
    .await
    .wrap_err("migration task panicked")?
}
