#[cfg(feature = "postgres")]
use std::{sync::Arc, time::Duration};

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the database pool.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Process-wide connection pool.
///
/// Created once at startup with [`DatabaseConnections::init`], shared by every
/// request, and released with [`DatabaseConnections::close`] after the HTTP
/// server has stopped.
#[cfg(feature = "postgres")]
pub struct DatabaseConnections {
    pub main: Arc<DbConn>,
}

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    /// Open the pool described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection pool...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!(pool = config.max_connections, "Database connected");

        Ok(Self {
            main: Arc::new(main),
        })
    }

    /// Close every pooled connection.
    pub async fn close(&self) -> Result<(), DbErr> {
        self.main.close_by_ref().await?;
        tracing::info!("Database connection pool closed");
        Ok(())
    }
}
