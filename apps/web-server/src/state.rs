//! Application state - shared across all handlers.
//!
//! Built once at startup by [`AppState::new`], cloned into every actix worker,
//! and torn down with [`AppState::shutdown`] once the server has stopped.

use std::io;
use std::sync::Arc;

use secretly_core::ports::{IdentityProvider, SessionRevocations, TokenService, UserRepository};
use secretly_core::services::{AuthGateway, FeedAggregator, SubmitWorkflow, UserStore};
use secretly_infra::{
    Argon2PasswordService, GoogleIdentityProvider, InMemorySessionRevocations,
    InMemoryUserRepository, JwtTokenService,
};

#[cfg(feature = "postgres")]
use secretly_infra::{DatabaseConnections, PostgresSessionRevocations, PostgresUserRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthGateway>,
    pub feed: Arc<FeedAggregator>,
    pub submissions: Arc<SubmitWorkflow>,
    pub identity_provider: Option<Arc<dyn IdentityProvider>>,
    pub secure_cookies: bool,
    /// Which backend holds users and posts ("postgres" or "memory").
    pub storage: &'static str,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> io::Result<Self> {
        #[cfg(feature = "postgres")]
        {
            let db = match &config.database {
                Some(db_config) => match DatabaseConnections::init(db_config).await {
                    Ok(connections) => Some(Arc::new(connections)),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        None
                    }
                },
                None => {
                    tracing::warn!(
                        "DATABASE_URL not set. Running without database (in-memory mode)."
                    );
                    None
                }
            };

            let repo: Arc<dyn UserRepository> = match &db {
                Some(conn) => Arc::new(PostgresUserRepository::new(conn.main.clone())),
                None => Arc::new(InMemoryUserRepository::new()),
            };
            let revocations: Arc<dyn SessionRevocations> = match &db {
                Some(conn) => Arc::new(PostgresSessionRevocations::new(conn.main.clone())),
                None => Arc::new(InMemorySessionRevocations::new()),
            };

            let mut state = Self::with_stores(repo, revocations, config)?;
            if db.is_some() {
                state.storage = "postgres";
            }
            state.db = db;
            Ok(state)
        }

        #[cfg(not(feature = "postgres"))]
        {
            tracing::info!("Running without postgres feature - using in-memory repository");
            Self::with_stores(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemorySessionRevocations::new()),
                config,
            )
        }
    }

    /// Wire the services around already-open stores.
    pub fn with_stores(
        repo: Arc<dyn UserRepository>,
        revocations: Arc<dyn SessionRevocations>,
        config: &AppConfig,
    ) -> io::Result<Self> {
        let passwords = Argon2PasswordService::with_config(config.password).map_err(io::Error::other)?;
        let tokens: Arc<dyn TokenService> =
            Arc::new(JwtTokenService::new(config.session.jwt.clone()));

        let users = Arc::new(UserStore::new(repo.clone(), Arc::new(passwords)));

        let identity_provider: Option<Arc<dyn IdentityProvider>> = match &config.google {
            Some(google) => match GoogleIdentityProvider::new(google.clone()) {
                Ok(provider) => {
                    tracing::info!("Google login enabled");
                    Some(Arc::new(provider))
                }
                Err(e) => {
                    tracing::warn!("Google login disabled: {}", e);
                    None
                }
            },
            None => {
                tracing::info!("GOOGLE_CLIENT_ID/GOOGLE_CLIENT_SECRET not set. Google login disabled.");
                None
            }
        };

        tracing::info!("Application state initialized");

        Ok(Self {
            auth: Arc::new(AuthGateway::new(users.clone(), tokens, revocations)),
            feed: Arc::new(FeedAggregator::new(repo)),
            submissions: Arc::new(SubmitWorkflow::new(users)),
            identity_provider,
            secure_cookies: config.session.secure_cookies,
            storage: "memory",
            #[cfg(feature = "postgres")]
            db: None,
        })
    }

    /// Release process-wide resources.
    pub async fn shutdown(&self) {
        #[cfg(feature = "postgres")]
        if let Some(db) = &self.db {
            if let Err(e) = db.close().await {
                tracing::error!("Failed to close database pool: {}", e);
            }
        }

        tracing::info!("Application state shut down");
    }
}
