use shipdesk_office::{BackOffice, StoreConfig};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Back office HTTP server.
pub struct ShipdeskServer {
    config: ServerConfig,
    office: BackOffice,
}

impl ShipdeskServer {
    /// Open the back office in `config.data_dir`.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let office = BackOffice::open(StoreConfig::new(&config.data_dir))?;
        Ok(Self::with_office(config, office))
    }

    pub fn with_office(config: ServerConfig, office: BackOffice) -> Self {
        Self { config, office }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn office(&self) -> &BackOffice {
        &self.office
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.office.clone())
    }

    /// Seed the administrator account if configured to.
    pub fn prepare(&self) -> ServerResult<()> {
        if self.config.seed_admin {
            self.office.seed_admin(&self.config.admin)?;
        }
        Ok(())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        self.prepare()?;
        let app = self.router();
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(
            bind_addr = %self.config.bind_addr,
            data_dir = %self.config.data_dir.display(),
            "shipdesk server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
