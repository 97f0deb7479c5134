//! Module wiring and lifecycle: storage, domain service, clients and the HTTP listener

use crate::config::Config;
use crate::contract::ContentApi;
use crate::domain::{EventPublisher, NoOpEventPublisher, Service, TracingEventPublisher};
use crate::infra::storage::{
    migrations::Migrator, SeaOrmContentEntryRepository, SeaOrmContentModelRepository,
    SeaOrmTenantRepository,
};
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Content service module
pub struct ContentServiceModule {
    config: Config,
    db: Arc<DatabaseConnection>,
    service: Arc<Service>,
}

impl ContentServiceModule {
    /// Connect to the database, run migrations and build the domain service
    pub async fn init(config: Config) -> Result<Self> {
        let db = Arc::new(connect(&config).await?);

        Migrator::up(&*db, None)
            .await
            .context("content service migrations failed")?;
        tracing::info!("Content service migrations completed");

        // Build repositories
        let tenant_repo = Arc::new(SeaOrmTenantRepository::new(db.clone()));
        let model_repo = Arc::new(SeaOrmContentModelRepository::new(db.clone()));
        let entry_repo = Arc::new(SeaOrmContentEntryRepository::new(db.clone()));

        let event_publisher: Arc<dyn EventPublisher> = if config.publish_events {
            Arc::new(TracingEventPublisher)
        } else {
            Arc::new(NoOpEventPublisher)
        };

        let service = Arc::new(Service::new(
            tenant_repo,
            model_repo,
            entry_repo,
            event_publisher,
        ));

        tracing::info!(publish_events = config.publish_events, "Content service initialized");
        Ok(Self {
            config,
            db,
            service,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn db(&self) -> Arc<DatabaseConnection> {
        self.db.clone()
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other modules
    pub fn client(&self) -> Arc<dyn ContentApi> {
        Arc::new(crate::api::native::NativeClient::new(self.service.clone()))
    }

    pub fn router(&self) -> axum::Router {
        crate::api::rest::router(self.service.clone())
    }

    /// Serve the REST API until `cancel` fires
    pub async fn serve(self: Arc<Self>, cancel: CancellationToken) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("failed to bind {}", self.config.bind_addr))?;
        tracing::info!(addr = %listener.local_addr()?, "Content service listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { cancel.cancelled().await })
            .await
            .context("content service HTTP server failed")?;

        tracing::info!("Content service stopped");
        Ok(())
    }
}

async fn connect(config: &Config) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.database_url.clone());

    // Every pooled connection to `sqlite::memory:` is a separate database
    if config.database_url.starts_with("sqlite::memory:") {
        options.max_connections(1).min_connections(1);
    } else {
        options.max_connections(config.max_connections);
    }
    options.sqlx_logging(false);

    Database::connect(options)
        .await
        .with_context(|| format!("failed to connect to {}", redact(&config.database_url)))
}

/// Drop credentials from a connection string before logging it
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme), Some(at)) if at > scheme => format!("{}://***{}", &url[..scheme], &url[at..]),
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_credentials() {
        assert_eq!(
            redact("postgres://user:secret@db:5432/content"),
            "postgres://***@db:5432/content"
        );
        assert_eq!(redact("sqlite::memory:"), "sqlite::memory:");
    }
}
