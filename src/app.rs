mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    analysis::VaderScorer,
    api,
    clients::AzureOpenAiClient,
    config::{CatalogBackend, Config, DEFAULT_MAX_IMAGE_BYTES},
    observability::Telemetry,
    pipeline::{SentimentPipeline, TextSource},
    store::{CatalogDao, MemoryCatalogDao, PgCatalogDao},
};

pub use server::{serve, shutdown_signal};

#[derive(Clone)]
pub(crate) struct AppState {
    registry: Arc<ComponentRegistry>,
}

/// Long-lived collaborators shared by every request.
pub struct ComponentRegistry {
    telemetry: Telemetry,
    dao: Arc<dyn CatalogDao>,
    text_source: TextSource,
    sentiment: SentimentPipeline,
    max_image_bytes: usize,
}

impl AppState {
    pub(crate) fn new(registry: ComponentRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub(crate) fn telemetry(&self) -> &Telemetry {
        &self.registry.telemetry
    }

    pub(crate) fn dao(&self) -> Arc<dyn CatalogDao> {
        Arc::clone(&self.registry.dao)
    }

    pub(crate) fn text_source(&self) -> &TextSource {
        &self.registry.text_source
    }

    pub(crate) fn sentiment(&self) -> &SentimentPipeline {
        &self.registry.sentiment
    }

    pub(crate) fn max_image_bytes(&self) -> usize {
        self.registry.max_image_bytes
    }
}

impl ComponentRegistry {
    /// Initialises telemetry, the catalog backend and the text generator.
    ///
    /// The postgres backend gets its migrations applied before this returns.
    ///
    /// # Errors
    /// Fails when telemetry, the connection pool, migrations or the
    /// generator client cannot be set up.
    pub async fn build(config: Config) -> Result<Self> {
        let telemetry = Telemetry::new()?;

        let dao: Arc<dyn CatalogDao> = match config.catalog_backend() {
            CatalogBackend::Postgres => {
                let database_url = config
                    .database_url()
                    .context("DATABASE_URL is required for the postgres backend")?;
                let pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections())
                    .min_connections(config.db_min_connections())
                    .acquire_timeout(config.db_acquire_timeout())
                    .test_before_acquire(true)
                    .connect_lazy(database_url)
                    .context("failed to configure catalog connection pool")?;
                let dao = PgCatalogDao::new(pool);
                dao.migrate().await?;
                Arc::new(dao)
            }
            CatalogBackend::Memory => Arc::new(MemoryCatalogDao::new()),
        };
        info!(backend = dao.backend(), "catalog store ready");

        let generator = Arc::new(
            AzureOpenAiClient::new(config.text_generation_config())
                .context("failed to build text generation client")?,
        );
        let text_source =
            TextSource::new(generator, config.batch_sizes()).with_metrics(telemetry.metrics());
        let sentiment = SentimentPipeline::new(Arc::new(VaderScorer::new()));

        Ok(Self {
            telemetry,
            dao,
            text_source,
            sentiment,
            max_image_bytes: config.max_image_bytes(),
        })
    }

    /// Assembles a registry from ready-made parts.
    ///
    /// The text source should already carry `telemetry.metrics()` if
    /// generation metrics are wanted. Images are capped at
    /// [`DEFAULT_MAX_IMAGE_BYTES`] until [`Self::with_max_image_bytes`] says otherwise.
    #[must_use]
    pub fn from_parts(
        telemetry: Telemetry,
        dao: Arc<dyn CatalogDao>,
        text_source: TextSource,
        sentiment: SentimentPipeline,
    ) -> Self {
        Self {
            telemetry,
            dao,
            text_source,
            sentiment,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    #[must_use]
    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }
}

pub fn build_router(registry: ComponentRegistry) -> Router {
    let state = AppState::new(registry);
    api::router(state).layer(TraceLayer::new_for_http())
}
