use crate::{
    config::{RuntimeConfiguration, StoreBackend},
    error::RegistryResult,
    store::{StudentStore, memory::MemoryStore, postgres::PostgresStore},
};
use maud::{DOCTYPE, Markup, html};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct RegistryState {
    store: Arc<dyn StudentStore>,
    postgres: Option<PostgresStore>,
}

impl RegistryState {
    pub async fn new(config: &RuntimeConfiguration) -> RegistryResult<Self> {
        match config.store() {
            StoreBackend::Postgres(db_config) => {
                let options = PgPoolOptions::new().max_connections(db_config.max_connections());
                let postgres = PostgresStore::connect(options, &db_config.get_db_path()).await?;
                info!("Connected to postgres");

                Ok(Self {
                    store: Arc::new(postgres.clone()),
                    postgres: Some(postgres),
                })
            }
            StoreBackend::Memory => {
                warn!("Using the in-memory store, nothing will survive a restart");
                Ok(Self::with_store(Arc::new(MemoryStore::new())))
            }
        }
    }

    pub fn with_store(store: Arc<dyn StudentStore>) -> Self {
        Self {
            store,
            postgres: None,
        }
    }

    pub fn store(&self) -> &dyn StudentStore {
        self.store.as_ref()
    }

    #[allow(clippy::unused_self)] //in case self is ever needed :)
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Student Registry" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white p-8" {
                    nav class="mb-8" {
                        a href="/students" class="text-xl font-semibold hover:underline" {"Student Registry"}
                    }
                    (markup)
                }
            }
        }
    }

    pub async fn sensible_shutdown(&self) {
        if let Some(postgres) = &self.postgres {
            postgres.close().await;
            info!("Closed database pool");
        }
    }
}
