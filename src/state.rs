use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::config::{AppConfig, EmbedderKind};
use crate::db;
use crate::services::chat::ChatService;
use crate::services::classifier::IntentClassifier;
use crate::services::embedding::{Embedder, HashingEmbedder};
use crate::services::generator::{seeded_rng, ResponseGenerator};
use crate::services::similarity::{self, SimilarityIndex};

pub struct AppState {
    pub config: AppConfig,
    pub chat: ChatService,
}

impl AppState {
    /// Loads the response dataset and opens (and if needed seeds) the vector
    /// store. A store that cannot be opened or seeded is logged and skipped.
    pub fn build(config: AppConfig) -> anyhow::Result<Self> {
        let generator = ResponseGenerator::from_config(&config.generator_config())
            .context("failed to load response dataset")?;

        let similarity = match open_similarity(&config) {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::warn!(error = %e, "vector store unavailable, continuing without it");
                None
            }
        };

        let chat = ChatService::new(
            IntentClassifier::new(),
            generator,
            similarity,
            seeded_rng(config.rng_seed),
        );

        Ok(Self { config, chat })
    }

    pub fn shutdown(self) -> anyhow::Result<()> {
        self.chat.shutdown()
    }
}

fn open_similarity(config: &AppConfig) -> anyhow::Result<SimilarityIndex> {
    let conn = db::open_store(&config.vector_store_dir)?;
    let index = SimilarityIndex::new(conn, embedder(config.embedder, &config.vector_store_dir));

    if index.count()? == 0 {
        let seeds = similarity::load_seeds(&config.intents_path)?;
        index.seed_if_empty(&seeds)?;
    }

    tracing::info!(
        embedder = index.embedder_name(),
        vectors = index.count()?,
        dir = %config.vector_store_dir.display(),
        "vector store ready"
    );
    Ok(index)
}

#[cfg(feature = "fastembed")]
fn embedder(kind: EmbedderKind, store_dir: &Path) -> Arc<dyn Embedder> {
    use crate::services::embedding::FastEmbedder;

    if kind == EmbedderKind::Hashing {
        return Arc::new(HashingEmbedder::default());
    }
    match FastEmbedder::new(store_dir.join(".fastembed_cache")) {
        Ok(model) => Arc::new(model),
        Err(e) => {
            tracing::warn!(error = %e, "embedding model unavailable, using hashing embedder");
            Arc::new(HashingEmbedder::default())
        }
    }
}

#[cfg(not(feature = "fastembed"))]
fn embedder(kind: EmbedderKind, _store_dir: &Path) -> Arc<dyn Embedder> {
    if kind == EmbedderKind::Model {
        tracing::warn!("built without the fastembed feature, using hashing embedder");
    }
    Arc::new(HashingEmbedder::default())
}
