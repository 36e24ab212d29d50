use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::queries::{self, NewVector};
use crate::models::{IntentExamples, VectorMatch};
use crate::services::embedding::Embedder;

/// Default number of neighbours returned per query.
pub const DEFAULT_LIMIT: usize = 2;

/// Nearest-neighbour lookup over embedded seed examples.
pub struct SimilarityIndex {
    conn: Mutex<Connection>,
    embedder: Arc<dyn Embedder>,
}

impl SimilarityIndex {
    pub fn new(conn: Connection, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            conn: Mutex::new(conn),
            embedder,
        }
    }

    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    /// Vectors written by the current embedder.
    pub fn count(&self) -> anyhow::Result<i64> {
        let conn = self.lock()?;
        queries::count_vectors(&conn, self.embedder.name())
    }

    /// Embeds and stores every seed example, but only when the store holds no
    /// vectors from the current embedder. Vectors left by a different embedder
    /// are dropped first. Returns the number of vectors inserted.
    pub fn seed_if_empty(&self, seeds: &[IntentExamples]) -> anyhow::Result<usize> {
        let embedder = self.embedder.name();
        let mut conn = self.lock()?;
        if queries::count_vectors(&conn, embedder)? > 0 {
            tracing::debug!(embedder, "vector store already populated, skipping seed");
            return Ok(0);
        }

        let tx = conn.transaction().context("failed to begin seed transaction")?;
        let stale = queries::delete_other_embedders(&tx, embedder)?;
        if stale > 0 {
            tracing::info!(
                removed = stale,
                embedder,
                "dropped vectors from a different embedder"
            );
        }

        let mut inserted = 0;
        for item in seeds {
            let examples: Vec<&str> = item.examples.iter().map(String::as_str).collect();
            let vectors = self.embedder.embed_batch(&examples)?;
            for (example, vector) in examples.iter().zip(vectors) {
                let id = Uuid::new_v4().to_string();
                queries::insert_vector(
                    &tx,
                    &NewVector {
                        id: &id,
                        intent: &item.intent,
                        example,
                        embedder,
                        embedding: &vector,
                    },
                )?;
                inserted += 1;
            }
        }
        tx.commit().context("failed to commit seed vectors")?;

        tracing::info!(
            vectors = inserted,
            embedder = self.embedder.name(),
            "preloaded intent examples into vector store"
        );
        Ok(inserted)
    }

    pub fn nearest(&self, text: &str, limit: usize) -> anyhow::Result<Vec<VectorMatch>> {
        let query = self.embedder.embed(text)?;
        let conn = self.lock()?;
        queries::search_nearest(&conn, self.embedder.name(), &query, limit)
    }

    /// Closes the underlying connection, flushing the WAL.
    pub fn close(self) -> anyhow::Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| anyhow::anyhow!("vector store lock poisoned"))?;
        conn.close()
            .map_err(|(_, e)| e)
            .context("failed to close vector store")
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("vector store lock poisoned"))
    }
}

pub fn load_seeds(path: &Path) -> anyhow::Result<Vec<IntentExamples>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read seed intents: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse seed intents: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::services::embedding::HashingEmbedder;

    fn seeds() -> Vec<IntentExamples> {
        vec![
            IntentExamples {
                intent: "pet_policy".to_string(),
                examples: vec!["Can I bring my dog?".to_string(), "Are cats allowed?".to_string()],
            },
            IntentExamples {
                intent: "wifi".to_string(),
                examples: vec!["Is there wifi on the plane?".to_string()],
            },
        ]
    }

    fn index() -> SimilarityIndex {
        SimilarityIndex::new(
            db::open_in_memory().unwrap(),
            Arc::new(HashingEmbedder::default()),
        )
    }

    #[test]
    fn test_seed_only_when_empty() {
        let index = index();
        assert_eq!(index.seed_if_empty(&seeds()).unwrap(), 3);
        assert_eq!(index.seed_if_empty(&seeds()).unwrap(), 0);
        assert_eq!(index.count().unwrap(), 3);
    }

    #[test]
    fn test_nearest_returns_closest_example() {
        let index = index();
        index.seed_if_empty(&seeds()).unwrap();

        let matches = index.nearest("can my dog come along", DEFAULT_LIMIT).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].intent, "pet_policy");
        assert_eq!(matches[0].example, "Can I bring my dog?");
    }

    #[test]
    fn test_nearest_on_empty_store() {
        let index = index();
        assert!(index.nearest("hello", DEFAULT_LIMIT).unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let index = SimilarityIndex::new(
                db::open_store(dir.path()).unwrap(),
                Arc::new(HashingEmbedder::default()),
            );
            index.seed_if_empty(&seeds()).unwrap();
            index.close().unwrap();
        }

        let reopened = SimilarityIndex::new(
            db::open_store(dir.path()).unwrap(),
            Arc::new(HashingEmbedder::default()),
        );
        assert_eq!(reopened.count().unwrap(), 3);
        assert_eq!(reopened.seed_if_empty(&seeds()).unwrap(), 0);
    }

    struct OtherEmbedder(HashingEmbedder);

    impl Embedder for OtherEmbedder {
        fn embed(&self, text: &str) -> Result<Vec<f32>, crate::errors::AppError> {
            self.0.embed(text)
        }

        fn name(&self) -> &str {
            "other-model"
        }
    }

    #[test]
    fn test_switching_embedder_reseeds() {
        let dir = tempfile::tempdir().unwrap();
        let first = SimilarityIndex::new(
            db::open_store(dir.path()).unwrap(),
            Arc::new(OtherEmbedder(HashingEmbedder::default())),
        );
        assert_eq!(first.seed_if_empty(&seeds()).unwrap(), 3);
        first.close().unwrap();

        let second = SimilarityIndex::new(
            db::open_store(dir.path()).unwrap(),
            Arc::new(HashingEmbedder::default()),
        );
        assert_eq!(second.count().unwrap(), 0);
        assert!(second.nearest("can my dog come along", DEFAULT_LIMIT).unwrap().is_empty());

        assert_eq!(second.seed_if_empty(&seeds()).unwrap(), 3);
        assert_eq!(second.count().unwrap(), 3);
        let conn = second.lock().unwrap();
        assert_eq!(queries::count_vectors(&conn, "other-model").unwrap(), 0);
    }

    #[test]
    fn test_load_seeds_from_repository_data() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_intents.json");
        let seeds = load_seeds(&path).unwrap();
        assert!(seeds.iter().any(|s| s.intent == "book_flight"));
        assert!(seeds.iter().all(|s| !s.examples.is_empty()));
    }
}
