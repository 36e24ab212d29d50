use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;

use crate::models::Intent;
use crate::services::classifier::IntentClassifier;
use crate::services::generator::ResponseGenerator;
use crate::services::similarity::{SimilarityIndex, DEFAULT_LIMIT};

/// Classify, look up neighbours for the logs, then generate a reply.
pub struct ChatService {
    classifier: IntentClassifier,
    generator: ResponseGenerator,
    similarity: Option<SimilarityIndex>,
    rng: Mutex<StdRng>,
}

impl ChatService {
    pub fn new(
        classifier: IntentClassifier,
        generator: ResponseGenerator,
        similarity: Option<SimilarityIndex>,
        rng: StdRng,
    ) -> Self {
        Self {
            classifier,
            generator,
            similarity,
            rng: Mutex::new(rng),
        }
    }

    pub fn classify(&self, text: &str) -> Intent {
        self.classifier.classify(text)
    }

    pub fn reply(&self, text: &str) -> String {
        let intent = self.classifier.classify(text);
        tracing::info!(intent = %intent, "classified message");

        self.log_neighbours(text);

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.generator.generate(intent, text, &mut *rng)
    }

    pub fn intent_count(&self) -> usize {
        self.classifier.intents().count()
    }

    pub fn dataset_entries(&self) -> usize {
        self.generator.dataset().len()
    }

    /// Zero when the store is unavailable.
    pub fn stored_vectors(&self) -> i64 {
        let Some(index) = &self.similarity else {
            return 0;
        };
        index.count().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to count stored vectors");
            0
        })
    }

    pub fn shutdown(self) -> anyhow::Result<()> {
        if let Some(index) = self.similarity {
            index.close()?;
            tracing::info!("vector store closed");
        }
        Ok(())
    }

    // Neighbours are informational only; they never influence the intent.
    fn log_neighbours(&self, text: &str) {
        let Some(index) = &self.similarity else {
            return;
        };
        match index.nearest(text, DEFAULT_LIMIT) {
            Ok(matches) => {
                for m in &matches {
                    tracing::debug!(
                        intent = %m.intent,
                        example = %m.example,
                        score = m.score,
                        "nearest seed example"
                    );
                }
            }
            Err(e) => tracing::warn!(error = %e, "similarity lookup failed"),
        }
    }
}
