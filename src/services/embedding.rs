//! Text embedders used by the similarity index.
//!
//! [`FastEmbedder`] (the default `fastembed` feature) runs the
//! all-MiniLM-L6-v2 ONNX model. [`HashingEmbedder`] is the offline fallback:
//! tokens and character trigrams are hashed with BLAKE3 into a fixed number
//! of signed buckets and the result is L2-normalised.

use crate::errors::AppError;

/// Width of all-MiniLM-L6-v2 sentence embeddings.
pub const DEFAULT_DIMENSION: usize = 384;

pub const HASHING_EMBEDDER: &str = "hashing";
pub const MODEL_EMBEDDER: &str = "all-MiniLM-L6-v2";

pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, AppError>;

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AppError> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Stored with every vector; rows from another embedder are never compared.
    fn name(&self) -> &str;
}

pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let hash = blake3::hash(feature.as_bytes());
        let b = hash.as_bytes();
        let bucket = u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as usize % self.dimension;
        let sign = if (b[4] & 1) == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let mut vector = vec![0.0f32; self.dimension];
        let lower = text.to_lowercase();

        for token in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            self.add_feature(&mut vector, token, 1.0);

            let padded: Vec<char> = format!("#{token}#").chars().collect();
            for gram in padded.windows(3) {
                let gram: String = gram.iter().collect();
                self.add_feature(&mut vector, &gram, 0.5);
            }
        }

        normalize(&mut vector);
        Ok(vector)
    }

    fn name(&self) -> &str {
        HASHING_EMBEDDER
    }
}

#[cfg(feature = "fastembed")]
pub struct FastEmbedder {
    model: fastembed::TextEmbedding,
}

#[cfg(feature = "fastembed")]
impl FastEmbedder {
    pub fn new(cache_dir: std::path::PathBuf) -> Result<Self, AppError> {
        use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

        let mut options = InitOptions::new(EmbeddingModel::AllMiniLML6V2);
        options.show_download_progress = false;
        options.cache_dir = cache_dir;

        let model =
            TextEmbedding::try_new(options).map_err(|e| AppError::Embedding(e.to_string()))?;
        Ok(Self { model })
    }
}

#[cfg(feature = "fastembed")]
impl Embedder for FastEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        self.model
            .embed(vec![text.to_string()], None)
            .map_err(|e| AppError::Embedding(e.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Embedding("model returned no embedding".to_string()))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, AppError> {
        self.model
            .embed(texts.to_vec(), None)
            .map_err(|e| AppError::Embedding(e.to_string()))
    }

    fn name(&self) -> &str {
        MODEL_EMBEDDER
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}
