use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::AppError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackOrder {
    /// Dataset entry first, then the intent's synthetic template.
    #[default]
    DatasetFirst,
    /// Synthetic template first, then the dataset.
    SyntheticFirst,
}

impl FallbackOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackOrder::DatasetFirst => "dataset_first",
            FallbackOrder::SyntheticFirst => "synthetic_first",
        }
    }
}

impl FromStr for FallbackOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dataset_first" | "dataset" => Ok(FallbackOrder::DatasetFirst),
            "synthetic_first" | "synthetic" => Ok(FallbackOrder::SyntheticFirst),
            other => Err(AppError::Config(format!("unknown fallback order: {other}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmbedderKind {
    /// all-MiniLM-L6-v2; falls back to hashing when the model cannot load.
    #[default]
    Model,
    /// Offline feature hashing.
    Hashing,
}

impl EmbedderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedderKind::Model => "model",
            EmbedderKind::Hashing => "hashing",
        }
    }
}

impl FromStr for EmbedderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "model" | "fastembed" => Ok(EmbedderKind::Model),
            "hashing" | "hash" => Ok(EmbedderKind::Hashing),
            other => Err(AppError::Config(format!("unknown embedder: {other}"))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub dataset_path: PathBuf,
    pub seed: Option<u64>,
    pub fallback_order: FallbackOrder,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/responses.json"),
            seed: None,
            fallback_order: FallbackOrder::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub responses_path: PathBuf,
    pub intents_path: PathBuf,
    pub vector_store_dir: PathBuf,
    pub rng_seed: Option<u64>,
    pub fallback_order: FallbackOrder,
    pub embedder: EmbedderKind,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            port: parse_var("PORT")?.unwrap_or(8000),
            responses_path: env::var("RESPONSES_PATH")
                .unwrap_or_else(|_| "data/responses.json".to_string())
                .into(),
            intents_path: env::var("INTENTS_PATH")
                .unwrap_or_else(|_| "data/sample_intents.json".to_string())
                .into(),
            vector_store_dir: env::var("VECTOR_STORE_DIR")
                .unwrap_or_else(|_| "data/vector_store".to_string())
                .into(),
            rng_seed: parse_var("RNG_SEED")?,
            fallback_order: parse_var("FALLBACK_ORDER")?.unwrap_or_default(),
            embedder: parse_var("EMBEDDER")?.unwrap_or_default(),
        })
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            dataset_path: self.responses_path.clone(),
            seed: self.rng_seed,
            fallback_order: self.fallback_order,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UiConfig {
    pub port: u16,
    pub backend_url: String,
}

impl UiConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            port: parse_var("UI_PORT")?.unwrap_or(8501),
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

/// Reads and parses an optional variable; empty values count as unset.
fn parse_var<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(name, env::var(name).ok())
}

fn parse_value<T>(name: &str, raw: Option<String>) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::Config(format!("invalid {name}={raw}: {e}"))),
        _ => Ok(None),
    }
}
