use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::AppError;
use crate::models::{Intent, ResponseTemplateEntry};

/// Response dataset grouped by category, loaded once at startup.
#[derive(Debug, Default, Clone)]
pub struct ResponseDataset {
    by_category: HashMap<String, Vec<ResponseTemplateEntry>>,
    len: usize,
}

impl ResponseDataset {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| AppError::Dataset(format!("failed to read {}: {e}", path.display())))?;
        let entries: Vec<ResponseTemplateEntry> = serde_json::from_str(&raw)
            .map_err(|e| AppError::Dataset(format!("failed to parse {}: {e}", path.display())))?;

        let dataset = Self::from_entries(entries);
        tracing::info!(
            entries = dataset.len(),
            categories = dataset.by_category.len(),
            path = %path.display(),
            "loaded response dataset"
        );
        Ok(dataset)
    }

    /// Entries with blank response text are dropped.
    pub fn from_entries(entries: Vec<ResponseTemplateEntry>) -> Self {
        let mut by_category: HashMap<String, Vec<ResponseTemplateEntry>> = HashMap::new();
        let mut len = 0;
        for entry in entries {
            if entry.response_text.trim().is_empty() {
                tracing::warn!(
                    category = %entry.intent,
                    "skipping dataset entry with empty response"
                );
                continue;
            }
            len += 1;
            by_category.entry(entry.intent.clone()).or_default().push(entry);
        }
        Self { by_category, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn entries(&self, category: &str) -> &[ResponseTemplateEntry] {
        self.by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Entries an intent may answer with. Within a shared category, entries
    /// whose policy matches the intent are preferred when any exist.
    pub fn candidates(&self, intent: Intent) -> Vec<&ResponseTemplateEntry> {
        let Some(category) = intent.dataset_category() else {
            return Vec::new();
        };
        let entries = self.entries(category);

        if let Some(policy) = policy_hint(intent) {
            let preferred: Vec<_> = entries
                .iter()
                .filter(|e| e.policy_reference.eq_ignore_ascii_case(policy))
                .collect();
            if !preferred.is_empty() {
                return preferred;
            }
        }

        entries.iter().collect()
    }
}

fn policy_hint(intent: Intent) -> Option<&'static str> {
    match intent {
        Intent::CheckIn => Some("Check-in"),
        Intent::Meals => Some("Onboard Services"),
        Intent::Wifi => Some("Connectivity"),
        _ => None,
    }
}
