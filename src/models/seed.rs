use serde::{Deserialize, Serialize};

/// Example utterances for one intent, used to seed the vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentExamples {
    pub intent: String,
    pub examples: Vec<String>,
}
