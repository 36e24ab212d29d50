use serde::{Deserialize, Serialize};

/// One row of the response dataset. `intent` is a dataset category such as
/// "Pet Travel", not an [`Intent`](super::Intent) label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseTemplateEntry {
    pub intent: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_policy")]
    pub policy_reference: String,
    #[serde(rename = "bot_response")]
    pub response_text: String,
}

fn default_tone() -> String {
    "Formal".to_string()
}

fn default_policy() -> String {
    "General".to_string()
}
