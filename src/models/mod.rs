pub mod chat;
pub mod conversation;
pub mod intent;
pub mod response;
pub mod seed;

pub use chat::{ChatForm, ChatReply, VectorMatch};
pub use conversation::{ConversationMessage, Role};
pub use intent::Intent;
pub use response::ResponseTemplateEntry;
pub use seed::IntentExamples;
