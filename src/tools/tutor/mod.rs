//! Language tutor tools backed by the static content tables.

mod conversation;
mod grammar;
mod pronunciation;
mod vocabulary;

pub use conversation::ConversationTool;
pub use grammar::GrammarTool;
pub use pronunciation::PronunciationTool;
pub use vocabulary::VocabularyTool;
