//! Static learning content
//!
//! Everything here is built at load time and never mutated:
//! - `vocabulary`: words grouped by category
//! - `lessons`: lesson catalog and learner progress
//! - `culture`: cultural notes attached to lessons
//! - `practice`: grammar topics and scripted dialogues
//! - `audio`: audio filename conventions and the expected-asset manifest

pub mod audio;
pub mod culture;
pub mod lessons;
pub mod practice;
pub mod vocabulary;

pub use audio::{audio_path, normalize_audio_filename, AudioManifest, DEFAULT_AUDIO_ROOT};
pub use culture::CulturalNote;
pub use lessons::{progress_percent, Lesson, Level, Progress};
pub use practice::{Dialogue, GrammarTopic};
pub use vocabulary::{Category, VocabularyItem};
