//! Pronunciation guide tool

use crate::content::{vocabulary, AudioManifest};
use crate::tools::{str_param, ParamType, ParameterSchema, Tool, ToolCategory, ToolResult};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Sounds that trip up English speakers, keyed by spelling
const SOUND_TIPS: &[(&str, &str)] = &[
    ("eu", "'eu' is an unrounded vowel, like 'oo' said with a smile"),
    ("ng", "'ng' is one sound, as in 'singer', even at the start of a word"),
    ("é", "'é' sounds like the 'e' in 'café'"),
    ("c", "'c' is always 'ch' as in 'church'"),
    ("j", "'j' is soft, as in 'jam'"),
];

pub struct PronunciationTool {
    manifest: AudioManifest,
}

impl PronunciationTool {
    pub fn new(manifest: AudioManifest) -> Self {
        Self { manifest }
    }
}

#[async_trait]
impl Tool for PronunciationTool {
    fn name(&self) -> &str {
        "pronunciation"
    }

    fn description(&self) -> &str {
        "Give a syllable guide, sound tips and the audio file for a Sundanese word."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new().required("word", ParamType::String, "The Sundanese word or phrase")
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Tutor
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let word = str_param(&params, "word").unwrap_or_default();
        let item = vocabulary::find_word(word)
            .ok_or_else(|| anyhow::anyhow!("No pronunciation guide for '{}'", word))?;

        let mut output = format!(
            "{} ({}): {}\n",
            item.word, item.translation, item.pronunciation
        );
        for (spelling, tip) in SOUND_TIPS {
            if item.word.contains(spelling) {
                output.push_str(&format!("Tip: {}\n", tip));
            }
        }
        if let Some(path) = self.manifest.path_for(item) {
            output.push_str(&format!("Audio: {}\n", path));
        }
        output.push_str(&format!(
            "Example: {} ({})",
            item.example, item.example_translation
        ));
        Ok(ToolResult::success(output))
    }
}
