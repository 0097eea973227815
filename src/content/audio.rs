//! Audio asset manifest
//!
//! Audio files are served by whatever hosts the content, under
//! `<root>/vocabulary/<category>/<word>.mp3`. The manifest only records what
//! we expect to exist; nothing here touches the filesystem.

use super::vocabulary::{Category, VocabularyItem, VOCABULARY};
use std::collections::{BTreeMap, BTreeSet};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Default asset root
pub const DEFAULT_AUDIO_ROOT: &str = "/audio";

/// Fold a word into the filename stem used for its audio file
///
/// Accents are stripped ("ngamumulé" -> "ngamumule"), whitespace and
/// underscores become hyphens, anything else outside `[a-z0-9-]` is dropped
/// and runs of hyphens collapse.
pub fn normalize_audio_filename(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.nfd().filter(|c| !is_combining_mark(*c)) {
        let c = c.to_ascii_lowercase();
        let mapped = if c.is_ascii_alphanumeric() {
            Some(c)
        } else if c.is_whitespace() || c == '-' || c == '_' {
            Some('-')
        } else {
            None
        };
        if let Some(m) = mapped {
            if m == '-' && (out.is_empty() || out.ends_with('-')) {
                continue;
            }
            out.push(m);
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Build the conventional asset path for a word
pub fn audio_path(root: &str, category: Category, word: &str) -> String {
    format!(
        "{}/vocabulary/{}/{}.mp3",
        root.trim_end_matches('/'),
        category.as_str(),
        normalize_audio_filename(word)
    )
}

/// Expected audio files per category
#[derive(Debug, Clone)]
pub struct AudioManifest {
    root: String,
    files: BTreeMap<Category, BTreeSet<String>>,
}

impl Default for AudioManifest {
    fn default() -> Self {
        Self::from_vocabulary(DEFAULT_AUDIO_ROOT, VOCABULARY)
    }
}

impl AudioManifest {
    /// Build a manifest listing one file per vocabulary item
    pub fn from_vocabulary(root: impl Into<String>, items: &[VocabularyItem]) -> Self {
        let mut files: BTreeMap<Category, BTreeSet<String>> = BTreeMap::new();
        for item in items {
            files
                .entry(item.category)
                .or_default()
                .insert(normalize_audio_filename(item.word));
        }
        Self {
            root: root.into(),
            files,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Path for a word if the manifest lists it
    pub fn lookup(&self, category: Category, word: &str) -> Option<String> {
        let stem = normalize_audio_filename(word);
        self.files
            .get(&category)
            .filter(|set| set.contains(&stem))
            .map(|_| audio_path(&self.root, category, word))
    }

    /// Path for a vocabulary item if the manifest lists it
    pub fn path_for(&self, item: &VocabularyItem) -> Option<String> {
        self.lookup(item.category, item.word)
    }

    /// Whether any category lists this word
    pub fn has_audio(&self, word: &str) -> bool {
        let stem = normalize_audio_filename(word);
        self.files.values().any(|set| set.contains(&stem))
    }

    /// File stems listed for a category
    pub fn files(&self, category: Category) -> impl Iterator<Item = &str> {
        self.files
            .get(&category)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.files.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_words_to_stems() {
        assert_eq!(normalize_audio_filename("Wilujeng Enjing"), "wilujeng-enjing");
        assert_eq!(normalize_audio_filename("ngamumulé"), "ngamumule");
        assert_eq!(normalize_audio_filename("kumaha damang?"), "kumaha-damang");
        assert_eq!(normalize_audio_filename("  sami--sami  "), "sami-sami");
        assert_eq!(normalize_audio_filename("???"), "");
    }

    #[test]
    fn path_follows_convention() {
        assert_eq!(
            audio_path("/audio/", Category::Greetings, "Hatur Nuhun"),
            "/audio/vocabulary/greetings/hatur-nuhun.mp3"
        );
    }

    #[test]
    fn manifest_lists_every_word() {
        let manifest = AudioManifest::default();
        assert_eq!(manifest.len(), VOCABULARY.len());
        assert_eq!(
            manifest.lookup(Category::Food, "sangu").as_deref(),
            Some("/audio/vocabulary/food/sangu.mp3")
        );
        assert!(manifest.lookup(Category::Numbers, "sangu").is_none());
        assert!(manifest.has_audio("Hatur nuhun"));
        assert!(!manifest.has_audio("komputer"));
    }
}
