//! Lesson catalog and progress helpers

use super::vocabulary::{self, VocabularyItem};
use crate::core::ContentError;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl std::str::FromStr for Level {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(ContentError::UnknownLevel(other.to_string())),
        }
    }
}

/// A phrase taught by a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Phrase {
    pub sundanese: &'static str,
    pub english: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Lesson {
    pub id: &'static str,
    pub title: &'static str,
    pub english_title: &'static str,
    pub level: Level,
    pub summary: &'static str,
    /// Vocabulary ids introduced by this lesson
    pub vocabulary: &'static [&'static str],
    pub phrases: &'static [Phrase],
}

impl Lesson {
    /// Resolve vocabulary ids against the vocabulary table
    pub fn words(&self) -> impl Iterator<Item = &'static VocabularyItem> + '_ {
        self.vocabulary.iter().filter_map(|id| vocabulary::by_id(id))
    }
}

const fn phrase(sundanese: &'static str, english: &'static str) -> Phrase {
    Phrase { sundanese, english }
}

pub static LESSONS: &[Lesson] = &[
    Lesson {
        id: "salam",
        title: "Salam jeung Wawanohan",
        english_title: "Greetings and Introductions",
        level: Level::Beginner,
        summary: "Greet people politely and introduce yourself.",
        vocabulary: &["g01", "g02", "g03", "g04", "g05", "g06", "g07", "g08"],
        phrases: &[
            phrase("Nami abdi Rina.", "My name is Rina."),
            phrase("Abdi ti Bandung.", "I am from Bandung."),
            phrase("Nami anjeun saha?", "What is your name?"),
        ],
    },
    Lesson {
        id: "wilangan",
        title: "Wilangan",
        english_title: "Numbers",
        level: Level::Beginner,
        summary: "Count from one to ten and talk about prices.",
        vocabulary: &["n01", "n02", "n03", "n04", "n05", "n06", "n07", "n08", "n09", "n10"],
        phrases: &[
            phrase("Sabaraha ieu?", "How much is this?"),
            phrase("Lima rebu.", "Five thousand."),
        ],
    },
    Lesson {
        id: "kulawarga",
        title: "Kulawarga",
        english_title: "Family",
        level: Level::Beginner,
        summary: "Name family members and describe your household.",
        vocabulary: &["f01", "f02", "f03", "f04", "f05", "f06", "f07"],
        phrases: &[
            phrase("Abdi gaduh dua adi.", "I have two younger siblings."),
            phrase("Ieu bapa abdi.", "This is my father."),
        ],
    },
    Lesson {
        id: "kadaharan",
        title: "Kadaharan",
        english_title: "Food and Ordering",
        level: Level::Intermediate,
        summary: "Order food at a warung and talk about taste.",
        vocabulary: &["d01", "d02", "d03", "d04", "d05", "d06", "v01", "v02"],
        phrases: &[
            phrase("Punten, bade mesen sangu jeung lauk.", "Excuse me, I'd like rice and fish."),
            phrase("Raos pisan!", "Very delicious!"),
        ],
    },
    Lesson {
        id: "undak-usuk",
        title: "Undak-usuk Basa",
        english_title: "Speech Levels",
        level: Level::Advanced,
        summary: "Choose between familiar (loma) and polite (lemes) registers.",
        vocabulary: &["v01", "v02", "v03", "v04", "v05", "v06"],
        phrases: &[
            phrase("Mangga tuang heula.", "Please eat first (polite)."),
            phrase("Hayu urang dahar.", "Let's eat (familiar)."),
        ],
    },
];

pub fn lessons() -> &'static [Lesson] {
    LESSONS
}

pub fn find(id: &str) -> Result<&'static Lesson, ContentError> {
    LESSONS
        .iter()
        .find(|l| l.id == id)
        .ok_or_else(|| ContentError::UnknownLesson(id.to_string()))
}

pub fn by_level(level: Level) -> impl Iterator<Item = &'static Lesson> {
    LESSONS.iter().filter(move |l| l.level == level)
}

/// Whole-number percentage of `done` out of `total`, clamped to 0..=100
///
/// An empty total counts as 0% rather than dividing by zero.
pub fn progress_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (done.min(total) as f64 / total as f64 * 100.0).round();
    pct as u8
}

/// Learner progress through the lesson catalog
#[derive(Debug, Clone, Default)]
pub struct Progress {
    completed: HashSet<String>,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a lesson complete; unknown ids are rejected
    pub fn complete(&mut self, lesson_id: &str) -> Result<(), ContentError> {
        let lesson = find(lesson_id)?;
        self.completed.insert(lesson.id.to_string());
        Ok(())
    }

    pub fn is_complete(&self, lesson_id: &str) -> bool {
        self.completed.contains(lesson_id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn percent(&self) -> u8 {
        progress_percent(self.completed.len(), LESSONS.len())
    }

    /// First lesson in catalog order that is not yet complete
    pub fn next_lesson(&self) -> Option<&'static Lesson> {
        LESSONS.iter().find(|l| !self.is_complete(l.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(5, 3), 100);
    }

    #[test]
    fn lesson_vocabulary_resolves() {
        for lesson in LESSONS {
            assert_eq!(
                lesson.words().count(),
                lesson.vocabulary.len(),
                "lesson {} references a missing word",
                lesson.id
            );
        }
    }

    #[test]
    fn progress_tracks_completion() {
        let mut progress = Progress::new();
        assert_eq!(progress.next_lesson().unwrap().id, "salam");
        progress.complete("salam").unwrap();
        progress.complete("salam").unwrap();
        assert_eq!(progress.completed_count(), 1);
        assert_eq!(progress.percent(), 20);
        assert_eq!(progress.next_lesson().unwrap().id, "wilangan");
        assert!(progress.complete("missing").is_err());
    }

    #[test]
    fn level_parses() {
        assert_eq!("ADVANCED".parse::<Level>().unwrap(), Level::Advanced);
        let err = "expert".parse::<Level>().unwrap_err();
        assert!(matches!(err, ContentError::UnknownLevel(ref level) if level == "expert"));
        assert_eq!(err.to_string(), "Unknown level: expert");
    }
}
