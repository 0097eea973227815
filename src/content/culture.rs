//! Cultural notes shown alongside lessons

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CulturalNote {
    pub id: &'static str,
    pub title: &'static str,
    pub region: &'static str,
    pub body: &'static str,
    /// Lesson ids this note accompanies
    pub lessons: &'static [&'static str],
}

pub static CULTURAL_NOTES: &[CulturalNote] = &[
    CulturalNote {
        id: "undak-usuk",
        title: "Undak-usuk Basa",
        region: "Jawa Barat",
        body: "Sundanese has speech levels. Use lemes (polite) forms with elders \
               and strangers, and loma (familiar) forms with friends. Choosing \
               the right level is a sign of respect.",
        lessons: &["salam", "undak-usuk"],
    },
    CulturalNote {
        id: "angklung",
        title: "Angklung",
        region: "Jawa Barat",
        body: "A bamboo instrument shaken to sound a single pitch. Players each \
               hold a few notes and melodies emerge from the group, so playing \
               angklung is about listening to each other. Recognised by UNESCO \
               as Intangible Cultural Heritage in 2010.",
        lessons: &["wilangan"],
    },
    CulturalNote {
        id: "wayang-golek",
        title: "Wayang Golek",
        region: "Priangan",
        body: "Three-dimensional wooden rod puppets. A dalang (puppeteer) voices \
               every character through the night, mixing epic stories with \
               humour in everyday Sundanese.",
        lessons: &["kulawarga"],
    },
    CulturalNote {
        id: "ngariung",
        title: "Ngariung jeung Botram",
        region: "Jawa Barat",
        body: "Botram is a shared meal where everyone brings food and eats \
               together on banana leaves, usually sangu, lauk, lalab and \
               sambel. Ngariung means gathering in a circle.",
        lessons: &["kadaharan"],
    },
    CulturalNote {
        id: "sisingaan",
        title: "Sisingaan",
        region: "Subang",
        body: "A procession where children ride lion figures carried on the \
               shoulders of dancers, traditionally performed to celebrate a \
               circumcision.",
        lessons: &[],
    },
];

pub fn cultural_notes() -> &'static [CulturalNote] {
    CULTURAL_NOTES
}

/// Notes attached to a lesson, table order preserved
pub fn for_lesson(lesson_id: &str) -> impl Iterator<Item = &'static CulturalNote> + '_ {
    CULTURAL_NOTES
        .iter()
        .filter(move |n| n.lessons.iter().any(|l| *l == lesson_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::lessons;

    #[test]
    fn note_lessons_exist() {
        for note in CULTURAL_NOTES {
            for lesson in note.lessons {
                assert!(lessons::find(lesson).is_ok(), "{} -> {}", note.id, lesson);
            }
        }
    }

    #[test]
    fn for_lesson_filters() {
        let ids: Vec<_> = for_lesson("salam").map(|n| n.id).collect();
        assert_eq!(ids, vec!["undak-usuk"]);
    }
}
