//! Vocabulary table
//!
//! Words are grouped by category. Each category doubles as the audio
//! directory name under `/audio/vocabulary/`.

use crate::core::ContentError;
use serde::Serialize;

/// Vocabulary category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Greetings,
    Numbers,
    Family,
    Food,
    Verbs,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Greetings,
        Category::Numbers,
        Category::Family,
        Category::Food,
        Category::Verbs,
    ];

    /// Slug used in audio paths and CLI filters
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greetings => "greetings",
            Self::Numbers => "numbers",
            Self::Family => "family",
            Self::Food => "food",
            Self::Verbs => "verbs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Greetings => "Salam (Greetings)",
            Self::Numbers => "Wilangan (Numbers)",
            Self::Family => "Kulawarga (Family)",
            Self::Food => "Kadaharan (Food)",
            Self::Verbs => "Pagawean (Verbs)",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(ContentError::UnknownCategory(s))
    }
}

/// A single vocabulary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VocabularyItem {
    pub id: &'static str,
    pub word: &'static str,
    pub translation: &'static str,
    pub category: Category,
    /// Syllable guide for learners
    pub pronunciation: &'static str,
    pub example: &'static str,
    pub example_translation: &'static str,
}

macro_rules! word {
    ($id:literal, $word:literal, $tr:literal, $cat:ident, $pron:literal, $ex:literal, $ex_tr:literal) => {
        VocabularyItem {
            id: $id,
            word: $word,
            translation: $tr,
            category: Category::$cat,
            pronunciation: $pron,
            example: $ex,
            example_translation: $ex_tr,
        }
    };
}

pub static VOCABULARY: &[VocabularyItem] = &[
    // Greetings
    word!("g01", "wilujeng enjing", "good morning", Greetings, "wi-LU-jeng en-JING", "Wilujeng enjing, Bu!", "Good morning, ma'am!"),
    word!("g02", "wilujeng sumping", "welcome", Greetings, "wi-LU-jeng SUM-ping", "Wilujeng sumping di Bandung.", "Welcome to Bandung."),
    word!("g03", "hatur nuhun", "thank you", Greetings, "HA-tur NU-hun", "Hatur nuhun kana bantosanana.", "Thank you for the help."),
    word!("g04", "sami-sami", "you're welcome", Greetings, "SA-mi SA-mi", "Sami-sami, Kang.", "You're welcome, brother."),
    word!("g05", "punten", "excuse me", Greetings, "PUN-ten", "Punten, abdi bade naros.", "Excuse me, I would like to ask."),
    word!("g06", "mangga", "please / go ahead", Greetings, "MANG-ga", "Mangga linggih.", "Please have a seat."),
    word!("g07", "kumaha damang", "how are you (polite)", Greetings, "ku-MA-ha DA-mang", "Kumaha damang, Pa?", "How are you, sir?"),
    word!("g08", "pangestu", "fine, by your blessing", Greetings, "pa-NGES-tu", "Pangestu, hatur nuhun.", "Fine, thank you."),
    // Numbers
    word!("n01", "hiji", "one", Numbers, "HI-ji", "Hiji gelas cai.", "One glass of water."),
    word!("n02", "dua", "two", Numbers, "DU-a", "Dua budak keur ulin.", "Two children are playing."),
    word!("n03", "tilu", "three", Numbers, "TI-lu", "Tilu poe deui.", "Three more days."),
    word!("n04", "opat", "four", Numbers, "O-pat", "Opat jalma.", "Four people."),
    word!("n05", "lima", "five", Numbers, "LI-ma", "Lima rebu rupiah.", "Five thousand rupiah."),
    word!("n06", "genep", "six", Numbers, "ge-NEP", "Jam genep isuk-isuk.", "Six in the morning."),
    word!("n07", "tujuh", "seven", Numbers, "TU-juh", "Tujuh poe saminggu.", "Seven days a week."),
    word!("n08", "dalapan", "eight", Numbers, "da-LA-pan", "Dalapan rebu.", "Eight thousand."),
    word!("n09", "salapan", "nine", Numbers, "sa-LA-pan", "Salapan taun.", "Nine years."),
    word!("n10", "sapuluh", "ten", Numbers, "sa-PU-luh", "Sapuluh rebu, Neng.", "Ten thousand, miss."),
    // Family
    word!("f01", "bapa", "father", Family, "BA-pa", "Bapa nuju damel.", "Father is at work."),
    word!("f02", "ema", "mother", Family, "E-ma", "Ema nuju masak.", "Mother is cooking."),
    word!("f03", "lanceuk", "older sibling", Family, "LAN-ceuk", "Lanceuk abdi di Jakarta.", "My older sibling is in Jakarta."),
    word!("f04", "adi", "younger sibling", Family, "A-di", "Adi abdi keur sakola.", "My younger sibling is at school."),
    word!("f05", "aki", "grandfather", Family, "A-ki", "Aki resep ngadongeng.", "Grandfather likes telling stories."),
    word!("f06", "nini", "grandmother", Family, "NI-ni", "Nini di lembur.", "Grandmother is in the village."),
    word!("f07", "budak", "child", Family, "BU-dak", "Budak-budak keur ulin.", "The children are playing."),
    // Food
    word!("d01", "sangu", "cooked rice", Food, "SA-ngu", "Sangu haneut.", "Warm rice."),
    word!("d02", "cai", "water", Food, "CA-i", "Cai herang wae.", "Just plain water."),
    word!("d03", "lauk", "fish", Food, "LA-uk", "Lauk bakar.", "Grilled fish."),
    word!("d04", "lalab", "fresh raw vegetables", Food, "LA-lab", "Lalab jeung sambel.", "Raw vegetables with chili sauce."),
    word!("d05", "sambel", "chili sauce", Food, "SAM-bel", "Sambelna lada pisan.", "The chili sauce is very hot."),
    word!("d06", "peuyeum", "fermented cassava", Food, "PEU-yeum", "Peuyeum ti Bandung.", "Fermented cassava from Bandung."),
    // Verbs
    word!("v01", "dahar", "to eat (familiar)", Verbs, "DA-har", "Hayu urang dahar.", "Let's eat."),
    word!("v02", "tuang", "to eat (polite)", Verbs, "TU-ang", "Mangga tuang heula.", "Please eat first."),
    word!("v03", "indit", "to go (familiar)", Verbs, "IN-dit", "Rek indit ka mana?", "Where are you going?"),
    word!("v04", "sare", "to sleep (familiar)", Verbs, "SA-re", "Budak geus sare.", "The child is already asleep."),
    word!("v05", "mulih", "to go home (polite)", Verbs, "MU-lih", "Bapa tos mulih.", "Father has gone home."),
    word!("v06", "diajar", "to learn", Verbs, "di-A-jar", "Abdi diajar basa Sunda.", "I am learning Sundanese."),
];

/// All vocabulary items in table order
pub fn vocabulary() -> &'static [VocabularyItem] {
    VOCABULARY
}

/// Items in a single category, table order preserved
pub fn by_category(category: Category) -> impl Iterator<Item = &'static VocabularyItem> {
    VOCABULARY.iter().filter(move |v| v.category == category)
}

/// Look up an entry by id
pub fn by_id(id: &str) -> Option<&'static VocabularyItem> {
    VOCABULARY.iter().find(|v| v.id == id)
}

/// Look up an entry by its Sundanese word (case-insensitive)
pub fn find_word(word: &str) -> Option<&'static VocabularyItem> {
    let word = word.trim();
    VOCABULARY.iter().find(|v| v.word.eq_ignore_ascii_case(word))
}

/// Find the first vocabulary word mentioned in free text
///
/// Longer words are tried first so "wilujeng sumping" wins over a shorter
/// substring match.
pub fn mentioned_in(text: &str) -> Option<&'static VocabularyItem> {
    let lowered = text.to_lowercase();
    let mut candidates: Vec<_> = VOCABULARY
        .iter()
        .filter(|v| contains_word(&lowered, v.word))
        .collect();
    candidates.sort_by_key(|v| std::cmp::Reverse(v.word.len()));
    candidates.into_iter().next()
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack.match_indices(word).any(|(start, _)| {
        let end = start + word.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
