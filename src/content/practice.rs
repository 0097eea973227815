//! Grammar topics and conversation scenarios used by the tutor tools

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrammarTopic {
    pub id: &'static str,
    pub title: &'static str,
    pub explanation: &'static str,
    /// (Sundanese, English) pairs
    pub examples: &'static [(&'static str, &'static str)],
}

pub static GRAMMAR_TOPICS: &[GrammarTopic] = &[
    GrammarTopic {
        id: "word-order",
        title: "Basic word order",
        explanation: "Sentences follow subject, verb, object, like English.",
        examples: &[
            ("Abdi tuang sangu.", "I eat rice."),
            ("Ema meuli lauk.", "Mother buys fish."),
        ],
    },
    GrammarTopic {
        id: "speech-levels",
        title: "Speech levels",
        explanation: "Many verbs have a familiar (loma) and a polite (lemes) form. \
                      Use the polite form for other people's actions when speaking to elders.",
        examples: &[
            ("dahar / tuang", "to eat (familiar / polite)"),
            ("sare / kulem", "to sleep (familiar / polite)"),
            ("indit / angkat", "to go (familiar / polite)"),
        ],
    },
    GrammarTopic {
        id: "plurals",
        title: "Plurals by reduplication",
        explanation: "Repeat a noun to make it plural.",
        examples: &[("budak-budak", "children"), ("imah-imah", "houses")],
    },
    GrammarTopic {
        id: "negation",
        title: "Negation",
        explanation: "Put henteu (or the short teu) before the verb or adjective.",
        examples: &[
            ("Abdi teu acan tuang.", "I haven't eaten yet."),
            ("Sambelna henteu lada.", "The chili sauce is not hot."),
        ],
    },
    GrammarTopic {
        id: "questions",
        title: "Question words",
        explanation: "Question words usually open the sentence.",
        examples: &[
            ("saha", "who"),
            ("naon", "what"),
            ("dimana", "where"),
            ("iraha", "when"),
            ("kumaha", "how"),
        ],
    },
];

/// One line of a scripted dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DialogueLine {
    pub speaker: &'static str,
    pub sundanese: &'static str,
    pub english: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dialogue {
    pub id: &'static str,
    pub scenario: &'static str,
    pub lines: &'static [DialogueLine],
}

const fn line(
    speaker: &'static str,
    sundanese: &'static str,
    english: &'static str,
) -> DialogueLine {
    DialogueLine {
        speaker,
        sundanese,
        english,
    }
}

pub static DIALOGUES: &[Dialogue] = &[
    Dialogue {
        id: "wawanohan",
        scenario: "Meeting someone new",
        lines: &[
            line("Rina", "Wilujeng enjing! Kumaha damang?", "Good morning! How are you?"),
            line("Asep", "Pangestu. Nami abdi Asep. Nami anjeun saha?", "Fine. My name is Asep. What's your name?"),
            line("Rina", "Nami abdi Rina. Abdi ti Bandung.", "My name is Rina. I'm from Bandung."),
            line("Asep", "Wilujeng tepang, Rina.", "Nice to meet you, Rina."),
        ],
    },
    Dialogue {
        id: "pasar",
        scenario: "Bargaining at the market",
        lines: &[
            line("Pembeli", "Punten, sabaraha ieu?", "Excuse me, how much is this?"),
            line("Padagang", "Sapuluh rebu, Neng.", "Ten thousand, miss."),
            line("Pembeli", "Tiasa kirang?", "Can it be less?"),
            line("Padagang", "Mangga, dalapan rebu.", "Alright, eight thousand."),
            line("Pembeli", "Hatur nuhun.", "Thank you."),
        ],
    },
    Dialogue {
        id: "warung",
        scenario: "Ordering at a warung",
        lines: &[
            line("Tamu", "Punten, bade mesen sangu jeung lauk.", "Excuse me, I'd like rice and fish."),
            line("Nu icalan", "Mangga. Inumna naon?", "Sure. What would you like to drink?"),
            line("Tamu", "Cai herang wae.", "Just plain water."),
        ],
    },
];

pub fn grammar_topic(id: &str) -> Option<&'static GrammarTopic> {
    GRAMMAR_TOPICS.iter().find(|t| t.id == id)
}

pub fn dialogue(id: &str) -> Option<&'static Dialogue> {
    DIALOGUES.iter().find(|d| d.id == id)
}
