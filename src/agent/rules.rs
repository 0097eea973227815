//! Intent rules - ordered keyword dispatch
//!
//! A rule pairs a matcher with the tool it selects, a fixed thought for the
//! trace, and a builder that turns the user's text into tool parameters.
//! The dispatcher walks rules in order and the first match wins.

use crate::content::vocabulary;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

/// How a rule recognises its intent
pub enum Matcher {
    /// Any keyword contained in the lower-cased input
    Keywords(&'static [&'static str]),
    /// Regex over the original input
    Pattern(Regex),
}

impl Matcher {
    pub fn is_match(&self, lowered: &str, original: &str) -> bool {
        match self {
            Self::Keywords(words) => words.iter().any(|w| lowered.contains(w)),
            Self::Pattern(re) => re.is_match(original),
        }
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keywords(words) => f.debug_tuple("Keywords").field(words).finish(),
            Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
        }
    }
}

/// Builds tool parameters from the user's text
pub type ParamBuilder = fn(&str) -> Value;

pub struct IntentRule {
    pub intent: &'static str,
    pub matcher: Matcher,
    pub tool: &'static str,
    /// Recorded as the `thought` action when the rule fires
    pub thought: &'static str,
    /// Opens the reply; the tool output follows
    pub reply_prefix: &'static str,
    pub build_params: ParamBuilder,
}

impl std::fmt::Debug for IntentRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentRule")
            .field("intent", &self.intent)
            .field("matcher", &self.matcher)
            .field("tool", &self.tool)
            .finish_non_exhaustive()
    }
}

impl IntentRule {
    pub fn matches(&self, lowered: &str, original: &str) -> bool {
        self.matcher.is_match(lowered, original)
    }
}

/// Lead-in phrases stripped before the calculator sees the expression
static CALC_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:calculate|compute|solve|math|what\s+is|what's)\b[:\s]*(.*)")
        .expect("valid regex")
});

/// A run of arithmetic starting at a digit or bracket
static ARITHMETIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[-(]*\d[\d\s.+\-*/^%()×÷x]*").expect("valid regex")
});

/// Bare arithmetic like "12*4" with no lead-in keyword
static BARE_ARITHMETIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d\s*[-+*/^%×÷]\s*[-(]*\d").expect("valid regex"));

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:in|at|for)\s+([a-z][a-z ]*[a-z])").expect("valid regex")
});

static SEARCH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:search\s+for|search|look\s+up|google)\b\s*(.*)").expect("valid regex")
});

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(\w+)?\s*\n?(.*?)```").expect("valid regex"));

static PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w./-]+\.[A-Za-z]{1,4}\b").expect("valid regex"));

const DEMO_EXPRESSION: &str = "(12 + 8) * 3";
const DEMO_LOCATION: &str = "Bandung";
/// Words that end a place name ("weather in Garut today")
const TIME_WORDS: &[&str] = &["today", "now", "tomorrow", "tonight", "this", "right", "please"];
const DEMO_CODE: &str = "print(\"Wilujeng sumping!\")";
const DEMO_WORD: &str = "hatur nuhun";

fn trim_question(s: &str) -> &str {
    s.trim().trim_end_matches(['?', '.', '!']).trim()
}

/// Pick the first keyword group present in the text
fn first_hit(lowered: &str, table: &[(&[&str], &'static str)], default: &'static str) -> &'static str {
    table
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| lowered.contains(k)))
        .map(|(_, value)| *value)
        .unwrap_or(default)
}

pub fn vocabulary_params(text: &str) -> Value {
    let lowered = text.to_lowercase();
    let category = first_hit(
        &lowered,
        &[
            (&["number", "count", "wilangan"], "numbers"),
            (&["family", "kulawarga", "parent", "sibling"], "family"),
            (&["food", "eat", "drink", "kadaharan"], "food"),
            (&["verb", "action"], "verbs"),
            (&["greet", "salam", "hello", "polite"], "greetings"),
        ],
        "greetings",
    );
    json!({ "category": category, "count": 5 })
}

pub fn conversation_params(text: &str) -> Value {
    let lowered = text.to_lowercase();
    let scenario = first_hit(
        &lowered,
        &[
            (&["market", "pasar", "bargain", "shop", "price"], "pasar"),
            (&["food", "order", "warung", "restaurant", "eat"], "warung"),
        ],
        "wawanohan",
    );
    json!({ "scenario": scenario })
}

pub fn grammar_params(text: &str) -> Value {
    let lowered = text.to_lowercase();
    let topic = first_hit(
        &lowered,
        &[
            (&["plural"], "plurals"),
            (&["negat", "not ", "henteu"], "negation"),
            (&["question", "ask"], "questions"),
            (&["polite", "level", "formal", "lemes", "loma"], "speech-levels"),
        ],
        "word-order",
    );
    json!({ "topic": topic })
}

pub fn pronunciation_params(text: &str) -> Value {
    let word = vocabulary::mentioned_in(text)
        .map(|item| item.word)
        .unwrap_or(DEMO_WORD);
    json!({ "word": word })
}

pub fn calculator_params(text: &str) -> Value {
    let from_prefix = CALC_PREFIX_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| trim_question(m.as_str()))
        .filter(|s| !s.is_empty());

    let expression = from_prefix
        .or_else(|| {
            ARITHMETIC_RE
                .find(text)
                .map(|m| trim_question(m.as_str()))
                .filter(|s| !s.is_empty())
        })
        .unwrap_or(DEMO_EXPRESSION);
    json!({ "expression": expression })
}

pub fn weather_params(text: &str) -> Value {
    let location = LOCATION_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| {
            let place: Vec<&str> = m
                .as_str()
                .split_whitespace()
                .take_while(|w| !TIME_WORDS.contains(&w.to_lowercase().as_str()))
                .collect();
            title_case(&place.join(" "))
        })
        .filter(|place| !place.is_empty())
        .unwrap_or_else(|| DEMO_LOCATION.to_string());
    json!({ "location": location, "unit": "celsius" })
}

pub fn web_search_params(text: &str) -> Value {
    let query = SEARCH_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| trim_question(m.as_str()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| trim_question(text));
    json!({ "query": query, "max_results": 3 })
}

pub fn execute_code_params(text: &str) -> Value {
    match CODE_RE.captures(text) {
        Some(caps) => {
            let language = caps
                .get(1)
                .map_or("python".to_string(), |m| m.as_str().to_lowercase());
            let language = match language.as_str() {
                "py" => "python",
                "js" | "node" => "javascript",
                "rs" => "rust",
                other => other,
            };
            let code = caps.get(2).map_or("", |m| m.as_str()).trim();
            json!({ "code": code, "language": language })
        }
        None => json!({ "code": DEMO_CODE, "language": "python" }),
    }
}

pub fn file_operations_params(text: &str) -> Value {
    let lowered = text.to_lowercase();
    let path = PATH_RE.find(text).map(|m| m.as_str());

    if lowered.contains("list") || lowered.contains("directory") || lowered.contains("folder") {
        return json!({ "operation": "list" });
    }
    if lowered.contains("write") || lowered.contains("save") {
        return json!({
            "operation": "write",
            "path": path.unwrap_or("notes/salam.txt"),
            "content": "wilujeng enjing - good morning\nhatur nuhun - thank you\nsami-sami - you're welcome\n",
        });
    }
    json!({ "operation": "read", "path": path.unwrap_or("README.md") })
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// The full ordered rule catalog
///
/// Personas filter this list by their tool set; relative order is kept.
pub fn catalog() -> Vec<IntentRule> {
    vec![
        IntentRule {
            intent: "vocabulary",
            matcher: Matcher::Keywords(&["vocabulary", "words", "kosakata"]),
            tool: "vocabulary",
            thought: "The learner wants new vocabulary, so I'll pull a word list.",
            reply_prefix: "Here are some words to learn:",
            build_params: vocabulary_params,
        },
        IntentRule {
            intent: "conversation",
            matcher: Matcher::Keywords(&["conversation", "practice", "dialogue", "ngobrol"]),
            tool: "conversation",
            thought: "The learner wants to practise speaking, so I'll start a dialogue.",
            reply_prefix: "Let's practise this conversation together:",
            build_params: conversation_params,
        },
        IntentRule {
            intent: "grammar",
            matcher: Matcher::Keywords(&["grammar", "sentence", "tata basa"]),
            tool: "grammar",
            thought: "The learner is asking about grammar, so I'll explain a topic.",
            reply_prefix: "Here's how it works:",
            build_params: grammar_params,
        },
        IntentRule {
            intent: "pronunciation",
            matcher: Matcher::Keywords(&["pronunciation", "pronounce", "how do i say", "how to say"]),
            tool: "pronunciation",
            thought: "The learner wants to know how a word sounds, so I'll fetch a pronunciation guide.",
            reply_prefix: "Here's how to say it:",
            build_params: pronunciation_params,
        },
        IntentRule {
            intent: "calculation",
            matcher: Matcher::Keywords(&["calculate", "compute", "math", "solve"]),
            tool: "calculator",
            thought: "This is a calculation, so I'll use the calculator.",
            reply_prefix: "I calculated that for you:",
            build_params: calculator_params,
        },
        IntentRule {
            intent: "weather",
            matcher: Matcher::Keywords(&["weather", "temperature", "forecast", "cuaca"]),
            tool: "weather",
            thought: "The user is asking about the weather, so I'll check current conditions.",
            reply_prefix: "Here's the current weather:",
            build_params: weather_params,
        },
        IntentRule {
            intent: "search",
            matcher: Matcher::Keywords(&["search", "look up", "google", "find information"]),
            tool: "web_search",
            thought: "The user wants information, so I'll search the web.",
            reply_prefix: "Here's what I found:",
            build_params: web_search_params,
        },
        IntentRule {
            intent: "code",
            matcher: Matcher::Keywords(&["run code", "execute", "```", "run this"]),
            tool: "execute_code",
            thought: "The user wants code run, so I'll execute it in the sandbox.",
            reply_prefix: "I ran the code:",
            build_params: execute_code_params,
        },
        IntentRule {
            intent: "files",
            matcher: Matcher::Keywords(&["file", "folder", "directory"]),
            tool: "file_operations",
            thought: "This involves files, so I'll use the file tool.",
            reply_prefix: "Here's the file result:",
            build_params: file_operations_params,
        },
        IntentRule {
            intent: "arithmetic",
            matcher: Matcher::Pattern(BARE_ARITHMETIC_RE.clone()),
            tool: "calculator",
            thought: "That looks like arithmetic, so I'll use the calculator.",
            reply_prefix: "I calculated that for you:",
            build_params: calculator_params,
        },
    ]
}
