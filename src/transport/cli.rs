//! CLI transport: interactive chat and content browsing

use crate::agent::Persona;
use crate::config::Config;
use crate::content::{culture, lessons, vocabulary, Category, Level, Progress};
use crate::core::{ActionKind, AgentAction, ChatMessage, Role};
use crate::session::ChatSession;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tabled::{settings::Style, Table, Tabled};

const HELP: &str = "\
Commands:
  /help           Show this help
  /persona ID     Switch persona (resets the conversation)
  /personas       List personas
  /actions        Show the recent agent actions
  /quick [N]      List quick actions, or load quick action N into the prompt
  /clear          Clear the conversation
  /quit           Exit";

fn print_message(message: &ChatMessage, persona: &Persona) {
    match message.role {
        Role::User => println!("{} {}", "you>".bold().green(), message.content),
        Role::Assistant => {
            println!("{} {}", format!("{}>", persona.name).bold().cyan(), message.content)
        }
    }
    println!();
}

fn format_action(action: &AgentAction) -> String {
    let head = format!("{} {}", action.kind.icon(), action.kind);
    let head = match action.kind {
        ActionKind::Thought => head.yellow(),
        ActionKind::ToolUse => head.magenta(),
        ActionKind::Response => head.blue(),
    };
    let mut line = format!("{} {}", head, action.content);
    if let Some(input) = &action.tool_input {
        line.push_str(&format!("\n    input:  {}", input));
    }
    if let Some(output) = &action.tool_output {
        let output = output.replace('\n', "\n            ");
        line.push_str(&format!("\n    output: {}", output));
    }
    line
}

fn print_trace(actions: &[AgentAction]) {
    if actions.is_empty() {
        println!("{}\n", "(no actions yet)".dimmed());
        return;
    }
    for action in actions {
        println!("{}", format_action(action));
    }
    println!();
}

fn print_personas(session: &ChatSession) {
    for persona in session.personas() {
        let marker = if persona.id == session.persona().id { "*" } else { " " };
        println!(
            "{} {:<10} {} ({})",
            marker,
            persona.id.bold(),
            persona.name,
            persona.tools.join(", ").dimmed()
        );
    }
    println!();
}

fn print_quick_actions(session: &ChatSession) {
    for (i, action) in session.quick_actions().iter().enumerate() {
        println!("  {}. {} - {}", i + 1, action.label.bold(), action.prompt);
    }
    println!();
}

/// Handle a slash command. Returns false when the REPL should exit.
fn handle_command(session: &mut ChatSession, line: &str) -> bool {
    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    match command {
        "/quit" | "/exit" => {
            println!("Wilujeng tepang deui!");
            return false;
        }
        "/help" => println!("{}\n", HELP),
        "/personas" => print_personas(session),
        "/actions" => print_trace(session.trace()),
        "/clear" => {
            session.reset();
            println!("Conversation cleared.\n");
            print_message(&session.messages()[0], session.persona());
        }
        "/persona" if arg.is_empty() => print_personas(session),
        "/persona" => match session.switch_persona(arg) {
            Ok(()) => print_message(&session.messages()[0], session.persona()),
            Err(e) => eprintln!("{} {}\n", "Error:".red(), e),
        },
        "/quick" if arg.is_empty() => print_quick_actions(session),
        "/quick" => {
            let applied = arg
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(|| anyhow::anyhow!("Quick action must be a number from 1"))
                .and_then(|i| Ok(session.apply_quick_action(i)?.to_string()));
            match applied {
                Ok(prompt) => println!("Loaded: {}\n(press Enter to send)\n", prompt.italic()),
                Err(e) => eprintln!("{} {}\n", "Error:".red(), e),
            }
        }
        other => eprintln!("Unknown command {}. Type /help.\n", other),
    }
    true
}

async fn send(session: &mut ChatSession, text: &str) {
    if let Some(reply) = session.submit(text).await {
        print_message(&reply, session.persona());
    }
}

/// Interactive chat on stdin/stdout
pub async fn run_chat(
    config: &Config,
    persona: Option<&str>,
    initial_message: Option<String>,
) -> Result<()> {
    let mut session = ChatSession::from_config(config, persona)?;

    println!("{}", "ngamumule chat".bold());
    println!("Type /help for commands, /quit to exit\n");
    print_message(&session.messages()[0], session.persona());

    if let Some(msg) = initial_message {
        println!("{} {}\n", "you>".bold().green(), msg);
        send(&mut session, &msg).await;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if session.input().is_empty() {
            print!("> ");
        } else {
            print!("> [{}] ", session.input().dimmed());
        }
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.starts_with('/') {
            if !handle_command(&mut session, line) {
                break;
            }
            continue;
        }

        if line.is_empty() {
            // Enter on an empty line sends a loaded quick action
            if let Some(reply) = session.submit_input().await {
                print_message(&reply, session.persona());
            }
            continue;
        }

        session.set_input("");
        send(&mut session, line).await;
    }

    Ok(())
}

/// One-shot message; prints the reply and the trace
pub async fn run_ask(config: &Config, persona: Option<&str>, message: &str, json: bool) -> Result<()> {
    let mut session = ChatSession::from_config(config, persona)?;
    let reply = session
        .submit(message)
        .await
        .context("Message must not be empty")?;

    if json {
        let output = serde_json::json!({
            "persona": session.persona().id,
            "reply": reply,
            "actions": session.actions(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}\n", reply.content);
        print_trace(session.trace());
    }
    Ok(())
}

/// Table of the tools a persona can use
pub fn run_tools(config: &Config, persona: Option<&str>) -> Result<()> {
    let session = ChatSession::from_config(config, persona)?;

    #[derive(Tabled)]
    struct ToolRow {
        #[tabled(rename = "Tool")]
        name: String,
        #[tabled(rename = "Parameters")]
        params: String,
        #[tabled(rename = "Description")]
        description: String,
    }

    let tools = session.agent().tools();
    let rows: Vec<ToolRow> = tools
        .names()
        .iter()
        .filter_map(|name| tools.get(name))
        .map(|tool| {
            let schema = tool.parameters();
            let params = schema
                .properties
                .iter()
                .map(|p| {
                    let mark = if schema.required.contains(&p.name) { "" } else { "?" };
                    format!("{}{}: {}", p.name, mark, p.kind.as_str())
                })
                .collect::<Vec<_>>()
                .join(", ");
            ToolRow {
                name: tool.name().to_string(),
                params,
                description: tool.description().to_string(),
            }
        })
        .collect();

    println!("{} {}\n", "Tools for".bold(), session.persona().name.bold().cyan());
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    Ok(())
}

/// Lesson catalog with progress
pub fn run_lessons(level: Option<&str>, done: &[String]) -> Result<()> {
    let level: Option<Level> = level.map(str::parse).transpose()?;

    let mut progress = Progress::new();
    for id in done {
        progress.complete(id)?;
    }

    #[derive(Tabled)]
    struct LessonRow {
        #[tabled(rename = "")]
        done: &'static str,
        #[tabled(rename = "Id")]
        id: &'static str,
        #[tabled(rename = "Lesson")]
        title: String,
        #[tabled(rename = "Level")]
        level: &'static str,
        #[tabled(rename = "Words")]
        words: usize,
    }

    let rows: Vec<LessonRow> = lessons::lessons()
        .iter()
        .filter(|l| level.map_or(true, |lv| l.level == lv))
        .map(|l| LessonRow {
            done: if progress.is_complete(l.id) { "✓" } else { "" },
            id: l.id,
            title: format!("{} ({})", l.title, l.english_title),
            level: l.level.label(),
            words: l.vocabulary.len(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    println!(
        "\nProgress: {}% ({} of {} lessons)",
        progress.percent(),
        progress.completed_count(),
        lessons::lessons().len()
    );
    if let Some(next) = progress.next_lesson() {
        println!("Next up: {} - {}", next.title.bold(), next.summary);
        for note in culture::for_lesson(next.id) {
            println!("  {} {}", "Culture:".dimmed(), note.title);
        }
    }
    Ok(())
}

/// Vocabulary table with audio paths
pub fn run_vocab(config: &Config, category: Option<&str>) -> Result<()> {
    let category: Option<Category> = category.map(str::parse).transpose()?;
    let manifest = config.audio_manifest();

    #[derive(Tabled)]
    struct WordRow {
        #[tabled(rename = "Word")]
        word: &'static str,
        #[tabled(rename = "Meaning")]
        translation: &'static str,
        #[tabled(rename = "Say it")]
        pronunciation: &'static str,
        #[tabled(rename = "Category")]
        category: &'static str,
        #[tabled(rename = "Audio")]
        audio: String,
    }

    let rows: Vec<WordRow> = vocabulary::vocabulary()
        .iter()
        .filter(|v| category.map_or(true, |c| v.category == c))
        .map(|v| WordRow {
            word: v.word,
            translation: v.translation,
            pronunciation: v.pronunciation,
            category: v.category.as_str(),
            audio: manifest.path_for(v).unwrap_or_default(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    Ok(())
}

pub fn run_culture() -> Result<()> {
    for note in culture::cultural_notes() {
        println!("{} {}", note.title.bold().cyan(), format!("({})", note.region).dimmed());
        println!("{}", note.body);
        if !note.lessons.is_empty() {
            println!("{} {}", "Lessons:".dimmed(), note.lessons.join(", "));
        }
        println!();
    }
    Ok(())
}

/// Print the effective configuration as TOML
pub fn run_config(config: &Config) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_action_shows_input_and_output() {
        let action = AgentAction::tool_use(
            "calculator",
            json!({ "expression": "2 + 2" }),
            "2 + 2 = 4",
        );
        colored::control::set_override(false);
        let line = format_action(&action);
        assert!(line.contains("Using calculator"));
        assert!(line.contains(r#"input:  {"expression":"2 + 2"}"#));
        assert!(line.contains("output: 2 + 2 = 4"));
    }

    #[tokio::test]
    async fn slash_commands_drive_session() {
        let mut session = ChatSession::from_config(&Config::default(), Some("guru")).unwrap();
        assert!(handle_command(&mut session, "/quick 2"));
        assert_eq!(session.input(), "Show me number vocabulary");

        assert!(handle_command(&mut session, "/persona sobat"));
        assert_eq!(session.persona().id, "sobat");
        assert!(session.input().is_empty());

        assert!(handle_command(&mut session, "/persona nobody"));
        assert_eq!(session.persona().id, "sobat");

        assert!(!handle_command(&mut session, "/quit"));
    }
}
