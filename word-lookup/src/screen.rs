use std::fmt::Write;

use crate::state::{LookupState, Screen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Anything that is not a command replaces the query.
    Query(String),
    /// Optionally sets the query before searching.
    Search(Option<String>),
    Play,
    Clear,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix(':') else {
            return Command::Query(line.to_owned());
        };
        let (name, argument) = match command.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, Some(argument.trim())),
            None => (command, None),
        };
        match &name.to_lowercase()[..] {
            "search" | "s" | "define" | "find" => {
                Command::Search(argument.filter(|word| !word.is_empty()).map(str::to_owned))
            }
            "play" | "p" => Command::Play,
            "clear" | "c" => Command::Clear,
            "exit" | "quit" | "q" | "e" => Command::Quit,
            other => Command::Unknown(other.to_owned()),
        }
    }
}

pub const HELP: &str =
    "Type a word, then :search (:s). :play (:p) speaks it, :clear (:c) resets, :quit (:q) leaves.";

/// Draws the screen. Error banner and result panel are never shown together.
pub fn render(screen: &Screen) -> String {
    let mut out = String::from("== Dictionary App ==\n");
    if screen.query.is_empty() {
        out.push_str("Search the word ...\n");
    } else {
        let _ = writeln!(out, "Search: {}", screen.query);
    }
    match &screen.state {
        LookupState::Empty => {}
        LookupState::Loading => out.push_str("Searching...\n"),
        LookupState::Failed(error) => {
            let _ = writeln!(out, "!! {}", error.message);
        }
        LookupState::Success(result) => {
            let _ = write!(out, "{}", result.word);
            if result.audio_uri.is_some() {
                out.push_str("  [:play]");
            }
            out.push('\n');
            let _ = writeln!(out, "    Definition: {}", result.definition);
            let _ = writeln!(out, "    Example: {}", result.example);
        }
    }
    out
}
