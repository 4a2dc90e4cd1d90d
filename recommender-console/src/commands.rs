use recommender_core::{GroupMode, ParseGroupModeError};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  search <query>        run a new search
  group <mode>          none | year | rating | letter | author
  date on|off           show or hide publish dates
  rating on|off         show or hide ratings
  undo / redo           step through search history
  subscribe <keyword>   alert when a title contains the keyword
  keywords              list subscribed keywords
  history               list saved searches
  help                  show this message
  quit                  exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Group(GroupMode),
    Date(bool),
    Rating(bool),
    Undo,
    Redo,
    Subscribe(String),
    Keywords,
    History,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("expected 'on' or 'off', got '{0}'")]
    InvalidSwitch(String),
    #[error("{0}")]
    InvalidGroup(#[from] ParseGroupModeError),
}

fn parse_switch(value: &str) -> Result<bool, CommandError> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(CommandError::InvalidSwitch(value.to_string())),
    }
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        // An empty query is allowed: it clears the results, as in the form.
        "search" => Command::Search(rest.to_string()),
        "group" if rest.is_empty() => return Err(CommandError::MissingArgument("group")),
        "group" => Command::Group(rest.parse()?),
        "date" if rest.is_empty() => return Err(CommandError::MissingArgument("date")),
        "date" => Command::Date(parse_switch(rest)?),
        "rating" if rest.is_empty() => return Err(CommandError::MissingArgument("rating")),
        "rating" => Command::Rating(parse_switch(rest)?),
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "subscribe" if rest.is_empty() => return Err(CommandError::MissingArgument("subscribe")),
        "subscribe" => Command::Subscribe(rest.to_string()),
        "keywords" => Command::Keywords,
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}
