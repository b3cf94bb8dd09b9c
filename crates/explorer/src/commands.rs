//! Line commands understood by the interactive shell.

use thiserror::Error;

pub const HELP: &str = "\
Commands:
  user <name>   list the monthly archives of a player
  archives      show the listed archives again
  open <n>      load the games of archive #n
  games         show the listed games again
  game <n>      show details and notation of game #n
  analyze       analyze the selected game
  next | n      step forward one move
  prev | p      step back one move
  board         redraw the current position
  help          show this message
  quit          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    User(String),
    Archives,
    Open(usize),
    Games,
    Game(usize),
    Analyze,
    Next,
    Previous,
    Board,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),

    #[error("'{0}' needs a number, e.g. '{0} 0'")]
    MissingIndex(&'static str),

    #[error("'{0}' is not a valid number")]
    BadIndex(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            // The username itself is validated by the session, so an empty
            // argument is passed through rather than rejected here.
            "user" | "u" => Command::User(rest.to_string()),
            "archives" | "a" => Command::Archives,
            "open" | "o" => Command::Open(parse_index("open", rest)?),
            "games" | "g" => Command::Games,
            "game" => Command::Game(parse_index("game", rest)?),
            "analyze" | "analyse" => Command::Analyze,
            "next" | "n" => Command::Next,
            "prev" | "previous" | "p" => Command::Previous,
            "board" | "b" => Command::Board,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn parse_index(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingIndex(command));
    }
    arg.parse().map_err(|_| CommandError::BadIndex(arg.to_string()))
}
