use thiserror::Error;

/// A toolbar or link action typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home,
    Back,
    Forward,
    Go(String),
    /// Link in the table of contents pane.
    Contents(String),
    Status,
    History,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("{0} needs a link")]
    MissingLink(String),
    #[error("unknown command: {0}")]
    Unknown(String),
}

impl Command {
    pub const USAGE: &'static str =
        "commands: home | back (b) | forward (f) | go <link> | contents (c) <link> | status | history | help | quit (q)";

    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "" => Err(ParseError::Empty),
            "home" | "h" => Ok(Command::Home),
            "back" | "b" => Ok(Command::Back),
            "forward" | "f" => Ok(Command::Forward),
            "go" | "g" | "contents" | "c" if rest.is_empty() => {
                Err(ParseError::MissingLink(word.to_string()))
            }
            "go" | "g" => Ok(Command::Go(rest.to_string())),
            "contents" | "c" => Ok(Command::Contents(rest.to_string())),
            "status" | "s" => Ok(Command::Status),
            "history" => Ok(Command::History),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}
