//! # Console Grammar
//!
//! One line per event. Anything not starting with `=` or `:` is a scan.
//!
//! | Line | Command |
//! |------|---------|
//! | `<scan>` | submit a scan |
//! | `= <text>` | attribute for the current target |
//! | `:pending` | list buffered entries |
//! | `:clear` | drop buffered entries |
//! | `:flush` | write snapshots now |
//! | `:path <id>` | physical path of an entity |
//! | `:show <id>` | entity record as JSON |
//! | `:mint <id>` | print a label token |

use rt_02_entity_store::{Identifier, StoreError};
use thiserror::Error;

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan(String),
    Annotate(String),
    Pending,
    Clear,
    Flush,
    Path(Identifier),
    Show(Identifier),
    Mint(Identifier),
}

/// Console input errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Unknown command :{0}")]
    UnknownCommand(String),

    #[error(":{0} needs an identifier")]
    MissingArgument(&'static str),

    #[error(transparent)]
    BadIdentifier(#[from] StoreError),
}

/// Parse one line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, ConsoleError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Some(text) = line.strip_prefix('=') {
        return Ok(Some(Command::Annotate(text.trim().to_string())));
    }

    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Some(Command::Scan(line.to_string())));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "pending" => Command::Pending,
        "clear" => Command::Clear,
        "flush" => Command::Flush,
        "path" => Command::Path(identifier(arg, "path")?),
        "show" => Command::Show(identifier(arg, "show")?),
        "mint" => Command::Mint(identifier(arg, "mint")?),
        other => return Err(ConsoleError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn identifier(arg: &str, command: &'static str) -> Result<Identifier, ConsoleError> {
    if arg.is_empty() {
        return Err(ConsoleError::MissingArgument(command));
    }
    Ok(arg.parse()?)
}
