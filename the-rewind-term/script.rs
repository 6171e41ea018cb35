//! Line-oriented command language.
//!
//! ```text
//! insert <pos> <text>          pos may be `$` for the end of the buffer
//! delete <pos> <len>
//! replace <pos> <len> <text>   text may be wrapped in double quotes
//! cure | undo | redo | queue-demo | flush | history | show | clear | quit
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::io::{
  self,
  BufRead,
  Write,
};

use eyre::Result;
use the_rewind::session::Session;
use thiserror::Error;

use crate::demo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
  At(usize),
  End,
}

impl Position {
  fn resolve(self, session: &Session) -> usize {
    match self {
      Self::At(position) => position,
      Self::End => session.len(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  Insert {
    position: Position,
    text:     String,
  },
  Delete {
    position: Position,
    length:   usize,
  },
  Replace {
    position: Position,
    length:   usize,
    text:     String,
  },
  Cure,
  Undo,
  Redo,
  QueueDemo,
  Flush,
  History,
  Show,
  Clear,
  Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
  #[error("unknown command `{0}`")]
  Unknown(String),
  #[error("missing {0}")]
  Missing(&'static str),
  #[error("`{value}` is not a valid {name}")]
  Invalid { name: &'static str, value: String },
}

/// Parses one line. Returns `Ok(None)` for blank and comment lines.
pub fn parse(line: &str) -> std::result::Result<Option<Action>, ParseError> {
  let line = line.trim_end_matches(['\r', '\n']).trim_start();
  if line.is_empty() || line.starts_with('#') {
    return Ok(None);
  }

  let (name, mut rest) = line.split_once(' ').unwrap_or((line, ""));
  let action = match name {
    "insert" => {
      Action::Insert {
        position: position(&mut rest)?,
        text:     text(rest)?,
      }
    },
    "delete" => {
      Action::Delete {
        position: position(&mut rest)?,
        length:   number("length", &mut rest)?,
      }
    },
    "replace" => {
      Action::Replace {
        position: position(&mut rest)?,
        length:   number("length", &mut rest)?,
        text:     text(rest)?,
      }
    },
    "cure" => Action::Cure,
    "undo" => Action::Undo,
    "redo" => Action::Redo,
    "queue-demo" => Action::QueueDemo,
    "flush" => Action::Flush,
    "history" => Action::History,
    "show" => Action::Show,
    "clear" => Action::Clear,
    "quit" | "exit" => Action::Quit,
    other => return Err(ParseError::Unknown(other.to_string())),
  };
  Ok(Some(action))
}

fn token<'a>(name: &'static str, rest: &mut &'a str) -> std::result::Result<&'a str, ParseError> {
  let trimmed = rest.trim_start();
  if trimmed.is_empty() {
    return Err(ParseError::Missing(name));
  }
  let (token, tail) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
  *rest = tail;
  Ok(token)
}

fn number(name: &'static str, rest: &mut &str) -> std::result::Result<usize, ParseError> {
  let value = token(name, rest)?;
  value.parse().map_err(|_| {
    ParseError::Invalid {
      name,
      value: value.to_string(),
    }
  })
}

fn position(rest: &mut &str) -> std::result::Result<Position, ParseError> {
  if rest.trim_start().starts_with('$') {
    token("position", rest)?;
    return Ok(Position::End);
  }
  number("position", rest).map(Position::At)
}

/// Everything after the separating space, minus one pair of surrounding
/// double quotes.
fn text(rest: &str) -> std::result::Result<String, ParseError> {
  if rest.is_empty() {
    return Err(ParseError::Missing("text"));
  }
  let text = rest
    .strip_prefix('"')
    .and_then(|inner| inner.strip_suffix('"'))
    .unwrap_or(rest);
  Ok(text.to_string())
}

pub fn run(session: &mut Session, input: impl BufRead, out: &mut impl Write) -> Result<()> {
  for (index, line) in input.lines().enumerate() {
    let line = line?;
    match parse(&line) {
      Ok(Some(Action::Quit)) => break,
      Ok(Some(action)) => apply(session, action, out)?,
      Ok(None) => {},
      Err(err) => {
        log::warn!("line {}: {err}", index + 1);
        writeln!(out, "✗ line {}: {err}", index + 1)?;
      },
    }
  }
  Ok(())
}

/// Runs one action and reports the outcome. Failed edits are reported and
/// the session stays usable.
pub fn apply(session: &mut Session, action: Action, out: &mut impl Write) -> io::Result<()> {
  match action {
    Action::Insert { position, text } => {
      let position = position.resolve(session);
      match session.insert(position, text.as_str()) {
        Ok(()) => writeln!(out, "✓ Inserted '{text}' at position {position}"),
        Err(err) => writeln!(out, "✗ {err}"),
      }
    },
    Action::Delete { position, length } => {
      let position = position.resolve(session);
      match session.delete(position, length) {
        Ok(()) => writeln!(out, "✓ Deleted {length} characters at position {position}"),
        Err(err) => writeln!(out, "✗ {err}"),
      }
    },
    Action::Replace {
      position,
      length,
      text,
    } => {
      let position = position.resolve(session);
      match session.replace(position, length, text.as_str()) {
        Ok(()) => {
          writeln!(
            out,
            "✓ Replaced {length} characters at position {position} with '{text}'"
          )
        },
        Err(err) => writeln!(out, "✗ {err}"),
      }
    },
    Action::Cure => {
      match session.cure_text() {
        Ok(()) => writeln!(out, "✓ Cured text (replaced ':' with '@' and ' ' with '_')"),
        Err(err) => writeln!(out, "✗ {err}"),
      }
    },
    Action::Undo => {
      match session.undo() {
        Ok(cmd) => writeln!(out, "✓ Undid operation: {cmd}"),
        Err(err) => writeln!(out, "✗ {err}"),
      }
    },
    Action::Redo => {
      match session.redo() {
        Ok(cmd) => writeln!(out, "✓ Redid operation: {cmd}"),
        Err(err) => writeln!(out, "✗ {err}"),
      }
    },
    Action::QueueDemo => {
      let command = demo::queued_operations(session.buffer());
      session.queue(command.into());
      writeln!(out, "✓ Operations queued for later execution")
    },
    Action::Flush => {
      match session.flush() {
        Ok(count) => writeln!(out, "✓ Applied {count} queued command(s)"),
        Err(err) => writeln!(out, "✗ {err}"),
      }
    },
    Action::History => {
      writeln!(out, "\n=== OPERATION HISTORY ===")?;
      writeln!(out, "{}", session.history())?;
      writeln!(out, "=========================\n")
    },
    Action::Show => show(session, out),
    Action::Clear => {
      session.clear();
      writeln!(out, "✓ Document and history cleared")
    },
    Action::Quit => Ok(()),
  }
}

fn show(session: &Session, out: &mut impl Write) -> io::Result<()> {
  writeln!(out, "\n--- CURRENT DOCUMENT STATE ---")?;
  writeln!(out, "Length: {} characters", session.len())?;
  if session.is_empty() {
    writeln!(out, "Content: [Empty]")?;
  } else {
    writeln!(out, "Content: \"{}\"", session.content())?;
  }
  writeln!(out, "-----------------------------\n")
}
