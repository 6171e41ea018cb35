//! Scripted tour of the editing operations.

use std::{
  io::Write,
  sync::Arc,
};

use eyre::Result;
use the_rewind::{
  buffer::TextBuffer,
  command::{
    EditCommand,
    MacroCommand,
  },
  session::Session,
};

use crate::script;

const TOUR: &[(&str, &[&str])] = &[
  ("1. BASIC OPERATIONS", &[
    "show",
    "insert 0 Hello",
    "show",
    "insert 5 \" World\"",
    "show",
    "history",
  ]),
  ("2. UNDO", &["undo", "show"]),
  ("2.1. UNDO THEN REDO", &["undo", "show", "redo", "show"]),
  ("3. MORE OPERATIONS", &[
    "insert 0 Roaring",
    "insert $ \" tiger\"",
    "insert $ \": \"",
    "show",
    "replace 0 5 Hi",
    "show",
    "delete 2 3",
    "show",
    "history",
  ]),
  ("4. CURE TEXT MACRO", &["cure", "show"]),
  ("5. QUEUE OPERATIONS", &["queue-demo", "show"]),
  ("6. APPLY QUEUED OPERATIONS", &["flush", "show", "history"]),
];

/// The queued macro from the tour. Each step sees the edits of the ones
/// before it.
pub fn queued_operations(buffer: &Arc<TextBuffer>) -> MacroCommand {
  MacroCommand::empty(Arc::clone(buffer))
    .with_step(|buf| EditCommand::insert(buf, 0, "Queued "))
    .with_step(|buf| EditCommand::insert(buf, 7, "operations "))
    .with_step(|buf| EditCommand::replace(buf, 7, 11, "commands "))
    .with_step(|buf| EditCommand::insert(buf, 16, ": "))
}

pub fn run(session: &mut Session, out: &mut impl Write) -> Result<()> {
  writeln!(out, "===============================================")?;
  writeln!(out, "   COMMAND EDITOR")?;
  writeln!(out, "===============================================\n")?;

  for (title, lines) in TOUR {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.len()))?;
    for line in *lines {
      if let Some(action) = script::parse(line)? {
        script::apply(session, action, out)?;
      }
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tour_runs_to_completion() {
    let mut session = Session::default();
    let mut out = Vec::new();
    run(&mut session, &mut out).unwrap();

    assert_eq!(
      session.content(),
      "Queued commands : Hiello_tiger@_"
    );
    let out = String::from_utf8(out).unwrap();
    assert!(!out.contains('✗'));
  }
}
