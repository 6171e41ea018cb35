//! Reversible edits over a shared [`TextBuffer`].
//!
//! Every command captures the buffer state right before it mutates anything
//! and undoes itself by restoring that [`Snapshot`]. The capture happens at
//! execution time rather than construction time, so a command that sat in a
//! queue while other edits landed still rewinds to exactly the state it saw.
//!
//! The set of commands is closed: [`EditCommand`] is the tagged union stored
//! by history and queues, and each variant also implements [`Command`] on its
//! own.

use std::{
  borrow::Cow,
  fmt,
  sync::Arc,
};

use thiserror::Error;

use crate::{
  Tendril,
  buffer::{
    BufferError,
    TextBuffer,
  },
  snapshot::Snapshot,
};

mod cure_text;
mod delete;
mod insert;
mod macro_command;
mod replace;

pub use cure_text::{
  CURE_TEXT_RULES,
  CureTextCommand,
  Substitution,
};
pub use delete::DeleteCommand;
pub use insert::InsertCommand;
pub use macro_command::{
  CommandFactory,
  MacroCommand,
};
pub use replace::ReplaceCommand;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
  #[error("invalid argument `{name}`: {reason}")]
  InvalidArgument {
    name:   &'static str,
    reason: &'static str,
  },
  #[error("cannot undo `{0}`: it has not been executed")]
  NotExecuted(String),
  #[error(transparent)]
  Buffer(#[from] BufferError),
}

pub type Result<T> = std::result::Result<T, CommandError>;

pub trait Command {
  /// Applies the edit to the target buffer.
  ///
  /// Executing again after [`undo`](Self::undo) reproduces the original
  /// effect.
  fn execute(&mut self) -> Result<()>;

  /// Restores the buffer to the state it had right before the last
  /// successful [`execute`](Self::execute).
  fn undo(&mut self) -> Result<()>;

  /// Whether the effect of the last [`execute`](Self::execute) is currently
  /// in the buffer. False before the first execution, after a failed one,
  /// and after an undo.
  fn is_applied(&self) -> bool;

  fn description(&self) -> Cow<'_, str>;
}

#[derive(Debug)]
pub enum EditCommand {
  Insert(InsertCommand),
  Delete(DeleteCommand),
  Replace(ReplaceCommand),
  Macro(MacroCommand),
  CureText(CureTextCommand),
}

impl EditCommand {
  pub fn insert(
    buffer: &Arc<TextBuffer>,
    position: usize,
    text: impl Into<Tendril>,
  ) -> Result<Self> {
    InsertCommand::new(Arc::clone(buffer), position, text).map(Self::Insert)
  }

  pub fn delete(buffer: &Arc<TextBuffer>, position: usize, length: usize) -> Result<Self> {
    Ok(Self::Delete(DeleteCommand::new(
      Arc::clone(buffer),
      position,
      length,
    )))
  }

  pub fn replace(
    buffer: &Arc<TextBuffer>,
    position: usize,
    length: usize,
    text: impl Into<Tendril>,
  ) -> Result<Self> {
    ReplaceCommand::new(Arc::clone(buffer), position, length, text).map(Self::Replace)
  }

  pub fn cure_text(buffer: &Arc<TextBuffer>) -> Self {
    Self::CureText(CureTextCommand::new(Arc::clone(buffer)))
  }

  fn as_command(&self) -> &dyn Command {
    match self {
      Self::Insert(cmd) => cmd,
      Self::Delete(cmd) => cmd,
      Self::Replace(cmd) => cmd,
      Self::Macro(cmd) => cmd,
      Self::CureText(cmd) => cmd,
    }
  }

  fn as_command_mut(&mut self) -> &mut dyn Command {
    match self {
      Self::Insert(cmd) => cmd,
      Self::Delete(cmd) => cmd,
      Self::Replace(cmd) => cmd,
      Self::Macro(cmd) => cmd,
      Self::CureText(cmd) => cmd,
    }
  }
}

impl Command for EditCommand {
  fn execute(&mut self) -> Result<()> {
    self.as_command_mut().execute()
  }

  fn undo(&mut self) -> Result<()> {
    self.as_command_mut().undo()
  }

  fn is_applied(&self) -> bool {
    self.as_command().is_applied()
  }

  fn description(&self) -> Cow<'_, str> {
    self.as_command().description()
  }
}

impl fmt::Display for EditCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.description())
  }
}

macro_rules! impl_from_variant {
  ($($variant:ident => $ty:ty),* $(,)?) => {
    $(
      impl From<$ty> for EditCommand {
        fn from(cmd: $ty) -> Self {
          Self::$variant(cmd)
        }
      }
    )*
  };
}

impl_from_variant! {
  Insert => InsertCommand,
  Delete => DeleteCommand,
  Replace => ReplaceCommand,
  Macro => MacroCommand,
  CureText => CureTextCommand,
}

fn require_text(name: &'static str, text: &str) -> Result<()> {
  if text.is_empty() {
    return Err(CommandError::InvalidArgument {
      name,
      reason: "must not be empty",
    });
  }
  Ok(())
}

/// Restores `before` into `buffer` and forgets it, so a second undo without
/// an execute in between is reported instead of silently rewinding again.
///
/// Returns `None` when there is nothing to restore.
fn rewind(buffer: &TextBuffer, before: &mut Option<Snapshot>) -> Option<Result<()>> {
  let snapshot = before.as_ref()?;
  if let Err(err) = buffer.restore_snapshot(snapshot) {
    return Some(Err(err.into()));
  }
  *before = None;
  Some(Ok(()))
}

fn not_executed(cmd: &dyn Command) -> CommandError {
  CommandError::NotExecuted(cmd.description().into_owned())
}
