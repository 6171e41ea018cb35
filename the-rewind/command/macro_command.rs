//! Composite commands built from factories.

use std::{
  borrow::Cow,
  fmt,
  sync::Arc,
};

use super::{
  Command,
  EditCommand,
  Result,
  not_executed,
  rewind,
};
use crate::{
  buffer::TextBuffer,
  snapshot::Snapshot,
};

/// Builds one step of a [`MacroCommand`] from the buffer as it stands when
/// the step runs.
pub type CommandFactory = Box<dyn Fn(&Arc<TextBuffer>) -> Result<EditCommand> + Send + Sync>;

/// Runs a sequence of commands as a single undoable unit.
///
/// Every factory is called against the shared buffer right before its step
/// executes, so later steps observe the effect of earlier ones. Undo restores
/// the state captured before the first step in one go; the sub-commands are
/// never undone individually.
pub struct MacroCommand {
  buffer:    Arc<TextBuffer>,
  factories: Vec<CommandFactory>,
  executed:  Vec<EditCommand>,
  before:    Option<Snapshot>,
}

impl MacroCommand {
  pub fn new(buffer: Arc<TextBuffer>, factories: impl IntoIterator<Item = CommandFactory>) -> Self {
    Self {
      buffer,
      factories: factories.into_iter().collect(),
      executed: Vec::new(),
      before: None,
    }
  }

  pub fn empty(buffer: Arc<TextBuffer>) -> Self {
    Self::new(buffer, Vec::new())
  }

  /// Appends a step.
  pub fn with_step<F>(mut self, factory: F) -> Self
  where
    F: Fn(&Arc<TextBuffer>) -> Result<EditCommand> + Send + Sync + 'static,
  {
    self.factories.push(Box::new(factory));
    self
  }

  pub fn len(&self) -> usize {
    self.factories.len()
  }

  pub fn is_empty(&self) -> bool {
    self.factories.is_empty()
  }

  /// Sub-commands run by the last execution, in order. After a failed
  /// execution these are the steps that ran before the rollback.
  pub fn executed(&self) -> &[EditCommand] {
    &self.executed
  }
}

impl Command for MacroCommand {
  /// Stops at the first step that fails to build or execute. The buffer is
  /// then put back to its state before the macro and the error is returned.
  fn execute(&mut self) -> Result<()> {
    let before = self.buffer.create_snapshot();
    self.executed.clear();

    for (step, factory) in self.factories.iter().enumerate() {
      let outcome = factory(&self.buffer).and_then(|mut cmd| cmd.execute().map(|()| cmd));
      match outcome {
        Ok(cmd) => self.executed.push(cmd),
        Err(err) => {
          tracing::warn!(step, %err, "macro step failed, rolling back");
          self.buffer.restore_snapshot(&before)?;
          return Err(err);
        },
      }
    }

    self.before = Some(before);
    Ok(())
  }

  fn undo(&mut self) -> Result<()> {
    rewind(&self.buffer, &mut self.before).unwrap_or_else(|| Err(not_executed(&*self)))
  }

  fn is_applied(&self) -> bool {
    self.before.is_some()
  }

  fn description(&self) -> Cow<'_, str> {
    if self.executed.is_empty() {
      return Cow::Borrowed("Macro Command: (not executed)");
    }
    let steps = self
      .executed
      .iter()
      .map(|cmd| cmd.description())
      .collect::<Vec<_>>()
      .join(", ");
    Cow::Owned(format!("Macro Command: {steps}"))
  }
}

impl fmt::Debug for MacroCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MacroCommand")
      .field("buffer", &self.buffer.id())
      .field("steps", &self.factories.len())
      .field("executed", &self.executed)
      .field("before", &self.before.as_ref().map(Snapshot::id))
      .finish()
  }
}
