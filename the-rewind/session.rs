//! An editing session: one buffer, one operator.
//!
//! Sessions own their buffer explicitly, so any number of them can coexist
//! in a process without sharing state.
//!
//! # Example
//!
//! ```
//! use the_rewind::session::Session;
//!
//! let mut session = Session::default();
//! session.insert(0, "Hello").unwrap();
//! session.insert(5, " World").unwrap();
//! assert_eq!(session.content(), "Hello World");
//!
//! session.undo().unwrap();
//! assert_eq!(session.content(), "Hello");
//! ```

use std::sync::Arc;

use crate::{
  Tendril,
  buffer::{
    self,
    TextBuffer,
  },
  command::{
    self,
    CureTextCommand,
    DeleteCommand,
    EditCommand,
    InsertCommand,
    ReplaceCommand,
  },
  config::SessionConfig,
  history,
  operator::CommandOperator,
  snapshot::Snapshot,
};

/// History and queue are not synchronized; callers that share a session
/// across threads serialize access to it.
#[derive(Debug)]
pub struct Session {
  buffer:   Arc<TextBuffer>,
  operator: CommandOperator,
}

impl Default for Session {
  fn default() -> Self {
    Self::new(&SessionConfig::default())
  }
}

impl Session {
  pub fn new(config: &SessionConfig) -> Self {
    Self {
      buffer:   Arc::new(TextBuffer::new()),
      operator: CommandOperator::with_history_limit(config.history_limit),
    }
  }

  pub fn buffer(&self) -> &Arc<TextBuffer> {
    &self.buffer
  }

  pub fn operator(&self) -> &CommandOperator {
    &self.operator
  }

  pub fn insert(&mut self, position: usize, text: impl Into<Tendril>) -> command::Result<()> {
    let cmd = InsertCommand::new(Arc::clone(&self.buffer), position, text)?;
    self.execute(cmd.into())
  }

  pub fn delete(&mut self, position: usize, length: usize) -> command::Result<()> {
    let cmd = DeleteCommand::new(Arc::clone(&self.buffer), position, length);
    self.execute(cmd.into())
  }

  pub fn replace(
    &mut self,
    position: usize,
    length: usize,
    text: impl Into<Tendril>,
  ) -> command::Result<()> {
    let cmd = ReplaceCommand::new(Arc::clone(&self.buffer), position, length, text)?;
    self.execute(cmd.into())
  }

  pub fn cure_text(&mut self) -> command::Result<()> {
    self.execute(CureTextCommand::new(Arc::clone(&self.buffer)).into())
  }

  pub fn execute(&mut self, command: EditCommand) -> command::Result<()> {
    self.operator.execute_command(command)
  }

  pub fn queue(&mut self, command: EditCommand) {
    self.operator.queue_command(command);
  }

  /// Executes everything queued so far; see
  /// [`CommandOperator::execute_queued_commands`].
  pub fn flush(&mut self) -> command::Result<usize> {
    self.operator.execute_queued_commands()
  }

  pub fn undo(&mut self) -> history::Result<&EditCommand> {
    self.operator.undo_last_command()
  }

  pub fn redo(&mut self) -> history::Result<&EditCommand> {
    self.operator.redo_last_command()
  }

  pub fn history(&self) -> String {
    self.operator.reveal_history()
  }

  /// Empties the buffer, the history and the queue.
  pub fn clear(&mut self) {
    self.buffer.clear();
    self.operator.clear();
  }

  pub fn content(&self) -> String {
    self.buffer.text()
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn read(&self, position: usize, length: usize) -> buffer::Result<String> {
    self.buffer.get_text(position, length)
  }

  pub fn snapshot(&self) -> Snapshot {
    self.buffer.create_snapshot()
  }

  pub fn restore(&self, snapshot: &Snapshot) -> buffer::Result<()> {
    self.buffer.restore_snapshot(snapshot)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::buffer::BufferError;

  #[test]
  fn sessions_are_independent() {
    let mut a = Session::default();
    let mut b = Session::default();
    a.insert(0, "a").unwrap();
    b.insert(0, "b").unwrap();
    a.undo().unwrap();

    assert_eq!(a.content(), "");
    assert_eq!(b.content(), "b");
    assert!(matches!(
      a.restore(&b.snapshot()),
      Err(BufferError::InvalidSnapshot { .. })
    ));
  }

  #[test]
  fn clear_resets_everything() {
    let mut session = Session::default();
    session.insert(0, "abc").unwrap();
    session.queue(EditCommand::cure_text(session.buffer()));
    session.clear();

    assert!(session.is_empty());
    assert_eq!(session.history(), "No commands executed.");
    assert_eq!(session.flush(), Ok(0));
  }

  #[test]
  fn config_bounds_history_output() {
    let mut session = Session::new(&SessionConfig { history_limit: 2 });
    for n in 0..4 {
      session.insert(0, n.to_string()).unwrap();
    }
    assert_eq!(
      session.history(),
      "1. Executed: Insert '2' at position 0\n2. Executed: Insert '3' at position 0"
    );
    assert_eq!(session.operator().history().undo_len(), 4);
  }

  #[test]
  fn read_and_snapshot() {
    let mut session = Session::default();
    session.insert(0, "Hello World").unwrap();
    assert_eq!(session.read(6, 5).unwrap(), "World");
    assert_eq!(session.len(), 11);

    let snapshot = session.snapshot();
    session.delete(0, 6).unwrap();
    session.restore(&snapshot).unwrap();
    assert_eq!(session.content(), "Hello World");
  }
}
