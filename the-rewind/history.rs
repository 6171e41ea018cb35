//! Undo/redo stacks plus a bounded audit log.

use std::{
  collections::VecDeque,
  fmt,
};

use thiserror::Error;

use crate::command::{
  Command,
  CommandError,
  EditCommand,
};

pub const DEFAULT_HISTORY_LIMIT: usize = 20;

pub type Result<T> = std::result::Result<T, HistoryError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Undo,
  Redo,
}

impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Undo => "undo",
      Self::Redo => "redo",
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
  #[error("nothing to {0}")]
  EmptyHistory(Direction),
  #[error(transparent)]
  Command(#[from] CommandError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandStatus {
  Executed,
  Undone,
  Redone,
}

impl fmt::Display for CommandStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Executed => "Executed",
      Self::Undone => "Undone",
      Self::Redone => "Redone",
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
  pub status:      CommandStatus,
  /// The command's description at the time of the transition.
  pub description: String,
}

/// A recorded command and whether its execution took effect.
#[derive(Debug)]
struct Entry {
  command: EditCommand,
  applied: bool,
}

/// Tracks executed commands for undo and redo.
///
/// The stacks are unbounded: `limit` only caps the audit log, which drops
/// its oldest entries first.
#[derive(Debug)]
pub struct HistoryManager {
  undo_stack: Vec<Entry>,
  redo_stack: Vec<Entry>,
  audit_log:  VecDeque<AuditEntry>,
  limit:      usize,
}

impl Default for HistoryManager {
  fn default() -> Self {
    Self::with_limit(DEFAULT_HISTORY_LIMIT)
  }
}

impl HistoryManager {
  pub fn with_limit(limit: usize) -> Self {
    Self {
      undo_stack: Vec::new(),
      redo_stack: Vec::new(),
      audit_log:  VecDeque::new(),
      limit:      limit.max(1),
    }
  }

  pub fn limit(&self) -> usize {
    self.limit
  }

  /// Records an execution attempt. Any undone commands can no longer be
  /// redone once the sequence diverges.
  ///
  /// A command whose execution failed is recorded too. It changed nothing,
  /// so undoing or redoing it later leaves the buffer alone.
  pub fn add_command(&mut self, command: EditCommand) {
    self.record(CommandStatus::Executed, &command);
    if !self.redo_stack.is_empty() {
      tracing::debug!(dropped = self.redo_stack.len(), "redo stack invalidated");
      self.redo_stack.clear();
    }
    let applied = command.is_applied();
    self.undo_stack.push(Entry { command, applied });
  }

  /// Undoes the most recent command and moves it onto the redo stack.
  ///
  /// If the command itself fails to undo it stays on the undo stack.
  pub fn undo(&mut self) -> Result<&EditCommand> {
    let Some(mut entry) = self.undo_stack.pop() else {
      return Err(HistoryError::EmptyHistory(Direction::Undo));
    };
    if entry.applied
      && let Err(err) = entry.command.undo()
    {
      self.undo_stack.push(entry);
      return Err(err.into());
    }
    self.record(CommandStatus::Undone, &entry.command);
    Ok(push_top(&mut self.redo_stack, entry))
  }

  /// Re-executes the most recently undone command and moves it back onto the
  /// undo stack.
  pub fn redo(&mut self) -> Result<&EditCommand> {
    let Some(mut entry) = self.redo_stack.pop() else {
      return Err(HistoryError::EmptyHistory(Direction::Redo));
    };
    if entry.applied
      && let Err(err) = entry.command.execute()
    {
      self.redo_stack.push(entry);
      return Err(err.into());
    }
    self.record(CommandStatus::Redone, &entry.command);
    Ok(push_top(&mut self.undo_stack, entry))
  }

  pub fn clear(&mut self) {
    self.undo_stack.clear();
    self.redo_stack.clear();
    self.audit_log.clear();
  }

  pub fn can_undo(&self) -> bool {
    !self.undo_stack.is_empty()
  }

  pub fn can_redo(&self) -> bool {
    !self.redo_stack.is_empty()
  }

  pub fn undo_len(&self) -> usize {
    self.undo_stack.len()
  }

  pub fn redo_len(&self) -> usize {
    self.redo_stack.len()
  }

  /// Audit entries, oldest first.
  pub fn audit_log(&self) -> impl Iterator<Item = &AuditEntry> {
    self.audit_log.iter()
  }

  pub fn audit_len(&self) -> usize {
    self.audit_log.len()
  }

  fn record(&mut self, status: CommandStatus, command: &EditCommand) {
    let description = command.description().into_owned();
    tracing::debug!(%status, %description, "history transition");
    self.audit_log.push_back(AuditEntry {
      status,
      description,
    });
    while self.audit_log.len() > self.limit {
      self.audit_log.pop_front();
    }
  }
}

/// Formats the audit log as `N. <Status>: <Description>` lines.
impl fmt::Display for HistoryManager {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.audit_log.is_empty() {
      return f.write_str("No commands executed.");
    }
    for (index, entry) in self.audit_log.iter().enumerate() {
      if index > 0 {
        f.write_str("\n")?;
      }
      write!(f, "{}. {}: {}", index + 1, entry.status, entry.description)?;
    }
    Ok(())
  }
}

fn push_top(stack: &mut Vec<Entry>, entry: Entry) -> &EditCommand {
  stack.push(entry);
  let top = stack.len() - 1;
  &stack[top].command
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::buffer::TextBuffer;

  fn executed(buffer: &Arc<TextBuffer>, position: usize, text: &str) -> EditCommand {
    let mut cmd = EditCommand::insert(buffer, position, text).unwrap();
    cmd.execute().unwrap();
    cmd
  }

  #[test]
  fn undo_redo_moves_between_stacks() {
    let buffer = Arc::new(TextBuffer::new());
    let mut history = HistoryManager::default();
    history.add_command(executed(&buffer, 0, "Hello"));
    history.add_command(executed(&buffer, 5, " World"));

    let undone = history.undo().unwrap();
    assert_eq!(undone.description(), "Insert ' World' at position 5");
    assert_eq!(buffer.text(), "Hello");
    assert_eq!((history.undo_len(), history.redo_len()), (1, 1));

    history.redo().unwrap();
    assert_eq!(buffer.text(), "Hello World");
    assert_eq!((history.undo_len(), history.redo_len()), (2, 0));
  }

  #[test]
  fn empty_stacks_report_empty_history() {
    let mut history = HistoryManager::default();
    assert_eq!(
      history.undo().unwrap_err(),
      HistoryError::EmptyHistory(Direction::Undo)
    );
    assert_eq!(
      history.redo().unwrap_err(),
      HistoryError::EmptyHistory(Direction::Redo)
    );
  }

  #[test]
  fn new_command_invalidates_redo() {
    let buffer = Arc::new(TextBuffer::new());
    let mut history = HistoryManager::default();
    history.add_command(executed(&buffer, 0, "a"));
    history.undo().unwrap();
    assert!(history.can_redo());

    history.add_command(executed(&buffer, 0, "b"));
    assert!(!history.can_redo());
    assert!(matches!(
      history.redo(),
      Err(HistoryError::EmptyHistory(Direction::Redo))
    ));
    assert_eq!(buffer.text(), "b");
  }

  #[test]
  fn audit_log_is_capped_oldest_first() {
    let buffer = Arc::new(TextBuffer::new());
    let mut history = HistoryManager::with_limit(3);
    for n in 0..5 {
      history.add_command(executed(&buffer, 0, &n.to_string()));
    }
    assert_eq!(history.audit_len(), 3);
    assert_eq!(history.undo_len(), 5);

    let first = history.audit_log().next().unwrap();
    assert_eq!(first.description, "Insert '2' at position 0");
  }

  #[test]
  fn display_numbers_entries() {
    let buffer = Arc::new(TextBuffer::new());
    let mut history = HistoryManager::default();
    assert_eq!(history.to_string(), "No commands executed.");

    history.add_command(executed(&buffer, 0, "Hi"));
    history.undo().unwrap();
    history.redo().unwrap();
    assert_eq!(
      history.to_string(),
      "1. Executed: Insert 'Hi' at position 0\n2. Undone: Insert 'Hi' at position \
       0\n3. Redone: Insert 'Hi' at position 0"
    );
  }

  #[test]
  fn failed_attempt_supersedes_redo() {
    let buffer = Arc::new(TextBuffer::new());
    let mut history = HistoryManager::default();
    history.add_command(executed(&buffer, 0, "a"));
    history.undo().unwrap();

    let mut failed = EditCommand::delete(&buffer, 9, 1).unwrap();
    assert!(failed.execute().is_err());
    history.add_command(failed);
    assert!(!history.can_redo());
    assert_eq!(history.undo_len(), 1);
    assert_eq!(
      history.audit_log().last().map(|entry| entry.status),
      Some(CommandStatus::Executed)
    );
  }

  #[test]
  fn failed_attempt_undoes_and_redoes_as_no_op() {
    let buffer = Arc::new(TextBuffer::new());
    let mut history = HistoryManager::default();
    history.add_command(executed(&buffer, 0, "a"));
    let mut failed = EditCommand::insert(&buffer, 9, "x").unwrap();
    assert!(failed.execute().is_err());
    history.add_command(failed);

    history.undo().unwrap();
    assert_eq!(buffer.text(), "a");
    history.redo().unwrap();
    assert_eq!(buffer.text(), "a");

    history.undo().unwrap();
    history.undo().unwrap();
    assert_eq!(buffer.text(), "");
    assert_eq!(history.redo_len(), 2);
  }

  #[test]
  fn clear_empties_everything() {
    let buffer = Arc::new(TextBuffer::new());
    let mut history = HistoryManager::default();
    history.add_command(executed(&buffer, 0, "a"));
    history.add_command(executed(&buffer, 0, "b"));
    history.undo().unwrap();

    history.clear();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.audit_len(), 0);
  }
}
