use std::{
  borrow::Cow,
  sync::Arc,
};

use super::{
  Command,
  Result,
  not_executed,
  rewind,
};
use crate::{
  buffer::{
    self,
    TextBuffer,
  },
  snapshot::Snapshot,
};

#[derive(Debug)]
pub struct DeleteCommand {
  buffer:   Arc<TextBuffer>,
  position: usize,
  length:   usize,
  before:   Option<Snapshot>,
}

impl DeleteCommand {
  /// A zero `length` is accepted here and rejected by the buffer when the
  /// command runs.
  pub fn new(buffer: Arc<TextBuffer>, position: usize, length: usize) -> Self {
    Self {
      buffer,
      position,
      length,
      before: None,
    }
  }

  pub fn position(&self) -> usize {
    self.position
  }

  pub fn length(&self) -> usize {
    self.length
  }

  /// The text removed by the last execution, if any.
  pub fn deleted_text(&self) -> Option<String> {
    let before = self.before.as_ref()?;
    let content = before.content();
    let end = self
      .position
      .saturating_add(self.length)
      .min(content.len_chars());
    Some(content.slice(self.position..end).to_string())
  }
}

impl Command for DeleteCommand {
  fn execute(&mut self) -> Result<()> {
    let before = self
      .buffer
      .transact(|text| buffer::delete(text, self.position, self.length))?;
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
    Cow::Owned(format!(
      "Delete {} characters at position {}",
      self.length, self.position
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn execute_and_undo() {
    let buffer = Arc::new(TextBuffer::from_text("Hello World"));
    let mut cmd = DeleteCommand::new(Arc::clone(&buffer), 5, 6);

    cmd.execute().unwrap();
    assert_eq!(buffer.text(), "Hello");
    assert_eq!(cmd.deleted_text().as_deref(), Some(" World"));

    cmd.undo().unwrap();
    assert_eq!(buffer.text(), "Hello World");
    assert_eq!(cmd.deleted_text(), None);
  }

  #[test]
  fn span_past_end_is_truncated() {
    let buffer = Arc::new(TextBuffer::from_text("Hi World"));
    let mut cmd = DeleteCommand::new(Arc::clone(&buffer), 2, 60);
    cmd.execute().unwrap();
    assert_eq!(buffer.text(), "Hi");
    assert_eq!(cmd.deleted_text().as_deref(), Some(" World"));
  }

  #[test]
  fn zero_length_fails_at_execution() {
    let buffer = Arc::new(TextBuffer::from_text("abc"));
    let mut cmd = DeleteCommand::new(Arc::clone(&buffer), 0, 0);
    assert!(cmd.execute().is_err());
    assert_eq!(buffer.text(), "abc");
  }
}
