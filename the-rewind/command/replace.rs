use std::{
  borrow::Cow,
  sync::Arc,
};

use super::{
  Command,
  Result,
  not_executed,
  require_text,
  rewind,
};
use crate::{
  Tendril,
  buffer::{
    self,
    TextBuffer,
  },
  snapshot::Snapshot,
};

#[derive(Debug)]
pub struct ReplaceCommand {
  buffer:   Arc<TextBuffer>,
  position: usize,
  length:   usize,
  text:     Tendril,
  before:   Option<Snapshot>,
}

impl ReplaceCommand {
  pub fn new(
    buffer: Arc<TextBuffer>,
    position: usize,
    length: usize,
    text: impl Into<Tendril>,
  ) -> Result<Self> {
    let text = text.into();
    require_text("text", &text)?;
    Ok(Self {
      buffer,
      position,
      length,
      text,
      before: None,
    })
  }

  pub fn position(&self) -> usize {
    self.position
  }

  pub fn length(&self) -> usize {
    self.length
  }

  pub fn text(&self) -> &str {
    &self.text
  }
}

impl Command for ReplaceCommand {
  fn execute(&mut self) -> Result<()> {
    let before = self.buffer.transact(|text| {
      buffer::replace(text, self.position, self.length, &self.text)
    })?;
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
      "Replace {} characters at position {} with '{}'",
      self.length, self.position, self.text
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::command::CommandError;

  #[test]
  fn execute_and_undo() {
    let buffer = Arc::new(TextBuffer::from_text("Hello World"));
    let mut cmd = ReplaceCommand::new(Arc::clone(&buffer), 0, 5, "Hi").unwrap();

    cmd.execute().unwrap();
    assert_eq!(buffer.text(), "Hi World");

    cmd.undo().unwrap();
    assert_eq!(buffer.text(), "Hello World");
  }

  #[test]
  fn longer_replacement_undoes_exactly() {
    let buffer = Arc::new(TextBuffer::from_text("a-b"));
    let mut cmd = ReplaceCommand::new(Arc::clone(&buffer), 1, 1, " and ").unwrap();
    cmd.execute().unwrap();
    assert_eq!(buffer.text(), "a and b");
    cmd.undo().unwrap();
    assert_eq!(buffer.text(), "a-b");
  }

  #[test]
  fn empty_replacement_is_rejected() {
    let buffer = Arc::new(TextBuffer::from_text("abc"));
    assert!(matches!(
      ReplaceCommand::new(buffer, 0, 1, ""),
      Err(CommandError::InvalidArgument { .. })
    ));
  }

  #[test]
  fn failed_delete_step_inserts_nothing() {
    let buffer = Arc::new(TextBuffer::from_text("abc"));
    let mut cmd = ReplaceCommand::new(Arc::clone(&buffer), 3, 1, "x").unwrap();
    assert!(cmd.execute().is_err());
    assert_eq!(buffer.text(), "abc");
  }
}
