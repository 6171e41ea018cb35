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
pub struct InsertCommand {
  buffer:   Arc<TextBuffer>,
  position: usize,
  text:     Tendril,
  before:   Option<Snapshot>,
}

impl InsertCommand {
  pub fn new(buffer: Arc<TextBuffer>, position: usize, text: impl Into<Tendril>) -> Result<Self> {
    let text = text.into();
    require_text("text", &text)?;
    Ok(Self {
      buffer,
      position,
      text,
      before: None,
    })
  }

  pub fn position(&self) -> usize {
    self.position
  }

  pub fn text(&self) -> &str {
    &self.text
  }
}

impl Command for InsertCommand {
  fn execute(&mut self) -> Result<()> {
    let before = self
      .buffer
      .transact(|text| buffer::insert(text, self.position, &self.text))?;
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
      "Insert '{}' at position {}",
      self.text, self.position
    ))
  }
}
