//! Character substitution over the whole buffer.

use std::{
  borrow::Cow,
  sync::Arc,
};

use ropey::Rope;

use super::{
  Command,
  CommandError,
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

/// Replaces every occurrence of `from` with `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
  pub from: char,
  pub to:   char,
}

impl Substitution {
  pub const fn new(from: char, to: char) -> Self {
    Self { from, to }
  }
}

pub const CURE_TEXT_RULES: [Substitution; 2] = [
  Substitution::new(':', '@'),
  Substitution::new(' ', '_'),
];

/// Applies each [`Substitution`] as its own left-to-right pass.
///
/// Each pass searches the buffer as it stands after the previous single
/// character replacement instead of working from a list of positions found
/// up front. That is only equivalent because a rule always swaps one char
/// for one char: a replacement of a different length would shift every
/// later index.
#[derive(Debug)]
pub struct CureTextCommand {
  buffer:   Arc<TextBuffer>,
  rules:    Vec<Substitution>,
  replaced: usize,
  before:   Option<Snapshot>,
}

impl CureTextCommand {
  pub fn new(buffer: Arc<TextBuffer>) -> Self {
    Self {
      buffer,
      rules: CURE_TEXT_RULES.to_vec(),
      replaced: 0,
      before: None,
    }
  }

  pub fn with_rules(
    buffer: Arc<TextBuffer>,
    rules: impl IntoIterator<Item = Substitution>,
  ) -> Result<Self> {
    let rules: Vec<_> = rules.into_iter().collect();
    if rules.is_empty() {
      return Err(CommandError::InvalidArgument {
        name:   "rules",
        reason: "at least one substitution is required",
      });
    }
    Ok(Self {
      buffer,
      rules,
      replaced: 0,
      before: None,
    })
  }

  pub fn rules(&self) -> &[Substitution] {
    &self.rules
  }

  /// Number of characters replaced by the last execution.
  pub fn replaced(&self) -> usize {
    self.replaced
  }
}

impl Command for CureTextCommand {
  fn execute(&mut self) -> Result<()> {
    let mut replaced = 0;
    let rules = &self.rules;
    let before = self.buffer.transact(|text| {
      for rule in rules {
        replaced += substitute(text, *rule)?;
      }
      Ok(())
    })?;
    tracing::debug!(replaced, "cured text");
    self.replaced = replaced;
    self.before = Some(before);
    Ok(())
  }

  fn undo(&mut self) -> Result<()> {
    rewind(&self.buffer, &mut self.before).unwrap_or_else(|| Err(not_executed(&*self)))?;
    self.replaced = 0;
    Ok(())
  }

  fn is_applied(&self) -> bool {
    self.before.is_some()
  }

  fn description(&self) -> Cow<'_, str> {
    let rules = self
      .rules
      .iter()
      .map(|rule| format!("'{}' with '{}'", rule.from, rule.to))
      .collect::<Vec<_>>()
      .join(" and ");
    Cow::Owned(format!("Cure text (replace {rules})"))
  }
}

fn substitute(text: &mut Rope, rule: Substitution) -> buffer::Result<usize> {
  let mut replacement = [0; 4];
  let replacement = rule.to.encode_utf8(&mut replacement);
  let mut count = 0;
  let mut cursor = 0;
  while let Some(offset) = text.slice(cursor..).chars().position(|c| c == rule.from) {
    let position = cursor + offset;
    buffer::replace(text, position, 1, replacement)?;
    tracing::trace!(position, from = %rule.from, to = %rule.to, "substituted char");
    cursor = position + 1;
    count += 1;
  }
  Ok(count)
}
