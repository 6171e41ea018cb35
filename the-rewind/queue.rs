//! FIFO staging area for commands executed later in a batch.

use std::collections::VecDeque;

use crate::command::{
  Command,
  EditCommand,
};

#[derive(Debug, Default)]
pub struct CommandQueue {
  pending: VecDeque<EditCommand>,
}

impl CommandQueue {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn enqueue(&mut self, command: EditCommand) {
    tracing::trace!(command = %command.description(), "queued command");
    self.pending.push_back(command);
  }

  /// The oldest pending command, or `None` once the queue is drained.
  pub fn dequeue(&mut self) -> Option<EditCommand> {
    self.pending.pop_front()
  }

  pub fn len(&self) -> usize {
    self.pending.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pending.is_empty()
  }

  pub fn clear(&mut self) {
    self.pending.clear();
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::buffer::TextBuffer;

  #[test]
  fn dequeues_in_enqueue_order() {
    let buffer = Arc::new(TextBuffer::new());
    let mut queue = CommandQueue::new();
    for text in ["a", "b", "c"] {
      queue.enqueue(EditCommand::insert(&buffer, 0, text).unwrap());
    }
    assert_eq!(queue.len(), 3);

    let order: Vec<_> = std::iter::from_fn(|| queue.dequeue())
      .map(|cmd| cmd.to_string())
      .collect();
    assert_eq!(order, [
      "Insert 'a' at position 0",
      "Insert 'b' at position 0",
      "Insert 'c' at position 0",
    ]);
    assert!(queue.dequeue().is_none());
  }

  #[test]
  fn clear_drops_pending() {
    let buffer = Arc::new(TextBuffer::new());
    let mut queue = CommandQueue::new();
    queue.enqueue(EditCommand::cure_text(&buffer));
    queue.clear();
    assert!(queue.is_empty());
  }
}
