//! Single entry point that executes commands and keeps their history.

use crate::{
  command::{
    self,
    Command,
    EditCommand,
  },
  history::{
    self,
    HistoryManager,
  },
  queue::CommandQueue,
};

/// Executes commands, records them, and drains the staging queue.
///
/// Every execution attempt is recorded in the history, including failed ones.
#[derive(Debug, Default)]
pub struct CommandOperator {
  history: HistoryManager,
  queue:   CommandQueue,
}

impl CommandOperator {
  pub fn new(history: HistoryManager, queue: CommandQueue) -> Self {
    Self { history, queue }
  }

  pub fn with_history_limit(limit: usize) -> Self {
    Self::new(HistoryManager::with_limit(limit), CommandQueue::new())
  }

  pub fn history(&self) -> &HistoryManager {
    &self.history
  }

  pub fn queue(&self) -> &CommandQueue {
    &self.queue
  }

  pub fn execute_command(&mut self, mut command: EditCommand) -> command::Result<()> {
    let result = command.execute();
    match &result {
      Ok(()) => tracing::debug!(command = %command, "executed command"),
      Err(err) => tracing::warn!(command = %command, %err, "command failed"),
    }
    self.history.add_command(command);
    result
  }

  pub fn queue_command(&mut self, command: EditCommand) {
    self.queue.enqueue(command);
  }

  /// Executes queued commands front to back and returns how many succeeded.
  ///
  /// The first failure stops the run; commands queued after it stay queued.
  pub fn execute_queued_commands(&mut self) -> command::Result<usize> {
    let mut executed = 0;
    while let Some(command) = self.queue.dequeue() {
      if let Err(err) = self.execute_command(command) {
        tracing::warn!(
          executed,
          remaining = self.queue.len(),
          "stopped executing queued commands"
        );
        return Err(err);
      }
      executed += 1;
    }
    Ok(executed)
  }

  pub fn undo_last_command(&mut self) -> history::Result<&EditCommand> {
    self.history.undo()
  }

  pub fn redo_last_command(&mut self) -> history::Result<&EditCommand> {
    self.history.redo()
  }

  /// The audit log, formatted one numbered entry per line.
  pub fn reveal_history(&self) -> String {
    self.history.to_string()
  }

  pub fn clear_queue(&mut self) {
    self.queue.clear();
  }

  pub fn clear(&mut self) {
    self.history.clear();
    self.clear_queue();
  }
}
