//! Shared, internally synchronized text storage.
//!
//! Positions and lengths are counted in `char`s. Every operation holds the
//! buffer lock for its whole duration, so no caller can observe an edit from
//! another caller that is only partly applied.

use std::{
  fmt,
  num::NonZeroU64,
  sync::atomic::{
    AtomicU64,
    Ordering,
  },
};

use parking_lot::Mutex;
use ropey::Rope;
use thiserror::Error;

use crate::snapshot::{
  Snapshot,
  SnapshotId,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
  #[error("position {position} with length {length} is out of range (buffer length: {len})")]
  OutOfRange {
    position: usize,
    length:   usize,
    len:      usize,
  },
  #[error("snapshot {snapshot} belongs to buffer {origin}, not buffer {target}")]
  InvalidSnapshot {
    snapshot: SnapshotId,
    origin:   BufferId,
    target:   BufferId,
  },
}

pub type Result<T> = std::result::Result<T, BufferError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(NonZeroU64);

impl BufferId {
  fn next() -> Self {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    let id = NEXT.fetch_add(1, Ordering::Relaxed);
    Self(NonZeroU64::new(id).unwrap_or(NonZeroU64::MIN))
  }

}

impl fmt::Display for BufferId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// The mutable character sequence edited by commands.
///
/// A buffer is usually shared behind an [`Arc`](std::sync::Arc) between a
/// session and the commands it creates; it outlives all of them.
#[derive(Debug)]
pub struct TextBuffer {
  id:   BufferId,
  text: Mutex<Rope>,
}

impl Default for TextBuffer {
  fn default() -> Self {
    Self::new()
  }
}

impl TextBuffer {
  pub fn new() -> Self {
    Self::from_text("")
  }

  pub fn from_text(text: &str) -> Self {
    Self {
      id:   BufferId::next(),
      text: Mutex::new(Rope::from_str(text)),
    }
  }

  pub fn id(&self) -> BufferId {
    self.id
  }

  pub fn len(&self) -> usize {
    self.text.lock().len_chars()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// The whole content. Empty buffers yield an empty string.
  pub fn text(&self) -> String {
    self.text.lock().to_string()
  }

  /// Splices `text` in at `position`, which may equal the current length.
  pub fn insert_text(&self, position: usize, text: &str) -> Result<()> {
    insert(&mut self.text.lock(), position, text)
  }

  /// Removes up to `length` chars starting at `position`.
  ///
  /// A span running past the end is clamped to the end of the buffer.
  pub fn delete_text(&self, position: usize, length: usize) -> Result<()> {
    delete(&mut self.text.lock(), position, length)
  }

  /// Deletes then inserts at the same position. Nothing is inserted if the
  /// delete step is rejected.
  pub fn replace_text(&self, position: usize, length: usize, new_text: &str) -> Result<()> {
    replace(&mut self.text.lock(), position, length, new_text)
  }

  /// Reads up to `length` chars starting at `position`, clamped like
  /// [`delete_text`](Self::delete_text). A zero `length` reads nothing.
  pub fn get_text(&self, position: usize, length: usize) -> Result<String> {
    let text = self.text.lock();
    let len = text.len_chars();
    if position >= len {
      return Err(BufferError::OutOfRange {
        position,
        length,
        len,
      });
    }
    let end = position.saturating_add(length).min(len);
    Ok(text.slice(position..end).to_string())
  }

  pub fn clear(&self) {
    *self.text.lock() = Rope::new();
  }

  pub fn create_snapshot(&self) -> Snapshot {
    Snapshot::capture(self.id, self.text.lock().clone())
  }

  /// Replaces the whole content with the snapshot's content.
  pub fn restore_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
    if snapshot.origin() != self.id {
      return Err(BufferError::InvalidSnapshot {
        snapshot: snapshot.id(),
        origin:   snapshot.origin(),
        target:   self.id,
      });
    }
    *self.text.lock() = snapshot.content().clone();
    Ok(())
  }

  /// Runs `edit` under a single lock acquisition and returns the state the
  /// buffer had right before it.
  ///
  /// When `edit` fails the buffer is put back to that state, so a failed edit
  /// is never visible to other callers.
  pub(crate) fn transact<F>(&self, edit: F) -> Result<Snapshot>
  where
    F: FnOnce(&mut Rope) -> Result<()>,
  {
    let mut text = self.text.lock();
    let before = Snapshot::capture(self.id, text.clone());
    if let Err(err) = edit(&mut *text) {
      *text = before.content().clone();
      return Err(err);
    }
    Ok(before)
  }
}

pub(crate) fn insert(text: &mut Rope, position: usize, new_text: &str) -> Result<()> {
  let len = text.len_chars();
  if position > len {
    return Err(BufferError::OutOfRange {
      position,
      length: new_text.chars().count(),
      len,
    });
  }
  text.insert(position, new_text);
  Ok(())
}

pub(crate) fn delete(text: &mut Rope, position: usize, length: usize) -> Result<()> {
  let len = text.len_chars();
  if position >= len || length == 0 {
    return Err(BufferError::OutOfRange {
      position,
      length,
      len,
    });
  }
  let end = position.saturating_add(length).min(len);
  text.remove(position..end);
  Ok(())
}

pub(crate) fn replace(
  text: &mut Rope,
  position: usize,
  length: usize,
  new_text: &str,
) -> Result<()> {
  delete(text, position, length)?;
  // `position < len` held before the delete, so it is at most the new length.
  insert(text, position, new_text)
}
