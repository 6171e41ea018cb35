//! Immutable point-in-time copies of buffer content.
//!
//! A [`Snapshot`] is taken by [`TextBuffer::create_snapshot`] (or implicitly
//! by commands right before they mutate) and handed back to
//! [`TextBuffer::restore_snapshot`] to replace the whole buffer content.
//! Cloning the underlying [`Rope`] is cheap, so snapshots share structure
//! with the buffer they were taken from.
//!
//! [`TextBuffer::create_snapshot`]: crate::buffer::TextBuffer::create_snapshot
//! [`TextBuffer::restore_snapshot`]: crate::buffer::TextBuffer::restore_snapshot

use std::{
  collections::BTreeMap,
  fmt,
  num::NonZeroU64,
  sync::atomic::{
    AtomicU64,
    Ordering,
  },
};

use chrono::{
  DateTime,
  Utc,
};
use ropey::Rope;

use crate::buffer::BufferId;

/// Version of the in-memory snapshot layout.
pub const SNAPSHOT_FORMAT_VERSION: &str = "1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotId(NonZeroU64);

impl SnapshotId {
  fn next() -> Self {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    let id = NEXT.fetch_add(1, Ordering::Relaxed);
    Self(NonZeroU64::new(id).unwrap_or(NonZeroU64::MIN))
  }
}

impl fmt::Display for SnapshotId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

#[derive(Debug, Clone)]
pub struct Snapshot {
  id:         SnapshotId,
  origin:     BufferId,
  created_at: DateTime<Utc>,
  content:    Rope,
  metadata:   BTreeMap<String, String>,
}

impl Snapshot {
  pub(crate) fn capture(origin: BufferId, content: Rope) -> Self {
    Self {
      id: SnapshotId::next(),
      origin,
      created_at: Utc::now(),
      content,
      metadata: BTreeMap::new(),
    }
  }

  /// Attaches a metadata entry, returning the extended snapshot.
  pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.metadata.insert(key.into(), value.into());
    self
  }

  pub fn id(&self) -> SnapshotId {
    self.id
  }

  /// The buffer this snapshot was taken from.
  pub fn origin(&self) -> BufferId {
    self.origin
  }

  pub fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  pub fn version(&self) -> &'static str {
    SNAPSHOT_FORMAT_VERSION
  }

  pub fn content(&self) -> &Rope {
    &self.content
  }

  pub fn text(&self) -> String {
    self.content.to_string()
  }

  /// Length of the captured content in chars.
  pub fn len(&self) -> usize {
    self.content.len_chars()
  }

  pub fn is_empty(&self) -> bool {
    self.content.len_chars() == 0
  }

  pub fn metadata(&self) -> &BTreeMap<String, String> {
    &self.metadata
  }

  pub fn metadata_value(&self, key: &str) -> Option<&str> {
    self.metadata.get(key).map(String::as_str)
  }
}
