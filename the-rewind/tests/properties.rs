use quickcheck::quickcheck;
use the_rewind::{
  config::SessionConfig,
  session::Session,
};

/// Applies an arbitrary edit derived from the raw inputs, clamping positions
/// to the current content so a good share of the edits succeed.
fn apply(session: &mut Session, kind: u8, position: usize, length: usize, text: &str) {
  let position = position % (session.len() + 1);
  let length = length % 8;
  let _ = match kind % 3 {
    0 => session.insert(position, text),
    1 => session.delete(position, length),
    _ => session.replace(position, length, text),
  };
}

quickcheck! {
  fn full_rewind_restores_initial_content(
    initial: String,
    edits: Vec<(u8, usize, usize, String)>
  ) -> bool {
    let mut session = Session::default();
    if !initial.is_empty() {
      session.insert(0, initial.as_str()).unwrap();
    }
    let start = session.content();
    let depth = session.operator().history().undo_len();

    for (kind, position, length, text) in &edits {
      apply(&mut session, *kind, *position, *length, text);
    }
    let end = session.content();
    let applied = session.operator().history().undo_len() - depth;

    for _ in 0..applied {
      session.undo().unwrap();
    }
    let rewound = session.content() == start;

    for _ in 0..applied {
      session.redo().unwrap();
    }
    rewound && session.content() == end
  }

  fn audit_log_never_exceeds_limit(limit: u8, inserts: u8) -> bool {
    let limit = usize::from(limit % 30) + 1;
    let mut session = Session::new(&SessionConfig { history_limit: limit });
    for n in 0..inserts {
      session.insert(0, n.to_string()).unwrap();
    }
    let audited = session.operator().history().audit_len();
    audited <= limit && audited == usize::from(inserts).min(limit)
  }
}
