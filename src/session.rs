//! Simple in-memory storage for quiz sessions.
//!
//! Holds one QuizMachine per viewer, keyed by viewer ID (from cookie).
//! Entries auto-expire after a configurable duration of inactivity.

use crate::config;
use crate::quiz::QuizMachine;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Session entry with last access time for expiration
struct SessionEntry {
  machine: QuizMachine,
  last_access: DateTime<Utc>,
}

/// Viewer ID -> quiz state machine.
///
/// Machines are only touched inside `with_machine`, under the lock. Callers
/// must not hold the lock across a network fetch; stale fetch results are
/// rejected by the machine's epochs instead.
pub struct QuizSessionStore {
  sessions: Mutex<HashMap<String, SessionEntry>>,
  expiry: Duration,
}

impl Default for QuizSessionStore {
  fn default() -> Self {
    Self::new()
  }
}

impl QuizSessionStore {
  pub fn new() -> Self {
    Self::with_expiry(Duration::hours(config::SESSION_EXPIRY_HOURS))
  }

  pub fn with_expiry(expiry: Duration) -> Self {
    Self {
      sessions: Mutex::new(HashMap::new()),
      expiry,
    }
  }

  // A panic mid-update leaves the map structurally intact
  fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionEntry>> {
    self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Run `f` against the viewer's machine, creating an idle one if needed.
  pub fn with_machine<R>(&self, viewer_id: &str, f: impl FnOnce(&mut QuizMachine) -> R) -> R {
    let mut sessions = self.lock();

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      cleanup_expired(&mut sessions, self.expiry);
    }

    let entry = sessions
      .entry(viewer_id.to_string())
      .or_insert_with(|| SessionEntry {
        machine: QuizMachine::new(),
        last_access: Utc::now(),
      });
    entry.last_access = Utc::now();
    f(&mut entry.machine)
  }

}

/// Clean up expired sessions, returning how many were removed
fn cleanup_expired(sessions: &mut HashMap<String, SessionEntry>, expiry: Duration) -> usize {
  let cutoff = Utc::now() - expiry;
  let before = sessions.len();
  sessions.retain(|_, entry| entry.last_access > cutoff);
  let removed = before - sessions.len();
  if removed > 0 {
    tracing::debug!("Expired {} idle quiz sessions, {} remain", removed, sessions.len());
  }
  removed
}

/// Length of a viewer ID
pub const SESSION_ID_LEN: usize = 32;

/// Generate a new viewer ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..SESSION_ID_LEN)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}

/// True for strings `generate_session_id` could have produced
pub fn is_valid_session_id(id: &str) -> bool {
  id.len() == SESSION_ID_LEN && id.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
}
