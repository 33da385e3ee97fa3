//! Snapshot-based undo/redo over a page's scene.
//!
//! The manager holds a linear sequence of full-scene snapshots and a cursor.
//! While a restore is in flight the manager is in [`HistoryState::Restoring`]
//! and every `capture` is ignored; without that guard the mutations replayed
//! by a restore would be re-captured and corrupt the timeline.

use crate::scene::SceneSnapshot;

/// Maximum number of retained snapshots.
pub const HISTORY_CAP: usize = 50;

/// Manager lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryState {
    #[default]
    Idle,
    /// An undo/redo is replaying a snapshot; captures are ignored.
    Restoring,
}

/// Linear undo/redo history with a bounded snapshot sequence.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: Vec<SceneSnapshot>,
    cursor: usize,
    state: HistoryState,
    cap: usize,
}

impl HistoryManager {
    /// Seed the history with the initial scene snapshot.
    pub fn new(initial: SceneSnapshot) -> Self {
        Self::with_cap(initial, HISTORY_CAP)
    }

    /// Seed with a custom cap (must be at least 1).
    pub fn with_cap(initial: SceneSnapshot, cap: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            state: HistoryState::Idle,
            cap: cap.max(1),
        }
    }

    pub fn state(&self) -> HistoryState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Snapshot at an index (oldest first).
    pub fn entry(&self, index: usize) -> Option<&SceneSnapshot> {
        self.entries.get(index)
    }

    /// The snapshot the live scene currently corresponds to.
    pub fn current(&self) -> &SceneSnapshot {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Record a committed mutation.
    ///
    /// Ignored (returns `false`) while restoring. Otherwise truncates any
    /// redo tail, appends, advances the cursor, and evicts the oldest entry
    /// when the cap is exceeded.
    pub fn capture(&mut self, snapshot: SceneSnapshot) -> bool {
        if self.state == HistoryState::Restoring {
            log::debug!("history: capture ignored during restore");
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;
        if self.entries.len() > self.cap {
            self.entries.remove(0);
            self.cursor -= 1;
        }
        true
    }

    /// Step the cursor back and enter [`HistoryState::Restoring`].
    ///
    /// Returns the snapshot to replay, or `None` at the start of history (a
    /// no-op, never an error). The caller applies the snapshot to the live
    /// scene, lets any resulting notifications run (they are ignored), then
    /// calls [`HistoryManager::finish_restore`].
    pub fn begin_undo(&mut self) -> Option<SceneSnapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.state = HistoryState::Restoring;
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step the cursor forward and enter [`HistoryState::Restoring`].
    ///
    /// Returns the snapshot to replay, or `None` at the end of history.
    pub fn begin_redo(&mut self) -> Option<SceneSnapshot> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.state = HistoryState::Restoring;
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Leave [`HistoryState::Restoring`]; captures apply again.
    pub fn finish_restore(&mut self) {
        self.state = HistoryState::Idle;
    }
}
