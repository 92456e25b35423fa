//! Playback history with a replay cursor
//!
//! Two concerns live here: an append log of visited tracks, and a replay
//! cursor that lets the user step backward and forward through exactly what
//! was visited without touching the log until a structural move happens.
//!
//! The cursor is an offset from the top of the log:
//!
//! ```text
//!   entries (oldest first):  [ 1 ][ 2 ][ 3 ][ 4 ]
//!   offset from top:           3    2    1    0
//!   cursor = None  -> live edge, current track is past the top
//!   cursor = 2     -> replaying track 2
//! ```
//!
//! The track that was live when a replay began is held aside rather than
//! logged, so replaying never evicts anything from a full log.

use crate::types::TrackId;

/// Default maximum number of logged entries
pub const DEFAULT_HISTORY_SIZE: usize = 50;

/// Bounded history log with an independent replay cursor
#[derive(Debug, Clone)]
pub struct History {
    /// Visited tracks (most recent = back)
    entries: Vec<TrackId>,

    /// Replay position as an offset from the top, `None` at the live edge
    cursor: Option<usize>,

    /// Track that was live when the replay began
    live: Option<TrackId>,

    /// Maximum log size
    max_len: usize,
}

impl History {
    /// Create new history with the given maximum size (at least 2)
    pub fn new(max_len: usize) -> Self {
        let max_len = max_len.max(2);
        Self {
            entries: Vec::with_capacity(max_len.min(DEFAULT_HISTORY_SIZE)),
            cursor: None,
            live: None,
            max_len,
        }
    }

    /// Append a visited track
    ///
    /// When the log is full the oldest entry is discarded. Offsets from the
    /// top are unaffected by that.
    pub fn push(&mut self, id: TrackId) {
        if self.entries.len() >= self.max_len {
            self.entries.remove(0);
        }
        self.entries.push(id);
    }

    /// Track `n` steps further back than the replay position
    pub fn peek_back(&self, n: usize) -> Option<TrackId> {
        if n == 0 {
            return self.current();
        }
        let offset = match self.cursor {
            Some(cursor) => cursor + n,
            None => n - 1,
        };
        self.at_offset(offset)
    }

    /// Track `n` steps forward from the replay position
    ///
    /// Always `None` at the live edge. One step past the top of the log is
    /// the track that was live when the replay began.
    pub fn peek_forward(&self, n: usize) -> Option<TrackId> {
        let cursor = self.cursor?;
        match cursor.checked_sub(n) {
            Some(offset) => self.at_offset(offset),
            None if n == cursor + 1 => self.live,
            None => None,
        }
    }

    /// Commit one step back
    ///
    /// Leaving the live edge sets `current` aside so that a later forward
    /// step can return to it.
    pub fn step_back(&mut self, current: Option<TrackId>) -> Option<TrackId> {
        let target = self.peek_back(1)?;

        self.cursor = match self.cursor {
            Some(cursor) => Some(cursor + 1),
            None => {
                self.live = current;
                Some(0)
            }
        };

        Some(target)
    }

    /// Commit one step forward
    ///
    /// Stepping past the top of the log returns to the track set aside by
    /// [`History::step_back`] and leaves the replay.
    pub fn step_forward(&mut self) -> Option<TrackId> {
        let target = self.peek_forward(1)?;

        match self.cursor {
            Some(0) | None => {
                self.cursor = None;
                self.live = None;
            }
            Some(cursor) => self.cursor = Some(cursor - 1),
        }

        Some(target)
    }

    /// Discard the abandoned forward branch
    ///
    /// While replaying, every entry above the replay position is removed
    /// (together with the set-aside live track) and the cursor returns to the
    /// live edge. The replayed track becomes the top of the log. Returns the
    /// number of discarded tracks.
    pub fn drop_future(&mut self) -> usize {
        let Some(cursor) = self.cursor.take() else {
            return 0;
        };

        let keep = self.entries.len() - cursor;
        self.entries.truncate(keep);
        cursor + usize::from(self.live.take().is_some())
    }

    /// Clear log and cursor
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        self.live = None;
    }

    /// Track at the replay position (`None` at the live edge)
    pub fn current(&self) -> Option<TrackId> {
        self.at_offset(self.cursor?)
    }

    /// Replay position as an offset from the top
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Track set aside when the current replay began
    pub fn live(&self) -> Option<TrackId> {
        self.live
    }

    pub fn is_replaying(&self) -> bool {
        self.cursor.is_some()
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[TrackId] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn at_offset(&self, offset: usize) -> Option<TrackId> {
        let index = self.entries.len().checked_sub(offset + 1)?;
        self.entries.get(index).copied()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> TrackId {
        TrackId::new(n)
    }

    fn history_of(ids: &[u64]) -> History {
        let mut history = History::new(10);
        for &n in ids {
            history.push(id(n));
        }
        history
    }

    #[test]
    fn create_history() {
        let history = History::new(10);
        assert_eq!(history.max_len(), 10);
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn minimum_size_is_two() {
        assert_eq!(History::new(0).max_len(), 2);
    }

    #[test]
    fn peek_back_from_live_edge() {
        let history = history_of(&[1, 2, 3]);
        assert_eq!(history.peek_back(1), Some(id(3)));
        assert_eq!(history.peek_back(3), Some(id(1)));
        assert_eq!(history.peek_back(4), None);
        assert_eq!(history.peek_forward(1), None);
    }

    #[test]
    fn history_bounded() {
        let mut history = History::new(3);
        for n in 1..=4 {
            history.push(id(n));
        }

        assert_eq!(history.entries(), &[id(2), id(3), id(4)]);
    }

    #[test]
    fn step_back_records_live_track() {
        let mut history = history_of(&[1, 2]);

        assert_eq!(history.step_back(Some(id(9))), Some(id(2)));
        assert_eq!(history.entries(), &[id(1), id(2)]);
        assert_eq!(history.live(), Some(id(9)));
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.current(), Some(id(2)));
        assert_eq!(history.peek_forward(1), Some(id(9)));

        assert_eq!(history.step_back(Some(id(2))), Some(id(1)));
        assert_eq!(history.cursor(), Some(1));
        assert_eq!(history.peek_forward(2), Some(id(9)));
        assert_eq!(history.step_back(Some(id(1))), None);
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn back_then_forward_restores_log() {
        let mut history = history_of(&[1, 2]);
        let before = history.entries().to_vec();

        history.step_back(Some(id(9)));
        history.step_back(Some(id(2)));
        assert_eq!(history.step_forward(), Some(id(2)));
        assert_eq!(history.step_forward(), Some(id(9)));

        assert_eq!(history.entries(), before.as_slice());
        assert_eq!(history.cursor(), None);
        assert_eq!(history.step_forward(), None);
    }

    #[test]
    fn replay_of_full_log_evicts_nothing() {
        let mut history = History::new(3);
        for n in 2..=4 {
            history.push(id(n));
        }

        assert_eq!(history.step_back(Some(id(5))), Some(id(4)));
        assert_eq!(history.entries(), &[id(2), id(3), id(4)]);

        assert_eq!(history.step_forward(), Some(id(5)));
        assert_eq!(history.entries(), &[id(2), id(3), id(4)]);
        assert_eq!(history.cursor(), None);
        assert_eq!(history.live(), None);
    }

    #[test]
    fn step_back_without_live_track() {
        let mut history = history_of(&[1, 2]);

        assert_eq!(history.step_back(None), Some(id(2)));
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.len(), 2);

        history.step_back(None);
        assert_eq!(history.step_forward(), Some(id(2)));
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.peek_forward(1), None);
    }

    #[test]
    fn drop_future_discards_forward_branch() {
        let mut history = history_of(&[1, 2, 3]);
        history.step_back(Some(id(4)));
        history.step_back(Some(id(3)));
        assert_eq!(history.current(), Some(id(2)));

        let dropped = history.drop_future();
        assert_eq!(dropped, 2);
        assert_eq!(history.entries(), &[id(1), id(2)]);
        assert_eq!(history.cursor(), None);
        assert_eq!(history.live(), None);
    }

    #[test]
    fn drop_future_at_live_edge_is_noop() {
        let mut history = history_of(&[1, 2]);
        assert_eq!(history.drop_future(), 0);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn clear_history() {
        let mut history = history_of(&[1, 2]);
        history.step_back(Some(id(3)));

        history.clear();
        assert!(history.is_empty());
        assert!(!history.is_replaying());
    }

    #[test]
    fn default_history() {
        let history = History::default();
        assert_eq!(history.max_len(), DEFAULT_HISTORY_SIZE);
    }
}
