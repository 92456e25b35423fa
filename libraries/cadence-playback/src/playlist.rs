//! Playlist with an index cursor
//!
//! Navigation is index-based and non-destructive: moving through the playlist
//! never reorders or removes entries, it only moves the cursor.

use crate::catalog::TrackCatalog;
use crate::types::{Track, TrackId};

/// Ordered sequence of track IDs plus the current position
///
/// ```text
///   ids:    [ 7 ][ 3 ][ 9 ][ 3 ]
///   cursor:        ^
///   prev_id() = 7, next_id() = 9
/// ```
///
/// Duplicates are allowed. The cursor is either `None` or a valid index.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    ids: Vec<TrackId>,
    cursor: Option<usize>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the sequence
    ///
    /// All tracks are registered in the catalog. The cursor is re-derived by
    /// searching for `current` in the new sequence.
    pub fn set_tracks(
        &mut self,
        catalog: &mut TrackCatalog,
        tracks: Vec<Track>,
        current: Option<TrackId>,
    ) {
        self.ids = tracks.iter().map(|t| t.id).collect();
        for track in tracks {
            catalog.put(track);
        }

        self.cursor = current.and_then(|id| self.ids.iter().position(|&t| t == id));
    }

    /// Append a single track to the end
    ///
    /// Without a cursor, appending the `current` track puts the cursor on it,
    /// as [`Playlist::set_tracks`] would have.
    pub fn push(&mut self, catalog: &mut TrackCatalog, track: Track, current: Option<TrackId>) {
        self.ids.push(track.id);
        if self.cursor.is_none() && current == Some(track.id) {
            self.cursor = Some(self.ids.len() - 1);
        }
        catalog.put(track);
    }

    /// Index after the cursor
    ///
    /// Without a cursor the first entry is returned, so a fresh playlist
    /// starts from the top.
    pub fn next_index(&self) -> Option<usize> {
        let index = self.cursor.map_or(0, |i| i + 1);
        (index < self.ids.len()).then_some(index)
    }

    /// Index before the cursor
    pub fn prev_index(&self) -> Option<usize> {
        self.cursor?.checked_sub(1)
    }

    /// ID after the cursor
    pub fn next_id(&self) -> Option<TrackId> {
        self.next_index().map(|i| self.ids[i])
    }

    /// ID before the cursor
    pub fn prev_id(&self) -> Option<TrackId> {
        self.prev_index().map(|i| self.ids[i])
    }

    /// Put the cursor on an exact index (ignored when out of range)
    pub fn select(&mut self, index: usize) {
        if index < self.ids.len() {
            self.cursor = Some(index);
        }
    }

    /// Move the cursor onto `id`
    ///
    /// If `id` is not in the playlist the cursor is left unchanged, so a jump
    /// to an out-of-playlist track cannot corrupt the playlist position. With
    /// duplicates, the occurrence nearest the current cursor wins (ties go
    /// forward).
    pub fn advance_to(&mut self, id: TrackId) {
        let found = match self.cursor {
            Some(cursor) => self
                .ids
                .iter()
                .enumerate()
                .filter(|&(_, &t)| t == id)
                .map(|(i, _)| i)
                .min_by_key(|&i| (i.abs_diff(cursor), i < cursor)),
            None => self.ids.iter().position(|&t| t == id),
        };

        if let Some(index) = found {
            self.cursor = Some(index);
        }
    }

    pub fn has_next(&self) -> bool {
        self.next_id().is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.prev_id().is_some()
    }

    /// Current cursor position
    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    /// ID under the cursor
    pub fn current_id(&self) -> Option<TrackId> {
        self.cursor.and_then(|i| self.ids.get(i).copied())
    }

    pub fn ids(&self) -> &[TrackId] {
        &self.ids
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
