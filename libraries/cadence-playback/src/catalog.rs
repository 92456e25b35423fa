//! Track catalog
//!
//! Authoritative store of track metadata, keyed by [`TrackId`].

use crate::types::{Track, TrackId};
use std::collections::{HashMap, HashSet};

/// Mapping from track ID to track metadata
#[derive(Debug, Clone, Default)]
pub struct TrackCatalog {
    tracks: HashMap<TrackId, Track>,
}

impl TrackCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a track by ID
    pub fn put(&mut self, track: Track) {
        self.tracks.insert(track.id, track);
    }

    /// Look up a track
    ///
    /// `None` is an expected outcome (e.g. an entry evicted by a playlist change).
    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.contains_key(&id)
    }

    /// Drop every entry whose ID is not in `keep`
    ///
    /// Returns the number of evicted entries.
    pub fn retain_only(&mut self, keep: &HashSet<TrackId>) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|id, _| keep.contains(id));
        before - self.tracks.len()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
