//! Navigation engine
//!
//! Resolves every navigation command into a single "make this track current"
//! instruction, keeping the playlist cursor and the history replay cursor
//! independent:
//!
//! - Next/Previous/Jump are *structural* moves driven by the playlist. At the
//!   live edge they log the track being left; mid-replay they discard the
//!   abandoned forward branch instead.
//! - Backward/Forward are *replay* moves driven by the history cursor and
//!   never log anything. Forward without forward history falls back to an
//!   ordinary Next.
//!
//! The playlist cursor itself is synchronized by the manager once the target
//! actually becomes current (see `PlaybackManager`).

use crate::catalog::TrackCatalog;
use crate::history::History;
use crate::playlist::Playlist;
use crate::types::{Track, TrackId};
use std::collections::HashSet;
use tracing::debug;

/// Navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Next playlist entry
    Next,

    /// Previous playlist entry
    Previous,

    /// Step forward through history, else Next
    Forward,

    /// Step back through history
    Backward,

    /// Play a specific track
    Jump(TrackId),
}

/// How a target was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Structural,
    Replay,
}

/// Resolved navigation: the track to make current
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub target: TrackId,
    pub kind: MoveKind,
}

/// Catalog, playlist and history, navigated together
#[derive(Debug, Clone, Default)]
pub struct NavigationEngine {
    catalog: TrackCatalog,
    playlist: Playlist,
    history: History,

    /// Playlist index of the last Next/Previous target, consumed on sync
    pending_index: Option<usize>,
}

impl NavigationEngine {
    pub fn new(history_size: usize) -> Self {
        Self {
            catalog: TrackCatalog::new(),
            playlist: Playlist::new(),
            history: History::new(history_size),
            pending_index: None,
        }
    }

    /// Resolve a navigation request from the `current` track
    ///
    /// Returns `None` when there is nowhere to go; nothing is mutated then.
    pub fn resolve(
        &mut self,
        navigation: Navigation,
        current: Option<TrackId>,
    ) -> Option<Resolution> {
        self.pending_index = None;

        let resolution = match navigation {
            Navigation::Next => self.step(self.playlist.next_index(), current),
            Navigation::Previous => self.step(self.playlist.prev_index(), current),
            Navigation::Jump(id) => Some(self.structural(id, current)),
            Navigation::Backward => self.history.step_back(current).map(Resolution::replay),
            Navigation::Forward => match self.history.step_forward() {
                Some(target) => Some(Resolution::replay(target)),
                None => self.step(self.playlist.next_index(), current),
            },
        };

        debug!(
            ?navigation,
            ?current,
            ?resolution,
            history_len = self.history.len(),
            history_cursor = ?self.history.cursor(),
            "Resolved navigation"
        );

        resolution
    }

    /// Install a new playlist
    ///
    /// History is cleared (old entries are no longer navigable) and catalog
    /// entries unreachable from the new playlist or `current` are evicted.
    /// Returns the number of evicted catalog entries.
    pub fn install_playlist(&mut self, tracks: Vec<Track>, current: Option<TrackId>) -> usize {
        self.history.clear();
        self.playlist.set_tracks(&mut self.catalog, tracks, current);

        let mut keep: HashSet<TrackId> = self.playlist.ids().iter().copied().collect();
        keep.extend(current);
        self.catalog.retain_only(&keep)
    }

    /// Append a track to the playlist
    pub fn add_track(&mut self, track: Track, current: Option<TrackId>) {
        self.playlist.push(&mut self.catalog, track, current);
    }

    /// Register a track that may not be part of the playlist
    pub fn register(&mut self, track: Track) {
        self.catalog.put(track);
    }

    /// Synchronize the playlist cursor with a new current track
    ///
    /// A Next/Previous target lands on the exact index it was resolved from;
    /// anything else moves to the nearest occurrence of `current`.
    pub fn sync_playlist(&mut self, current: TrackId) {
        match self.pending_index.take() {
            Some(index) if self.playlist.ids().get(index) == Some(&current) => {
                self.playlist.select(index);
            }
            _ => self.playlist.advance_to(current),
        }
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.catalog.get(id)
    }

    pub fn catalog(&self) -> &TrackCatalog {
        &self.catalog
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn step(&mut self, index: Option<usize>, current: Option<TrackId>) -> Option<Resolution> {
        let index = index?;
        let target = *self.playlist.ids().get(index)?;
        self.pending_index = Some(index);
        Some(self.structural(target, current))
    }

    fn structural(&mut self, target: TrackId, current: Option<TrackId>) -> Resolution {
        if self.history.is_replaying() {
            // The replayed track becomes the top of the log
            self.history.drop_future();
        } else if let Some(current) = current {
            self.history.push(current);
        }

        Resolution {
            target,
            kind: MoveKind::Structural,
        }
    }
}

impl Resolution {
    fn replay(target: TrackId) -> Self {
        Self {
            target,
            kind: MoveKind::Replay,
        }
    }
}
