//! Long-polling position tracking.
//!
//! `GET /updates` returns a `marker` with every batch; passing it back on the
//! next poll acknowledges everything received so far. [`UpdateCursor`] keeps
//! that marker and builds the next [`GetUpdates`] call. It owns no connection
//! and runs no loop: callers drive it with whatever transport they use.

use max_types::{Update, UpdateList, UpdateType};

use crate::calls::GetUpdates;

/// Outcome of comparing a received marker with the stored one.
#[derive(Debug, PartialEq, Eq)]
pub enum MarkerCheck {
    /// First marker, or a newer one; store it.
    Advanced,
    /// Same marker (or none sent); nothing to store.
    Unchanged,
    /// Older than the stored marker; a stale or replayed response.
    Stale { current: i64, got: i64 },
}

/// Tracks the long-poll marker and poll settings.
#[derive(Clone, Debug, Default)]
pub struct UpdateCursor {
    marker:      Option<i64>,
    pub limit:   Option<u32>,
    pub timeout: Option<u32>,
    pub types:   Vec<UpdateType>,
}

impl UpdateCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a marker saved earlier.
    pub fn from_marker(marker: i64) -> Self {
        Self { marker: Some(marker), ..Self::default() }
    }

    /// Only poll for these kinds.
    pub fn with_types(mut self, types: impl IntoIterator<Item = UpdateType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    pub fn marker(&self) -> Option<i64> {
        self.marker
    }

    /// The call to issue next.
    pub fn next_call(&self) -> GetUpdates {
        let mut call = GetUpdates { types: self.types.clone(), ..GetUpdates::default() };
        if let Some(limit) = self.limit {
            call = call.limit(limit);
        }
        if let Some(timeout) = self.timeout {
            call = call.timeout(timeout);
        }
        call.marker(self.marker)
    }

    pub fn check_marker(&self, got: Option<i64>) -> MarkerCheck {
        match (self.marker, got) {
            (_, None) => MarkerCheck::Unchanged,
            (None, Some(_)) => MarkerCheck::Advanced,
            (Some(current), Some(got)) if got > current => MarkerCheck::Advanced,
            (Some(current), Some(got)) if got == current => MarkerCheck::Unchanged,
            (Some(current), Some(got)) => MarkerCheck::Stale { current, got },
        }
    }

    /// Record the batch's marker and hand back its updates.
    ///
    /// The marker never moves backwards; a stale batch is still returned,
    /// since its updates were delivered either way.
    pub fn advance(&mut self, batch: UpdateList) -> Vec<Update> {
        match self.check_marker(batch.marker) {
            MarkerCheck::Advanced => self.marker = batch.marker,
            MarkerCheck::Unchanged => {}
            MarkerCheck::Stale { current, got } => {
                tracing::warn!("[max] stale updates marker: have {current}, got {got}; keeping {current}");
            }
        }
        tracing::debug!("[max] {} updates received (marker={:?})", batch.updates.len(), self.marker);
        batch.updates
    }
}
