//! The published active-route store.
//!
//! A single-writer observable wrapping the latest [`ActiveRouteState`]
//! snapshot. The engine is the only writer; consumers hold read access and
//! only ever observe the latest published snapshot. The store is created at
//! construction and never destroyed during the session, its contents only
//! replaced.

use leptos::prelude::*;

use crate::models::ActiveRouteState;

/// Read handle to the published active-route state.
///
/// `Copy` because the backing storage is a Leptos signal.
#[derive(Clone, Copy)]
pub struct ActiveRoute {
    state: RwSignal<ActiveRouteState>,
}

impl ActiveRoute {
    pub(crate) fn new() -> Self {
        Self {
            state: RwSignal::new(ActiveRouteState::default()),
        }
    }

    /// Current snapshot, tracked reactively.
    pub fn get(&self) -> ActiveRouteState {
        self.state.get()
    }

    /// Current snapshot without subscribing to changes.
    pub fn get_untracked(&self) -> ActiveRouteState {
        self.state.get_untracked()
    }

    /// Read-only signal for reactive consumers.
    pub fn read(&self) -> ReadSignal<ActiveRouteState> {
        self.state.read_only()
    }

    /// Atomically replace the snapshot. Engine-only.
    pub(crate) fn publish(&self, next: ActiveRouteState) {
        self.state.set(next);
    }
}
