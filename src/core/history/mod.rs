//! The history abstraction: provider boundary, adapter, confirmation gate.
//!
//! The [`HistoryAdapter`] owns the one active [`HistoryProvider`] for the
//! session and enforces the mode rules on top of it: hash mode never
//! forwards state payloads, and an installed block gate is consulted before
//! every transition.

#[cfg(target_arch = "wasm32")]
mod browser;
mod provider;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;
pub use provider::{HistoryProvider, MemoryHistory};

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::{ConfirmationPrompt, HistoryMode};
use crate::models::{HistoryAction, Location, State};

// =============================================================================
// Block gate
// =============================================================================

/// A navigation-confirmation gate.
pub enum BlockGate {
    /// Fixed message routed through the configured confirmation prompt.
    Message(String),
    /// Caller-supplied predicate consulted with the destination location.
    Custom(Rc<dyn Fn(&Location) -> bool>),
}

impl BlockGate {
    pub fn custom(f: impl Fn(&Location) -> bool + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }
}

impl From<&str> for BlockGate {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<String> for BlockGate {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

type GateSlot = Rc<RefCell<Option<(u64, BlockGate)>>>;

/// Disposer for an installed block gate.
pub struct BlockHandle {
    slot: GateSlot,
    id: u64,
}

impl BlockHandle {
    /// Remove the gate, unless a newer one has replaced it.
    pub fn release(self) {
        let mut slot = self.slot.borrow_mut();
        if matches!(slot.as_ref(), Some((id, _)) if *id == self.id) {
            *slot = None;
        }
    }
}

// =============================================================================
// HistoryAdapter
// =============================================================================

/// Mode-aware wrapper around the active history provider.
pub struct HistoryAdapter {
    provider: RefCell<Box<dyn HistoryProvider>>,
    mode: HistoryMode,
    confirm: ConfirmationPrompt,
    gate: GateSlot,
    gate_seq: Cell<u64>,
}

impl HistoryAdapter {
    pub fn new(
        mode: HistoryMode,
        provider: Box<dyn HistoryProvider>,
        confirm: ConfirmationPrompt,
    ) -> Self {
        Self {
            provider: RefCell::new(provider),
            mode,
            confirm,
            gate: Rc::new(RefCell::new(None)),
            gate_seq: Cell::new(0),
        }
    }

    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    /// Append an entry. Returns `false` when an installed gate refused the
    /// transition (nothing was committed).
    ///
    /// Hash mode does not persist state: the payload is silently dropped
    /// before the provider sees it.
    pub fn push(&self, path: &str, state: Option<State>) -> bool {
        if !self.allowed(path) {
            return false;
        }
        self.provider
            .borrow_mut()
            .push(path, self.state_for_mode(state));
        true
    }

    /// Overwrite the current entry; same gate and mode rules as `push`.
    pub fn replace(&self, path: &str, state: Option<State>) -> bool {
        if !self.allowed(path) {
            return false;
        }
        self.provider
            .borrow_mut()
            .replace(path, self.state_for_mode(state));
        true
    }

    /// Move the history pointer by `n` entries.
    pub fn go(&self, n: i32) -> bool {
        let current = self.location().full_path();
        if !self.allowed(&current) {
            return false;
        }
        self.provider.borrow_mut().go(n);
        true
    }

    pub fn back(&self) -> bool {
        self.go(-1)
    }

    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Install a navigation-confirmation gate; the newest gate wins.
    pub fn block(&self, gate: impl Into<BlockGate>) -> BlockHandle {
        let id = self.gate_seq.get();
        self.gate_seq.set(id + 1);
        *self.gate.borrow_mut() = Some((id, gate.into()));
        BlockHandle {
            slot: Rc::clone(&self.gate),
            id,
        }
    }

    /// The current location reported by the provider.
    pub fn location(&self) -> Location {
        self.provider.borrow().location()
    }

    /// The last navigation action (`PUSH`/`REPLACE`/`POP`).
    pub fn action(&self) -> HistoryAction {
        self.provider.borrow().action()
    }

    /// Number of entries in the history stack.
    pub fn entries(&self) -> usize {
        self.provider.borrow().length()
    }

    fn state_for_mode(&self, state: Option<State>) -> Option<State> {
        match self.mode {
            HistoryMode::Hash => None,
            HistoryMode::History => state,
        }
    }

    fn allowed(&self, to_path: &str) -> bool {
        match self.gate.borrow().as_ref() {
            None => true,
            Some((_, BlockGate::Message(message))) => (self.confirm)(message),
            Some((_, BlockGate::Custom(predicate))) => predicate(&Location::from_path(to_path)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
