//! The history storage boundary and the in-memory provider.

use crate::models::{HistoryAction, Location, State};

/// Opaque browsing-history storage consumed by the adapter.
///
/// Implementations own entry persistence and pointer movement; everything
/// above this trait (mode rules, confirmation gates, interception) lives in
/// the engine. The crate ships [`MemoryHistory`] for tests and headless use
/// and a browser-backed provider on wasm.
pub trait HistoryProvider {
    /// Append a new entry after the current one, discarding forward entries.
    fn push(&mut self, path: &str, state: Option<State>);

    /// Overwrite the current entry.
    fn replace(&mut self, path: &str, state: Option<State>);

    /// Move the pointer by `n` entries; out-of-range moves are ignored.
    fn go(&mut self, n: i32);

    /// Number of entries in the stack.
    fn length(&self) -> usize;

    /// The last action performed.
    fn action(&self) -> HistoryAction;

    /// The current location.
    fn location(&self) -> Location;
}

// =============================================================================
// Key generation
// =============================================================================

const KEY_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a random base36 location key of the given length.
#[cfg(target_arch = "wasm32")]
pub(crate) fn random_key(len: usize) -> String {
    (0..len)
        .map(|_| {
            let i = (js_sys::Math::random() * KEY_ALPHABET.len() as f64) as usize;
            KEY_ALPHABET[i.min(KEY_ALPHABET.len() - 1)] as char
        })
        .collect()
}

/// Generate a random base36 location key of the given length.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn random_key(len: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())] as char)
        .collect()
}

// =============================================================================
// MemoryHistory
// =============================================================================

/// In-memory history stack.
///
/// Mirrors browser semantics: pushing truncates any forward entries, `go`
/// clamps silently, the initial entry is `/` with a `Pop` action.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: Vec<Location>,
    index: usize,
    action: HistoryAction,
    key_length: usize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::with_key_length(crate::config::DEFAULT_KEY_LENGTH)
    }

    pub fn with_key_length(key_length: usize) -> Self {
        Self {
            entries: vec![Location::from_path("/").with_key(random_key(key_length))],
            index: 0,
            action: HistoryAction::Pop,
            key_length,
        }
    }

    /// Start at a location other than `/`.
    pub fn with_initial(path: &str) -> Self {
        let mut history = Self::new();
        history.entries[0] = Location::from_path(path).with_key(random_key(history.key_length));
        history
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryProvider for MemoryHistory {
    fn push(&mut self, path: &str, state: Option<State>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(
            Location::from_path(path)
                .with_state(state)
                .with_key(random_key(self.key_length)),
        );
        self.index += 1;
        self.action = HistoryAction::Push;
    }

    fn replace(&mut self, path: &str, state: Option<State>) {
        self.entries[self.index] = Location::from_path(path)
            .with_state(state)
            .with_key(random_key(self.key_length));
        self.action = HistoryAction::Replace;
    }

    fn go(&mut self, n: i32) {
        let target = self.index as i64 + n as i64;
        if target < 0 || target >= self.entries.len() as i64 {
            return;
        }
        if target as usize != self.index {
            self.index = target as usize;
            self.action = HistoryAction::Pop;
        }
    }

    fn length(&self) -> usize {
        self.entries.len()
    }

    fn action(&self) -> HistoryAction {
        self.action
    }

    fn location(&self) -> Location {
        self.entries[self.index].clone()
    }
}

// =============================================================================
// Tests
// =============================================================================
