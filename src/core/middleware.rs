//! The before-navigation interception pipeline.
//!
//! Interceptors run strictly in registration order and each returns a
//! [`Decision`] instead of driving a shared continuation. Folding the
//! decisions left-to-right preserves the continuation semantics: `Proceed`
//! and `Redirect` each overwrite the pending commit target (so the last
//! interceptor to "call the continuation" wins), while `Abort` leaves the
//! pending slot untouched. If no interceptor ever produces a target, the
//! navigation is vetoed.

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{RouteDefinition, Target};

/// What an interceptor decided about the pending navigation.
#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    /// Resume default navigation to the resolved destination.
    Proceed,
    /// Navigate somewhere else instead.
    Redirect(Target),
    /// Make no continuation call; alone, this halts the navigation.
    Abort,
}

/// Context handed to every interceptor in a cycle.
#[derive(Clone, Debug)]
pub struct MiddlewareContext {
    /// Definition matched for the destination, if any.
    pub to: Option<RouteDefinition>,
    /// Definition matched for the current location, if any.
    pub from: Option<RouteDefinition>,
    /// Concrete destination path the cycle resolved to.
    pub to_path: String,
}

/// A registered interceptor.
pub type Middleware = Rc<dyn Fn(&MiddlewareContext) -> Decision>;

type EntryList = Rc<RefCell<Vec<(u64, Middleware)>>>;

/// Disposer for a registered interceptor.
///
/// Dropping the handle keeps the registration; call [`HookHandle::revoke`]
/// to remove it.
pub struct HookHandle {
    entries: EntryList,
    id: u64,
}

impl HookHandle {
    /// Remove the interceptor this handle was returned for.
    pub fn revoke(self) {
        self.entries.borrow_mut().retain(|(id, _)| *id != self.id);
    }
}

/// Ordered list of before-navigation interceptors.
#[derive(Default)]
pub struct MiddlewarePipeline {
    entries: EntryList,
    next_id: std::cell::Cell<u64>,
}

impl MiddlewarePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an interceptor; returns its disposer.
    pub fn register(&self, middleware: impl Fn(&MiddlewareContext) -> Decision + 'static) -> HookHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, Rc::new(middleware)));
        HookHandle {
            entries: Rc::clone(&self.entries),
            id,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Run every interceptor in registration order and fold the decisions.
    ///
    /// Returns the target to commit, or `None` when the navigation was
    /// vetoed. An empty pipeline proceeds to the default target.
    ///
    /// The registration list is snapshotted before the run, so an
    /// interceptor that triggers a new navigation (a new cycle, inline on
    /// the call stack) or mutates registrations does not disturb the
    /// ordering of the cycle already in flight.
    pub fn run(&self, cx: &MiddlewareContext, default: &Target) -> Option<Target> {
        let snapshot: Vec<Middleware> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, m)| Rc::clone(m))
            .collect();
        if snapshot.is_empty() {
            return Some(default.clone());
        }
        fold_decisions(snapshot.iter().map(|m| m(cx)), default)
    }
}

/// Left-to-right decision fold shared by the global pipeline and
/// route-level middleware lists.
pub(crate) fn fold_decisions(
    decisions: impl Iterator<Item = Decision>,
    default: &Target,
) -> Option<Target> {
    let mut pending: Option<Target> = None;
    for decision in decisions {
        match decision {
            Decision::Proceed => pending = Some(default.clone()),
            Decision::Redirect(target) => pending = Some(target),
            Decision::Abort => {}
        }
    }
    pending
}

// ============================================================================
// Tests
// ============================================================================
