//! Lifecycle plugin hooks and their dispatcher.
//!
//! A plugin implements whichever hook methods it cares about; the rest
//! default to no-ops, so dispatch never fails on an absent capability. An
//! error returned from an implemented hook propagates to the caller of
//! [`PluginHookDispatcher::invoke`] immediately; plugins are not isolated
//! from each other.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::RouterError;

// ============================================================================
// Hook points
// ============================================================================

/// The lifecycle points a plugin may observe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookPoint {
    /// Once, when the engine is configured.
    Init,
    /// Reserved slot; the core never invokes it.
    Ready,
    /// Reserved slot; the core never invokes it.
    Error,
    /// Before the global middleware pipeline runs.
    Hook,
    /// After the global middleware pipeline ran.
    AfterHook,
    /// Before route-declared middleware runs.
    Middleware,
    /// After route-declared middleware ran.
    AfterMiddleware,
    /// A route match became active.
    Enter,
    /// A route match stopped being active.
    Leave,
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "on_init",
            Self::Ready => "on_ready",
            Self::Error => "on_error",
            Self::Hook => "on_hook",
            Self::AfterHook => "after_hook",
            Self::Middleware => "on_middleware",
            Self::AfterMiddleware => "after_middleware",
            Self::Enter => "on_enter",
            Self::Leave => "on_leave",
        };
        write!(f, "{}", name)
    }
}

/// Navigation context handed to lifecycle hooks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HookPayload {
    /// Concrete destination path of the cycle, when one exists.
    pub to_path: Option<String>,
    /// Pathname the cycle started from.
    pub from_path: Option<String>,
    /// Pattern of the destination's matched definition, if any.
    pub pattern: Option<String>,
}

/// Outcome of a single hook method.
pub type HookResult = Result<(), RouterError>;

// ============================================================================
// Plugin
// ============================================================================

/// Optional capability set of lifecycle hooks.
///
/// Every method defaults to a no-op; implement only the points of interest.
#[allow(unused_variables)]
pub trait Plugin {
    fn on_init(&self, payload: &HookPayload) -> HookResult {
        Ok(())
    }

    fn on_ready(&self, payload: &HookPayload) -> HookResult {
        Ok(())
    }

    fn on_error(&self, payload: &HookPayload) -> HookResult {
        Ok(())
    }

    fn on_hook(&self, payload: &HookPayload) -> HookResult {
        Ok(())
    }

    fn after_hook(&self, payload: &HookPayload) -> HookResult {
        Ok(())
    }

    fn on_middleware(&self, payload: &HookPayload) -> HookResult {
        Ok(())
    }

    fn after_middleware(&self, payload: &HookPayload) -> HookResult {
        Ok(())
    }

    fn on_enter(&self, payload: &HookPayload) -> HookResult {
        Ok(())
    }

    fn on_leave(&self, payload: &HookPayload) -> HookResult {
        Ok(())
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

type PluginList = Rc<RefCell<Vec<(u64, Rc<dyn Plugin>)>>>;

/// Disposer for an installed plugin.
pub struct PluginHandle {
    plugins: PluginList,
    id: u64,
}

impl PluginHandle {
    /// Uninstall the plugin this handle was returned for.
    pub fn revoke(self) {
        self.plugins.borrow_mut().retain(|(id, _)| *id != self.id);
    }
}

/// Invokes named lifecycle hooks on installed plugins, in installation
/// order.
#[derive(Default)]
pub struct PluginHookDispatcher {
    plugins: PluginList,
    next_id: std::cell::Cell<u64>,
}

impl PluginHookDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a ready-made plugin instance.
    pub fn install(&self, plugin: impl Plugin + 'static) -> PluginHandle {
        self.install_rc(Rc::new(plugin))
    }

    /// Install from a no-argument factory, instantiated once now.
    pub fn install_with<P: Plugin + 'static>(&self, factory: impl FnOnce() -> P) -> PluginHandle {
        self.install_rc(Rc::new(factory()))
    }

    pub(crate) fn install_rc(&self, plugin: Rc<dyn Plugin>) -> PluginHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.plugins.borrow_mut().push((id, plugin));
        PluginHandle {
            plugins: Rc::clone(&self.plugins),
            id,
        }
    }

    pub fn len(&self) -> usize {
        self.plugins.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.borrow().is_empty()
    }

    /// Invoke `hook` on every installed plugin, in installation order.
    ///
    /// Defaulted (unimplemented) hooks are no-ops. The first `Err` aborts
    /// the dispatch and propagates.
    pub fn invoke(&self, hook: HookPoint, payload: &HookPayload) -> HookResult {
        let snapshot: Vec<Rc<dyn Plugin>> = self
            .plugins
            .borrow()
            .iter()
            .map(|(_, p)| Rc::clone(p))
            .collect();
        for plugin in snapshot {
            match hook {
                HookPoint::Init => plugin.on_init(payload)?,
                HookPoint::Ready => plugin.on_ready(payload)?,
                HookPoint::Error => plugin.on_error(payload)?,
                HookPoint::Hook => plugin.on_hook(payload)?,
                HookPoint::AfterHook => plugin.after_hook(payload)?,
                HookPoint::Middleware => plugin.on_middleware(payload)?,
                HookPoint::AfterMiddleware => plugin.after_middleware(payload)?,
                HookPoint::Enter => plugin.on_enter(payload)?,
                HookPoint::Leave => plugin.on_leave(payload)?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
