//! The navigation engine façade.
//!
//! [`Router`] composes the route table, the history adapter, the middleware
//! pipeline, and the plugin hook dispatcher. Each navigation runs one cycle:
//! resolve the target, run the interception stage, commit through the
//! adapter, republish the active-route state. Cycles are re-entrant but not
//! nested: a navigation triggered from inside an interceptor runs as a new
//! cycle inline on the call stack.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::components::RouterView;
use crate::config::RouterOptions;
use crate::core::history::{BlockGate, BlockHandle, HistoryAdapter, HistoryProvider};
#[cfg(not(target_arch = "wasm32"))]
use crate::core::history::MemoryHistory;
#[cfg(target_arch = "wasm32")]
use crate::core::history::BrowserHistory;
use crate::core::middleware::{
    HookHandle, Decision, MiddlewareContext, MiddlewarePipeline, fold_decisions,
};
use crate::core::plugin::{HookPayload, HookPoint, Plugin, PluginHandle, PluginHookDispatcher};
use crate::core::table::RouteTable;
use crate::error::RouterError;
use crate::models::{ActiveRouteState, HistoryAction, RouteDefinition, State, Target};
use crate::state::ActiveRoute;

/// Catch-all destination; the interception stage is skipped for it.
const WILDCARD: &str = "*";

/// Outcome of a navigation cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavOutcome {
    /// The target was committed and the active route republished.
    Committed,
    /// An interceptor vetoed the navigation; nothing was committed.
    Vetoed,
    /// An installed gate refused the transition; nothing was committed.
    Blocked,
}

enum CommitKind {
    Push,
    Replace,
}

/// Context wrapper so the (`Rc`-based) router can live in the reactive
/// ownership tree, which expects `Send` values.
#[derive(Clone, Copy)]
pub(crate) struct RouterContext(StoredValue<Router, LocalStorage>);

impl RouterContext {
    pub(crate) fn router(&self) -> Router {
        self.0.get_value()
    }
}

/// The router provided to the current component tree.
///
/// Panics when called outside a tree rendered through [`Router::render`].
pub fn use_router() -> Router {
    expect_context::<RouterContext>().router()
}

// =============================================================================
// Router
// =============================================================================

/// The navigation engine.
///
/// Cheap to clone; clones share the same table, pipeline, plugins, history
/// and published state.
#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

struct RouterInner {
    options: RouterOptions,
    table: RouteTable,
    pipeline: MiddlewarePipeline,
    plugins: PluginHookDispatcher,
    history: RefCell<Option<Rc<HistoryAdapter>>>,
    active: ActiveRoute,
}

impl Router {
    /// Configure the engine: build the table, install plugins, fire
    /// `on_init`.
    ///
    /// The route table is immutable from here on; re-registering routes
    /// requires constructing a new router.
    pub fn new(options: RouterOptions) -> Result<Self, RouterError> {
        let mut options = options;
        let table = RouteTable::new(std::mem::take(&mut options.routes));
        let plugins = PluginHookDispatcher::new();
        for plugin in std::mem::take(&mut options.plugins) {
            let _ = plugins.install_rc(plugin);
        }
        let router = Self {
            inner: Rc::new(RouterInner {
                options,
                table,
                pipeline: MiddlewarePipeline::new(),
                plugins,
                history: RefCell::new(None),
                active: ActiveRoute::new(),
            }),
        };
        router
            .inner
            .plugins
            .invoke(HookPoint::Init, &HookPayload::default())?;
        Ok(router)
    }

    // -------------------------------------------------------------------------
    // Activation and rendering
    // -------------------------------------------------------------------------

    /// Activate the engine with an explicit history provider.
    ///
    /// Used by tests and headless hosts; [`Router::render`] activates the
    /// platform default. The session's adapter is constructed once: if one
    /// is already active, this is a no-op.
    pub fn activate_with(&self, provider: Box<dyn HistoryProvider>) -> Result<(), RouterError> {
        {
            let mut slot = self.inner.history.borrow_mut();
            if slot.is_some() {
                return Ok(());
            }
            *slot = Some(Rc::new(HistoryAdapter::new(
                self.inner.options.mode,
                provider,
                Rc::clone(&self.inner.options.get_user_confirmation),
            )));
        }
        // First publication: the initial match becomes active.
        self.republish(None, true)
    }

    /// Activate (if needed) and produce the mountable view tree.
    ///
    /// Provides the router to the component tree via context; the returned
    /// [`RouterView`] re-renders the matched route's view per navigation.
    pub fn render(&self) -> impl IntoView {
        if let Err(err) = self.ensure_activated() {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::warn_1(&format!("webnav: activation failed: {}", err).into());
            #[cfg(not(target_arch = "wasm32"))]
            let _ = err;
        }
        #[cfg(target_arch = "wasm32")]
        self.attach_pop_listener();
        provide_context(RouterContext(StoredValue::new_local(self.clone())));
        view! { <RouterView /> }
    }

    fn ensure_activated(&self) -> Result<(), RouterError> {
        if self.inner.history.borrow().is_some() {
            return Ok(());
        }
        let opts = &self.inner.options;
        #[cfg(target_arch = "wasm32")]
        let provider: Box<dyn HistoryProvider> = Box::new(BrowserHistory::new(
            opts.mode,
            opts.hash_type,
            opts.base.clone(),
            opts.force_refresh,
            opts.key_length,
        ));
        #[cfg(not(target_arch = "wasm32"))]
        let provider: Box<dyn HistoryProvider> =
            Box::new(MemoryHistory::with_key_length(opts.key_length));
        self.activate_with(provider)
    }

    /// Keep the published state in sync with pointer movement done by the
    /// browser itself (back/forward buttons).
    #[cfg(target_arch = "wasm32")]
    fn attach_pop_listener(&self) {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::prelude::Closure;

        let router = self.clone();
        let closure = Closure::wrap(Box::new(move || {
            let _ = router.republish(Some(HistoryAction::Pop), false);
        }) as Box<dyn Fn()>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
            let _ = window
                .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        }

        // Keep the closure alive for the lifetime of the app.
        closure.forget();
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Navigate to a target, appending a history entry.
    pub fn push(&self, to: impl Into<Target>) -> Result<NavOutcome, RouterError> {
        self.navigate(to.into(), None, CommitKind::Push)
    }

    /// Navigate with an explicit state payload (wins over the target's own).
    pub fn push_with_state(
        &self,
        to: impl Into<Target>,
        state: State,
    ) -> Result<NavOutcome, RouterError> {
        self.navigate(to.into(), Some(state), CommitKind::Push)
    }

    /// Navigate to a target, replacing the current history entry.
    pub fn replace(&self, to: impl Into<Target>) -> Result<NavOutcome, RouterError> {
        self.navigate(to.into(), None, CommitKind::Replace)
    }

    /// Replace with an explicit state payload (wins over the target's own).
    pub fn replace_with_state(
        &self,
        to: impl Into<Target>,
        state: State,
    ) -> Result<NavOutcome, RouterError> {
        self.navigate(to.into(), Some(state), CommitKind::Replace)
    }

    /// Move the history pointer by `n` entries.
    ///
    /// Pointer movement through existing history is not intercepted: no
    /// middleware or plugin hooks run, the published state is simply
    /// refreshed.
    pub fn go(&self, n: i32) -> Result<(), RouterError> {
        let adapter = self.adapter()?;
        if adapter.go(n) {
            self.republish(None, false)?;
        }
        Ok(())
    }

    pub fn back(&self) -> Result<(), RouterError> {
        self.go(-1)
    }

    pub fn forward(&self) -> Result<(), RouterError> {
        self.go(1)
    }

    /// Install a navigation-confirmation gate; returns its disposer.
    pub fn disable(&self, gate: impl Into<BlockGate>) -> Result<BlockHandle, RouterError> {
        Ok(self.adapter()?.block(gate))
    }

    /// The active history adapter.
    pub fn history(&self) -> Result<Rc<HistoryAdapter>, RouterError> {
        self.adapter()
    }

    /// Number of entries in the history stack.
    pub fn entries(&self) -> Result<usize, RouterError> {
        Ok(self.adapter()?.entries())
    }

    /// The last navigation action (`PUSH`/`REPLACE`/`POP`).
    pub fn action(&self) -> Result<HistoryAction, RouterError> {
        Ok(self.adapter()?.action())
    }

    // -------------------------------------------------------------------------
    // Registration and resolution
    // -------------------------------------------------------------------------

    /// Register a before-navigation interceptor; returns its disposer.
    pub fn before_each(
        &self,
        middleware: impl Fn(&MiddlewareContext) -> Decision + 'static,
    ) -> HookHandle {
        self.inner.pipeline.register(middleware)
    }

    /// Install a plugin after configuration; returns its disposer.
    pub fn install(&self, plugin: impl Plugin + 'static) -> PluginHandle {
        self.inner.plugins.install(plugin)
    }

    /// Resolve a target to its concrete path without navigating.
    pub fn get_route_path(&self, to: impl Into<Target>) -> Result<String, RouterError> {
        self.inner.table.resolve_path(&to.into())
    }

    /// Resolve a target to its full route definition.
    pub fn get_full_route(&self, to: impl Into<Target>) -> Result<RouteDefinition, RouterError> {
        let def = match to.into() {
            Target::Named { name, .. } => self.inner.table.resolve_definition(&name)?,
            Target::Path { path, .. } => self.inner.table.resolve_definition(&path)?,
        };
        Ok(def.clone())
    }

    /// Read handle to the published active-route state.
    pub fn active_route(&self) -> ActiveRoute {
        self.inner.active
    }

    /// The options the engine was configured with (route table excluded).
    pub fn options(&self) -> &RouterOptions {
        &self.inner.options
    }

    /// The view produced by the definition matching `pathname`, if any.
    pub(crate) fn view_for(&self, pathname: &str) -> Option<AnyView> {
        self.inner
            .table
            .match_route(pathname)
            .and_then(|(def, _)| def.view.as_ref().map(|view| view()))
    }

    // -------------------------------------------------------------------------
    // Cycle driver
    // -------------------------------------------------------------------------

    fn navigate(
        &self,
        target: Target,
        explicit_state: Option<State>,
        kind: CommitKind,
    ) -> Result<NavOutcome, RouterError> {
        let inner = &self.inner;

        // Resolving: failures surface here, before any history access.
        let (resolved_path, resolved_def) = inner.table.resolve_full(&target)?;
        let mut path = resolved_path;
        let mut def = resolved_def.cloned();

        let adapter = self.adapter()?;
        let current = inner.active.get_untracked();
        let from_def = inner
            .table
            .match_route(&current.location.pathname)
            .map(|(d, _)| d.clone());

        // Explicit argument wins, else the target's own payload.
        let derived_state = explicit_state.or_else(|| target.state().cloned());
        let mut commit_state = derived_state.clone();

        // Intercepting. Wildcard destinations short-circuit the stage.
        if path != WILDCARD {
            let mut payload = HookPayload {
                to_path: Some(path.clone()),
                from_path: Some(current.location.pathname.clone()),
                pattern: def.as_ref().map(|d| d.path.clone()),
            };

            // Global pipeline, bracketed by on_hook/after_hook.
            inner.plugins.invoke(HookPoint::Hook, &payload)?;
            let cx = MiddlewareContext {
                to: def.clone(),
                from: from_def.clone(),
                to_path: path.clone(),
            };
            let default_target = Target::Path {
                path: path.clone(),
                state: derived_state.clone(),
            };
            let decision = inner.pipeline.run(&cx, &default_target);
            inner.plugins.invoke(HookPoint::AfterHook, &payload)?;

            let Some(next_target) = decision else {
                return Ok(NavOutcome::Vetoed);
            };
            if next_target != default_target {
                let (p, d) = inner.table.resolve_full(&next_target)?;
                path = p;
                def = d.cloned();
                commit_state = explicit_or(next_target.state().cloned(), &commit_state);
                payload.to_path = Some(path.clone());
                payload.pattern = def.as_ref().map(|d| d.path.clone());
            }

            // Route-declared middleware, bracketed by on_middleware/
            // after_middleware.
            inner.plugins.invoke(HookPoint::Middleware, &payload)?;
            let route_middleware = def
                .as_ref()
                .map(|d| d.middleware.clone())
                .unwrap_or_default();
            if !route_middleware.is_empty() {
                let cx = MiddlewareContext {
                    to: def.clone(),
                    from: from_def,
                    to_path: path.clone(),
                };
                let default_target = Target::Path {
                    path: path.clone(),
                    state: commit_state.clone(),
                };
                let decision =
                    fold_decisions(route_middleware.iter().map(|m| m(&cx)), &default_target);
                let Some(next_target) = decision else {
                    inner.plugins.invoke(HookPoint::AfterMiddleware, &payload)?;
                    return Ok(NavOutcome::Vetoed);
                };
                if next_target != default_target {
                    let (p, d) = inner.table.resolve_full(&next_target)?;
                    path = p;
                    def = d.cloned();
                    commit_state = explicit_or(next_target.state().cloned(), &commit_state);
                }
            }
            inner.plugins.invoke(HookPoint::AfterMiddleware, &payload)?;
        }

        // Committing. The adapter drops state in hash mode and consults any
        // installed gate.
        let committed = match kind {
            CommitKind::Push => adapter.push(&path, commit_state),
            CommitKind::Replace => adapter.replace(&path, commit_state),
        };
        if !committed {
            return Ok(NavOutcome::Blocked);
        }

        // Back to idle: republish and fire enter/leave around the match
        // change.
        self.republish(None, true)?;
        Ok(NavOutcome::Committed)
    }

    /// Rebuild and publish the active-route snapshot from the adapter.
    ///
    /// When `fire_hooks` is set and the matched pattern changed, `on_leave`
    /// fires for the outgoing match before the snapshot is replaced and
    /// `on_enter` for the incoming one after (plugin hooks first, then the
    /// route's own callback).
    fn republish(
        &self,
        action_override: Option<HistoryAction>,
        fire_hooks: bool,
    ) -> Result<(), RouterError> {
        let inner = &self.inner;
        let adapter = self.adapter()?;
        let location = adapter.location();
        let action = action_override.unwrap_or_else(|| adapter.action());

        let matched = inner.table.match_route(&location.pathname);
        let new_def = matched.as_ref().map(|(d, _)| (*d).clone());
        let new_route = matched.map(|(_, m)| m);

        let old = inner.active.get_untracked();
        let changed = old.route.as_ref().map(|m| m.pattern.as_str())
            != new_route.as_ref().map(|m| m.pattern.as_str());

        if fire_hooks
            && changed
            && let Some(old_match) = &old.route
        {
            let payload = HookPayload {
                to_path: Some(location.pathname.clone()),
                from_path: Some(old.location.pathname.clone()),
                pattern: Some(old_match.pattern.clone()),
            };
            inner.plugins.invoke(HookPoint::Leave, &payload)?;
            if let Some((old_def, _)) = inner.table.match_route(&old.location.pathname)
                && let Some(on_leave) = &old_def.on_leave
            {
                on_leave();
            }
        }

        inner.active.publish(ActiveRouteState {
            location: location.clone(),
            action,
            route: new_route.clone(),
        });

        if fire_hooks
            && changed
            && let Some(new_match) = &new_route
        {
            let payload = HookPayload {
                to_path: Some(location.pathname.clone()),
                from_path: Some(old.location.pathname.clone()),
                pattern: Some(new_match.pattern.clone()),
            };
            inner.plugins.invoke(HookPoint::Enter, &payload)?;
            if let Some(on_enter) = new_def.as_ref().and_then(|d| d.on_enter.as_ref()) {
                on_enter();
            }
        }

        Ok(())
    }

    fn adapter(&self) -> Result<Rc<HistoryAdapter>, RouterError> {
        self.inner
            .history
            .borrow()
            .as_ref()
            .cloned()
            .ok_or(RouterError::HistoryNotInitialized)
    }
}

/// Redirect targets may carry their own payload; otherwise the already
/// derived state stands.
fn explicit_or(redirect_state: Option<State>, derived: &Option<State>) -> Option<State> {
    redirect_state.or_else(|| derived.clone())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HistoryMode, RouterOptions};
    use crate::core::history::MemoryHistory;
    use crate::core::plugin::HookResult;
    use crate::models::RouteDefinition;
    use std::cell::RefCell;

    fn routes() -> Vec<RouteDefinition> {
        vec![
            RouteDefinition::named("/", "home").exact(),
            RouteDefinition::named("/user", "user"),
            RouteDefinition::named("/login", "login").exact(),
        ]
    }

    fn router() -> Router {
        let router = Router::new(RouterOptions::new(routes())).unwrap();
        router
            .activate_with(Box::new(MemoryHistory::new()))
            .unwrap();
        router
    }

    #[test]
    fn test_push_commits_and_publishes() {
        let router = router();
        let outcome = router.push("/user").unwrap();
        assert_eq!(outcome, NavOutcome::Committed);

        let state = router.active_route().get_untracked();
        assert_eq!(state.location.pathname, "/user");
        assert_eq!(state.action, HistoryAction::Push);
        assert_eq!(state.route.unwrap().pattern, "/user");
    }

    #[test]
    fn test_push_named_with_params() {
        let router = router();
        router
            .push(Target::named("user").with_params([("id", 5)].into_iter().collect()))
            .unwrap();
        assert_eq!(
            router.active_route().get_untracked().location.pathname,
            "/user/5"
        );
    }

    #[test]
    fn test_unknown_name_fails_without_commit() {
        let router = router();
        let before = router.entries().unwrap();
        let err = router.push("profile").unwrap_err();
        assert!(matches!(err, RouterError::RouteNotFound(name) if name == "profile"));
        assert_eq!(router.entries().unwrap(), before);
        assert_eq!(router.active_route().get_untracked().location.pathname, "/");
    }

    #[test]
    fn test_navigation_before_activation_fails() {
        let router = Router::new(RouterOptions::new(routes())).unwrap();
        let err = router.push("/user").unwrap_err();
        assert!(matches!(err, RouterError::HistoryNotInitialized));
    }

    #[test]
    fn test_replace_keeps_stack_length() {
        let router = router();
        router.push("/user").unwrap();
        let len = router.entries().unwrap();
        router.replace("/login").unwrap();
        assert_eq!(router.entries().unwrap(), len);
        assert_eq!(
            router.active_route().get_untracked().action,
            HistoryAction::Replace
        );
    }

    #[test]
    fn test_veto_leaves_state_untouched() {
        let router = router();
        let _guard = router.before_each(|_| Decision::Abort);
        let before = router.active_route().get_untracked();
        let outcome = router.push("/user").unwrap();
        assert_eq!(outcome, NavOutcome::Vetoed);
        assert_eq!(router.active_route().get_untracked(), before);
        assert_eq!(router.entries().unwrap(), 1);
    }

    #[test]
    fn test_last_redirect_wins_end_to_end() {
        let router = router();
        let _a = router.before_each(|_| Decision::Redirect(Target::path("/user")));
        let _b = router.before_each(|_| Decision::Redirect(Target::path("/login")));
        router.push("/").unwrap();
        assert_eq!(
            router.active_route().get_untracked().location.pathname,
            "/login"
        );
    }

    #[test]
    fn test_route_level_middleware_runs_after_pipeline() {
        let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let o = Rc::clone(&order);
        let guarded = RouteDefinition::named("/admin", "admin").with_middleware(Rc::new(
            move |_cx: &MiddlewareContext| {
                o.borrow_mut().push("route");
                Decision::Proceed
            },
        ));
        let router = Router::new(RouterOptions::new(vec![
            RouteDefinition::named("/", "home").exact(),
            guarded,
        ]))
        .unwrap();
        router
            .activate_with(Box::new(MemoryHistory::new()))
            .unwrap();

        let o = Rc::clone(&order);
        let _guard = router.before_each(move |_| {
            o.borrow_mut().push("global");
            Decision::Proceed
        });

        router.push("/admin").unwrap();
        assert_eq!(*order.borrow(), vec!["global", "route"]);
    }

    #[test]
    fn test_route_middleware_can_redirect() {
        let guarded = RouteDefinition::named("/admin", "admin").with_middleware(Rc::new(
            |_cx: &MiddlewareContext| Decision::Redirect(Target::path("/login")),
        ));
        let router = Router::new(RouterOptions::new(vec![
            RouteDefinition::named("/login", "login").exact(),
            guarded,
        ]))
        .unwrap();
        router
            .activate_with(Box::new(MemoryHistory::new()))
            .unwrap();

        router.push("/admin").unwrap();
        assert_eq!(
            router.active_route().get_untracked().location.pathname,
            "/login"
        );
    }

    #[test]
    fn test_wildcard_skips_interception() {
        let ran: Rc<RefCell<bool>> = Rc::new(RefCell::new(false));
        let router = Router::new(RouterOptions::new(vec![RouteDefinition::named(
            "*", "fallback",
        )]))
        .unwrap();
        router
            .activate_with(Box::new(MemoryHistory::new()))
            .unwrap();

        let r = Rc::clone(&ran);
        let _guard = router.before_each(move |_| {
            *r.borrow_mut() = true;
            Decision::Abort
        });

        let outcome = router.push("*").unwrap();
        assert_eq!(outcome, NavOutcome::Committed);
        assert!(!*ran.borrow());
    }

    #[test]
    fn test_pointer_movement_skips_interception() {
        let router = router();
        router.push("/user").unwrap();

        let ran: Rc<RefCell<bool>> = Rc::new(RefCell::new(false));
        let r = Rc::clone(&ran);
        let _guard = router.before_each(move |_| {
            *r.borrow_mut() = true;
            Decision::Abort
        });

        router.back().unwrap();
        assert!(!*ran.borrow());
        assert_eq!(router.active_route().get_untracked().location.pathname, "/");
        assert_eq!(
            router.active_route().get_untracked().action,
            HistoryAction::Pop
        );
    }

    #[test]
    fn test_redirect_definition_followed_on_push() {
        let router = Router::new(RouterOptions::new(vec![
            RouteDefinition::new("/old").with_redirect("/new").exact(),
            RouteDefinition::named("/new", "new").exact(),
        ]))
        .unwrap();
        router
            .activate_with(Box::new(MemoryHistory::new()))
            .unwrap();

        router.push("/old").unwrap();
        assert_eq!(
            router.active_route().get_untracked().location.pathname,
            "/new"
        );
    }

    #[test]
    fn test_blocked_navigation_reports_blocked() {
        let router = Router::new(RouterOptions::new(routes()).confirmation(|_| false)).unwrap();
        router
            .activate_with(Box::new(MemoryHistory::new()))
            .unwrap();
        let _gate = router.disable("are you sure?").unwrap();

        let outcome = router.push("/user").unwrap();
        assert_eq!(outcome, NavOutcome::Blocked);
        assert_eq!(router.active_route().get_untracked().location.pathname, "/");
    }

    #[test]
    fn test_enter_and_leave_fire_around_match_change() {
        let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let l = Rc::clone(&log);
        let home = RouteDefinition::named("/", "home")
            .exact()
            .on_leave(move || l.borrow_mut().push("leave:/".into()));
        let l = Rc::clone(&log);
        let user = RouteDefinition::named("/user", "user")
            .on_enter(move || l.borrow_mut().push("enter:/user".into()));

        let router = Router::new(RouterOptions::new(vec![home, user])).unwrap();
        router
            .activate_with(Box::new(MemoryHistory::new()))
            .unwrap();
        // Initial activation enters "/" but has no on_enter registered.

        router.push("/user").unwrap();
        assert_eq!(*log.borrow(), vec!["leave:/", "enter:/user"]);
    }

    #[test]
    fn test_on_init_fires_once_at_configuration() {
        struct InitCounter(Rc<RefCell<u32>>);
        impl Plugin for InitCounter {
            fn on_init(&self, _payload: &HookPayload) -> HookResult {
                *self.0.borrow_mut() += 1;
                Ok(())
            }
        }

        let count = Rc::new(RefCell::new(0));
        let options = RouterOptions::new(routes()).plugin(InitCounter(Rc::clone(&count)));
        let router = Router::new(options).unwrap();
        assert_eq!(*count.borrow(), 1);

        router
            .activate_with(Box::new(MemoryHistory::new()))
            .unwrap();
        router.push("/user").unwrap();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_hook_order_for_one_navigation() {
        struct Tracer(Rc<RefCell<Vec<&'static str>>>);
        impl Plugin for Tracer {
            fn on_hook(&self, _p: &HookPayload) -> HookResult {
                self.0.borrow_mut().push("on_hook");
                Ok(())
            }
            fn after_hook(&self, _p: &HookPayload) -> HookResult {
                self.0.borrow_mut().push("after_hook");
                Ok(())
            }
            fn on_middleware(&self, _p: &HookPayload) -> HookResult {
                self.0.borrow_mut().push("on_middleware");
                Ok(())
            }
            fn after_middleware(&self, _p: &HookPayload) -> HookResult {
                self.0.borrow_mut().push("after_middleware");
                Ok(())
            }
            fn on_enter(&self, _p: &HookPayload) -> HookResult {
                self.0.borrow_mut().push("on_enter");
                Ok(())
            }
            fn on_leave(&self, _p: &HookPayload) -> HookResult {
                self.0.borrow_mut().push("on_leave");
                Ok(())
            }
        }

        let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let options = RouterOptions::new(routes()).plugin(Tracer(Rc::clone(&log)));
        let router = Router::new(options).unwrap();
        router
            .activate_with(Box::new(MemoryHistory::new()))
            .unwrap();
        log.borrow_mut().clear();

        let o = log.clone();
        let _guard = router.before_each(move |_| {
            o.borrow_mut().push("pipeline");
            Decision::Proceed
        });

        router.push("/user").unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                "on_hook",
                "pipeline",
                "after_hook",
                "on_middleware",
                "after_middleware",
                "on_leave",
                "on_enter",
            ]
        );
    }

    #[test]
    fn test_after_hook_fires_even_on_veto() {
        struct Tracer(Rc<RefCell<Vec<&'static str>>>);
        impl Plugin for Tracer {
            fn after_hook(&self, _p: &HookPayload) -> HookResult {
                self.0.borrow_mut().push("after_hook");
                Ok(())
            }
            fn on_middleware(&self, _p: &HookPayload) -> HookResult {
                self.0.borrow_mut().push("on_middleware");
                Ok(())
            }
        }

        let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let options = RouterOptions::new(routes()).plugin(Tracer(Rc::clone(&log)));
        let router = Router::new(options).unwrap();
        router
            .activate_with(Box::new(MemoryHistory::new()))
            .unwrap();
        log.borrow_mut().clear();

        let _guard = router.before_each(|_| Decision::Abort);
        assert_eq!(router.push("/user").unwrap(), NavOutcome::Vetoed);
        // The bracket closes, but the cycle halts before on_middleware.
        assert_eq!(*log.borrow(), vec!["after_hook"]);
    }

    #[test]
    fn test_plugin_error_aborts_navigation() {
        struct Refuser;
        impl Plugin for Refuser {
            fn on_hook(&self, _p: &HookPayload) -> HookResult {
                Err(RouterError::plugin(HookPoint::Hook, "not today"))
            }
        }

        let options = RouterOptions::new(routes()).plugin(Refuser);
        let router = Router::new(options).unwrap();
        router
            .activate_with(Box::new(MemoryHistory::new()))
            .unwrap();

        let err = router.push("/user").unwrap_err();
        assert!(matches!(err, RouterError::Plugin { .. }));
        assert_eq!(router.active_route().get_untracked().location.pathname, "/");
        assert_eq!(router.entries().unwrap(), 1);
    }

    #[test]
    fn test_get_route_path_and_full_route() {
        let router = router();
        assert_eq!(router.get_route_path("user").unwrap(), "/user");
        assert_eq!(router.get_route_path("/verbatim").unwrap(), "/verbatim");
        assert_eq!(
            router.get_full_route("user").unwrap().name.as_deref(),
            Some("user")
        );
        assert!(router.get_full_route("nope").is_err());
    }

    #[test]
    fn test_activation_is_once_per_session() {
        let router = router();
        router.push("/user").unwrap();
        // A second activation attempt must not reset history.
        router
            .activate_with(Box::new(MemoryHistory::new()))
            .unwrap();
        assert_eq!(
            router.active_route().get_untracked().location.pathname,
            "/user"
        );
    }
}
