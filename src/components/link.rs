//! Anchor helper delegating into the engine.
//!
//! Renders a plain `<a>` whose `href` comes from route resolution and whose
//! activation-equivalent clicks (primary button, no modifier keys, no
//! `target` attribute, default not already prevented) are turned into
//! engine pushes. Everything else is left to the browser.

use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::core::engine::RouterContext;
use crate::models::Target;

/// Navigation anchor.
///
/// The active CSS classes follow the configured `link_active_class` /
/// `link_exact_active_class` options: exact matches get both, prefix
/// matches get the active class only.
#[component]
pub fn Link(
    /// Destination: a concrete path (`/user/5`) or a route name.
    #[prop(into)]
    to: Target,
    /// Forwarded `target` attribute; when set, the browser handles clicks.
    #[prop(optional)]
    target: Option<String>,
    children: Children,
) -> impl IntoView {
    let ctx = expect_context::<RouterContext>();

    let href = ctx.router().get_route_path(to.clone()).unwrap_or_else(|err| {
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&format!("webnav: link resolution failed: {}", err).into());
        #[cfg(not(target_arch = "wasm32"))]
        let _ = err;
        String::from("#")
    });

    let class_href = href.clone();
    let class = Memo::new(move |_| {
        let router = ctx.router();
        let pathname = router.active_route().get().location.pathname;
        let options = router.options();

        let exact = pathname == class_href;
        let active = exact
            || (class_href != "/"
                && pathname.starts_with(&format!("{}/", class_href.trim_end_matches('/'))));

        match (active, exact) {
            (true, true) => format!(
                "{} {}",
                options.link_active_class, options.link_exact_active_class
            ),
            (true, false) => options.link_active_class.clone(),
            _ => String::new(),
        }
    });

    let link_target = target.clone();
    let on_click = move |ev: MouseEvent| {
        if ev.default_prevented()
            || ev.button() != 0
            || link_target.is_some()
            || ev.meta_key()
            || ev.alt_key()
            || ev.ctrl_key()
            || ev.shift_key()
        {
            return;
        }
        ev.prevent_default();
        if let Err(err) = ctx.router().push(to.clone()) {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::warn_1(&format!("webnav: navigation failed: {}", err).into());
            #[cfg(not(target_arch = "wasm32"))]
            let _ = err;
        }
    };

    view! {
        <a href=href class=move || class.get() target=target on:click=on_click>
            {children()}
        </a>
    }
}
