//! The route table: registered definitions and name/path resolution.

use crate::config::MAX_REDIRECTS;
use crate::core::matcher::{MatchOptions, match_path};
use crate::error::RouterError;
use crate::models::{RouteDefinition, RouteMatch, Target};

/// Registered route definitions, flattened and immutable after construction.
///
/// Nested `children` are flattened depth-first with parent-joined paths, so
/// lookup and matching always walk a single ordered list. Re-registering
/// routes requires constructing a new table.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<RouteDefinition>,
}

impl RouteTable {
    /// Build a table from configured definitions.
    pub fn new(definitions: Vec<RouteDefinition>) -> Self {
        let mut routes = Vec::new();
        for def in definitions {
            flatten_into(&mut routes, def, None);
        }
        Self { routes }
    }

    /// All flattened definitions in registration order.
    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    /// Resolve a navigation target to a concrete path.
    ///
    /// - A `Path` target is returned verbatim.
    /// - A `Named` target looks up the route's registered path; unknown
    ///   names fail with [`RouterError::RouteNotFound`].
    /// - Parameters are appended as extra path segments in insertion order
    ///   (`/user` + `{a: 1, b: 2}` -> `/user/1/2`). This is positional
    ///   concatenation, not placeholder substitution: a pattern like
    ///   `/user/:id` is NOT rewritten, so callers must shape their patterns
    ///   to match the appended form.
    ///
    /// Pure function of the table and the input; no side effects.
    pub fn resolve_path(&self, target: &Target) -> Result<String, RouterError> {
        match target {
            Target::Path { path, .. } => Ok(path.clone()),
            Target::Named { name, params, .. } => {
                let def = self
                    .find_named(name)
                    .ok_or_else(|| RouterError::RouteNotFound(name.clone()))?;
                let mut path = def.path.clone();
                if let Some(params) = params {
                    for (_, value) in params.iter() {
                        path.push('/');
                        path.push_str(&value.to_string());
                    }
                }
                Ok(path)
            }
        }
    }

    /// Resolve a path or name to its route definition.
    ///
    /// Strings starting with `/` (and the `*` sentinel) are matched against
    /// the table's patterns; anything else is a name lookup.
    pub fn resolve_definition(&self, path_or_name: &str) -> Result<&RouteDefinition, RouterError> {
        if path_or_name.starts_with('/') || path_or_name == "*" {
            self.match_route(path_or_name)
                .map(|(def, _)| def)
                .ok_or_else(|| RouterError::RouteNotFound(path_or_name.to_string()))
        } else {
            self.find_named(path_or_name)
                .ok_or_else(|| RouterError::RouteNotFound(path_or_name.to_string()))
        }
    }

    /// Match a pathname against the table; first match in table order wins.
    pub fn match_route(&self, pathname: &str) -> Option<(&RouteDefinition, RouteMatch)> {
        self.routes.iter().find_map(|def| {
            let opts = MatchOptions {
                exact: def.exact,
                sensitive: def.sensitive,
                strict: def.strict,
            };
            match_path(&def.path, pathname, opts).map(|matched| (def, matched))
        })
    }

    /// Resolve a target to the concrete path and definition that would be
    /// committed, following `redirect` chains up to [`MAX_REDIRECTS`] hops.
    pub fn resolve_full(
        &self,
        target: &Target,
    ) -> Result<(String, Option<&RouteDefinition>), RouterError> {
        let mut path = self.resolve_path(target)?;
        let origin = path.clone();
        let mut def = self.match_route(&path).map(|(d, _)| d);
        let mut hops = 0;
        loop {
            let Some(redirect) = def.and_then(|d| d.redirect.clone()) else {
                break;
            };
            hops += 1;
            if hops > MAX_REDIRECTS {
                return Err(RouterError::RedirectLoop(origin));
            }
            path = self.resolve_path(&Target::from(redirect.as_str()))?;
            def = self.match_route(&path).map(|(d, _)| d);
        }
        Ok((path, def))
    }

    /// First definition registered under `name`, in table order.
    fn find_named(&self, name: &str) -> Option<&RouteDefinition> {
        self.routes
            .iter()
            .find(|def| def.name.as_deref() == Some(name))
    }
}

/// Depth-first flattening with parent-joined paths.
fn flatten_into(out: &mut Vec<RouteDefinition>, mut def: RouteDefinition, parent: Option<&str>) {
    if let Some(parent) = parent
        && !def.path.starts_with('/')
        && def.path != "*"
    {
        def.path = join_paths(parent, &def.path);
    }
    let children = std::mem::take(&mut def.children);
    let own_path = def.path.clone();
    out.push(def);
    for child in children {
        flatten_into(out, child, Some(&own_path));
    }
}

fn join_paths(parent: &str, child: &str) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), child)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Params;

    fn table() -> RouteTable {
        RouteTable::new(vec![
            RouteDefinition::named("/", "home").exact(),
            RouteDefinition::named("/user", "user"),
        ])
    }

    #[test]
    fn test_resolve_named_path() {
        assert_eq!(
            table().resolve_path(&Target::named("user")).unwrap(),
            "/user"
        );
        assert_eq!(table().resolve_path(&Target::named("home")).unwrap(), "/");
    }

    #[test]
    fn test_resolve_path_identity_for_absolute_strings() {
        let t = table();
        for path in ["/", "/user", "/not/registered"] {
            assert_eq!(t.resolve_path(&Target::from(path)).unwrap(), path);
        }
    }

    #[test]
    fn test_unknown_name_fails() {
        let err = table().resolve_path(&Target::named("profile")).unwrap_err();
        assert!(matches!(err, RouterError::RouteNotFound(name) if name == "profile"));
    }

    #[test]
    fn test_params_appended_in_insertion_order() {
        let params: Params = [("a", 1), ("b", 2)].into_iter().collect();
        let path = table()
            .resolve_path(&Target::named("user").with_params(params))
            .unwrap();
        assert_eq!(path, "/user/1/2");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let t = table();
        let target = Target::named("user").with_params([("id", 5)].into_iter().collect());
        let first = t.resolve_path(&target).unwrap();
        let second = t.resolve_path(&target).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let t = RouteTable::new(vec![
            RouteDefinition::named("/first", "dup"),
            RouteDefinition::named("/second", "dup"),
        ]);
        assert_eq!(t.resolve_path(&Target::named("dup")).unwrap(), "/first");
    }

    #[test]
    fn test_resolve_definition_by_name_and_path() {
        let t = table();
        assert_eq!(t.resolve_definition("user").unwrap().path, "/user");
        assert_eq!(t.resolve_definition("/user").unwrap().path, "/user");
        assert!(t.resolve_definition("missing").is_err());
    }

    #[test]
    fn test_children_flattened_with_joined_paths() {
        let t = RouteTable::new(vec![
            RouteDefinition::named("/user", "user").with_children(vec![
                RouteDefinition::named("profile", "user-profile"),
                RouteDefinition::new("/absolute"),
            ]),
        ]);
        let paths: Vec<&str> = t.routes().iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["/user", "/user/profile", "/absolute"]);
    }

    #[test]
    fn test_match_route_first_wins() {
        let t = RouteTable::new(vec![
            RouteDefinition::new("/user/:id"),
            RouteDefinition::new("/user/5"),
        ]);
        let (def, matched) = t.match_route("/user/5").unwrap();
        assert_eq!(def.path, "/user/:id");
        assert_eq!(matched.params, vec![("id".to_string(), "5".to_string())]);
    }

    #[test]
    fn test_redirects_followed() {
        let t = RouteTable::new(vec![
            RouteDefinition::new("/old").with_redirect("/new").exact(),
            RouteDefinition::named("/new", "new").exact(),
        ]);
        let (path, def) = t.resolve_full(&Target::from("/old")).unwrap();
        assert_eq!(path, "/new");
        assert_eq!(def.unwrap().path, "/new");
    }

    #[test]
    fn test_redirect_by_name() {
        let t = RouteTable::new(vec![
            RouteDefinition::new("/old").with_redirect("landing").exact(),
            RouteDefinition::named("/welcome", "landing").exact(),
        ]);
        let (path, _) = t.resolve_full(&Target::from("/old")).unwrap();
        assert_eq!(path, "/welcome");
    }

    #[test]
    fn test_redirect_cycle_is_bounded() {
        let t = RouteTable::new(vec![
            RouteDefinition::new("/a").with_redirect("/b").exact(),
            RouteDefinition::new("/b").with_redirect("/a").exact(),
        ]);
        let err = t.resolve_full(&Target::from("/a")).unwrap_err();
        assert!(matches!(err, RouterError::RedirectLoop(path) if path == "/a"));
    }

    #[test]
    fn test_unmatched_path_resolves_with_no_definition() {
        let t = table();
        let (path, def) = t.resolve_full(&Target::from("/nowhere")).unwrap();
        assert_eq!(path, "/nowhere");
        assert!(def.is_none());
    }
}
