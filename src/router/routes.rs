//! Route table and path resolution
//!
//! The table mirrors the application's view hierarchy flattened into full
//! paths. `:param` segments bind into the resolved route's params map, and
//! redirect entries are followed before the guard ever sees the target.

use std::collections::HashMap;

/// Path of the login view
pub const LOGIN_ROUTE: &str = "/login";

/// Default landing route for authenticated users
pub const KNOWLEDGE_BASE_LIST_ROUTE: &str = "/platform/knowledge-bases";

/// Route param carrying the knowledge-base identifier
pub const KB_ID_PARAM: &str = "kbId";

/// Navigation admission flags attached to a route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Whether the route requires an authenticated user; absent means yes
    pub requires_auth: Option<bool>,
    /// Whether the route requires a completed setup; absent means yes
    pub requires_init: Option<bool>,
}

impl RouteMeta {
    /// Meta for routes open to unauthenticated users.
    pub fn open() -> Self {
        Self {
            requires_auth: Some(false),
            requires_init: Some(false),
        }
    }

    /// Meta for routes behind the auth gate.
    pub fn protected() -> Self {
        Self {
            requires_auth: Some(true),
            requires_init: Some(true),
        }
    }
}

/// One entry in the route table
#[derive(Debug, Clone)]
pub struct RouteDef {
    /// Full path pattern, `:param` segments allowed
    pub path: &'static str,
    /// Route name for programmatic navigation
    pub name: Option<&'static str>,
    /// Admission flags
    pub meta: RouteMeta,
    /// Redirect target; followed during resolution
    pub redirect: Option<&'static str>,
}

impl RouteDef {
    fn page(path: &'static str, name: &'static str, meta: RouteMeta) -> Self {
        Self {
            path,
            name: Some(name),
            meta,
            redirect: None,
        }
    }

    fn redirect(path: &'static str, target: &'static str) -> Self {
        Self {
            path,
            name: None,
            meta: RouteMeta::default(),
            redirect: Some(target),
        }
    }
}

/// A resolved navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Concrete path being navigated to
    pub path: String,
    /// Route name, when the entry has one
    pub name: Option<&'static str>,
    /// Admission flags
    pub meta: RouteMeta,
    /// Bound `:param` values
    pub params: HashMap<String, String>,
}

impl ResolvedRoute {
    /// Value of the knowledge-base id param, if this route carries one.
    pub fn kb_id(&self) -> Option<&str> {
        self.params.get(KB_ID_PARAM).map(String::as_str)
    }
}

/// Client-side route table
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<RouteDef>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Build the application route table.
    pub fn new() -> Self {
        let protected = RouteMeta::protected();
        Self {
            routes: vec![
                RouteDef::redirect("/", KNOWLEDGE_BASE_LIST_ROUTE),
                RouteDef::page(LOGIN_ROUTE, "login", RouteMeta::open()),
                RouteDef::page("/knowledgeBase", "home", protected),
                RouteDef {
                    path: "/platform",
                    name: Some("platform"),
                    meta: protected,
                    redirect: Some(KNOWLEDGE_BASE_LIST_ROUTE),
                },
                RouteDef::redirect("/platform/tenant", "/platform/settings"),
                RouteDef::page("/platform/settings", "settings", protected),
                RouteDef::page(KNOWLEDGE_BASE_LIST_ROUTE, "knowledgeBaseList", protected),
                RouteDef::page(
                    "/platform/knowledge-bases/:kbId",
                    "knowledgeBaseDetail",
                    protected,
                ),
                RouteDef::page("/platform/agents", "agentList", protected),
                // `creatChat` and lowercase `chatid` are the paths the
                // application actually serves; do not "fix" the spelling.
                RouteDef::page("/platform/creatChat", "globalCreatChat", protected),
                RouteDef::page(
                    "/platform/knowledge-bases/:kbId/creatChat",
                    "kbCreatChat",
                    protected,
                ),
                RouteDef::page("/platform/chat/:chatid", "chat", protected),
            ],
        }
    }

    /// Resolve a path to a navigation target, following redirects.
    ///
    /// Returns `None` for paths outside the table.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let mut current = normalize(path);
        // Redirect chains in the table are short; the bound only guards
        // against an accidental cycle.
        for _ in 0..8 {
            let (def, params) = self.match_route(&current)?;
            match def.redirect {
                Some(target) => current = normalize(target),
                None => {
                    return Some(ResolvedRoute {
                        path: current,
                        name: def.name,
                        meta: def.meta,
                        params,
                    })
                }
            }
        }
        tracing::warn!(path, "route redirect chain too long");
        None
    }

    fn match_route(&self, path: &str) -> Option<(&RouteDef, HashMap<String, String>)> {
        self.routes
            .iter()
            .find_map(|def| match_path(def.path, path).map(|params| (def, params)))
    }
}

/// Match a concrete path against a `:param` pattern, binding params.
fn match_path(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (pat, seg) in pattern_segments.iter().zip(&path_segments) {
        match pat.strip_prefix(':') {
            Some(param) => {
                params.insert(param.to_string(), (*seg).to_string());
            }
            None if pat == seg => {}
            None => return None,
        }
    }
    Some(params)
}

/// Strip query/fragment and trailing slashes, keep a leading slash.
fn normalize(path: &str) -> String {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_redirects_to_list() {
        let router = Router::new();
        let route = router.resolve("/").unwrap();
        assert_eq!(route.path, KNOWLEDGE_BASE_LIST_ROUTE);
        assert_eq!(route.name, Some("knowledgeBaseList"));
    }

    #[test]
    fn test_platform_redirect_chain() {
        let router = Router::new();
        assert_eq!(
            router.resolve("/platform").unwrap().path,
            KNOWLEDGE_BASE_LIST_ROUTE
        );
        assert_eq!(
            router.resolve("/platform/tenant").unwrap().path,
            "/platform/settings"
        );
    }

    #[test]
    fn test_param_binding() {
        let router = Router::new();
        let route = router.resolve("/platform/knowledge-bases/kb-42").unwrap();
        assert_eq!(route.name, Some("knowledgeBaseDetail"));
        assert_eq!(route.kb_id(), Some("kb-42"));

        let chat = router
            .resolve("/platform/knowledge-bases/kb-42/creatChat")
            .unwrap();
        assert_eq!(chat.name, Some("kbCreatChat"));
        assert_eq!(chat.kb_id(), Some("kb-42"));
    }

    #[test]
    fn test_chat_paths_keep_served_spelling() {
        let router = Router::new();
        let create = router.resolve("/platform/creatChat").unwrap();
        assert_eq!(create.name, Some("globalCreatChat"));

        let chat = router.resolve("/platform/chat/ch-9").unwrap();
        assert_eq!(chat.name, Some("chat"));
        assert_eq!(chat.params.get("chatid").map(String::as_str), Some("ch-9"));

        // The camel-cased variants are not registered paths.
        assert!(router.resolve("/platform/create-chat").is_none());
    }

    #[test]
    fn test_login_route_is_open() {
        let router = Router::new();
        let route = router.resolve("/login").unwrap();
        assert_eq!(route.meta.requires_auth, Some(false));
        assert_eq!(route.meta.requires_init, Some(false));
    }

    #[test]
    fn test_unknown_path() {
        let router = Router::new();
        assert!(router.resolve("/platform/unknown").is_none());
    }

    #[test]
    fn test_normalize_strips_query_and_trailing_slash() {
        let router = Router::new();
        let route = router.resolve("/login/?next=%2Fplatform").unwrap();
        assert_eq!(route.path, LOGIN_ROUTE);
    }
}
