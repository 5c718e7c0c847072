//! Dynamic Router
//!
//! Mod-registered hooks keyed by URL fragment. Every hook whose fragment
//! occurs in the request URL runs, in registration order, threading the
//! response output through.

use std::sync::Arc;
use tracing::info;

use super::RouteContext;
use crate::error::Result;

/// Incoming client request as seen by a hook
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    pub url: String,
    pub body: String,
    pub session_id: String,
}

/// Hook body: receives the request, the output so far and the host, and
/// returns the output to pass on.
pub type RouteAction =
    Arc<dyn Fn(&RouteRequest, String, &mut dyn RouteContext) -> Result<String> + Send + Sync>;

struct DynamicRoute {
    name: String,
    url: String,
    action: RouteAction,
}

#[derive(Default)]
pub struct DynamicRouter {
    routes: Vec<DynamicRoute>,
}

impl DynamicRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, url: &str, action: RouteAction) {
        info!("Registered dynamic route '{}' on {}", name, url);
        self.routes.push(DynamicRoute {
            name: name.to_string(),
            url: url.to_string(),
            action,
        });
    }

    /// Actions of every route matching the URL
    pub fn matching(&self, url: &str) -> Vec<RouteAction> {
        self.routes
            .iter()
            .filter(|route| url.contains(route.url.as_str()))
            .map(|route| route.action.clone())
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|route| route.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passthrough() -> RouteAction {
        Arc::new(
            |_req: &RouteRequest, output: String, _ctx: &mut dyn RouteContext| -> Result<String> {
                Ok(output)
            },
        )
    }

    #[test]
    fn test_matching_by_fragment() {
        let mut router = DynamicRouter::new();
        router.register("assort", "/client/trading/api/getTraderAssort/abc", passthrough());
        router.register("other", "/client/items", passthrough());

        assert_eq!(router.matching("/client/trading/api/getTraderAssort/abc").len(), 1);
        assert_eq!(router.matching("/client/trading/api/getTraderAssort/xyz").len(), 0);
        assert_eq!(router.matching("/client/items/prices").len(), 1);
        assert_eq!(router.names().collect::<Vec<_>>(), vec!["assort", "other"]);
    }
}
