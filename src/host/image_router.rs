use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Maps image route keys (request path without extension) to files on disk.
/// Cloned into the HTTP layer so images are served without the host lock.
#[derive(Clone, Default)]
pub struct ImageRouter {
    routes: Arc<DashMap<String, PathBuf>>,
}

impl ImageRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_route(&self, key: &str, path: PathBuf) {
        self.routes.insert(key.to_string(), path);
    }

    /// Resolve a request path such as `/files/trader/avatar/x.jpg`
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        let key = match url.rsplit_once('.') {
            Some((stem, ext)) if !ext.contains('/') => stem,
            _ => url,
        };
        self.routes.get(key).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
