use blend_core::Catalog;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;

/// Active catalog. Readers clone the inner `Arc`; a reload swaps it whole.
pub type SharedCatalog = Arc<RwLock<Arc<Catalog>>>;

#[derive(Clone)]
pub struct AppState {
    pub catalog: SharedCatalog,
    /// Where reloads read from. `None` when serving the built-in catalog.
    pub content_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(catalog: Catalog, content_dir: Option<PathBuf>) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Arc::new(catalog))),
            content_dir,
        }
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.read().clone()
    }

    /// Installs `catalog` and returns the one it replaced.
    pub fn swap_catalog(&self, catalog: Catalog) -> Arc<Catalog> {
        std::mem::replace(&mut *self.catalog.write(), Arc::new(catalog))
    }
}
