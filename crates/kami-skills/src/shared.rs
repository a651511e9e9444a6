//! A catalog handle that can be swapped while readers hold snapshots.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::catalog::SkillCatalog;

/// Shared, hot-swappable access to the current [`SkillCatalog`].
///
/// Readers take an `Arc` snapshot and keep using it for the whole request;
/// [`SharedCatalog::replace`] installs a new table without disturbing them.
#[derive(Debug, Clone)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Arc<SkillCatalog>>>,
}

impl SharedCatalog {
    /// Wrap a catalog.
    pub fn new(catalog: SkillCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// The catalog in effect right now.
    pub fn current(&self) -> Arc<SkillCatalog> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in a new catalog, returning the one it replaced.
    pub fn replace(&self, catalog: SkillCatalog) -> Arc<SkillCatalog> {
        let next = Arc::new(catalog);
        info!(
            skills = next.len(),
            unparsed = next.unparsed().len(),
            "Skill catalog swapped"
        );
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}

impl From<SkillCatalog> for SharedCatalog {
    fn from(catalog: SkillCatalog) -> Self {
        Self::new(catalog)
    }
}
