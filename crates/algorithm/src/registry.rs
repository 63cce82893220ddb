//! Name → implementation lookup, one map per category.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::{info, warn};

use crate::capability::{
    Algorithm, Category, DistillAlgorithm, FilterAlgorithm, RewriteAlgorithm, SyntheticAlgorithm,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("algorithm '{name}' not found in category '{category}'")]
    NotFound { category: Category, name: String },
}

type Slot<T> = RwLock<HashMap<String, Arc<T>>>;

/// Registry of algorithms keyed by `(category, name)`.
///
/// Names are case-sensitive. Registering a name that already exists in the
/// same category replaces the earlier implementation (last writer wins) and
/// logs a warning.
#[derive(Default)]
pub struct AlgorithmRegistry {
    filters: Slot<dyn FilterAlgorithm>,
    rewrites: Slot<dyn RewriteAlgorithm>,
    distills: Slot<dyn DistillAlgorithm>,
    synthetics: Slot<dyn SyntheticAlgorithm>,
}

fn read<T: ?Sized>(slot: &Slot<T>) -> RwLockReadGuard<'_, HashMap<String, Arc<T>>> {
    slot.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T: ?Sized>(slot: &Slot<T>) -> RwLockWriteGuard<'_, HashMap<String, Arc<T>>> {
    slot.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn bind<T: ?Sized>(slot: &Slot<T>, category: Category, name: String, value: Arc<T>) {
    let replaced = write(slot).insert(name.clone(), value).is_some();
    if replaced {
        warn!(%category, %name, "algorithm re-registered; previous implementation replaced");
    } else {
        info!(%category, %name, "algorithm registered");
    }
}

fn lookup<T: ?Sized>(slot: &Slot<T>, category: Category, name: &str) -> Result<Arc<T>, RegistryError> {
    read(slot)
        .get(name)
        .cloned()
        .ok_or_else(|| RegistryError::NotFound {
            category,
            name: name.to_string(),
        })
}

fn sorted_names<T: ?Sized>(slot: &Slot<T>) -> Vec<String> {
    let mut names: Vec<String> = read(slot).keys().cloned().collect();
    names.sort();
    names
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `algorithm` within the algorithm's own category.
    pub fn register(&self, name: impl Into<String>, algorithm: Algorithm) {
        let name = name.into();
        match algorithm {
            Algorithm::Filter(a) => bind(&self.filters, Category::Filter, name, a),
            Algorithm::Rewrite(a) => bind(&self.rewrites, Category::Rewrite, name, a),
            Algorithm::Distill(a) => bind(&self.distills, Category::Distill, name, a),
            Algorithm::Synthetic(a) => bind(&self.synthetics, Category::Synthetic, name, a),
        }
    }

    /// Register a filter under its own `name()`.
    pub fn register_filter(&self, filter: Arc<dyn FilterAlgorithm>) {
        let name = filter.name().to_string();
        bind(&self.filters, Category::Filter, name, filter);
    }

    pub fn register_rewrite(&self, rewrite: Arc<dyn RewriteAlgorithm>) {
        let name = rewrite.name().to_string();
        bind(&self.rewrites, Category::Rewrite, name, rewrite);
    }

    pub fn register_distill(&self, distill: Arc<dyn DistillAlgorithm>) {
        let name = distill.name().to_string();
        bind(&self.distills, Category::Distill, name, distill);
    }

    pub fn register_synthetic(&self, synthetic: Arc<dyn SyntheticAlgorithm>) {
        let name = synthetic.name().to_string();
        bind(&self.synthetics, Category::Synthetic, name, synthetic);
    }

    pub fn resolve(&self, category: Category, name: &str) -> Result<Algorithm, RegistryError> {
        Ok(match category {
            Category::Filter => Algorithm::Filter(self.resolve_filter(name)?),
            Category::Rewrite => Algorithm::Rewrite(self.resolve_rewrite(name)?),
            Category::Distill => Algorithm::Distill(self.resolve_distill(name)?),
            Category::Synthetic => Algorithm::Synthetic(self.resolve_synthetic(name)?),
        })
    }

    pub fn resolve_filter(&self, name: &str) -> Result<Arc<dyn FilterAlgorithm>, RegistryError> {
        lookup(&self.filters, Category::Filter, name)
    }

    pub fn resolve_rewrite(&self, name: &str) -> Result<Arc<dyn RewriteAlgorithm>, RegistryError> {
        lookup(&self.rewrites, Category::Rewrite, name)
    }

    pub fn resolve_distill(&self, name: &str) -> Result<Arc<dyn DistillAlgorithm>, RegistryError> {
        lookup(&self.distills, Category::Distill, name)
    }

    pub fn resolve_synthetic(
        &self,
        name: &str,
    ) -> Result<Arc<dyn SyntheticAlgorithm>, RegistryError> {
        lookup(&self.synthetics, Category::Synthetic, name)
    }

    /// Registered names in `category`, sorted.
    pub fn names(&self, category: Category) -> Vec<String> {
        match category {
            Category::Filter => sorted_names(&self.filters),
            Category::Rewrite => sorted_names(&self.rewrites),
            Category::Distill => sorted_names(&self.distills),
            Category::Synthetic => sorted_names(&self.synthetics),
        }
    }

    pub fn contains(&self, category: Category, name: &str) -> bool {
        match category {
            Category::Filter => read(&self.filters).contains_key(name),
            Category::Rewrite => read(&self.rewrites).contains_key(name),
            Category::Distill => read(&self.distills).contains_key(name),
            Category::Synthetic => read(&self.synthetics).contains_key(name),
        }
    }
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("filters", &self.names(Category::Filter))
            .field("rewrites", &self.names(Category::Rewrite))
            .field("distills", &self.names(Category::Distill))
            .field("synthetics", &self.names(Category::Synthetic))
            .finish()
    }
}
