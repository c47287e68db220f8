// =============================================================================
// CACHE — Mémoïsation des formes dérivées
// =============================================================================
//
// Les transformations sont PURES : (forme source, transformation) détermine
// entièrement le résultat. On peut donc mémoriser chaque forme dérivée
// et la resservir telle quelle.
//
// La clé de cache est la forme source COMPLÈTE (pas seulement son nom :
// deux formes "User" différentes ne doivent pas se confondre) plus la
// requête ShapeTransform.
//
// Seuls les succès sont mémorisés. Le Transformer est partageable entre
// threads (DashMap + compteurs atomiques).
//
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::{debug, trace};

use super::config::TransformerConfig;
use super::error::Result;
use super::shape::ShapeDescriptor;
use super::transform::ShapeTransform;

type CacheKey = (ShapeDescriptor, ShapeTransform);

/// Compteurs d'utilisation du cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Debug)]
pub struct Transformer {
    config: TransformerConfig,
    cache: DashMap<CacheKey, ShapeDescriptor>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for Transformer {
    fn default() -> Self {
        Transformer::new(TransformerConfig::default())
    }
}

impl Transformer {
    pub fn new(config: TransformerConfig) -> Self {
        Transformer {
            config,
            cache: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &TransformerConfig {
        &self.config
    }

    /// Applique une transformation, en passant par le cache si activé.
    pub fn apply(&self, shape: &ShapeDescriptor, transform: &ShapeTransform) -> Result<ShapeDescriptor> {
        if !self.config.caching() {
            return transform.apply(shape);
        }

        let key = (shape.clone(), transform.clone());
        if let Some(hit) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(shape = shape.name(), op = transform.name(), "cache hit");
            return Ok(hit.value().clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(shape = shape.name(), op = transform.name(), "cache miss");
        let derived = transform.apply(shape)?;

        if self.cache.len() >= self.config.cache_capacity {
            debug!(
                capacity = self.config.cache_capacity,
                "cache des formes dérivées plein, vidage"
            );
            self.cache.clear();
        }
        self.cache.insert(key, derived.clone());
        Ok(derived)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.len(),
        }
    }

    /// Vide le cache (les compteurs sont conservés)
    pub fn clear(&self) {
        self.cache.clear();
    }
}
