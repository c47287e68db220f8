// =============================================================================
// CONFIG — Configuration du Transformer
// =============================================================================
//
// Pas de variables d'environnement ni de fichier : l'appelant construit
// la configuration (ou la désérialise depuis son propre format).
//
// =============================================================================

use serde::{Deserialize, Serialize};

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    1024
}

/// Configuration du cache de formes dérivées.
///
/// ```rust
/// use typeshape::core::config::TransformerConfig;
///
/// let config: TransformerConfig = serde_json::from_str(r#"{ "cache_capacity": 16 }"#).unwrap();
/// assert!(config.cache_enabled);
/// assert_eq!(config.cache_capacity, 16);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransformerConfig {
    /// Active la mémoïsation (défaut : true)
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,

    /// Nombre maximal d'entrées (défaut : 1024).
    ///
    /// Quand le cache est plein, il est vidé avant la prochaine insertion.
    /// Une capacité de 0 revient à désactiver le cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        TransformerConfig {
            cache_enabled: default_cache_enabled(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl TransformerConfig {
    /// Configuration sans cache : chaque requête est recalculée
    pub fn uncached() -> Self {
        TransformerConfig {
            cache_enabled: false,
            ..Default::default()
        }
    }

    /// Le cache est-il réellement utilisable ?
    pub fn caching(&self) -> bool {
        self.cache_enabled && self.cache_capacity > 0
    }
}
