// =============================================================================
// CORE — Module principal des descripteurs de types
// =============================================================================
//
// Ce module regroupe toute la logique pure :
// pas de fichiers, pas de réseau — uniquement des descripteurs
// immuables et des fonctions qui en dérivent de nouveaux.
//
// Architecture :
//   typetag   → les types élémentaires (string, number, null, shape(..)...)
//   shape     → la forme d'un enregistrement (= l'"interface")
//   union     → l'ensemble de types alternatifs (= "A | B | C")
//   signature → la signature d'une fonction
//   transform → la table des opérations (Partial, Pick, Exclude...)
//   pipeline  → composition de transformations (Partial<Pick<..>>)
//   cache     → mémoïsation des formes dérivées
//   catalog   → les déclarations nommées d'un programme
//   validate  → la vérification de cohérence
//   config    → la configuration du Transformer
//   error     → le type d'erreur du crate
//
// =============================================================================

pub mod error;
pub mod config;
pub mod typetag;
pub mod shape;
pub mod union;
pub mod signature;
pub mod transform;
pub mod pipeline;
pub mod cache;
pub mod catalog;
pub mod validate;
