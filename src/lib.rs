// =============================================================================
// TYPESHAPE — Transformations de formes de types
// =============================================================================
//
// Typeshape réifie les transformations de types "utilitaires" d'un système
// de types structurel (Partial, Readonly, Pick, Omit, Record, Exclude,
// Extract, NonNullable, ReturnType, Parameters) sous forme de descripteurs
// manipulables à l'exécution.
//
// Architecture :
//   core/     → Les descripteurs et les transformations pures
//   backend/  → Traduction vers des formats concrets (JSON, TypeScript)
//
// Concepts fondamentaux :
//   TypeTag   = un type (string, number, référence à une forme, union...)
//   Shape     = un type enregistrement (champs nommés + modificateurs)
//   Union     = un ensemble de types alternatifs
//   Signature = les paramètres et le retour d'une fonction
//
// =============================================================================

pub mod core;
pub mod backend;
