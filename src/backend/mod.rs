// =============================================================================
// BACKEND — Traduction des descripteurs vers des formats concrets
// =============================================================================
//
// Le backend traduit les descripteurs en documents textuels. Grâce au
// trait Backend, on peut supporter :
//   - JSON (le format d'échange : export ET import)
//   - TypeScript (rendu des déclarations, export seulement)
//
// Le cœur (module core) ne connaît JAMAIS les backends.
// C'est le backend qui traduit Shape → document, Catalog → document, etc.
//
// =============================================================================

pub mod json;
pub mod typescript;

use crate::core::catalog::Catalog;
use crate::core::error::Result;
use crate::core::shape::ShapeDescriptor;
use crate::core::signature::FunctionSignatureDescriptor;
use crate::core::union::UnionDescriptor;

/// Un document produit par un backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    /// Format d'échange JSON
    Json(String),
    /// Déclarations TypeScript
    TypeScript(String),
}

impl Document {
    pub fn as_str(&self) -> &str {
        match self {
            Document::Json(s) => s,
            Document::TypeScript(s) => s,
        }
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait abstrait pour tous les backends.
///
/// Chaque backend traduit les descripteurs vers son propre format.
pub trait Backend {
    fn export_shape(&self, shape: &ShapeDescriptor) -> Result<Document>;

    /// `name` est le nom de l'alias (`type Primitive = ...`)
    fn export_union(&self, name: &str, union: &UnionDescriptor) -> Result<Document>;

    fn export_signature(&self, signature: &FunctionSignatureDescriptor) -> Result<Document>;

    /// Toutes les déclarations, dans l'ordre du catalogue
    fn export_catalog(&self, catalog: &Catalog) -> Result<Document>;

    /// Retourne le nom du backend
    fn name(&self) -> &str;
}
