// =============================================================================
// BACKEND JSON — Le format d'échange des descripteurs
// =============================================================================
//
// Format (un champ = nom + tag + modificateurs) :
//
//   {
//     "name": "User",
//     "fields": [
//       { "name": "id", "type": { "kind": "number" }, "optional": false, "readonly": true },
//       { "name": "boss", "type": { "kind": "shape", "name": "User" } }
//     ]
//   }
//
// `optional` et `readonly` valent false s'ils sont absents.
//
// À l'IMPORT, le document est désérialisé puis VALIDÉ : un document
// lisible mais mal formé (champ dupliqué, union imbriquée...) est refusé
// avec ShapeError::Invalid.
//
// =============================================================================

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::backend::{Backend, Document};
use crate::core::catalog::Catalog;
use crate::core::error::Result;
use crate::core::pipeline::Pipeline;
use crate::core::shape::ShapeDescriptor;
use crate::core::signature::FunctionSignatureDescriptor;
use crate::core::union::{UnionDescriptor, UnionDocument};
use crate::core::validate::{self, ValidationError};

/// Backend JSON
#[derive(Debug, Clone, Default)]
pub struct JsonBackend {
    /// Sortie indentée
    pub pretty: bool,
}

impl JsonBackend {
    pub fn new() -> Self {
        JsonBackend { pretty: false }
    }

    pub fn pretty() -> Self {
        JsonBackend { pretty: true }
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<Document> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(Document::Json(text))
    }

    fn read<T, F>(&self, text: &str, what: &str, check: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce(&T) -> std::result::Result<(), Vec<ValidationError>>,
    {
        let value: T = serde_json::from_str(text)?;
        check(&value)?;
        debug!(what, bytes = text.len(), "document d'échange importé");
        Ok(value)
    }

    pub fn import_shape(&self, text: &str) -> Result<ShapeDescriptor> {
        self.read(text, "shape", validate::validate_shape)
    }

    /// Un document avec doublons ou union imbriquée est refusé, plutôt que
    /// normalisé en silence.
    pub fn import_union(&self, text: &str) -> Result<UnionDescriptor> {
        let document: UnionDocument = self.read(text, "union", validate::validate_union_document)?;
        Ok(document.into())
    }

    pub fn import_signature(&self, text: &str) -> Result<FunctionSignatureDescriptor> {
        self.read(text, "signature", validate::validate_signature)
    }

    pub fn import_catalog(&self, text: &str) -> Result<Catalog> {
        self.read(text, "catalog", validate::validate_catalog)
    }

    /// Une liste de requêtes `{"op": ...}` ; rien à valider au-delà du parsing
    pub fn import_pipeline(&self, text: &str) -> Result<Pipeline> {
        self.read(text, "pipeline", |_| Ok(()))
    }

    pub fn export_pipeline(&self, pipeline: &Pipeline) -> Result<Document> {
        self.render(pipeline)
    }
}

impl Backend for JsonBackend {
    fn export_shape(&self, shape: &ShapeDescriptor) -> Result<Document> {
        self.render(shape)
    }

    fn export_union(&self, _name: &str, union: &UnionDescriptor) -> Result<Document> {
        self.render(union)
    }

    fn export_signature(&self, signature: &FunctionSignatureDescriptor) -> Result<Document> {
        self.render(signature)
    }

    fn export_catalog(&self, catalog: &Catalog) -> Result<Document> {
        self.render(catalog)
    }

    fn name(&self) -> &str {
        "JSON"
    }
}
