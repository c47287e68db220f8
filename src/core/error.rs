// =============================================================================
// ERROR — Les erreurs du crate
// =============================================================================
//
// Deux erreurs font partie du contrat des opérations :
//   - UnknownKey   : Pick demande un champ absent de la forme source
//   - DuplicateKey : Record reçoit un ensemble de clés avec répétitions
//
// Les autres proviennent des constructeurs, du catalogue et de l'import
// au format d'échange. Toutes sont locales et déterministes : on ne
// réessaie pas, on corrige l'entrée.
//
// =============================================================================

use std::result;
use thiserror::Error;

use super::typetag::TypeTag;
use super::validate::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Pick : clé absente de la forme source
    #[error("clé inconnue '{key}' dans la forme '{shape}'")]
    UnknownKey { shape: String, key: String },

    /// Record : la même clé apparaît deux fois
    #[error("clé dupliquée '{key}' dans l'ensemble de clés")]
    DuplicateKey { key: String },

    /// Record depuis une union : seuls les littéraux peuvent servir de clés
    #[error("le type '{tag}' ne peut pas servir de clé (littéral attendu)")]
    NonLiteralKey { tag: TypeTag },

    #[error("champ dupliqué '{field}' dans la forme '{shape}'")]
    DuplicateField { shape: String, field: String },

    #[error("'{name}' est déjà déclaré dans le catalogue")]
    DuplicateDeclaration { name: String },

    #[error("la forme '{name}' n'est pas déclarée")]
    UnresolvedShape { name: String },

    #[error("l'union '{name}' n'est pas déclarée")]
    UnresolvedUnion { name: String },

    /// Document d'échange illisible (JSON mal formé, champ manquant...)
    #[error("document d'échange invalide : {0}")]
    Exchange(String),

    /// Document lisible mais descripteurs mal formés
    #[error("{} erreur(s) de validation : {}", .0.len(), join_messages(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for ShapeError {
    fn from(e: serde_json::Error) -> Self {
        ShapeError::Exchange(e.to_string())
    }
}

impl From<Vec<ValidationError>> for ShapeError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ShapeError::Invalid(errors)
    }
}

pub type Result<T> = result::Result<T, ShapeError>;
