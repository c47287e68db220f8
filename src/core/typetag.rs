// =============================================================================
// TYPETAG — Les types élémentaires du système
// =============================================================================
//
// Un TypeTag désigne le type d'un champ, d'un paramètre ou d'un membre
// d'union. C'est la brique de base de tous les descripteurs :
//
//   - les types primitifs : string, number, boolean
//   - les types "vides" : null, undefined, void
//   - les littéraux chaîne : "admin" (utilisés comme clés de Record)
//   - les références à une forme déclarée : User
//   - les unions : string | number
//
// L'ASSIGNABILITÉ entre deux tags est ici l'ÉGALITÉ des tags : "admin"
// n'est pas considéré comme assignable à string. C'est ce qui rend
// Exclude / Extract décidables sans sous-typage.
//
// =============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

use super::union::UnionDescriptor;

/// Un type dans le système de descripteurs.
///
/// Au format d'échange, le tag est discriminé par `kind` :
/// `{"kind":"number"}`, `{"kind":"shape","name":"User"}`,
/// `{"kind":"union","members":[...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    /// Retour d'une procédure (aucune valeur utile)
    Void,
    /// Littéral chaîne : "admin"
    Literal { value: String },
    /// Référence à une forme nommée (résolue par le catalogue)
    Shape { name: String },
    /// Union de plusieurs tags (jamais imbriquée après construction)
    Union(UnionDescriptor),
}

impl TypeTag {
    pub fn literal(value: &str) -> Self {
        TypeTag::Literal { value: value.to_string() }
    }

    pub fn shape(name: &str) -> Self {
        TypeTag::Shape { name: name.to_string() }
    }

    /// Construit une union aplatie et sans doublons
    pub fn union<I: IntoIterator<Item = TypeTag>>(members: I) -> Self {
        TypeTag::Union(members.into_iter().collect())
    }

    /// null ou undefined : ce que NonNullable retire
    pub fn is_nullish(&self) -> bool {
        matches!(self, TypeTag::Null | TypeTag::Undefined)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeTag::String | TypeTag::Number | TypeTag::Boolean)
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            TypeTag::Literal { value } => Some(value),
            _ => None,
        }
    }

    pub fn shape_name(&self) -> Option<&str> {
        match self {
            TypeTag::Shape { name } => Some(name),
            _ => None,
        }
    }

    /// Toutes les formes référencées par ce tag, unions comprises
    pub fn referenced_shapes(&self) -> Vec<&str> {
        match self {
            TypeTag::Shape { name } => vec![name.as_str()],
            TypeTag::Union(u) => u.iter().flat_map(|m| m.referenced_shapes()).collect(),
            _ => vec![],
        }
    }
}

/// Littéral chaîne au format JS : `"admin"`, `"\u001b"`.
///
/// L'échappement JSON est un sous-ensemble valide des littéraux JS/TS.
pub fn string_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::String => write!(f, "string"),
            TypeTag::Number => write!(f, "number"),
            TypeTag::Boolean => write!(f, "boolean"),
            TypeTag::Null => write!(f, "null"),
            TypeTag::Undefined => write!(f, "undefined"),
            TypeTag::Void => write!(f, "void"),
            TypeTag::Literal { value } => write!(f, "{}", string_literal(value)),
            TypeTag::Shape { name } => write!(f, "{}", name),
            TypeTag::Union(u) => write!(f, "{}", u),
        }
    }
}
