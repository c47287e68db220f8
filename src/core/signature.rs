// =============================================================================
// SIGNATURE — La signature d'une fonction
// =============================================================================
//
// Une signature, c'est une liste ORDONNÉE de paramètres et un type de retour :
//
//   function updateUserDetails(id: number, email: string): void
//
// La position des paramètres est significative (Parameters<F> est un tuple).
// Les noms des paramètres ne servent qu'à l'affichage.
//
// =============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

use super::typetag::TypeTag;

/// Un paramètre : nom (présentation uniquement) + type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub tag: TypeTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSignatureDescriptor {
    /// Nom de la fonction (absent pour une expression de type fonction)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub params: Vec<ParamDescriptor>,
    pub returns: TypeTag,
}

impl FunctionSignatureDescriptor {
    pub fn new(name: &str, returns: TypeTag) -> Self {
        FunctionSignatureDescriptor {
            name: Some(name.to_string()),
            params: Vec::new(),
            returns,
        }
    }

    /// Type fonction sans nom : `(x: number) => string`
    pub fn anonymous(returns: TypeTag) -> Self {
        FunctionSignatureDescriptor {
            name: None,
            params: Vec::new(),
            returns,
        }
    }

    /// Ajoute un paramètre en dernière position
    pub fn param(mut self, name: &str, tag: TypeTag) -> Self {
        self.params.push(ParamDescriptor {
            name: name.to_string(),
            tag,
        });
        self
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// `id: number, email: string`
    pub fn params_list(&self) -> String {
        self.params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.tag))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FunctionSignatureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) => {}", self.params_list(), self.returns)
    }
}
