// =============================================================================
// VALIDATE — Vérification de la cohérence des descripteurs
// =============================================================================
//
// Les constructeurs (ShapeDescriptor::add, UnionDescriptor::insert...)
// garantissent les invariants. Mais un descripteur DÉSÉRIALISÉ depuis le
// format d'échange les contourne. Ce module vérifie donc :
//   - Une forme n'a pas deux champs du même nom
//   - Une union n'a ni doublons ni union imbriquée
//   - Une signature n'a pas deux paramètres du même nom
//   - Dans un catalogue, toute référence shape(X) désigne une forme déclarée
//
// Toutes les erreurs sont collectées, pas seulement la première.
//
// =============================================================================

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::catalog::{Catalog, Declaration};
use super::shape::ShapeDescriptor;
use super::signature::FunctionSignatureDescriptor;
use super::typetag::TypeTag;
use super::union::{UnionDescriptor, UnionDocument};

/// Erreur de validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(message: String) -> Self {
        ValidationError { message }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation error: {}", self.message)
    }
}

fn into_result(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Vérifie un tag isolé (unions bien formées, récursivement)
fn check_tag(tag: &TypeTag, context: &str, errors: &mut Vec<ValidationError>) {
    if let TypeTag::Union(union) = tag {
        check_union(union, context, errors);
    }
}

fn check_union(union: &UnionDescriptor, context: &str, errors: &mut Vec<ValidationError>) {
    check_members(union.members(), context, errors);
}

fn check_members(members: &[TypeTag], context: &str, errors: &mut Vec<ValidationError>) {
    for (i, member) in members.iter().enumerate() {
        if members[..i].contains(member) {
            errors.push(ValidationError::new(format!(
                "{} : membre '{}' dupliqué dans l'union",
                context, member
            )));
        }
        if matches!(member, TypeTag::Union(_)) {
            errors.push(ValidationError::new(format!(
                "{} : union imbriquée '{}' (les unions doivent être aplaties)",
                context, member
            )));
        }
    }
}

fn check_shape(shape: &ShapeDescriptor, errors: &mut Vec<ValidationError>) {
    for name in shape.duplicate_names() {
        errors.push(ValidationError::new(format!(
            "Forme '{}' : champ '{}' dupliqué",
            shape.name(),
            name
        )));
    }
    for field in shape.iter() {
        if field.name.is_empty() {
            errors.push(ValidationError::new(format!(
                "Forme '{}' : champ sans nom",
                shape.name()
            )));
        }
        check_tag(
            &field.tag,
            &format!("Forme '{}', champ '{}'", shape.name(), field.name),
            errors,
        );
    }
}

fn check_signature(signature: &FunctionSignatureDescriptor, errors: &mut Vec<ValidationError>) {
    let label = signature.name.as_deref().unwrap_or("<anonyme>");
    let mut seen = HashSet::new();
    for param in &signature.params {
        if !seen.insert(param.name.as_str()) {
            errors.push(ValidationError::new(format!(
                "Fonction '{}' : paramètre '{}' dupliqué",
                label, param.name
            )));
        }
        check_tag(
            &param.tag,
            &format!("Fonction '{}', paramètre '{}'", label, param.name),
            errors,
        );
    }
    check_tag(&signature.returns, &format!("Fonction '{}', retour", label), errors);
}

/// Vérifie qu'une forme est bien formée.
pub fn validate_shape(shape: &ShapeDescriptor) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_shape(shape, &mut errors);
    into_result(errors)
}

/// Vérifie qu'une union est un ensemble plat.
pub fn validate_union(union: &UnionDescriptor) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_union(union, "Union", &mut errors);
    into_result(errors)
}

/// Vérifie une union telle qu'écrite dans un document : les doublons et
/// les unions imbriquées, que la normalisation ferait disparaître, sont
/// signalés.
pub fn validate_union_document(document: &UnionDocument) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_members(&document.members, "Union", &mut errors);
    into_result(errors)
}

pub fn validate_signature(signature: &FunctionSignatureDescriptor) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_signature(signature, &mut errors);
    into_result(errors)
}

/// Vérifie un catalogue complet.
///
/// Conditions :
/// - Chaque déclaration est bien formée
/// - Aucun nom n'est déclaré deux fois
/// - Toute référence shape(X) (champ, membre d'union, paramètre, retour)
///   désigne une interface ou un alias du catalogue
pub fn validate_catalog(catalog: &Catalog) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for decl in catalog.declarations() {
        if !seen.insert(decl.name()) {
            errors.push(ValidationError::new(format!(
                "'{}' est déclaré plusieurs fois",
                decl.name()
            )));
        }

        let mut referenced: Vec<&str> = Vec::new();
        match decl {
            Declaration::Shape(shape) | Declaration::Alias { shape, .. } => {
                check_shape(shape, &mut errors);
                for field in shape.iter() {
                    referenced.extend(field.tag.referenced_shapes());
                }
            }
            Declaration::Union { name, union } => {
                check_union(union, &format!("Union '{}'", name), &mut errors);
                for member in union.iter() {
                    referenced.extend(member.referenced_shapes());
                }
            }
            Declaration::Function { signature, .. } => {
                check_signature(signature, &mut errors);
                for param in &signature.params {
                    referenced.extend(param.tag.referenced_shapes());
                }
                referenced.extend(signature.returns.referenced_shapes());
            }
        }

        for target in referenced {
            if catalog.shape(target).is_none() {
                errors.push(ValidationError::new(format!(
                    "'{}' référence la forme '{}' qui n'est pas déclarée",
                    decl.name(),
                    target
                )));
            }
        }
    }

    into_result(errors)
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shape::FieldDescriptor;

    #[test]
    fn test_validate_shape_ok() {
        let mut s = ShapeDescriptor::new("User");
        s.add("id", TypeTag::Number).unwrap();
        assert!(validate_shape(&s).is_ok());
    }

    #[test]
    fn test_validate_shape_duplicate_field() {
        let s: ShapeDescriptor = serde_json::from_str(
            r#"{"name":"Bad","fields":[
                {"name":"a","type":{"kind":"string"}},
                {"name":"a","type":{"kind":"number"}},
                {"name":"","type":{"kind":"number"}}
            ]}"#,
        )
        .unwrap();
        let errors = validate_shape(&s).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("champ 'a' dupliqué"));
    }

    #[test]
    fn test_validate_union_duplicates_and_nesting() {
        let doc: UnionDocument = serde_json::from_str(
            r#"{"members":[
                {"kind":"string"},
                {"kind":"string"},
                {"kind":"union","members":[{"kind":"null"}]}
            ]}"#,
        )
        .unwrap();
        let errors = validate_union_document(&doc).unwrap_err();
        assert_eq!(errors.len(), 2);

        let normalized = UnionDescriptor::from(doc);
        assert_eq!(normalized.members(), &[TypeTag::String, TypeTag::Null]);
        assert!(validate_union(&normalized).is_ok());

        let ok = UnionDescriptor::from_iter([TypeTag::String, TypeTag::Null]);
        assert!(validate_union(&ok).is_ok());
    }

    #[test]
    fn test_validate_signature_duplicate_param() {
        let sig = FunctionSignatureDescriptor::new("f", TypeTag::Void)
            .param("x", TypeTag::Number)
            .param("x", TypeTag::String);
        let errors = validate_signature(&sig).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("'f'"));
    }

    #[test]
    fn test_validate_catalog_unresolved_reference() {
        let mut c = Catalog::new();
        let mut post = ShapeDescriptor::new("Post");
        post.add_field(FieldDescriptor::new("author", TypeTag::shape("Author")))
            .unwrap();
        c.declare_shape(post).unwrap();
        c.declare_function("latest", FunctionSignatureDescriptor::anonymous(TypeTag::shape("Post")))
            .unwrap();

        let errors = validate_catalog(&c).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("'Author'"));
    }

    #[test]
    fn test_validate_catalog_ok() {
        let mut c = Catalog::new();
        let mut user = ShapeDescriptor::new("User");
        user.add("id", TypeTag::Number).unwrap();
        c.declare_shape(user).unwrap();
        c.declare_union(
            "NullableUser",
            UnionDescriptor::from_iter([TypeTag::shape("User"), TypeTag::Null]),
        )
        .unwrap();
        assert!(validate_catalog(&c).is_ok());
    }

    #[test]
    fn test_validate_catalog_duplicate_names() {
        let c: Catalog = serde_json::from_str(
            r#"{"declarations":[
                {"decl":"shape","name":"A","fields":[]},
                {"decl":"union","name":"A","union":{"members":[]}}
            ]}"#,
        )
        .unwrap();
        let errors = validate_catalog(&c).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("plusieurs fois"));
    }
}
