// =============================================================================
// SHAPE — La forme d'un enregistrement
// =============================================================================
//
// Une ShapeDescriptor est la description d'un type enregistrement :
//   - un NOM (User, Partial<User>...)
//   - une séquence de CHAMPS, chacun avec un type et deux modificateurs :
//       optional  → le champ peut être absent      (name?: string)
//       readonly  → le champ n'est pas réassignable (readonly id: number)
//
// Les noms de champs forment un ENSEMBLE : jamais deux champs du même nom.
// L'ordre d'insertion est conservé (pour l'affichage et pour Pick), mais
// les transformations raisonnent par nom, jamais par position.
//
// EXEMPLE :
//
//   interface User {
//     id: number;
//     name: string;
//     email: string;
//   }
//
// En Rust :
//
// ```rust
// use typeshape::core::shape::ShapeDescriptor;
// use typeshape::core::typetag::TypeTag;
//
// let mut user = ShapeDescriptor::new("User");
// user.add("id", TypeTag::Number)?
//     .add("name", TypeTag::String)?
//     .add("email", TypeTag::String)?;
// # Ok::<(), typeshape::core::error::ShapeError>(())
// ```
//
// =============================================================================

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{Result, ShapeError};
use super::typetag::TypeTag;

/// Un champ d'une forme : nom + type + modificateurs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub tag: TypeTag,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub readonly: bool,
}

impl FieldDescriptor {
    /// Champ requis et mutable
    pub fn new(name: &str, tag: TypeTag) -> Self {
        FieldDescriptor {
            name: name.to_string(),
            tag,
            optional: false,
            readonly: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.readonly {
            write!(f, "readonly ")?;
        }
        write!(f, "{}", self.name)?;
        if self.optional {
            write!(f, "?")?;
        }
        write!(f, ": {}", self.tag)
    }
}

/// La forme complète : un nom et ses champs, dans l'ordre de déclaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl ShapeDescriptor {
    /// Crée une forme vide
    pub fn new(name: &str) -> Self {
        ShapeDescriptor {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    /// Construit une forme à partir d'une liste de champs.
    /// Échoue au premier nom de champ répété.
    pub fn from_fields<I>(name: &str, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = FieldDescriptor>,
    {
        let mut shape = ShapeDescriptor::new(name);
        for field in fields {
            shape.add_field(field)?;
        }
        Ok(shape)
    }

    /// Construction interne : l'appelant garantit l'unicité des noms
    /// (c'est le cas de toutes les transformations, fermées sur la source).
    pub(crate) fn from_unique(name: String, fields: Vec<FieldDescriptor>) -> Self {
        debug_assert!(has_unique_names(&fields));
        ShapeDescriptor { name, fields }
    }

    /// Ajoute un champ déjà construit
    pub fn add_field(&mut self, field: FieldDescriptor) -> Result<&mut Self> {
        if self.contains(&field.name) {
            return Err(ShapeError::DuplicateField {
                shape: self.name.clone(),
                field: field.name,
            });
        }
        self.fields.push(field);
        Ok(self)
    }

    /// Ajoute un champ requis et mutable
    pub fn add(&mut self, name: &str, tag: TypeTag) -> Result<&mut Self> {
        self.add_field(FieldDescriptor::new(name, tag))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Retourne le champ d'un nom donné
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Même ensemble de champs, indépendamment du nom de la forme et de
    /// l'ordre des champs.
    pub fn same_fields(&self, other: &ShapeDescriptor) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|f| other.field(&f.name) == Some(f))
    }

    /// Noms de champs apparaissant plus d'une fois (vide si bien formée)
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for f in &self.fields {
            *seen.entry(f.name.as_str()).or_insert(0) += 1;
        }
        let mut dups: Vec<&str> = Vec::new();
        for f in &self.fields {
            let name = f.name.as_str();
            if seen.get(name).copied().unwrap_or(0) > 1 && !dups.contains(&name) {
                dups.push(name);
            }
        }
        dups
    }

    /// Renomme la forme (utilisé par le catalogue pour les alias)
    pub fn renamed(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

fn has_unique_names(fields: &[FieldDescriptor]) -> bool {
    fields
        .iter()
        .enumerate()
        .all(|(i, f)| fields[..i].iter().all(|g| g.name != f.name))
}

impl<'a> IntoIterator for &'a ShapeDescriptor {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl fmt::Display for ShapeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.name)?;
        let parts: Vec<String> = self.fields.iter().map(|fd| fd.to_string()).collect();
        if !parts.is_empty() {
            write!(f, " {} ", parts.join("; "))?;
        }
        write!(f, "}}")
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// La forme User classique pour les tests
    fn user() -> ShapeDescriptor {
        let mut s = ShapeDescriptor::new("User");
        s.add("id", TypeTag::Number)
            .and_then(|s| s.add("name", TypeTag::String))
            .and_then(|s| s.add("email", TypeTag::String))
            .unwrap();
        s
    }

    #[test]
    fn test_create_shape() {
        let s = user();
        assert_eq!(s.len(), 3);
        assert_eq!(s.field_names(), vec!["id", "name", "email"]);
        assert_eq!(s.field("id").map(|f| &f.tag), Some(&TypeTag::Number));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut s = user();
        let err = s.add("id", TypeTag::String).unwrap_err();
        assert_eq!(
            err,
            ShapeError::DuplicateField {
                shape: "User".into(),
                field: "id".into(),
            }
        );
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_from_fields() {
        let s = ShapeDescriptor::from_fields(
            "Point",
            [
                FieldDescriptor::new("x", TypeTag::Number),
                FieldDescriptor::new("y", TypeTag::Number).optional(),
            ],
        )
        .unwrap();
        assert!(s.field("y").unwrap().optional);

        let dup = ShapeDescriptor::from_fields(
            "Point",
            [
                FieldDescriptor::new("x", TypeTag::Number),
                FieldDescriptor::new("x", TypeTag::Number),
            ],
        );
        assert!(dup.is_err());
    }

    #[test]
    fn test_same_fields_ignores_order_and_name() {
        let a = user();
        let b = ShapeDescriptor::from_fields(
            "Other",
            [
                FieldDescriptor::new("email", TypeTag::String),
                FieldDescriptor::new("id", TypeTag::Number),
                FieldDescriptor::new("name", TypeTag::String),
            ],
        )
        .unwrap();
        assert!(a.same_fields(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_field_display() {
        let f = FieldDescriptor::new("email", TypeTag::String).optional().readonly();
        assert_eq!(f.to_string(), "readonly email?: string");
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(
            user().to_string(),
            "User { id: number; name: string; email: string }"
        );
        assert_eq!(ShapeDescriptor::new("Empty").to_string(), "Empty {}");
    }

    #[test]
    fn test_duplicate_names_on_deserialized_shape() {
        let json = r#"{"name":"Bad","fields":[
            {"name":"a","type":{"kind":"string"}},
            {"name":"a","type":{"kind":"number"}}
        ]}"#;
        let s: ShapeDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(s.duplicate_names(), vec!["a"]);
        assert!(user().duplicate_names().is_empty());
    }
}
