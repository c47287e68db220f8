// =============================================================================
// UNION — Un ensemble de types alternatifs
// =============================================================================
//
// Une union `string | number | boolean` est un ENSEMBLE de tags :
//   - pas de doublons (string | string = string)
//   - l'ordre d'insertion est conservé pour l'affichage, mais l'égalité
//     est ensembliste (string | number = number | string)
//   - une union d'unions est aplatie à l'insertion
//
// C'est l'entrée des opérations Exclude, Extract et NonNullable.
//
// =============================================================================

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::typetag::TypeTag;

/// Une union telle qu'écrite dans un document, avant normalisation.
///
/// Toute désérialisation d'UnionDescriptor passe par ici puis par
/// `FromIterator` : doublons retirés, unions imbriquées aplaties.
#[derive(Debug, Clone, Deserialize)]
pub struct UnionDocument {
    pub members: Vec<TypeTag>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "UnionDocument")]
pub struct UnionDescriptor {
    members: Vec<TypeTag>,
}

impl From<UnionDocument> for UnionDescriptor {
    fn from(document: UnionDocument) -> Self {
        document.members.into_iter().collect()
    }
}

impl UnionDescriptor {
    /// Union vide (= `never`)
    pub fn new() -> Self {
        UnionDescriptor { members: Vec::new() }
    }

    /// Ajoute un membre. Retourne false si le tag était déjà présent.
    ///
    /// Un tag `Union` est aplati : ce sont ses membres qui sont ajoutés.
    pub fn insert(&mut self, tag: TypeTag) -> bool {
        match tag {
            TypeTag::Union(inner) => {
                let mut added = false;
                for member in inner.members {
                    added |= self.insert(member);
                }
                added
            }
            tag => {
                if self.members.contains(&tag) {
                    false
                } else {
                    self.members.push(tag);
                    true
                }
            }
        }
    }

    pub fn contains(&self, tag: &TypeTag) -> bool {
        self.members.contains(tag)
    }

    pub fn members(&self) -> &[TypeTag] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypeTag> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// L'union admet-elle null ou undefined ?
    pub fn is_nullable(&self) -> bool {
        self.members.iter().any(TypeTag::is_nullish)
    }

    /// Emballe l'union dans un tag. Une union à un seul membre
    /// se réduit à ce membre.
    pub fn into_tag(mut self) -> TypeTag {
        match self.members.len() {
            1 => match self.members.pop() {
                Some(only) => only,
                None => TypeTag::Union(self),
            },
            _ => TypeTag::Union(self),
        }
    }
}

impl PartialEq for UnionDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.members.len() == other.members.len()
            && self.members.iter().all(|m| other.contains(m))
            && other.members.iter().all(|m| self.contains(m))
    }
}

impl Eq for UnionDescriptor {}

// Hash indépendant de l'ordre, cohérent avec l'égalité ensembliste
impl Hash for UnionDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let combined = self
            .members
            .iter()
            .map(|m| {
                let mut h = DefaultHasher::new();
                m.hash(&mut h);
                h.finish()
            })
            .fold(0u64, |acc, h| acc ^ h);
        self.members.len().hash(state);
        combined.hash(state);
    }
}

impl FromIterator<TypeTag> for UnionDescriptor {
    fn from_iter<I: IntoIterator<Item = TypeTag>>(iter: I) -> Self {
        let mut union = UnionDescriptor::new();
        union.extend(iter);
        union
    }
}

impl Extend<TypeTag> for UnionDescriptor {
    fn extend<I: IntoIterator<Item = TypeTag>>(&mut self, iter: I) {
        for tag in iter {
            self.insert(tag);
        }
    }
}

impl<'a> IntoIterator for &'a UnionDescriptor {
    type Item = &'a TypeTag;
    type IntoIter = std::slice::Iter<'a, TypeTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl fmt::Display for UnionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.members.is_empty() {
            return write!(f, "never");
        }
        let parts: Vec<String> = self.members.iter().map(|m| m.to_string()).collect();
        write!(f, "{}", parts.join(" | "))
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn primitive() -> UnionDescriptor {
        [TypeTag::String, TypeTag::Number, TypeTag::Boolean]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_no_duplicates() {
        let mut u = primitive();
        assert!(!u.insert(TypeTag::String));
        assert_eq!(u.len(), 3);
    }

    #[test]
    fn test_nested_union_is_flattened() {
        let mut u = UnionDescriptor::new();
        u.insert(TypeTag::String);
        u.insert(TypeTag::union([TypeTag::Number, TypeTag::String]));
        assert_eq!(u.members(), &[TypeTag::String, TypeTag::Number]);
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a: UnionDescriptor = [TypeTag::String, TypeTag::Number].into_iter().collect();
        let b: UnionDescriptor = [TypeTag::Number, TypeTag::String].into_iter().collect();
        assert_eq!(a, b);

        let mut ha = DefaultHasher::new();
        let mut hb = DefaultHasher::new();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
    }

    #[test]
    fn test_deserialized_duplicates_are_merged() {
        let dup: UnionDescriptor =
            serde_json::from_str(r#"{"members":[{"kind":"string"},{"kind":"string"}]}"#).unwrap();
        let two: UnionDescriptor = [TypeTag::String, TypeTag::Number].into_iter().collect();
        assert_eq!(dup.members(), &[TypeTag::String]);
        assert_ne!(dup, two);
        assert_ne!(two, dup);

        let set: std::collections::HashSet<UnionDescriptor> = [two.clone()].into_iter().collect();
        assert!(!set.contains(&dup));
        let reordered: UnionDescriptor = [TypeTag::Number, TypeTag::String].into_iter().collect();
        assert!(set.contains(&reordered));
    }

    #[test]
    fn test_deserialized_tag_is_flattened() {
        let tag: TypeTag = serde_json::from_str(
            r#"{"kind":"union","members":[
                {"kind":"string"},
                {"kind":"string"},
                {"kind":"union","members":[{"kind":"null"},{"kind":"string"}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(tag.to_string(), "string | null");
    }

    #[test]
    fn test_display() {
        assert_eq!(primitive().to_string(), "string | number | boolean");
        assert_eq!(UnionDescriptor::new().to_string(), "never");
    }

    #[test]
    fn test_is_nullable() {
        assert!(!primitive().is_nullable());
        let u: UnionDescriptor = [TypeTag::shape("User"), TypeTag::Null].into_iter().collect();
        assert!(u.is_nullable());
    }

    #[test]
    fn test_into_tag_single_member() {
        let u: UnionDescriptor = [TypeTag::String].into_iter().collect();
        assert_eq!(u.into_tag(), TypeTag::String);
        assert!(matches!(primitive().into_tag(), TypeTag::Union(_)));
    }
}
