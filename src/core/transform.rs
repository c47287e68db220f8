// =============================================================================
// TRANSFORM — La table des opérations sur les descripteurs
// =============================================================================
//
// Chaque opération est une FONCTION PURE : mêmes entrées ⇒ même sortie,
// aucune mutation de l'entrée, toujours un descripteur neuf en retour.
//
// ┌──────────────┬────────────────────────┬──────────────────────────────────┐
// │ Opération    │ Entrée                 │ Règle                            │
// ├──────────────┼────────────────────────┼──────────────────────────────────┤
// │ Partial      │ forme S                │ tous les champs optional         │
// │ Required     │ forme S                │ aucun champ optional             │
// │ Readonly     │ forme S                │ tous les champs readonly         │
// │ Pick         │ forme S, clés K        │ champs ∈ K (erreur si clé ∉ S)   │
// │ Omit         │ forme S, clés K        │ champs ∉ K (clés inconnues OK)   │
// │ Record       │ clés K, type T         │ un champ T par clé (K sans dup.) │
// │ Exclude      │ union U, union X       │ membres de U absents de X        │
// │ Extract      │ union U, union X       │ membres de U présents dans X     │
// │ NonNullable  │ union U                │ U sans null ni undefined         │
// │ ReturnType   │ signature F            │ le type de retour de F           │
// │ Parameters   │ signature F            │ les types des paramètres, ordre  │
// └──────────────┴────────────────────────┴──────────────────────────────────┘
//
// ASYMÉTRIE Pick / Omit : Pick refuse une clé inconnue, Omit l'ignore.
// C'est le comportement du système de types d'origine et il fait partie
// du contrat.
//
// Les formes dérivées portent le nom de l'application qui les a produites :
// Partial<User>, Pick<User, "id" | "name">, Record<"a" | "b", boolean>.
//
// =============================================================================

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::error::{Result, ShapeError};
use super::shape::{FieldDescriptor, ShapeDescriptor};
use super::signature::FunctionSignatureDescriptor;
use super::typetag::{string_literal, TypeTag};
use super::union::UnionDescriptor;

/// `"id" | "name"` : un ensemble de clés affiché comme union de littéraux.
/// Les répétitions disparaissent, l'ordre de première apparition reste.
fn key_union<K: AsRef<str>>(keys: &[K]) -> String {
    let mut seen = HashSet::new();
    let literals: Vec<String> = keys
        .iter()
        .map(|k| k.as_ref())
        .filter(|k| seen.insert(*k))
        .map(string_literal)
        .collect();
    if literals.is_empty() {
        return "never".to_string();
    }
    literals.join(" | ")
}

/// Applique `f` à chaque champ, sous un nouveau nom de forme
fn map_fields<F>(shape: &ShapeDescriptor, name: String, f: F) -> ShapeDescriptor
where
    F: Fn(&FieldDescriptor) -> FieldDescriptor,
{
    ShapeDescriptor::from_unique(name, shape.iter().map(f).collect())
}

/// Partial<S> : tous les champs deviennent optionnels
pub fn make_partial(shape: &ShapeDescriptor) -> ShapeDescriptor {
    map_fields(shape, format!("Partial<{}>", shape.name()), |f| FieldDescriptor {
        optional: true,
        ..f.clone()
    })
}

/// Required<S> : l'inverse de Partial
pub fn make_required(shape: &ShapeDescriptor) -> ShapeDescriptor {
    map_fields(shape, format!("Required<{}>", shape.name()), |f| FieldDescriptor {
        optional: false,
        ..f.clone()
    })
}

/// Readonly<S> : tous les champs deviennent non réassignables
pub fn make_readonly(shape: &ShapeDescriptor) -> ShapeDescriptor {
    map_fields(shape, format!("Readonly<{}>", shape.name()), |f| FieldDescriptor {
        readonly: true,
        ..f.clone()
    })
}

/// Pick<S, K> : ne garde que les champs nommés dans K, dans l'ordre de S.
///
/// Toute clé de K doit exister dans S, sinon `UnknownKey` (la première
/// clé inconnue, dans l'ordre de K). Une clé répétée dans K est sans effet.
pub fn pick<K: AsRef<str>>(shape: &ShapeDescriptor, keys: &[K]) -> Result<ShapeDescriptor> {
    if let Some(unknown) = keys.iter().find(|k| !shape.contains(k.as_ref())) {
        return Err(ShapeError::UnknownKey {
            shape: shape.name().to_string(),
            key: unknown.as_ref().to_string(),
        });
    }

    let wanted: HashSet<&str> = keys.iter().map(|k| k.as_ref()).collect();
    let fields = shape
        .iter()
        .filter(|f| wanted.contains(f.name.as_str()))
        .cloned()
        .collect();

    trace!(shape = shape.name(), keys = wanted.len(), "Pick");
    Ok(ShapeDescriptor::from_unique(
        format!("Pick<{}, {}>", shape.name(), key_union(keys)),
        fields,
    ))
}

/// Omit<S, K> : retire les champs nommés dans K.
///
/// Les clés absentes de S sont ignorées, sans erreur.
pub fn omit<K: AsRef<str>>(shape: &ShapeDescriptor, keys: &[K]) -> ShapeDescriptor {
    let dropped: HashSet<&str> = keys.iter().map(|k| k.as_ref()).collect();

    for key in keys.iter().filter(|k| !shape.contains(k.as_ref())) {
        debug!(shape = shape.name(), key = key.as_ref(), "Omit : clé inconnue ignorée");
    }

    let fields = shape
        .iter()
        .filter(|f| !dropped.contains(f.name.as_str()))
        .cloned()
        .collect();

    ShapeDescriptor::from_unique(format!("Omit<{}, {}>", shape.name(), key_union(keys)), fields)
}

/// Record<K, T> : une forme neuve, un champ de type T par clé de K.
///
/// Les champs sont requis et mutables, dans l'ordre de K.
/// Une clé répétée donne `DuplicateKey`.
pub fn record<K: AsRef<str>>(keys: &[K], tag: TypeTag) -> Result<ShapeDescriptor> {
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(keys.len());
    for key in keys {
        let key = key.as_ref();
        if !seen.insert(key) {
            return Err(ShapeError::DuplicateKey { key: key.to_string() });
        }
        fields.push(FieldDescriptor::new(key, tag.clone()));
    }

    trace!(keys = fields.len(), tag = %tag, "Record");
    Ok(ShapeDescriptor::from_unique(
        format!("Record<{}, {}>", key_union(keys), tag),
        fields,
    ))
}

/// Record<U, T> où U est une union de littéraux chaîne
/// (`type Role = "admin" | "editor"; Record<Role, boolean>`).
///
/// Une union est déjà sans doublons : seul un membre non littéral
/// peut faire échouer l'opération (`NonLiteralKey`).
pub fn record_from_union(keys: &UnionDescriptor, tag: TypeTag) -> Result<ShapeDescriptor> {
    let names = keys
        .iter()
        .map(|member| {
            member
                .as_literal()
                .ok_or_else(|| ShapeError::NonLiteralKey { tag: member.clone() })
        })
        .collect::<Result<Vec<&str>>>()?;
    record(&names, tag)
}

/// Exclude<U, X> : les membres de U qui ne sont assignables à aucun membre de X
pub fn exclude(union: &UnionDescriptor, excluded: &UnionDescriptor) -> UnionDescriptor {
    union
        .iter()
        .filter(|m| !excluded.contains(m))
        .cloned()
        .collect()
}

/// Extract<U, X> : les membres de U assignables à un membre de X
pub fn extract(union: &UnionDescriptor, wanted: &UnionDescriptor) -> UnionDescriptor {
    union
        .iter()
        .filter(|m| wanted.contains(m))
        .cloned()
        .collect()
}

/// NonNullable<U> : U privée de null et undefined (idempotent)
pub fn non_nullable(union: &UnionDescriptor) -> UnionDescriptor {
    union
        .iter()
        .filter(|m| !m.is_nullish())
        .cloned()
        .collect()
}

/// ReturnType<F>
pub fn return_type(signature: &FunctionSignatureDescriptor) -> TypeTag {
    signature.returns.clone()
}

/// Parameters<F> : le tuple des types de paramètres, dans l'ordre déclaré
pub fn parameters(signature: &FunctionSignatureDescriptor) -> Vec<TypeTag> {
    signature.params.iter().map(|p| p.tag.clone()).collect()
}

// =============================================================================
// REQUÊTES DE TRANSFORMATION
// =============================================================================

/// Une transformation de forme sous forme de VALEUR : nom + paramètres.
///
/// Sert de clé de cache (avec la forme source) et d'étape de pipeline.
/// Au format d'échange : `{"op":"pick","keys":["id","name"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ShapeTransform {
    Partial,
    Required,
    Readonly,
    Pick { keys: Vec<String> },
    Omit { keys: Vec<String> },
}

impl ShapeTransform {
    pub fn pick(keys: &[&str]) -> Self {
        ShapeTransform::Pick {
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn omit(keys: &[&str]) -> Self {
        ShapeTransform::Omit {
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Applique la transformation à une forme
    pub fn apply(&self, shape: &ShapeDescriptor) -> Result<ShapeDescriptor> {
        match self {
            ShapeTransform::Partial => Ok(make_partial(shape)),
            ShapeTransform::Required => Ok(make_required(shape)),
            ShapeTransform::Readonly => Ok(make_readonly(shape)),
            ShapeTransform::Pick { keys } => pick(shape, keys),
            ShapeTransform::Omit { keys } => Ok(omit(shape, keys)),
        }
    }

    /// Nom de l'utilitaire (Partial, Pick...)
    pub fn name(&self) -> &'static str {
        match self {
            ShapeTransform::Partial => "Partial",
            ShapeTransform::Required => "Required",
            ShapeTransform::Readonly => "Readonly",
            ShapeTransform::Pick { .. } => "Pick",
            ShapeTransform::Omit { .. } => "Omit",
        }
    }

    /// Affiche l'application à un type : `Pick<inner, "id">`
    pub fn wrap(&self, inner: &str) -> String {
        match self {
            ShapeTransform::Pick { keys } | ShapeTransform::Omit { keys } => {
                format!("{}<{}, {}>", self.name(), inner, key_union(keys))
            }
            _ => format!("{}<{}>", self.name(), inner),
        }
    }
}

impl fmt::Display for ShapeTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wrap("_"))
    }
}
