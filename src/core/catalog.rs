// =============================================================================
// CATALOG — Les déclarations nommées d'un programme
// =============================================================================
//
// Un programme déclare des types par leur nom, puis les réutilise :
//
//   interface User { id: number; name: string; email: string }
//   type Primitive = string | number | boolean;
//   type Role = "admin" | "editor" | "viewer";
//   function getUser(): User;
//   type PartialUser = Partial<User>;
//   type Permissions = Record<Role, boolean>;
//
// Le Catalog conserve ces déclarations dans l'ordre, résout les
// références `shape(User)` et calcule les alias dérivés au moment de
// leur déclaration (une seule fois : les descripteurs sont immuables).
//
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cache::Transformer;
use super::error::{Result, ShapeError};
use super::pipeline::Pipeline;
use super::shape::ShapeDescriptor;
use super::signature::FunctionSignatureDescriptor;
use super::transform;
use super::typetag::TypeTag;
use super::union::UnionDescriptor;

/// Une déclaration du catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decl", rename_all = "snake_case")]
pub enum Declaration {
    /// `interface User { ... }`
    Shape(ShapeDescriptor),
    /// `type Primitive = string | number | boolean;`
    Union { name: String, union: UnionDescriptor },
    /// `function getUser(): User;`
    Function { name: String, signature: FunctionSignatureDescriptor },
    /// `type PartialUser = Partial<User>;`
    ///
    /// `definition` est l'expression de type d'origine, `shape` la forme
    /// calculée.
    Alias { name: String, definition: String, shape: ShapeDescriptor },
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Shape(shape) => shape.name(),
            Declaration::Union { name, .. } => name,
            Declaration::Function { name, .. } => name,
            Declaration::Alias { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    declarations: Vec<Declaration>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog { declarations: Vec::new() }
    }

    fn declare(&mut self, declaration: Declaration) -> Result<&mut Self> {
        if self.contains(declaration.name()) {
            return Err(ShapeError::DuplicateDeclaration {
                name: declaration.name().to_string(),
            });
        }
        debug!(name = declaration.name(), "déclaration ajoutée au catalogue");
        self.declarations.push(declaration);
        Ok(self)
    }

    /// Déclare une interface
    pub fn declare_shape(&mut self, shape: ShapeDescriptor) -> Result<&mut Self> {
        self.declare(Declaration::Shape(shape))
    }

    /// Déclare un alias d'union
    pub fn declare_union(&mut self, name: &str, union: UnionDescriptor) -> Result<&mut Self> {
        self.declare(Declaration::Union {
            name: name.to_string(),
            union,
        })
    }

    /// Déclare une fonction. Le nom de la signature est aligné sur `name`.
    pub fn declare_function(
        &mut self,
        name: &str,
        mut signature: FunctionSignatureDescriptor,
    ) -> Result<&mut Self> {
        signature.name = Some(name.to_string());
        self.declare(Declaration::Function {
            name: name.to_string(),
            signature,
        })
    }

    /// `type <alias> = <pipeline>(<source>)` : calcule et déclare une forme dérivée.
    pub fn derive_shape(&mut self, alias: &str, source: &str, pipeline: &Pipeline) -> Result<&ShapeDescriptor> {
        let shape = pipeline.run(self.require_shape(source)?)?;
        self.declare_alias(alias, pipeline.describe(source), shape)
    }

    /// Comme `derive_shape`, en passant par le cache d'un Transformer
    pub fn derive_shape_with(
        &mut self,
        transformer: &Transformer,
        alias: &str,
        source: &str,
        pipeline: &Pipeline,
    ) -> Result<&ShapeDescriptor> {
        let shape = pipeline.run_with(transformer, self.require_shape(source)?)?;
        self.declare_alias(alias, pipeline.describe(source), shape)
    }

    /// `type <alias> = Record<<keys>, <value>>` où `keys` est une union
    /// de littéraux déclarée.
    pub fn derive_record(&mut self, alias: &str, keys: &str, value: TypeTag) -> Result<&ShapeDescriptor> {
        let union = self
            .union(keys)
            .ok_or_else(|| ShapeError::UnresolvedUnion { name: keys.to_string() })?;
        let definition = format!("Record<{}, {}>", keys, value);
        let shape = transform::record_from_union(union, value)?;
        self.declare_alias(alias, definition, shape)
    }

    fn declare_alias(&mut self, alias: &str, definition: String, shape: ShapeDescriptor) -> Result<&ShapeDescriptor> {
        self.declare(Declaration::Alias {
            name: alias.to_string(),
            definition,
            shape,
        })?;
        match self.declarations.last() {
            Some(Declaration::Alias { shape, .. }) => Ok(shape),
            _ => Err(ShapeError::UnresolvedShape { name: alias.to_string() }),
        }
    }

    fn require_shape(&self, name: &str) -> Result<&ShapeDescriptor> {
        self.shape(name)
            .ok_or_else(|| ShapeError::UnresolvedShape { name: name.to_string() })
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Forme d'une interface ou d'un alias dérivé
    pub fn shape(&self, name: &str) -> Option<&ShapeDescriptor> {
        match self.get(name)? {
            Declaration::Shape(shape) => Some(shape),
            Declaration::Alias { shape, .. } => Some(shape),
            _ => None,
        }
    }

    pub fn union(&self, name: &str) -> Option<&UnionDescriptor> {
        match self.get(name)? {
            Declaration::Union { union, .. } => Some(union),
            _ => None,
        }
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSignatureDescriptor> {
        match self.get(name)? {
            Declaration::Function { signature, .. } => Some(signature),
            _ => None,
        }
    }

    /// Résout un tag `shape(name)` vers la forme déclarée
    pub fn resolve_shape(&self, tag: &TypeTag) -> Result<&ShapeDescriptor> {
        match tag {
            TypeTag::Shape { name } => self.require_shape(name),
            other => Err(ShapeError::UnresolvedShape { name: other.to_string() }),
        }
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn names(&self) -> Vec<&str> {
        self.declarations.iter().map(Declaration::name).collect()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
