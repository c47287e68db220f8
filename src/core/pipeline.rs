// =============================================================================
// PIPELINE — Composition de transformations de formes
// =============================================================================
//
// Les utilitaires se composent comme des applications de types :
//
//   type Preview = Partial<Pick<User, "id" | "name">>
//
// Un Pipeline est la liste des étapes dans l'ordre d'APPLICATION
// (de l'intérieur vers l'extérieur) :
//
//   Pipeline::new()
//       .then(ShapeTransform::pick(&["id", "name"]))
//       .then(ShapeTransform::Partial)
//
// Le pipeline vide est l'identité. La première étape en échec interrompt
// tout le pipeline avec son erreur.
//
// =============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::cache::Transformer;
use super::error::Result;
use super::shape::ShapeDescriptor;
use super::transform::ShapeTransform;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline {
    steps: Vec<ShapeTransform>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline { steps: Vec::new() }
    }

    /// Ajoute une étape, appliquée après les précédentes
    pub fn then(mut self, step: ShapeTransform) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[ShapeTransform] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Applique chaque étape directement, sans cache
    pub fn run(&self, shape: &ShapeDescriptor) -> Result<ShapeDescriptor> {
        self.steps.iter().try_fold(shape.clone(), |current, step| {
            trace!(step = step.name(), shape = current.name(), "étape de pipeline");
            step.apply(&current)
        })
    }

    /// Applique chaque étape via un Transformer (et donc son cache)
    pub fn run_with(&self, transformer: &Transformer, shape: &ShapeDescriptor) -> Result<ShapeDescriptor> {
        self.steps.iter().try_fold(shape.clone(), |current, step| {
            trace!(step = step.name(), shape = current.name(), "étape de pipeline");
            transformer.apply(&current, step)
        })
    }

    /// L'application de types équivalente, ex. `Partial<Pick<User, "id">>`
    pub fn describe(&self, source: &str) -> String {
        self.steps
            .iter()
            .fold(source.to_string(), |inner, step| step.wrap(&inner))
    }
}

impl FromIterator<ShapeTransform> for Pipeline {
    fn from_iter<I: IntoIterator<Item = ShapeTransform>>(iter: I) -> Self {
        Pipeline {
            steps: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe("_"))
    }
}
