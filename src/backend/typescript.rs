// =============================================================================
// BACKEND TYPESCRIPT — Rendu des descripteurs en déclarations
// =============================================================================
//
// La traduction est directe, les descripteurs viennent de ce monde-là :
//   - Shape     → interface User { readonly id: number; name?: string; }
//   - Union     → type Primitive = string | number | boolean;
//   - Signature → declare function getUser(): User;
//   - Alias     → type PartialUser = Partial<User>;
//
// Une forme dérivée porte un nom d'application (Partial<User>) qui n'est pas
// un identifiant : elle est rendue comme type littéral objet, annoté.
//
// =============================================================================

use crate::backend::{Backend, Document};
use crate::core::catalog::{Catalog, Declaration};
use crate::core::error::Result;
use crate::core::shape::{FieldDescriptor, ShapeDescriptor};
use crate::core::signature::FunctionSignatureDescriptor;
use crate::core::typetag::string_literal;
use crate::core::union::UnionDescriptor;

/// Backend TypeScript — génère des déclarations `.d.ts`
#[derive(Debug, Clone)]
pub struct TypeScriptBackend {
    /// Indentation des membres d'interface
    pub indent: String,
}

impl Default for TypeScriptBackend {
    fn default() -> Self {
        TypeScriptBackend {
            indent: "  ".to_string(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl TypeScriptBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// `readonly "first-name"?: string;`
    fn member(&self, field: &FieldDescriptor) -> String {
        let key = if is_identifier(&field.name) {
            field.name.clone()
        } else {
            string_literal(&field.name)
        };
        format!(
            "{}{}{}{}: {};",
            self.indent,
            if field.readonly { "readonly " } else { "" },
            key,
            if field.optional { "?" } else { "" },
            field.tag
        )
    }

    fn body(&self, shape: &ShapeDescriptor) -> String {
        if shape.is_empty() {
            return "{}".to_string();
        }
        let members: Vec<String> = shape.iter().map(|f| self.member(f)).collect();
        format!("{{\n{}\n}}", members.join("\n"))
    }

    fn shape_decl(&self, shape: &ShapeDescriptor) -> String {
        if is_identifier(shape.name()) {
            format!("interface {} {}", shape.name(), self.body(shape))
        } else {
            format!("/* {} */ {}", shape.name(), self.body(shape))
        }
    }

    fn union_decl(name: &str, union: &UnionDescriptor) -> String {
        format!("type {} = {};", name, union)
    }

    fn signature_decl(signature: &FunctionSignatureDescriptor) -> String {
        match &signature.name {
            Some(name) => format!(
                "declare function {}({}): {};",
                name,
                signature.params_list(),
                signature.returns
            ),
            None => format!("{};", signature),
        }
    }

    fn declaration(&self, decl: &Declaration) -> String {
        match decl {
            Declaration::Shape(shape) => self.shape_decl(shape),
            Declaration::Union { name, union } => Self::union_decl(name, union),
            Declaration::Function { signature, .. } => Self::signature_decl(signature),
            Declaration::Alias { name, definition, .. } => format!("type {} = {};", name, definition),
        }
    }
}

impl Backend for TypeScriptBackend {
    fn export_shape(&self, shape: &ShapeDescriptor) -> Result<Document> {
        Ok(Document::TypeScript(self.shape_decl(shape)))
    }

    fn export_union(&self, name: &str, union: &UnionDescriptor) -> Result<Document> {
        Ok(Document::TypeScript(Self::union_decl(name, union)))
    }

    fn export_signature(&self, signature: &FunctionSignatureDescriptor) -> Result<Document> {
        Ok(Document::TypeScript(Self::signature_decl(signature)))
    }

    fn export_catalog(&self, catalog: &Catalog) -> Result<Document> {
        let decls: Vec<String> = catalog
            .declarations()
            .iter()
            .map(|d| self.declaration(d))
            .collect();
        Ok(Document::TypeScript(decls.join("\n\n")))
    }

    fn name(&self) -> &str {
        "TypeScript"
    }
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::Pipeline;
    use crate::core::transform::{self, ShapeTransform};
    use crate::core::typetag::TypeTag;
    use pretty_assertions::assert_eq;

    fn user() -> ShapeDescriptor {
        ShapeDescriptor::from_fields(
            "User",
            [
                FieldDescriptor::new("id", TypeTag::Number),
                FieldDescriptor::new("name", TypeTag::String),
                FieldDescriptor::new("email", TypeTag::String),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_interface() {
        let doc = TypeScriptBackend::new().export_shape(&user()).unwrap();
        assert_eq!(
            doc.as_str(),
            "interface User {\n  id: number;\n  name: string;\n  email: string;\n}"
        );
    }

    #[test]
    fn test_modifiers_and_quoted_keys() {
        let shape = ShapeDescriptor::from_fields(
            "Row",
            [FieldDescriptor::new("first-name", TypeTag::String).optional().readonly()],
        )
        .unwrap();
        let doc = TypeScriptBackend::new().export_shape(&shape).unwrap();
        assert_eq!(doc.as_str(), "interface Row {\n  readonly \"first-name\"?: string;\n}");
    }

    #[test]
    fn test_control_characters_in_keys_are_js_escaped() {
        let shape = ShapeDescriptor::from_fields(
            "Odd",
            [FieldDescriptor::new("a\u{1b}b", TypeTag::literal("tab\there"))],
        )
        .unwrap();
        let doc = TypeScriptBackend::new().export_shape(&shape).unwrap();
        assert_eq!(
            doc.as_str(),
            "interface Odd {\n  \"a\\u001bb\": \"tab\\there\";\n}"
        );
    }

    #[test]
    fn test_derived_shape_is_a_type_literal() {
        let doc = TypeScriptBackend::new()
            .export_shape(&transform::make_partial(&transform::pick(&user(), &["id"]).unwrap()))
            .unwrap();
        assert_eq!(
            doc.as_str(),
            "/* Partial<Pick<User, \"id\">> */ {\n  id?: number;\n}"
        );
    }

    #[test]
    fn test_union_and_signature() {
        let backend = TypeScriptBackend::new();
        let primitive = UnionDescriptor::from_iter([TypeTag::String, TypeTag::Number, TypeTag::Boolean]);
        assert_eq!(
            backend.export_union("Primitive", &primitive).unwrap().as_str(),
            "type Primitive = string | number | boolean;"
        );

        let update = FunctionSignatureDescriptor::new("updateUserDetails", TypeTag::Void)
            .param("id", TypeTag::Number)
            .param("email", TypeTag::String);
        assert_eq!(
            backend.export_signature(&update).unwrap().as_str(),
            "declare function updateUserDetails(id: number, email: string): void;"
        );
        assert_eq!(
            backend
                .export_signature(&FunctionSignatureDescriptor::anonymous(TypeTag::String))
                .unwrap()
                .as_str(),
            "() => string;"
        );
    }

    #[test]
    fn test_catalog() {
        let mut catalog = Catalog::new();
        catalog.declare_shape(user()).unwrap();
        catalog
            .derive_shape("PartialUser", "User", &Pipeline::new().then(ShapeTransform::Partial))
            .unwrap();
        catalog
            .declare_function("getUser", FunctionSignatureDescriptor::anonymous(TypeTag::shape("User")))
            .unwrap();

        let doc = TypeScriptBackend::new().export_catalog(&catalog).unwrap();
        assert_eq!(
            doc.as_str(),
            concat!(
                "interface User {\n  id: number;\n  name: string;\n  email: string;\n}\n\n",
                "type PartialUser = Partial<User>;\n\n",
                "declare function getUser(): User;"
            )
        );
        assert!(matches!(doc, Document::TypeScript(_)));
    }

    #[test]
    fn test_identifier_check() {
        assert!(is_identifier("User"));
        assert!(is_identifier("_x$1"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("Partial<User>"));
        assert!(!is_identifier(""));
    }
}
