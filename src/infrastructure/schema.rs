//! TOML-backed type schema implementing [`Introspect`].
//!
//! ```toml
//! root = "Foo"
//!
//! [types.Foo]
//! members = [
//!     { name = "bar", type = "Baz" },
//!     { name = "count", type = "number" },
//!     { name = "reset", type = "void", kind = "method" },
//! ]
//!
//! [types.Baz]
//! members = [{ name = "label", type = "string", optional = true }]
//!
//! [types.Shape]
//! union = ["Circle", "Square"]
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::{
    parse_type_expr, Declaration, DeclarationKind, Introspect, Member, TypeSymbol,
};
use crate::infrastructure::{InfraError, InfraResult};
use crate::util::path::ensure_file_exists;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    root: Option<String>,
    #[serde(default)]
    types: BTreeMap<String, TypeDefFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeDefFile {
    members: Option<Vec<MemberFile>>,
    union: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MemberFile {
    name: String,
    #[serde(rename = "type")]
    type_expr: String,
    #[serde(default)]
    kind: MemberKindFile,
    #[serde(default)]
    optional: bool,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum MemberKindFile {
    #[default]
    Property,
    Method,
    Index,
    Accessor,
}

impl From<MemberKindFile> for DeclarationKind {
    fn from(kind: MemberKindFile) -> Self {
        match kind {
            MemberKindFile::Property => DeclarationKind::Property,
            MemberKindFile::Method => DeclarationKind::Method,
            MemberKindFile::Index => DeclarationKind::IndexSignature,
            MemberKindFile::Accessor => DeclarationKind::Accessor,
        }
    }
}

/// A named type in the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    /// Interface-like type with ordered members
    Struct(Vec<Member>),
    /// Alternatives, each naming another schema type
    Union(Vec<String>),
}

/// In-memory type schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaContext {
    root: Option<String>,
    types: BTreeMap<String, SchemaType>,
}

impl SchemaContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_struct(mut self, name: impl Into<String>, members: Vec<Member>) -> Self {
        self.types.insert(name.into(), SchemaType::Struct(members));
        self
    }

    pub fn with_union<S: Into<String>>(mut self, name: impl Into<String>, variants: Vec<S>) -> Self {
        let variants = variants.into_iter().map(Into::into).collect();
        self.types.insert(name.into(), SchemaType::Union(variants));
        self
    }

    /// Root type declared by the schema, if any.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Reads and parses a schema file.
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> InfraResult<Self> {
        ensure_file_exists(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| InfraError::io(format!("read schema {}", path.display()), e))?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parses schema text; `origin` names the source in error messages.
    pub fn parse(content: &str, origin: &str) -> InfraResult<Self> {
        let file: SchemaFile =
            toml::from_str(content).map_err(|e| InfraError::schema(origin, e.to_string()))?;

        let mut types = BTreeMap::new();
        for (name, def) in file.types {
            let schema_type = match (def.members, def.union) {
                (Some(_), Some(_)) => {
                    return Err(InfraError::schema(
                        origin,
                        format!("type '{name}' declares both members and union"),
                    ))
                }
                (None, Some(variants)) => SchemaType::Union(variants),
                (members, None) => SchemaType::Struct(
                    members
                        .unwrap_or_default()
                        .into_iter()
                        .map(|m| Self::member(origin, &name, m))
                        .collect::<InfraResult<Vec<_>>>()?,
                ),
            };
            types.insert(name, schema_type);
        }
        debug!("parsed {} types from {}", types.len(), origin);

        Ok(Self {
            root: file.root,
            types,
        })
    }

    fn member(origin: &str, owner: &str, m: MemberFile) -> InfraResult<Member> {
        let type_expr = parse_type_expr(&m.type_expr)
            .map_err(|e| InfraError::schema(origin, format!("{owner}.{}: {e}", m.name)))?;
        Ok(Member::new(Declaration {
            name: m.name,
            kind: m.kind.into(),
            type_expr,
            optional: m.optional,
        }))
    }

    fn collect_symbols(&self, name: &str, seen: &mut HashSet<String>, out: &mut Vec<TypeSymbol>) {
        if !seen.insert(name.to_string()) {
            return;
        }
        match self.types.get(name) {
            Some(SchemaType::Struct(_)) => out.push(TypeSymbol::new(name)),
            Some(SchemaType::Union(variants)) => {
                for variant in variants {
                    self.collect_symbols(variant, seen, out);
                }
            }
            None => {}
        }
    }
}

impl Introspect for SchemaContext {
    fn type_symbols(&self, type_name: &str) -> Vec<TypeSymbol> {
        let mut symbols = Vec::new();
        self.collect_symbols(type_name, &mut HashSet::new(), &mut symbols);
        symbols
    }

    fn members(&self, symbol: &TypeSymbol) -> Option<Vec<Member>> {
        match self.types.get(&symbol.name) {
            Some(SchemaType::Struct(members)) => Some(members.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TypeExpr;

    const SHAPES: &str = r#"
root = "Drawing"

[types.Drawing]
members = [
    { name = "shape", type = "Shape" },
    { name = "redraw", type = "void", kind = "method" },
]

[types.Shape]
union = ["Circle", "Square", "Missing"]

[types.Circle]
members = [{ name = "radius", type = "number" }]

[types.Square]
members = [{ name = "side", type = "number", optional = true }]
"#;

    #[test]
    fn given_union_type_when_resolving_symbols_then_returns_struct_variants_in_order() {
        let ctx = SchemaContext::parse(SHAPES, "shapes").unwrap();

        let names: Vec<_> = ctx.type_symbols("Shape").into_iter().map(|s| s.name).collect();

        assert_eq!(names, vec!["Circle", "Square"]);
        assert_eq!(ctx.root(), Some("Drawing"));
    }

    #[test]
    fn given_member_kinds_when_parsing_then_declarations_carry_kind() {
        let ctx = SchemaContext::parse(SHAPES, "shapes").unwrap();

        let members = ctx.members(&TypeSymbol::new("Drawing")).unwrap();

        assert_eq!(members.len(), 2);
        let redraw = members[1].declaration.as_ref().unwrap();
        assert_eq!(redraw.kind, DeclarationKind::Method);
        assert_eq!(redraw.type_expr, TypeExpr::Keyword("void".into()));
    }

    #[test]
    fn given_keyword_or_unknown_name_when_resolving_then_has_no_symbols() {
        let ctx = SchemaContext::parse(SHAPES, "shapes").unwrap();
        assert!(ctx.type_symbols("number").is_empty());
        assert!(ctx.type_symbols("Nope").is_empty());
        assert!(ctx.members(&TypeSymbol::new("Shape")).is_none());
    }

    #[test]
    fn given_self_referencing_union_when_resolving_then_terminates() {
        let ctx = SchemaContext::new()
            .with_union("A", vec!["B"])
            .with_union("B", vec!["A", "C"])
            .with_struct("C", Vec::new());

        let names: Vec<_> = ctx.type_symbols("A").into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["C"]);
    }

    #[test]
    fn given_bad_member_type_when_parsing_then_reports_field() {
        let err = SchemaContext::parse(
            "[types.Foo]\nmembers = [{ name = \"bar\", type = \"Baz[\" }]\n",
            "inline",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Foo.bar"), "{err}");
    }

    #[test]
    fn given_members_and_union_when_parsing_then_errors() {
        let result = SchemaContext::parse(
            "[types.Foo]\nmembers = []\nunion = [\"A\"]\n",
            "inline",
        );
        assert!(matches!(result, Err(InfraError::Schema { .. })));
    }
}
