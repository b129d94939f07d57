//! Domain entities: the introspected shape of a type

use std::fmt;

/// Built-in scalar type names; these never decompose further.
pub const KEYWORD_TYPES: &[&str] = &[
    "string",
    "number",
    "boolean",
    "bigint",
    "symbol",
    "null",
    "undefined",
    "any",
    "unknown",
    "never",
    "void",
    "object",
];

/// A concrete shape a type may resolve to.
///
/// A union type resolves to one symbol per variant; a plain interface to exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeSymbol {
    pub name: String,
}

impl TypeSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// How a member was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `name: Type`
    Property,
    /// `name(): Type`
    Method,
    /// `[key: string]: Type`
    IndexSignature,
    /// `get name(): Type`
    Accessor,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeclarationKind::Property => "property",
            DeclarationKind::Method => "method",
            DeclarationKind::IndexSignature => "index",
            DeclarationKind::Accessor => "accessor",
        };
        f.write_str(s)
    }
}

/// Declared type of a member, as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A built-in scalar such as `string` or `number`
    Keyword(String),
    /// A named type, e.g. `Address`
    Reference(String),
    /// `T[]` or `Array<T>`
    Array(Box<TypeExpr>),
    /// `Record<K, V>`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// `A | B`
    Union(Vec<TypeExpr>),
}

impl TypeExpr {
    /// Name of the referenced type when this expression is a plain reference.
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Reference(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, TypeExpr::Keyword(_))
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Keyword(name) | TypeExpr::Reference(name) => f.write_str(name),
            TypeExpr::Array(elem) => match **elem {
                TypeExpr::Union(_) => write!(f, "({elem})[]"),
                _ => write!(f, "{elem}[]"),
            },
            TypeExpr::Map { key, value } => write!(f, "Record<{key}, {value}>"),
            TypeExpr::Union(variants) => {
                for (i, variant) in variants.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{variant}")?;
                }
                Ok(())
            }
        }
    }
}

/// Structural description of how a member was defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    pub type_expr: TypeExpr,
    pub optional: bool,
}

impl Declaration {
    /// A required property declaration.
    pub fn property(name: impl Into<String>, type_expr: TypeExpr) -> Self {
        Self {
            name: name.into(),
            kind: DeclarationKind::Property,
            type_expr,
            optional: false,
        }
    }

    /// Only simple property declarations take part in decomposition.
    pub fn is_property(&self) -> bool {
        self.kind == DeclarationKind::Property
    }
}

/// A named field of a type symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    /// Missing for members synthesized without source, e.g. mapped types
    pub declaration: Option<Declaration>,
}

impl Member {
    pub fn new(declaration: Declaration) -> Self {
        Self {
            name: declaration.name.clone(),
            declaration: Some(declaration),
        }
    }

    pub fn without_declaration(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaration: None,
        }
    }
}
