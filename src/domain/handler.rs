//! Node handlers: recognizers that turn declarations into specialized nodes.

use tracing::debug;

use crate::domain::entities::{Declaration, TypeExpr};
use crate::domain::error::DomainError;
use crate::domain::introspect::Introspect;
use crate::domain::node::{NodeKind, TypeNode};

/// Recognizer and factory for one shape of field declaration.
///
/// Handlers are stateless. The builder tries them in registration order and
/// the first one whose [`recognizes`](NodeHandler::recognizes) returns true
/// creates the node.
pub trait NodeHandler {
    /// Short identifier used in configuration and logs.
    fn name(&self) -> &str;

    fn recognizes(&self, declaration: &Declaration) -> bool;

    fn create(&self, ctx: &dyn Introspect, parent: &TypeNode, declaration: &Declaration)
        -> TypeNode;
}

/// Strips `null` / `undefined` from a union, e.g. `User | null` -> `User`.
fn non_nullable(expr: &TypeExpr) -> &TypeExpr {
    if let TypeExpr::Union(variants) = expr {
        let mut rest = variants.iter().filter(
            |v| !matches!(v, TypeExpr::Keyword(k) if k == "null" || k == "undefined"),
        );
        if let (Some(only), None) = (rest.next(), rest.next()) {
            return only;
        }
    }
    expr
}

fn referenced_element(expr: &TypeExpr) -> Option<&str> {
    match non_nullable(expr) {
        TypeExpr::Array(elem) => non_nullable(elem).reference_name(),
        _ => None,
    }
}

fn referenced_value(expr: &TypeExpr) -> Option<&str> {
    match non_nullable(expr) {
        TypeExpr::Map { value, .. } => non_nullable(value).reference_name(),
        _ => None,
    }
}

fn log_unresolved(ctx: &dyn Introspect, handler: &str, target: &str) {
    if ctx.type_symbols(target).is_empty() {
        debug!("{}: type '{}' does not resolve, node stays a leaf", handler, target);
    }
}

/// Field whose type is a named record, e.g. `address: Address`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectHandler;

impl NodeHandler for ObjectHandler {
    fn name(&self) -> &str {
        "object"
    }

    fn recognizes(&self, declaration: &Declaration) -> bool {
        non_nullable(&declaration.type_expr).reference_name().is_some()
    }

    fn create(
        &self,
        ctx: &dyn Introspect,
        parent: &TypeNode,
        declaration: &Declaration,
    ) -> TypeNode {
        let target = non_nullable(&declaration.type_expr)
            .reference_name()
            .map(str::to_string);
        if let Some(t) = &target {
            log_unresolved(ctx, self.name(), t);
        }
        TypeNode::from_declaration(NodeKind::Object, parent, declaration, target)
    }
}

/// Field holding an array of records, e.g. `items: Item[]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayHandler;

impl NodeHandler for ArrayHandler {
    fn name(&self) -> &str {
        "array"
    }

    fn recognizes(&self, declaration: &Declaration) -> bool {
        referenced_element(&declaration.type_expr).is_some()
    }

    fn create(
        &self,
        ctx: &dyn Introspect,
        parent: &TypeNode,
        declaration: &Declaration,
    ) -> TypeNode {
        let target = referenced_element(&declaration.type_expr).map(str::to_string);
        if let Some(t) = &target {
            log_unresolved(ctx, self.name(), t);
        }
        TypeNode::from_declaration(NodeKind::Array, parent, declaration, target)
    }
}

/// Field holding records keyed by id, e.g. `users: Record<string, User>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordHandler;

impl NodeHandler for RecordHandler {
    fn name(&self) -> &str {
        "record"
    }

    fn recognizes(&self, declaration: &Declaration) -> bool {
        referenced_value(&declaration.type_expr).is_some()
    }

    fn create(
        &self,
        ctx: &dyn Introspect,
        parent: &TypeNode,
        declaration: &Declaration,
    ) -> TypeNode {
        let target = referenced_value(&declaration.type_expr).map(str::to_string);
        if let Some(t) = &target {
            log_unresolved(ctx, self.name(), t);
        }
        TypeNode::from_declaration(NodeKind::Record, parent, declaration, target)
    }
}

/// Names accepted by [`handler_by_name`], in default priority order.
pub const DEFAULT_HANDLER_NAMES: &[&str] = &["array", "record", "object"];

pub fn handler_by_name(name: &str) -> Result<Box<dyn NodeHandler>, DomainError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "object" => Ok(Box::new(ObjectHandler)),
        "array" => Ok(Box::new(ArrayHandler)),
        "record" => Ok(Box::new(RecordHandler)),
        other => Err(DomainError::UnknownHandler(other.to_string())),
    }
}

/// Builds a handler chain in the given priority order.
pub fn handlers_from_names<S: AsRef<str>>(
    names: &[S],
) -> Result<Vec<Box<dyn NodeHandler>>, DomainError> {
    names.iter().map(|n| handler_by_name(n.as_ref())).collect()
}

/// The built-in handlers, most specific first.
pub fn default_handlers() -> Vec<Box<dyn NodeHandler>> {
    vec![
        Box::new(ArrayHandler),
        Box::new(RecordHandler),
        Box::new(ObjectHandler),
    ]
}
