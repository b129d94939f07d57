//! Lens generation from a built type tree.
//!
//! Emits monocle-ts style declarations. Identifiers follow
//! `get<Field>From<OwnerType>`, e.g. `getLabelFromBaz`.

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::{NodeKind, TreeArena, TypeNode};

/// Header emitted once per generated module.
pub const MODULE_IMPORTS: &str = "import {Lens, fromTraversable} from 'monocle-ts'\n\
                                  import {array} from 'fp-ts/lib/Array'";

/// Options for [`generate_lenses`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LensOptions {
    /// Key field of the records addressed by record lenses
    pub id_field: String,
}

impl Default for LensOptions {
    fn default() -> Self {
        Self {
            id_field: "id".into(),
        }
    }
}

/// Converts `created_at` / `created-at` / `createdAt` to `CreatedAt`.
#[must_use]
pub fn to_title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

#[must_use]
pub fn lens_identifier(origin_type: &str, prop: &str) -> String {
    format!("get{}From{}", to_title_case(prop), to_title_case(origin_type))
}

#[must_use]
pub fn gen_lens(origin_type: &str, prop: &str) -> String {
    format!(
        "const {} = Lens.fromProp<{}>()('{}')",
        lens_identifier(origin_type, prop),
        origin_type,
        prop
    )
}

#[must_use]
pub fn gen_record_lens(origin_type: &str, prop: &str, id_field: &str) -> String {
    format!(
        "const {} = Lens.fromProp<Record<{}['{}'], {}>>()",
        lens_identifier(origin_type, prop),
        origin_type,
        id_field,
        origin_type
    )
}

fn traversal_identifier(traversal_id: &str) -> String {
    format!("{}Traversal", traversal_id.to_lowercase())
}

#[must_use]
pub fn gen_traversal(traversal_id: &str) -> String {
    format!(
        "const {} = fromTraversable(array)<{}>()",
        traversal_identifier(traversal_id),
        traversal_id
    )
}

// (identifier, declaration) pairs for one node
fn node_declarations(node: &TypeNode, options: &LensOptions) -> Vec<(String, String)> {
    let owner = node.owner_or_name();
    let lens = (lens_identifier(owner, &node.name), gen_lens(owner, &node.name));
    match (&node.kind, &node.target) {
        (NodeKind::Root, _) => Vec::new(),
        (NodeKind::Array, Some(target)) => vec![
            lens,
            (traversal_identifier(target), gen_traversal(target)),
        ],
        (NodeKind::Record, Some(target)) => vec![
            lens,
            (
                lens_identifier(target, &node.name),
                gen_record_lens(target, &node.name, &options.id_field),
            ),
        ],
        _ => vec![lens],
    }
}

/// Walks `tree` pre-order and emits one declaration set per field node.
///
/// Each identifier is declared once: a type reached through several paths, or
/// a record lens sharing its name with a field lens, keeps the first-seen
/// declaration.
#[instrument(level = "debug", skip_all)]
pub fn generate_lenses(tree: &TreeArena<TypeNode>, options: &LensOptions) -> Vec<String> {
    let lines: Vec<String> = tree
        .iter()
        .flat_map(|(_, node)| node_declarations(&node.data, options))
        .unique_by(|(identifier, _)| identifier.clone())
        .map(|(_, line)| line)
        .collect();
    debug!("generated {} declarations", lines.len());
    lines
}

/// Complete module source: imports followed by all declarations.
pub fn render_module(tree: &TreeArena<TypeNode>, options: &LensOptions) -> String {
    let body = generate_lenses(tree, options).join("\n");
    format!("{MODULE_IMPORTS}\n\n{body}\n")
}
