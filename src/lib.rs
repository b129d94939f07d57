//! Decompose composite type definitions into ordered node trees.
//!
//! A [`TypeNodeTree`](domain::TypeNodeTree) walks a root type through an
//! [`Introspect`](domain::Introspect) implementation and turns every property
//! into a node, letting a chain of [`NodeHandler`](domain::NodeHandler)s pick
//! specialized node kinds. The finished tree feeds lens generation.
//!
//! Layers, innermost first:
//! - `domain`: tree, builder, handlers, type expressions
//! - `application`: lens generation and the configured tree service
//! - `infrastructure`: TOML schema introspection
//! - `cli`: command line front end

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;

pub use application::TypeTreeService;
pub use domain::{
    default_handlers, BuildOptions, DomainError, Introspect, NodeHandler, NodeKind, TreeArena,
    TypeNode, TypeNodeTree,
};
pub use infrastructure::SchemaContext;
