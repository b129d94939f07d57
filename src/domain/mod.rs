//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod handler;
pub mod introspect;
pub mod node;
pub mod parser;

pub use arena::{NodeId, TreeArena, TreeNode};
pub use builder::{BuildOptions, TreeResult, TypeNodeTree};
pub use entities::*;
pub use error::DomainError;
pub use handler::{
    default_handlers, handler_by_name, handlers_from_names, ArrayHandler, NodeHandler,
    ObjectHandler, RecordHandler, DEFAULT_HANDLER_NAMES,
};
pub use introspect::Introspect;
pub use node::{NodeKind, TypeNode};
pub use parser::parse_type_expr;
