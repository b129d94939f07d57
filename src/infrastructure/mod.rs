//! Infrastructure layer: I/O-backed implementations of domain boundary traits

pub mod error;
pub mod schema;

pub use error::{InfraError, InfraResult};
pub use schema::{SchemaContext, SchemaType};
