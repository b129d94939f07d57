//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on the introspection boundary trait.

pub mod error;
pub mod lens;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use lens::{
    gen_lens, gen_record_lens, gen_traversal, generate_lenses, lens_identifier, render_module,
    to_title_case, LensOptions,
};
pub use services::TypeTreeService;
