//! Application services

pub mod typetree;

pub use typetree::TypeTreeService;
