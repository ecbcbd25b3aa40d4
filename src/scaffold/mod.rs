//! Scaffolding new papers from templates.
//!
//! - Placeholder expansion and leftover detection in [`substitution`]
//! - Writing a paper from a template in [`create`]

pub mod create;
pub mod substitution;

pub use create::{create, ScaffoldOptions, TEMPLATE_KEY};
pub use substitution::{expand, unresolved, Substitution};
