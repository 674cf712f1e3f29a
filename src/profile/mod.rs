//! Profile data model
//!
//! Every entity here is a plain value: a refresh produces a whole new
//! `Profile` rather than editing an existing one.

mod types;

pub use types::{Certification, Education, Experience, Position, Profile, Project};
