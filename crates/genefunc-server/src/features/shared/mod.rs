//! Utilities shared by feature slices

pub mod validation;
