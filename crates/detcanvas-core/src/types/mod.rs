//! Type system utilities and aliases.
//!
//! This module provides type aliases and utilities for commonly used
//! complex types throughout the codebase.
//!
//! ## Modules
//!
//! - [`aliases`]: `Rc<RefCell<T>>` sharing and the box-update callback type.

pub mod aliases;

pub use aliases::*;
