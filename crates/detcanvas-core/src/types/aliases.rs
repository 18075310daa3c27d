//! Type aliases for commonly used complex types.
//!
//! All editor state lives on the UI thread, so sharing is done with
//! `Rc<RefCell<T>>` rather than locks.
//!
//! ## Usage
//!
//! ```rust
//! use detcanvas_core::types::{shared, Shared};
//!
//! let counter: Shared<u32> = shared(0);
//! *counter.borrow_mut() += 1;
//! assert_eq!(*counter.borrow(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::data::BoxGeometry;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
pub type Shared<T> = Rc<RefCell<T>>;

/// Observer invoked as `update_box(id, new_box)` whenever a drag commits
/// new geometry for a detection.
pub type BoxUpdateCallback = Rc<dyn Fn(&str, &BoxGeometry)>;

/// Wraps a value in `Rc<RefCell<_>>`.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
