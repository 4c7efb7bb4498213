//! Page selection model.
//!
//! - [`ranges`]: turns user range text into validated page lists
//! - [`store`]: keeps the current selection of every document
//!
//! # Examples
//!
//! ```
//! use pdfpick::document::DocumentId;
//! use pdfpick::selection::{PageSelection, SelectionStore};
//!
//! let mut store = SelectionStore::new();
//! let id = DocumentId::from("report");
//!
//! store.set_selection(id.clone(), PageSelection::parse("2-3", 4));
//! assert_eq!(store.resolve(&id, 4), vec![2, 3]);
//!
//! // No explicit selection means every page
//! assert_eq!(store.resolve(&DocumentId::from("other"), 2), vec![1, 2]);
//! ```

pub mod ranges;
pub mod store;

pub use ranges::{RangeToken, format_ranges, parse_ranges};
pub use store::{PageSelection, SelectionStore};
