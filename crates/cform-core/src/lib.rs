//! # cform-core - Core Domain Types
//!
//! Foundation crate for config-form. Provides the typed schema document,
//! the form data tree, field values, viewport classification, description
//! markup and error handling.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, indexmap, thiserror, regex, pulldown-cmark, tracing).
//!
//! ## Public API
//!
//! ### Schema (`schema`)
//! - [`SchemaDocument`] - Validated schema document and definition lookup
//! - [`SubSchema`], [`PropertySchema`], [`FieldSchema`] - Typed schema tree
//! - [`FieldKind`] - Closed set of editable field kinds
//! - [`SchemaIssue`] - Problems found while validating a document
//!
//! ### Form Data (`data`, `value`)
//! - [`FormData`] - Dot-path addressed tree of form values
//! - [`FieldValue`] - Typed value emitted by a field
//! - [`shallow_diff()`] - Top-level changes between two trees
//!
//! ### Viewport (`viewport`)
//! - [`Viewport`] - Breakpoint classification of the window width
//! - [`ResizeDebouncer`] - Trailing debounce of resize events
//!
//! ### Markup (`markup`)
//! - [`render_description()`] - Sanitized Markdown rendering for help text
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use cform_core::prelude::*;
//! ```

pub mod data;
pub mod error;
pub mod logging;
pub mod markup;
pub mod schema;
pub mod value;
pub mod viewport;

/// Prelude for common imports used throughout all config-form crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use data::{is_truthy, join_path, shallow_diff, FormData};
pub use error::{Error, Result, ResultExt};
pub use markup::{
    literal_lines, render_description, sanitize_text, MarkupLine, MarkupSpan, SpanStyle,
};
pub use schema::{
    ref_name, FieldKind, FieldSchema, PropertySchema, SchemaDocument, SchemaIssue, SelectOption,
    SubSchema, TextInput,
};
pub use value::FieldValue;
pub use viewport::{ResizeDebouncer, Viewport};
