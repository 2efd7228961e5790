//! Theme for the form UI.
//!
//! - `palette`: raw color constants
//! - `styles`: semantic style builders shared by the screen chrome

pub mod palette;
pub mod styles;
