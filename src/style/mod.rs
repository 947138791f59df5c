//! Style inference and application
//!
//! [`profile`] infers a [`StyleProfile`] from source text, [`apply`]
//! reformats rendered text to match one, and [`casing`] holds the shared
//! identifier tokenizer both sides use.

pub mod apply;
pub mod casing;
pub mod profile;

pub use apply::apply;
pub use casing::NamingConvention;
pub use profile::{BracketStyle, QuoteStyle, StyleProfile};
