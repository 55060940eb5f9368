//! Utility functions for hxform.
//!
//! - [`text`]: field-title derivation and other string helpers.
//! - [`html`]: HTML escaping for text inserted into generated markup.

pub mod html;
pub mod text;

pub use html::escape_html;
pub use text::title_from_name;
