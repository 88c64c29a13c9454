//! Sorting catalog descriptors into instruction families, addressing modes and templates.

// ------------------------------------------------------------------------------------------------
// Sub-modules
// ------------------------------------------------------------------------------------------------

mod family;
mod shape;
mod templates;

pub use family::*;
pub use shape::*;
pub use templates::*;
