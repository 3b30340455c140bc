//! Property locator/rewriter for animation documents.
//!
//! Scans a nested document for nodes that follow the icon authoring naming
//! conventions and exposes them as addressable records that can be read,
//! overwritten, or restored to their captured values.

pub mod path;
pub mod record;
pub mod rewrite;
pub mod scan;

pub use path::*;
pub use record::*;
pub use rewrite::*;
pub use scan::*;
