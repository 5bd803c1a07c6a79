//! Domain model types (pure).
//!
//! All types in this module are plain data with small constructors.

pub mod error;
pub mod geometry;
pub mod page;

// Re-export for convenience
pub use error::{AppError, LayoutError};
pub use geometry::{CellSize, Margin, PageGeometry, PenPosition, PixelRect, Viewport};
pub use page::Page;
