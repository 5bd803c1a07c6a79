//! Text layout: font fitting, metrics and the word-wrap engine.

pub mod engine;
pub mod font_fit;
pub mod metrics;

pub use engine::{layout, measure, LayoutResult, Pass};
pub use font_fit::{fit_font, MAX_FONT_SIZE, MIN_FONT_SIZE};
pub use metrics::{Font, MetricsProvider, MonospaceMetrics};
