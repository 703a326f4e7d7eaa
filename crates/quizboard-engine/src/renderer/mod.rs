pub mod recording;
pub mod traits;

// Re-export key types for convenient access
pub use traits::{Painter, TextMetrics, TextStyle};
