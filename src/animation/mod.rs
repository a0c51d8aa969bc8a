pub mod flight;
pub mod interpolation;

// Re-export commonly used types and functions for convenience
pub use flight::FlyToOptions;
pub use interpolation::{marker_scale, Interpolation};
