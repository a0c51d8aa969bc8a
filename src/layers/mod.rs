pub mod base;
pub mod campus;
pub mod expression;
pub mod manager;
pub mod style;

pub use base::{LayerSpec, LayerType, SourceSpec};
pub use expression::Expr;
pub use manager::{AppliedLayers, LayerManager};
pub use style::StyleDocument;
