//! Core value types shared across the engine

pub mod colour;
pub mod handle;
pub mod line_weight;
pub mod vector;
pub mod version;

pub use colour::Colour;
pub use handle::Handle;
pub use line_weight::LineWeight;
pub use vector::Vector2;
pub use version::DxfVersion;
