mod point;
mod vector;

pub use point::Point;
pub use vector::GeoVector;

/// Angle type (alias for f64).
pub type Angle = f64;
