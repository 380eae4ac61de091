pub mod point;
pub mod transform;
pub mod vector;

pub use point::Point3;
pub use transform::{BoundingBox, Transform};
pub use vector::Vec3;
