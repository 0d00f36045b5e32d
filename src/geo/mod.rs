mod aabb;
pub use aabb::*;

mod plane;
pub use plane::*;

mod segment;
pub use segment::*;
