//! Runtime mesh bisection.
//!
//! Cuts a triangle mesh with a plane into two meshes, one for each side of
//! the plane. For convex meshes the cross-section is closed with cap faces
//! on both halves.
//!
//! ```no_run
//! use mesh_bisect::{slice, Plane, SliceSettings, SourceMesh};
//! use nalgebra::{Affine3, Point3, Vector3};
//!
//! # fn load() -> SourceMesh { unimplemented!() }
//! let mesh:SourceMesh = load();
//! let plane = Plane::new(Point3::new(0.,0.,0.5), Vector3::z()).unwrap();
//! let halves = slice(&mesh, &Affine3::identity(), &plane, true, &SliceSettings::default()).unwrap();
//! ```

pub mod error;
pub mod geo;
pub mod mesh;
pub mod settings;
pub mod slicer;
pub mod stl_op;

#[cfg(test)]
mod data;

pub use error::{CapError, Result, SliceError};
pub use geo::{Aabb, BoundarySegment, Plane};
pub use mesh::{SliceBuffer, SlicedMesh, SourceMesh, Vertex};
pub use settings::{CapUv, SliceSettings};
pub use slicer::{cut, slice, Bisection, CutOutcome, CutReport, SliceTarget};
