//! Bisection of a triangle mesh by a plane.
//!
//! [`slice`] runs every source triangle through [`split_triangle`], routing
//! the pieces into an upper and a lower [`SliceBuffer`]. The boundary
//! segments left by straddling triangles are linked into loops
//! ([`assemble_loops`]) and, for convex sources, filled with cap faces
//! ([`CapFiller`]). All buffers belong to a single call, so different meshes
//! can be sliced concurrently.

use log::{debug, warn};
use nalgebra::Affine3;

use crate::error::{CapError, Result, SliceError};
use crate::geo::{BoundarySegment, Plane};
use crate::mesh::{SliceBuffer, SlicedMesh, SourceMesh};
use crate::settings::SliceSettings;

mod split;
pub use split::*;

mod assemble;
pub use assemble::*;

mod cap;
pub use cap::*;

mod cut;
pub use cut::*;


/// The two halves of a sliced mesh.
#[derive(Debug,Clone,PartialEq)]
pub struct Bisection{
    /// Geometry on the positive side of the plane.
    pub upper: Option<SlicedMesh>,
    /// Geometry on the negative side of the plane.
    pub lower: Option<SlicedMesh>,
    /// Number of source triangles that straddled the plane.
    pub boundary_segments: usize,
    /// Cap triangles added to each side.
    pub cap_triangles: usize,
    /// Set when the cross-section could not be (fully) capped.
    pub cap_error: Option<CapError>,
}

/// Cuts `source` with `plane`.
///
/// `transform` maps the mesh's model space to the world space of `plane`.
/// The output meshes are in model space. Caps are only generated when
/// `is_convex` is set (and enabled in `settings`).
///
/// A vertex lying exactly on the plane aborts the slice with
/// [`SliceError::DegenerateIntersection`]. Cap failures do not abort the
/// slice; they are reported in [`Bisection::cap_error`].
pub fn slice(
    source:&SourceMesh,
    transform:&Affine3<f32>,
    plane:&Plane,
    is_convex:bool,
    settings:&SliceSettings,
    ) -> Result<Bisection> {
    source.validate()?;
    let to_local = transform.try_inverse().ok_or(SliceError::SingularTransform)?;

    let mut upper = SliceBuffer::new();
    let mut lower = SliceBuffer::new();
    let mut segments:Vec<BoundarySegment> = Vec::new();

    for (triangle_ndx,triangle) in source.triangles().enumerate() {
        let local = triangle.map(|ndx| source.vertex(ndx));
        let world = local.map(|vertex| transform.transform_point(&vertex.position));
        let split = split_triangle(local, world, plane, &to_local, triangle_ndx)?;
        split.for_each_triangle(|side,triangle| match side {
            Side::Upper => upper.push_triangle(triangle),
            Side::Lower => lower.push_triangle(triangle),
        });
        if let Some(segment) = split.segment() {
            segments.push(*segment);
        }
    }
    debug!("sliced {} triangles: {} upper, {} lower, {} boundary segments",
        source.triangle_count(), upper.triangle_count(), lower.triangle_count(), segments.len());

    let boundary_segments = segments.len();
    let mut cap_triangles = 0;
    let mut cap_error = None;
    if is_convex && settings.fill_caps && !segments.is_empty() {
        let filler = CapFiller::new(plane, settings.cap_uv, is_mirroring(transform));
        match fill_caps(&filler, segments, settings.weld_tolerance, &mut upper, &mut lower) {
            Ok(count) => cap_triangles = count,
            Err((count,error)) => {
                warn!("{error}");
                cap_triangles = count;
                cap_error = Some(error);
            },
        }
    }

    Ok(Bisection{
        upper: upper.finish(),
        lower: lower.finish(),
        boundary_segments,
        cap_triangles,
        cap_error,
    })
}

/// Assembles and fills every boundary loop. On failure the number of cap
/// triangles already emitted is returned with the error.
fn fill_caps(
    filler:&CapFiller,
    segments:Vec<BoundarySegment>,
    tolerance:f32,
    upper:&mut SliceBuffer,
    lower:&mut SliceBuffer,
    ) -> std::result::Result<usize,(usize,CapError)> {
    let loops = assemble_loops(segments, tolerance).map_err(|error| (0,error))?;
    let mut emitted = 0;
    for ring in loops {
        let before = upper.triangle_count();
        match filler.fill(ring, upper, lower) {
            Ok(count) => emitted += count,
            Err(error) => return Err((emitted + upper.triangle_count() - before, error)),
        }
    }
    Ok(emitted)
}

/// True if the transform flips handedness.
fn is_mirroring(transform:&Affine3<f32>) -> bool {
    transform.matrix().fixed_view::<3,3>(0,0).determinant() < 0.0
}
