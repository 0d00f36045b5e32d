use log::trace;
use nalgebra::{Point3, Vector2, Vector3};
use nalgebra_glm::cross;

use crate::error::CapError;
use crate::geo::{BoundarySegment, Plane};
use crate::mesh::{SliceBuffer, Vertex};
use crate::settings::CapUv;

/// `|sin|` of the angle between two segment directions below which the
/// segments are treated as collinear.
const COLLINEAR_EPSILON: f32 = 1e-6;

/// Rotation of a boundary loop seen from the tip of the plane normal.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Signed turn from `a` to `b` about `normal`: positive for a left
/// (counter-clockwise) turn, negative for a right (clockwise) turn.
pub fn turn(a:&BoundarySegment, b:&BoundarySegment, normal:&Vector3<f32>) -> f32 {
    cross(&a.world_dir, &b.world_dir).dot(normal)
}

/// Number of left and right turns over all adjacent pairs of the ring,
/// including the pair closing the ring. Collinear pairs count as neither.
pub fn count_turns(ring:&[BoundarySegment], normal:&Vector3<f32>) -> (usize,usize) {
    let next = ring.iter().cycle().skip(1);
    ring.iter().zip(next)
        .map(|(a,b)| turn(a,b,normal))
        .fold((0,0),|(left,right),turn|{
            if turn > COLLINEAR_EPSILON { (left+1,right) }
            else if turn < -COLLINEAR_EPSILON { (left,right+1) }
            else { (left,right) }
        })
}

/// Majority vote of the turns, ties count as clockwise.
pub fn detect_winding(ring:&[BoundarySegment], normal:&Vector3<f32>) -> Winding {
    let (left,right) = count_turns(ring, normal);
    if left > right { Winding::CounterClockwise } else { Winding::Clockwise }
}

impl Winding {
    /// True if a turn of this sign does not go against the winding.
    fn allows(self, turn:f32) -> bool {
        match self {
            Winding::Clockwise => turn <= 0.0,
            Winding::CounterClockwise => turn >= 0.0,
        }
    }
}

/// Texture coordinates for cap vertices.
#[derive(Debug,Clone,Copy)]
enum UvMap {
    Zero,
    Planar{ origin:Point3<f32>, u:Vector3<f32>, v:Vector3<f32>, scale:f32 },
}
impl UvMap {
    fn new(cap_uv:CapUv, plane:&Plane) -> Self {
        match cap_uv {
            CapUv::Zero => UvMap::Zero,
            CapUv::Planar{ scale } => {
                let normal = plane.normal();
                // any axis that is not parallel to the normal spans the plane
                let axis = if normal.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
                let u = cross(&normal, &axis).normalize();
                let v = cross(&normal, &u);
                UvMap::Planar{ origin:plane.point(), u, v, scale }
            },
        }
    }
    fn uv(&self, world:&Point3<f32>) -> Vector2<f32> {
        match self {
            UvMap::Zero => Vector2::zeros(),
            UvMap::Planar{ origin, u, v, scale } => {
                let offset = world - origin;
                Vector2::new(offset.dot(u), offset.dot(v)) * *scale
            },
        }
    }
}

/// Fills a boundary loop with cap faces on both sides of the cut.
///
/// The upper mesh gets faces looking down the plane normal, the lower mesh
/// faces looking along it, so both caps face out of their solid.
#[derive(Debug,Clone,Copy)]
pub struct CapFiller{
    normal: Vector3<f32>,
    uv_map: UvMap,
    /// The model transform mirrors space, local windings are flipped.
    mirrored: bool,
}

impl CapFiller {
    pub fn new(plane:&Plane, cap_uv:CapUv, mirrored:bool) -> Self {
        Self{
            normal: plane.normal(),
            uv_map: UvMap::new(cap_uv, plane),
            mirrored,
        }
    }

    /// Triangulates `ring` by repeatedly clipping ears, returns the number of
    /// triangles added to each side.
    ///
    /// Each pass replaces every adjacent pair that turns with the winding by
    /// its chord. Pairs turning against the winding are kept for the next
    /// pass; a pass that removes nothing fails. Triangles emitted before a
    /// failure stay in the buffers.
    pub fn fill(
        &self,
        ring:Vec<BoundarySegment>,
        upper:&mut SliceBuffer,
        lower:&mut SliceBuffer,
        ) -> Result<usize,CapError> {
        if ring.len() < 3 { return Err(CapError::TooFewSegments(ring.len())) }
        let winding = detect_winding(&ring, &self.normal);
        trace!("cap ring of {} segments is {winding:?}",ring.len());
        self.reduce(ring, winding, upper, lower)
    }

    /// Ear clipping passes over a ring of known winding.
    pub(crate) fn reduce(
        &self,
        mut ring:Vec<BoundarySegment>,
        winding:Winding,
        upper:&mut SliceBuffer,
        lower:&mut SliceBuffer,
        ) -> Result<usize,CapError> {
        let mut emitted = 0;
        let max_passes = ring.len();
        for pass in 0..max_passes {
            match ring.len() {
                0..=2 => return Ok(emitted),
                3 => {
                    if self.ear(&ring[0], &ring[1], winding, upper, lower) { emitted += 1 }
                    return Ok(emitted)
                },
                _ => (),
            }
            let mut reduced = Vec::with_capacity(ring.len());
            let mut i = 0;
            while i < ring.len() {
                if let Some(next) = ring.get(i+1) {
                    let current = &ring[i];
                    let turn = turn(current, next, &self.normal);
                    if turn.abs() <= COLLINEAR_EPSILON || winding.allows(turn) {
                        if self.ear(current, next, winding, upper, lower) { emitted += 1 }
                        reduced.push(current.bridge(next));
                        i += 2;
                        continue
                    }
                }
                reduced.push(ring[i]);
                i += 1;
            }
            trace!("cap pass {pass}: ring {} -> {}",ring.len(),reduced.len());
            if reduced.len() == ring.len() {
                return Err(CapError::TriangulationOverflow{ ring_len:ring.len(), pass })
            }
            ring = reduced;
        }
        Err(CapError::TriangulationOverflow{ ring_len:ring.len(), pass:max_passes })
    }

    /// Emits the cap triangle spanned by `a` and `b` to both sides, unless
    /// the two segments are collinear.
    fn ear(
        &self,
        a:&BoundarySegment,
        b:&BoundarySegment,
        winding:Winding,
        upper:&mut SliceBuffer,
        lower:&mut SliceBuffer,
        ) -> bool {
        if turn(a, b, &self.normal).abs() <= COLLINEAR_EPSILON { return false }
        let corners = [
            self.vertex(&a.local_p1, &a.world_p1),
            self.vertex(&a.local_p2, &a.world_p2),
            self.vertex(&b.local_p2, &b.world_p2),
        ];
        let [p1,p2,p3] = corners;
        let reversed = [p3,p2,p1];
        // a clockwise ear already looks down the normal
        let faces_down = (winding == Winding::Clockwise) != self.mirrored;
        let (upper_face,lower_face) = if faces_down { (corners,reversed) } else { (reversed,corners) };
        upper.push_triangle(upper_face);
        lower.push_triangle(lower_face);
        true
    }

    fn vertex(&self, local:&Point3<f32>, world:&Point3<f32>) -> Vertex {
        Vertex::new(*local, self.uv_map.uv(world))
    }
}
