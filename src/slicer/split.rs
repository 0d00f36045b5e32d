use log::trace;
use nalgebra::{Affine3, Point3};
use nalgebra_glm::lerp;

use crate::error::{Result, SliceError};
use crate::geo::{BoundarySegment, Plane};
use crate::mesh::Vertex;

/// Triangles over the five points of a bisected triangle
/// `[odd, other1, other2, intersection1, intersection2]` when the reordered
/// triangle keeps the winding of the source triangle.
/// Row 0 is the triangle on the odd vertex's side, rows 1 and 2 cover the quad.
pub const PRESERVED_ORDER: [[usize;3];3] = [[0,3,4],[1,2,4],[4,3,1]];
/// Same triangles for a reordering that flipped the winding.
pub const REVERSED_ORDER: [[usize;3];3] = reverse_rows(PRESERVED_ORDER);

const fn reverse_rows(table:[[usize;3];3]) -> [[usize;3];3] {
    let mut reversed = [[0;3];3];
    let mut i = 0;
    while i < 3 {
        reversed[i] = [table[i][2], table[i][1], table[i][0]];
        i += 1;
    }
    reversed
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum Side {
    Upper,
    Lower,
}
impl Side {
    fn of(side:f32) -> Self {
        if side > 0.0 { Side::Upper } else { Side::Lower }
    }
    pub fn opposite(self) -> Self {
        match self {
            Side::Upper => Side::Lower,
            Side::Lower => Side::Upper,
        }
    }
}

/// How a triangle relates to the cutting plane.
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum Classification {
    /// All three vertices on one side.
    Whole(Side),
    /// The vertex `order[0]` is alone on `odd_side`. `order` lists the source
    /// vertices starting with the odd one, `table` is the matching triangle table.
    Straddling{ odd_side: Side, order: [usize;3], table: [[usize;3];3] },
}

/// Classifies a triangle from the signed sides of its vertices.
/// Fails if a vertex lies exactly on the plane.
pub fn classify(sides:[f32;3], triangle:usize) -> Result<Classification> {
    if let Some(vertex) = sides.iter().position(|side| *side == 0.0) {
        return Err(SliceError::DegenerateIntersection{ triangle, vertex })
    }
    let [s0,s1,s2] = sides.map(Side::of);
    if s0 == s1 && s1 == s2 {
        return Ok(Classification::Whole(s0))
    }
    let (order,table) = if s0 == s1 {
        ([2,0,1], PRESERVED_ORDER)
    } else if s0 == s2 {
        ([1,0,2], REVERSED_ORDER)
    } else {
        ([0,1,2], PRESERVED_ORDER)
    };
    Ok(Classification::Straddling{ odd_side: Side::of(sides[order[0]]), order, table })
}

/// Result of cutting one triangle.
#[derive(Debug,Clone,PartialEq)]
pub enum TriangleSplit {
    Whole{ side: Side, triangle: [Vertex;3] },
    Bisected{
        odd_side: Side,
        /// The triangle holding the odd vertex.
        single: [Vertex;3],
        /// The two triangles covering the other side.
        quad: [[Vertex;3];2],
        segment: BoundarySegment,
    },
}

impl TriangleSplit {
    /// Calls `emit` for every produced triangle with the side it belongs to.
    pub fn for_each_triangle<F:FnMut(Side,[Vertex;3])>(&self, mut emit:F) {
        match self {
            TriangleSplit::Whole{ side, triangle } => emit(*side,*triangle),
            TriangleSplit::Bisected{ odd_side, single, quad, .. } => {
                emit(*odd_side,*single);
                for triangle in quad { emit(odd_side.opposite(),*triangle) }
            },
        }
    }
    pub fn segment(&self) -> Option<&BoundarySegment> {
        match self {
            TriangleSplit::Whole{..} => None,
            TriangleSplit::Bisected{ segment, .. } => Some(segment),
        }
    }
}

/// Cuts one source triangle.
///
/// `local` holds the model-space corners, `world` the same corners after the
/// model transform and `to_local` the inverse of that transform.
pub fn split_triangle(
    local:[Vertex;3],
    world:[Point3<f32>;3],
    plane:&Plane,
    to_local:&Affine3<f32>,
    triangle:usize,
    ) -> Result<TriangleSplit> {
    let sides = world.map(|p| plane.side(&p));
    let (odd_side,order,table) = match classify(sides,triangle)? {
        Classification::Whole(side) => return Ok(TriangleSplit::Whole{ side, triangle:local }),
        Classification::Straddling{ odd_side, order, table } => (odd_side,order,table),
    };

    let [odd,far1,far2] = order;
    let world_i1 = edge_intersection(plane, world[odd], world[far1], sides[odd], sides[far1]);
    let world_i2 = edge_intersection(plane, world[odd], world[far2], sides[odd], sides[far2]);
    let local_i1 = to_local.transform_point(&world_i1);
    let local_i2 = to_local.transform_point(&world_i2);

    let points = [
        local[odd],
        local[far1],
        local[far2],
        Vertex::new(local_i1, interpolate_uv(&local[odd], &local[far1], &local_i1)),
        Vertex::new(local_i2, interpolate_uv(&local[odd], &local[far2], &local_i2)),
    ];
    let [single,quad1,quad2] = table.map(|row| row.map(|ndx| points[ndx]));
    trace!("triangle {triangle}: odd vertex {odd} on {odd_side:?} side");

    Ok(TriangleSplit::Bisected{
        odd_side,
        single,
        quad: [quad1,quad2],
        segment: BoundarySegment::new(local_i1, local_i2, world_i1, world_i2),
    })
}

/// Point where the edge `a - b` crosses the plane.
///
/// An edge shared by two triangles is visited once from each side, so the
/// ray always starts at the lexicographically smaller endpoint. Both
/// triangles then get the bit-identical point and their segments weld
/// exactly, whatever the magnitude of the coordinates.
fn edge_intersection(plane:&Plane, a:Point3<f32>, b:Point3<f32>, side_a:f32, side_b:f32) -> Point3<f32> {
    let (from,to,side_from,side_to) = if precedes(&b, &a) {
        (b,a,side_b,side_a)
    } else {
        (a,b,side_a,side_b)
    };
    let direction = to - from;
    plane.intersect(&from, &direction)
        .unwrap_or_else(|| from + direction * (side_from / (side_from - side_to)))
}

fn precedes(a:&Point3<f32>, b:&Point3<f32>) -> bool {
    (a.x,a.y,a.z) < (b.x,b.y,b.z)
}

/// Uv at `point` on the edge `odd -> far`, interpolated by distance from the odd vertex.
fn interpolate_uv(odd:&Vertex, far:&Vertex, point:&Point3<f32>) -> nalgebra::Vector2<f32> {
    let edge_len = nalgebra::distance(&odd.position, &far.position);
    let t = if edge_len > 0.0 {
        nalgebra::distance(&odd.position, point) / edge_len
    } else { 0.0 };
    lerp(&odd.uv, &far.uv, t)
}
