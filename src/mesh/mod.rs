use nalgebra::{Point3, Vector2};
use nalgebra_glm::cross;

use crate::error::{Result, SliceError};
use crate::geo::Aabb;


/// A corner of a triangle: local-space position and texture coordinate.
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Vertex{
    pub position: Point3<f32>,
    pub uv: Vector2<f32>,
}
impl Vertex {
    pub fn new(position:Point3<f32>, uv:Vector2<f32>) -> Self {
        Self{ position, uv }
    }
}

/// Indexed triangle mesh in model space, the input of the slicer.
///
/// `uvs` is either empty (untextured mesh, every uv reads as (0,0)) or has
/// one entry per vertex.
#[derive(Debug,Clone,Default,PartialEq)]
pub struct SourceMesh{
    pub vertices: Vec<Point3<f32>>,
    pub indices: Vec<usize>,
    pub uvs: Vec<Vector2<f32>>,
}

impl SourceMesh {
    pub fn new(vertices:Vec<Point3<f32>>, indices:Vec<usize>, uvs:Vec<Vector2<f32>>) -> Self {
        Self{ vertices, indices, uvs }
    }
    pub fn validate(&self) -> Result<()> {
        if self.indices.is_empty() || self.vertices.is_empty() {
            return Err(SliceError::EmptyMesh)
        }
        if self.indices.len() % 3 != 0 {
            return Err(SliceError::MalformedIndices(self.indices.len()))
        }
        if !self.uvs.is_empty() && self.uvs.len() != self.vertices.len() {
            return Err(SliceError::UvCountMismatch{ uvs:self.uvs.len(), vertices:self.vertices.len() })
        }
        let vertex_count = self.vertices.len();
        match self.indices.iter().position(|ndx| *ndx >= vertex_count) {
            Some(i) => Err(SliceError::IndexOutOfBounds{ triangle:i/3, index:self.indices[i], vertex_count }),
            None => Ok(()),
        }
    }
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
    pub fn triangles(&self) -> impl Iterator<Item = [usize;3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| [tri[0],tri[1],tri[2]])
    }
    pub fn uv(&self, ndx:usize) -> Vector2<f32> {
        self.uvs.get(ndx).copied().unwrap_or_else(Vector2::zeros)
    }
    pub fn vertex(&self, ndx:usize) -> Vertex {
        Vertex::new(self.vertices[ndx], self.uv(ndx))
    }
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter())
    }
}

/// Accumulates the triangles of one side of a cut.
///
/// The buffer is non-indexed: every triangle appends three fresh vertices and
/// the index list is always `0..vertices.len()`.
#[derive(Debug,Clone,Default)]
pub struct SliceBuffer{
    vertices: Vec<Point3<f32>>,
    indices: Vec<u32>,
    uvs: Vec<Vector2<f32>>,
}

impl SliceBuffer {
    pub fn new() -> Self { Self::default() }
    pub fn push_triangle(&mut self, triangle:[Vertex;3]) {
        for vertex in triangle {
            self.indices.push(self.vertices.len() as u32);
            self.vertices.push(vertex.position);
            self.uvs.push(vertex.uv);
        }
    }
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
    /// Packages the buffer, an empty buffer produces no mesh.
    pub fn finish(self) -> Option<SlicedMesh> {
        if self.is_empty() { return None }
        Some(SlicedMesh{
            vertices: self.vertices,
            indices: self.indices,
            uvs: self.uvs,
        })
    }
}

/// One half of a sliced mesh, in the model space of the source mesh.
///
/// Normals and bounds for rendering are left to the consumer.
#[derive(Debug,Clone,PartialEq)]
pub struct SlicedMesh{
    vertices: Vec<Point3<f32>>,
    indices: Vec<u32>,
    uvs: Vec<Vector2<f32>>,
}

impl SlicedMesh {
    pub fn vertices(&self) -> &[Point3<f32>] { &self.vertices }
    pub fn indices(&self) -> &[u32] { &self.indices }
    pub fn uvs(&self) -> &[Vector2<f32>] { &self.uvs }
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f32>;3]> + '_ {
        self.indices.chunks_exact(3)
            .map(|tri| [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ])
    }
    /// Total surface area.
    pub fn area(&self) -> f32 {
        self.triangles().map(|tri| triangle_area(&tri)).sum()
    }
    /// Signed volume enclosed by the surface, positive for a closed mesh with
    /// outward facing (counter-clockwise) triangles.
    pub fn signed_volume(&self) -> f32 {
        self.triangles()
            .map(|[a,b,c]| a.coords.dot(&cross(&b.coords, &c.coords)))
            .sum::<f32>() / 6.0
    }
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter())
    }
}

pub fn triangle_area([a,b,c]:&[Point3<f32>;3]) -> f32 {
    0.5 * cross(&(b-a), &(c-a)).norm()
}
