use thiserror::Error;

/// Errors that abort the slicing of one mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SliceError {
    #[error("Invalid input: mesh has no triangles")]
    EmptyMesh,
    #[error("Invalid input: index count {0} is not a multiple of 3")]
    MalformedIndices(usize),
    #[error("Invalid input: triangle {triangle} references vertex {index} but the mesh only has {vertex_count} vertices")]
    IndexOutOfBounds{triangle:usize, index:usize, vertex_count:usize},
    #[error("Invalid input: {uvs} uv coordinates for {vertices} vertices")]
    UvCountMismatch{uvs:usize, vertices:usize},
    #[error("Invalid input: model transform is not invertible")]
    SingularTransform,
    #[error("Invalid plane: normal has zero length")]
    DegeneratePlane,
    /// A source vertex lies exactly on the cutting plane.
    #[error("Degenerate intersection: vertex {vertex} of triangle {triangle} lies on the cutting plane")]
    DegenerateIntersection{triangle:usize, vertex:usize},
}

impl SliceError {
    /// Degenerate intersections leave the source untouched and are not reported as failures.
    pub fn is_no_op(&self) -> bool {
        matches!(self, SliceError::DegenerateIntersection{..})
    }
}

/// Errors while filling the cross-section. These never discard the split faces.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CapError {
    #[error("Cap error: a boundary loop needs at least 3 segments, found {0}")]
    TooFewSegments(usize),
    #[error("Cap error: could not close boundary loop, {linked} segments linked, {remaining} left over")]
    UnlinkableLoop{linked:usize, remaining:usize},
    #[error("Cap error: triangulation made no progress on a ring of {ring_len} segments (pass {pass})")]
    TriangulationOverflow{ring_len:usize, pass:usize},
}

pub type Result<T> = std::result::Result<T, SliceError>;
