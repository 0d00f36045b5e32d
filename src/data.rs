//! Meshes and planes shared by the tests.
use nalgebra::{Point3, Vector2, Vector3};

use crate::geo::Plane;
use crate::mesh::SourceMesh;

/// Unit cube from (0,0,0) to (1,1,1), 12 counter-clockwise triangles facing
/// outwards, uv = (x,y) of each vertex.
pub fn unit_cube() -> SourceMesh {
    let vertices = vec![
        Point3::new(0.,0.,0.), // 0
        Point3::new(1.,0.,0.), // 1
        Point3::new(1.,1.,0.), // 2
        Point3::new(0.,1.,0.), // 3
        Point3::new(0.,0.,1.), // 4
        Point3::new(1.,0.,1.), // 5
        Point3::new(1.,1.,1.), // 6
        Point3::new(0.,1.,1.), // 7
    ];
    let indices = vec![
        0,2,1, 0,3,2, // bottom
        4,5,6, 4,6,7, // top
        0,1,5, 0,5,4, // front
        2,3,7, 2,7,6, // back
        0,4,7, 0,7,3, // left
        1,2,6, 1,6,5, // right
    ];
    let uvs = vertices.iter().map(|p| Vector2::new(p.x,p.y)).collect();
    SourceMesh::new(vertices, indices, uvs)
}

/// Regular-ish tetrahedron with counter-clockwise outward faces and no uvs.
pub fn tetrahedron() -> SourceMesh {
    let vertices = vec![
        Point3::new(0.0,0.0,0.0),
        Point3::new(2.0,0.0,0.0),
        Point3::new(0.0,2.0,0.0),
        Point3::new(0.3,0.4,2.0),
    ];
    let indices = vec![
        0,2,1,
        0,1,3,
        1,2,3,
        2,0,3,
    ];
    SourceMesh::new(vertices, indices, Vec::new())
}

/// Two unit cubes, the second one moved 3 units along x.
pub fn two_cubes() -> SourceMesh {
    let mut mesh = unit_cube();
    let other = unit_cube();
    let offset = mesh.vertices.len();
    mesh.vertices.extend(other.vertices.iter().map(|p| p + Vector3::new(3.,0.,0.)));
    mesh.indices.extend(other.indices.iter().map(|ndx| ndx + offset));
    mesh.uvs.extend(other.uvs);
    mesh
}

/// Horizontal plane at height `z`, normal pointing up.
pub fn z_plane(z:f32) -> Plane {
    Plane::new(Point3::new(0.,0.,z), Vector3::z()).unwrap()
}

/// `mesh` scaled about the origin and moved by `offset`, baked into the vertices.
pub fn placed(mesh:SourceMesh, scale:f32, offset:Vector3<f32>) -> SourceMesh {
    let vertices = mesh.vertices.iter().map(|p| p * scale + offset).collect();
    SourceMesh::new(vertices, mesh.indices, mesh.uvs)
}

/// Closed uv sphere with `rings` latitude bands and `segments` longitude
/// steps, outward counter-clockwise faces, no uvs.
pub fn uv_sphere(center:Point3<f32>, radius:f32, rings:usize, segments:usize) -> SourceMesh {
    use std::f32::consts::{PI, TAU};
    let mut vertices = vec![center + Vector3::z() * radius];
    for ring in 1..rings {
        let theta = PI * ring as f32 / rings as f32;
        for segment in 0..segments {
            let phi = TAU * segment as f32 / segments as f32;
            let direction = Vector3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos());
            vertices.push(center + direction * radius);
        }
    }
    let bottom = vertices.len();
    vertices.push(center - Vector3::z() * radius);

    let ring_start = |ring:usize| 1 + (ring - 1) * segments;
    let mut indices = Vec::new();
    for j in 0..segments {
        let next = (j + 1) % segments;
        indices.extend([0, ring_start(1) + j, ring_start(1) + next]);
        for ring in 1..rings-1 {
            let (a,b) = (ring_start(ring), ring_start(ring + 1));
            indices.extend([a + j, b + j, b + next]);
            indices.extend([a + j, b + next, a + next]);
        }
        indices.extend([bottom, ring_start(rings - 1) + next, ring_start(rings - 1) + j]);
    }
    SourceMesh::new(vertices, indices, Vec::new())
}
