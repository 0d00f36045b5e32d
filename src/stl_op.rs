//! Conversion between `stl_io` meshes and the slicer's mesh types.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use nalgebra::{Affine3, Point3, Vector3};
use nalgebra_glm::cross;
use stl_io::{IndexedMesh, Triangle, Vector};

use crate::mesh::{SlicedMesh, SourceMesh};

pub fn read_source_mesh<P:AsRef<Path>>(path:P) -> io::Result<SourceMesh> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mesh = stl_io::read_stl(&mut reader)?;
    Ok(source_mesh_from_stl(&mesh))
}

/// STL files carry no texture coordinates, the resulting mesh is untextured.
pub fn source_mesh_from_stl(mesh:&IndexedMesh) -> SourceMesh {
    let vertices = mesh.vertices.iter()
        .map(|v| Point3::new(v[0],v[1],v[2]))
        .collect();
    let indices = mesh.faces.iter()
        .flat_map(|face| face.vertices)
        .collect();
    SourceMesh::new(vertices, indices, Vec::new())
}

/// Triangles of `mesh` with flat face normals, moved by `transform` if given.
pub fn stl_triangles(mesh:&SlicedMesh, transform:Option<&Affine3<f32>>) -> Vec<Triangle> {
    mesh.triangles()
        .map(|corners| match transform {
            Some(transform) => corners.map(|p| transform.transform_point(&p)),
            None => corners,
        })
        .map(|[a,b,c]|{
            let normal = cross(&(b-a), &(c-a))
                .try_normalize(0.0)
                .unwrap_or_else(Vector3::zeros);
            Triangle{
                normal: to_stl(&Point3::from(normal)),
                vertices: [to_stl(&a),to_stl(&b),to_stl(&c)],
            }
        })
        .collect()
}

/// Writes `mesh` as a binary STL file.
pub fn write_sliced_mesh<P:AsRef<Path>>(path:P, mesh:&SlicedMesh, transform:Option<&Affine3<f32>>) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    stl_io::write_stl(&mut writer, stl_triangles(mesh, transform).iter())
}

fn to_stl(p:&Point3<f32>) -> Vector<f32> {
    Vector::new([p.x,p.y,p.z])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data;
    use std::io::Cursor;

    #[test]
    fn stl_round_trip_keeps_triangles(){
        let cube = data::unit_cube();
        let bisection = crate::slicer::slice(
            &cube,
            &Affine3::identity(),
            &data::z_plane(0.5),
            true,
            &Default::default(),
        ).unwrap();
        let upper = bisection.upper.unwrap();

        let mut buffer = Cursor::new(Vec::new());
        stl_io::write_stl(&mut buffer, stl_triangles(&upper, None).iter()).unwrap();
        buffer.set_position(0);
        let indexed = stl_io::read_stl(&mut buffer).unwrap();
        let source = source_mesh_from_stl(&indexed);

        assert_eq!(source.triangle_count(),upper.triangle_count());
        assert!(source.uvs.is_empty());
        assert!(source.validate().is_ok());
    }
    #[test]
    fn stl_normals_follow_winding(){
        let cube = data::unit_cube();
        let bisection = crate::slicer::slice(
            &cube,
            &Affine3::identity(),
            &data::z_plane(0.5),
            true,
            &Default::default(),
        ).unwrap();
        let lower = bisection.lower.unwrap();
        // bottom face of the cube points down, the cap of the lower half points up
        let triangles = stl_triangles(&lower, None);
        assert!(triangles.iter().any(|tri| tri.normal[2] < -0.99));
        assert!(triangles.iter().any(|tri| tri.normal[2] >  0.99 && tri.vertices[0][2] == 0.5));
    }
}
