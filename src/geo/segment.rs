use nalgebra::{Point3, Vector3};

/// One edge of the cross-section left by a cutting plane.
///
/// Local points are in the model space of the source mesh, world points are
/// the same points after the model transform. `world_dir` is the normalized
/// world-space direction from `world_p1` to `world_p2` (zero for a
/// degenerate segment).
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct BoundarySegment{
    pub local_p1: Point3<f32>,
    pub local_p2: Point3<f32>,
    pub world_p1: Point3<f32>,
    pub world_p2: Point3<f32>,
    pub world_dir: Vector3<f32>,
}

impl BoundarySegment {
    pub fn new(
        local_p1:Point3<f32>,
        local_p2:Point3<f32>,
        world_p1:Point3<f32>,
        world_p2:Point3<f32>,
        ) -> Self {
        let world_dir = (world_p2 - world_p1)
            .try_normalize(0.0)
            .unwrap_or_else(Vector3::zeros);
        Self{ local_p1, local_p2, world_p1, world_p2, world_dir }
    }
    /// The same segment traversed the other way.
    pub fn flipped(&self) -> Self {
        Self{
            local_p1: self.local_p2,
            local_p2: self.local_p1,
            world_p1: self.world_p2,
            world_p2: self.world_p1,
            world_dir: -self.world_dir,
        }
    }
    /// Chord from the start of `self` to the end of `next`.
    pub fn bridge(&self, next:&Self) -> Self {
        Self::new(self.local_p1, next.local_p2, self.world_p1, next.world_p2)
    }
    pub fn local_length(&self) -> f32 {
        nalgebra::distance(&self.local_p1, &self.local_p2)
    }
}

#[test]
fn flipped_segment_test(){
    let segment = BoundarySegment::new(
        Point3::new(0.,0.,0.),
        Point3::new(2.,0.,0.),
        Point3::new(1.,1.,0.),
        Point3::new(3.,1.,0.),
    );
    assert_eq!(segment.world_dir,Vector3::new(1.,0.,0.));
    let flipped = segment.flipped();
    assert_eq!(flipped.local_p1,segment.local_p2);
    assert_eq!(flipped.world_p2,segment.world_p1);
    assert_eq!(flipped.world_dir,Vector3::new(-1.,0.,0.));
    assert_eq!(flipped.flipped(),segment);
}
#[test]
fn bridge_segment_test(){
    let a = BoundarySegment::new(Point3::new(0.,0.,0.),Point3::new(1.,0.,0.),Point3::new(0.,0.,0.),Point3::new(1.,0.,0.));
    let b = BoundarySegment::new(Point3::new(1.,0.,0.),Point3::new(1.,1.,0.),Point3::new(1.,0.,0.),Point3::new(1.,1.,0.));
    let chord = a.bridge(&b);
    assert_eq!(chord.local_p1,Point3::new(0.,0.,0.));
    assert_eq!(chord.local_p2,Point3::new(1.,1.,0.));
    assert!((chord.world_dir.norm() - 1.0).abs() < 1e-6);
    assert_eq!(chord.local_length(),2.0_f32.sqrt());
}
