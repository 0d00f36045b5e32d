use nalgebra::{Point3, Vector3};
use nalgebra_glm::cross;

use super::Aabb;
use crate::error::SliceError;

/// A cutting plane in world space.
///
/// The positive side of the plane (`side(p) > 0`) is the "upper" half-space.
/// Planes built from three points use `normal = normalize((p2-p1) x (p3-p1))`,
/// which is the only sign convention the slicer relies on.
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Plane{
    point: Point3<f32>,
    normal: Vector3<f32>,
    d: f32,
}

impl Plane {
    /// Plane through `point` with the given normal. The normal is normalized.
    pub fn new(point:Point3<f32>, normal:Vector3<f32>) -> Result<Self,SliceError> {
        let normal = normal.try_normalize(f32::EPSILON)
            .ok_or(SliceError::DegeneratePlane)?;
        Ok(Self{
            point,
            normal,
            d: normal.dot(&point.coords),
        })
    }
    /// Plane through three points, fails if the points are collinear.
    pub fn from_points(p1:Point3<f32>, p2:Point3<f32>, p3:Point3<f32>) -> Result<Self,SliceError> {
        let normal = cross(&(p2-p1), &(p3-p1));
        Self::new(p1, normal)
    }
    pub fn point(&self) -> Point3<f32> { self.point }
    pub fn normal(&self) -> Vector3<f32> { self.normal }
    pub fn d(&self) -> f32 { self.d }

    /// Signed side test: zero on the plane, positive above, negative below.
    /// Proportional to the distance, callers should not treat it as metric.
    pub fn side(&self, point:&Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.d
    }

    /// Intersection of the ray `origin + t*direction` with the plane.
    /// Returns `None` if the ray is parallel to the plane.
    pub fn intersect(&self, origin:&Point3<f32>, direction:&Vector3<f32>) -> Option<Point3<f32>> {
        let denominator = self.normal.dot(direction);
        if denominator == 0.0 { return None }
        let t = -self.side(origin) / denominator;
        Some(origin + direction * t)
    }

    /// True if the box has corners strictly on both sides of the plane.
    pub fn hit_test(&self, aabb:&Aabb) -> bool {
        let mut above = false;
        let mut below = false;
        for corner in aabb.corners().iter() {
            let side = self.side(corner);
            above |= side > 0.0;
            below |= side < 0.0;
            if above && below { return true }
        }
        false
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn three_point_normal_follows_right_hand_rule(){
        let plane = Plane::from_points(
            Point3::new(0.,0.,0.5),
            Point3::new(1.,0.,0.5),
            Point3::new(0.,1.,0.5),
        ).unwrap();
        assert_eq!(plane.normal(),Vector3::new(0.,0.,1.));
        assert_eq!(plane.d(),0.5);
        assert!(plane.side(&Point3::new(3.,-2.,1.)) > 0.);
        assert!(plane.side(&Point3::new(3.,-2.,0.)) < 0.);
        assert_eq!(plane.side(&Point3::new(7.,7.,0.5)),0.);
    }
    #[test]
    fn swapping_points_flips_normal(){
        let a = Point3::new(0.,0.,0.);
        let b = Point3::new(1.,0.,0.);
        let c = Point3::new(0.,1.,0.);
        let p1 = Plane::from_points(a, b, c).unwrap();
        let p2 = Plane::from_points(a, c, b).unwrap();
        assert_eq!(p1.normal(),-p2.normal());
    }
    #[test]
    fn collinear_points_are_rejected(){
        let result = Plane::from_points(
            Point3::new(0.,0.,0.),
            Point3::new(1.,1.,1.),
            Point3::new(2.,2.,2.),
        );
        assert!(matches!(result,Err(SliceError::DegeneratePlane)));
        assert!(Plane::new(Point3::origin(),Vector3::zeros()).is_err());
    }
    #[test]
    fn normal_is_normalized(){
        let plane = Plane::new(Point3::new(0.,2.,0.),Vector3::new(0.,4.,0.)).unwrap();
        assert!((plane.normal().norm() - 1.0).abs() < 1e-6);
        assert_eq!(plane.side(&Point3::new(5.,3.,5.)),1.0);
    }
    #[test]
    fn ray_plane_intersection(){
        let plane = Plane::new(Point3::new(0.,0.,0.5),Vector3::z()).unwrap();
        let origin = Point3::new(0.,0.,0.);
        let direction = Vector3::new(1.,1.,1.);
        assert_eq!(plane.intersect(&origin,&direction),Some(Point3::new(0.5,0.5,0.5)));
        // direction pointing away still lands on the plane (t < 0)
        assert_eq!(plane.intersect(&origin,&-direction),Some(Point3::new(0.5,0.5,0.5)));
        assert_eq!(plane.intersect(&origin,&Vector3::x()),None);
    }
    #[test]
    fn hit_test_against_box(){
        let aabb = Aabb::from_points([Point3::new(0.,0.,0.),Point3::new(1.,1.,1.)].iter()).unwrap();
        let inside = Plane::new(Point3::new(0.,0.,0.5),Vector3::z()).unwrap();
        let outside = Plane::new(Point3::new(0.,0.,2.),Vector3::z()).unwrap();
        let touching = Plane::new(Point3::new(0.,0.,1.),Vector3::z()).unwrap();
        assert!(inside.hit_test(&aabb));
        assert!(!outside.hit_test(&aabb));
        assert!(!touching.hit_test(&aabb));
    }
}
