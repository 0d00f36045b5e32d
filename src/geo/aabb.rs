use nalgebra::{Affine3, Point3};

/// Axis Aligned Bounding Box
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Aabb{
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}
impl Aabb {
    /// Returns `None` for an empty point set.
    pub fn from_points<'a,I>(points:I) -> Option<Self>
    where I: IntoIterator<Item = &'a Point3<f32>>
    {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Self{min:first,max:first},|aabb,p|{
            Self{
                min: aabb.min.inf(p),
                max: aabb.max.sup(p),
            }
        }))
    }
    pub fn corners(&self) -> [Point3<f32>;8] {
        let (min,max) = (self.min,self.max);
        [
            min,
            max,
            Point3::new(min.x, min.y, max.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(min.x, max.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(max.x, max.y, min.z),
        ]
    }
    /// Bounding box of this box after it has been moved by `transform`.
    pub fn transformed(&self, transform:&Affine3<f32>) -> Self {
        let corners = self.corners().map(|corner| transform.transform_point(&corner));
        // 8 corners are never empty
        Self::from_points(corners.iter()).unwrap_or(*self)
    }
}

#[test]
fn aabb_from_points_test(){
    let aabb = Aabb::from_points([
        Point3::new( 1.0, 2.0,-1.0),
        Point3::new(-1.0, 0.5, 3.0),
        Point3::new( 0.0, 4.0, 0.0),
    ].iter()).unwrap();
    assert_eq!(aabb.min,Point3::new(-1.0,0.5,-1.0));
    assert_eq!(aabb.max,Point3::new( 1.0,4.0, 3.0));
    assert_eq!(Aabb::from_points(Vec::<Point3<f32>>::new().iter()),None);
}
#[test]
fn aabb_transformed_test(){
    use nalgebra::{Matrix4, Vector3};
    let aabb = Aabb::from_points([Point3::new(0.,0.,0.),Point3::new(1.,1.,1.)].iter()).unwrap();
    let transform = Affine3::from_matrix_unchecked(Matrix4::new_translation(&Vector3::new(2.,0.,-1.)));
    let moved = aabb.transformed(&transform);
    assert_eq!(moved.min,Point3::new(2.,0.,-1.));
    assert_eq!(moved.max,Point3::new(3.,1., 0.));
}
