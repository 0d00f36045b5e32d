use log::{info, warn};
use nalgebra::Affine3;

use super::{slice, Bisection};
use crate::error::SliceError;
use crate::geo::Plane;
use crate::mesh::SourceMesh;
use crate::settings::SliceSettings;

/// A mesh placed in the world, candidate for a cut.
#[derive(Debug,Clone)]
pub struct SliceTarget{
    pub name: String,
    pub mesh: SourceMesh,
    /// model space -> world space
    pub transform: Affine3<f32>,
    /// Convex meshes get their cross-section capped.
    pub convex: bool,
}

#[derive(Debug,Clone,PartialEq)]
pub enum CutOutcome {
    /// The plane does not pass through the target's bounds.
    Miss,
    Sliced(Bisection),
    /// The target was left as it is.
    Skipped(SliceError),
}

#[derive(Debug,Default)]
pub struct CutReport{
    /// One outcome per target, in target order.
    pub outcomes: Vec<(String,CutOutcome)>,
}
impl CutReport {
    /// True when no target was sliced.
    pub fn is_miss(&self) -> bool {
        !self.outcomes.iter().any(|(_,outcome)| matches!(outcome,CutOutcome::Sliced(_)))
    }
    pub fn sliced(&self) -> impl Iterator<Item = (&str,&Bisection)> {
        self.outcomes.iter().filter_map(|(name,outcome)| match outcome {
            CutOutcome::Sliced(bisection) => Some((name.as_str(),bisection)),
            _ => None,
        })
    }
}

/// Cuts every target whose world-space bounds straddle the plane.
///
/// Targets are independent: a target that cannot be sliced is reported as
/// skipped and does not affect the others.
pub fn cut(targets:&[SliceTarget], plane:&Plane, settings:&SliceSettings) -> CutReport {
    let outcomes = targets.iter()
        .map(|target| (target.name.clone(), cut_target(target, plane, settings)))
        .collect();
    let report = CutReport{ outcomes };
    if report.is_miss() { info!("cut missed all {} targets",targets.len()) }
    report
}

fn cut_target(target:&SliceTarget, plane:&Plane, settings:&SliceSettings) -> CutOutcome {
    let bounds = match target.mesh.bounds() {
        Some(bounds) => bounds.transformed(&target.transform),
        None => return CutOutcome::Skipped(SliceError::EmptyMesh),
    };
    if !plane.hit_test(&bounds) { return CutOutcome::Miss }

    match slice(&target.mesh, &target.transform, plane, target.convex, settings) {
        Ok(bisection) => {
            info!("sliced '{}' into {} + {} triangles",
                target.name,
                bisection.upper.as_ref().map_or(0,|mesh| mesh.triangle_count()),
                bisection.lower.as_ref().map_or(0,|mesh| mesh.triangle_count()));
            CutOutcome::Sliced(bisection)
        },
        Err(error) if error.is_no_op() => {
            info!("'{}' left unsliced: {error}",target.name);
            CutOutcome::Skipped(error)
        },
        Err(error) => {
            warn!("'{}' could not be sliced: {error}",target.name);
            CutOutcome::Skipped(error)
        },
    }
}
