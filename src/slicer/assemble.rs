use log::{debug, trace, warn};
use nalgebra::Point3;

use crate::error::CapError;
use crate::geo::BoundarySegment;

/// Closed chain of boundary segments, `loop[i].local_p2 == loop[i+1].local_p1`
/// (within the weld tolerance), wrapping around at the end.
pub type BoundaryLoop = Vec<BoundarySegment>;

fn coincident(p1:&Point3<f32>, p2:&Point3<f32>, tolerance:f32) -> bool {
    nalgebra::distance(p1, p2) <= tolerance
}

/// Links the unordered boundary segments of one slice into closed loops.
///
/// Segments are consumed in the order they were produced: the first unused
/// segment seeds a loop, which is extended by any segment sharing an endpoint
/// with its tail (flipped if needed) until it closes onto its head. Disjoint
/// cross-sections therefore come out as separate loops. Chains closing with
/// fewer than 3 segments are skipped; they only fail the assembly when no
/// other loop is left to cap.
pub fn assemble_loops(segments:Vec<BoundarySegment>, tolerance:f32) -> Result<Vec<BoundaryLoop>,CapError> {
    let mut pool:Vec<BoundarySegment> = segments.into_iter()
        .filter(|segment| segment.local_length() > tolerance)
        .collect();
    let mut loops:Vec<BoundaryLoop> = Vec::new();
    let mut linked = 0;
    let mut short = None;

    while !pool.is_empty() {
        let mut ordered = vec![pool.remove(0)];
        loop {
            let head = ordered[0].local_p1;
            let tail = ordered[ordered.len()-1].local_p2;
            if ordered.len() > 1 && coincident(&tail, &head, tolerance) { break }

            let next = pool.iter().enumerate().find_map(|(i,segment)|{
                if coincident(&segment.local_p1, &tail, tolerance) { Some((i,false)) }
                else if coincident(&segment.local_p2, &tail, tolerance) { Some((i,true)) }
                else { None }
            });
            match next {
                Some((i,reversed)) => {
                    let segment = pool.remove(i);
                    ordered.push(if reversed { segment.flipped() } else { segment });
                },
                None => return Err(CapError::UnlinkableLoop{
                    linked: linked + ordered.len(),
                    remaining: pool.len(),
                }),
            }
        }
        if ordered.len() < 3 {
            warn!("skipping boundary loop of {} segments",ordered.len());
            short = Some(ordered.len());
            continue
        }
        trace!("closed boundary loop of {} segments",ordered.len());
        linked += ordered.len();
        loops.push(ordered);
    }
    debug!("assembled {} boundary loop(s) from {linked} segments",loops.len());
    match short {
        Some(len) if loops.is_empty() => Err(CapError::TooFewSegments(len)),
        _ => Ok(loops),
    }
}
