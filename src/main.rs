use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info, Level};
use nalgebra::{Affine3, Matrix4, Point3, Vector3};
use serde::Deserialize;
use thiserror::Error;

use mesh_bisect::stl_op;
use mesh_bisect::{cut, CutOutcome, Plane, SliceError, SliceSettings, SliceTarget};

/// A cut described in a json file.
#[derive(Debug,Deserialize)]
struct CutJob{
    /// STL file to cut
    input: PathBuf,
    /// Directory receiving upper.stl and lower.stl
    output_dir: PathBuf,
    /// Three world-space points on the cutting plane
    plane: [[f32;3];3],
    /// Cap the cross-section, only valid for convex meshes
    #[serde(default)]
    convex: bool,
    /// [x,y,z] Placement of the model in the world
    #[serde(default)]
    translate: [f32;3],
    /// Uniform scale of the model
    #[serde(default = "unit_scale")]
    scale: f32,
    /// Write the halves in world space instead of model space
    #[serde(default)]
    world_space_output: bool,
    #[serde(default)]
    settings: SliceSettings,
}

fn unit_scale() -> f32 { 1.0 }

#[derive(Debug,Error)]
enum CliError {
    #[error("usage: mesh-bisect <job.json>")]
    Usage,
    #[error("could not read job file: {0}")]
    Job(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Slice(#[from] SliceError),
}

fn main() -> ExitCode {
    init_logger();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        },
    }
}

fn run() -> Result<(),CliError> {
    let job_path = std::env::args().nth(1).ok_or(CliError::Usage)?;
    let job:CutJob = serde_json::from_str(&fs::read_to_string(job_path)?)?;
    run_job(&job)
}

fn run_job(job:&CutJob) -> Result<(),CliError> {
    let [p1,p2,p3] = job.plane.map(Point3::from);
    let plane = Plane::from_points(p1, p2, p3)?;
    let transform = Affine3::from_matrix_unchecked(
        Matrix4::new_translation(&Vector3::from(job.translate)) * Matrix4::new_scaling(job.scale)
    );
    let target = SliceTarget{
        name: job.input.display().to_string(),
        mesh: stl_op::read_source_mesh(&job.input)?,
        transform,
        convex: job.convex,
    };
    info!("loaded {} triangles from {}",target.mesh.triangle_count(),target.name);

    let report = cut(std::slice::from_ref(&target), &plane, &job.settings);
    let output_transform = job.world_space_output.then_some(&transform);
    for (name,outcome) in report.outcomes.iter() {
        match outcome {
            CutOutcome::Miss => info!("plane does not intersect {name}"),
            CutOutcome::Skipped(error) if error.is_no_op() => info!("{name} was not sliced: {error}"),
            CutOutcome::Skipped(error) => return Err(error.clone().into()),
            CutOutcome::Sliced(bisection) => {
                fs::create_dir_all(&job.output_dir)?;
                let halves = [("upper",&bisection.upper),("lower",&bisection.lower)];
                for (side,mesh) in halves {
                    let Some(mesh) = mesh else { continue };
                    let path = job.output_dir.join(format!("{side}.stl"));
                    stl_op::write_sliced_mesh(&path, mesh, output_transform)?;
                    info!("{side}: {} triangles, volume {:.4} -> {}",
                        mesh.triangle_count(), mesh.signed_volume(), path.display());
                }
                if let Some(error) = &bisection.cap_error {
                    info!("cross-section left open: {error}");
                }
            },
        }
    }
    Ok(())
}

fn init_logger(){
    env_logger::builder()
        .format(|buf, record|{
            match record.level() {
                Level::Error => write!(buf,"\x1b[031mError\x1b[0m")?,
                Level::Warn  => write!(buf,"\x1b[033mWarn \x1b[0m")?,
                Level::Info  => write!(buf,"\x1b[032mInfo \x1b[0m")?,
                Level::Debug => write!(buf,"\x1b[034mDebug\x1b[0m")?,
                Level::Trace => write!(buf,"\x1b[035mTrace\x1b[0m")?,
            };
            writeln!(buf,": {}",record.args())
        })
        .init();
}
