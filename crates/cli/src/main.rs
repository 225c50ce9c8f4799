mod provenance;
mod report;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use report::{summarize_lock, summarize_sphere, CircleSpec};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;
use twisty::api::{draw_circles, CircleCfg, LockId, LockSide, SphCircle, Sphere, Tolerance};

#[derive(Parser)]
#[command(name = "twisty")]
#[command(about = "Cut, lock, and twist a spherical puzzle")]
struct Cmd {
    /// Seed for random cutting circles
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Comparison tolerance in quadrants
    #[arg(long, default_value_t = 1e-5)]
    eps: f64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Args, Clone, Debug)]
struct CutArgs {
    /// Cutting circle as `x,y,z,radius` (radius in quadrants); repeatable
    #[arg(long = "circle")]
    circles: Vec<CircleSpec>,
    /// Random circles cut after the listed ones
    #[arg(long, default_value_t = 0)]
    cuts: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum SideArg {
    Left,
    Right,
}

impl From<SideArg> for LockSide {
    fn from(s: SideArg) -> Self {
        match s {
            SideArg::Left => LockSide::Left,
            SideArg::Right => LockSide::Right,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Cut the whole sphere and summarize the elements
    Slice {
        #[command(flatten)]
        cut: CutArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Cut, then build the lock along one circle
    Lock {
        #[command(flatten)]
        cut: CutArgs,
        /// Lock circle as `x,y,z,radius`
        #[arg(long)]
        on: CircleSpec,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Cut, lock, and turn one side of the lock
    Twist {
        #[command(flatten)]
        cut: CutArgs,
        #[arg(long)]
        on: CircleSpec,
        /// Twist amount in quadrants
        #[arg(long, allow_hyphen_values = true)]
        angle: f64,
        #[arg(long, value_enum, default_value_t = SideArg::Left)]
        side: SideArg,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    let cmd = Cmd::parse();
    let tol = Tolerance::new(cmd.eps);
    match cmd.action {
        Action::Slice { cut, out } => slice(tol, cmd.seed, &cut, out.as_deref()),
        Action::Lock { cut, on, out } => lock(tol, cmd.seed, &cut, on, out.as_deref()),
        Action::Twist {
            cut,
            on,
            angle,
            side,
            out,
        } => twist(tol, cmd.seed, &cut, on, angle, side, out.as_deref()),
        Action::Report => report(),
    }
}

/// Listed circles first, then `cuts` random ones under `seed`.
fn cutting_circles(seed: u64, cut: &CutArgs) -> Vec<SphCircle> {
    let mut circles: Vec<SphCircle> = cut.circles.iter().map(|c| c.to_circle()).collect();
    circles.extend(draw_circles(CircleCfg::default(), seed, cut.cuts));
    circles
}

/// Whole sphere cut by every circle in turn; each circle cuts all current elements.
fn cut_sphere(tol: Tolerance, circles: &[SphCircle]) -> Result<Sphere> {
    let mut s = Sphere::new(tol);
    s.whole_sphere();
    for (i, c) in circles.iter().enumerate() {
        for e in s.element_ids() {
            s.slice(e, c)
                .with_context(|| format!("cutting element {} by circle {i}", e.0))?;
        }
        tracing::debug!(circle = i, elements = s.element_ids().len(), "cut");
    }
    s.validate().context("kernel state after cutting")?;
    Ok(s)
}

/// First lock found along `on`, building it when needed.
fn lock_on(s: &mut Sphere, on: CircleSpec) -> Result<LockId> {
    let tol = s.tolerance();
    let circle = on.to_circle();
    for a in s.arc_ids() {
        let arc = s.arc(a)?;
        let aligned = arc.circle().same_as(&circle, tol)
            || arc.circle().same_as(&circle.complement(), tol);
        if !aligned {
            continue;
        }
        if let Some(l) = s.lock_at(a)? {
            return Ok(l);
        }
    }
    bail!("no lock along circle {:?}", on.center)
}

fn slice(tol: Tolerance, seed: u64, cut: &CutArgs, out: Option<&Path>) -> Result<()> {
    let circles = cutting_circles(seed, cut);
    let s = cut_sphere(tol, &circles)?;
    let summary = summarize_sphere(&s)?;
    tracing::info!(
        circles = circles.len(),
        elements = summary.elements.len(),
        "slice"
    );
    let params = json!({ "seed": seed, "cuts": cut.cuts, "circles": cut.circles });
    emit("slice", &summary, params, out)
}

fn lock(
    tol: Tolerance,
    seed: u64,
    cut: &CutArgs,
    on: CircleSpec,
    out: Option<&Path>,
) -> Result<()> {
    let mut s = cut_sphere(tol, &cutting_circles(seed, cut))?;
    let l = lock_on(&mut s, on)?;
    let summary = summarize_lock(&s, l)?;
    tracing::info!(lock = l.0, passwords = summary.passwords.len(), "lock");
    let params = json!({ "seed": seed, "cuts": cut.cuts, "circles": cut.circles, "on": on });
    emit("lock", &summary, params, out)
}

fn twist(
    tol: Tolerance,
    seed: u64,
    cut: &CutArgs,
    on: CircleSpec,
    angle: f64,
    side: SideArg,
    out: Option<&Path>,
) -> Result<()> {
    let mut s = cut_sphere(tol, &cutting_circles(seed, cut))?;
    let l = lock_on(&mut s, on)?;
    s.twist(l, angle, side.into())?;
    s.validate().context("kernel state after twisting")?;
    let doc = json!({
        "lock": summarize_lock(&s, l)?,
        "sphere": summarize_sphere(&s)?,
    });
    tracing::info!(lock = l.0, angle, side = ?side, "twist");
    let params = json!({
        "seed": seed,
        "cuts": cut.cuts,
        "circles": cut.circles,
        "on": on,
        "angle": angle,
        "side": side,
    });
    emit("twist", &doc, params, out)
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "kernel_version": twisty::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

/// Print `doc` as JSON, or write it to `out` with a provenance sidecar.
fn emit<T: Serialize>(
    command: &'static str,
    doc: &T,
    params: serde_json::Value,
    out: Option<&Path>,
) -> Result<()> {
    let Some(out) = out else {
        println!("{}", serde_json::to_string_pretty(doc)?);
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let sidecar = provenance::write_sidecar(out, provenance::Payload::new(command, params))?;
    tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn quarters() -> CutArgs {
        CutArgs {
            circles: vec!["0,0,1,1".parse().unwrap(), "1,0,0,1".parse().unwrap()],
            cuts: 0,
        }
    }

    #[test]
    fn listed_circles_come_before_random_ones() {
        let mut cut = quarters();
        cut.cuts = 2;
        let circles = cutting_circles(5, &cut);
        assert_eq!(circles.len(), 4);
        assert_eq!(circles[2], draw_circles(CircleCfg::default(), 5, 1)[0]);
    }

    #[test]
    fn quarters_lock_on_equator() {
        let mut s = cut_sphere(Tolerance::default(), &cutting_circles(0, &quarters())).unwrap();
        assert_eq!(s.element_ids().len(), 4);
        let l = lock_on(&mut s, "0,0,1,1".parse().unwrap()).unwrap();
        assert_eq!(s.lock(l).unwrap().passwords().len(), 2);
        let south = lock_on(&mut s, "0,0,-1,1".parse().unwrap()).unwrap();
        assert_eq!(south, l);
        assert!(lock_on(&mut s, "0,1,0,1".parse().unwrap()).is_err());
    }

    #[test]
    fn twist_writes_report_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("runs").join("twist.json");
        let on: CircleSpec = "0,0,1,1".parse().unwrap();
        twist(
            Tolerance::default(),
            0,
            &quarters(),
            on,
            1.0,
            SideArg::Left,
            Some(&out),
        )
        .unwrap();
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["sphere"]["elements"].as_array().unwrap().len(), 4);
        assert_eq!(doc["lock"]["offset"], 3.0);
        let sidecar = dir.path().join("runs").join("twist.provenance.json");
        let prov: serde_json::Value =
            serde_json::from_slice(&std::fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(prov["command"], "twist");
        assert_eq!(prov["params"]["side"], "left");
    }
}
