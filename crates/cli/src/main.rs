use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use latpoly::prelude::*;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;

use input::{AnyPolytope, PolytopeDesc};

#[derive(Parser)]
#[command(name = "latpoly")]
#[command(about = "Count and enumerate lattice points of bounded lattice polytopes")]
struct Cmd {
    /// Optional run tag; recorded in provenance sidecars
    #[arg(long, global = true)]
    tag: Option<String>,

    /// Build 4D simplices without edge constraints (Minkowski sums may overshoot)
    #[arg(long, global = true)]
    allow_inexact: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the number of lattice points of a polytope description
    Count {
        #[arg(long)]
        input: PathBuf,
        /// Stop counting after this many points
        #[arg(long)]
        max: Option<u64>,
        /// Lower corner of a counting window, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "high")]
        low: Option<Vec<i64>>,
        /// Upper corner of a counting window, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "low")]
        high: Option<Vec<i64>>,
    },
    /// Write all lattice points as JSON plus a provenance sidecar
    Points {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Counts of random simplices under dilation, as JSON
    Report {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 4)]
        samples: u64,
        #[arg(long, default_value_t = 4)]
        max_dilation: i64,
        /// Also write the report here (with a provenance sidecar)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Count {
            input,
            max,
            low,
            high,
        } => {
            let n = count(&input, cmd.allow_inexact, max, low.zip(high))?;
            println!("{n}");
            Ok(())
        }
        Action::Points { input, out } => {
            points(&input, &out, cmd.allow_inexact, cmd.tag)?;
            Ok(())
        }
        Action::Report {
            seed,
            samples,
            max_dilation,
            out,
        } => {
            let doc = report(seed, samples, max_dilation)?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
            if let Some(out) = out {
                write_json(&out, &doc)?;
                let params = json!({"command": "report", "seed": seed, "samples": samples,
                    "max_dilation": max_dilation, "tag": cmd.tag});
                provenance::write_sidecar(&out, provenance::Payload::new(params))?;
            }
            Ok(())
        }
    }
}

fn load(input: &Path, allow_inexact: bool) -> Result<AnyPolytope> {
    let desc = PolytopeDesc::from_path(input)?;
    let poly = AnyPolytope::build(&desc, allow_inexact)
        .with_context(|| format!("building polytope from {}", input.display()))?;
    tracing::info!(
        input = %input.display(),
        dimension = poly.dimension(),
        rows = poly.row_count(),
        edge_constraints_complete = poly.edge_constraints_complete(),
        "loaded"
    );
    Ok(poly)
}

fn count(
    input: &Path,
    allow_inexact: bool,
    max: Option<u64>,
    window: Option<(Vec<i64>, Vec<i64>)>,
) -> Result<u64> {
    let poly = load(input, allow_inexact)?;
    let n = match (window, max) {
        (Some((low, high)), max) => {
            let n = poly.count_in(&low, &high)?;
            max.map_or(n, |m| n.min(m))
        }
        (None, Some(m)) => poly.count_up_to(m),
        (None, None) => poly.count(),
    };
    tracing::info!(count = n, "count");
    Ok(n)
}

fn points(input: &Path, out: &Path, allow_inexact: bool, tag: Option<String>) -> Result<PathBuf> {
    let poly = load(input, allow_inexact)?;
    let pts = poly.points();
    let doc = json!({
        "dimension": poly.dimension(),
        "count": pts.len(),
        "points": &pts,
    });
    write_json(out, &doc)?;
    let params = json!({
        "command": "points",
        "input": input.to_string_lossy(),
        "allow_inexact": allow_inexact,
        "tag": tag,
    });
    let prov =
        provenance::write_sidecar(out, provenance::Payload::new(params).with_input(input))?;
    tracing::info!(out = %out.display(), count = pts.len(), "points written");
    Ok(prov)
}

fn report(seed: u64, samples: u64, max_dilation: i64) -> Result<serde_json::Value> {
    anyhow::ensure!(max_dilation >= 1, "--max-dilation must be at least 1");
    let cfg = SamplerCfg::default();
    let mut rows = Vec::new();
    for index in 0..samples {
        let tok = ReplayToken::new(seed, index);
        rows.push(report_row::<2>(cfg, tok, max_dilation)?);
        rows.push(report_row::<3>(cfg, tok, max_dilation)?);
    }
    Ok(json!({
        "code_rev": provenance::current_git_rev(),
        "version": latpoly::VERSION,
        "params": {"seed": seed, "samples": samples, "max_dilation": max_dilation},
        "samples": rows,
    }))
}

fn report_row<const N: usize>(
    cfg: SamplerCfg,
    tok: ReplayToken,
    max_dilation: i64,
) -> Result<serde_json::Value> {
    let pts = draw_simplex::<i64, N>(cfg, tok)
        .with_context(|| format!("no {}D simplex for token {:?}", N, tok))?;
    let poly = BoundedLatticePolytope::from_simplex(&pts)?;
    let counts = (1..=max_dilation)
        .map(|t| -> Result<u64> { Ok(poly.dilated(t)?.count()) })
        .collect::<Result<Vec<u64>>>()?;
    let vertices: Vec<Vec<i64>> = pts.iter().map(|p| p.iter().copied().collect()).collect();
    Ok(json!({
        "dimension": N,
        "index": tok.index,
        "vertices": vertices,
        "counts": counts,
    }))
}

fn write_json(out: &Path, doc: &serde_json::Value) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(doc)?)
        .with_context(|| format!("writing {}", out.display()))
}
