//! Temperature scan over one lattice spin model with error bars.
//!
//! One temperature point per parallel task: each owns its model and its
//! random stream, so the only shared state is the result collection.
//
//  Compile & run:  `cargo run --release --bin temperature_scan -- --variant ising --dim 2 --length 64`

use clap::{Parser, ValueEnum};
use csv::WriterBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Mutex;

use spinscan::grid;
use spinscan::lattice::Lattice;
use spinscan::mcmc::UpdateRule;
use spinscan::model::{Couplings, LatticeModel};
use spinscan::rng;
use spinscan::run::{run, RunConfig};
use spinscan::spin::{Ising, Potts, SpinVariant, Xy};
use spinscan::stats::ObservableSet;

// -----------------------------------------------------------------------------
// CLI
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    Ising,
    Potts,
    Xy,
}

impl Variant {
    fn name(self) -> &'static str {
        match self {
            Variant::Ising => "ising",
            Variant::Potts => "potts",
            Variant::Xy => "xy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Rule {
    Metropolis,
    Heatbath,
}

impl Rule {
    fn name(self) -> &'static str {
        match self {
            Rule::Metropolis => "metropolis",
            Rule::Heatbath => "heatbath",
        }
    }

    fn update_rule(self) -> UpdateRule {
        match self {
            Rule::Metropolis => UpdateRule::Metropolis,
            Rule::Heatbath => UpdateRule::Heatbath,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GridKind {
    Linear,
    Geometric,
}

#[derive(Parser, Debug)]
struct Cli {
    /// Spin model family
    #[arg(long, value_enum, default_value = "ising")]
    variant: Variant,

    /// Lattice dimensionality (1 or 2)
    #[arg(long, default_value = "2")]
    dim: usize,

    /// Lattice extent per dimension
    #[arg(long, default_value = "64")]
    length: usize,

    /// Number of Potts states (ignored for the other variants)
    #[arg(long, default_value = "4")]
    q: u8,

    /// Acceptance rule
    #[arg(long, value_enum, default_value = "metropolis")]
    rule: Rule,

    /// Temperature grid (min,max,points)
    #[arg(long, default_value = "0.2,10.0,32", value_delimiter = ',')]
    kt_range: Vec<f64>,

    /// Grid spacing
    #[arg(long, value_enum, default_value = "geometric")]
    grid: GridKind,

    /// Production sweeps per temperature
    #[arg(long, default_value = "100000")]
    sweeps: usize,

    /// Discarded equilibration sweeps per temperature
    #[arg(long, default_value = "10000")]
    skip: usize,

    /// Sweeps per statistics block
    #[arg(long, default_value = "1000")]
    block_len: usize,

    /// Master seed; every temperature point derives its own stream from it
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Output CSV path (defaults to a parameter-bearing name)
    #[arg(long)]
    output: Option<PathBuf>,
}

// -----------------------------------------------------------------------------
// CSV row
// -----------------------------------------------------------------------------
#[derive(Debug)]
struct Row {
    kt: f64,
    energy_per_site: f64,
    specific_heat: f64,
    acceptance_rate: f64,
    energy_variance_per_site: f64,
    energy_std_err: f64,
    acceptance_std_err: f64,
    status: String,
}

impl Row {
    fn done(kt: f64, obs: ObservableSet, sites: usize) -> Self {
        Self {
            kt,
            energy_per_site: obs.mean_energy / sites as f64,
            specific_heat: obs.specific_heat,
            acceptance_rate: obs.acceptance_rate,
            energy_variance_per_site: obs.energy_variance_per_site,
            energy_std_err: obs.energy_std_err,
            acceptance_std_err: obs.acceptance_std_err,
            status: "ok".to_string(),
        }
    }

    fn failed(kt: f64, reason: String) -> Self {
        Self {
            kt,
            energy_per_site: f64::NAN,
            specific_heat: f64::NAN,
            acceptance_rate: f64::NAN,
            energy_variance_per_site: f64::NAN,
            energy_std_err: f64::NAN,
            acceptance_std_err: f64::NAN,
            status: reason,
        }
    }
}

// -----------------------------------------------------------------------------
// Per-point simulation
// -----------------------------------------------------------------------------
fn sample_point<V: SpinVariant>(
    variant: V,
    args: &Cli,
    kt: f64,
    index: u64,
) -> Result<ObservableSet, Box<dyn Error>> {
    let lattice = match args.dim {
        1 => Lattice::chain(args.length)?,
        2 => Lattice::square(args.length)?,
        d => return Err(format!("unsupported dimensionality {d}").into()),
    };

    let mut model = LatticeModel::new(
        lattice,
        variant,
        Couplings::default(),
        args.seed.wrapping_add(index),
    );
    model.set_temperature(kt)?;

    let config = RunConfig {
        sweeps: args.sweeps,
        skip: args.skip,
        block_len: args.block_len,
    };
    let mut stream = rng::stream(args.seed, index);
    Ok(run(&mut model, args.rule.update_rule(), &config, &mut stream)?)
}

fn run_point(args: &Cli, kt: f64, index: u64) -> Result<ObservableSet, Box<dyn Error>> {
    match args.variant {
        Variant::Ising => sample_point(Ising, args, kt, index),
        Variant::Potts => sample_point(Potts::new(args.q)?, args, kt, index),
        Variant::Xy => sample_point(Xy, args, kt, index),
    }
}

// -----------------------------------------------------------------------------
// Main
// -----------------------------------------------------------------------------
fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    println!("Running scan with configuration:\n{args:#?}");

    if args.kt_range.len() != 3 {
        return Err("--kt-range expects min,max,points".into());
    }
    let (kt_min, kt_max) = (args.kt_range[0], args.kt_range[1]);
    let points = args.kt_range[2] as usize;
    let kts = match args.grid {
        GridKind::Linear => grid::linear(kt_min, kt_max, points),
        GridKind::Geometric => grid::geometric(kt_min, kt_max, points),
    };

    let sites = args.length.pow(args.dim as u32);
    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "{}_{}{}d_L{}.csv",
            args.rule.name(),
            args.variant.name(),
            args.dim,
            args.length
        ))
    });

    let bar = ProgressBar::new(kts.len() as u64);
    bar.set_style(
        ProgressStyle::with_template(" {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]")
            .unwrap(),
    );

    let rows = Mutex::new(Vec::new());

    kts.par_iter().enumerate().for_each(|(i, &kt)| {
        let row = match run_point(&args, kt, i as u64) {
            Ok(obs) => Row::done(kt, obs, sites),
            Err(e) => {
                eprintln!("kT = {kt}: {e}");
                Row::failed(kt, e.to_string())
            }
        };
        rows.lock().unwrap().push(row);
        bar.inc(1);
    });
    bar.finish();

    // Sort for deterministic CSV order.
    let mut rows = rows.into_inner().unwrap();
    rows.sort_by(|a, b| a.kt.partial_cmp(&b.kt).unwrap());

    let mut wtr = WriterBuilder::new().from_path(&output)?;
    wtr.write_record([
        "kT",
        "energy_per_site",
        "specific_heat",
        "acceptance_rate",
        "energy_variance_per_site",
        "energy_std_err",
        "acceptance_std_err",
        "sweeps",
        "skip",
        "status",
    ])?;
    for r in &rows {
        wtr.write_record([
            r.kt.to_string(),
            r.energy_per_site.to_string(),
            r.specific_heat.to_string(),
            r.acceptance_rate.to_string(),
            r.energy_variance_per_site.to_string(),
            r.energy_std_err.to_string(),
            r.acceptance_std_err.to_string(),
            args.sweeps.to_string(),
            args.skip.to_string(),
            r.status.clone(),
        ])?;
    }
    wtr.flush()?;

    let failed = rows.iter().filter(|r| r.status != "ok").count();
    println!(
        "Scan complete: {} points ({} failed) -> {}",
        rows.len(),
        failed,
        output.display()
    );

    Ok(())
}
