//! Generate a seeded terrain, route across it and save the result as a PNG.
//!
//! Run: cargo run --bin terrapath -- --help

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use terrapath_demos::DemoConfig;
use terrapath_geom::Point;
use terrapath_terrain::{CostModel, Neighborhood};

#[derive(Parser)]
#[command(name = "terrapath")]
#[command(about = "Find the cheapest route across generated terrain")]
struct Args {
    /// JSON config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,

    /// Terrain seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cells below this elevation are flooded and impassable
    #[arg(short, long)]
    water: Option<f64>,

    #[arg(short, long, value_enum)]
    neighborhood: Option<NeighborhoodArg>,

    /// Price height change per unit instead of by slope
    #[arg(long, conflicts_with = "slope_penalty")]
    climb_weight: Option<f64>,

    #[arg(long)]
    slope_penalty: Option<f64>,

    /// Start cell as X,Y
    #[arg(long, value_parser = parse_point)]
    from: Option<Point>,

    /// Goal cell as X,Y
    #[arg(long, value_parser = parse_point)]
    to: Option<Point>,

    /// Pixels per cell
    #[arg(long)]
    scale: Option<u32>,

    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum NeighborhoodArg {
    Moore,
    Jump2,
    Jump3,
}

impl From<NeighborhoodArg> for Neighborhood {
    fn from(arg: NeighborhoodArg) -> Self {
        match arg {
            NeighborhoodArg::Moore => Neighborhood::Moore,
            NeighborhoodArg::Jump2 => Neighborhood::Jump2,
            NeighborhoodArg::Jump3 => Neighborhood::Jump3,
        }
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

impl Args {
    fn into_config(self) -> anyhow::Result<DemoConfig> {
        let mut c = match &self.config {
            Some(path) => DemoConfig::load(path)?,
            None => DemoConfig::default(),
        };
        if let Some(w) = self.width {
            c.width = w;
        }
        if let Some(h) = self.height {
            c.height = h;
        }
        if self.seed.is_some() {
            c.seed = self.seed;
        }
        if self.water.is_some() {
            c.terrain.water_level = self.water;
        }
        if let Some(n) = self.neighborhood {
            c.terrain.neighborhood = n.into();
        }
        if let Some(weight) = self.climb_weight {
            c.terrain.cost_model = CostModel::Climb { weight };
        }
        if let Some(penalty) = self.slope_penalty {
            c.terrain.cost_model = CostModel::Slope { penalty };
        }
        if self.from.is_some() {
            c.start = self.from;
        }
        if self.to.is_some() {
            c.goal = self.to;
        }
        if let Some(scale) = self.scale {
            c.scale = scale;
        }
        if let Some(output) = self.output {
            c.output = output;
        }
        c.validate()?;
        Ok(c)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config()?;
    let outcome = terrapath_demos::run(&config);

    outcome
        .image(config.scale)?
        .save(&config.output)
        .with_context(|| format!("writing {}", config.output.display()))?;
    log::info!("wrote {}", config.output.display());

    match &outcome.route {
        Ok(route) => {
            println!(
                "seed {}: {} cells, cost {:.3}",
                outcome.seed,
                route.len(),
                route.cost()
            );
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("seed {}: {e}", outcome.seed)),
    }
}
