//! Shared pieces of the `terrapath` demo binary.
//!
//! Run: cargo run --bin terrapath -- --seed 42 --water 0.02 -o route.png

pub mod config;
pub mod render;

pub use config::DemoConfig;
pub use render::render;

use terrapath_geom::Point;
use terrapath_search::Route;
use terrapath_terrain::{TerrainError, TerrainGen, TerrainMap};

/// Result of one demo run.
pub struct Outcome {
    pub seed: u64,
    pub map: TerrainMap,
    pub route: Result<Route<Point>, TerrainError>,
}

/// Generate terrain from `config` and search it.
///
/// A failed search is part of the outcome, not an error: the map is still
/// worth rendering.
pub fn run(config: &DemoConfig) -> Outcome {
    let (terrain_gen, seed) = match config.seed {
        Some(seed) => (TerrainGen::new(seed, config.noise.clone()), seed),
        None => TerrainGen::random(config.noise.clone()),
    };
    log::info!("terrain seed {seed}");

    let grid = terrain_gen.generate(config.width, config.height);
    let map = TerrainMap::with_config(grid, config.terrain.clone());
    let route = map.route(config.start(), config.goal());
    match &route {
        Ok(r) => log::info!(
            "route of {} cells, cost {:.3}, {} expansions",
            r.len(),
            r.cost(),
            r.stats().expanded
        ),
        Err(e) => log::warn!("{} -> {}: {e}", config.start(), config.goal()),
    }
    Outcome { seed, map, route }
}

impl Outcome {
    pub fn image(&self, scale: u32) -> anyhow::Result<image::RgbImage> {
        let nodes = self.route.as_ref().map(Route::nodes).unwrap_or_default();
        render(&self.map, nodes, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(seed: u64) -> DemoConfig {
        DemoConfig {
            width: 24,
            height: 16,
            seed: Some(seed),
            ..DemoConfig::default()
        }
    }

    #[test]
    fn dry_map_always_routes() {
        let out = run(&small(3));
        assert_eq!(out.seed, 3);
        let route = out.route.as_ref().unwrap();
        assert_eq!(*route.start(), Point::ZERO);
        assert_eq!(*route.goal(), Point::new(23, 15));
        assert_eq!(out.image(2).unwrap().dimensions(), (48, 32));
    }

    #[test]
    fn seeded_runs_repeat() {
        let a = run(&small(9));
        let b = run(&small(9));
        assert_eq!(a.map.grid(), b.map.grid());
        assert_eq!(a.route, b.route);
    }

    #[test]
    fn drowned_start_still_renders() {
        let mut config = small(5);
        config.terrain.water_level = Some(2.0);
        let out = run(&config);
        assert!(out.route.is_err());
        assert_eq!(out.image(1).unwrap().dimensions(), (24, 16));
    }
}
