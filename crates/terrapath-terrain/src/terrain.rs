use terrapath_geom::{Point, Range};
use terrapath_search::{Graph, IMPASSABLE, Route, Search};

use crate::elevation::ElevationGrid;
use crate::error::TerrainError;
use crate::neighborhood::Neighborhood;

/// How elevation change between two cells is priced on top of the planar
/// step length `d`. Both models cost at least `d`, so straight-line distance
/// stays an admissible heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CostModel {
    /// `d + penalty * |Δz| / d`: steep steps cost more than gentle ones of
    /// the same height gain.
    Slope { penalty: f64 },
    /// `d + weight * |Δz|`: every unit of height change costs the same.
    Climb { weight: f64 },
}

impl Default for CostModel {
    fn default() -> Self {
        Self::Slope { penalty: 1000.0 }
    }
}

impl CostModel {
    /// Price of a step of planar length `d` with height change `dz`.
    #[inline]
    pub fn step(self, d: f64, dz: f64) -> f64 {
        match self {
            Self::Slope { penalty } => d + penalty * dz.abs() / d,
            Self::Climb { weight } => d + weight * dz.abs(),
        }
    }
}

/// Settings applied on top of an [`ElevationGrid`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerrainConfig {
    /// Cells strictly below this elevation are under water and cannot be
    /// entered. `None` means no water at all.
    pub water_level: Option<f64>,
    pub neighborhood: Neighborhood,
    pub cost_model: CostModel,
}

/// A searchable elevation map. Nodes are grid [`Point`]s.
#[derive(Debug, Clone)]
pub struct TerrainMap {
    grid: ElevationGrid,
    config: TerrainConfig,
}

impl TerrainMap {
    /// A dry, 8-connected map with the default slope cost.
    pub fn new(grid: ElevationGrid) -> Self {
        Self::with_config(grid, TerrainConfig::default())
    }

    pub fn with_config(grid: ElevationGrid, config: TerrainConfig) -> Self {
        Self { grid, config }
    }

    pub fn with_water_level(mut self, level: f64) -> Self {
        self.config.water_level = Some(level);
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.config.neighborhood = neighborhood;
        self
    }

    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.config.cost_model = cost_model;
        self
    }

    #[inline]
    pub fn grid(&self) -> &ElevationGrid {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.grid.bounds()
    }

    /// Elevation at `p`, or `None` off the map.
    #[inline]
    pub fn elevation(&self, p: Point) -> Option<f64> {
        self.grid.at(p)
    }

    /// Depth of water over `p`: `level - z` when the cell lies below the
    /// water level, otherwise 0. Off-map cells read as dry.
    pub fn water_depth(&self, p: Point) -> f64 {
        match (self.config.water_level, self.grid.at(p)) {
            (Some(level), Some(z)) if z < level => level - z,
            _ => 0.0,
        }
    }

    #[inline]
    pub fn is_flooded(&self, p: Point) -> bool {
        self.water_depth(p) > 0.0
    }

    /// Least-cost route from `from` to `to`, goal-first.
    pub fn route(&self, from: Point, to: Point) -> Result<Route<Point>, TerrainError> {
        self.route_within(from, to, None)
    }

    /// Like [`TerrainMap::route`] but gives up after `max_expansions` node
    /// expansions when a limit is set.
    pub fn route_within(
        &self,
        from: Point,
        to: Point,
        max_expansions: Option<usize>,
    ) -> Result<Route<Point>, TerrainError> {
        for p in [from, to] {
            if !self.grid.contains(p) {
                return Err(TerrainError::OutOfBounds(p));
            }
        }
        let mut search = Search::new(self);
        if let Some(limit) = max_expansions {
            search = search.max_expansions(limit);
        }
        Ok(search.run(from, to, |n, g| n == g)?)
    }
}

impl Graph for TerrainMap {
    type Node = Point;

    fn neighbors(&self, p: &Point, buf: &mut Vec<Point>) {
        let bounds = self.grid.bounds();
        self.config
            .neighborhood
            .neighbors(*p, buf, |n| bounds.contains(n));
    }

    fn cost(&self, from: &Point, to: &Point) -> f64 {
        if self.is_flooded(*to) {
            return IMPASSABLE;
        }
        let (Some(z0), Some(z1)) = (self.grid.at(*from), self.grid.at(*to)) else {
            return IMPASSABLE;
        };
        let d = from.distance(*to);
        if d == 0.0 {
            return 0.0;
        }
        self.config.cost_model.step(d, z1 - z0)
    }

    fn estimate(&self, from: &Point, goal: &Point) -> f64 {
        from.distance(*goal)
    }
}
