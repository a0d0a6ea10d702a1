//! Terrain collaborator for the terrapath search engine.
//!
//! - [`ElevationGrid`] holds one height per cell
//! - [`TerrainGen`] fills a grid with seeded fractal Perlin noise
//! - [`TerrainMap`] turns a grid into a searchable [`Graph`](terrapath_search::Graph)
//!   whose nodes are [`Point`]s, with a global water level, a choice of
//!   [`Neighborhood`] and a slope-based [`CostModel`]
//!
//! ```
//! use terrapath_geom::Point;
//! use terrapath_terrain::{ElevationGrid, TerrainMap};
//!
//! let grid = ElevationGrid::from_rows(vec![vec![0.0; 3]; 3]).unwrap();
//! let map = TerrainMap::new(grid);
//! let route = map.route(Point::new(0, 0), Point::new(2, 2)).unwrap();
//! assert_eq!(route.len(), 3);
//! ```

mod elevation;
mod error;
mod neighborhood;
mod noise;
mod terrain;

pub use elevation::ElevationGrid;
pub use error::TerrainError;
pub use neighborhood::Neighborhood;
pub use noise::{NoiseLayer, NoiseParams, Perlin, TerrainGen};
pub use terrain::{CostModel, TerrainConfig, TerrainMap};
pub use terrapath_geom::Point;
