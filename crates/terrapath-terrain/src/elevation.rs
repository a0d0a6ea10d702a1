//! A dense grid of cell elevations.

use terrapath_geom::{Point, Range};

use crate::error::TerrainError;

/// One elevation per cell, stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevationGrid {
    cells: Vec<f64>,
    bounds: Range,
}

impl ElevationGrid {
    /// A flat grid of the given size at elevation 0.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::sized(width.max(0), height.max(0));
        Self {
            cells: vec![0.0; bounds.len()],
            bounds,
        }
    }

    /// Build a grid from rows indexed `[y][x]`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, TerrainError> {
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(TerrainError::Empty);
        }
        let mut cells = Vec::with_capacity(expected * rows.len());
        for (row, values) in rows.iter().enumerate() {
            if values.len() != expected {
                return Err(TerrainError::RaggedRows {
                    row,
                    expected,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }
        Ok(Self {
            cells,
            bounds: Range::sized(expected as i32, rows.len() as i32),
        })
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Elevation at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<f64> {
        self.bounds.index(p).map(|i| self.cells[i])
    }

    /// Set the elevation at `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, z: f64) {
        if let Some(i) = self.bounds.index(p) {
            self.cells[i] = z;
        }
    }

    /// Fill every cell from a function of its position.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Point) -> f64) {
        for (p, z) in self.bounds.iter().zip(self.cells.iter_mut()) {
            *z = f(p);
        }
    }

    /// Iterate over `(Point, elevation)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// Lowest and highest elevation.
    pub fn min_max(&self) -> (f64, f64) {
        self.cells
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &z| {
                (lo.min(z), hi.max(z))
            })
    }
}
