//! Seeded Perlin elevation synthesis.
//!
//! [`Perlin`] is classic improved gradient noise over a permutation table
//! shuffled from an explicit seed, so the same seed always yields the same
//! terrain. [`TerrainGen`] sums several frequency layers of fractal noise
//! into an [`ElevationGrid`] with values in `[0, 1]`.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::elevation::ElevationGrid;

/// 2D gradient noise with a seeded permutation table.
#[derive(Clone)]
pub struct Perlin {
    perm: [u8; 512],
}

impl Perlin {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut table = [0u8; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }
        for i in (1..table.len()).rev() {
            let j = rng.random_range(0..=i);
            table.swap(i, j);
        }
        let mut perm = [0u8; 512];
        for (i, v) in perm.iter_mut().enumerate() {
            *v = table[i & 255];
        }
        Self { perm }
    }

    /// Noise at `(x, y)`, roughly in `[-1, 1]`. Zero on every integer lattice
    /// point.
    pub fn noise2(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        let xi = (x0 as i64 & 255) as usize;
        let yi = (y0 as i64 & 255) as usize;
        let xf = x - x0;
        let yf = y - y0;
        let u = fade(xf);
        let v = fade(yf);

        let p = &self.perm;
        let aa = p[p[xi] as usize + yi];
        let ab = p[p[xi] as usize + yi + 1];
        let ba = p[p[xi + 1] as usize + yi];
        let bb = p[p[xi + 1] as usize + yi + 1];

        lerp(
            v,
            lerp(u, grad(aa, xf, yf), grad(ba, xf - 1.0, yf)),
            lerp(u, grad(ab, xf, yf - 1.0), grad(bb, xf - 1.0, yf - 1.0)),
        )
    }

    /// Fractal sum of `octaves` noise samples. Each octave multiplies the
    /// frequency by `beta` and divides the amplitude by `alpha`.
    pub fn fractal(&self, x: f64, y: f64, alpha: f64, beta: f64, octaves: u32) -> f64 {
        let mut sum = 0.0;
        let mut scale = 1.0;
        let (mut px, mut py) = (x, y);
        for _ in 0..octaves {
            sum += self.noise2(px, py) / scale;
            scale *= alpha;
            px *= beta;
            py *= beta;
        }
        sum
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    match hash & 7 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}

/// One frequency band of the terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseLayer {
    pub frequency: f64,
    pub weight: f64,
}

/// Shape of generated terrain.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NoiseParams {
    /// Amplitude divisor between octaves.
    pub alpha: f64,
    /// Frequency multiplier between octaves.
    pub beta: f64,
    pub octaves: u32,
    /// Bands summed and normalised by their total weight.
    pub layers: Vec<NoiseLayer>,
    /// The normalised `[0, 1]` value is raised to this power, flattening
    /// lowlands and sharpening peaks.
    pub exponent: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            alpha: 2.0,
            beta: 2.0,
            octaves: 3,
            layers: vec![
                NoiseLayer {
                    frequency: 1.0,
                    weight: 0.5,
                },
                NoiseLayer {
                    frequency: 2.0,
                    weight: 0.7,
                },
                NoiseLayer {
                    frequency: 4.0,
                    weight: 0.25,
                },
                NoiseLayer {
                    frequency: 8.0,
                    weight: 0.15,
                },
            ],
            exponent: 3.75,
        }
    }
}

/// Elevation generator.
pub struct TerrainGen {
    noise: Perlin,
    params: NoiseParams,
}

impl TerrainGen {
    pub fn new(seed: u64, params: NoiseParams) -> Self {
        Self {
            noise: Perlin::new(seed),
            params,
        }
    }

    /// Generator with a seed drawn from the thread RNG. Log or keep the
    /// returned seed to reproduce the terrain.
    pub fn random(params: NoiseParams) -> (Self, u64) {
        let seed: u64 = rand::rng().random();
        (Self::new(seed, params), seed)
    }

    pub fn params(&self) -> &NoiseParams {
        &self.params
    }

    /// Overwrite every cell of `grid` with generated elevation in `[0, 1]`.
    pub fn fill(&self, grid: &mut ElevationGrid) {
        let (w, h) = (f64::from(grid.width()), f64::from(grid.height()));
        grid.fill_fn(|p| {
            let nx = f64::from(p.x) / w - 0.5;
            let ny = f64::from(p.y) / h - 0.5;
            self.sample(nx, ny)
        });
        let (lo, hi) = grid.min_max();
        log::debug!(
            "generated {}x{} terrain, elevation {lo:.4}..{hi:.4}",
            grid.width(),
            grid.height()
        );
    }

    /// A fresh grid of the given size.
    pub fn generate(&self, width: i32, height: i32) -> ElevationGrid {
        let mut grid = ElevationGrid::new(width, height);
        self.fill(&mut grid);
        grid
    }

    /// Elevation at normalised coordinates centred on the origin.
    pub fn sample(&self, nx: f64, ny: f64) -> f64 {
        let NoiseParams {
            alpha,
            beta,
            octaves,
            ref layers,
            exponent,
        } = self.params;
        let total: f64 = layers.iter().map(|l| l.weight).sum();
        if total <= 0.0 {
            return 0.0;
        }
        let mut n = 0.0;
        for l in layers {
            let (x, y) = (l.frequency * nx, l.frequency * ny);
            n += l.weight * self.noise.fractal(x, y, alpha, beta, octaves);
        }
        let unit = ((n / total + 1.0) / 2.0).clamp(0.0, 1.0);
        unit.powf(exponent)
    }
}
