use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use terrapath_geom::Point;
use terrapath_terrain::{NoiseParams, TerrainConfig};

/// Everything the demo needs to generate a map and route across it.
///
/// Loaded from an optional JSON file; any field may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub width: i32,
    pub height: i32,
    /// Fixed terrain seed. A random one is drawn and logged when unset.
    pub seed: Option<u64>,
    /// Defaults to the top-left corner.
    pub start: Option<Point>,
    /// Defaults to the bottom-right corner.
    pub goal: Option<Point>,
    /// Pixels per cell in the rendered image.
    pub scale: u32,
    pub output: PathBuf,
    pub noise: NoiseParams,
    pub terrain: TerrainConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 96,
            seed: None,
            start: None,
            goal: None,
            scale: 4,
            output: PathBuf::from("route.png"),
            noise: NoiseParams::default(),
            terrain: TerrainConfig::default(),
        }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.width > 0 && self.height > 0,
            "map size must be positive, got {}x{}",
            self.width,
            self.height
        );
        anyhow::ensure!(self.scale > 0, "scale must be at least 1");
        anyhow::ensure!(
            crate::render::canvas_size(self.width, self.height, self.scale).is_some(),
            "{}x{} cells at scale {} overflow the image size",
            self.width,
            self.height,
            self.scale
        );
        Ok(())
    }

    pub fn start(&self) -> Point {
        self.start.unwrap_or(Point::ZERO)
    }

    pub fn goal(&self) -> Point {
        self.goal
            .unwrap_or(Point::new(self.width - 1, self.height - 1))
    }
}
