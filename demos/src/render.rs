use image::{Rgb, RgbImage};
use terrapath_geom::Point;
use terrapath_terrain::TerrainMap;

const ROUTE: Rgb<u8> = Rgb([220, 30, 30]);
const ENDPOINT: Rgb<u8> = Rgb([255, 220, 0]);

/// Pixel size of a `width` by `height` map drawn at `scale`, or `None` if
/// it does not fit in `u32`.
pub fn canvas_size(width: i32, height: i32, scale: u32) -> Option<(u32, u32)> {
    let w = u32::try_from(width).ok()?.checked_mul(scale)?;
    let h = u32::try_from(height).ok()?.checked_mul(scale)?;
    Some((w, h))
}

/// Draw the map with `scale` pixels per cell: dry land in grey by elevation,
/// flooded cells in blue by depth, then the route on top.
pub fn render(map: &TerrainMap, route: &[Point], scale: u32) -> anyhow::Result<RgbImage> {
    let scale = scale.max(1);
    let grid = map.grid();
    let Some((width, height)) = canvas_size(grid.width(), grid.height(), scale) else {
        anyhow::bail!(
            "{}x{} cells at scale {scale} overflow the image size",
            grid.width(),
            grid.height()
        );
    };
    // Grey levels span dry cells only.
    let (lo, hi) = grid
        .iter()
        .filter(|&(p, _)| !map.is_flooded(p))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, z)| {
            (lo.min(z), hi.max(z))
        });
    let span = if hi > lo { hi - lo } else { 1.0 };

    let mut img = RgbImage::new(width, height);
    for (p, z) in grid.iter() {
        let depth = map.water_depth(p);
        let color = if depth > 0.0 {
            water(depth / span)
        } else {
            let v = (((z - lo) / span) * 255.0).round() as u8;
            Rgb([v, v, v])
        };
        fill_cell(&mut img, p, scale, color);
    }

    for &p in route {
        fill_cell(&mut img, p, scale, ROUTE);
    }
    if let (Some(&goal), Some(&start)) = (route.first(), route.last()) {
        fill_cell(&mut img, start, scale, ENDPOINT);
        fill_cell(&mut img, goal, scale, ENDPOINT);
    }
    Ok(img)
}

/// Lighter for shallow water, darker for deep.
fn water(depth: f64) -> Rgb<u8> {
    let t = depth.clamp(0.0, 1.0);
    let shade = |light: f64, dark: f64| (light + (dark - light) * t).round() as u8;
    Rgb([shade(90.0, 10.0), shade(150.0, 30.0), shade(230.0, 120.0)])
}

/// Paint one cell. Cells that fall outside the image are ignored.
fn fill_cell(img: &mut RgbImage, p: Point, scale: u32, color: Rgb<u8>) {
    let Some((x0, y0)) = canvas_size(p.x, p.y, scale) else {
        return;
    };
    let x1 = x0.saturating_add(scale).min(img.width());
    let y1 = y0.saturating_add(scale).min(img.height());
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, color);
        }
    }
}
