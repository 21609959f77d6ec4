// Spherical Web Mercator, the projection OSM raster tiles are cut in.
use std::f64::consts::PI;

use crate::model::LatLon;

pub const TILE_SIZE: f64 = 256.0;
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

pub fn world_size(zoom: u32) -> f64 {
    TILE_SIZE * 2f64.powi(zoom as i32)
}

pub fn project(p: LatLon, zoom: u32) -> WorldPoint {
    let size = world_size(zoom);
    let lat = p.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (p.lon + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    WorldPoint { x, y }
}

pub fn unproject(w: WorldPoint, zoom: u32) -> LatLon {
    let size = world_size(zoom);
    let lon = w.x / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * w.y / size);
    let lat = n.sinh().atan().to_degrees();
    LatLon::new(lat, lon)
}

/// One tile placed on screen. `x` is already wrapped into `0..2^z`; `col` is
/// the unwrapped column, distinct for every placement in one viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePlacement {
    pub col: i64,
    pub z: u32,
    pub x: u32,
    pub y: u32,
    pub left: f64,
    pub top: f64,
}

/// Tiles covering a `width` x `height` viewport centered on `center`.
pub fn visible_tiles(center: WorldPoint, zoom: u32, width: f64, height: f64) -> Vec<TilePlacement> {
    let origin_x = center.x - width / 2.0;
    let origin_y = center.y - height / 2.0;
    let n = 1i64 << zoom;
    let first_col = (origin_x / TILE_SIZE).floor() as i64;
    let last_col = ((origin_x + width) / TILE_SIZE).floor() as i64;
    let first_row = ((origin_y / TILE_SIZE).floor() as i64).max(0);
    let last_row = (((origin_y + height) / TILE_SIZE).floor() as i64).min(n - 1);

    let mut tiles = Vec::new();
    for row in first_row..=last_row {
        for col in first_col..=last_col {
            tiles.push(TilePlacement {
                col,
                z: zoom,
                x: col.rem_euclid(n) as u32,
                y: row as u32,
                left: col as f64 * TILE_SIZE - origin_x,
                top: row as f64 * TILE_SIZE - origin_y,
            });
        }
    }
    tiles
}
