//! Map view state: camera, viewport and marker layers.

use std::rc::Rc;

use yew::Reducible;

use super::projection::{self, TilePlacement, WorldPoint};
use crate::config::AppConfig;
use crate::model::{LatLon, StudySpot};

pub const MIN_ZOOM: u32 = 2;
pub const MAX_ZOOM: u32 = 19;
/// Distance the text label sits above a marker's anchor, in pixels.
pub const LABEL_OFFSET_Y: f64 = -25.0;
pub const USER_LABEL: &str = "You are here";

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub position: LatLon,
    pub label: String,
    pub icon_url: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
}

impl MarkerLayer {
    pub fn with_marker(marker: Marker) -> Self {
        Self {
            markers: vec![marker],
        }
    }

    pub fn add(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapView {
    pub center: LatLon,
    pub zoom: u32,
    pub viewport: Viewport,
    home: (LatLon, u32),
    tile_url: String,
    user_icon_url: String,
    /// One static layer per study spot.
    pub spot_layers: Vec<MarkerLayer>,
    /// Holds at most the one "You are here" marker.
    pub user_layer: MarkerLayer,
}

impl MapView {
    pub fn new(config: &AppConfig, spots: &[StudySpot]) -> Self {
        let zoom = config.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let spot_layers = spots
            .iter()
            .map(|spot| {
                MarkerLayer::with_marker(Marker {
                    position: spot.position,
                    label: spot.name.to_string(),
                    icon_url: config.spot_icon_url.clone(),
                })
            })
            .collect();
        Self {
            center: config.center,
            zoom,
            viewport: Viewport::default(),
            home: (config.center, zoom),
            tile_url: config.tile_url.clone(),
            user_icon_url: config.user_icon_url.clone(),
            spot_layers,
            user_layer: MarkerLayer::default(),
        }
    }

    fn center_world(&self) -> WorldPoint {
        projection::project(self.center, self.zoom)
    }

    /// Pixel position of `p` relative to the viewport's top-left corner.
    pub fn to_screen(&self, p: LatLon) -> (f64, f64) {
        let c = self.center_world();
        let w = projection::project(p, self.zoom);
        (
            w.x - c.x + self.viewport.width / 2.0,
            w.y - c.y + self.viewport.height / 2.0,
        )
    }

    pub fn to_lat_lon(&self, x: f64, y: f64) -> LatLon {
        let c = self.center_world();
        projection::unproject(
            WorldPoint {
                x: c.x + x - self.viewport.width / 2.0,
                y: c.y + y - self.viewport.height / 2.0,
            },
            self.zoom,
        )
    }

    pub fn tiles(&self) -> Vec<TilePlacement> {
        projection::visible_tiles(
            self.center_world(),
            self.zoom,
            self.viewport.width,
            self.viewport.height,
        )
    }

    pub fn tile_src(&self, tile: &TilePlacement) -> String {
        self.tile_url
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }

    /// Drags the map content by `(dx, dy)` pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let c = self.center_world();
        let size = projection::world_size(self.zoom);
        let y = (c.y - dy).clamp(0.0, size);
        let mut center = projection::unproject(WorldPoint { x: c.x - dx, y }, self.zoom);
        center.lon = (center.lon + 180.0).rem_euclid(360.0) - 180.0;
        self.center = center;
    }

    /// Changes zoom by `delta` levels, keeping the point under `(x, y)` fixed.
    pub fn zoom_at(&mut self, delta: i32, x: f64, y: f64) {
        let zoom = (self.zoom as i32 + delta).clamp(MIN_ZOOM as i32, MAX_ZOOM as i32) as u32;
        if zoom == self.zoom {
            return;
        }
        let anchor = self.to_lat_lon(x, y);
        self.zoom = zoom;
        let (ax, ay) = self.to_screen(anchor);
        self.pan_by(x - ax, y - ay);
    }

    pub fn reset(&mut self) {
        (self.center, self.zoom) = self.home;
    }

    pub fn set_user_position(&mut self, p: LatLon) {
        self.user_layer.clear();
        self.user_layer.add(Marker {
            position: p,
            label: USER_LABEL.to_string(),
            icon_url: self.user_icon_url.clone(),
        });
    }
}

#[derive(Clone, Debug)]
pub enum MapAction {
    Resize { width: f64, height: f64 },
    PanBy { dx: f64, dy: f64 },
    ZoomAt { delta: i32, x: f64, y: f64 },
    ZoomIn,
    ZoomOut,
    Reset,
    UserMoved(LatLon),
}

impl Reducible for MapView {
    type Action = MapAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use MapAction::*;
        let mut new = (*self).clone();
        match action {
            Resize { width, height } => {
                if width <= 0.0 || height <= 0.0 || (width, height) == (new.viewport.width, new.viewport.height) {
                    return self;
                }
                new.viewport = Viewport { width, height };
            }
            PanBy { dx, dy } => new.pan_by(dx, dy),
            ZoomAt { delta, x, y } => new.zoom_at(delta, x, y),
            ZoomIn => {
                let (cx, cy) = (new.viewport.width / 2.0, new.viewport.height / 2.0);
                new.zoom_at(1, cx, cy);
            }
            ZoomOut => {
                let (cx, cy) = (new.viewport.width / 2.0, new.viewport.height / 2.0);
                new.zoom_at(-1, cx, cy);
            }
            Reset => new.reset(),
            UserMoved(p) => new.set_user_position(p),
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::STUDY_SPOTS;

    fn view() -> MapView {
        let mut view = MapView::new(&AppConfig::default(), &STUDY_SPOTS);
        view.viewport = Viewport {
            width: 640.0,
            height: 480.0,
        };
        view
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn starts_on_campus_with_one_layer_per_spot() {
        let view = view();
        assert_eq!(view.zoom, 15);
        assert_eq!(view.spot_layers.len(), 2);
        assert_eq!(view.spot_layers[0].markers()[0].label, "Frank Melville Jr. Memorial Library");
        assert_eq!(view.spot_layers[1].markers()[0].label, "Stony Brook Union");
        assert!(view.user_layer.markers().is_empty());
    }

    #[test]
    fn center_maps_to_viewport_middle() {
        let view = view();
        let (x, y) = view.to_screen(view.center);
        assert!(close(x, 320.0) && close(y, 240.0));
        let back = view.to_lat_lon(x, y);
        assert!(close(back.lat, view.center.lat) && close(back.lon, view.center.lon));
    }

    #[test]
    fn user_layer_holds_only_latest_position() {
        let mut view = view();
        view.set_user_position(LatLon::new(40.91, -73.12));
        view.set_user_position(LatLon::new(40.9153, -73.1230));
        let markers = view.user_layer.markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].position, LatLon::new(40.9153, -73.1230));
        assert_eq!(markers[0].label, USER_LABEL);
        assert!(markers[0].icon_url.ends_with("blue-dot.png"));
    }

    #[test]
    fn pan_moves_content_under_pointer() {
        let mut view = view();
        let spot = STUDY_SPOTS[0].position;
        let (x0, y0) = view.to_screen(spot);
        view.pan_by(40.0, -25.0);
        let (x1, y1) = view.to_screen(spot);
        assert!(close(x1 - x0, 40.0) && close(y1 - y0, -25.0));
    }

    #[test]
    fn zoom_keeps_anchor_fixed_and_clamps() {
        let mut view = view();
        let anchor = view.to_lat_lon(100.0, 50.0);
        view.zoom_at(2, 100.0, 50.0);
        assert_eq!(view.zoom, 17);
        let (x, y) = view.to_screen(anchor);
        assert!((x - 100.0).abs() < 1e-3 && (y - 50.0).abs() < 1e-3);

        view.zoom_at(10, 0.0, 0.0);
        assert_eq!(view.zoom, MAX_ZOOM);
        view.zoom_at(-40, 0.0, 0.0);
        assert_eq!(view.zoom, MIN_ZOOM);
    }

    #[test]
    fn reducer_reset_and_resize() {
        let state = Rc::new(view());
        let state = state.reduce(MapAction::ZoomIn);
        let state = state.reduce(MapAction::PanBy { dx: 10.0, dy: 10.0 });
        assert_eq!(state.zoom, 16);
        let state = state.reduce(MapAction::Reset);
        assert_eq!(state.zoom, 15);
        assert_eq!(state.center, AppConfig::default().center);

        let resized = state.clone().reduce(MapAction::Resize { width: 1024.0, height: 768.0 });
        assert_eq!(resized.viewport, Viewport { width: 1024.0, height: 768.0 });
        let ignored = resized.clone().reduce(MapAction::Resize { width: 0.0, height: 768.0 });
        assert!(Rc::ptr_eq(&resized, &ignored));
    }

    #[test]
    fn tile_sources_follow_template() {
        let view = view();
        let tiles = view.tiles();
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.z == 15));
        let campus = TilePlacement { col: 9728, z: 15, x: 9728, y: 12296, left: 0.0, top: 0.0 };
        assert!(tiles.iter().any(|t| (t.x, t.y) == (campus.x, campus.y)));
        assert_eq!(
            view.tile_src(&campus),
            "https://tile.openstreetmap.org/15/9728/12296.png"
        );
    }
}
