//! Continuous location watch on top of `navigator.geolocation`.

use log::{error, info};
use snafu::OptionExt;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Geolocation, Position, PositionError, PositionOptions};

use crate::config::WatchOptions;
use crate::errors::{
    CampusError, GeolocationUnavailableSnafu, PositionSnafu, WatchStartSnafu, js_message,
};
use crate::model::LatLon;

/// A host capability that may be missing at runtime.
pub trait Presence {
    fn is_missing(&self) -> bool;
}

impl Presence for Geolocation {
    // Browsers without the API hand back `undefined` from the getter
    fn is_missing(&self) -> bool {
        self.is_undefined() || self.is_null()
    }
}

/// Result of the `navigator.geolocation` getter, narrowed to a usable handle.
pub fn require_geolocation<G: Presence, E>(getter: Result<G, E>) -> Result<G, CampusError> {
    getter
        .ok()
        .filter(|g| !g.is_missing())
        .context(GeolocationUnavailableSnafu)
}

pub struct LocationWatch {
    geolocation: Geolocation,
    watch_id: i32,
    // Held so the browser can keep calling into them.
    _on_position: Closure<dyn FnMut(Position)>,
    _on_error: Closure<dyn FnMut(PositionError)>,
}

impl LocationWatch {
    /// Starts watching; `on_update` runs on every fix the browser reports.
    /// Read failures are logged and otherwise ignored, with no retry.
    pub fn start(
        options: &WatchOptions,
        on_update: impl Fn(LatLon) + 'static,
    ) -> Result<Self, CampusError> {
        let window = web_sys::window().context(GeolocationUnavailableSnafu)?;
        let geolocation = require_geolocation(window.navigator().geolocation())?;

        let on_position = Closure::wrap(Box::new(move |position: Position| {
            let coords = position.coords();
            on_update(LatLon::new(coords.latitude(), coords.longitude()));
        }) as Box<dyn FnMut(_)>);
        let on_error = Closure::wrap(Box::new(move |e: PositionError| {
            let err = PositionSnafu {
                code: e.code(),
                message: e.message(),
            }
            .build();
            error!("{}", err);
        }) as Box<dyn FnMut(_)>);

        let position_options = PositionOptions::new();
        position_options.set_enable_high_accuracy(options.enable_high_accuracy);
        position_options.set_maximum_age(options.maximum_age_ms);
        position_options.set_timeout(options.timeout_ms);

        let watch_id = geolocation
            .watch_position_with_error_callback_and_options(
                on_position.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &position_options,
            )
            .map_err(|e: JsValue| {
                WatchStartSnafu {
                    message: js_message(&e),
                }
                .build()
            })?;
        info!("location watch {} started", watch_id);

        Ok(Self {
            geolocation,
            watch_id,
            _on_position: on_position,
            _on_error: on_error,
        })
    }
}

impl Drop for LocationWatch {
    fn drop(&mut self) {
        self.geolocation.clear_watch(self.watch_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeCapability {
        missing: bool,
    }

    impl Presence for FakeCapability {
        fn is_missing(&self) -> bool {
            self.missing
        }
    }

    #[test]
    fn undefined_getter_counts_as_unsupported() {
        let got = require_geolocation::<_, ()>(Ok(FakeCapability { missing: true }));
        assert!(matches!(got, Err(CampusError::GeolocationUnavailable)));
    }

    #[test]
    fn throwing_getter_counts_as_unsupported() {
        let got = require_geolocation::<FakeCapability, _>(Err("SecurityError"));
        assert!(matches!(got, Err(CampusError::GeolocationUnavailable)));
    }

    #[test]
    fn present_capability_passes_through() {
        let got = require_geolocation::<_, ()>(Ok(FakeCapability { missing: false }));
        assert!(matches!(got, Ok(FakeCapability { missing: false })));
    }
}
