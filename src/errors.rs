use snafu::Snafu;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CampusError {
    // Storage errors
    #[snafu(display("Browser local storage is not available: {message}"))]
    StorageUnavailable { message: String },
    #[snafu(display("Error reading storage key {key}: {message}"))]
    StorageRead { key: String, message: String },
    #[snafu(display("Error writing storage key {key}: {message}"))]
    StorageWrite { key: String, message: String },
    #[snafu(display("No status stored for spot {spot}"))]
    MissingStatus { spot: String },
    #[snafu(display("Invalid status value: {value:?}"))]
    InvalidStatus { value: String },

    // Geolocation errors
    #[snafu(display("Geolocation is not supported by this browser"))]
    GeolocationUnavailable,
    #[snafu(display("Error starting location watch: {message}"))]
    WatchStart { message: String },
    #[snafu(display("Error getting location (code {code}): {message}"))]
    Position { code: u16, message: String },

    // Config errors
    #[snafu(display("Error parsing config"))]
    ConfigParse { source: serde_json::Error },
}

/// Renders a thrown JS value into something printable.
pub fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
