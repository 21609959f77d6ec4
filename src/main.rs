mod components;
mod config;
mod errors;
mod geolocation;
mod logging;
mod map;
mod model;
mod proximity;
mod state;
mod store;

use components::App;

fn main() {
    logging::init();
    yew::Renderer::<App>::new().render();
}
