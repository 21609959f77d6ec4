use log::{error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use super::{
    map_controls::MapControls, map_view::MapCanvas, sidebar::Sidebar,
    status_update_panel::StatusUpdatePanel,
};
use crate::config::AppConfig;
use crate::errors::CampusError;
use crate::geolocation::LocationWatch;
use crate::map::{MapAction, MapView};
use crate::model::{STUDY_SPOTS, StatusValue};
use crate::proximity::ProximityDetector;
use crate::state::{CampusAction, CampusState};
use crate::store::StatusStore;

#[function_component(App)]
pub fn app() -> Html {
    let setup = use_memo((), |_| {
        let store = StatusStore::open_browser();
        let config = AppConfig::load(&**store.backend());
        (store, config)
    });
    let campus = {
        let setup = setup.clone();
        use_reducer(move || {
            let (store, config) = &*setup;
            CampusState::new(
                store.clone(),
                ProximityDetector::new(config.proximity_threshold_deg),
            )
        })
    };
    let map = {
        let setup = setup.clone();
        use_reducer(move || MapView::new(&setup.1, &STUDY_SPOTS))
    };

    // Location watch lives as long as the app
    {
        let campus = campus.clone();
        let map = map.clone();
        let watch_options = setup.1.watch.clone();
        use_effect_with((), move |_| {
            let watch = match LocationWatch::start(&watch_options, move |user| {
                map.dispatch(MapAction::UserMoved(user));
                campus.dispatch(CampusAction::LocationUpdated(user));
            }) {
                Ok(watch) => Some(watch),
                Err(CampusError::GeolocationUnavailable) => {
                    info!("Geolocation is not supported by this browser.");
                    None
                }
                Err(e) => {
                    error!("{}", e);
                    None
                }
            };
            move || drop(watch)
        });
    }

    // Another tab may have written a status
    {
        let campus = campus.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let storage_cb = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                campus.dispatch(CampusAction::Refresh);
            }) as Box<dyn FnMut(_)>);
            if let Some(w) = &window {
                let _ = w.add_event_listener_with_callback("storage", storage_cb.as_ref().unchecked_ref());
            }
            move || {
                if let Some(w) = &window {
                    let _ = w.remove_event_listener_with_callback("storage", storage_cb.as_ref().unchecked_ref());
                }
                drop(storage_cb);
            }
        });
    }

    let on_submit = {
        let campus = campus.clone();
        Callback::from(move |(spot_id, value): (String, StatusValue)| {
            campus.dispatch(CampusAction::SubmitStatus { spot_id, value });
        })
    };
    let on_zoom_in = {
        let map = map.clone();
        Callback::from(move |_| map.dispatch(MapAction::ZoomIn))
    };
    let on_zoom_out = {
        let map = map.clone();
        Callback::from(move |_| map.dispatch(MapAction::ZoomOut))
    };
    let on_center = {
        let map = map.clone();
        Callback::from(move |_| map.dispatch(MapAction::Reset))
    };

    html! {
        <div id="root" style="display:flex; width:100vw; height:100vh;">
            <Sidebar entries={campus.sidebar.clone()} />
            <main style="position:relative; flex:1;">
                <MapCanvas map={map.clone()} />
                <MapControls {on_zoom_in} {on_zoom_out} {on_center} />
            </main>
            { for campus.open_spots().enumerate().map(|(i, spot)| html! {
                <StatusUpdatePanel key={spot.id} {spot} stack_index={i} on_submit={on_submit.clone()} />
            }) }
        </div>
    }
}
