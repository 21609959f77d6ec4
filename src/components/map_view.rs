use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, MouseEvent, WheelEvent};
use yew::prelude::*;

use crate::map::projection::TILE_SIZE;
use crate::map::view::LABEL_OFFSET_Y;
use crate::map::{MapAction, MapView, Marker};
use crate::state::Drag;

#[derive(Properties, PartialEq, Clone)]
pub struct MapCanvasProps {
    pub map: UseReducerHandle<MapView>,
}

fn measure(el: &Element) -> MapAction {
    MapAction::Resize {
        width: el.client_width() as f64,
        height: el.client_height() as f64,
    }
}

fn marker_html(map: &MapView, marker: &Marker, key: String) -> Html {
    let (x, y) = map.to_screen(marker.position);
    html! {
        <div key={key} style={format!("position:absolute; left:{:.1}px; top:{:.1}px; width:0; height:0; pointer-events:none;", x, y)}>
            <img src={marker.icon_url.clone()} alt="" draggable="false"
                style="position:absolute; left:0; top:0; transform:translate(-50%, -100%);" />
            <span style={format!("position:absolute; left:0; top:{}px; transform:translate(-50%, -50%); white-space:nowrap; font:bold 12px sans-serif; color:#fff; text-shadow:-2px 0 #000, 2px 0 #000, 0 -2px #000, 0 2px #000;", LABEL_OFFSET_Y)}>
                { marker.label.clone() }
            </span>
        </div>
    }
}

#[function_component(MapCanvas)]
pub fn map_canvas(props: &MapCanvasProps) -> Html {
    let container_ref = use_node_ref();
    let drag = use_mut_ref(Drag::default);

    // Track container size and wheel zoom with native listeners
    {
        let container_ref = container_ref.clone();
        let map = props.map.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let container = container_ref.cast::<Element>();
            if let Some(el) = &container {
                map.dispatch(measure(el));
            }

            let resize_cb = {
                let map = map.clone();
                let container = container.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    if let Some(el) = &container {
                        map.dispatch(measure(el));
                    }
                }) as Box<dyn FnMut(_)>)
            };
            if let Some(w) = &window {
                let _ = w.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
            }

            let wheel_cb = {
                let map = map.clone();
                let container = container.clone();
                Closure::wrap(Box::new(move |e: WheelEvent| {
                    e.prevent_default();
                    let Some(el) = &container else { return };
                    let rect = el.get_bounding_client_rect();
                    let delta = if e.delta_y() < 0.0 { 1 } else { -1 };
                    map.dispatch(MapAction::ZoomAt {
                        delta,
                        x: e.client_x() as f64 - rect.left(),
                        y: e.client_y() as f64 - rect.top(),
                    });
                }) as Box<dyn FnMut(_)>)
            };
            if let Some(el) = &container {
                let _ = el.add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref());
            }

            move || {
                if let Some(w) = &window {
                    let _ = w.remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
                }
                if let Some(el) = &container {
                    let _ = el.remove_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref());
                }
                drop(resize_cb);
                drop(wheel_cb);
            }
        });
    }

    let onmousedown = {
        let drag = drag.clone();
        Callback::from(move |e: MouseEvent| {
            if e.button() == 0 {
                e.prevent_default();
                drag.borrow_mut().start(e.client_x() as f64, e.client_y() as f64);
            }
        })
    };
    let onmousemove = {
        let drag = drag.clone();
        let map = props.map.clone();
        Callback::from(move |e: MouseEvent| {
            let delta = drag.borrow_mut().move_to(e.client_x() as f64, e.client_y() as f64);
            if let Some((dx, dy)) = delta {
                map.dispatch(MapAction::PanBy { dx, dy });
            }
        })
    };
    let end_drag = {
        let drag = drag.clone();
        Callback::from(move |_: MouseEvent| drag.borrow_mut().end())
    };

    let map = &*props.map;
    let tile_px = TILE_SIZE;
    html! {
        <div id="map" ref={container_ref}
            style="position:absolute; inset:0; overflow:hidden; background:#e5e3df; cursor:grab; user-select:none;"
            {onmousedown} {onmousemove} onmouseup={end_drag.clone()} onmouseleave={end_drag}>
            { for map.tiles().into_iter().map(|t| html! {
                <img key={format!("{}/{}/{}", t.z, t.col, t.y)}
                    src={map.tile_src(&t)} alt="" draggable="false"
                    style={format!("position:absolute; left:{:.1}px; top:{:.1}px; width:{}px; height:{}px;", t.left, t.top, tile_px, tile_px)} />
            }) }
            { for map.spot_layers.iter().enumerate().flat_map(|(i, layer)| {
                layer.markers().iter().enumerate().map(move |(j, m)| marker_html(map, m, format!("spot-{}-{}", i, j))).collect::<Vec<_>>()
            }) }
            { for map.user_layer.markers().iter().map(|m| marker_html(map, m, "user".to_string())) }
            <div style="position:absolute; right:4px; bottom:2px; font:11px sans-serif; background:rgba(255,255,255,0.7); padding:0 4px; pointer-events:none;">
                {"© OpenStreetMap contributors"}
            </div>
        </div>
    }
}
