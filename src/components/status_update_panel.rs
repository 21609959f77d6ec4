use log::warn;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::model::{StatusValue, StudySpot};

const PANEL_HEIGHT_PX: usize = 150;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusUpdatePanelProps {
    pub spot: &'static StudySpot,
    /// Position in the bottom-right stack, 0 being lowest.
    #[prop_or(0)]
    pub stack_index: usize,
    pub on_submit: Callback<(String, StatusValue)>,
}

#[function_component(StatusUpdatePanel)]
pub fn status_update_panel(props: &StatusUpdatePanelProps) -> Html {
    let selected = use_state(|| StatusValue::Vacant);

    let onchange = {
        let selected = selected.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            match select.value().parse::<StatusValue>() {
                Ok(v) => selected.set(v),
                Err(err) => warn!("{}", err),
            }
        })
    };
    let onclick = {
        let cb = props.on_submit.clone();
        let spot_id = props.spot.id.to_string();
        let selected = selected.clone();
        Callback::from(move |_| cb.emit((spot_id.clone(), *selected)))
    };

    let bottom = 20 + props.stack_index * PANEL_HEIGHT_PX;
    html! {
        <div id={props.spot.panel_id()} style={format!("position:fixed; bottom:{}px; right:20px; padding:15px; background:#0D253F; color:#F5E6C4; border-radius:10px; box-shadow:0 0 10px rgba(0, 0, 0, 0.3); z-index:20;", bottom)}>
            <h3 style="margin:0 0 10px 0;">{ format!("{} - Update Status", props.spot.name) }</h3>
            <select id={props.spot.select_id()} {onchange}>
                { for StatusValue::ALL.iter().map(|v| html! {
                    <option value={v.as_str()} selected={*v == *selected}>{ v.as_str() }</option>
                }) }
            </select>
            <button style="margin-left:8px;" {onclick}>{"Update"}</button>
        </div>
    }
}
