use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct MapControlsProps {
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_center: Callback<()>,
}

#[function_component(MapControls)]
pub fn map_controls(props: &MapControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let cc = {
        let cb = props.on_center.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:12px; left:12px; background:rgba(13,37,63,0.9); border:1px solid #30363d; border-radius:8px; padding:6px; display:flex; flex-direction:column; gap:6px; z-index:10;">
        <button title="Zoom in" onclick={zi}> {"+"} </button>
        <button title="Zoom out" onclick={zo}> {"-"} </button>
        <button title="Back to campus" onclick={cc}> {"Center"} </button>
    </div>}
}
