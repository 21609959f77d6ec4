use yew::prelude::*;

use crate::state::SidebarEntry;

#[derive(Properties, PartialEq, Clone)]
pub struct SidebarProps {
    pub entries: Vec<SidebarEntry>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let row_style = "display:flex; flex-direction:column; gap:4px; padding:10px 0; border-bottom:1px solid rgba(245,230,196,0.2);";
    html! {
        <aside id="sidebar" style="width:260px; flex-shrink:0; background:#0D253F; color:#F5E6C4; padding:16px; box-sizing:border-box; overflow-y:auto;">
            <h2 style="margin:0 0 8px 0; font-size:20px;">{"Study Spots"}</h2>
            { for props.entries.iter().map(|entry| html! {
                <div key={entry.spot.id} style={row_style}>
                    <span style="font-weight:600;">{ entry.spot.name }</span>
                    <span id={entry.spot.sidebar_id()} class={entry.class()}>{ entry.text() }</span>
                </div>
            }) }
            <p style="font-size:11px; opacity:0.7; margin-top:12px;">{"Walk up to a spot to report how busy it is."}</p>
        </aside>
    }
}
