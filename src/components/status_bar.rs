use yew::prelude::*;

use crate::model::WorldPos;
use crate::util::format_zoom;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusBarProps {
    /// World point at the surface center.
    pub center: WorldPos,
    pub cursor: WorldPos,
    pub zoom: f64,
}

#[function_component]
pub fn StatusBar(props: &StatusBarProps) -> Html {
    let value_style = "font-variant-numeric:tabular-nums;";
    html! {
        <div style="position:fixed; top:16px; left:16px; background:rgba(0,0,0,0.8); color:#fff; padding:8px 12px; border-radius:6px; font-size:13px; font-family:monospace; pointer-events:none; display:flex; gap:12px; z-index:20;">
            <span style={value_style}>{ format!("x: {}, y: {}", props.center.x, props.center.y) }</span>
            <span style="opacity:0.6;">{"|"}</span>
            <span style={value_style}>{ format!("Zoom: {}", format_zoom(props.zoom)) }</span>
            <span style="opacity:0.6;">{"|"}</span>
            <span style={format!("{} opacity:0.75;", value_style)}>{ format!("cursor ({}, {})", props.cursor.x, props.cursor.y) }</span>
        </div>
    }
}
