use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomControlsProps {
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_toggle_goto: Callback<()>,
}

#[function_component(ZoomControls)]
pub fn zoom_controls(props: &ZoomControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let rz = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let gt = {
        let cb = props.on_toggle_goto.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:fixed; top:16px; right:16px; display:flex; gap:8px; align-items:center; z-index:20;">
        <button style={BUTTON} onclick={zi}>{"🔍+"}</button>
        <button style={BUTTON} onclick={zo}>{"🔍-"}</button>
        <button style={BUTTON} onclick={rz}>{"Reset"}</button>
        <span style="width:8px;"></span>
        <button style={BUTTON} onclick={gt}>{"Go To"}</button>
    </div>}
}

const BUTTON: &str = "background:rgba(0,0,0,0.8); color:#fff; border:none; padding:8px 12px; border-radius:6px; font-size:13px; cursor:pointer;";
