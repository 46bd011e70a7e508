use yew::prelude::*;

use crate::util::format_zoom;

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomConfirmModalProps {
    /// Zoom waiting for confirmation; nothing renders while `None`.
    pub pending: Option<f64>,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component]
pub fn ZoomConfirmModal(props: &ZoomConfirmModalProps) -> Html {
    let Some(target) = props.pending else {
        return html! {};
    };

    let confirm_cb = {
        let cb = props.on_confirm.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let cancel_cb = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {<div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.5); z-index:50;">
        <div style="background:#fff; color:#111; border-radius:12px; padding:20px 24px; max-width:420px; display:flex; flex-direction:column; gap:14px; box-shadow:0 6px 18px rgba(0,0,0,0.3);">
            <h3 style="margin:0; font-size:18px;">{"⚠️ Warning!"}</h3>
            <p style="margin:0; font-size:14px; color:#555;">
                {"Some functions may not display correctly when zoomed out. Do you really want to zoom out?"}
            </p>
            <div style="font-size:12px; opacity:0.7;">{ format!("Target zoom: {}", format_zoom(target)) }</div>
            <div style="display:flex; gap:8px; justify-content:flex-end;">
                <button onclick={cancel_cb} style="padding:6px 14px;">{"Cancel"}</button>
                <button onclick={confirm_cb} style="padding:6px 14px; background:#d4a017; border:1px solid #b8860b; color:#fff;">{"Yes, Zoom Out"}</button>
            </div>
        </div>
    </div>}
}
