use yew::prelude::*;

use crate::elements::{CATALOGUE, preview};

#[derive(Properties, PartialEq, Clone)]
pub struct ElementPickerProps {
    pub show: bool,
    pub on_select: Callback<&'static str>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn ElementPicker(props: &ElementPickerProps) -> Html {
    if !props.show {
        return html! {};
    }
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:fixed; left:16px; bottom:16px; max-height:384px; overflow-y:auto; background:#fff; color:#111; border:1px solid #ddd; border-radius:8px; box-shadow:0 4px 12px rgba(0,0,0,0.15); z-index:40; max-width:320px;">
        <div style="display:flex; justify-content:space-between; align-items:center; padding:10px 12px; background:#f0fdf4; border-bottom:1px solid #ddd;">
            <span style="font-weight:600; color:#166534;">{"🗺️ Map Elements"}</span>
            <button onclick={close_cb} style="border:none; background:none; cursor:pointer;">{"✕"}</button>
        </div>
        <div style="padding:10px 12px; display:flex; flex-direction:column; gap:12px;">
            { for CATALOGUE.iter().map(|cat| html! {
                <div>
                    <div style="font-size:13px; font-weight:500; margin-bottom:6px;">{ cat.name }</div>
                    <div style="display:grid; grid-template-columns:1fr 1fr; gap:6px;">
                        { for cat.elements.iter().map(|el| {
                            let cb = props.on_select.clone();
                            let content = el.content;
                            let onclick = Callback::from(move |_| cb.emit(content));
                            html! {
                                <button {onclick} title={el.name} style="padding:6px; border:1px solid #e5e7eb; border-radius:4px; background:#fff; text-align:left; cursor:pointer;">
                                    <div style="white-space:pre; font-family:monospace; font-size:11px; line-height:1.15;">{ preview(el.content) }</div>
                                    <div style="font-size:11px; color:#6b7280; margin-top:4px;">{ el.name }</div>
                                </button>
                            }
                        }) }
                    </div>
                </div>
            }) }
        </div>
    </div>}
}
