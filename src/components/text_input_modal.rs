use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use crate::model::{ScreenPoint, WorldPos};

pub const TEXT_INPUT_ID: &str = "text-input";

const MODAL_WIDTH: f64 = 256.0;

#[derive(Properties, PartialEq, Clone)]
pub struct TextInputModalProps {
    pub world: WorldPos,
    /// Where `world` currently sits on screen.
    pub anchor: ScreenPoint,
    pub on_submit: Callback<String>,
    pub on_cancel: Callback<()>,
}

#[function_component]
pub fn TextInputModal(props: &TextInputModalProps) -> Html {
    let content = use_state(String::new);
    let area_ref = use_node_ref();

    {
        let area_ref = area_ref.clone();
        use_effect_with((), move |_| {
            if let Some(area) = area_ref.cast::<HtmlTextAreaElement>() {
                let _ = area.focus();
            }
            || ()
        });
    }

    let (win_w, win_h) = web_sys::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            (width, height)
        })
        .unwrap_or((800.0, 600.0));
    let left = (props.anchor.x - MODAL_WIDTH / 2.0).min(win_w - MODAL_WIDTH - 14.0).max(10.0);
    let top = (props.anchor.y - 25.0).min(win_h - 100.0).max(10.0);

    let oninput = {
        let content = content.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            content.set(area.value());
        })
    };
    let submit_cb = {
        let cb = props.on_submit.clone();
        let content = content.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            cb.emit((*content).clone());
        })
    };
    let cancel_cb = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let backdrop_cb = {
        let cb = props.on_cancel.clone();
        Callback::from(move |e: MouseEvent| {
            if e.target() == e.current_target() {
                cb.emit(());
            }
        })
    };
    let empty = content.trim().is_empty();

    html! {<div onclick={backdrop_cb} style="position:fixed; inset:0; background:rgba(0,0,0,0.2); z-index:50;">
        <div style={format!("position:absolute; left:{left}px; top:{top}px; width:{MODAL_WIDTH}px; background:#fff; color:#111; border:1px solid #ddd; border-radius:6px; box-shadow:0 4px 12px rgba(0,0,0,0.2); padding:14px;")}>
            <div style="font-size:11px; color:#888; margin-bottom:6px;">{ format!("({}, {})", props.world.x, props.world.y) }</div>
            <form onsubmit={submit_cb}>
                <textarea
                    id={TEXT_INPUT_ID}
                    ref={area_ref}
                    rows="4"
                    value={(*content).clone()}
                    {oninput}
                    placeholder="Type your text... (Enter to submit, Shift+Enter for new line)"
                    style="width:100%; box-sizing:border-box; padding:6px 8px; border:1px solid #ccc; border-radius:4px; resize:none; font-size:14px;"
                />
                <div style="display:flex; justify-content:flex-end; gap:8px; margin-top:10px;">
                    <button type="button" onclick={cancel_cb} style="padding:4px 10px;">{"Cancel"}</button>
                    <button type="submit" disabled={empty} style="padding:4px 10px; background:#111; color:#fff; border:none; border-radius:4px;">{"Add"}</button>
                </div>
            </form>
        </div>
    </div>}
}
