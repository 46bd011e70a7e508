use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Element id the board's key handler uses to recognise goto input focus.
pub const GOTO_INPUT_ID: &str = "goto-input";

#[derive(Properties, PartialEq, Clone)]
pub struct GotoPanelProps {
    pub show: bool,
    pub on_go: Callback<String>,
    pub on_cancel: Callback<()>,
}

#[function_component]
pub fn GotoPanel(props: &GotoPanelProps) -> Html {
    let value = use_state(String::new);
    let input_ref = use_node_ref();

    {
        let input_ref = input_ref.clone();
        let value = value.clone();
        use_effect_with(props.show, move |show| {
            if *show {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            } else {
                value.set(String::new());
            }
            || ()
        });
    }

    if !props.show {
        return html! {};
    }

    let oninput = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            value.set(input.value());
        })
    };
    let go_cb = {
        let cb = props.on_go.clone();
        let value = value.clone();
        Callback::from(move |_| cb.emit((*value).clone()))
    };
    let cancel_cb = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {<div style="position:fixed; top:64px; right:16px; background:#fff; color:#111; border:1px solid #ddd; border-radius:6px; box-shadow:0 4px 12px rgba(0,0,0,0.15); padding:12px; z-index:30;">
        <input
            id={GOTO_INPUT_ID}
            ref={input_ref}
            type="text"
            value={(*value).clone()}
            {oninput}
            placeholder="x, y (e.g. 100, -50)"
            style="width:190px; padding:4px 8px; border:1px solid #ccc; border-radius:4px; font-size:13px;"
        />
        <div style="display:flex; gap:8px; margin-top:8px;">
            <button onclick={go_cb} style="padding:4px 12px; background:#3b82f6; color:#fff; border:none; border-radius:4px;">{"Go"}</button>
            <button onclick={cancel_cb} style="padding:4px 12px; background:#6b7280; color:#fff; border:none; border-radius:4px;">{"Cancel"}</button>
        </div>
    </div>}
}
