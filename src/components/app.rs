use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::board_view::BoardView;
use crate::config::BoardConfig;
use crate::model::{NewTextEntry, TextEntry};
use crate::store::{EntryStore, Store};

type EntriesHandle = UseStateHandle<Option<Rc<Vec<TextEntry>>>>;
type ErrorHandle = UseStateHandle<Option<String>>;

/// Replace the displayed entries with a fresh listing from the store.
fn refresh(store: Store, entries: EntriesHandle, error: ErrorHandle) {
    spawn_local(async move {
        match store.fetch_all().await {
            Ok(list) => {
                info!(count = list.len(), "entries loaded");
                entries.set(Some(Rc::new(list)));
            }
            Err(e) => {
                warn!(error = %e, "could not load entries");
                // keep whatever is already on screen
                if entries.is_none() {
                    entries.set(Some(Rc::new(Vec::new())));
                }
                error.set(Some(e.to_string()));
            }
        }
    });
}

#[function_component(App)]
pub fn app() -> Html {
    let store = use_state(|| BoardConfig::load().build_store());
    let entries: EntriesHandle = use_state(|| None);
    let error: ErrorHandle = use_state(|| None);

    // Initial load
    {
        let store = store.clone();
        let entries = entries.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            refresh((*store).clone(), entries, error);
            || ()
        });
    }

    let on_create = {
        let store = store.clone();
        let entries = entries.clone();
        let error = error.clone();
        Callback::from(move |entry: NewTextEntry| {
            let store = (*store).clone();
            let entries = entries.clone();
            let error = error.clone();
            spawn_local(async move {
                match store.create(entry).await {
                    Ok(created) => {
                        info!(id = %created.id, x = created.x, y = created.y, "entry created");
                        refresh(store, entries, error);
                    }
                    Err(e) => {
                        warn!(error = %e, "entry was not saved");
                        error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let on_dismiss = {
        let error = error.clone();
        Callback::from(move |_| error.set(None))
    };

    let banner = match &*error {
        Some(msg) => html! {
            <div style="position:fixed; top:16px; left:50%; transform:translateX(-50%); background:#fee2e2; color:#991b1b; border:1px solid #fca5a5; padding:8px 12px; border-radius:6px; font-size:13px; z-index:60; display:flex; gap:12px; align-items:center;">
                <span>{ msg.clone() }</span>
                <button onclick={on_dismiss} style="background:none; border:none; color:#991b1b; cursor:pointer; font-size:14px;">{"✕"}</button>
            </div>
        },
        None => html! {},
    };

    match &*entries {
        Some(list) => html! {
            <>
                <BoardView entries={list.clone()} {on_create} />
                { banner }
            </>
        },
        None => html! {
            <div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; font-family:sans-serif; color:#6b7280;">
                {"Loading canvas..."}
                { banner }
            </div>
        },
    }
}
