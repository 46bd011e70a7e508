use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, EventTarget, HtmlCanvasElement, HtmlInputElement, HtmlTextAreaElement,
};
use yew::prelude::*;

use crate::model::{NewTextEntry, ScreenPoint, TextEntry, WorldPos};
use crate::state::{
    BoardController, InputEvent as BoardInput, KeyFocus, MouseButton, Surface, Viewport, transform,
};
use crate::util::now_ms;

use super::{
    element_picker::ElementPicker,
    goto_panel::{GOTO_INPUT_ID, GotoPanel},
    status_bar::StatusBar,
    text_input_modal::{TEXT_INPUT_ID, TextInputModal},
    zoom_confirm_modal::ZoomConfirmModal,
    zoom_controls::ZoomControls,
};

/// World distance between background dots.
const GRID_WORLD: f64 = 20.0;
const CULL_MARGIN: f64 = 200.0;

#[derive(Properties, PartialEq, Clone)]
pub struct BoardViewProps {
    pub entries: Rc<Vec<TextEntry>>,
    pub on_create: Callback<NewTextEntry>,
}

/// Window-level listeners held only while a mouse drag is in progress.
struct DragSubscription {
    _move: EventListener,
    _up: EventListener,
}

/// Shared access to the controller for listeners and child callbacks.
#[derive(Clone)]
struct BoardHandle {
    canvas: NodeRef,
    controller: Rc<RefCell<BoardController>>,
    draw: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
    on_create: Rc<RefCell<Callback<NewTextEntry>>>,
    force: UseForceUpdateHandle,
}

impl BoardHandle {
    fn surface(&self) -> Option<Surface> {
        let canvas = self.canvas.cast::<HtmlCanvasElement>()?;
        if !canvas.is_connected() {
            return None;
        }
        let r = canvas.get_bounding_client_rect();
        Surface::measured(r.left(), r.top(), r.width(), r.height())
    }

    fn dispatch(&self, input: BoardInput, event: &Event) {
        let surface = self.surface();
        let res = self.controller.borrow_mut().handle(input, surface);
        if res.prevent_default {
            event.prevent_default();
        }
        self.after(res.changed, res.create);
    }

    fn update(&self, f: impl FnOnce(&mut BoardController) -> Option<NewTextEntry>) {
        let created = f(&mut self.controller.borrow_mut());
        self.after(true, created);
    }

    fn after(&self, changed: bool, created: Option<NewTextEntry>) {
        if let Some(entry) = created {
            tracing::debug!(x = entry.x, y = entry.y, "requesting new entry");
            self.on_create.borrow().emit(entry);
        }
        if changed {
            self.redraw();
            self.force.force_update();
        }
    }

    fn redraw(&self) {
        if let Some(f) = &*self.draw.borrow() {
            f();
        }
    }

    fn is_dragging(&self) -> bool {
        self.controller.borrow().is_dragging()
    }
}

/// Listener allowed to call `prevent_default`.
fn active_listener(
    target: &EventTarget,
    event_type: &'static str,
    callback: impl FnMut(&Event) + 'static,
) -> EventListener {
    let options = EventListenerOptions::enable_prevent_default();
    EventListener::new_with_options(target, event_type, options, callback)
}

fn client_point(e: &MouseEvent) -> ScreenPoint {
    ScreenPoint::new(e.client_x() as f64, e.client_y() as f64)
}

fn touch_point(t: &web_sys::Touch) -> ScreenPoint {
    ScreenPoint::new(t.client_x() as f64, t.client_y() as f64)
}

fn key_focus() -> KeyFocus {
    let active = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.active_element());
    let Some(el) = active else {
        return KeyFocus::Board;
    };
    match el.id().as_str() {
        GOTO_INPUT_ID => el
            .dyn_into::<HtmlInputElement>()
            .map(|i| KeyFocus::GotoInput(i.value()))
            .unwrap_or(KeyFocus::Board),
        TEXT_INPUT_ID => el
            .dyn_into::<HtmlTextAreaElement>()
            .map(|t| KeyFocus::TextInput(t.value()))
            .unwrap_or(KeyFocus::Board),
        _ => KeyFocus::Board,
    }
}

fn start_drag(handle: &BoardHandle, slot: &Rc<RefCell<Option<DragSubscription>>>) {
    if slot.borrow().is_some() || !handle.is_dragging() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let move_handle = handle.clone();
    let on_move = EventListener::new(&window, "mousemove", move |e| {
        if let Some(m) = e.dyn_ref::<MouseEvent>() {
            move_handle.dispatch(BoardInput::MouseMove { client: client_point(m) }, e);
        }
    });
    let up_handle = handle.clone();
    let up_slot = slot.clone();
    let on_up = EventListener::new(&window, "mouseup", move |e| {
        if let Some(m) = e.dyn_ref::<MouseEvent>() {
            up_handle.dispatch(BoardInput::MouseUp { client: client_point(m) }, e);
        }
        if !up_handle.is_dragging() {
            if let Some(sub) = up_slot.borrow_mut().take() {
                // this listener is still running; release it after the event
                wasm_bindgen_futures::spawn_local(async move { drop(sub) });
            }
        }
    });
    *slot.borrow_mut() = Some(DragSubscription {
        _move: on_move,
        _up: on_up,
    });
}

fn paint(ctx: &CanvasRenderingContext2d, w: f64, h: f64, vp: &Viewport, entries: &[TextEntry]) {
    let center = Surface::new(0.0, 0.0, w, h).center();
    let offset = vp.offset();
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_fill_style_str("#fefefe");
    ctx.fill_rect(0.0, 0.0, w, h);

    let spacing = GRID_WORLD * vp.zoom;
    if spacing >= 6.0 {
        let origin = transform::world_to_screen(offset, vp.zoom, ScreenPoint::default(), center);
        ctx.set_fill_style_str("rgba(0,0,0,0.08)");
        let mut x = origin.x.rem_euclid(spacing);
        while x < w {
            let mut y = origin.y.rem_euclid(spacing);
            while y < h {
                ctx.fill_rect(x, y, 1.0, 1.0);
                y += spacing;
            }
            x += spacing;
        }
    }

    let font_px = 16.0 * vp.zoom;
    let label_px = 12.0 * vp.zoom;
    let line_h = font_px * 1.25;
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let mut ordered: Vec<&TextEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| e.created_at);
    for e in ordered {
        let pos = e.position();
        let world = ScreenPoint::new(pos.x as f64, pos.y as f64);
        let p = transform::world_to_screen(offset, vp.zoom, world, center);
        let lines: Vec<&str> = e.content.split('\n').collect();
        let block_h = line_h * lines.len() as f64;
        if p.x < -CULL_MARGIN
            || p.x > w + CULL_MARGIN
            || p.y + block_h < -CULL_MARGIN
            || p.y - block_h > h + CULL_MARGIN
        {
            continue;
        }
        ctx.set_font(&format!("{font_px}px sans-serif"));
        ctx.set_fill_style_str("#1f2328");
        let first = p.y - block_h / 2.0 + line_h / 2.0;
        for (i, line) in lines.iter().enumerate() {
            ctx.fill_text(line, p.x, first + i as f64 * line_h).ok();
        }
        ctx.set_font(&format!("{label_px}px sans-serif"));
        ctx.set_fill_style_str("#9ca3af");
        let label = format!("({}, {})", pos.x, pos.y);
        ctx.fill_text(&label, p.x, p.y + block_h / 2.0 + label_px).ok();
    }

    // center crosshair
    ctx.set_fill_style_str("#9ca3af");
    ctx.fill_rect(center.x - 8.0, center.y - 1.0, 16.0, 2.0);
    ctx.fill_rect(center.x - 1.0, center.y - 8.0, 2.0, 16.0);
}

#[function_component(BoardView)]
pub fn board_view(props: &BoardViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let controller = use_mut_ref(|| BoardController::new(&props.entries));
    let entries_ref = use_mut_ref(|| props.entries.clone());
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let on_create_ref = use_mut_ref(|| props.on_create.clone());
    let drag_slot = use_mut_ref(|| None::<DragSubscription>);
    let force = use_force_update();

    let handle = BoardHandle {
        canvas: canvas_ref.clone(),
        controller: controller.clone(),
        draw: draw_ref.clone(),
        on_create: on_create_ref.clone(),
        force,
    };

    // Effect: keep the latest create callback for listeners bound at mount
    {
        let on_create_ref = on_create_ref.clone();
        use_effect_with(props.on_create.clone(), move |cb| {
            *on_create_ref.borrow_mut() = cb.clone();
            || ()
        });
    }
    // Effect: new entry list
    {
        let entries_ref = entries_ref.clone();
        let handle = handle.clone();
        use_effect_with(props.entries.clone(), move |entries| {
            *entries_ref.borrow_mut() = entries.clone();
            handle.redraw();
            || ()
        });
    }
    // Effect: entry count changed, snap to content if the board was never moved
    {
        let handle = handle.clone();
        let entries = props.entries.clone();
        use_effect_with(props.entries.len(), move |_| {
            let snapped = handle.controller.borrow_mut().entries_changed(&entries);
            if snapped {
                handle.after(true, None);
            }
            || ()
        });
    }
    // Main mount effect (draw closure, listeners)
    {
        let handle = handle.clone();
        let entries_ref = entries_ref.clone();
        let drag_slot = drag_slot.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let canvas = handle.canvas.cast::<HtmlCanvasElement>();
            let mut listeners: Vec<EventListener> = Vec::new();
            if let (Some(window), Some(canvas)) = (window, canvas) {
                let fit_canvas = {
                    let canvas = canvas.clone();
                    move || {
                        let w = canvas.client_width().max(0) as u32;
                        let h = canvas.client_height().max(0) as u32;
                        if canvas.width() != w {
                            canvas.set_width(w);
                        }
                        if canvas.height() != h {
                            canvas.set_height(h);
                        }
                    }
                };
                fit_canvas();

                let draw_closure: Rc<dyn Fn()> = {
                    let canvas = canvas.clone();
                    let controller = handle.controller.clone();
                    let entries_ref = entries_ref.clone();
                    Rc::new(move || {
                        if !canvas.is_connected() {
                            return;
                        }
                        let ctx = match canvas.get_context("2d").ok().flatten() {
                            Some(c) => match c.dyn_into::<CanvasRenderingContext2d>() {
                                Ok(ctx) => ctx,
                                Err(_) => return,
                            },
                            None => return,
                        };
                        let c = controller.borrow();
                        let entries = entries_ref.borrow();
                        paint(
                            &ctx,
                            canvas.width() as f64,
                            canvas.height() as f64,
                            c.viewport(),
                            &entries,
                        );
                    })
                };
                *handle.draw.borrow_mut() = Some(draw_closure);
                handle.redraw();

                let h = handle.clone();
                let slot = drag_slot.clone();
                listeners.push(EventListener::new(&canvas, "mousedown", move |e| {
                    if let Some(m) = e.dyn_ref::<MouseEvent>() {
                        let button = MouseButton::from_dom(m.button());
                        if button == MouseButton::Primary {
                            e.prevent_default();
                        }
                        h.dispatch(BoardInput::MouseDown { button, client: client_point(m) }, e);
                        start_drag(&h, &slot);
                    }
                }));
                let h = handle.clone();
                listeners.push(EventListener::new(&canvas, "mousemove", move |e| {
                    if let Some(m) = e.dyn_ref::<MouseEvent>() {
                        h.dispatch(BoardInput::Hover { client: client_point(m) }, e);
                    }
                }));
                let h = handle.clone();
                listeners.push(active_listener(&canvas, "contextmenu", move |e| {
                    if let Some(m) = e.dyn_ref::<MouseEvent>() {
                        h.dispatch(BoardInput::ContextMenu { client: client_point(m) }, e);
                    }
                }));
                let h = handle.clone();
                listeners.push(active_listener(&canvas, "wheel", move |e| {
                    if let Some(w) = e.dyn_ref::<WheelEvent>() {
                        let client = ScreenPoint::new(w.client_x() as f64, w.client_y() as f64);
                        h.dispatch(
                            BoardInput::Wheel {
                                client,
                                delta_y: w.delta_y(),
                                ctrl: w.ctrl_key(),
                            },
                            e,
                        );
                    }
                }));
                let h = handle.clone();
                listeners.push(active_listener(&canvas, "touchstart", move |e| {
                    if let Some(t) = e.dyn_ref::<TouchEvent>() {
                        let touches = t.touches();
                        if let Some(t0) = touches.item(0) {
                            h.dispatch(
                                BoardInput::TouchStart {
                                    touches: touches.length(),
                                    client: touch_point(&t0),
                                },
                                e,
                            );
                        }
                    }
                }));
                let h = handle.clone();
                listeners.push(active_listener(&canvas, "touchmove", move |e| {
                    if let Some(t) = e.dyn_ref::<TouchEvent>() {
                        let touches = t.touches();
                        if let Some(t0) = touches.item(0) {
                            h.dispatch(
                                BoardInput::TouchMove {
                                    touches: touches.length(),
                                    client: touch_point(&t0),
                                },
                                e,
                            );
                        }
                    }
                }));
                let h = handle.clone();
                listeners.push(active_listener(&canvas, "touchend", move |e| {
                    if let Some(t) = e.dyn_ref::<TouchEvent>() {
                        if let Some(t0) = t.changed_touches().item(0) {
                            h.dispatch(
                                BoardInput::TouchEnd {
                                    client: touch_point(&t0),
                                    now_ms: now_ms(),
                                },
                                e,
                            );
                        }
                    }
                }));
                let h = handle.clone();
                listeners.push(EventListener::new(&canvas, "touchcancel", move |_e| {
                    h.update(|c| {
                        c.end_gestures();
                        None
                    });
                }));
                let h = handle.clone();
                listeners.push(EventListener::new(&window, "keydown", move |e| {
                    if let Some(k) = e.dyn_ref::<KeyboardEvent>() {
                        h.dispatch(
                            BoardInput::Key {
                                key: k.key(),
                                shift: k.shift_key(),
                                ctrl: k.ctrl_key() || k.meta_key(),
                                composing: k.is_composing(),
                                focus: key_focus(),
                            },
                            e,
                        );
                    }
                }));
                // Browser page zoom (ctrl+wheel) is swallowed everywhere, not just over the board.
                listeners.push(active_listener(&window, "wheel", |e| {
                    if e.dyn_ref::<WheelEvent>().is_some_and(|w| w.ctrl_key()) {
                        e.prevent_default();
                    }
                }));
                let h = handle.clone();
                listeners.push(EventListener::new(&window, "resize", move |_e| {
                    fit_canvas();
                    h.redraw();
                }));
            }

            let handle = handle.clone();
            move || {
                drop(listeners);
                drop(drag_slot.borrow_mut().take());
                handle.controller.borrow_mut().end_gestures();
                *handle.draw.borrow_mut() = None;
            }
        });
    }

    let c = controller.borrow();
    let vp = c.viewport();
    let flags = c.flags().clone();
    let center = WorldPos::new(
        transform::round_half_up(-vp.offset_x),
        transform::round_half_up(-vp.offset_y),
    );
    let zoom = vp.zoom;
    let pending = c.pending_zoom_target();
    let text_modal = flags.text_request.map(|world| {
        let anchor = handle
            .surface()
            .map(|s| c.world_to_screen(world, &s))
            .unwrap_or_default();
        (world, anchor)
    });
    let cursor_style = if c.is_dragging() {
        "grabbing"
    } else if c.show_text_modal() || c.show_zoom_confirmation() {
        "default"
    } else {
        "crosshair"
    };
    drop(c);

    let on_zoom_in = {
        let h = handle.clone();
        Callback::from(move |_| {
            h.update(|c| {
                c.zoom_in_button();
                None
            })
        })
    };
    let on_zoom_out = {
        let h = handle.clone();
        Callback::from(move |_| {
            h.update(|c| {
                c.zoom_out_button();
                None
            })
        })
    };
    let on_reset = {
        let h = handle.clone();
        Callback::from(move |_| {
            h.update(|c| {
                c.reset_zoom();
                None
            })
        })
    };
    let on_toggle_goto = {
        let h = handle.clone();
        Callback::from(move |_| {
            h.update(|c| {
                c.toggle_goto();
                None
            })
        })
    };
    let on_goto = {
        let h = handle.clone();
        Callback::from(move |input: String| {
            h.update(|c| {
                c.submit_goto(&input);
                None
            })
        })
    };
    let on_goto_cancel = {
        let h = handle.clone();
        Callback::from(move |_| {
            h.update(|c| {
                c.close_goto();
                None
            })
        })
    };
    let on_confirm_zoom = {
        let h = handle.clone();
        Callback::from(move |_| {
            h.update(|c| {
                c.confirm_zoom();
                None
            })
        })
    };
    let on_cancel_zoom = {
        let h = handle.clone();
        Callback::from(move |_| {
            h.update(|c| {
                c.cancel_zoom();
                None
            })
        })
    };
    let on_toggle_picker = {
        let h = handle.clone();
        Callback::from(move |_| {
            h.update(|c| {
                c.toggle_picker();
                None
            })
        })
    };
    let on_select_element = {
        let h = handle.clone();
        Callback::from(move |content: &'static str| h.update(|c| c.select_element(content)))
    };
    let on_submit_text = {
        let h = handle.clone();
        Callback::from(move |draft: String| h.update(|c| c.submit_text(&draft)))
    };
    let on_cancel_text = {
        let h = handle.clone();
        Callback::from(move |_| {
            h.update(|c| {
                c.cancel_text();
                None
            })
        })
    };

    html! {
        <div style="position:fixed; inset:0; overflow:hidden; user-select:none;">
            <canvas
                ref={canvas_ref}
                style={format!("position:absolute; inset:0; width:100%; height:100%; display:block; touch-action:none; cursor:{cursor_style};")}
            />
            <StatusBar {center} cursor={flags.cursor_world} {zoom} />
            <ZoomControls {on_zoom_in} {on_zoom_out} {on_reset} {on_toggle_goto} />
            <GotoPanel show={flags.show_goto} on_go={on_goto} on_cancel={on_goto_cancel} />
            <button
                onclick={on_toggle_picker.reform(|_: MouseEvent| ())}
                style="position:fixed; right:16px; bottom:16px; background:#16a34a; color:#fff; border:none; padding:8px 16px; border-radius:6px; font-size:13px; cursor:pointer; z-index:40;"
            >
                {"🗺️ Map Elements"}
            </button>
            <ElementPicker show={flags.show_picker} on_select={on_select_element} on_close={on_toggle_picker} />
            <ZoomConfirmModal {pending} on_confirm={on_confirm_zoom} on_cancel={on_cancel_zoom} />
            { if let Some((world, anchor)) = text_modal {
                html! { <TextInputModal {world} {anchor} on_submit={on_submit_text} on_cancel={on_cancel_text} /> }
            } else { html! {} } }
        </div>
    }
}
