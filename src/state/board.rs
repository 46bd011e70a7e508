use crate::model::{NewTextEntry, ScreenPoint, TextEntry, WorldPos};

use super::camera::{BUTTON_STEP, Viewport, ZoomDirection, ZoomOutcome};
use super::goto::parse_goto;
use super::touch::{GestureAction, InteractionSession, MouseButton};
use super::transform::{self, Surface};

/// Where a key press landed.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyFocus {
    Board,
    GotoInput(String),
    TextInput(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    MouseDown {
        button: MouseButton,
        client: ScreenPoint,
    },
    /// Window-level move, delivered only while a drag subscription is held.
    MouseMove { client: ScreenPoint },
    MouseUp { client: ScreenPoint },
    /// Pointer moving over the surface, for the coordinate readout.
    Hover { client: ScreenPoint },
    ContextMenu { client: ScreenPoint },
    Wheel {
        client: ScreenPoint,
        delta_y: f64,
        ctrl: bool,
    },
    TouchStart { touches: u32, client: ScreenPoint },
    TouchMove { touches: u32, client: ScreenPoint },
    TouchEnd { client: ScreenPoint, now_ms: f64 },
    /// `composing` is set while an IME composition owns the key.
    Key {
        key: String,
        shift: bool,
        ctrl: bool,
        composing: bool,
        focus: KeyFocus,
    },
}

/// What the view layer should do after an event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    pub changed: bool,
    pub prevent_default: bool,
    pub create: Option<NewTextEntry>,
}

impl Response {
    fn ignored() -> Self {
        Self::default()
    }

    fn changed(changed: bool) -> Self {
        Self {
            changed,
            ..Self::default()
        }
    }

    fn suppressed() -> Self {
        Self {
            prevent_default: true,
            ..Self::default()
        }
    }

    fn create(entry: NewTextEntry) -> Self {
        Self {
            changed: true,
            prevent_default: true,
            create: Some(entry),
        }
    }

    fn prevent(mut self) -> Self {
        self.prevent_default = true;
        self
    }
}

/// Transient UI state the presentation layer renders from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiFlags {
    pub text_request: Option<WorldPos>,
    pub show_goto: bool,
    pub show_picker: bool,
    pub last_click_world: WorldPos,
    pub cursor_world: WorldPos,
}

/// Single owner of viewport, gesture session and modal flags for one canvas.
#[derive(Debug, Clone, Default)]
pub struct BoardController {
    viewport: Viewport,
    session: InteractionSession,
    flags: UiFlags,
}

impl BoardController {
    pub fn new(entries: &[TextEntry]) -> Self {
        Self {
            viewport: Viewport::for_entries(entries),
            ..Self::default()
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn flags(&self) -> &UiFlags {
        &self.flags
    }

    pub fn show_text_modal(&self) -> bool {
        self.flags.text_request.is_some()
    }

    pub fn show_zoom_confirmation(&self) -> bool {
        self.viewport.pending().is_some()
    }

    pub fn pending_zoom_target(&self) -> Option<f64> {
        self.viewport.pending().map(|p| p.target)
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_mouse_dragging()
    }

    pub fn world_to_screen(&self, world: WorldPos, surface: &Surface) -> ScreenPoint {
        transform::world_to_screen(
            self.viewport.offset(),
            self.viewport.zoom,
            ScreenPoint::new(world.x as f64, world.y as f64),
            surface.center(),
        )
    }

    pub fn screen_to_world(&self, client: ScreenPoint, surface: &Surface) -> WorldPos {
        transform::screen_to_world(
            self.viewport.offset(),
            self.viewport.zoom,
            client,
            surface.center(),
        )
    }

    /// Routes one raw input event. `surface` is measured by the caller at
    /// event time; `None` turns position-dependent gestures into no-ops.
    pub fn handle(&mut self, event: InputEvent, surface: Option<Surface>) -> Response {
        match event {
            InputEvent::MouseDown { button, client } => {
                self.session.mouse_down(button, client);
                Response::changed(self.session.is_mouse_dragging())
            }
            InputEvent::MouseMove { client } => {
                let action = self.session.mouse_move(client);
                self.apply(action, surface)
            }
            InputEvent::MouseUp { client } => {
                let was_dragging = self.session.is_mouse_dragging();
                let action = self.session.mouse_up(client);
                let mut res = self.apply(action, surface);
                res.changed |= was_dragging;
                res
            }
            InputEvent::Hover { client } => {
                let Some(surface) = surface else {
                    return Response::ignored();
                };
                let world = self.screen_to_world(client, &surface);
                let changed = world != self.flags.cursor_world;
                self.flags.cursor_world = world;
                Response::changed(changed)
            }
            InputEvent::ContextMenu { client } => {
                let action = self.session.context_menu(client);
                self.apply(action, surface).prevent()
            }
            InputEvent::Wheel {
                client,
                delta_y,
                ctrl,
            } => {
                if ctrl {
                    return Response::suppressed();
                }
                let Some(surface) = surface else {
                    return Response::suppressed();
                };
                let direction = if delta_y > 0.0 {
                    ZoomDirection::Out
                } else if delta_y < 0.0 {
                    ZoomDirection::In
                } else {
                    return Response::suppressed();
                };
                let anchor = surface.from_center(client);
                let outcome = self.viewport.zoom_at(anchor, direction);
                Response::changed(outcome != ZoomOutcome::Unchanged).prevent()
            }
            InputEvent::TouchStart { touches, client } => {
                self.session.touch_start(touches, client);
                Response::ignored()
            }
            InputEvent::TouchMove { touches, client } => {
                let action = self.session.touch_move(touches, client);
                self.apply(action, surface)
            }
            InputEvent::TouchEnd { client, now_ms } => {
                let action = self.session.touch_end(client, now_ms);
                self.apply(action, surface)
            }
            InputEvent::Key { composing: true, .. } => Response::ignored(),
            InputEvent::Key {
                key,
                shift,
                ctrl,
                focus,
                ..
            } => self.handle_key(&key, shift, ctrl, focus),
        }
    }

    fn apply(&mut self, action: GestureAction, surface: Option<Surface>) -> Response {
        match action {
            GestureAction::None => Response::ignored(),
            GestureAction::Pan { dx, dy } => {
                self.viewport.pan(dx, dy);
                Response::changed(true).prevent()
            }
            GestureAction::DragEnded => Response::suppressed(),
            GestureAction::Click { at } | GestureAction::Secondary { at } => {
                let Some(surface) = surface else {
                    return Response::ignored();
                };
                let world = self.screen_to_world(at, &surface);
                self.flags.last_click_world = world;
                self.open_text_at(world);
                Response::changed(true)
            }
            GestureAction::Tap { at, double } => {
                let Some(surface) = surface else {
                    return Response::suppressed();
                };
                let world = self.screen_to_world(at, &surface);
                self.flags.last_click_world = world;
                if double {
                    self.open_text_at(world);
                }
                Response::changed(true).prevent()
            }
        }
    }

    fn handle_key(&mut self, key: &str, shift: bool, ctrl: bool, focus: KeyFocus) -> Response {
        if ctrl && matches!(key, "+" | "-" | "=" | "0") {
            return Response::suppressed();
        }
        match (key, focus) {
            ("Escape", _) => {
                let changed = self.cancel_text() | self.close_goto();
                Response::changed(changed)
            }
            ("Enter", KeyFocus::GotoInput(input)) if !shift => {
                Response::changed(self.submit_goto(&input)).prevent()
            }
            ("Enter", KeyFocus::TextInput(draft)) if !shift => match self.submit_text(&draft) {
                Some(entry) => Response::create(entry),
                None => Response::suppressed(),
            },
            _ => Response::ignored(),
        }
    }

    pub fn open_text_at(&mut self, world: WorldPos) {
        self.flags.text_request = Some(world);
    }

    pub fn cancel_text(&mut self) -> bool {
        self.flags.text_request.take().is_some()
    }

    /// Closes the text request and returns the entry to create, unless the
    /// trimmed draft is empty, in which case the request stays open.
    pub fn submit_text(&mut self, draft: &str) -> Option<NewTextEntry> {
        let content = draft.trim();
        if content.is_empty() {
            return None;
        }
        let at = self.flags.text_request.take()?;
        Some(NewTextEntry::at(at, content))
    }

    pub fn toggle_goto(&mut self) {
        self.flags.show_goto = !self.flags.show_goto;
    }

    pub fn close_goto(&mut self) -> bool {
        std::mem::replace(&mut self.flags.show_goto, false)
    }

    /// Recenters on the parsed coordinates and closes the panel. Malformed
    /// input leaves everything as it was.
    pub fn submit_goto(&mut self, input: &str) -> bool {
        match parse_goto(input) {
            Ok(target) => {
                self.viewport.goto(target.x as f64, target.y as f64);
                self.flags.show_goto = false;
                tracing::debug!(x = target.x, y = target.y, "goto");
                true
            }
            Err(err) => {
                tracing::debug!(%err, "ignoring goto input");
                false
            }
        }
    }

    pub fn toggle_picker(&mut self) {
        self.flags.show_picker = !self.flags.show_picker;
    }

    /// Places a catalogue element at the last clicked or tapped position.
    pub fn select_element(&mut self, content: &str) -> Option<NewTextEntry> {
        self.flags.show_picker = false;
        if content.trim().is_empty() {
            return None;
        }
        Some(NewTextEntry::at(self.flags.last_click_world, content))
    }

    pub fn zoom_in_button(&mut self) -> bool {
        let outcome = self
            .viewport
            .zoom_by_step(ScreenPoint::default(), ZoomDirection::In, BUTTON_STEP);
        outcome != ZoomOutcome::Unchanged
    }

    pub fn zoom_out_button(&mut self) -> bool {
        let outcome =
            self.viewport
                .zoom_by_step(ScreenPoint::default(), ZoomDirection::Out, BUTTON_STEP);
        outcome != ZoomOutcome::Unchanged
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset_zoom();
    }

    pub fn confirm_zoom(&mut self) -> bool {
        self.viewport.confirm_pending_zoom()
    }

    pub fn cancel_zoom(&mut self) -> bool {
        self.viewport.cancel_pending_zoom()
    }

    pub fn entries_changed(&mut self, entries: &[TextEntry]) -> bool {
        self.viewport.snap_to_entries(entries)
    }

    pub fn end_gestures(&mut self) {
        self.session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::camera::WHEEL_STEP;

    fn surface() -> Option<Surface> {
        Surface::measured(0.0, 0.0, 800.0, 600.0)
    }

    fn p(x: f64, y: f64) -> ScreenPoint {
        ScreenPoint::new(x, y)
    }

    fn click(c: &mut BoardController, at: ScreenPoint) -> Response {
        c.handle(
            InputEvent::MouseDown {
                button: MouseButton::Primary,
                client: at,
            },
            surface(),
        );
        c.handle(InputEvent::MouseUp { client: at }, surface())
    }

    fn key(c: &mut BoardController, key: &str, focus: KeyFocus) -> Response {
        c.handle(
            InputEvent::Key {
                key: key.into(),
                shift: false,
                ctrl: false,
                composing: false,
                focus,
            },
            surface(),
        )
    }

    fn wheel(c: &mut BoardController, delta_y: f64, ctrl: bool) -> Response {
        c.handle(
            InputEvent::Wheel {
                client: p(500.0, 200.0),
                delta_y,
                ctrl,
            },
            surface(),
        )
    }

    #[test]
    fn click_then_submit_creates_entry() {
        let mut c = BoardController::default();
        click(&mut c, p(450.0, 320.0));
        assert_eq!(c.flags().text_request, Some(WorldPos::new(50, 20)));
        let res = key(&mut c, "Enter", KeyFocus::TextInput("  hello \n".into()));
        assert_eq!(
            res.create,
            Some(NewTextEntry {
                content: "hello".into(),
                x: 50,
                y: 20
            })
        );
        assert!(!c.show_text_modal());
    }

    #[test]
    fn empty_submission_is_rejected_and_modal_stays() {
        let mut c = BoardController::default();
        click(&mut c, p(400.0, 300.0));
        assert_eq!(c.submit_text("   "), None);
        assert!(c.show_text_modal());
        assert_eq!(key(&mut c, "Escape", KeyFocus::Board), Response::changed(true));
        assert!(!c.show_text_modal());
    }

    #[test]
    fn drag_release_does_not_open_text() {
        let mut c = BoardController::default();
        c.handle(
            InputEvent::MouseDown {
                button: MouseButton::Primary,
                client: p(100.0, 100.0),
            },
            surface(),
        );
        c.handle(InputEvent::MouseMove { client: p(160.0, 80.0) }, surface());
        c.handle(InputEvent::MouseUp { client: p(160.0, 80.0) }, surface());
        assert!(!c.show_text_modal());
        assert_eq!(c.viewport().offset(), p(60.0, -20.0));
    }

    #[test]
    fn right_click_opens_text_unless_dragging() {
        let mut c = BoardController::default();
        let res = c.handle(InputEvent::ContextMenu { client: p(390.0, 310.0) }, surface());
        assert!(res.prevent_default);
        assert_eq!(c.flags().text_request, Some(WorldPos::new(-10, 10)));
        c.cancel_text();

        c.handle(
            InputEvent::MouseDown {
                button: MouseButton::Primary,
                client: p(0.0, 0.0),
            },
            surface(),
        );
        c.handle(InputEvent::ContextMenu { client: p(390.0, 310.0) }, surface());
        assert!(!c.show_text_modal());
    }

    #[test]
    fn unmeasured_surface_makes_click_a_no_op() {
        let mut c = BoardController::default();
        c.handle(
            InputEvent::MouseDown {
                button: MouseButton::Primary,
                client: p(10.0, 10.0),
            },
            None,
        );
        let res = c.handle(InputEvent::MouseUp { client: p(10.0, 10.0) }, None);
        assert!(res.create.is_none());
        assert!(!c.show_text_modal());
        let unmeasured = c.handle(
            InputEvent::Wheel {
                client: p(1.0, 1.0),
                delta_y: -1.0,
                ctrl: false,
            },
            None,
        );
        assert!(!unmeasured.changed);
        assert_eq!(c.viewport().zoom, 1.0);
    }

    #[test]
    fn ctrl_wheel_is_swallowed() {
        let mut c = BoardController::default();
        let res = wheel(&mut c, -100.0, true);
        assert!(res.prevent_default && !res.changed);
        assert_eq!(c.viewport().zoom, 1.0);
    }

    #[test]
    fn wheel_zoom_out_raises_gate_and_pan_still_works() {
        let mut c = BoardController::default();
        wheel(&mut c, 120.0, false);
        assert!(c.show_zoom_confirmation());
        assert_eq!(c.viewport().zoom, 1.0);
        let target = c.pending_zoom_target().unwrap();
        assert!((target - 1.0 / WHEEL_STEP).abs() < 1e-12);

        c.handle(
            InputEvent::MouseDown {
                button: MouseButton::Primary,
                client: p(0.0, 0.0),
            },
            surface(),
        );
        c.handle(InputEvent::MouseMove { client: p(10.0, 0.0) }, surface());
        assert_eq!(c.viewport().offset(), p(10.0, 0.0));

        assert!(c.confirm_zoom());
        assert!(!c.show_zoom_confirmation());
        assert!(c.viewport().has_zoomed_out_once);
        assert!((c.viewport().zoom - target).abs() < 1e-12);
    }

    #[test]
    fn double_tap_opens_text_and_single_tap_records_position() {
        let mut c = BoardController::default();
        let at = p(420.0, 290.0);
        c.handle(InputEvent::TouchStart { touches: 1, client: at }, surface());
        let res = c.handle(InputEvent::TouchEnd { client: at, now_ms: 1000.0 }, surface());
        assert!(res.prevent_default);
        assert!(!c.show_text_modal());
        assert_eq!(c.flags().last_click_world, WorldPos::new(20, -10));

        c.handle(InputEvent::TouchStart { touches: 1, client: at }, surface());
        c.handle(InputEvent::TouchEnd { client: at, now_ms: 1250.0 }, surface());
        assert_eq!(c.flags().text_request, Some(WorldPos::new(20, -10)));
    }

    #[test]
    fn goto_scenario() {
        let mut c = BoardController::default();
        c.toggle_goto();
        let res = key(&mut c, "Enter", KeyFocus::GotoInput("oops".into()));
        assert!(!res.changed);
        assert!(c.flags().show_goto);

        key(&mut c, "Enter", KeyFocus::GotoInput("100, -50".into()));
        assert_eq!(c.viewport().offset(), p(-100.0, 50.0));
        assert!(!c.flags().show_goto);
    }

    #[test]
    fn escape_closes_goto_without_moving() {
        let mut c = BoardController::default();
        c.handle(InputEvent::Hover { client: p(420.0, 290.0) }, surface());
        c.toggle_goto();
        let before = c.viewport().offset();
        let res = key(&mut c, "Escape", KeyFocus::GotoInput("12, 3".into()));
        assert!(res.changed);
        assert!(!c.flags().show_goto);
        assert_eq!(c.viewport().offset(), before);
        assert_eq!(c.viewport().zoom, 1.0);
    }

    #[test]
    fn enter_confirming_ime_composition_does_not_submit() {
        let mut c = BoardController::default();
        click(&mut c, p(400.0, 300.0));
        let res = c.handle(
            InputEvent::Key {
                key: "Enter".into(),
                shift: false,
                ctrl: false,
                composing: true,
                focus: KeyFocus::TextInput("こんにちは".into()),
            },
            surface(),
        );
        assert_eq!(res, Response::ignored());
        assert!(c.show_text_modal());
        let res = key(&mut c, "Enter", KeyFocus::TextInput("こんにちは".into()));
        assert_eq!(res.create.map(|e| e.content), Some("こんにちは".to_string()));
    }

    #[test]
    fn ctrl_zoom_keys_are_swallowed() {
        let mut c = BoardController::default();
        c.viewport.offset_x = 25.0;
        let before = c.viewport().clone();
        for k in ["+", "-", "=", "0"] {
            let res = c.handle(
                InputEvent::Key {
                    key: k.into(),
                    shift: false,
                    ctrl: true,
                    composing: false,
                    focus: KeyFocus::Board,
                },
                surface(),
            );
            assert!(res.prevent_default, "ctrl+{k}");
            assert!(!res.changed, "ctrl+{k}");
            assert_eq!(c.viewport().offset(), before.offset());
            assert_eq!(c.viewport().zoom, before.zoom);
        }
        assert_eq!(c.pending_zoom_target(), None);
    }

    #[test]
    fn shift_enter_in_goto_does_not_submit() {
        let mut c = BoardController::default();
        c.toggle_goto();
        let res = c.handle(
            InputEvent::Key {
                key: "Enter".into(),
                shift: true,
                ctrl: false,
                composing: false,
                focus: KeyFocus::GotoInput("1, 2".into()),
            },
            surface(),
        );
        assert_eq!(res, Response::ignored());
        assert!(c.flags().show_goto);
    }

    #[test]
    fn picker_places_at_last_click() {
        let mut c = BoardController::default();
        click(&mut c, p(405.0, 295.0));
        c.cancel_text();
        c.toggle_picker();
        let made = c.select_element("🌲");
        assert_eq!(made, Some(NewTextEntry::at(WorldPos::new(5, -5), "🌲")));
        assert!(!c.flags().show_picker);
    }

    #[test]
    fn zoom_buttons_keep_offset() {
        let mut c = BoardController::default();
        c.submit_goto("30, 40");
        assert!(c.zoom_in_button());
        assert_eq!(c.viewport().offset(), p(-30.0, -40.0));
        c.reset_zoom();
        assert_eq!(c.viewport().zoom, 1.0);
        assert!(c.zoom_out_button());
        assert!(c.show_zoom_confirmation());
        assert!(c.cancel_zoom());
        assert_eq!(c.viewport().zoom, 1.0);
    }

    #[test]
    fn hover_updates_cursor_readout() {
        let mut c = BoardController::default();
        let res = c.handle(InputEvent::Hover { client: p(433.0, 250.0) }, surface());
        assert!(res.changed);
        assert_eq!(c.flags().cursor_world, WorldPos::new(33, -50));
    }
}
