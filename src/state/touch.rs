// Pointer gesture classification: mouse drag vs click, touch pan vs tap vs
// double-tap. Pure over screen points and millisecond timestamps; the board
// controller turns the resulting actions into viewport or modal changes.
use crate::model::ScreenPoint;

/// Movement (per axis, in pixels) a touch or press may make and still count as a tap.
pub const TAP_SLOP_PX: f64 = 3.0;
/// Two taps closer together than this open the text entry.
pub const DOUBLE_TAP_MS: f64 = 300.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Other,
}

impl MouseButton {
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            2 => Self::Secondary,
            _ => Self::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        start: ScreenPoint,
        last: ScreenPoint,
    },
    TouchIdle,
    TouchTracking {
        start: ScreenPoint,
    },
    TouchDragging {
        last: ScreenPoint,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureAction {
    None,
    Pan { dx: f64, dy: f64 },
    Click { at: ScreenPoint },
    Secondary { at: ScreenPoint },
    Tap { at: ScreenPoint, double: bool },
    /// A touch drag ended; any click the browser synthesizes must be dropped.
    DragEnded,
}

/// One active gesture at a time plus the tap history that outlives it.
#[derive(Debug, Clone, Default)]
pub struct InteractionSession {
    state: GestureState,
    last_tap_ms: Option<f64>,
}

impl InteractionSession {
    pub fn is_mouse_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    pub fn mouse_down(&mut self, button: MouseButton, at: ScreenPoint) -> GestureAction {
        if button != MouseButton::Primary || self.is_active() {
            return GestureAction::None;
        }
        self.state = GestureState::Dragging {
            start: at,
            last: at,
        };
        GestureAction::None
    }

    pub fn mouse_move(&mut self, at: ScreenPoint) -> GestureAction {
        let GestureState::Dragging { start, last } = self.state else {
            return GestureAction::None;
        };
        self.state = GestureState::Dragging { start, last: at };
        GestureAction::Pan {
            dx: at.x - last.x,
            dy: at.y - last.y,
        }
    }

    pub fn mouse_up(&mut self, at: ScreenPoint) -> GestureAction {
        let GestureState::Dragging { start, .. } = self.state else {
            return GestureAction::None;
        };
        self.state = GestureState::Idle;
        if within_slop(start, at) {
            GestureAction::Click { at }
        } else {
            GestureAction::None
        }
    }

    pub fn context_menu(&mut self, at: ScreenPoint) -> GestureAction {
        if self.is_active() {
            return GestureAction::None;
        }
        GestureAction::Secondary { at }
    }

    pub fn touch_start(&mut self, touches: u32, at: ScreenPoint) -> GestureAction {
        if self.is_mouse_dragging() {
            return GestureAction::None;
        }
        self.state = if touches == 1 {
            GestureState::TouchTracking { start: at }
        } else {
            // a second finger turns the gesture into something that is neither a tap nor a pan
            GestureState::TouchIdle
        };
        GestureAction::None
    }

    pub fn touch_move(&mut self, touches: u32, at: ScreenPoint) -> GestureAction {
        if touches != 1 {
            return GestureAction::None;
        }
        match self.state {
            GestureState::TouchTracking { start } => {
                if within_slop(start, at) {
                    return GestureAction::None;
                }
                self.state = GestureState::TouchDragging { last: at };
                GestureAction::Pan {
                    dx: at.x - start.x,
                    dy: at.y - start.y,
                }
            }
            GestureState::TouchDragging { last } => {
                self.state = GestureState::TouchDragging { last: at };
                GestureAction::Pan {
                    dx: at.x - last.x,
                    dy: at.y - last.y,
                }
            }
            _ => GestureAction::None,
        }
    }

    pub fn touch_end(&mut self, at: ScreenPoint, now_ms: f64) -> GestureAction {
        match self.state {
            GestureState::TouchDragging { .. } => {
                self.state = GestureState::TouchIdle;
                GestureAction::DragEnded
            }
            GestureState::TouchTracking { .. } => {
                self.state = GestureState::TouchIdle;
                let double = self
                    .last_tap_ms
                    .map(|prev| now_ms - prev)
                    .is_some_and(|dt| dt > 0.0 && dt < DOUBLE_TAP_MS);
                self.last_tap_ms = Some(now_ms);
                GestureAction::Tap { at, double }
            }
            _ => GestureAction::None,
        }
    }

    /// Drops any in-flight gesture, e.g. when the surface is torn down.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }

    fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle | GestureState::TouchIdle)
    }
}

fn within_slop(a: ScreenPoint, b: ScreenPoint) -> bool {
    (b.x - a.x).abs() <= TAP_SLOP_PX && (b.y - a.y).abs() <= TAP_SLOP_PX
}
