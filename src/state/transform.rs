// Screen <-> world mapping. The plane's origin sits at the surface center
// when offset is zero; offset is in world units, zoom scales world to pixels.
use crate::model::{ScreenPoint, WorldPos};

/// Client-space rectangle of the rendering surface, measured per gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns `None` for rectangles that cannot host a transform (unmounted
    /// or collapsed elements report zero or non-finite sizes).
    pub fn measured(left: f64, top: f64, width: f64, height: f64) -> Option<Self> {
        let ok = [left, top, width, height].iter().all(|v| v.is_finite());
        if !ok || width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self::new(left, top, width, height))
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Point relative to the surface center.
    pub fn from_center(&self, p: ScreenPoint) -> ScreenPoint {
        let c = self.center();
        ScreenPoint::new(p.x - c.x, p.y - c.y)
    }
}

/// Continuous world coordinates of a screen point.
pub fn screen_to_world_f(
    offset: ScreenPoint,
    zoom: f64,
    screen: ScreenPoint,
    center: ScreenPoint,
) -> ScreenPoint {
    ScreenPoint::new(
        (screen.x - center.x) / zoom - offset.x,
        (screen.y - center.y) / zoom - offset.y,
    )
}

pub fn screen_to_world(
    offset: ScreenPoint,
    zoom: f64,
    screen: ScreenPoint,
    center: ScreenPoint,
) -> WorldPos {
    let w = screen_to_world_f(offset, zoom, screen, center);
    WorldPos::new(round_half_up(w.x), round_half_up(w.y))
}

pub fn world_to_screen(
    offset: ScreenPoint,
    zoom: f64,
    world: ScreenPoint,
    center: ScreenPoint,
) -> ScreenPoint {
    ScreenPoint::new(
        center.x + (offset.x + world.x) * zoom,
        center.y + (offset.y + world.y) * zoom,
    )
}

// Ties round toward +inf: -2.5 -> -2, 2.5 -> 3.
pub(crate) fn round_half_up(v: f64) -> i32 {
    let f = v.floor();
    if v - f >= 0.5 {
        (f + 1.0) as i32
    } else {
        f as i32
    }
}
