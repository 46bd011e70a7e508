// Viewport: pan offset, zoom factor, and the first-zoom-out confirmation gate.
use crate::model::{ScreenPoint, TextEntry};

use super::transform;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;
/// Multiplier applied per wheel tick.
pub const WHEEL_STEP: f64 = 1.1;
/// Multiplier applied per zoom button press.
pub const BUTTON_STEP: f64 = 1.2;
const SNAP_FACTOR: f64 = 0.3;
const SNAP_LIMIT: f64 = 200.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// A zoom factor held back until the user confirms zooming below 100%.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingZoom {
    pub target: f64,
    /// Anchor relative to the surface center, captured at gesture time.
    pub anchor: ScreenPoint,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomOutcome {
    Applied,
    Unchanged,
    NeedsConfirmation(PendingZoom),
}

#[derive(Debug, Clone)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub zoom: f64,
    pub has_zoomed_out_once: bool,
    pending: Option<PendingZoom>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
            has_zoomed_out_once: false,
            pending: None,
        }
    }
}

impl Viewport {
    /// Starts near existing content so first-time viewers see something.
    pub fn for_entries(entries: &[TextEntry]) -> Self {
        let (offset_x, offset_y) = initial_offset(entries);
        Self {
            offset_x,
            offset_y,
            ..Self::default()
        }
    }

    pub fn offset(&self) -> ScreenPoint {
        ScreenPoint::new(self.offset_x, self.offset_y)
    }

    pub fn pending(&self) -> Option<PendingZoom> {
        self.pending
    }

    /// Re-snaps to content when the entry list changes, but only while the
    /// offset is still exactly the origin.
    pub fn snap_to_entries(&mut self, entries: &[TextEntry]) -> bool {
        if self.offset_x == 0.0 && self.offset_y == 0.0 && !entries.is_empty() {
            let (x, y) = initial_offset(entries);
            self.offset_x = x;
            self.offset_y = y;
            tracing::debug!(x, y, "snapped viewport to existing entries");
            return true;
        }
        false
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx / self.zoom;
        self.offset_y += dy / self.zoom;
    }

    /// Next zoom for one step in `direction`, clamped.
    pub fn stepped_zoom(&self, direction: ZoomDirection, step: f64) -> f64 {
        match direction {
            ZoomDirection::In => (self.zoom * step).min(MAX_ZOOM),
            ZoomDirection::Out => (self.zoom / step).max(MIN_ZOOM),
        }
    }

    /// Zooms one wheel tick about `anchor` (relative to the surface center),
    /// through the first-zoom-out gate.
    pub fn zoom_at(&mut self, anchor: ScreenPoint, direction: ZoomDirection) -> ZoomOutcome {
        self.zoom_by_step(anchor, direction, WHEEL_STEP)
    }

    pub fn zoom_by_step(
        &mut self,
        anchor: ScreenPoint,
        direction: ZoomDirection,
        step: f64,
    ) -> ZoomOutcome {
        let target = self.stepped_zoom(direction, step);
        self.zoom_out_gate(anchor, target)
    }

    /// Applies `target` unless this is the first crossing from >= 1.0 to
    /// below 1.0, in which case it is parked as a [`PendingZoom`].
    pub fn zoom_out_gate(&mut self, anchor: ScreenPoint, target: f64) -> ZoomOutcome {
        let target = target.clamp(MIN_ZOOM, MAX_ZOOM);
        if target == self.zoom {
            return ZoomOutcome::Unchanged;
        }
        if !self.has_zoomed_out_once && target < 1.0 && self.zoom >= 1.0 {
            let pending = PendingZoom { target, anchor };
            self.pending = Some(pending);
            tracing::info!(zoom = target, "zoom below 100% awaiting confirmation");
            return ZoomOutcome::NeedsConfirmation(pending);
        }
        self.apply_zoom_about(anchor, target);
        ZoomOutcome::Applied
    }

    pub fn confirm_pending_zoom(&mut self) -> bool {
        let Some(PendingZoom { target, anchor }) = self.pending.take() else {
            return false;
        };
        self.apply_zoom_about(anchor, target);
        self.has_zoomed_out_once = true;
        tracing::info!(zoom = self.zoom, "zoom out confirmed");
        true
    }

    pub fn cancel_pending_zoom(&mut self) -> bool {
        let had = self.pending.take().is_some();
        if had {
            tracing::info!("zoom out cancelled");
        }
        had
    }

    /// Centers `target` (continuous world coordinates) on screen.
    pub fn goto(&mut self, x: f64, y: f64) {
        self.offset_x = -x;
        self.offset_y = -y;
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    fn apply_zoom_about(&mut self, anchor: ScreenPoint, new_zoom: f64) {
        let new_zoom = new_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        // anchor is center-relative, so the center itself is the origin here.
        let origin = ScreenPoint::default();
        let world = transform::screen_to_world_f(self.offset(), self.zoom, anchor, origin);
        self.offset_x = anchor.x / new_zoom - world.x;
        self.offset_y = anchor.y / new_zoom - world.y;
        self.zoom = new_zoom;
    }
}

fn initial_offset(entries: &[TextEntry]) -> (f64, f64) {
    if entries.is_empty() {
        return (0.0, 0.0);
    }
    let n = entries.len() as f64;
    let avg_x = entries.iter().map(|e| e.x as f64).sum::<f64>() / n;
    let avg_y = entries.iter().map(|e| e.y as f64).sum::<f64>() / n;
    (
        (-avg_x * SNAP_FACTOR).clamp(-SNAP_LIMIT, SNAP_LIMIT),
        (-avg_y * SNAP_FACTOR).clamp(-SNAP_LIMIT, SNAP_LIMIT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(x: i32, y: i32) -> TextEntry {
        TextEntry {
            id: format!("{x}:{y}"),
            content: "note".into(),
            x,
            y,
            created_at: Utc::now(),
        }
    }

    fn assert_close(p: ScreenPoint, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9, "{p:?} != ({x}, {y})");
    }

    fn world_under(vp: &Viewport, anchor: ScreenPoint) -> ScreenPoint {
        transform::screen_to_world_f(vp.offset(), vp.zoom, anchor, ScreenPoint::default())
    }

    #[test]
    fn anchor_stays_fixed_through_zoom_ticks() {
        let anchors = [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(-390.0, 280.0),
            ScreenPoint::new(123.4, -56.7),
        ];
        for anchor in anchors {
            let mut vp = Viewport {
                offset_x: 37.5,
                offset_y: -812.0,
                has_zoomed_out_once: true,
                ..Viewport::default()
            };
            let dirs = [
                ZoomDirection::In,
                ZoomDirection::In,
                ZoomDirection::Out,
                ZoomDirection::Out,
                ZoomDirection::Out,
            ];
            for dir in dirs {
                let before = world_under(&vp, anchor);
                assert_eq!(vp.zoom_at(anchor, dir), ZoomOutcome::Applied);
                let after = world_under(&vp, anchor);
                assert!((before.x - after.x).abs() < 1e-9, "{before:?} vs {after:?}");
                assert!((before.y - after.y).abs() < 1e-9, "{before:?} vs {after:?}");
            }
        }
    }

    #[test]
    fn zoom_is_clamped_both_ways() {
        let mut vp = Viewport {
            has_zoomed_out_once: true,
            ..Viewport::default()
        };
        for _ in 0..100 {
            vp.zoom_at(ScreenPoint::new(10.0, 10.0), ZoomDirection::In);
        }
        assert_eq!(vp.zoom, MAX_ZOOM);
        assert_eq!(
            vp.zoom_at(ScreenPoint::new(10.0, 10.0), ZoomDirection::In),
            ZoomOutcome::Unchanged
        );
        for _ in 0..100 {
            vp.zoom_at(ScreenPoint::new(-10.0, 5.0), ZoomDirection::Out);
        }
        assert_eq!(vp.zoom, MIN_ZOOM);
    }

    #[test]
    fn first_zoom_out_waits_for_confirmation() {
        let mut vp = Viewport::default();
        let anchor = ScreenPoint::new(40.0, -20.0);
        let outcome = vp.zoom_at(anchor, ZoomDirection::Out);
        let ZoomOutcome::NeedsConfirmation(p) = outcome else {
            panic!("expected gate, got {outcome:?}");
        };
        assert!((p.target - 1.0 / WHEEL_STEP).abs() < 1e-12);
        assert_eq!(vp.zoom, 1.0);

        let before = world_under(&vp, anchor);
        assert!(vp.confirm_pending_zoom());
        assert!((vp.zoom - 1.0 / WHEEL_STEP).abs() < 1e-12);
        assert!(vp.has_zoomed_out_once);
        let after = world_under(&vp, anchor);
        assert!((before.x - after.x).abs() < 1e-9 && (before.y - after.y).abs() < 1e-9);

        vp.zoom_at(anchor, ZoomDirection::In);
        vp.zoom_at(anchor, ZoomDirection::In);
        assert!(vp.zoom > 1.0);
        assert_eq!(vp.zoom_at(anchor, ZoomDirection::Out), ZoomOutcome::Applied);
        assert!(vp.pending().is_none());
    }

    #[test]
    fn cancelling_gate_changes_nothing() {
        let mut vp = Viewport::default();
        vp.zoom_at(ScreenPoint::default(), ZoomDirection::Out);
        assert!(vp.cancel_pending_zoom());
        assert_eq!(vp.zoom, 1.0);
        assert!(!vp.has_zoomed_out_once);
        assert!(vp.pending().is_none());
        assert!(!vp.confirm_pending_zoom());
    }

    #[test]
    fn pan_is_scaled_by_zoom() {
        let mut vp = Viewport {
            zoom: 2.0,
            ..Viewport::default()
        };
        vp.pan(10.0, -4.0);
        assert_eq!(vp.offset(), ScreenPoint::new(5.0, -2.0));
    }

    #[test]
    fn goto_and_reset() {
        let mut vp = Viewport {
            zoom: 2.2,
            ..Viewport::default()
        };
        vp.goto(100.0, -50.0);
        assert_eq!(vp.offset(), ScreenPoint::new(-100.0, 50.0));
        vp.reset_zoom();
        assert_eq!(vp.zoom, 1.0);
        assert_eq!(vp.offset(), ScreenPoint::new(-100.0, 50.0));
    }

    #[test]
    fn initial_offset_is_scaled_and_clamped() {
        let vp = Viewport::for_entries(&[entry(100, -200), entry(300, -400)]);
        assert_close(vp.offset(), -60.0, 90.0);
        let far = Viewport::for_entries(&[entry(10_000, -10_000)]);
        assert_eq!(far.offset(), ScreenPoint::new(-200.0, 200.0));
        assert_eq!(Viewport::for_entries(&[]).offset(), ScreenPoint::default());
    }

    #[test]
    fn snap_only_from_exact_origin() {
        let entries = [entry(100, 100)];
        let mut vp = Viewport::default();
        assert!(vp.snap_to_entries(&entries));
        assert_close(vp.offset(), -30.0, -30.0);

        let mut panned = Viewport::default();
        panned.pan(0.5, 0.0);
        assert!(!panned.snap_to_entries(&entries));
        assert!(!Viewport::default().snap_to_entries(&[]));
    }
}
