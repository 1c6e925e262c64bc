//! Translates mouse, touch and wheel input into viewport changes.
//!
//! DOM handlers build a [`PointerInput`] from the raw event and hand it to
//! [`InputTranslator::handle`]; everything past that point is plain data so
//! it can be exercised without a browser.

use super::drag::DragSession;
use super::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    MouseDown { x: f64, y: f64, t: f64 },
    MouseMove { x: f64, y: f64, t: f64 },
    MouseUp { t: f64 },
    /// `touches` is the number of contacts currently on the surface.
    TouchStart { touches: u32, x: f64, y: f64, t: f64 },
    TouchMove { touches: u32, x: f64, y: f64, t: f64 },
    TouchEnd { touches: u32, t: f64 },
    Wheel { delta_y: f64 },
    /// The platform aborted the gesture (`touchcancel`).
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Ignored,
    /// The viewport changed and the transform should be repainted.
    Moved,
    DragStarted,
    DragEnded,
    Zoomed,
}

#[derive(Debug, Clone)]
pub struct InputTranslator {
    drag: DragSession,
}

impl InputTranslator {
    pub fn new(window_ms: f64) -> Self {
        Self {
            drag: DragSession::new(window_ms),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging
    }

    pub fn handle(&mut self, viewport: &mut Viewport, input: PointerInput) -> InputOutcome {
        use PointerInput::*;
        match input {
            MouseDown { x, y, t } => self.start(viewport, x, y, t),
            MouseMove { x, y, t } => self.track(viewport, x, y, t),
            MouseUp { t } => self.finish(viewport, t),
            TouchStart { touches, x, y, t } => {
                if touches == 1 {
                    self.start(viewport, x, y, t)
                } else {
                    // a second finger ends the pan; pinch is not supported
                    self.abort(viewport)
                }
            }
            TouchMove { touches, x, y, t } => {
                if touches == 1 {
                    self.track(viewport, x, y, t)
                } else {
                    InputOutcome::Ignored
                }
            }
            TouchEnd { touches, t } => {
                if touches == 0 {
                    self.finish(viewport, t)
                } else {
                    InputOutcome::Ignored
                }
            }
            Cancel => self.abort(viewport),
            Wheel { delta_y } => {
                if viewport.bounds().is_none() {
                    return InputOutcome::Ignored;
                }
                let d_scale = -delta_y * viewport.config().wheel_sensitivity;
                let before = viewport.scale;
                viewport.apply_zoom_delta(d_scale);
                if viewport.scale != before {
                    InputOutcome::Zoomed
                } else {
                    InputOutcome::Ignored
                }
            }
        }
    }

    fn start(&mut self, viewport: &mut Viewport, x: f64, y: f64, t: f64) -> InputOutcome {
        if viewport.bounds().is_none() {
            return InputOutcome::Ignored;
        }
        self.drag.begin(x, y, t);
        viewport.begin_drag();
        InputOutcome::DragStarted
    }

    fn track(&mut self, viewport: &mut Viewport, x: f64, y: f64, t: f64) -> InputOutcome {
        match self.drag.move_to(x, y, t) {
            Some((dx, dy)) => {
                viewport.apply_delta(dx, dy);
                InputOutcome::Moved
            }
            None => InputOutcome::Ignored,
        }
    }

    fn finish(&mut self, viewport: &mut Viewport, t: f64) -> InputOutcome {
        match self.drag.end(t) {
            Some((vx, vy)) => {
                viewport.release(vx, vy);
                InputOutcome::DragEnded
            }
            None => InputOutcome::Ignored,
        }
    }

    fn abort(&mut self, viewport: &mut Viewport) -> InputOutcome {
        if self.drag.cancel() {
            viewport.cancel_drag();
            InputOutcome::DragEnded
        } else {
            InputOutcome::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::state::viewport::Motion;

    fn ready() -> (InputTranslator, Viewport) {
        let cfg = MapConfig {
            idle_drift_x: 0.0,
            idle_drift_y: 0.0,
            ..Default::default()
        };
        let mut vp = Viewport::new(cfg.clone());
        vp.resize(800.0, 600.0).unwrap();
        (InputTranslator::new(cfg.velocity_window_ms), vp)
    }

    #[test]
    fn mouse_drag_pans_and_releases_with_momentum() {
        let (mut input, mut vp) = ready();
        assert_eq!(
            input.handle(&mut vp, PointerInput::MouseDown { x: 100.0, y: 100.0, t: 0.0 }),
            InputOutcome::DragStarted
        );
        assert_eq!(vp.motion, Motion::Dragging);
        input.handle(&mut vp, PointerInput::MouseMove { x: 130.0, y: 90.0, t: 16.0 });
        input.handle(&mut vp, PointerInput::MouseMove { x: 160.0, y: 80.0, t: 32.0 });
        assert_eq!((vp.offset_x, vp.offset_y), (-340.0, -320.0));
        assert_eq!(
            input.handle(&mut vp, PointerInput::MouseUp { t: 40.0 }),
            InputOutcome::DragEnded
        );
        assert_eq!(vp.motion, Motion::Drifting);
        assert!(vp.velocity_x > 0.0);
        assert!(vp.velocity_y < 0.0);
        assert!(!input.is_dragging());
    }

    #[test]
    fn dragging_flag_follows_the_gesture() {
        let (mut input, mut vp) = ready();
        assert!(!input.is_dragging());
        input.handle(&mut vp, PointerInput::TouchStart { touches: 1, x: 0.0, y: 0.0, t: 0.0 });
        assert!(input.is_dragging());
        input.handle(&mut vp, PointerInput::Cancel);
        assert!(!input.is_dragging());
        input.handle(&mut vp, PointerInput::MouseDown { x: 0.0, y: 0.0, t: 5.0 });
        input.handle(&mut vp, PointerInput::MouseUp { t: 9.0 });
        assert!(!input.is_dragging());
    }

    #[test]
    fn mouse_move_without_press_does_nothing() {
        let (mut input, mut vp) = ready();
        assert_eq!(
            input.handle(&mut vp, PointerInput::MouseMove { x: 10.0, y: 10.0, t: 0.0 }),
            InputOutcome::Ignored
        );
        assert_eq!((vp.offset_x, vp.offset_y), (-400.0, -300.0));
    }

    #[test]
    fn multi_touch_is_ignored() {
        let (mut input, mut vp) = ready();
        assert_eq!(
            input.handle(&mut vp, PointerInput::TouchStart { touches: 2, x: 0.0, y: 0.0, t: 0.0 }),
            InputOutcome::Ignored
        );
        input.handle(&mut vp, PointerInput::TouchStart { touches: 1, x: 50.0, y: 50.0, t: 0.0 });
        input.handle(&mut vp, PointerInput::TouchMove { touches: 2, x: 90.0, y: 90.0, t: 10.0 });
        assert_eq!((vp.offset_x, vp.offset_y), (-400.0, -300.0));
        input.handle(&mut vp, PointerInput::TouchMove { touches: 1, x: 40.0, y: 45.0, t: 20.0 });
        assert_eq!((vp.offset_x, vp.offset_y), (-410.0, -305.0));
    }

    #[test]
    fn second_finger_cancels_pan_without_momentum() {
        let (mut input, mut vp) = ready();
        input.handle(&mut vp, PointerInput::TouchStart { touches: 1, x: 0.0, y: 0.0, t: 0.0 });
        input.handle(&mut vp, PointerInput::TouchMove { touches: 1, x: -60.0, y: 0.0, t: 10.0 });
        assert_eq!(
            input.handle(&mut vp, PointerInput::TouchStart { touches: 2, x: 0.0, y: 0.0, t: 12.0 }),
            InputOutcome::DragEnded
        );
        assert_eq!((vp.velocity_x, vp.velocity_y), (0.0, 0.0));
        assert_eq!(vp.motion, Motion::Drifting);
        // lifting one of two fingers keeps the gesture ignored
        assert_eq!(
            input.handle(&mut vp, PointerInput::TouchEnd { touches: 1, t: 20.0 }),
            InputOutcome::Ignored
        );
    }

    #[test]
    fn touch_cancel_drops_momentum() {
        let (mut input, mut vp) = ready();
        input.handle(&mut vp, PointerInput::TouchStart { touches: 1, x: 0.0, y: 0.0, t: 0.0 });
        input.handle(&mut vp, PointerInput::TouchMove { touches: 1, x: 40.0, y: 0.0, t: 8.0 });
        assert_eq!(input.handle(&mut vp, PointerInput::Cancel), InputOutcome::DragEnded);
        assert_eq!((vp.velocity_x, vp.velocity_y), (0.0, 0.0));
        assert_eq!(vp.offset_x, -360.0);
        assert_eq!(input.handle(&mut vp, PointerInput::Cancel), InputOutcome::Ignored);
    }

    #[test]
    fn wheel_zooms_inverted_and_clamped() {
        let (mut input, mut vp) = ready();
        assert_eq!(
            input.handle(&mut vp, PointerInput::Wheel { delta_y: -20.0 }),
            InputOutcome::Zoomed
        );
        assert!((vp.scale - 1.1).abs() < 1e-9);
        for _ in 0..20 {
            input.handle(&mut vp, PointerInput::Wheel { delta_y: -20.0 });
        }
        assert_eq!(vp.scale, 2.0);
        assert_eq!(
            input.handle(&mut vp, PointerInput::Wheel { delta_y: -20.0 }),
            InputOutcome::Ignored
        );
    }

    #[test]
    fn input_before_layout_is_ignored() {
        let mut vp = Viewport::new(MapConfig::default());
        let mut input = InputTranslator::new(100.0);
        assert_eq!(
            input.handle(&mut vp, PointerInput::MouseDown { x: 0.0, y: 0.0, t: 0.0 }),
            InputOutcome::Ignored
        );
        assert_eq!(
            input.handle(&mut vp, PointerInput::Wheel { delta_y: 100.0 }),
            InputOutcome::Ignored
        );
        assert!(!input.is_dragging());
    }
}
