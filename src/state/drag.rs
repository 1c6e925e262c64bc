// Pointer/touch drag tracking for the map.
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    t: f64,
    x: f64,
    y: f64,
}

/// Lives between pointer-down and pointer-up; also measures release speed
/// over a short trailing window of samples.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub is_dragging: bool,
    pub last_x: f64,
    pub last_y: f64,
    window_ms: f64,
    samples: VecDeque<Sample>,
}

impl DragSession {
    pub fn new(window_ms: f64) -> Self {
        Self {
            is_dragging: false,
            last_x: 0.0,
            last_y: 0.0,
            window_ms,
            samples: VecDeque::new(),
        }
    }

    pub fn begin(&mut self, x: f64, y: f64, t: f64) {
        self.is_dragging = true;
        self.last_x = x;
        self.last_y = y;
        self.samples.clear();
        self.samples.push_back(Sample { t, x, y });
    }

    /// Returns the delta since the last recorded position.
    pub fn move_to(&mut self, x: f64, y: f64, t: f64) -> Option<(f64, f64)> {
        if !self.is_dragging {
            return None;
        }
        let delta = (x - self.last_x, y - self.last_y);
        self.last_x = x;
        self.last_y = y;
        self.samples.push_back(Sample { t, x, y });
        while let Some(front) = self.samples.front() {
            if t - front.t > self.window_ms && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
        Some(delta)
    }

    /// Ends the drag and returns the release velocity in px/ms, or `None` if
    /// no drag was active.
    pub fn end(&mut self, t: f64) -> Option<(f64, f64)> {
        if !self.is_dragging {
            return None;
        }
        self.is_dragging = false;
        let velocity = self.release_velocity(t);
        self.samples.clear();
        Some(velocity)
    }

    /// Drops the session without producing a velocity.
    pub fn cancel(&mut self) -> bool {
        let was = self.is_dragging;
        self.is_dragging = false;
        self.samples.clear();
        was
    }

    fn release_velocity(&self, t: f64) -> (f64, f64) {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return (0.0, 0.0);
        };
        // a pointer that rested before release carries no momentum
        if t - last.t > self.window_ms {
            return (0.0, 0.0);
        }
        let dt = last.t - first.t;
        if dt <= 0.0 {
            return (0.0, 0.0);
        }
        let v = ((last.x - first.x) / dt, (last.y - first.y) / dt);
        if v.0.is_finite() && v.1.is_finite() {
            v
        } else {
            (0.0, 0.0)
        }
    }
}
