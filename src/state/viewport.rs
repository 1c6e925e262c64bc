// Pan/zoom state of the origins map plus its drift velocity.
use crate::config::MapConfig;
use crate::error::MapError;

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Valid range for the content layer's translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_dimensions(
        container_w: f64,
        container_h: f64,
        content_w: f64,
        content_h: f64,
    ) -> Result<Self, MapError> {
        let dims = [container_w, container_h, content_w, content_h];
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(MapError::DegenerateDimensions {
                container_w,
                container_h,
                content_w,
                content_h,
            });
        }
        // content smaller than the container pins to the origin
        Ok(Self {
            min_x: (container_w - content_w).min(0.0),
            max_x: 0.0,
            min_y: (container_h - content_h).min(0.0),
            max_y: 0.0,
        })
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Idle drift or post-release inertia; both share the per-frame rule.
    Drifting,
    /// The user holds the map; no per-frame movement.
    Dragging,
}

/// Whether the container was last seen without a usable size. Lets callers
/// that re-measure every frame report the wait and the recovery once each.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LayoutStatus {
    waiting: bool,
}

impl LayoutStatus {
    /// Returns true when this failure starts a wait.
    pub fn record_failure(&mut self) -> bool {
        !std::mem::replace(&mut self.waiting, true)
    }

    /// Returns true when this success ends a wait.
    pub fn record_success(&mut self) -> bool {
        std::mem::replace(&mut self.waiting, false)
    }
}

#[derive(Debug, Clone)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub motion: Motion,
    bounds: Option<Bounds>,
    /// Size of the content layer, in container pixels before scaling.
    content_w: f64,
    content_h: f64,
    config: MapConfig,
}

impl Viewport {
    pub fn new(config: MapConfig) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: config.start_scale(),
            velocity_x: config.idle_drift_x,
            velocity_y: config.idle_drift_y,
            motion: Motion::Drifting,
            bounds: None,
            content_w: 0.0,
            content_h: 0.0,
            config,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn content_size(&self) -> (f64, f64) {
        (self.content_w, self.content_h)
    }

    /// Recomputes bounds for a new container size. The first successful
    /// computation centres the view; later ones re-clamp the current offset.
    pub fn resize(&mut self, container_w: f64, container_h: f64) -> Result<Bounds, MapError> {
        let multiple = self.config.content_multiple;
        let content_w = container_w * multiple;
        let content_h = container_h * multiple;
        let bounds = Bounds::from_dimensions(container_w, container_h, content_w, content_h)?;
        let first = self.bounds.is_none();
        self.bounds = Some(bounds);
        self.content_w = content_w;
        self.content_h = content_h;
        if first {
            let (cx, cy) = bounds.center();
            self.offset_x = cx;
            self.offset_y = cy;
        } else {
            self.offset_x = clamp(self.offset_x, bounds.min_x, bounds.max_x);
            self.offset_y = clamp(self.offset_y, bounds.min_y, bounds.max_y);
        }
        Ok(bounds)
    }

    pub fn apply_delta(&mut self, dx: f64, dy: f64) {
        let Some(b) = self.bounds else {
            return;
        };
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.offset_x = clamp(self.offset_x + dx, b.min_x, b.max_x);
        self.offset_y = clamp(self.offset_y + dy, b.min_y, b.max_y);
    }

    pub fn apply_zoom_delta(&mut self, d_scale: f64) {
        if self.bounds.is_none() || !d_scale.is_finite() {
            return;
        }
        self.scale = clamp(
            self.scale + d_scale,
            self.config.min_scale,
            self.config.max_scale,
        );
    }

    pub fn begin_drag(&mut self) {
        self.motion = Motion::Dragging;
        self.velocity_x = 0.0;
        self.velocity_y = 0.0;
    }

    /// Hands control back to the animator with a velocity measured in px/ms.
    pub fn release(&mut self, vx_per_ms: f64, vy_per_ms: f64) {
        self.motion = Motion::Drifting;
        let k = self.config.frame_ms * self.config.release_damping;
        let (vx, vy) = (vx_per_ms * k, vy_per_ms * k);
        if vx.is_finite() && vy.is_finite() {
            self.velocity_x = vx;
            self.velocity_y = vy;
        } else {
            self.velocity_x = 0.0;
            self.velocity_y = 0.0;
        }
    }

    /// Ends a drag that should not carry momentum (cancelled touch, pinch).
    pub fn cancel_drag(&mut self) {
        self.release(0.0, 0.0);
    }

    /// One animation frame. Returns true when the offset moved.
    pub fn step(&mut self) -> bool {
        let Some(b) = self.bounds else {
            return false;
        };
        if self.motion == Motion::Dragging {
            return false;
        }
        if self.velocity_x == 0.0 && self.velocity_y == 0.0 {
            return false;
        }
        let before = (self.offset_x, self.offset_y);

        let nx = self.offset_x + self.velocity_x;
        let cx = clamp(nx, b.min_x, b.max_x);
        if cx != nx {
            self.velocity_x = 0.0;
        }
        let ny = self.offset_y + self.velocity_y;
        let cy = clamp(ny, b.min_y, b.max_y);
        if cy != ny {
            self.velocity_y = 0.0;
        }
        self.offset_x = cx;
        self.offset_y = cy;

        let friction = self.config.friction;
        if friction < 1.0 {
            self.velocity_x *= friction;
            self.velocity_y *= friction;
            if self.velocity_x.hypot(self.velocity_y) < self.config.rest_speed {
                self.velocity_x = 0.0;
                self.velocity_y = 0.0;
            }
        }
        before != (self.offset_x, self.offset_y)
    }

    pub fn recenter(&mut self) {
        if let Some(b) = self.bounds {
            let (cx, cy) = b.center();
            self.offset_x = cx;
            self.offset_y = cy;
        }
        self.scale = self.config.start_scale();
        self.motion = Motion::Drifting;
        self.velocity_x = self.config.idle_drift_x;
        self.velocity_y = self.config.idle_drift_y;
    }

    /// CSS transform for the content layer (origin at its centre).
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scale({:.3})",
            self.offset_x, self.offset_y, self.scale
        )
    }
}
