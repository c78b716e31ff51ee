pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 2.0;
pub const CONTROL_ZOOM_STEP: f64 = 1.2;
pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Pan/zoom state. `screen = world * k + (x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl Viewport {
	pub fn world_to_screen(&self, x: f64, y: f64) -> (f64, f64) {
		(x * self.k + self.x, y * self.k + self.y)
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	pub fn pan(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}

	/// Multiply the zoom by `factor`, clamped to the allowed range.
	/// Returns whether the zoom actually changed.
	pub fn zoom_by(&mut self, factor: f64) -> bool {
		if !factor.is_finite() || factor <= 0.0 {
			return false;
		}
		let k = (self.k * factor).clamp(ZOOM_MIN, ZOOM_MAX);
		let changed = k != self.k;
		self.k = k;
		changed
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

/// Zoom factor for a wheel event's vertical delta.
pub fn wheel_factor(delta_y: f64) -> f64 {
	if delta_y > 0.0 {
		WHEEL_ZOOM_OUT
	} else {
		WHEEL_ZOOM_IN
	}
}
