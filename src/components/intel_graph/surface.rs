//! Drawing surface abstraction and its `<canvas>` backend.

use std::f64::consts::PI;

use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
	#[error("2d drawing context is unavailable")]
	ContextUnavailable,
	#[error("drawing surface has no area ({width}x{height})")]
	ZeroSize { width: f64, height: f64 },
}

/// Logical (CSS pixel) size of a surface and its device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
	pub width: f64,
	pub height: f64,
	pub pixel_ratio: f64,
}

impl SurfaceSize {
	pub fn has_area(&self) -> bool {
		self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
	}

	/// The ratio to scale drawing by; falls back to 1 for bogus values.
	pub fn scale(&self) -> f64 {
		if self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0 {
			self.pixel_ratio
		} else {
			1.0
		}
	}
}

/// The 2d primitives the renderer needs.
pub trait Surface {
	fn size(&self) -> SurfaceSize;
	/// Replace the current transform with `scale k, then translate (x, y)`
	/// in backing-store pixels.
	fn set_transform(&mut self, k: f64, x: f64, y: f64);
	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
	fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, alpha: f64, width: f64);
	fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str, alpha: f64);
	fn stroke_circle(&mut self, center: (f64, f64), radius: f64, color: &str, width: f64);
	/// Soft radial gradient from `color` at `inner` to transparent at `outer`.
	fn radial_glow(&mut self, center: (f64, f64), inner: f64, outer: f64, color: &str);
	/// Text centered horizontally and vertically on `at`.
	fn centered_text(&mut self, text: &str, at: (f64, f64), font: &str, color: &str);
	fn measure_text(&mut self, text: &str, font: &str) -> f64;
}

pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	size: SurfaceSize,
}

impl CanvasSurface {
	pub fn acquire(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
			.ok_or(SurfaceError::ContextUnavailable)?;
		let size = SurfaceSize {
			width: canvas.width() as f64,
			height: canvas.height() as f64,
			pixel_ratio: 1.0,
		};
		Ok(Self { canvas, ctx, size })
	}

	/// Size the backing store to `css size * pixel_ratio` and pin the
	/// element's CSS size so the browser does not stretch it.
	pub fn resize(&mut self, width: f64, height: f64, pixel_ratio: f64) {
		self.size = SurfaceSize {
			width,
			height,
			pixel_ratio,
		};
		let scale = self.size.scale();
		self.canvas.set_width((width * scale).round().max(0.0) as u32);
		self.canvas.set_height((height * scale).round().max(0.0) as u32);
		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{width}px"));
		let _ = style.set_property("height", &format!("{height}px"));
	}
}

impl Surface for CanvasSurface {
	fn size(&self) -> SurfaceSize {
		self.size
	}

	fn set_transform(&mut self, k: f64, x: f64, y: f64) {
		let _ = self.ctx.set_transform(k, 0.0, 0.0, k, x, y);
	}

	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
		self.ctx.set_fill_style_str(color);
		self.ctx.fill_rect(x, y, w, h);
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, alpha: f64, width: f64) {
		self.ctx.set_global_alpha(alpha);
		self.ctx.set_stroke_style_str(color);
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
		self.ctx.set_global_alpha(1.0);
	}

	fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str, alpha: f64) {
		self.ctx.set_global_alpha(alpha);
		self.ctx.begin_path();
		let _ = self.ctx.arc(center.0, center.1, radius, 0.0, 2.0 * PI);
		self.ctx.set_fill_style_str(color);
		self.ctx.fill();
		self.ctx.set_global_alpha(1.0);
	}

	fn stroke_circle(&mut self, center: (f64, f64), radius: f64, color: &str, width: f64) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(center.0, center.1, radius, 0.0, 2.0 * PI);
		self.ctx.set_stroke_style_str(color);
		self.ctx.set_line_width(width);
		self.ctx.stroke();
	}

	fn radial_glow(&mut self, center: (f64, f64), inner: f64, outer: f64, color: &str) {
		let (x, y) = center;
		let Ok(gradient) = self.ctx.create_radial_gradient(x, y, inner, x, y, outer) else {
			return;
		};
		if gradient.add_color_stop(0.0, color).is_err()
			|| gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)").is_err()
		{
			return;
		}
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, outer, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.ctx.fill();
	}

	fn centered_text(&mut self, text: &str, at: (f64, f64), font: &str, color: &str) {
		self.ctx.set_font(font);
		self.ctx.set_text_align("center");
		self.ctx.set_text_baseline("middle");
		self.ctx.set_fill_style_str(color);
		let _ = self.ctx.fill_text(text, at.0, at.1);
	}

	fn measure_text(&mut self, text: &str, font: &str) -> f64 {
		self.ctx.set_font(font);
		self.ctx
			.measure_text(text)
			.map(|metrics| metrics.width())
			.unwrap_or(0.0)
	}
}
