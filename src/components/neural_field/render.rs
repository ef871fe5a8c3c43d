//! Canvas 2D renderer for animator frames.
//!
//! Points and edges are projected through the frame's camera and drawn in
//! two batched paths: all edges in one stroke, then all points in one fill.
//! The backing store is scaled by the (capped) device pixel ratio while all
//! drawing happens in CSS pixels.

use std::f64::consts::PI;

use glam::Vec3;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::animator::{Frame, FrameRenderer};
use super::error::FieldError;
use super::theme::Theme;

/// Draws frames onto an HTML canvas.
pub struct CanvasRenderer {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	theme: Theme,
	width: f64,
	height: f64,
	pixel_ratio: f64,
}

impl CanvasRenderer {
	pub fn new(
		canvas: HtmlCanvasElement,
		theme: Theme,
		width: f64,
		height: f64,
		pixel_ratio: f64,
	) -> Result<Self, FieldError> {
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.map_err(|e| FieldError::Canvas(format!("getContext failed: {:?}", e)))?
			.ok_or_else(|| FieldError::Canvas("2d context unavailable".to_string()))?
			.dyn_into()
			.map_err(|_| FieldError::Canvas("context is not 2d".to_string()))?;

		let renderer = Self {
			canvas,
			ctx,
			theme,
			width,
			height,
			pixel_ratio,
		};
		renderer.apply_size();
		Ok(renderer)
	}

	fn apply_size(&self) {
		self.canvas
			.set_width((self.width * self.pixel_ratio).round() as u32);
		self.canvas
			.set_height((self.height * self.pixel_ratio).round() as u32);
		let _ = self.canvas.set_attribute(
			"style",
			&format!(
				"display: block; width: {}px; height: {}px;",
				self.width, self.height
			),
		);
	}

	fn draw_background(&self) {
		match self.theme.background {
			Some(color) => {
				self.ctx.set_fill_style_str(&color.to_css());
				self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
			}
			None => self.ctx.clear_rect(0.0, 0.0, self.width, self.height),
		}
	}

	fn draw_edges(&self, frame: &Frame<'_>, view_projection: &glam::Mat4) {
		let style = &self.theme.edge;
		self.ctx.set_stroke_style_str(&style.color.to_css());
		self.ctx.set_line_width(style.width);
		self.ctx.begin_path();
		for seg in frame.edge_vertices.chunks_exact(6) {
			let a = Vec3::from_slice(&seg[..3]);
			let b = Vec3::from_slice(&seg[3..]);
			let project = |p| {
				frame
					.camera
					.project(view_projection, p, self.width, self.height)
			};
			if let (Some(pa), Some(pb)) = (project(a), project(b)) {
				self.ctx.move_to(pa.x, pa.y);
				self.ctx.line_to(pb.x, pb.y);
			}
		}
		self.ctx.stroke();
	}

	fn draw_points(&self, frame: &Frame<'_>, view_projection: &glam::Mat4) {
		let style = &self.theme.point;
		// Same attenuation as a perspective point sprite: size * (h / 2) / depth.
		let half_height = self.height / 2.0;
		self.ctx.set_fill_style_str(&style.color.to_css());
		self.ctx.begin_path();
		for p in frame.positions.chunks_exact(3) {
			let Some(s) = frame.camera.project(
				view_projection,
				Vec3::from_slice(p),
				self.width,
				self.height,
			) else {
				continue;
			};
			let radius = (style.size * half_height / s.depth as f64 / 2.0).max(style.min_radius);
			self.ctx.move_to(s.x + radius, s.y);
			let _ = self.ctx.arc(s.x, s.y, radius, 0.0, PI * 2.0);
		}
		self.ctx.fill();
	}
}

impl FrameRenderer for CanvasRenderer {
	fn render(&mut self, frame: &Frame<'_>) {
		let r = self.pixel_ratio;
		let _ = self.ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0);
		self.draw_background();

		let view_projection = frame.camera.view_projection();
		self.draw_edges(frame, &view_projection);
		self.draw_points(frame, &view_projection);
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.apply_size();
	}
}
