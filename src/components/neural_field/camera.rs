//! Perspective camera that drifts toward the pointer while facing the origin.

use glam::{Mat4, Vec3, Vec4};

/// A point projected onto the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	/// Screen-space x in pixels.
	pub x: f64,
	/// Screen-space y in pixels, growing downward.
	pub y: f64,
	/// Clip-space w, i.e. view-space depth. Used for size attenuation.
	pub depth: f32,
}

/// Camera pose plus projection parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
	pub position: Vec3,
	/// Look-at target. Stays at the world origin.
	pub target: Vec3,
	pub fov_degrees: f32,
	pub aspect: f32,
	pub near: f32,
	pub far: f32,
}

impl Camera {
	pub fn new(distance: f32, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
		Self {
			position: Vec3::new(0.0, 0.0, distance),
			target: Vec3::ZERO,
			fov_degrees,
			aspect,
			near,
			far,
		}
	}

	/// Move x/y toward `(target_x, target_y)` by `smoothing` of the remaining distance.
	///
	/// z is left untouched, so the camera slides across a plane and the
	/// look-at direction does the rest.
	pub fn follow(&mut self, target_x: f32, target_y: f32, smoothing: f32) {
		self.position.x += (target_x - self.position.x) * smoothing;
		self.position.y += (target_y - self.position.y) * smoothing;
	}

	pub fn set_aspect(&mut self, width: f64, height: f64) {
		self.aspect = (width / height) as f32;
	}

	pub fn view_matrix(&self) -> Mat4 {
		Mat4::look_at_rh(self.position, self.target, Vec3::Y)
	}

	pub fn projection_matrix(&self) -> Mat4 {
		Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
	}

	pub fn view_projection(&self) -> Mat4 {
		self.projection_matrix() * self.view_matrix()
	}

	/// Project a world-space point onto a `width` x `height` viewport.
	///
	/// Returns `None` for points behind the camera or outside the depth range.
	pub fn project(&self, view_projection: &Mat4, point: Vec3, width: f64, height: f64) -> Option<Projected> {
		let clip = *view_projection * Vec4::new(point.x, point.y, point.z, 1.0);
		if clip.w <= self.near {
			return None;
		}
		let ndc = clip.truncate() / clip.w;
		if ndc.z > 1.0 {
			return None;
		}
		Some(Projected {
			x: (ndc.x as f64 + 1.0) * 0.5 * width,
			y: (1.0 - ndc.y as f64) * 0.5 * height,
			depth: clip.w,
		})
	}
}
