//! Configuration for the neural field animation.

use serde::Deserialize;

use super::error::FieldError;

/// Tunable parameters for the point cloud, its proximity graph and the camera.
///
/// Every field has a default, so a partial JSON object is enough to override
/// a single value.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Number of points. Fixed for the lifetime of an animator.
	pub point_count: usize,
	/// Half-width of the bounding cube centred on the origin.
	pub half_extent: f32,
	/// Velocity components are drawn uniformly from `[-max_speed, max_speed)`.
	pub max_speed: f32,
	/// Two points are linked while their distance is strictly below this.
	pub link_distance: f32,
	/// Fraction of the remaining distance the camera closes each tick.
	pub camera_smoothing: f32,
	/// Pixels to world units for pointer offsets from the viewport centre.
	pub pointer_scale: f32,
	/// Initial camera z.
	pub camera_distance: f32,
	pub fov_degrees: f32,
	pub near: f32,
	pub far: f32,
	/// Upper bound on the device pixel ratio used for the backing canvas.
	pub max_pixel_ratio: f64,
	/// Seed for point placement. Drawn at startup when absent.
	pub seed: Option<u64>,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			point_count: 150,
			half_extent: 7.5,
			max_speed: 0.005,
			link_distance: 1.2,
			camera_smoothing: 0.03,
			pointer_scale: 0.001,
			camera_distance: 5.0,
			fov_degrees: 75.0,
			near: 0.1,
			far: 1000.0,
			max_pixel_ratio: 2.0,
			seed: None,
		}
	}
}

impl FieldConfig {
	/// Reject configurations the animator cannot run with.
	pub fn validate(&self) -> Result<(), FieldError> {
		if self.point_count == 0 {
			return Err(FieldError::InvalidConfig("point_count must be at least 1"));
		}
		if !(self.half_extent > 0.0) {
			return Err(FieldError::InvalidConfig("half_extent must be positive"));
		}
		if !(self.link_distance > 0.0) {
			return Err(FieldError::InvalidConfig("link_distance must be positive"));
		}
		Ok(())
	}
}
