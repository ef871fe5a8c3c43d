//! Point cloud simulation and per-frame proximity graph.
//!
//! Points drift with constant velocity inside a cube and bounce off its faces.
//! Every tick the full set of pairs closer than the link distance is rebuilt
//! from scratch, the camera eases toward the pointer, and the resulting
//! buffers are handed to a [`FrameRenderer`].

use glam::{Vec2, Vec3};
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::camera::Camera;
use super::error::FieldError;
use super::types::FieldConfig;

/// Seed used when the config does not carry one.
const FALLBACK_SEED: u64 = 0x5eed;

/// A moving point. Its identity is its index in the animator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub position: Vec3,
	pub velocity: Vec3,
}

impl Point {
	pub fn new(position: Vec3, velocity: Vec3) -> Self {
		Self { position, velocity }
	}

	/// Advance by one velocity step, then flip the velocity on every axis
	/// whose coordinate has left `[-half_extent, half_extent]`.
	///
	/// The position is not clamped and may overshoot by up to one step.
	fn advance(&mut self, half_extent: f32) {
		self.position += self.velocity;
		for axis in 0..3 {
			let c = self.position[axis];
			if c > half_extent || c < -half_extent {
				self.velocity[axis] = -self.velocity[axis];
			}
		}
	}
}

/// Everything a renderer needs for one frame.
pub struct Frame<'a> {
	/// `x, y, z` per point, in point order.
	pub positions: &'a [f32],
	/// Six floats per edge: both endpoints, lower index first.
	pub edge_vertices: &'a [f32],
	pub camera: &'a Camera,
}

impl Frame<'_> {
	pub fn edge_count(&self) -> usize {
		self.edge_vertices.len() / 6
	}
}

/// Consumer of animator output.
pub trait FrameRenderer {
	/// Draw one frame.
	fn render(&mut self, frame: &Frame<'_>);
	/// The output surface changed size.
	fn resize(&mut self, width: f64, height: f64);
}

/// Collect every pair `(i, j)`, `i < j`, whose distance is strictly below
/// `link_distance`, appending endpoint coordinates to `vertices`.
pub fn link_pairs(
	points: &[Point],
	link_distance: f32,
	edges: &mut Vec<(usize, usize)>,
	vertices: &mut Vec<f32>,
) {
	edges.clear();
	vertices.clear();
	for (i, a) in points.iter().enumerate() {
		for (j, b) in points.iter().enumerate().skip(i + 1) {
			if a.position.distance(b.position) < link_distance {
				edges.push((i, j));
				vertices.extend_from_slice(&a.position.to_array());
				vertices.extend_from_slice(&b.position.to_array());
			}
		}
	}
}

fn check_viewport(width: f64, height: f64) -> Result<(), FieldError> {
	if width > 0.0 && height > 0.0 {
		Ok(())
	} else {
		Err(FieldError::EmptyViewport { width, height })
	}
}

/// Owns the point set, pointer offsets and camera, and drives a renderer.
pub struct ProximityGraphAnimator<R> {
	config: FieldConfig,
	points: Vec<Point>,
	positions: Vec<f32>,
	edges: Vec<(usize, usize)>,
	edge_vertices: Vec<f32>,
	camera: Camera,
	/// Last pointer offset from the viewport centre, in world units.
	pointer: Vec2,
	width: f64,
	height: f64,
	renderer: R,
}

impl<R: FrameRenderer> ProximityGraphAnimator<R> {
	/// Create an animator with randomly placed points, seeded from `config.seed`.
	pub fn new(config: FieldConfig, width: f64, height: f64, renderer: R) -> Result<Self, FieldError> {
		let mut rng = SmallRng::seed_from_u64(config.seed.unwrap_or(FALLBACK_SEED));
		Self::with_rng(config, width, height, renderer, &mut rng)
	}

	/// Create an animator drawing initial placement from `rng`.
	pub fn with_rng(
		config: FieldConfig,
		width: f64,
		height: f64,
		renderer: R,
		rng: &mut impl Rng,
	) -> Result<Self, FieldError> {
		config.validate()?;
		let (extent, speed) = (config.half_extent, config.max_speed);
		let mut uniform = |scale: f32| (rng.r#gen::<f32>() - 0.5) * 2.0 * scale;
		let points = (0..config.point_count)
			.map(|_| {
				let position = Vec3::new(uniform(extent), uniform(extent), uniform(extent));
				let velocity = Vec3::new(uniform(speed), uniform(speed), uniform(speed));
				Point::new(position, velocity)
			})
			.collect();
		Self::from_points(config, points, width, height, renderer)
	}

	/// Create an animator over an explicit point set. `config.point_count` is
	/// replaced by the number of points given.
	pub fn from_points(
		mut config: FieldConfig,
		points: Vec<Point>,
		width: f64,
		height: f64,
		renderer: R,
	) -> Result<Self, FieldError> {
		config.point_count = points.len();
		config.validate()?;
		check_viewport(width, height)?;

		let camera = Camera::new(
			config.camera_distance,
			config.fov_degrees,
			(width / height) as f32,
			config.near,
			config.far,
		);
		let mut positions = Vec::with_capacity(points.len() * 3);
		positions.extend(points.iter().flat_map(|p| p.position.to_array()));

		info!(
			"neural-field: {} points, viewport {}x{}",
			points.len(),
			width,
			height
		);

		Ok(Self {
			config,
			points,
			positions,
			edges: Vec::new(),
			edge_vertices: Vec::new(),
			camera,
			pointer: Vec2::ZERO,
			width,
			height,
			renderer,
		})
	}

	/// Advance one frame and hand the result to the renderer.
	pub fn tick(&mut self) {
		let half_extent = self.config.half_extent;
		for p in &mut self.points {
			p.advance(half_extent);
		}
		for (slot, p) in self.positions.chunks_exact_mut(3).zip(&self.points) {
			slot.copy_from_slice(&p.position.to_array());
		}

		link_pairs(
			&self.points,
			self.config.link_distance,
			&mut self.edges,
			&mut self.edge_vertices,
		);

		self.camera
			.follow(self.pointer.x, -self.pointer.y, self.config.camera_smoothing);

		self.renderer.render(&Frame {
			positions: &self.positions,
			edge_vertices: &self.edge_vertices,
			camera: &self.camera,
		});
	}

	/// Record the pointer position. The latest call wins.
	pub fn on_pointer_move(&mut self, screen_x: f64, screen_y: f64, viewport_width: f64, viewport_height: f64) {
		let scale = self.config.pointer_scale as f64;
		self.pointer = Vec2::new(
			((screen_x - viewport_width / 2.0) * scale) as f32,
			((screen_y - viewport_height / 2.0) * scale) as f32,
		);
	}

	/// Update the aspect ratio and resize the renderer's surface. Points are untouched.
	pub fn on_resize(&mut self, width: f64, height: f64) -> Result<(), FieldError> {
		if let Err(e) = check_viewport(width, height) {
			warn!("neural-field: ignoring resize: {}", e);
			return Err(e);
		}
		debug!("neural-field: resize to {}x{}", width, height);
		self.width = width;
		self.height = height;
		self.camera.set_aspect(width, height);
		self.renderer.resize(width, height);
		Ok(())
	}

	pub fn points(&self) -> &[Point] {
		&self.points
	}

	pub fn positions(&self) -> &[f32] {
		&self.positions
	}

	/// Index pairs linked in the most recent tick.
	pub fn edges(&self) -> &[(usize, usize)] {
		&self.edges
	}

	pub fn edge_vertices(&self) -> &[f32] {
		&self.edge_vertices
	}

	pub fn camera(&self) -> &Camera {
		&self.camera
	}

	pub fn pointer(&self) -> Vec2 {
		self.pointer
	}

	pub fn viewport(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	pub fn renderer(&self) -> &R {
		&self.renderer
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Renderer stand-in that remembers what it was given.
	#[derive(Default)]
	struct Recorder {
		frames: usize,
		edge_counts: Vec<usize>,
		last_positions: Vec<f32>,
		last_camera: Option<Camera>,
		resizes: Vec<(f64, f64)>,
	}

	impl FrameRenderer for Recorder {
		fn render(&mut self, frame: &Frame<'_>) {
			self.frames += 1;
			self.edge_counts.push(frame.edge_count());
			self.last_positions = frame.positions.to_vec();
			self.last_camera = Some(frame.camera.clone());
		}

		fn resize(&mut self, width: f64, height: f64) {
			self.resizes.push((width, height));
		}
	}

	fn seeded(seed: u64) -> ProximityGraphAnimator<Recorder> {
		let config = FieldConfig {
			seed: Some(seed),
			..FieldConfig::default()
		};
		ProximityGraphAnimator::new(config, 800.0, 600.0, Recorder::default()).unwrap()
	}

	fn still(coords: &[[f32; 3]]) -> ProximityGraphAnimator<Recorder> {
		let points = coords
			.iter()
			.map(|&c| Point::new(Vec3::from_array(c), Vec3::ZERO))
			.collect();
		ProximityGraphAnimator::from_points(FieldConfig::default(), points, 800.0, 600.0, Recorder::default())
			.unwrap()
	}

	#[test]
	fn initial_placement_within_bounds() {
		let anim = seeded(1);
		assert_eq!(anim.points().len(), 150);
		assert_eq!(anim.positions().len(), 450);
		assert_eq!(anim.camera().position, Vec3::new(0.0, 0.0, 5.0));
		for p in anim.points() {
			assert!(p.position.abs().max_element() <= 7.5);
			assert!(p.velocity.abs().max_element() <= 0.005);
		}
	}

	#[test]
	fn tick_moves_by_velocity_or_reflects() {
		let mut anim = seeded(2);
		for _ in 0..50 {
			let before: Vec<Point> = anim.points().to_vec();
			anim.tick();
			for (old, new) in before.iter().zip(anim.points()) {
				assert_eq!(new.position, old.position + old.velocity);
				for axis in 0..3 {
					let c = new.position[axis];
					if c > 7.5 || c < -7.5 {
						assert_eq!(new.velocity[axis], -old.velocity[axis]);
					} else {
						assert_eq!(new.velocity[axis], old.velocity[axis]);
					}
				}
			}
		}
	}

	#[test]
	fn overshoot_reflects_without_clamping() {
		let points = vec![Point::new(Vec3::new(7.6, 0.0, 0.0), Vec3::new(0.01, 0.0, 0.0))];
		let mut anim =
			ProximityGraphAnimator::from_points(FieldConfig::default(), points, 800.0, 600.0, Recorder::default())
				.unwrap();
		anim.tick();
		let p = anim.points()[0];
		assert_eq!(p.velocity.x, -0.01);
		assert!((p.position.x - 7.61).abs() < 1e-5);
		assert_eq!(p.velocity.y, 0.0);
	}

	#[test]
	fn crossing_the_face_flips_once() {
		let points = vec![Point::new(Vec3::new(0.0, -7.498, 0.0), Vec3::new(0.0, -0.005, 0.0))];
		let mut anim =
			ProximityGraphAnimator::from_points(FieldConfig::default(), points, 800.0, 600.0, Recorder::default())
				.unwrap();
		anim.tick();
		assert_eq!(anim.points()[0].velocity.y, 0.005);
		anim.tick();
		assert_eq!(anim.points()[0].velocity.y, 0.005);
		assert!(anim.points()[0].position.y >= -7.5);
	}

	#[test]
	fn edges_match_exhaustive_pair_check() {
		let coords = [
			[0.0, 0.0, 0.0],
			[1.0, 0.0, 0.0],
			[1.0, 1.1, 0.0],
			[3.0, 3.0, 3.0],
		];
		let mut anim = still(&coords);
		anim.tick();

		let mut expected = Vec::new();
		for i in 0..coords.len() {
			for j in (i + 1)..coords.len() {
				let d = Vec3::from_array(coords[i]).distance(Vec3::from_array(coords[j]));
				if d < 1.2 {
					expected.push((i, j));
				}
			}
		}
		assert_eq!(anim.edges(), expected.as_slice());
		assert_eq!(anim.edges(), &[(0, 1), (1, 2)]);
		assert_eq!(anim.edge_vertices().len(), 12);
		assert_eq!(&anim.edge_vertices()[..6], &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
	}

	#[test]
	fn threshold_is_strict() {
		let mut anim = still(&[[0.0, 0.0, 0.0], [0.0, 0.0, 1.2]]);
		anim.tick();
		assert!(anim.edges().is_empty());
	}

	#[test]
	fn close_pair_links_every_tick() {
		let mut anim = still(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
		for _ in 0..10 {
			anim.tick();
		}
		assert_eq!(anim.renderer().edge_counts, vec![1; 10]);
		assert_eq!(anim.renderer().last_positions, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
	}

	#[test]
	fn distant_pair_never_links() {
		let mut anim = still(&[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0]]);
		for _ in 0..10 {
			anim.tick();
		}
		assert!(anim.renderer().edge_counts.iter().all(|&n| n == 0));
	}

	#[test]
	fn same_seed_same_trajectory() {
		let (mut a, mut b) = (seeded(42), seeded(42));
		for _ in 0..100 {
			a.tick();
			b.tick();
			assert_eq!(a.positions(), b.positions());
			assert_eq!(a.edges(), b.edges());
		}
		assert_ne!(seeded(42).positions(), seeded(43).positions());
	}

	#[test]
	fn camera_converges_on_pointer() {
		let mut anim = seeded(3);
		anim.on_pointer_move(600.0, 100.0, 800.0, 600.0);
		assert!(anim.pointer().abs_diff_eq(Vec2::new(0.2, -0.2), 1e-6));

		let target = Vec3::new(0.2, 0.2, 5.0);
		let mut last = anim.camera().position.distance(target);
		for _ in 0..200 {
			anim.tick();
			let d = anim.camera().position.distance(target);
			assert!(d < last);
			last = d;
		}
		assert!(last < 0.001);
		assert_eq!(anim.camera().position.z, 5.0);
		assert_eq!(anim.renderer().last_camera.as_ref(), Some(anim.camera()));
	}

	#[test]
	fn latest_pointer_wins() {
		let mut anim = seeded(4);
		anim.on_pointer_move(0.0, 0.0, 800.0, 600.0);
		anim.on_pointer_move(400.0, 300.0, 800.0, 600.0);
		anim.tick();
		assert_eq!(anim.camera().position, Vec3::new(0.0, 0.0, 5.0));
	}

	#[test]
	fn resize_updates_aspect_and_renderer_only() {
		let mut anim = seeded(5);
		let before = anim.points().to_vec();
		anim.on_resize(1000.0, 500.0).unwrap();
		assert_eq!(anim.camera().aspect, 2.0);
		assert_eq!(anim.viewport(), (1000.0, 500.0));
		assert_eq!(anim.renderer().resizes, vec![(1000.0, 500.0)]);
		assert_eq!(anim.points(), before.as_slice());
	}

	#[test]
	fn empty_viewport_is_rejected() {
		let result = ProximityGraphAnimator::new(FieldConfig::default(), 0.0, 600.0, Recorder::default());
		assert!(matches!(result, Err(FieldError::EmptyViewport { .. })));

		let mut anim = seeded(6);
		assert!(anim.on_resize(800.0, 0.0).is_err());
		assert_eq!(anim.camera().aspect, (800.0f64 / 600.0) as f32);
		assert!(anim.renderer().resizes.is_empty());
	}

	#[test]
	fn empty_point_set_is_rejected() {
		let result =
			ProximityGraphAnimator::from_points(FieldConfig::default(), Vec::new(), 800.0, 600.0, Recorder::default());
		assert!(matches!(result, Err(FieldError::InvalidConfig(_))));
	}
}
