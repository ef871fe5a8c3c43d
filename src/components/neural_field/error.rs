//! Error types for the neural field.

use std::fmt;

/// Errors raised while setting up the animation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
	/// The viewport has no area, so no aspect ratio can be derived.
	EmptyViewport { width: f64, height: f64 },
	/// A configuration value is out of range.
	InvalidConfig(&'static str),
	/// The canvas or its 2D context could not be obtained.
	Canvas(String),
}

impl fmt::Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldError::EmptyViewport { width, height } => {
				write!(f, "viewport has no area ({}x{})", width, height)
			}
			FieldError::InvalidConfig(msg) => write!(f, "invalid field config: {}", msg),
			FieldError::Canvas(msg) => write!(f, "canvas setup failed: {}", msg),
		}
	}
}

impl std::error::Error for FieldError {}
