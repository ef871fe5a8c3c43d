//! Colours and sizes for the neural field.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Build from a packed `0xRRGGBB` value.
	pub const fn hex(rgb: u32) -> Self {
		Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Point sprite style.
#[derive(Clone, Debug)]
pub struct PointStyle {
	pub color: Color,
	/// Diameter in world units, attenuated with depth.
	pub size: f64,
	/// Smallest on-screen radius in CSS pixels so far points stay visible.
	pub min_radius: f64,
}

/// Edge line style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Line width in CSS pixels.
	pub width: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// `None` leaves the canvas transparent so the page shows through.
	pub background: Option<Color>,
	pub point: PointStyle,
	pub edge: EdgeStyle,
}

impl Theme {
	/// Cyan points joined by faint magenta lines over a transparent background.
	pub fn neon() -> Self {
		Self {
			background: None,
			point: PointStyle {
				color: Color::hex(0x00FFFF).with_alpha(0.7),
				size: 0.05,
				min_radius: 0.5,
			},
			edge: EdgeStyle {
				color: Color::hex(0xFF0055).with_alpha(0.05),
				width: 1.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::neon()
	}
}
