//! Animated proximity-graph backdrop.
//!
//! A fixed set of points drifts inside a cube, bouncing off its faces. Each
//! frame every pair of points closer than a threshold is joined by a line,
//! and the camera eases toward the pointer while looking at the origin.
//!
//! The simulation ([`ProximityGraphAnimator`]) knows nothing about the DOM:
//! it hands per-frame buffers to any [`FrameRenderer`]. The canvas renderer
//! and the Leptos component are the browser-side collaborators.
//!
//! # Example
//!
//! ```ignore
//! use neural_field::{FieldConfig, NeuralFieldCanvas};
//!
//! view! { <NeuralFieldCanvas config=FieldConfig::default() /> }
//! ```

mod animator;
pub mod camera;
mod component;
mod error;
mod frame_loop;
mod render;
pub mod theme;
mod types;

pub use animator::{Frame, FrameRenderer, Point, ProximityGraphAnimator, link_pairs};
pub use camera::Camera;
pub use component::NeuralFieldCanvas;
pub use error::FieldError;
pub use frame_loop::FrameLoop;
pub use render::CanvasRenderer;
pub use theme::Theme;
pub use types::FieldConfig;
