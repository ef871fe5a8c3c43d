//! neural-field: animated 3D proximity-graph backdrop for the site hero.
//!
//! This crate provides a WASM canvas component that simulates a drifting
//! point cloud, links nearby points every frame, and steers the camera
//! toward the pointer.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::neural_field::{
	FieldConfig, FieldError, Frame, FrameRenderer, NeuralFieldCanvas, Point, ProximityGraphAnimator,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("neural-field: logging initialized");
}

/// Parse a field config, falling back to defaults on malformed input.
pub fn parse_field_config(json_text: &str) -> FieldConfig {
	match serde_json::from_str::<FieldConfig>(json_text) {
		Ok(config) => {
			info!(
				"neural-field: loaded config ({} points)",
				config.point_count
			);
			config
		}
		Err(e) => {
			warn!("neural-field: failed to parse config: {}", e);
			FieldConfig::default()
		}
	}
}

/// Load the field config from a script element with id="field-config".
/// Expected format: JSON object with any subset of [`FieldConfig`] fields.
pub fn load_field_config() -> FieldConfig {
	let json_text = || -> Option<String> {
		let window: Window = web_sys::window()?;
		let document = window.document()?;
		let element = document.get_element_by_id("field-config")?;
		let script: HtmlScriptElement = element.dyn_into().ok()?;
		script.text().ok()
	};
	json_text()
		.map(|text| parse_field_config(&text))
		.unwrap_or_default()
}

/// Main application component.
/// Loads the field config from the DOM and renders the hero backdrop.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config();
	let config_signal = Signal::derive(move || config.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="ML Mavericks" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div id="neural-canvas-container" class="hero-backdrop">
			<NeuralFieldCanvas config=config_signal />
		</div>
	}
}
