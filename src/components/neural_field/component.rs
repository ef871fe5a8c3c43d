//! Leptos component hosting the neural field on a canvas.
//!
//! The component creates a canvas, builds a [`ProximityGraphAnimator`] drawing
//! into it, and wires document pointer moves and window resizes to the
//! animator's hooks. A [`FrameLoop`] ticks the animator once per animation
//! frame for as long as the component is mounted.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::animator::ProximityGraphAnimator;
use super::error::FieldError;
use super::frame_loop::FrameLoop;
use super::render::CanvasRenderer;
use super::theme::Theme;
use super::types::FieldConfig;

type Field = Rc<RefCell<Option<ProximityGraphAnimator<CanvasRenderer>>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// CSS size the canvas should occupy.
fn target_size(
	window: &Window,
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		return window_size(window).unwrap_or((0.0, 0.0));
	}
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| parent.as_ref().map_or(0.0, |p| p.client_width() as f64)),
		height.unwrap_or_else(|| parent.as_ref().map_or(0.0, |p| p.client_height() as f64)),
	)
}

fn build_field(
	window: &Window,
	canvas: HtmlCanvasElement,
	mut config: FieldConfig,
	(w, h): (f64, f64),
) -> Result<ProximityGraphAnimator<CanvasRenderer>, FieldError> {
	if w <= 0.0 || h <= 0.0 {
		return Err(FieldError::EmptyViewport { width: w, height: h });
	}
	if config.seed.is_none() {
		config.seed = Some((js_sys::Math::random() * u64::MAX as f64) as u64);
	}
	let pixel_ratio = window.device_pixel_ratio().min(config.max_pixel_ratio);
	let renderer = CanvasRenderer::new(canvas, Theme::default(), w, h, pixel_ratio)?;
	ProximityGraphAnimator::new(config, w, h, renderer)
}

/// Renders the animated proximity graph on a canvas element.
///
/// The canvas sizes itself to its parent container by default; set
/// `fullscreen = true` to track the window instead. Explicit `width`/`height`
/// override automatic sizing. `config` is read once, when the canvas mounts.
#[component]
pub fn NeuralFieldCanvas(
	#[prop(into)] config: Signal<FieldConfig>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let field: Field = Rc::new(RefCell::new(None));
	let frame_loop: Rc<RefCell<Option<FrameLoop>>> = Rc::new(RefCell::new(None));
	let pointer_cb: Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if field.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let size = target_size(&window, &canvas, fullscreen, width, height);
		let animator = match build_field(&window, canvas.clone(), config.get_untracked(), size) {
			Ok(animator) => animator,
			Err(e) => {
				warn!("neural-field: not starting: {}", e);
				return;
			}
		};
		*field.borrow_mut() = Some(animator);

		let field_pointer = field.clone();
		*pointer_cb.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
			let Some((vw, vh)) = web_sys::window().as_ref().and_then(window_size) else {
				return;
			};
			if let Some(ref mut f) = *field_pointer.borrow_mut() {
				f.on_pointer_move(ev.client_x() as f64, ev.client_y() as f64, vw, vh);
			}
		}));
		if let (Some(document), Some(cb)) = (window.document(), pointer_cb.borrow().as_ref()) {
			let _ = document.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}

		let (field_resize, canvas_resize) = (field.clone(), canvas.clone());
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = target_size(&win, &canvas_resize, fullscreen, width, height);
			if let Some(ref mut f) = *field_resize.borrow_mut() {
				// Zero-size resizes are logged and skipped by the animator.
				let _ = f.on_resize(nw, nh);
			}
		}));
		if let Some(cb) = resize_cb.borrow().as_ref() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let field_tick = field.clone();
		let ticker = FrameLoop::new(move || {
			if let Some(ref mut f) = *field_tick.borrow_mut() {
				f.tick();
			}
		});
		ticker.start();
		*frame_loop.borrow_mut() = Some(ticker);
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="neural-field-canvas"
		/>
	}
}
