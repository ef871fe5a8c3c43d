//! `requestAnimationFrame` driver.
//!
//! The loop calls its step function once per animation frame, never
//! re-entrantly, until it is stopped or dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Repeating per-frame callback with an explicit start/stop.
pub struct FrameLoop {
	callback: Callback,
	/// Id of the pending frame request. `None` while stopped.
	pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	pub fn new(mut step: impl FnMut() + 'static) -> Self {
		let callback: Callback = Rc::new(RefCell::new(None));
		let pending = Rc::new(Cell::new(None));
		let (callback_inner, pending_inner) = (callback.clone(), pending.clone());

		*callback.borrow_mut() = Some(Closure::new(move || {
			if pending_inner.get().is_none() {
				return;
			}
			step();
			pending_inner.set(request_frame(&callback_inner));
		}));

		Self { callback, pending }
	}

	pub fn start(&self) {
		if self.is_running() {
			return;
		}
		self.pending.set(request_frame(&self.callback));
		debug!("neural-field: frame loop started");
	}

	pub fn stop(&self) {
		if let Some(id) = self.pending.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
			debug!("neural-field: frame loop stopped");
		}
	}

	pub fn is_running(&self) -> bool {
		self.pending.get().is_some()
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}

fn request_frame(callback: &Callback) -> Option<i32> {
	let window = web_sys::window()?;
	let cb = callback.borrow();
	window
		.request_animation_frame(cb.as_ref()?.as_ref().unchecked_ref())
		.ok()
}
