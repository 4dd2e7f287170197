//! Browser host.
//!
//! [`VaporTextHost::mount`] wires a [`VaporTextAnimator`] to a DOM element:
//! a [`CanvasSurface`] for drawing, `requestAnimationFrame` for the frame
//! loop, an `IntersectionObserver` that starts and stops the loop, a
//! `ResizeObserver` for resampling, and a `MutationObserver` on the
//! document root that maps its `dark` class onto the appearance signal.
//!
//! The loop only runs while the element is within 50px of the viewport.
//! Leaving it cancels the pending frame synchronously.

mod canvas;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MutationObserver, MutationObserverInit, ResizeObserver, Window,
};
use web_time::Instant;

pub use self::canvas::CanvasSurface;
use self::canvas::js_error;
use crate::appearance::{Appearance, AppearanceSignal};
use crate::engine::{FrameStatus, VaporTextAnimator};
use crate::error::VaporError;
use crate::options::Options;

/// Class on the document root that selects the dark appearance.
const DARK_CLASS: &str = "dark";
/// Margin around the viewport within which the effect counts as visible.
const VISIBILITY_MARGIN: &str = "50px";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct HostState {
    animator: VaporTextAnimator,
    surface: CanvasSurface,
    frame_id: Option<i32>,
}

/// A mounted effect. Dropping it stops the loop, disconnects the observers
/// and removes the elements it added.
pub struct VaporTextHost {
    window: Window,
    state: Rc<RefCell<HostState>>,
    tick: FrameCallback,
    accessible: Element,
    intersection: IntersectionObserver,
    resize: ResizeObserver,
    mutation: MutationObserver,
    _on_intersect: Closure<dyn FnMut(js_sys::Array)>,
    _on_resize: Closure<dyn FnMut()>,
    _on_mutation: Closure<dyn FnMut()>,
}

impl VaporTextHost {
    /// Attach the effect to `host`.
    ///
    /// Installs the console logger and panic hook on first use.
    pub fn mount(host: &HtmlElement, options: &Options) -> Result<Self, VaporError> {
        init_logging();

        let window = web_sys::window().ok_or_else(|| host_error("no window"))?;
        let document = window.document().ok_or_else(|| host_error("no document"))?;
        let root = document
            .document_element()
            .ok_or_else(|| host_error("no document element"))?;

        let signal = AppearanceSignal::new(appearance_of(&root));
        let animator = VaporTextAnimator::new(options, &signal);
        let accessible = accessible_element(&document, host, animator.options())?;
        let surface = CanvasSurface::attach(host)?;

        let state = Rc::new(RefCell::new(HostState {
            animator,
            surface,
            frame_id: None,
        }));
        let tick = frame_callback(&window, &state);

        let on_intersect = {
            let window = window.clone();
            let state = Rc::clone(&state);
            let tick = Rc::clone(&tick);
            Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
                let visible = entries
                    .iter()
                    .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                    .last()
                    .is_some_and(|e| e.is_intersecting());
                set_visible(&window, &state, &tick, visible);
            })
        };
        let init = IntersectionObserverInit::new();
        init.set_root_margin(VISIBILITY_MARGIN);
        init.set_threshold(&JsValue::from_f64(0.0));
        let intersection =
            IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)
                .map_err(js_error)?;
        intersection.observe(host);

        let on_resize = {
            let state = Rc::clone(&state);
            Closure::<dyn FnMut()>::new(move || {
                if let Ok(mut st) = state.try_borrow_mut() {
                    st.animator.notify_resize();
                }
            })
        };
        let resize = ResizeObserver::new(on_resize.as_ref().unchecked_ref()).map_err(js_error)?;
        resize.observe(host);

        let on_mutation = {
            let root = root.clone();
            Closure::<dyn FnMut()>::new(move || signal.set(appearance_of(&root)))
        };
        let mutation = MutationObserver::new(on_mutation.as_ref().unchecked_ref()).map_err(js_error)?;
        let watch = MutationObserverInit::new();
        watch.set_attributes(true);
        watch.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str("class")));
        mutation
            .observe_with_options(&root, &watch)
            .map_err(js_error)?;

        log::info!("vaportext mounted");
        Ok(Self {
            window,
            state,
            tick,
            accessible,
            intersection,
            resize,
            mutation,
            _on_intersect: on_intersect,
            _on_resize: on_resize,
            _on_mutation: on_mutation,
        })
    }

    /// Replace the options. Glyph-affecting changes resample on the next
    /// frame.
    pub fn set_options(&self, options: &Options) {
        let mut st = self.state.borrow_mut();
        st.animator.set_options(options, Instant::now());
        self.accessible
            .set_text_content(Some(&st.animator.options().accessible_text()));
    }

    /// Smoothed frames per second of the running loop.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.state.borrow().animator.fps()
    }
}

impl Drop for VaporTextHost {
    fn drop(&mut self) {
        self.intersection.disconnect();
        self.resize.disconnect();
        self.mutation.disconnect();
        if let Ok(mut st) = self.state.try_borrow_mut() {
            if let Some(id) = st.frame_id.take() {
                let _ = self.window.cancel_animation_frame(id);
            }
            st.animator.set_visible(false);
            st.surface.detach();
        }
        self.accessible.remove();
        // The frame closure holds a handle to itself; dropping it here breaks
        // the cycle.
        let _ = self.tick.borrow_mut().take();
        log::info!("vaportext unmounted");
    }
}

impl std::fmt::Debug for VaporTextHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaporTextHost").finish_non_exhaustive()
    }
}

fn host_error(msg: &str) -> VaporError {
    VaporError::Host(msg.to_owned())
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // Fails harmlessly if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
}

fn appearance_of(root: &Element) -> Appearance {
    if root.class_list().contains(DARK_CLASS) {
        Appearance::Dark
    } else {
        Appearance::Light
    }
}

/// Visually hidden copy of the texts for assistive technology.
fn accessible_element(
    document: &web_sys::Document,
    host: &HtmlElement,
    options: &Options,
) -> Result<Element, VaporError> {
    let el = document
        .create_element(options.tag.tag_name())
        .map_err(js_error)?;
    el.set_attribute(
        "style",
        "position:absolute;width:0;height:0;overflow:hidden;user-select:none;pointer-events:none",
    )
    .map_err(js_error)?;
    el.set_text_content(Some(&options.accessible_text()));
    let _ = host.append_child(&el).map_err(js_error)?;
    Ok(el)
}

/// Build the self-rescheduling frame closure.
fn frame_callback(window: &Window, state: &Rc<RefCell<HostState>>) -> FrameCallback {
    let tick: FrameCallback = Rc::new(RefCell::new(None));
    let window = window.clone();
    let state = Rc::clone(state);
    let handle = Rc::clone(&tick);

    *tick.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        let status = {
            let mut guard = state.borrow_mut();
            let st = &mut *guard;
            st.frame_id = None;
            st.animator.frame(&mut st.surface, Instant::now())
        };
        if status != FrameStatus::Idle {
            schedule(&window, &state, &handle);
        }
    }));
    tick
}

fn schedule(window: &Window, state: &Rc<RefCell<HostState>>, tick: &FrameCallback) {
    let callback = tick
        .borrow()
        .as_ref()
        .map(|c| c.as_ref().unchecked_ref::<js_sys::Function>().clone());
    let Some(callback) = callback else {
        return;
    };
    match window.request_animation_frame(&callback) {
        Ok(id) => state.borrow_mut().frame_id = Some(id),
        Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
    }
}

fn set_visible(
    window: &Window,
    state: &Rc<RefCell<HostState>>,
    tick: &FrameCallback,
    visible: bool,
) {
    let idle = {
        let mut st = state.borrow_mut();
        st.animator.set_visible(visible);
        if !visible {
            if let Some(id) = st.frame_id.take() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        st.frame_id.is_none()
    };
    if visible && idle {
        schedule(window, state, tick);
    }
}
