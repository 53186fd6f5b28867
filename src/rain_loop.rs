//! The rendering task: owns a [`GlyphRain`], its canvas and its RNG, and keeps
//! them painted once per display refresh until unmounted.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::config::RainConfig;
use crate::error::RainError;
use crate::rain::GlyphRain;
use crate::surface::CanvasSurface;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Everything a frame touches.
struct Scene {
    rain: GlyphRain,
    surface: CanvasSurface,
    rng: SmallRng,
}

impl Scene {
    fn resize(&mut self, width: u32, height: u32) {
        self.surface.set_size(width, height);
        self.rain.resize(width, height);
    }

    fn tick(&mut self) {
        self.rain.render_frame(&mut self.surface, &mut self.rng);
    }
}

/// A running rain. Dropping it without [`RainLoop::unmount`] leaves the loop running.
pub struct RainLoop {
    window: Window,
    scene: Rc<RefCell<Scene>>,
    frame: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
    on_resize: Closure<dyn FnMut()>,
}

impl RainLoop {
    /// Attach to the configured canvas, size it to the viewport and start drawing.
    pub fn mount(window: &Window, config: &RainConfig) -> Result<Self, RainError> {
        let rain = GlyphRain::new(config)?;
        let surface = canvas_surface(window, &config.canvas_id)?;
        let seed = config.seed.unwrap_or_else(|| entropy_seed(window));
        let mut scene = Scene { rain, surface, rng: SmallRng::seed_from_u64(seed) };
        let (width, height) = viewport_size(window);
        scene.resize(width, height);
        tracing::info!(canvas = %config.canvas_id, width, height, seed, "mounting glyph rain");

        let scene = Rc::new(RefCell::new(scene));
        let pending = Rc::new(Cell::new(None));

        let on_resize = {
            let window = window.clone();
            let scene = scene.clone();
            Closure::wrap(Box::new(move || {
                let (width, height) = viewport_size(&window);
                scene.borrow_mut().resize(width, height);
            }) as Box<dyn FnMut()>)
        };

        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let callback = {
            let f = frame.clone();
            let window = window.clone();
            let scene = scene.clone();
            let pending = pending.clone();
            Closure::wrap(Box::new(move |_ts: f64| {
                scene.borrow_mut().tick();
                if let Some(cb) = f.borrow().as_ref() {
                    pending.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
                }
            }) as Box<dyn FnMut(f64)>)
        };
        // Nothing runs before we yield back to the event loop, so storing after the request is fine.
        let handle = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        pending.set(Some(handle));
        *frame.borrow_mut() = Some(callback);

        if let Err(err) =
            window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        {
            window.cancel_animation_frame(handle).ok();
            frame.borrow_mut().take();
            return Err(err.into());
        }

        Ok(Self { window: window.clone(), scene, frame, pending, on_resize })
    }

    /// Stop drawing and release the listeners and closures.
    pub fn unmount(self) {
        if let Some(handle) = self.pending.take() {
            self.window.cancel_animation_frame(handle).ok();
        }
        self.window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
            .ok();
        // The frame closure holds a clone of its own cell; drop it to break the cycle.
        self.frame.borrow_mut().take();
        let columns = self.scene.borrow().rain.columns();
        tracing::info!(columns, "glyph rain unmounted");
    }
}

fn canvas_surface(window: &Window, canvas_id: &str) -> Result<CanvasSurface, RainError> {
    let doc = window.document().ok_or(RainError::NoDocument)?;
    let element = doc
        .get_element_by_id(canvas_id)
        .ok_or_else(|| RainError::CanvasNotFound(canvas_id.to_string()))?;
    let canvas: HtmlCanvasElement = element
        .dyn_into()
        .map_err(|_| RainError::NotACanvas(canvas_id.to_string()))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(RainError::NoContext)?
        .dyn_into()
        .map_err(|_| RainError::NoContext)?;
    Ok(CanvasSurface::new(canvas, ctx))
}

/// `innerWidth` / `innerHeight`, clamped to zero for anything odd.
fn viewport_size(window: &Window) -> (u32, u32) {
    let px = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).map_or(0, clamp_px);
    (px(window.inner_width()), px(window.inner_height()))
}

fn clamp_px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 { v.min(f64::from(u32::MAX)) as u32 } else { 0 }
}

#[cfg(feature = "rng")]
fn entropy_seed(window: &Window) -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(err) => {
            tracing::warn!(%err, "getrandom failed, seeding from clock");
            clock_seed(window)
        }
    }
}

#[cfg(not(feature = "rng"))]
fn entropy_seed(window: &Window) -> u64 {
    clock_seed(window)
}

fn clock_seed(window: &Window) -> u64 {
    let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
    now.to_bits().wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_px() {
        assert_eq!(clamp_px(1280.0), 1280);
        assert_eq!(clamp_px(799.6), 799);
        assert_eq!(clamp_px(0.0), 0);
        assert_eq!(clamp_px(-20.0), 0);
        assert_eq!(clamp_px(f64::NAN), 0);
        assert_eq!(clamp_px(f64::INFINITY), 0);
    }
}
