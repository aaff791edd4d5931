//! Pin Spin entry point
//!
//! Handles platform-specific initialization and drives the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use pin_spin::consts::{DESIGN_HEIGHT, DESIGN_WIDTH};
    use pin_spin::persistence::LocalStore;
    use pin_spin::platform::FrameClock;
    use pin_spin::renderer;
    use pin_spin::Session;

    /// Everything the frame loop touches
    struct App {
        session: Session<LocalStore>,
        clock: FrameClock,
        canvas: HtmlCanvasElement,
        /// Re-acquired lazily if the first attempt fails; a frame without a
        /// context skips rendering and tries again next callback
        ctx: Option<CanvasRenderingContext2d>,
    }

    impl App {
        fn acquire_context(&mut self) {
            if self.ctx.is_some() {
                return;
            }
            self.ctx = self
                .canvas
                .get_context("2d")
                .ok()
                .flatten()
                .and_then(|o| o.dyn_into::<CanvasRenderingContext2d>().ok());
            if self.ctx.is_none() {
                log::warn!("no 2d context this frame, skipping render");
            }
        }

        fn frame(&mut self, time_ms: f64) {
            let delta = self.clock.delta_ms(time_ms);
            self.session.frame(delta);

            self.acquire_context();
            if let Some(ctx) = &self.ctx {
                renderer::render(ctx, self.session.game());
            }
        }
    }

    /// Clamp the window dimensions to the design aspect
    fn canvas_dimensions(window: &web_sys::Window) -> (f32, f32) {
        let inner_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(DESIGN_WIDTH as f64) as f32;
        let inner_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(DESIGN_HEIGHT as f64) as f32;
        (inner_w.min(DESIGN_WIDTH), inner_h.min(DESIGN_HEIGHT))
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pin Spin starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = canvas_dimensions(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(width, height, seed, LocalStore::new());

        let app = Rc::new(RefCell::new(App {
            session,
            clock: FrameClock::new(),
            canvas: canvas.clone(),
            ctx: None,
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_resize_handler(app.clone());

        request_animation_frame(app);
        log::info!("Pin Spin running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().session.tap();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().session.tap();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let (width, height) = canvas_dimensions(&window);
            let mut app = app.borrow_mut();
            app.canvas.set_width(width as u32);
            app.canvas.set_height(height as u32);
            app.session.resize(width, height);
            app.clock.reset();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            app.borrow_mut().frame(time);
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use pin_spin::consts::{DESIGN_HEIGHT, DESIGN_WIDTH, REFERENCE_FRAME_MS};
    use pin_spin::persistence::MemoryStore;
    use pin_spin::sim::GamePhase;
    use pin_spin::Session;

    env_logger::init();
    log::info!("Pin Spin (native) starting - headless demo");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut session = Session::new(DESIGN_WIDTH, DESIGN_HEIGHT, seed, MemoryStore::new());

    // Keep tapping and ticking at 60 Hz until the run ends or we give up
    let mut frames = 0u32;
    while session.game().phase != GamePhase::GameOver && frames < 60 * 120 {
        if session.game().flying_pin.is_none()
            && matches!(session.game().phase, GamePhase::Idle | GamePhase::Playing)
        {
            session.tap();
        }
        session.frame(REFERENCE_FRAME_MS);
        frames += 1;
    }

    let game = session.game();
    log::info!(
        "demo finished after {frames} frames: phase {:?}, level {}, {} pins attached",
        game.phase,
        game.level.number,
        game.attached_pins.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
