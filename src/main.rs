//! Bouncing Balls entry point
//!
//! The browser build renders with WebGPU from `requestAnimationFrame`.
//! The native build runs the same frame loop headless for a fixed number of
//! frames and logs a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use bouncing_balls::driver::{EventSource, FrameDriver, FrameEvent};
    use bouncing_balls::renderer::{BallSprite, SdfRenderState};
    use bouncing_balls::sim::SimState;
    use bouncing_balls::{Error, Result, SimConfig};

    /// Events queued by DOM listeners, drained once per frame
    #[derive(Default)]
    struct BrowserEvents {
        queue: VecDeque<FrameEvent>,
    }

    impl EventSource for BrowserEvents {
        fn poll_event(&mut self) -> Option<FrameEvent> {
            self.queue.pop_front()
        }
    }

    struct App {
        driver: FrameDriver<SdfRenderState>,
        events: BrowserEvents,
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bouncing Balls starting...");

        match start().await {
            Ok(app) => {
                request_animation_frame(app);
                log::info!("Bouncing Balls running!");
            }
            Err(e) => log::error!("Failed to initialize: {}", e),
        }
    }

    async fn start() -> Result<Rc<RefCell<App>>> {
        let window = web_sys::window().ok_or_else(|| Error::Startup("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::Startup("no document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| Error::Startup("no #canvas element".into()))?
            .dyn_into()
            .map_err(|_| Error::Startup("#canvas is not a canvas".into()))?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let config = SimConfig::load()?;
        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let state = SimState::new(&config, seed)?;

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| Error::Startup(format!("failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| Error::Startup(format!("failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let sprite = Rc::new(BallSprite::default());
        let render_state =
            SdfRenderState::new(surface, &adapter, width, height, state.arena, sprite).await?;

        let app = Rc::new(RefCell::new(App {
            driver: FrameDriver::new(state, render_state),
            events: BrowserEvents::default(),
        }));

        setup_input_handlers(app.clone());
        setup_auto_pause(app.clone());

        Ok(app)
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        let running = {
            let mut guard = app.borrow_mut();
            let App { driver, events } = &mut *guard;
            driver.frame(events, time)
        };

        if running {
            request_animation_frame(app);
        } else {
            log::info!("Simulation stopped");
        }
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Space/P toggles pause, Escape stops the loop
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let frame_event = match event.key().as_str() {
                " " | "p" | "P" => FrameEvent::TogglePause,
                "Escape" => FrameEvent::Quit,
                _ => return,
            };
            app.borrow_mut().events.queue.push_back(frame_event);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Visibility change (tab switch, minimize)
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut a = app.borrow_mut();
                if !a.driver.is_paused() {
                    a.events.queue.push_back(FrameEvent::TogglePause);
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames simulated by the headless native run (10 s at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u64 = 600;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bouncing Balls (native, headless) starting...");

    if let Err(e) = run_headless() {
        log::error!("Failed to initialize: {}", e);
        eprintln!("Failed to initialize: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_headless() -> bouncing_balls::Result<()> {
    use std::rc::Rc;
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use bouncing_balls::SimConfig;
    use bouncing_balls::driver::{FrameBudget, FrameDriver};
    use bouncing_balls::renderer::{BallSprite, HeadlessRenderer};
    use bouncing_balls::sim::SimState;

    let config = SimConfig::load()?;
    let seed = config.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    let state = SimState::new(&config, seed)?;

    let sprite = Rc::new(BallSprite::default());
    let mut driver = FrameDriver::new(state, HeadlessRenderer::new(sprite));

    let start = Instant::now();
    let summary = driver.run(&mut FrameBudget::new(HEADLESS_FRAMES), || {
        start.elapsed().as_secs_f64() * 1000.0
    });

    let contained = driver
        .state
        .bodies
        .iter()
        .all(|body| driver.state.arena.contains(body));
    log::info!(
        "Simulated {} steps in {:.1} ms (seed {}, energy {:.2}, all bodies contained: {})",
        summary.steps,
        start.elapsed().as_secs_f64() * 1000.0,
        seed,
        driver.state.bodies.kinetic_energy(),
        contained
    );
    println!(
        "{} bodies, {} steps, {} collisions, {} wall hits",
        driver.state.body_count(),
        summary.steps,
        summary.collisions,
        summary.wall_hits
    );

    Ok(())
}
