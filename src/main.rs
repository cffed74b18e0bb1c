//! Orb Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use orb_rush::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
    use orb_rush::persistence::LocalStore;
    use orb_rush::platform::{FpsCounter, now_ms, surface_to_sim};
    use orb_rush::renderer::{RenderState, RenderSurface};
    use orb_rush::ui::{RunSignal, UiSink};
    use orb_rush::{Game, Settings, Tuning, viewport};

    /// HUD backed by DOM elements
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, selector: &str, text: &str) {
            if let Some(el) = self.document.query_selector(selector).ok().flatten() {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", !visible);
            }
        }
    }

    impl UiSink for DomHud {
        fn score(&mut self, score: u64, level: u32) {
            self.set_text("#hud-score .hud-value", &score.to_string());
            self.set_text("#hud-level .hud-value", &level.to_string());
        }

        fn run_state(&mut self, signal: RunSignal) {
            self.set_text("#hud-high .hud-value", &signal.high_score.to_string());
            self.set_visible("start-screen", signal.show_start_screen);
            self.set_visible("hud", signal.is_running);

            // Best score line only once there is one
            self.set_visible("start-best", signal.high_score > 0);
            self.set_text("#start-best .hud-value", &signal.high_score.to_string());
        }

        fn fps(&mut self, fps: Option<u32>) {
            self.set_visible("hud-fps", fps.is_some());
            if let Some(fps) = fps {
                self.set_text("#hud-fps .hud-value", &fps.to_string());
            }
        }
    }

    /// Everything the frame callback needs
    struct App {
        game: Game<LocalStore, DomHud>,
        render_state: Option<RenderState>,
        fps: FpsCounter,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let fps = self.fps.record(time);
            self.game.report_fps(fps);

            let surface = self
                .render_state
                .as_mut()
                .map(|rs| rs as &mut dyn RenderSurface);
            self.game.frame(now_ms(), surface);
        }

        fn start(&mut self) {
            let seed = js_sys::Date::now() as u64;
            if self.game.start(seed) {
                log::info!("Run started with seed: {}", seed);
            }
        }

        fn pointer_at(&mut self, canvas: &HtmlCanvasElement, client_x: f32, client_y: f32) {
            let rect = canvas.get_bounding_client_rect();
            let mapped = surface_to_sim(
                Vec2::new(client_x, client_y),
                Vec2::new(rect.left() as f32, rect.top() as f32),
                Vec2::new(rect.width() as f32, rect.height() as f32),
                viewport(),
            );
            if let Some(pos) = mapped {
                self.game.pointer_moved(pos);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Orb Rush starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element, nothing to draw on");
            return;
        };

        // Fixed logical resolution; CSS may stretch it
        let width = VIEWPORT_WIDTH as u32;
        let height = VIEWPORT_HEIGHT as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let store = LocalStore;
        let settings = Settings::load(&store);
        let hud = DomHud {
            document: document.clone(),
        };
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(Tuning::default(), settings, store, hud, seed);

        let app = Rc::new(RefCell::new(App {
            game,
            render_state: None,
            fps: FpsCounter::new(),
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;

                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height).await {
                            Ok(rs) => app.borrow_mut().render_state = Some(rs),
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        setup_input_handlers(&canvas, app.clone());
        setup_start_button(&document, app.clone());
        setup_auto_pause(app.clone());

        // Start game loop
        request_animation_frame(app);

        log::info!("Orb Rush running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse move
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().pointer_at(
                    &canvas_clone,
                    event.client_x() as f32,
                    event.client_y() as f32,
                );
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move, non-passive so scrolling can be suppressed
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut().pointer_at(
                        &canvas_clone,
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                    );
                }
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => a.start(),
                    "Escape" | "p" | "P" => {
                        a.game.toggle_pause();
                    }
                    "f" | "F" => {
                        a.game.toggle_fps();
                    }
                    "q" | "Q" => {
                        a.game.cycle_quality();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().game.pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.pause();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Orb Rush (native) starting...");
    log::info!("Native mode runs a headless session - use `trunk serve` for the playable web version");

    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--dump-tuning") {
        println!("{}", orb_rush::Tuning::default().to_json());
        return;
    }

    let tuning = native::load_tuning(arg.as_deref());
    native::run_headless(tuning);
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::f32::consts::TAU;

    use glam::Vec2;
    use orb_rush::persistence::MemoryStore;
    use orb_rush::platform::now_ms;
    use orb_rush::renderer::HeadlessSurface;
    use orb_rush::ui::NullUi;
    use orb_rush::{Game, Settings, Tuning, viewport};

    /// Two minutes at 60 Hz
    const MAX_FRAMES: u64 = 60 * 120;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Tuning from a JSON file, or defaults if absent/invalid
    pub fn load_tuning(path: Option<&str>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}: {})", path, e);
                Tuning::default()
            }
        }
    }

    /// Scripted run: the pointer sweeps an ellipse around the arena
    pub fn run_headless(tuning: Tuning) {
        let seed = now_ms() as u64;
        let mut game = Game::new(tuning, Settings::default(), MemoryStore::new(), NullUi, seed);
        let mut surface = HeadlessSurface::new();
        game.start(seed);

        let center = viewport() / 2.0;
        let radii = viewport() * 0.35;
        let mut now = 0.0;
        let mut frame = 0;

        while frame < MAX_FRAMES {
            let t = frame as f32 / 240.0 * TAU;
            game.pointer_moved(center + Vec2::new(t.cos(), (t * 1.5).sin()) * radii);
            now += FRAME_MS;
            if !game.frame(now, Some(&mut surface)) {
                break;
            }
            frame += 1;
        }

        let state = &game.state;
        log::info!(
            "Session over after {} frames: score {}, level {}, size {:.1}, high score {}",
            frame,
            state.score,
            state.level,
            state.player.size,
            state.high_score
        );
        log::info!(
            "Rendered {} frames, peak {} vertices",
            surface.frames,
            surface.peak_vertex_count
        );
    }
}
