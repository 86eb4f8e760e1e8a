//! Neon Blast entry point
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

    use neon_blast::audio::AudioManager;
    use neon_blast::persistence::LocalStore;
    use neon_blast::platform::{FrameLoop, PointerCell, client_to_canvas};
    use neon_blast::renderer::{RenderState, scene};
    use neon_blast::sim::{GamePhase, TickInput};
    use neon_blast::{Game, Hud, Tuning};

    /// Page-level state: the game plus what it is drawn onto
    struct App {
        game: Game<LocalStore, AudioManager>,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        document: Document,
        pointer: PointerCell,
        last_hud: Option<Hud>,
    }

    impl App {
        /// Match the backing store to the displayed size
        fn measure(&mut self) -> Option<Vec2> {
            if !self.canvas.is_connected() {
                return None;
            }
            let w = self.canvas.client_width().max(0) as u32;
            let h = self.canvas.client_height().max(0) as u32;
            if w == 0 || h == 0 {
                // Hidden for now; the tick keeps the previous viewport
                return Some(Vec2::ZERO);
            }
            if self.canvas.width() != w || self.canvas.height() != h {
                self.canvas.set_width(w);
                self.canvas.set_height(h);
                if let Some(rs) = self.render_state.as_mut() {
                    rs.resize(w, h);
                }
            }
            Some(Vec2::new(w as f32, h as f32))
        }

        /// One animation frame. Returns false to stop the loop.
        fn step(&mut self) -> bool {
            let Some(viewport) = self.measure() else {
                log::error!("Canvas is gone, stopping");
                return false;
            };

            let input = TickInput {
                viewport,
                pointer: self.pointer.get(),
            };
            self.game.frame(&input);

            let keep_going = self.render();
            self.update_hud();
            keep_going
        }

        fn render(&mut self) -> bool {
            let Some(rs) = self.render_state.as_mut() else {
                return true;
            };
            let vertices = scene::build(self.game.state());
            let offset = scene::shake_offset(self.game.state(), self.game.settings());
            match rs.render(&vertices, offset) {
                Ok(_) => true,
                Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                    rs.reconfigure();
                    true
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                    false
                }
                Err(e) => {
                    log::warn!("Render error: {:?}", e);
                    true
                }
            }
        }

        /// Mirror the HUD into the DOM when it changes
        fn update_hud(&mut self) {
            let hud = self.game.hud();
            if self.last_hud == Some(hud) {
                return;
            }
            self.last_hud = Some(hud);

            set_text(&self.document, "hud-score", &hud.score.to_string());
            set_text(&self.document, "hud-high", &format!("HI: {}", hud.high_score));
            set_text(&self.document, "hud-health", &hud.hearts());
            set_text(&self.document, "final-score", &hud.score.to_string());
            set_text(&self.document, "mute-btn", if hud.muted { "Unmute" } else { "Mute" });

            set_hidden(&self.document, "start-screen", hud.phase != GamePhase::Start);
            set_hidden(&self.document, "game-over", hud.phase != GamePhase::GameOver);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Neon Blast starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::mount(
            seed,
            Vec2::new(width as f32, height as f32),
            Tuning::default(),
            LocalStore::new(),
            AudioManager::new(),
        );
        let volume = game.settings().volume;
        game.audio_mut().set_volume(volume);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            match RenderState::new(surface, &adapter, width, height, scene::clear_color()).await {
                Ok(rs) => rs,
                Err(e) => {
                    log::error!("Renderer setup failed: {}", e);
                    return;
                }
            };

        let pointer = PointerCell::new();
        let app = Rc::new(RefCell::new(App {
            game,
            render_state: Some(render_state),
            canvas: canvas.clone(),
            document: document.clone(),
            pointer: pointer.clone(),
            last_hud: None,
        }));

        setup_input_handlers(&canvas, pointer);
        setup_buttons(&document, app.clone());

        let looped = app.clone();
        let frame_loop = FrameLoop::start(move |_time: f64| looped.borrow_mut().step());
        setup_teardown(&window, frame_loop);

        log::info!("Neon Blast running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, pointer: PointerCell) {
        // Mouse move
        {
            let pointer = pointer.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                pointer.set(client_to_canvas(
                    Vec2::new(event.client_x() as f32, event.client_y() as f32),
                    Vec2::new(rect.left() as f32, rect.top() as f32),
                ));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start and move share one handler
        for name in ["touchstart", "touchmove"] {
            let pointer = pointer.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    pointer.set(client_to_canvas(
                        Vec2::new(touch.client_x() as f32, touch.client_y() as f32),
                        Vec2::new(rect.left() as f32, rect.top() as f32),
                    ));
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        for id in ["start-btn", "retry-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let mut app = app.borrow_mut();
                    // Last session's sample would override the start position
                    app.pointer.clear();
                    app.game.start();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let muted = app.borrow_mut().game.toggle_mute();
                log::info!("Muted: {}", muted);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_teardown(window: &web_sys::Window, frame_loop: FrameLoop) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            frame_loop.stop();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Blast (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match neon_blast::Tuning::from_json(&json) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Bad tuning file {}: {}", path, e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                log::error!("Cannot read {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => neon_blast::Tuning::default(),
    };

    let score = autopilot(tuning, 0x6e65_6f6e, 60 * 60 * 5);
    println!("Autopilot finished with score {}", score);
}

/// Play a session by steering under the lowest enemy
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(tuning: neon_blast::Tuning, seed: u64, max_frames: u32) -> u64 {
    use glam::Vec2;
    use neon_blast::Game;
    use neon_blast::audio::NullAudio;
    use neon_blast::persistence::MemoryStore;
    use neon_blast::sim::{GamePhase, TickInput};

    let viewport = Vec2::new(800.0, 600.0);
    let mut game = Game::mount(seed, viewport, tuning, MemoryStore::new(), NullAudio);
    game.start();

    for frame in 0..max_frames {
        let state = game.state();
        let target = state
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.rect().center().x)
            .unwrap_or(viewport.x / 2.0);
        let input = TickInput {
            viewport,
            pointer: Some(Vec2::new(target, viewport.y - 84.0)),
        };
        game.frame(&input);

        if game.hud().phase == GamePhase::GameOver {
            log::info!("Autopilot died on frame {}", frame);
            break;
        }
    }

    let hud = game.hud();
    log::info!("Level {} reached, score {}", hud.level, hud.score);
    hud.score
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
