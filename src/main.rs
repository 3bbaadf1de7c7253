//! Platform Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use platform_dash::WorldConfig;
    use platform_dash::render::{FrameView, RenderSink, palette};
    use platform_dash::sim::{InputEvent, Key, LevelSet, Session, TimerToken, apply_input, tick};

    /// Draws frames onto the 2D canvas
    struct CanvasSink {
        ctx: CanvasRenderingContext2d,
    }

    impl RenderSink for CanvasSink {
        fn draw(&mut self, frame: &FrameView<'_>) {
            let (w, h) = (frame.world.x as f64, frame.world.y as f64);
            self.ctx.clear_rect(0.0, 0.0, w, h);

            for sprite in frame.sprites() {
                let r = sprite.rect;
                self.ctx.set_fill_style_str(&sprite.color().css());
                self.ctx.fill_rect(
                    r.left() as f64,
                    r.top() as f64,
                    r.width() as f64,
                    r.height() as f64,
                );
            }

            let (lives, time) = frame.hud();
            self.ctx.set_fill_style_str(&palette::HUD_TEXT.css());
            self.ctx.set_font("20px Arial");
            let _ = self.ctx.fill_text(&lives, 10.0, 20.0);
            let _ = self.ctx.fill_text(&time, w - 100.0, 20.0);
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        sink: CanvasSink,
        /// Scheduled countdown interval: token it delivers + browser handle
        interval: Option<(TimerToken, i32)>,
    }

    impl Game {
        /// One animation frame. Returns true if the loop should continue.
        fn frame(&mut self) -> bool {
            if !self.session.is_playing() {
                return false;
            }
            tick(&mut self.session);
            if let Some(view) = FrameView::capture(&self.session) {
                self.sink.draw(&view);
            }
            for event in self.session.drain_events() {
                log::debug!("{:?}", event);
            }
            self.session.is_playing()
        }
    }

    fn set_display(id: &str, display: &str) {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        if let Some(element) = element {
            let _ = element.style().set_property("display", display);
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        if let Some(element) = element {
            let classes = element.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn request_animation_frame(f: &Closure<dyn FnMut()>) {
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(f.as_ref().unchecked_ref());
        }
    }

    /// Match the browser interval to the session's armed countdown token
    fn sync_countdown(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let wanted = game.borrow().session.timer_token();
        let scheduled = game.borrow().interval.map(|(token, _)| token);
        if wanted == scheduled {
            return;
        }

        if let Some((_, handle)) = game.borrow_mut().interval.take() {
            window.clear_interval_with_handle(handle);
        }

        let Some(token) = wanted else {
            return;
        };
        let g = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let delivered = g.borrow_mut().session.timer_tick(token);
            if delivered {
                sync_countdown(&g);
            }
        });
        let interval_ms = game.borrow().session.config().timer_interval_ms as i32;
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms,
        ) {
            Ok(handle) => game.borrow_mut().interval = Some((token, handle)),
            Err(e) => log::error!("Failed to schedule countdown: {:?}", e),
        }
        closure.forget();
    }

    /// Show the end-of-run notice, then return to the menu
    fn finish_run(game: &Rc<RefCell<Game>>) {
        let notice = game.borrow().session.notice();
        if let Some(notice) = notice {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(notice.message());
            }
            game.borrow_mut().session.acknowledge_game_over();
            set_display("menu", "block");
        }
        sync_countdown(game);
    }

    /// Drive frames until the session leaves Playing
    fn start_frame_loop(game: Rc<RefCell<Game>>) {
        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();

        *g.borrow_mut() = Some(Closure::new(move || {
            let keep_going = game.borrow_mut().frame();
            sync_countdown(&game);
            if keep_going {
                if let Some(cb) = f.borrow().as_ref() {
                    request_animation_frame(cb);
                }
            } else {
                log::info!("Frame loop stopped");
                finish_run(&game);
            }
        }));

        if let Some(cb) = g.borrow().as_ref() {
            request_animation_frame(cb);
        }
    }

    fn map_key(key: &str) -> Option<Key> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Jump),
            _ => None,
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = map_key(&event.key()) {
                    apply_input(&mut game.borrow_mut().session, InputEvent::Pressed(key));
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = map_key(&event.key()) {
                    apply_input(&mut game.borrow_mut().session, InputEvent::Released(key));
                }
            });
            let _ =
                document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(id: &str, handler: impl FnMut() + 'static) {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        let Some(element) = element else {
            log::warn!("Button #{} not found", id);
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(handler);
        let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("startGame", move || {
                let started = game.borrow_mut().session.start();
                if started {
                    set_display("menu", "none");
                    start_frame_loop(game.clone());
                    sync_countdown(&game);
                }
            });
        }
        {
            let game = game.clone();
            on_click("showInstructions", move || {
                game.borrow_mut().session.show_help();
                set_hidden("instructions", false);
            });
        }
        on_click("closeInstructions", move || {
            game.borrow_mut().session.hide_help();
            set_hidden("instructions", true);
        });
        on_click("exitGame", || {
            if let Some(window) = web_sys::window() {
                let _ = window.close();
            }
        });
    }

    pub fn run() {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("Canvas #gameCanvas not found");
            return;
        };
        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => match obj.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => {
                    log::error!("2D context has an unexpected type");
                    return;
                }
            },
            _ => {
                log::error!("Failed to get 2D context");
                return;
            }
        };

        // The canvas defines the world bounds
        let config = WorldConfig {
            world_width: canvas.width() as f32,
            world_height: canvas.height() as f32,
            ..WorldConfig::default()
        };
        if let Err(e) = config.validate() {
            log::error!("{}", e);
            return;
        }
        let levels = LevelSet::builtin();
        if let Err(e) = levels.validate(config.world_width, config.world_height) {
            log::error!("{}", e);
            return;
        }

        let game = Rc::new(RefCell::new(Game {
            session: Session::new(config, levels),
            sink: CanvasSink { ctx },
            interval: None,
        }));

        setup_keyboard(game.clone());
        setup_buttons(game);
        log::info!("Platform Dash ready");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use platform_dash::driver::{DriverStatus, FrameDriver};
    use platform_dash::render::AsciiCanvas;
    use platform_dash::sim::{InputEvent, Key, LevelSet, Session};
    use platform_dash::{ConfigError, WorldConfig};

    /// Virtual seconds the demo may run before giving up
    const DEMO_LIMIT_MS: f64 = 180_000.0;
    /// How far ahead the autopilot looks for hazards
    const LOOKAHEAD: f32 = 40.0;

    fn load_config(path: &str) -> Result<WorldConfig, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(json) => WorldConfig::from_json(&json),
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                Ok(WorldConfig::default())
            }
        }
    }

    /// Hold right, hop over hazards and up onto platforms ahead
    fn autopilot(session: &Session) -> Vec<InputEvent> {
        let mut events = vec![InputEvent::Pressed(Key::Right)];
        let Some(level) = session.level() else {
            return events;
        };
        let actor = session.actor().rect();
        let ahead = |r: &platform_dash::sim::Rect| {
            r.left() > actor.right() - 1.0 && r.left() - actor.right() < LOOKAHEAD
        };

        let hazard_ahead = level.hazards.iter().any(|h| ahead(h) && h.top() < actor.bottom());
        let ledge_ahead = level
            .platforms
            .iter()
            .any(|p| ahead(p) && p.top() < actor.bottom());
        if session.actor().is_grounded() && (hazard_ahead || ledge_ahead) {
            events.push(InputEvent::Pressed(Key::Jump));
        }
        events
    }

    pub fn run() {
        let config = match std::env::args().nth(1) {
            Some(path) => match load_config(&path) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("{}", e);
                    return;
                }
            },
            None => WorldConfig::default(),
        };

        let levels = LevelSet::builtin();
        if let Err(e) = levels.validate(config.world_width, config.world_height) {
            log::error!("{}", e);
            return;
        }

        let mut session = Session::new(config, levels);
        let mut driver = FrameDriver::new(session.config());
        let mut canvas = AsciiCanvas::new(40, 30);
        let mut input = autopilot;

        driver.start(&mut session);
        let mut deadline = 0.0;
        while driver.status() == DriverStatus::Running && deadline < DEMO_LIMIT_MS {
            deadline += 1000.0;
            driver.run_until(&mut session, &mut input, &mut canvas, deadline);
            for event in session.drain_events() {
                log::info!("[{:>6.0}ms] {:?}", driver.now_ms(), event);
            }
        }

        println!("{}", canvas.last_frame());
        match session.notice() {
            Some(notice) => {
                println!("{}", notice.message());
                driver.acknowledge(&mut session);
            }
            None => println!("Demo stopped after {:.0}s", driver.now_ms() / 1000.0),
        }
        log::info!(
            "{} frames, level {}/{}, {} lives left",
            driver.frames_run(),
            session.level_index() + 1,
            session.level_count(),
            session.lives()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Platform Dash (native) starting...");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
