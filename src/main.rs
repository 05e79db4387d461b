use std::collections::HashSet;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use gridcaster::scaler::{ScaleLut, blit_letterboxed, build_scale_lut};
use gridcaster::{GridMap, Raycaster, RenderConfig, assets};

/// Presentation-side settings.
struct AppConfig {
    title: String,
    window_width: f64,
    window_height: f64,
    move_speed: f32,  // cells/s
    turn_speed: f32,  // rad/s
    fov_step: f32,    // rad per key press
    map_path: Option<PathBuf>,
    texture_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Defaults, overridden by `[map.txt] [texture-dir]` positional arguments.
    fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        Self {
            title: "gridcaster".to_string(),
            window_width: 960.0,
            window_height: 600.0,
            move_speed: 2.0,
            turn_speed: std::f32::consts::PI * 0.75,
            fov_step: 5f32.to_radians(),
            map_path: args.next().map(PathBuf::from),
            texture_dir: args.next().map(PathBuf::from),
        }
    }
}

struct App {
    config: AppConfig,
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    engine: Raycaster,
    scale_lut: ScaleLut,
    started: Instant,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Input
    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
}

impl App {
    fn new(config: AppConfig) -> anyhow::Result<Self> {
        let map = match &config.map_path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading map {}", path.display()))?;
                GridMap::parse_str(&text).with_context(|| format!("parsing map {}", path.display()))?
            }
            None => GridMap::demo()?,
        };
        let textures = assets::load_texture_set(config.texture_dir.as_deref())?;
        let engine = Raycaster::new(RenderConfig::default(), map, textures)?;

        let now = Instant::now();
        Ok(Self {
            config,
            window: None,
            surface: None,
            engine,
            scale_lut: ScaleLut::empty(),
            started: now,
            frame_counter: 0,
            last_fps_print: now,
            keys_down: HashSet::new(),
            last_tick: now,
        })
    }

    fn held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.keys_down.contains(k))
    }

    /// Applies held keys to the player, scaled by frame time.
    fn update_player(&mut self) -> Result<(), gridcaster::EngineError> {
        // Compute dt with cap to avoid huge jumps if the app was paused
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).min(Duration::from_millis(100));
        self.last_tick = now;
        let dt_s = dt.as_secs_f32();

        let mut fwd = 0.0;
        let mut strafe = 0.0;
        let mut turn = 0.0;
        if self.held(&[KeyCode::KeyW, KeyCode::ArrowUp]) {
            fwd += 1.0;
        }
        if self.held(&[KeyCode::KeyS, KeyCode::ArrowDown]) {
            fwd -= 1.0;
        }
        if self.held(&[KeyCode::KeyD]) {
            strafe += 1.0;
        }
        if self.held(&[KeyCode::KeyA]) {
            strafe -= 1.0;
        }
        // counter-clockwise is positive
        if self.held(&[KeyCode::KeyQ, KeyCode::ArrowLeft]) {
            turn += 1.0;
        }
        if self.held(&[KeyCode::KeyE, KeyCode::ArrowRight]) {
            turn -= 1.0;
        }

        if turn != 0.0 {
            self.engine.rotate_player(turn * self.config.turn_speed * dt_s);
        }
        let step = self.config.move_speed * dt_s;
        if fwd != 0.0 {
            self.engine.move_player_forward_or_back(fwd * step)?;
        }
        if strafe != 0.0 {
            self.engine.move_player_left_or_right(strafe * step)?;
        }
        Ok(())
    }

    fn change_fov(&mut self, delta: f32) {
        let fov = self.engine.camera().fov() + delta;
        match self.engine.set_fov(fov) {
            Ok(()) => info!("fov {:.0} deg", fov.to_degrees()),
            Err(e) => warn!("{e}"),
        }
    }

    fn rebuild_lut(&mut self, dst_w: usize, dst_h: usize) {
        let fb = self.engine.framebuffer();
        self.scale_lut = build_scale_lut(dst_w, dst_h, fb.width(), fb.height());
    }

    fn redraw(&mut self, id: WindowId) -> anyhow::Result<()> {
        self.update_player()?;
        self.engine.tick(self.started.elapsed().as_secs_f64() * 1000.0);

        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return Ok(()); // Minimized window, skip drawing
        };
        // SoftBufferError is not Send + Sync, so it cannot carry anyhow context
        surface
            .resize(dw, dh)
            .map_err(|e| anyhow::anyhow!("resizing surface: {e}"))?;

        let (dw_us, dh_us) = (dw.get() as usize, dh.get() as usize);
        let fb = self.engine.framebuffer();
        if !self.scale_lut.fits(dw_us, dh_us) {
            // resize event not delivered yet
            self.scale_lut = build_scale_lut(dw_us, dh_us, fb.width(), fb.height());
        }
        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("mapping surface buffer: {e}"))?;
        blit_letterboxed(&mut buf, dw_us, fb.pixels(), fb.width(), &self.scale_lut);
        buf.present()
            .map_err(|e| anyhow::anyhow!("presenting frame: {e}"))?;

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            info!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.window_width, self.config.window_height));

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Rc::new(w),
            Err(e) => {
                error!("create window: {e}");
                event_loop.exit();
                return;
            }
        };
        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        let surface = match surface {
            Ok(s) => s,
            Err(e) => {
                error!("softbuffer surface: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.rebuild_lut(size.width as usize, size.height as usize);

        self.surface = Some(surface);
        self.last_tick = Instant::now();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    match code {
                        KeyCode::Escape => event_loop.exit(),
                        KeyCode::Equal | KeyCode::NumpadAdd if !repeat => {
                            self.change_fov(self.config.fov_step)
                        }
                        KeyCode::Minus | KeyCode::NumpadSubtract if !repeat => {
                            self.change_fov(-self.config.fov_step)
                        }
                        _ => {}
                    }
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw(id) {
                    error!("{e:#}");
                    event_loop.exit();
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::Resized(new_size) => {
                self.rebuild_lut(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut app = App::new(AppConfig::from_args(std::env::args().skip(1)))?;

    let event_loop = EventLoop::new()?;
    // Redraw continuously; frames are driven by request_redraw
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;
    Ok(())
}
