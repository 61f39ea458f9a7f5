use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::caster::{RayHit, cast_fov};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::input::InputController;
use crate::map::GridMap;
use crate::player::Player;
use crate::projector::{WallSegment, project_all};
use crate::renderer::{FrameBuffer, render_frame};
use crate::scaler::{ScaleLut, blit_nearest, build_scale_lut};

/// The two hooks the event loop drives.
pub trait Scene {
    fn on_frame(&mut self, frame: &mut FrameBuffer);

    /// Returns true if the key changed anything worth redrawing.
    fn on_key(&mut self, key: KeyCode) -> bool;
}

/// Application state root: the map, the player, and how input moves it.
pub struct Demo {
    config: Config,
    map: GridMap,
    player: Player,
    input: InputController,
}

impl Demo {
    pub fn new(config: Config) -> Result<Self> {
        let map = GridMap::reference(config.cell_size)?;
        Self::with_map(config, map)
    }

    pub fn with_map(config: Config, map: GridMap) -> Result<Self> {
        config.validate()?;
        if (map.width(), map.height()) != (config.map_width, config.map_height) {
            return Err(Error::Config(format!(
                "map is {}x{} but config expects {}x{}",
                map.width(),
                map.height(),
                config.map_width,
                config.map_height
            )));
        }
        if map.cell_size() != config.cell_size {
            return Err(Error::Config(format!(
                "map cell size {} does not match config cell size {}",
                map.cell_size(),
                config.cell_size
            )));
        }

        let player = Player::new(
            config.player_start,
            config.player_start_angle,
            config.direction_scale,
        );

        Ok(Self {
            input: InputController::new(&config),
            config,
            map,
            player,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// One frame's worth of rays and wall slices, independent of any display.
    pub fn cast(&self) -> (Vec<RayHit>, Vec<WallSegment>) {
        let hits = cast_fov(&self.map, &self.player, &self.config);
        let segments = project_all(&hits, &self.player, &self.config);
        (hits, segments)
    }
}

impl Scene for Demo {
    fn on_frame(&mut self, frame: &mut FrameBuffer) {
        let (hits, segments) = self.cast();
        render_frame(frame, &self.map, &self.player, &hits, &segments, &self.config);
    }

    fn on_key(&mut self, key: KeyCode) -> bool {
        self.input.on_key_press(&mut self.player, key)
    }
}

pub struct App<S: Scene> {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    title: String,
    size: (usize, usize), // logical window size

    frame: FrameBuffer,
    scale_lut: ScaleLut,
    scene: S,

    // first fatal error, handed back from run()
    error: Option<Error>,

    frame_counter: u32,
    last_stats: Instant,
}

impl<S: Scene> App<S> {
    pub fn new(title: impl Into<String>, width: usize, height: usize, scene: S) -> Self {
        Self {
            window: None,
            surface: None,
            title: title.into(),
            size: (width, height),
            frame: FrameBuffer::new(width, height),
            scale_lut: ScaleLut::empty(),
            scene,
            error: None,
            frame_counter: 0,
            last_stats: Instant::now(),
        }
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        // Redraws only happen on request, so block while idle
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut self)?;

        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        log::error!("{err}");
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (w, h) = self.size;
        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(w as f64, h as f64))
            .with_resizable(false);

        let window = Rc::new(event_loop.create_window(attributes)?);
        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window.clone())?;

        let size = window.inner_size();
        log::info!("window created: {}x{} physical", size.width, size.height);

        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        let (Some(window), Some(surface)) = (self.window.as_ref(), self.surface.as_mut()) else {
            return Ok(());
        };

        let size = window.inner_size();
        let (Some(nw), Some(nh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };
        let (dw, dh) = (size.width as usize, size.height as usize);
        surface.resize(nw, nh)?;

        self.scene.on_frame(&mut self.frame);

        let (sw, sh) = (self.frame.width(), self.frame.height());
        if !self.scale_lut.fits(dw, dh, sw, sh) {
            self.scale_lut = build_scale_lut(dw, dh, sw, sh);
        }

        let mut buf = surface.buffer_mut()?;
        blit_nearest(&mut buf, dw, self.frame.pixels(), sw, &self.scale_lut);
        buf.present()?;

        self.frame_counter += 1;
        let elapsed = self.last_stats.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            log::debug!("{} frames in {:.1}s", self.frame_counter, elapsed);
            self.frame_counter = 0;
            self.last_stats = Instant::now();
        }
        Ok(())
    }
}

impl<S: Scene> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match self.create_window(event_loop) {
            Ok(()) => self.request_redraw(),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().is_none_or(|w| w.id() != id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested; stopping");
                event_loop.exit();
            }

            // OS key repeat counts as another press
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    event_loop.exit();
                } else if self.scene.on_key(code) {
                    self.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::Resized(_) => self.request_redraw(),
            _ => (),
        }
    }
}
