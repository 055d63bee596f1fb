//! Engine core: subsystem ownership, lifecycle state machine, frame loop

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actors::{Actor, ActorKey, Capabilities, Component, ComponentId, World};
use crate::application::Application;
use crate::assets::TextureCache;
use crate::foundation::time::Timer;
use crate::input::{InputState, KeyCode};
use crate::platform::Window;
use crate::render::{DrawableHandle, Renderer};

/// Engine lifecycle
///
/// Transitions only move forward: `Uninitialized → Initialized → Running →
/// Unloading → Closed`. `close` is reachable from any state, including
/// after a failed `initialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, platform resources not yet opened
    Uninitialized,
    /// Window and renderer surface are up
    Initialized,
    /// Frame loop is executing
    Running,
    /// Actors and assets are being torn down
    Unloading,
    /// Platform resources released
    Closed,
}

/// Engine-level errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// Window or renderer setup failed
    #[error("engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Presenting a frame failed
    #[error("render error: {0}")]
    Render(String),

    /// An application hook failed
    #[error("application error: {0}")]
    Application(String),

    /// Configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Surface width in pixels
    pub width: usize,

    /// Surface height in pixels
    pub height: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Engine2D Application".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window configuration
    pub window: WindowConfig,
}

impl EngineConfig {
    /// Load a configuration from a TOML file
    ///
    /// Missing keys fall back to their defaults, so a partial file is fine.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| EngineError::Config(e.to_string()))?;
        toml::from_str(&text).map_err(|e| EngineError::Config(e.to_string()))
    }
}

/// The engine: owner of all mutable state and driver of the frame loop
///
/// Exactly one instance exists per game; it is constructed explicitly and
/// passed by reference to whatever needs it, never stored globally.
pub struct Engine {
    world: World,
    assets: TextureCache,
    renderer: Renderer,
    window: Window,
    input: InputState,
    timer: Timer,
    state: EngineState,
    running: bool,
}

impl Engine {
    /// Construct an engine with unopened platform resources
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            world: World::new(),
            assets: TextureCache::new(),
            renderer: Renderer::new(),
            window: Window::new(
                &config.window.title,
                config.window.width,
                config.window.height,
            ),
            input: InputState::new(),
            timer: Timer::new(),
            state: EngineState::Uninitialized,
            running: true,
        }
    }

    /// Convenience entry point: full lifecycle with the given application
    ///
    /// Initializes, loads, runs the frame loop until quit, then unloads and
    /// closes. On initialization failure the platform teardown still runs
    /// before the error is returned.
    pub fn run<T: Application>(config: &EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config);
        match engine.initialize() {
            Ok(()) => {
                let result = engine.load(app).and_then(|()| engine.run_loop(app));
                engine.unload(app);
                engine.close();
                result
            }
            Err(e) => {
                engine.close();
                Err(e)
            }
        }
    }

    /// Open the window and allocate the renderer surface
    ///
    /// Both sub-initializations are attempted even if the first fails;
    /// nothing is rolled back on failure, so `close` must be called either
    /// way.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        log::info!("Initializing engine...");
        let window_result = self.window.initialize();
        let renderer_result = self
            .renderer
            .initialize(self.window.width(), self.window.height());
        window_result
            .and(renderer_result)
            .map_err(|e| EngineError::InitializationFailed(e.to_string()))?;
        self.state = EngineState::Initialized;
        Ok(())
    }

    /// Run the application's world-population hook
    pub fn load<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        app.initialize(self)
            .map_err(|e| EngineError::Application(e.to_string()))
    }

    /// Run the frame loop until the running flag clears
    ///
    /// Each iteration: measure dt, poll input, application update, world
    /// update, render, then sleep off the rest of the frame budget. The
    /// timestep is variable; dt is never clamped or accumulated.
    pub fn run_loop<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        self.state = EngineState::Running;
        log::info!("Starting frame loop...");
        while self.running {
            let dt = self.timer.compute_delta_time() / 1000.0;
            self.process_input();
            app.update(self, dt)
                .map_err(|e| EngineError::Application(e.to_string()))?;
            self.update(dt);
            self.render()?;
            self.timer.delay_time();
        }
        Ok(())
    }

    /// Poll the platform and react to quit signals
    fn process_input(&mut self) {
        self.window.poll_input(&mut self.input);
        if self.input.quit_requested() || self.input.is_pressed(KeyCode::Escape) {
            log::info!("Quit requested");
            self.running = false;
        }
    }

    /// Advance the world by one frame and sync the drawable registry
    pub fn update(&mut self, dt: f32) {
        let report = self.world.update(dt);
        for &key in &report.promoted {
            self.register_drawables(key);
        }
        for &key in &report.destroyed {
            self.renderer.unregister_actor(key);
        }
        if report.quit_requested {
            self.running = false;
        }
    }

    /// Render one frame: clear, draw registered drawables in registration
    /// order, present
    pub fn render(&mut self) -> Result<(), EngineError> {
        self.renderer.begin_draw();
        self.renderer.draw(&self.world, &self.assets);
        self.renderer
            .end_draw(&mut self.window)
            .map_err(|e| EngineError::Render(e.to_string()))
    }

    /// Register an actor and wire its drawable components to the renderer
    pub fn spawn(&mut self, actor: Actor) -> ActorKey {
        let key = self.world.add_actor(actor);
        if !self.world.is_updating() {
            self.register_drawables(key);
        }
        key
    }

    /// Attach a component to a live actor
    ///
    /// Drawable components gain their renderer registration here. Returns
    /// `None` when the actor no longer exists.
    pub fn attach(&mut self, key: ActorKey, component: Box<dyn Component>) -> Option<ComponentId> {
        let drawable = component.capabilities().contains(Capabilities::DRAW);
        let id = self.world.actor_mut(key)?.add_component(component);
        if drawable {
            self.renderer.register(DrawableHandle {
                actor: key,
                component: id,
            });
        }
        Some(id)
    }

    /// Detach and drop a component; no-op when actor or component is gone
    pub fn detach(&mut self, key: ActorKey, component: ComponentId) {
        self.renderer.unregister(DrawableHandle {
            actor: key,
            component,
        });
        if let Some(actor) = self.world.actor_mut(key) {
            actor.remove_component(component);
        }
    }

    /// Destroy an actor immediately; idempotent
    pub fn remove_actor(&mut self, key: ActorKey) {
        self.renderer.unregister_actor(key);
        self.world.remove_actor(key);
    }

    /// Ask the frame loop to stop after the current iteration
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Destroy every remaining actor and clear the asset cache
    pub fn unload<T: Application>(&mut self, app: &mut T) {
        self.state = EngineState::Unloading;
        log::info!("Unloading world and assets...");
        app.cleanup(self);
        self.world.clear();
        self.renderer.clear_drawables();
        self.assets.clear();
    }

    /// Release platform resources; safe after a failed `initialize`
    pub fn close(&mut self) {
        self.window.close();
        self.state = EngineState::Closed;
        log::info!(
            "Engine closed after {} frame(s) ({:.1} FPS average)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
    }

    fn register_drawables(&mut self, key: ActorKey) {
        let Some(actor) = self.world.actor(key) else {
            return;
        };
        let handles: Vec<DrawableHandle> = actor
            .drawable_components()
            .map(|component| DrawableHandle {
                actor: key,
                component,
            })
            .collect();
        for handle in handles {
            self.renderer.register(handle);
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the frame loop would keep running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The actor world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the actor world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The texture cache
    pub fn assets(&self) -> &TextureCache {
        &self.assets
    }

    /// Mutable access to the texture cache
    pub fn assets_mut(&mut self) -> &mut TextureCache {
        &mut self.assets
    }

    /// The renderer
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Mutable access to the renderer
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// The current frame's input snapshot
    pub fn input(&self) -> &InputState {
        &self.input
    }
}
