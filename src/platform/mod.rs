//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine's single-threaded loop.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌──────────────────────────────┐
//  │  Winit Event Loop            │
//  │   ↓                          │
//  │  KeyboardInput               │
//  │   ├─ event_mapper            │
//  │   └─ InputRouter.dispatch ───┼──> mutates LoopState
//  │   ↓                          │
//  │  RedrawRequested             │
//  │   ├─ FrameClock.restart()    │
//  │   ├─ advance_frame()         │
//  │   ├─ pacing sleep            │
//  │   └─ request_redraw()        │
//  └──────────────────────────────┘
// ```
//
// Everything happens on the thread that called `Engine::run()` (Winit
// mandates the main thread on macOS/iOS). `RedrawRequested` is the frame
// boundary: input arrives between frames and is applied to the loop
// state immediately, so by the time a frame runs, the state already
// reflects every event delivered before it.
//
// Pacing: after each frame the runtime sleeps out the remainder of the
// frame budget (1 / framerate_limit), then requests the next redraw.
// Vsync, when the render collaborator honors it, adds its own throttle
// on top.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod decoder;
mod event_mapper;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetDecoder;
use crate::core::input::InputRouter;
use crate::core::render::RenderTarget;
use crate::core::state::{FrameClock, LoopState};
use crate::engine::advance_frame;

//=== WindowConfig ========================================================

/// Window and pacing parameters collected by the engine builder.
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub framerate_limit: u32,
    pub vsync: bool,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are typically fatal - if the event loop can't be created,
/// the engine cannot run.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== Runtime =============================================================

/// Window manager and frame driver.
///
/// Owns the loop state, the input router and the render collaborator for
/// the session's lifetime, and runs the Winit event loop on the calling
/// thread.
///
/// # Lifecycle
///
/// 1. **Construction**: `Runtime::new(...)` - no window yet
/// 2. **Execution**: `runtime.run()` - enters the event loop
/// 3. **Window creation**: lazily in `resumed()` (mobile compatibility)
/// 4. **Shutdown**: window closed or `LoopState::quit()` → loop exits
pub(crate) struct Runtime<D: AssetDecoder> {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,
    config: WindowConfig,
    state: LoopState<D>,
    router: InputRouter<D>,
    renderer: Box<dyn RenderTarget>,
    clock: FrameClock,
    frame_budget: Duration,
}

impl<D: AssetDecoder> Runtime<D> {
    //--- Construction -----------------------------------------------------

    pub fn new(
        config: WindowConfig,
        state: LoopState<D>,
        router: InputRouter<D>,
        renderer: Box<dyn RenderTarget>,
    ) -> Self {
        let frame_budget = Duration::from_secs_f64(1.0 / f64::from(config.framerate_limit));
        info!(target: "platform", "Runtime initialized ({:?} frame budget)", frame_budget);
        Self {
            window: None,
            config,
            state,
            router,
            renderer,
            clock: FrameClock::new(),
            frame_budget,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Starts the event loop and blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Frame Driver -----------------------------------------------------

    /// Runs one frame and schedules the next redraw.
    fn drive_frame(&mut self, event_loop: &ActiveEventLoop) {
        if !self.state.running {
            info!(target: "platform", "Loop stop requested, exiting");
            event_loop.exit();
            return;
        }

        let frame_start = Instant::now();
        let delta = self.clock.restart();
        advance_frame(&mut self.state, self.renderer.as_mut(), delta);

        // Sleep out the rest of the frame budget.
        let elapsed = frame_start.elapsed();
        if elapsed < self.frame_budget {
            thread::sleep(self.frame_budget - elapsed);
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

//=== Winit Integration ===================================================

impl<D: AssetDecoder> ApplicationHandler for Runtime<D> {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window if it doesn't exist yet. On mobile, this may be
    /// called multiple times (suspend/resume cycle).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.renderer.set_vsync(self.config.vsync);
                self.clock.restart();
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                // OS auto-repeat presses are forwarded like real presses;
                // held-intent flags make the repeats harmless.
                let mapped = event_mapper::map_key_event(key_event);
                trace!(target: "platform::input", "Key event: {:?}", mapped);
                self.router.dispatch(&mut self.state, mapped);
            }

            WindowEvent::RedrawRequested => {
                self.drive_frame(event_loop);
            }

            _ => {
                // Ignore: Resized, Focused, CursorMoved, etc.
            }
        }
    }
}
