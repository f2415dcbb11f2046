//=========================================================================
// Lumen Engine
//
// Main entry point and per-frame coordinator.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_title()            └─ owns LoopState + InputRouter
//         ├─ with_size()               hands both to the platform
//         └─ with_framerate_limit()    runtime, blocks until exit
// ```
//
// Everything runs on one thread: the platform event loop calls back into
// `advance_frame`, which ticks the overlay and the current screen and
// then issues the draw pass. There is no logic thread and no channel —
// input subscribers mutate the `LoopState` directly between frames.
//
//=========================================================================

//=== External Crates =====================================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetDecoder;
use crate::core::fade::{FadeOverlay, FadeSpeed};
use crate::core::input::InputRouter;
use crate::core::registry::ScreenRegistry;
use crate::core::render::{Color, NullRenderer, RenderTarget, Vec2};
use crate::core::state::LoopState;
use crate::platform::{Runtime, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Title**: "Lumen Engine"
/// - **Size**: 800x600
/// - **Framerate limit**: 60
/// - **Vsync**: enabled
/// - **Fade speed**: Medium
///
/// # Examples
///
/// ```no_run
/// use lumen_engine::core::registry::ScreenRegistry;
/// use lumen_engine::core::screen::Screen;
/// use lumen_engine::{EngineBuilder, StockDecoder};
///
/// let registry = ScreenRegistry::<StockDecoder>::new(vec![Screen::new("main")]);
///
/// EngineBuilder::new()
///     .with_title("Sample")
///     .with_size(1024, 768)
///     .build(registry)
///     .run();
/// ```
pub struct EngineBuilder {
    title: String,
    width: u32,
    height: u32,
    framerate_limit: u32,
    vsync: bool,
    fade_speed: FadeSpeed,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Lumen Engine".to_string(),
            width: 800,
            height: 600,
            framerate_limit: 60,
            vsync: true,
            fade_speed: FadeSpeed::Medium,
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the window size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be nonzero");
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the framerate ceiling the runtime paces itself against.
    ///
    /// Default: 60
    ///
    /// # Panics
    ///
    /// Panics if `limit == 0`.
    pub fn with_framerate_limit(mut self, limit: u32) -> Self {
        assert!(limit > 0, "Framerate limit must be positive");
        self.framerate_limit = limit;
        self
    }

    /// Enables or disables vsync on the render collaborator.
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Sets the fade overlay's per-tick speed preset.
    pub fn with_fade_speed(mut self, speed: FadeSpeed) -> Self {
        self.fade_speed = speed;
        self
    }

    /// Builds the engine around `registry`.
    ///
    /// The fade overlay is sized to cover the configured window; the
    /// input router starts with the built-in session bindings.
    pub fn build<D: AssetDecoder>(self, registry: ScreenRegistry<D>) -> Engine<D> {
        info!(
            "Building engine ({}x{} @ {} FPS cap, vsync: {})",
            self.width, self.height, self.framerate_limit, self.vsync
        );

        let mut overlay = FadeOverlay::new(Vec2::new(self.width as f32, self.height as f32));
        overlay.set_speed(self.fade_speed);

        Engine {
            state: LoopState::new(registry, overlay),
            router: InputRouter::with_defaults(),
            renderer: Box::new(NullRenderer),
            config: WindowConfig {
                title: self.title,
                width: self.width,
                height: self.height,
                framerate_limit: self.framerate_limit,
                vsync: self.vsync,
            },
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// The assembled engine: loop state, input router, render collaborator
/// and window configuration, ready to hand to the platform runtime.
///
/// Create via [`EngineBuilder`]; customize with [`Engine::init`] and
/// [`Engine::with_renderer`]; start with [`Engine::run`].
pub struct Engine<D: AssetDecoder> {
    state: LoopState<D>,
    router: InputRouter<D>,
    renderer: Box<dyn RenderTarget>,
    config: WindowConfig,
}

impl<D: AssetDecoder> Engine<D> {
    //--- Initialization ---------------------------------------------------

    /// One-shot hook for session setup before the loop starts: register
    /// extra input subscribers, seed entity positions, start a fade.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut LoopState<D>, &mut InputRouter<D>),
    {
        info!("Initializing engine session");
        init_fn(&mut self.state, &mut self.router);
        self
    }

    /// Replaces the render collaborator (default: [`NullRenderer`]).
    pub fn with_renderer(mut self, renderer: Box<dyn RenderTarget>) -> Self {
        self.renderer = renderer;
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the platform runtime and blocks until the window closes or
    /// a subscriber stops the loop.
    pub fn run(self) {
        info!("Starting engine runtime");

        let runtime = Runtime::new(self.config, self.state, self.router, self.renderer);
        if let Err(e) = runtime.run() {
            error!("Platform error: {}", e);
        }

        info!("Engine shutdown complete");
    }
}

//=== Frame Advance =======================================================

/// Advances one frame: updates, then the draw pass.
///
/// Order is fixed — overlay update, registry update (which reconciles the
/// render set), clear, screen draws, overlay quad on top, present. The
/// platform runtime calls this once per `RedrawRequested`; it is public
/// so host applications driving their own loop can call it directly.
pub fn advance_frame<D: AssetDecoder>(
    state: &mut LoopState<D>,
    renderer: &mut dyn RenderTarget,
    delta: f32,
) {
    state.overlay.update(delta);
    state.registry.update(delta, &mut state.render_set);

    renderer.clear(Color::BLACK);
    for id in state.render_set.iter() {
        if let Some(screen) = state.registry.screen(id) {
            screen.draw(renderer);
        }
    }
    state.overlay.draw(renderer);
    renderer.present();
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::testing::BytesDecoder;
    use crate::core::entity::{Sprite, StaticEntity};
    use crate::core::render::{Rect, RecordedCall, RecordingTarget};
    use crate::core::screen::Screen;

    const TICK: f32 = 1.0 / 60.0;

    fn registry(names: &[&str]) -> ScreenRegistry<BytesDecoder> {
        ScreenRegistry::new(names.iter().map(|n| Screen::new(*n)).collect())
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.title, "Lumen Engine");
        assert_eq!(builder.width, 800);
        assert_eq!(builder.height, 600);
        assert_eq!(builder.framerate_limit, 60);
        assert!(builder.vsync);
        assert_eq!(builder.fade_speed, FadeSpeed::Medium);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let builder = EngineBuilder::new()
            .with_title("Sample")
            .with_size(1024, 768)
            .with_framerate_limit(120)
            .with_vsync(false)
            .with_fade_speed(FadeSpeed::Fast);

        assert_eq!(builder.title, "Sample");
        assert_eq!(builder.width, 1024);
        assert_eq!(builder.height, 768);
        assert_eq!(builder.framerate_limit, 120);
        assert!(!builder.vsync);
        assert_eq!(builder.fade_speed, FadeSpeed::Fast);
    }

    #[test]
    #[should_panic(expected = "size must be nonzero")]
    fn builder_rejects_zero_width() {
        EngineBuilder::new().with_size(0, 600);
    }

    #[test]
    #[should_panic(expected = "Framerate limit must be positive")]
    fn builder_rejects_zero_framerate() {
        EngineBuilder::new().with_framerate_limit(0);
    }

    #[test]
    fn build_wires_state_and_defaults() {
        let engine = EngineBuilder::new()
            .with_fade_speed(FadeSpeed::Slow)
            .build(registry(&["main"]));

        assert!(engine.state.running);
        assert_eq!(engine.state.overlay.speed(), FadeSpeed::Slow);
        assert_eq!(engine.state.registry.current().name(), "main");
    }

    #[test]
    fn init_hook_can_register_subscribers_and_mutate_state() {
        fn quit_on_q(state: &mut LoopState<BytesDecoder>, key: crate::core::input::KeyCode) {
            if key == crate::core::input::KeyCode::KeyQ {
                state.quit();
            }
        }

        let engine = EngineBuilder::new().build(registry(&["main"])).init(|state, router| {
            state.toggle_fade();
            router.on_global(quit_on_q);
        });

        assert_eq!(
            engine.state.overlay.action(),
            crate::core::fade::FadeAction::Fading
        );
    }

    //=====================================================================
    // advance_frame Tests
    //=====================================================================

    #[test]
    fn frame_emits_clear_draws_overlay_present_in_order() {
        let mut reg = registry(&["main"]);
        reg.current_mut().add_entity(
            "logo",
            Box::new(StaticEntity::new(Sprite::new(
                "logo",
                Rect::new(0, 0, 64, 64),
                Vec2::ZERO,
            ))),
        );
        let mut state = LoopState::new(reg, FadeOverlay::new(Vec2::new(800.0, 600.0)));
        let mut target = RecordingTarget::new();

        advance_frame(&mut state, &mut target, TICK);

        let calls = target.calls();
        assert_eq!(calls.len(), 4);
        assert!(matches!(calls[0], RecordedCall::Clear(Color::BLACK)));
        assert!(matches!(calls[1], RecordedCall::Sprite { .. }));
        assert!(matches!(calls[2], RecordedCall::Quad { .. }));
        assert!(matches!(calls[3], RecordedCall::Present));
    }

    #[test]
    fn repeated_frames_keep_one_screen_in_the_render_set() {
        let mut state = LoopState::new(
            registry(&["main"]),
            FadeOverlay::new(Vec2::new(800.0, 600.0)),
        );
        let mut target = RecordingTarget::new();

        advance_frame(&mut state, &mut target, TICK);
        advance_frame(&mut state, &mut target, TICK);
        assert_eq!(state.render_set.len(), 1);
    }

    #[test]
    fn transition_swaps_the_drawn_screen_on_the_next_frame() {
        let mut reg = registry(&["a", "b"]);
        reg.screen_mut(reg.current_id()).unwrap().add_entity(
            "a-logo",
            Box::new(StaticEntity::new(Sprite::new(
                "a-logo",
                Rect::new(0, 0, 8, 8),
                Vec2::ZERO,
            ))),
        );
        let mut state = LoopState::new(reg, FadeOverlay::new(Vec2::new(800.0, 600.0)));
        let mut target = RecordingTarget::new();

        advance_frame(&mut state, &mut target, TICK);
        state.change_screen("b");
        target.reset();

        advance_frame(&mut state, &mut target, TICK);
        let sprites = target
            .calls()
            .iter()
            .filter(|c| matches!(c, RecordedCall::Sprite { .. }))
            .count();
        assert_eq!(sprites, 0, "screen b has no entities to draw");
        assert_eq!(state.render_set.len(), 1);
    }

    #[test]
    fn fade_advances_during_the_frame() {
        let mut state = LoopState::new(
            registry(&["main"]),
            FadeOverlay::new(Vec2::new(800.0, 600.0)),
        );
        state.toggle_fade();
        let mut target = RecordingTarget::new();

        advance_frame(&mut state, &mut target, TICK);
        assert_eq!(state.overlay.alpha(), FadeSpeed::Medium.step());
    }
}
