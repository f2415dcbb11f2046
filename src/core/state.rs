//=========================================================================
// Loop State
//
// The mutable heart of a session: everything the per-frame tick and the
// input subscribers are allowed to touch lives here, in one explicit
// struct. The platform runtime owns a `LoopState` and lends it out by
// `&mut` to the router and the frame advance, so there is no shared
// global state and no hidden channel between subsystems.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Instant;

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetDecoder;
use crate::core::fade::FadeOverlay;
use crate::core::registry::{RenderSet, ScreenRegistry};

//=== LoopState ===========================================================

/// All mutable session state threaded through the update/render loop.
///
/// Fields are public on purpose: input subscribers are plain functions
/// that receive `&mut LoopState`, and they manipulate the session through
/// these fields and the convenience methods below.
pub struct LoopState<D: AssetDecoder> {
    /// Cleared to stop the loop; the runtime exits at the next frame
    /// boundary.
    pub running: bool,

    /// The session's screens and the current/previous bookkeeping.
    pub registry: ScreenRegistry<D>,

    /// The fullscreen fade overlay, drawn above every screen.
    pub overlay: FadeOverlay,

    /// Screens eligible for this frame's draw pass.
    pub render_set: RenderSet,
}

impl<D: AssetDecoder> LoopState<D> {
    /// Creates a running state with an empty render set. The first update
    /// adds the registry's current screen to it.
    pub fn new(registry: ScreenRegistry<D>, overlay: FadeOverlay) -> Self {
        Self {
            running: true,
            registry,
            overlay,
            render_set: RenderSet::new(),
        }
    }

    //--- Convenience --------------------------------------------------------

    /// Requests a loop stop at the next frame boundary.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Transitions to the screen called `name`; unknown names are
    /// ignored.
    pub fn change_screen(&mut self, name: &str) {
        self.registry.change_current(name, &mut self.render_set);
    }

    /// Toggles the fade overlay between Idle and Fading.
    pub fn toggle_fade(&mut self) {
        self.overlay.toggle();
    }

    /// Toggles the current screen's `active` flag (input gating).
    pub fn toggle_active(&mut self) {
        let screen = self.registry.current_mut();
        let next = !screen.is_active();
        screen.set_active(next);
    }
}

//=== FrameClock ==========================================================

/// Measures the wall-clock time between frames.
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Returns the seconds elapsed since the previous restart and starts
    /// the next measurement.
    pub fn restart(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        delta
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::testing::BytesDecoder;
    use crate::core::fade::FadeAction;
    use crate::core::render::Vec2;
    use crate::core::screen::Screen;

    fn state(names: &[&str]) -> LoopState<BytesDecoder> {
        let screens = names.iter().map(|n| Screen::new(*n)).collect();
        LoopState::new(
            ScreenRegistry::new(screens),
            FadeOverlay::new(Vec2::new(800.0, 600.0)),
        )
    }

    #[test]
    fn new_state_is_running_with_empty_render_set() {
        let state = state(&["main"]);
        assert!(state.running);
        assert!(state.render_set.is_empty());
    }

    #[test]
    fn quit_clears_the_running_flag() {
        let mut state = state(&["main"]);
        state.quit();
        assert!(!state.running);
    }

    #[test]
    fn change_screen_goes_through_the_registry() {
        let mut state = state(&["title", "game"]);
        state.registry.update(1.0 / 60.0, &mut state.render_set);

        state.change_screen("game");
        assert_eq!(state.registry.current().name(), "game");
        assert!(state.render_set.is_empty());
    }

    #[test]
    fn toggle_active_flips_only_the_current_screen() {
        let mut state = state(&["title", "game"]);
        state.toggle_active();
        assert!(!state.registry.current().is_active());

        state.change_screen("game");
        assert!(state.registry.current().is_active());
    }

    #[test]
    fn toggle_fade_reaches_the_overlay() {
        let mut state = state(&["main"]);
        state.toggle_fade();
        assert_eq!(state.overlay.action(), FadeAction::Fading);
    }

    #[test]
    fn frame_clock_reports_nonnegative_deltas() {
        let mut clock = FrameClock::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let delta = clock.restart();
        assert!(delta > 0.0);

        // Immediately after a restart the next delta is near zero.
        let next = clock.restart();
        assert!(next >= 0.0 && next < delta + 1.0);
    }
}
