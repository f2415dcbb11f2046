//=========================================================================
// Fade Overlay
//
// Fullscreen quad whose alpha channel is animated to produce fade-in /
// fade-out transitions, independent of screen content.
//
// State machine:
//   state  ∈ {Transparent, Opaque}   — which boundary alpha last touched
//   action ∈ {Idle, Fading}          — whether a fade is in progress
//
// The two are orthogonal on purpose: `state` encodes the direction the
// next fade will run, `action` encodes whether it is running. Toggling
// `Fading` from outside therefore always resumes in the correct
// direction without the caller inspecting alpha.
//
// Per tick while Fading:
//   Opaque      & alpha > 0   → alpha -= speed; at 0   → Idle
//   Transparent & alpha < 255 → alpha += speed; at 255 → Idle
// then state is re-derived from the clamped alpha.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::render::{Color, DrawCommand, RenderTarget, Vec2};

//=== FadeState ===========================================================

/// Which alpha boundary the overlay most recently touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeState {
    /// Alpha last reached 0; the next fade runs toward opaque.
    Transparent,

    /// Alpha last reached 255; the next fade runs toward transparent.
    Opaque,
}

//=== FadeAction ==========================================================

/// Whether a fade is currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeAction {
    Idle,
    Fading,
}

//=== FadeSpeed ===========================================================

/// Alpha step applied per tick, as a closed set of presets.
///
/// A closed enumeration keeps full-fade duration bounded and
/// deterministic at the 60 ticks/second cadence: Medium crosses the full
/// range in 17 ticks, SuperSlow in 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeSpeed {
    SuperSlow,
    Slow,
    Medium,
    Fast,
    SuperFast,
}

impl FadeSpeed {
    /// Alpha units applied per tick.
    pub fn step(self) -> u8 {
        match self {
            Self::SuperSlow => 1,
            Self::Slow => 5,
            Self::Medium => 15,
            Self::Fast => 51,
            Self::SuperFast => 85,
        }
    }
}

//=== FadeOverlay =========================================================

/// Fullscreen fade overlay.
///
/// Created once per window session and kept for the process lifetime;
/// external input toggles it between Idle and Fading. Alpha rides on the
/// quad's fill color and never leaves `[0, 255]`.
#[derive(Debug)]
pub struct FadeOverlay {
    state: FadeState,
    action: FadeAction,
    speed: FadeSpeed,
    color: Color,
    size: Vec2,
    delta_accumulator: f32,
}

impl FadeOverlay {
    /// Interval between alpha steps, in seconds.
    pub const TICK_SECONDS: f32 = 1.0 / 60.0;

    /// Creates an idle, fully transparent white overlay covering `size`.
    pub fn new(size: Vec2) -> Self {
        Self {
            state: FadeState::Transparent,
            action: FadeAction::Idle,
            speed: FadeSpeed::Medium,
            color: Color::rgba(255, 255, 255, 0),
            size,
            delta_accumulator: 0.0,
        }
    }

    //--- Accessors ----------------------------------------------------------

    pub fn state(&self) -> FadeState {
        self.state
    }

    pub fn action(&self) -> FadeAction {
        self.action
    }

    pub fn speed(&self) -> FadeSpeed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: FadeSpeed) {
        self.speed = speed;
    }

    pub fn alpha(&self) -> u8 {
        self.color.a
    }

    /// Repositions alpha directly (e.g. to start a session mid-fade).
    /// State is re-derived from the new value.
    pub fn set_alpha(&mut self, alpha: u8) {
        self.color.a = alpha;
        self.rederive_state();
    }

    /// Changes the fade tint. The alpha channel of `color` is ignored;
    /// the overlay keeps its current fade level.
    pub fn set_fill_color(&mut self, color: Color) {
        self.color = Color::rgba(color.r, color.g, color.b, self.color.a);
    }

    //--- Control --------------------------------------------------------------

    /// Starts the fade if idle, pauses it if running.
    pub fn toggle(&mut self) {
        self.action = match self.action {
            FadeAction::Idle => FadeAction::Fading,
            FadeAction::Fading => FadeAction::Idle,
        };
    }

    //--- Update ---------------------------------------------------------------

    /// Advances the overlay by `delta` seconds.
    ///
    /// Steps fire on a fixed 1/60s cadence regardless of the actual frame
    /// rate; sub-tick deltas accumulate until a step fires. Negative
    /// deltas never step.
    pub fn update(&mut self, delta: f32) {
        self.delta_accumulator += delta;
        if self.delta_accumulator >= Self::TICK_SECONDS {
            self.delta_accumulator = 0.0;
            if self.action == FadeAction::Fading {
                self.step();
            }
        }

        self.rederive_state();
    }

    /// Applies one alpha step in the direction given by `state`.
    fn step(&mut self) {
        match self.state {
            FadeState::Opaque if self.color.a > 0 => {
                self.color.a = self.color.a.saturating_sub(self.speed.step());
                if self.color.a == 0 {
                    self.action = FadeAction::Idle;
                }
            }
            FadeState::Transparent if self.color.a < 255 => {
                self.color.a = self.color.a.saturating_add(self.speed.step());
                if self.color.a == 255 {
                    self.action = FadeAction::Idle;
                }
            }
            _ => {}
        }
    }

    /// State is a pure function of alpha at the boundaries; strictly
    /// intermediate values keep whichever boundary was crossed last.
    fn rederive_state(&mut self) {
        if self.state == FadeState::Opaque && self.color.a == 0 {
            self.state = FadeState::Transparent;
        } else if self.state == FadeState::Transparent && self.color.a == 255 {
            self.state = FadeState::Opaque;
        }
    }

    //--- Draw -------------------------------------------------------------------

    /// Emits the overlay quad. Always drawn, even at alpha 0; the render
    /// collaborator is free to elide invisible quads.
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        target.draw(DrawCommand::Quad {
            size: self.size,
            color: self.color,
        });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
