//=========================================================================
// Render Types
//
// Geometry, color, and the render-collaborator seam.
//
// The engine never rasterizes anything itself. Screens, entities, and the
// fade overlay describe what they want drawn as `DrawCommand`s, and a
// `RenderTarget` implementation (supplied by the host application) turns
// those commands into pixels. Two implementations ship with the crate:
//
// - `NullRenderer`: discards everything (headless default)
// - `RecordingTarget`: captures the command stream for inspection
//
//=========================================================================

//=== Vec2 ================================================================

/// 2D position or size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

//=== Rect ================================================================

/// Integer rectangle, used as a texture source region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

//=== Color ===============================================================

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

//=== DrawCommand =========================================================

/// One drawable item, handed to the render collaborator.
///
/// Textures are referenced by logical name (the key under which the asset
/// bank stores them); resolving the name to an actual GPU or framebuffer
/// resource is the render collaborator's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand<'a> {
    /// A textured sprite.
    Sprite {
        /// Logical texture name.
        texture: &'a str,
        /// Source region within the texture.
        source: Rect,
        /// World position of the sprite.
        position: Vec2,
        /// Render origin, relative to the sprite's top-left corner.
        origin: Vec2,
    },

    /// A solid quad anchored at the top-left corner of the view.
    ///
    /// Used by the fade overlay; the alpha channel of `color` carries the
    /// current fade level.
    Quad { size: Vec2, color: Color },
}

//=== RenderTarget ========================================================

/// Drawing surface provided by the host application.
///
/// The engine calls these in a fixed order each frame: `clear`, then one
/// `draw` per command, then `present`. Implementations should not assume
/// anything beyond that ordering.
pub trait RenderTarget {
    /// Fills the whole surface with a color.
    fn clear(&mut self, color: Color);

    /// Draws a single command.
    fn draw(&mut self, command: DrawCommand<'_>);

    /// Finishes the frame and makes it visible.
    fn present(&mut self);

    /// Requests vertical sync from the underlying surface.
    ///
    /// Default implementation ignores the request; renderers that own a
    /// swapchain should honor it.
    fn set_vsync(&mut self, _enabled: bool) {}
}

//=== NullRenderer ========================================================

/// Render target that discards every command.
///
/// Used as the engine default so headless setups (tests, CI) can drive
/// the full loop without a window.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderTarget for NullRenderer {
    fn clear(&mut self, _color: Color) {}

    fn draw(&mut self, _command: DrawCommand<'_>) {}

    fn present(&mut self) {}
}

//=== RecordingTarget =====================================================

/// A call made against a [`RecordingTarget`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Clear(Color),
    Sprite {
        texture: String,
        source: Rect,
        position: Vec2,
        origin: Vec2,
    },
    Quad {
        size: Vec2,
        color: Color,
    },
    Present,
}

/// Render target that records the command stream instead of drawing.
///
/// Lets tests (and debugging tools) assert on exactly what a frame would
/// have rendered, in order.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    calls: Vec<RecordedCall>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made so far, in call order.
    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    /// Discards the recorded calls.
    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl RenderTarget for RecordingTarget {
    fn clear(&mut self, color: Color) {
        self.calls.push(RecordedCall::Clear(color));
    }

    fn draw(&mut self, command: DrawCommand<'_>) {
        let call = match command {
            DrawCommand::Sprite {
                texture,
                source,
                position,
                origin,
            } => RecordedCall::Sprite {
                texture: texture.to_owned(),
                source,
                position,
                origin,
            },
            DrawCommand::Quad { size, color } => RecordedCall::Quad { size, color },
        };
        self.calls.push(call);
    }

    fn present(&mut self) {
        self.calls.push(RecordedCall::Present);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_rgb_is_opaque() {
        assert_eq!(Color::rgb(10, 20, 30).a, 255);
    }

    #[test]
    fn recording_target_keeps_call_order() {
        let mut target = RecordingTarget::new();
        target.clear(Color::BLACK);
        target.draw(DrawCommand::Quad {
            size: Vec2::new(800.0, 600.0),
            color: Color::WHITE,
        });
        target.present();

        assert_eq!(
            target.calls(),
            &[
                RecordedCall::Clear(Color::BLACK),
                RecordedCall::Quad {
                    size: Vec2::new(800.0, 600.0),
                    color: Color::WHITE,
                },
                RecordedCall::Present,
            ]
        );
    }

    #[test]
    fn recording_target_owns_sprite_texture_name() {
        let mut target = RecordingTarget::new();
        let name = String::from("hero");
        target.draw(DrawCommand::Sprite {
            texture: &name,
            source: Rect::new(0, 0, 86, 24),
            position: Vec2::new(50.0, 50.0),
            origin: Vec2::ZERO,
        });
        drop(name);

        match &target.calls()[0] {
            RecordedCall::Sprite { texture, .. } => assert_eq!(texture, "hero"),
            other => panic!("expected sprite call, got {:?}", other),
        }
    }

    #[test]
    fn null_renderer_accepts_everything() {
        let mut target = NullRenderer;
        target.clear(Color::BLACK);
        target.draw(DrawCommand::Quad {
            size: Vec2::ZERO,
            color: Color::WHITE,
        });
        target.set_vsync(true);
        target.present();
    }
}
