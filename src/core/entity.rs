//=========================================================================
// Entities
//
// Drawable/updatable objects owned by a screen.
//
// Entities are dispatched through the `Entity` trait object rather than
// any concrete hierarchy: a screen stores `Box<dyn Entity>` and calls
// `update`/`draw` without knowing the variant. Two implementations ship
// with the crate:
//
// - `StaticEntity`: a sprite that never moves on its own
// - `MovableEntity`: a sprite steered by held movement-intent flags
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::render::{DrawCommand, Rect, RenderTarget, Vec2};

//=== Movement Scale ======================================================

// Velocity is expressed in the units the original tuning assumed: pixels
// per (delta * 100). Tuned for a 60 FPS pacing with vsync; wildly
// irregular deltas make movement irregular in the same proportion.
const DELTA_SCALE: f32 = 100.0;

//=== Direction ===========================================================

/// Movement intent direction for player-steered entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

//=== Entity Trait ========================================================

/// A single drawable/updatable object owned by exactly one screen.
///
/// `update` mutates position/visual state only: it never touches the
/// asset store, and it must tolerate any delta value — zero or negative
/// deltas are a no-op move, never a panic.
pub trait Entity {
    /// Advances the entity by `delta` seconds.
    fn update(&mut self, delta: f32);

    /// Emits this entity's draw commands.
    fn draw(&self, target: &mut dyn RenderTarget);

    fn position(&self) -> Vec2;

    fn set_position(&mut self, position: Vec2);

    /// Toggles a held movement intent.
    ///
    /// Default implementation ignores the toggle; only player-steered
    /// entities react.
    fn set_intent(&mut self, _direction: Direction, _pressed: bool) {}
}

//=== Sprite ==============================================================

/// Visual description shared by the bundled entity types: which texture
/// to draw, which region of it, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Logical texture name, resolved by the render collaborator against
    /// the owning screen's asset bank.
    pub texture: String,
    /// Source region within the texture.
    pub source: Rect,
    /// Render origin, relative to the sprite's top-left corner.
    pub origin: Vec2,
    pub position: Vec2,
}

impl Sprite {
    pub fn new(texture: impl Into<String>, source: Rect, position: Vec2) -> Self {
        Self {
            texture: texture.into(),
            source,
            origin: Vec2::ZERO,
            position,
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    fn draw(&self, target: &mut dyn RenderTarget) {
        target.draw(DrawCommand::Sprite {
            texture: &self.texture,
            source: self.source,
            position: self.position,
            origin: self.origin,
        });
    }
}

//=== StaticEntity ========================================================

/// A sprite with no behavior of its own.
#[derive(Debug, Clone)]
pub struct StaticEntity {
    sprite: Sprite,
}

impl StaticEntity {
    pub fn new(sprite: Sprite) -> Self {
        Self { sprite }
    }
}

impl Entity for StaticEntity {
    fn update(&mut self, _delta: f32) {}

    fn draw(&self, target: &mut dyn RenderTarget) {
        self.sprite.draw(target);
    }

    fn position(&self) -> Vec2 {
        self.sprite.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.sprite.position = position;
    }
}

//=== MovementIntent ======================================================

/// The four held movement flags of a steerable entity.
///
/// There is no input queue behind these: each flag holds the most recent
/// toggle, so several presses and releases within one frame collapse to
/// the last state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MovementIntent {
    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
        }
    }

    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }
}

//=== MovableEntity =======================================================

/// A sprite steered by held movement intents at a constant velocity.
///
/// Each axis integrates independently: `velocity * (delta * 100)` is
/// applied per active flag, so simultaneous horizontal and vertical
/// intents move faster along the diagonal. That quirk is load-bearing —
/// existing content is tuned against it — and is kept on purpose.
#[derive(Debug, Clone)]
pub struct MovableEntity {
    sprite: Sprite,
    intent: MovementIntent,
    velocity: Vec2,
}

impl MovableEntity {
    pub fn new(sprite: Sprite, velocity: Vec2) -> Self {
        Self {
            sprite,
            intent: MovementIntent::default(),
            velocity,
        }
    }

    pub fn intent(&self) -> MovementIntent {
        self.intent
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }
}

impl Entity for MovableEntity {
    fn update(&mut self, delta: f32) {
        // Zero, negative, or non-finite deltas mean "no movement this tick".
        if !(delta > 0.0) {
            return;
        }

        let step = delta * DELTA_SCALE;
        if self.intent.right {
            self.sprite.position.x += self.velocity.x * step;
        }
        if self.intent.left {
            self.sprite.position.x -= self.velocity.x * step;
        }
        if self.intent.up {
            self.sprite.position.y -= self.velocity.y * step;
        }
        if self.intent.down {
            self.sprite.position.y += self.velocity.y * step;
        }
    }

    fn draw(&self, target: &mut dyn RenderTarget) {
        self.sprite.draw(target);
    }

    fn position(&self) -> Vec2 {
        self.sprite.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.sprite.position = position;
    }

    fn set_intent(&mut self, direction: Direction, pressed: bool) {
        self.intent.set(direction, pressed);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
