//=========================================================================
// Screen
//
// A named, self-contained scene: one asset bank plus a collection of
// entities. Screens are the unit of top-level navigation — the registry
// swaps between them, the loop draws whichever one is current.
//
// Entity insertion order is draw order. Entities are added at
// construction time; there is no spawn/despawn API during the session.
//
//=========================================================================

//=== External Crates =====================================================

use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::assets::{AssetBank, AssetDecoder};
use crate::core::entity::{Direction, Entity};
use crate::core::input::KeyCode;
use crate::core::render::RenderTarget;

//=== Key Bindings ========================================================

/// Hard-wired player movement bindings.
fn direction_for_key(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::ArrowLeft => Some(Direction::Left),
        KeyCode::ArrowRight => Some(Direction::Right),
        KeyCode::ArrowUp => Some(Direction::Up),
        KeyCode::ArrowDown => Some(Direction::Down),
        _ => None,
    }
}

//=== Screen ==============================================================

/// A named scene holding its own assets and entities.
///
/// `name` is the transition key used by the registry — it must be unique
/// across the session's screens for transitions to behave predictably.
/// `active` gates whether player input reaches the screen's entities; it
/// does not affect updates or drawing.
pub struct Screen<D: AssetDecoder> {
    name: String,
    active: bool,
    assets: AssetBank<D>,
    entities: Vec<(String, Box<dyn Entity>)>,
    player: Option<String>,
}

impl<D: AssetDecoder> Screen<D> {
    /// Creates an active screen with an empty asset bank and no entities.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            assets: AssetBank::new(),
            entities: Vec::new(),
            player: None,
        }
    }

    //--- Accessors ----------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn assets(&self) -> &AssetBank<D> {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetBank<D> {
        &mut self.assets
    }

    //--- Construction -------------------------------------------------------

    /// Loads this screen's asset bundle. Fatal on archive failure, like
    /// [`AssetBank::load_from_archive`].
    pub fn load_archive(&mut self, path: impl AsRef<std::path::Path>, decoder: &D) {
        self.assets.load_from_archive(path, decoder);
    }

    /// Adds an entity at the end of the draw order.
    ///
    /// Duplicate names are ignored with a warning; the first registration
    /// keeps its slot.
    pub fn add_entity(&mut self, name: impl Into<String>, entity: Box<dyn Entity>) {
        let name = name.into();
        if self.entities.iter().any(|(n, _)| *n == name) {
            warn!("screen {:?} already has entity {:?}, ignoring", self.name, name);
            return;
        }
        self.entities.push((name, entity));
    }

    /// Designates the entity that receives player movement intents.
    pub fn set_player(&mut self, name: impl Into<String>) {
        self.player = Some(name.into());
    }

    //--- Lookup ---------------------------------------------------------------

    pub fn entity(&self, name: &str) -> Option<&dyn Entity> {
        self.entities
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e.as_ref())
    }

    pub fn entity_mut(&mut self, name: &str) -> Option<&mut (dyn Entity + 'static)> {
        self.entities
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e.as_mut())
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    //--- Frame Hooks ------------------------------------------------------------

    /// Updates every entity, in insertion order.
    pub fn update(&mut self, delta: f32) {
        for (_, entity) in &mut self.entities {
            entity.update(delta);
        }
    }

    /// Draws every entity, in insertion order (later entities layer on
    /// top of earlier ones).
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        for (_, entity) in &self.entities {
            entity.draw(target);
        }
    }

    //--- Input Hooks --------------------------------------------------------------

    /// Routes a key press to the player entity as a movement intent.
    /// No-op while the screen is inactive or has no player.
    pub fn handle_key_pressed(&mut self, key: KeyCode) {
        self.route_intent(key, true);
    }

    /// Routes a key release to the player entity.
    ///
    /// Gated on `active` exactly like presses — a release arriving while
    /// the screen is inactive is dropped, so an intent held across an
    /// active-toggle stays held until the next release while active.
    pub fn handle_key_released(&mut self, key: KeyCode) {
        self.route_intent(key, false);
    }

    fn route_intent(&mut self, key: KeyCode, pressed: bool) {
        if !self.active {
            return;
        }
        let Some(direction) = direction_for_key(key) else {
            return;
        };
        let Some(player) = self.player.clone() else {
            return;
        };
        if let Some(entity) = self.entity_mut(&player) {
            entity.set_intent(direction, pressed);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::testing::BytesDecoder;
    use crate::core::entity::{MovableEntity, Sprite, StaticEntity};
    use crate::core::render::{Rect, RecordedCall, RecordingTarget, Vec2};

    const TICK: f32 = 1.0 / 60.0;

    fn screen_with_player() -> Screen<BytesDecoder> {
        let mut screen = Screen::new("sample");
        screen.add_entity(
            "player",
            Box::new(MovableEntity::new(
                Sprite::new("hero", Rect::new(0, 0, 86, 24), Vec2::new(50.0, 50.0)),
                Vec2::new(3.0, 3.0),
            )),
        );
        screen.set_player("player");
        screen
    }

    #[test]
    fn arrow_press_moves_the_player() {
        let mut screen = screen_with_player();
        screen.handle_key_pressed(KeyCode::ArrowRight);
        screen.update(TICK);

        assert_eq!(screen.entity("player").unwrap().position().x, 55.0);
    }

    #[test]
    fn release_clears_the_intent() {
        let mut screen = screen_with_player();
        screen.handle_key_pressed(KeyCode::ArrowRight);
        screen.update(TICK);
        screen.handle_key_released(KeyCode::ArrowRight);
        screen.update(TICK);

        assert_eq!(screen.entity("player").unwrap().position().x, 55.0);
    }

    #[test]
    fn inactive_screen_ignores_player_input() {
        let mut screen = screen_with_player();
        screen.set_active(false);
        screen.handle_key_pressed(KeyCode::ArrowRight);
        screen.update(TICK);

        assert_eq!(screen.entity("player").unwrap().position().x, 50.0);
    }

    #[test]
    fn non_movement_keys_are_ignored() {
        let mut screen = screen_with_player();
        screen.handle_key_pressed(KeyCode::Space);
        screen.update(TICK);

        assert_eq!(screen.entity("player").unwrap().position(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn screen_without_player_absorbs_input() {
        let mut screen: Screen<BytesDecoder> = Screen::new("menu");
        screen.add_entity(
            "logo",
            Box::new(StaticEntity::new(Sprite::new(
                "logo",
                Rect::new(0, 0, 64, 64),
                Vec2::ZERO,
            ))),
        );
        screen.handle_key_pressed(KeyCode::ArrowLeft);
        screen.update(TICK);
    }

    #[test]
    fn draw_follows_insertion_order() {
        let mut screen: Screen<BytesDecoder> = Screen::new("sample");
        screen.add_entity(
            "back",
            Box::new(StaticEntity::new(Sprite::new(
                "back",
                Rect::new(0, 0, 8, 8),
                Vec2::ZERO,
            ))),
        );
        screen.add_entity(
            "front",
            Box::new(StaticEntity::new(Sprite::new(
                "front",
                Rect::new(0, 0, 8, 8),
                Vec2::ZERO,
            ))),
        );

        let mut target = RecordingTarget::new();
        screen.draw(&mut target);

        let names: Vec<&str> = target
            .calls()
            .iter()
            .map(|call| match call {
                RecordedCall::Sprite { texture, .. } => texture.as_str(),
                other => panic!("unexpected call {:?}", other),
            })
            .collect();
        assert_eq!(names, ["back", "front"]);
    }

    #[test]
    fn duplicate_entity_names_keep_the_first() {
        let mut screen: Screen<BytesDecoder> = Screen::new("sample");
        screen.add_entity(
            "thing",
            Box::new(StaticEntity::new(Sprite::new(
                "first",
                Rect::new(0, 0, 8, 8),
                Vec2::new(1.0, 1.0),
            ))),
        );
        screen.add_entity(
            "thing",
            Box::new(StaticEntity::new(Sprite::new(
                "second",
                Rect::new(0, 0, 8, 8),
                Vec2::new(2.0, 2.0),
            ))),
        );

        assert_eq!(screen.entity_count(), 1);
        assert_eq!(screen.entity("thing").unwrap().position(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn update_reaches_every_entity() {
        let mut screen = screen_with_player();
        screen.add_entity(
            "drone",
            Box::new(MovableEntity::new(
                Sprite::new("drone", Rect::new(0, 0, 8, 8), Vec2::ZERO),
                Vec2::new(1.0, 1.0),
            )),
        );
        screen
            .entity_mut("drone")
            .unwrap()
            .set_intent(Direction::Down, true);

        screen.handle_key_pressed(KeyCode::ArrowRight);
        screen.update(TICK);

        assert_eq!(screen.entity("player").unwrap().position().x, 55.0);
        // 1.0 * (1/60 * 100)
        let drone_y = screen.entity("drone").unwrap().position().y;
        assert!((drone_y - 5.0 / 3.0).abs() < 1e-5);
    }
}
