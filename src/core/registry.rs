//=========================================================================
// Screen Registry
//
// Owns the session's screens and tracks which one is current.
//
// Architecture:
//   ScreenRegistry
//     ├─ screens: Vec<Screen>         (fixed after construction)
//     ├─ current: ScreenId            (always valid)
//     └─ previous: Option<ScreenId>   (None until the first transition)
//
// The registry does not own the render set — the loop does. Each update
// the registry reconciles membership: the current screen is added if
// absent, and transitions remove the outgoing screen. Membership is by
// identity (`ScreenId`), never by comparing screen contents.
//
// Transition requests naming an unknown screen are silent no-ops: a typo
// in a transition must never take the session down.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== External Crates =====================================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetDecoder;
use crate::core::screen::Screen;

//=== ScreenId ============================================================

/// Stable identity of a screen within its registry.
///
/// Ids are positions in the registry's construction order; since screens
/// are never added or removed during a session, an id stays valid for the
/// registry's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenId(usize);

//=== RenderSet ===========================================================

/// The set of screens eligible for the draw pass this frame.
///
/// Reconciled every tick against the registry's current screen — this is
/// membership bookkeeping, not a push/pop stack. At most one screen is a
/// member at a time under the registry's reconciliation.
#[derive(Debug, Default)]
pub struct RenderSet {
    members: HashSet<ScreenId>,
}

impl RenderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member; idempotent. Returns whether the set changed.
    pub fn insert(&mut self, id: ScreenId) -> bool {
        self.members.insert(id)
    }

    /// Removes a member if present. Returns whether the set changed.
    pub fn remove(&mut self, id: ScreenId) -> bool {
        self.members.remove(&id)
    }

    pub fn contains(&self, id: ScreenId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ScreenId> + '_ {
        self.members.iter().copied()
    }
}

//=== ScreenRegistry ======================================================

/// Owns the set of screens and performs transitions between them.
///
/// `current` is initialized to the first screen at construction and is
/// never unset afterwards; `previous` stays `None` until the first
/// successful transition.
pub struct ScreenRegistry<D: AssetDecoder> {
    screens: Vec<Screen<D>>,
    current: ScreenId,
    previous: Option<ScreenId>,
}

impl<D: AssetDecoder> ScreenRegistry<D> {
    //--- Construction -----------------------------------------------------

    /// Creates a registry over `screens`, with the first one current.
    ///
    /// # Panics
    ///
    /// Panics if `screens` is empty — a session needs somewhere to start.
    pub fn new(screens: Vec<Screen<D>>) -> Self {
        assert!(!screens.is_empty(), "registry needs at least one screen");
        Self {
            screens,
            current: ScreenId(0),
            previous: None,
        }
    }

    //--- Accessors ----------------------------------------------------------

    pub fn current(&self) -> &Screen<D> {
        &self.screens[self.current.0]
    }

    pub fn current_mut(&mut self) -> &mut Screen<D> {
        &mut self.screens[self.current.0]
    }

    pub fn current_id(&self) -> ScreenId {
        self.current
    }

    pub fn previous(&self) -> Option<&Screen<D>> {
        self.previous.map(|id| &self.screens[id.0])
    }

    pub fn previous_id(&self) -> Option<ScreenId> {
        self.previous
    }

    pub fn screen(&self, id: ScreenId) -> Option<&Screen<D>> {
        self.screens.get(id.0)
    }

    pub fn screen_mut(&mut self, id: ScreenId) -> Option<&mut Screen<D>> {
        self.screens.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    //--- Transitions ----------------------------------------------------------

    /// Makes the screen called `name` current.
    ///
    /// Linear scan over construction order; the first name match wins.
    /// Unknown names are a silent no-op. On a match, the outgoing screen
    /// leaves the render set immediately and becomes `previous`; the
    /// incoming screen joins the render set on the next update.
    pub fn change_current(&mut self, name: &str, render_set: &mut RenderSet) {
        let Some(index) = self.screens.iter().position(|s| s.name() == name) else {
            debug!("no screen named {:?}, transition ignored", name);
            return;
        };

        debug!(
            "screen transition: {:?} -> {:?}",
            self.current().name(),
            name
        );
        render_set.remove(self.current);
        self.previous = Some(self.current);
        self.current = ScreenId(index);
    }

    //--- Update Loop --------------------------------------------------------------

    /// Ticks the current screen, then reconciles render-set membership.
    pub fn update(&mut self, delta: f32, render_set: &mut RenderSet) {
        self.screens[self.current.0].update(delta);
        render_set.insert(self.current);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::testing::BytesDecoder;

    const TICK: f32 = 1.0 / 60.0;

    fn registry(names: &[&str]) -> ScreenRegistry<BytesDecoder> {
        ScreenRegistry::new(names.iter().map(|n| Screen::new(*n)).collect())
    }

    #[test]
    fn first_screen_is_current_at_construction() {
        let registry = registry(&["title", "game"]);
        assert_eq!(registry.current().name(), "title");
        assert!(registry.previous().is_none());
    }

    #[test]
    #[should_panic(expected = "at least one screen")]
    fn empty_registry_panics() {
        let _ = ScreenRegistry::<BytesDecoder>::new(Vec::new());
    }

    #[test]
    fn update_adds_current_to_render_set() {
        let mut registry = registry(&["title", "game"]);
        let mut render_set = RenderSet::new();

        registry.update(TICK, &mut render_set);
        assert!(render_set.contains(registry.current_id()));
        assert_eq!(render_set.len(), 1);
    }

    #[test]
    fn repeated_updates_do_not_duplicate_membership() {
        let mut registry = registry(&["title"]);
        let mut render_set = RenderSet::new();

        registry.update(TICK, &mut render_set);
        registry.update(TICK, &mut render_set);
        assert_eq!(render_set.len(), 1);
    }

    #[test]
    fn transition_swaps_current_and_records_previous() {
        let mut registry = registry(&["title", "game"]);
        let mut render_set = RenderSet::new();
        registry.update(TICK, &mut render_set);
        let title_id = registry.current_id();

        registry.change_current("game", &mut render_set);
        assert_eq!(registry.current().name(), "game");
        assert_eq!(registry.previous().unwrap().name(), "title");
        assert!(!render_set.contains(title_id));

        registry.update(TICK, &mut render_set);
        assert!(render_set.contains(registry.current_id()));
        assert_eq!(render_set.len(), 1);
    }

    #[test]
    fn unknown_screen_name_is_a_silent_noop() {
        let mut registry = registry(&["title", "game"]);
        let mut render_set = RenderSet::new();
        registry.update(TICK, &mut render_set);

        registry.change_current("nonexistent", &mut render_set);
        assert_eq!(registry.current().name(), "title");
        assert!(registry.previous().is_none());
        assert!(render_set.contains(registry.current_id()));
        assert_eq!(render_set.len(), 1);
    }

    #[test]
    fn first_name_match_wins() {
        // Names are unique in practice, but the scan contract is
        // first-match-wins when they are not.
        let mut registry = registry(&["title", "game", "game"]);
        let mut render_set = RenderSet::new();

        registry.change_current("game", &mut render_set);
        assert_eq!(registry.current_id(), ScreenId(1));
    }

    #[test]
    fn transition_to_current_screen_follows_the_same_path() {
        let mut registry = registry(&["title", "game"]);
        let mut render_set = RenderSet::new();
        registry.update(TICK, &mut render_set);

        registry.change_current("title", &mut render_set);
        assert_eq!(registry.current().name(), "title");
        assert_eq!(registry.previous().unwrap().name(), "title");
        // Removed now, re-added by the next update's reconciliation.
        assert!(render_set.is_empty());

        registry.update(TICK, &mut render_set);
        assert_eq!(render_set.len(), 1);
    }

    #[test]
    fn chained_transitions_track_previous() {
        let mut registry = registry(&["a", "b", "c"]);
        let mut render_set = RenderSet::new();

        registry.change_current("b", &mut render_set);
        registry.change_current("c", &mut render_set);
        assert_eq!(registry.current().name(), "c");
        assert_eq!(registry.previous().unwrap().name(), "b");
    }
}
