//=========================================================================
// Input Dispatch
//
// Key vocabulary and the three-slot input router.
//
// The platform layer converts OS key events into `KeyEvent`s and hands
// them to an `InputRouter`. The router keeps three ordered lists of
// subscriber functions:
//
//   global   — run on every key press (session-level bindings)
//   pressed  — run on every key press, after the global slot
//   released — run on every key release
//
// Every subscriber in a slot runs, in registration order, on every
// event. Subscribers are plain `fn` pointers receiving the loop state by
// `&mut`: state is passed in, never captured, so handlers cannot hold
// stale borrows across frames.
//
//=========================================================================

//=== External Crates =====================================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetDecoder;
use crate::core::state::LoopState;

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the produced character. The
/// platform layer maps the OS vocabulary onto this enum; keys it does not
/// recognize arrive as `Unidentified` and fall through every binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys the platform layer does not map.
    Unidentified,
}

//=== KeyEvent ============================================================

/// A single keyboard transition delivered by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(KeyCode),
    Released(KeyCode),
}

//=== KeyHandler ==========================================================

/// One input subscriber: receives the loop state and the key involved.
pub type KeyHandler<D> = fn(&mut LoopState<D>, KeyCode);

//=== InputRouter =========================================================

/// Ordered multi-subscriber dispatch for keyboard input.
///
/// The built-in session bindings (registered by
/// [`InputRouter::with_defaults`]) are:
///
/// - `Escape` — stop the loop
/// - `F7` — toggle the current screen's `active` flag
/// - `F8` — toggle the fade overlay between Idle and Fading
/// - arrow presses/releases — forwarded to the current screen's player
///   entity as movement intents
///
/// Additional handlers can be registered during [`crate::Engine::init`];
/// they run after the built-ins, in registration order.
pub struct InputRouter<D: AssetDecoder> {
    global: Vec<KeyHandler<D>>,
    pressed: Vec<KeyHandler<D>>,
    released: Vec<KeyHandler<D>>,
}

impl<D: AssetDecoder> InputRouter<D> {
    /// Creates a router with no subscribers at all.
    pub fn new() -> Self {
        Self {
            global: Vec::new(),
            pressed: Vec::new(),
            released: Vec::new(),
        }
    }

    /// Creates a router carrying the built-in session bindings.
    pub fn with_defaults() -> Self {
        let mut router = Self::new();
        router.on_global(builtin_global);
        router.on_pressed(forward_pressed);
        router.on_released(forward_released);
        router
    }

    //--- Registration -----------------------------------------------------

    /// Registers a subscriber in the global slot (runs on every press,
    /// before the pressed slot).
    pub fn on_global(&mut self, handler: KeyHandler<D>) {
        self.global.push(handler);
    }

    /// Registers a subscriber in the player-pressed slot.
    pub fn on_pressed(&mut self, handler: KeyHandler<D>) {
        self.pressed.push(handler);
    }

    /// Registers a subscriber in the player-released slot.
    pub fn on_released(&mut self, handler: KeyHandler<D>) {
        self.released.push(handler);
    }

    //--- Dispatch -----------------------------------------------------------

    /// Routes one key event through the subscriber slots.
    ///
    /// Presses run the global slot then the pressed slot; releases run
    /// the released slot. Within a slot, subscribers run in registration
    /// order, and all of them run.
    pub fn dispatch(&self, state: &mut LoopState<D>, event: KeyEvent) {
        match event {
            KeyEvent::Pressed(key) => {
                for handler in &self.global {
                    handler(state, key);
                }
                for handler in &self.pressed {
                    handler(state, key);
                }
            }
            KeyEvent::Released(key) => {
                for handler in &self.released {
                    handler(state, key);
                }
            }
        }
    }
}

impl<D: AssetDecoder> Default for InputRouter<D> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Built-in Subscribers ================================================

fn builtin_global<D: AssetDecoder>(state: &mut LoopState<D>, key: KeyCode) {
    match key {
        KeyCode::Escape => {
            debug!("escape pressed, stopping loop");
            state.quit();
        }
        KeyCode::F7 => state.toggle_active(),
        KeyCode::F8 => state.toggle_fade(),
        _ => {}
    }
}

fn forward_pressed<D: AssetDecoder>(state: &mut LoopState<D>, key: KeyCode) {
    state.registry.current_mut().handle_key_pressed(key);
}

fn forward_released<D: AssetDecoder>(state: &mut LoopState<D>, key: KeyCode) {
    state.registry.current_mut().handle_key_released(key);
}

//=========================================================================
// Unit Tests
//=========================================================================
