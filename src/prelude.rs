//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use lumen_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine facade
pub use crate::engine::{advance_frame, Engine, EngineBuilder};

// Screens and transitions
pub use crate::core::registry::{RenderSet, ScreenId, ScreenRegistry};
pub use crate::core::screen::Screen;
pub use crate::core::state::LoopState;

// Entities
pub use crate::core::entity::{Direction, Entity, MovableEntity, Sprite, StaticEntity};

// Fade overlay
pub use crate::core::fade::{FadeAction, FadeOverlay, FadeSpeed, FadeState};

// Input dispatch
pub use crate::core::input::{InputRouter, KeyCode, KeyEvent, KeyHandler};

// Assets
pub use crate::core::assets::{
    ArchiveError, ArchiveLoadJob, AssetBank, AssetDecoder, DecodeError,
    ARCHIVE_FAILURE_EXIT_CODE,
};
pub use crate::{FontFace, MusicStream, SoundBuffer, StockDecoder, Texture};

// Rendering seam
pub use crate::core::render::{Color, DrawCommand, Rect, RenderTarget, Vec2};
