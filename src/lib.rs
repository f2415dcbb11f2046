//=========================================================================
// Lumen Engine — Library Root
//
// This crate defines the public API surface of the Lumen Engine.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder` / `Engine`)
// - Keep OS integration (`platform`) hidden from end users, except for
//   the stock asset decoder and its asset types
// - Provide clean separation between the high-level engine facade
//   and lower-level subsystems (screens, assets, rendering)
//
// Typical usage:
// ```no_run
// use lumen_engine::core::registry::ScreenRegistry;
// use lumen_engine::core::screen::Screen;
// use lumen_engine::{EngineBuilder, StockDecoder};
//
// fn main() {
//     let mut screen: Screen<StockDecoder> = Screen::new("main");
//     screen.load_archive("assets/main.pack", &StockDecoder);
//
//     EngineBuilder::new()
//         .with_title("Sample")
//         .build(ScreenRegistry::new(vec![screen]))
//         .run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains all platform-independent engine logic (screens, assets,
// entities, fade, input dispatch). It is exposed publicly for engine-level
// extensibility, but normal application code will mostly use the
// top-level facade plus the prelude.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS-specific logic (window, Winit integration,
// event loop) and is kept private apart from the stock decoder.
//
// `engine` defines the main engine entry point and the frame advance.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{advance_frame, Engine, EngineBuilder};
pub use platform::decoder::{FontFace, MusicStream, SoundBuffer, StockDecoder, Texture};
