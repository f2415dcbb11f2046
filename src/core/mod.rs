//=========================================================================
// Core Modules
//
// Platform-independent engine logic: screens and their registry, the
// fade overlay, entities, asset banks, input dispatch, and the loop
// state all live here. Nothing in this tree touches the OS — the
// platform layer drives these modules and owns the window.
//
//=========================================================================

pub mod assets;
pub mod entity;
pub mod fade;
pub mod input;
pub mod registry;
pub mod render;
pub mod screen;
pub mod state;
