// Test fixtures for parser testing
//
// Go source snippets covering the declaration shapes the projectors see.

pub mod model_defs;

pub use model_defs::*;
