// src/mirror/mod.rs
// =============================================================================
// This module writes downloaded resources into the local mirror directory.
//
// Submodules:
// - path: URL -> local path, plus collision-safe file allocation
// - download: fetch a resource and store it under the mirror root
// =============================================================================

mod download;
mod path;

pub use download::download;
