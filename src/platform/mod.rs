//! Platform layer
//!
//! - `keyboard`: DOM key names to held controls and one-shot commands
//! - `web` (wasm32 only): canvas 2D surface and animation-frame scheduling

pub mod keyboard;

#[cfg(target_arch = "wasm32")]
pub mod web;
