pub mod backend;
pub mod builtin_font;
pub mod color;
pub mod config;
pub mod font;
#[cfg(feature = "imaging")]
pub mod render;
