//! Compile-time settings of the demo.
//!
//! There is no command line or configuration file; [`DemoConfig::default`] is the only
//! configuration the binary ever uses. Tests tweak individual fields.

use std::path::PathBuf;

/// Width of the window in pixels.
pub const WINDOW_WIDTH: u32 = 1024;
/// Height of the window in pixels.
pub const WINDOW_HEIGHT: u32 = 568;

/// Settings for window creation, asset lookup and clearing.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Requested OpenGL version as `(major, minor)`, always a core profile.
    pub gl_version: (u8, u8),
    /// Path of the quad's texture, relative to the working directory.
    pub texture_path: PathBuf,
    pub clear_color: [f32; 4],
    /// Creates the window without showing it. Used by tests.
    pub hidden: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Hello OpenGL!".to_string(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            gl_version: (3, 3),
            texture_path: PathBuf::from("assets/texture.png"),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            hidden: false,
        }
    }
}
