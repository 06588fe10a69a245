/// Host client interface
pub mod host;

/// Logitech G-key device events
pub mod gkey;

/// Push-to-talk state adapter
pub mod ptt;

/// Key event dispatch
pub mod hotkey;

/// Plugin configuration
pub mod config;

/// String encoding helpers
pub mod encoding;

/// Host plugin entry points
pub mod plugin;

/// Utility modules
pub mod utils;
