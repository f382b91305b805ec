//! Console front-end for the `chess_mcts` engine

pub mod console;
pub mod settings;

pub use console::Console;
pub use settings::{load_settings, save_settings, settings_path, Settings, SettingsError};
