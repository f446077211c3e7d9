//! Start-up loading of the session settings file.

/// Loads `ar_settings.json` and seeds the default box size, falling back to built-in defaults.
pub mod settings_loader;
