//! Configuration module for recap
//!
//! Handles loading settings from a TOML file plus environment overrides.

mod settings;

pub use settings::{
    parse_flag, GeneralSettings, LlmSettings, MailSettings, MockSettings, ServerSettings, Settings,
};
