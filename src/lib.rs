pub mod cli;
pub mod config;
pub mod core;
pub mod imports;
pub mod parsers;
pub mod render;
pub mod style;
pub mod translator;

pub use crate::config::StyleConfig;
pub use crate::core::{Error, Language, ModuleInfo, Result};
pub use crate::style::StyleProfile;
pub use crate::translator::{Translation, Translator};
