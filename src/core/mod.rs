pub mod errors;
pub mod types;

pub use errors::{Error, Result};
pub use types::{
    ClassInfo, FunctionInfo, ImportInfo, Language, ModuleInfo, CONSTRUCTOR_NAME,
};
