//! Small JSON helpers shared by the validators, mapping tables and checker.

pub mod json_path;

pub use json_path::{json_type_name, PathMapper, PathMapperError};

use std::any::Any;

/// Text of a caught panic payload.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "translator panicked with a non-string payload".to_string()
    }
}
