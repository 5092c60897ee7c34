//! Core helpers shared across fog modules

pub mod utils;

pub use utils::{format_file_size, generate_token, truncate_display};
