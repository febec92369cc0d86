pub use stylepost::*;
pub use stylepost_filesystem as file_system;

pub mod config;
pub mod stylepost;

mod plugins;
