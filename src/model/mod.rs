pub mod category;
pub mod config;
pub mod task;

pub use category::*;
pub use config::*;
pub use task::*;
