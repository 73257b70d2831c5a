pub mod config;
pub mod key_value_store;
pub mod menu_cache;
pub mod menu_state_store;
pub mod path_processing;

pub use config::*;
pub use key_value_store::*;
pub use menu_cache::*;
pub use menu_state_store::*;
pub use path_processing::*;
