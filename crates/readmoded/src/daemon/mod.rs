// Author: Dustin Pilgrim
// License: MIT

pub mod handlers;
pub mod instance_lock;
pub mod paths;
pub mod server;
pub mod state;
pub mod store;

pub use paths::default_log_path;
pub use server::run;
