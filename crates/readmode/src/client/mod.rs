// Author: Dustin Pilgrim
// License: MIT

mod ipc;
mod print;
mod run;

pub use run::run;
