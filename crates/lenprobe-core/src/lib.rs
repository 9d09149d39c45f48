pub mod config;
pub mod logging;

pub mod fetch_head;
pub mod input;
pub mod partition;
pub mod prober;
pub mod retry;
