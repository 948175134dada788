// Option planning engine - no I/O, no process handling

pub mod core;
pub mod hardware;

pub use self::core::*;
pub use hardware::{HardwareApi, NvencHandler, QsvHandler, VaapiHandler};
