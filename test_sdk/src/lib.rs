//! Test support for AssemblyAPI clients: a canned assembly, stub-server
//! helpers built on `mockito`, and logging setup for test runs.

pub mod constants;
pub mod helper;
pub mod logging;

pub use helper::*;
pub use logging::init_logging;
