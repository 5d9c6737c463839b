mod auth;
mod caller;
mod config;
mod error;
mod rpc;
pub mod transport;

pub use auth::*;
pub use caller::*;
pub use config::*;
pub use error::*;
pub use rpc::*;
