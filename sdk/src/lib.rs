//! Typed client for the AssemblyAPI JSON-RPC service, which serves genome
//! assembly metadata (contigs, GC content, DNA size, external source info).
//!
//! ```no_run
//! use assembly_sdk::{AssemblyApiClient, Config};
//!
//! # fn main() -> assembly_sdk::Result<()> {
//! let client = AssemblyApiClient::new(
//!     Config::new("https://kbase.us/services/assembly_api").with_token("XXXXXXXX"),
//! )?;
//! let stats = client.get_stats("6/1/1", None)?;
//! println!("{:?} contigs", stats.num_contigs);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod types;

pub use client::*;
pub use types::*;
