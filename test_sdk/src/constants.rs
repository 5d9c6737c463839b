//! This module contains the canned assembly served by the stub helpers

/// Reference of the canned assembly
pub const ASSEMBLY_REF: &str = "6/1/1";

/// Name the canned assembly is stored under
pub const ASSEMBLY_ID: &str = "MyAssembly";

/// Contig ids of the canned assembly, in server order
pub const CONTIG_IDS: [&str; 3] = ["NZ_ALQT01000001", "NZ_ALQT01000002", "NZ_ALQT01000003"];

/// Per-contig lengths, matching `CONTIG_IDS`
pub const CONTIG_LENGTHS: [i64; 3] = [41012, 2628, 80416];

/// Per-contig GC proportions, matching `CONTIG_IDS`
pub const CONTIG_GC: [f64; 3] = [0.37309, 0.41, 0.52];

pub const NUM_CONTIGS: i64 = 5;
pub const DNA_SIZE: i64 = 123456;
pub const GC_CONTENT: f64 = 0.41;

/// Genome objects referencing the canned assembly
pub const GENOME_REFS: [&str; 2] = ["6/2/1", "6/3/4"];

/// Credentials accepted by the stub identity provider
pub const TEST_USER: &str = "alice";
pub const TEST_PASSWORD: &str = "secret";
pub const TEST_TOKEN: &str = "TESTTOKEN0123456789";

/// JSON-RPC error code for an unknown method
pub const METHOD_NOT_FOUND_CODE: i64 = -32601;
