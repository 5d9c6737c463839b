use serde::{Deserialize, Serialize};

use super::{lenient_i64, AdditionalProperties};

/// Summary row for one contig, as listed in a contig search result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contig_id: Option<String>,
    /// Description from the FASTA header row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Length in base pairs.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_i64"
    )]
    pub length: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_i64"
    )]
    pub gc: Option<i64>,
    /// 0 or 1; `None` when circularity is unknown.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_i64"
    )]
    pub is_circ: Option<i64>,
    /// Number of 'N' bases.
    #[serde(
        rename = "N_count",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_i64"
    )]
    pub n_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}
