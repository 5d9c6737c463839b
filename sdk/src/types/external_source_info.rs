use serde::{Deserialize, Serialize};

use super::AdditionalProperties;

/// Where an assembly was originally obtained from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyExternalSourceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_source_origination_date: Option<String>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}
