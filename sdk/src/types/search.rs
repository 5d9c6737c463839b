use serde::{Deserialize, Serialize};

use super::{lenient_i64, AdditionalProperties, AssemblyData};

/// One sort key: a column name and a 0/1 ascending flag, sent as a
/// two-element JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSorting(pub String, pub i64);

impl ColumnSorting {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self(column.into(), 1)
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self(column.into(), 0)
    }

    pub fn column(&self) -> &str {
        &self.0
    }

    pub fn is_ascending(&self) -> bool {
        self.1 != 0
    }
}

/// Arguments of `search_contigs`.
///
/// `num_found` may be passed back from a previous page so the server can
/// skip counting; leave it unset unless it came from the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchAssemblyOptions {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub object_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<Vec<ColumnSorting>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_i64"
    )]
    pub start: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_i64"
    )]
    pub limit: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_i64"
    )]
    pub num_found: Option<i64>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl SearchAssemblyOptions {
    pub fn new(object_ref: impl Into<String>) -> Self {
        Self {
            object_ref: Some(object_ref.into()),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_sort(mut self, sorting: ColumnSorting) -> Self {
        self.sort_by.get_or_insert_with(Vec::new).push(sorting);
        self
    }

    pub fn with_start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_num_found(mut self, num_found: i64) -> Self {
        self.num_found = Some(num_found);
        self
    }
}

/// One page of contig search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchAssemblyResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_i64"
    )]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contigs: Option<Vec<AssemblyData>>,
    /// Total matches, of which `contigs` holds one page.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_i64"
    )]
    pub num_found: Option<i64>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}
