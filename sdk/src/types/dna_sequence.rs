use serde::{Deserialize, Serialize};

use super::AdditionalProperties;

/// A region on a contig: `(contig_id, start, strand, length)`, sent as a
/// four-element JSON array. Strand is `"+"` or `"-"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContigLocation(pub String, pub i64, pub String, pub i64);

impl ContigLocation {
    pub fn new(contig_id: impl Into<String>, start: i64, strand: impl Into<String>, length: i64) -> Self {
        Self(contig_id.into(), start, strand.into(), length)
    }
}

/// Arguments of `get_dna_sequence`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetDnaSequenceParams {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub object_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<ContigLocation>>,
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl GetDnaSequenceParams {
    pub fn new(object_ref: impl Into<String>) -> Self {
        Self {
            object_ref: Some(object_ref.into()),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: ContigLocation) -> Self {
        self.locations.get_or_insert_with(Vec::new).push(location);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_encoding() {
        let params = GetDnaSequenceParams::new("6/1/1")
            .with_location(ContigLocation::new("contig_1", 100, "+", 20))
            .with_location(ContigLocation::new("contig_2", 5, "-", 3));

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "ref": "6/1/1",
                "locations": [["contig_1", 100, "+", 20], ["contig_2", 5, "-", 3]]
            })
        );
    }
}
