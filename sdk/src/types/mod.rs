mod assembly_contig;
mod assembly_data;
mod assembly_stats;
mod dna_sequence;
mod external_source_info;
mod search;

pub use assembly_contig::*;
pub use assembly_data::*;
pub use assembly_stats::*;
pub use dna_sequence::*;
pub use external_source_info::*;
pub use search::*;

use serde::{de::Error, Deserialize, Deserializer};
use serde_json::Value;

/// Unknown JSON members captured while decoding a record.
pub type AdditionalProperties = serde_json::Map<String, Value>;

/// Decodes an optional 64-bit integer the way the service's generated
/// clients do: integral numbers pass through, fractional numbers are
/// truncated toward zero.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_i64() {
                Ok(Some(v))
            } else if let Some(f) = n.as_f64().filter(|f| f.is_finite() && f.abs() < 9.2e18) {
                Ok(Some(f.trunc() as i64))
            } else {
                Err(D::Error::custom(format!("integer out of range: {}", n)))
            }
        }
        Some(other) => Err(D::Error::custom(format!(
            "invalid type: expected integer, found {}",
            other
        ))),
    }
}
