//! Request and response bodies

pub mod audit;
pub mod contact;
pub mod context;
pub mod email;
pub mod places;

use serde::{Deserialize, Deserializer};

/// Read an optional string field, treating `""` and whitespace as absent
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}
