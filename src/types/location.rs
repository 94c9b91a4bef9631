use serde::{Deserialize, Deserializer, Serialize};

/// A missing or null `city` decodes as empty, which clears the gate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Location {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
