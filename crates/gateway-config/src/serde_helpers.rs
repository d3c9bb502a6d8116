//! Serde helpers for configuration deserialization

use serde::{Deserialize, Deserializer};

/// Accepts a port written either as a string (`"5000"`) or as an integer
/// (`5000`) and normalises it to a string.
pub fn deserialize_port<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Port {
		Text(String),
		Number(u64),
	}

	match Port::deserialize(deserializer)? {
		Port::Text(text) => Ok(text),
		Port::Number(number) => Ok(number.to_string()),
	}
}
