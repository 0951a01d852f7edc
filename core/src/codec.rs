use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ZoneResult;

pub fn encode<T>(value: &T) -> ZoneResult<String>
where
    T: Serialize,
{
    Ok(serde_json::to_string(value)?)
}

pub fn decode<T>(raw: &str) -> ZoneResult<T>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_str(raw)?)
}
