//! JSON rendering shared by every output path.
//!
//! Output is pretty-printed with 2-space indentation and keeps non-ASCII
//! text literal, so Japanese chart content stays readable.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}
