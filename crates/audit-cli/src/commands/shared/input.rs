use std::io::Read;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Decode a record payload from `--json`, or from stdin when the flag is
/// absent or `-`.
pub fn read_payload<T>(json: Option<&str>, what: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let raw = match json {
        Some(inline) if inline != "-" => inline.to_string(),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read payload from stdin")?;
            buf
        }
    };
    parse_payload(&raw, what)
}

pub fn parse_payload<T>(raw: &str, what: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(raw).with_context(|| format!("invalid {what} payload"))
}
