use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialise a piped JSON (or YAML) document from stdin.
///
/// `Ok(None)` when stdin is a terminal or nothing was piped, so callers can
/// fall back to flags.
pub fn read_piped<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_document(&buffer)
}

fn parse_document<T: DeserializeOwned>(raw: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(Some(value)),
        Err(json_err) => serde_yaml::from_str(trimmed)
            .map(Some)
            .map_err(|_| {
                Box::<dyn std::error::Error>::from(format!(
                    "stdin is neither valid JSON nor YAML: {}",
                    json_err
                ))
            }),
    }
}
