use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{to_string, to_value, Map, Value};
use std::{fs, io::Read};

pub fn dejsonify<T>(json_str: &str) -> serde_json::Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str::<T>(json_str)
}

/// Serializes with object keys in sorted order so output is stable.
pub fn jsonify<T>(obj: &T) -> Result<String>
where
    T: Serialize,
{
    Ok(to_string(&sort_keys(to_value(obj)?))?)
}

fn sort_keys(json_value: Value) -> Value {
    match json_value {
        Value::Object(obj) => {
            let mut entries: Vec<(String, Value)> = obj.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Reads `input` as a JSON document. `-` means stdin, anything ending in
/// `.json` is a file path, everything else is parsed as inline JSON.
pub fn load_json<T>(input: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else if input.ends_with(".json") {
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))?
    } else {
        input.to_string()
    };
    dejsonify(&content).with_context(|| format!("Failed to parse {}", describe(input)))
}

fn describe(input: &str) -> String {
    if input == "-" {
        "stdin".to_string()
    } else if input.ends_with(".json") {
        input.to_string()
    } else {
        "inline json".to_string()
    }
}
