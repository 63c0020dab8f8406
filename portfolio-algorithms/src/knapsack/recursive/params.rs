use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    /// Largest instance the exhaustive search will accept
    pub max_items: usize,
}

impl Params {
    pub fn initialize(h: &Option<Map<String, Value>>) -> Self {
        let mut p = Self { max_items: 25 };
        if let Some(m) = h {
            if let Some(v) = m.get("max_items").and_then(|v| v.as_u64()) { p.max_items = v as usize; }
        }
        p
    }
}
