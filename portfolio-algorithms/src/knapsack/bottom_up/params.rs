use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    /// Walk the finished table back to recover the chosen items
    pub reconstruct: bool,

    /// Upper bound on (n + 1) * (C + 1) table cells
    pub max_cells: usize,
}

impl Params {
    pub fn initialize(h: &Option<Map<String, Value>>) -> Self {
        let mut p = Self {
            reconstruct: true,
            max_cells: 1 << 28,
        };
        if let Some(m) = h {
            if let Some(v) = m.get("reconstruct").and_then(|v| v.as_bool()) { p.reconstruct = v; }
            if let Some(v) = m.get("max_cells").and_then(|v| v.as_u64()) { p.max_cells = v as usize; }
        }
        p
    }
}
