mod json;
pub use json::*;
mod report;
pub use report::*;
