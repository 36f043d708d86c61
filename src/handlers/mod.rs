//! HTTP handlers: index/echo and the per-table resource dispatch.

pub mod root;
pub mod table;
pub use root::*;
pub use table::*;
