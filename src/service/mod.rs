//! Dispatcher: validates resources against the live schema and executes
//! the statements the builder produces.

mod dispatch;
pub use dispatch::{Dispatcher, Resource};
