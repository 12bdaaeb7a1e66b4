#![doc = include_str!("../README.md")]

mod list;
pub use list::*;

mod format;
pub use format::*;

mod collector;
pub use collector::*;

mod multi;
pub use multi::*;

mod any;
pub use any::*;
