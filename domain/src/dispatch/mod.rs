//! Dispatch primitives shared by every action group.

pub mod argument;
pub mod error;

pub use argument::RawArgument;
pub use error::DispatchError;
