use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod buffer;
pub mod command;
pub mod config;
pub mod history;
pub mod operator;
pub mod queue;
pub mod session;
pub mod snapshot;

pub type Tendril = SmartString<LazyCompact>;
