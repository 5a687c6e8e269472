//! 领域事件定义

pub mod message_event;

pub use message_event::{EventKind, MessageEvent};
