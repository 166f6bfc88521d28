//! Data models for repairlog

mod call;
mod client;
mod equipment;
mod note;
mod timeline;

pub use call::{CallLogEntry, CallType};
pub use client::Client;
pub use equipment::{Category, Equipment};
pub use note::Note;
pub use timeline::{AttachmentInfo, Direction, TimelineItem, TimelineKind};
