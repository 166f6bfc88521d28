pub mod calls;
pub mod common;
pub mod completions;
pub mod extract;
pub mod inventory;
pub mod preview;
