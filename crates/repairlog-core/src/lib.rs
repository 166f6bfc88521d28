//! repairlog-core - Core library for repairlog
//!
//! This crate turns already-fetched repair shop data (technician notes,
//! phone system call logs, timeline entries built by the source adapters)
//! into structured equipment records, per-client inventories, and a merged
//! call history. Everything here is synchronous and performs no network I/O.

pub mod calls;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod inventory;
pub mod models;
pub mod timeline;
pub mod util;

pub use calls::{reconcile_calls, Reconciliation};
pub use config::ShopConfig;
pub use error::{Error, Result};
pub use extract::{extract_equipment, extract_from_notes, NoteEquipment};
pub use inventory::{build_inventory, Inventory, InventoryBuilder, InventoryEntry};
pub use models::{
    CallLogEntry, CallType, Category, Client, Equipment, Note, TimelineItem, TimelineKind,
};
pub use timeline::MailMessage;
