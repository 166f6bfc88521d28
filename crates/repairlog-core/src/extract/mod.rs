//! Equipment extraction from free-form technician notes.
//!
//! The pipeline is: clean the body, assign indentation levels, classify
//! lines, then assemble details under the device they belong to.

pub mod assemble;
pub mod classify;
pub mod clean;
pub mod indent;

pub use assemble::{extract_equipment, extract_from_notes, NoteEquipment};
pub use classify::classify_line;
pub use clean::{clean_body, clean_lines, filter_line, LineFilter};
pub use indent::{indent_level, structure_note, LeveledLine};
