//! Per-client equipment inventory.
//!
//! Equipment from every note is deduplicated by [`Equipment::unique_key`];
//! each entry remembers how often it was mentioned and when.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::extract::NoteEquipment;
use crate::models::{Category, Equipment};

/// One deduplicated piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// Dedup key shared by every mention of this equipment
    pub key: String,
    /// First mention seen
    pub equipment: Equipment,
    pub count: usize,
    /// Date of the owning note for every mention, in insertion order
    pub dates: Vec<Option<NaiveDateTime>>,
}

impl InventoryEntry {
    #[must_use]
    pub const fn category(&self) -> Category {
        self.equipment.category
    }

    /// Most recent dated mention, if any.
    #[must_use]
    pub fn last_seen(&self) -> Option<NaiveDateTime> {
        self.dates.iter().flatten().max().copied()
    }
}

/// Deduplicated equipment, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    #[must_use]
    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total mentions across all entries.
    #[must_use]
    pub fn total_mentions(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&InventoryEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Entries grouped by category in display order, first-seen order
    /// inside each group. Empty categories are omitted.
    #[must_use]
    pub fn groups(&self) -> Vec<(Category, Vec<&InventoryEntry>)> {
        Category::ALL
            .into_iter()
            .filter_map(|category| {
                let entries = self
                    .entries
                    .iter()
                    .filter(|entry| entry.category() == category)
                    .collect::<Vec<_>>();
                (!entries.is_empty()).then_some((category, entries))
            })
            .collect()
    }

    /// Combine two inventories: counts are summed and dates concatenated for
    /// shared keys; keys only present in `other` are appended.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let mut builder = InventoryBuilder::from(self);
        for entry in other.entries {
            builder.absorb(entry);
        }
        builder.build()
    }
}

/// Accumulates equipment note by note.
#[derive(Debug, Default)]
pub struct InventoryBuilder {
    entries: Vec<InventoryEntry>,
    positions: HashMap<String, usize>,
}

impl InventoryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every equipment of one note, dated with the note's date.
    pub fn add_note(&mut self, date: Option<NaiveDateTime>, equipments: &[Equipment]) -> &mut Self {
        for equipment in equipments {
            self.add(date, equipment);
        }
        self
    }

    /// Record a single mention.
    pub fn add(&mut self, date: Option<NaiveDateTime>, equipment: &Equipment) -> &mut Self {
        self.absorb(InventoryEntry {
            key: equipment.unique_key(),
            equipment: equipment.clone(),
            count: 1,
            dates: vec![date],
        });
        self
    }

    fn absorb(&mut self, entry: InventoryEntry) {
        if let Some(&position) = self.positions.get(&entry.key) {
            let existing = &mut self.entries[position];
            existing.count += entry.count;
            existing.dates.extend(entry.dates);
        } else {
            self.positions.insert(entry.key.clone(), self.entries.len());
            self.entries.push(entry);
        }
    }

    #[must_use]
    pub fn build(self) -> Inventory {
        tracing::debug!(entries = self.entries.len(), "built equipment inventory");
        Inventory {
            entries: self.entries,
        }
    }
}

impl From<Inventory> for InventoryBuilder {
    fn from(inventory: Inventory) -> Self {
        let positions = inventory
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.key.clone(), position))
            .collect();
        Self {
            entries: inventory.entries,
            positions,
        }
    }
}

/// Build an inventory from the output of [`crate::extract::extract_from_notes`].
#[must_use]
pub fn build_inventory(notes: &[NoteEquipment]) -> Inventory {
    let mut builder = InventoryBuilder::new();
    for note in notes {
        builder.add_note(note.date, &note.equipments);
    }
    builder.build()
}
