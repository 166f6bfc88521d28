//! Equipment assembly: walks a leveled note and groups detail lines under
//! the device they describe.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::classify::classify_line;
use super::indent::{structure_note, LeveledLine};
use crate::models::{Equipment, Note};

const ADDRESS_MARKERS: &[&str] = &["ad:", "ad :", "adresse:", "address:", "context:"];
const PROBLEM_MARKERS: &[&str] = &["pb:", "pb ", "probleme:", "problème:", "problem:"];

/// Root-level lines that introduce the following detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Header {
    /// The device name usually follows one level deeper.
    Address,
    /// A new problem description; details must not stick to a stale device.
    Problem,
}

fn header_marker(text: &str) -> Option<Header> {
    let lower = text.to_lowercase();
    if ADDRESS_MARKERS.iter().any(|marker| lower.starts_with(marker)) {
        Some(Header::Address)
    } else if PROBLEM_MARKERS.iter().any(|marker| lower.starts_with(marker)) {
        Some(Header::Problem)
    } else {
        None
    }
}

/// Assembler state. Indices point into the equipment list being built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum State {
    /// No device is collecting details.
    #[default]
    Idle,
    Collecting(usize),
    /// After a header line; the device may still be open from before it.
    Header(Option<usize>),
}

impl State {
    const fn current(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Collecting(index) => Some(index),
            Self::Header(current) => current,
        }
    }

    /// Whether a level-1 line gets a chance to name a new device.
    const fn accepts_nested_device(self) -> bool {
        matches!(self, Self::Idle | Self::Header(_))
    }
}

#[derive(Debug, Default)]
struct Assembler {
    equipments: Vec<Equipment>,
    state: State,
}

impl Assembler {
    fn open(&mut self, equipment: Equipment) {
        tracing::debug!(
            category = %equipment.category,
            name = %equipment.display_name(),
            "found equipment"
        );
        self.equipments.push(equipment);
        self.state = State::Collecting(self.equipments.len() - 1);
    }

    fn attach(&mut self, detail: &str) {
        if let Some(index) = self.state.current() {
            self.equipments[index].details.push(detail.to_string());
        }
    }

    fn feed(&mut self, line: LeveledLine<'_>) {
        match line.level {
            0 => self.feed_root(line.text),
            1 => {
                if self.state.accepts_nested_device() {
                    if let Some(equipment) = classify_line(line.text) {
                        self.open(equipment);
                        return;
                    }
                }
                self.attach(line.text);
            }
            _ => self.attach(line.text),
        }
    }

    fn feed_root(&mut self, text: &str) {
        if let Some(equipment) = classify_line(text) {
            self.open(equipment);
            return;
        }
        let next = match header_marker(text) {
            Some(Header::Address) => State::Header(self.state.current()),
            Some(Header::Problem) => State::Header(None),
            None => State::Idle,
        };
        self.state = next;
    }
}

/// Extract every piece of equipment named in a plain-text note body.
///
/// Never fails: an empty result means the note names no equipment.
pub fn extract_equipment(body: &str) -> Vec<Equipment> {
    let mut assembler = Assembler::default();
    for line in structure_note(body) {
        assembler.feed(line);
    }
    assembler.equipments
}

/// Equipment found in one note, with the note's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEquipment {
    pub note_id: String,
    pub date: Option<NaiveDateTime>,
    pub subject: String,
    pub equipments: Vec<Equipment>,
}

/// Run extraction over many notes, keeping only notes that name equipment.
pub fn extract_from_notes(notes: &[Note]) -> Vec<NoteEquipment> {
    let results = notes
        .iter()
        .filter_map(|note| {
            let equipments = extract_equipment(&note.body);
            (!equipments.is_empty()).then(|| NoteEquipment {
                note_id: note.id.clone(),
                date: note.date,
                subject: note.subject.clone(),
                equipments,
            })
        })
        .collect::<Vec<_>>();
    tracing::debug!(
        notes = notes.len(),
        with_equipment = results.len(),
        "extracted equipment from notes"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_context_lets_nested_line_name_the_device() {
        let equipments = extract_equipment("address:\n\tprinter hp officejet\n\tpaper jam");
        assert_eq!(equipments.len(), 1);
        let printer = &equipments[0];
        assert_eq!(printer.category, Category::Printer);
        assert_eq!(printer.brand.as_deref(), Some("HP"));
        assert!(printer.model.as_deref().unwrap().contains("OfficeJet"));
        assert_eq!(printer.details, vec!["paper jam"]);
    }

    #[test]
    fn phone_and_pc_notes_split_into_two_devices() {
        let body = "Smartphone Samsung A54\n  ecran casse\n  sn:XYZ\nPC portable Lenovo\n\tpas de wifi";
        let equipments = extract_equipment(body);
        assert_eq!(equipments.len(), 2);

        let phone = &equipments[0];
        assert_eq!(phone.category, Category::Smartphone);
        assert_eq!(phone.brand.as_deref(), Some("Samsung"));
        assert_eq!(phone.model.as_deref(), Some("A54"));
        // a serial on its own detail line stays opaque detail text
        assert_eq!(phone.serial, None);
        assert_eq!(phone.details, vec!["ecran casse", "sn:XYZ"]);

        let laptop = &equipments[1];
        assert_eq!(laptop.category, Category::Laptop);
        assert_eq!(laptop.brand.as_deref(), Some("Lenovo"));
        assert_eq!(laptop.details, vec!["pas de wifi"]);
    }

    #[test]
    fn tabs_and_spaces_nest_identically() {
        let tabs = extract_equipment("iMac\n\tlent\n\t\tram 4go");
        let spaces = extract_equipment("iMac\n  lent\n        ram 4go");
        assert_eq!(tabs, spaces);
        assert_eq!(tabs[0].details, vec!["lent", "ram 4go"]);
    }

    #[test]
    fn problem_header_closes_the_current_device() {
        let body = "iPhone 12\n\tbatterie\npb: lenteur\n\tdetail orphelin\n\t\ttoujours orphelin";
        let equipments = extract_equipment(body);
        assert_eq!(equipments.len(), 1);
        assert_eq!(equipments[0].details, vec!["batterie"]);
    }

    #[test]
    fn address_header_keeps_the_current_device() {
        let body = "iPhone 12\nad: chez la fille\n\tcable change";
        let equipments = extract_equipment(body);
        assert_eq!(equipments[0].details, vec!["cable change"]);
    }

    #[test]
    fn plain_root_text_ends_detail_collection() {
        let body = "Imprimante canon mg3650\n\tencre\nfacture envoyee\n\tnon rattache";
        let equipments = extract_equipment(body);
        assert_eq!(equipments.len(), 1);
        assert_eq!(equipments[0].details, vec!["encre"]);
    }

    #[test]
    fn nested_device_under_current_device_is_a_detail() {
        let body = "iPhone 12\n\tclavier logitech";
        let equipments = extract_equipment(body);
        assert_eq!(equipments.len(), 1);
        assert_eq!(equipments[0].details, vec!["clavier logitech"]);
    }

    #[test]
    fn nested_device_without_context_opens_equipment() {
        let equipments = extract_equipment("bonjour\n\tbox sfr\n\t\tredemarree");
        assert_eq!(equipments.len(), 1);
        assert_eq!(equipments[0].category, Category::Network);
        assert_eq!(equipments[0].details, vec!["redemarree"]);
    }

    #[test]
    fn deep_lines_without_device_are_dropped() {
        assert!(extract_equipment("\t\tdetail\n      autre").is_empty());
    }

    #[test]
    fn blank_lines_do_not_reset_state() {
        let equipments = extract_equipment("iPad\n\n\n\tvitre fendue");
        assert_eq!(equipments[0].details, vec!["vitre fendue"]);
    }

    #[test]
    fn quoted_reply_is_ignored() {
        let body = "iMac\n\tlent\nOn 10/01/2026 at 10:00, Client wrote:\niPhone 15";
        let equipments = extract_equipment(body);
        assert_eq!(equipments.len(), 1);
    }

    #[test]
    fn extract_from_notes_skips_empty_notes() {
        let notes = vec![
            Note::new("n1", None, "Note interne", "iPhone 13"),
            Note::new("n2", None, "Rappel", "rappeler demain"),
        ];
        let results = extract_from_notes(&notes);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].note_id, "n1");
        assert_eq!(results[0].equipments[0].model.as_deref(), Some("iPhone 13"));
    }
}
