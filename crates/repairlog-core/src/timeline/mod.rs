//! Per-client timeline assembly.
//!
//! Source adapters hand over already-fetched records (mails, calendar
//! events, work sessions, call log rows) as [`TimelineItem`]s or
//! [`MailMessage`]s. This module turns mails into items, merges every
//! source into one chronological list and derives the panels shown next to
//! it (kind filters, equipment occurrences).

pub mod classify;

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use classify::{
    classify_message, extract_amount, mail_direction, message_matches_client,
    sender_display_name, MessageHeaders,
};

use crate::config::ShopConfig;
use crate::extract::{clean_body, extract_equipment};
use crate::inventory::{Inventory, InventoryBuilder};
use crate::models::{AttachmentInfo, Category, Client, Equipment, TimelineItem, TimelineKind};

/// A fetched mail, decoded by the mail adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailMessage {
    /// `Message-ID` header, used to drop copies found in several folders
    pub message_id: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub from: String,
    pub to: String,
    pub subject: String,
    /// Plain text body
    pub body: String,
    pub folder: String,
    pub attachments: Vec<AttachmentInfo>,
}

impl MailMessage {
    #[must_use]
    pub fn headers(&self) -> MessageHeaders<'_> {
        MessageHeaders {
            from: &self.from,
            to: &self.to,
            subject: &self.subject,
            body: &self.body,
        }
    }
}

/// Build the timeline item for one mail.
///
/// The body is cleaned for display; equipment is extracted from the full
/// body, and only for note kinds.
#[must_use]
pub fn mail_item(message: &MailMessage, config: &ShopConfig) -> TimelineItem {
    let kind = classify_message(message.headers(), config);
    let mut item = TimelineItem::new(
        kind,
        message.date,
        message.subject.clone(),
        clean_body(&message.body, config.max_clean_lines),
    );
    item.direction = mail_direction(&message.from, config);
    item.sender_name = sender_display_name(&message.from);
    item.folder.clone_from(&message.folder);
    item.amount = extract_amount(&message.subject);
    item.attachments.clone_from(&message.attachments);
    if kind.extracts_equipment() {
        item.equipments = extract_equipment(&message.body);
    }
    item
}

/// Items for every mail concerning `client`, oldest first.
///
/// Mails sharing a `Message-ID` are kept once.
#[must_use]
pub fn client_mail_items(
    messages: &[MailMessage],
    client: &Client,
    config: &ShopConfig,
) -> Vec<TimelineItem> {
    let mut seen_ids = HashSet::new();
    let mut items = messages
        .iter()
        .filter(|message| match message.message_id.as_deref() {
            Some(id) if !id.is_empty() => seen_ids.insert(id),
            _ => true,
        })
        .filter(|message| message_matches_client(message.headers(), client))
        .map(|message| mail_item(message, config))
        .collect::<Vec<_>>();
    sort_timeline(&mut items);
    tracing::debug!(client = %client.id, mails = items.len(), "selected client mails");
    items
}

/// Stable chronological sort; undated items come first.
pub fn sort_timeline(items: &mut [TimelineItem]) {
    items.sort_by_key(|item| item.date);
}

/// Concatenate every source and sort the result chronologically.
#[must_use]
pub fn merge_timeline<I>(sources: I) -> Vec<TimelineItem>
where
    I: IntoIterator<Item = Vec<TimelineItem>>,
{
    let mut items = sources.into_iter().flatten().collect::<Vec<_>>();
    sort_timeline(&mut items);
    items
}

/// One entry of the kind filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindFilter {
    pub kind: TimelineKind,
    pub label: String,
    pub count: usize,
    pub color: &'static str,
}

/// Kinds present in the timeline with their counts, most frequent first.
/// Equal counts keep first-seen order.
#[must_use]
pub fn kind_filters(items: &[TimelineItem]) -> Vec<KindFilter> {
    let mut filters: Vec<KindFilter> = Vec::new();
    for item in items {
        if let Some(filter) = filters.iter_mut().find(|filter| filter.kind == item.kind) {
            filter.count += 1;
        } else {
            filters.push(KindFilter {
                kind: item.kind,
                label: item.type_label.clone(),
                count: 1,
                color: item.kind.color(),
            });
        }
    }
    filters.sort_by(|a, b| b.count.cmp(&a.count));
    filters
}

/// One mention of a piece of equipment in the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipmentOccurrence<'a> {
    pub equipment: &'a Equipment,
    pub date: Option<NaiveDateTime>,
    pub type_label: &'a str,
    /// Position of the owning item in the timeline
    pub item_index: usize,
}

/// Every equipment mention, newest first. Undated mentions come last.
#[must_use]
pub fn equipment_occurrences(items: &[TimelineItem]) -> Vec<EquipmentOccurrence<'_>> {
    let mut occurrences = items
        .iter()
        .enumerate()
        .flat_map(|(item_index, item)| {
            item.equipments.iter().map(move |equipment| EquipmentOccurrence {
                equipment,
                date: item.date,
                type_label: &item.type_label,
                item_index,
            })
        })
        .collect::<Vec<_>>();
    occurrences.sort_by(|a, b| b.date.cmp(&a.date));
    occurrences
}

/// Group occurrences by category in display order, keeping their order.
#[must_use]
pub fn group_occurrences(
    occurrences: Vec<EquipmentOccurrence<'_>>,
) -> BTreeMap<Category, Vec<EquipmentOccurrence<'_>>> {
    let mut groups: BTreeMap<Category, Vec<EquipmentOccurrence<'_>>> = BTreeMap::new();
    for occurrence in occurrences {
        groups
            .entry(occurrence.equipment.category)
            .or_default()
            .push(occurrence);
    }
    groups
}

/// Inventory of every equipment mentioned in the timeline, each mention
/// dated with its item.
#[must_use]
pub fn timeline_inventory(items: &[TimelineItem]) -> Inventory {
    let mut builder = InventoryBuilder::new();
    for item in items {
        builder.add_note(item.date, &item.equipments);
    }
    builder.build()
}
