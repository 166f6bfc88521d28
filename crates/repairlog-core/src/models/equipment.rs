//! Equipment model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::util::{squash_lowercase, truncate_chars};

/// Characters of the raw line used when nothing better names the device.
const RAW_DISPLAY_CHARS: usize = 50;

/// Equipment category
///
/// Declaration order is the display order of the inventory panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Smartphone,
    Tablet,
    DesktopTower,
    AllInOne,
    Laptop,
    Printer,
    Network,
    Peripheral,
    Software,
    Account,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 10] = [
        Self::Smartphone,
        Self::Tablet,
        Self::DesktopTower,
        Self::AllInOne,
        Self::Laptop,
        Self::Printer,
        Self::Network,
        Self::Peripheral,
        Self::Software,
        Self::Account,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smartphone => "smartphone",
            Self::Tablet => "tablet",
            Self::DesktopTower => "desktop_tower",
            Self::AllInOne => "all_in_one",
            Self::Laptop => "laptop",
            Self::Printer => "printer",
            Self::Network => "network",
            Self::Peripheral => "peripheral",
            Self::Software => "software",
            Self::Account => "account",
        }
    }

    /// Singular label used in equipment badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Smartphone => "Smartphone",
            Self::Tablet => "Tablet",
            Self::DesktopTower => "Desktop tower",
            Self::AllInOne => "All-in-one",
            Self::Laptop => "Laptop",
            Self::Printer => "Printer",
            Self::Network => "Network",
            Self::Peripheral => "Peripheral",
            Self::Software => "Software",
            Self::Account => "Account",
        }
    }

    /// Plural heading used for inventory groups.
    #[must_use]
    pub const fn group_label(self) -> &'static str {
        match self {
            Self::Smartphone => "Smartphones",
            Self::Tablet => "Tablets",
            Self::DesktopTower => "Desktop towers",
            Self::AllInOne => "All-in-ones",
            Self::Laptop => "Laptops",
            Self::Printer => "Printers",
            Self::Network => "Network",
            Self::Peripheral => "Peripherals",
            Self::Software => "Software",
            Self::Account => "Accounts",
        }
    }

    /// HTML entity shown next to the category in rendered timelines.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Smartphone => "&#128241;",
            Self::Tablet => "&#128195;",
            Self::DesktopTower | Self::Laptop => "&#128187;",
            Self::AllInOne => "&#128421;",
            Self::Printer => "&#128424;",
            Self::Network => "&#127760;",
            Self::Peripheral => "&#9000;",
            Self::Software => "&#128190;",
            Self::Account => "&#128100;",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("unknown equipment category: {s}")))
    }
}

/// A device, piece of software, or account named in a technician note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub category: Category,
    /// The originating line, trimmed
    pub raw_text: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub model_number: Option<String>,
    /// Detail lines attached while this equipment was current
    #[serde(default)]
    pub details: Vec<String>,
}

impl Equipment {
    /// Create a category-only record for the given line
    #[must_use]
    pub fn new(category: Category, raw_text: impl Into<String>) -> Self {
        Self {
            category,
            raw_text: raw_text.into(),
            brand: None,
            model: None,
            serial: None,
            model_number: None,
            details: Vec::new(),
        }
    }

    /// Human readable name: brand and model when known, else the raw line
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.brand, &self.model, &self.serial) {
            (Some(brand), Some(model), _) => format!("{brand} {model}"),
            (Some(brand), None, Some(serial)) => format!("{brand} (SN:{serial})"),
            (Some(brand), None, None) => brand.clone(),
            (None, Some(model), _) => model.clone(),
            (None, None, _) => truncate_chars(&self.raw_text, RAW_DISPLAY_CHARS),
        }
    }

    /// Category label followed by the known brand and model
    #[must_use]
    pub fn label(&self) -> String {
        let mut parts: Vec<&str> = vec![self.category.label()];
        if let Some(brand) = &self.brand {
            parts.push(brand.as_str());
        }
        if let Some(model) = &self.model {
            parts.push(model.as_str());
        }
        parts.join(" - ")
    }

    /// Normalized dedup key
    ///
    /// Serial wins over brand+model, which wins over model alone. Case and
    /// whitespace never affect the key.
    #[must_use]
    pub fn unique_key(&self) -> String {
        let mut parts = vec![self.category.as_str().to_string()];
        if let Some(serial) = &self.serial {
            parts.push(serial.to_lowercase());
        } else if let Some(brand) = &self.brand {
            parts.push(squash_lowercase(brand));
            if let Some(model) = &self.model {
                parts.push(squash_lowercase(model));
            }
        } else if let Some(model) = &self.model {
            parts.push(squash_lowercase(model));
        }
        parts.join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equipment(category: Category, brand: Option<&str>, model: Option<&str>) -> Equipment {
        Equipment {
            brand: brand.map(str::to_string),
            model: model.map(str::to_string),
            ..Equipment::new(category, "raw line")
        }
    }

    #[test]
    fn display_name_prefers_brand_and_model() {
        let eq = equipment(Category::Smartphone, Some("Samsung"), Some("A54"));
        assert_eq!(eq.display_name(), "Samsung A54");
    }

    #[test]
    fn display_name_uses_serial_with_brand_only() {
        let mut eq = equipment(Category::DesktopTower, Some("Lenovo"), None);
        eq.serial = Some("PF1ABC".to_string());
        assert_eq!(eq.display_name(), "Lenovo (SN:PF1ABC)");
    }

    #[test]
    fn display_name_falls_back_to_truncated_raw_text() {
        let eq = Equipment::new(Category::Tablet, format!("  tablette {}", "x".repeat(80)));
        assert_eq!(eq.display_name().chars().count(), 50);
        assert!(eq.display_name().starts_with("tablette"));
    }

    #[test]
    fn label_joins_known_parts() {
        let eq = equipment(Category::Printer, Some("HP"), Some("OfficeJet 3830"));
        assert_eq!(eq.label(), "Printer - HP - OfficeJet 3830");
        assert_eq!(Equipment::new(Category::Printer, "printer").label(), "Printer");
    }

    #[test]
    fn unique_key_prefers_serial() {
        let mut eq = equipment(Category::Smartphone, Some("Apple"), Some("iPhone 14"));
        eq.serial = Some("ABC123".to_string());
        assert_eq!(eq.unique_key(), "smartphone|abc123");
    }

    #[test]
    fn unique_key_ignores_case_and_whitespace() {
        let a = equipment(Category::Software, None, Some("Microsoft Office"));
        let b = equipment(Category::Software, None, Some("microsoft  office"));
        assert_eq!(a.unique_key(), b.unique_key());
        assert_eq!(a.unique_key(), "software|microsoftoffice");
    }

    #[test]
    fn unique_key_is_category_qualified() {
        let phone = equipment(Category::Smartphone, Some("Samsung"), None);
        let monitor = equipment(Category::Peripheral, Some("Samsung"), None);
        assert_ne!(phone.unique_key(), monitor.unique_key());
    }

    #[test]
    fn category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("fridge".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&Category::DesktopTower).unwrap();
        assert_eq!(json, "\"desktop_tower\"");
    }
}
