//! Line classifier: decides whether a note line names a piece of equipment.
//!
//! The technicians use a small, stable vocabulary, so recognition is a closed
//! cascade of hand-written rules evaluated in order (first match wins).
//! Specific rules sit before generic ones: `ipad` must be tried before the
//! bare `tablette` rule, every categorized rule before the brand-only
//! fallback. Adding a brand is a one-word change in the tables below.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Category, Equipment};
use crate::util::capitalize;

/// Prefixes of lines that describe work or a problem rather than name a
/// device. French as written by the technicians, then English equivalents.
const ACTION_PREFIXES: &[&str] = &[
    "ne parvient", "ne peut", "ne fonctionne", "erreur", "pb ", "pb:", "probleme",
    "problème", "impossible", "a perdu", "veut ", "comment ", "msg left", "bon pour",
    "paye", "intervention", "hospitalis", "livraison et", "le clavier ne", "le recepteur",
    "a changé", "conversion", "envoi", "rdv ", "appel ", "dispo ", "test ", "connexion ",
    "activation ", "reconnexi", "remplacement", "desactivation", "nettoyage", "papier ",
    "ajout ", "aide ", "changer ", "reinstall", "imprime en", "saisie ", "a mis ",
    "fonctionne", "perte ", "a un sinistre", "doit ", "transmiss", "appel de",
    "code client", "mail de test", "wifi:",
    "can't", "cannot", "unable", "does not", "doesn't", "not working", "error", "problem",
    "lost ", "wants ", "how ", "payment received", "paid", "appointment", "call ",
    "available", "connection ", "reconnect", "replacement", "replace ", "deactivation",
    "cleaning", "paper ", "add ", "help ", "change ", "delivery", "sending", "must ",
    "client code",
];

/// Context and credential markers; never device names.
const MARKER_PREFIXES: &[&str] = &[
    "ad:", "ad :", "adresse:", "address:", "context:", "mdp", "password", "id:", "pin ",
];

const DESKTOP_BRANDS: &[&str] = &["lenovo", "hp", "dell", "asus", "acer"];
const LAPTOP_BRANDS: &[&str] = &["lenovo", "hp", "dell", "asus", "acer", "apple", "macbook"];
const PRINTER_BRANDS: &[&str] = &["hp", "canon", "epson", "brother", "samsung"];
const KEYBOARD_BRANDS: &[&str] = &["logitech", "microsoft", "hp", "dell", "apple"];
const MOUSE_BRANDS: &[&str] = &["logitech", "microsoft", "hp"];
const MONITOR_BRANDS: &[&str] = &["dell", "lg", "samsung", "hp", "asus", "acer", "benq"];
const BOX_PROVIDERS: &[&str] = &["sfr", "orange", "free", "bouygues"];
const ACCOUNT_PROVIDERS: &[&str] = &["sfr", "orange", "gmail", "google", "outlook", "free"];

/// Software keyword pattern and canonical name
const SOFTWARE: &[(&str, &str)] = &[
    (r"thunderbird\b", "Thunderbird"),
    (r"office\s*\d*\b", "Microsoft Office"),
    (r"excel\b", "Excel"),
    (r"word\b", "Word"),
    (r"chrome\b", "Google Chrome"),
    (r"firefox\b", "Firefox"),
    (r"outlook\b", "Outlook"),
    (r"whatsapp\b", "WhatsApp"),
];

/// Brands whose spelling is not plain capitalization
const BRAND_SPELLINGS: &[(&str, &str)] = &[
    ("hp", "HP"),
    ("lg", "LG"),
    ("benq", "BenQ"),
    ("sfr", "SFR"),
    ("macbook", "MacBook"),
];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid classifier pattern")
}

fn alternation(words: &[&str]) -> String {
    words.join("|")
}

static DATE_STAMP: LazyLock<Regex> = LazyLock::new(|| compile(r"^\d+ \w+ \d{4}"));
static SERIAL: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)\bsn:(\S+)"));
static MODEL_NUMBER: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)\bmo:(\S+)"));
static CODE_TOKENS: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)\b(?:sn|mo):\S*"));

static IPHONE: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)^(?:smartphone\s+(?:apple\s+)?)?(?:nouvel?\s+|new\s+)?iphone\s*(\d+)?(?:\s+(pro|max|plus|mini)\b)?",
    )
});
static SMARTPHONE_APPLE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^smartphone\s+apple\b"));
static SMARTPHONE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^smartphone\b(?:\s+(\S+)(?:\s+(.+))?)?"));
static IPAD: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^(?:tablette\s+|tablet\s+)?ipad\b"));
static TABLET: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^tablet(?:te)?\b"));
static PRINTER_BRAND: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^(?:imprimante|printer)\s+({})\b\s*(.*)$",
        alternation(PRINTER_BRANDS)
    ))
});
static PRINTER_BARE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^(?:imprimante|printer)$"));
static OFFICEJET: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)office\s*jet"));
static TRAILING_SERIES: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)\s*series\s*$"));
static BOX_PROVIDER: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^(?:nouvelle?\s+|new\s+)?(?:box\s+(?:internet\s+)?|internet\s+box\s+)({})\b",
        alternation(BOX_PROVIDERS)
    ))
});
static BOX_BARE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)^(?:nouvelle?\s+|new\s+)?(?:box\s+internet|internet\s+box)\b")
});
static ROUTER: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^(?:routeur|router)\b"));
static DESKTOP_BRAND: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^(?:(?:uc|ordinateur)\s+fixe|desktop(?:\s+tower)?)\s+({})\b\s*(.*)$",
        alternation(DESKTOP_BRANDS)
    ))
});
static DESKTOP_BARE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^(?:(?:uc|ordinateur)\s+fixe|desktop(?:\s+tower)?)\b"));
static TOWER_BRAND: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^(?:uc|tower)\s+({})\b",
        alternation(DESKTOP_BRANDS)
    ))
});
static COMPUTER: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^(?:ordinateur|computer)$"));
static LAPTOP_BRAND: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^(?:(?:ordinateur|pc)\s+)?(?:portable|laptop)\s+({})\b\s*(.*)$",
        alternation(LAPTOP_BRANDS)
    ))
});
static LAPTOP_BARE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^(?:(?:ordinateur|pc)\s+)?(?:portable|laptop)\b"));
static IMAC: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^imac\b"));
static ALL_IN_ONE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^(?:tout[- ]en[- ]un|all[- ]in[- ]one)\b"));
static KEYBOARD_BRAND: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^(?:clavier|keyboard)\s+({})\b\s*(.*)$",
        alternation(KEYBOARD_BRANDS)
    ))
});
static KEYBOARD_BARE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^(?:clavier|keyboard)\b"));
static MOUSE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^(?:souris|mouse)\b(?:\s+(?:sans\s+fil|wireless))?(?:\s+({})\b)?",
        alternation(MOUSE_BRANDS)
    ))
});
static MONITOR_BRAND: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^(?:moniteur|monitor)\s+({})\b\s*(.*)$",
        alternation(MONITOR_BRANDS)
    ))
});
static MONITOR_BARE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^(?:moniteur|monitor|[eé]cran|screen)\b"));
static SOFTWARE_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    SOFTWARE
        .iter()
        .map(|(pattern, name)| (compile(&format!("(?i)^{pattern}")), *name))
        .collect()
});
static ACCOUNT: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^(?:compte|account)\s+({})\b",
        alternation(ACCOUNT_PROVIDERS)
    ))
});
static BRAND_FALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)^({})\b(?:\s+(\S+))?",
        alternation(DESKTOP_BRANDS)
    ))
});

/// A line prepared for the rule cascade.
struct Line<'a> {
    /// Trimmed original text, stored as the equipment's raw text
    text: &'a str,
    /// Text with `sn:`/`mo:` tokens removed, so model captures stay clean
    core: String,
    serial: Option<String>,
    model_number: Option<String>,
}

impl<'a> Line<'a> {
    fn new(text: &'a str) -> Self {
        let capture = |re: &Regex| re.captures(text).map(|caps| caps[1].to_string());
        let core = CODE_TOKENS
            .replace_all(text, "")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            text,
            core,
            serial: capture(&SERIAL),
            model_number: capture(&MODEL_NUMBER),
        }
    }

    /// Hardware record carrying the line's serial and model number.
    fn device(&self, category: Category) -> Equipment {
        Equipment {
            serial: self.serial.clone(),
            model_number: self.model_number.clone(),
            ..Equipment::new(category, self.text)
        }
    }

    fn device_with(&self, category: Category, brand: Option<String>, model: Option<String>) -> Equipment {
        Equipment {
            brand,
            model,
            ..self.device(category)
        }
    }
}

type Builder = fn(&Line<'_>) -> Option<Equipment>;

/// The cascade, in priority order.
const RULES: &[(&str, Builder)] = &[
    ("iphone", iphone),
    ("smartphone_apple", smartphone_apple),
    ("smartphone", smartphone),
    ("ipad", ipad),
    ("tablet", tablet),
    ("printer_brand", printer_brand),
    ("printer", printer_bare),
    ("box_provider", box_provider),
    ("box", box_bare),
    ("router", router),
    ("desktop_brand", desktop_brand),
    ("desktop", desktop_bare),
    ("tower_brand", tower_brand),
    ("computer", computer),
    ("laptop_brand", laptop_brand),
    ("laptop", laptop_bare),
    ("imac", imac),
    ("all_in_one", all_in_one),
    ("keyboard_brand", keyboard_brand),
    ("keyboard", keyboard_bare),
    ("mouse", mouse),
    ("monitor_brand", monitor_brand),
    ("monitor", monitor_bare),
    ("software", software),
    ("account", account),
    ("brand_fallback", brand_fallback),
];

/// Classify one note line.
///
/// Returns `None` for anything that is not clearly a device, software or
/// account name. Serials and model numbers are only read from this line.
pub fn classify_line(text: &str) -> Option<Equipment> {
    let text = text.trim();
    if text.is_empty() || is_excluded(text) {
        return None;
    }

    let line = Line::new(text);
    RULES.iter().find_map(|(name, build)| {
        let equipment = build(&line)?;
        tracing::trace!(rule = name, line = text, "classified equipment line");
        Some(equipment)
    })
}

fn is_excluded(text: &str) -> bool {
    let lower = text.to_lowercase();
    if ACTION_PREFIXES
        .iter()
        .chain(MARKER_PREFIXES)
        .any(|prefix| lower.starts_with(prefix))
    {
        return true;
    }
    if DATE_STAMP.is_match(&lower) {
        return true;
    }
    lower.contains('@')
        && !(lower.contains("imprimante") || lower.contains("printer"))
        && !(lower.starts_with("compte ") || lower.starts_with("account "))
}

/// Canonical spelling of a brand captured in any case.
fn canonical_brand(raw: &str) -> String {
    let lower = raw.to_lowercase();
    BRAND_SPELLINGS
        .iter()
        .find(|(key, _)| *key == lower)
        .map_or_else(|| capitalize(raw), |(_, spelling)| (*spelling).to_string())
}

fn optional_text(value: Option<regex::Match<'_>>) -> Option<String> {
    value
        .map(|found| found.as_str().trim().to_string())
        .filter(|found| !found.is_empty())
}

/// `"<prefix> <extra>"`, or just the prefix when nothing follows the brand.
fn prefixed_model(prefix: &str, extra: Option<String>) -> String {
    extra.map_or_else(|| prefix.to_string(), |extra| format!("{prefix} {extra}"))
}

fn iphone(line: &Line<'_>) -> Option<Equipment> {
    let caps = IPHONE.captures(&line.core)?;
    let mut model = "iPhone".to_string();
    if let Some(number) = caps.get(1) {
        model.push(' ');
        model.push_str(number.as_str());
    }
    if let Some(suffix) = caps.get(2) {
        model.push(' ');
        model.push_str(&capitalize(suffix.as_str()));
    }
    Some(line.device_with(Category::Smartphone, Some("Apple".into()), Some(model)))
}

fn smartphone_apple(line: &Line<'_>) -> Option<Equipment> {
    SMARTPHONE_APPLE.is_match(&line.core).then(|| {
        line.device_with(Category::Smartphone, Some("Apple".into()), Some("iPhone".into()))
    })
}

fn smartphone(line: &Line<'_>) -> Option<Equipment> {
    let caps = SMARTPHONE.captures(&line.core)?;
    let brand = caps.get(1).map(|brand| canonical_brand(brand.as_str()));
    Some(line.device_with(Category::Smartphone, brand, optional_text(caps.get(2))))
}

fn ipad(line: &Line<'_>) -> Option<Equipment> {
    IPAD.is_match(&line.core)
        .then(|| line.device_with(Category::Tablet, Some("Apple".into()), Some("iPad".into())))
}

fn tablet(line: &Line<'_>) -> Option<Equipment> {
    TABLET.is_match(&line.core).then(|| line.device(Category::Tablet))
}

fn printer_brand(line: &Line<'_>) -> Option<Equipment> {
    let caps = PRINTER_BRAND.captures(&line.core)?;
    let model = optional_text(caps.get(2)).map(|model| normalize_printer_model(&model));
    Some(line.device_with(
        Category::Printer,
        Some(canonical_brand(&caps[1])),
        model.filter(|model| !model.is_empty()),
    ))
}

fn normalize_printer_model(model: &str) -> String {
    let model = OFFICEJET.replace_all(model, "OfficeJet");
    TRAILING_SERIES.replace(&model, "").trim().to_string()
}

fn printer_bare(line: &Line<'_>) -> Option<Equipment> {
    PRINTER_BARE.is_match(&line.core).then(|| line.device(Category::Printer))
}

fn box_provider(line: &Line<'_>) -> Option<Equipment> {
    let caps = BOX_PROVIDER.captures(&line.core)?;
    Some(line.device_with(
        Category::Network,
        Some(caps[1].to_uppercase()),
        Some("Internet Box".into()),
    ))
}

fn box_bare(line: &Line<'_>) -> Option<Equipment> {
    BOX_BARE
        .is_match(&line.core)
        .then(|| line.device_with(Category::Network, None, Some("Internet Box".into())))
}

fn router(line: &Line<'_>) -> Option<Equipment> {
    ROUTER
        .is_match(&line.core)
        .then(|| line.device_with(Category::Network, None, Some("Router".into())))
}

fn desktop_brand(line: &Line<'_>) -> Option<Equipment> {
    let caps = DESKTOP_BRAND.captures(&line.core)?;
    Some(line.device_with(
        Category::DesktopTower,
        Some(canonical_brand(&caps[1])),
        optional_text(caps.get(2)),
    ))
}

fn desktop_bare(line: &Line<'_>) -> Option<Equipment> {
    DESKTOP_BARE
        .is_match(&line.core)
        .then(|| line.device(Category::DesktopTower))
}

fn tower_brand(line: &Line<'_>) -> Option<Equipment> {
    let caps = TOWER_BRAND.captures(&line.core)?;
    Some(line.device_with(Category::DesktopTower, Some(canonical_brand(&caps[1])), None))
}

fn computer(line: &Line<'_>) -> Option<Equipment> {
    COMPUTER
        .is_match(&line.core)
        .then(|| line.device(Category::DesktopTower))
}

fn laptop_brand(line: &Line<'_>) -> Option<Equipment> {
    let caps = LAPTOP_BRAND.captures(&line.core)?;
    Some(line.device_with(
        Category::Laptop,
        Some(canonical_brand(&caps[1])),
        optional_text(caps.get(2)),
    ))
}

fn laptop_bare(line: &Line<'_>) -> Option<Equipment> {
    LAPTOP_BARE.is_match(&line.core).then(|| line.device(Category::Laptop))
}

fn imac(line: &Line<'_>) -> Option<Equipment> {
    IMAC.is_match(&line.core)
        .then(|| line.device_with(Category::AllInOne, Some("Apple".into()), Some("iMac".into())))
}

fn all_in_one(line: &Line<'_>) -> Option<Equipment> {
    ALL_IN_ONE
        .is_match(&line.core)
        .then(|| line.device(Category::AllInOne))
}

fn keyboard_brand(line: &Line<'_>) -> Option<Equipment> {
    let caps = KEYBOARD_BRAND.captures(&line.core)?;
    Some(line.device_with(
        Category::Peripheral,
        Some(canonical_brand(&caps[1])),
        Some(prefixed_model("Keyboard", optional_text(caps.get(2)))),
    ))
}

fn keyboard_bare(line: &Line<'_>) -> Option<Equipment> {
    KEYBOARD_BARE
        .is_match(&line.core)
        .then(|| line.device_with(Category::Peripheral, None, Some("Keyboard".into())))
}

fn mouse(line: &Line<'_>) -> Option<Equipment> {
    let caps = MOUSE.captures(&line.core)?;
    let brand = caps.get(1).map(|brand| canonical_brand(brand.as_str()));
    Some(line.device_with(Category::Peripheral, brand, Some("Mouse".into())))
}

fn monitor_brand(line: &Line<'_>) -> Option<Equipment> {
    let caps = MONITOR_BRAND.captures(&line.core)?;
    Some(line.device_with(
        Category::Peripheral,
        Some(canonical_brand(&caps[1])),
        Some(prefixed_model("Monitor", optional_text(caps.get(2)))),
    ))
}

fn monitor_bare(line: &Line<'_>) -> Option<Equipment> {
    MONITOR_BARE
        .is_match(&line.core)
        .then(|| line.device_with(Category::Peripheral, None, Some("Monitor".into())))
}

fn software(line: &Line<'_>) -> Option<Equipment> {
    SOFTWARE_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(&line.core))
        .map(|(_, name)| Equipment {
            model: Some((*name).to_string()),
            ..Equipment::new(Category::Software, line.text)
        })
}

fn account(line: &Line<'_>) -> Option<Equipment> {
    let caps = ACCOUNT.captures(&line.core)?;
    Some(Equipment {
        model: Some(format!("Account {}", capitalize(&caps[1]))),
        ..Equipment::new(Category::Account, line.text)
    })
}

/// `"Lenovo sn:XXXX"` or `"Dell Optiplex"`: a desktop brand with no category word.
fn brand_fallback(line: &Line<'_>) -> Option<Equipment> {
    let caps = BRAND_FALLBACK.captures(&line.core)?;
    let model = caps.get(2).map(|token| token.as_str().to_string());
    if model.is_none() && line.serial.is_none() {
        return None;
    }
    Some(line.device_with(Category::DesktopTower, Some(canonical_brand(&caps[1])), model))
}
