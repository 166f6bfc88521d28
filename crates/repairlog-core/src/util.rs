//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Truncate text to at most `max_chars` characters after trimming.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.trim().chars().take(max_chars).collect()
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Lowercase and drop every whitespace character.
///
/// Used for dedup keys so that "Office 2019" and "office2019" collide.
pub fn squash_lowercase(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" A54 ".to_string())),
            Some("A54".to_string())
        );
    }

    #[test]
    fn capitalize_handles_mixed_case() {
        assert_eq!(capitalize("lENOVO"), "Lenovo");
        assert_eq!(capitalize("pro"), "Pro");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn squash_lowercase_removes_all_whitespace() {
        assert_eq!(squash_lowercase("  OfficeJet \t 3830 "), "officejet3830");
    }

    #[test]
    fn truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("  écran cassé  ", 5), "écran");
    }
}
