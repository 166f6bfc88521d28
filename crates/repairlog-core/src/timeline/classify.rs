//! Message classification from mail headers.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ShopConfig;
use crate::models::{Client, Direction, TimelineKind};

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+[\.,]?\d*)\s*(?:eur|EUR|€)").expect("valid amount pattern")
});
static SENDER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*<").expect("valid sender name pattern"));

const INCOMING_CALL_SUBJECTS: [&str; 2] = ["appel entrant", "incoming call"];
const ACCOUNTANT_MAILBOX: &str = "comptable@";
const PAYMENT_PROVIDER_SENDER: &str = "e-transactions";
const QUOTE_EXCLUDED_WORDS: [&str; 3] = ["facture", "paiement", "suivi"];
/// Shortest part of a client name matched against subjects.
const MIN_NAME_PART_CHARS: usize = 4;

/// Header fields of a message, as seen by the classifier.
#[derive(Debug, Clone, Copy)]
pub struct MessageHeaders<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
}

fn is_phone_system(from_lower: &str, config: &ShopConfig) -> bool {
    !config.phone_system_sender.is_empty() && from_lower.contains(&config.phone_system_sender)
}

/// Decide what a message is from its sender, recipient, subject and the
/// start of its body. Checks run in a fixed order; the first hit wins.
#[must_use]
pub fn classify_message(headers: MessageHeaders<'_>, config: &ShopConfig) -> TimelineKind {
    let from = headers.from.to_lowercase();
    let to = headers.to.to_lowercase();
    let subject = headers.subject.to_lowercase();
    let body = headers
        .body
        .chars()
        .take(config.max_body_preview_chars)
        .collect::<String>()
        .to_lowercase();
    let domain = config.shop_domain_lower();
    let from_shop = from.contains(&domain);
    let from_phone_system = is_phone_system(&from, config);

    let to_internal = config
        .internal_mailboxes
        .iter()
        .any(|mailbox| to.contains(&format!("{mailbox}{domain}")));
    if to_internal {
        if INCOMING_CALL_SUBJECTS.iter().any(|marker| subject.contains(marker)) {
            return TimelineKind::CallNote;
        }
        return TimelineKind::InternalNote;
    }

    if from_phone_system {
        return TimelineKind::CallIncoming;
    }

    if to.contains(ACCOUNTANT_MAILBOX) || subject.contains("chq ") {
        return TimelineKind::Accounting;
    }

    if subject.contains("facture non acquitt") {
        return TimelineKind::InvoiceUnpaid;
    }
    if subject.contains("facture") {
        return TimelineKind::Invoice;
    }

    if subject.contains("paiement") || from.contains(PAYMENT_PROVIDER_SENDER) {
        return TimelineKind::Payment;
    }

    if subject.contains("intervention") || subject.contains("proposition maintenance") {
        return TimelineKind::Quote;
    }
    if subject.contains(&format!("{domain} :"))
        && !QUOTE_EXCLUDED_WORDS.iter().any(|word| subject.contains(word))
    {
        if body.contains("bon pour accord") {
            return TimelineKind::QuoteAccepted;
        }
        if from_shop {
            return TimelineKind::Quote;
        }
        return TimelineKind::QuoteReply;
    }

    if subject.contains("suivi") {
        return TimelineKind::Followup;
    }
    if subject.contains("demande de rappel") {
        return TimelineKind::Callback;
    }

    if from_shop {
        TimelineKind::Reply
    } else {
        TimelineKind::ClientEmail
    }
}

/// Whether a message concerns `client`.
///
/// Matches on exact values only: one of the client's addresses in the
/// headers, the full name in the headers, a name part of four characters or
/// more in the subject, or one of the client's phone numbers in the body.
#[must_use]
pub fn message_matches_client(headers: MessageHeaders<'_>, client: &Client) -> bool {
    let header_text = format!("{} {} {}", headers.from, headers.to, headers.subject).to_lowercase();

    if client
        .emails
        .iter()
        .map(|email| email.trim().to_lowercase())
        .any(|email| !email.is_empty() && header_text.contains(&email))
    {
        return true;
    }

    let name = client.name.trim().to_lowercase();
    if !name.is_empty() && header_text.contains(&name) {
        return true;
    }

    let subject = headers.subject.to_lowercase();
    if name
        .split_whitespace()
        .any(|part| part.chars().count() >= MIN_NAME_PART_CHARS && subject.contains(part))
    {
        return true;
    }

    client
        .phones
        .iter()
        .any(|phone| !phone.is_empty() && headers.body.contains(phone.as_str()))
}

/// Euro amount mentioned in a subject, e.g. `78` from `chq 78EUR`.
#[must_use]
pub fn extract_amount(subject: &str) -> Option<String> {
    AMOUNT
        .captures(subject)
        .and_then(|captures| captures.get(1))
        .map(|amount| amount.as_str().to_string())
}

/// Display name of a `From` header: the part before `<address>`, unquoted.
#[must_use]
pub fn sender_display_name(from: &str) -> String {
    SENDER_NAME.captures(from).map_or_else(
        || from.trim().to_string(),
        |captures| captures[1].trim().trim_matches('"').to_string(),
    )
}

/// Mail sent by the shop or its phone system points out, the rest in.
#[must_use]
pub fn mail_direction(from: &str, config: &ShopConfig) -> Direction {
    let from = from.to_lowercase();
    if from.contains(&config.shop_domain_lower()) || is_phone_system(&from, config) {
        Direction::Out
    } else {
        Direction::In
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(from: &str, to: &str, subject: &str, body: &str) -> TimelineKind {
        classify_message(
            MessageHeaders {
                from,
                to,
                subject,
                body,
            },
            &ShopConfig::default(),
        )
    }

    const SHOP: &str = "Atelier <contact@geekadomicile.com>";
    const CLIENT: &str = "Daniele Duhammel <d.duhammel@example.fr>";

    #[test]
    fn internal_mailboxes_yield_notes() {
        assert_eq!(
            classify(SHOP, "ttt@geekadomicile.com", "Duhammel", ""),
            TimelineKind::InternalNote
        );
        assert_eq!(
            classify(SHOP, "CR@geekadomicile.com", "Appel entrant +33681372829", ""),
            TimelineKind::CallNote
        );
    }

    #[test]
    fn phone_system_mail_is_an_incoming_call() {
        assert_eq!(
            classify("incall@operator.fr", "contact@geekadomicile.com", "+33681372829", ""),
            TimelineKind::CallIncoming
        );
    }

    #[test]
    fn billing_subjects() {
        assert_eq!(classify(SHOP, "comptable@cabinet.fr", "Envoi", ""), TimelineKind::Accounting);
        assert_eq!(classify(SHOP, CLIENT, "chq 78EUR", ""), TimelineKind::Accounting);
        assert_eq!(
            classify(SHOP, CLIENT, "Facture non acquittée 2026-01", ""),
            TimelineKind::InvoiceUnpaid
        );
        assert_eq!(classify(SHOP, CLIENT, "Votre facture", ""), TimelineKind::Invoice);
        assert_eq!(
            classify("noreply@e-transactions.fr", CLIENT, "Ticket", ""),
            TimelineKind::Payment
        );
    }

    #[test]
    fn quotes_and_replies() {
        assert_eq!(
            classify(SHOP, CLIENT, "Intervention du 12/01", ""),
            TimelineKind::Quote
        );
        assert_eq!(
            classify(CLIENT, SHOP, "RE: Geekadomicile : devis", "Bon pour accord, merci"),
            TimelineKind::QuoteAccepted
        );
        assert_eq!(
            classify(SHOP, CLIENT, "Geekadomicile : devis", ""),
            TimelineKind::Quote
        );
        assert_eq!(
            classify(CLIENT, SHOP, "RE: Geekadomicile : devis", "ok pour moi"),
            TimelineKind::QuoteReply
        );
    }

    #[test]
    fn acceptance_outside_body_preview_is_ignored() {
        let body = format!("{}bon pour accord", "x".repeat(400));
        assert_eq!(
            classify(CLIENT, SHOP, "RE: Geekadomicile : devis", &body),
            TimelineKind::QuoteReply
        );
    }

    #[test]
    fn remaining_mail_by_sender() {
        assert_eq!(classify(SHOP, CLIENT, "Suivi de votre dossier", ""), TimelineKind::Followup);
        assert_eq!(classify(CLIENT, SHOP, "Demande de rappel", ""), TimelineKind::Callback);
        assert_eq!(classify(CLIENT, SHOP, "Bonjour", ""), TimelineKind::ClientEmail);
        assert_eq!(classify(SHOP, CLIENT, "Bonjour", ""), TimelineKind::Reply);
    }

    fn client() -> Client {
        Client {
            id: "duhammel".to_string(),
            name: "Daniele Duhammel".to_string(),
            phones: vec!["+33681372829".to_string()],
            emails: vec!["D.Duhammel@example.fr".to_string()],
            address: String::new(),
        }
    }

    fn matches(from: &str, subject: &str, body: &str) -> bool {
        message_matches_client(
            MessageHeaders {
                from,
                to: "contact@geekadomicile.com",
                subject,
                body,
            },
            &client(),
        )
    }

    #[test]
    fn client_matching_rules() {
        assert!(matches("d.duhammel@example.fr", "", ""));
        assert!(matches("Daniele Duhammel <other@example.fr>", "", ""));
        assert!(matches(SHOP, "Intervention chez duhammel", ""));
        assert!(matches(SHOP, "", "Rappeler le +33681372829"));
        assert!(!matches(SHOP, "Intervention chez Dupont", "rien"));
    }

    #[test]
    fn short_name_parts_are_not_matched_in_subjects() {
        let client = Client {
            name: "Lea Roy".to_string(),
            ..Client::default()
        };
        let headers = MessageHeaders {
            from: SHOP,
            to: "",
            subject: "Roy et Lea",
            body: "",
        };
        assert!(!message_matches_client(headers, &client));
    }

    #[test]
    fn amounts_in_subjects() {
        assert_eq!(extract_amount("chq 78EUR"), Some("78".to_string()));
        assert_eq!(extract_amount("chq 135€"), Some("135".to_string()));
        assert_eq!(extract_amount("devis 250,50 eur"), Some("250,50".to_string()));
        assert_eq!(extract_amount("devis imprimante"), None);
    }

    #[test]
    fn sender_names() {
        assert_eq!(sender_display_name(CLIENT), "Daniele Duhammel");
        assert_eq!(sender_display_name("\"Atelier\" <a@b.fr>"), "Atelier");
        assert_eq!(sender_display_name("plain@example.fr"), "plain@example.fr");
    }

    #[test]
    fn direction_follows_sender() {
        let config = ShopConfig::default();
        assert_eq!(mail_direction(SHOP, &config), Direction::Out);
        assert_eq!(mail_direction("incall@operator.fr", &config), Direction::Out);
        assert_eq!(mail_direction(CLIENT, &config), Direction::In);
    }
}
