//! Context modifiers (§4.3 stage 6): positive signals that reduce a
//! score, negative signals that amplify it.

use crate::human_trafficking::LICENSED_SERVICE_TERMS;
use regex::Regex;
use std::sync::OnceLock;

static CITES_CERT: OnceLock<Regex> = OnceLock::new();

fn cites_certificate_present(text: &str) -> bool {
    let re = CITES_CERT.get_or_init(|| {
        Regex::new(r"(?i)cites\s*(certificate|permit)\s*#?\s*[a-z0-9-]+")
            .expect("cites certificate regex failed to compile")
    });
    re.is_match(text)
}

fn licensed_service_mentioned(text: &str) -> bool {
    let lower = text.to_lowercase();
    LICENSED_SERVICE_TERMS.iter().any(|t| lower.contains(t))
}

/// Negative context: absence of paperwork combined with urgency,
/// which reinforces rather than excuses a trafficking read.
static NO_PAPERWORK: OnceLock<Regex> = OnceLock::new();

fn no_paperwork_claim(text: &str) -> bool {
    let re = NO_PAPERWORK.get_or_init(|| {
        Regex::new(r"(?i)no\s+paperwork|no\s+documentation|no\s+permit\s+needed")
            .expect("no-paperwork regex failed to compile")
    });
    re.is_match(text)
}

fn cash_only_housing_combo(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("cash only") && lower.contains("housing provided")
}

/// Net context adjustment applied to the raw score (§4.3 stage 6).
/// Negative values reduce the score, positive values amplify it.
pub fn context_adjustment(text: &str) -> i32 {
    let mut adjustment = 0;
    if cites_certificate_present(text) {
        adjustment -= 20;
    }
    if licensed_service_mentioned(text) {
        adjustment -= 15;
    }
    if no_paperwork_claim(text) {
        adjustment += 10;
    }
    if cash_only_housing_combo(text) {
        adjustment += 8;
    }
    adjustment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cites_certificate_reduces_score() {
        let text = "antique carving, CITES certificate #AB12345 included";
        assert!(context_adjustment(text) < 0);
    }

    #[test]
    fn licensed_therapist_reduces_score() {
        assert!(context_adjustment("licensed massage therapist, by appointment") < 0);
    }

    #[test]
    fn no_paperwork_with_cash_only_housing_amplifies_score() {
        let text = "no paperwork needed, cash only, housing provided";
        assert!(context_adjustment(text) > 0);
    }

    #[test]
    fn neutral_text_has_no_adjustment() {
        assert_eq!(context_adjustment("a regular listing with nothing notable"), 0);
    }
}
