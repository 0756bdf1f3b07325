use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING: Regex =
        Regex::new(r"(?i)^\s*(?:(?:online\s+payment\s+\d+\s+to\s+|pwp|tst)\*?\s*)+").unwrap();
    static ref TRAILING: Regex = Regex::new(
        r"(?i)(?:\s+(?:privacy\.?com\s+tn:\s+\d+|(?:ppd|web)\s+id:\s+\S+))+\s*$"
    )
    .unwrap();
}

/// Strips payment processor noise from a raw merchant name so that the same
/// merchant groups together regardless of how the card network reported it.
pub fn normalize(raw: &str) -> String {
    let without_pipes = raw.replace('|', "");
    let trimmed = LEADING.replace(&without_pipes, "");
    let trimmed = TRAILING.replace(&trimmed, "");

    trimmed.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plain() {
        assert_eq!(normalize("Starbucks"), "Starbucks");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize("  Amazon  "), "Amazon");
    }

    #[test]
    fn test_normalize_removes_pipes() {
        assert_eq!(normalize("Home|Depot"), "HomeDepot");
        assert_eq!(normalize("|||"), "");
    }

    #[test]
    fn test_normalize_tst_prefix() {
        assert_eq!(normalize("TST* Blue Bottle"), "Blue Bottle");
        assert_eq!(normalize("tst*Blue Bottle"), "Blue Bottle");
    }

    #[test]
    fn test_normalize_pwp_prefix() {
        assert_eq!(normalize("PWP* Parking Garage"), "Parking Garage");
    }

    #[test]
    fn test_normalize_online_payment_prefix() {
        assert_eq!(
            normalize("Online Payment 12345 To Electric Company"),
            "Electric Company"
        );
    }

    #[test]
    fn test_normalize_privacy_suffix() {
        assert_eq!(normalize("Netflix privacy.com TN: 998877"), "Netflix");
        assert_eq!(normalize("Netflix PRIVACYCOM TN: 998877"), "Netflix");
    }

    #[test]
    fn test_normalize_ppd_and_web_suffix() {
        assert_eq!(normalize("City Water PPD ID: 1234XYZ"), "City Water");
        assert_eq!(normalize("Gym web id: abc-9"), "Gym");
    }

    #[test]
    fn test_normalize_suffix_only_at_end() {
        assert_eq!(normalize("WEB ID: thing Store"), "WEB ID: thing Store");
    }

    #[test]
    fn test_normalize_prefix_only_at_start() {
        assert_eq!(normalize("Coffee TST* Shop"), "Coffee TST* Shop");
    }

    #[test]
    fn test_normalize_both_ends() {
        assert_eq!(normalize(" TST* Corner Deli web id: 42 "), "Corner Deli");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "   ",
            "Starbucks",
            "TST* TST* Cafe",
            "tst* pwp* online payment 1 to Nested",
            "Store WEB ID: a PPD ID: b",
            "T|ST* Split Marker",
            "online payment 5 to",
            "x privacy.com tn: 1 privacy.com tn: 2",
            "PWP",
            "a  web id: b  ",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
