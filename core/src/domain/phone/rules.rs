//! Per-country phone validation rules
//!
//! The table is static and read-only. Patterns are anchored and are only
//! ever tested against digit-only strings; separators must be stripped
//! before matching.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Validation rule for one country's national-significant numbers
#[derive(Debug, Clone)]
pub struct CountryRule {
    /// Human-readable country name
    pub name: &'static str,
    /// International dial code, with leading `+`
    pub dial_code: &'static str,
    /// Minimum number of digits
    pub min_length: usize,
    /// Maximum number of digits
    pub max_length: usize,
    /// Anchored pattern over the digit string
    pub pattern: Regex,
    /// Display template using `X` placeholders
    pub format: &'static str,
}

fn rule(
    name: &'static str,
    dial_code: &'static str,
    min_length: usize,
    max_length: usize,
    pattern: &str,
    format: &'static str,
) -> CountryRule {
    CountryRule {
        name,
        dial_code,
        min_length,
        max_length,
        // Patterns are compile-time literals; a failure here is a programming error
        pattern: Regex::new(pattern).expect("invalid country phone pattern"),
        format,
    }
}

/// Phone validation rules keyed by ISO-3166 alpha-2 country code
pub static PHONE_RULES: Lazy<HashMap<&'static str, CountryRule>> = Lazy::new(|| {
    let mut rules = HashMap::new();
    rules.insert("US", rule("United States", "+1", 10, 10, r"^[2-9]\d{2}[2-9]\d{2}\d{4}$", "(XXX) XXX-XXXX"));
    rules.insert("CA", rule("Canada", "+1", 10, 10, r"^[2-9]\d{2}[2-9]\d{2}\d{4}$", "(XXX) XXX-XXXX"));
    rules.insert("IN", rule("India", "+91", 10, 10, r"^[6-9]\d{9}$", "XXXXX XXXXX"));
    rules.insert("GB", rule("United Kingdom", "+44", 10, 11, r"^[1-9]\d{8,9}$", "XXXX XXX XXXX"));
    rules.insert("AU", rule("Australia", "+61", 9, 9, r"^[2-9]\d{8}$", "XXX XXX XXX"));
    rules.insert("DE", rule("Germany", "+49", 10, 12, r"^[1-9]\d{9,11}$", "XXX XXXXXXX"));
    rules.insert("FR", rule("France", "+33", 10, 10, r"^[1-9]\d{8}$", "XX XX XX XX XX"));
    rules.insert("JP", rule("Japan", "+81", 10, 11, r"^[1-9]\d{9,10}$", "XXX-XXXX-XXXX"));
    rules.insert("CN", rule("China", "+86", 11, 11, r"^1[3-9]\d{9}$", "XXX XXXX XXXX"));
    rules.insert("BR", rule("Brazil", "+55", 10, 11, r"^[1-9]\d{9,10}$", "(XX) XXXXX-XXXX"));
    rules.insert("MX", rule("Mexico", "+52", 10, 10, r"^[1-9]\d{9}$", "XXX XXX XXXX"));
    rules.insert("KR", rule("South Korea", "+82", 9, 10, r"^[1-9]\d{8,9}$", "XXX-XXXX-XXXX"));
    rules.insert("IT", rule("Italy", "+39", 9, 10, r"^[0-9]\d{8,9}$", "XXX XXX XXXX"));
    rules.insert("ES", rule("Spain", "+34", 9, 9, r"^[6-9]\d{8}$", "XXX XX XX XX"));
    rules.insert("NL", rule("Netherlands", "+31", 9, 9, r"^[1-9]\d{8}$", "XXX XXX XXX"));
    rules.insert("SE", rule("Sweden", "+46", 9, 9, r"^[1-9]\d{8}$", "XXX XXX XXX"));
    rules.insert("NO", rule("Norway", "+47", 8, 8, r"^[2-9]\d{7}$", "XXXX XXXX"));
    rules.insert("DK", rule("Denmark", "+45", 8, 8, r"^[2-9]\d{7}$", "XX XX XX XX"));
    rules.insert("FI", rule("Finland", "+358", 9, 10, r"^[1-9]\d{8,9}$", "XXX XXX XXXX"));
    rules.insert("CH", rule("Switzerland", "+41", 9, 9, r"^[1-9]\d{8}$", "XXX XXX XXX"));
    rules.insert("AT", rule("Austria", "+43", 10, 11, r"^[1-9]\d{9,10}$", "XXXX XXXXXXX"));
    rules.insert("BE", rule("Belgium", "+32", 9, 9, r"^[1-9]\d{8}$", "XXX XX XX XX"));
    rules.insert("IE", rule("Ireland", "+353", 9, 9, r"^[1-9]\d{8}$", "XXX XXX XXXX"));
    rules.insert("NZ", rule("New Zealand", "+64", 9, 10, r"^[2-9]\d{8,9}$", "XXX XXX XXXX"));
    rules.insert("SG", rule("Singapore", "+65", 8, 8, r"^[6-9]\d{7}$", "XXXX XXXX"));
    rules.insert("MY", rule("Malaysia", "+60", 9, 10, r"^[1-9]\d{8,9}$", "XXX-XXX XXXX"));
    rules.insert("TH", rule("Thailand", "+66", 9, 9, r"^[6-9]\d{8}$", "XX XXX XXXX"));
    rules.insert("PH", rule("Philippines", "+63", 10, 10, r"^9\d{9}$", "XXXX XXX XXXX"));
    rules.insert("VN", rule("Vietnam", "+84", 9, 10, r"^[1-9]\d{8,9}$", "XXX XXX XXXX"));
    rules.insert("ID", rule("Indonesia", "+62", 10, 12, r"^8\d{9,11}$", "XXXX-XXXX-XXXX"));
    rules.insert("TR", rule("Turkey", "+90", 10, 10, r"^5\d{9}$", "XXX XXX XX XX"));
    rules.insert("PL", rule("Poland", "+48", 9, 9, r"^[4-9]\d{8}$", "XXX XXX XXX"));
    rules.insert("CZ", rule("Czech Republic", "+420", 9, 9, r"^[2-9]\d{8}$", "XXX XXX XXX"));
    rules.insert("HU", rule("Hungary", "+36", 9, 9, r"^[2-9]\d{8}$", "XXX XXX XXX"));
    rules.insert("RO", rule("Romania", "+40", 10, 10, r"^7\d{9}$", "XXXX XXX XXX"));
    rules.insert("RU", rule("Russia", "+7", 10, 10, r"^9\d{9}$", "XXX XXX-XX-XX"));
    rules.insert("ZA", rule("South Africa", "+27", 9, 9, r"^[6-8]\d{8}$", "XXX XXX XXXX"));
    rules.insert("NG", rule("Nigeria", "+234", 10, 10, r"^[7-9]\d{9}$", "XXX XXX XXXX"));
    rules.insert("KE", rule("Kenya", "+254", 9, 9, r"^[7]\d{8}$", "XXX XXX XXX"));
    rules.insert("EG", rule("Egypt", "+20", 10, 10, r"^1\d{9}$", "XXX XXX XXXX"));
    rules.insert("AR", rule("Argentina", "+54", 10, 10, r"^9\d{9}$", "XXXX-XXX-XXXX"));
    rules.insert("CL", rule("Chile", "+56", 9, 9, r"^9\d{8}$", "XXXX XXXX"));
    rules.insert("CO", rule("Colombia", "+57", 10, 10, r"^3\d{9}$", "XXX XXX XXXX"));
    rules.insert("PE", rule("Peru", "+51", 9, 9, r"^9\d{8}$", "XXX XXX XXX"));
    rules
});

/// Look up the rule for a country code
pub fn rule_for(country_code: &str) -> Option<&'static CountryRule> {
    PHONE_RULES.get(country_code)
}
