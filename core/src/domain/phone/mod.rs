//! Phone number validation and formatting
//!
//! Pure functions over the static per-country rule table. Validation and
//! formatting are separate concerns: formatting never rejects input, and
//! partially-typed numbers are handled without error so a caller can run
//! these on every keystroke.

mod rules;

pub use rules::{rule_for, CountryRule, PHONE_RULES};

/// Outcome of validating a phone number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneValidation {
    pub is_valid: bool,
    pub error: Option<String>,
    pub formatted_number: Option<String>,
    pub suggestion: Option<String>,
}

impl PhoneValidation {
    fn valid(formatted_number: String) -> Self {
        Self {
            is_valid: true,
            error: None,
            formatted_number: Some(formatted_number),
            suggestion: None,
        }
    }

    fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
            formatted_number: None,
            suggestion: None,
        }
    }

    fn invalid_with_suggestion(error: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            suggestion: Some(suggestion.into()),
            ..Self::invalid(error)
        }
    }
}

/// Validation info derived from a country's rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryInfo {
    /// Display template using `X` placeholders
    pub format: String,
    /// The template with every placeholder filled with `0`
    pub example: String,
    /// `"10 digits"` or `"9-10 digits"`
    pub length: String,
}

/// Strip everything but ASCII digits
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validate a phone number against the selected country's rules.
///
/// Unsupported country codes fall back to a bare length check (7-15 digits,
/// no pattern) and return the cleaned digits unformatted. The asymmetry with
/// the per-country rules is intentional and load-bearing.
pub fn validate_phone_number(phone_number: &str, country_code: &str) -> PhoneValidation {
    let cleaned = strip_non_digits(phone_number);

    if cleaned.is_empty() {
        return PhoneValidation::invalid("Phone number is required");
    }

    let rules = match rule_for(country_code) {
        Some(rules) => rules,
        None => {
            // Fallback validation for unsupported countries
            if cleaned.len() < 7 || cleaned.len() > 15 {
                return PhoneValidation::invalid("Phone number must be between 7-15 digits");
            }
            return PhoneValidation::valid(cleaned);
        }
    };

    if cleaned.len() < rules.min_length {
        return PhoneValidation::invalid_with_suggestion(
            format!(
                "Phone number is too short. Expected {} digits for {}",
                rules.min_length, rules.name
            ),
            format!("Format: {}", rules.format),
        );
    }

    if cleaned.len() > rules.max_length {
        return PhoneValidation::invalid_with_suggestion(
            format!(
                "Phone number is too long. Expected {} digits for {}",
                rules.max_length, rules.name
            ),
            format!("Format: {}", rules.format),
        );
    }

    if !rules.pattern.is_match(&cleaned) {
        return PhoneValidation::invalid_with_suggestion(
            format!("Invalid phone number format for {}", rules.name),
            format!("Expected format: {}", rules.format),
        );
    }

    PhoneValidation::valid(format_phone_number(&cleaned, country_code))
}

/// Format a phone number for display using the country's grouping.
///
/// This only reformats; it never rejects. Digit counts with no known
/// grouping for the country fall through to a generic split, and unknown
/// countries or empty input return the cleaned digits unchanged.
pub fn format_phone_number(phone_number: &str, country_code: &str) -> String {
    let cleaned = strip_non_digits(phone_number);

    if cleaned.is_empty() || rule_for(country_code).is_none() {
        return cleaned;
    }

    let d = cleaned.as_str();
    match country_code {
        "US" | "CA" => {
            if d.len() == 10 {
                return format!("({}) {}-{}", &d[..3], &d[3..6], &d[6..]);
            }
        }
        "IN" => {
            if d.len() == 10 {
                return format!("{} {}", &d[..5], &d[5..]);
            }
        }
        "GB" => {
            if d.len() == 10 || d.len() == 11 {
                return format!("{} {} {}", &d[..4], &d[4..7], &d[7..]);
            }
        }
        "AU" => {
            if d.len() == 9 {
                return format!("{} {} {}", &d[..3], &d[3..6], &d[6..]);
            }
        }
        "DE" => {
            if d.len() >= 10 {
                return format!("{} {}", &d[..3], &d[3..]);
            }
        }
        "FR" => {
            if d.len() == 10 {
                return format!(
                    "{} {} {} {} {}",
                    &d[..2],
                    &d[2..4],
                    &d[4..6],
                    &d[6..8],
                    &d[8..]
                );
            }
        }
        "BR" => {
            if d.len() == 11 {
                return format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]);
            } else if d.len() == 10 {
                return format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]);
            }
        }
        "MX" => {
            if d.len() == 10 {
                return format!("{} {} {}", &d[..3], &d[3..6], &d[6..]);
            }
        }
        "JP" => {
            if d.len() == 11 {
                return format!("{}-{}-{}", &d[..3], &d[3..7], &d[7..]);
            } else if d.len() == 10 {
                return format!("{}-{}-{}", &d[..3], &d[3..6], &d[6..]);
            }
        }
        "CN" => {
            if d.len() == 11 {
                return format!("{} {} {}", &d[..3], &d[3..7], &d[7..]);
            }
        }
        "SG" | "NO" | "DK" => {
            if d.len() == 8 {
                return format!("{} {}", &d[..4], &d[4..]);
            }
        }
        _ => return generic_grouping(d),
    }

    cleaned
}

// Default grouping: two groups of 3-4 for short numbers, 3/3/rest for longer
fn generic_grouping(digits: &str) -> String {
    match digits.len() {
        6 => format!("{} {}", &digits[..3], &digits[3..]),
        7 | 8 => format!("{} {}", &digits[..4], &digits[4..]),
        n if n > 8 => format!("{} {} {}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => digits.to_string(),
    }
}

/// Input placeholder for a country's phone field
pub fn phone_number_placeholder(country_code: &str) -> String {
    match rule_for(country_code) {
        Some(rules) => format!("({})", rules.format),
        None => "Enter phone number".to_string(),
    }
}

/// Validation info for a country, or `None` when unsupported
pub fn country_validation_info(country_code: &str) -> Option<CountryInfo> {
    let rules = rule_for(country_code)?;

    let length = if rules.min_length == rules.max_length {
        format!("{} digits", rules.min_length)
    } else {
        format!("{}-{} digits", rules.min_length, rules.max_length)
    };

    Some(CountryInfo {
        format: rules.format.to_string(),
        example: rules.format.replace('X', "0"),
        length,
    })
}

/// Whether a country code has validation rules
pub fn is_country_supported(country_code: &str) -> bool {
    PHONE_RULES.contains_key(country_code)
}

/// All supported country codes, sorted
pub fn supported_countries() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = PHONE_RULES.keys().copied().collect();
    codes.sort_unstable();
    codes
}

/// Whether the digits are acceptable to the SMS gateway (10-15 digits)
pub fn is_sms_capable(phone_number: &str) -> bool {
    let cleaned = strip_non_digits(phone_number);
    (10..=15).contains(&cleaned.len())
}
