//! Field-name driven tables: which input control a field gets, which
//! validation rule applies to it, and how a prop is typed.
//!
//! Everything here keys off the field *name* alone. The legacy markup's own
//! control kind is not carried into the intent, so a field named `notes`
//! becomes a text area whatever tag it came from.

use crate::template::{is_identifier, ts_string};

/// Fields rendered as a dropdown, compared case-insensitively.
const SELECT_FIELDS: [&str; 5] = [
    "state",
    "licensestate",
    "preferredmake",
    "trucktype",
    "trailertype",
];

/// Fields rendered as a checkbox, compared case-insensitively.
const CHECKBOX_FIELDS: [&str; 3] = ["hascdl", "agreetoterms", "consenttocheck"];

/// Options offered for state-like dropdowns.
pub const STATE_OPTIONS: [&str; 4] = ["CA", "TX", "FL", "NY"];

/// Accepts digits, spaces and `-()+.` separators.
pub const PHONE_PATTERN: &str = r"^[\d\s\-()+.]+$";
/// Nine digits with optional `-` separators after the third and fifth.
pub const SSN_PATTERN: &str = r"^\d{3}-?\d{2}-?\d{4}$";

// ── Input controls ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldControl {
    Email,
    Tel,
    Date,
    /// Plain text with an input mask hint.
    Masked,
    Password,
    Select,
    Checkbox,
    TextArea,
    Text,
}

impl FieldControl {
    /// Infer the control for a field name. First match wins.
    pub fn for_field(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.contains("email") {
            FieldControl::Email
        } else if lower.contains("phone") {
            FieldControl::Tel
        } else if lower.contains("date") || lower.contains("birth") {
            FieldControl::Date
        } else if lower.contains("ssn") {
            FieldControl::Masked
        } else if lower.contains("password") {
            FieldControl::Password
        } else if SELECT_FIELDS.contains(&lower.as_str()) {
            FieldControl::Select
        } else if CHECKBOX_FIELDS.contains(&lower.as_str()) {
            FieldControl::Checkbox
        } else if lower.contains("requirements") || lower.contains("notes") {
            FieldControl::TextArea
        } else {
            FieldControl::Text
        }
    }

    /// `type` attribute for controls rendered as `<input>`.
    pub fn input_type(&self) -> Option<&'static str> {
        match self {
            FieldControl::Email => Some("email"),
            FieldControl::Tel => Some("tel"),
            FieldControl::Date => Some("date"),
            FieldControl::Masked | FieldControl::Text => Some("text"),
            FieldControl::Password => Some("password"),
            FieldControl::Checkbox => Some("checkbox"),
            FieldControl::Select | FieldControl::TextArea => None,
        }
    }
}

// ── Validation rules ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Email,
    Phone,
    Ssn,
    /// Checkbox fields hold a boolean and are only type-checked.
    Boolean,
    Required,
}

impl FieldRule {
    pub fn for_field(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.contains("email") {
            FieldRule::Email
        } else if lower.contains("phone") {
            FieldRule::Phone
        } else if lower.contains("ssn") {
            FieldRule::Ssn
        } else if FieldControl::for_field(name) == FieldControl::Checkbox {
            FieldRule::Boolean
        } else {
            FieldRule::Required
        }
    }

    /// The `yup` schema expression for `field`.
    pub fn yup_schema(&self, field: &str) -> String {
        let label = humanize(field);
        match self {
            FieldRule::Email => format!(
                "yup.string().email('Invalid email').required('{} is required')",
                label
            ),
            FieldRule::Phone => format!(
                "yup.string().matches(/{}/, 'Invalid phone number').required('{} is required')",
                PHONE_PATTERN, label
            ),
            FieldRule::Ssn => format!(
                "yup.string().matches(/{}/, 'Invalid SSN format').required('{} is required')",
                SSN_PATTERN, label
            ),
            FieldRule::Boolean => "yup.boolean()".to_string(),
            FieldRule::Required => format!("yup.string().required('{} is required')", label),
        }
    }

    /// The `express-validator` chain for `field`.
    pub fn body_chain(&self, field: &str) -> String {
        let label = humanize(field);
        let field = ts_string(field);
        match self {
            FieldRule::Email => format!(
                "body({}).isEmail().withMessage('Valid {} is required')",
                field, label
            ),
            FieldRule::Phone => format!(
                "body({}).matches(/{}/).withMessage('Valid {} is required')",
                field, PHONE_PATTERN, label
            ),
            FieldRule::Ssn => format!(
                "body({}).matches(/{}/).withMessage('Valid {} is required')",
                field, SSN_PATTERN, label
            ),
            FieldRule::Boolean => format!(
                "body({}).optional().isBoolean().withMessage('{} must be true or false')",
                field, label
            ),
            FieldRule::Required => format!(
                "body({}).notEmpty().withMessage('{} is required')",
                field, label
            ),
        }
    }
}

// ── Props ───────────────────────────────────────────────────────────

/// TypeScript member declaration for a component prop.
pub fn prop_type(prop: &str) -> String {
    match prop {
        "loading" => "loading?: boolean;".to_string(),
        "user" => "user?: { id: string; name?: string };".to_string(),
        "onSubmit" => "onSubmit?: (data: Record<string, unknown>) => void;".to_string(),
        "errors" => "errors?: Record<string, string>;".to_string(),
        other => format!("{}?: unknown;", ts_key(other)),
    }
}

/// Object key for `name`: bare when it is an identifier, quoted otherwise.
pub fn ts_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        ts_string(name)
    }
}

/// Member access on `object`: `object.name` or `object['na.me']`.
pub fn ts_member(object: &str, name: &str) -> String {
    if is_identifier(name) {
        format!("{}.{}", object, name)
    } else {
        format!("{}[{}]", object, ts_string(name))
    }
}

/// Human label for a field name: `dateOfBirth` → `Date Of Birth`,
/// `license_state` → `License State`, `hasCDL` → `Has CDL`.
pub fn humanize(field: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = field.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let boundary = c.is_ascii_uppercase()
            && match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                _ => false,
            };
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_table() {
        let cases = [
            ("email", FieldControl::Email),
            ("contactEmail", FieldControl::Email),
            ("phone", FieldControl::Tel),
            ("dateOfBirth", FieldControl::Date),
            ("birthPlace", FieldControl::Date),
            ("ssn", FieldControl::Masked),
            ("newPassword", FieldControl::Password),
            ("state", FieldControl::Select),
            ("licenseState", FieldControl::Select),
            ("hasCDL", FieldControl::Checkbox),
            ("specialRequirements", FieldControl::TextArea),
            ("notes", FieldControl::TextArea),
            ("firstName", FieldControl::Text),
            ("stateOfMind", FieldControl::Text),
        ];
        for (field, expected) in cases {
            assert_eq!(FieldControl::for_field(field), expected, "{}", field);
        }
    }

    #[test]
    fn test_rules() {
        assert_eq!(FieldRule::for_field("email"), FieldRule::Email);
        assert_eq!(FieldRule::for_field("phone"), FieldRule::Phone);
        assert_eq!(FieldRule::for_field("ssn"), FieldRule::Ssn);
        assert_eq!(FieldRule::for_field("hasCDL"), FieldRule::Boolean);
        assert_eq!(FieldRule::for_field("city"), FieldRule::Required);
    }

    #[test]
    fn test_yup_and_body_chains() {
        assert_eq!(
            FieldRule::Required.yup_schema("zipCode"),
            "yup.string().required('Zip Code is required')"
        );
        assert_eq!(
            FieldRule::Ssn.yup_schema("ssn"),
            r"yup.string().matches(/^\d{3}-?\d{2}-?\d{4}$/, 'Invalid SSN format').required('Ssn is required')"
        );
        assert_eq!(
            FieldRule::Email.body_chain("email"),
            "body('email').isEmail().withMessage('Valid Email is required')"
        );
    }

    #[test]
    fn test_prop_types() {
        assert_eq!(prop_type("loading"), "loading?: boolean;");
        assert_eq!(prop_type("errors"), "errors?: Record<string, string>;");
        assert_eq!(prop_type("theme"), "theme?: unknown;");
        assert_eq!(prop_type("data-id"), "'data-id'?: unknown;");
        assert_eq!(ts_member("errors", "email"), "errors.email");
        assert_eq!(ts_member("errors", "address.city"), "errors['address.city']");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("firstName"), "First Name");
        assert_eq!(humanize("dateOfBirth"), "Date Of Birth");
        assert_eq!(humanize("license_state"), "License State");
        assert_eq!(humanize("hasCDL"), "Has CDL");
        assert_eq!(humanize("CDLNumber"), "CDL Number");
        assert_eq!(humanize("zip2"), "Zip2");
    }
}
