/// What counts as a valid number of seconds for a given field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationRule {
    /// Zero is meaningful (no extra time added).
    AllowZero,
    /// The merged output must end up with a positive length.
    Positive,
}

impl DurationRule {
    fn minimum(self) -> i64 {
        match self {
            DurationRule::AllowZero => 0,
            DurationRule::Positive => 1,
        }
    }
}

/// Result of parsing one duration text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationEntry {
    /// Field was left empty; the setting stays unset.
    Unset,
    /// A whole number of seconds allowed by the rule.
    Value(u32),
    /// Unusable text; the previous buffer should be kept.
    Rejected,
}

/// Parse a duration field. Whole seconds only; fractions, negatives and
/// anything beyond `u32` are rejected.
pub fn parse_duration_entry(text: &str, rule: DurationRule) -> DurationEntry {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return DurationEntry::Unset;
    }
    let Ok(value) = trimmed.parse::<i64>() else {
        return DurationEntry::Rejected;
    };
    if value < rule.minimum() {
        return DurationEntry::Rejected;
    }
    match u32::try_from(value) {
        Ok(secs) => DurationEntry::Value(secs),
        Err(_) => DurationEntry::Rejected,
    }
}
