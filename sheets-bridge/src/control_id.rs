use std::fmt;

pub const SEPARATOR: char = '_';

pub const APPROVE: &str = "approve";
pub const REJECT: &str = "reject";
pub const CONFIRM: &str = "confirm";
pub const SURVEY: &str = "survey";

/// The `custom_id` carried by every rendered button: `{action}_{subject_id}[_{option_index}]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlId {
    pub action: String,
    pub subject_id: String,
    pub option_index: Option<String>,
}

impl ControlId {
    pub fn new(action: impl Into<String>, subject_id: impl Into<String>) -> ControlId {
        ControlId {
            action: action.into(),
            subject_id: subject_id.into(),
            option_index: None,
        }
    }

    pub fn with_index(mut self, index: usize) -> ControlId {
        self.option_index = Some(index.to_string());
        self
    }

    /// Never fails: missing parts decode as empty, and anything after a third separator is ignored.
    pub fn decode(raw: &str) -> ControlId {
        let mut parts = raw.split(SEPARATOR);

        ControlId {
            action: parts.next().unwrap_or_default().to_owned(),
            subject_id: parts.next().unwrap_or_default().to_owned(),
            option_index: parts.next().map(str::to_owned),
        }
    }

    pub fn option_index(&self) -> Option<u32> {
        self.option_index.as_deref().and_then(|index| index.parse().ok())
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.action, SEPARATOR, self.subject_id)?;

        if let Some(index) = &self.option_index {
            write!(f, "{}{}", SEPARATOR, index)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for (action, id) in [(APPROVE, "42"), (REJECT, "row-17"), (CONFIRM, "a.b"), ("custom", "x")] {
            let encoded = ControlId::new(action, id).to_string();
            assert_eq!(ControlId::decode(&encoded), ControlId::new(action, id));
        }

        let survey = ControlId::new(SURVEY, "9").with_index(3);
        assert_eq!(survey.to_string(), "survey_9_3");

        let decoded = ControlId::decode("survey_9_3");
        assert_eq!(decoded, survey);
        assert_eq!(decoded.option_index(), Some(3));
    }

    #[test]
    fn test_decode_malformed() {
        let decoded = ControlId::decode("orphan");
        assert_eq!(decoded.action, "orphan");
        assert_eq!(decoded.subject_id, "");
        assert!(decoded.option_index.is_none());

        let decoded = ControlId::decode("survey_1_x_extra");
        assert_eq!(decoded.subject_id, "1");
        assert_eq!(decoded.option_index.as_deref(), Some("x"));
        assert_eq!(decoded.option_index(), None);
    }
}
