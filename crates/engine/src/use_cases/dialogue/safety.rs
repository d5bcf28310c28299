//! Block-list safety check.

/// Case-insensitive substring match against a fixed block-list.
///
/// One instance is shared (by `Arc`) between the gateway, classifier and
/// router so the three checks can never disagree.
#[derive(Debug, Clone)]
pub struct SafetyFilter {
    /// Lowercased, non-empty terms.
    terms: Vec<String>,
    abort_text: String,
}

impl SafetyFilter {
    pub fn new<I, S>(terms: I, abort_text: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self {
            terms,
            abort_text: abort_text.into(),
        }
    }

    pub fn should_abort(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.terms.iter().any(|term| lowered.contains(term.as_str()))
    }

    pub fn abort_text(&self) -> &str {
        &self.abort_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> SafetyFilter {
        SafetyFilter::new(["kill myself", " Suicide "], "stop")
    }

    #[test]
    fn matches_in_any_case() {
        let f = filter();
        assert!(f.should_abort("I want to kill myself"));
        assert!(f.should_abort("I WANT TO KILL MYSELF"));
        assert!(f.should_abort("thinking about SUICIDE lately"));
    }

    #[test]
    fn clean_text_passes() {
        let f = filter();
        assert!(!f.should_abort("Where is the courier?"));
        assert!(!f.should_abort(""));
    }

    #[test]
    fn blank_terms_are_ignored() {
        let f = SafetyFilter::new(["", "   "], "stop");
        assert!(!f.should_abort("anything at all"));
        assert_eq!(f.abort_text(), "stop");
    }
}
