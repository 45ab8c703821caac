/// Why a strategy was passed over without a network attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Source name lacks the strategy's marker.
    Ineligible,
    /// Another strategy already produced the same URL in this call.
    UrlAlreadyTried,
}

/// Result of one strategy attempt, or of resolving a whole package.
///
/// `resolve` only ever returns the terminal variants: `AlreadyLocal`,
/// `Retrieved` and `Exhausted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    AlreadyLocal { strategy: &'static str, base: String },
    Retrieved { strategy: &'static str, base: String },
    NotFound { strategy: &'static str, url: String },
    Skipped { strategy: &'static str, reason: SkipReason },
    Exhausted,
}

impl AttemptOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AttemptOutcome::AlreadyLocal { .. }
                | AttemptOutcome::Retrieved { .. }
                | AttemptOutcome::Exhausted
        )
    }

    /// Base name for a resolved package.
    pub fn base(&self) -> Option<&str> {
        match self {
            AttemptOutcome::AlreadyLocal { base, .. } | AttemptOutcome::Retrieved { base, .. } => {
                Some(base)
            }
            _ => None,
        }
    }
}
