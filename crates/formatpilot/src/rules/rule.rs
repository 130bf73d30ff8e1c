//! Rule type for the rewrite chain.

use crate::service::Options;

/// Type alias for replacement functions
pub type ReplacementFn = Box<dyn Fn(&str, &Options) -> String + Send + Sync>;

/// A rule rewrites the whole document in one pass.
///
/// Rules are pure: the same text and options always produce the same
/// output, and no state is kept between calls.
pub struct Rule {
    /// Replacement function producing the rewritten text
    pub replacement: ReplacementFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(replacement: F) -> Self
    where
        F: Fn(&str, &Options) -> String + Send + Sync + 'static,
    {
        Self {
            replacement: Box::new(replacement),
        }
    }

    /// Create a rule that ignores the options
    pub fn text<F>(replacement: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::new(move |text, _| replacement(text))
    }

    /// Apply this rule's replacement
    pub fn apply(&self, text: &str, options: &Options) -> String {
        (self.replacement)(text, options)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").finish_non_exhaustive()
    }
}
