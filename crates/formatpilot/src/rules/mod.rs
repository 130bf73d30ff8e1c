//! Rule chain for HTML to LinkedIn text conversion.

mod linkedin;
mod rule;

pub use linkedin::{length_warning, linkedin_rules, BULLET, QUOTE_PREFIX};
pub use rule::Rule;

use indexmap::IndexMap;

use crate::service::Options;

/// Ordered collection of named rules.
///
/// Rules run in insertion order. The order is part of the behaviour: the
/// list rule expects block tags to be gone, the table rule expects lists to
/// be flattened, and the length guard must see the final text.
pub struct Rules {
    chain: IndexMap<&'static str, Rule>,
}

impl Rules {
    /// Create the LinkedIn rewrite chain
    pub fn new() -> Self {
        Self {
            chain: linkedin_rules().into_iter().collect(),
        }
    }

    /// Look up a rule by name
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.chain.get(name)
    }

    /// Rule names in the order they are applied
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.chain.keys().copied()
    }

    /// Run every rule over `html`
    pub fn apply(&self, html: &str, options: &Options) -> String {
        let mut text = html.to_string();
        for (name, rule) in &self.chain {
            text = rule.apply(&text, options);
            tracing::trace!(rule = *name, chars = text.len(), "applied rule");
        }
        text
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
