//! `{placeholder}` substitution for conversation lines.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

/// Caller-supplied values for non-role placeholders, e.g. `player`
pub type ConversationContext = BTreeMap<String, String>;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("valid regex"));

/// Resolves placeholders against role names first, then the context.
/// Anything left over becomes the filler word.
pub struct TemplateVars<'a> {
    roles: BTreeMap<String, String>,
    context: &'a ConversationContext,
    filler: &'a str,
}

impl<'a> TemplateVars<'a> {
    pub fn new(context: &'a ConversationContext, filler: &'a str) -> Self {
        Self {
            roles: BTreeMap::new(),
            context,
            filler,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.roles.insert(role.into(), display_name.into());
        self
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.roles
            .get(name)
            .or_else(|| self.context.get(name))
            .map(String::as_str)
    }

    pub fn render(&self, template: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(template, |caps: &Captures<'_>| {
                let name = caps.get(1).map_or("", |m| m.as_str());
                match self.lookup(name) {
                    Some(value) => value.to_string(),
                    None => {
                        tracing::trace!(placeholder = name, "Unresolved placeholder, using filler");
                        self.filler.to_string()
                    }
                }
            })
            .into_owned()
    }
}
