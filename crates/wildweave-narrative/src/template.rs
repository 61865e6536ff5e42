//! Phrase templates with named placeholders.
//!
//! A template is a static string with `{name}` slots. Rendering substitutes
//! every slot that has a binding and leaves unbound slots verbatim, so a
//! template authored for more slots than a caller knows about still renders
//! something readable.

/// A phrase template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Template(&'static str);

impl Template {
    /// Wrap a static template string.
    pub const fn new(text: &'static str) -> Self {
        Self(text)
    }

    /// The raw template text.
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    /// Names of the placeholders in order of appearance.
    pub fn placeholders(self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.0;
        while let Some(open) = rest.find('{') {
            let after = rest.get(open.saturating_add(1)..).unwrap_or_default();
            let Some(close) = after.find('}') else {
                break;
            };
            if let Some(name) = after.get(..close)
                && is_placeholder_name(name)
            {
                names.push(name);
            }
            rest = after.get(close.saturating_add(1)..).unwrap_or_default();
        }
        names
    }

    /// Whether the raw text contains any of `words`, ignoring case.
    pub fn mentions_any(self, words: &[&str]) -> bool {
        let lower = self.0.to_ascii_lowercase();
        words.iter().any(|word| lower.contains(word))
    }

    /// Substitute bound placeholders.
    pub fn render(self, bindings: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.0.len().saturating_add(16));
        let mut rest = self.0;
        while let Some(open) = rest.find('{') {
            out.push_str(rest.get(..open).unwrap_or_default());
            let after = rest.get(open.saturating_add(1)..).unwrap_or_default();
            let bound = after.find('}').and_then(|close| {
                let name = after.get(..close)?;
                let value = bindings
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)?;
                Some((close, value))
            });
            match bound {
                Some((close, value)) => {
                    out.push_str(value);
                    rest = after.get(close.saturating_add(1)..).unwrap_or_default();
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_named_slots() {
        let template = Template::new("Ancient {tree} trees tower over {tree} saplings");
        assert_eq!(
            template.render(&[("tree", "oak")]),
            "Ancient oak trees tower over oak saplings"
        );
        assert_eq!(template.placeholders(), vec!["tree", "tree"]);
    }

    #[test]
    fn unbound_slots_are_left_alone() {
        let template = Template::new("A {color} {tree} sways");
        assert_eq!(template.render(&[("tree", "willow")]), "A {color} willow sways");
    }

    #[test]
    fn plain_text_is_unchanged() {
        let template = Template::new("Open grasslands stretch away");
        assert!(template.placeholders().is_empty());
        assert_eq!(template.render(&[]), "Open grasslands stretch away");
    }

    #[test]
    fn mention_check_ignores_case() {
        let template = Template::new("Golden light spills over the ridge");
        assert!(template.mentions_any(&["golden"]));
        assert!(!template.mentions_any(&["sunlight", "bright"]));
    }
}
