use super::Element;

/// Compound selector of the form `tag`, `.class`, or `tag.class.other`.
///
/// Only what the widgets need: no combinators, no attribute selectors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    pub fn parse(input: &str) -> Self {
        let mut parts = input.trim().split('.');
        let tag = parts
            .next()
            .filter(|tag| !tag.is_empty())
            .map(|tag| tag.to_ascii_lowercase());
        let classes = parts.filter(|class| !class.is_empty()).map(str::to_string).collect();

        Self { tag, classes }
    }

    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if element.tag() != tag {
                return false;
            }
        }
        self.classes.iter().all(|class| element.has_class(class))
    }

    /// An empty selector matches nothing rather than everything.
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.classes.is_empty()
    }
}
