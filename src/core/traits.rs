//! Core traits for description parsing
//!
//! Both the type decomposer and the payee extractor are built from pattern
//! matchers that either yield a tagged capture or nothing. Alternatives are
//! kept as an ordered list and evaluated with [`first_capture`]: the first
//! matcher in the list that matches wins, regardless of where in the text the
//! other matchers would have matched.

/// A pattern that may capture a value from a free-text field
pub trait Matcher {
    /// Value produced on a successful match
    type Capture;

    /// Search `text` anywhere and return the capture of the first match
    fn captures(&self, text: &str) -> Option<Self::Capture>;
}

/// Evaluate matchers in order and return the capture of the first one that matches
///
/// Later matchers are not evaluated once a capture is found.
pub fn first_capture<'m, M, I>(matchers: I, text: &str) -> Option<M::Capture>
where
    M: Matcher + 'm,
    I: IntoIterator<Item = &'m M>,
{
    matchers
        .into_iter()
        .find_map(|matcher| matcher.captures(text))
}
