//! Fragment collection and text reconstruction.
//!
//! Teletext markup splits a sentence over many `<span>` nodes, so the raw
//! text arrives as fragments. [`FragmentCollector`] gathers the non-empty
//! ones and [`reconstruct`] stitches them back into readable prose.

/// Signature of the navigation footer some pages append as their last fragment.
///
/// This is a case-sensitive substring heuristic. A last fragment that
/// legitimately mentions "sport" is dropped too.
const TRAILER_MARKER: &str = "sport";

/// Ordered, trimmed, non-empty text fragments for one page role.
#[derive(Debug, Default)]
pub struct FragmentCollector {
    fragments: Vec<String>,
}

impl FragmentCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one text node. Whitespace-only input is ignored.
    pub fn push(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            self.fragments.push(trimmed.to_string());
        }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn into_fragments(self) -> Vec<String> {
        self.fragments
    }
}

/// Turn a fragment sequence into one normalized string.
///
/// 1. Drop the last fragment if it contains `"sport"`.
/// 2. Join the rest with single spaces.
/// 3. Add a space after `,` and `:` when followed by non-whitespace, then
///    after `.` when followed by an ASCII uppercase letter.
///
/// The three punctuation passes run in that order over the whole string.
/// Whitespace is [`char::is_whitespace`], which does not include U+FEFF,
/// so a byte order mark after `,` or `:` gets a space. Uppercase means
/// ASCII `A`-`Z` only.
pub fn reconstruct(mut fragments: Vec<String>) -> String {
    if fragments
        .last()
        .is_some_and(|last| last.contains(TRAILER_MARKER))
    {
        fragments.pop();
    }

    let joined = fragments.join(" ");
    let text = space_after(&joined, ',', |c| !c.is_whitespace());
    let text = space_after(&text, ':', |c| !c.is_whitespace());
    space_after(&text, '.', |c| c.is_ascii_uppercase())
}

/// Insert a space after every `mark` whose next char satisfies `needs_space`.
fn space_after(text: &str, mark: char, needs_space: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == mark && chars.peek().is_some_and(|&next| needs_space(next)) {
            out.push(' ');
        }
    }
    out
}
