//! Named output buffers with diversion.
//!
//! Every piece of generated markup lands in one of the [`Part`] buffers.
//! Exactly one buffer is active at a time; nodes whose markup belongs
//! elsewhere (footnotes, citations, the document title) divert the active
//! buffer for the duration of their subtree and restore it when they leave.

use std::fmt::{self, Write};

/// Output buffer name, in assembly order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    HeadPrefix,
    Head,
    Stylesheet,
    BodyPrefix,
    Docinfo,
    HtmlTitle,
    Body,
    HtmlLine,
    Footnotes,
    Citations,
    Hyperlinks,
    BodySuffix,
}

impl Part {
    /// All parts in the order they are concatenated into the final document.
    pub const ALL: [Part; 12] = [
        Part::HeadPrefix,
        Part::Head,
        Part::Stylesheet,
        Part::BodyPrefix,
        Part::Docinfo,
        Part::HtmlTitle,
        Part::Body,
        Part::HtmlLine,
        Part::Footnotes,
        Part::Citations,
        Part::Hyperlinks,
        Part::BodySuffix,
    ];

    /// Part name as exposed in [`Parts`](crate::Parts).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Part::HeadPrefix => "head_prefix",
            Part::Head => "head",
            Part::Stylesheet => "stylesheet",
            Part::BodyPrefix => "body_prefix",
            Part::Docinfo => "docinfo",
            Part::HtmlTitle => "html_title",
            Part::Body => "body",
            Part::HtmlLine => "html_line",
            Part::Footnotes => "html_footnotes",
            Part::Citations => "html_citations",
            Part::Hyperlinks => "html_hyperlinks",
            Part::BodySuffix => "body_suffix",
        }
    }

    /// Side tables collected out of document order.
    #[must_use]
    pub fn is_side_table(self) -> bool {
        matches!(self, Part::Footnotes | Part::Citations | Part::Hyperlinks)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Output router.
///
/// Holds one buffer per [`Part`] plus a stack of diverted-from parts, so
/// nested diversions always restore the buffer that was active right before
/// them.
#[derive(Debug)]
pub struct OutputRouter {
    buffers: [String; 12],
    active: Part,
    diversions: Vec<Part>,
}

impl OutputRouter {
    /// Create a router with empty buffers and [`Part::Body`] active.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffers: Default::default(),
            active: Part::Body,
            diversions: Vec::new(),
        }
    }

    /// Currently active buffer.
    #[must_use]
    pub fn current(&self) -> Part {
        self.active
    }

    /// Append to the active buffer.
    pub fn push_str(&mut self, text: &str) {
        self.buffers[self.active.index()].push_str(text);
    }

    /// Append formatted text to the active buffer.
    pub fn push_fmt(&mut self, args: fmt::Arguments<'_>) {
        // Writing into a String never fails.
        let _ = self.buffers[self.active.index()].write_fmt(args);
    }

    /// Append to a specific buffer regardless of the active one.
    pub fn push_to(&mut self, part: Part, text: &str) {
        self.buffers[part.index()].push_str(text);
    }

    /// Make `target` the active buffer and return the previously active one.
    pub fn divert(&mut self, target: Part) -> Part {
        let previous = self.active;
        self.diversions.push(previous);
        self.active = target;
        previous
    }

    /// Undo the innermost diversion, making `previous` active again.
    pub fn restore(&mut self, previous: Part) {
        match self.diversions.pop() {
            Some(saved) if saved == previous => {}
            saved => {
                tracing::warn!(
                    expected = ?saved,
                    requested = ?previous,
                    "Unbalanced output diversion"
                );
            }
        }
        self.active = previous;
    }

    /// Undo the innermost diversion, if any.
    pub fn end_diversion(&mut self) {
        if let Some(&previous) = self.diversions.last() {
            self.restore(previous);
        } else {
            tracing::warn!(active = ?self.active, "No output diversion to end");
        }
    }

    /// Number of diversions currently in effect.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.diversions.len()
    }

    /// Contents of a buffer.
    #[must_use]
    pub fn get(&self, part: Part) -> &str {
        &self.buffers[part.index()]
    }

    /// Whether a buffer has received any text.
    #[must_use]
    pub fn is_empty(&self, part: Part) -> bool {
        self.buffers[part.index()].is_empty()
    }

    /// Move a buffer's contents out, leaving it empty.
    pub fn take(&mut self, part: Part) -> String {
        std::mem::take(&mut self.buffers[part.index()])
    }
}

impl Default for OutputRouter {
    fn default() -> Self {
        Self::new()
    }
}
