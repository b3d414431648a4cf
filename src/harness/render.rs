//! The render injection point.
//!
//! A renderer turns raw fixture input into the text compared against the
//! golden file. For parser tests that is "parse, then dump the syntax tree".
//! Any `Fn(&str) -> String` is a renderer.

/// Maps raw input text to the string compared against a golden file.
pub trait Renderer {
    /// Renders `input` for comparison.
    fn render(&self, input: &str) -> String;
}

impl<F> Renderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, input: &str) -> String {
        self(input)
    }
}
