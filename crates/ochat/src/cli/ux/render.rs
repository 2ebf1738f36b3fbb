use anyhow::Result;
use ochat_core::reveal::ChunkSink;
use std::io::Write;
use syntect::{
    easy::HighlightLines,
    highlighting::{Style as SyntectStyle, Theme, ThemeSet},
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};

use super::GenerationSpinner;

const RESET: &str = "\x1b[0m";

/// Loads the highlighting theme for `theme_name` ("dark" or "light").
pub fn get_theme(theme_name: &str) -> Theme {
    let mut theme_set = ThemeSet::load_defaults();
    let theme_key = match theme_name {
        "dark" => "base16-ocean.dark",
        _ => "InspiredGitHub",
    };
    theme_set.themes.remove(theme_key).unwrap_or_default()
}

fn markdown_syntax(syntax_set: &SyntaxSet) -> &SyntaxReference {
    syntax_set
        .find_syntax_by_extension("md")
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text())
}

/// Writes reply text to a terminal, highlighting it as markdown when styled.
pub struct TerminalRenderer<'a> {
    out: &'a mut dyn Write,
    syntax_set: SyntaxSet,
    theme: &'a Theme,
    highlighter: HighlightLines<'a>,
    styled: bool,
}

impl<'a> TerminalRenderer<'a> {
    /// Styles output when the terminal supports colors.
    pub fn new(out: &'a mut dyn Write, theme: &'a Theme) -> Self {
        Self::with_styling(out, theme, console::colors_enabled())
    }

    /// Never styles output.
    pub fn plain(out: &'a mut dyn Write, theme: &'a Theme) -> Self {
        Self::with_styling(out, theme, false)
    }

    fn with_styling(out: &'a mut dyn Write, theme: &'a Theme, styled: bool) -> Self {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let highlighter = HighlightLines::new(markdown_syntax(&syntax_set), theme);

        Self {
            out,
            syntax_set,
            theme,
            highlighter,
            styled,
        }
    }

    /// Resets highlighter state before a new reply.
    pub fn clear(&mut self) {
        self.highlighter = HighlightLines::new(markdown_syntax(&self.syntax_set), self.theme);
    }

    pub fn render_markdown(&mut self, text: &str) -> Result<()> {
        if !self.styled {
            self.out.write_all(text.as_bytes())?;
            return Ok(());
        }

        // Text is either a continuation of the previous line or ends one.
        for line in LinesWithEndings::from(text) {
            let ranges = self
                .highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(SyntectStyle::default(), line)]);

            let highlighted = as_24_bit_terminal_escaped(&ranges[..], false);
            self.out.write_all(highlighted.as_bytes())?;
            // `as_24_bit_terminal_escaped` doesn't reset the color
            self.out.write_all(RESET.as_bytes())?;
        }
        Ok(())
    }
}

impl ChunkSink for TerminalRenderer<'_> {
    fn write_chunk(&mut self, chunk: &str) -> Result<()> {
        self.render_markdown(chunk)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Reveal target that clears the pending spinner on the first chunk.
pub struct RevealDisplay<'r, 'a> {
    renderer: &'r mut TerminalRenderer<'a>,
    spinner: Option<GenerationSpinner>,
}

impl<'r, 'a> RevealDisplay<'r, 'a> {
    pub fn new(renderer: &'r mut TerminalRenderer<'a>, spinner: GenerationSpinner) -> Self {
        Self {
            renderer,
            spinner: Some(spinner),
        }
    }

    /// Clears the spinner if no chunk was ever written.
    pub fn finish(mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.clear();
        }
    }
}

impl ChunkSink for RevealDisplay<'_, '_> {
    fn write_chunk(&mut self, chunk: &str) -> Result<()> {
        if let Some(spinner) = self.spinner.take() {
            spinner.clear();
        }
        self.renderer.write_chunk(chunk)
    }
}
