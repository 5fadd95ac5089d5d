//! The single sink all shell-generated text goes through.

use owo_colors::{OwoColorize, Style as Paint};
use std::io::{self, Write};

/// Class of a piece of output; the colour is a presentation detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Error,
    Warning,
    Info,
    Header,
    Other,
    Normal,
}

impl Style {
    fn paint(self) -> Option<Paint> {
        let bold = Paint::new().bold();
        match self {
            Style::Error => Some(bold.red()),
            Style::Warning => Some(bold.yellow()),
            Style::Info => Some(bold.green()),
            Style::Header => Some(bold.blue()),
            Style::Other => Some(bold.magenta()),
            Style::Normal => None,
        }
    }
}

/// `text` in `style` as a string, for places that need it pre-rendered
/// such as the line editor's prompt.
pub fn render(text: &str, style: Style, color: bool) -> String {
    match style.paint().filter(|_| color) {
        Some(paint) => text.style(paint).to_string(),
        None => text.to_string(),
    }
}

/// Styled writer over any byte sink.
pub struct Console<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Console<W> {
    /// Wrap `out`. With `color` off, text is written without escape codes.
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Write `text` in `style`, flushing so the prompt shows before a read.
    pub fn write(&mut self, text: &str, style: Style) -> io::Result<()> {
        self.out.write_all(render(text, style, self.color).as_bytes())?;
        self.out.flush()
    }

    /// Write `text` in `style` followed by a plain newline.
    pub fn line(&mut self, text: &str, style: Style) -> io::Result<()> {
        self.write(text, style)?;
        self.write("\n", Style::Normal)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Console<Vec<u8>> {
    /// An in-memory console, mostly for tests and pre-rendered text.
    pub fn buffer(color: bool) -> Self {
        Self::new(Vec::new(), color)
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}
