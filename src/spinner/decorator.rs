//! Glyph decorators
//!
//! A decorator turns a glyph into what actually gets written to the terminal,
//! usually by wrapping it in ANSI styling. The spinner always measures erase
//! width against the undecorated glyph, so decorators are free to add escape
//! sequences.

use crossterm::style::{Attribute, Color, ContentStyle};

use crate::error::{Result, SpinnerError};

/// Maps a glyph to its on-screen form.
pub trait Decorator: Send + Sync {
    fn decorate(&self, glyph: &str) -> String;
}

impl<F> Decorator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn decorate(&self, glyph: &str) -> String {
        self(glyph)
    }
}

/// Writes glyphs untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Decorator for Plain {
    fn decorate(&self, glyph: &str) -> String {
        glyph.to_string()
    }
}

/// Applies a crossterm style to every glyph.
#[derive(Debug, Clone, Copy)]
pub struct Styled {
    style: ContentStyle,
}

impl Styled {
    pub fn new(style: ContentStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> ContentStyle {
        self.style
    }
}

impl Default for Styled {
    /// White foreground, the spinner's out-of-the-box look.
    fn default() -> Self {
        Self::new(ContentStyle {
            foreground_color: Some(Color::Grey),
            ..ContentStyle::new()
        })
    }
}

impl Decorator for Styled {
    fn decorate(&self, glyph: &str) -> String {
        self.style.apply(glyph).to_string()
    }
}

/// Build a decorator from color and attribute names.
///
/// An empty list yields [`Plain`].
pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Box<dyn Decorator>> {
    if names.is_empty() {
        return Ok(Box::new(Plain));
    }
    Ok(Box::new(Styled::new(parse_style(names)?)))
}

/// Parse color and attribute names into a single style.
///
/// Names are case-insensitive. Foreground colors take an optional `fg`
/// prefix, background colors need `bg`, and `hi` or `bright` selects the
/// bright variant (`fgHiGreen`, `bgBrightBlue`, `hired`). Text attributes are
/// `bold`, `dim`, `italic`, `underline`, `blink`, `reverse`, `hidden` and
/// `crossedout`.
pub fn parse_style<S: AsRef<str>>(names: &[S]) -> Result<ContentStyle> {
    let mut style = ContentStyle::new();
    for name in names {
        let raw = name.as_ref();
        let lower = raw.trim().to_ascii_lowercase();

        if let Some(attribute) = parse_attribute(&lower) {
            style.attributes.set(attribute);
            continue;
        }

        if let Some(rest) = lower.strip_prefix("bg") {
            let color = parse_color(rest).ok_or_else(|| SpinnerError::InvalidColor(raw.to_string()))?;
            style.background_color = Some(color);
            continue;
        }

        let rest = lower.strip_prefix("fg").unwrap_or(&lower);
        let color = parse_color(rest).ok_or_else(|| SpinnerError::InvalidColor(raw.to_string()))?;
        style.foreground_color = Some(color);
    }
    Ok(style)
}

fn parse_attribute(name: &str) -> Option<Attribute> {
    let attribute = match name {
        "bold" => Attribute::Bold,
        "dim" | "faint" => Attribute::Dim,
        "italic" => Attribute::Italic,
        "underline" | "underlined" => Attribute::Underlined,
        "blink" | "blinkslow" => Attribute::SlowBlink,
        "blinkrapid" => Attribute::RapidBlink,
        "reverse" | "reversevideo" => Attribute::Reverse,
        "hidden" | "concealed" => Attribute::Hidden,
        "crossedout" | "strikethrough" => Attribute::CrossedOut,
        _ => return None,
    };
    Some(attribute)
}

// crossterm names the bright colors plainly (`Red`) and the normal ones `Dark*`.
fn parse_color(name: &str) -> Option<Color> {
    let (bright, base) = if let Some(base) = name.strip_prefix("hi") {
        (true, base)
    } else if let Some(base) = name.strip_prefix("bright") {
        (true, base)
    } else {
        (false, name)
    };

    let color = match (base, bright) {
        ("black", false) => Color::Black,
        ("black", true) => Color::DarkGrey,
        ("red", false) => Color::DarkRed,
        ("red", true) => Color::Red,
        ("green", false) => Color::DarkGreen,
        ("green", true) => Color::Green,
        ("yellow", false) => Color::DarkYellow,
        ("yellow", true) => Color::Yellow,
        ("blue", false) => Color::DarkBlue,
        ("blue", true) => Color::Blue,
        ("magenta", false) => Color::DarkMagenta,
        ("magenta", true) => Color::Magenta,
        ("cyan", false) => Color::DarkCyan,
        ("cyan", true) => Color::Cyan,
        ("white", false) => Color::Grey,
        ("white", true) => Color::White,
        _ => return None,
    };
    Some(color)
}
