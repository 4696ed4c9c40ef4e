//! Construction-time options
//!
//! Each option is applied through the matching setter, in the order given,
//! before [`Spinner::new`](super::Spinner::new) hands the spinner back.

use std::io::Write;

use crossterm::style::ContentStyle;

use super::decorator::{Decorator, Styled};
use super::{Display, Spinner, TickHook};

pub enum SpinnerOption {
    Writer(Box<dyn Write + Send>),
    Decorator(Box<dyn Decorator>),
    Prefix(String),
    Suffix(String),
    FinalMessage(String),
    PreTick(TickHook),
    PostTick(TickHook),
}

impl SpinnerOption {
    pub(super) fn apply(self, spinner: &Spinner) {
        match self {
            Self::Writer(writer) => spinner.replace_writer(writer),
            Self::Decorator(decorator) => spinner.replace_decorator(decorator),
            Self::Prefix(prefix) => spinner.set_prefix(prefix),
            Self::Suffix(suffix) => spinner.set_suffix(suffix),
            Self::FinalMessage(message) => spinner.set_final_message(message),
            Self::PreTick(hook) => spinner.replace_pre_tick(Some(hook)),
            Self::PostTick(hook) => spinner.replace_post_tick(Some(hook)),
        }
    }
}

impl std::fmt::Debug for SpinnerOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Writer(_) => f.write_str("Writer(..)"),
            Self::Decorator(_) => f.write_str("Decorator(..)"),
            Self::Prefix(prefix) => f.debug_tuple("Prefix").field(prefix).finish(),
            Self::Suffix(suffix) => f.debug_tuple("Suffix").field(suffix).finish(),
            Self::FinalMessage(message) => f.debug_tuple("FinalMessage").field(message).finish(),
            Self::PreTick(_) => f.write_str("PreTick(..)"),
            Self::PostTick(_) => f.write_str("PostTick(..)"),
        }
    }
}

/// Send frames to `writer` instead of stdout.
pub fn with_writer(writer: impl Write + Send + 'static) -> SpinnerOption {
    SpinnerOption::Writer(Box::new(writer))
}

pub fn with_color(style: ContentStyle) -> SpinnerOption {
    SpinnerOption::Decorator(Box::new(Styled::new(style)))
}

pub fn with_decorator(decorator: impl Decorator + 'static) -> SpinnerOption {
    SpinnerOption::Decorator(Box::new(decorator))
}

pub fn with_prefix(prefix: impl Into<String>) -> SpinnerOption {
    SpinnerOption::Prefix(prefix.into())
}

pub fn with_suffix(suffix: impl Into<String>) -> SpinnerOption {
    SpinnerOption::Suffix(suffix.into())
}

/// Text written once, after the last frame is erased, when the spinner stops.
pub fn with_final_message(message: impl Into<String>) -> SpinnerOption {
    SpinnerOption::FinalMessage(message.into())
}

pub fn with_pre_tick(hook: impl FnMut(&mut Display) + Send + 'static) -> SpinnerOption {
    SpinnerOption::PreTick(Box::new(hook))
}

pub fn with_post_tick(hook: impl FnMut(&mut Display) + Send + 'static) -> SpinnerOption {
    SpinnerOption::PostTick(Box::new(hook))
}
