//! Animated terminal spinner
//!
//! A [`Spinner`] cycles through a character set on a background thread until
//! it is stopped. Every frame erases the previous one first, so the spinner
//! occupies a single line that it cleans up after itself.
//!
//! All mutable state lives behind one mutex. A render step holds it for the
//! whole erase-then-draw sequence, so callers changing the configuration from
//! other threads never observe a half-drawn frame.

pub mod char_sets;
pub mod decorator;
pub mod options;

use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use crate::error::{Result, SpinnerError};
use decorator::{Decorator, Styled};

pub use options::{
    with_color, with_decorator, with_final_message, with_post_tick, with_pre_tick, with_prefix,
    with_suffix, with_writer, SpinnerOption,
};

/// Hook run around every render with the lock held.
pub type TickHook = Box<dyn FnMut(&mut Display) + Send>;

const BACKSPACE: char = '\u{8}';
const DELETE: char = '\u{7f}';
const CLEAR_LINE: &str = "\r\x1b[K";

/// Text drawn around each glyph, plus the message left behind on stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Display {
    pub prefix: String,
    pub suffix: String,
    pub final_message: String,
}

struct State {
    chars: Vec<String>,
    interval: Duration,
    decorator: Box<dyn Decorator>,
    display: Display,
    writer: Box<dyn Write + Send>,
    /// Plain text currently on screen; its rune count is what erase removes.
    last_output: String,
    active: bool,
    /// Bumped on every start; identifies the current animation thread.
    generation: u64,
    /// Sender half of the running animation's cancel channel.
    cancel: Option<SyncSender<()>>,
    pre_tick: Option<TickHook>,
    post_tick: Option<TickHook>,
}

impl State {
    fn new(chars: Vec<String>, interval: Duration) -> Self {
        Self {
            chars,
            interval,
            decorator: Box::new(Styled::default()),
            display: Display::default(),
            writer: Box::new(io::stdout()),
            last_output: String::new(),
            active: false,
            generation: 0,
            cancel: None,
            pre_tick: None,
            post_tick: None,
        }
    }

    /// Draw the glyph at `index` and return the index of the next one.
    fn render(&mut self, index: usize) -> usize {
        self.erase();

        if let Some(hook) = self.pre_tick.as_mut() {
            hook(&mut self.display);
        }

        let index = index % self.chars.len();
        let glyph = &self.chars[index];
        let Display { prefix, suffix, .. } = &self.display;
        let decorated = format!("{}{}{} ", prefix, self.decorator.decorate(glyph), suffix);
        let plain = format!("{}{}{} ", prefix, glyph, suffix);

        self.write(&decorated);
        self.last_output = plain;

        if let Some(hook) = self.post_tick.as_mut() {
            hook(&mut self.display);
        }

        (index + 1) % self.chars.len()
    }

    fn erase(&mut self) {
        let width = self.last_output.chars().count();
        let mut sequence = String::with_capacity(2 * width + CLEAR_LINE.len());
        sequence.extend(std::iter::repeat(BACKSPACE).take(width));
        sequence.extend(std::iter::repeat(DELETE).take(width));
        sequence.push_str(CLEAR_LINE);

        self.write(&sequence);
        self.last_output.clear();
    }

    fn write(&mut self, text: &str) {
        let result = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush());
        if let Err(e) = result {
            tracing::trace!("Dropped spinner output: {}", e);
        }
    }
}

struct Shared {
    state: Mutex<State>,
}

impl Shared {
    // A hook that panicked on the animation thread must not keep stop() from
    // cleaning up the line.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn animate(&self, generation: u64, cancel: Receiver<()>) {
        let _exit = RunExit {
            shared: self,
            generation,
        };
        let mut index = 0;
        loop {
            let interval = {
                let mut state = self.lock();
                // A stop may have landed between the timer firing and the lock.
                if !state.active || !matches!(cancel.try_recv(), Err(TryRecvError::Empty)) {
                    break;
                }
                index = state.render(index);
                state.interval
            };

            match cancel.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!("Spinner animation exited");
    }
}

/// Marks the run idle when its thread exits, including by a hook panic.
struct RunExit<'a> {
    shared: &'a Shared,
    generation: u64,
}

impl Drop for RunExit<'_> {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        // A newer run owns the state after stop() + start().
        if state.generation == self.generation && state.active {
            if thread::panicking() {
                tracing::warn!("Spinner tick hook panicked; animation stopped");
            }
            state.active = false;
            state.cancel = None;
        }
    }
}

/// A thread-safe animated progress indicator.
///
/// The spinner is idle after construction. [`start`](Self::start) spawns the
/// animation thread, [`stop`](Self::stop) erases the last frame, writes the
/// final message and tells the thread to exit. Both are no-ops when the
/// spinner is already in the requested state.
///
/// Dropping a running spinner stops it.
pub struct Spinner {
    shared: Arc<Shared>,
}

impl Spinner {
    /// Create an idle spinner, applying `options` in order.
    pub fn new<I, S>(
        chars: I,
        interval: Duration,
        options: impl IntoIterator<Item = SpinnerOption>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let chars: Vec<String> = chars.into_iter().map(Into::into).collect();
        if chars.is_empty() {
            return Err(SpinnerError::EmptyCharacterSet);
        }

        let spinner = Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::new(chars, interval)),
            }),
        };
        for option in options {
            option.apply(&spinner);
        }
        Ok(spinner)
    }

    /// Begin animating on a background thread. No-op if already running.
    pub fn start(&self) {
        let mut state = self.shared.lock();
        if state.active {
            return;
        }

        let (cancel, cancelled) = mpsc::sync_channel(1);
        state.active = true;
        state.generation = state.generation.wrapping_add(1);
        state.cancel = Some(cancel);
        let generation = state.generation;

        // The thread blocks on the lock until this guard is released.
        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("zoro-spinner".to_string())
            .spawn(move || shared.animate(generation, cancelled));

        match spawned {
            Ok(_) => tracing::debug!("Spinner started"),
            Err(e) => {
                tracing::warn!("Failed to spawn spinner thread: {}", e);
                state.active = false;
                state.cancel = None;
            }
        }
    }

    /// Erase the current frame, write the final message and end the
    /// animation. No-op if idle.
    pub fn stop(&self) {
        let mut state = self.shared.lock();
        if !state.active {
            return;
        }

        state.active = false;
        state.erase();
        if !state.display.final_message.is_empty() {
            let message = state.display.final_message.clone();
            state.write(&message);
        }
        if let Some(cancel) = state.cancel.take() {
            let _ = cancel.try_send(());
        }
        tracing::debug!("Spinner stopped");
    }

    /// Stop, then start again from the first glyph.
    pub fn restart(&self) {
        self.stop();
        self.start();
    }

    /// Whether an animation thread is currently running.
    pub fn is_running(&self) -> bool {
        self.shared.lock().active
    }

    /// Replace the decorator with one built from color names and restart a
    /// running spinner so the next frame uses it.
    ///
    /// An idle spinner is left idle, unlike [`restart`](Self::restart).
    /// On error the current decorator and animation are left as they were.
    pub fn set_color<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        let decorator = decorator::from_names(names)?;
        let running = {
            let mut state = self.shared.lock();
            state.decorator = decorator;
            state.active
        };
        if running {
            self.restart();
        }
        Ok(())
    }

    /// Install any decorator. Takes effect on the next frame.
    pub fn set_decorator(&self, decorator: impl Decorator + 'static) {
        self.replace_decorator(Box::new(decorator));
    }

    pub fn interval(&self) -> Duration {
        self.shared.lock().interval
    }

    /// Applies from the next sleep onwards.
    pub fn set_interval(&self, interval: Duration) {
        self.shared.lock().interval = interval;
    }

    pub fn char_set(&self) -> Vec<String> {
        self.shared.lock().chars.clone()
    }

    pub fn set_char_set<I, S>(&self, chars: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let chars: Vec<String> = chars.into_iter().map(Into::into).collect();
        if chars.is_empty() {
            return Err(SpinnerError::EmptyCharacterSet);
        }
        self.shared.lock().chars = chars;
        Ok(())
    }

    /// Redirect output.
    ///
    /// Call this before [`start`](Self::start): swapping the stream while
    /// frames are on screen leaves the old frame behind on the old stream.
    pub fn set_writer(&self, writer: impl Write + Send + 'static) {
        self.replace_writer(Box::new(writer));
    }

    /// Snapshot of the prefix, suffix and final message.
    pub fn display(&self) -> Display {
        self.shared.lock().display.clone()
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.shared.lock().display.prefix = prefix.into();
    }

    pub fn set_suffix(&self, suffix: impl Into<String>) {
        self.shared.lock().display.suffix = suffix.into();
    }

    pub fn set_final_message(&self, message: impl Into<String>) {
        self.shared.lock().display.final_message = message.into();
    }

    pub fn set_pre_tick(&self, hook: impl FnMut(&mut Display) + Send + 'static) {
        self.replace_pre_tick(Some(Box::new(hook)));
    }

    pub fn set_post_tick(&self, hook: impl FnMut(&mut Display) + Send + 'static) {
        self.replace_post_tick(Some(Box::new(hook)));
    }

    pub fn clear_tick_hooks(&self) {
        let mut state = self.shared.lock();
        state.pre_tick = None;
        state.post_tick = None;
    }

    fn replace_writer(&self, writer: Box<dyn Write + Send>) {
        self.shared.lock().writer = writer;
    }

    fn replace_decorator(&self, decorator: Box<dyn Decorator>) {
        self.shared.lock().decorator = decorator;
    }

    fn replace_pre_tick(&self, hook: Option<TickHook>) {
        self.shared.lock().pre_tick = hook;
    }

    fn replace_post_tick(&self, hook: Option<TickHook>) {
        self.shared.lock().post_tick = hook;
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Spinner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("Spinner")
            .field("chars", &state.chars)
            .field("interval", &state.interval)
            .field("display", &state.display)
            .field("active", &state.active)
            .finish_non_exhaustive()
    }
}
