//! What a running spinner puts on the stream

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use zoro::spinner::decorator::Plain;
use zoro::spinner::{
    with_decorator, with_post_tick, with_pre_tick, with_prefix, with_suffix, with_writer,
};
use zoro::{Display, Spinner, SpinnerError};

use crate::common::{assert_exact_erases, frames, segments, Capture, CLEAR_LINE};

const SLOW: Duration = Duration::from_secs(30);

#[test]
fn test_erase_width_matches_plain_text_runes() {
    let capture = Capture::new();
    let spinner = Spinner::new(
        ["⣾"],
        SLOW,
        [
            with_writer(capture.clone()),
            with_prefix("→ "),
            with_suffix(" loading"),
        ],
    )
    .unwrap();
    spinner.set_color(&["hiMagenta", "bold"]).unwrap();

    spinner.start();
    thread::sleep(Duration::from_millis(150));
    spinner.stop();

    let output = capture.text();
    let expected = "→ ⣾ loading ".chars().count();
    let segments = segments(&output);
    assert_eq!(segments[1].visible, "→ ⣾ loading ");
    assert_eq!(segments[1].backspaces, expected);
    assert_eq!(segments[1].deletes, expected);
    // Styling reached the stream but not the erase count
    assert!(output.contains("\x1b[1m"));
    assert_eq!(output.matches('\u{8}').count(), expected);
}

#[test]
fn test_prefix_and_suffix_changes_apply_to_next_frame() {
    let capture = Capture::new();
    let spinner = Spinner::new(
        ["*"],
        Duration::from_millis(40),
        [with_writer(capture.clone()), with_decorator(Plain)],
    )
    .unwrap();

    spinner.start();
    thread::sleep(Duration::from_millis(20));
    spinner.set_prefix("[");
    spinner.set_suffix("]");
    thread::sleep(Duration::from_millis(100));
    spinner.stop();

    let output = capture.text();
    assert!(output.contains("* "));
    assert!(output.contains("[*] "));
    assert_exact_erases(&output);
}

#[test]
fn test_tick_hooks_run_around_every_frame() {
    let capture = Capture::new();
    let before = Arc::new(AtomicUsize::new(0));
    let after = Arc::new(AtomicUsize::new(0));

    let spinner = {
        let before = Arc::clone(&before);
        let after = Arc::clone(&after);
        Spinner::new(
            ["a", "b"],
            Duration::from_millis(10),
            [
                with_writer(capture.clone()),
                with_decorator(Plain),
                with_pre_tick(move |display: &mut Display| {
                    let n = before.fetch_add(1, Ordering::SeqCst) + 1;
                    display.suffix = format!(" #{}", n);
                }),
                with_post_tick(move |_: &mut Display| {
                    after.fetch_add(1, Ordering::SeqCst);
                }),
            ],
        )
        .unwrap()
    };

    spinner.start();
    thread::sleep(Duration::from_millis(100));
    spinner.stop();

    let ticks = before.load(Ordering::SeqCst);
    assert!(ticks >= 2);
    assert_eq!(after.load(Ordering::SeqCst), ticks);

    let output = capture.text();
    assert!(output.contains("a #1 "));
    assert!(output.contains("b #2 "));
    assert_exact_erases(&output);
}

#[test]
fn test_invalid_color_keeps_animation_running() {
    let capture = Capture::new();
    let spinner = Spinner::new(
        ["|", "/"],
        SLOW,
        [with_writer(capture.clone()), with_decorator(Plain)],
    )
    .unwrap();

    spinner.start();
    thread::sleep(Duration::from_millis(100));
    let before = capture.text();

    assert_eq!(
        spinner.set_color(&["chartreuse"]),
        Err(SpinnerError::InvalidColor("chartreuse".to_string()))
    );
    assert!(spinner.is_running());
    // No restart happened, so nothing new was written
    assert_eq!(capture.text(), before);
    spinner.stop();
}

#[test]
fn test_set_color_restarts_running_spinner() {
    const BOLD: &str = "\x1b[1m";
    let capture = Capture::new();
    let spinner = Spinner::new(
        ["-", "\\", "|", "/"],
        Duration::from_millis(25),
        [with_writer(capture.clone()), with_decorator(Plain)],
    )
    .unwrap();

    spinner.start();
    thread::sleep(Duration::from_millis(75));
    spinner.set_color(&["bold"]).unwrap();
    thread::sleep(Duration::from_millis(10));
    assert!(spinner.is_running());
    spinner.stop();

    let output = capture.text();
    let styled = output.find(BOLD).expect("new decorator never reached the stream");
    let (before, after) = output.split_at(styled);

    // Old frame erased by the stop, then the fresh run's own erase
    assert!(before.ends_with(&format!("{CLEAR_LINE}{CLEAR_LINE}")));
    assert_eq!(frames(before).first().map(String::as_str), Some("-"));
    // The restarted run begins again from the first glyph
    assert!(after[BOLD.len()..].starts_with('-'));
    assert_exact_erases(&output);
}

#[test]
fn test_set_color_on_idle_spinner_does_not_start_it() {
    let capture = Capture::new();
    let spinner = Spinner::new(["|"], SLOW, [with_writer(capture.clone())]).unwrap();

    spinner.set_color(&["green"]).unwrap();

    assert!(!spinner.is_running());
    assert!(capture.is_empty());
}

#[test]
fn test_runtime_setters_round_trip() {
    let spinner = Spinner::new(["|"], SLOW, [with_writer(Capture::new())]).unwrap();

    spinner.set_interval(Duration::from_millis(5));
    spinner.set_char_set(["x", "y"]).unwrap();
    spinner.set_final_message("ok");

    assert_eq!(spinner.interval(), Duration::from_millis(5));
    assert_eq!(spinner.char_set(), vec!["x", "y"]);
    assert_eq!(spinner.display().final_message, "ok");
}

#[test]
fn test_char_set_swap_takes_effect_while_running() {
    let capture = Capture::new();
    let spinner = Spinner::new(
        ["a", "b", "c", "d", "e"],
        Duration::from_millis(10),
        [with_writer(capture.clone()), with_decorator(Plain)],
    )
    .unwrap();

    spinner.start();
    thread::sleep(Duration::from_millis(50));
    spinner.set_char_set(["z"]).unwrap();
    thread::sleep(Duration::from_millis(50));
    spinner.stop();

    assert!(capture.text().contains("z "));
    assert_exact_erases(&capture.text());
}
