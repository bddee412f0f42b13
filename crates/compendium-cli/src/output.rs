use std::io::Write;
use std::sync::OnceLock;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: OnceLock<bool> = OnceLock::new();

pub fn init(json: bool) {
    let _ = JSON_MODE.set(json);
}

pub fn is_json() -> bool {
    JSON_MODE.get().copied().unwrap_or(false)
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

/// Print `label` in green (ok) or red, followed by `msg`.
pub fn status(ok: bool, label: &str, msg: &str) -> anyhow::Result<()> {
    let mut out = StandardStream::stdout(ColorChoice::Auto);
    let color = if ok { Color::Green } else { Color::Red };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{label}")?;
    out.reset()?;
    writeln!(out, " {msg}")?;
    Ok(())
}

/// Print an indented `key: value` line.
pub fn field(key: &str, value: impl std::fmt::Display) {
    println!("  {key:<14} {value}");
}
