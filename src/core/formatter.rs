//! Message rendering
//!
//! Builds the final text for a message: an optional prefix made of the
//! fields selected by [`Flags`], in the fixed order level, date, time,
//! pid, tid, followed by the substituted message body.
//!
//! Two grammars are supported:
//!
//! - Plain: `[ level=info date=2025-01-08 ] message\n`. The bracket block
//!   is left out when no field flag is set.
//! - JSON: `{ "level": "info", "date": "2025-01-08", "message": "message" }\n`.
//!   Every value is a JSON string; the message is always the last member.

use super::args::{substitute, Arg};
use super::error::FormatError;
use super::flags::Flags;
use super::level::Level;
use chrono::{DateTime, Local};
use serde_json::Value;
use std::cell::RefCell;

thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Numeric id of the calling thread, computed once per thread.
fn current_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                // `ThreadId` only exposes its number through Debug: "ThreadId(7)".
                let debug = format!("{:?}", std::thread::current().id());
                let digits: String = debug.chars().filter(char::is_ascii_digit).collect();
                if digits.is_empty() {
                    debug
                } else {
                    digits
                }
            })
            .clone()
    })
}

/// Ambient values captured once per message.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub now: DateTime<Local>,
    pub pid: u32,
    pub tid: String,
}

impl RenderContext {
    /// Sample the clock, process id and thread id of the caller.
    pub fn capture() -> Self {
        Self {
            now: Local::now(),
            pid: std::process::id(),
            tid: current_thread_id(),
        }
    }
}

/// Render a message from a template and its arguments.
///
/// The object grammar is used when `json_mode` is true or the json bit is
/// set in `flags`.
pub fn render(
    level: Level,
    template: &str,
    args: &[Arg],
    flags: Flags,
    json_mode: bool,
) -> Result<String, FormatError> {
    let message = substitute(template, args)?;
    Ok(render_message(
        level,
        &message,
        flags,
        json_mode,
        &RenderContext::capture(),
    ))
}

/// Render an already substituted message body.
pub fn render_message(
    level: Level,
    message: &str,
    flags: Flags,
    json_mode: bool,
    ctx: &RenderContext,
) -> String {
    let fields = prefix_fields(level, flags, ctx);
    if json_mode || flags.contains(Flags::JSON) {
        render_json(&fields, message)
    } else {
        render_plain(&fields, message)
    }
}

fn prefix_fields(level: Level, flags: Flags, ctx: &RenderContext) -> Vec<(&'static str, String)> {
    let mut fields = Vec::with_capacity(5);
    if flags.contains(Flags::LEVEL) {
        fields.push(("level", level.to_string()));
    }
    if flags.contains(Flags::DATE) {
        fields.push(("date", ctx.now.format("%Y-%m-%d").to_string()));
    }
    if flags.contains(Flags::TIME) {
        fields.push(("time", ctx.now.format("%H:%M:%S").to_string()));
    }
    if flags.contains(Flags::PID) {
        fields.push(("pid", ctx.pid.to_string()));
    }
    if flags.contains(Flags::TID) {
        fields.push(("tid", ctx.tid.clone()));
    }
    fields
}

fn render_plain(fields: &[(&'static str, String)], message: &str) -> String {
    if fields.is_empty() {
        return format!("{}\n", message);
    }
    let prefix = fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(" ");
    format!("[ {} ] {}\n", prefix, message)
}

fn render_json(fields: &[(&'static str, String)], message: &str) -> String {
    let mut members: Vec<String> = fields
        .iter()
        .map(|(key, value)| format!("\"{}\": {}", key, json_string(value)))
        .collect();
    members.push(format!("\"message\": {}", json_string(message)));
    format!("{{ {} }}\n", members.join(", "))
}

fn json_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}
