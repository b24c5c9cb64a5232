//! Message format specifications
//!
//! A format specification mixes literal text with `%<letter>[<width>]`
//! directives:
//!
//! | Directive | Renders                                   |
//! |-----------|-------------------------------------------|
//! | `%t`      | local timestamp, microsecond resolution   |
//! | `%p`      | owning thread identifier (hex)            |
//! | `%l`      | severity name, optionally coloured        |
//! | `%f`      | `file:line`                               |
//! | `%c`      | enclosing function name                   |
//! | `%m`      | message text                              |
//! | `%%`      | a literal `%`                             |
//!
//! A decimal width right after the letter pads the rendered directive with
//! trailing spaces. Values longer than the width are never cut.
//!
//! # Examples
//!
//! ```
//! use fanout_logger::core::{FormatSpec, LogEvent, LogLevel, SourceLocation};
//!
//! let spec = FormatSpec::parse("%l5%%done %m");
//! let event = LogEvent::new(
//!     LogLevel::Info,
//!     SourceLocation::new("main.rs", 1, "main"),
//!     format_args!("ok"),
//! );
//! assert_eq!(spec.render(&event, false), "INFO %done ok\n");
//! ```

use super::log_event::LogEvent;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Format used when an appender configures none.
pub const DEFAULT_MESSAGE_FORMAT: &str = "%t %l14 %p %f30 %c25 %m";

/// Widths beyond this are clamped.
pub const MAX_FIELD_WIDTH: usize = 1024;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

static USE_COLORED_LEVEL: AtomicBool = AtomicBool::new(false);

/// Toggle ANSI colouring of the `%l` directive for the whole process.
pub fn set_level_color(enabled: bool) {
    USE_COLORED_LEVEL.store(enabled, Ordering::Relaxed);
}

pub fn level_color_enabled() -> bool {
    USE_COLORED_LEVEL.load(Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Timestamp,
    Thread,
    Level,
    FileLine,
    Function,
    Message,
    /// Letter with no meaning; renders empty but still honours its width.
    Unknown(char),
}

impl Directive {
    fn from_letter(letter: char) -> Self {
        match letter {
            't' => Directive::Timestamp,
            'p' => Directive::Thread,
            'l' => Directive::Level,
            'f' => Directive::FileLine,
            'c' => Directive::Function,
            'm' => Directive::Message,
            other => Directive::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Field {
        directive: Directive,
        width: Option<usize>,
    },
}

/// A parsed format specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    source: String,
    tokens: Vec<Token>,
}

impl FormatSpec {
    pub fn parse(spec: &str) -> Self {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = spec.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            let letter = match chars.next() {
                // Trailing '%' stays literal.
                None => {
                    literal.push('%');
                    break;
                }
                Some('%') => {
                    literal.push('%');
                    continue;
                }
                Some(letter) => letter,
            };

            let mut width: Option<usize> = None;
            while let Some(digit) = chars.peek().and_then(|d| d.to_digit(10)) {
                let w = width.unwrap_or(0);
                width = Some(w.saturating_mul(10).saturating_add(digit as usize));
                chars.next();
            }

            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Field {
                directive: Directive::from_letter(letter),
                width: width.map(|w| w.min(MAX_FIELD_WIDTH)),
            });
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Self {
            source: spec.to_string(),
            tokens,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Render one newline-terminated line for `event`.
    pub fn render(&self, event: &LogEvent<'_>, colored: bool) -> String {
        let mut out = String::with_capacity(128 + event.message.len());
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Field { directive, width } => {
                    let start = out.len();
                    render_directive(&mut out, *directive, event, colored);
                    if let Some(width) = width {
                        let printed = out.len() - start;
                        for _ in printed..*width {
                            out.push(' ');
                        }
                    }
                }
            }
        }
        out.push('\n');
        out
    }

    /// Render `event` into `sink` with a single write.
    pub fn render_to<W: Write + ?Sized>(
        &self,
        event: &LogEvent<'_>,
        colored: bool,
        sink: &mut W,
    ) -> io::Result<()> {
        sink.write_all(self.render(event, colored).as_bytes())
    }
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self::parse(DEFAULT_MESSAGE_FORMAT)
    }
}

impl From<&str> for FormatSpec {
    fn from(spec: &str) -> Self {
        Self::parse(spec)
    }
}

fn render_directive(out: &mut String, directive: Directive, event: &LogEvent<'_>, colored: bool) {
    use std::fmt::Write as _;
    match directive {
        Directive::Timestamp => {
            let _ = write!(out, "{}", event.timestamp.format(TIMESTAMP_FORMAT));
        }
        Directive::Thread => out.push_str(&event.thread_id),
        Directive::Level => {
            if colored {
                // Escapes are emitted unconditionally; terminal detection is the caller's call.
                let _ = write!(
                    out,
                    "\x1b[{}m{}\x1b[0m",
                    event.level.color_code().to_fg_str(),
                    event.level.to_str()
                );
            } else {
                out.push_str(event.level.to_str());
            }
        }
        Directive::FileLine => {
            let _ = write!(out, "{}:{}", event.location.file, event.location.line);
        }
        Directive::Function => out.push_str(event.location.function),
        Directive::Message => out.push_str(&event.message),
        Directive::Unknown(_) => {}
    }
}
