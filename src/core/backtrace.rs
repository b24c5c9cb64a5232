//! Stack traces for error-severity events

use super::log_event::LogEvent;
use super::registry::Registry;
use std::io::Write;

/// Frames with these prefixes belong to the unwinder, the panic isolation
/// shims or this crate's dispatch path, and are not reported.
const INTERNAL_PREFIXES: &[&str] = &[
    "backtrace::",
    "fanout_logger::",
    "<fanout_logger::",
    "std::panicking::",
    "std::panic::",
    "core::panic::",
    "<core::panic::",
    "core::ops::function::",
    "__rust_try",
];

const UNKNOWN_SYMBOL: &str = "<unknown>";

/// Leading frames dropped when neither the dispatch frame nor any symbol
/// name can be found, as in a stripped binary.
const UNRESOLVED_SKIPPED_FRAMES: usize = 3;

fn is_internal(name: Option<&str>) -> bool {
    name.is_some_and(|n| INTERNAL_PREFIXES.iter().any(|p| n.starts_with(p)))
}

struct FrameInfo {
    ip: usize,
    sp: usize,
    /// Start of the enclosing function as reported by the unwinder. Known
    /// even when the symbol table is gone.
    function: usize,
    name: Option<String>,
    addr: Option<usize>,
}

/// Entry point every logged event passes through on its way to an appender
fn dispatch_entry() -> usize {
    let entry: for<'r, 'e, 'a> fn(&'r Registry, &'e LogEvent<'a>) -> usize = Registry::dispatch;
    entry as usize
}

/// Index of the first frame worth reporting. Everything up to and including
/// the outermost dispatch frame is internal, as are the named crate frames
/// that called it.
fn first_reported(frames: &[FrameInfo], entry: usize) -> usize {
    let anchored = frames.iter().rposition(|f| f.function == entry);
    let mut first = anchored.map_or(0, |i| i + 1);
    if anchored.is_none() && frames.first().is_some_and(|f| f.name.is_none()) {
        return UNRESOLVED_SKIPPED_FRAMES.min(frames.len());
    }
    while frames.get(first).is_some_and(|f| is_internal(f.name.as_deref())) {
        first += 1;
    }
    first
}

/// Write one line per frame of the calling thread's stack into `out`:
///
/// ```text
/// #1  0x000055d0c0a1b2c3 sp=0x00007ffd5e1f0a10 app::worker::run + 0x5c
/// ```
///
/// Returns the number of frames written. Unresolvable symbols are shown
/// as `<unknown>`; a failed write stops the output without reporting an
/// error.
#[inline(never)]
pub fn write_backtrace(out: &mut dyn Write) -> usize {
    let mut frames = Vec::with_capacity(32);

    ::backtrace::trace(|frame| {
        let mut name: Option<String> = None;
        let mut addr: Option<usize> = None;
        ::backtrace::resolve_frame(frame, |symbol| {
            if name.is_none() {
                name = symbol.name().map(|n| format!("{:#}", n));
                addr = symbol.addr().map(|a| a as usize);
            }
        });
        frames.push(FrameInfo {
            ip: frame.ip() as usize,
            sp: frame.sp() as usize,
            function: frame.symbol_address() as usize,
            name,
            addr,
        });
        true
    });

    let mut written = 0usize;
    for frame in &frames[first_reported(&frames, dispatch_entry())..] {
        let offset = frame.addr.map_or(0, |a| frame.ip.wrapping_sub(a));
        written += 1;
        let line = writeln!(
            out,
            "#{:<2} 0x{:016x} sp=0x{:016x} {} + 0x{:x}",
            written,
            frame.ip,
            frame.sp,
            frame.name.as_deref().unwrap_or(UNKNOWN_SYMBOL),
            offset
        );
        if line.is_err() {
            break;
        }
    }

    written
}
