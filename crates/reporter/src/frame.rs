// SPDX-License-Identifier: MIT

//! Terminal redraw helpers: wraps a rendered frame with ANSI escapes so a
//! TTY repaints in place instead of scrolling a new frame every tick.

/// ANSI sequence: move cursor to top-left (home position). Used instead of
/// `\x1B[2J` (clear screen) to avoid pushing old content into scrollback.
const CURSOR_HOME: &str = "\x1B[H";

/// ANSI sequence: clear from cursor position to end of screen. Removes
/// leftover lines from a previous (longer) render.
const CLEAR_TO_END: &str = "\x1B[J";

/// ANSI sequence: clear from cursor position to end of line. Removes
/// leftover characters from a previous (wider) render on the same line.
const CLEAR_TO_EOL: &str = "\x1B[K";

/// Wrap `content` for one redraw. When `is_tty` the frame is prefixed with
/// cursor-home, each line gets a clear-to-EOL, and the whole thing is
/// suffixed with clear-to-end. When not a TTY (piped/redirected output)
/// `content` is returned unchanged.
pub fn render_frame(content: &str, is_tty: bool) -> String {
    if is_tty {
        let cleared = content.replace('\n', &format!("{CLEAR_TO_EOL}\n"));
        format!("{CURSOR_HOME}{cleared}{CLEAR_TO_END}")
    } else {
        content.to_string()
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
