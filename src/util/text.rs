use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

fn is_stripped_control(c: char) -> bool {
    c == '\x7f' || (c < '\x20' && c != '\t' && c != '\n' && c != '\r')
}

/// Strip terminal control characters and ANSI escape sequences.
///
/// Removes C0 controls (except tab, newline, carriage return), DEL, CSI
/// sequences (`ESC [` ... final byte), OSC sequences (`ESC ]` ... BEL or
/// `ESC \`) and any bare ESC.
///
/// Returns `Cow::Borrowed` when nothing needs removing.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| c == '\x1b' || is_stripped_control(c)) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\x1b' => match chars.peek() {
                Some('[') => {
                    chars.next();
                    // Parameter and intermediate bytes run until a final byte in 0x40..=0x7e.
                    for next in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&next) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            c if is_stripped_control(c) => {}
            c => out.push(c),
        }
    }

    Cow::Owned(out)
}

/// Collapse a string onto one line for list rows and tab labels.
///
/// Control characters are stripped and every run of whitespace (including
/// newlines) becomes a single space. Leading and trailing whitespace is dropped.
pub fn one_line(s: &str) -> String {
    strip_control_chars(s)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate `s` to at most `max_width` terminal columns.
///
/// Appends `...` when text is cut and there is room for it; at widths of 3
/// or less the result is just the characters that fit.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if UnicodeWidthStr::width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let budget = if max_width <= ELLIPSIS_WIDTH {
        max_width
    } else {
        max_width - ELLIPSIS_WIDTH
    };

    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }

    if max_width <= ELLIPSIS_WIDTH {
        Cow::Owned(s[..end].to_string())
    } else {
        Cow::Owned(format!("{}{}", &s[..end], ELLIPSIS))
    }
}
