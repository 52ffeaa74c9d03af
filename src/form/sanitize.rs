//! Free-text field cleaning.
//!
//! Every value that can end up in an outbound mail header or body goes
//! through [`clean`]: missing becomes empty, surrounding whitespace is
//! trimmed, CR/LF runs collapse to a single space so no client-controlled
//! text can inject headers, and HTML-significant characters are escaped so
//! later rendering of logged or stored values stays inert.

/// Clean one untrusted field value.
pub fn clean(raw: Option<&str>) -> String {
    let trimmed = raw.unwrap_or_default().trim();
    escape_html(&collapse_line_breaks(trimmed))
}

/// Replace every run of CR/LF characters with a single space.
fn collapse_line_breaks(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_break = false;
    for c in value.chars() {
        if c == '\r' || c == '\n' {
            if !in_break {
                out.push(' ');
                in_break = true;
            }
        } else {
            out.push(c);
            in_break = false;
        }
    }
    out
}

/// Escape `& < > " '`, matching what the upstream form expects to receive.
fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
