/// Replace every run of `ch` that is at least `min_run` long with a single `ch`.
pub fn collapse_runs(text: &str, ch: char, min_run: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;

    let flush = |out: &mut String, run: usize| {
        if run >= min_run {
            out.push(ch);
        } else {
            out.extend(std::iter::repeat_n(ch, run));
        }
    };

    for c in text.chars() {
        if c == ch {
            run += 1;
            continue;
        }
        if run > 0 {
            flush(&mut out, run);
            run = 0;
        }
        out.push(c);
    }
    if run > 0 {
        flush(&mut out, run);
    }

    out
}

/// Normalize line breaks and spacing of raw script text.
///
/// Carriage returns and U+2028 become newlines, non-breaking spaces become
/// spaces, blank lines and repeated spaces are collapsed, and the result is
/// trimmed.
pub fn normalize(text: &str) -> String {
    let text: String = text
        .chars()
        .map(|c| match c {
            '\r' | '\u{2028}' => '\n',
            '\u{00A0}' => ' ',
            other => other,
        })
        .collect();

    let text = collapse_runs(&text, '\n', 2);
    let text = collapse_runs(&text, ' ', 2);
    text.trim().to_string()
}
