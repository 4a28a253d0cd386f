//! RTF to plain text.
//!
//! A small tokenizer that keeps document text and drops formatting.
//! Destination groups that never carry body text (font and color tables,
//! stylesheets, pictures, document info) are skipped entirely. `\'hh`
//! escapes are decoded with the document code page from `\ansicpgN`.

use std::iter::Peekable;
use std::str::Chars;

use encoding_rs::{Encoding, WINDOWS_1252};

use super::plain::decode_cp1251;

/// Destinations whose content is never document text.
const SKIPPED_DESTINATIONS: &[&str] = &[
    "colorschememapping",
    "colortbl",
    "datastore",
    "fldinst",
    "filetbl",
    "fonttbl",
    "footer",
    "footerf",
    "footerl",
    "footerr",
    "generator",
    "header",
    "headerf",
    "headerl",
    "headerr",
    "info",
    "latentstyles",
    "listoverridetable",
    "listtable",
    "mmathPr",
    "object",
    "pgdsctbl",
    "pict",
    "revtbl",
    "rsidtbl",
    "stylesheet",
    "themedata",
    "xmlnstbl",
];

pub(super) fn extract(content: &[u8]) -> String {
    let source = match std::str::from_utf8(content) {
        Ok(text) => text.to_string(),
        Err(_) => decode_cp1251(content),
    };
    strip(&source)
}

#[derive(Debug, Clone, Copy)]
struct GroupState {
    skip: bool,
    /// Fallback characters that follow each `\uN`.
    uc: usize,
}

impl Default for GroupState {
    fn default() -> Self {
        Self { skip: false, uc: 1 }
    }
}

struct Stripper {
    out: String,
    state: GroupState,
    stack: Vec<GroupState>,
    encoding: &'static Encoding,
    pending_bytes: Vec<u8>,
    pending_high_surrogate: Option<u32>,
    fallback_to_skip: usize,
}

/// Convert RTF markup to plain text.
pub fn strip(rtf: &str) -> String {
    let mut stripper = Stripper {
        out: String::with_capacity(rtf.len() / 2),
        state: GroupState::default(),
        stack: Vec::new(),
        encoding: WINDOWS_1252,
        pending_bytes: Vec::new(),
        pending_high_surrogate: None,
        fallback_to_skip: 0,
    };
    stripper.run(&mut rtf.chars().peekable());
    stripper.flush_bytes();
    stripper.out
}

impl Stripper {
    fn run(&mut self, chars: &mut Peekable<Chars<'_>>) {
        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    self.flush_bytes();
                    self.stack.push(self.state);
                }
                '}' => {
                    self.flush_bytes();
                    if let Some(outer) = self.stack.pop() {
                        self.state = outer;
                    }
                    self.fallback_to_skip = 0;
                }
                '\\' => self.control(chars),
                '\r' | '\n' => {}
                other => {
                    if self.consume_fallback() {
                        continue;
                    }
                    self.emit(other);
                }
            }
        }
    }

    fn control(&mut self, chars: &mut Peekable<Chars<'_>>) {
        let Some(&next) = chars.peek() else {
            return;
        };

        if next.is_ascii_alphabetic() {
            let (word, param) = read_control_word(chars);
            self.control_word(&word, param);
            return;
        }

        chars.next();
        match next {
            '\'' => {
                let hex: String = chars.by_ref().take(2).collect();
                let Ok(byte) = u8::from_str_radix(&hex, 16) else {
                    return;
                };
                if self.consume_fallback() {
                    return;
                }
                if !self.state.skip {
                    self.pending_bytes.push(byte);
                }
            }
            '*' => self.state.skip = true,
            '\\' | '{' | '}' => self.emit(next),
            '~' => self.emit('\u{00A0}'),
            '_' => self.emit('-'),
            '\r' | '\n' => self.emit('\n'),
            _ => {}
        }
    }

    fn control_word(&mut self, word: &str, param: Option<i32>) {
        if SKIPPED_DESTINATIONS.contains(&word) {
            self.state.skip = true;
            return;
        }

        match word {
            "par" | "line" | "sect" | "page" | "row" => self.emit('\n'),
            "tab" | "cell" => self.emit('\t'),
            "emdash" => self.emit('—'),
            "endash" => self.emit('–'),
            "bullet" => self.emit('•'),
            "lquote" => self.emit('‘'),
            "rquote" => self.emit('’'),
            "ldblquote" => self.emit('“'),
            "rdblquote" => self.emit('”'),
            "emspace" | "enspace" | "qmspace" => self.emit(' '),
            "ansicpg" => {
                if let Some(encoding) = param.and_then(encoding_for_codepage) {
                    self.encoding = encoding;
                }
            }
            "uc" => {
                self.state.uc = param.and_then(|n| usize::try_from(n).ok()).unwrap_or(1);
            }
            "u" => {
                if let Some(n) = param {
                    self.unicode(n);
                    self.fallback_to_skip = self.state.uc;
                }
            }
            _ => {}
        }
    }

    fn unicode(&mut self, param: i32) {
        // Values above 32767 are written as negative numbers.
        let wide = i64::from(param);
        let code = u32::try_from(if wide < 0 { wide + 65536 } else { wide }).unwrap_or(0);

        match code {
            0xD800..=0xDBFF => self.pending_high_surrogate = Some(code),
            0xDC00..=0xDFFF => {
                if let Some(high) = self.pending_high_surrogate.take() {
                    let combined = 0x10000 + ((high - 0xD800) << 10) + (code - 0xDC00);
                    if let Some(ch) = char::from_u32(combined) {
                        self.emit(ch);
                    }
                }
            }
            _ => {
                if let Some(ch) = char::from_u32(code) {
                    self.emit(ch);
                }
            }
        }
    }

    /// Returns true if the current character is a `\uN` fallback to drop.
    fn consume_fallback(&mut self) -> bool {
        if self.fallback_to_skip > 0 {
            self.fallback_to_skip -= 1;
            true
        } else {
            false
        }
    }

    fn emit(&mut self, ch: char) {
        self.flush_bytes();
        if !self.state.skip {
            self.out.push(ch);
        }
    }

    fn flush_bytes(&mut self) {
        if self.pending_bytes.is_empty() {
            return;
        }
        let (text, _had_errors) = self
            .encoding
            .decode_without_bom_handling(&self.pending_bytes);
        self.out.push_str(&text);
        self.pending_bytes.clear();
    }
}

fn read_control_word(chars: &mut Peekable<Chars<'_>>) -> (String, Option<i32>) {
    let mut word = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_alphabetic() {
            break;
        }
        word.push(c);
        chars.next();
    }

    let mut digits = String::new();
    if chars.peek() == Some(&'-') {
        digits.push('-');
        chars.next();
    }
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }

    // A single space delimits the control word and is not part of the text.
    if chars.peek() == Some(&' ') {
        chars.next();
    }

    (word, digits.parse().ok())
}

fn encoding_for_codepage(codepage: i32) -> Option<&'static Encoding> {
    let label = match codepage {
        65001 => "utf-8".to_string(),
        10000 => "macintosh".to_string(),
        20866 => "koi8-r".to_string(),
        866 => "ibm866".to_string(),
        932 => "shift_jis".to_string(),
        936 => "gbk".to_string(),
        949 => "euc-kr".to_string(),
        950 => "big5".to_string(),
        other => format!("windows-{other}"),
    };
    Encoding::for_label(label.as_bytes())
}
