//! DOCX text extraction.
//!
//! Reads `word/document.xml` and rebuilds paragraphs from their runs.
//! Body paragraphs come first, then paragraphs found inside tables, each
//! group in document order.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;

use super::error::ExtractError;
use crate::text::collapse_runs;

const DOCUMENT_PART: &str = "word/document.xml";

/// Letter-spaced scene headings that Word keeps as separate characters.
const SPACED_HEADINGS: [&str; 2] = ["С  Ц  Е  Н  А", "С Ц Е Н А"];

pub(super) fn extract(content: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(content))?;
    let mut part = archive.by_name(DOCUMENT_PART)?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractError::Archive(e.to_string()))?;

    let paragraphs = read_paragraphs(&xml)?;

    let lines: Vec<String> = paragraphs
        .body
        .iter()
        .chain(paragraphs.tables.iter())
        .filter_map(|p| clean_paragraph(p))
        .collect();

    Ok(finish(&lines.join("\n")))
}

#[derive(Debug, Default)]
struct Paragraphs {
    body: Vec<String>,
    tables: Vec<String>,
}

struct OpenParagraph {
    text: String,
    in_table: bool,
}

fn read_paragraphs(xml: &str) -> Result<Paragraphs, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut out = Paragraphs::default();

    // Text boxes nest paragraphs inside runs, hence a stack.
    let mut open: Vec<OpenParagraph> = Vec::new();
    let mut table_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        let event = reader.read_event()?;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:p" => open.push(OpenParagraph {
                    text: String::new(),
                    in_table: table_depth > 0,
                }),
                b"w:r" => run_depth += 1,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:p" => {
                    if let Some(p) = open.pop() {
                        if p.in_table {
                            out.tables.push(p.text);
                        } else {
                            out.body.push(p.text);
                        }
                    }
                }
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) => {
                let name = e.name();
                if run_depth > 0 {
                    if let Some(p) = open.last_mut() {
                        match name.as_ref() {
                            b"w:tab" => p.text.push('\t'),
                            b"w:br" | b"w:cr" => p.text.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            Event::Text(t) if in_text => {
                let text = t.unescape()?;
                if let Some(p) = open.last_mut() {
                    p.text.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

fn clean_paragraph(raw: &str) -> Option<String> {
    let mut line = raw.replace('\u{00A0}', " ").trim().to_string();
    for spaced in SPACED_HEADINGS {
        line = line.replace(spaced, "СЦЕНА");
    }
    (!line.is_empty()).then_some(line)
}

fn finish(text: &str) -> String {
    let text = text.replace('\u{00A0}', " ").replace('\u{2028}', "\n");
    let text = collapse_runs(&text, '\n', 1);
    let text = collapse_runs(&text, ' ', 1);
    text.trim().to_string()
}
