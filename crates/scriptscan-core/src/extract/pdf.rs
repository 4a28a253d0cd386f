use super::error::ExtractError;

pub(super) fn extract(content: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed inputs.
    let raw = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(content))
        .map_err(|_| ExtractError::Pdf("parser aborted on malformed document".to_string()))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    Ok(flatten(&raw))
}

/// Join hyphenated line breaks and flatten the page text into one line.
fn flatten(raw: &str) -> String {
    let text = raw
        .replace("-\n", "")
        .replace('\n', " ")
        .replace('\u{00A0}', " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
