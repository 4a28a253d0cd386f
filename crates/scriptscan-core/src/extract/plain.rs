use encoding_rs::WINDOWS_1251;

/// Decode a plain-text upload: UTF-8 first, Windows-1251 otherwise.
///
/// Bytes that have no Windows-1251 mapping are dropped.
pub(super) fn decode(content: &[u8]) -> String {
    match std::str::from_utf8(content) {
        Ok(text) => text.to_string(),
        Err(_) => decode_cp1251(content),
    }
}

pub(super) fn decode_cp1251(content: &[u8]) -> String {
    let (text, _had_errors) = WINDOWS_1251.decode_without_bom_handling(content);
    text.chars().filter(|&c| c != char::REPLACEMENT_CHARACTER).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_is_decoded_directly() {
        assert_eq!(decode("Сцена".as_bytes()), "Сцена");
    }

    #[test]
    fn falls_back_to_cp1251() {
        // "Сцена" in Windows-1251
        let bytes = [0xD1, 0xF6, 0xE5, 0xED, 0xE0];
        assert_eq!(decode(&bytes), "Сцена");
    }
}
