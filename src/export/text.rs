//! Plain-text export of the combined preview

/// UTF-8 byte buffer of the combined preview string, offered as a download.
pub fn text_to_bytes(preview: &str) -> Vec<u8> {
    preview.as_bytes().to_vec()
}
