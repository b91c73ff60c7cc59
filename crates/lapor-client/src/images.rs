use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::{ClientError, ClientResult};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Reads an image file and encodes it as a `data:<mime>;base64,<payload>`
/// URI, the form receipts and logos are stored in.
pub fn encode_file(path: &Path) -> ClientResult<String> {
    let display = path.display().to_string();
    let mime = mime_for_extension(path)
        .ok_or_else(|| ClientError::image_unreadable(&display, "unsupported file extension"))?;
    let bytes =
        fs::read(path).map_err(|error| ClientError::image_unreadable(&display, &error.to_string()))?;
    if bytes.is_empty() {
        return Err(ClientError::image_unreadable(&display, "file is empty"));
    }
    Ok(format!("data:{mime};base64,{}", BASE64.encode(&bytes)))
}

/// Splits a data URI into its mime type and decoded payload.
pub fn decode_data_uri(source: &str) -> Result<(String, Vec<u8>), String> {
    let rest = source
        .strip_prefix("data:")
        .ok_or_else(|| "missing `data:` prefix".to_string())?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| "missing payload separator".to_string())?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| "payload is not base64-encoded".to_string())?;
    if mime.is_empty() {
        return Err("missing mime type".to_string());
    }
    let bytes = BASE64
        .decode(payload)
        .map_err(|error| format!("invalid base64 payload: {error}"))?;
    Ok((mime.to_string(), bytes))
}

/// Splits a data URI without decoding, for handing the raw base64 body to a
/// transport that wants `{ mime_type, data }` parts.
pub fn split_data_uri(source: &str) -> Result<(String, String), String> {
    let (mime, _) = decode_data_uri(source)?;
    let payload = source
        .split_once(',')
        .map(|(_, body)| body.to_string())
        .unwrap_or_default();
    Ok((mime, payload))
}

/// Reads the pixel dimensions out of a PNG's IHDR chunk.
pub fn png_dimensions(bytes: &[u8]) -> Result<(u32, u32), String> {
    if bytes.len() < 24 {
        return Err("file is too short to be a PNG".to_string());
    }
    if bytes[..8] != PNG_SIGNATURE {
        return Err("missing PNG signature".to_string());
    }
    if &bytes[12..16] != b"IHDR" {
        return Err("first chunk is not IHDR".to_string());
    }
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    if width == 0 || height == 0 {
        return Err("image has a zero dimension".to_string());
    }
    Ok((width, height))
}

fn mime_for_extension(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes
    }

    #[test]
    fn data_uri_round_trips() {
        let uri = format!("data:image/png;base64,{}", BASE64.encode(b"abc"));
        let (mime, bytes) = decode_data_uri(&uri).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"abc");
    }

    #[test]
    fn decode_rejects_malformed_uris() {
        assert!(decode_data_uri("image/png;base64,AAAA").is_err());
        assert!(decode_data_uri("data:image/png,AAAA").is_err());
        assert!(decode_data_uri("data:image/png;base64,not-base64!!").is_err());
    }

    #[test]
    fn split_keeps_the_raw_payload() {
        let payload = BASE64.encode(b"receipt");
        let uri = format!("data:image/jpeg;base64,{payload}");
        let (mime, body) = split_data_uri(&uri).unwrap();
        assert_eq!(mime, "image/jpeg");
        assert_eq!(body, payload);
    }

    #[test]
    fn png_dimensions_read_ihdr() {
        let bytes = tiny_png(794, 2245);
        assert_eq!(png_dimensions(&bytes).unwrap(), (794, 2245));
    }

    #[test]
    fn png_dimensions_reject_non_png_bytes() {
        assert!(png_dimensions(b"JFIF").is_err());
        assert!(png_dimensions(&tiny_png(0, 10)).is_err());
    }
}
