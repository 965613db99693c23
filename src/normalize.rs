//! Normalization of raw Gemini output into the response contract.
//!
//! These functions are pure and never panic on provider output; anything
//! fallible returns a [`Result`] that the service layer converts into a
//! failure envelope.

use crate::error::{AiError, Result};
use crate::models::gemini::Part;
use crate::models::response::{GeneratedImage, PromptAnalysis};

/// Decoded byte size implied by a base64 string of length `base64_len`.
pub fn estimated_file_size(base64_len: usize) -> usize {
    (base64_len * 3).div_ceil(4)
}

fn list_marker_len(line: &str) -> Option<usize> {
    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits > 0 && line.as_bytes().get(digits) == Some(&b'.') {
        Some(digits + 1)
    } else {
        None
    }
}

/// Extracts up to `count` suggestions from a numbered-list response. Lines
/// without a leading `<integer>.` marker are ignored; if fewer than `count`
/// lines match, fewer are returned.
pub fn parse_suggestions(raw: &str, count: usize) -> Vec<String> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            list_marker_len(line).map(|marker| line[marker..].trim().to_string())
        })
        .take(count)
        .collect()
}

/// Strict parse of the analysis JSON. Malformed provider output is a hard
/// failure; there is no best-effort repair.
pub fn parse_analysis(raw: &str) -> Result<PromptAnalysis> {
    serde_json::from_str(raw.trim())
        .map_err(|e| AiError::ResponseError(format!("Malformed analysis response: {}", e)))
}

fn extension_for(format: &str) -> &'static str {
    if format == "jpeg" {
        "jpg"
    } else {
        "png"
    }
}

/// Converts the provider's inline-data parts into image artifacts. Parts
/// whose MIME type is not `image/*` are dropped; format, size and file name
/// are derived when the provider does not declare them.
pub fn collect_images(parts: &[Part]) -> Vec<GeneratedImage> {
    parts
        .iter()
        .filter_map(|part| part.inline_data.as_ref())
        .filter(|inline| inline.mime_type.starts_with("image/"))
        .map(|inline| {
            let format = if inline.mime_type.contains("jpeg") {
                "jpeg"
            } else {
                "png"
            };
            GeneratedImage {
                data: inline.data.clone(),
                format: format.to_string(),
                mime_type: inline.mime_type.clone(),
                file_size: estimated_file_size(inline.data.len()),
                file_name: format!("generated_image.{}", extension_for(format)),
            }
        })
        .collect()
}

/// Concatenated text parts, trimmed; `None` when the candidate produced no
/// text.
pub fn collect_text(parts: &[Part]) -> Option<String> {
    let text: String = parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect::<Vec<_>>()
        .join("");
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gemini::Part;

    #[test]
    fn test_parse_suggestions_skips_unnumbered_lines() {
        let raw = "1. A\n2. B\nnotanumber\n3. C";
        assert_eq!(parse_suggestions(raw, 2), vec!["A", "B"]);
        assert_eq!(parse_suggestions(raw, 10), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parse_suggestions_strips_markers_and_whitespace() {
        let raw = "1.   A misty forest at dawn  \n12. Wide-angle city skyline";
        assert_eq!(
            parse_suggestions(raw, 3),
            vec!["A misty forest at dawn", "Wide-angle city skyline"]
        );
    }

    #[test]
    fn test_parse_suggestions_never_pads() {
        assert!(parse_suggestions("no list here", 3).is_empty());
        assert_eq!(parse_suggestions("1. only one", 3).len(), 1);
    }

    #[test]
    fn test_parse_analysis_round_trip() {
        let raw = r#"{"analysis": "solid", "improvements": ["add lighting"], "score": 7}"#;
        let analysis = parse_analysis(raw).unwrap();
        assert_eq!(analysis.score, 7);
        assert_eq!(analysis.improvements.len(), 1);
    }

    #[test]
    fn test_parse_analysis_rejects_malformed_output() {
        assert!(parse_analysis("Sure! Here is the JSON you asked for").is_err());
        assert!(parse_analysis(r#"{"analysis": "x"}"#).is_err());
    }

    #[test]
    fn test_collect_images_filters_non_image_parts() {
        let parts = vec![
            Part::inline_image("image/jpeg", "aGVsbG8="),
            Part::inline_image("text/plain", "bm9wZQ=="),
            Part::text("caption"),
        ];
        let images = collect_images(&parts);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].format, "jpeg");
        assert_eq!(images[0].file_name, "generated_image.jpg");
    }

    #[test]
    fn test_collect_images_defaults_to_png() {
        let parts = vec![Part::inline_image("image/webp", "aGVsbG8=")];
        let images = collect_images(&parts);
        assert_eq!(images[0].format, "png");
        assert_eq!(images[0].file_name, "generated_image.png");
    }

    #[test]
    fn test_estimated_file_size_matches_ceiling_rule() {
        for len in [0usize, 1, 2, 3, 4, 7, 8, 100, 1001] {
            let expected = (len * 3 + 3) / 4;
            assert_eq!(estimated_file_size(len), expected);
        }
        // 8 base64 chars decode to at most 6 bytes.
        assert_eq!(estimated_file_size(8), 6);
    }

    #[test]
    fn test_file_size_derived_from_data_length() {
        let data = "aGVsbG8=";
        let parts = vec![Part::inline_image("image/png", data)];
        let images = collect_images(&parts);
        assert_eq!(images[0].file_size, estimated_file_size(data.len()));
    }

    #[test]
    fn test_collect_text_joins_and_trims() {
        let parts = vec![Part::text("  a sleek "), Part::text("sports car\n")];
        assert_eq!(collect_text(&parts).as_deref(), Some("a sleek sports car"));
        assert!(collect_text(&[Part::inline_image("image/png", "aGk=")]).is_none());
        assert!(collect_text(&[Part::text("   ")]).is_none());
    }
}
