//! Client-side file and form checks. Pure functions: a rejection is a
//! message for the UI, never a request.

use thiserror::Error;

pub const MAX_PDF_BYTES: u64 = 20 * 1024 * 1024;
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(msg: &str) -> Self {
        Self(msg.to_string())
    }
}

/// Accept a candidate 족보 file iff its name ends in a case-insensitive
/// `.pdf`, its declared media type is PDF or unspecified, and it is at
/// most 20 MB. A zero-byte PDF passes.
pub fn validate_pdf(
    file_name: &str,
    content_type: Option<&str>,
    size: u64,
) -> Result<(), ValidationError> {
    let name_ok = file_name.to_lowercase().ends_with(".pdf");
    let type_ok = content_type.is_none_or(|t| t == PDF_CONTENT_TYPE);
    if !name_ok || !type_ok {
        return Err(ValidationError::new("PDF 파일만 업로드할 수 있어요."));
    }
    if size > MAX_PDF_BYTES {
        return Err(ValidationError::new(
            "파일은 최대 20MB까지 업로드할 수 있어요.",
        ));
    }
    Ok(())
}

/// Profile images: any `image/*` type, at most 5 MB.
pub fn validate_image(content_type: Option<&str>, size: u64) -> Result<(), ValidationError> {
    if !content_type.is_some_and(|t| t.starts_with("image/")) {
        return Err(ValidationError::new("이미지 파일만 업로드 가능합니다."));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ValidationError::new("이미지 크기는 5MB 이하여야 합니다."));
    }
    Ok(())
}

/// Trim a required form field; empty after trimming is a rejection with
/// the given message.
pub fn require_field<'a>(value: &'a str, message: &str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::new(message))
    } else {
        Ok(trimmed)
    }
}

/// Length-bounded form field, trimmed first. The label is interpolated
/// into the rejection message, so it must read naturally before `은`.
pub fn validate_bounded<'a>(
    value: &'a str,
    label: &str,
    min: usize,
    max: usize,
) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if !(min..=max).contains(&len) {
        return Err(ValidationError(format!(
            "{}은 {}자 이상 {}자 이하로 입력해 주세요.",
            label, min, max
        )));
    }
    Ok(trimmed)
}

/// Nickname rule from profile setup: 3..=10 characters.
pub fn validate_nickname(nickname: &str) -> Result<&str, ValidationError> {
    let trimmed = require_field(nickname, "닉네임을 입력해주세요.")?;
    let len = trimmed.chars().count();
    if !(3..=10).contains(&len) {
        return Err(ValidationError::new(
            "닉네임은 3자 이상 10자 이하로 입력해주세요.",
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_byte_pdf_is_accepted() {
        assert!(validate_pdf("a.pdf", None, 0).is_ok());
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(validate_pdf("NOTES.PDF", Some(PDF_CONTENT_TYPE), 1024).is_ok());
        assert!(validate_pdf("Notes.Pdf", None, 1024).is_ok());
    }

    #[test]
    fn wrong_name_or_type_names_the_type_constraint() {
        let err = validate_pdf("notes.docx", None, 1024).unwrap_err();
        assert_eq!(err.0, "PDF 파일만 업로드할 수 있어요.");
        let err = validate_pdf("notes.pdf", Some("application/msword"), 1024).unwrap_err();
        assert_eq!(err.0, "PDF 파일만 업로드할 수 있어요.");
    }

    #[test]
    fn oversized_pdf_names_the_size_constraint() {
        let err = validate_pdf("notes.pdf", Some(PDF_CONTENT_TYPE), 25 * 1024 * 1024).unwrap_err();
        assert_eq!(err.0, "파일은 최대 20MB까지 업로드할 수 있어요.");
        // exactly at the ceiling is fine
        assert!(validate_pdf("notes.pdf", None, MAX_PDF_BYTES).is_ok());
    }

    #[test]
    fn image_requires_image_type_and_5mb_ceiling() {
        assert!(validate_image(Some("image/png"), 1024).is_ok());
        assert!(validate_image(None, 1024).is_err());
        assert!(validate_image(Some("application/pdf"), 1024).is_err());
        let err = validate_image(Some("image/jpeg"), 6 * 1024 * 1024).unwrap_err();
        assert_eq!(err.0, "이미지 크기는 5MB 이하여야 합니다.");
    }

    #[test]
    fn required_fields_are_trimmed() {
        assert_eq!(require_field("  자료구조 ", "과목명을 입력해 주세요.").unwrap(), "자료구조");
        assert!(require_field("   ", "과목명을 입력해 주세요.").is_err());
    }

    #[test]
    fn bounded_field_counts_characters_not_bytes() {
        assert_eq!(validate_bounded(" 자료구조 기출 ", "제목", 3, 100).unwrap(), "자료구조 기출");
        let err = validate_bounded("ab", "제목", 3, 100).unwrap_err();
        assert_eq!(err.0, "제목은 3자 이상 100자 이하로 입력해 주세요.");
        assert!(validate_bounded(&"가".repeat(21), "교수명", 2, 20).is_err());
        assert!(validate_bounded(&"가".repeat(20), "교수명", 2, 20).is_ok());
    }

    #[test]
    fn nickname_length_bounds() {
        assert!(validate_nickname("솜솜이").is_ok());
        assert!(validate_nickname("ab").is_err());
        assert!(validate_nickname("abcdefghijk").is_err());
    }
}
