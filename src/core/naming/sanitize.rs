//! Filesystem-safe folder and file names
//!
//! Names come straight from database columns and can contain anything.
//! Every reserved character is replaced by `_` rather than dropped, so two
//! different titles stay distinguishable after sanitization.

/// Characters that are invalid in path segments on common filesystems.
const INVALID_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Replacement for every reserved character.
const REPLACEMENT: char = '_';

/// Folder name used when the source value is blank.
const FALLBACK_FOLDER: &str = "Unknown";

/// Maximum folder name length, in characters.
pub const MAX_FOLDER_NAME_LENGTH: usize = 100;

/// Whether `c` may not appear in a sanitized name
pub fn is_reserved(c: char) -> bool {
    (c as u32) < 0x20 || INVALID_CHARS.contains(&c)
}

/// Sanitizes one folder segment.
///
/// Blank input becomes `"Unknown"`. Otherwise the value is trimmed, reserved
/// characters are replaced, the result is cut to
/// [`MAX_FOLDER_NAME_LENGTH`] characters and trailing whitespace left by the
/// cut is removed. A result made only of dots has them replaced as well.
pub fn sanitize_folder_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FALLBACK_FOLDER.to_string();
    }

    let replaced = replace_reserved(trimmed);
    let truncated: String = replaced.chars().take(MAX_FOLDER_NAME_LENGTH).collect();
    replace_dot_segment(truncated.trim_end().to_string())
}

/// Sanitizes a file name.
///
/// Only character replacement happens: the output has exactly as many
/// characters as the input.
pub fn sanitize_file_name(raw: &str) -> String {
    replace_dot_segment(replace_reserved(raw))
}

fn replace_reserved(s: &str) -> String {
    s.chars()
        .map(|c| if is_reserved(c) { REPLACEMENT } else { c })
        .collect()
}

// Must run on the final value: "." and ".." address the current or parent directory
fn replace_dot_segment(s: String) -> String {
    if !s.is_empty() && s.chars().all(|c| c == '.') {
        return REPLACEMENT.to_string().repeat(s.chars().count());
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("" ; "empty")]
    #[test_case("   " ; "spaces")]
    #[test_case("\t\n" ; "control whitespace")]
    fn test_blank_folder_becomes_unknown(raw: &str) {
        assert_eq!(sanitize_folder_name(raw), "Unknown");
    }

    #[test_case("Finance/Ops", "Finance_Ops")]
    #[test_case("  Risk: Fraud?  ", "Risk_ Fraud_")]
    #[test_case("a<b>c|d\"e*f\\g", "a_b_c_d_e_f_g")]
    #[test_case("line\u{1}break", "line_break")]
    #[test_case("Operational Risk", "Operational Risk")]
    fn test_folder_replacements(raw: &str, expected: &str) {
        assert_eq!(sanitize_folder_name(raw), expected);
    }

    #[test]
    fn test_folder_truncated_to_limit() {
        let raw = "x".repeat(250);
        let out = sanitize_folder_name(&raw);
        assert_eq!(out.chars().count(), MAX_FOLDER_NAME_LENGTH);
    }

    #[test]
    fn test_folder_truncation_counts_characters_not_bytes() {
        let raw = "é".repeat(150);
        let out = sanitize_folder_name(&raw);
        assert_eq!(out.chars().count(), MAX_FOLDER_NAME_LENGTH);
    }

    #[test]
    fn test_folder_trailing_space_after_cut_removed() {
        let mut raw = "a".repeat(99);
        raw.push_str("   tail");
        let out = sanitize_folder_name(&raw);
        assert_eq!(out, "a".repeat(99));
    }

    #[test_case(".", "_")]
    #[test_case("..", "__")]
    fn test_dot_only_names(raw: &str, expected: &str) {
        assert_eq!(sanitize_folder_name(raw), expected);
        assert_eq!(sanitize_file_name(raw), expected);
    }

    #[test_case(&format!("..{}x", " ".repeat(98)), "__" ; "dots left by the cut")]
    #[test_case(&format!(".{}tail", " ".repeat(120)), "_" ; "single dot left by the cut")]
    #[test_case(&format!("...{}", "\u{3000}".repeat(2)), "___" ; "dots before unicode space")]
    fn test_folder_never_becomes_dot_segment(raw: &str, expected: &str) {
        assert_eq!(sanitize_folder_name(raw), expected);
    }

    #[test]
    fn test_file_name_keeps_length() {
        let raw = "Q3 report: draft/v2?.pdf";
        let out = sanitize_file_name(raw);
        assert_eq!(out, "Q3 report_ draft_v2_.pdf");
        assert_eq!(out.chars().count(), raw.chars().count());
    }

    #[test]
    fn test_file_name_not_truncated() {
        let raw = format!("{}.pdf", "n".repeat(300));
        assert_eq!(sanitize_file_name(&raw), raw);
    }

    #[test]
    fn test_dots_inside_names_kept() {
        assert_eq!(sanitize_file_name("v1.2.final.docx"), "v1.2.final.docx");
        assert_eq!(sanitize_folder_name("..hidden"), "..hidden");
    }

    #[test]
    fn test_is_reserved() {
        assert!(is_reserved('\0'));
        assert!(is_reserved('\u{1f}'));
        assert!(is_reserved(':'));
        assert!(!is_reserved(' '));
        assert!(!is_reserved('\u{7f}'));
        assert!(!is_reserved('é'));
    }
}
