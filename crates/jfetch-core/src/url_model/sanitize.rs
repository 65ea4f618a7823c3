//! Keeps names taken from remote URLs inside their directory.

use crate::staging::TEMP_SUFFIX;

/// Longest name that still leaves room for the temp-file suffix under NAME_MAX.
const MAX_NAME_LEN: usize = 255 - TEMP_SUFFIX.len();

/// Replaces path separators and NUL with `_` and caps the length so that
/// `<name>.download` fits in one directory entry. Everything else, including
/// spaces and leading dots, is kept as the server sent it.
pub fn sanitize_filename(name: &str) -> String {
    let out: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();

    if out.len() <= MAX_NAME_LEN {
        return out;
    }
    let mut take = MAX_NAME_LEN;
    while !out.is_char_boundary(take) {
        take -= 1;
    }
    out[..take].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staging::temp_path;
    use std::path::Path;

    #[test]
    fn separators_are_replaced() {
        assert_eq!(sanitize_filename("a/b\\c.txt"), "a_b_c.txt");
        assert_eq!(sanitize_filename("file\0name.txt"), "file_name.txt");
    }

    #[test]
    fn spaces_and_dots_are_kept() {
        assert_eq!(sanitize_filename("Firefox Setup 120.exe"), "Firefox Setup 120.exe");
        assert_eq!(sanitize_filename(".hidden"), ".hidden");
        assert_eq!(sanitize_filename("a__b"), "a__b");
    }

    #[test]
    fn long_names_leave_room_for_temp_suffix() {
        let out = sanitize_filename(&"a".repeat(300));
        assert_eq!(out.len(), 255 - TEMP_SUFFIX.len());
        let temp = temp_path(Path::new(&out));
        assert_eq!(temp.as_os_str().len(), 255);
    }

    #[test]
    fn long_names_are_truncated_on_char_boundary() {
        let out = sanitize_filename(&"é".repeat(200));
        assert!(out.len() <= MAX_NAME_LEN);
        assert!(out.chars().all(|c| c == 'é'));
    }
}
