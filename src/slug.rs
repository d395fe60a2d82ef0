//! Title → URL slug.

/// Converts an article title into its URL slug.
///
/// Lowercase ASCII words joined by single `-`, with accented and non-Latin
/// characters transliterated and everything else dropped. The result never
/// starts or ends with `-` and is empty when the title has no letters or
/// digits at all. Pure and deterministic; uniqueness is the store's concern.
pub fn slugify(title: &str) -> String {
    ::slug::slugify(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_words_with_single_dashes() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
        assert_eq!(slugify("Rust 2024 -- Released!"), "rust-2024-released");
    }

    #[test]
    fn transliterates_diacritics() {
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
        assert_eq!(slugify("Ångström Über"), "angstrom-uber");
    }

    #[test]
    fn symbols_only_title_has_empty_slug() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn output_is_lowercase_without_whitespace() {
        for title in ["Hello World", "TABS\tAND\nNEWLINES", "Ünïcödé Tïtle", "a_b.c"] {
            let slug = slugify(title);
            assert_eq!(slug, slugify(title));
            assert!(!slug.chars().any(char::is_whitespace), "{slug:?}");
            assert!(!slug.chars().any(|c| c.is_ascii_uppercase()), "{slug:?}");
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{slug:?}");
            assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }
}
