//! Text normalization for user-facing search filters.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Lowercases `text`, decomposes it (NFD) and drops combining marks
/// (`"Núñez"` -> `"nunez"`).
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case and accent insensitive substring match.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize(haystack).contains(&normalize(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize("PALERMO"), "palermo");
    }

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("Núñez"), "nunez");
        assert_eq!(normalize("Villa Crespo, Córdoba"), "villa crespo, cordoba");
        assert_eq!(normalize("ÁÉÍÓÚ"), "aeiou");
    }

    #[test]
    fn test_normalize_decomposed_input() {
        // "Núñez" as sent by clients that emit combining sequences.
        let decomposed = "Nu\u{301}n\u{303}ez";
        assert_eq!(normalize(decomposed), "nunez");
        assert!(contains_normalized(decomposed, "nunez"));
        assert!(contains_normalized("Núñez", decomposed));
    }

    #[test]
    fn test_normalize_accents_outside_latin1() {
        assert_eq!(normalize("Łódź"), "łodz");
        assert_eq!(normalize("Şişli"), "sisli");
        assert!(contains_normalized("Kraków", "krakow"));
    }

    #[test]
    fn test_normalize_keeps_plain_text() {
        assert_eq!(normalize("caballito 123"), "caballito 123");
    }

    #[test]
    fn test_contains_normalized() {
        assert!(contains_normalized("San Martín, Buenos Aires", "martin"));
        assert!(contains_normalized("Belgrano", "BELG"));
        assert!(contains_normalized("Nunez", "núñez"));
        assert!(!contains_normalized("Recoleta", "palermo"));
    }

    #[test]
    fn test_contains_empty_needle() {
        assert!(contains_normalized("anything", ""));
    }
}
