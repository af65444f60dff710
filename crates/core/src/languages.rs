//! Language lookup for the multi-language collection.
//!
//! Sections on the multi-language page are named after languages in
//! English ("French", "isiZulu", ...). This table maps those names to
//! platform language codes and native display names. Names without an
//! entry (or without an assigned code, like Tetun) fall back to the
//! section name verbatim and carry no code.

/// A known language: platform code plus native display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Platform language code (e.g. `fr`, `zh-CN`).
    pub code: &'static str,
    /// Name of the language in the language itself.
    pub native_name: &'static str,
}

/// Section name → language table for the multi-language collection.
const LANGUAGES: &[(&str, Language)] = &[
    ("Afrikaans", Language { code: "af", native_name: "Afrikaans" }),
    ("Arabic", Language { code: "ar", native_name: "العربية" }),
    ("English", Language { code: "en", native_name: "English" }),
    ("French", Language { code: "fr", native_name: "Français" }),
    ("Hindi", Language { code: "hi", native_name: "हिन्दी" }),
    ("isiXhosa", Language { code: "xh", native_name: "isiXhosa" }),
    ("isiZulu", Language { code: "zul", native_name: "isiZulu" }),
    ("Kiswahili", Language { code: "sw", native_name: "Kiswahili" }),
    ("Mandarin Chinese - simple", Language { code: "zh-CN", native_name: "简体中文" }),
    ("Mandarin Chinese - Traditional", Language { code: "zh-Hant", native_name: "繁體中文" }),
    ("Portuguese", Language { code: "pt", native_name: "Português" }),
    ("Setswana", Language { code: "tn", native_name: "Setswana" }),
    ("Spanish", Language { code: "es", native_name: "Español" }),
];

impl Language {
    /// Looks up a language by its English section name.
    ///
    /// Returns `None` for names the platform has no code for.
    pub fn lookup(name: &str) -> Option<Language> {
        LANGUAGES.iter().find(|(n, _)| *n == name).map(|(_, lang)| *lang)
    }
}

/// Display title for a language section: the native name when the
/// language is known, the section name verbatim otherwise.
pub fn display_title(section_name: &str) -> String {
    match Language::lookup(section_name) {
        Some(lang) => lang.native_name.to_string(),
        None => section_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("French", "fr", "Français")]
    #[case("isiZulu", "zul", "isiZulu")]
    #[case("Mandarin Chinese - simple", "zh-CN", "简体中文")]
    #[case("Mandarin Chinese - Traditional", "zh-Hant", "繁體中文")]
    #[case("Spanish", "es", "Español")]
    fn test_lookup(#[case] name: &str, #[case] code: &str, #[case] native: &str) {
        let lang = Language::lookup(name).unwrap();
        assert_eq!(lang.code, code);
        assert_eq!(lang.native_name, native);
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(Language::lookup("Tetun").is_none());
        assert!(Language::lookup("Klingon").is_none());
    }

    #[test]
    fn test_display_title_known() {
        assert_eq!(display_title("Arabic"), "العربية");
        assert_eq!(display_title("Hindi"), "हिन्दी");
    }

    #[test]
    fn test_display_title_fallback() {
        // No platform code for Tetun; the section name stands in.
        assert_eq!(display_title("Tetun"), "Tetun");
    }
}
