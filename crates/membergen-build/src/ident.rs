use crate::RenderError;
use convert_case::{Case, Casing};
use proc_macro2::{Ident, Span};
use std::{collections::HashSet, sync::LazyLock};

///
/// RESERVED_WORDS
/// rust keywords, strict and reserved, that need the raw form
///

static RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut words = Vec::new();

    // strict
    words.extend(vec![
        "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
        "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
        "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use",
        "where", "while",
    ]);

    // reserved
    words.extend(vec![
        "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv", "try",
        "typeof", "unsized", "virtual", "yield",
    ]);

    words.into_iter().collect()
});

// keywords with no raw form
const NEVER_RAW: [&str; 5] = ["_", "Self", "crate", "self", "super"];

#[must_use]
pub fn is_reserved_word(word: &str) -> bool {
    RESERVED_WORDS.contains(word)
}

/// Identifier for a host name; keywords come back in raw form.
pub fn ident(name: &str) -> Result<Ident, RenderError> {
    if NEVER_RAW.contains(&name) {
        return Err(RenderError::InvalidIdent(name.to_string()));
    }
    if is_reserved_word(name) {
        return Ok(Ident::new_raw(name, Span::call_site()));
    }

    syn::parse_str::<Ident>(name).map_err(|_| RenderError::InvalidIdent(name.to_string()))
}

/// Snake-cased identifier, used for functions, modules and bindings.
pub fn snake_ident(name: &str) -> Result<Ident, RenderError> {
    ident(&name.to_case(Case::Snake))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(ident("name").unwrap().to_string(), "name");
        assert_eq!(snake_ident("hashCode").unwrap().to_string(), "hash_code");
        assert_eq!(snake_ident("Person").unwrap().to_string(), "person");
    }

    #[test]
    fn keywords_render_raw() {
        assert!(is_reserved_word("type"));
        assert_eq!(ident("type").unwrap().to_string(), "r#type");
        assert_eq!(snake_ident("Match").unwrap().to_string(), "r#match");
    }

    #[test]
    fn malformed_names_are_rejected() {
        for bad in ["", "1abc", "a-b", "a b", "self", "Self", "_"] {
            assert!(
                matches!(ident(bad), Err(RenderError::InvalidIdent(_))),
                "'{bad}' should be rejected"
            );
        }
    }
}
