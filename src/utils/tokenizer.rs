/// Character classes that matter for token boundaries and case folding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    Upper,
    Lower,
    /// Alphanumeric without case (digits, CJK, ...)
    Caseless,
    /// Anything non-alphanumeric; the next character starts a token
    Separator,
}

pub fn classify_char(ch: char) -> CharType {
    if ch.is_uppercase() {
        CharType::Upper
    } else if ch.is_lowercase() {
        CharType::Lower
    } else if ch.is_alphanumeric() {
        CharType::Caseless
    } else {
        CharType::Separator
    }
}

/// True when the character following `prev` starts a new token
#[inline]
pub fn is_token_boundary(prev: char) -> bool {
    classify_char(prev) == CharType::Separator
}

/// Swap the case of a single character.
///
/// Characters whose case mapping expands to several characters (e.g. 'ß')
/// are returned unchanged, since a trie edge holds exactly one character.
pub fn flip_case(ch: char) -> char {
    match classify_char(ch) {
        CharType::Upper => single(ch.to_lowercase()).unwrap_or(ch),
        CharType::Lower => single(ch.to_uppercase()).unwrap_or(ch),
        CharType::Caseless | CharType::Separator => ch,
    }
}

fn single(mut mapped: impl Iterator<Item = char>) -> Option<char> {
    let first = mapped.next()?;
    match mapped.next() {
        None => Some(first),
        Some(_) => None,
    }
}

/// Character offsets (not byte offsets) where tokens start in `text`
pub fn token_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut prev: Option<char> = None;

    for (i, ch) in text.chars().enumerate() {
        if prev.is_none_or(is_token_boundary) {
            starts.push(i);
        }
        prev = Some(ch);
    }

    starts
}
