//! Lossless word/separator tokenization
//!
//! Word tokens are maximal runs of alphanumeric characters or underscores.
//! Separators are maximal runs of whitespace, or single punctuation
//! characters. Concatenating the token texts always yields the input.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn word(text: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Word,
            text: text.into(),
        }
    }

    pub fn separator(text: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Separator,
            text: text.into(),
        }
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Characters that make up a word token
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let mut end = start + c.len_utf8();
        if is_word_char(c) {
            while let Some(&(idx, next)) = chars.peek() {
                if !is_word_char(next) {
                    break;
                }
                end = idx + next.len_utf8();
                chars.next();
            }
            tokens.push(Token::word(&text[start..end]));
        } else if c.is_whitespace() {
            while let Some(&(idx, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end = idx + next.len_utf8();
                chars.next();
            }
            tokens.push(Token::separator(&text[start..end]));
        } else {
            tokens.push(Token::separator(&text[start..end]));
        }
    }

    tokens
}

pub fn reassemble(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_words_and_separators() {
        let tokens = tokenize("Hello, world!");
        assert_eq!(
            tokens,
            vec![
                Token::word("Hello"),
                Token::separator(","),
                Token::separator(" "),
                Token::word("world"),
                Token::separator("!"),
            ]
        );
    }

    #[test]
    fn test_tokenize_apostrophe_splits_word() {
        let tokens = tokenize("patient's");
        assert_eq!(
            tokens,
            vec![
                Token::word("patient"),
                Token::separator("'"),
                Token::word("s"),
            ]
        );
    }

    #[test]
    fn test_whitespace_runs_are_one_token() {
        let tokens = tokenize("a \n\t b");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], Token::separator(" \n\t "));
    }

    #[test]
    fn test_unicode_words() {
        let tokens = tokenize("naïve café");
        assert_eq!(tokens[0], Token::word("naïve"));
        assert_eq!(tokens[2], Token::word("café"));
    }

    #[test]
    fn test_reassemble_is_lossless() {
        let samples = [
            "",
            "   ",
            "The patient's doctor — improved (a lot)... really?!",
            "snake_case and x-ray, 2020 data.\n\nNext para",
        ];
        for sample in samples {
            assert_eq!(reassemble(&tokenize(sample)), sample);
        }
    }
}
