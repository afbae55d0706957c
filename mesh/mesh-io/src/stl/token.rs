//! Lexer for STL ASCII text.
//!
//! The text is split on whitespace runs. The three fields that follow every
//! `normal` and `vertex` keyword are converted to `f32` on the spot; no
//! content sniffing happens anywhere else, so a misspelled coordinate fails
//! with [`IoError::MalformedNumber`] instead of turning into a name token.

use std::fmt;

use crate::error::{IoError, IoResult};

/// Number of coordinates following a `normal` or `vertex` keyword.
pub const COORDS_PER_RECORD: usize = 3;

/// Reserved STL ASCII keywords. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `solid`
    Solid,
    /// `facet`
    Facet,
    /// `normal`
    Normal,
    /// `outer`
    Outer,
    /// `loop`
    Loop,
    /// `vertex`
    Vertex,
    /// `endloop`
    EndLoop,
    /// `endfacet`
    EndFacet,
    /// `endsolid`
    EndSolid,
}

impl Keyword {
    /// Look up a keyword by its exact spelling.
    #[must_use]
    pub fn from_field(field: &str) -> Option<Self> {
        Some(match field {
            "solid" => Self::Solid,
            "facet" => Self::Facet,
            "normal" => Self::Normal,
            "outer" => Self::Outer,
            "loop" => Self::Loop,
            "vertex" => Self::Vertex,
            "endloop" => Self::EndLoop,
            "endfacet" => Self::EndFacet,
            "endsolid" => Self::EndSolid,
            _ => return None,
        })
    }

    /// The keyword as it appears in STL text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Facet => "facet",
            Self::Normal => "normal",
            Self::Outer => "outer",
            Self::Loop => "loop",
            Self::Vertex => "vertex",
            Self::EndLoop => "endloop",
            Self::EndFacet => "endfacet",
            Self::EndSolid => "endsolid",
        }
    }

    /// Whether the keyword introduces three coordinates.
    #[must_use]
    pub const fn takes_coordinates(self) -> bool {
        matches!(self, Self::Normal | Self::Vertex)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lexed STL ASCII token.
///
/// `Word` holds anything that is neither a keyword nor a coordinate, which
/// in well-formed input is only the solid name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    /// A reserved keyword.
    Keyword(Keyword),
    /// A coordinate following `normal` or `vertex`.
    Number(f32),
    /// Any other field, borrowed from the source text.
    Word(&'a str),
}

impl Token<'_> {
    /// Whether this token is the given keyword.
    #[inline]
    #[must_use]
    pub fn is(&self, keyword: Keyword) -> bool {
        matches!(self, Token::Keyword(k) if *k == keyword)
    }

    /// The numeric value, if this is a number token.
    #[inline]
    #[must_use]
    pub const fn as_number(&self) -> Option<f32> {
        match self {
            Token::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// Whitespace-delimited fields with their byte offsets.
struct Fields<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Fields<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let start = self.pos + rest.find(|c: char| !c.is_whitespace())?;
        let len = self.text[start..]
            .find(char::is_whitespace)
            .unwrap_or(self.text.len() - start);
        self.pos = start + len;
        Some((start, &self.text[start..start + len]))
    }
}

/// Lex STL ASCII text into a flat token sequence.
///
/// # Errors
///
/// - [`IoError::EmptyInput`] if the text holds no fields at all
/// - [`IoError::TruncatedRecord`] if a `normal`/`vertex` keyword is followed
///   by fewer than three fields
/// - [`IoError::MalformedNumber`] if one of those fields is not a float
///
/// # Example
///
/// ```
/// use mesh_io::stl::{tokenize, Keyword, Token};
///
/// let tokens = tokenize("solid s facet normal 0 0 1").unwrap();
/// assert_eq!(tokens[0], Token::Keyword(Keyword::Solid));
/// assert_eq!(tokens[1], Token::Word("s"));
/// assert_eq!(tokens[6], Token::Number(1.0));
/// ```
pub fn tokenize(text: &str) -> IoResult<Vec<Token<'_>>> {
    let mut fields = Fields::new(text);
    // A facet is ~21 fields of ~10 bytes on average
    let mut tokens = Vec::with_capacity(text.len() / 10);

    while let Some((_, field)) = fields.next() {
        let Some(keyword) = Keyword::from_field(field) else {
            tokens.push(Token::Word(field));
            continue;
        };

        let keyword_index = tokens.len();
        tokens.push(Token::Keyword(keyword));
        if !keyword.takes_coordinates() {
            continue;
        }

        for found in 0..COORDS_PER_RECORD {
            let Some((offset, number)) = fields.next() else {
                return Err(IoError::TruncatedRecord {
                    token_index: keyword_index,
                    expected: COORDS_PER_RECORD,
                    found,
                });
            };
            let value = number
                .parse::<f32>()
                .map_err(|_| IoError::MalformedNumber {
                    token_index: tokens.len(),
                    offset,
                    text: number.to_string(),
                })?;
            tokens.push(Token::Number(value));
        }
    }

    if tokens.is_empty() {
        return Err(IoError::EmptyInput);
    }

    tracing::trace!(tokens = tokens.len(), bytes = text.len(), "tokenized STL text");
    Ok(tokens)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const SQUARE: &str = "solid square
  facet normal 0.0 0.0 1.0
    outer loop
      vertex 0.0 0.0 0.0
      vertex 1.0 0.0 0.0
      vertex 0.0 1.0 0.0
    endloop
  endfacet
  facet normal 0.0 0.0 1.0
    outer loop
      vertex 1.0 1.0 0.0
      vertex 0.0 1.0 0.0
      vertex 1.0 0.0 0.0
    endloop
  endfacet
endsolid square
";

    #[test]
    fn square_token_stream() {
        let tokens = tokenize(SQUARE).unwrap();
        assert_eq!(tokens.len(), 46);
        assert_eq!(tokens[0], Token::Keyword(Keyword::Solid));
        assert_eq!(tokens[1], Token::Word("square"));
        assert_eq!(tokens[2], Token::Keyword(Keyword::Facet));
        assert_eq!(tokens[3], Token::Keyword(Keyword::Normal));
        assert_eq!(&tokens[4..7], &[Token::Number(0.0), Token::Number(0.0), Token::Number(1.0)]);
        assert_eq!(tokens[7], Token::Keyword(Keyword::Outer));
        assert_eq!(tokens[8], Token::Keyword(Keyword::Loop));
        assert_eq!(tokens[44], Token::Keyword(Keyword::EndSolid));
        assert_eq!(tokens[45], Token::Word("square"));
    }

    #[test]
    fn tabs_and_crlf_are_separators() {
        let tokens = tokenize("solid\tx\r\nfacet normal\t1e-3 -2 +3.5\r\nendsolid x").unwrap();
        assert_eq!(tokens[1], Token::Word("x"));
        assert_eq!(tokens[4].as_number(), Some(1e-3));
        assert_eq!(tokens[5].as_number(), Some(-2.0));
        assert_eq!(tokens[6].as_number(), Some(3.5));
        assert!(tokens[7].is(Keyword::EndSolid));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(tokenize(""), Err(IoError::EmptyInput)));
        assert!(matches!(tokenize(" \n\t "), Err(IoError::EmptyInput)));
    }

    #[test]
    fn malformed_number_reports_location() {
        let text = "solid s facet normal 0 zero 1";
        match tokenize(text) {
            Err(IoError::MalformedNumber {
                token_index,
                offset,
                text: field,
            }) => {
                assert_eq!(token_index, 5);
                assert_eq!(offset, text.find("zero").unwrap());
                assert_eq!(field, "zero");
            }
            other => panic!("expected MalformedNumber, got {other:?}"),
        }
    }

    #[test]
    fn keyword_in_coordinate_position_is_malformed() {
        let err = tokenize("facet normal 0 0 outer loop").unwrap_err();
        assert!(matches!(err, IoError::MalformedNumber { ref text, .. } if text == "outer"));
    }

    #[test]
    fn truncated_record() {
        let err = tokenize("solid s facet normal 0 0 1 outer loop vertex 1 2").unwrap_err();
        match err {
            IoError::TruncatedRecord {
                token_index,
                expected,
                found,
            } => {
                assert_eq!(token_index, 9);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected TruncatedRecord, got {other:?}"),
        }
    }

    #[test]
    fn keywords_are_case_sensitive() {
        let tokens = tokenize("SOLID Facet").unwrap();
        assert_eq!(tokens, vec![Token::Word("SOLID"), Token::Word("Facet")]);
    }

    #[test]
    fn keyword_spelling_round_trips() {
        for kw in [
            Keyword::Solid,
            Keyword::Facet,
            Keyword::Normal,
            Keyword::Outer,
            Keyword::Loop,
            Keyword::Vertex,
            Keyword::EndLoop,
            Keyword::EndFacet,
            Keyword::EndSolid,
        ] {
            assert_eq!(Keyword::from_field(kw.as_str()), Some(kw));
            assert_eq!(kw.to_string(), kw.as_str());
        }
    }
}
