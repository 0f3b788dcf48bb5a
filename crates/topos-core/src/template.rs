//! Positional format templates used to stringify vertex and face rows
//!
//! A template is applied once per row: `{}` takes the next value, `{2}` takes
//! the value at position 2 (fields may repeat or appear out of order), and
//! `{:.3}` / `{1:.3}` fix the number of decimals. `{{` and `}}` are literal
//! braces.

use std::fmt::{Display, Write};

use crate::error::TemplateError;

/// Joining options shared by `VertexArray::format` and `FaceArray::format`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Written once before the first row
    pub prefix: String,
    /// Written once after the last row
    pub suffix: String,
    /// Written between consecutive rows
    pub separator: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            separator: "\n".to_string(),
        }
    }
}

impl FormatOptions {
    pub fn new(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        separator: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            separator: separator.into(),
        }
    }

    /// Default options with a different suffix
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Field {
        index: usize,
        precision: Option<usize>,
    },
}

/// A parsed positional template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pieces: Vec<Piece>,
}

/// A value that can be substituted into a template field
pub trait TemplateValue: Display {
    fn write_field(&self, out: &mut String, _precision: Option<usize>) {
        let _ = write!(out, "{}", self);
    }
}

impl TemplateValue for f64 {
    fn write_field(&self, out: &mut String, precision: Option<usize>) {
        let _ = match precision {
            Some(p) => write!(out, "{:.*}", p, self),
            None => write!(out, "{}", self),
        };
    }
}

// Integer templates are checked with `Template::check_no_precision`.
impl TemplateValue for u32 {}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut next_auto = 0usize;
        let mut used_auto = false;
        let mut used_manual = false;

        let mut chars = source.char_indices().peekable();
        while let Some((position, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::UnmatchedBrace { brace: '}', position }),
                '{' => {
                    let mut content = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        content.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::UnmatchedBrace { brace: '{', position });
                    }

                    let (field, spec) = match content.split_once(':') {
                        Some((field, spec)) => (field, Some(spec)),
                        None => (content.as_str(), None),
                    };

                    let index = if field.is_empty() {
                        if used_manual {
                            return Err(TemplateError::MixedNumbering);
                        }
                        used_auto = true;
                        next_auto += 1;
                        next_auto - 1
                    } else if field.chars().all(|c| c.is_ascii_digit()) {
                        if used_auto {
                            return Err(TemplateError::MixedNumbering);
                        }
                        used_manual = true;
                        field
                            .parse()
                            .map_err(|_| TemplateError::NamedField(field.to_string()))?
                    } else {
                        return Err(TemplateError::NamedField(field.to_string()));
                    };

                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Field {
                        index,
                        precision: spec.map(parse_precision).transpose()?,
                    });
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self { pieces })
    }

    /// Highest field position referenced, `None` for a template without fields
    pub fn max_field(&self) -> Option<usize> {
        self.pieces
            .iter()
            .filter_map(|p| match p {
                Piece::Field { index, .. } => Some(*index),
                Piece::Literal(_) => None,
            })
            .max()
    }

    /// Check that every field can be filled from rows of `arity` values
    pub fn check_arity(&self, arity: usize) -> Result<(), TemplateError> {
        match self.max_field() {
            Some(index) if index >= arity => Err(TemplateError::FieldOutOfRange { index, arity }),
            _ => Ok(()),
        }
    }

    /// Reject fields with a precision, for templates filled with integers
    pub fn check_no_precision(&self) -> Result<(), TemplateError> {
        match self.pieces.iter().find_map(|p| match p {
            Piece::Field {
                index,
                precision: Some(_),
            } => Some(*index),
            _ => None,
        }) {
            Some(index) => Err(TemplateError::PrecisionOnInteger { index }),
            None => Ok(()),
        }
    }

    fn render_row<T: TemplateValue>(&self, out: &mut String, row: &[T]) {
        for piece in &self.pieces {
            match piece {
                Piece::Literal(s) => out.push_str(s),
                Piece::Field { index, precision } => row[*index].write_field(out, *precision),
            }
        }
    }

    /// Render every row and join them according to `options`
    ///
    /// Rows must be at least as wide as the widest field, see `check_arity`.
    pub(crate) fn render_rows<'a, T, I>(&self, rows: I, options: &FormatOptions) -> String
    where
        T: TemplateValue + 'a,
        I: IntoIterator<Item = &'a [T]>,
    {
        let mut out = options.prefix.clone();
        for (i, row) in rows.into_iter().enumerate() {
            if i > 0 {
                out.push_str(&options.separator);
            }
            self.render_row(&mut out, row);
        }
        out.push_str(&options.suffix);
        out
    }
}

fn parse_precision(spec: &str) -> Result<usize, TemplateError> {
    spec.strip_prefix('.')
        .map(|digits| digits.strip_suffix('f').unwrap_or(digits))
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| TemplateError::BadSpec(spec.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(template: &str, rows: &[&[u32]], options: &FormatOptions) -> String {
        Template::parse(template)
            .unwrap()
            .render_rows(rows.iter().copied(), options)
    }

    #[test]
    fn test_auto_fields() {
        let s = render("{} {} {}", &[&[1, 2, 3], &[4, 5, 6]], &FormatOptions::default());
        assert_eq!(s, "1 2 3\n4 5 6");
    }

    #[test]
    fn test_manual_fields_reorder_and_repeat() {
        let s = render("{2} {1} {0} {0}", &[&[1, 2, 3]], &FormatOptions::default());
        assert_eq!(s, "3 2 1 1");
    }

    #[test]
    fn test_escaped_braces() {
        let s = render("{{{}}}", &[&[7]], &FormatOptions::default());
        assert_eq!(s, "{7}");
    }

    #[test]
    fn test_precision() {
        let t = Template::parse("{:.2} {1:.1f}").unwrap_err();
        assert_eq!(t, TemplateError::MixedNumbering);

        let t = Template::parse("v {0:.2} {1:.1f}").unwrap();
        let row = [1.0f64, 2.31];
        let s = t.render_rows([&row[..]], &FormatOptions::default());
        assert_eq!(s, "v 1.00 2.3");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Template::parse("{x}"),
            Err(TemplateError::NamedField("x".into()))
        );
        assert_eq!(
            Template::parse("{0"),
            Err(TemplateError::UnmatchedBrace {
                brace: '{',
                position: 0
            })
        );
        assert_eq!(
            Template::parse("a}"),
            Err(TemplateError::UnmatchedBrace {
                brace: '}',
                position: 1
            })
        );
        assert_eq!(
            Template::parse("{:>4}"),
            Err(TemplateError::BadSpec(">4".into()))
        );
    }

    #[test]
    fn test_check_arity() {
        let t = Template::parse("{} {} {} {}").unwrap();
        assert!(t.check_arity(4).is_ok());
        assert_eq!(
            t.check_arity(3),
            Err(TemplateError::FieldOutOfRange { index: 3, arity: 3 })
        );
        assert!(Template::parse("no fields").unwrap().check_arity(0).is_ok());
    }
}
