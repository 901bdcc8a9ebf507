//! Positional message formatting.
//!
//! Templates use the classic message-format syntax:
//!
//! - `{n}` is replaced by the n-th argument. An optional `,type[,style]`
//!   suffix (`{0,number,#}`) is accepted and ignored; arguments are rendered
//!   with `Display`.
//! - `'` starts and ends quoted literal text, so `'{0}'` prints `{0}`.
//! - `''` is a literal single quote, inside or outside a quoted section.
//! - A placeholder without a matching argument is kept as `{n}`.
//!
//! [`format_message`] never fails: elements it cannot read (an unterminated
//! brace, a non-numeric index) are copied through as text. Use
//! [`MessagePattern::parse`] to detect such templates.

use std::{collections::BTreeSet, fmt::Display};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unmatched brace at offset {offset}")]
    UnmatchedBrace { offset: usize },
    #[error("invalid argument index '{text}' at offset {offset}")]
    InvalidIndex { text: String, offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Argument {
        index: usize,
        /// Raw `type[,style]` text after the index, if any.
        format: Option<String>,
    },
}

/// A parsed template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePattern {
    segments: Vec<Segment>,
}

impl MessagePattern {
    /// Parse a template, rejecting malformed elements.
    pub fn parse(template: &str) -> Result<Self, PatternError> {
        scan(template, true).map(|segments| Self { segments })
    }

    /// Parse a template, keeping malformed elements as literal text.
    pub fn parse_lenient(template: &str) -> Self {
        let segments = scan(template, false)
            .unwrap_or_else(|_| vec![Segment::Literal(template.to_string())]);
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Argument indices referenced by the template.
    pub fn argument_indices(&self) -> BTreeSet<usize> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Argument { index, .. } => Some(*index),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    pub fn format(&self, args: &[&dyn Display]) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Argument { index, .. } => match args.get(*index) {
                    Some(arg) => out.push_str(&arg.to_string()),
                    None => {
                        out.push('{');
                        out.push_str(&index.to_string());
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

/// Substitute `args` into `template`.
///
/// ```
/// use restext::core::format_message;
///
/// assert_eq!(format_message("Value {0} and {1}", &[&"X", &"Y"]), "Value X and Y");
/// assert_eq!(format_message("bad value for {0} option: ''{1}''", &[&"-source", &9]),
///            "bad value for -source option: '9'");
/// assert_eq!(format_message("{0} of {2}", &[&1]), "1 of {2}");
/// ```
pub fn format_message(template: &str, args: &[&dyn Display]) -> String {
    MessagePattern::parse_lenient(template).format(args)
}

fn scan(template: &str, strict: bool) -> Result<Vec<Segment>, PatternError> {
    let chars: Vec<(usize, char)> = template.char_indices().collect();
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut in_quote = false;
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        match c {
            '\'' => {
                if matches!(chars.get(i + 1), Some((_, '\''))) {
                    literal.push('\'');
                    i += 2;
                } else {
                    in_quote = !in_quote;
                    i += 1;
                }
            }
            '{' if !in_quote => {
                let mut depth = 1;
                let mut j = i + 1;
                while j < chars.len() && depth > 0 {
                    match chars[j].1 {
                        '{' => depth += 1,
                        '}' => depth -= 1,
                        _ => {}
                    }
                    j += 1;
                }

                if depth > 0 {
                    if strict {
                        return Err(PatternError::UnmatchedBrace { offset });
                    }
                    literal.push_str(&template[offset..]);
                    break;
                }

                // chars[j - 1] is the closing brace
                let close = chars[j - 1].0;
                let inner = &template[offset + 1..close];
                let (index_text, format) = match inner.split_once(',') {
                    Some((index, format)) => (index.trim(), Some(format.trim().to_string())),
                    None => (inner.trim(), None),
                };

                match index_text.parse::<usize>() {
                    Ok(index) if index_text.chars().all(|c| c.is_ascii_digit()) => {
                        if !literal.is_empty() {
                            segments.push(Segment::Literal(std::mem::take(&mut literal)));
                        }
                        segments.push(Segment::Argument { index, format });
                    }
                    _ => {
                        if strict {
                            return Err(PatternError::InvalidIndex {
                                text: index_text.to_string(),
                                offset,
                            });
                        }
                        literal.push_str(&template[offset..=close]);
                    }
                }
                i = j;
            }
            _ => {
                literal.push(c);
                i += 1;
            }
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}
