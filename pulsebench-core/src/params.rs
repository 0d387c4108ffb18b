//! Parameter Display Model
//!
//! When a benchmark definition is instantiated with concrete arguments, the
//! sinks display them as `Fixture.Test(decl = value, ...)`. The declaration
//! list and the value list both arrive as raw parenthesized text from the
//! registration surface; this module splits them on top-level commas
//! (respecting quotes, backslash escapes and `<([{` nesting) and pairs them
//! up positionally. Surplus values are variadic: they fold into the last
//! declared parameter joined by `", "`. Declared parameters without a value
//! display with an empty value. Display-only: nothing here affects
//! execution.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq)]
enum QuotingState {
    Unquoted,
    SingleQuoted,
    DoubleQuoted,
}

/// One displayed parameter: its declaration text and its value text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Declaration as written in the shared signature, e.g. `size`.
    pub declaration: String,
    /// Concrete value this instantiation supplied, possibly empty.
    pub value: String,
}

/// Ordered parameter list attached to a benchmark definition.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Parameters {
    parameters: Vec<Parameter>,
}

fn trimmed(s: &str) -> String {
    s.trim_matches([' ', '\r', '\n', '\t']).to_string()
}

/// Split a parenthesized list on top-level commas.
///
/// The leading delimiter is skipped, elements end at an unquoted, unnested
/// `,` or `)`, and an element that runs off the end of the string without a
/// terminator is dropped.
fn parse_comma_separated(raw: &str) -> Vec<String> {
    let bytes = raw.as_bytes();
    let mut result = Vec::new();

    let mut i = usize::from(!bytes.is_empty());

    while i < bytes.len() && bytes[i] != b')' {
        let start = i;
        let mut depth = 0usize;
        let mut state = QuotingState::Unquoted;
        let mut escaped = false;

        while i < bytes.len() {
            let c = bytes[i];
            i += 1;

            if state == QuotingState::Unquoted {
                match c {
                    b'"' | b'\'' => {
                        state = if c == b'"' {
                            QuotingState::DoubleQuoted
                        } else {
                            QuotingState::SingleQuoted
                        };
                        escaped = false;
                    }
                    b'<' | b'(' | b'[' | b'{' => depth += 1,
                    b'>' | b')' | b']' | b'}' if depth > 0 => depth -= 1,
                    b',' | b')' if depth == 0 => {
                        result.push(trimmed(&raw[start..i - 1]));
                        break;
                    }
                    _ => {}
                }
            } else if escaped {
                escaped = false;
            } else if c == b'\\' {
                escaped = true;
            } else {
                let closing = if state == QuotingState::DoubleQuoted {
                    b'"'
                } else {
                    b'\''
                };
                if c == closing {
                    state = QuotingState::Unquoted;
                }
            }
        }
    }

    result
}

/// Split one declaration at its top-level `=` into declaration and default.
fn parse_declaration(raw: &str) -> Parameter {
    let bytes = raw.as_bytes();
    let mut depth = 0usize;
    let mut state = QuotingState::Unquoted;
    let mut escaped = false;
    let mut i = 0usize;
    let mut equals = None;

    while i < bytes.len() {
        let c = bytes[i];
        i += 1;

        if state == QuotingState::Unquoted {
            match c {
                b'"' | b'\'' => {
                    state = if c == b'"' {
                        QuotingState::DoubleQuoted
                    } else {
                        QuotingState::SingleQuoted
                    };
                    escaped = false;
                }
                b'<' | b'(' | b'[' | b'{' => depth += 1,
                b'>' | b')' | b']' | b'}' if depth > 0 => depth -= 1,
                b'=' if depth == 0 => {
                    equals = Some(i);
                    break;
                }
                _ => {}
            }
        } else if escaped {
            escaped = false;
        } else if c == b'\\' {
            escaped = true;
        } else {
            let closing = if state == QuotingState::DoubleQuoted {
                b'"'
            } else {
                b'\''
            };
            if c == closing {
                state = QuotingState::Unquoted;
            }
        }
    }

    match equals {
        Some(pos) => Parameter {
            declaration: trimmed(&raw[..pos - 1]),
            value: trimmed(&raw[pos..]),
        },
        None => Parameter {
            declaration: raw.to_string(),
            value: String::new(),
        },
    }
}

impl Parameters {
    /// No parameters; displays as nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pair a raw declaration list with a raw value list, e.g.
    /// `"(size, count)"` and `"(128, 4)"`.
    pub fn parse(raw_declarations: &str, raw_values: &str) -> Self {
        let mut parameters: Vec<Parameter> = parse_comma_separated(raw_declarations)
            .iter()
            .map(|decl| parse_declaration(decl))
            .collect();

        let values = parse_comma_separated(raw_values);

        let mut straight = parameters.len().min(values.len());
        let mut variadic = 0;

        if values.len() > parameters.len() {
            straight = straight.saturating_sub(1);
            variadic = values.len() - parameters.len() + 1;
        }

        // Parameters beyond the supplied values keep their declaration
        // default (or stay empty).
        for (parameter, value) in parameters.iter_mut().zip(&values) {
            parameter.value.clone_from(value);
        }

        if variadic > 0 {
            if let Some(last) = parameters.last_mut() {
                last.value = values[straight..straight + variadic].join(", ");
            }
        }

        Self { parameters }
    }

    /// The ordered parameter list.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Whether there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parameters.is_empty() {
            return Ok(());
        }

        write!(f, "(")?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", parameter.declaration, parameter.value)?;
        }
        write!(f, ")")
    }
}
