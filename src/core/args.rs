//! Message arguments and runtime template substitution
//!
//! Templates use `{}` for the next argument, `{N}` for an explicit
//! argument index, and `{{` / `}}` for literal braces. Argument arity is
//! checked when the template is filled in: a placeholder without an
//! argument, or an argument no placeholder consumed, is a [`FormatError`].

use super::error::FormatError;
use std::fmt::{self, Write};

/// A single message argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Char(char),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(i) => write!(f, "{}", i),
            Arg::UInt(u) => write!(f, "{}", u),
            Arg::Float(x) => write!(f, "{}", x),
            Arg::Bool(b) => write!(f, "{}", b),
            Arg::Char(c) => f.write_char(*c),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Str(s.clone())
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<char> for Arg {
    fn from(c: char) -> Self {
        Arg::Char(c)
    }
}

impl From<f32> for Arg {
    fn from(x: f32) -> Self {
        Arg::Float(f64::from(x))
    }
}

impl From<f64> for Arg {
    fn from(x: f64) -> Self {
        Arg::Float(x)
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty; $($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(v: $t) -> Self {
                    Arg::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_int!(Int, i64; i8, i16, i32, i64, isize);
impl_from_int!(UInt, u64; u8, u16, u32, u64, usize);

/// Fill `template` with `args`.
pub fn substitute(template: &str, args: &[Arg]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut used = vec![false; args.len()];
    let mut next_implicit = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }

                let mut spec = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    spec.push(inner);
                }
                if !closed {
                    return Err(FormatError::UnmatchedBrace { position: pos });
                }

                let index = if spec.is_empty() {
                    let index = next_implicit;
                    next_implicit += 1;
                    index
                } else {
                    spec.parse::<usize>()
                        .map_err(|_| FormatError::InvalidPlaceholder { position: pos })?
                };

                let arg = args
                    .get(index)
                    .ok_or(FormatError::MissingArgument { index })?;
                used[index] = true;
                // Writing into a String cannot fail.
                let _ = write!(out, "{}", arg);
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(FormatError::UnmatchedBrace { position: pos });
                }
            }
            _ => out.push(c),
        }
    }

    let used_count = used.iter().filter(|u| **u).count();
    if used_count < args.len() {
        return Err(FormatError::UnusedArguments {
            used: used_count,
            supplied: args.len(),
        });
    }

    Ok(out)
}
