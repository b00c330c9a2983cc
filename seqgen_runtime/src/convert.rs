//! Conversion between literal values and their source text
//!
//! `to_code_string` renders a value the way it would be written as a
//! literal in generated source; `parse_code_string` reads that text back
//! for a given type.

use crate::error::{RuntimeError, RuntimeResult};
use crate::types::{PrimitiveKind, TypeDescriptor};
use crate::value::Value;

/// Check whether `value` can be written as a source literal
pub fn has_code_form(value: &Value) -> bool {
    value.is_primitive() || matches!(value, Value::Str(_) | Value::Null)
}

/// Literal source text for a value, or `None` for arrays and objects.
pub fn to_code_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => "null".to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Byte(v) => format!("(byte){}", v),
        Value::Char(c) => format!("'{}'", escape_char(*c, '\'')),
        Value::Short(v) => format!("(short){}", v),
        Value::Int(v) => v.to_string(),
        Value::Long(v) => format!("{}L", v),
        Value::Float(v) => {
            if v.is_nan() {
                "Float.NaN".to_string()
            } else if v.is_infinite() {
                if *v > 0.0 {
                    "Float.POSITIVE_INFINITY".to_string()
                } else {
                    "Float.NEGATIVE_INFINITY".to_string()
                }
            } else {
                format!("{:?}f", v)
            }
        }
        Value::Double(v) => {
            if v.is_nan() {
                "Double.NaN".to_string()
            } else if v.is_infinite() {
                if *v > 0.0 {
                    "Double.POSITIVE_INFINITY".to_string()
                } else {
                    "Double.NEGATIVE_INFINITY".to_string()
                }
            } else {
                format!("{:?}", v)
            }
        }
        Value::Str(s) => {
            let mut out = String::with_capacity(s.len() + 2);
            out.push('"');
            for c in s.chars() {
                out.push_str(&escape_char(c, '"'));
            }
            out.push('"');
            out
        }
        Value::Array(_) | Value::Object(_) => return None,
    };
    Some(text)
}

fn escape_char(c: char, quote: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        '\\' => "\\\\".to_string(),
        c if c == quote => format!("\\{}", c),
        c if c == ' ' || c.is_ascii_graphic() => c.to_string(),
        c if (c as u32) <= 0xFFFF => format!("\\u{:04x}", c as u32),
        c => c.to_string(),
    }
}

fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return None;
                }
                let code = u32::from_str_radix(&hex, 16).ok()?;
                out.push(char::from_u32(code)?);
            }
            _ => return None,
        }
    }
    Some(out)
}

fn unquote(text: &str, quote: char) -> Option<String> {
    let body = text.strip_prefix(quote)?.strip_suffix(quote)?;
    unescape(body)
}

fn malformed(text: &str, ty: &TypeDescriptor) -> RuntimeError {
    RuntimeError::argument_error(format!("'{}' is not a {} literal", text, ty))
}

/// Parse literal source text produced by [`to_code_string`] back into a
/// value of type `ty`.
pub fn parse_code_string(ty: &TypeDescriptor, text: &str) -> RuntimeResult<Value> {
    let value = match ty.primitive_kind() {
        Some(PrimitiveKind::Boolean) => match text {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        Some(PrimitiveKind::Byte) => text
            .strip_prefix("(byte)")
            .and_then(|n| n.parse().ok())
            .map(Value::Byte),
        Some(PrimitiveKind::Short) => text
            .strip_prefix("(short)")
            .and_then(|n| n.parse().ok())
            .map(Value::Short),
        Some(PrimitiveKind::Int) => text.parse().ok().map(Value::Int),
        Some(PrimitiveKind::Long) => text
            .strip_suffix('L')
            .and_then(|n| n.parse().ok())
            .map(Value::Long),
        Some(PrimitiveKind::Float) => match text {
            "Float.NaN" => Some(Value::Float(f32::NAN)),
            "Float.POSITIVE_INFINITY" => Some(Value::Float(f32::INFINITY)),
            "Float.NEGATIVE_INFINITY" => Some(Value::Float(f32::NEG_INFINITY)),
            _ => text
                .strip_suffix('f')
                .and_then(|n| n.parse().ok())
                .map(Value::Float),
        },
        Some(PrimitiveKind::Double) => match text {
            "Double.NaN" => Some(Value::Double(f64::NAN)),
            "Double.POSITIVE_INFINITY" => Some(Value::Double(f64::INFINITY)),
            "Double.NEGATIVE_INFINITY" => Some(Value::Double(f64::NEG_INFINITY)),
            _ => text.parse().ok().map(Value::Double),
        },
        Some(PrimitiveKind::Char) => unquote(text, '\'').and_then(|s| {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Value::Char(c)),
                _ => None,
            }
        }),
        Some(PrimitiveKind::Void) => None,
        None if text == "null" => Some(Value::Null),
        None if ty.is_string() => unquote(text, '"').map(Value::Str),
        None => None,
    };
    value.ok_or_else(|| malformed(text, ty))
}
