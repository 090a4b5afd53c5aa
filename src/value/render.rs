//! Stable text rendering of values.
//!
//! The rendered text is what gets hashed into fingerprints and stored in the
//! golden record, so it must never depend on the host. The format follows the
//! familiar Python conventions: `str()` at the top level and `repr()` for
//! nested elements.

use super::types::Value;

/// Render a value the way it is hashed and recorded.
///
/// Identical to [`repr`] except that a top-level string is emitted bare,
/// without quotes or escapes.
pub fn render(value: &Value) -> String {
    match value {
        Value::Str(s) => s.clone(),
        other => repr(other),
    }
}

/// Render a value with quoted strings, as it appears nested in a container.
pub fn repr(value: &Value) -> String {
    let mut out = String::new();
    write_repr(value, &mut out);
    out
}

fn write_repr(value: &Value, out: &mut String) {
    match value {
        Value::None => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) => out.push_str(&repr_float(*f)),
        Value::Str(s) => out.push_str(&repr_str(s)),
        Value::List(items) => out.push_str(&repr_seq(items, '[', ']', false)),
        Value::Tuple(items) => out.push_str(&repr_seq(items, '(', ')', true)),
        Value::Set(items) if items.is_empty() => out.push_str("set()"),
        Value::Set(items) => out.push_str(&repr_seq(items, '{', '}', false)),
        Value::Map(pairs) => {
            out.push('{');
            for (i, (k, v)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(k, out);
                out.push_str(": ");
                write_repr(v, out);
            }
            out.push('}');
        }
    }
}

/// Render a sequence between delimiters; a one-element tuple keeps its comma.
pub(crate) fn repr_seq(items: &[Value], open: char, close: char, tuple: bool) -> String {
    let mut out = String::new();
    out.push(open);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_repr(item, &mut out);
    }
    if tuple && items.len() == 1 {
        out.push(',');
    }
    out.push(close);
    out
}

/// Quote a string, preferring single quotes unless the text contains one and
/// no double quote.
pub fn repr_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Shortest round-trip float text, positional for exponents in `-4..16`,
/// scientific with a signed two-digit exponent otherwise.
pub fn repr_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let sci = format!("{:e}", f);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if (-4..16).contains(&exp) {
        let plain = format!("{}", f);
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    }
}
