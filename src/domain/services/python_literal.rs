//! Python literal rendering of parsed JSON
//!
//! Injected datasets are written into the notebook as Python source. JSON
//! `true`/`false`/`null` become `True`/`False`/`None`; strings use Python
//! `repr` quoting rules. Containers that do not fit on one line are wrapped
//! one item per line, aligned after the opening bracket.

use serde_json::{Map, Value};

/// Line width before containers are wrapped
pub const LITERAL_WIDTH: usize = 100;

/// Render a JSON value as a Python literal
pub fn to_python_literal(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

/// Render a string with Python `repr` quoting
///
/// Single quotes are preferred; double quotes are used when the text
/// contains a single quote and no double quote.
pub fn python_str(s: &str) -> String {
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
            c if (c as u32) < 0x20 || c == '\x7f' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn flat(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => python_number(n),
        Value::String(s) => python_str(s),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(flat).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", python_str(k), flat(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

fn python_number(n: &serde_json::Number) -> String {
    // Integers keep their digits; Python ints are unbounded.
    let text = n.to_string();
    if !text.contains(['.', 'e', 'E']) {
        return text;
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 => format!("{:.1}", f),
        Some(f) => format!("{:?}", f),
        None => n.to_string(),
    }
}

fn write_value(out: &mut String, value: &Value, indent: usize) {
    let one_line = flat(value);
    if indent + one_line.chars().count() <= LITERAL_WIDTH {
        out.push_str(&one_line);
        return;
    }
    match value {
        Value::Object(map) if !map.is_empty() => write_object(out, map, indent),
        Value::Array(items) if !items.is_empty() => write_array(out, items, indent),
        _ => out.push_str(&one_line),
    }
}

fn write_object(out: &mut String, map: &Map<String, Value>, indent: usize) {
    out.push('{');
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
            out.push_str(&" ".repeat(indent + 1));
        }
        let key = python_str(key);
        out.push_str(&key);
        out.push_str(": ");
        write_value(out, value, indent + 1 + key.chars().count() + 2);
    }
    out.push('}');
}

fn write_array(out: &mut String, items: &[Value], indent: usize) {
    out.push('[');
    for (i, value) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
            out.push_str(&" ".repeat(indent + 1));
        }
        write_value(out, value, indent + 1);
    }
    out.push(']');
}
