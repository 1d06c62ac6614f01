//! `{name}` / `{name:04d}` placeholder substitution for user-supplied filename and prefix
//! patterns. `{{` and `}}` produce literal braces.

use crate::error::LibraryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
    Int(i64),
    Text(String),
}

impl From<i64> for TemplateValue {
    fn from(value: i64) -> Self {
        TemplateValue::Int(value)
    }
}

impl From<usize> for TemplateValue {
    fn from(value: usize) -> Self {
        TemplateValue::Int(value as i64)
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::Text(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::Text(value)
    }
}

/// Parsed `[0][width][d]` format spec.
struct Spec {
    zero_pad: bool,
    width: usize,
}

fn parse_spec(spec: &str) -> Result<Spec, LibraryError> {
    let body = spec.strip_suffix('d').unwrap_or(spec);
    let zero_pad = body.starts_with('0') && body.len() > 1;
    let digits = if zero_pad { &body[1..] } else { body };
    let width = if digits.is_empty() {
        0
    } else {
        digits.parse::<usize>().map_err(|_| {
            LibraryError::invalid_argument(format!("unsupported format spec ':{}'", spec))
        })?
    };
    Ok(Spec { zero_pad, width })
}

fn format_value(value: &TemplateValue, spec: &Spec) -> String {
    match value {
        TemplateValue::Int(i) if spec.zero_pad => format!("{:0width$}", i, width = spec.width),
        TemplateValue::Int(i) => format!("{:>width$}", i, width = spec.width),
        TemplateValue::Text(s) => format!("{:<width$}", s, width = spec.width),
    }
}

pub fn render_template(
    pattern: &str,
    values: &[(&str, TemplateValue)],
) -> Result<String, LibraryError> {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut field = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    field.push(c);
                }
                if !closed {
                    return Err(LibraryError::invalid_argument(format!(
                        "unclosed '{{' in pattern '{}'",
                        pattern
                    )));
                }
                let (name, spec) = match field.split_once(':') {
                    Some((name, spec)) => (name, spec),
                    None => (field.as_str(), ""),
                };
                let value = values
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| value)
                    .ok_or_else(|| {
                        LibraryError::invalid_argument(format!(
                            "unknown placeholder '{{{}}}' in pattern '{}'",
                            name, pattern
                        ))
                    })?;
                out.push_str(&format_value(value, &parse_spec(spec)?));
            }
            '}' => {
                return Err(LibraryError::invalid_argument(format!(
                    "single '}}' in pattern '{}'",
                    pattern
                )));
            }
            c => out.push(c),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_with_zero_padding() {
        let out = render_template(
            "{base}_{index:04d}",
            &[("base", "shot".into()), ("index", 7_i64.into())],
        )
        .unwrap();
        assert_eq!(out, "shot_0007");
    }

    #[test]
    fn plain_and_width_specs() {
        let values = [("index", TemplateValue::Int(3)), ("t", "ab".into())];
        assert_eq!(render_template("[{index}] ", &values).unwrap(), "[3] ");
        assert_eq!(render_template("{index:3d}|{t:4}|", &values).unwrap(), "  3|ab  |");
    }

    #[test]
    fn escaped_braces() {
        assert_eq!(render_template("{{x}}", &[]).unwrap(), "{x}");
    }

    #[test]
    fn unknown_or_malformed_placeholders_fail() {
        assert!(render_template("{missing}", &[]).is_err());
        assert!(render_template("{open", &[]).is_err());
        assert!(render_template("close}", &[]).is_err());
        assert!(render_template("{i:zz}", &[("i", 1_i64.into())]).is_err());
    }
}
