//! Variable expansion for env-file values.
//!
//! Responsibilities:
//! - Replace `${VAR}` and `$VAR` references with values the caller already
//!   holds in the target mapping.
//!
//! Does NOT handle:
//! - Lookups in the process environment. Expansion sees only the mapping
//!   being built, so the result depends solely on the loaded files.
//!
//! Invariants:
//! - References to unknown variables are left literal, so an unresolved
//!   reference stays visible in the spawned shell instead of vanishing.
//! - `$$` produces a literal `$`.

use crate::source::EnvMap;

/// Expand variable references in `value` against `known`.
pub(crate) fn expand(value: &str, known: &EnvMap) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some((_, '$')) => {
                chars.next();
                out.push('$');
            }
            Some((brace_pos, '{')) => {
                let rest = &value[brace_pos + 1..];
                match rest.find('}') {
                    Some(end) => {
                        let name = &rest[..end];
                        push_reference(&mut out, name, &value[pos..brace_pos + end + 2], known);
                        // Skip past the closing brace at brace_pos + end + 1.
                        while let Some(&(i, _)) = chars.peek() {
                            if i > brace_pos + end + 1 {
                                break;
                            }
                            chars.next();
                        }
                    }
                    None => {
                        // Unterminated `${` reference: keep the rest literal.
                        out.push_str(&value[pos..]);
                        return out;
                    }
                }
            }
            Some((name_start, c2)) if c2.is_ascii_alphabetic() || c2 == '_' => {
                let name_end = value[name_start..]
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .map_or(value.len(), |off| name_start + off);
                let name = &value[name_start..name_end];
                push_reference(&mut out, name, &value[pos..name_end], known);
                while let Some(&(i, _)) = chars.peek() {
                    if i >= name_end {
                        break;
                    }
                    chars.next();
                }
            }
            _ => out.push('$'),
        }
    }

    out
}

/// Append the known value for `name`, or the original reference text when
/// the variable is not (yet) defined.
fn push_reference(out: &mut String, name: &str, literal: &str, known: &EnvMap) {
    match known.get(name) {
        Some(value) => out.push_str(value),
        None => out.push_str(literal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(pairs: &[(&str, &str)]) -> EnvMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_braced_reference_is_expanded() {
        let map = known(&[("HOST", "localhost"), ("PORT", "5432")]);
        assert_eq!(
            expand("postgres://${HOST}:${PORT}/db", &map),
            "postgres://localhost:5432/db"
        );
    }

    #[test]
    fn test_bare_reference_is_expanded() {
        let map = known(&[("USER", "app")]);
        assert_eq!(expand("$USER-suffix", &map), "app-suffix");
    }

    #[test]
    fn test_unknown_reference_stays_literal() {
        let map = EnvMap::new();
        assert_eq!(expand("${MISSING}/path", &map), "${MISSING}/path");
        assert_eq!(expand("$MISSING/path", &map), "$MISSING/path");
    }

    #[test]
    fn test_dollar_dollar_escapes() {
        let map = known(&[("HOME", "/home/app")]);
        assert_eq!(expand("cost: $$5 in $HOME", &map), "cost: $5 in /home/app");
    }

    #[test]
    fn test_trailing_and_bare_dollar() {
        let map = EnvMap::new();
        assert_eq!(expand("100$", &map), "100$");
        assert_eq!(expand("a$ b", &map), "a$ b");
    }

    #[test]
    fn test_unterminated_brace_stays_literal() {
        let map = known(&[("A", "x")]);
        assert_eq!(expand("${A", &map), "${A");
    }

    #[test]
    fn test_adjacent_references() {
        let map = known(&[("A", "1"), ("B", "2")]);
        assert_eq!(expand("${A}${B}", &map), "12");
    }
}
