/// Attribute name filter in group-expression syntax: whitespace or comma
/// separated glob tokens, `^` or `!` prefixed tokens exclude.
///
/// `"*"` passes everything, `"* ^rest"` everything but `rest`, `"Cd uv*"`
/// only the named ones. An expression of exclusions only starts from
/// everything; an empty expression passes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFilter {
    tokens: Vec<(bool, String)>,
}

impl AttributeFilter {
    pub fn parse(expr: &str) -> Self {
        Self {
            tokens: parse_tokens(expr),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        if self.tokens.is_empty() {
            return false;
        }
        let has_positive = self.tokens.iter().any(|(include, _)| *include);
        let mut selected = !has_positive;
        for (include, pattern) in &self.tokens {
            if glob_match(pattern, name) {
                selected = *include;
            }
        }
        selected
    }
}

fn parse_tokens(expr: &str) -> Vec<(bool, String)> {
    let mut tokens = Vec::new();
    let normalized = expr.replace(',', " ");
    for token in normalized.split_whitespace() {
        let (include, name) = match token.chars().next() {
            Some('^') | Some('!') => (false, token[1..].to_string()),
            _ => (true, token.to_string()),
        };
        if !name.is_empty() {
            tokens.push((include, name));
        }
    }
    tokens
}

/// `*` matches any run of bytes, `?` any single byte. Backtracks only to
/// the most recent `*`, so matching stays linear in practice.
fn glob_match(pattern: &str, value: &str) -> bool {
    let pattern = pattern.as_bytes();
    let value = value.as_bytes();
    let (mut p, mut v) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while v < value.len() {
        match pattern.get(p) {
            Some(b'*') => {
                star = Some((p, v));
                p += 1;
            }
            Some(&ch) if ch == b'?' || ch == value[v] => {
                p += 1;
                v += 1;
            }
            _ => match star {
                Some((star_p, star_v)) => {
                    p = star_p + 1;
                    v = star_v + 1;
                    star = Some((star_p, star_v + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|&ch| ch == b'*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_passes_everything() {
        let filter = AttributeFilter::parse("*");
        assert!(filter.matches("Cd"));
        assert!(filter.matches("width"));
    }

    #[test]
    fn exclusions_apply_in_order() {
        let filter = AttributeFilter::parse("* ^rest*, !id");
        assert!(filter.matches("Cd"));
        assert!(!filter.matches("rest"));
        assert!(!filter.matches("restP"));
        assert!(!filter.matches("id"));

        let filter = AttributeFilter::parse("^id");
        assert!(filter.matches("Cd"));
        assert!(!filter.matches("id"));
    }

    #[test]
    fn named_tokens_select_only_matches() {
        let filter = AttributeFilter::parse("Cd uv?");
        assert!(filter.matches("Cd"));
        assert!(filter.matches("uv2"));
        assert!(!filter.matches("uv"));
        assert!(!filter.matches("width"));
    }

    #[test]
    fn empty_expression_passes_nothing() {
        assert!(!AttributeFilter::parse("").matches("Cd"));
        assert!(!AttributeFilter::parse(" , ").matches("Cd"));
    }

    #[test]
    fn many_stars_match_quickly() {
        let value = "a".repeat(64);
        assert!(!glob_match("*a*a*a*a*a*a*a*a*a*a*a*a*b", &value));
        assert!(glob_match("*a*a*a*a*a*a*a*a*a*a*a*a*", &value));
        assert!(glob_match("a*?", "ab"));
        assert!(!glob_match("a*?", "a"));
        assert!(glob_match("**", ""));
    }
}
