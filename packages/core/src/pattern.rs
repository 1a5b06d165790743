//! Wildcard matching for recognized host values.
//!
//! Host values observed on incoming requests are only trusted as segment
//! names when they match an operator-supplied glob pattern. The pattern
//! language is deliberately small: `*` matches zero or more characters,
//! `?` matches exactly one, everything else matches literally.
//!
//! Matching is case-insensitive because host values commonly change case
//! between proxies and load balancers. The candidate string is never
//! modified; only the comparison is case-folded.

/// Matches `text` against a glob `pattern`, ignoring case.
///
/// `*` matches any run of characters (including an empty run), `?` matches
/// exactly one character, and any other character matches itself. An empty
/// pattern matches only an empty text.
///
/// # Examples
///
/// ```
/// use traceline_core::pattern::wildcard_match;
///
/// assert!(wildcard_match("ABC*", "abcxyz"));
/// assert!(wildcard_match("*", ""));
/// assert!(wildcard_match("a?c", "abc"));
/// assert!(!wildcard_match("a?c", "ac"));
/// assert!(wildcard_match("*.example.com", "api.example.com"));
/// assert!(!wildcard_match("*.example.com", "api.other.com"));
/// ```
#[must_use]
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    glob_match(&pattern.to_lowercase(), &text.to_lowercase())
}

/// Matches `text` against a glob `pattern` without case folding.
///
/// Same pattern language as [`wildcard_match`], for callers whose host
/// values are already canonical.
#[must_use]
pub fn wildcard_match_case_sensitive(pattern: &str, text: &str) -> bool {
    glob_match(pattern, text)
}

/// Iterative two-pointer glob matcher with single-star backtracking.
///
/// On a mismatch after a `*`, the text resume point advances by one and the
/// pattern rewinds to just past that `*`. Worst case is
/// O(len(pattern) * len(text)); typical host patterns are a handful of
/// characters.
fn glob_match(pattern: &str, text: &str) -> bool {
    // A lone star accepts everything without walking the text.
    if pattern == "*" {
        return true;
    }
    if pattern.is_empty() {
        return text.is_empty();
    }
    // No wildcards means plain equality.
    if !pattern.contains(['*', '?']) {
        return pattern == text;
    }

    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let mut p = 0;
    let mut t = 0;
    // Pattern position just past the most recent '*', and the text position
    // its match run currently restarts from.
    let mut star: Option<usize> = None;
    let mut resume = 0;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some(p + 1);
            resume = t;
            p += 1;
        } else if let Some(after_star) = star {
            p = after_star;
            resume += 1;
            t = resume;
        } else {
            return false;
        }
    }

    // Trailing stars match the empty suffix.
    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    // ---- Literal patterns ----

    #[test]
    fn empty_pattern_matches_only_empty_text() {
        assert!(wildcard_match("", ""));
        assert!(!wildcard_match("", "x"));
    }

    #[test]
    fn literal_pattern_is_equality() {
        assert!(wildcard_match("example.com", "example.com"));
        assert!(!wildcard_match("example.com", "example.org"));
        assert!(!wildcard_match("example.com", "example.com.au"));
    }

    #[test]
    fn literal_pattern_ignores_case() {
        assert!(wildcard_match("Example.COM", "eXaMpLe.com"));
        assert!(wildcard_match("ABC*", "abcxyz"));
    }

    // ---- Star ----

    #[test]
    fn lone_star_matches_everything() {
        assert!(wildcard_match("*", ""));
        assert!(wildcard_match("*", "a"));
        assert!(wildcard_match("*", "api.example.com"));
        assert!(wildcard_match("*", "*?*"));
    }

    #[test]
    fn trailing_star_matches_any_suffix() {
        assert!(wildcard_match("api*", "api"));
        assert!(wildcard_match("api*", "api.example.com"));
        assert!(!wildcard_match("api*", "web.example.com"));
    }

    #[test]
    fn leading_star_matches_any_prefix() {
        assert!(wildcard_match("*.example.com", "api.example.com"));
        assert!(wildcard_match("*.example.com", "a.b.example.com"));
        assert!(!wildcard_match("*.example.com", "api.other.com"));
    }

    #[test]
    fn inner_star_takes_any_valid_split() {
        assert!(wildcard_match("a*b", "ab"));
        assert!(wildcard_match("a*b", "axxxb"));
        assert!(wildcard_match("a*b*c", "abcbc"));
        assert!(!wildcard_match("a*b", "ba"));
    }

    #[test]
    fn adjacent_stars_collapse() {
        assert!(wildcard_match("a**b", "ab"));
        assert!(wildcard_match("a**b", "axxb"));
        assert!(wildcard_match("**", ""));
        assert!(wildcard_match("a***", "a"));
    }

    #[test]
    fn star_backtracks_past_false_starts() {
        // The first candidate match for "ab" fails and the star must retry.
        assert!(wildcard_match("*ab", "aab"));
        assert!(wildcard_match("*aab", "aaab"));
        assert!(wildcard_match("*b*b", "abab"));
    }

    // ---- Question mark ----

    #[test]
    fn question_matches_exactly_one() {
        assert!(wildcard_match("a?c", "abc"));
        assert!(!wildcard_match("a?c", "ac"));
        assert!(!wildcard_match("a?c", "abbc"));
    }

    #[test]
    fn question_and_star_combine() {
        assert!(wildcard_match("?*", "x"));
        assert!(!wildcard_match("?*", ""));
        assert!(wildcard_match("a?*.com", "api.com"));
    }

    // ---- Case-sensitive variant ----

    #[test]
    fn case_sensitive_variant_distinguishes_case() {
        assert!(wildcard_match_case_sensitive("api*", "api.example.com"));
        assert!(!wildcard_match_case_sensitive("API*", "api.example.com"));
        assert!(wildcard_match_case_sensitive("*", "AnyThing"));
    }

    // ---- Properties ----

    proptest! {
        #[test]
        fn star_accepts_arbitrary_text(text in ".*") {
            prop_assert!(wildcard_match("*", &text));
        }

        #[test]
        fn literal_matches_itself_under_case_change(host in "[a-z0-9.-]{0,32}") {
            prop_assert!(wildcard_match(&host.to_uppercase(), &host));
            prop_assert!(wildcard_match(&host, &host.to_uppercase()));
        }

        #[test]
        fn questions_match_texts_of_equal_length(text in "[a-zA-Z0-9.-]{0,16}") {
            let pattern = "?".repeat(text.chars().count());
            prop_assert!(wildcard_match(&pattern, &text));
        }

        #[test]
        fn prefix_star_matches_any_extension(
            prefix in "[a-z0-9.]{0,8}",
            suffix in "[a-z0-9.]{0,8}",
        ) {
            let pattern = format!("{prefix}*");
            let text = format!("{prefix}{suffix}");
            prop_assert!(wildcard_match(&pattern, &text));
        }
    }
}
