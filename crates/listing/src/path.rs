//! Browse path normalisation.
//!
//! Paths inside a container are plain `/`-delimited strings. The canonical
//! form has no leading slash, no trailing slash and no empty segments, and
//! the container root is the empty string.

/// Normalise a browse path into its canonical form.
///
/// # Examples
///
/// ```
/// use blobnav_listing::path::normalize;
/// assert_eq!(normalize("docs/ch1/"), "docs/ch1");
/// assert_eq!(normalize("/docs//ch1"), "docs/ch1");
/// assert_eq!(normalize("///"), "");
/// ```
pub fn normalize(path: &str) -> String {
    segments(path).collect::<Vec<_>>().join("/")
}

/// Non-empty segments of a path, in order.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Join a child name onto a (canonical) parent path.
pub fn join(parent: &str, name: &str) -> String {
    match parent.is_empty() {
        true => name.to_string(),
        false => format!("{parent}/{name}"),
    }
}

/// Parent of a path. The root is its own parent.
pub fn parent(path: &str) -> String {
    let path = normalize(path);
    match path.rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}

/// Key prefix that selects everything below `path`.
///
/// The root yields an empty prefix; any other path yields its canonical
/// form with a single trailing slash.
pub fn listing_prefix(path: &str) -> String {
    let path = normalize(path);
    match path.is_empty() {
        true => path,
        false => path + "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("/", "")]
    #[case("docs", "docs")]
    #[case("docs/", "docs")]
    #[case("docs//ch1///", "docs/ch1")]
    #[case("/docs/ch1", "docs/ch1")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    #[case("", "")]
    #[case("docs", "")]
    #[case("docs/ch1", "docs")]
    #[case("docs/ch1/", "docs")]
    fn test_parent(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parent(input), expected);
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "docs"), "docs");
        assert_eq!(join("docs", "ch1"), "docs/ch1");
    }

    #[rstest]
    #[case("", "")]
    #[case("docs", "docs/")]
    #[case("docs/", "docs/")]
    #[case("/docs//ch1", "docs/ch1/")]
    fn test_listing_prefix(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(listing_prefix(input), expected);
    }
}
