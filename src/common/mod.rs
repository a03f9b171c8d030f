pub mod error;
pub mod extract;
pub mod form;
pub mod pagination;
pub mod response;
pub mod upload;

/// Lowercase, dash-separated form of `title` suitable for object keys.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("The Matrix: Reloaded"), "the-matrix-reloaded");
        assert_eq!(slugify("  --Inception--  "), "inception");
        assert_eq!(slugify("!!!"), "");
    }
}
