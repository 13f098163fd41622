//! Utility functions and helpers.

pub mod http;
pub mod markdown;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Replace characters that are not allowed in file names with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://wuxia.qq.com").unwrap();
        assert_eq!(
            resolve_url(&base, "/webplat/info/news_version3/a.shtml"),
            "https://wuxia.qq.com/webplat/info/news_version3/a.shtml"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("a/b:c*d?"), "a_b_c_d_");
        assert_eq!(sanitize_file_name("《版本》更新"), "《版本》更新");
    }
}
