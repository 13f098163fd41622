//! Notice data structures.

use serde::{Deserialize, Serialize};

/// A row parsed from a listing page, before its body is fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeStub {
    /// Full URL to the notice detail page
    pub url: String,

    /// Notice title
    pub title: String,

    /// Category tag shown next to the title
    pub tag: String,

    /// Provider-formatted timestamp, kept as-is
    pub time: String,
}

/// A notice with its Markdown body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub url: String,
    pub title: String,
    pub tag: String,
    pub time: String,

    /// Markdown body, empty until fetched
    #[serde(default)]
    pub content: String,
}

impl From<NoticeStub> for Notice {
    fn from(stub: NoticeStub) -> Self {
        Self {
            url: stub.url,
            title: stub.title,
            tag: stub.tag,
            time: stub.time,
            content: String::new(),
        }
    }
}

impl Notice {
    /// Whether the body has been populated.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Format notice for display using a template.
    ///
    /// Supported placeholders:
    /// - `{title}`, `{tag}`, `{time}`, `{url}`, `{content}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{title}", &self.title)
            .replace("{tag}", &self.tag)
            .replace("{time}", &self.time)
            .replace("{url}", &self.url)
            .replace("{content}", &self.content)
    }
}

impl NoticeStub {
    /// One-line summary used by listings.
    pub fn summary(&self) -> String {
        format!("{} - {} - {}", self.title, self.time, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stub() -> NoticeStub {
        NoticeStub {
            url: "https://wuxia.qq.com/webplat/info/news_version3/5012/5013/5014/m3485/202401/1.shtml"
                .to_string(),
            title: "版本更新公告".to_string(),
            tag: "公告".to_string(),
            time: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_from_stub_starts_empty() {
        let notice = Notice::from(sample_stub());
        assert_eq!(notice.title, "版本更新公告");
        assert!(notice.content.is_empty());
        assert!(!notice.has_content());
    }

    #[test]
    fn test_format() {
        let mut notice = Notice::from(sample_stub());
        notice.content = "**hello**".to_string();
        let result = notice.format("[{tag}] {title} ({time})\n{content}");
        assert_eq!(result, "[公告] 版本更新公告 (2024-01-01)\n**hello**");
    }

    #[test]
    fn test_summary() {
        let stub = sample_stub();
        assert!(stub.summary().starts_with("版本更新公告 - 2024-01-01 - https://"));
    }
}
