//! 构建元数据展示
//! 固定顺序：RQID、Build（`#` 前缀）、Version（`v` 前缀）、Environment

use crate::model::BuildInfo;

/// 容器基础样式类
pub const BASE_CLASS: &str = "build-info";

/// BuildInfo 展示组件
#[derive(Debug, Clone, Copy)]
pub struct BuildInfoDisplay<'a> {
    info: &'a BuildInfo,
    class_name: Option<&'a str>,
}

impl<'a> BuildInfoDisplay<'a> {
    pub fn new(info: &'a BuildInfo) -> Self {
        Self {
            info,
            class_name: None,
        }
    }

    /// 调用方追加的样式类，只影响容器 class，不改变内容与顺序
    pub fn with_class(mut self, class_name: &'a str) -> Self {
        let trimmed = class_name.trim();
        self.class_name = (!trimmed.is_empty()).then_some(trimmed);
        self
    }

    /// 每个字段一行 `Label: 前缀+值`
    pub fn lines(&self) -> Vec<String> {
        self.info
            .entries()
            .map(|(field, value)| format!("{}: {}{}", field.label(), field.prefix(), value))
            .collect()
    }

    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }

    pub fn container_class(&self) -> String {
        match self.class_name {
            Some(extra) => format!("{} {}", BASE_CLASS, extra),
            None => BASE_CLASS.to_string(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            "<div class=\"{}\">",
            escape_html(&self.container_class())
        ));
        html.push_str("<h3 class=\"build-info-title\">Build Information</h3>");
        html.push_str("<ul class=\"build-info-list\">");
        for (field, value) in self.info.entries() {
            html.push_str(&format!(
                "<li><strong>{}:</strong> {}{}</li>",
                field.label(),
                field.prefix(),
                escape_html(value)
            ));
        }
        html.push_str("</ul>");
        html.push_str("</div>");
        html
    }
}

pub(crate) fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_text_matches_defaults() {
        let info = BuildInfo::default();
        let text = BuildInfoDisplay::new(&info).to_text();
        assert!(text.contains("RQID: local-dev"));
        assert!(text.contains("Build: #0"));
        assert!(text.contains("Version: v0.0.0"));
        assert!(text.contains("Environment: development"));
    }

    #[test]
    fn full_state_text_uses_values() {
        let info = BuildInfo::new("abc123", "42", "1.2.3", "production");
        let lines = BuildInfoDisplay::new(&info).lines();
        assert_eq!(
            lines,
            [
                "RQID: abc123",
                "Build: #42",
                "Version: v1.2.3",
                "Environment: production"
            ]
        );
    }

    #[test]
    fn only_build_number_set() {
        let info = BuildInfo::new("", "7", "", "");
        let text = BuildInfoDisplay::new(&info).to_text();
        assert_eq!(
            text,
            "RQID: local-dev\nBuild: #7\nVersion: v0.0.0\nEnvironment: development"
        );
    }

    #[test]
    fn html_lists_fields_in_order() {
        let info = BuildInfo::new("abc123", "42", "1.2.3", "production");
        let html = BuildInfoDisplay::new(&info).to_html();

        let positions: Vec<usize> = [
            "<strong>RQID:</strong> abc123",
            "<strong>Build:</strong> #42",
            "<strong>Version:</strong> v1.2.3",
            "<strong>Environment:</strong> production",
        ]
        .iter()
        .map(|needle| html.find(needle).expect("field rendered"))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn html_escapes_values() {
        let info = BuildInfo::new("<script>", "1", "1.0.0", "a&b");
        let html = BuildInfoDisplay::new(&info).to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a&amp;b"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn class_hook_only_changes_container() {
        let info = BuildInfo::default();
        let plain = BuildInfoDisplay::new(&info);
        let styled = BuildInfoDisplay::new(&info).with_class("mb-8");

        assert!(plain.to_html().starts_with("<div class=\"build-info\">"));
        assert!(styled.to_html().starts_with("<div class=\"build-info mb-8\">"));
        assert_eq!(plain.to_text(), styled.to_text());

        let strip = |s: String| s.splitn(2, '>').nth(1).unwrap_or_default().to_string();
        assert_eq!(strip(plain.to_html()), strip(styled.to_html()));
    }

    #[test]
    fn blank_class_hook_is_ignored() {
        let info = BuildInfo::default();
        let display = BuildInfoDisplay::new(&info).with_class("   ");
        assert_eq!(display.container_class(), BASE_CLASS);
    }

    #[test]
    fn rendering_is_deterministic() {
        let info = BuildInfo::new("r", "3", "0.1.0", "test");
        let display = BuildInfoDisplay::new(&info).with_class("x");
        assert_eq!(display.to_html(), display.to_html());
    }
}
