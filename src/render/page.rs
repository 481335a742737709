//! 页面外壳：标题、构建信息、功能列表与命令列表

use super::display::BuildInfoDisplay;
use super::styles::CssStyleManager;
use crate::model::BuildInfo;
use build_html::{Html, HtmlContainer, HtmlPage};

pub const PAGE_TITLE: &str = "Rust + Axum + SemVer + RQID";

pub const FEATURES: [&str; 6] = [
    "Axum HTTP server",
    "Build-time metadata injection",
    "Automatic SemVer",
    "RQID tracking",
    "Auto-generated CHANGELOG",
    "Conventional Commits",
];

/// 仅作展示，不会被执行
pub const COMMANDS: [&str; 3] = [
    "cargo release patch",
    "cargo release minor",
    "cargo release major",
];

/// 页面生成器
pub struct PageShell;

impl PageShell {
    pub fn render(info: &BuildInfo) -> String {
        Self::render_with_class(info, None)
    }

    /// `class_name` 透传给构建信息容器
    pub fn render_with_class(info: &BuildInfo, class_name: Option<&str>) -> String {
        let mut display = BuildInfoDisplay::new(info);
        if let Some(class_name) = class_name {
            display = display.with_class(class_name);
        }

        let mut html = HtmlPage::new()
            .with_title(PAGE_TITLE)
            .with_meta(vec![("charset", "utf-8")])
            .with_meta(vec![
                ("name", "viewport"),
                ("content", "width=device-width, initial-scale=1"),
            ])
            .with_style(CssStyleManager::page_css());

        html.add_raw("<main><div class=\"container\">");
        html.add_raw(&format!("<h1 class=\"page-title\">{}</h1>", PAGE_TITLE));
        html.add_raw(&display.to_html());

        html.add_raw("<div class=\"grid\">");
        html.add_raw(&Self::build_features_html());
        html.add_raw(&Self::build_commands_html());
        html.add_raw("</div>");
        html.add_raw("</div></main>");

        html.to_html_string()
    }

    fn build_features_html() -> String {
        let items: String = FEATURES
            .iter()
            .map(|feature| format!("<li>✅ {}</li>", feature))
            .collect();
        format!(
            "<div class=\"card\"><h2>🚀 Features</h2><ul>{}</ul></div>",
            items
        )
    }

    fn build_commands_html() -> String {
        let items: String = COMMANDS
            .iter()
            .map(|command| format!("<code class=\"command\">{}</code>", command))
            .collect();
        format!(
            "<div class=\"card\"><h2>📋 Commands</h2><div>{}</div></div>",
            items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_embeds_build_info_before_lists() {
        let info = BuildInfo::new("abc123", "42", "1.2.3", "production");
        let html = PageShell::render(&info);

        let build = html.find("<strong>RQID:</strong> abc123").unwrap();
        let features = html.find("Features").unwrap();
        let commands = html.find("Commands").unwrap();
        assert!(build < features && features < commands);
        assert!(html.contains(&format!("<title>{}</title>", PAGE_TITLE)));
    }

    #[test]
    fn page_lists_every_feature_and_command() {
        let html = PageShell::render(&BuildInfo::default());
        for feature in FEATURES {
            assert!(html.contains(feature), "missing feature {feature}");
        }
        for command in COMMANDS {
            assert!(html.contains(command), "missing command {command}");
        }
    }

    #[test]
    fn class_hook_reaches_display_container() {
        let html = PageShell::render_with_class(&BuildInfo::default(), Some("compact"));
        assert!(html.contains("<div class=\"build-info compact\">"));
    }

    #[test]
    fn render_is_idempotent() {
        let info = BuildInfo::new("r", "1", "1.0.0", "test");
        assert_eq!(PageShell::render(&info), PageShell::render(&info));
    }
}
