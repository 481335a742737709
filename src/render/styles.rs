//! CSS样式管理模块

/// CSS样式管理器
pub struct CssStyleManager;

impl CssStyleManager {
    /// 页面样式（含深色模式）
    pub fn page_css() -> &'static str {
        r#"
        body {
            font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace;
            margin: 0;
            color: #111827;
            background-color: #f9fafb;
        }
        main {
            display: flex;
            min-height: 100vh;
            flex-direction: column;
            align-items: center;
            padding: 6rem 1rem;
            box-sizing: border-box;
        }
        .container { max-width: 64rem; width: 100%; font-size: 0.875rem; }
        .page-title {
            font-size: 2.25rem;
            font-weight: bold;
            text-align: center;
            margin-bottom: 2rem;
        }
        .build-info {
            background: #f3f4f6;
            padding: 1rem;
            border-radius: 0.5rem;
            margin-bottom: 2rem;
        }
        .build-info-title { font-weight: 600; margin: 0 0 0.5rem 0; }
        .build-info-list { list-style: none; padding: 0; margin: 0; }
        .build-info-list li { margin: 0.25rem 0; }
        .grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(18rem, 1fr));
            gap: 1.5rem;
        }
        .card {
            background: #fff;
            padding: 1.5rem;
            border-radius: 0.5rem;
            box-shadow: 0 4px 6px rgba(0,0,0,0.08);
        }
        .card h2 { font-size: 1.25rem; margin: 0 0 1rem 0; }
        .card ul { padding-left: 0; list-style: none; }
        .card li { margin: 0.5rem 0; }
        code.command {
            display: block;
            background: #f3f4f6;
            padding: 0.5rem;
            border-radius: 0.25rem;
            margin: 0.5rem 0;
        }
        @media (prefers-color-scheme: dark) {
            body { background-color: #030712; color: #f9fafb; }
            .build-info, code.command { background: #1f2937; }
            .card { background: #111827; }
        }
        "#
    }
}
