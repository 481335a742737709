//! 页面渲染模块
//!
//! - 构建信息展示 (display.rs)
//! - 页面外壳 (page.rs)
//! - CSS样式管理 (styles.rs)

pub mod display;
pub mod page;
pub mod styles;

pub use display::BuildInfoDisplay;
pub use page::PageShell;
pub use styles::CssStyleManager;
