//! 构建期取值规则，由 build.rs 通过 `#[path]` 引入
//!
//! 未设置或空字符串回退到默认值；包含换行的值无法写入 rustc-env，同样回退。

/// 构建期取值结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrozenValue {
    /// 原样采用
    Verbatim(String),
    /// 未设置或为空
    Default(String),
    /// 含换行，被拒绝后使用默认值
    Multiline(String),
}

impl FrozenValue {
    pub fn into_value(self) -> String {
        match self {
            FrozenValue::Verbatim(value)
            | FrozenValue::Default(value)
            | FrozenValue::Multiline(value) => value,
        }
    }
}

pub fn freeze_value(raw: Option<String>, default: &str) -> FrozenValue {
    match raw {
        Some(value) if value.contains('\n') || value.contains('\r') => {
            FrozenValue::Multiline(default.to_string())
        }
        Some(value) if !value.is_empty() => FrozenValue::Verbatim(value),
        _ => FrozenValue::Default(default.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_uses_default() {
        assert_eq!(
            freeze_value(None, "local-dev"),
            FrozenValue::Default("local-dev".to_string())
        );
    }

    #[test]
    fn empty_uses_default() {
        assert_eq!(
            freeze_value(Some(String::new()), "0"),
            FrozenValue::Default("0".to_string())
        );
    }

    #[test]
    fn newline_is_rejected() {
        let frozen = freeze_value(Some("abc\n123".to_string()), "local-dev");
        assert_eq!(frozen, FrozenValue::Multiline("local-dev".to_string()));
        assert_eq!(frozen.into_value(), "local-dev");
    }

    #[test]
    fn present_value_is_kept_verbatim() {
        assert_eq!(
            freeze_value(Some(" 42 ".to_string()), "0").into_value(),
            " 42 "
        );
        assert_eq!(
            freeze_value(Some("abc123".to_string()), "local-dev"),
            FrozenValue::Verbatim("abc123".to_string())
        );
    }
}
