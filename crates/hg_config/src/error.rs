// crates/hg_config/src/error.rs

//! 配置层错误类型

use hg_foundation::HgError;

/// 配置错误
///
/// 构造阶段的所有配置问题（缺失键、格式错误、取值非法）都归入此类型，
/// 构造失败时不会生成任何部分对象。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),

    /// 逐面数据长度与边界面数不一致
    #[error("配置 '{key}' 长度不匹配: 期望 {expected} 个面, 实际 {actual}")]
    SizeMismatch {
        /// 配置键
        key: String,
        /// 期望长度（边界面数）
        expected: usize,
        /// 实际长度
        actual: usize,
    },

    /// 基础层错误
    #[error(transparent)]
    Foundation(#[from] HgError),
}

impl ConfigError {
    /// 创建无效值错误
    pub fn invalid(key: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
