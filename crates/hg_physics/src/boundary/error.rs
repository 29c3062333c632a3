// crates/hg_physics/src/boundary/error.rs

//! 边界条件错误类型
//!
//! 所有错误都是致命的，不会自动重试，也不会被降级为默认值：
//! - 构造阶段的配置错误不会生成任何部分对象
//! - 系数更新失败时保留上一次发布的梯度场

use hg_config::ConfigError;
use hg_foundation::HgError;
use thiserror::Error;

/// 边界条件错误
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// 配置缺失或格式错误
    #[error("边界条件配置错误: {0}")]
    Configuration(#[from] ConfigError),

    /// 功率模式下边界总面积非正
    #[error("边界总面积为 {area}，功率模式无法换算热流密度")]
    DegeneratePatch {
        /// 全局总面积 [m²]
        area: f64,
    },

    /// 有效热扩散系数为零（或非有限）
    #[error("边界面 {face} 的有效热扩散系数为 {value}，温度梯度奇异")]
    SingularDiffusivity {
        /// 面索引
        face: usize,
        /// 扩散系数值
        value: f64,
    },

    /// 注册表中找不到边界场
    #[error("场 '{field}' 在边界 '{patch}' 上未找到")]
    FieldNotFound {
        /// 场名
        field: String,
        /// 边界名
        patch: String,
    },

    /// 逐面数据长度不一致
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 反向映射的两个边界条件热源类型不同
    #[error("无法在不同热源类型之间映射: {target} <- {source_kind}")]
    IncompatibleMapping {
        /// 目标热源类型
        target: &'static str,
        /// 来源热源类型
        source_kind: &'static str,
    },

    /// 基础层错误（映射索引越界等）
    #[error(transparent)]
    Foundation(#[from] HgError),
}

impl BoundaryError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> Result<(), Self> {
        if expected != actual {
            Err(Self::SizeMismatch {
                name,
                expected,
                actual,
            })
        } else {
            Ok(())
        }
    }
}
