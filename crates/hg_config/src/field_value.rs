// crates/hg_config/src/field_value.rs

//! 均匀/逐面标量配置值
//!
//! 边界配置中的 `q`、`gradient` 等条目既可以写成单个数值（广播到所有面），
//! 也可以写成与边界面一一对应的数组：
//!
//! ```json
//! { "q": 10.0 }
//! { "q": [10.0, 12.5, 8.0] }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 均匀或逐面的标量值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// 均匀值，广播到所有面
    Uniform(f64),
    /// 逐面值，长度必须等于边界面数
    NonUniform(Vec<f64>),
}

impl FieldValue {
    /// 是否为均匀值
    #[inline]
    pub fn is_uniform(&self) -> bool {
        matches!(self, Self::Uniform(_))
    }

    /// 逐面值的长度（均匀值返回 None）
    pub fn explicit_len(&self) -> Option<usize> {
        match self {
            Self::Uniform(_) => None,
            Self::NonUniform(v) => Some(v.len()),
        }
    }

    /// 检查长度是否与面数一致
    pub fn check_len(&self, key: &str, n_faces: usize) -> Result<(), ConfigError> {
        match self.explicit_len() {
            Some(len) if len != n_faces => Err(ConfigError::SizeMismatch {
                key: key.to_string(),
                expected: n_faces,
                actual: len,
            }),
            _ => Ok(()),
        }
    }

    /// 展开为长度为 `n_faces` 的逐面数组
    pub fn expand(&self, key: &str, n_faces: usize) -> Result<Vec<f64>, ConfigError> {
        self.check_len(key, n_faces)?;
        Ok(match self {
            Self::Uniform(v) => vec![*v; n_faces],
            Self::NonUniform(v) => v.clone(),
        })
    }

    /// 检查所有值是否有限
    pub fn check_finite(&self, key: &str) -> Result<(), ConfigError> {
        let bad = match self {
            Self::Uniform(v) => (!v.is_finite()).then_some(*v),
            Self::NonUniform(v) => hg_foundation::first_non_finite(v).map(|(_, x)| x),
        };
        match bad {
            Some(v) => Err(ConfigError::invalid(key, v, "必须为有限值")),
            None => Ok(()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Uniform(v)
    }
}

impl From<Vec<f64>> for FieldValue {
    fn from(v: Vec<f64>) -> Self {
        Self::NonUniform(v)
    }
}
