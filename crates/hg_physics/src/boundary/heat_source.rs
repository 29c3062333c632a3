// crates/hg_physics/src/boundary/heat_source.rs

//! 热源换算：功率/热流密度 → 逐面热流密度
//!
//! - `flux`: 配置值本身就是热流密度 [W/m²]
//! - `power`: 配置值为功率 [W]，除以整个边界（所有分区）的总面积
//!
//! 总面积必须是跨分区全局求和的结果，否则分布式运行时功率会被重复或遗漏计数。

use hg_config::{FieldValue, HeatSourceKind};

use super::error::BoundaryError;
use crate::mesh::{PatchFieldMapper, PatchGeometry};

/// 热源描述
///
/// 构造后不可变；拓扑变化时只改变逐面数组的长度，不改变含义。
#[derive(Debug, Clone, PartialEq)]
pub struct HeatSourceSpec {
    kind: HeatSourceKind,
    magnitude: FieldValue,
}

impl HeatSourceSpec {
    /// 创建热源描述并检查与面数一致
    pub fn new(kind: HeatSourceKind, magnitude: FieldValue, n_faces: usize) -> Result<Self, BoundaryError> {
        magnitude.check_finite("q")?;
        magnitude.check_len("q", n_faces)?;
        Ok(Self { kind, magnitude })
    }

    /// 热源类型
    #[inline]
    pub fn kind(&self) -> HeatSourceKind {
        self.kind
    }

    /// 配置的热源大小
    #[inline]
    pub fn magnitude(&self) -> &FieldValue {
        &self.magnitude
    }

    /// 展开为逐面数组
    pub fn values(&self, n_faces: usize) -> Result<Vec<f64>, BoundaryError> {
        Ok(self.magnitude.expand("q", n_faces)?)
    }

    /// 按映射器调整逐面数组；均匀值保持不变
    pub fn remap(&mut self, mapper: &dyn PatchFieldMapper) -> Result<(), BoundaryError> {
        if let FieldValue::NonUniform(values) = &self.magnitude {
            self.magnitude = FieldValue::NonUniform(mapper.map(values)?);
        }
        Ok(())
    }

    /// 用逐面数组替换热源大小（反向映射用）
    pub(crate) fn set_values(&mut self, values: Vec<f64>) {
        self.magnitude = FieldValue::NonUniform(values);
    }
}

/// 计算逐面热流密度 [W/m²]
///
/// # 参数
/// - `source`: 热源描述
/// - `amplitude`: 时间调制幅值，直接乘到热源大小上
/// - `n_faces`: 本分区面数
/// - `total_area`: 整个边界的全局总面积 [m²]
///
/// # 错误
/// 功率模式下 `total_area <= 0` 返回 [`BoundaryError::DegeneratePatch`]。
pub fn flux_density(
    source: &HeatSourceSpec,
    amplitude: f64,
    n_faces: usize,
    total_area: f64,
) -> Result<Vec<f64>, BoundaryError> {
    let mut q = source.values(n_faces)?;

    let scale = match source.kind {
        HeatSourceKind::Flux => amplitude,
        HeatSourceKind::Power => {
            if !(total_area.is_finite() && total_area > 0.0) {
                return Err(BoundaryError::DegeneratePatch { area: total_area });
            }
            amplitude / total_area
        }
    };

    q.iter_mut().for_each(|v| *v *= scale);
    Ok(q)
}

/// 便捷函数：直接从边界几何取总面积
pub fn patch_flux_density(
    source: &HeatSourceSpec,
    amplitude: f64,
    patch: &dyn PatchGeometry,
) -> Result<Vec<f64>, BoundaryError> {
    // 通量模式不需要面积，避免一次多余的全局归约
    let total_area = match source.kind {
        HeatSourceKind::Power => patch.total_area(),
        HeatSourceKind::Flux => 0.0,
    };
    flux_density(source, amplitude, patch.n_faces(), total_area)
}
