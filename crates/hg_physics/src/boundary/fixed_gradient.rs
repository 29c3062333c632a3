// crates/hg_physics/src/boundary/fixed_gradient.rs

//! 固定梯度边界存储
//!
//! 保存逐面法向梯度和"已更新"标志，并提供装配方程所需的系数：
//!
//! ```text
//! T_b = T_c + g / deltaCoeff
//!
//! valueInternalCoeffs    = 1
//! valueBoundaryCoeffs    = g / deltaCoeff
//! gradientInternalCoeffs = 0
//! gradientBoundaryCoeffs = g
//! ```
//!
//! # 使用示例
//!
//! ```ignore
//! let mut field = FixedGradientField::new(3);
//! field.set_gradient(vec![1.0, 2.0, 3.0])?;
//! let face_values = field.evaluate(&cell_values, &delta_coeffs)?;
//! assert!(!field.updated());
//! ```

use hg_foundation::HgError;

use super::error::BoundaryError;
use crate::mesh::{reverse_map, PatchFieldMapper};

/// 固定梯度边界存储
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FixedGradientField {
    gradient: Vec<f64>,
    updated: bool,
}

impl FixedGradientField {
    /// 创建全零梯度存储
    pub fn new(n_faces: usize) -> Self {
        Self {
            gradient: vec![0.0; n_faces],
            updated: false,
        }
    }

    /// 用已有梯度创建（重启）
    pub fn from_gradient(gradient: Vec<f64>) -> Self {
        Self {
            gradient,
            updated: false,
        }
    }

    /// 面数
    #[inline]
    pub fn len(&self) -> usize {
        self.gradient.len()
    }

    /// 是否为空边界
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gradient.is_empty()
    }

    /// 当前梯度
    #[inline]
    pub fn gradient(&self) -> &[f64] {
        &self.gradient
    }

    /// 整体替换梯度（长度必须一致），不改变更新标志
    pub fn set_gradient(&mut self, gradient: Vec<f64>) -> Result<(), BoundaryError> {
        BoundaryError::check_size("gradient", self.gradient.len(), gradient.len())?;
        self.gradient = gradient;
        Ok(())
    }

    /// 标记本轮系数已更新
    #[inline]
    pub fn mark_updated(&mut self) {
        self.updated = true;
    }

    /// 本轮系数是否已更新
    #[inline]
    pub fn updated(&self) -> bool {
        self.updated
    }

    /// 计算边界面值并清除更新标志
    ///
    /// `internal` 为边界相邻单元值，`delta_coeffs` 为面心到单元中心距离的倒数。
    pub fn evaluate(&mut self, internal: &[f64], delta_coeffs: &[f64]) -> Result<Vec<f64>, BoundaryError> {
        let n = self.gradient.len();
        BoundaryError::check_size("patchInternalField", n, internal.len())?;
        BoundaryError::check_size("deltaCoeffs", n, delta_coeffs.len())?;

        let mut values = Vec::with_capacity(n);
        for ((&tc, &g), &dc) in internal.iter().zip(&self.gradient).zip(delta_coeffs) {
            check_delta_coeff(dc)?;
            values.push(tc + g / dc);
        }

        self.updated = false;
        Ok(values)
    }

    /// 法向梯度
    pub fn sn_grad(&self) -> &[f64] {
        &self.gradient
    }

    /// 值的内部系数（恒为 1）
    pub fn value_internal_coeffs(&self) -> Vec<f64> {
        vec![1.0; self.gradient.len()]
    }

    /// 值的边界系数 `g / deltaCoeff`
    pub fn value_boundary_coeffs(&self, delta_coeffs: &[f64]) -> Result<Vec<f64>, BoundaryError> {
        BoundaryError::check_size("deltaCoeffs", self.gradient.len(), delta_coeffs.len())?;
        self.gradient
            .iter()
            .zip(delta_coeffs)
            .map(|(&g, &dc)| {
                check_delta_coeff(dc)?;
                Ok(g / dc)
            })
            .collect()
    }

    /// 梯度的内部系数（恒为 0）
    pub fn gradient_internal_coeffs(&self) -> Vec<f64> {
        vec![0.0; self.gradient.len()]
    }

    /// 梯度的边界系数 `g`
    pub fn gradient_boundary_coeffs(&self) -> Vec<f64> {
        self.gradient.clone()
    }

    /// 拓扑变化后按映射器重排梯度
    pub fn auto_map(&mut self, mapper: &dyn PatchFieldMapper) -> Result<(), BoundaryError> {
        self.gradient = mapper.map(&self.gradient)?;
        Ok(())
    }

    /// 从另一个存储反向映射梯度
    pub fn rmap(&mut self, other: &Self, addressing: &[usize]) -> Result<(), BoundaryError> {
        reverse_map(&mut self.gradient, &other.gradient, addressing)?;
        Ok(())
    }
}

/// 面心距离倒数必须为正有限值
fn check_delta_coeff(dc: f64) -> Result<(), BoundaryError> {
    if dc > 0.0 && dc.is_finite() {
        Ok(())
    } else {
        Err(HgError::out_of_range("deltaCoeffs", dc, 0.0, f64::MAX).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::DirectMapper;

    #[test]
    fn test_evaluate_face_values() {
        let mut field = FixedGradientField::from_gradient(vec![10.0, -4.0]);
        field.mark_updated();

        let values = field.evaluate(&[300.0, 300.0], &[100.0, 2.0]).unwrap();
        assert!((values[0] - 300.1).abs() < 1e-12);
        assert!((values[1] - 298.0).abs() < 1e-12);
        assert!(!field.updated());
    }

    #[test]
    fn test_evaluate_bad_delta() {
        let mut field = FixedGradientField::from_gradient(vec![1.0]);
        field.mark_updated();
        assert!(field.evaluate(&[0.0], &[0.0]).is_err());
        // 失败时不清除标志
        assert!(field.updated());
    }

    #[test]
    fn test_coefficients() {
        let field = FixedGradientField::from_gradient(vec![2.0, 6.0]);
        assert_eq!(field.value_internal_coeffs(), vec![1.0, 1.0]);
        assert_eq!(field.value_boundary_coeffs(&[2.0, 3.0]).unwrap(), vec![1.0, 2.0]);
        assert_eq!(field.gradient_internal_coeffs(), vec![0.0, 0.0]);
        assert_eq!(field.gradient_boundary_coeffs(), vec![2.0, 6.0]);
        assert_eq!(field.sn_grad(), &[2.0, 6.0]);
    }

    #[test]
    fn test_value_boundary_coeffs_bad_delta() {
        let field = FixedGradientField::from_gradient(vec![2.0, 6.0]);
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(field.value_boundary_coeffs(&[1.0, bad]).is_err());
        }
    }

    #[test]
    fn test_set_gradient_size() {
        let mut field = FixedGradientField::new(2);
        assert!(field.set_gradient(vec![1.0]).is_err());
        assert_eq!(field.gradient(), &[0.0, 0.0]);
        field.set_gradient(vec![1.0, 2.0]).unwrap();
        assert_eq!(field.gradient(), &[1.0, 2.0]);
    }

    #[test]
    fn test_map_and_rmap() {
        let mut field = FixedGradientField::from_gradient(vec![1.0, 2.0]);
        field.auto_map(&DirectMapper::new(vec![Some(1), None, Some(0)])).unwrap();
        assert_eq!(field.gradient(), &[2.0, 0.0, 1.0]);

        let other = FixedGradientField::from_gradient(vec![7.0]);
        field.rmap(&other, &[1]).unwrap();
        assert_eq!(field.gradient(), &[2.0, 7.0, 1.0]);
    }
}
