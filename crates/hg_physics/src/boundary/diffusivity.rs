// crates/hg_physics/src/boundary/diffusivity.rs

//! 有效热扩散系数查找
//!
//! 只保存场名和 `rhoCp0`，每次系数更新时从注册表重新解析边界场切片。

use hg_config::TransportConfig;

use super::error::BoundaryError;
use crate::mesh::PatchGeometry;
use crate::registry::FieldRegistry;

/// 有效热扩散系数引用
#[derive(Debug, Clone, PartialEq)]
pub struct DiffusivityLookup {
    field_name: String,
    rho_cp0: f64,
}

impl DiffusivityLookup {
    /// 创建查找器
    ///
    /// `rhoCp0` 在构造时读取一次，之后保持不变。
    pub fn new(field_name: impl Into<String>, transport: &TransportConfig) -> Result<Self, BoundaryError> {
        transport.validate()?;
        Ok(Self {
            field_name: field_name.into(),
            rho_cp0: transport.rho_cp0,
        })
    }

    /// 场名
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// 密度 × 比热容
    pub fn rho_cp0(&self) -> f64 {
        self.rho_cp0
    }

    /// 在注册表中解析当前边界上的扩散系数
    ///
    /// 返回的切片只在本次调用期间有效。
    pub fn resolve<'a>(
        &self,
        registry: &'a dyn FieldRegistry,
        patch: &dyn PatchGeometry,
    ) -> Result<&'a [f64], BoundaryError> {
        let values = registry
            .patch_field(&self.field_name, patch.name())
            .ok_or_else(|| BoundaryError::FieldNotFound {
                field: self.field_name.clone(),
                patch: patch.name().to_string(),
            })?;
        BoundaryError::check_size("alphaEff", patch.n_faces(), values.len())?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::BoundaryPatch;
    use crate::registry::PatchFieldRegistry;

    #[test]
    fn test_resolve() {
        let patch = BoundaryPatch::uniform("wall", 2, 1.0).unwrap();
        let reg = PatchFieldRegistry::new().with_field("alphaEff", "wall", vec![0.1, 0.2]);
        let lookup = DiffusivityLookup::new("alphaEff", &TransportConfig::new(1000.0)).unwrap();

        assert_eq!(lookup.resolve(&reg, &patch).unwrap(), &[0.1, 0.2]);
        assert_eq!(lookup.rho_cp0(), 1000.0);
    }

    #[test]
    fn test_missing_field() {
        let patch = BoundaryPatch::uniform("wall", 2, 1.0).unwrap();
        let reg = PatchFieldRegistry::new().with_field("alphaEff", "inlet", vec![0.1, 0.2]);
        let lookup = DiffusivityLookup::new("alphaEff", &TransportConfig::new(1000.0)).unwrap();

        assert!(matches!(
            lookup.resolve(&reg, &patch),
            Err(BoundaryError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_wrong_length() {
        let patch = BoundaryPatch::uniform("wall", 3, 1.0).unwrap();
        let reg = PatchFieldRegistry::new().with_field("alphaEff", "wall", vec![0.1, 0.2]);
        let lookup = DiffusivityLookup::new("alphaEff", &TransportConfig::new(1000.0)).unwrap();

        assert!(matches!(
            lookup.resolve(&reg, &patch),
            Err(BoundaryError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_rho_cp0() {
        assert!(DiffusivityLookup::new("alphaEff", &TransportConfig::new(0.0)).is_err());
    }
}
