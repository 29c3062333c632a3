// crates/hg_physics/src/boundary/heat_flux.rs

//! 热流驱动的固定梯度温度边界条件
//!
//! 每次刷新的流程：
//!
//! 1. 解析本次调用的扩散系数切片和边界全局总面积
//! 2. 预览调制幅值（ramp 的推进先不提交）
//! 3. 热源 → 热流密度 → 温度梯度
//! 4. 写入固定梯度存储并标记已更新，最后提交 ramp 状态
//!
//! 任一步失败都直接返回错误，上次的梯度和 ramp 比例保持不变。
//!
//! # 使用示例
//!
//! ```ignore
//! let config = HeatFluxBcConfig::ramp(HeatSourceKind::Power, 50.0, "alphaEff", 0.1);
//! let mut bc = HeatFluxTemperatureBc::new(&patch, &config, &transport)?;
//!
//! let ctx = PatchContext::new(&patch, &registry, time);
//! bc.update_coeffs(&ctx)?;
//! let face_values = bc.evaluate(&cell_values, &delta_coeffs)?;
//! ```

use hg_config::{FieldValue, HeatFluxBcConfig, HeatSourceKind, TransportConfig};
use hg_foundation::KahanSum;

use super::context::PatchContext;
use super::diffusivity::DiffusivityLookup;
use super::error::BoundaryError;
use super::fixed_gradient::FixedGradientField;
use super::gradient::temperature_gradient;
use super::heat_source::{patch_flux_density, HeatSourceSpec};
use super::modulation::TemporalModulation;
use crate::mesh::{reverse_map, PatchFieldMapper, PatchGeometry};

/// 热流温度边界条件
///
/// 每个实例拥有自己的 ramp 状态；克隆得到的实例独立推进。
#[derive(Debug, Clone)]
pub struct HeatFluxTemperatureBc {
    patch_name: String,
    source: HeatSourceSpec,
    diffusivity: DiffusivityLookup,
    modulation: TemporalModulation,
    field: FixedGradientField,
}

impl HeatFluxTemperatureBc {
    /// 从配置创建
    ///
    /// 配置中带 `gradient` 时用它初始化梯度存储（重启），否则梯度为零。
    pub fn new(
        patch: &dyn PatchGeometry,
        config: &HeatFluxBcConfig,
        transport: &TransportConfig,
    ) -> Result<Self, BoundaryError> {
        let n_faces = patch.n_faces();
        config.validate_for_faces(n_faces)?;

        let source = HeatSourceSpec::new(config.heat_source, config.q.clone(), n_faces)?;
        let diffusivity = DiffusivityLookup::new(config.alpha_eff_name.clone(), transport)?;
        let field = match &config.gradient {
            Some(g) => FixedGradientField::from_gradient(g.expand("gradient", n_faces)?),
            None => FixedGradientField::new(n_faces),
        };

        log::debug!(
            "创建热流边界 '{}': {} / {}, {} 个面",
            patch.name(),
            config.modulation.type_name(),
            config.heat_source,
            n_faces
        );

        Ok(Self {
            patch_name: patch.name().to_string(),
            source,
            diffusivity,
            modulation: TemporalModulation::from_config(&config.modulation),
            field,
        })
    }

    /// 边界名
    pub fn patch_name(&self) -> &str {
        &self.patch_name
    }

    /// 面数
    pub fn n_faces(&self) -> usize {
        self.field.len()
    }

    /// 热源描述
    pub fn heat_source(&self) -> &HeatSourceSpec {
        &self.source
    }

    /// 扩散系数查找器
    pub fn diffusivity(&self) -> &DiffusivityLookup {
        &self.diffusivity
    }

    /// 时间调制策略
    pub fn modulation(&self) -> &TemporalModulation {
        &self.modulation
    }

    /// 当前 ramp 比例（时间窗返回 None）
    pub fn ramp_ratio(&self) -> Option<f64> {
        self.modulation.ramp_ratio()
    }

    /// 固定梯度存储
    pub fn field(&self) -> &FixedGradientField {
        &self.field
    }

    /// 当前发布的梯度
    pub fn gradient(&self) -> &[f64] {
        self.field.gradient()
    }

    /// 重新计算梯度
    ///
    /// 不检查更新标志：每次调用都会重算，ramp 每次调用推进一次。
    pub fn refresh(&mut self, ctx: &PatchContext<'_>) -> Result<(), BoundaryError> {
        BoundaryError::check_size("faceAreas", self.field.len(), ctx.patch.n_faces())?;

        let alpha = self.diffusivity.resolve(ctx.fields, ctx.patch)?;
        let (amplitude, next) = self.modulation.preview(ctx.time);

        let flux = patch_flux_density(&self.source, amplitude, ctx.patch)?;
        let gradient = temperature_gradient(&flux, alpha, self.diffusivity.rho_cp0())?;

        self.field.set_gradient(gradient)?;
        self.field.mark_updated();

        let was_saturated = matches!(self.modulation, TemporalModulation::Ramp(r) if r.is_saturated());
        self.modulation = next;
        if let TemporalModulation::Ramp(r) = &self.modulation {
            if r.is_saturated() && !was_saturated {
                log::info!(
                    "边界 '{}' 热源增长完成（{} 次刷新）",
                    self.patch_name,
                    r.n_advances()
                );
            }
        }

        log::debug!(
            "边界 '{}' t={} 幅值={} 梯度范围 [{:.6e}, {:.6e}]",
            self.patch_name,
            ctx.time,
            amplitude,
            self.field.gradient().iter().copied().fold(f64::INFINITY, f64::min),
            self.field.gradient().iter().copied().fold(f64::NEG_INFINITY, f64::max)
        );
        Ok(())
    }

    /// 求解器入口：本轮已更新时直接返回
    ///
    /// 返回是否执行了刷新。
    pub fn update_coeffs(&mut self, ctx: &PatchContext<'_>) -> Result<bool, BoundaryError> {
        if self.field.updated() {
            log::trace!("边界 '{}' 本轮已更新，跳过", self.patch_name);
            return Ok(false);
        }
        self.refresh(ctx)?;
        Ok(true)
    }

    /// 计算边界面温度并清除更新标志
    pub fn evaluate(&mut self, internal: &[f64], delta_coeffs: &[f64]) -> Result<Vec<f64>, BoundaryError> {
        self.field.evaluate(internal, delta_coeffs)
    }

    /// 本分区通过边界进入计算域的热流 [W]
    ///
    /// 只是诊断量，不参与跨分区归约；全局值由调用方对各分区结果求和。
    pub fn heat_input(&self, ctx: &PatchContext<'_>) -> Result<f64, BoundaryError> {
        BoundaryError::check_size("faceAreas", self.field.len(), ctx.patch.n_faces())?;
        let alpha = self.diffusivity.resolve(ctx.fields, ctx.patch)?;
        let rho_cp0 = self.diffusivity.rho_cp0();

        let mut sum = KahanSum::new();
        for ((&g, &a), &area) in self
            .field
            .gradient()
            .iter()
            .zip(alpha)
            .zip(ctx.patch.face_areas())
        {
            sum.add(g * a * rho_cp0 * area);
        }
        Ok(sum.value())
    }

    /// 导出配置（包含当前梯度，不包含 ramp 进度）
    pub fn to_config(&self) -> HeatFluxBcConfig {
        HeatFluxBcConfig {
            modulation: self.modulation.to_config(),
            heat_source: self.source.kind(),
            q: self.source.magnitude().clone(),
            alpha_eff_name: self.diffusivity.field_name().to_string(),
            gradient: Some(FieldValue::NonUniform(self.field.gradient().to_vec())),
        }
    }

    /// 导出为 JSON 文本
    pub fn write_config(&self) -> Result<String, BoundaryError> {
        Ok(self.to_config().to_json_string()?)
    }

    /// 拓扑变化后重排逐面数据
    ///
    /// 均匀 `q` 保持均匀；新增的未映射面得到 0。
    pub fn auto_map(&mut self, mapper: &dyn PatchFieldMapper) -> Result<(), BoundaryError> {
        let mut source = self.source.clone();
        source.remap(mapper)?;
        let mut field = self.field.clone();
        field.auto_map(mapper)?;

        self.source = source;
        self.field = field;
        Ok(())
    }

    /// 在新边界上创建映射后的副本
    pub fn mapped(&self, patch: &dyn PatchGeometry, mapper: &dyn PatchFieldMapper) -> Result<Self, BoundaryError> {
        BoundaryError::check_size("mapper", patch.n_faces(), mapper.size())?;
        let mut bc = self.clone();
        bc.auto_map(mapper)?;
        bc.patch_name = patch.name().to_string();
        Ok(bc)
    }

    /// 把另一个实例的 `q` 和梯度写入本实例的 `addressing` 位置
    pub fn rmap(&mut self, other: &Self, addressing: &[usize]) -> Result<(), BoundaryError> {
        if self.source.kind() != other.source.kind() {
            return Err(BoundaryError::IncompatibleMapping {
                target: self.source.kind().name(),
                source_kind: other.source.kind().name(),
            });
        }

        let mut field = self.field.clone();
        field.rmap(&other.field, addressing)?;

        let uniform_match = matches!(
            (self.source.magnitude(), other.source.magnitude()),
            (FieldValue::Uniform(a), FieldValue::Uniform(b)) if a == b
        );
        if !uniform_match {
            let mut q = self.source.values(self.field.len())?;
            let other_q = other.source.values(other.field.len())?;
            reverse_map(&mut q, &other_q, addressing)?;
            self.source.set_values(q);
        }

        self.field = field;
        Ok(())
    }

    /// 热源类型
    pub fn heat_source_kind(&self) -> HeatSourceKind {
        self.source.kind()
    }
}
