// crates/hg_config/src/case.rs

//! 算例配置
//!
//! 命令行驱动使用的完整算例描述：输运属性、时间控制和若干热流边界。
//! 网格本身不在本项目范围内，算例中每个边界只给出面积和有效热扩散系数，
//! 足以驱动边界条件的系数更新。

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::field_value::FieldValue;
use crate::heat_flux::HeatFluxBcConfig;
use crate::transport::TransportConfig;

/// 时间控制
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlConfig {
    /// 起始时间
    #[serde(default)]
    pub start_time: f64,

    /// 结束时间
    pub end_time: f64,

    /// 时间步长
    pub delta_t: f64,

    /// 每个时间步的系数更新次数（外层修正次数）
    #[serde(default = "default_n_correctors")]
    pub n_correctors: usize,
}

fn default_n_correctors() -> usize { 1 }

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            end_time: 10.0,
            delta_t: 0.1,
            n_correctors: default_n_correctors(),
        }
    }
}

impl ControlConfig {
    /// 验证时间控制参数
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.start_time.is_finite() {
            return Err(ConfigError::invalid("control.startTime", self.start_time, "必须为有限值"));
        }
        if !(self.end_time.is_finite() && self.end_time >= self.start_time) {
            return Err(ConfigError::invalid(
                "control.endTime",
                self.end_time,
                "结束时间必须不早于起始时间",
            ));
        }
        if !(self.delta_t.is_finite() && self.delta_t > 0.0) {
            return Err(ConfigError::invalid("control.deltaT", self.delta_t, "时间步长必须为正"));
        }
        if self.n_correctors == 0 {
            return Err(ConfigError::invalid("control.nCorrectors", 0, "至少需要一次系数更新"));
        }
        Ok(())
    }

    /// 总时间步数
    ///
    /// 向上取整，保证最后一步到达结束时间；比整数步多出不到 1e-9 步的舍入误差忽略。
    pub fn n_steps(&self) -> usize {
        let steps = (self.end_time - self.start_time) / self.delta_t;
        (steps - 1e-9).ceil().max(0.0) as usize
    }

    /// 第 `step` 步（从 1 开始）结束时的时间，不超过结束时间
    pub fn step_time(&self, step: usize) -> f64 {
        (self.start_time + step as f64 * self.delta_t).min(self.end_time)
    }
}

/// 单个边界的算例描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchCaseConfig {
    /// 边界名称
    pub name: String,

    /// 边界面数（面积与扩散系数均为均匀值时必填）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_faces: Option<usize>,

    /// 面面积 [m²]
    pub face_areas: FieldValue,

    /// 有效热扩散系数 [kg/m/s]
    pub alpha_eff: FieldValue,

    /// 边界条件
    pub boundary: HeatFluxBcConfig,
}

impl PatchCaseConfig {
    /// 推断边界面数并检查各逐面数据长度一致
    pub fn resolve_n_faces(&self) -> Result<usize, ConfigError> {
        let n = self
            .n_faces
            .or_else(|| self.face_areas.explicit_len())
            .or_else(|| self.alpha_eff.explicit_len())
            .or_else(|| self.boundary.q.explicit_len())
            .ok_or_else(|| ConfigError::Missing(format!("patches[{}].nFaces", self.name)))?;

        if n == 0 {
            return Err(ConfigError::invalid(
                format!("patches[{}].nFaces", self.name),
                0,
                "边界至少需要一个面",
            ));
        }
        self.face_areas.check_len("faceAreas", n)?;
        self.alpha_eff.check_len("alphaEff", n)?;
        Ok(n)
    }

    /// 验证边界描述
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.resolve_n_faces()?;
        self.face_areas.check_finite("faceAreas")?;
        self.alpha_eff.check_finite("alphaEff")?;
        self.boundary.validate_for_faces(n)
    }
}

/// 算例配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseConfig {
    /// 输运属性
    pub transport: TransportConfig,

    /// 时间控制
    #[serde(default)]
    pub control: ControlConfig,

    /// 热流边界列表
    pub patches: Vec<PatchCaseConfig>,
}

impl CaseConfig {
    /// 从文件加载并验证
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: CaseConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 验证算例
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.transport.validate()?;
        self.control.validate()?;
        if self.patches.is_empty() {
            return Err(ConfigError::Missing("patches".to_string()));
        }
        let mut seen = HashSet::new();
        for patch in &self.patches {
            if !seen.insert(patch.name.as_str()) {
                return Err(ConfigError::invalid("patches.name", &patch.name, "边界名称重复"));
            }
            patch.validate()?;
        }
        Ok(())
    }

    /// 保存到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 示例算例：一个功率型 ramp 边界和一个热流型时间窗边界
    pub fn example() -> Self {
        use crate::heat_flux::HeatSourceKind;

        Self {
            transport: TransportConfig::new(1.0e6),
            control: ControlConfig {
                start_time: 0.0,
                end_time: 10.0,
                delta_t: 0.5,
                n_correctors: 2,
            },
            patches: vec![
                PatchCaseConfig {
                    name: "heater".to_string(),
                    n_faces: Some(8),
                    face_areas: FieldValue::Uniform(0.0125),
                    alpha_eff: FieldValue::Uniform(1.0e-3),
                    boundary: HeatFluxBcConfig::ramp(HeatSourceKind::Power, 50.0, "alphaEff", 0.1),
                },
                PatchCaseConfig {
                    name: "pulse".to_string(),
                    n_faces: None,
                    face_areas: FieldValue::NonUniform(vec![0.01, 0.02, 0.01, 0.02]),
                    alpha_eff: FieldValue::Uniform(2.0e-3),
                    boundary: HeatFluxBcConfig::window(
                        HeatSourceKind::Flux,
                        vec![400.0, 500.0, 400.0, 500.0],
                        "alphaEff",
                        5.0,
                        1.0,
                    ),
                },
            ],
        }
    }
}
