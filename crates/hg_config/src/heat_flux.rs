// crates/hg_config/src/heat_flux.rs

//! 热流温度边界条件配置
//!
//! 描述一个由热源驱动的定梯度温度边界，例如：
//!
//! ```json
//! {
//!     "type": "heatFluxWindow",
//!     "heatSource": "flux",
//!     "q": 10.0,
//!     "alphaEffName": "alphaEff",
//!     "startTime": 5.0,
//!     "duration": 1.0
//! }
//! ```
//!
//! `type` 选择时间调制策略，构造后不可切换：
//! - `heatFluxRamp`: 每次系数更新按 `powerOrHeatFluxIncreaseRatio` 线性增大幅值，封顶 1.0
//! - `heatFluxWindow`: 仅在 `[startTime, startTime + duration)` 内施加热源

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use hg_foundation::HgError;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::field_value::FieldValue;

/// 热源输入类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatSourceKind {
    /// 总功率 [W]，按边界总面积均摊
    Power,
    /// 热流密度 [W/m²]
    Flux,
}

impl HeatSourceKind {
    /// 配置中使用的名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Flux => "flux",
        }
    }
}

impl fmt::Display for HeatSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 与 JSON 中的写法一致，区分大小写
impl FromStr for HeatSourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "power" => Ok(Self::Power),
            "flux" => Ok(Self::Flux),
            _ => Err(ConfigError::invalid("heatSource", s, "期望 'power' 或 'flux'")),
        }
    }
}

/// 时间调制策略配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ModulationConfig {
    /// 逐次线性增长
    #[serde(rename = "heatFluxRamp", rename_all = "camelCase")]
    Ramp {
        /// 每次系数更新的增量比例，取值 (0, 1]
        power_or_heat_flux_increase_ratio: f64,
        /// 起始比例，默认 0
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initial_ratio: Option<f64>,
    },
    /// 矩形时间窗
    #[serde(rename = "heatFluxWindow", rename_all = "camelCase")]
    Window {
        /// 开始加热时间
        start_time: f64,
        /// 加热持续时间
        duration: f64,
    },
}

impl ModulationConfig {
    /// 策略的类型名
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Ramp { .. } => "heatFluxRamp",
            Self::Window { .. } => "heatFluxWindow",
        }
    }

    /// 验证策略参数
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Ramp {
                power_or_heat_flux_increase_ratio: inc,
                initial_ratio,
            } => {
                if !(inc > 0.0 && inc <= 1.0) {
                    return Err(ConfigError::invalid(
                        "powerOrHeatFluxIncreaseRatio",
                        inc,
                        "增量比例必须在 (0, 1] 范围内",
                    ));
                }
                if let Some(r) = initial_ratio {
                    HgError::check_range("initialRatio", r, 0.0, 1.0)?;
                }
            }
            Self::Window {
                start_time,
                duration,
            } => {
                if !start_time.is_finite() {
                    return Err(ConfigError::invalid("startTime", start_time, "必须为有限值"));
                }
                HgError::check_range("duration", duration, 0.0, f64::MAX)?;
            }
        }
        Ok(())
    }
}

/// 热流温度边界条件配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatFluxBcConfig {
    /// 时间调制策略（由 `type` 选择）
    #[serde(flatten)]
    pub modulation: ModulationConfig,

    /// 热源类型
    pub heat_source: HeatSourceKind,

    /// 热源大小：功率 [W] 或热流密度 [W/m²]
    pub q: FieldValue,

    /// 有效热扩散系数场名称
    #[serde(alias = "alphaEff")]
    pub alpha_eff_name: String,

    /// 上次写出时的温度梯度（重启用）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<FieldValue>,
}

impl HeatFluxBcConfig {
    /// 创建逐次线性增长的边界配置
    pub fn ramp(
        heat_source: HeatSourceKind,
        q: impl Into<FieldValue>,
        alpha_eff_name: impl Into<String>,
        increase_ratio: f64,
    ) -> Self {
        Self {
            modulation: ModulationConfig::Ramp {
                power_or_heat_flux_increase_ratio: increase_ratio,
                initial_ratio: None,
            },
            heat_source,
            q: q.into(),
            alpha_eff_name: alpha_eff_name.into(),
            gradient: None,
        }
    }

    /// 创建时间窗边界配置
    pub fn window(
        heat_source: HeatSourceKind,
        q: impl Into<FieldValue>,
        alpha_eff_name: impl Into<String>,
        start_time: f64,
        duration: f64,
    ) -> Self {
        Self {
            modulation: ModulationConfig::Window {
                start_time,
                duration,
            },
            heat_source,
            q: q.into(),
            alpha_eff_name: alpha_eff_name.into(),
            gradient: None,
        }
    }

    /// 设置起始增长比例（仅对 ramp 有效）
    pub fn with_initial_ratio(mut self, ratio: f64) -> Self {
        if let ModulationConfig::Ramp { initial_ratio, .. } = &mut self.modulation {
            *initial_ratio = Some(ratio);
        }
        self
    }

    /// 设置重启梯度
    pub fn with_gradient(mut self, gradient: impl Into<FieldValue>) -> Self {
        self.gradient = Some(gradient.into());
        self
    }

    /// 验证与面数无关的配置项
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.modulation.validate()?;
        self.q.check_finite("q")?;
        if self.alpha_eff_name.trim().is_empty() {
            return Err(ConfigError::Missing("alphaEffName".to_string()));
        }
        if let Some(g) = &self.gradient {
            g.check_finite("gradient")?;
        }
        Ok(())
    }

    /// 验证逐面数据与边界面数一致
    pub fn validate_for_faces(&self, n_faces: usize) -> Result<(), ConfigError> {
        self.validate()?;
        self.q.check_len("q", n_faces)?;
        if let Some(g) = &self.gradient {
            g.check_len("gradient", n_faces)?;
        }
        Ok(())
    }

    /// 从 JSON 字符串解析并验证
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// 序列化为格式化 JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window() {
        let json = r#"{
            "type": "heatFluxWindow",
            "heatSource": "flux",
            "q": 10,
            "alphaEffName": "alphaEff",
            "startTime": 5,
            "duration": 1
        }"#;
        let cfg = HeatFluxBcConfig::from_json_str(json).unwrap();
        assert_eq!(cfg.heat_source, HeatSourceKind::Flux);
        assert_eq!(
            cfg.modulation,
            ModulationConfig::Window {
                start_time: 5.0,
                duration: 1.0
            }
        );
        assert_eq!(cfg.q, FieldValue::Uniform(10.0));
    }

    #[test]
    fn test_parse_ramp_with_alias() {
        let json = r#"{
            "type": "heatFluxRamp",
            "heatSource": "power",
            "q": [1.0, 2.0],
            "alphaEff": "alphaT",
            "powerOrHeatFluxIncreaseRatio": 0.05
        }"#;
        let cfg = HeatFluxBcConfig::from_json_str(json).unwrap();
        assert_eq!(cfg.alpha_eff_name, "alphaT");
        assert_eq!(cfg.heat_source, HeatSourceKind::Power);
        assert!(matches!(
            cfg.modulation,
            ModulationConfig::Ramp { initial_ratio: None, .. }
        ));
    }

    #[test]
    fn test_missing_key_is_error() {
        let json = r#"{ "type": "heatFluxRamp", "heatSource": "flux", "q": 1.0,
                        "powerOrHeatFluxIncreaseRatio": 0.1 }"#;
        assert!(HeatFluxBcConfig::from_json_str(json).is_err());
    }

    #[test]
    fn test_unknown_heat_source_is_error() {
        let json = r#"{ "type": "heatFluxRamp", "heatSource": "radiation", "q": 1.0,
                        "alphaEffName": "a", "powerOrHeatFluxIncreaseRatio": 0.1 }"#;
        assert!(HeatFluxBcConfig::from_json_str(json).is_err());
        assert!("radiation".parse::<HeatSourceKind>().is_err());
        assert_eq!("power".parse::<HeatSourceKind>().unwrap(), HeatSourceKind::Power);
    }

    #[test]
    fn test_heat_source_case_matches_json() {
        let json = r#"{ "type": "heatFluxRamp", "heatSource": "Power", "q": 1.0,
                        "alphaEffName": "a", "powerOrHeatFluxIncreaseRatio": 0.1 }"#;
        assert!(HeatFluxBcConfig::from_json_str(json).is_err());
        assert!("Power".parse::<HeatSourceKind>().is_err());
        for kind in [HeatSourceKind::Power, HeatSourceKind::Flux] {
            assert_eq!(kind.to_string().parse::<HeatSourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_invalid_ramp_ratio() {
        for bad in [0.0, -0.1, 1.5, f64::NAN] {
            let cfg = HeatFluxBcConfig::ramp(HeatSourceKind::Flux, 1.0, "alphaEff", bad);
            assert!(cfg.validate().is_err(), "ratio {} should be rejected", bad);
        }
        let ok = HeatFluxBcConfig::ramp(HeatSourceKind::Flux, 1.0, "alphaEff", 1.0);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_invalid_initial_ratio() {
        let cfg = HeatFluxBcConfig::ramp(HeatSourceKind::Flux, 1.0, "alphaEff", 0.1)
            .with_initial_ratio(1.2);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_negative_duration() {
        let cfg = HeatFluxBcConfig::window(HeatSourceKind::Flux, 1.0, "alphaEff", 0.0, -1.0);
        assert!(cfg.validate().is_err());
        let zero = HeatFluxBcConfig::window(HeatSourceKind::Flux, 1.0, "alphaEff", 0.0, 0.0);
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn test_validate_for_faces() {
        let cfg = HeatFluxBcConfig::ramp(HeatSourceKind::Flux, vec![1.0, 2.0, 3.0], "a", 0.1);
        assert!(cfg.validate_for_faces(3).is_ok());
        assert!(matches!(
            cfg.validate_for_faces(4),
            Err(ConfigError::SizeMismatch { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn test_serialized_keys() {
        let cfg = HeatFluxBcConfig::ramp(HeatSourceKind::Power, 100.0, "alphaEff", 0.1);
        let value: serde_json::Value = serde_json::to_value(&cfg).unwrap();
        assert_eq!(value["type"], "heatFluxRamp");
        assert_eq!(value["heatSource"], "power");
        assert_eq!(value["alphaEffName"], "alphaEff");
        assert_eq!(value["powerOrHeatFluxIncreaseRatio"], 0.1);
        assert!(value.get("initialRatio").is_none());
        assert!(value.get("gradient").is_none());
    }
}
