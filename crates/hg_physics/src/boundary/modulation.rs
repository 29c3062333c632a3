// crates/hg_physics/src/boundary/modulation.rs

//! 热源时间调制
//!
//! - 线性增长（ramp）：每次刷新推进一次，比例 `min(1, initial + n·inc)`，到 1 后保持
//! - 时间窗（window）：`startTime ≤ t < startTime + duration` 内幅值为 1，否则为 0
//!
//! 增长比例由推进次数计算而不是逐次累加，10 次 0.1 的结果恰好是 1.0。
//! 推进与当前时间无关：同一时间步内多次刷新会多次推进。

use hg_config::ModulationConfig;

/// 比例与 1 的差在此范围内视为饱和
const SATURATION_TOL: f64 = 1e-12;

/// 线性增长状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampState {
    increment: f64,
    initial_ratio: Option<f64>,
    n_advances: u64,
    ratio: f64,
}

impl RampState {
    /// 创建增长状态
    pub fn new(increment: f64, initial_ratio: Option<f64>) -> Self {
        let mut state = Self {
            increment,
            initial_ratio,
            n_advances: 0,
            ratio: 0.0,
        };
        state.ratio = state.ratio_after(0);
        state
    }

    fn ratio_after(&self, n_advances: u64) -> f64 {
        let r = self.initial_ratio.unwrap_or(0.0) + n_advances as f64 * self.increment;
        if r >= 1.0 - SATURATION_TOL {
            1.0
        } else {
            r.max(0.0)
        }
    }

    /// 当前比例
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// 每次推进的增量
    #[inline]
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// 已推进次数
    #[inline]
    pub fn n_advances(&self) -> u64 {
        self.n_advances
    }

    /// 是否已饱和
    #[inline]
    pub fn is_saturated(&self) -> bool {
        self.ratio >= 1.0
    }

    /// 推进一次后的状态（不修改自身）
    pub fn advanced(&self) -> Self {
        if self.is_saturated() {
            return *self;
        }
        let n_advances = self.n_advances + 1;
        Self {
            n_advances,
            ratio: self.ratio_after(n_advances),
            ..*self
        }
    }

    /// 推进一次
    pub fn advance(&mut self) {
        *self = self.advanced();
    }
}

/// 时间窗参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowState {
    start_time: f64,
    duration: f64,
}

impl WindowState {
    /// 创建时间窗
    pub fn new(start_time: f64, duration: f64) -> Self {
        Self {
            start_time,
            duration,
        }
    }

    /// 开始时间
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// 持续时间
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// 结束时间（不含）
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// 时刻 `t` 是否在窗内（左闭右开）
    #[inline]
    pub fn is_active(&self, t: f64) -> bool {
        t >= self.start_time && t < self.end_time()
    }

    /// 时刻 `t` 的幅值
    #[inline]
    pub fn amplitude(&self, t: f64) -> f64 {
        if self.is_active(t) {
            1.0
        } else {
            0.0
        }
    }
}

/// 时间调制策略
///
/// 构造时按配置 `type` 选定，之后不会切换。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemporalModulation {
    /// 逐次线性增长
    Ramp(RampState),
    /// 矩形时间窗
    Window(WindowState),
}

impl TemporalModulation {
    /// 从配置创建
    pub fn from_config(config: &ModulationConfig) -> Self {
        match *config {
            ModulationConfig::Ramp {
                power_or_heat_flux_increase_ratio,
                initial_ratio,
            } => Self::Ramp(RampState::new(power_or_heat_flux_increase_ratio, initial_ratio)),
            ModulationConfig::Window {
                start_time,
                duration,
            } => Self::Window(WindowState::new(start_time, duration)),
        }
    }

    /// 导出配置（增长进度不写出）
    pub fn to_config(&self) -> ModulationConfig {
        match *self {
            Self::Ramp(r) => ModulationConfig::Ramp {
                power_or_heat_flux_increase_ratio: r.increment,
                initial_ratio: r.initial_ratio,
            },
            Self::Window(w) => ModulationConfig::Window {
                start_time: w.start_time,
                duration: w.duration,
            },
        }
    }

    /// 预览一次刷新：返回本次幅值和刷新成功后应提交的状态
    ///
    /// ramp 的幅值是推进后的比例，即第 k 次刷新使用 `initial + k·inc`。
    pub fn preview(&self, time: f64) -> (f64, Self) {
        match *self {
            Self::Ramp(r) => {
                let next = r.advanced();
                (next.ratio(), Self::Ramp(next))
            }
            Self::Window(w) => (w.amplitude(time), *self),
        }
    }

    /// 推进一次并返回幅值
    pub fn advance(&mut self, time: f64) -> f64 {
        let (amplitude, next) = self.preview(time);
        *self = next;
        amplitude
    }

    /// 不推进状态时的当前幅值
    pub fn current_amplitude(&self, time: f64) -> f64 {
        match self {
            Self::Ramp(r) => r.ratio(),
            Self::Window(w) => w.amplitude(time),
        }
    }

    /// 增长比例（时间窗返回 None）
    pub fn ramp_ratio(&self) -> Option<f64> {
        match self {
            Self::Ramp(r) => Some(r.ratio()),
            Self::Window(_) => None,
        }
    }

    /// 策略类型名
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Ramp(_) => "heatFluxRamp",
            Self::Window(_) => "heatFluxWindow",
        }
    }
}
