// apps/hg_cli/src/commands/validate.rs

//! 算例验证命令
//!
//! 解析并验证算例文件，逐个构造边界条件，并对可疑但合法的设置给出警告。

use std::path::Path;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use hg_config::{CaseConfig, ControlConfig, ModulationConfig, PatchCaseConfig};
use tracing::{error, info, warn};

use super::run::build_partitions;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 算例文件路径
    #[arg(short, long)]
    pub case: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== HeatGrad 算例验证 ===");

    let result = check_case(&args.case);
    print_validation_result(&result, args.strict)
}

fn check_case(path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();
    println!("\n检查算例文件: {}", path.display());

    let case = match CaseConfig::from_file(path) {
        Ok(case) => case,
        Err(e) => {
            result.add_error(format!("无法加载算例: {}", e));
            return result;
        }
    };

    if let Err(e) = case.validate() {
        result.add_error(e.to_string());
        return result;
    }
    println!("  ✓ 算例格式有效");

    for patch_cfg in &case.patches {
        match build_partitions(patch_cfg, &case.transport, 1) {
            Ok(_) => println!("  ✓ 边界 '{}'", patch_cfg.name),
            Err(e) => result.add_error(format!("{:#}", e)),
        }
        check_schedule(patch_cfg, &case.control, &mut result);
    }

    result
}

/// 检查调制策略在模拟时间内是否起作用
fn check_schedule(patch_cfg: &PatchCaseConfig, control: &ControlConfig, result: &mut ValidationResult) {
    match patch_cfg.boundary.modulation {
        ModulationConfig::Window {
            start_time,
            duration,
        } => {
            if duration == 0.0 {
                result.add_warning(format!("边界 '{}' 的时间窗持续时间为 0，热源始终关闭", patch_cfg.name));
            } else if start_time >= control.end_time || start_time + duration <= control.start_time {
                result.add_warning(format!(
                    "边界 '{}' 的时间窗 [{}, {}) 不在模拟时间 [{}, {}] 内",
                    patch_cfg.name,
                    start_time,
                    start_time + duration,
                    control.start_time,
                    control.end_time
                ));
            }
        }
        ModulationConfig::Ramp {
            power_or_heat_flux_increase_ratio: inc,
            initial_ratio,
        } => {
            // ramp 每次系数更新推进一次
            let n_updates = control.n_steps() * control.n_correctors;
            let reached = initial_ratio.unwrap_or(0.0) + n_updates as f64 * inc;
            if reached < 1.0 {
                result.add_warning(format!(
                    "边界 '{}' 的热源在模拟结束时只达到 {:.1}%",
                    patch_cfg.name,
                    reached * 100.0
                ));
            }
        }
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    let success = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if success {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}
