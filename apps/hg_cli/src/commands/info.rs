// apps/hg_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示版本、支持的边界配置项，以及示例算例。

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use hg_config::CaseConfig;
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 显示版本与层级信息
    #[arg(long)]
    pub system: bool,

    /// 显示示例算例
    #[arg(long)]
    pub example: bool,

    /// 把示例算例写入文件
    #[arg(long)]
    pub write_example: Option<PathBuf>,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== HeatGrad 信息 ===");

    if let Some(path) = &args.write_example {
        CaseConfig::example()
            .save_to_file(path)
            .with_context(|| format!("无法写出示例算例: {}", path.display()))?;
        info!("示例算例已写入 {}", path.display());
    }

    if args.system {
        print_system_info();
    }

    if args.example {
        print_example()?;
    }

    if !args.system && !args.example && args.write_example.is_none() {
        // 默认显示所有信息
        print_system_info();
        println!();
        print_example()?;
    }

    Ok(())
}

fn print_system_info() {
    println!("=== 系统信息 ===");
    println!("HeatGrad CLI 版本: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "层级: foundation={}, config={}, physics={}",
        hg_foundation::LAYER,
        hg_config::LAYER,
        hg_physics::LAYER
    );
    println!("目标平台: {}", std::env::consts::ARCH);
    println!("操作系统: {}", std::env::consts::OS);

    println!("\n边界配置项:");
    println!("  type                          heatFluxRamp | heatFluxWindow");
    println!("  heatSource                    power [W] | flux [W/m²]");
    println!("  q                             数值或逐面数组");
    println!("  alphaEffName                  有效热扩散系数场名");
    println!("  powerOrHeatFluxIncreaseRatio  ramp 每次更新的增量 (0, 1]");
    println!("  initialRatio                  ramp 起始比例 [0, 1]");
    println!("  startTime, duration           时间窗 [startTime, startTime+duration)");
    println!("  gradient                      重启梯度");
}

fn print_example() -> Result<()> {
    println!("=== 示例算例 ===");
    let text = serde_json::to_string_pretty(&CaseConfig::example())?;
    println!("{}", text);
    Ok(())
}
