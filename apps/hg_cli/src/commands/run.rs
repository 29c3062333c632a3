// apps/hg_cli/src/commands/run.rs

//! 运行算例命令
//!
//! 每个时间步对每个边界执行 `nCorrectors` 次"系数更新 → 求值"，模拟宿主求解器
//! 的外层修正循环。边界可以切分为多个分区，各分区独立持有边界条件实例，
//! 只通过面积归约耦合。结束时把最终梯度写入重启算例文件。

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use hg_config::{CaseConfig, FieldValue, PatchCaseConfig, TransportConfig};
use hg_foundation::KahanSum;
use hg_physics::{BoundaryPatch, HeatFluxTemperatureBc, PatchContext, PatchFieldRegistry, PatchGeometry};
use tracing::{debug, info};

/// 运行算例参数
#[derive(Args)]
pub struct RunArgs {
    /// 算例文件路径
    #[arg(short, long)]
    pub case: PathBuf,

    /// 输出目录
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// 每个边界切分的分区数
    #[arg(short, long, default_value = "1")]
    pub partitions: usize,

    /// 覆盖算例中的结束时间 [秒]
    #[arg(short = 't', long)]
    pub end_time: Option<f64>,

    /// 边界相邻单元温度 [K]
    #[arg(long, default_value = "300.0")]
    pub cell_temperature: f64,

    /// 面心到单元中心距离的倒数 [1/m]
    #[arg(long, default_value = "100.0")]
    pub delta_coeff: f64,

    /// 日志输出间隔（时间步数）
    #[arg(long, default_value = "10")]
    pub log_interval: usize,
}

/// 单个分区上的边界条件及其数据
pub(crate) struct PartitionRun {
    pub patch: BoundaryPatch,
    pub registry: PatchFieldRegistry,
    pub bc: HeatFluxTemperatureBc,
}

/// 由算例描述创建一个边界的所有分区
pub(crate) fn build_partitions(
    patch_cfg: &PatchCaseConfig,
    transport: &TransportConfig,
    n_parts: usize,
) -> Result<Vec<PartitionRun>> {
    let n_faces = patch_cfg.resolve_n_faces()?;
    let areas = patch_cfg.face_areas.expand("faceAreas", n_faces)?;
    let alpha = patch_cfg.alpha_eff.expand("alphaEff", n_faces)?;
    let q = patch_cfg.boundary.q.expand("q", n_faces)?;
    let gradient = match &patch_cfg.boundary.gradient {
        Some(g) => Some(g.expand("gradient", n_faces)?),
        None => None,
    };

    let whole = BoundaryPatch::new(patch_cfg.name.clone(), areas)
        .with_context(|| format!("边界 '{}' 面积无效", patch_cfg.name))?;
    let parts = whole.decompose(n_parts)?;

    let mut runs = Vec::with_capacity(parts.len());
    let mut offset = 0;
    for part in parts {
        let range = offset..offset + part.n_faces();
        offset = range.end;

        // 逐面数据按分区切片，均匀值保持均匀
        let mut cfg = patch_cfg.boundary.clone();
        if !cfg.q.is_uniform() {
            cfg.q = FieldValue::NonUniform(q[range.clone()].to_vec());
        }
        if let Some(g) = &gradient {
            cfg.gradient = Some(FieldValue::NonUniform(g[range.clone()].to_vec()));
        }

        let registry =
            PatchFieldRegistry::new().with_field(cfg.alpha_eff_name.clone(), part.name(), alpha[range].to_vec());
        let bc = HeatFluxTemperatureBc::new(&part, &cfg, transport)
            .with_context(|| format!("创建边界 '{}' 的边界条件失败", patch_cfg.name))?;

        runs.push(PartitionRun {
            patch: part,
            registry,
            bc,
        });
    }
    Ok(runs)
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== HeatGrad 算例启动 ===");

    let mut case = CaseConfig::from_file(&args.case)
        .with_context(|| format!("无法加载算例文件: {}", args.case.display()))?;
    if let Some(end_time) = args.end_time {
        case.control.end_time = end_time;
    }
    case.validate().context("算例验证失败")?;

    info!(
        "rhoCp0={}, 时间 [{}, {}], dt={}, 修正次数={}",
        case.transport.rho_cp0,
        case.control.start_time,
        case.control.end_time,
        case.control.delta_t,
        case.control.n_correctors
    );

    let mut patches = Vec::with_capacity(case.patches.len());
    for patch_cfg in &case.patches {
        let runs = build_partitions(patch_cfg, &case.transport, args.partitions)?;
        info!(
            "边界 '{}': {} / {}, {} 个分区",
            patch_cfg.name,
            patch_cfg.boundary.modulation.type_name(),
            patch_cfg.boundary.heat_source,
            runs.len()
        );
        patches.push(runs);
    }

    std::fs::create_dir_all(&args.output)?;

    let start = Instant::now();
    let n_steps = case.control.n_steps();
    let mut n_refreshes = 0usize;

    for step in 1..=n_steps {
        let time = case.control.step_time(step);

        for (patch_cfg, runs) in case.patches.iter().zip(patches.iter_mut()) {
            let mut heat = KahanSum::new();
            for run in runs.iter_mut() {
                let internal = vec![args.cell_temperature; run.patch.n_faces()];
                let delta = vec![args.delta_coeff; run.patch.n_faces()];

                for _ in 0..case.control.n_correctors {
                    let ctx = PatchContext::new(&run.patch, &run.registry, time);
                    if run.bc.update_coeffs(&ctx).with_context(|| {
                        format!("边界 '{}' 在 t={} 更新失败", patch_cfg.name, time)
                    })? {
                        n_refreshes += 1;
                    }
                    run.bc.evaluate(&internal, &delta)?;
                }
                heat.add(run.bc.heat_input(&PatchContext::new(&run.patch, &run.registry, time))?);
            }

            if step % args.log_interval.max(1) == 0 || step == n_steps {
                let (g_min, g_max) = runs
                    .iter()
                    .flat_map(|r| r.bc.gradient().iter().copied())
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), g| (lo.min(g), hi.max(g)));
                info!(
                    "t={:.4} s: '{}' 梯度 [{:.4e}, {:.4e}] K/m, 热流 {:.4} W",
                    time,
                    patch_cfg.name,
                    g_min,
                    g_max,
                    heat.value()
                );
            } else {
                debug!("t={:.4} s: '{}' 热流 {:.4} W", time, patch_cfg.name, heat.value());
            }
        }
    }

    // 汇总各分区梯度写入重启算例
    for (patch_cfg, runs) in case.patches.iter_mut().zip(&patches) {
        let gradient: Vec<f64> = runs
            .iter()
            .flat_map(|r| r.bc.gradient().iter().copied())
            .collect();
        patch_cfg.boundary.gradient = Some(FieldValue::NonUniform(gradient));
    }
    let restart_path = args.output.join("restart.json");
    case.save_to_file(&restart_path)
        .with_context(|| format!("无法写出重启文件: {}", restart_path.display()))?;

    let elapsed = start.elapsed();
    info!("=== 算例完成 ===");
    info!("总步数: {}", n_steps);
    info!("边界刷新次数: {}", n_refreshes);
    info!("计算时间: {:.3} s", elapsed.as_secs_f64());
    info!("重启文件: {}", restart_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(case: PathBuf, output: PathBuf, partitions: usize) -> RunArgs {
        RunArgs {
            case,
            output,
            partitions,
            end_time: None,
            cell_temperature: 300.0,
            delta_coeff: 100.0,
            log_interval: 5,
        }
    }

    #[test]
    fn test_run_example_writes_restart() {
        let dir = tempfile::tempdir().unwrap();
        let case_path = dir.path().join("case.json");
        CaseConfig::example().save_to_file(&case_path).unwrap();

        let out = dir.path().join("out");
        execute(args_for(case_path, out.clone(), 1)).unwrap();

        let restart = CaseConfig::from_file(out.join("restart.json")).unwrap();
        assert_eq!(restart.patches.len(), 2);

        // ramp 在 20 步 × 2 次修正内早已饱和，梯度等于满功率值
        let heater = &restart.patches[0];
        let g = match &heater.boundary.gradient {
            Some(FieldValue::NonUniform(g)) => g.clone(),
            other => panic!("缺少重启梯度: {:?}", other),
        };
        let expected = (50.0 / (8.0 * 0.0125)) / (1e-3 * restart.transport.rho_cp0);
        for v in g {
            assert!((v - expected).abs() < 1e-9 * expected);
        }

        // 时间窗在 t=10 时已关闭
        let pulse = &restart.patches[1];
        match &pulse.boundary.gradient {
            Some(FieldValue::NonUniform(g)) => assert!(g.iter().all(|&v| v == 0.0)),
            other => panic!("缺少重启梯度: {:?}", other),
        }
    }

    #[test]
    fn test_partitioned_run_matches_serial() {
        let dir = tempfile::tempdir().unwrap();
        let case_path = dir.path().join("case.json");
        CaseConfig::example().save_to_file(&case_path).unwrap();

        let serial = dir.path().join("serial");
        let split = dir.path().join("split");
        execute(args_for(case_path.clone(), serial.clone(), 1)).unwrap();
        execute(args_for(case_path, split.clone(), 3)).unwrap();

        let a = CaseConfig::from_file(serial.join("restart.json")).unwrap();
        let b = CaseConfig::from_file(split.join("restart.json")).unwrap();
        for (pa, pb) in a.patches.iter().zip(&b.patches) {
            let (Some(FieldValue::NonUniform(ga)), Some(FieldValue::NonUniform(gb))) =
                (&pa.boundary.gradient, &pb.boundary.gradient)
            else {
                panic!("缺少重启梯度");
            };
            assert_eq!(ga.len(), gb.len());
            for (x, y) in ga.iter().zip(gb) {
                assert!((x - y).abs() <= 1e-12 * x.abs().max(1.0));
            }
        }
    }

    #[test]
    fn test_missing_case_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = execute(args_for(dir.path().join("nope.json"), dir.path().join("out"), 1));
        assert!(result.is_err());
    }
}
