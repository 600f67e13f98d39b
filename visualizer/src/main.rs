//! # dsviz
//!
//! 数据结构可视化的 headless 命令行入口：运行操作脚本，逐帧播放动画并导出场景快照。
//!
//! ## 用法
//!
//! ```bash
//! dsviz run demos/avl.ops
//! dsviz run demos/heap.ops --speed 2 --export-dir out
//! dsviz run demos/stack.ops --structure queue -v
//! dsviz check demos/list.ops
//! dsviz init-config config.json
//! ```

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Level, error, info, warn};

use ds_core::{Parser as ScriptParser, StructureKind};
use visualizer::{AppConfig, ScriptRunner, Session};

#[derive(Parser)]
#[command(name = "dsviz")]
#[command(about = "数据结构可视化 - 运行操作脚本并导出动画结果")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 日志详细程度（-v: debug，-vv: trace）
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行操作脚本
    Run {
        /// 脚本文件路径
        script: PathBuf,

        /// 数据结构（覆盖脚本中的 structure 指令）
        #[arg(short, long)]
        structure: Option<StructureKind>,

        /// 配置文件（默认：config.json，不存在时使用默认配置）
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,

        /// 帧率（覆盖配置）
        #[arg(long)]
        fps: Option<u32>,

        /// 初始播放速度
        #[arg(long)]
        speed: Option<f32>,

        /// 导出目录（覆盖配置）
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },

    /// 检查脚本语法
    Check {
        /// 脚本文件路径
        script: PathBuf,
    },

    /// 写出默认配置文件
    InitConfig {
        /// 输出路径（默认：config.json）
        #[arg(default_value = "config.json")]
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match real_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn real_main(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            script,
            structure,
            config,
            fps,
            speed,
            export_dir,
        } => {
            let mut config = AppConfig::load(&config);
            if let Some(fps) = fps {
                config.animation.fps = fps;
            }
            if let Some(dir) = export_dir {
                config.export.output_dir = dir;
            }
            config.validate().context("配置无效")?;
            run_script(&script, structure, config, speed)
        }
        Commands::Check { script } => check_script(&script),
        Commands::InitConfig { path } => {
            if path.exists() {
                bail!("{} 已存在", path.display());
            }
            AppConfig::default()
                .save(&path)
                .with_context(|| format!("无法写入配置 {}", path.display()))?;
            println!("已写出默认配置: {}", path.display());
            Ok(())
        }
    }
}

fn read_script(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("无法读取脚本 {}", path.display()))
}

fn run_script(
    path: &Path,
    structure: Option<StructureKind>,
    config: AppConfig,
    speed: Option<f32>,
) -> Result<()> {
    let text = read_script(path)?;
    let script = ScriptParser::new()
        .parse(&path.display().to_string(), &text)
        .with_context(|| format!("脚本解析失败 {}", path.display()))?;

    let kind = structure.or(script.structure).unwrap_or(config.structure);
    if let (Some(cli_kind), Some(script_kind)) = (structure, script.structure)
        && cli_kind != script_kind
    {
        warn!(script = %script_kind, cli = %cli_kind, "命令行指定的结构覆盖了脚本中的结构");
    }

    let mut session = Session::new(kind, config);
    if let Some(speed) = speed {
        session.set_speed(speed);
    }

    let runner = ScriptRunner::from_config(&session.config().animation);
    let report = runner.run(&mut session, &script);

    for line in &report.feedback {
        println!("{:>4} [{}] {}", line.line, line.kind, line.text);
    }
    println!("{}: {}", kind.title(), session.contents());
    for path in &report.exports {
        println!("exported: {}", path.display());
    }

    info!(
        actions = report.actions,
        rejected = report.rejected,
        frames = report.frames,
        seconds = report.frames as f32 * runner.frame_delta(),
        "运行结束"
    );
    if report.rejected > 0 {
        warn!(rejected = report.rejected, "部分操作不被当前结构支持");
    }
    Ok(())
}

fn check_script(path: &Path) -> Result<()> {
    let text = read_script(path)?;
    let mut parser = ScriptParser::new();
    let script = parser.parse_lenient(&path.display().to_string(), &text);

    if parser.errors().is_empty() {
        let structure = script
            .structure
            .map(|kind| kind.title())
            .unwrap_or("(未指定)");
        println!(
            "{}: {} 条指令，结构 {}",
            path.display(),
            script.len(),
            structure
        );
        return Ok(());
    }

    for err in parser.errors() {
        eprintln!("{}: {}", path.display(), err);
    }
    bail!("{} 处错误", parser.errors().len())
}
