//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-core`: 运行 ds-core 覆盖率
//! - `cov-workspace`: 运行 workspace 覆盖率
//! - `ops-check`: 检查操作脚本（语法、结构声明、操作是否被支持）

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use ds_core::{Parser, ScriptCommand, Structure};
use walkdir::WalkDir;

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn ensure_cargo_llvm_cov_available() -> anyhow::Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(["llvm-cov", "--version"]);
    let status = cmd.status();
    match status {
        Ok(s) if s.success() => Ok(()),
        _ => anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        ),
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => {
            let mut fmt = Command::new("cargo");
            fmt.args(["fmt", "--all", "--", "--check"]);
            run("cargo fmt --all -- --check", &mut fmt)?;

            let mut clippy = Command::new("cargo");
            clippy.args(["clippy", "--workspace", "--all-targets"]);
            run("cargo clippy --workspace --all-targets", &mut clippy)?;

            let mut test = Command::new("cargo");
            test.args(["test", "--workspace"]);
            run("cargo test --workspace", &mut test)?;
        }
        "cov-core" => {
            ensure_cargo_llvm_cov_available()?;

            let mut cov = Command::new("cargo");
            cov.args(["llvm-cov", "-p", "ds-core", "--all-features", "--html"]);
            run("cargo llvm-cov -p ds-core --all-features --html", &mut cov)?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "cov-workspace" => {
            ensure_cargo_llvm_cov_available()?;

            // 排除 xtask，避免稀释信号
            let mut cov = Command::new("cargo");
            cov.args([
                "llvm-cov",
                "--workspace",
                "--exclude",
                "xtask",
                "--all-features",
                "--html",
            ]);
            run(
                "cargo llvm-cov --workspace --exclude xtask --all-features --html",
                &mut cov,
            )?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "ops-check" => {
            let path = args.next();
            ops_check(path.as_deref())?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-core        运行 ds-core 覆盖率报告
  cov-workspace   运行 workspace 覆盖率报告
  ops-check       检查操作脚本

OPS-CHECK:
  cargo xtask ops-check [path]

  不带参数：检查 demos/ 下所有 .ops 文件
  带路径参数：检查指定文件或目录

  检查内容：
    - 脚本语法错误（带行号）
    - 是否声明了 structure
    - 操作是否被声明的数据结构支持
"#
    );
}

//=============================================================================
// ops-check 命令实现
//=============================================================================

/// 默认脚本目录（相对于 workspace root）
const DEMOS_DIR: &str = "demos";

/// 检查结果
#[derive(Default)]
struct OpsCheckResult {
    scripts_checked: usize,
    errors: usize,
    warnings: usize,
}

fn ops_check(path: Option<&str>) -> anyhow::Result<()> {
    let files = match path {
        Some(p) => {
            let path = PathBuf::from(p);
            if path.is_file() {
                vec![path]
            } else if path.is_dir() {
                collect_ops_files(&path)
            } else {
                anyhow::bail!("路径不存在: {}", p);
            }
        }
        None => {
            let dir = Path::new(DEMOS_DIR);
            if !dir.exists() {
                anyhow::bail!(
                    "默认脚本目录不存在: {}\n请在 workspace 根目录运行，或指定脚本路径",
                    dir.display()
                );
            }
            collect_ops_files(dir)
        }
    };

    if files.is_empty() {
        eprintln!("未找到脚本文件（.ops）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个脚本文件...\n", files.len());

    let mut result = OpsCheckResult::default();
    for file in &files {
        check_ops_file(file, &mut result);
    }

    print_check_result(&result);

    if result.errors > 0 {
        anyhow::bail!("脚本检查发现错误");
    }
    Ok(())
}

/// 收集目录下的所有 .ops 文件
fn collect_ops_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "ops"))
        .collect();
    files.sort();
    files
}

fn check_ops_file(file: &Path, result: &mut OpsCheckResult) {
    let script_id = file.display().to_string();
    result.scripts_checked += 1;

    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ERROR] {}: 无法读取文件 - {}", script_id, e);
            result.errors += 1;
            return;
        }
    };

    let mut parser = Parser::new();
    let script = parser.parse_lenient(&script_id, &content);
    for err in parser.errors() {
        eprintln!("[ERROR] {}: {}", script_id, err);
        result.errors += 1;
    }

    let Some(kind) = script.structure else {
        eprintln!(
            "[WARN] {}: 未声明 structure，运行时需要通过 --structure 指定",
            script_id
        );
        result.warnings += 1;
        return;
    };

    let structure = Structure::new(kind);
    for line in &script.commands {
        if let ScriptCommand::Action(action) = &line.command
            && !structure.supports(action)
        {
            eprintln!(
                "[ERROR] {}: 第 {} 行：{} 不支持操作 '{}'",
                script_id,
                line.line,
                kind,
                action.name()
            );
            result.errors += 1;
        }
    }
}

fn print_check_result(result: &OpsCheckResult) {
    eprintln!("─────────────────────────────────────────────────────");
    eprintln!("检查完成: {} 个脚本", result.scripts_checked);
    eprintln!();

    if result.errors > 0 {
        eprintln!("❌ {} 个错误, {} 个警告", result.errors, result.warnings);
    } else if result.warnings > 0 {
        eprintln!("⚠️  0 个错误, {} 个警告", result.warnings);
    } else {
        eprintln!("✅ 检查通过，无错误");
    }
}
