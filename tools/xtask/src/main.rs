//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `asset-check`: 检查资源目录（缺失文件、未被引用的文件）
//! - `story-check`: 检查故事文件能否被脚本叙事读取

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use vn_surface::assets::normalize_logical_path;
use vn_surface::{AssetCatalog, StoryDocument};
use walkdir::WalkDir;
use xshell::{Shell, cmd};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "开发辅助工具")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行 fmt、clippy、test 门禁检查
    CheckAll,
    /// 检查资源目录
    AssetCheck {
        /// 资源根目录
        #[arg(default_value = "assets")]
        assets_root: PathBuf,
        /// 以 JSON 输出报告
        #[arg(long)]
        json: bool,
    },
    /// 检查故事文件
    StoryCheck {
        /// 故事文件路径（默认与游戏读取的路径相同）
        path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::CheckAll => check_all(),
        Commands::AssetCheck { assets_root, json } => asset_check(&assets_root, json),
        Commands::StoryCheck { path } => story_check(&path.unwrap_or_else(default_story_path)),
    }
}

fn check_all() -> anyhow::Result<()> {
    let sh = Shell::new()?;

    eprintln!("\n==> cargo fmt --all -- --check");
    cmd!(sh, "cargo fmt --all -- --check").run()?;

    eprintln!("\n==> cargo clippy --workspace --all-targets");
    cmd!(sh, "cargo clippy --workspace --all-targets").run()?;

    eprintln!("\n==> cargo test --workspace");
    cmd!(sh, "cargo test --workspace").run()?;

    Ok(())
}

//=============================================================================
// asset-check 命令实现
//=============================================================================

/// 资源检查结果
#[derive(Debug, Default, PartialEq)]
struct AssetReport {
    /// 资源目录引用但磁盘上不存在的逻辑路径
    missing: Vec<String>,
    /// 磁盘上存在但资源目录未引用的文件
    unreferenced: Vec<String>,
}

impl AssetReport {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "missing": self.missing,
            "unreferenced": self.unreferenced,
        })
    }
}

/// 比对资源目录条目与磁盘文件
fn scan_assets(assets_root: &Path) -> anyhow::Result<AssetReport> {
    if !assets_root.is_dir() {
        anyhow::bail!("资源目录不存在: {}", assets_root.display());
    }

    let referenced: BTreeSet<String> = AssetCatalog::entries()
        .iter()
        .map(|entry| normalize_logical_path(entry))
        .collect();

    let mut on_disk = BTreeSet::new();
    for entry in WalkDir::new(assets_root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(assets_root)?;
        on_disk.insert(normalize_logical_path(&relative.to_string_lossy()));
    }

    Ok(AssetReport {
        missing: referenced.difference(&on_disk).cloned().collect(),
        unreferenced: on_disk
            .difference(&referenced)
            // 故事文件与用户设置不属于资源目录
            .filter(|path| !path.ends_with(".json"))
            .cloned()
            .collect(),
    })
}

fn asset_check(assets_root: &Path, json: bool) -> anyhow::Result<()> {
    let report = scan_assets(assets_root)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    } else {
        for path in &report.missing {
            eprintln!("[ERROR] 资源不存在: {path}");
        }
        for path in &report.unreferenced {
            eprintln!("[WARN] 未被引用的文件: {path}");
        }
        eprintln!("─────────────────────────────────────────────────────");
        eprintln!(
            "{} 个缺失, {} 个未引用",
            report.missing.len(),
            report.unreferenced.len()
        );
    }

    if !report.missing.is_empty() {
        anyhow::bail!("资源检查发现缺失文件");
    }
    Ok(())
}

//=============================================================================
// story-check 命令实现
//=============================================================================

/// 默认配置下游戏读取的故事文件
fn default_story_path() -> PathBuf {
    host::AppConfig::default().story_full_path()
}

fn story_check(path: &Path) -> anyhow::Result<()> {
    let document = StoryDocument::load(path)?;
    let narrative = host::ScriptedNarrative::from_document(&document)?;
    eprintln!(
        "✅ {}: {} 个段落",
        document.source(),
        narrative.beat_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_scan_reports_missing_and_unreferenced() {
        let dir = tempfile::tempdir().unwrap();
        let entries = AssetCatalog::entries();
        // 只放入第一个条目，再加一个多余文件
        touch(dir.path(), &entries[0]);
        touch(dir.path(), "images/unused.png");
        touch(dir.path(), "story.json");

        let report = scan_assets(dir.path()).unwrap();
        assert_eq!(report.missing.len(), entries.len() - 1);
        assert!(!report.missing.contains(&normalize_logical_path(&entries[0])));
        assert_eq!(report.unreferenced, ["images/unused.png"]);
    }

    #[test]
    fn test_complete_assets_pass() {
        let dir = tempfile::tempdir().unwrap();
        for entry in AssetCatalog::entries() {
            touch(dir.path(), &entry);
        }
        let report = scan_assets(dir.path()).unwrap();
        assert_eq!(report, AssetReport::default());
        assert_eq!(
            report.to_json(),
            serde_json::json!({"missing": [], "unreferenced": []})
        );
    }

    #[test]
    fn test_story_check_defaults_to_game_story() {
        assert_eq!(
            default_story_path(),
            PathBuf::from("assets").join("story/json/story.ink.json")
        );
        let cli = Cli::parse_from(["xtask", "story-check"]);
        assert!(matches!(cli.command, Commands::StoryCheck { path: None }));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_assets(&dir.path().join("nope")).is_err());
    }
}
