//! Moonlit - Host
//!
//! 加载配置与资源，构造界面，以 headless 模式驱动帧循环。

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, error, info, warn};

use host::{App, AppConfig, HeadlessDriver, Replay, ScriptedNarrative, UserSettings};
use vn_surface::{AssetCatalog, AudioMixer, MemoryMusic};

#[derive(Parser)]
#[command(name = "moonlit")]
#[command(about = "Moonlit 视觉小说")]
#[command(version)]
struct Cli {
    /// 配置文件路径
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// 输入回放文件（JSON）
    #[arg(long)]
    replay: Option<PathBuf>,

    /// 最大帧数
    #[arg(long, default_value_t = 600)]
    frames: usize,

    /// 日志级别（trace / debug / info / warn / error）
    #[arg(long, default_value = "info")]
    log_level: Level,

    /// 固定帧间隔（秒）
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .init();

    if let Err(e) = real_main(&cli) {
        error!("{e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main(cli: &Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(&cli.config);
    config.validate()?;

    let settings = UserSettings::load(&config.user_settings_path, &config.audio);

    let catalog = AssetCatalog::load(&config.assets_root, config.story_full_path())
        .context("资源目录加载失败")?;
    let missing = catalog.missing_files();
    if !missing.is_empty() {
        warn!(count = missing.len(), first = %missing[0], "部分资源文件缺失");
    }

    let narrative = ScriptedNarrative::from_document(catalog.story()).unwrap_or_else(|e| {
        warn!(error = %e, "故事文件无法由脚本叙事读取，使用内置剧情");
        ScriptedNarrative::fallback()
    });

    let mixer = AudioMixer::new(Box::new(MemoryMusic::new()));
    let mut app = App::new(&config, &settings, &catalog, Box::new(narrative), mixer)?;

    let replay = match &cli.replay {
        Some(path) => Replay::load(path)?,
        None => Replay::default(),
    };

    let mut driver = HeadlessDriver::new(config.screen_size(), cli.dt, cli.frames);
    let summary = driver.run(&mut app, &replay)?;
    info!(
        frames = summary.frames,
        draw_commands = summary.draw_commands,
        "运行结束"
    );

    app.user_settings()
        .save(&config.user_settings_path)
        .context("保存用户设置失败")?;
    Ok(())
}
