//! # Audio 模块
//!
//! 全局音频簿记：音效音量、存活的音效句柄与背景音乐播放器。
//!
//! ## 设计说明
//!
//! - 音效句柄以 `Rc<dyn SoundEffect>` 共享：按钮持有一份用于播放，
//!   [`AudioMixer`] 持有一份用于音量扇出
//! - [`AudioMixer::set_global_sfx_volume`] 是唯一的音量扇出点，
//!   界面上的滑块无需知道有哪些音效对象
//! - 真实的解码与播放由后端实现这两个 trait；[`MemorySound`] / [`MemoryMusic`]
//!   是不依赖设备的实现，用于 headless 模式与测试

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::assets::SoundRef;

/// 音效对象
///
/// 通过共享引用调用，实现方自行处理内部可变性。
pub trait SoundEffect {
    /// 播放一次
    fn play(&self);

    /// 设置音量 (0.0 - 1.0)
    fn set_volume(&self, volume: f32);

    /// 当前音量
    fn volume(&self) -> f32;
}

/// 背景音乐播放器
pub trait MusicPlayer {
    /// 循环播放
    fn play_looped(&mut self, music: &SoundRef);

    /// 停止播放
    fn stop(&mut self);

    /// 设置音量 (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32);

    /// 当前音量
    fn volume(&self) -> f32;

    /// 当前播放的音乐
    fn current(&self) -> Option<&SoundRef>;
}

/// 音频混音器
pub struct AudioMixer {
    /// 全局音效音量 (0.0 - 1.0)
    sfx_volume: f32,
    /// 存活的音效句柄
    sfx: Vec<Rc<dyn SoundEffect>>,
    /// 背景音乐播放器
    music: Box<dyn MusicPlayer>,
}

impl AudioMixer {
    pub fn new(music: Box<dyn MusicPlayer>) -> Self {
        Self {
            sfx_volume: 1.0,
            sfx: Vec::new(),
            music,
        }
    }

    /// 设置初始音效音量
    pub fn with_sfx_volume(mut self, volume: f32) -> Self {
        self.set_global_sfx_volume(volume);
        self
    }

    /// 设置初始音乐音量
    pub fn with_music_volume(mut self, volume: f32) -> Self {
        self.set_music_volume(volume);
        self
    }

    /// 登记一个音效句柄，并立即应用当前全局音量
    ///
    /// 同一句柄重复登记时只保留一份。
    pub fn register_sfx(&mut self, handle: Rc<dyn SoundEffect>) {
        if self.sfx.iter().any(|existing| Rc::ptr_eq(existing, &handle)) {
            return;
        }
        handle.set_volume(self.sfx_volume);
        self.sfx.push(handle);
    }

    /// 设置全局音效音量并扇出到所有已登记句柄
    ///
    /// 返回钳制后的实际音量。
    pub fn set_global_sfx_volume(&mut self, volume: f32) -> f32 {
        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        self.sfx_volume = volume;
        for handle in &self.sfx {
            handle.set_volume(volume);
        }
        debug!(volume = volume, handles = self.sfx.len(), "全局音效音量");
        volume
    }

    /// 当前全局音效音量
    pub fn global_sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    /// 已登记的音效句柄数量
    pub fn sfx_count(&self) -> usize {
        self.sfx.len()
    }

    /// 循环播放背景音乐
    ///
    /// 已在播放同一首时不重新开始。
    pub fn play_music(&mut self, music: &SoundRef) {
        if self.music.current() == Some(music) {
            return;
        }
        self.music.play_looped(music);
    }

    /// 从头循环播放背景音乐，即使同一首正在播放
    pub fn restart_music(&mut self, music: &SoundRef) {
        self.music.stop();
        self.music.play_looped(music);
    }

    /// 停止背景音乐
    pub fn stop_music(&mut self) {
        self.music.stop();
    }

    /// 设置背景音乐音量，返回钳制后的实际音量
    pub fn set_music_volume(&mut self, volume: f32) -> f32 {
        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        self.music.set_volume(volume);
        volume
    }

    /// 当前背景音乐音量
    pub fn music_volume(&self) -> f32 {
        self.music.volume()
    }

    /// 背景音乐播放器
    pub fn music(&self) -> &dyn MusicPlayer {
        self.music.as_ref()
    }
}

/// 不依赖设备的音效：只记录音量与播放次数
#[derive(Debug)]
pub struct MemorySound {
    sound: SoundRef,
    volume: Cell<f32>,
    plays: Cell<u32>,
}

impl MemorySound {
    pub fn new(sound: SoundRef) -> Self {
        Self {
            sound,
            volume: Cell::new(1.0),
            plays: Cell::new(0),
        }
    }

    /// 包装为共享句柄
    pub fn shared(sound: SoundRef) -> Rc<Self> {
        Rc::new(Self::new(sound))
    }

    pub fn sound(&self) -> &SoundRef {
        &self.sound
    }

    /// 已播放次数
    pub fn play_count(&self) -> u32 {
        self.plays.get()
    }
}

impl SoundEffect for MemorySound {
    fn play(&self) {
        self.plays.set(self.plays.get() + 1);
        debug!(path = %self.sound.path(), volume = self.volume.get(), "播放音效");
    }

    fn set_volume(&self, volume: f32) {
        self.volume.set(volume);
    }

    fn volume(&self) -> f32 {
        self.volume.get()
    }
}

/// 不依赖设备的背景音乐播放器
#[derive(Debug)]
pub struct MemoryMusic {
    current: Option<SoundRef>,
    volume: f32,
    /// 开始播放的次数
    starts: u32,
}

impl MemoryMusic {
    pub fn new() -> Self {
        Self {
            current: None,
            volume: 1.0,
            starts: 0,
        }
    }

    pub fn start_count(&self) -> u32 {
        self.starts
    }
}

impl Default for MemoryMusic {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicPlayer for MemoryMusic {
    fn play_looped(&mut self, music: &SoundRef) {
        self.current = Some(music.clone());
        self.starts += 1;
        debug!(path = %music.path(), volume = self.volume, "开始循环播放音乐");
    }

    fn stop(&mut self) {
        if let Some(music) = self.current.take() {
            debug!(path = %music.path(), "音乐已停止");
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn current(&self) -> Option<&SoundRef> {
        self.current.as_ref()
    }
}
