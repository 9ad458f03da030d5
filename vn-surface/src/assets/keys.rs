//! # 资源键
//!
//! 每类资源一组固定、可枚举的键，键到逻辑路径的映射在编译期确定。

use serde::{Deserialize, Serialize};

/// 定义资源键枚举：生成 `ALL` 常量与 `path()` 映射
macro_rules! asset_keys {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $path:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// 该类别下的全部键
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// 逻辑路径（相对于 assets_root）
            pub fn path(self) -> &'static str {
                match self {
                    $($name::$variant => $path,)+
                }
            }
        }
    };
}

asset_keys! {
    /// 字体
    FontFace {
        MonogramExtended => "fonts/truetype/monogram_extended.ttf",
        MonogramExtendedItalic => "fonts/truetype/monogram_extended_italic.ttf",
    }
}

asset_keys! {
    /// 背景图
    Background {
        MoonSky => "images/backgrounds/moon_sky.png",
        EmptyClassroom => "images/backgrounds/empty_classroom.jpg",
        AbandonedAmusementPark => "images/backgrounds/abandoned_amusement_park.png",
    }
}

asset_keys! {
    /// 按钮图标
    ///
    /// `path()` 是常态图片，悬停/按下图片由 [`ButtonIcon::hover_path`] /
    /// [`ButtonIcon::active_path`] 给出。
    ButtonIcon {
        Start => "images/ui/button_start.png",
        Cog => "images/ui/button_cog.png",
        Quit => "images/ui/button_quit.png",
        Home => "images/ui/button_home.png",
        ArrowLeft => "images/ui/button_arrow_left.png",
        Play => "images/ui/button_play.png",
    }
}

impl ButtonIcon {
    /// 悬停状态图片
    pub fn hover_path(self) -> String {
        with_suffix(self.path(), "_hover")
    }

    /// 按下状态图片
    pub fn active_path(self) -> String {
        with_suffix(self.path(), "_active")
    }
}

asset_keys! {
    /// 对话/选项横幅
    Banner {
        DialogueWood => "images/ui/banner_dialogue_wood.png",
        ChoiceWood => "images/ui/banner_choice_wood.png",
    }
}

asset_keys! {
    /// 角色立绘
    CharacterSprite {
        Boy1Standing => "images/characters/boy_1_standing.png",
        Boy1WalkingFrontRightFirst => "images/characters/boy_1_walking_front_right_first.png",
        Boy1WalkingFrontLeftFirst => "images/characters/boy_1_walking_front_left_first.png",
        Boy2Standing => "images/characters/boy_2_standing.png",
        Boy2WalkingFrontRightFirst => "images/characters/boy_2_walking_front_right_first.png",
        Boy2WalkingFrontLeftFirst => "images/characters/boy_2_walking_front_left_first.png",
        Boy3Standing => "images/characters/boy_3_standing.png",
        Boy3StandingRight => "images/characters/boy_3_standing_right.png",
        Boy3StandingLeft => "images/characters/boy_3_standing_left.png",
        Boy3WalkingFrontRightFirst => "images/characters/boy_3_walking_front_right_first.png",
        Boy3WalkingFrontLeftFirst => "images/characters/boy_3_walking_front_left_first.png",
        Boy3WalkingRightRightFirst => "images/characters/boy_3_walking_right_right_first.png",
        Boy3WalkingRightLeftFirst => "images/characters/boy_3_walking_right_left_first.png",
        Boy3WalkingLeftRightFirst => "images/characters/boy_3_walking_left_right_first.png",
        Boy3WalkingLeftLeftFirst => "images/characters/boy_3_walking_left_left_first.png",
        Girl1Standing => "images/characters/girl_1_standing.png",
        Girl1StandingRight => "images/characters/girl_1_standing_right.png",
        Girl1StandingLeft => "images/characters/girl_1_standing_left.png",
        Girl1WalkingFrontRightFirst => "images/characters/girl_1_walking_front_right_first.png",
        Girl1WalkingFrontLeftFirst => "images/characters/girl_1_walking_front_left_first.png",
        Girl1WalkingRightRightFirst => "images/characters/girl_1_walking_right_right_first.png",
        Girl1WalkingRightLeftFirst => "images/characters/girl_1_walking_right_left_first.png",
        Girl1WalkingLeftRightFirst => "images/characters/girl_1_walking_left_right_first.png",
        Girl1WalkingLeftLeftFirst => "images/characters/girl_1_walking_left_left_first.png",
        Girl2Standing => "images/characters/girl_2_standing.png",
        Girl2WalkingFrontRightFirst => "images/characters/girl_2_walking_front_right_first.png",
        Girl2WalkingFrontLeftFirst => "images/characters/girl_2_walking_front_left_first.png",
        Girl3Standing => "images/characters/girl_3_standing.png",
        Girl3WalkingFrontRightFirst => "images/characters/girl_3_walking_front_right_first.png",
        Girl3WalkingFrontLeftFirst => "images/characters/girl_3_walking_front_left_first.png",
    }
}

asset_keys! {
    /// 背景音乐
    Music {
        AmbientEvening => "sounds/music/ambient_evening.mp3",
        EmptyClassroom => "sounds/music/empty_classroom.mp3",
    }
}

asset_keys! {
    /// 音效
    Sfx {
        ButtonClick1 => "sounds/sfx/button_click_1.mp3",
    }
}

/// 在扩展名前插入后缀：`a/b.png` + `_hover` → `a/b_hover.png`
fn with_suffix(path: &str, suffix: &str) -> String {
    match path.rfind('.') {
        Some(dot) => format!("{}{}{}", &path[..dot], suffix, &path[dot..]),
        None => format!("{}{}", path, suffix),
    }
}
