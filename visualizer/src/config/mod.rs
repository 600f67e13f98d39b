//! # Config 模块
//!
//! 运行时配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::animation::EasingFunction;
use crate::theme::Theme;
use ds_core::StructureKind;

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 启动时演示的数据结构
    #[serde(default = "default_structure")]
    pub structure: StructureKind,

    /// 布局配置
    #[serde(default)]
    pub layout: LayoutConfig,

    /// 动画配置
    #[serde(default)]
    pub animation: AnimationConfig,

    /// 提示消息配置
    #[serde(default)]
    pub messages: MessageConfig,

    /// 导出配置
    #[serde(default)]
    pub export: ExportConfig,

    /// 配色
    #[serde(default)]
    pub theme: Theme,
}

/// 绘制区域
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for DrawArea {
    fn default() -> Self {
        Self {
            x: 240.0,
            y: 80.0,
            width: 840.0,
            height: 650.0,
        }
    }
}

/// 布局配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// 节点绘制区域
    #[serde(default)]
    pub area: DrawArea,

    /// 树节点半径
    #[serde(default = "default_node_radius")]
    pub node_radius: f32,

    /// 树的层间距
    #[serde(default = "default_vertical_spacing")]
    pub vertical_spacing: f32,

    /// 兄弟节点最小水平偏移
    #[serde(default = "default_min_horizontal_spacing")]
    pub min_horizontal_spacing: f32,

    /// 线性结构节点宽度
    #[serde(default = "default_linear_node_width")]
    pub linear_node_width: f32,

    /// 线性结构节点间距
    #[serde(default = "default_linear_node_spacing")]
    pub linear_node_spacing: f32,
}

/// 动画配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// 单个步骤的基准时长（秒）
    #[serde(default = "default_step_duration")]
    pub step_duration: f32,

    /// 默认播放速度
    #[serde(default = "default_speed")]
    pub default_speed: f32,

    /// 最慢速度
    #[serde(default = "default_min_speed")]
    pub min_speed: f32,

    /// 最快速度
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,

    /// 节点移动系数（每秒逼近目标的比例）
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,

    /// headless 运行时的帧率
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// 淡入淡出使用的缓动函数
    #[serde(default)]
    pub fade_easing: EasingFunction,
}

/// 提示消息配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageConfig {
    /// 普通消息显示时长（秒）
    #[serde(default = "default_message_duration")]
    pub duration: f32,

    /// 树结构错误消息显示时长（秒）
    #[serde(default = "default_error_duration")]
    pub error_duration: f32,

    /// 导出结果消息显示时长（秒）
    #[serde(default = "default_error_duration")]
    pub export_duration: f32,

    /// 消失前的淡出时长（秒）
    #[serde(default = "default_fade_time")]
    pub fade_time: f32,
}

/// 导出配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// 快照输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

// 默认值函数
fn default_structure() -> StructureKind {
    StructureKind::Bst
}

fn default_node_radius() -> f32 {
    25.0
}

fn default_vertical_spacing() -> f32 {
    70.0
}

fn default_min_horizontal_spacing() -> f32 {
    30.0
}

fn default_linear_node_width() -> f32 {
    60.0
}

fn default_linear_node_spacing() -> f32 {
    20.0
}

fn default_step_duration() -> f32 {
    0.5
}

fn default_speed() -> f32 {
    1.0
}

fn default_min_speed() -> f32 {
    0.1
}

fn default_max_speed() -> f32 {
    3.0
}

fn default_move_speed() -> f32 {
    10.0
}

fn default_fps() -> u32 {
    60
}

fn default_message_duration() -> f32 {
    2.0
}

fn default_error_duration() -> f32 {
    3.0
}

fn default_fade_time() -> f32 {
    0.5
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            structure: default_structure(),
            layout: LayoutConfig::default(),
            animation: AnimationConfig::default(),
            messages: MessageConfig::default(),
            export: ExportConfig::default(),
            theme: Theme::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            area: DrawArea::default(),
            node_radius: default_node_radius(),
            vertical_spacing: default_vertical_spacing(),
            min_horizontal_spacing: default_min_horizontal_spacing(),
            linear_node_width: default_linear_node_width(),
            linear_node_spacing: default_linear_node_spacing(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step_duration: default_step_duration(),
            default_speed: default_speed(),
            min_speed: default_min_speed(),
            max_speed: default_max_speed(),
            move_speed: default_move_speed(),
            fps: default_fps(),
            fade_easing: EasingFunction::default(),
        }
    }
}

impl AnimationConfig {
    /// 把速度限制在允许范围内
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        if speed.is_nan() {
            return self.default_speed;
        }
        speed.clamp(self.min_speed, self.max_speed)
    }

    /// 固定帧间隔（秒）
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            duration: default_message_duration(),
            error_duration: default_error_duration(),
            export_duration: default_error_duration(),
            fade_time: default_fade_time(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(path = ?path, "配置文件加载成功");
                    config
                }
                Err(e) => {
                    warn!(path = ?path, error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = ?path, error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if layout.area.width <= 0.0 || layout.area.height <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "绘制区域的宽高必须大于 0".to_string(),
            ));
        }
        if layout.node_radius <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "节点半径必须大于 0".to_string(),
            ));
        }
        if layout.min_horizontal_spacing < 0.0 || layout.vertical_spacing <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "节点间距不能为负，层间距必须大于 0".to_string(),
            ));
        }

        let anim = &self.animation;
        if anim.step_duration <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "步骤时长必须大于 0".to_string(),
            ));
        }
        if anim.min_speed <= 0.0 || anim.min_speed > anim.max_speed {
            return Err(ConfigError::ValidationFailed(format!(
                "速度范围无效: {} - {}",
                anim.min_speed, anim.max_speed
            )));
        }
        if anim.default_speed < anim.min_speed || anim.default_speed > anim.max_speed {
            return Err(ConfigError::ValidationFailed(format!(
                "默认速度 {} 不在 {} - {} 之间",
                anim.default_speed, anim.min_speed, anim.max_speed
            )));
        }
        if anim.move_speed <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "移动系数必须大于 0".to_string(),
            ));
        }
        if anim.fps == 0 {
            return Err(ConfigError::ValidationFailed("帧率必须大于 0".to_string()));
        }

        let msg = &self.messages;
        if msg.duration < 0.0 || msg.error_duration < 0.0 || msg.export_duration < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "消息显示时长不能为负".to_string(),
            ));
        }
        if msg.fade_time < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "淡出时长不能为负".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.structure, StructureKind::Bst);
        assert_eq!(config.layout.area.x, 240.0);
        assert_eq!(config.layout.node_radius, 25.0);
        assert_eq!(config.animation.step_duration, 0.5);
        assert_eq!(config.animation.fps, 60);
        assert_eq!(config.messages.error_duration, 3.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "structure": "avl", "animation": { "default_speed": 2.0 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.structure, StructureKind::Avl);
        assert_eq!(config.animation.default_speed, 2.0);
        assert_eq!(config.animation.max_speed, 3.0);
        assert_eq!(config.layout.vertical_spacing, 70.0);
    }

    #[test]
    fn test_clamp_speed() {
        let anim = AnimationConfig::default();
        assert_eq!(anim.clamp_speed(5.0), 3.0);
        assert_eq!(anim.clamp_speed(0.0), 0.1);
        assert_eq!(anim.clamp_speed(1.5), 1.5);
        assert_eq!(anim.clamp_speed(f32::NAN), 1.0);
        assert!((anim.frame_delta() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.animation.default_speed = 10.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));

        let mut config = AppConfig::default();
        config.layout.area.width = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.animation.fps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.structure = StructureKind::Queue;
        config.animation.fade_easing = EasingFunction::EaseOut;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_or_malformed_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load(dir.path().join("nope.json")), AppConfig::default());

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        assert_eq!(AppConfig::load(&bad), AppConfig::default());
    }
}
