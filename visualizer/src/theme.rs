//! # Theme 模块
//!
//! 可视化配色方案。
//!
//! 渲染器只需要读取 [`crate::scene::Scene`] 里的颜色，
//! 这里集中定义所有颜色的来源。

use serde::{Deserialize, Serialize};
use std::fmt;

use ds_core::StructureKind;

/// RGBA 颜色（8 位通道）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 按系数缩放 RGB 通道，alpha 不变
    pub fn scaled(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }

    /// 替换 alpha（0.0 - 1.0）
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// 一对填充色与描边色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeColors {
    pub fill: Color,
    pub outline: Color,
}

impl NodeColors {
    pub const fn new(fill: Color, outline: Color) -> Self {
        Self { fill, outline }
    }
}

/// 配色方案
///
/// 配置文件里缺省的颜色取深色主题的值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub control_panel: Color,
    pub tree_area: Color,

    // 树节点状态
    pub node_default: NodeColors,
    pub node_highlight: NodeColors,
    pub node_found: NodeColors,
    pub node_delete: NodeColors,
    pub node_new: NodeColors,

    // 线性结构
    pub stack: NodeColors,
    pub queue: NodeColors,
    pub linked_list: NodeColors,

    // 边
    pub edge: Color,
    pub edge_highlight: Color,
    pub arrow: Color,

    // 文字与反馈
    pub text: Color,
    pub text_secondary: Color,
    pub error: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// 深色主题
    pub fn dark() -> Self {
        Self {
            background: Color::rgb(30, 30, 40),
            control_panel: Color::rgb(45, 45, 55),
            tree_area: Color::rgb(25, 25, 35),

            node_default: NodeColors::new(Color::rgb(70, 130, 180), Color::rgb(100, 160, 210)),
            node_highlight: NodeColors::new(Color::rgb(255, 200, 50), Color::rgb(255, 220, 100)),
            node_found: NodeColors::new(Color::rgb(50, 205, 50), Color::rgb(100, 255, 100)),
            node_delete: NodeColors::new(Color::rgb(220, 50, 50), Color::rgb(255, 100, 100)),
            node_new: NodeColors::new(Color::rgb(138, 43, 226), Color::rgb(180, 100, 255)),

            stack: NodeColors::new(Color::rgb(255, 140, 0), Color::rgb(255, 180, 80)),
            queue: NodeColors::new(Color::rgb(0, 191, 255), Color::rgb(100, 210, 255)),
            linked_list: NodeColors::new(Color::rgb(144, 238, 144), Color::rgb(180, 255, 180)),

            edge: Color::rgb(120, 120, 140),
            edge_highlight: Color::rgb(255, 200, 50),
            arrow: Color::rgb(200, 200, 220),

            text: Color::rgb(255, 255, 255),
            text_secondary: Color::rgb(180, 180, 190),
            error: Color::rgb(255, 80, 80),
            success: Color::rgb(80, 255, 80),
        }
    }

    /// 某种结构节点的静止配色
    pub fn base_colors(&self, kind: StructureKind) -> NodeColors {
        match kind {
            StructureKind::Bst | StructureKind::Avl | StructureKind::MinHeap => self.node_default,
            StructureKind::LinkedList => self.linked_list,
            StructureKind::Stack => self.stack,
            StructureKind::Queue => self.queue,
        }
    }
}
