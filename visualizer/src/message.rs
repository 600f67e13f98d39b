//! # Message 模块
//!
//! 单条反馈消息：显示一段时间后在最后的淡出窗口内逐渐消失。
//! 新消息会直接替换旧消息。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 消息类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MessageKind::Info => "info",
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        })
    }
}

/// 一条消息
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
    /// 剩余显示时间（秒）
    pub remaining: f32,
}

/// 消息框
#[derive(Debug, Clone)]
pub struct MessageBox {
    current: Option<Message>,
    fade_time: f32,
}

impl Default for MessageBox {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl MessageBox {
    pub fn new(fade_time: f32) -> Self {
        Self {
            current: None,
            fade_time: fade_time.max(0.0),
        }
    }

    /// 显示消息，替换当前消息
    pub fn show(&mut self, text: impl Into<String>, kind: MessageKind, duration: f32) {
        self.current = Some(Message {
            text: text.into(),
            kind,
            remaining: duration.max(0.0),
        });
    }

    /// 倒计时，时间到后隐藏
    pub fn update(&mut self, dt: f32) {
        let expired = match &mut self.current {
            Some(message) => {
                message.remaining -= dt;
                message.remaining <= 0.0
            }
            None => false,
        };
        if expired {
            self.current = None;
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Message> {
        self.current.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|m| m.text.as_str())
    }

    pub fn kind(&self) -> Option<MessageKind> {
        self.current.as_ref().map(|m| m.kind)
    }

    /// 当前透明度：淡出窗口之前为 1，窗口内线性降到 0，隐藏时为 0
    pub fn alpha(&self) -> f32 {
        match &self.current {
            None => 0.0,
            Some(message) if self.fade_time > 0.0 && message.remaining < self.fade_time => {
                (message.remaining / self.fade_time).clamp(0.0, 1.0)
            }
            Some(_) => 1.0,
        }
    }
}
