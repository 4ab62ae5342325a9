// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 视口枚举
///
/// 表示截图时使用的屏幕尺寸档位，每个档位对应固定的像素尺寸。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Viewport {
    /// 桌面端，1440x900
    #[default]
    Desktop,
    /// 平板端，768x1024
    Tablet,
    /// 移动端，375x812
    Mobile,
}

impl Viewport {
    /// 视口宽度（像素）
    pub fn width(&self) -> u32 {
        match self {
            Viewport::Desktop => 1440,
            Viewport::Tablet => 768,
            Viewport::Mobile => 375,
        }
    }

    /// 视口高度（像素）
    pub fn height(&self) -> u32 {
        match self {
            Viewport::Desktop => 900,
            Viewport::Tablet => 1024,
            Viewport::Mobile => 812,
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Viewport::Desktop => write!(f, "desktop"),
            Viewport::Tablet => write!(f, "tablet"),
            Viewport::Mobile => write!(f, "mobile"),
        }
    }
}

impl FromStr for Viewport {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(Viewport::Desktop),
            "tablet" => Ok(Viewport::Tablet),
            "mobile" => Ok(Viewport::Mobile),
            _ => Err(()),
        }
    }
}
