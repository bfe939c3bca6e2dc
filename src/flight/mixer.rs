//! # 电机混控
//!
//! 俯仰/横滚百分比到四个电机百分比的映射, 不做限幅。
//!
//! ```text
//!   X 机架        + 机架
//!   0  1            0
//!    \/             |
//!    /\          3--|--1
//!   3  2            |
//!                   2
//! ```
//!
//! | 电机 | + 机架 | X 机架    |
//! |------|--------|-----------|
//! | 0    | 前     | 前 + 左   |
//! | 1    | 右     | 前 + 右   |
//! | 2    | 后     | 后 + 右   |
//! | 3    | 左     | 后 + 左   |

use crate::config::MOTOR_COUNT;

/// 机架布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum FrameConfig {
    /// 每个方向一个电机
    Plus,
    /// 电机位于对角线, 俯仰和横滚叠加
    X,
}

impl FrameConfig {
    /// 跳线电平: 上拉(拔掉跳线)为 +, 下拉为 X
    pub fn from_jumper(high: bool) -> Self {
        if high {
            FrameConfig::Plus
        } else {
            FrameConfig::X
        }
    }
}

/// 四个电机的百分比, 混控输出可能超过 100
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct MotorSet(pub [i16; MOTOR_COUNT]);

impl MotorSet {
    pub const ZERO: MotorSet = MotorSet([0; MOTOR_COUNT]);

    pub fn get(&self, motor: usize) -> i16 {
        self.0[motor]
    }
}

/// 混控
pub fn mix(pitch: i16, roll: i16, frame: FrameConfig) -> MotorSet {
    let mut m = MotorSet::ZERO;
    let duty = &mut m.0;

    match frame {
        FrameConfig::Plus => {
            // 俯仰: 电机 0 & 2
            if pitch >= 0 {
                duty[2] = pitch;
            } else {
                duty[0] = -pitch;
            }

            // 横滚: 电机 1 & 3
            if roll >= 0 {
                duty[3] = roll;
            } else {
                duty[1] = -roll;
            }
        }
        FrameConfig::X => {
            if pitch >= 0 {
                // 前推: 电机 2 & 3
                duty[2] += pitch;
                duty[3] += pitch;
            } else {
                // 后拉: 电机 0 & 1
                duty[0] += -pitch;
                duty[1] += -pitch;
            }

            if roll >= 0 {
                // 右: 电机 0 & 3
                duty[0] += roll;
                duty[3] += roll;
            } else {
                // 左: 电机 1 & 2
                duty[1] += -roll;
                duty[2] += -roll;
            }
        }
    }

    m
}
