//! # 电机占空比输出
//!
//! 限幅到 0 ~ 100, 低于 5% 的占空比置零(死区, 避免电机低速蜂鸣),
//! 最后按 PWM 满量程换算为寄存器值。
//!
//! 已知限制: 没有跨周期的毛刺滤波, 单次异常读数会直接反映到电机上。

use crate::config::{MOTOR_COUNT, MOTOR_DEAD_ZONE, MOTOR_DUTY_MAX};

use super::mixer::MotorSet;

/// 四路共享周期的 PWM 输出
pub trait DutyOutput {
    /// PWM 满量程
    fn max_duty(&self) -> u16;

    /// 写入四路占空比寄存器
    fn set_duties(&mut self, duties: [u16; MOTOR_COUNT]);
}

/// 限幅并应用死区
pub fn condition(percent: i16) -> i16 {
    let percent = percent.clamp(0, MOTOR_DUTY_MAX);
    if percent < MOTOR_DEAD_ZONE {
        0
    } else {
        percent
    }
}

/// 百分比换算为寄存器值, 四舍五入
///
/// duty = percent * full_scale / 100
pub fn percent_to_duty(percent: i16, full_scale: u16) -> u16 {
    let percent = percent.clamp(0, MOTOR_DUTY_MAX) as u32;
    ((percent * full_scale as u32 + 50) / 100) as u16
}

/// 输出到电机, 返回实际使用的百分比
pub fn apply<O>(motors: MotorSet, output: &mut O) -> MotorSet
where
    O: DutyOutput,
{
    let full_scale = output.max_duty();

    let mut applied = MotorSet::ZERO;
    let mut duties = [0; MOTOR_COUNT];
    for ((percent, duty), raw) in applied.0.iter_mut().zip(duties.iter_mut()).zip(motors.0) {
        *percent = condition(raw);
        *duty = percent_to_duty(*percent, full_scale);
    }

    output.set_duties(duties);
    applied
}
