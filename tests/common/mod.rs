//! 测试替身: 共享捕获状态、脚本化延时、PWM 记录器
#![allow(dead_code)]

use core::cell::RefCell;

use embedded_hal::blocking::delay::DelayMs;
use stm32f103_quadhybrid::{
    config::MOTOR_COUNT,
    flight::{
        duty::DutyOutput,
        pulse::{PulseCapture, RcChannel, Tick},
    },
};

/// 8MHz 时钟下 50kHz PWM 的满量程
pub const FULL_SCALE: u16 = 160;

/// 以 RefCell 模拟临界区
pub struct SharedCapture<'a>(pub &'a RefCell<PulseCapture>);

impl rtic::Mutex for SharedCapture<'_> {
    type T = PulseCapture;

    fn lock<R>(&mut self, f: impl FnOnce(&mut PulseCapture) -> R) -> R {
        f(&mut *self.0.borrow_mut())
    }
}

/// 一个完整脉冲: 上升沿与下降沿
pub fn pulse(channel: RcChannel, start: Tick, width: Tick) -> [(RcChannel, Tick); 2] {
    [(channel, start), (channel, start.wrapping_add(width))]
}

/// 延时期间注入边沿, 模拟中断
pub struct ScriptedDelay<'a> {
    capture: &'a RefCell<PulseCapture>,
    pub edges: &'a [(RcChannel, Tick)],
    pub slept_ms: u32,
    pub calls: u32,
}

impl<'a> ScriptedDelay<'a> {
    pub fn new(capture: &'a RefCell<PulseCapture>) -> Self {
        ScriptedDelay {
            capture,
            edges: &[],
            slept_ms: 0,
            calls: 0,
        }
    }
}

impl DelayMs<u16> for ScriptedDelay<'_> {
    fn delay_ms(&mut self, ms: u16) {
        self.slept_ms += ms as u32;
        self.calls += 1;
        let mut capture = self.capture.borrow_mut();
        for &(channel, now) in self.edges {
            capture.on_edge(channel, now);
        }
    }
}

/// 记录最后一次写入的占空比
pub struct RecordingOutput {
    pub max_duty: u16,
    pub duties: [u16; MOTOR_COUNT],
    pub writes: u32,
}

impl RecordingOutput {
    pub fn new() -> Self {
        RecordingOutput {
            max_duty: FULL_SCALE,
            // 非零初值, 确认每个周期都会整体覆盖
            duties: [u16::MAX; MOTOR_COUNT],
            writes: 0,
        }
    }
}

impl DutyOutput for RecordingOutput {
    fn max_duty(&self) -> u16 {
        self.max_duty
    }

    fn set_duties(&mut self, duties: [u16; MOTOR_COUNT]) {
        self.duties = duties;
        self.writes += 1;
    }
}
