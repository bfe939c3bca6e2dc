//! # 飞行控制主循环
//!
//! 开环摇杆混控, 每个周期:
//! 采样 -> 电机清零 -> 混控 -> 输出占空比 -> 调试输出
pub mod duty;
pub mod mixer;
pub mod pulse;
pub mod telemetry;

use core::fmt::Write;

use embedded_hal::blocking::delay::DelayMs;
use rtic::Mutex;

use duty::DutyOutput;
use mixer::{FrameConfig, MotorSet};
use pulse::{PulseCapture, PulseSample, PulseSampler, RcChannel};

/// 单个周期的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct CycleReport {
    pub frame: FrameConfig,
    pub sample: PulseSample,
    /// 限幅及死区处理后实际输出的百分比
    pub motors: MotorSet,
}

/// 飞行控制循环
pub struct FlightLoop {
    sampler: PulseSampler,
    signal_alive: Option<bool>,
    frame: Option<FrameConfig>,
}

impl FlightLoop {
    pub fn new(sampler: PulseSampler) -> Self {
        FlightLoop {
            sampler,
            signal_alive: None,
            frame: None,
        }
    }

    /// 执行一个控制周期
    pub fn cycle<M, D, O, W>(
        &mut self,
        capture: &mut M,
        delay: &mut D,
        frame: FrameConfig,
        output: &mut O,
        telemetry: &mut W,
    ) -> CycleReport
    where
        M: Mutex<T = PulseCapture>,
        D: DelayMs<u16>,
        O: DutyOutput,
        W: Write,
    {
        let sample = self.sampler.sample(capture, delay);
        self.log_transitions(&sample, frame);

        let raw = mixer::mix(
            sample.percent(RcChannel::Pitch),
            sample.percent(RcChannel::Roll),
            frame,
        );
        let motors = duty::apply(raw, output);

        if telemetry::write_telemetry(telemetry, &sample).is_err() {
            defmt::trace!("telemetry line dropped");
        }

        defmt::trace!("sample {} mix {} applied {}", sample, raw, motors);

        CycleReport {
            frame,
            sample,
            motors,
        }
    }

    /// 仅在状态变化时记录日志
    fn log_transitions(&mut self, sample: &PulseSample, frame: FrameConfig) {
        if self.frame != Some(frame) {
            defmt::info!("frame config: {}", frame);
            self.frame = Some(frame);
        }

        match (self.signal_alive, sample.alive) {
            (Some(true), false) | (None, false) => defmt::warn!("RC signal lost, holding center"),
            (Some(false), true) | (None, true) => defmt::info!("RC signal acquired"),
            _ => {}
        }
        self.signal_alive = Some(sample.alive);
    }
}

impl Default for FlightLoop {
    fn default() -> Self {
        Self::new(PulseSampler::new())
    }
}
