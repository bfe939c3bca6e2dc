//! # 遥控脉宽测量
//!
//! 中断上下文只负责记录边沿时间戳并计算原始脉宽 (`PulseCapture`)；
//! 主循环每个周期调用一次 `PulseSampler::sample`，在临界区内拷贝原始脉宽，
//! 校验后映射为 -100% ~ 100% 的摇杆量。
//!
//! 1000us => -100%  ...  1500us => 0  ...  2000us => 100%

use embedded_hal::blocking::delay::DelayMs;
use rtic::Mutex;

use crate::config::{
    PULSE_CHANNELS, PULSE_MAX, PULSE_MIN, PULSE_NEUTRAL, PULSE_VALID_HIGH, PULSE_VALID_LOW,
    SAMPLE_WINDOW_MS,
};

/// 计时器计数值, 16 位自由计数, 溢出回绕
pub type Tick = u16;

/// 遥控输入通道
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum RcChannel {
    /// 俯仰
    Pitch = 0,
    /// 横滚
    Roll = 1,
}

impl RcChannel {
    /// 全部通道, 按索引排序
    pub const ALL: [RcChannel; PULSE_CHANNELS] = [RcChannel::Pitch, RcChannel::Roll];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// 下一个期望的边沿
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum EdgePhase {
    AwaitingRisingEdge,
    AwaitingFallingEdge,
}

/// 单个通道的捕获状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct ChannelCapture {
    pub phase: EdgePhase,
    /// 最近一次上升沿的时间戳
    pub start: Tick,
    /// 最近一次完整脉冲的宽度
    pub width: Tick,
}

impl ChannelCapture {
    pub const fn new() -> Self {
        ChannelCapture {
            phase: EdgePhase::AwaitingRisingEdge,
            start: 0,
            width: 0,
        }
    }
}

impl Default for ChannelCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// 中断与主循环共享的捕获状态
///
/// 只由边沿中断写入；主循环读取或清除时必须持有锁。
#[derive(Debug, Clone, PartialEq, Eq, defmt::Format)]
pub struct PulseCapture {
    channels: [ChannelCapture; PULSE_CHANNELS],
    alive: bool,
}

impl PulseCapture {
    pub const fn new() -> Self {
        PulseCapture {
            channels: [ChannelCapture::new(); PULSE_CHANNELS],
            alive: false,
        }
    }

    /// 处理一个边沿事件, 返回该通道下一个期望的边沿
    ///
    /// 计数器回绕时 `now - start` 依旧正确, 例如 0x0007 - 0xFFFF = 8,
    /// 前提是脉宽不超过一个计数周期。
    pub fn on_edge(&mut self, channel: RcChannel, now: Tick) -> EdgePhase {
        let capture = &mut self.channels[channel.index()];
        capture.phase = match capture.phase {
            EdgePhase::AwaitingRisingEdge => {
                capture.start = now;
                EdgePhase::AwaitingFallingEdge
            }
            EdgePhase::AwaitingFallingEdge => {
                capture.width = now.wrapping_sub(capture.start);
                EdgePhase::AwaitingRisingEdge
            }
        };
        // 任意通道上的任意边沿都表示信号存在
        self.alive = true;
        capture.phase
    }

    /// 通道下一个期望的边沿
    pub fn phase(&self, channel: RcChannel) -> EdgePhase {
        self.channels[channel.index()].phase
    }

    pub fn channel(&self, channel: RcChannel) -> &ChannelCapture {
        &self.channels[channel.index()]
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn clear_alive(&mut self) {
        self.alive = false;
    }

    /// 全部通道的原始脉宽
    pub fn widths(&self) -> [Tick; PULSE_CHANNELS] {
        let mut widths = [0; PULSE_CHANNELS];
        for (width, capture) in widths.iter_mut().zip(self.channels.iter()) {
            *width = capture.width;
        }
        widths
    }
}

impl Default for PulseCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// 将稳定脉宽映射为 -100 ~ 100 的百分比
///
/// 脉宽不在 (900, 2100) 之内视为无效脉冲, 返回 0。
pub fn width_to_percent(width: Tick) -> i16 {
    if width <= PULSE_VALID_LOW || width >= PULSE_VALID_HIGH {
        return 0;
    }
    // (1000..2000) => (0..1000)
    let t = width.clamp(PULSE_MIN, PULSE_MAX) - PULSE_MIN;
    // (0..1000) => (0..200), 四舍五入
    let t = (t + 2) / 5;
    // (0..200) => (-100..100)
    t as i16 - 100
}

/// 一个周期的采样结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct PulseSample {
    /// 采样窗口内是否检测到边沿
    pub alive: bool,
    /// 稳定脉宽
    pub widths: [Tick; PULSE_CHANNELS],
    /// 摇杆百分比
    pub percents: [i16; PULSE_CHANNELS],
}

impl PulseSample {
    pub fn width(&self, channel: RcChannel) -> Tick {
        self.widths[channel.index()]
    }

    pub fn percent(&self, channel: RcChannel) -> i16 {
        self.percents[channel.index()]
    }
}

/// 脉宽采样器
pub struct PulseSampler {
    window_ms: u16,
}

impl PulseSampler {
    pub fn new() -> Self {
        Self::with_window(SAMPLE_WINDOW_MS)
    }

    pub fn with_window(window_ms: u16) -> Self {
        PulseSampler { window_ms }
    }

    /// 采样一个周期
    ///
    /// 先清除存活标识, 阻塞等待一个采样窗口, 再在锁内拷贝原始脉宽。
    /// 窗口内没有任何边沿时, 全部通道按摇杆中位处理。
    pub fn sample<M, D>(&mut self, capture: &mut M, delay: &mut D) -> PulseSample
    where
        M: Mutex<T = PulseCapture>,
        D: DelayMs<u16>,
    {
        capture.lock(|capture| capture.clear_alive());

        delay.delay_ms(self.window_ms);

        // 锁内只拷贝, 尽快释放
        let stable = capture.lock(|capture| capture.is_alive().then(|| capture.widths()));

        let alive = stable.is_some();
        let widths = stable.unwrap_or([PULSE_NEUTRAL; PULSE_CHANNELS]);

        let mut percents = [0; PULSE_CHANNELS];
        for (percent, width) in percents.iter_mut().zip(widths.iter()) {
            *percent = width_to_percent(*width);
        }

        PulseSample {
            alive,
            widths,
            percents,
        }
    }
}

impl Default for PulseSampler {
    fn default() -> Self {
        Self::new()
    }
}
