//! 遥控脉冲输入
//! PB6: 俯仰, PB7: 横滚, 共用 EXTI9_5 中断；
//! 每个边沿后把触发沿切换为该通道下一个期望的边沿。
use stm32f1xx_hal::{
    afio,
    gpio::{self, Edge, ExtiPin, Floating, Input, PB6, PB7},
    pac::EXTI,
};

use crate::flight::pulse::{EdgePhase, PulseCapture, RcChannel, Tick};

/// 遥控脉冲输入引脚
pub struct PulseInput {
    pitch: PB6<Input<Floating>>,
    roll: PB7<Input<Floating>>,
}

impl PulseInput {
    /// 初始化遥控输入, 首次在上升沿触发
    pub fn new(
        pb6: PB6,
        pb7: PB7,
        crl: &mut gpio::Cr<'B', false>,
        exti: &mut EXTI,
        afio: &mut afio::Parts,
    ) -> Self {
        let mut pitch = pb6.into_floating_input(crl);
        let mut roll = pb7.into_floating_input(crl);

        arm(&mut pitch, exti, afio);
        arm(&mut roll, exti, afio);

        PulseInput { pitch, roll }
    }

    /// 边沿中断处理
    /// now: 进入中断时的计数值
    pub fn on_interrupt(&mut self, capture: &mut PulseCapture, now: Tick, exti: &mut EXTI) {
        service(&mut self.pitch, RcChannel::Pitch, capture, now, exti);
        service(&mut self.roll, RcChannel::Roll, capture, now, exti);
    }
}

fn arm<P: ExtiPin>(pin: &mut P, exti: &mut EXTI, afio: &mut afio::Parts) {
    // 配置 AFIO 外部中断引脚选择
    pin.make_interrupt_source(afio);
    pin.trigger_on_edge(exti, trigger(EdgePhase::AwaitingRisingEdge));
    pin.enable_interrupt(exti);
}

fn service<P: ExtiPin>(
    pin: &mut P,
    channel: RcChannel,
    capture: &mut PulseCapture,
    now: Tick,
    exti: &mut EXTI,
) {
    if !pin.check_interrupt() {
        return;
    }
    let next = capture.on_edge(channel, now);
    pin.trigger_on_edge(exti, trigger(next));
    pin.clear_interrupt_pending_bit();
}

fn trigger(phase: EdgePhase) -> Edge {
    match phase {
        EdgePhase::AwaitingRisingEdge => Edge::Rising,
        EdgePhase::AwaitingFallingEdge => Edge::Falling,
    }
}
