//! 定时器

use stm32f1xx_hal::{
    pac::TIM3,
    prelude::*,
    rcc::Clocks,
    timer::{Counter, TimerExt},
};

use crate::{config::TICK_HZ, flight::pulse::Tick};

/// 脉宽计时器
/// TIM3 自由计数, 1MHz, 自动重载 0xFFFF
pub struct TickTimer {
    counter: Counter<TIM3, TICK_HZ>,
}

impl TickTimer {
    /// 初始化 TIM3 计时器
    pub fn new(tim3: TIM3, clocks: &Clocks) -> Self {
        let mut counter = tim3.counter::<TICK_HZ>(clocks);

        // 65536 个 tick 后回绕, 即 16 位满量程
        counter.start(65_536.micros()).unwrap();

        TickTimer { counter }
    }

    /// 当前计数值
    pub fn now(&self) -> Tick {
        self.counter.now().ticks() as Tick
    }
}
