//! 机架布局跳线
//! PB5 内部上拉: 拔掉跳线为 + 机架, 跳线接地为 X 机架
use stm32f1xx_hal::gpio::{self, Input, PullUp, PB5};

use crate::flight::mixer::FrameConfig;

/// 机架布局跳线
pub struct FrameSwitch {
    pin: PB5<Input<PullUp>>,
}

impl FrameSwitch {
    /// 初始化跳线引脚
    pub fn new(pb5: PB5, crl: &mut gpio::Cr<'B', false>) -> Self {
        let pin = pb5.into_pull_up_input(crl);
        FrameSwitch { pin }
    }

    /// 读取当前机架布局, 每个周期读取一次
    pub fn frame_config(&self) -> FrameConfig {
        FrameConfig::from_jumper(self.pin.is_high())
    }
}
