//! USART1 调试串口
//! 只发送, 每个控制周期输出一行脉宽与百分比
mod utils;

use core::{convert::Infallible, fmt};

use stm32f1xx_hal::{
    afio::MAPR,
    gpio::{self, PA10, PA9},
    pac::USART1,
    rcc::Clocks,
    serial::{self, Serial, StopBits, Tx},
    time::U32Ext,
};

use crate::config::USART1_BAUDRATE;

pub use utils::*;

/// USART 串口
pub struct Usart {
    tx: Tx<USART1>,
}

impl Usart {
    /// 初始化 USART1 串口
    /// 固定引脚: PA9、PA10
    pub fn new(
        pa9: PA9,
        pa10: PA10,
        crh: &mut gpio::Cr<'A', true>,
        usart1: USART1,
        mapr: &mut MAPR,
        clocks: &Clocks,
    ) -> Self {
        let tx = pa9.into_alternate_push_pull(crh);
        let rx = pa10;

        // 设置usart设备。取得USART寄存器和tx/rx引脚的所有权。其余寄存器用于启用和配置设备。
        let (tx, _rx) = Serial::new(
            usart1,
            (tx, rx),
            mapr,
            serial::Config::default()
                .baudrate(USART1_BAUDRATE.bps())
                .wordlength_8bits()
                .stopbits(StopBits::STOP1)
                .parity_none(),
            clocks,
        )
        .split();

        Usart { tx }
    }

    /// 发送字符串
    pub fn send_string(&mut self, data: &str) -> Result<(), Infallible> {
        send_string(&mut self.tx, data)
    }
}

impl fmt::Write for Usart {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.send_string(s).map_err(|_| fmt::Error)
    }
}
