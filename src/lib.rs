#![no_std]
#![no_main]

pub mod config;
pub mod flight;
pub mod hardware;

use defmt_rtt as _;
// global logger
use panic_probe as _;
// adjust HAL import
// memory layout
use stm32f1xx_hal as _;

// 引脚校验
// 备注*的引脚尽量不替换
#[allow(unused)]
enum _Pin {
    // 遥控脉冲输入, 共用 EXTI9_5
    PB6, // * 俯仰
    PB7, // * 横滚

    // 机架布局跳线, 内部上拉
    PB5,

    // 电机 PWM, TIM2 CH1-CH4
    PA0, // *
    PA1, // *
    PA2, // *
    PA3, // *

    // USART 调试串口
    PA9,  // *
    PA10, // * 未使用

    // 待分配的引脚
    PA4,
    PA5,
    PA6,
    PA7,
    PA8,
    PA11,
    PA12,
    PB0,
    PB1,
    PB8,
    PB9,
    PB10,
    PB11,
    PB12,
    PB13,
    PB14,
    PB15,
    PB3,  // 复用引脚
    PB4,  // 复用引脚
    PA15, // 复用引脚

    // 不可使用引脚, 需要重置才可使用
    PB2,
    PA13,
    PA14,
}
