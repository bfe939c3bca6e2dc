//! 电机 PWM 输出
//! TIM2 四个通道共用同一个周期, 分别驱动 0-3 号电机的电调；
//! 占空比变化在下一个 PWM 周期同时生效。

use stm32f1xx_hal::{
    afio::MAPR,
    gpio::{self, Alternate, PA0, PA1, PA2, PA3},
    pac::TIM2,
    prelude::_fugit_RateExtU32,
    rcc::Clocks,
    timer::{Ch, Channel, PwmExt, PwmHz, Tim2NoRemap},
};

use crate::{
    config::{MOTOR_COUNT, MOTOR_PWM_KHZ},
    flight::duty::DutyOutput,
};

/// 配置
pub struct Config<'a> {
    pub pa0: PA0,
    pub pa1: PA1,
    pub pa2: PA2,
    pub pa3: PA3,
    pub crl: &'a mut gpio::Cr<'A', false>,
    pub tim2: TIM2,
    pub mapr: &'a mut MAPR,
    pub clocks: &'a Clocks,
}

// pwm 类型别名
type PwmTy = PwmHz<
    TIM2,
    Tim2NoRemap,
    (Ch<0>, Ch<1>, Ch<2>, Ch<3>),
    (
        PA0<Alternate>,
        PA1<Alternate>,
        PA2<Alternate>,
        PA3<Alternate>,
    ),
>;

const CHANNELS: [Channel; MOTOR_COUNT] = [Channel::C1, Channel::C2, Channel::C3, Channel::C4];

/// 四路电机输出
pub struct Motors {
    pwm: PwmTy,
    max_duty: u16,
}

impl Motors {
    /// 创建对象
    /// 先将占空比置零再使能通道, 上电时电机不会转动
    pub fn new(config: Config) -> Self {
        let pwma0 = config.pa0.into_alternate_push_pull(config.crl);
        let pwma1 = config.pa1.into_alternate_push_pull(config.crl);
        let pwma2 = config.pa2.into_alternate_push_pull(config.crl);
        let pwma3 = config.pa3.into_alternate_push_pull(config.crl);

        let mut pwm = config.tim2.pwm_hz::<Tim2NoRemap, _, _>(
            (pwma0, pwma1, pwma2, pwma3),
            config.mapr,
            MOTOR_PWM_KHZ.kHz(),
            config.clocks,
        );

        // 获取最大占空比
        let max_duty = pwm.get_max_duty();

        let mut motors = Motors { pwm, max_duty };
        motors.set_duties([0; MOTOR_COUNT]);

        // Enable clock on each of the channels
        // https://docs.rs/stm32f1xx-hal/0.10.0/stm32f1xx_hal/timer/index.html
        for channel in CHANNELS {
            motors.pwm.enable(channel);
        }

        motors
    }
}

impl DutyOutput for Motors {
    fn max_duty(&self) -> u16 {
        self.max_duty
    }

    fn set_duties(&mut self, duties: [u16; MOTOR_COUNT]) {
        for (channel, duty) in CHANNELS.into_iter().zip(duties) {
            self.pwm.set_duty(channel, duty);
        }
    }
}
