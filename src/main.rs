#![no_std]
#![no_main]

use stm32f103_quadhybrid::{
    flight::{
        duty::DutyOutput,
        pulse::{PulseCapture, PulseSampler},
        FlightLoop,
    },
    hardware::{
        frame_switch::FrameSwitch,
        motor::{self, Motors},
        pulse_input::PulseInput,
        timer::TickTimer,
        usart::Usart,
    },
};

use cortex_m::prelude::_embedded_hal_blocking_delay_DelayMs;
use defmt::println;
use stm32f1xx_hal::{
    afio::AfioExt,
    flash::FlashExt,
    pac::EXTI,
    prelude::{_stm32_hal_gpio_GpioExt, _stm32_hal_rcc_RccExt},
    timer::{SysDelay, SysTimerExt},
};
use unwrap_infallible::UnwrapInfallible;

// 定义应用程序资源和任务
#[rtic::app(device = stm32f1xx_hal::pac, peripherals = true)]
mod app {
    use super::*;

    #[shared]
    struct Shared {
        // 边沿中断与主循环共享, 主循环访问时屏蔽 EXTI9_5
        capture: PulseCapture,
    }

    #[local]
    struct Local {
        exti: EXTI,
        tick: TickTimer,
        pulse_input: PulseInput,
        delay: SysDelay,
        frame_switch: FrameSwitch,
        motors: Motors,
        usart: Usart,
    }

    // 初始化函数
    #[init]
    fn init(ctx: init::Context) -> (Shared, Local) {
        // 获取外设实例
        let mut afio = ctx.device.AFIO.constrain();
        let mut flash = ctx.device.FLASH.constrain();
        let rcc = ctx.device.RCC.constrain();
        let mut exti = ctx.device.EXTI;

        let syst = ctx.core.SYST;

        let mut gpioa = ctx.device.GPIOA.split();
        let mut gpiob = ctx.device.GPIOB.split();

        // 初始化时钟, 默认 8MHz HSI
        let clocks = rcc.cfgr.freeze(&mut flash.acr);
        // 具有自定义精度的阻塞延迟
        let mut delay = syst.delay(&clocks);

        println!("init start ...");

        // 初始化电机, 占空比置零后再使能输出
        let motors = Motors::new(motor::Config {
            pa0: gpioa.pa0,
            pa1: gpioa.pa1,
            pa2: gpioa.pa2,
            pa3: gpioa.pa3,
            crl: &mut gpioa.crl,
            tim2: ctx.device.TIM2,
            mapr: &mut afio.mapr,
            clocks: &clocks,
        });
        defmt::info!("motor pwm full scale: {}", motors.max_duty());

        // 等待电调识别零油门
        delay.delay_ms(100_u16);

        // 初始化调试串口
        let mut usart = Usart::new(
            gpioa.pa9,
            gpioa.pa10,
            &mut gpioa.crh,
            ctx.device.USART1,
            &mut afio.mapr,
            &clocks,
        );
        usart.send_string("quadhybrid\n").unwrap_infallible();

        // 初始化机架布局跳线
        let frame_switch = FrameSwitch::new(gpiob.pb5, &mut gpiob.crl);

        // 初始化脉宽计时器
        let tick = TickTimer::new(ctx.device.TIM3, &clocks);

        // 初始化遥控输入, 返回后由 RTIC 使能 EXTI9_5
        let pulse_input = PulseInput::new(
            gpiob.pb6,
            gpiob.pb7,
            &mut gpiob.crl,
            &mut exti,
            &mut afio,
        );

        println!("init end ...");
        (
            Shared {
                capture: PulseCapture::new(),
            },
            Local {
                exti,
                tick,
                pulse_input,
                delay,
                frame_switch,
                motors,
                usart,
            },
        )
    }

    /// 遥控脉冲边沿中断
    #[task(binds = EXTI9_5, priority = 2, local = [exti, tick, pulse_input], shared = [capture])]
    fn pulse_edge(mut ctx: pulse_edge::Context) {
        let now = ctx.local.tick.now();
        let pulse_input = ctx.local.pulse_input;
        let exti = ctx.local.exti;
        ctx.shared
            .capture
            .lock(|capture| pulse_input.on_interrupt(capture, now, exti));
    }

    /// 飞行控制主循环
    #[idle(local = [delay, frame_switch, motors, usart], shared = [capture])]
    fn idle(mut ctx: idle::Context) -> ! {
        let mut flight = FlightLoop::new(PulseSampler::new());

        loop {
            // 每个周期重新读取跳线
            let frame = ctx.local.frame_switch.frame_config();
            flight.cycle(
                &mut ctx.shared.capture,
                ctx.local.delay,
                frame,
                ctx.local.motors,
                ctx.local.usart,
            );
        }
    }
}
