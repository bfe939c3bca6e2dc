//! 全局配置

/// 遥控输入通道数量: 0 俯仰, 1 横滚
pub const PULSE_CHANNELS: usize = 2;

/// 电机数量
pub const MOTOR_COUNT: usize = 4;

/// 采样窗口, 单位 ms
/// 遥控脉冲周期约 20ms, 40ms 内每个通道至少出现一个完整脉冲
pub const SAMPLE_WINDOW_MS: u16 = 40;

/// 有效脉宽开区间下限 (ticks), 小于等于该值视为噪声
pub const PULSE_VALID_LOW: u16 = 900;
/// 有效脉宽开区间上限 (ticks), 大于等于该值视为噪声
pub const PULSE_VALID_HIGH: u16 = 2100;

/// 摇杆最小脉宽, 对应 -100%
pub const PULSE_MIN: u16 = 1000;
/// 摇杆最大脉宽, 对应 100%
pub const PULSE_MAX: u16 = 2000;
/// 摇杆中位脉宽, 对应 0%; 信号丢失时使用
pub const PULSE_NEUTRAL: u16 = 1500;

/// 电机死区, 低于该占空比直接置零
pub const MOTOR_DEAD_ZONE: i16 = 5;
/// 电机占空比上限 (百分比)
pub const MOTOR_DUTY_MAX: i16 = 100;

/// 电机 PWM 载波频率, 单位 kHz
pub const MOTOR_PWM_KHZ: u32 = 50;

/// 脉宽计时器频率, 1 tick = 1us
pub const TICK_HZ: u32 = 1_000_000;

/// USART1 波特率
/// 9600bps 约 960 字节/秒, 每个 20ms 周期约 19 字节
pub const USART1_BAUDRATE: u32 = 9600;

/// 调试输出单行最大长度
pub const TELEMETRY_LINE_CAPACITY: usize = 32;
