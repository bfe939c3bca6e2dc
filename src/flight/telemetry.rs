//! 调试输出
//!
//! 每个周期一行: `<脉宽>,<百分比> <脉宽>,<百分比> \n`

use core::fmt::{self, Write};

use heapless::String;

use crate::config::TELEMETRY_LINE_CAPACITY;

use super::pulse::{PulseSample, RcChannel};

/// 调试输出行
pub type TelemetryLine = String<TELEMETRY_LINE_CAPACITY>;

/// 写入一行调试输出
pub fn write_telemetry<W>(writer: &mut W, sample: &PulseSample) -> fmt::Result
where
    W: Write,
{
    for channel in RcChannel::ALL {
        write!(
            writer,
            "{},{} ",
            sample.width(channel),
            sample.percent(channel)
        )?;
    }
    writer.write_char('\n')
}

/// 格式化为定长字符串, 超长部分截断
pub fn format_telemetry(sample: &PulseSample) -> TelemetryLine {
    let mut line = TelemetryLine::new();
    let _ = write_telemetry(&mut line, sample);
    line
}
