//! 串行接口常用工具集

use core::convert::Infallible;

use embedded_hal::serial::Write;
use nb::block;
use stm32f1xx_hal::serial::{Instance, Tx};

/// 发送字节
pub fn send_byte<USART>(tx: &mut Tx<USART>, word: u8) -> Result<(), Infallible>
where
    USART: Instance,
{
    block!(tx.write(word))
}

/// 发送字符串
/// 结束发送标识符: '\0'
pub fn send_string<USART>(tx: &mut Tx<USART>, words: &str) -> Result<(), Infallible>
where
    USART: Instance,
{
    for word in words.as_bytes() {
        if *word == b'\0' {
            break;
        }
        send_byte(tx, *word)?;
    }

    Ok(())
}
