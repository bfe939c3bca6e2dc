//! 硬件外设
pub mod frame_switch;
pub mod motor;
pub mod pulse_input;
pub mod timer;
pub mod usart;
