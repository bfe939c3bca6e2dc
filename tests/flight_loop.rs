#![no_std]
#![no_main]

mod common;

use stm32f103_quadhybrid as _; // memory layout + panic handler + global logger

use core::cell::RefCell;

use stm32f103_quadhybrid::flight::{
    mixer::FrameConfig,
    pulse::{PulseCapture, RcChannel, Tick},
    telemetry::TelemetryLine,
    CycleReport, FlightLoop,
};

use common::{pulse, RecordingOutput, ScriptedDelay, SharedCapture};

/// 控制循环测试台
pub struct Rig {
    capture: RefCell<PulseCapture>,
    pub output: RecordingOutput,
    pub line: TelemetryLine,
    flight: FlightLoop,
}

impl Rig {
    pub fn new() -> Self {
        Rig {
            capture: RefCell::new(PulseCapture::new()),
            output: RecordingOutput::new(),
            line: TelemetryLine::new(),
            flight: FlightLoop::default(),
        }
    }

    /// 一个周期内两个通道各收到一个脉冲
    pub fn cycle(&mut self, frame: FrameConfig, pitch: Tick, roll: Tick) -> CycleReport {
        let p = pulse(RcChannel::Pitch, 1_000, pitch);
        let r = pulse(RcChannel::Roll, 1_200, roll);
        let edges = [p[0], r[0], p[1], r[1]];
        self.run(frame, &edges)
    }

    pub fn run(&mut self, frame: FrameConfig, edges: &[(RcChannel, Tick)]) -> CycleReport {
        self.line.clear();
        let mut shared = SharedCapture(&self.capture);
        let mut delay = ScriptedDelay::new(&self.capture);
        delay.edges = edges;
        self.flight
            .cycle(&mut shared, &mut delay, frame, &mut self.output, &mut self.line)
    }
}

#[defmt_test::tests]
mod unit_tests {
    use defmt::{assert, assert_eq};
    use stm32f103_quadhybrid::flight::{
        mixer::{FrameConfig, MotorSet},
        pulse::RcChannel,
        telemetry::format_telemetry,
    };

    use crate::Rig;

    #[test]
    fn scenario_a_plus_pitch_forward() {
        let mut rig = Rig::new();
        let report = rig.cycle(FrameConfig::Plus, 1800, 1500);

        assert!(report.sample.alive);
        assert_eq!(report.sample.percents, [60, 0]);
        assert_eq!(report.motors, MotorSet([0, 0, 60, 0]));
        assert_eq!(rig.output.duties, [0, 0, 96, 0]);
        assert_eq!(rig.line.as_str(), "1800,60 1500,0 \n");
    }

    #[test]
    fn scenario_b_x_back_and_right() {
        let mut rig = Rig::new();
        let report = rig.cycle(FrameConfig::X, 1350, 1700);

        assert_eq!(report.sample.percents, [-30, 40]);
        assert_eq!(report.motors, MotorSet([70, 30, 0, 40]));
        assert_eq!(rig.output.duties, [112, 48, 0, 64]);
        assert_eq!(rig.line.as_str(), "1350,-30 1700,40 \n");
    }

    #[test]
    fn scenario_c_signal_lost() {
        let mut rig = Rig::new();
        // 先有信号, 再完全丢失
        rig.cycle(FrameConfig::X, 2000, 2000);
        let report = rig.run(FrameConfig::X, &[]);

        assert!(!report.sample.alive);
        assert_eq!(report.sample.widths, [1500, 1500]);
        assert_eq!(report.motors, MotorSet::ZERO);
        assert_eq!(rig.output.duties, [0, 0, 0, 0]);
        assert_eq!(rig.line.as_str(), "1500,0 1500,0 \n");
    }

    #[test]
    fn scenario_d_width_near_lower_bound() {
        let mut rig = Rig::new();
        let report = rig.cycle(FrameConfig::Plus, 903, 1500);

        assert_eq!(report.sample.percents, [-100, 0]);
        assert_eq!(report.motors, MotorSet([100, 0, 0, 0]));
        assert_eq!(rig.output.duties, [160, 0, 0, 0]);
        assert_eq!(rig.line.as_str(), "903,-100 1500,0 \n");
    }

    #[test]
    fn noise_pulse_centers_only_its_channel() {
        let mut rig = Rig::new();
        let report = rig.cycle(FrameConfig::Plus, 2200, 1000);

        assert_eq!(report.sample.percents, [0, -100]);
        assert_eq!(report.motors, MotorSet([0, 100, 0, 0]));
    }

    #[test]
    fn small_deflection_falls_in_dead_zone() {
        let mut rig = Rig::new();
        // 1513 => 3%
        let report = rig.cycle(FrameConfig::Plus, 1513, 1500);

        assert_eq!(report.sample.percents, [3, 0]);
        assert_eq!(report.motors, MotorSet::ZERO);
        assert_eq!(rig.output.duties, [0, 0, 0, 0]);
    }

    #[test]
    fn x_full_deflection_saturates() {
        let mut rig = Rig::new();
        let report = rig.cycle(FrameConfig::X, 2000, 2000);

        assert_eq!(report.motors, MotorSet([100, 0, 100, 100]));
        assert_eq!(rig.output.duties, [160, 0, 160, 160]);
    }

    #[test]
    fn frame_is_taken_per_cycle() {
        let mut rig = Rig::new();
        let plus = rig.cycle(FrameConfig::Plus, 1350, 1700);
        let x = rig.cycle(FrameConfig::X, 1350, 1700);

        assert_eq!(plus.frame, FrameConfig::Plus);
        assert_eq!(plus.motors, MotorSet([30, 0, 0, 40]));
        assert_eq!(x.frame, FrameConfig::X);
        assert_eq!(x.motors, MotorSet([70, 30, 0, 40]));
        assert_eq!(rig.output.writes, 2);
    }

    #[test]
    fn capture_phase_carries_across_cycles() {
        let mut rig = Rig::new();
        // 本周期只收到俯仰的上升沿
        let report = rig.run(FrameConfig::Plus, &[(RcChannel::Pitch, 60_000)]);
        assert!(report.sample.alive);
        assert_eq!(report.sample.widths, [0, 0]);

        // 下个周期收到下降沿, 跨越计数器回绕
        let report = rig.run(FrameConfig::Plus, &[(RcChannel::Pitch, 60_000u16.wrapping_add(5_700))]);
        assert_eq!(report.sample.widths, [5_700, 0]);
        assert_eq!(report.sample.percents, [0, 0]);
    }

    #[test]
    fn telemetry_line_format() {
        let mut rig = Rig::new();
        let report = rig.cycle(FrameConfig::X, 1000, 2000);
        let line = format_telemetry(&report.sample);

        assert_eq!(line.as_str(), "1000,-100 2000,100 \n");
        assert_eq!(line.as_str(), rig.line.as_str());
    }
}
