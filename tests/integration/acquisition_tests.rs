//! Integration tests for the acquisition side: real drivers (simulation
//! branches) and scripted sensors behind the acquisition loop.

use crate::mock_hw::{FixedAxis, ScriptedClimate, ScriptedTags};

use twincore::app::acquisition::Acquisition;
use twincore::channel::SampleSink;
use twincore::config::SystemConfig;
use twincore::error::SensorError;
use twincore::protocol::{Axis, Quantity, Sample, TagId};
use twincore::sensors::joystick::{self, JoystickAxis};
use twincore::sensors::tag_reader::{self, TagReader};

#[derive(Default)]
struct Recorder(Vec<(u32, Sample)>);

struct At<'a> {
    now: u32,
    out: &'a mut Recorder,
}

impl SampleSink for At<'_> {
    fn send(&mut self, sample: Sample) {
        self.out.0.push((self.now, sample));
    }
}

fn run(acq: &mut Acquisition, until_ms: u32, step_ms: u32) -> Recorder {
    let mut out = Recorder::default();
    let mut now = 0;
    while now <= until_ms {
        acq.tick(now, &mut At { now, out: &mut out });
        now += step_ms;
    }
    out
}

#[test]
fn climate_runs_at_two_hertz() {
    let config = SystemConfig::default();
    let mut acq = Acquisition::new(&config).with_continuous(ScriptedClimate::new(
        &[Quantity::Humidity],
        [Ok(vec![40.0])],
    ));
    let out = run(&mut acq, 1999, 20);
    let times: Vec<u32> = out.0.iter().map(|(t, _)| *t).collect();
    assert_eq!(times, vec![0, 500, 1000, 1500]);
}

#[test]
fn transient_failure_recovers() {
    let config = SystemConfig::default();
    let mut acq = Acquisition::new(&config).with_continuous(ScriptedClimate::new(
        &[Quantity::Temperature],
        [Ok(vec![21.0]), Err(SensorError::Bus), Ok(vec![22.0])],
    ));
    let out = run(&mut acq, 1000, 500);
    let samples: Vec<Sample> = out.0.into_iter().map(|(_, s)| s).collect();
    assert_eq!(
        samples,
        vec![
            Sample::Reading { quantity: Quantity::Temperature, centi: 2100 },
            Sample::ReadFailed(Quantity::Temperature),
            Sample::Reading { quantity: Quantity::Temperature, centi: 2200 },
        ]
    );
}

#[test]
fn tag_cooldown_does_not_starve_other_sensors() {
    let config = SystemConfig::default();
    let tag = TagId([0xC0, 0x33, 0xC3, 0x80]);
    let mut acq = Acquisition::new(&config)
        .with_analog(FixedAxis(Axis::Y, 100))
        .with_continuous(ScriptedClimate::new(&[Quantity::Humidity], [Ok(vec![50.0])]))
        .with_identity(ScriptedTags::new([Some(tag), None]));

    let out = run(&mut acq, 2500, 100);
    let tag_events: Vec<(u32, Sample)> = out
        .0
        .iter()
        .copied()
        .filter(|(_, s)| matches!(s, Sample::Tag(_) | Sample::TagReadFailed))
        .collect();
    // Second presentation waits for the 2 s cooldown
    assert_eq!(tag_events, vec![(0, Sample::Tag(tag)), (2000, Sample::TagReadFailed)]);

    let analog = out.0.iter().filter(|(_, s)| matches!(s, Sample::Analog { .. })).count();
    assert_eq!(analog, 26);
    let climate = out.0.iter().filter(|(_, s)| matches!(s, Sample::Reading { .. })).count();
    assert_eq!(climate, 6);
}

#[test]
fn simulated_drivers_feed_the_loop() {
    let config = SystemConfig::default();
    joystick::sim_set_axis(Axis::X, 123);
    let mut acq = Acquisition::new(&config)
        .with_analog(JoystickAxis::new(Axis::X, 0))
        .with_identity(TagReader::new());

    let mut out = Recorder::default();
    acq.tick(0, &mut At { now: 0, out: &mut out });
    assert_eq!(out.0, vec![(0, Sample::Analog { axis: Axis::X, raw: 123 })]);

    tag_reader::present_tag(TagId([0x00, 0xFC, 0x95, 0x7C]));
    acq.tick(100, &mut At { now: 100, out: &mut out });
    assert!(out.0.contains(&(100, Sample::Tag(TagId([0x00, 0xFC, 0x95, 0x7C])))));
    assert_eq!(acq.sent(), 3);
}
