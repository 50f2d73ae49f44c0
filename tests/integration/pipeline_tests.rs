//! Integration tests for the Sample → channel → Presentation → actuators
//! pipeline.
//!
//! These run on the host (x86_64) and drive the presentation loop either
//! directly or through a real `InterCoreChannel` with the acquisition loop
//! on another thread.

use crate::mock_hw::{ActuatorCall, FixedAxis, MockDisplay, MockHardware, ScriptedClimate, ScriptedTags};

use twincore::app::acquisition::Acquisition;
use twincore::app::ports::Indicators;
use twincore::app::presentation::Presentation;
use twincore::app::readings::Slot;
use twincore::app::rules::Actuation;
use twincore::channel::{InterCoreChannel, SampleSink};
use twincore::config::{KnownTag, Led, SystemConfig};
use twincore::protocol::{Axis, Quantity, Sample, TagId};

const TAG_A: TagId = TagId([0x00, 0xFC, 0x95, 0x7C]);
const TAG_B: TagId = TagId([0xC0, 0x33, 0xC3, 0x80]);

fn make_presentation() -> Presentation<MockDisplay, MockHardware> {
    let mut p = Presentation::new(MockDisplay::new(), MockHardware::new(), SystemConfig::default());
    p.start();
    p
}

fn temperature(centi: i32) -> Sample {
    Sample::Reading {
        quantity: Quantity::Temperature,
        centi,
    }
}

fn humidity(centi: i32) -> Sample {
    Sample::Reading {
        quantity: Quantity::Humidity,
        centi,
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn boot_screen_shows_placeholders_and_green() {
    let p = make_presentation();
    assert_eq!(p.display().frames.len(), 1);
    assert_eq!(p.display().text_at(14, 41), Some("--.-C"));
    assert_eq!(p.display().text_at(73, 41), Some("--.-%"));
    assert_eq!(p.display().text_at(14, 52), Some("--hPa"));
    assert_eq!(p.actuators().indicators(), Actuation::NORMAL.indicators);
    assert!(!p.actuators().buzzer_on());
}

// ── Threshold scenario ────────────────────────────────────────

#[test]
fn hot_and_humid_trips_alarm() {
    let mut p = make_presentation();
    p.handle(temperature(3200));
    p.handle(humidity(5600));

    assert_eq!(p.readings().temperature_c, Slot::Value(32.0));
    assert_eq!(p.readings().humidity_percent, Slot::Value(56.0));
    assert_eq!(p.display().text_at(14, 41), Some("32.0C"));
    assert_eq!(p.display().text_at(73, 41), Some("56.0%"));
    assert!(p.actuators().indicators().red);
    assert!(!p.actuators().indicators().green);
    assert!(p.actuators().buzzer_on());
    assert!(p.display().shows("!! ALARM !!"));
}

#[test]
fn alarm_clears_when_values_drop() {
    let mut p = make_presentation();
    p.handle(temperature(3300));
    assert!(p.actuators().buzzer_on());
    p.handle(temperature(2500));
    assert!(!p.actuators().buzzer_on());
    assert_eq!(p.actuators().indicators(), Actuation::NORMAL.indicators);
}

#[test]
fn one_below_threshold_is_quiet() {
    let mut p = make_presentation();
    p.handle(temperature(3199));
    p.handle(humidity(5499));
    assert!(!p.actuators().buzzer_on());
}

#[test]
fn failed_sensor_shows_err_and_does_not_alarm() {
    let mut p = make_presentation();
    p.handle(temperature(4000));
    p.handle(Sample::ReadFailed(Quantity::Temperature));
    assert_eq!(p.display().text_at(14, 41), Some("ERR"));
    assert!(!p.actuators().buzzer_on());
}

// ── Identity scenario ─────────────────────────────────────────

#[test]
fn allow_listed_tags_select_their_led() {
    let mut p = make_presentation();

    p.handle(Sample::Tag(TAG_A));
    assert_eq!(p.actuators().indicators(), Indicators::lit(Led::Blue));
    // A granted tag never looks like the normal profile.
    assert_ne!(p.actuators().indicators(), Indicators::lit(Led::Green));
    assert_eq!(p.display().text_at(73, 52), Some("TAG A"));

    p.handle(Sample::Tag(TAG_B));
    assert_eq!(p.actuators().indicators(), Indicators::lit(Led::Cyan));
    assert_eq!(p.display().text_at(73, 52), Some("TAG B"));

    p.handle(Sample::Tag(TagId([1, 2, 3, 4])));
    assert_eq!(p.actuators().indicators(), Indicators::OFF);
    assert_eq!(p.display().text_at(73, 52), Some("DENIED"));
    assert!(!p.actuators().buzzer_on());
}

#[test]
fn custom_allow_list_is_honoured() {
    let mut config = SystemConfig::default();
    config.known_tags.clear();
    let _ = config
        .known_tags
        .push(KnownTag::new([0xDE, 0xAD, 0xBE, 0xEF], "ADMIN", Led::Magenta));
    let mut p = Presentation::new(MockDisplay::new(), MockHardware::new(), config);
    p.start();

    p.handle(Sample::Tag(TAG_A));
    assert_eq!(p.actuators().indicators(), Indicators::OFF);
    p.handle(Sample::Tag(TagId([0xDE, 0xAD, 0xBE, 0xEF])));
    assert_eq!(p.actuators().indicators(), Indicators::lit(Led::Magenta));
    assert!(!p.actuators().buzzer_on());
}

#[test]
fn alarm_overrides_tag_profile() {
    let mut p = make_presentation();
    p.handle(Sample::Tag(TAG_B));
    p.handle(humidity(9000));
    assert!(p.actuators().indicators().red);
    assert!(p.actuators().buzzer_on());
    // Tag is still shown even though the LEDs belong to the alarm
    assert_eq!(p.display().text_at(73, 52), Some("TAG B"));
}

// ── Latest-value semantics ────────────────────────────────────

#[test]
fn only_latest_value_per_kind_is_shown() {
    let mut p = make_presentation();
    for centi in [2100, 2200, 2350] {
        p.handle(temperature(centi));
    }
    p.handle(Sample::Analog { axis: Axis::X, raw: 10 });
    p.handle(Sample::Analog { axis: Axis::X, raw: 4000 });
    assert_eq!(p.display().text_at(14, 41), Some("23.5C"));
    assert_eq!(p.display().text_at(10, 16), Some("X4000"));
    assert_eq!(p.display().text_at(66, 16), Some("Y----"));
}

#[test]
fn every_sample_triggers_a_full_redraw() {
    let mut p = make_presentation();
    p.handle(temperature(2000));
    p.handle(Sample::Analog { axis: Axis::Y, raw: 1 });
    let frames = &p.display().frames;
    assert_eq!(frames.len(), 3);
    // Every frame starts from a clean buffer and draws the static frame
    for f in frames {
        assert_eq!(f.first(), Some(&crate::mock_hw::DrawCall::Clear));
        assert_eq!(f.last(), Some(&crate::mock_hw::DrawCall::Flush));
        assert!(f.contains(&crate::mock_hw::DrawCall::Rect(3, 3, 122, 60)));
    }
}

#[test]
fn redraw_is_idempotent() {
    let mut p = make_presentation();
    p.handle(temperature(2500));
    p.refresh();
    p.refresh();
    let frames = &p.display().frames;
    let n = frames.len();
    assert_eq!(frames[n - 1], frames[n - 2]);
    assert_eq!(frames[n - 2], frames[n - 3]);
}

#[test]
fn unchanged_profile_writes_no_outputs() {
    let mut p = make_presentation();
    let after_start = p.actuators().calls.len();
    p.handle(temperature(2000));
    p.handle(temperature(2100));
    p.handle(Sample::Analog { axis: Axis::X, raw: 5 });
    assert_eq!(p.actuators().calls.len(), after_start);

    p.handle(temperature(3500));
    assert_eq!(
        &p.actuators().calls[after_start..],
        &[
            ActuatorCall::Indicators(Actuation::ALARM.indicators),
            ActuatorCall::Buzzer(true),
        ]
    );
}

// ── End to end through the channel ────────────────────────────

#[test]
fn samples_cross_the_channel_in_order() {
    let mut channel = InterCoreChannel::new();
    let (mut writer, mut reader) = channel.split();
    let mut p = make_presentation();

    let sent = [
        temperature(3200),
        humidity(5600),
        Sample::Tag(TAG_A),
        Sample::TagReadFailed,
        Sample::Analog { axis: Axis::Y, raw: 4095 },
        Sample::ReadFailed(Quantity::Pressure),
    ];

    std::thread::scope(|s| {
        s.spawn(|| {
            for sample in sent {
                writer.send(sample);
            }
        });
        for _ in 0..sent.len() {
            p.step(&mut reader).unwrap();
        }
    });

    assert_eq!(p.received(), sent.len() as u64);
    assert_eq!(p.rejected(), 0);
    assert_eq!(p.readings().temperature_c, Slot::Value(32.0));
    assert_eq!(p.readings().tag, Slot::Failed);
    assert_eq!(p.readings().joystick_y, Slot::Value(4095));
    assert_eq!(p.readings().pressure_hpa, Slot::Failed);
    assert!(p.actuators().buzzer_on());
    assert_eq!(p.display().text_at(73, 52), Some("NO TAG"));
}

#[test]
fn acquisition_feeds_presentation_across_threads() {
    let config = SystemConfig::default();
    let mut acquisition = Acquisition::new(&config)
        .with_continuous(ScriptedClimate::new(
            &[Quantity::Temperature, Quantity::Pressure],
            [Ok(vec![24.5, 1013.25]), Ok(vec![33.0, 1012.0])],
        ))
        .with_continuous(ScriptedClimate::new(&[Quantity::Humidity], [Err(
            twincore::error::SensorError::Bus,
        )]))
        .with_analog(FixedAxis(Axis::X, 2048))
        .with_identity(ScriptedTags::new([Some(TAG_B)]));

    let mut channel = InterCoreChannel::new();
    let (mut writer, mut reader) = channel.split();
    let mut p = make_presentation();

    // Two climate periods: t=0 and t=500.
    let ticks = [0u32, 100, 200, 300, 400, 500];
    let total = std::thread::scope(|s| {
        let producer = s.spawn(move || {
            let mut total = 0;
            for t in ticks {
                total += acquisition.tick(t, &mut writer);
            }
            total
        });
        // t=0: T, P, U-failed, X, tag; t=100..400: X; t=500: T, P, U-failed, X
        let expected = 5 + 4 + 4;
        for _ in 0..expected {
            p.step(&mut reader).unwrap();
        }
        producer.join().unwrap()
    });

    assert_eq!(total, 13);
    assert_eq!(p.readings().temperature_c, Slot::Value(33.0));
    assert_eq!(p.readings().pressure_hpa, Slot::Value(1012.0));
    assert_eq!(p.readings().humidity_percent, Slot::Failed);
    assert_eq!(p.readings().tag, Slot::Value(TAG_B));
    assert_eq!(p.display().text_at(73, 41), Some("ERR"));
    assert!(p.actuators().buzzer_on());
    assert!(reader.try_recv().is_none());
}
