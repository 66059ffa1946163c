//! Oscillating spindle example.
//!
//! Builds an axis from TOML, runs it at constant speed from a poll loop and
//! reverses it every half second, as a scope bench would. The scope trigger
//! lines are counted instead of wired to real pins.
//!
//! Run with `cargo run --example oscillate`.

use std::time::Duration;

use scope_stepper::{
    parse_config, Clock, StdClock, StepDirBackend, StepScheduler, StepStyle,
};

const BENCH: &str = r#"
[axes.spindle]
name = "Spindle"
steps_per_revolution = 200
style = "double"
speed_rev_per_sec = 1.0
oscillation_period_us = 500000
"#;

/// Delay provider for demonstration.
struct SleepDelay;

impl embedded_hal::delay::DelayNs for SleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }
}

/// Output pin that counts rising edges.
#[derive(Default)]
struct EdgeCounter {
    high: bool,
    rising: u32,
}

impl embedded_hal::digital::ErrorType for EdgeCounter {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for EdgeCounter {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            self.rising += 1;
        }
        self.high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }
}

fn main() -> scope_stepper::Result<()> {
    println!("=== Oscillating Spindle Example ===\n");

    let config = parse_config(BENCH)?;
    let spindle_config = config
        .axis("spindle")
        .ok_or(scope_stepper::Error::Config(
            scope_stepper::error::ConfigError::MissingField("axes.spindle"),
        ))?;

    let driver = StepDirBackend::new(
        EdgeCounter::default(),
        EdgeCounter::default(),
        EdgeCounter::default(),
        SleepDelay,
    );

    let mut spindle = StepScheduler::builder()
        .backend(driver)
        .trigger_pins(EdgeCounter::default(), EdgeCounter::default())
        .from_axis_config(spindle_config)
        .build()?;

    println!("Axis: {}", spindle.name());
    println!("Style: {:?}", spindle.style());
    println!(
        "Speed: {} steps/s ({} rpm), interval {:?} us",
        spindle.speed().0,
        spindle.speed_rps().rpm(),
        spindle.step_interval_us()
    );

    let clock = StdClock::new();
    let mut oscillator = spindle_config
        .oscillator(clock.now())
        .ok_or(scope_stepper::Error::Config(
            scope_stepper::error::ConfigError::MissingField("oscillation_period_us"),
        ))?;

    let mut reversals = 0;
    while reversals < 4 {
        let now = clock.now();
        if oscillator.poll(now) {
            spindle.reverse();
            reversals += 1;
            println!(
                "Reversal {}: position {} steps, speed {} steps/s",
                reversals,
                spindle.current_position().0,
                spindle.speed().0
            );
        }
        spindle.run_speed(now)?;
    }

    // Switch to microstepping mid-run; shaft speed is kept.
    spindle.set_style(StepStyle::microstep(16)?);
    println!(
        "\nAfter style change: {} steps/s ({} rpm)",
        spindle.speed().0,
        spindle.speed_rps().rpm()
    );

    spindle.turn_off()?;
    println!("Released: running = {}", spindle.running());

    let (_, trigger) = spindle.into_parts();
    let (step_line, beat_line) = trigger.release_pins();
    println!(
        "\nScope lines: {} step edges, {} beat edges",
        step_line.rising, beat_line.rising
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
