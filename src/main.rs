//! Clock Generator Demo Application
//!
//! Entry point for the STM32G474 demo firmware. Brings up the MS5351M on
//! I2C1, then keeps one output sweeping through a frequency table while a
//! heartbeat LED shows the system is alive.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::mode::Async;
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ms5351m::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    I2C1_EV => embassy_stm32::i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => embassy_stm32::i2c::ErrorInterruptHandler<peripherals::I2C1>;
});

/// Driver type as wired on this board
type Clockgen = Ms5351m<I2c<'static, Async>, Delay>;

static CLOCKGEN: StaticCell<Mutex<CriticalSectionRawMutex, Clockgen>> = StaticCell::new();

/// Frequencies the sweep task cycles through on CLK2
const SWEEP: [Frequency; 4] = [
    Frequency::from_mhz(10),
    Frequency::from_mhz(25),
    Frequency::from_mhz(100),
    Frequency::from_mhz(200),
];

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("MS5351M demo firmware v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // Status LED (PA5 on Nucleo boards)
    let mut led = Output::new(p.PA5, Level::Low, Speed::Low);

    // I2C1 for the MS5351M
    // PB8 = SCL, PB9 = SDA for I2C1 on STM32G474
    let mut i2c = I2c::new(
        p.I2C1,
        p.PB8, // SCL
        p.PB9, // SDA
        Irqs,
        p.DMA1_CH1,
        p.DMA1_CH2,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );

    info!("I2C1 initialized at {} Hz", I2C_FREQUENCY_HZ);

    let devices = ms5351m::hal::i2c::scan(&mut i2c).await;
    info!("I2C bus scan found {} device(s): {}", devices.len(), devices.as_slice());

    // Bring-up resets the device and programs the default frequencies; a
    // failure here means the clock generator is unreachable, so park with a
    // fast blink instead of pretending to run
    let driver = match Ms5351m::new(i2c, Delay).await {
        Ok(driver) => driver,
        Err(e) => {
            defmt::error!("MS5351M bring-up failed: {}", e);
            loop {
                led.set_high();
                Timer::after(Duration::from_millis(100)).await;
                led.set_low();
                Timer::after(Duration::from_millis(100)).await;
            }
        }
    };

    info!("MS5351M ready at {}", driver.address());

    let clockgen = CLOCKGEN.init(Mutex::new(driver));

    spawner.spawn(sweep_task(clockgen)).unwrap();
    spawner.spawn(heartbeat_task(led)).unwrap();

    info!("Tasks spawned, entering main loop");

    // Report the output table periodically
    loop {
        Timer::after(Duration::from_secs(10)).await;
        let outputs = clockgen.lock().await.frequencies();
        info!(
            "outputs: CLK0={} CLK1={} CLK2={}",
            outputs[0], outputs[1], outputs[2]
        );
    }
}

/// Sweep task - retunes CLK2 through the frequency table
///
/// A rejected write is recoverable: the driver keeps its previous state, so
/// the task logs the failure and tries the next step.
#[embassy_executor::task]
async fn sweep_task(clockgen: &'static Mutex<CriticalSectionRawMutex, Clockgen>) {
    let mut step = 0usize;
    loop {
        Timer::after(Duration::from_secs(5)).await;
        let frequency = SWEEP[step % SWEEP.len()];
        step = step.wrapping_add(1);

        match clockgen.lock().await.set_frequency(OutputChannel::Clk2, frequency).await {
            Ok(()) => info!("CLK2 -> {}", frequency),
            Err(e) => defmt::warn!("CLK2 retune failed: {}", e),
        }
    }
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}
