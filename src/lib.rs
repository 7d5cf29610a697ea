//! # VL53L1X time-of-flight ranging driver
//!
//! `no_std` register-protocol driver and ranging state machine for ST's
//! VL53L1X, generic over the `embedded-hal` 1.0 I2C and delay traits.
//!
//! ```rust,no_run
//! use vl53l1x::{PollOutcome, SensorConfig, Vl53l1x};
//!
//! let i2c = embedded_hal_mock::eh1::i2c::Mock::new(&[]);
//! let delay = embedded_hal_mock::eh1::delay::NoopDelay;
//! let mut sensor = Vl53l1x::new_i2c(i2c, delay);
//!
//! sensor.init(&SensorConfig::default()).unwrap();
//! sensor.start_ranging().unwrap();
//!
//! if let PollOutcome::Ready(result) = sensor.poll() {
//!     match result.distance_mm() {
//!         Some(mm) => println!("Distance: {} mm", mm),
//!         None => println!("Rejected: {:?}", result.rejection()),
//!     }
//! }
//! sensor.stop_ranging().unwrap();
//! ```
#![cfg_attr(not(test), no_std)]

mod fmt; // <-- must be first module!

pub mod bus_operation;
pub mod config;
pub mod consts;
pub mod driver;
pub mod filter;
pub mod ranging;
pub mod utils;

pub use bus_operation::*;
pub use config::{DistanceMode, RangingMode, SensorConfig};
pub use driver::Booted;
pub use filter::{MeasurementResult, Rejection};
pub use ranging::PollOutcome;

use core::fmt::Debug;

pub use embedded_hal::{
    i2c::{I2c, Operation, SevenBitAddress},
    delay::DelayNs
};

pub struct Vl53l1x<B: BusOperation, T: DelayNs> {
    pub(crate) bus: RegisterBus<B>,
    pub(crate) tim: T,
    pub(crate) state: SensorState,
    pub(crate) config: SensorConfig,
    /// A single-shot start has been written and its result not read yet.
    pub(crate) shot_pending: bool,
}

/// Lifecycle phase of the sensor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SensorState {
    Uninitialized,
    Probed,
    Resetting,
    AwaitingFirmware,
    Configured,
    Ranging,
    Stopped,
    /// A lifecycle bus operation failed; only `probe()` leads out.
    Faulted,
}

/// What a bounded wait was waiting for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Wait {
    FirmwareBoot,
    DataReady,
}

impl core::fmt::Display for Wait {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Wait::FirmwareBoot => f.write_str("firmware not ready"),
            Wait::DataReady => f.write_str("data not ready"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error<E: Debug> {
    /// The HAL reported a failed transaction.
    #[error("bus error: {0:?}")]
    Bus(E),

    /// The register cannot be selected with the bus addressing width.
    #[error("register {0:#06x} is not addressable on this bus")]
    Unaddressable(u16),

    #[error("unexpected model id {found:#06x}")]
    Probe { found: u16 },

    #[error("timed out: {0}")]
    Timeout(Wait),

    /// The sensor must be re-initialised before this call is accepted.
    #[error("sensor faulted, re-init required")]
    Faulted,

    #[error("operation not allowed in state {0:?}")]
    InvalidState(SensorState),
}

impl<B: BusOperation, T: DelayNs> Vl53l1x<B, T> {
    /// Bind a backend with the given register addressing width.
    pub fn new(bus: B, width: AddressWidth, tim: T) -> Self {
        Vl53l1x {
            bus: RegisterBus::new(bus, width),
            tim,
            state: SensorState::Uninitialized,
            config: SensorConfig::default(),
            shot_pending: false,
        }
    }

    pub fn state(&self) -> SensorState {
        self.state
    }

    /// Configuration applied by the last successful `configure`.
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn ranging_mode(&self) -> RangingMode {
        self.config.ranging_mode
    }

    pub fn delay(&mut self, ms: u32) {
        self.tim.delay_ms(ms);
    }
}
