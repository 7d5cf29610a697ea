use core::fmt::Debug;

use consts::*;
use crate::{consts, filter::GpioStatus, BusOperation, DelayNs, Error, MeasurementResult, RangingMode, SensorState, Vl53l1x, Wait};

/// Result of one data-ready check.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PollOutcome<E: Debug> {
    NotReady,
    /// A reading was taken and the latch cleared. The reading may still
    /// have been rejected, see [`MeasurementResult::accepted`].
    Ready(MeasurementResult),
    /// The poll failed on the bus, or the sensor is not ranging. The
    /// sensor state is left as it was.
    BusError(Error<E>),
}

impl<E: Debug> PollOutcome<E> {
    pub fn is_ready(&self) -> bool {
        matches!(self, PollOutcome::Ready(_))
    }

    pub fn measurement(self) -> Option<MeasurementResult> {
        match self {
            PollOutcome::Ready(result) => Some(result),
            _ => None,
        }
    }
}

impl<B: BusOperation, T: DelayNs> Vl53l1x<B, T> {

    /// Check once for a new reading.
    ///
    /// In single-shot mode this first starts a shot if none is in flight.
    /// Outside `Ranging` the bus is not touched and the state is reported
    /// as an error, never as `NotReady`.
    pub fn poll(&mut self) -> PollOutcome<B::Error> {
        match self.state {
            SensorState::Ranging => {}
            SensorState::Faulted => return PollOutcome::BusError(Error::Faulted),
            other => return PollOutcome::BusError(Error::InvalidState(other)),
        }
        match self.check_for_measurement() {
            Ok(Some(result)) => PollOutcome::Ready(result),
            Ok(None) => PollOutcome::NotReady,
            Err(e) => {
                warn!("poll failed: {:?}", e);
                PollOutcome::BusError(e)
            }
        }
    }

    /// Poll every millisecond until a reading arrives or `timeout_ms`
    /// elapses. At least one poll is made; a sensor that is not ranging
    /// fails on that first poll.
    pub fn wait_for_measurement(&mut self, timeout_ms: u32) -> Result<MeasurementResult, Error<B::Error>> {
        let attempts = (timeout_ms / DATA_READY_POLL_INTERVAL_MS).max(1);
        for _ in 0..attempts {
            match self.poll() {
                PollOutcome::Ready(result) => return Ok(result),
                PollOutcome::BusError(e) => return Err(e),
                PollOutcome::NotReady => self.delay(DATA_READY_POLL_INTERVAL_MS),
            }
        }
        Err(Error::Timeout(Wait::DataReady))
    }

    fn check_for_measurement(&mut self) -> Result<Option<MeasurementResult>, Error<B::Error>> {
        if self.config.ranging_mode == RangingMode::SingleShot && !self.shot_pending {
            self.trigger()?;
        }

        let gpio = GpioStatus(self.bus.read_byte(VL53L1X_GPIO_TIO_HV_STATUS)?);
        if !gpio.data_ready() {
            return Ok(None);
        }

        let range_status = self.bus.read_byte(VL53L1X_RESULT_RANGE_STATUS)?;
        let distance = self.bus.read_word(VL53L1X_RESULT_FINAL_RANGE_MM_SD0)?;
        self.bus.write_byte(VL53L1X_SYSTEM_INTERRUPT_CLEAR, VL53L1X_INTERRUPT_CLEAR)?;
        self.shot_pending = false;

        let result = MeasurementResult::new(range_status, distance);
        trace!("status {:#04x}, {} mm, accepted {}", range_status, distance, result.accepted);
        Ok(Some(result))
    }

    fn trigger(&mut self) -> Result<(), Error<B::Error>> {
        self.bus.write_byte(VL53L1X_SYSTEM_MODE_START, VL53L1X_MODE_START_SINGLE_SHOT)?;
        self.shot_pending = true;
        Ok(())
    }
}
