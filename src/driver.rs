use consts::*;
use crate::{consts, filter::FirmwareStatus, AddressWidth, BusOperation, DelayNs, Error, SensorConfig, SensorState, Vl53l1x, Wait};

/// Proof that the firmware reported ready after a reset.
///
/// Only [`Vl53l1x::reset`] hands one out, and configuring the sensor
/// requires one, so configuration can never be written to a sensor whose
/// firmware has not booted.
pub struct Booted<'a, B: BusOperation, T: DelayNs> {
    sensor: &'a mut Vl53l1x<B, T>,
}

impl<'a, B: BusOperation, T: DelayNs> Booted<'a, B, T> {
    pub fn state(&self) -> SensorState {
        self.sensor.state
    }

    /// Write the static configuration sequence and move to `Configured`.
    pub fn configure(self, config: &SensorConfig) -> Result<(), Error<B::Error>> {
        let result = self.sensor.write_config(config);
        self.sensor.guarded(result)?;
        self.sensor.config = *config;
        self.sensor.state = SensorState::Configured;
        info!("configured, {:?} ranging", config.ranging_mode);
        Ok(())
    }
}

impl<B: BusOperation, T: DelayNs> Vl53l1x<B, T> {

    /// Identify the sensor. Allowed from any state; this is also how a
    /// faulted sensor is brought back.
    pub fn probe(&mut self) -> Result<(), Error<B::Error>> {
        self.shot_pending = false;
        let result = self.identify();
        self.guarded(result)?;
        self.state = SensorState::Probed;
        debug!("sensor identified");
        Ok(())
    }

    /// Soft reset, then wait for the firmware to boot.
    ///
    /// The reset line is asserted and released with a settle delay after
    /// each edge. Firmware status is polled up to 100 times, 10 ms apart.
    pub fn reset(&mut self) -> Result<Booted<'_, B, T>, Error<B::Error>> {
        match self.state {
            SensorState::Uninitialized => return Err(Error::InvalidState(SensorState::Uninitialized)),
            SensorState::Faulted => return Err(Error::Faulted),
            _ => {}
        }
        self.shot_pending = false;

        self.state = SensorState::Resetting;
        let result = self.soft_reset();
        self.guarded(result)?;

        self.state = SensorState::AwaitingFirmware;
        let result = self.wait_for_firmware();
        self.guarded(result)?;

        Ok(Booted { sensor: self })
    }

    pub fn probe_and_reset(&mut self) -> Result<Booted<'_, B, T>, Error<B::Error>> {
        self.probe()?;
        self.reset()
    }

    /// Probe, reset and configure in one go.
    pub fn init(&mut self, config: &SensorConfig) -> Result<(), Error<B::Error>> {
        self.probe_and_reset()?.configure(config)
    }

    /// Clear the interrupt latch and start ranging in the configured mode.
    pub fn start_ranging(&mut self) -> Result<(), Error<B::Error>> {
        match self.state {
            SensorState::Configured | SensorState::Stopped | SensorState::Ranging => {}
            SensorState::Faulted => return Err(Error::Faulted),
            other => return Err(Error::InvalidState(other)),
        }

        let start = self.config.ranging_mode.start_value();
        let result = self.write_start(start);
        self.guarded(result)?;

        // the single-shot start value already fired the first shot
        self.shot_pending = start == VL53L1X_MODE_START_SINGLE_SHOT;
        self.state = SensorState::Ranging;
        info!("ranging started");
        Ok(())
    }

    /// Write the stop command. Safe to repeat; only `Ranging` changes
    /// state (to `Stopped`).
    pub fn stop_ranging(&mut self) -> Result<(), Error<B::Error>> {
        let result = self.bus.write_byte(VL53L1X_SYSTEM_MODE_START, VL53L1X_MODE_STOP);
        self.guarded(result)?;

        self.shot_pending = false;
        if self.state == SensorState::Ranging {
            self.state = SensorState::Stopped;
            info!("ranging stopped");
        }
        Ok(())
    }

    /// Best-effort stop, then hand the bus backend back.
    pub fn shutdown(mut self) -> B {
        if let Err(e) = self.stop_ranging() {
            warn!("stop before release failed: {:?}", e);
        }
        self.release()
    }

    /// Hand the bus backend back without touching the device.
    pub fn release(self) -> B {
        self.bus.release()
    }

    /// 16-bit bindings check the model id. The id register is out of reach
    /// with 8-bit addressing, so there an answered read of register 0x00
    /// is all the identification there is.
    fn identify(&mut self) -> Result<(), Error<B::Error>> {
        match self.bus.width() {
            AddressWidth::Sixteen => {
                let found = self.bus.read_word(VL53L1X_IDENTIFICATION_MODEL_ID)?;
                if found != VL53L1X_MODEL_ID {
                    return Err(Error::Probe { found });
                }
            }
            AddressWidth::Eight => {
                self.bus.read_byte(VL53L1X_PRESENCE_CHECK)?;
            }
        }
        Ok(())
    }

    fn soft_reset(&mut self) -> Result<(), Error<B::Error>> {
        self.bus.write_byte(VL53L1X_SOFT_RESET, VL53L1X_SOFT_RESET_ASSERT)?;
        self.delay(VL53L1X_RESET_SETTLE_MS);
        self.bus.write_byte(VL53L1X_SOFT_RESET, VL53L1X_SOFT_RESET_RELEASE)?;
        self.delay(VL53L1X_RESET_SETTLE_MS);
        Ok(())
    }

    fn wait_for_firmware(&mut self) -> Result<(), Error<B::Error>> {
        for attempt in 0..VL53L1X_BOOT_POLL_ATTEMPTS {
            let status = FirmwareStatus(self.bus.read_byte(VL53L1X_FIRMWARE_SYSTEM_STATUS)?);
            if status.boot_ready() {
                debug!("firmware ready after {} polls", attempt + 1);
                return Ok(());
            }
            self.delay(VL53L1X_BOOT_POLL_INTERVAL_MS);
        }
        Err(Error::Timeout(Wait::FirmwareBoot))
    }

    fn write_config(&mut self, config: &SensorConfig) -> Result<(), Error<B::Error>> {
        if config.fast_mode_plus {
            self.bus.write_byte(VL53L1X_PAD_I2C_HV_EXTSUP_CONFIG, VL53L1X_FAST_MODE_PLUS_ENABLE)?;
        }
        self.bus.write_byte(VL53L1X_RANGE_CONFIG_VCSEL_PERIOD_A, config.vcsel_period_a)?;
        self.bus.write_byte(VL53L1X_RANGE_CONFIG_VCSEL_PERIOD_B, config.vcsel_period_b)?;
        self.bus.write_byte(VL53L1X_RANGE_CONFIG_VALID_PHASE_HIGH, config.valid_phase_high)?;
        self.bus.write_word(VL53L1X_SD_CONFIG_WOI_SD0, config.woi_sd0)?;
        self.bus.write_word(VL53L1X_SD_CONFIG_WOI_SD1, config.woi_sd1)?;
        self.bus.write_byte(VL53L1X_SD_CONFIG_INITIAL_PHASE_SD0, config.initial_phase_sd0)?;
        self.bus.write_byte(VL53L1X_SD_CONFIG_INITIAL_PHASE_SD1, config.initial_phase_sd1)?;
        self.bus.write_word(VL53L1X_RANGE_CONFIG_TIMEOUT_MACROP_A, config.timeout_macrop_a)?;
        self.bus.write_word(VL53L1X_RANGE_CONFIG_TIMEOUT_MACROP_B, config.timeout_macrop_b)?;
        self.bus.write_byte(VL53L1X_SYSTEM_INTERRUPT_CONFIG_GPIO, config.interrupt_gpio)?;
        self.bus.write_byte(VL53L1X_SYSTEM_INTERRUPT_CLEAR, VL53L1X_INTERRUPT_CLEAR)?;
        Ok(())
    }

    fn write_start(&mut self, start: u8) -> Result<(), Error<B::Error>> {
        self.bus.write_byte(VL53L1X_SYSTEM_INTERRUPT_CLEAR, VL53L1X_INTERRUPT_CLEAR)?;
        self.bus.write_byte(VL53L1X_SYSTEM_MODE_START, start)?;
        Ok(())
    }

    /// Any lifecycle failure leaves the sensor `Faulted`.
    pub(crate) fn guarded<R>(&mut self, result: Result<R, Error<B::Error>>) -> Result<R, Error<B::Error>> {
        if let Err(e) = &result {
            error!("{:?} in state {:?}, sensor faulted", e, self.state);
            self.state = SensorState::Faulted;
        }
        result
    }
}
