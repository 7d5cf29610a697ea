use consts::*;
use crate::consts;

/// How ranging is started.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum RangingMode {
    /// Back-to-back ranging: the sensor keeps measuring after one start.
    #[default]
    Continuous,
    /// One measurement per start command; the driver re-triggers after
    /// each reading.
    SingleShot,
}

impl RangingMode {
    pub const fn start_value(self) -> u8 {
        match self {
            RangingMode::Continuous => VL53L1X_MODE_START_BACK_TO_BACK,
            RangingMode::SingleShot => VL53L1X_MODE_START_SINGLE_SHOT,
        }
    }
}

/// Range/accuracy trade-off presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DistanceMode {
    /// Up to about 1.3 m, better ambient immunity.
    Short,
    /// Up to about 4 m in the dark.
    Long,
}

impl DistanceMode {
    /// VCSEL period A/B, valid phase high, timeout macro-period A/B.
    const fn registers(self) -> (u8, u8, u8, u16, u16) {
        match self {
            DistanceMode::Short => (
                VL53L1X_SHORT_VCSEL_PERIOD_A,
                VL53L1X_SHORT_VCSEL_PERIOD_B,
                VL53L1X_SHORT_VALID_PHASE_HIGH,
                VL53L1X_SHORT_TIMEOUT_MACROP_A,
                VL53L1X_SHORT_TIMEOUT_MACROP_B,
            ),
            DistanceMode::Long => (
                VL53L1X_LONG_VCSEL_PERIOD_A,
                VL53L1X_LONG_VCSEL_PERIOD_B,
                VL53L1X_LONG_VALID_PHASE_HIGH,
                VL53L1X_LONG_TIMEOUT_MACROP_A,
                VL53L1X_LONG_TIMEOUT_MACROP_B,
            ),
        }
    }
}

/// Static tuning written during configuration.
///
/// Values are raw register contents. The defaults are the fixed vendor
/// reference sequence; nothing here is derived from a timing budget.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SensorConfig {
    pub vcsel_period_a: u8,
    pub vcsel_period_b: u8,
    pub valid_phase_high: u8,
    pub woi_sd0: u16,
    pub woi_sd1: u16,
    pub initial_phase_sd0: u8,
    pub initial_phase_sd1: u8,
    pub timeout_macrop_a: u16,
    pub timeout_macrop_b: u16,
    /// SYSTEM__INTERRUPT_CONFIG_GPIO: interrupt mode and polarity.
    pub interrupt_gpio: u8,
    pub ranging_mode: RangingMode,
    /// Switch the pads to 1 MHz fast-mode-plus before the tuning writes.
    pub fast_mode_plus: bool,
    /// Preset the timing registers came from, `None` for the reference set.
    pub distance_mode: Option<DistanceMode>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig {
            vcsel_period_a: VL53L1X_DEFAULT_VCSEL_PERIOD_A,
            vcsel_period_b: VL53L1X_DEFAULT_VCSEL_PERIOD_B,
            valid_phase_high: VL53L1X_DEFAULT_VALID_PHASE_HIGH,
            woi_sd0: VL53L1X_DEFAULT_WOI_SD,
            woi_sd1: VL53L1X_DEFAULT_WOI_SD,
            initial_phase_sd0: VL53L1X_DEFAULT_INITIAL_PHASE_SD,
            initial_phase_sd1: VL53L1X_DEFAULT_INITIAL_PHASE_SD,
            timeout_macrop_a: VL53L1X_DEFAULT_TIMEOUT_MACROP,
            timeout_macrop_b: VL53L1X_DEFAULT_TIMEOUT_MACROP,
            interrupt_gpio: VL53L1X_DEFAULT_INTERRUPT_CONFIG_GPIO,
            ranging_mode: RangingMode::Continuous,
            fast_mode_plus: false,
            distance_mode: None,
        }
    }
}

impl SensorConfig {
    pub fn with_ranging_mode(mut self, ranging_mode: RangingMode) -> Self {
        self.ranging_mode = ranging_mode;
        self
    }

    pub fn with_vcsel_periods(mut self, period_a: u8, period_b: u8) -> Self {
        self.vcsel_period_a = period_a;
        self.vcsel_period_b = period_b;
        self
    }

    pub fn with_timeout_macrop(mut self, macrop_a: u16, macrop_b: u16) -> Self {
        self.timeout_macrop_a = macrop_a;
        self.timeout_macrop_b = macrop_b;
        self
    }

    pub fn with_interrupt_gpio(mut self, interrupt_gpio: u8) -> Self {
        self.interrupt_gpio = interrupt_gpio;
        self
    }

    pub fn with_fast_mode_plus(mut self, enable: bool) -> Self {
        self.fast_mode_plus = enable;
        self
    }

    /// Overwrite the VCSEL periods, valid phase and timeouts with the
    /// fixed values of `mode`.
    pub fn with_distance_mode(mut self, mode: DistanceMode) -> Self {
        let (vcsel_a, vcsel_b, phase_high, macrop_a, macrop_b) = mode.registers();
        self.vcsel_period_a = vcsel_a;
        self.vcsel_period_b = vcsel_b;
        self.valid_phase_high = phase_high;
        self.timeout_macrop_a = macrop_a;
        self.timeout_macrop_b = macrop_b;
        self.distance_mode = Some(mode);
        self
    }
}
