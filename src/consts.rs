use embedded_hal::i2c::SevenBitAddress;

pub const VL53L1X_DEFAULT_I2C_ADDRESS: SevenBitAddress = 0x29;

/// Value of the identification register on a genuine VL53L1X.
pub const VL53L1X_MODEL_ID: u16 = 0xEACC;

/* Register map (16-bit addresses) */
pub const VL53L1X_SOFT_RESET: u16 = 0x0000;
pub const VL53L1X_FIRMWARE_SYSTEM_STATUS: u16 = 0x0010;
pub const VL53L1X_PAD_I2C_HV_EXTSUP_CONFIG: u16 = 0x002D;
pub const VL53L1X_GPIO_TIO_HV_STATUS: u16 = 0x0031;
pub const VL53L1X_SYSTEM_INTERRUPT_CONFIG_GPIO: u16 = 0x0046;
pub const VL53L1X_RANGE_CONFIG_TIMEOUT_MACROP_A: u16 = 0x005E;
pub const VL53L1X_RANGE_CONFIG_VCSEL_PERIOD_A: u16 = 0x0060;
pub const VL53L1X_RANGE_CONFIG_TIMEOUT_MACROP_B: u16 = 0x0061;
pub const VL53L1X_RANGE_CONFIG_VCSEL_PERIOD_B: u16 = 0x0063;
pub const VL53L1X_RANGE_CONFIG_VALID_PHASE_HIGH: u16 = 0x0069;
pub const VL53L1X_SD_CONFIG_WOI_SD0: u16 = 0x0078;
pub const VL53L1X_SD_CONFIG_WOI_SD1: u16 = 0x007A;
pub const VL53L1X_SD_CONFIG_INITIAL_PHASE_SD0: u16 = 0x007C;
pub const VL53L1X_SD_CONFIG_INITIAL_PHASE_SD1: u16 = 0x007E;
pub const VL53L1X_SYSTEM_INTERRUPT_CLEAR: u16 = 0x0086;
pub const VL53L1X_SYSTEM_MODE_START: u16 = 0x0087;
pub const VL53L1X_RESULT_RANGE_STATUS: u16 = 0x0089;
pub const VL53L1X_RESULT_FINAL_RANGE_MM_SD0: u16 = 0x0096;
pub const VL53L1X_IDENTIFICATION_MODEL_ID: u16 = 0x010F;
/// Read to detect the sensor when the id register is not addressable.
pub const VL53L1X_PRESENCE_CHECK: u16 = 0x0000;

/* Register values */
pub const VL53L1X_SOFT_RESET_ASSERT: u8 = 0x00;
pub const VL53L1X_SOFT_RESET_RELEASE: u8 = 0x01;
pub const VL53L1X_INTERRUPT_CLEAR: u8 = 0x01;
pub const VL53L1X_MODE_START_BACK_TO_BACK: u8 = 0x40;
pub const VL53L1X_MODE_START_SINGLE_SHOT: u8 = 0x10;
pub const VL53L1X_MODE_STOP: u8 = 0x00;
pub const VL53L1X_FAST_MODE_PLUS_ENABLE: u8 = 0x01;

/* Vendor reference tuning, applied by SensorConfig::default() */
pub const VL53L1X_DEFAULT_VCSEL_PERIOD_A: u8 = 0x09;
pub const VL53L1X_DEFAULT_VCSEL_PERIOD_B: u8 = 0x0D;
pub const VL53L1X_DEFAULT_VALID_PHASE_HIGH: u8 = 0xC8;
pub const VL53L1X_DEFAULT_WOI_SD: u16 = 0x0001;
pub const VL53L1X_DEFAULT_INITIAL_PHASE_SD: u8 = 0x00;
pub const VL53L1X_DEFAULT_TIMEOUT_MACROP: u16 = 0x00D6;
pub const VL53L1X_DEFAULT_INTERRUPT_CONFIG_GPIO: u8 = 0x01;

/* Distance mode presets, 50 ms budget */
pub const VL53L1X_SHORT_VCSEL_PERIOD_A: u8 = 0x07;
pub const VL53L1X_SHORT_VCSEL_PERIOD_B: u8 = 0x05;
pub const VL53L1X_SHORT_VALID_PHASE_HIGH: u8 = 0x38;
pub const VL53L1X_SHORT_TIMEOUT_MACROP_A: u16 = 0x01AE;
pub const VL53L1X_SHORT_TIMEOUT_MACROP_B: u16 = 0x01E8;
pub const VL53L1X_LONG_VCSEL_PERIOD_A: u8 = 0x0F;
pub const VL53L1X_LONG_VCSEL_PERIOD_B: u8 = 0x0D;
pub const VL53L1X_LONG_VALID_PHASE_HIGH: u8 = 0xB8;
pub const VL53L1X_LONG_TIMEOUT_MACROP_A: u16 = 0x00AD;
pub const VL53L1X_LONG_TIMEOUT_MACROP_B: u16 = 0x00C6;

/* Timing */
pub const VL53L1X_RESET_SETTLE_MS: u32 = 10;
pub const VL53L1X_BOOT_POLL_INTERVAL_MS: u32 = 10;
pub const VL53L1X_BOOT_POLL_ATTEMPTS: u16 = 100;
pub const DATA_READY_POLL_INTERVAL_MS: u32 = 1;

/* Result validity */
pub const VL53L1X_MAX_VALID_DISTANCE_MM: u16 = 8190;

/// Largest single bus frame, register select bytes included.
pub const I2C_CHUNK_SIZE: usize = 32;
