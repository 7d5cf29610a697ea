//! Result validity filtering.
//!
//! Pure functions only: whether a reading is accepted depends on the raw
//! range status byte and the raw distance and nothing else.

use bitfield::bitfield;

use crate::consts::VL53L1X_MAX_VALID_DISTANCE_MM;

bitfield! {
    /// RESULT__RANGE_STATUS. The upper nibble must be zero for a usable range.
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct RangeStatus(u8);
    impl Debug;
    pub u8, validity, _: 7, 4;
    pub u8, code, _: 3, 0;
}

bitfield! {
    /// GPIO__TIO_HV_STATUS. Bit 0 is the data-ready latch.
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct GpioStatus(u8);
    impl Debug;
    pub data_ready, _: 0;
}

bitfield! {
    /// FIRMWARE__SYSTEM_STATUS. Bit 0 is set once the firmware has booted.
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct FirmwareStatus(u8);
    impl Debug;
    pub boot_ready, _: 0;
}

/// Why a present reading was not accepted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The validity nibble of the range status was non-zero.
    Status(u8),
    /// The distance was 0 or at/above the 8190 mm sentinel.
    Distance(u16),
}

/// Outcome of one ranging poll that found data ready.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MeasurementResult {
    pub raw_distance_mm: u16,
    pub range_status: u8,
    pub accepted: bool,
}

impl MeasurementResult {
    pub fn new(range_status: u8, raw_distance_mm: u16) -> Self {
        MeasurementResult {
            raw_distance_mm,
            range_status,
            accepted: is_accepted(range_status, raw_distance_mm),
        }
    }

    /// The distance, if the reading was accepted.
    pub fn distance_mm(&self) -> Option<u16> {
        self.accepted.then_some(self.raw_distance_mm)
    }

    pub fn rejection(&self) -> Option<Rejection> {
        evaluate(self.range_status, self.raw_distance_mm).err()
    }
}

/// Accepted iff the status nibble is clean and `0 < distance < 8190`.
#[inline]
pub fn is_accepted(range_status: u8, raw_distance_mm: u16) -> bool {
    evaluate(range_status, raw_distance_mm).is_ok()
}

/// Turn a raw (status, distance) pair into an accepted distance or the
/// reason it was rejected. A bad status wins over a bad distance.
pub fn evaluate(range_status: u8, raw_distance_mm: u16) -> Result<u16, Rejection> {
    let status = RangeStatus(range_status);
    if status.validity() != 0 {
        return Err(Rejection::Status(status.validity()));
    }
    if raw_distance_mm == 0 || raw_distance_mm >= VL53L1X_MAX_VALID_DISTANCE_MM {
        return Err(Rejection::Distance(raw_distance_mm));
    }
    Ok(raw_distance_mm)
}
