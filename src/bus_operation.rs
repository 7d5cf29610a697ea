use core::fmt::Debug;

use consts::*;
use crate::{consts, utils, DelayNs, Error, I2c, Operation, SevenBitAddress, Vl53l1x};

/// Raw bus capability the register layer is built on.
///
/// Both calls are one complete two-phase transaction: the register select
/// bytes followed by the data phase, with nothing able to run in between.
pub trait BusOperation {
    type Error: Debug;

    /// Select a register and write `wbuf` to it.
    fn write(&mut self, select: &[u8], wbuf: &[u8]) -> Result<(), Self::Error>;

    /// Select a register and fill `rbuf` from it.
    fn write_read(&mut self, select: &[u8], rbuf: &mut [u8]) -> Result<(), Self::Error>;
}

/// Native I2C backend: select and data go out as a single `write`, reads
/// use a repeated-start `write_read`.
pub struct Vl53l1xI2C<P> {
    i2c: P,
    address: SevenBitAddress,
}

impl<P: I2c> Vl53l1xI2C<P> {
    pub fn new(i2c: P) -> Self {
        Self::with_address(i2c, VL53L1X_DEFAULT_I2C_ADDRESS)
    }

    pub fn with_address(i2c: P, address: SevenBitAddress) -> Self {
        Vl53l1xI2C { i2c, address }
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    pub fn release(self) -> P {
        self.i2c
    }
}

impl<P: I2c> BusOperation for Vl53l1xI2C<P> {
    type Error = P::Error;

    /// Frames up to [`I2C_CHUNK_SIZE`] go out as one `write`. Anything
    /// longer is sent as two adjacent write operations of one transaction,
    /// which puts the same bytes on the wire.
    #[inline]
    fn write(&mut self, select: &[u8], wbuf: &[u8]) -> Result<(), Self::Error> {
        let size = select.len() + wbuf.len();
        if size > I2C_CHUNK_SIZE {
            self.i2c.transaction(self.address, &mut [
                Operation::Write(select),
                Operation::Write(wbuf)])?;
            return Ok(());
        }

        let mut frame: [u8; I2C_CHUNK_SIZE] = [0; I2C_CHUNK_SIZE];
        frame[..select.len()].copy_from_slice(select);
        frame[select.len()..size].copy_from_slice(wbuf);
        self.i2c.write(self.address, &frame[..size])?;

        Ok(())
    }

    #[inline]
    fn write_read(&mut self, select: &[u8], rbuf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, select, rbuf)?;

        Ok(())
    }
}

/// Block-transfer backend: each register access is an explicit
/// `I2c::transaction` operation list, for adapters that only expose
/// message-list transfers.
pub struct Vl53l1xI2CBlock<P> {
    i2c: P,
    address: SevenBitAddress,
}

impl<P: I2c> Vl53l1xI2CBlock<P> {
    pub fn new(i2c: P) -> Self {
        Self::with_address(i2c, VL53L1X_DEFAULT_I2C_ADDRESS)
    }

    pub fn with_address(i2c: P, address: SevenBitAddress) -> Self {
        Vl53l1xI2CBlock { i2c, address }
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    pub fn release(self) -> P {
        self.i2c
    }
}

impl<P: I2c> BusOperation for Vl53l1xI2CBlock<P> {
    type Error = P::Error;

    #[inline]
    fn write(&mut self, select: &[u8], wbuf: &[u8]) -> Result<(), Self::Error> {
        self.i2c.transaction(self.address, &mut [
            Operation::Write(select),
            Operation::Write(wbuf)])?;
        Ok(())
    }

    #[inline]
    fn write_read(&mut self, select: &[u8], rbuf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.transaction(self.address, &mut [
            Operation::Write(select),
            Operation::Read(rbuf)])?;
        Ok(())
    }
}

impl<P, T> Vl53l1x<Vl53l1xI2C<P>, T>
    where
    P: I2c,
    T: DelayNs
{
    /// Native backend at the default address, 16-bit register addressing.
    pub fn new_i2c(i2c: P, tim: T) -> Self {
        Vl53l1x::new(Vl53l1xI2C::new(i2c), AddressWidth::Sixteen, tim)
    }

    pub fn new_i2c_with_address(i2c: P, address: SevenBitAddress, tim: T) -> Self {
        Vl53l1x::new(Vl53l1xI2C::with_address(i2c, address), AddressWidth::Sixteen, tim)
    }
}

impl<P, T> Vl53l1x<Vl53l1xI2CBlock<P>, T>
    where
    P: I2c,
    T: DelayNs
{
    pub fn new_i2c_block(i2c: P, tim: T) -> Self {
        Vl53l1x::new(Vl53l1xI2CBlock::new(i2c), AddressWidth::Sixteen, tim)
    }
}

/// Register addressing width of a bus binding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressWidth {
    /// Single select byte; only registers `0x00..=0xFF` are reachable.
    Eight,
    /// High byte then low byte.
    Sixteen,
}

impl AddressWidth {
    pub const fn select_len(self) -> usize {
        match self {
            AddressWidth::Eight => 1,
            AddressWidth::Sixteen => 2,
        }
    }

    /// Select bytes for `reg`, or `None` if it does not fit this width.
    pub fn select_bytes(self, reg: u16) -> Option<([u8; 2], usize)> {
        match self {
            AddressWidth::Sixteen => Some((utils::encode_u16(reg), 2)),
            AddressWidth::Eight if reg <= 0xFF => Some(([reg as u8, 0], 1)),
            AddressWidth::Eight => None,
        }
    }
}

/// Register-level access to one device, with the addressing width fixed
/// for the lifetime of the binding.
pub struct RegisterBus<B> {
    bus: B,
    width: AddressWidth,
}

impl<B: BusOperation> RegisterBus<B> {
    pub fn new(bus: B, width: AddressWidth) -> Self {
        RegisterBus { bus, width }
    }

    pub fn width(&self) -> AddressWidth {
        self.width
    }

    pub fn release(self) -> B {
        self.bus
    }

    fn select(&self, reg: u16, offset: usize) -> Result<([u8; 2], usize), Error<B::Error>> {
        let target = u16::try_from(reg as usize + offset).map_err(|_| Error::Unaddressable(reg))?;
        self.width.select_bytes(target).ok_or(Error::Unaddressable(target))
    }

    pub fn write_register(&mut self, reg: u16, wbuf: &[u8]) -> Result<(), Error<B::Error>> {
        let step = I2C_CHUNK_SIZE - self.width.select_len();
        for (i, chunk) in wbuf.chunks(step).enumerate() {
            let (select, len) = self.select(reg, i * step)?;
            trace!("write {:#06x} <- {:02x?}", reg as usize + i * step, chunk);
            self.bus.write(&select[..len], chunk).map_err(Error::Bus)?;
        }
        Ok(())
    }

    pub fn read_register(&mut self, reg: u16, rbuf: &mut [u8]) -> Result<(), Error<B::Error>> {
        for (i, chunk) in rbuf.chunks_mut(I2C_CHUNK_SIZE).enumerate() {
            let (select, len) = self.select(reg, i * I2C_CHUNK_SIZE)?;
            self.bus.write_read(&select[..len], chunk).map_err(Error::Bus)?;
            trace!("read {:#06x} -> {:02x?}", reg as usize + i * I2C_CHUNK_SIZE, chunk);
        }
        Ok(())
    }

    pub fn write_byte(&mut self, reg: u16, val: u8) -> Result<(), Error<B::Error>> {
        self.write_register(reg, &[val])
    }

    pub fn write_word(&mut self, reg: u16, val: u16) -> Result<(), Error<B::Error>> {
        self.write_register(reg, &utils::encode_u16(val))
    }

    pub fn read_byte(&mut self, reg: u16) -> Result<u8, Error<B::Error>> {
        let mut rbuf: [u8; 1] = [0];
        self.read_register(reg, &mut rbuf)?;
        Ok(rbuf[0])
    }

    pub fn read_word(&mut self, reg: u16) -> Result<u16, Error<B::Error>> {
        let mut rbuf: [u8; 2] = [0; 2];
        self.read_register(reg, &mut rbuf)?;
        Ok(utils::decode_u16(rbuf[0], rbuf[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = VL53L1X_DEFAULT_I2C_ADDRESS;

    #[test]
    fn sixteen_bit_write_sends_high_then_low_select_byte() {
        let mut i2c = I2cMock::new(&[I2cTransaction::write(ADDR, vec![0x00, 0x87, 0x40])]);
        let mut bus = RegisterBus::new(Vl53l1xI2C::new(i2c.clone()), AddressWidth::Sixteen);

        bus.write_byte(VL53L1X_SYSTEM_MODE_START, 0x40).unwrap();
        i2c.done();
    }

    #[test]
    fn word_values_are_big_endian_on_the_wire() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, vec![0x00, 0x5E, 0x00, 0xD6]),
            I2cTransaction::write_read(ADDR, vec![0x00, 0x96], vec![0x01, 0x2C]),
        ]);
        let mut bus = RegisterBus::new(Vl53l1xI2C::new(i2c.clone()), AddressWidth::Sixteen);

        bus.write_word(VL53L1X_RANGE_CONFIG_TIMEOUT_MACROP_A, 0x00D6).unwrap();
        assert_eq!(bus.read_word(VL53L1X_RESULT_FINAL_RANGE_MM_SD0).unwrap(), 300);
        i2c.done();
    }

    #[test]
    fn eight_bit_binding_sends_single_select_byte() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, vec![0x87, 0x40]),
            I2cTransaction::write_read(ADDR, vec![0x89], vec![0x00]),
        ]);
        let mut bus = RegisterBus::new(Vl53l1xI2C::new(i2c.clone()), AddressWidth::Eight);

        bus.write_byte(VL53L1X_SYSTEM_MODE_START, 0x40).unwrap();
        assert_eq!(bus.read_byte(VL53L1X_RESULT_RANGE_STATUS).unwrap(), 0x00);
        i2c.done();
    }

    #[test]
    fn eight_bit_binding_refuses_wide_registers_without_bus_traffic() {
        let mut i2c = I2cMock::new(&[]);
        let mut bus = RegisterBus::new(Vl53l1xI2C::new(i2c.clone()), AddressWidth::Eight);

        assert_eq!(
            bus.read_word(VL53L1X_IDENTIFICATION_MODEL_ID),
            Err(Error::Unaddressable(VL53L1X_IDENTIFICATION_MODEL_ID))
        );
        i2c.done();
    }

    #[test]
    fn long_writes_are_split_into_frames() {
        let data: Vec<u8> = (0..40).collect();
        let mut first = vec![0x01, 0x00];
        first.extend_from_slice(&data[..30]);
        let mut second = vec![0x01, 0x1E];
        second.extend_from_slice(&data[30..]);

        let mut i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, first),
            I2cTransaction::write(ADDR, second),
        ]);
        let mut bus = RegisterBus::new(Vl53l1xI2C::new(i2c.clone()), AddressWidth::Sixteen);

        bus.write_register(0x0100, &data).unwrap();
        i2c.done();
    }

    #[test]
    fn oversized_backend_write_falls_back_to_a_transaction() {
        let data = [0xA5u8; 40];
        let mut i2c = I2cMock::new(&[
            I2cTransaction::transaction_start(ADDR),
            I2cTransaction::write(ADDR, vec![0x00, 0x00]),
            I2cTransaction::write(ADDR, data.to_vec()),
            I2cTransaction::transaction_end(ADDR),
        ]);
        let mut backend = Vl53l1xI2C::new(i2c.clone());

        backend.write(&[0x00, 0x00], &data).unwrap();
        i2c.done();
    }

    #[test]
    fn full_size_backend_write_is_a_single_frame() {
        let data = [0x11u8; I2C_CHUNK_SIZE - 2];
        let mut frame = vec![0x01, 0x00];
        frame.extend_from_slice(&data);
        let mut i2c = I2cMock::new(&[I2cTransaction::write(ADDR, frame)]);
        let mut backend = Vl53l1xI2C::new(i2c.clone());

        backend.write(&[0x01, 0x00], &data).unwrap();
        i2c.done();
    }

    #[test]
    fn writes_running_past_the_address_space_fail() {
        let data = [0u8; 40];
        let mut i2c = I2cMock::new(&[]);
        let mut bus = RegisterBus::new(Vl53l1xI2C::new(i2c.clone()), AddressWidth::Eight);

        assert_eq!(bus.write_register(0x0100, &data), Err(Error::Unaddressable(0x0100)));
        i2c.done();
    }

    #[test]
    fn block_backend_uses_one_transaction_per_register_access() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::transaction_start(ADDR),
            I2cTransaction::write(ADDR, vec![0x00, 0x86]),
            I2cTransaction::write(ADDR, vec![0x01]),
            I2cTransaction::transaction_end(ADDR),
            I2cTransaction::transaction_start(ADDR),
            I2cTransaction::write(ADDR, vec![0x01, 0x0F]),
            I2cTransaction::read(ADDR, vec![0xEA, 0xCC]),
            I2cTransaction::transaction_end(ADDR),
        ]);
        let mut bus = RegisterBus::new(Vl53l1xI2CBlock::new(i2c.clone()), AddressWidth::Sixteen);

        bus.write_byte(VL53L1X_SYSTEM_INTERRUPT_CLEAR, 0x01).unwrap();
        assert_eq!(bus.read_word(VL53L1X_IDENTIFICATION_MODEL_ID).unwrap(), VL53L1X_MODEL_ID);
        i2c.done();
    }

    #[test]
    fn backend_failure_surfaces_as_bus_error() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, vec![0x00, 0x00, 0x00]).with_error(ErrorKind::Other),
        ]);
        let mut bus = RegisterBus::new(Vl53l1xI2C::new(i2c.clone()), AddressWidth::Sixteen);

        assert_eq!(
            bus.write_byte(VL53L1X_SOFT_RESET, 0x00),
            Err(Error::Bus(ErrorKind::Other))
        );
        i2c.done();
    }

    #[test]
    fn custom_device_address_is_used_for_every_frame() {
        let mut i2c = I2cMock::new(&[I2cTransaction::write_read(0x30, vec![0x00, 0x31], vec![0x01])]);
        let backend = Vl53l1xI2C::with_address(i2c.clone(), 0x30);
        assert_eq!(backend.address(), 0x30);
        let mut bus = RegisterBus::new(backend, AddressWidth::Sixteen);

        assert_eq!(bus.read_byte(VL53L1X_GPIO_TIO_HV_STATUS).unwrap(), 0x01);
        i2c.done();
    }
}
