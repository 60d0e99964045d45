//! DS3231 real-time clock (I2C)
//!
//! The DS3231 keeps calendar time in seven BCD registers starting at 0x00.
//! The clock is always written in 24-hour mode; 12-hour values are still
//! decoded on read in case another tool set the chip.
//!
//! # Registers Used
//!
//! - 0x00..0x06: seconds, minutes, hours, weekday, date, month/century, year
//! - 0x0F: status, bit 7 is the oscillator-stop flag (OSF)
//!
//! OSF is set when the oscillator stopped at some point, e.g. first power-up
//! or a flat backup cell. The time registers are meaningless until the next
//! write, so reads report [`ClockError::Unset`] while it is set.

use embedded_hal::i2c::I2c;
use gazette_core::clock::CalendarTime;
use gazette_core::traits::{ClockError, RealTimeClock};

/// Fixed 7-bit bus address
pub const ADDRESS: u8 = 0x68;

/// DS3231 register addresses
pub mod reg {
    /// Seconds, start of the time block
    pub const SECONDS: u8 = 0x00;
    /// Control
    pub const CONTROL: u8 = 0x0E;
    /// Status flags
    pub const STATUS: u8 = 0x0F;
}

/// Oscillator-stop flag in the status register
const STATUS_OSF: u8 = 0x80;
/// 12-hour mode select in the hours register
const HOURS_12H: u8 = 0x40;
/// PM flag in 12-hour mode
const HOURS_PM: u8 = 0x20;
/// Century bit in the month register
const MONTH_CENTURY: u8 = 0x80;

/// Years the chip can hold with its century bit
const FIRST_YEAR: u16 = 2000;
const LAST_YEAR: u16 = 2199;

/// Encode a value 0..=99 as packed BCD
pub fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Decode packed BCD, rejecting nibbles above 9
pub fn from_bcd(bcd: u8) -> Option<u8> {
    let (tens, ones) = (bcd >> 4, bcd & 0x0F);
    if tens > 9 || ones > 9 {
        return None;
    }
    Some(tens * 10 + ones)
}

/// Check every field against the chip's representable range
fn validate(time: &CalendarTime) -> Result<(), ClockError> {
    let valid = (FIRST_YEAR..=LAST_YEAR).contains(&time.year)
        && (1..=12).contains(&time.month)
        && (1..=31).contains(&time.day)
        && time.weekday < 7
        && time.hour < 24
        && time.minute < 60
        && time.second < 60;

    if valid {
        Ok(())
    } else {
        Err(ClockError::InvalidTime)
    }
}

/// Pack a calendar time into the seven time registers
pub fn encode(time: &CalendarTime) -> Result<[u8; 7], ClockError> {
    validate(time)?;

    let offset = time.year - FIRST_YEAR;
    let century = if offset >= 100 { MONTH_CENTURY } else { 0 };

    Ok([
        to_bcd(time.second),
        to_bcd(time.minute),
        to_bcd(time.hour),
        // Register counts 1..=7, Monday first
        time.weekday + 1,
        to_bcd(time.day),
        to_bcd(time.month) | century,
        to_bcd((offset % 100) as u8),
    ])
}

/// Unpack the seven time registers
pub fn decode(regs: &[u8; 7]) -> Result<CalendarTime, ClockError> {
    let bcd = |value: u8| from_bcd(value).ok_or(ClockError::InvalidTime);

    let second = bcd(regs[0] & 0x7F)?;
    let minute = bcd(regs[1] & 0x7F)?;

    let hours = regs[2];
    let hour = if hours & HOURS_12H != 0 {
        let twelve = bcd(hours & 0x1F)?;
        if !(1..=12).contains(&twelve) {
            return Err(ClockError::InvalidTime);
        }
        let pm = hours & HOURS_PM != 0;
        (twelve % 12) + if pm { 12 } else { 0 }
    } else {
        bcd(hours & 0x3F)?
    };

    let weekday = (regs[3] & 0x07)
        .checked_sub(1)
        .ok_or(ClockError::InvalidTime)?;
    let day = bcd(regs[4] & 0x3F)?;
    let month = bcd(regs[5] & 0x1F)?;
    let century = if regs[5] & MONTH_CENTURY != 0 { 100 } else { 0 };
    let year = FIRST_YEAR + century + u16::from(bcd(regs[6])?);

    let time = CalendarTime::new(year, month, day, weekday, hour, minute, second);
    validate(&time)?;
    Ok(time)
}

/// DS3231 driver over a blocking I2C bus
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Check if the oscillator has stopped since the last write
    pub fn oscillator_stopped(&mut self) -> Result<bool, ClockError> {
        Ok(self.read_register(reg::STATUS)? & STATUS_OSF != 0)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, ClockError> {
        let mut value = [0u8];
        self.i2c
            .write_read(ADDRESS, &[register], &mut value)
            .map_err(|_| ClockError::Unavailable)?;
        Ok(value[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), ClockError> {
        self.i2c
            .write(ADDRESS, &[register, value])
            .map_err(|_| ClockError::Unavailable)
    }
}

impl<I2C: I2c> RealTimeClock for Ds3231<I2C> {
    fn write(&mut self, time: &CalendarTime) -> Result<(), ClockError> {
        let regs = encode(time)?;

        let mut frame = [0u8; 8];
        frame[0] = reg::SECONDS;
        frame[1..].copy_from_slice(&regs);
        self.i2c
            .write(ADDRESS, &frame)
            .map_err(|_| ClockError::Unavailable)?;

        // Time is valid again
        let status = self.read_register(reg::STATUS)?;
        if status & STATUS_OSF != 0 {
            self.write_register(reg::STATUS, status & !STATUS_OSF)?;
        }
        Ok(())
    }

    fn read(&mut self) -> Result<CalendarTime, ClockError> {
        if self.oscillator_stopped()? {
            return Err(ClockError::Unset);
        }

        let mut regs = [0u8; 7];
        self.i2c
            .write_read(ADDRESS, &[reg::SECONDS], &mut regs)
            .map_err(|_| ClockError::Unavailable)?;
        decode(&regs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    /// Register file behind an auto-incrementing pointer, like the chip
    struct MockI2c {
        regs: [u8; 0x13],
        pointer: usize,
        offline: bool,
    }

    impl MockI2c {
        fn new() -> Self {
            let mut regs = [0u8; 0x13];
            // Power-on state: oscillator-stop flag set
            regs[usize::from(reg::STATUS)] = STATUS_OSF;
            regs[usize::from(reg::CONTROL)] = 0x1C;
            Self {
                regs,
                pointer: 0,
                offline: false,
            }
        }
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.offline || address != ADDRESS {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }

            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        let Some((&register, data)) = bytes.split_first() else {
                            continue;
                        };
                        self.pointer = usize::from(register);
                        for &byte in data {
                            self.regs[self.pointer % self.regs.len()] = byte;
                            self.pointer += 1;
                        }
                    }
                    Operation::Read(buf) => {
                        for byte in buf.iter_mut() {
                            *byte = self.regs[self.pointer % self.regs.len()];
                            self.pointer += 1;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_bcd() {
        assert_eq!(to_bcd(59), 0x59);
        assert_eq!(to_bcd(7), 0x07);
        assert_eq!(from_bcd(0x42), Some(42));
        assert_eq!(from_bcd(0x1A), None);
    }

    #[test]
    fn test_write_then_read() {
        let mut rtc = Ds3231::new(MockI2c::new());
        let time = CalendarTime::new(2024, 3, 5, 1, 14, 7, 30);

        rtc.write(&time).unwrap();
        assert_eq!(rtc.read().unwrap(), time);

        let i2c = rtc.release();
        assert_eq!(&i2c.regs[..7], &[0x30, 0x07, 0x14, 0x02, 0x05, 0x03, 0x24]);
    }

    #[test]
    fn test_unset_until_first_write() {
        let mut rtc = Ds3231::new(MockI2c::new());
        assert_eq!(rtc.read(), Err(ClockError::Unset));
        assert!(rtc.oscillator_stopped().unwrap());

        rtc.write(&CalendarTime::new(2024, 1, 1, 0, 0, 0, 0)).unwrap();
        assert!(!rtc.oscillator_stopped().unwrap());
        assert!(rtc.read().is_ok());
    }

    #[test]
    fn test_century_bit() {
        let mut rtc = Ds3231::new(MockI2c::new());
        let time = CalendarTime::new(2105, 12, 31, 6, 23, 59, 59);

        rtc.write(&time).unwrap();
        assert_eq!(rtc.read().unwrap(), time);

        let i2c = rtc.release();
        assert_eq!(i2c.regs[5], 0x92);
        assert_eq!(i2c.regs[6], 0x05);
    }

    #[test]
    fn test_drifted_day_rejected() {
        let mut rtc = Ds3231::new(MockI2c::new());
        let drifted = CalendarTime::new(2024, 1, 31, 2, 23, 59, 0).with_drift(2);

        assert_eq!(rtc.write(&drifted), Err(ClockError::InvalidTime));
        // Nothing written, still unset
        assert_eq!(rtc.read(), Err(ClockError::Unset));
    }

    #[test]
    fn test_out_of_range_year_rejected() {
        let mut rtc = Ds3231::new(MockI2c::new());
        let time = CalendarTime::new(1999, 12, 31, 4, 23, 59, 59);
        assert_eq!(rtc.write(&time), Err(ClockError::InvalidTime));
    }

    #[test]
    fn test_twelve_hour_mode_decoded() {
        // 11:45:00 PM, Sunday 2024-06-02
        let regs = [0x00, 0x45, HOURS_12H | HOURS_PM | 0x11, 0x07, 0x02, 0x06, 0x24];
        let time = decode(&regs).unwrap();
        assert_eq!((time.hour, time.minute), (23, 45));
        assert_eq!(time.weekday, 6);

        // 12:10 AM is just after midnight
        let regs = [0x00, 0x10, HOURS_12H | 0x12, 0x01, 0x03, 0x06, 0x24];
        assert_eq!(decode(&regs).unwrap().hour, 0);
    }

    #[test]
    fn test_garbage_registers_rejected() {
        // Weekday register zero
        let regs = [0x00, 0x00, 0x00, 0x00, 0x01, 0x01, 0x24];
        assert_eq!(decode(&regs), Err(ClockError::InvalidTime));

        // Month 13
        let regs = [0x00, 0x00, 0x00, 0x01, 0x01, 0x13, 0x24];
        assert_eq!(decode(&regs), Err(ClockError::InvalidTime));

        // Non-BCD minutes
        let regs = [0x00, 0x5F, 0x00, 0x01, 0x01, 0x01, 0x24];
        assert_eq!(decode(&regs), Err(ClockError::InvalidTime));
    }

    #[test]
    fn test_bus_error_is_unavailable() {
        let mut i2c = MockI2c::new();
        i2c.offline = true;
        let mut rtc = Ds3231::new(i2c);

        assert_eq!(rtc.read(), Err(ClockError::Unavailable));
        assert_eq!(
            rtc.write(&CalendarTime::new(2024, 1, 1, 0, 0, 0, 0)),
            Err(ClockError::Unavailable)
        );
    }
}
