// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! The three on-wire time tag encodings: CP16, CP24 and CP56

use byteorder::{ByteOrder, LittleEndian};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Two-octet elapsed time in milliseconds, 0..59999.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cp16Time2a {
    millisecond: u16,
}

impl Cp16Time2a {
    pub fn new(millisecond: u16) -> Cp16Time2a {
        Cp16Time2a {
            millisecond: millisecond.min(59999),
        }
    }

    pub fn millisecond(&self) -> u16 {
        self.millisecond
    }

    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, self.millisecond);
        out.extend_from_slice(&buf);
    }

    pub(crate) fn decode(data: &[u8]) -> Cp16Time2a {
        Cp16Time2a {
            millisecond: LittleEndian::read_u16(data),
        }
    }
}

/// Three-octet time of day: milliseconds within the minute plus the minute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cp24Time2a {
    /// milliseconds within the minute, carries the seconds as well
    pub millisecond: u16,
    /// 0..59
    pub minute: u8,
    /// the clock that produced the tag is not trusted
    pub invalid: bool,
}

impl Cp24Time2a {
    pub fn new(minute: u8, millisecond: u16) -> Cp24Time2a {
        Cp24Time2a {
            millisecond: millisecond.min(59999),
            minute: minute.min(59),
            invalid: false,
        }
    }

    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, self.millisecond);
        out.extend_from_slice(&buf);
        out.push((self.minute & 0x3F) | ((self.invalid as u8) << 7));
    }

    pub(crate) fn decode(data: &[u8]) -> Cp24Time2a {
        Cp24Time2a {
            millisecond: LittleEndian::read_u16(data),
            minute: data[2] & 0x3F,
            invalid: data[2] & 0x80 != 0,
        }
    }
}

/// Seven-octet full calendar time tag.
///
/// The year is stored as two digits; values below 70 are taken as 20xx on
/// conversion. Bit positions follow the companion standard: reserved bits
/// are dropped on decode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cp56Time2a {
    /// milliseconds within the minute, carries the seconds as well
    pub millisecond: u16,
    /// 0..59
    pub minute: u8,
    /// the clock that produced the tag is not trusted
    pub invalid: bool,
    /// 0..23
    pub hour: u8,
    /// daylight saving time marker
    pub summer_time: bool,
    /// 1..31
    pub day_of_month: u8,
    /// 1 (Monday) .. 7 (Sunday); 0 when the producer does not fill it
    pub day_of_week: u8,
    /// 1..12
    pub month: u8,
    /// 0..99
    pub year: u8,
}

impl Cp56Time2a {
    /// Builds a tag from a calendar timestamp.
    pub fn from_datetime(when: &NaiveDateTime) -> Cp56Time2a {
        Cp56Time2a {
            millisecond: (when.second() * 1000 + when.nanosecond() / 1_000_000) as u16,
            minute: when.minute() as u8,
            invalid: false,
            hour: when.hour() as u8,
            summer_time: false,
            day_of_month: when.day() as u8,
            day_of_week: when.weekday().number_from_monday() as u8,
            month: when.month() as u8,
            year: (when.year() % 100) as u8,
        }
    }

    /// The current UTC wall clock as a time tag.
    pub fn now() -> Cp56Time2a {
        Cp56Time2a::from_datetime(&Utc::now().naive_utc())
    }

    /// Converts back to a calendar timestamp.
    ///
    /// Returns `None` when the fields do not name a real date.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        let year = if self.year < 70 {
            2000 + self.year as i32
        } else {
            1900 + self.year as i32
        };
        NaiveDate::from_ymd_opt(year, self.month as u32, self.day_of_month as u32)?
            .and_hms_milli_opt(
                self.hour as u32,
                self.minute as u32,
                (self.millisecond / 1000) as u32,
                (self.millisecond % 1000) as u32,
            )
    }

    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, self.millisecond);
        out.extend_from_slice(&buf);
        out.push((self.minute & 0x3F) | ((self.invalid as u8) << 7));
        out.push((self.hour & 0x1F) | ((self.summer_time as u8) << 7));
        out.push((self.day_of_month & 0x1F) | ((self.day_of_week & 0x07) << 5));
        out.push(self.month & 0x0F);
        out.push(self.year & 0x7F);
    }

    pub(crate) fn decode(data: &[u8]) -> Cp56Time2a {
        Cp56Time2a {
            millisecond: LittleEndian::read_u16(data),
            minute: data[2] & 0x3F,
            invalid: data[2] & 0x80 != 0,
            hour: data[3] & 0x1F,
            summer_time: data[3] & 0x80 != 0,
            day_of_month: data[4] & 0x1F,
            day_of_week: (data[4] >> 5) & 0x07,
            month: data[5] & 0x0F,
            year: data[6] & 0x7F,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cp56_wire_layout() {
        // 10:30:00.500, Thursday June 4th 2024
        let tag = Cp56Time2a {
            millisecond: 500,
            minute: 30,
            invalid: false,
            hour: 10,
            summer_time: false,
            day_of_month: 4,
            day_of_week: 3,
            month: 6,
            year: 24,
        };
        let mut out = Vec::new();
        tag.encode(&mut out);
        assert_eq!(out, [0xF4, 0x01, 0x1E, 0x0A, 0x64, 0x06, 0x18]);
        assert_eq!(Cp56Time2a::decode(&out), tag);
    }

    #[test]
    fn test_cp56_datetime_round_trip() {
        let when = NaiveDate::from_ymd_opt(2024, 6, 4)
            .unwrap()
            .and_hms_milli_opt(10, 30, 0, 500)
            .unwrap();
        let tag = Cp56Time2a::from_datetime(&when);
        assert_eq!(tag.millisecond, 500);
        assert_eq!(tag.day_of_week, 2); // a Tuesday
        assert_eq!(tag.to_datetime(), Some(when));
    }

    #[test]
    fn test_cp56_invalid_date() {
        let mut tag = Cp56Time2a::now();
        tag.month = 0;
        assert!(tag.to_datetime().is_none());
    }

    #[test]
    fn test_cp24_round_trip() {
        let mut tag = Cp24Time2a::new(59, 59999);
        tag.invalid = true;
        let mut out = Vec::new();
        tag.encode(&mut out);
        assert_eq!(out.len(), 3);
        assert_eq!(out[2], 0x3B | 0x80);
        assert_eq!(Cp24Time2a::decode(&out), tag);
    }

    #[test]
    fn test_cp16_round_trip() {
        let tag = Cp16Time2a::new(2500);
        let mut out = Vec::new();
        tag.encode(&mut out);
        assert_eq!(out, [0xC4, 0x09]);
        assert_eq!(Cp16Time2a::decode(&out), tag);
    }
}
