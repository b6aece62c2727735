// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Protocol constants shared by the frame, ASDU and connection layers

/// IEC 60870-5-104 registered TCP port
pub const DEFAULT_PORT: u16 = 2404;

/// start octet of every APCI
pub const START_BYTE: u8 = 0x68;

/// APCI length octet of a pure S- or U-frame (four control octets, no ASDU)
pub const APCI_MIN_LENGTH: u8 = 4;

/// largest legal value of the APCI length octet
pub const APCI_MAX_LENGTH: u8 = 253;

/// start octet, length octet and the four control octets
pub const APCI_SIZE: usize = 6;

/// largest ASDU body that still fits the APCI length octet
pub const MAX_ASDU_SIZE: usize = (APCI_MAX_LENGTH - APCI_MIN_LENGTH) as usize;

/// sequence numbers are 15 bit, counted modulo this
pub const SEQUENCE_MODULO: u16 = 32768;

/// upper bound of the VSQ element count field (7 bits)
pub const MAX_NUMBER_OF_ELEMENTS: u8 = 127;

// U-frame function bits, exactly one set in the first control octet
pub(crate) const U_STARTDT_ACT: u8 = 0x04;
pub(crate) const U_STARTDT_CON: u8 = 0x08;
pub(crate) const U_STOPDT_ACT: u8 = 0x10;
pub(crate) const U_STOPDT_CON: u8 = 0x20;
pub(crate) const U_TESTFR_ACT: u8 = 0x40;
pub(crate) const U_TESTFR_CON: u8 = 0x80;

/// qualifier of interrogation: station interrogation (global)
pub const QOI_STATION: u8 = 20;
/// qualifier of interrogation: group 1; groups 2..16 follow consecutively
pub const QOI_GROUP_1: u8 = 21;

/// qualifier of reset process: total process reset
pub const QRP_GENERAL_RESET: u8 = 1;
/// qualifier of reset process: reset of pending time-tagged information
pub const QRP_RESET_PENDING_INFO_WITH_TIME_TAG: u8 = 2;

/// fixed test bit pattern carried by a test command (type 104)
pub(crate) const TEST_PATTERN: [u8; 2] = [0xCC, 0x55];
