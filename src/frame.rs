// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! APCI frame assembly
//!
//! Every on-wire unit is `0x68 | LEN | C1 C2 C3 C4 | ASDU body`, where
//! `LEN` counts everything after the length octet. A [`Frame`] starts as a
//! six-octet skeleton, grows by appending the encoded ASDU and is stamped
//! with the send/receive counts immediately before transmission.

use super::constant::{
    APCI_MAX_LENGTH, APCI_MIN_LENGTH, APCI_SIZE, START_BYTE, U_STARTDT_ACT, U_STARTDT_CON,
    U_STOPDT_ACT, U_STOPDT_CON, U_TESTFR_ACT, U_TESTFR_CON,
};
use super::error::Error;

/// The six U-frame functions, exactly one bit in the first control octet.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UFrameKind {
    StartDtAct,
    StartDtCon,
    StopDtAct,
    StopDtCon,
    TestFrAct,
    TestFrCon,
}

impl UFrameKind {
    pub(crate) fn control_byte(self) -> u8 {
        let function = match self {
            UFrameKind::StartDtAct => U_STARTDT_ACT,
            UFrameKind::StartDtCon => U_STARTDT_CON,
            UFrameKind::StopDtAct => U_STOPDT_ACT,
            UFrameKind::StopDtCon => U_STOPDT_CON,
            UFrameKind::TestFrAct => U_TESTFR_ACT,
            UFrameKind::TestFrCon => U_TESTFR_CON,
        };
        function | 0x03
    }

    /// Decodes the first control octet of a U-frame.
    ///
    /// Zero or more than one function bit is a framing error.
    pub(crate) fn from_control_byte(c1: u8) -> Result<UFrameKind, Error> {
        match c1 & 0xFC {
            U_STARTDT_ACT => Ok(UFrameKind::StartDtAct),
            U_STARTDT_CON => Ok(UFrameKind::StartDtCon),
            U_STOPDT_ACT => Ok(UFrameKind::StopDtAct),
            U_STOPDT_CON => Ok(UFrameKind::StopDtCon),
            U_TESTFR_ACT => Ok(UFrameKind::TestFrAct),
            U_TESTFR_CON => Ok(UFrameKind::TestFrCon),
            _ => Err(Error::Framing(format!(
                "bad U-frame bit pattern 0x{:02X}",
                c1
            ))),
        }
    }
}

/// An outbound APCI+ASDU octet buffer.
#[derive(Debug, Clone)]
pub struct Frame {
    data: Vec<u8>,
}

impl Frame {
    /// Creates the skeleton of an I-frame.
    ///
    /// The length and control octets stay zero until [`Frame::prepare_to_send`].
    pub fn new() -> Frame {
        let mut data = Vec::with_capacity(64);
        data.extend_from_slice(&[START_BYTE, 0, 0, 0, 0, 0]);
        Frame { data }
    }

    /// Builds a complete S-frame acknowledging everything below `receive_count`.
    pub fn s_frame(receive_count: u16) -> Frame {
        let mut data = vec![START_BYTE, APCI_MIN_LENGTH, 0x01, 0x00, 0, 0];
        write_count(&mut data[4..6], receive_count);
        Frame { data }
    }

    /// Builds a complete U-frame of the given kind.
    pub fn u_frame(kind: UFrameKind) -> Frame {
        Frame {
            data: vec![START_BYTE, APCI_MIN_LENGTH, kind.control_byte(), 0, 0, 0],
        }
    }

    pub fn append(&mut self, byte: u8) {
        self.data.push(byte);
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Octets in the ASDU body appended so far.
    pub fn payload_size(&self) -> usize {
        self.data.len() - APCI_SIZE
    }

    /// Stamps the length octet and the I-format control field.
    ///
    /// The low bit of the first and third control octet stays clear, which
    /// marks the frame as I-format; the 15-bit counts occupy the remaining
    /// bits little-endian.
    pub fn prepare_to_send(&mut self, send_count: u16, receive_count: u16) -> Result<(), Error> {
        let length = self.data.len() - 2;
        if length > APCI_MAX_LENGTH as usize {
            return Err(Error::Framing(format!(
                "APCI length {} exceeds {}",
                length, APCI_MAX_LENGTH
            )));
        }
        self.data[1] = length as u8;
        write_count(&mut self.data[2..4], send_count);
        write_count(&mut self.data[4..6], receive_count);
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// The raw octets for transmission.
    pub fn buffer(&self) -> &[u8] {
        &self.data
    }
}

impl Default for Frame {
    fn default() -> Frame {
        Frame::new()
    }
}

/// `SSSSSSSS SSSSSSS0` over two octets, low bit clear.
fn write_count(out: &mut [u8], count: u16) {
    out[0] = ((count & 0x7F) << 1) as u8;
    out[1] = (count >> 7) as u8;
}

/// NS from the first two control octets.
pub(crate) fn read_send_count(control: &[u8]) -> u16 {
    (((control[1] as u16) << 7) | ((control[0] >> 1) as u16)) & 0x7FFF
}

/// NR from the last two control octets.
pub(crate) fn read_receive_count(control: &[u8]) -> u16 {
    (((control[3] as u16) << 7) | ((control[2] >> 1) as u16)) & 0x7FFF
}
