// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Wire-format sizing and link timing for one connection
//!
//! The parameters are cloned when the connection is created and stay fixed
//! for the life of the link; both peers must agree on the sizing fields or
//! every ASDU on the link misaligns.

use super::error::Error;
use std::time::Duration;

/// a set of options governing ASDU layout and link timing
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionParameters {
    /// cause of transmission width; 2 adds the originator address octet
    pub size_of_cot: u8,
    /// common address width in octets, 1 or 2
    pub size_of_ca: u8,
    /// information object address width in octets, 1 to 3
    pub size_of_ioa: u8,
    /// emitted after the cause octet when `size_of_cot` is 2
    pub originator_address: u8,
    /// max unacknowledged I-frames in flight
    pub k: u16,
    /// received I-frames before an S-frame acknowledgement is forced
    pub w: u16,
    /// TCP connect timeout
    pub t0: Duration,
    /// acknowledgement timeout for a sent I- or U-frame
    pub t1: Duration,
    /// max delay before acknowledging received I-frames, below t1
    pub t2: Duration,
    /// idle period after which a TESTFR is issued
    pub t3: Duration,
    /// emit STARTDT_ACT as soon as the TCP connection is open
    pub autostart: bool,
    /// trace raw frame octets through the `log` crate
    pub debug_output: bool,
}

impl Default for ConnectionParameters {
    fn default() -> ConnectionParameters {
        ConnectionParameters {
            size_of_cot: 2,
            size_of_ca: 2,
            size_of_ioa: 3,
            originator_address: 0,
            k: 12,
            w: 8,
            t0: Duration::from_secs(10),
            t1: Duration::from_secs(15),
            t2: Duration::from_secs(10),
            t3: Duration::from_secs(20),
            autostart: true,
            debug_output: false,
        }
    }
}

impl ConnectionParameters {
    /// Checks every field against its legal range.
    pub fn validate(&self) -> Result<(), Error> {
        if self.size_of_cot != 1 && self.size_of_cot != 2 {
            return Err(Error::InvalidParameter(format!(
                "SizeOfCOT must be 1 or 2, got {}",
                self.size_of_cot
            )));
        }
        if self.size_of_ca != 1 && self.size_of_ca != 2 {
            return Err(Error::InvalidParameter(format!(
                "SizeOfCA must be 1 or 2, got {}",
                self.size_of_ca
            )));
        }
        if self.size_of_ioa < 1 || self.size_of_ioa > 3 {
            return Err(Error::InvalidParameter(format!(
                "SizeOfIOA must be 1, 2 or 3, got {}",
                self.size_of_ioa
            )));
        }
        if self.k < 1 || self.k > 32767 {
            return Err(Error::InvalidParameter(format!(
                "k must be in 1..32767, got {}",
                self.k
            )));
        }
        if self.w < 1 || self.w > self.k {
            return Err(Error::InvalidParameter(format!(
                "w must be in 1..k, got {}",
                self.w
            )));
        }
        if self.t2 >= self.t1 {
            return Err(Error::InvalidParameter(
                "t2 must be shorter than t1".to_string(),
            ));
        }
        Ok(())
    }

    /// All-ones common address for the configured width.
    pub fn broadcast_address(&self) -> u16 {
        if self.size_of_ca == 1 {
            0xFF
        } else {
            0xFFFF
        }
    }

    /// Largest information object address for the configured width.
    pub fn max_information_object_address(&self) -> u32 {
        match self.size_of_ioa {
            1 => 0xFF,
            2 => 0xFFFF,
            _ => 0xFF_FFFF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = ConnectionParameters::default();
        params.validate().unwrap();
        assert_eq!(params.broadcast_address(), 0xFFFF);
        assert_eq!(params.max_information_object_address(), 0xFF_FFFF);
    }

    #[test]
    fn test_w_above_k_rejected() {
        let params = ConnectionParameters {
            k: 4,
            w: 5,
            ..Default::default()
        };
        match params.validate() {
            Err(Error::InvalidParameter(_)) => {}
            other => panic!("expected invalid parameter, got {:?}", other),
        }
    }

    #[test]
    fn test_ioa_width_rejected() {
        let params = ConnectionParameters {
            size_of_ioa: 4,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
