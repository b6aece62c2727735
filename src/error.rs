// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

use std::error;
use std::fmt;
use std::io::{Error as IOError, ErrorKind};

/// Errors raised by the connection, the link engine and the ASDU codec.
///
/// Connect-time failures keep the OS error so callers can diagnose the
/// socket problem. Parsing failures are non fatal to the link; framing
/// failures and protocol timeouts close it.
#[derive(Debug)]
pub enum Error {
    /// the peer actively refused the TCP connection
    Refused(IOError),
    /// the TCP handshake did not complete within t0
    ConnectTimeout(IOError),
    /// no route to the outstation
    Unreachable(IOError),
    /// any other error while establishing the connection
    Connect(IOError),
    /// `connect` called while the link is already up
    AlreadyConnected,
    /// `connect` called while another connect is in progress
    AlreadyConnecting,
    /// a send was attempted outside the ACTIVE link state
    NotConnected,
    /// bad start octet, impossible length, short frame or bad U-frame bits
    Framing(String),
    /// the ASDU payload could not be interpreted; the link stays up
    Parsing(String),
    /// t1 expired on an unacknowledged I- or U-frame
    ProtocolTimeout,
    /// the information object handed to a send does not match the type id
    TypeMismatch { expected: u8, supplied: u8 },
    /// a connection parameter is outside its legal range
    InvalidParameter(String),
    /// Lock error: a thread holding the link state panicked
    Lock,
    /// IO error on an established link
    IOError(ErrorKind),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Refused(e) => write!(f, "TCP : Connection refused: {}", e),
            Error::ConnectTimeout(e) => write!(f, "TCP : Connection timeout: {}", e),
            Error::Unreachable(e) => write!(f, "TCP : Unreachable host: {}", e),
            Error::Connect(e) => write!(f, "TCP : Connection error: {}", e),
            Error::AlreadyConnected => write!(f, "CLI : Client already connected"),
            Error::AlreadyConnecting => write!(f, "CLI : Connect already in progress"),
            Error::NotConnected => write!(f, "CLI : Client not connected"),
            Error::Framing(reason) => write!(f, "LNK : Framing error: {}", reason),
            Error::Parsing(reason) => write!(f, "ASDU: {}", reason),
            Error::ProtocolTimeout => write!(f, "LNK : t1 expired waiting for confirmation"),
            Error::TypeMismatch { expected, supplied } => write!(
                f,
                "CLI : Information object type {} does not match type id {}",
                supplied, expected
            ),
            Error::InvalidParameter(reason) => write!(f, "CLI : Invalid parameter: {}", reason),
            Error::Lock => write!(f, "Lock error: panicked"),
            Error::IOError(kind) => write!(f, "IO error: {:?}", kind),
        }
    }
}

impl From<IOError> for Error {
    fn from(e: IOError) -> Self {
        Error::IOError(e.kind())
    }
}

// This is important for other errors to wrap this one.
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Refused(e)
            | Error::ConnectTimeout(e)
            | Error::Unreachable(e)
            | Error::Connect(e) => Some(e),
            _ => None,
        }
    }
}

impl Error {
    /// Maps an OS error from the connect path onto the taxonomy.
    pub(crate) fn from_connect(e: IOError) -> Error {
        match e.kind() {
            ErrorKind::ConnectionRefused => Error::Refused(e),
            ErrorKind::TimedOut | ErrorKind::WouldBlock => Error::ConnectTimeout(e),
            // `HostUnreachable` is unstable in older toolchains; the raw OS
            // codes cover ENETUNREACH and EHOSTUNREACH.
            _ => match e.raw_os_error() {
                Some(101) | Some(113) => Error::Unreachable(e),
                _ => Error::Connect(e),
            },
        }
    }

    pub(crate) fn unknown_type_id(type_id: u8) -> Error {
        Error::Parsing(format!("Unknown ASDU type id:{}", type_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_id_message() {
        let err = Error::unknown_type_id(200);
        assert_eq!(err.to_string(), "ASDU: Unknown ASDU type id:200");
    }

    #[test]
    fn test_connect_mapping() {
        let refused = Error::from_connect(IOError::from(ErrorKind::ConnectionRefused));
        match refused {
            Error::Refused(_) => {}
            other => panic!("expected Refused got {:?}", other),
        }

        let timeout = Error::from_connect(IOError::from(ErrorKind::TimedOut));
        match timeout {
            Error::ConnectTimeout(_) => {}
            other => panic!("expected ConnectTimeout got {:?}", other),
        }
    }
}
