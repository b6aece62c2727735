// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! ASDU encoding and decoding
//!
//! An ASDU is the application payload of an I-frame: a fixed header (type
//! id, variable structure qualifier, cause of transmission, originator and
//! common address) followed by one list of information objects of uniform
//! type. Received ASDUs keep their payload raw; [`Asdu::element`] parses
//! objects on demand so an unknown type id only fails the caller that asks
//! for it, never the link.

use super::constant::{MAX_ASDU_SIZE, MAX_NUMBER_OF_ELEMENTS};
use super::error::Error;
use super::frame::Frame;
use super::object::InformationObject;
use super::params::ConnectionParameters;
use byteorder::{ByteOrder, LittleEndian};

/// Telegram type identifier.
///
/// Doc comments give the companion-standard mnemonic. The file transfer
/// block 120..127 is recognized so a peer using it does not read as an
/// unknown type, but those types carry no element layout here.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum TypeId {
    /// M_SP_NA_1 single-point information
    SinglePoint = 1,
    /// M_SP_TA_1
    SinglePointCp24 = 2,
    /// M_DP_NA_1 double-point information
    DoublePoint = 3,
    /// M_DP_TA_1
    DoublePointCp24 = 4,
    /// M_ST_NA_1 step position information
    StepPosition = 5,
    /// M_ST_TA_1
    StepPositionCp24 = 6,
    /// M_BO_NA_1 bitstring of 32 bit
    Bitstring32 = 7,
    /// M_BO_TA_1
    Bitstring32Cp24 = 8,
    /// M_ME_NA_1 measured value, normalized
    Normalized = 9,
    /// M_ME_TA_1
    NormalizedCp24 = 10,
    /// M_ME_NB_1 measured value, scaled
    Scaled = 11,
    /// M_ME_TB_1
    ScaledCp24 = 12,
    /// M_ME_NC_1 measured value, short floating point
    ShortFloat = 13,
    /// M_ME_TC_1
    ShortFloatCp24 = 14,
    /// M_IT_NA_1 integrated totals
    IntegratedTotals = 15,
    /// M_IT_TA_1
    IntegratedTotalsCp24 = 16,
    /// M_EP_TA_1 event of protection equipment
    ProtectionEventCp24 = 17,
    /// M_EP_TB_1 packed start events of protection equipment
    ProtectionStartEventsCp24 = 18,
    /// M_EP_TC_1 packed output circuit information
    ProtectionOutputCircuitCp24 = 19,
    /// M_PS_NA_1 packed single-point with status change detection
    PackedSinglePoint = 20,
    /// M_ME_ND_1 normalized value without quality descriptor
    NormalizedNoQuality = 21,
    /// M_SP_TB_1
    SinglePointCp56 = 30,
    /// M_DP_TB_1
    DoublePointCp56 = 31,
    /// M_ST_TB_1
    StepPositionCp56 = 32,
    /// M_BO_TB_1
    Bitstring32Cp56 = 33,
    /// M_ME_TD_1
    NormalizedCp56 = 34,
    /// M_ME_TE_1
    ScaledCp56 = 35,
    /// M_ME_TF_1
    ShortFloatCp56 = 36,
    /// M_IT_TB_1
    IntegratedTotalsCp56 = 37,
    /// M_EP_TD_1
    ProtectionEventCp56 = 38,
    /// M_EP_TE_1
    ProtectionStartEventsCp56 = 39,
    /// M_EP_TF_1
    ProtectionOutputCircuitCp56 = 40,
    /// C_SC_NA_1 single command
    SingleCommand = 45,
    /// C_DC_NA_1 double command
    DoubleCommand = 46,
    /// C_RC_NA_1 regulating step command
    StepCommand = 47,
    /// C_SE_NA_1 set-point command, normalized
    SetpointNormalized = 48,
    /// C_SE_NB_1 set-point command, scaled
    SetpointScaled = 49,
    /// C_SE_NC_1 set-point command, short floating point
    SetpointShortFloat = 50,
    /// C_BO_NA_1 bitstring command
    BitstringCommand = 51,
    /// C_SC_TA_1
    SingleCommandCp56 = 58,
    /// C_DC_TA_1
    DoubleCommandCp56 = 59,
    /// C_RC_TA_1
    StepCommandCp56 = 60,
    /// C_SE_TA_1
    SetpointNormalizedCp56 = 61,
    /// C_SE_TB_1
    SetpointScaledCp56 = 62,
    /// C_SE_TC_1
    SetpointShortFloatCp56 = 63,
    /// C_BO_TA_1
    BitstringCommandCp56 = 64,
    /// M_EI_NA_1 end of initialization
    EndOfInitialization = 70,
    /// C_IC_NA_1 interrogation command
    InterrogationCommand = 100,
    /// C_CI_NA_1 counter interrogation command
    CounterInterrogationCommand = 101,
    /// C_RD_NA_1 read command
    ReadCommand = 102,
    /// C_CS_NA_1 clock synchronization command
    ClockSyncCommand = 103,
    /// C_TS_NA_1 test command
    TestCommand = 104,
    /// C_RP_NA_1 reset process command
    ResetProcessCommand = 105,
    /// C_CD_NA_1 delay acquisition command
    DelayAcquisitionCommand = 106,
    /// C_TS_TA_1 test command with time tag
    TestCommandCp56 = 107,
    /// P_ME_NA_1 parameter of measured value, normalized
    ParameterNormalized = 110,
    /// P_ME_NB_1 parameter of measured value, scaled
    ParameterScaled = 111,
    /// P_ME_NC_1 parameter of measured value, short floating point
    ParameterShortFloat = 112,
    /// P_AC_NA_1 parameter activation
    ParameterActivation = 113,
    /// F_FR_NA_1 file ready
    FileReady = 120,
    /// F_SR_NA_1 section ready
    SectionReady = 121,
    /// F_SC_NA_1 call directory, select file
    CallDirectory = 122,
    /// F_LS_NA_1 last section, last segment
    LastSection = 123,
    /// F_AF_NA_1 ack file, ack section
    AckFile = 124,
    /// F_SG_NA_1 segment
    Segment = 125,
    /// F_DR_TA_1 directory
    Directory = 126,
    /// F_SC_NB_1 query log
    QueryLog = 127,
}

impl TypeId {
    pub fn from_byte(byte: u8) -> Result<TypeId, Error> {
        use TypeId::*;
        let type_id = match byte {
            1 => SinglePoint,
            2 => SinglePointCp24,
            3 => DoublePoint,
            4 => DoublePointCp24,
            5 => StepPosition,
            6 => StepPositionCp24,
            7 => Bitstring32,
            8 => Bitstring32Cp24,
            9 => Normalized,
            10 => NormalizedCp24,
            11 => Scaled,
            12 => ScaledCp24,
            13 => ShortFloat,
            14 => ShortFloatCp24,
            15 => IntegratedTotals,
            16 => IntegratedTotalsCp24,
            17 => ProtectionEventCp24,
            18 => ProtectionStartEventsCp24,
            19 => ProtectionOutputCircuitCp24,
            20 => PackedSinglePoint,
            21 => NormalizedNoQuality,
            30 => SinglePointCp56,
            31 => DoublePointCp56,
            32 => StepPositionCp56,
            33 => Bitstring32Cp56,
            34 => NormalizedCp56,
            35 => ScaledCp56,
            36 => ShortFloatCp56,
            37 => IntegratedTotalsCp56,
            38 => ProtectionEventCp56,
            39 => ProtectionStartEventsCp56,
            40 => ProtectionOutputCircuitCp56,
            45 => SingleCommand,
            46 => DoubleCommand,
            47 => StepCommand,
            48 => SetpointNormalized,
            49 => SetpointScaled,
            50 => SetpointShortFloat,
            51 => BitstringCommand,
            58 => SingleCommandCp56,
            59 => DoubleCommandCp56,
            60 => StepCommandCp56,
            61 => SetpointNormalizedCp56,
            62 => SetpointScaledCp56,
            63 => SetpointShortFloatCp56,
            64 => BitstringCommandCp56,
            70 => EndOfInitialization,
            100 => InterrogationCommand,
            101 => CounterInterrogationCommand,
            102 => ReadCommand,
            103 => ClockSyncCommand,
            104 => TestCommand,
            105 => ResetProcessCommand,
            106 => DelayAcquisitionCommand,
            107 => TestCommandCp56,
            110 => ParameterNormalized,
            111 => ParameterScaled,
            112 => ParameterShortFloat,
            113 => ParameterActivation,
            120 => FileReady,
            121 => SectionReady,
            122 => CallDirectory,
            123 => LastSection,
            124 => AckFile,
            125 => Segment,
            126 => Directory,
            127 => QueryLog,
            _ => return Err(Error::unknown_type_id(byte)),
        };
        Ok(type_id)
    }

    /// Width of one element after its address octets.
    ///
    /// This table is authoritative for payload offset arithmetic. `None`
    /// for the catalogued-only file transfer types.
    pub fn information_size(self) -> Option<usize> {
        use TypeId::*;
        let size = match self {
            SinglePoint | DoublePoint => 1,
            SinglePointCp24 | DoublePointCp24 => 4,
            SinglePointCp56 | DoublePointCp56 => 8,
            StepPosition => 2,
            StepPositionCp24 => 5,
            StepPositionCp56 => 9,
            Bitstring32 => 5,
            Bitstring32Cp24 => 8,
            Bitstring32Cp56 => 12,
            Normalized | Scaled => 3,
            NormalizedCp24 | ScaledCp24 => 6,
            NormalizedCp56 | ScaledCp56 => 10,
            ShortFloat => 5,
            ShortFloatCp24 => 8,
            ShortFloatCp56 => 12,
            IntegratedTotals => 5,
            IntegratedTotalsCp24 => 8,
            IntegratedTotalsCp56 => 12,
            ProtectionEventCp24 => 6,
            ProtectionEventCp56 => 10,
            ProtectionStartEventsCp24 | ProtectionOutputCircuitCp24 => 7,
            ProtectionStartEventsCp56 | ProtectionOutputCircuitCp56 => 11,
            PackedSinglePoint => 5,
            NormalizedNoQuality => 2,
            SingleCommand | DoubleCommand | StepCommand => 1,
            SingleCommandCp56 | DoubleCommandCp56 | StepCommandCp56 => 8,
            SetpointNormalized | SetpointScaled => 3,
            SetpointNormalizedCp56 | SetpointScaledCp56 => 10,
            SetpointShortFloat => 5,
            SetpointShortFloatCp56 => 12,
            BitstringCommand => 4,
            BitstringCommandCp56 => 11,
            EndOfInitialization => 1,
            InterrogationCommand | CounterInterrogationCommand => 1,
            ReadCommand => 0,
            ClockSyncCommand => 7,
            TestCommand => 2,
            ResetProcessCommand => 1,
            DelayAcquisitionCommand => 2,
            TestCommandCp56 => 9,
            ParameterNormalized | ParameterScaled => 3,
            ParameterShortFloat => 5,
            ParameterActivation => 1,
            FileReady | SectionReady | CallDirectory | LastSection | AckFile | Segment
            | Directory | QueryLog => return None,
        };
        Some(size)
    }

    /// Whether the compact one-address sequence layout is legal.
    ///
    /// Only the monitor direction packs consecutive points; commands,
    /// system telegrams and parameters are always addressed one by one.
    pub fn supports_sequence(self) -> bool {
        (self as u8) <= 40
    }

    /// The control direction, type ids 45..64.
    pub fn is_control(self) -> bool {
        let byte = self as u8;
        (45..=64).contains(&byte)
    }

    /// Parameter loading, type ids 110..113.
    pub fn is_parameter(self) -> bool {
        let byte = self as u8;
        (110..=113).contains(&byte)
    }
}

/// Cause of transmission, the low six bits of the COT octet.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Cot {
    Periodic = 1,
    Background = 2,
    Spontaneous = 3,
    Initialized = 4,
    Request = 5,
    Activation = 6,
    ActivationCon = 7,
    Deactivation = 8,
    DeactivationCon = 9,
    ActivationTermination = 10,
    ReturnInfoRemote = 11,
    ReturnInfoLocal = 12,
    FileTransfer = 13,
    InterrogatedByStation = 20,
    InterrogatedByGroup1 = 21,
    InterrogatedByGroup2 = 22,
    InterrogatedByGroup3 = 23,
    InterrogatedByGroup4 = 24,
    InterrogatedByGroup5 = 25,
    InterrogatedByGroup6 = 26,
    InterrogatedByGroup7 = 27,
    InterrogatedByGroup8 = 28,
    InterrogatedByGroup9 = 29,
    InterrogatedByGroup10 = 30,
    InterrogatedByGroup11 = 31,
    InterrogatedByGroup12 = 32,
    InterrogatedByGroup13 = 33,
    InterrogatedByGroup14 = 34,
    InterrogatedByGroup15 = 35,
    InterrogatedByGroup16 = 36,
    RequestedByGeneralCounter = 37,
    RequestedByGroup1Counter = 38,
    RequestedByGroup2Counter = 39,
    RequestedByGroup3Counter = 40,
    RequestedByGroup4Counter = 41,
    UnknownTypeId = 44,
    UnknownCot = 45,
    UnknownCa = 46,
    UnknownIoa = 47,
}

impl Cot {
    pub fn from_byte(byte: u8) -> Result<Cot, Error> {
        use Cot::*;
        let cause = match byte {
            1 => Periodic,
            2 => Background,
            3 => Spontaneous,
            4 => Initialized,
            5 => Request,
            6 => Activation,
            7 => ActivationCon,
            8 => Deactivation,
            9 => DeactivationCon,
            10 => ActivationTermination,
            11 => ReturnInfoRemote,
            12 => ReturnInfoLocal,
            13 => FileTransfer,
            20 => InterrogatedByStation,
            21 => InterrogatedByGroup1,
            22 => InterrogatedByGroup2,
            23 => InterrogatedByGroup3,
            24 => InterrogatedByGroup4,
            25 => InterrogatedByGroup5,
            26 => InterrogatedByGroup6,
            27 => InterrogatedByGroup7,
            28 => InterrogatedByGroup8,
            29 => InterrogatedByGroup9,
            30 => InterrogatedByGroup10,
            31 => InterrogatedByGroup11,
            32 => InterrogatedByGroup12,
            33 => InterrogatedByGroup13,
            34 => InterrogatedByGroup14,
            35 => InterrogatedByGroup15,
            36 => InterrogatedByGroup16,
            37 => RequestedByGeneralCounter,
            38 => RequestedByGroup1Counter,
            39 => RequestedByGroup2Counter,
            40 => RequestedByGroup3Counter,
            41 => RequestedByGroup4Counter,
            44 => UnknownTypeId,
            45 => UnknownCot,
            46 => UnknownCa,
            47 => UnknownIoa,
            _ => {
                return Err(Error::Parsing(format!(
                    "Unknown cause of transmission:{}",
                    byte
                )))
            }
        };
        Ok(cause)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Payload {
    /// objects collected for encoding
    Objects(Vec<InformationObject>),
    /// the undecoded body of a received ASDU
    Raw(Vec<u8>),
}

/// One application-layer message.
#[derive(Debug, Clone, PartialEq)]
pub struct Asdu {
    params: ConnectionParameters,
    type_id: u8,
    vsq: u8,
    cause: u8,
    test: bool,
    negative: bool,
    originator: u8,
    common_address: u16,
    payload: Payload,
}

impl Asdu {
    /// Starts an ASDU in the discrete layout, one address per element.
    pub fn new(
        params: &ConnectionParameters,
        type_id: TypeId,
        cause: Cot,
        common_address: u16,
    ) -> Asdu {
        Asdu {
            params: params.clone(),
            type_id: type_id as u8,
            vsq: 0,
            cause: cause as u8,
            test: false,
            negative: false,
            originator: params.originator_address,
            common_address,
            payload: Payload::Objects(Vec::new()),
        }
    }

    /// Starts an ASDU in the compact sequence layout (SQ=1).
    ///
    /// Elements added to it must carry consecutive addresses; only the
    /// first address reaches the wire.
    pub fn new_sequence(
        params: &ConnectionParameters,
        type_id: TypeId,
        cause: Cot,
        common_address: u16,
    ) -> Asdu {
        let mut asdu = Asdu::new(params, type_id, cause, common_address);
        asdu.vsq = 0x80;
        asdu
    }

    pub fn type_id(&self) -> Result<TypeId, Error> {
        TypeId::from_byte(self.type_id)
    }

    /// The type id octet as received, defined or not.
    pub fn type_code(&self) -> u8 {
        self.type_id
    }

    pub fn cause(&self) -> Result<Cot, Error> {
        Cot::from_byte(self.cause)
    }

    /// The cause bits as received.
    pub fn raw_cause(&self) -> u8 {
        self.cause
    }

    pub fn set_cause(&mut self, cause: Cot) {
        self.cause = cause as u8;
    }

    pub fn is_test(&self) -> bool {
        self.test
    }

    pub fn set_test(&mut self, test: bool) {
        self.test = test;
    }

    /// The negative confirmation bit.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn set_negative(&mut self, negative: bool) {
        self.negative = negative;
    }

    pub fn originator(&self) -> u8 {
        self.originator
    }

    pub fn set_originator(&mut self, originator: u8) {
        self.originator = originator;
    }

    pub fn common_address(&self) -> u16 {
        self.common_address
    }

    pub fn is_sequence(&self) -> bool {
        self.vsq & 0x80 != 0
    }

    pub fn number_of_elements(&self) -> usize {
        match &self.payload {
            Payload::Objects(objects) => objects.len(),
            Payload::Raw(_) => (self.vsq & 0x7F) as usize,
        }
    }

    /// Appends one information object.
    ///
    /// The object must match the ASDU type; in sequence layout its address
    /// must continue the run started by the first element.
    pub fn add_object(&mut self, object: InformationObject) -> Result<(), Error> {
        let object_type = object.type_id();
        if object_type as u8 != self.type_id {
            return Err(Error::TypeMismatch {
                expected: self.type_id,
                supplied: object_type as u8,
            });
        }
        if object.address() > self.params.max_information_object_address() {
            return Err(Error::InvalidParameter(format!(
                "information object address {} exceeds {} octets",
                object.address(),
                self.params.size_of_ioa
            )));
        }

        let sequence = self.is_sequence();
        if sequence && !object_type.supports_sequence() {
            return Err(Error::InvalidParameter(format!(
                "type id {} does not permit sequence layout",
                self.type_id
            )));
        }

        let header_size = self.header_size();
        let size_of_ioa = self.params.size_of_ioa as usize;
        let objects = match &mut self.payload {
            Payload::Raw(_) => {
                return Err(Error::InvalidParameter(
                    "cannot append objects to a received ASDU".to_string(),
                ))
            }
            Payload::Objects(objects) => objects,
        };

        if objects.len() >= MAX_NUMBER_OF_ELEMENTS as usize {
            return Err(Error::InvalidParameter(
                "ASDU element count limit reached".to_string(),
            ));
        }
        if sequence {
            if let Some(first) = objects.first() {
                let expected = first.address() + objects.len() as u32;
                if object.address() != expected {
                    return Err(Error::InvalidParameter(format!(
                        "sequence layout requires address {}, got {}",
                        expected,
                        object.address()
                    )));
                }
            }
        }

        // the width table has an entry for every constructible object
        let width = object_type.information_size().unwrap_or(0);
        let count = objects.len() + 1;
        let body = header_size
            + if sequence {
                size_of_ioa + count * width
            } else {
                count * (size_of_ioa + width)
            };
        if body > MAX_ASDU_SIZE {
            return Err(Error::InvalidParameter(
                "information objects exceed the ASDU size limit".to_string(),
            ));
        }

        objects.push(object);
        self.vsq = (self.vsq & 0x80) | (objects.len() as u8);
        Ok(())
    }

    /// Serializes the header and payload into `frame`.
    pub fn encode(&self, frame: &mut Frame) -> Result<(), Error> {
        let mut body = Vec::with_capacity(self.header_size() + 16);
        body.push(self.type_id);
        body.push(self.vsq);
        body.push((self.cause & 0x3F) | ((self.negative as u8) << 6) | ((self.test as u8) << 7));
        if self.params.size_of_cot == 2 {
            body.push(self.originator);
        }
        if self.params.size_of_ca == 1 {
            if self.common_address > 0xFF {
                return Err(Error::InvalidParameter(format!(
                    "common address {} exceeds one octet",
                    self.common_address
                )));
            }
            body.push(self.common_address as u8);
        } else {
            let mut buf = [0u8; 2];
            LittleEndian::write_u16(&mut buf, self.common_address);
            body.extend_from_slice(&buf);
        }

        match &self.payload {
            Payload::Raw(raw) => body.extend_from_slice(raw),
            Payload::Objects(objects) => {
                for (index, object) in objects.iter().enumerate() {
                    if !self.is_sequence() || index == 0 {
                        write_address(&mut body, object.address(), self.params.size_of_ioa);
                    }
                    object.encode_payload(&mut body);
                }
            }
        }

        if body.len() > MAX_ASDU_SIZE {
            return Err(Error::Framing(format!(
                "ASDU body of {} octets exceeds {}",
                body.len(),
                MAX_ASDU_SIZE
            )));
        }
        frame.append_bytes(&body);
        Ok(())
    }

    /// Parses the header of a received ASDU body; the payload stays raw
    /// until [`Asdu::element`] is called.
    pub fn decode(params: &ConnectionParameters, body: &[u8]) -> Result<Asdu, Error> {
        let header = 3 + (params.size_of_cot as usize - 1) + params.size_of_ca as usize;
        if body.len() < header {
            return Err(Error::Framing(format!(
                "ASDU header needs {} octets, got {}",
                header,
                body.len()
            )));
        }

        let cot = body[2];
        let mut offset = 3;
        let originator = if params.size_of_cot == 2 {
            offset += 1;
            body[3]
        } else {
            0
        };
        let common_address = if params.size_of_ca == 1 {
            body[offset] as u16
        } else {
            LittleEndian::read_u16(&body[offset..offset + 2])
        };
        offset += params.size_of_ca as usize;

        Ok(Asdu {
            params: params.clone(),
            type_id: body[0],
            vsq: body[1],
            cause: cot & 0x3F,
            test: cot & 0x80 != 0,
            negative: cot & 0x40 != 0,
            originator,
            common_address,
            payload: Payload::Raw(body[offset..].to_vec()),
        })
    }

    /// Parses the element at `index`.
    ///
    /// Fails with a parsing error when the type id is not in the
    /// catalogue, the index is out of range, the sequence layout is illegal
    /// for the type, or the payload length contradicts the width table.
    pub fn element(&self, index: usize) -> Result<InformationObject, Error> {
        let type_id = self.type_id()?;
        let count = self.number_of_elements();
        if index >= count {
            return Err(Error::Parsing(format!(
                "element index {} out of range, {} elements",
                index, count
            )));
        }
        let width = type_id.information_size().ok_or_else(|| {
            Error::Parsing(format!("No element layout for ASDU type id:{}", self.type_id))
        })?;
        let sequence = self.is_sequence();
        if sequence && !type_id.supports_sequence() {
            return Err(Error::Parsing(format!(
                "type id {} does not permit sequence layout",
                self.type_id
            )));
        }

        let raw = match &self.payload {
            Payload::Objects(objects) => return Ok(objects[index].clone()),
            Payload::Raw(raw) => raw,
        };

        let ioa = self.params.size_of_ioa as usize;
        let expected = if sequence {
            ioa + count * width
        } else {
            count * (ioa + width)
        };
        if raw.len() != expected {
            return Err(Error::Parsing(format!(
                "payload of {} octets does not hold {} elements of type id {}",
                raw.len(),
                count,
                self.type_id
            )));
        }

        if sequence {
            let base = read_address(&raw[..ioa]);
            let offset = ioa + index * width;
            InformationObject::decode(
                type_id,
                base + index as u32,
                &raw[offset..offset + width],
            )
        } else {
            let offset = index * (ioa + width);
            let address = read_address(&raw[offset..offset + ioa]);
            InformationObject::decode(
                type_id,
                address,
                &raw[offset + ioa..offset + ioa + width],
            )
        }
    }

    /// Parses every element.
    pub fn elements(&self) -> Result<Vec<InformationObject>, Error> {
        (0..self.number_of_elements())
            .map(|index| self.element(index))
            .collect()
    }

    fn header_size(&self) -> usize {
        3 + (self.params.size_of_cot as usize - 1) + self.params.size_of_ca as usize
    }
}

fn write_address(out: &mut Vec<u8>, address: u32, size: u8) {
    out.push(address as u8);
    if size >= 2 {
        out.push((address >> 8) as u8);
    }
    if size >= 3 {
        out.push((address >> 16) as u8);
    }
}

fn read_address(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .rev()
        .fold(0u32, |acc, byte| (acc << 8) | *byte as u32)
}
