// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! The information object catalogue
//!
//! One variant per telegram type of the monitor, control, system and
//! parameter directions. Each variant carries its information object
//! address, its typed payload and, where the type defines one, a time tag.
//! The element width per type lives in [`TypeId::information_size`]; the
//! encode and decode halves here must stay in step with that table.

mod command;
mod quality;
mod time;
mod value;

pub use command::*;
pub use quality::*;
pub use time::*;
pub use value::*;

use super::asdu::TypeId;
use super::constant::TEST_PATTERN;
use super::error::Error;
use byteorder::{ByteOrder, LittleEndian};

/// A typed information object, the payload unit of every ASDU.
#[derive(Debug, Clone, PartialEq)]
pub enum InformationObject {
    // monitor direction
    SinglePoint {
        address: u32,
        value: bool,
        quality: Quality,
    },
    SinglePointCp24 {
        address: u32,
        value: bool,
        quality: Quality,
        time: Cp24Time2a,
    },
    SinglePointCp56 {
        address: u32,
        value: bool,
        quality: Quality,
        time: Cp56Time2a,
    },
    DoublePoint {
        address: u32,
        value: DoublePointValue,
        quality: Quality,
    },
    DoublePointCp24 {
        address: u32,
        value: DoublePointValue,
        quality: Quality,
        time: Cp24Time2a,
    },
    DoublePointCp56 {
        address: u32,
        value: DoublePointValue,
        quality: Quality,
        time: Cp56Time2a,
    },
    StepPosition {
        address: u32,
        value: StepPositionValue,
        quality: Quality,
    },
    StepPositionCp24 {
        address: u32,
        value: StepPositionValue,
        quality: Quality,
        time: Cp24Time2a,
    },
    StepPositionCp56 {
        address: u32,
        value: StepPositionValue,
        quality: Quality,
        time: Cp56Time2a,
    },
    Bitstring32 {
        address: u32,
        value: u32,
        quality: Quality,
    },
    Bitstring32Cp24 {
        address: u32,
        value: u32,
        quality: Quality,
        time: Cp24Time2a,
    },
    Bitstring32Cp56 {
        address: u32,
        value: u32,
        quality: Quality,
        time: Cp56Time2a,
    },
    Normalized {
        address: u32,
        value: NormalizedValue,
        quality: Quality,
    },
    NormalizedCp24 {
        address: u32,
        value: NormalizedValue,
        quality: Quality,
        time: Cp24Time2a,
    },
    NormalizedCp56 {
        address: u32,
        value: NormalizedValue,
        quality: Quality,
        time: Cp56Time2a,
    },
    Scaled {
        address: u32,
        value: i16,
        quality: Quality,
    },
    ScaledCp24 {
        address: u32,
        value: i16,
        quality: Quality,
        time: Cp24Time2a,
    },
    ScaledCp56 {
        address: u32,
        value: i16,
        quality: Quality,
        time: Cp56Time2a,
    },
    ShortFloat {
        address: u32,
        value: f32,
        quality: Quality,
    },
    ShortFloatCp24 {
        address: u32,
        value: f32,
        quality: Quality,
        time: Cp24Time2a,
    },
    ShortFloatCp56 {
        address: u32,
        value: f32,
        quality: Quality,
        time: Cp56Time2a,
    },
    IntegratedTotals {
        address: u32,
        value: BinaryCounterReading,
    },
    IntegratedTotalsCp24 {
        address: u32,
        value: BinaryCounterReading,
        time: Cp24Time2a,
    },
    IntegratedTotalsCp56 {
        address: u32,
        value: BinaryCounterReading,
        time: Cp56Time2a,
    },
    ProtectionEventCp24 {
        address: u32,
        event: DoublePointValue,
        quality: ProtectionQuality,
        elapsed: Cp16Time2a,
        time: Cp24Time2a,
    },
    ProtectionEventCp56 {
        address: u32,
        event: DoublePointValue,
        quality: ProtectionQuality,
        elapsed: Cp16Time2a,
        time: Cp56Time2a,
    },
    ProtectionStartEventsCp24 {
        address: u32,
        events: StartEvents,
        quality: ProtectionQuality,
        duration: Cp16Time2a,
        time: Cp24Time2a,
    },
    ProtectionStartEventsCp56 {
        address: u32,
        events: StartEvents,
        quality: ProtectionQuality,
        duration: Cp16Time2a,
        time: Cp56Time2a,
    },
    ProtectionOutputCircuitCp24 {
        address: u32,
        circuits: OutputCircuitInfo,
        quality: ProtectionQuality,
        operating_time: Cp16Time2a,
        time: Cp24Time2a,
    },
    ProtectionOutputCircuitCp56 {
        address: u32,
        circuits: OutputCircuitInfo,
        quality: ProtectionQuality,
        operating_time: Cp16Time2a,
        time: Cp56Time2a,
    },
    PackedSinglePoint {
        address: u32,
        detection: StatusChangeDetection,
        quality: Quality,
    },
    NormalizedNoQuality {
        address: u32,
        value: NormalizedValue,
    },
    // control direction
    SingleCommand {
        address: u32,
        state: bool,
        qualifier: CommandQualifier,
    },
    SingleCommandCp56 {
        address: u32,
        state: bool,
        qualifier: CommandQualifier,
        time: Cp56Time2a,
    },
    DoubleCommand {
        address: u32,
        state: DoublePointValue,
        qualifier: CommandQualifier,
    },
    DoubleCommandCp56 {
        address: u32,
        state: DoublePointValue,
        qualifier: CommandQualifier,
        time: Cp56Time2a,
    },
    StepCommand {
        address: u32,
        state: StepCommandValue,
        qualifier: CommandQualifier,
    },
    StepCommandCp56 {
        address: u32,
        state: StepCommandValue,
        qualifier: CommandQualifier,
        time: Cp56Time2a,
    },
    SetpointNormalized {
        address: u32,
        value: NormalizedValue,
        qualifier: SetpointQualifier,
    },
    SetpointNormalizedCp56 {
        address: u32,
        value: NormalizedValue,
        qualifier: SetpointQualifier,
        time: Cp56Time2a,
    },
    SetpointScaled {
        address: u32,
        value: i16,
        qualifier: SetpointQualifier,
    },
    SetpointScaledCp56 {
        address: u32,
        value: i16,
        qualifier: SetpointQualifier,
        time: Cp56Time2a,
    },
    SetpointShortFloat {
        address: u32,
        value: f32,
        qualifier: SetpointQualifier,
    },
    SetpointShortFloatCp56 {
        address: u32,
        value: f32,
        qualifier: SetpointQualifier,
        time: Cp56Time2a,
    },
    BitstringCommand {
        address: u32,
        value: u32,
    },
    BitstringCommandCp56 {
        address: u32,
        value: u32,
        time: Cp56Time2a,
    },
    // system direction
    EndOfInitialization {
        address: u32,
        /// COI octet: cause in the low seven bits, bit 7 marks
        /// initialization after a local parameter change
        cause: u8,
    },
    InterrogationCommand {
        address: u32,
        qualifier: u8,
    },
    CounterInterrogationCommand {
        address: u32,
        qualifier: CounterInterrogationQualifier,
    },
    ReadCommand {
        address: u32,
    },
    ClockSyncCommand {
        address: u32,
        time: Cp56Time2a,
    },
    TestCommand {
        address: u32,
    },
    ResetProcessCommand {
        address: u32,
        qualifier: u8,
    },
    DelayAcquisitionCommand {
        address: u32,
        delay: Cp16Time2a,
    },
    TestCommandCp56 {
        address: u32,
        counter: u16,
        time: Cp56Time2a,
    },
    // parameter loading
    ParameterNormalized {
        address: u32,
        value: NormalizedValue,
        qualifier: u8,
    },
    ParameterScaled {
        address: u32,
        value: i16,
        qualifier: u8,
    },
    ParameterShortFloat {
        address: u32,
        value: f32,
        qualifier: u8,
    },
    ParameterActivation {
        address: u32,
        qualifier: u8,
    },
}

impl InformationObject {
    /// The telegram type this object belongs to.
    pub fn type_id(&self) -> TypeId {
        use InformationObject::*;
        match self {
            SinglePoint { .. } => TypeId::SinglePoint,
            SinglePointCp24 { .. } => TypeId::SinglePointCp24,
            SinglePointCp56 { .. } => TypeId::SinglePointCp56,
            DoublePoint { .. } => TypeId::DoublePoint,
            DoublePointCp24 { .. } => TypeId::DoublePointCp24,
            DoublePointCp56 { .. } => TypeId::DoublePointCp56,
            StepPosition { .. } => TypeId::StepPosition,
            StepPositionCp24 { .. } => TypeId::StepPositionCp24,
            StepPositionCp56 { .. } => TypeId::StepPositionCp56,
            Bitstring32 { .. } => TypeId::Bitstring32,
            Bitstring32Cp24 { .. } => TypeId::Bitstring32Cp24,
            Bitstring32Cp56 { .. } => TypeId::Bitstring32Cp56,
            Normalized { .. } => TypeId::Normalized,
            NormalizedCp24 { .. } => TypeId::NormalizedCp24,
            NormalizedCp56 { .. } => TypeId::NormalizedCp56,
            Scaled { .. } => TypeId::Scaled,
            ScaledCp24 { .. } => TypeId::ScaledCp24,
            ScaledCp56 { .. } => TypeId::ScaledCp56,
            ShortFloat { .. } => TypeId::ShortFloat,
            ShortFloatCp24 { .. } => TypeId::ShortFloatCp24,
            ShortFloatCp56 { .. } => TypeId::ShortFloatCp56,
            IntegratedTotals { .. } => TypeId::IntegratedTotals,
            IntegratedTotalsCp24 { .. } => TypeId::IntegratedTotalsCp24,
            IntegratedTotalsCp56 { .. } => TypeId::IntegratedTotalsCp56,
            ProtectionEventCp24 { .. } => TypeId::ProtectionEventCp24,
            ProtectionEventCp56 { .. } => TypeId::ProtectionEventCp56,
            ProtectionStartEventsCp24 { .. } => TypeId::ProtectionStartEventsCp24,
            ProtectionStartEventsCp56 { .. } => TypeId::ProtectionStartEventsCp56,
            ProtectionOutputCircuitCp24 { .. } => TypeId::ProtectionOutputCircuitCp24,
            ProtectionOutputCircuitCp56 { .. } => TypeId::ProtectionOutputCircuitCp56,
            PackedSinglePoint { .. } => TypeId::PackedSinglePoint,
            NormalizedNoQuality { .. } => TypeId::NormalizedNoQuality,
            SingleCommand { .. } => TypeId::SingleCommand,
            SingleCommandCp56 { .. } => TypeId::SingleCommandCp56,
            DoubleCommand { .. } => TypeId::DoubleCommand,
            DoubleCommandCp56 { .. } => TypeId::DoubleCommandCp56,
            StepCommand { .. } => TypeId::StepCommand,
            StepCommandCp56 { .. } => TypeId::StepCommandCp56,
            SetpointNormalized { .. } => TypeId::SetpointNormalized,
            SetpointNormalizedCp56 { .. } => TypeId::SetpointNormalizedCp56,
            SetpointScaled { .. } => TypeId::SetpointScaled,
            SetpointScaledCp56 { .. } => TypeId::SetpointScaledCp56,
            SetpointShortFloat { .. } => TypeId::SetpointShortFloat,
            SetpointShortFloatCp56 { .. } => TypeId::SetpointShortFloatCp56,
            BitstringCommand { .. } => TypeId::BitstringCommand,
            BitstringCommandCp56 { .. } => TypeId::BitstringCommandCp56,
            EndOfInitialization { .. } => TypeId::EndOfInitialization,
            InterrogationCommand { .. } => TypeId::InterrogationCommand,
            CounterInterrogationCommand { .. } => TypeId::CounterInterrogationCommand,
            ReadCommand { .. } => TypeId::ReadCommand,
            ClockSyncCommand { .. } => TypeId::ClockSyncCommand,
            TestCommand { .. } => TypeId::TestCommand,
            ResetProcessCommand { .. } => TypeId::ResetProcessCommand,
            DelayAcquisitionCommand { .. } => TypeId::DelayAcquisitionCommand,
            TestCommandCp56 { .. } => TypeId::TestCommandCp56,
            ParameterNormalized { .. } => TypeId::ParameterNormalized,
            ParameterScaled { .. } => TypeId::ParameterScaled,
            ParameterShortFloat { .. } => TypeId::ParameterShortFloat,
            ParameterActivation { .. } => TypeId::ParameterActivation,
        }
    }

    /// The information object address.
    pub fn address(&self) -> u32 {
        use InformationObject::*;
        match self {
            SinglePoint { address, .. }
            | SinglePointCp24 { address, .. }
            | SinglePointCp56 { address, .. }
            | DoublePoint { address, .. }
            | DoublePointCp24 { address, .. }
            | DoublePointCp56 { address, .. }
            | StepPosition { address, .. }
            | StepPositionCp24 { address, .. }
            | StepPositionCp56 { address, .. }
            | Bitstring32 { address, .. }
            | Bitstring32Cp24 { address, .. }
            | Bitstring32Cp56 { address, .. }
            | Normalized { address, .. }
            | NormalizedCp24 { address, .. }
            | NormalizedCp56 { address, .. }
            | Scaled { address, .. }
            | ScaledCp24 { address, .. }
            | ScaledCp56 { address, .. }
            | ShortFloat { address, .. }
            | ShortFloatCp24 { address, .. }
            | ShortFloatCp56 { address, .. }
            | IntegratedTotals { address, .. }
            | IntegratedTotalsCp24 { address, .. }
            | IntegratedTotalsCp56 { address, .. }
            | ProtectionEventCp24 { address, .. }
            | ProtectionEventCp56 { address, .. }
            | ProtectionStartEventsCp24 { address, .. }
            | ProtectionStartEventsCp56 { address, .. }
            | ProtectionOutputCircuitCp24 { address, .. }
            | ProtectionOutputCircuitCp56 { address, .. }
            | PackedSinglePoint { address, .. }
            | NormalizedNoQuality { address, .. }
            | SingleCommand { address, .. }
            | SingleCommandCp56 { address, .. }
            | DoubleCommand { address, .. }
            | DoubleCommandCp56 { address, .. }
            | StepCommand { address, .. }
            | StepCommandCp56 { address, .. }
            | SetpointNormalized { address, .. }
            | SetpointNormalizedCp56 { address, .. }
            | SetpointScaled { address, .. }
            | SetpointScaledCp56 { address, .. }
            | SetpointShortFloat { address, .. }
            | SetpointShortFloatCp56 { address, .. }
            | BitstringCommand { address, .. }
            | BitstringCommandCp56 { address, .. }
            | EndOfInitialization { address, .. }
            | InterrogationCommand { address, .. }
            | CounterInterrogationCommand { address, .. }
            | ReadCommand { address, .. }
            | ClockSyncCommand { address, .. }
            | TestCommand { address, .. }
            | ResetProcessCommand { address, .. }
            | DelayAcquisitionCommand { address, .. }
            | TestCommandCp56 { address, .. }
            | ParameterNormalized { address, .. }
            | ParameterScaled { address, .. }
            | ParameterShortFloat { address, .. }
            | ParameterActivation { address, .. } => *address,
        }
    }

    /// Appends the typed payload, everything after the address octets.
    pub(crate) fn encode_payload(&self, out: &mut Vec<u8>) {
        use InformationObject::*;
        match self {
            SinglePoint { value, quality, .. } => {
                out.push((*value as u8) | quality.to_indication());
            }
            SinglePointCp24 {
                value,
                quality,
                time,
                ..
            } => {
                out.push((*value as u8) | quality.to_indication());
                time.encode(out);
            }
            SinglePointCp56 {
                value,
                quality,
                time,
                ..
            } => {
                out.push((*value as u8) | quality.to_indication());
                time.encode(out);
            }
            DoublePoint { value, quality, .. } => {
                out.push((*value as u8) | quality.to_indication());
            }
            DoublePointCp24 {
                value,
                quality,
                time,
                ..
            } => {
                out.push((*value as u8) | quality.to_indication());
                time.encode(out);
            }
            DoublePointCp56 {
                value,
                quality,
                time,
                ..
            } => {
                out.push((*value as u8) | quality.to_indication());
                time.encode(out);
            }
            StepPosition { value, quality, .. } => {
                out.push(value.to_byte());
                out.push(quality.to_byte());
            }
            StepPositionCp24 {
                value,
                quality,
                time,
                ..
            } => {
                out.push(value.to_byte());
                out.push(quality.to_byte());
                time.encode(out);
            }
            StepPositionCp56 {
                value,
                quality,
                time,
                ..
            } => {
                out.push(value.to_byte());
                out.push(quality.to_byte());
                time.encode(out);
            }
            Bitstring32 { value, quality, .. } => {
                push_u32(out, *value);
                out.push(quality.to_byte());
            }
            Bitstring32Cp24 {
                value,
                quality,
                time,
                ..
            } => {
                push_u32(out, *value);
                out.push(quality.to_byte());
                time.encode(out);
            }
            Bitstring32Cp56 {
                value,
                quality,
                time,
                ..
            } => {
                push_u32(out, *value);
                out.push(quality.to_byte());
                time.encode(out);
            }
            Normalized { value, quality, .. } => {
                value.encode(out);
                out.push(quality.to_byte());
            }
            NormalizedCp24 {
                value,
                quality,
                time,
                ..
            } => {
                value.encode(out);
                out.push(quality.to_byte());
                time.encode(out);
            }
            NormalizedCp56 {
                value,
                quality,
                time,
                ..
            } => {
                value.encode(out);
                out.push(quality.to_byte());
                time.encode(out);
            }
            Scaled { value, quality, .. } => {
                push_i16(out, *value);
                out.push(quality.to_byte());
            }
            ScaledCp24 {
                value,
                quality,
                time,
                ..
            } => {
                push_i16(out, *value);
                out.push(quality.to_byte());
                time.encode(out);
            }
            ScaledCp56 {
                value,
                quality,
                time,
                ..
            } => {
                push_i16(out, *value);
                out.push(quality.to_byte());
                time.encode(out);
            }
            ShortFloat { value, quality, .. } => {
                push_f32(out, *value);
                out.push(quality.to_byte());
            }
            ShortFloatCp24 {
                value,
                quality,
                time,
                ..
            } => {
                push_f32(out, *value);
                out.push(quality.to_byte());
                time.encode(out);
            }
            ShortFloatCp56 {
                value,
                quality,
                time,
                ..
            } => {
                push_f32(out, *value);
                out.push(quality.to_byte());
                time.encode(out);
            }
            IntegratedTotals { value, .. } => {
                value.encode(out);
            }
            IntegratedTotalsCp24 { value, time, .. } => {
                value.encode(out);
                time.encode(out);
            }
            IntegratedTotalsCp56 { value, time, .. } => {
                value.encode(out);
                time.encode(out);
            }
            ProtectionEventCp24 {
                event,
                quality,
                elapsed,
                time,
                ..
            } => {
                out.push((*event as u8) | quality.to_byte());
                elapsed.encode(out);
                time.encode(out);
            }
            ProtectionEventCp56 {
                event,
                quality,
                elapsed,
                time,
                ..
            } => {
                out.push((*event as u8) | quality.to_byte());
                elapsed.encode(out);
                time.encode(out);
            }
            ProtectionStartEventsCp24 {
                events,
                quality,
                duration,
                time,
                ..
            } => {
                out.push(events.to_byte());
                out.push(quality.to_byte());
                duration.encode(out);
                time.encode(out);
            }
            ProtectionStartEventsCp56 {
                events,
                quality,
                duration,
                time,
                ..
            } => {
                out.push(events.to_byte());
                out.push(quality.to_byte());
                duration.encode(out);
                time.encode(out);
            }
            ProtectionOutputCircuitCp24 {
                circuits,
                quality,
                operating_time,
                time,
                ..
            } => {
                out.push(circuits.to_byte());
                out.push(quality.to_byte());
                operating_time.encode(out);
                time.encode(out);
            }
            ProtectionOutputCircuitCp56 {
                circuits,
                quality,
                operating_time,
                time,
                ..
            } => {
                out.push(circuits.to_byte());
                out.push(quality.to_byte());
                operating_time.encode(out);
                time.encode(out);
            }
            PackedSinglePoint {
                detection, quality, ..
            } => {
                detection.encode(out);
                out.push(quality.to_byte());
            }
            NormalizedNoQuality { value, .. } => {
                value.encode(out);
            }
            SingleCommand {
                state, qualifier, ..
            } => {
                out.push((*state as u8) | qualifier.to_bits());
            }
            SingleCommandCp56 {
                state,
                qualifier,
                time,
                ..
            } => {
                out.push((*state as u8) | qualifier.to_bits());
                time.encode(out);
            }
            DoubleCommand {
                state, qualifier, ..
            } => {
                out.push((*state as u8) | qualifier.to_bits());
            }
            DoubleCommandCp56 {
                state,
                qualifier,
                time,
                ..
            } => {
                out.push((*state as u8) | qualifier.to_bits());
                time.encode(out);
            }
            StepCommand {
                state, qualifier, ..
            } => {
                out.push((*state as u8) | qualifier.to_bits());
            }
            StepCommandCp56 {
                state,
                qualifier,
                time,
                ..
            } => {
                out.push((*state as u8) | qualifier.to_bits());
                time.encode(out);
            }
            SetpointNormalized {
                value, qualifier, ..
            } => {
                value.encode(out);
                out.push(qualifier.to_byte());
            }
            SetpointNormalizedCp56 {
                value,
                qualifier,
                time,
                ..
            } => {
                value.encode(out);
                out.push(qualifier.to_byte());
                time.encode(out);
            }
            SetpointScaled {
                value, qualifier, ..
            } => {
                push_i16(out, *value);
                out.push(qualifier.to_byte());
            }
            SetpointScaledCp56 {
                value,
                qualifier,
                time,
                ..
            } => {
                push_i16(out, *value);
                out.push(qualifier.to_byte());
                time.encode(out);
            }
            SetpointShortFloat {
                value, qualifier, ..
            } => {
                push_f32(out, *value);
                out.push(qualifier.to_byte());
            }
            SetpointShortFloatCp56 {
                value,
                qualifier,
                time,
                ..
            } => {
                push_f32(out, *value);
                out.push(qualifier.to_byte());
                time.encode(out);
            }
            BitstringCommand { value, .. } => {
                push_u32(out, *value);
            }
            BitstringCommandCp56 { value, time, .. } => {
                push_u32(out, *value);
                time.encode(out);
            }
            EndOfInitialization { cause, .. } => {
                out.push(*cause);
            }
            InterrogationCommand { qualifier, .. } => {
                out.push(*qualifier);
            }
            CounterInterrogationCommand { qualifier, .. } => {
                out.push(qualifier.to_byte());
            }
            ReadCommand { .. } => {}
            ClockSyncCommand { time, .. } => {
                time.encode(out);
            }
            TestCommand { .. } => {
                out.extend_from_slice(&TEST_PATTERN);
            }
            ResetProcessCommand { qualifier, .. } => {
                out.push(*qualifier);
            }
            DelayAcquisitionCommand { delay, .. } => {
                delay.encode(out);
            }
            TestCommandCp56 { counter, time, .. } => {
                let mut buf = [0u8; 2];
                LittleEndian::write_u16(&mut buf, *counter);
                out.extend_from_slice(&buf);
                time.encode(out);
            }
            ParameterNormalized {
                value, qualifier, ..
            } => {
                value.encode(out);
                out.push(*qualifier);
            }
            ParameterScaled {
                value, qualifier, ..
            } => {
                push_i16(out, *value);
                out.push(*qualifier);
            }
            ParameterShortFloat {
                value, qualifier, ..
            } => {
                push_f32(out, *value);
                out.push(*qualifier);
            }
            ParameterActivation { qualifier, .. } => {
                out.push(*qualifier);
            }
        }
    }

    /// Rebuilds the object of `type_id` at `address` from exactly
    /// [`TypeId::information_size`] payload octets.
    pub(crate) fn decode(
        type_id: TypeId,
        address: u32,
        data: &[u8],
    ) -> Result<InformationObject, Error> {
        let object = match type_id {
            TypeId::SinglePoint => InformationObject::SinglePoint {
                address,
                value: data[0] & 0x01 != 0,
                quality: Quality::from_indication(data[0]),
            },
            TypeId::SinglePointCp24 => InformationObject::SinglePointCp24 {
                address,
                value: data[0] & 0x01 != 0,
                quality: Quality::from_indication(data[0]),
                time: Cp24Time2a::decode(&data[1..]),
            },
            TypeId::SinglePointCp56 => InformationObject::SinglePointCp56 {
                address,
                value: data[0] & 0x01 != 0,
                quality: Quality::from_indication(data[0]),
                time: Cp56Time2a::decode(&data[1..]),
            },
            TypeId::DoublePoint => InformationObject::DoublePoint {
                address,
                value: DoublePointValue::from_bits(data[0]),
                quality: Quality::from_indication(data[0]),
            },
            TypeId::DoublePointCp24 => InformationObject::DoublePointCp24 {
                address,
                value: DoublePointValue::from_bits(data[0]),
                quality: Quality::from_indication(data[0]),
                time: Cp24Time2a::decode(&data[1..]),
            },
            TypeId::DoublePointCp56 => InformationObject::DoublePointCp56 {
                address,
                value: DoublePointValue::from_bits(data[0]),
                quality: Quality::from_indication(data[0]),
                time: Cp56Time2a::decode(&data[1..]),
            },
            TypeId::StepPosition => InformationObject::StepPosition {
                address,
                value: StepPositionValue::from_byte(data[0]),
                quality: Quality::from_byte(data[1]),
            },
            TypeId::StepPositionCp24 => InformationObject::StepPositionCp24 {
                address,
                value: StepPositionValue::from_byte(data[0]),
                quality: Quality::from_byte(data[1]),
                time: Cp24Time2a::decode(&data[2..]),
            },
            TypeId::StepPositionCp56 => InformationObject::StepPositionCp56 {
                address,
                value: StepPositionValue::from_byte(data[0]),
                quality: Quality::from_byte(data[1]),
                time: Cp56Time2a::decode(&data[2..]),
            },
            TypeId::Bitstring32 => InformationObject::Bitstring32 {
                address,
                value: LittleEndian::read_u32(data),
                quality: Quality::from_byte(data[4]),
            },
            TypeId::Bitstring32Cp24 => InformationObject::Bitstring32Cp24 {
                address,
                value: LittleEndian::read_u32(data),
                quality: Quality::from_byte(data[4]),
                time: Cp24Time2a::decode(&data[5..]),
            },
            TypeId::Bitstring32Cp56 => InformationObject::Bitstring32Cp56 {
                address,
                value: LittleEndian::read_u32(data),
                quality: Quality::from_byte(data[4]),
                time: Cp56Time2a::decode(&data[5..]),
            },
            TypeId::Normalized => InformationObject::Normalized {
                address,
                value: NormalizedValue::decode(data),
                quality: Quality::from_byte(data[2]),
            },
            TypeId::NormalizedCp24 => InformationObject::NormalizedCp24 {
                address,
                value: NormalizedValue::decode(data),
                quality: Quality::from_byte(data[2]),
                time: Cp24Time2a::decode(&data[3..]),
            },
            TypeId::NormalizedCp56 => InformationObject::NormalizedCp56 {
                address,
                value: NormalizedValue::decode(data),
                quality: Quality::from_byte(data[2]),
                time: Cp56Time2a::decode(&data[3..]),
            },
            TypeId::Scaled => InformationObject::Scaled {
                address,
                value: LittleEndian::read_i16(data),
                quality: Quality::from_byte(data[2]),
            },
            TypeId::ScaledCp24 => InformationObject::ScaledCp24 {
                address,
                value: LittleEndian::read_i16(data),
                quality: Quality::from_byte(data[2]),
                time: Cp24Time2a::decode(&data[3..]),
            },
            TypeId::ScaledCp56 => InformationObject::ScaledCp56 {
                address,
                value: LittleEndian::read_i16(data),
                quality: Quality::from_byte(data[2]),
                time: Cp56Time2a::decode(&data[3..]),
            },
            TypeId::ShortFloat => InformationObject::ShortFloat {
                address,
                value: LittleEndian::read_f32(data),
                quality: Quality::from_byte(data[4]),
            },
            TypeId::ShortFloatCp24 => InformationObject::ShortFloatCp24 {
                address,
                value: LittleEndian::read_f32(data),
                quality: Quality::from_byte(data[4]),
                time: Cp24Time2a::decode(&data[5..]),
            },
            TypeId::ShortFloatCp56 => InformationObject::ShortFloatCp56 {
                address,
                value: LittleEndian::read_f32(data),
                quality: Quality::from_byte(data[4]),
                time: Cp56Time2a::decode(&data[5..]),
            },
            TypeId::IntegratedTotals => InformationObject::IntegratedTotals {
                address,
                value: BinaryCounterReading::decode(data),
            },
            TypeId::IntegratedTotalsCp24 => InformationObject::IntegratedTotalsCp24 {
                address,
                value: BinaryCounterReading::decode(data),
                time: Cp24Time2a::decode(&data[5..]),
            },
            TypeId::IntegratedTotalsCp56 => InformationObject::IntegratedTotalsCp56 {
                address,
                value: BinaryCounterReading::decode(data),
                time: Cp56Time2a::decode(&data[5..]),
            },
            TypeId::ProtectionEventCp24 => InformationObject::ProtectionEventCp24 {
                address,
                event: DoublePointValue::from_bits(data[0]),
                quality: ProtectionQuality::from_byte(data[0] & 0xF8),
                elapsed: Cp16Time2a::decode(&data[1..]),
                time: Cp24Time2a::decode(&data[3..]),
            },
            TypeId::ProtectionEventCp56 => InformationObject::ProtectionEventCp56 {
                address,
                event: DoublePointValue::from_bits(data[0]),
                quality: ProtectionQuality::from_byte(data[0] & 0xF8),
                elapsed: Cp16Time2a::decode(&data[1..]),
                time: Cp56Time2a::decode(&data[3..]),
            },
            TypeId::ProtectionStartEventsCp24 => InformationObject::ProtectionStartEventsCp24 {
                address,
                events: StartEvents::from_byte(data[0]),
                quality: ProtectionQuality::from_byte(data[1]),
                duration: Cp16Time2a::decode(&data[2..]),
                time: Cp24Time2a::decode(&data[4..]),
            },
            TypeId::ProtectionStartEventsCp56 => InformationObject::ProtectionStartEventsCp56 {
                address,
                events: StartEvents::from_byte(data[0]),
                quality: ProtectionQuality::from_byte(data[1]),
                duration: Cp16Time2a::decode(&data[2..]),
                time: Cp56Time2a::decode(&data[4..]),
            },
            TypeId::ProtectionOutputCircuitCp24 => {
                InformationObject::ProtectionOutputCircuitCp24 {
                    address,
                    circuits: OutputCircuitInfo::from_byte(data[0]),
                    quality: ProtectionQuality::from_byte(data[1]),
                    operating_time: Cp16Time2a::decode(&data[2..]),
                    time: Cp24Time2a::decode(&data[4..]),
                }
            }
            TypeId::ProtectionOutputCircuitCp56 => {
                InformationObject::ProtectionOutputCircuitCp56 {
                    address,
                    circuits: OutputCircuitInfo::from_byte(data[0]),
                    quality: ProtectionQuality::from_byte(data[1]),
                    operating_time: Cp16Time2a::decode(&data[2..]),
                    time: Cp56Time2a::decode(&data[4..]),
                }
            }
            TypeId::PackedSinglePoint => InformationObject::PackedSinglePoint {
                address,
                detection: StatusChangeDetection::decode(data),
                quality: Quality::from_byte(data[4]),
            },
            TypeId::NormalizedNoQuality => InformationObject::NormalizedNoQuality {
                address,
                value: NormalizedValue::decode(data),
            },
            TypeId::SingleCommand => InformationObject::SingleCommand {
                address,
                state: data[0] & 0x01 != 0,
                qualifier: CommandQualifier::from_bits(data[0]),
            },
            TypeId::SingleCommandCp56 => InformationObject::SingleCommandCp56 {
                address,
                state: data[0] & 0x01 != 0,
                qualifier: CommandQualifier::from_bits(data[0]),
                time: Cp56Time2a::decode(&data[1..]),
            },
            TypeId::DoubleCommand => InformationObject::DoubleCommand {
                address,
                state: DoublePointValue::from_bits(data[0]),
                qualifier: CommandQualifier::from_bits(data[0]),
            },
            TypeId::DoubleCommandCp56 => InformationObject::DoubleCommandCp56 {
                address,
                state: DoublePointValue::from_bits(data[0]),
                qualifier: CommandQualifier::from_bits(data[0]),
                time: Cp56Time2a::decode(&data[1..]),
            },
            TypeId::StepCommand => InformationObject::StepCommand {
                address,
                state: StepCommandValue::from_bits(data[0]),
                qualifier: CommandQualifier::from_bits(data[0]),
            },
            TypeId::StepCommandCp56 => InformationObject::StepCommandCp56 {
                address,
                state: StepCommandValue::from_bits(data[0]),
                qualifier: CommandQualifier::from_bits(data[0]),
                time: Cp56Time2a::decode(&data[1..]),
            },
            TypeId::SetpointNormalized => InformationObject::SetpointNormalized {
                address,
                value: NormalizedValue::decode(data),
                qualifier: SetpointQualifier::from_byte(data[2]),
            },
            TypeId::SetpointNormalizedCp56 => InformationObject::SetpointNormalizedCp56 {
                address,
                value: NormalizedValue::decode(data),
                qualifier: SetpointQualifier::from_byte(data[2]),
                time: Cp56Time2a::decode(&data[3..]),
            },
            TypeId::SetpointScaled => InformationObject::SetpointScaled {
                address,
                value: LittleEndian::read_i16(data),
                qualifier: SetpointQualifier::from_byte(data[2]),
            },
            TypeId::SetpointScaledCp56 => InformationObject::SetpointScaledCp56 {
                address,
                value: LittleEndian::read_i16(data),
                qualifier: SetpointQualifier::from_byte(data[2]),
                time: Cp56Time2a::decode(&data[3..]),
            },
            TypeId::SetpointShortFloat => InformationObject::SetpointShortFloat {
                address,
                value: LittleEndian::read_f32(data),
                qualifier: SetpointQualifier::from_byte(data[4]),
            },
            TypeId::SetpointShortFloatCp56 => InformationObject::SetpointShortFloatCp56 {
                address,
                value: LittleEndian::read_f32(data),
                qualifier: SetpointQualifier::from_byte(data[4]),
                time: Cp56Time2a::decode(&data[5..]),
            },
            TypeId::BitstringCommand => InformationObject::BitstringCommand {
                address,
                value: LittleEndian::read_u32(data),
            },
            TypeId::BitstringCommandCp56 => InformationObject::BitstringCommandCp56 {
                address,
                value: LittleEndian::read_u32(data),
                time: Cp56Time2a::decode(&data[4..]),
            },
            TypeId::EndOfInitialization => InformationObject::EndOfInitialization {
                address,
                cause: data[0],
            },
            TypeId::InterrogationCommand => InformationObject::InterrogationCommand {
                address,
                qualifier: data[0],
            },
            TypeId::CounterInterrogationCommand => {
                InformationObject::CounterInterrogationCommand {
                    address,
                    qualifier: CounterInterrogationQualifier::from_byte(data[0]),
                }
            }
            TypeId::ReadCommand => InformationObject::ReadCommand { address },
            TypeId::ClockSyncCommand => InformationObject::ClockSyncCommand {
                address,
                time: Cp56Time2a::decode(data),
            },
            TypeId::TestCommand => InformationObject::TestCommand { address },
            TypeId::ResetProcessCommand => InformationObject::ResetProcessCommand {
                address,
                qualifier: data[0],
            },
            TypeId::DelayAcquisitionCommand => InformationObject::DelayAcquisitionCommand {
                address,
                delay: Cp16Time2a::decode(data),
            },
            TypeId::TestCommandCp56 => InformationObject::TestCommandCp56 {
                address,
                counter: LittleEndian::read_u16(data),
                time: Cp56Time2a::decode(&data[2..]),
            },
            TypeId::ParameterNormalized => InformationObject::ParameterNormalized {
                address,
                value: NormalizedValue::decode(data),
                qualifier: data[2],
            },
            TypeId::ParameterScaled => InformationObject::ParameterScaled {
                address,
                value: LittleEndian::read_i16(data),
                qualifier: data[2],
            },
            TypeId::ParameterShortFloat => InformationObject::ParameterShortFloat {
                address,
                value: LittleEndian::read_f32(data),
                qualifier: data[4],
            },
            TypeId::ParameterActivation => InformationObject::ParameterActivation {
                address,
                qualifier: data[0],
            },
            _ => {
                return Err(Error::Parsing(format!(
                    "No element layout for ASDU type id:{}",
                    type_id as u8
                )))
            }
        };
        Ok(object)
    }
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    let mut buf = [0u8; 4];
    LittleEndian::write_u32(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn push_i16(out: &mut Vec<u8>, value: i16) {
    let mut buf = [0u8; 2];
    LittleEndian::write_i16(&mut buf, value);
    out.extend_from_slice(&buf);
}

fn push_f32(out: &mut Vec<u8>, value: f32) {
    let mut buf = [0u8; 4];
    LittleEndian::write_f32(&mut buf, value);
    out.extend_from_slice(&buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(object: InformationObject) {
        let type_id = object.type_id();
        let mut payload = Vec::new();
        object.encode_payload(&mut payload);
        assert_eq!(
            payload.len(),
            type_id.information_size().unwrap(),
            "width table mismatch for {:?}",
            type_id
        );
        let decoded = InformationObject::decode(type_id, object.address(), &payload).unwrap();
        assert_eq!(decoded, object);
    }

    #[test]
    fn test_catalogue_round_trips() {
        let tick = Cp24Time2a::new(12, 34567);
        let stamp = Cp56Time2a {
            millisecond: 1234,
            minute: 56,
            invalid: false,
            hour: 23,
            summer_time: true,
            day_of_month: 31,
            day_of_week: 7,
            month: 12,
            year: 99,
        };
        let worn = Quality {
            overflow: false,
            blocked: true,
            substituted: false,
            not_topical: true,
            invalid: false,
        };

        let objects = vec![
            InformationObject::SinglePoint {
                address: 100,
                value: true,
                quality: worn,
            },
            InformationObject::SinglePointCp24 {
                address: 101,
                value: false,
                quality: Quality::GOOD,
                time: tick,
            },
            InformationObject::SinglePointCp56 {
                address: 102,
                value: true,
                quality: Quality::GOOD,
                time: stamp,
            },
            InformationObject::DoublePoint {
                address: 200,
                value: DoublePointValue::On,
                quality: Quality::GOOD,
            },
            InformationObject::DoublePointCp56 {
                address: 201,
                value: DoublePointValue::Indeterminate,
                quality: worn,
                time: stamp,
            },
            InformationObject::StepPosition {
                address: 300,
                value: StepPositionValue::new(-12, true),
                quality: Quality::GOOD,
            },
            InformationObject::Bitstring32Cp24 {
                address: 400,
                value: 0xDEAD_BEEF,
                quality: Quality::GOOD,
                time: tick,
            },
            InformationObject::Normalized {
                address: 500,
                value: NormalizedValue::new(-16384),
                quality: worn,
            },
            InformationObject::NormalizedCp56 {
                address: 501,
                value: NormalizedValue::new(32767),
                quality: Quality::GOOD,
                time: stamp,
            },
            InformationObject::Scaled {
                address: 600,
                value: -1234,
                quality: Quality::GOOD,
            },
            InformationObject::ShortFloat {
                address: 700,
                value: 3.5,
                quality: Quality::GOOD,
            },
            InformationObject::ShortFloatCp24 {
                address: 701,
                value: -0.25,
                quality: worn,
                time: tick,
            },
            InformationObject::IntegratedTotals {
                address: 800,
                value: BinaryCounterReading::new(99999, 3),
            },
            InformationObject::IntegratedTotalsCp56 {
                address: 801,
                value: BinaryCounterReading::new(-1, 31),
                time: stamp,
            },
            InformationObject::ProtectionEventCp24 {
                address: 900,
                event: DoublePointValue::Off,
                quality: ProtectionQuality::default(),
                elapsed: Cp16Time2a::new(100),
                time: tick,
            },
            InformationObject::ProtectionStartEventsCp56 {
                address: 901,
                events: StartEvents {
                    general: true,
                    phase_l1: true,
                    ..Default::default()
                },
                quality: ProtectionQuality::default(),
                duration: Cp16Time2a::new(40),
                time: stamp,
            },
            InformationObject::ProtectionOutputCircuitCp24 {
                address: 902,
                circuits: OutputCircuitInfo {
                    general: true,
                    ..Default::default()
                },
                quality: ProtectionQuality::default(),
                operating_time: Cp16Time2a::new(55),
                time: tick,
            },
            InformationObject::PackedSinglePoint {
                address: 1000,
                detection: StatusChangeDetection {
                    status: 0x00FF,
                    changed: 0xFF00,
                },
                quality: Quality::GOOD,
            },
            InformationObject::NormalizedNoQuality {
                address: 1001,
                value: NormalizedValue::new(42),
            },
            InformationObject::SingleCommand {
                address: 2000,
                state: true,
                qualifier: CommandQualifier::select(),
            },
            InformationObject::SingleCommandCp56 {
                address: 2001,
                state: false,
                qualifier: CommandQualifier::execute(),
                time: stamp,
            },
            InformationObject::DoubleCommand {
                address: 2002,
                state: DoublePointValue::Off,
                qualifier: CommandQualifier::execute(),
            },
            InformationObject::StepCommand {
                address: 2003,
                state: StepCommandValue::Higher,
                qualifier: CommandQualifier::execute(),
            },
            InformationObject::SetpointNormalized {
                address: 2004,
                value: NormalizedValue::from_f32(0.75),
                qualifier: SetpointQualifier::execute(),
            },
            InformationObject::SetpointScaledCp56 {
                address: 2005,
                value: 4321,
                qualifier: SetpointQualifier::execute(),
                time: stamp,
            },
            InformationObject::SetpointShortFloat {
                address: 2006,
                value: 50.0,
                qualifier: SetpointQualifier {
                    qualifier: 1,
                    select: true,
                },
            },
            InformationObject::BitstringCommand {
                address: 2007,
                value: 0x0102_0304,
            },
            InformationObject::BitstringCommandCp56 {
                address: 2008,
                value: 1,
                time: stamp,
            },
            InformationObject::EndOfInitialization {
                address: 0,
                cause: 0x80,
            },
            InformationObject::InterrogationCommand {
                address: 0,
                qualifier: 20,
            },
            InformationObject::CounterInterrogationCommand {
                address: 0,
                qualifier: CounterInterrogationQualifier::general(),
            },
            InformationObject::ReadCommand { address: 55 },
            InformationObject::ClockSyncCommand {
                address: 0,
                time: stamp,
            },
            InformationObject::TestCommand { address: 0 },
            InformationObject::ResetProcessCommand {
                address: 0,
                qualifier: 1,
            },
            InformationObject::DelayAcquisitionCommand {
                address: 0,
                delay: Cp16Time2a::new(300),
            },
            InformationObject::TestCommandCp56 {
                address: 0,
                counter: 0x1234,
                time: stamp,
            },
            InformationObject::ParameterNormalized {
                address: 3000,
                value: NormalizedValue::new(-1),
                qualifier: 1,
            },
            InformationObject::ParameterScaled {
                address: 3001,
                value: 10,
                qualifier: 2,
            },
            InformationObject::ParameterShortFloat {
                address: 3002,
                value: 0.001,
                qualifier: 3,
            },
            InformationObject::ParameterActivation {
                address: 3003,
                qualifier: 1,
            },
        ];

        for object in objects {
            round_trip(object);
        }
    }

    #[test]
    fn test_single_point_wire_byte() {
        let object = InformationObject::SinglePoint {
            address: 1,
            value: true,
            quality: Quality {
                invalid: true,
                ..Default::default()
            },
        };
        let mut payload = Vec::new();
        object.encode_payload(&mut payload);
        assert_eq!(payload, [0x81]);
    }

    #[test]
    fn test_single_command_wire_byte() {
        // select + short pulse + on
        let object = InformationObject::SingleCommand {
            address: 1,
            state: true,
            qualifier: CommandQualifier {
                qualifier: 1,
                select: true,
            },
        };
        let mut payload = Vec::new();
        object.encode_payload(&mut payload);
        assert_eq!(payload, [0x85]);
    }

    #[test]
    fn test_test_command_pattern() {
        let mut payload = Vec::new();
        InformationObject::TestCommand { address: 0 }.encode_payload(&mut payload);
        assert_eq!(payload, [0xCC, 0x55]);
    }

    #[test]
    fn test_file_transfer_has_no_layout() {
        match InformationObject::decode(TypeId::FileReady, 0, &[]) {
            Err(Error::Parsing(reason)) => assert!(reason.contains("120")),
            other => panic!("expected parsing error, got {:?}", other),
        }
    }
}
