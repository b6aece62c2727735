// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

use super::asdu::{Asdu, Cot, TypeId};
use super::connection::{Connection, ConnectionEvent, ConnectionSender};
use super::error::Error;
use super::object::{Cp16Time2a, Cp56Time2a, CounterInterrogationQualifier, InformationObject};
use super::params::ConnectionParameters;
use std::net::SocketAddr;

/// The IEC 60870-5-104 command surface.
///
/// Every command builds a one-element ASDU and hands it to the link
/// engine; commands fail with [`Error::NotConnected`] unless STARTDT has
/// been confirmed.
///
/// # Examples
///
/// ```no_run
/// use iec104::client::Client;
/// use iec104::params::ConnectionParameters;
/// use iec104::asdu::Cot;
/// use iec104::constant::QOI_STATION;
///
/// let addr = "127.0.0.1:2404".parse().unwrap();
/// let mut client = Client::new(addr, ConnectionParameters::default());
///
/// client.set_asdu_handler(|asdu| {
///     for element in asdu.elements().unwrap_or_default() {
///         println!("ioa {} -> {:?}", element.address(), element);
///     }
/// });
///
/// client.connect().unwrap();
/// client.send_interrogation(Cot::Activation, 1, QOI_STATION).unwrap();
/// ```
pub struct Client {
    connection: Connection,
}

impl Client {
    pub fn new(address: SocketAddr, params: ConnectionParameters) -> Client {
        Client {
            connection: Connection::new(address, params),
        }
    }

    /// The parameters this client was created with.
    pub fn params(&self) -> &ConnectionParameters {
        self.connection.params()
    }

    /// See [`Connection::set_asdu_handler`].
    pub fn set_asdu_handler<F>(&self, handler: F)
    where
        F: FnMut(&Asdu) + Send + 'static,
    {
        self.connection.set_asdu_handler(handler)
    }

    /// See [`Connection::set_connection_handler`].
    pub fn set_connection_handler<F>(&self, handler: F)
    where
        F: FnMut(ConnectionEvent) + Send + 'static,
    {
        self.connection.set_connection_handler(handler)
    }

    /// A sending handle for use inside handlers.
    pub fn sender(&self) -> ConnectionSender {
        self.connection.sender()
    }

    /// Opens the link; see [`Connection::connect`].
    pub fn connect(&mut self) -> Result<(), Error> {
        self.connection.connect()
    }

    /// Closes the link; see [`Connection::close`].
    pub fn close(&mut self) {
        self.connection.close()
    }

    pub fn is_running(&self) -> bool {
        self.connection.is_running()
    }

    /// Starts the data transfer explicitly when `autostart` is off.
    pub fn send_start_dt(&self) -> Result<(), Error> {
        self.connection.send_start_dt()
    }

    /// Asks the peer to stop the data transfer.
    pub fn send_stop_dt(&self) -> Result<(), Error> {
        self.connection.send_stop_dt()
    }

    /// Sends a prebuilt ASDU unchanged.
    pub fn send_asdu(&self, asdu: &Asdu) -> Result<(), Error> {
        self.connection.send_asdu(asdu)
    }

    /// Station or group interrogation (type 100).
    ///
    /// `qualifier` 20 interrogates the whole station; 21..36 select a
    /// group.
    pub fn send_interrogation(
        &self,
        cause: Cot,
        common_address: u16,
        qualifier: u8,
    ) -> Result<(), Error> {
        let mut asdu = Asdu::new(
            self.params(),
            TypeId::InterrogationCommand,
            cause,
            common_address,
        );
        asdu.add_object(InformationObject::InterrogationCommand {
            address: 0,
            qualifier,
        })?;
        self.send_asdu(&asdu)
    }

    /// Counter interrogation (type 101).
    pub fn send_counter_interrogation(
        &self,
        cause: Cot,
        common_address: u16,
        qualifier: CounterInterrogationQualifier,
    ) -> Result<(), Error> {
        let mut asdu = Asdu::new(
            self.params(),
            TypeId::CounterInterrogationCommand,
            cause,
            common_address,
        );
        asdu.add_object(InformationObject::CounterInterrogationCommand {
            address: 0,
            qualifier,
        })?;
        self.send_asdu(&asdu)
    }

    /// Reads a single information object (type 102).
    pub fn send_read(&self, common_address: u16, address: u32) -> Result<(), Error> {
        let mut asdu = Asdu::new(
            self.params(),
            TypeId::ReadCommand,
            Cot::Request,
            common_address,
        );
        asdu.add_object(InformationObject::ReadCommand { address })?;
        self.send_asdu(&asdu)
    }

    /// Synchronizes the outstation clock (type 103).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use iec104::client::Client;
    /// use iec104::params::ConnectionParameters;
    /// use iec104::object::Cp56Time2a;
    ///
    /// let addr = "127.0.0.1:2404".parse().unwrap();
    /// let mut client = Client::new(addr, ConnectionParameters::default());
    /// client.connect().unwrap();
    /// client.send_clock_sync(1, Cp56Time2a::now()).unwrap();
    /// ```
    pub fn send_clock_sync(&self, common_address: u16, time: Cp56Time2a) -> Result<(), Error> {
        let mut asdu = Asdu::new(
            self.params(),
            TypeId::ClockSyncCommand,
            Cot::Activation,
            common_address,
        );
        asdu.add_object(InformationObject::ClockSyncCommand { address: 0, time })?;
        self.send_asdu(&asdu)
    }

    /// Test command with the fixed bit pattern (type 104).
    pub fn send_test_command(&self, common_address: u16) -> Result<(), Error> {
        let mut asdu = Asdu::new(
            self.params(),
            TypeId::TestCommand,
            Cot::Activation,
            common_address,
        );
        asdu.add_object(InformationObject::TestCommand { address: 0 })?;
        self.send_asdu(&asdu)
    }

    /// Test command carrying a counter and time tag (type 107).
    pub fn send_test_command_with_time(
        &self,
        common_address: u16,
        counter: u16,
        time: Cp56Time2a,
    ) -> Result<(), Error> {
        let mut asdu = Asdu::new(
            self.params(),
            TypeId::TestCommandCp56,
            Cot::Activation,
            common_address,
        );
        asdu.add_object(InformationObject::TestCommandCp56 {
            address: 0,
            counter,
            time,
        })?;
        self.send_asdu(&asdu)
    }

    /// Reset process command (type 105).
    pub fn send_reset_process(
        &self,
        cause: Cot,
        common_address: u16,
        qualifier: u8,
    ) -> Result<(), Error> {
        let mut asdu = Asdu::new(
            self.params(),
            TypeId::ResetProcessCommand,
            cause,
            common_address,
        );
        asdu.add_object(InformationObject::ResetProcessCommand {
            address: 0,
            qualifier,
        })?;
        self.send_asdu(&asdu)
    }

    /// Delay acquisition command (type 106).
    pub fn send_delay_acquisition(
        &self,
        cause: Cot,
        common_address: u16,
        delay: Cp16Time2a,
    ) -> Result<(), Error> {
        let mut asdu = Asdu::new(
            self.params(),
            TypeId::DelayAcquisitionCommand,
            cause,
            common_address,
        );
        asdu.add_object(InformationObject::DelayAcquisitionCommand { address: 0, delay })?;
        self.send_asdu(&asdu)
    }

    /// Sends a control command, any of the type ids 45..64.
    ///
    /// The supplied object must match `type_id`; the mismatch is caught
    /// locally before anything reaches the wire.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use iec104::client::Client;
    /// use iec104::params::ConnectionParameters;
    /// use iec104::asdu::{Cot, TypeId};
    /// use iec104::object::{CommandQualifier, InformationObject};
    ///
    /// let addr = "127.0.0.1:2404".parse().unwrap();
    /// let mut client = Client::new(addr, ConnectionParameters::default());
    /// client.connect().unwrap();
    ///
    /// let switch_on = InformationObject::SingleCommand {
    ///     address: 6000,
    ///     state: true,
    ///     qualifier: CommandQualifier::execute(),
    /// };
    /// client.send_control(TypeId::SingleCommand, Cot::Activation, 1, switch_on).unwrap();
    /// ```
    pub fn send_control(
        &self,
        type_id: TypeId,
        cause: Cot,
        common_address: u16,
        object: InformationObject,
    ) -> Result<(), Error> {
        if !type_id.is_control() {
            return Err(Error::InvalidParameter(format!(
                "type id {} is not a control command",
                type_id as u8
            )));
        }
        if object.type_id() != type_id {
            return Err(Error::TypeMismatch {
                expected: type_id as u8,
                supplied: object.type_id() as u8,
            });
        }
        let mut asdu = Asdu::new(self.params(), type_id, cause, common_address);
        asdu.add_object(object)?;
        self.send_asdu(&asdu)
    }

    /// Loads a parameter, any of the type ids 110..113.
    pub fn send_parameter(
        &self,
        type_id: TypeId,
        common_address: u16,
        object: InformationObject,
    ) -> Result<(), Error> {
        if !type_id.is_parameter() {
            return Err(Error::InvalidParameter(format!(
                "type id {} is not a parameter type",
                type_id as u8
            )));
        }
        if object.type_id() != type_id {
            return Err(Error::TypeMismatch {
                expected: type_id as u8,
                supplied: object.type_id() as u8,
            });
        }
        let mut asdu = Asdu::new(self.params(), type_id, Cot::Activation, common_address);
        asdu.add_object(object)?;
        self.send_asdu(&asdu)
    }
}
