// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! This crate provides a client for the IEC 60870-5-104 telecontrol
//! protocol used between SCADA control stations and substation
//! outstations.
//! # Examples
//! ```no_run
//! # extern crate iec104;
//! # use iec104::{asdu::Cot, client::Client, constant, params::ConnectionParameters};
//! # use std::time::Duration;
//!
//! # fn main() {
//!     let addr = "192.168.1.50:2404".parse().unwrap();
//!     let mut params = ConnectionParameters::default();
//!     params.t0 = Duration::from_secs(5);
//!
//!     let mut client = Client::new(addr, params);
//!     client.set_asdu_handler(|asdu| {
//!         println!(
//!             "type {:?} with {} elements",
//!             asdu.type_id(),
//!             asdu.number_of_elements()
//!         );
//!     });
//!
//!     match client.connect() {
//!         Ok(()) => {}
//!         Err(e) => {
//!             println!("{}", e.to_string());
//!             return;
//!         }
//!     }
//!
//!     client
//!         .send_interrogation(Cot::Activation, 1, constant::QOI_STATION)
//!         .unwrap();
//! # }
//! ```
pub mod asdu;
pub mod client;
pub mod connection;
pub mod constant;
pub mod error;
pub mod frame;
pub mod object;
pub mod params;
