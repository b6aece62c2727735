// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! End-to-end scenarios against a scripted loopback outstation.

extern crate iec104;

use iec104::asdu::Cot;
use iec104::client::Client;
use iec104::connection::ConnectionEvent;
use iec104::error::Error;
use iec104::object::Cp56Time2a;
use iec104::params::ConnectionParameters;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

const STARTDT_ACT: [u8; 6] = [0x68, 0x04, 0x07, 0x00, 0x00, 0x00];
const STARTDT_CON: [u8; 6] = [0x68, 0x04, 0x0B, 0x00, 0x00, 0x00];
const TESTFR_ACT: [u8; 6] = [0x68, 0x04, 0x43, 0x00, 0x00, 0x00];
const TESTFR_CON: [u8; 6] = [0x68, 0x04, 0x83, 0x00, 0x00, 0x00];

fn test_params() -> ConnectionParameters {
    ConnectionParameters {
        t0: Duration::from_secs(5),
        t1: Duration::from_secs(5),
        t2: Duration::from_secs(2),
        t3: Duration::from_secs(60),
        ..Default::default()
    }
}

fn listener() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Reads one length-prefixed frame from the peer.
fn read_frame(stream: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut header = [0u8; 2];
    stream.read_exact(&mut header)?;
    let mut frame = header.to_vec();
    frame.resize(2 + header[1] as usize, 0);
    stream.read_exact(&mut frame[2..])?;
    Ok(frame)
}

/// Accepts the client and answers its STARTDT handshake.
fn accept_and_start(listener: &TcpListener) -> TcpStream {
    let (mut stream, _) = listener.accept().unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    let frame = read_frame(&mut stream).unwrap();
    assert_eq!(frame, STARTDT_ACT);
    stream.write_all(&STARTDT_CON).unwrap();
    stream
}

fn i_frame(send_count: u16, receive_count: u16, body: &[u8]) -> Vec<u8> {
    let mut frame = vec![0x68, (4 + body.len()) as u8];
    frame.push(((send_count & 0x7F) << 1) as u8);
    frame.push((send_count >> 7) as u8);
    frame.push(((receive_count & 0x7F) << 1) as u8);
    frame.push((receive_count >> 7) as u8);
    frame.extend_from_slice(body);
    frame
}

fn s_frame(receive_count: u16) -> Vec<u8> {
    vec![
        0x68,
        0x04,
        0x01,
        0x00,
        ((receive_count & 0x7F) << 1) as u8,
        (receive_count >> 7) as u8,
    ]
}

fn wait_until<F: Fn() -> bool>(deadline: Duration, condition: F) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    condition()
}

#[test]
fn test_startdt_handshake_and_events() {
    let (listener, addr) = listener();
    let server = thread::spawn(move || {
        let stream = accept_and_start(&listener);
        // hold the connection until the client is done
        thread::sleep(Duration::from_millis(300));
        drop(stream);
    });

    let events: Arc<Mutex<Vec<ConnectionEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&events);

    let mut client = Client::new(addr, test_params());
    client.set_connection_handler(move |event| seen.lock().unwrap().push(event));
    client.connect().unwrap();

    assert!(wait_until(Duration::from_secs(2), || {
        events.lock().unwrap().len() >= 2
    }));
    assert!(client.is_running());
    {
        let events = events.lock().unwrap();
        assert_eq!(
            &events[..2],
            &[ConnectionEvent::Opened, ConnectionEvent::StartDtConReceived]
        );
    }

    client.close();
    assert!(!client.is_running());
    assert!(events.lock().unwrap().contains(&ConnectionEvent::Closed));
    server.join().unwrap();
}

#[test]
fn test_interrogation_octets() {
    let (listener, addr) = listener();
    let server = thread::spawn(move || {
        let mut stream = accept_and_start(&listener);
        read_frame(&mut stream).unwrap()
    });

    let mut client = Client::new(addr, test_params());
    client.connect().unwrap();
    assert!(wait_until(Duration::from_secs(2), || client.is_running()));

    client.send_interrogation(Cot::Activation, 1, 20).unwrap();

    let frame = server.join().unwrap();
    assert_eq!(
        frame,
        vec![
            0x68, 0x0E, 0x00, 0x00, 0x00, 0x00, 0x64, 0x01, 0x06, 0x00, 0x01, 0x00, 0x00, 0x00,
            0x00, 0x14
        ]
    );
    client.close();
}

#[test]
fn test_clock_sync_octets() {
    let (listener, addr) = listener();
    let server = thread::spawn(move || {
        let mut stream = accept_and_start(&listener);
        read_frame(&mut stream).unwrap()
    });

    let mut client = Client::new(addr, test_params());
    client.connect().unwrap();
    assert!(wait_until(Duration::from_secs(2), || client.is_running()));

    let time = Cp56Time2a {
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
    client.send_clock_sync(1, time).unwrap();

    let frame = server.join().unwrap();
    assert_eq!(
        &frame[6..],
        &[
            0x67, 0x01, 0x06, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0xF4, 0x01, 0x1E, 0x0A, 0x64,
            0x06, 0x18
        ]
    );
    client.close();
}

#[test]
fn test_s_frame_after_w_received_frames() {
    let (listener, addr) = listener();
    let server = thread::spawn(move || {
        let mut stream = accept_and_start(&listener);
        // eight spontaneous single points, NS 0..7
        for count in 0..8u16 {
            let body = [
                0x01, 0x01, 0x03, 0x00, 0x01, 0x00, // M_SP_NA_1, spontaneous, ca 1
                count as u8, 0x00, 0x00, // ioa
                0x01, // on
            ];
            stream.write_all(&i_frame(count, 0, &body)).unwrap();
        }
        read_frame(&mut stream).unwrap()
    });

    let addresses: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&addresses);

    let mut client = Client::new(addr, test_params());
    client.set_asdu_handler(move |asdu| {
        let element = asdu.element(0).unwrap();
        seen.lock().unwrap().push(element.address());
    });
    client.connect().unwrap();
    assert!(wait_until(Duration::from_secs(2), || client.is_running()));

    // the eighth frame crosses w and forces the acknowledgement
    let frame = server.join().unwrap();
    assert_eq!(frame, s_frame(8));
    assert_eq!(*addresses.lock().unwrap(), (0..8).collect::<Vec<u32>>());
    client.close();
}

#[test]
fn test_testfr_after_idle_period() {
    let (listener, addr) = listener();
    let server = thread::spawn(move || {
        let mut stream = accept_and_start(&listener);
        let frame = read_frame(&mut stream).unwrap();
        assert_eq!(frame, TESTFR_ACT);
        stream.write_all(&TESTFR_CON).unwrap();
        thread::sleep(Duration::from_millis(200));
    });

    let mut params = test_params();
    params.t3 = Duration::from_millis(300);
    let mut client = Client::new(addr, params);
    client.connect().unwrap();
    assert!(wait_until(Duration::from_secs(2), || client.is_running()));

    // idle past t3; the engine must probe and the link must survive
    server.join().unwrap();
    assert!(client.is_running());
    client.close();
}

#[test]
fn test_t1_expiry_closes_the_link() {
    let (listener, addr) = listener();
    let server = thread::spawn(move || {
        let mut stream = accept_and_start(&listener);
        // swallow the interrogation, never acknowledge it
        read_frame(&mut stream).unwrap();
        let _ = read_frame(&mut stream);
    });

    let events: Arc<Mutex<Vec<ConnectionEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&events);

    let mut params = test_params();
    params.t1 = Duration::from_millis(400);
    params.t2 = Duration::from_millis(200);
    let mut client = Client::new(addr, params);
    client.set_connection_handler(move |event| seen.lock().unwrap().push(event));
    client.connect().unwrap();
    assert!(wait_until(Duration::from_secs(2), || client.is_running()));

    client.send_interrogation(Cot::Activation, 1, 20).unwrap();

    assert!(wait_until(Duration::from_secs(2), || {
        events.lock().unwrap().contains(&ConnectionEvent::Closed)
    }));
    assert!(!client.is_running());
    match client.send_interrogation(Cot::Activation, 1, 20) {
        Err(Error::NotConnected) => {}
        other => panic!("expected not connected, got {:?}", other),
    }
    server.join().unwrap();
    client.close();
}

#[test]
fn test_no_startdt_without_autostart() {
    let (listener, addr) = listener();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream
            .set_read_timeout(Some(Duration::from_millis(300)))
            .unwrap();
        // nothing may arrive until the user asks for the start
        let mut probe = [0u8; 1];
        match stream.read(&mut probe) {
            Ok(0) => panic!("client closed unexpectedly"),
            Ok(_) => panic!("unexpected octets before send_start_dt"),
            Err(e) => assert!(
                e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut
            ),
        }
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let frame = read_frame(&mut stream).unwrap();
        assert_eq!(frame, STARTDT_ACT);
        stream.write_all(&STARTDT_CON).unwrap();
        thread::sleep(Duration::from_millis(200));
    });

    let mut params = test_params();
    params.autostart = false;
    let mut client = Client::new(addr, params);
    client.connect().unwrap();

    // open but not running
    thread::sleep(Duration::from_millis(400));
    assert!(!client.is_running());

    client.send_start_dt().unwrap();
    assert!(wait_until(Duration::from_secs(2), || client.is_running()));
    server.join().unwrap();
    client.close();
}

#[test]
fn test_unknown_type_id_does_not_kill_the_link() {
    let (listener, addr) = listener();
    let server = thread::spawn(move || {
        let mut stream = accept_and_start(&listener);
        // type id 200 with a three-octet payload after the ioa
        let body = [
            200, 0x01, 0x03, 0x00, 0x01, 0x00, // header
            0x05, 0x00, 0x00, // ioa 5
            0xAA, 0xBB, 0xCC,
        ];
        stream.write_all(&i_frame(0, 0, &body)).unwrap();
        thread::sleep(Duration::from_millis(300));
    });

    let errors: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&errors);

    let mut client = Client::new(addr, test_params());
    client.set_asdu_handler(move |asdu| {
        if let Err(e) = asdu.element(0) {
            seen.lock().unwrap().push(e.to_string());
        }
    });
    client.connect().unwrap();
    assert!(wait_until(Duration::from_secs(2), || client.is_running()));

    assert!(wait_until(Duration::from_secs(2), || {
        !errors.lock().unwrap().is_empty()
    }));
    assert!(errors.lock().unwrap()[0].contains("Unknown ASDU type id:200"));
    // the counters updated and the link stayed up
    assert!(client.is_running());
    server.join().unwrap();
    client.close();
}

#[test]
fn test_test_command_confirmation_waits_for_window_space() {
    let (listener, addr) = listener();
    let server = thread::spawn(move || {
        let mut stream = accept_and_start(&listener);
        // the interrogation saturates the k=1 window
        read_frame(&mut stream).unwrap();

        // test command with time tag, activation direction
        let body = [
            0x6B, 0x01, 0x06, 0x00, 0x01, 0x00, // C_TS_TA_1, activation, ca 1
            0x00, 0x00, 0x00, // ioa 0
            0x34, 0x12, // counter 0x1234
            0xF4, 0x01, 0x1E, 0x0A, 0x64, 0x06, 0x18,
        ];
        stream.write_all(&i_frame(0, 0, &body)).unwrap();

        // the receipt is acknowledged, but the confirmation I-frame must
        // not go out while the window is still full
        let frame = read_frame(&mut stream).unwrap();
        assert_eq!(frame, s_frame(1));
        stream
            .set_read_timeout(Some(Duration::from_millis(200)))
            .unwrap();
        let mut probe = [0u8; 1];
        match stream.read(&mut probe) {
            Ok(_) => panic!("confirmation sent while the send window was full"),
            Err(e) => assert!(
                e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut
            ),
        }
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();

        // freeing the window releases the parked confirmation
        stream.write_all(&s_frame(1)).unwrap();
        let frame = read_frame(&mut stream).unwrap();
        let mut expected = vec![0x68, 0x16, 0x02, 0x00, 0x02, 0x00];
        expected.extend_from_slice(&body);
        expected[8] = 0x07; // activation confirmation
        assert_eq!(frame, expected);
    });

    let delivered: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&delivered);

    let mut params = test_params();
    params.k = 1;
    params.w = 1;
    let mut client = Client::new(addr, params);
    client.set_asdu_handler(move |asdu| seen.lock().unwrap().push(asdu.type_code()));
    client.connect().unwrap();
    assert!(wait_until(Duration::from_secs(2), || client.is_running()));

    client.send_interrogation(Cot::Activation, 1, 20).unwrap();

    server.join().unwrap();
    // the deferred confirmation does not swallow the delivery
    assert_eq!(*delivered.lock().unwrap(), vec![107]);
    assert!(client.is_running());
    client.close();
}

#[test]
fn test_send_window_blocks_at_k() {
    let (listener, addr) = listener();
    let server = thread::spawn(move || {
        let mut stream = accept_and_start(&listener);
        read_frame(&mut stream).unwrap();
        // hold the window shut, then release it
        thread::sleep(Duration::from_millis(300));
        stream.write_all(&s_frame(1)).unwrap();
        read_frame(&mut stream).unwrap();
        stream.write_all(&s_frame(2)).unwrap();
        thread::sleep(Duration::from_millis(100));
    });

    let mut params = test_params();
    params.k = 1;
    params.w = 1;
    let mut client = Client::new(addr, params);
    client.connect().unwrap();
    assert!(wait_until(Duration::from_secs(2), || client.is_running()));

    client.send_interrogation(Cot::Activation, 1, 20).unwrap();

    // the second send must wait for the acknowledgement of the first
    let start = Instant::now();
    client.send_interrogation(Cot::Activation, 1, 21).unwrap();
    assert!(start.elapsed() >= Duration::from_millis(250));

    server.join().unwrap();
    client.close();
}
