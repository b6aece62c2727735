// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! The APCI link engine
//!
//! One [`Connection`] owns one TCP endpoint and the complete link state:
//! send/receive counts, the k/w flow-control window, the t1..t3 timers and
//! the U-frame handshake. A reader thread, spawned per connect cycle,
//! drives the receive side and the timers; caller threads stamp and write
//! I-frames under the link mutex. Received ASDUs and lifecycle events are
//! delivered to registered handlers on the reader thread, so handlers must
//! not block for long and must never call [`Connection::close`].

use super::asdu::{Asdu, Cot, TypeId};
use super::constant::{APCI_MAX_LENGTH, APCI_MIN_LENGTH, APCI_SIZE, SEQUENCE_MODULO, START_BYTE};
use super::error::Error;
use super::frame::{read_receive_count, read_send_count, Frame, UFrameKind};
use super::params::ConnectionParameters;
use log::{debug, trace, warn};
use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// how often the reader wakes to run the timers when the peer is silent
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Lifecycle notifications delivered to the connection handler.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// the TCP connection is established
    Opened,
    /// the link is gone and the engine is back in its idle state
    Closed,
    /// the peer confirmed STARTDT; the link carries I-frames now
    StartDtConReceived,
    /// the peer confirmed STOPDT; the link fell back to the open state
    StopDtConReceived,
}

/// Receives every ASDU carried by an inbound I-frame.
pub type AsduHandler = Box<dyn FnMut(&Asdu) + Send>;

/// Receives connection lifecycle events.
pub type EventHandler = Box<dyn FnMut(ConnectionEvent) + Send>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Connecting,
    UnconfirmedOpen,
    Active,
    Closing,
}

struct SentFrame {
    count: u16,
    sent_at: Instant,
}

struct Link {
    phase: Phase,
    stream: Option<TcpStream>,
    send_count: u16,
    receive_count: u16,
    unconfirmed_received: u16,
    last_ack_time: Instant,
    last_frame_time: Instant,
    pending_acks: VecDeque<SentFrame>,
    /// a TESTFR_ACT is out, waiting on its confirmation
    test_pending: Option<Instant>,
    /// a STARTDT or STOPDT is out, waiting on its confirmation
    u_frame_pending: Option<Instant>,
    /// engine-built confirmations parked while `pending_acks` is at k;
    /// t1 on the oldest unacknowledged frame bounds how long they wait
    deferred_replies: VecDeque<Asdu>,
}

impl Link {
    fn new() -> Link {
        Link {
            phase: Phase::Idle,
            stream: None,
            send_count: 0,
            receive_count: 0,
            unconfirmed_received: 0,
            last_ack_time: Instant::now(),
            last_frame_time: Instant::now(),
            pending_acks: VecDeque::new(),
            test_pending: None,
            u_frame_pending: None,
            deferred_replies: VecDeque::new(),
        }
    }
}

struct Shared {
    params: ConnectionParameters,
    link: Mutex<Link>,
    ack_space: Condvar,
    asdu_handler: Mutex<Option<AsduHandler>>,
    event_handler: Mutex<Option<EventHandler>>,
}

impl Shared {
    fn lock_link(&self) -> Result<MutexGuard<Link>, Error> {
        self.link.lock().map_err(|_| Error::Lock)
    }
}

/// A cloneable sending handle, safe to capture inside handlers.
///
/// `send_asdu` blocks while the k window is full, so a handler using it
/// should keep its traffic light.
#[derive(Clone)]
pub struct ConnectionSender {
    shared: Arc<Shared>,
}

impl ConnectionSender {
    /// Sends one ASDU as an I-frame; see [`Connection::send_asdu`].
    pub fn send_asdu(&self, asdu: &Asdu) -> Result<(), Error> {
        send_asdu_blocking(&self.shared, asdu)
    }

    /// Whether the link is in its active state.
    pub fn is_running(&self) -> bool {
        match self.shared.link.lock() {
            Ok(link) => link.phase == Phase::Active,
            Err(_) => false,
        }
    }
}

/// One client connection to an outstation.
pub struct Connection {
    address: SocketAddr,
    shared: Arc<Shared>,
    reader: Option<JoinHandle<()>>,
}

impl Connection {
    /// Creates an idle connection; nothing happens until [`Connection::connect`].
    ///
    /// The parameters are cloned here and stay fixed for the life of the
    /// connection.
    pub fn new(address: SocketAddr, params: ConnectionParameters) -> Connection {
        Connection {
            address,
            shared: Arc::new(Shared {
                params,
                link: Mutex::new(Link::new()),
                ack_space: Condvar::new(),
                asdu_handler: Mutex::new(None),
                event_handler: Mutex::new(None),
            }),
            reader: None,
        }
    }

    pub fn params(&self) -> &ConnectionParameters {
        &self.shared.params
    }

    /// Registers the handler receiving every inbound ASDU.
    ///
    /// The handler runs on the reader thread. It may send through a
    /// [`ConnectionSender`] but must not call [`Connection::close`].
    pub fn set_asdu_handler<F>(&self, handler: F)
    where
        F: FnMut(&Asdu) + Send + 'static,
    {
        if let Ok(mut guard) = self.shared.asdu_handler.lock() {
            *guard = Some(Box::new(handler));
        }
    }

    /// Registers the handler receiving lifecycle events.
    pub fn set_connection_handler<F>(&self, handler: F)
    where
        F: FnMut(ConnectionEvent) + Send + 'static,
    {
        if let Ok(mut guard) = self.shared.event_handler.lock() {
            *guard = Some(Box::new(handler));
        }
    }

    /// A sending handle for use inside handlers.
    pub fn sender(&self) -> ConnectionSender {
        ConnectionSender {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Whether STARTDT has been confirmed and I-frames may flow.
    pub fn is_running(&self) -> bool {
        match self.shared.link.lock() {
            Ok(link) => link.phase == Phase::Active,
            Err(_) => false,
        }
    }

    /// Opens the TCP connection, honouring the t0 deadline.
    ///
    /// Blocks until the connection is open or failed. With `autostart` set
    /// the engine emits STARTDT_ACT right away; otherwise the link stays in
    /// the open, unconfirmed state until [`Connection::send_start_dt`].
    pub fn connect(&mut self) -> Result<(), Error> {
        self.shared.params.validate()?;
        {
            let mut link = self.shared.lock_link()?;
            match link.phase {
                Phase::Idle => link.phase = Phase::Connecting,
                Phase::Connecting => return Err(Error::AlreadyConnecting),
                _ => return Err(Error::AlreadyConnected),
            }
        }
        // collect the reader of a previous connect cycle
        if let Some(handle) = self.reader.take() {
            handle.join().ok();
        }

        let stream = match TcpStream::connect_timeout(&self.address, self.shared.params.t0) {
            Ok(stream) => stream,
            Err(e) => {
                self.shared.lock_link()?.phase = Phase::Idle;
                return Err(Error::from_connect(e));
            }
        };

        let result = self.attach(stream);
        if result.is_err() {
            let mut link = self.shared.lock_link()?;
            link.stream = None;
            link.phase = Phase::Idle;
        }
        result
    }

    fn attach(&mut self, stream: TcpStream) -> Result<(), Error> {
        stream.set_nodelay(true).ok();
        stream.set_read_timeout(Some(POLL_INTERVAL))?;
        let reader_stream = stream.try_clone()?;

        {
            let mut link = self.shared.lock_link()?;
            link.stream = Some(stream);
            link.phase = Phase::UnconfirmedOpen;
            link.send_count = 0;
            link.receive_count = 0;
            link.unconfirmed_received = 0;
            link.pending_acks.clear();
            link.test_pending = None;
            link.u_frame_pending = None;
            link.deferred_replies.clear();
            link.last_ack_time = Instant::now();
            link.last_frame_time = Instant::now();
        }

        let shared = Arc::clone(&self.shared);
        self.reader = Some(
            thread::Builder::new()
                .name("iec104-reader".to_string())
                .spawn(move || reader_loop(shared, reader_stream))?,
        );

        debug!("connected to {}", self.address);
        emit_event(&self.shared, ConnectionEvent::Opened);

        if self.shared.params.autostart {
            self.send_start_dt()?;
        }
        Ok(())
    }

    /// Emits STARTDT_ACT; the link turns active once the peer confirms.
    pub fn send_start_dt(&self) -> Result<(), Error> {
        let mut link = self.shared.lock_link()?;
        match link.phase {
            Phase::UnconfirmedOpen | Phase::Active => {}
            _ => return Err(Error::NotConnected),
        }
        write_link_frame(
            &self.shared.params,
            &mut link,
            Frame::u_frame(UFrameKind::StartDtAct).buffer(),
        )?;
        link.u_frame_pending = Some(Instant::now());
        Ok(())
    }

    /// Emits STOPDT_ACT; the peer's confirmation drops the link back to
    /// the open, unconfirmed state.
    pub fn send_stop_dt(&self) -> Result<(), Error> {
        let mut link = self.shared.lock_link()?;
        if link.phase != Phase::Active {
            return Err(Error::NotConnected);
        }
        write_link_frame(
            &self.shared.params,
            &mut link,
            Frame::u_frame(UFrameKind::StopDtAct).buffer(),
        )?;
        link.u_frame_pending = Some(Instant::now());
        Ok(())
    }

    /// Sends one ASDU as an I-frame.
    ///
    /// Legal only while the link is active. Blocks while `k` I-frames are
    /// unacknowledged, until the peer drains the window or the link dies.
    pub fn send_asdu(&self, asdu: &Asdu) -> Result<(), Error> {
        send_asdu_blocking(&self.shared, asdu)
    }

    /// Shuts the link down and waits for the reader to finish.
    ///
    /// Safe to call in any state. Must not be called from inside a
    /// handler; the reader cannot join itself.
    pub fn close(&mut self) {
        if let Ok(mut link) = self.shared.link.lock() {
            if link.phase == Phase::Idle {
                return;
            }
            link.phase = Phase::Closing;
            if let Some(stream) = &link.stream {
                stream.shutdown(Shutdown::Both).ok();
            }
            self.shared.ack_space.notify_all();
        }
        if let Some(handle) = self.reader.take() {
            handle.join().ok();
        }
        // no reader existed: finish the transition here
        let emit = match self.shared.link.lock() {
            Ok(mut link) => {
                if link.phase == Phase::Idle {
                    false
                } else {
                    link.stream = None;
                    link.pending_acks.clear();
                    link.phase = Phase::Idle;
                    true
                }
            }
            Err(_) => false,
        };
        if emit {
            emit_event(&self.shared, ConnectionEvent::Closed);
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}

fn send_asdu_blocking(shared: &Arc<Shared>, asdu: &Asdu) -> Result<(), Error> {
    let mut frame = Frame::new();
    asdu.encode(&mut frame)?;

    let mut link = shared.lock_link()?;
    loop {
        if link.phase != Phase::Active {
            return Err(Error::NotConnected);
        }
        if link.pending_acks.len() < shared.params.k as usize {
            break;
        }
        let (guard, _) = shared
            .ack_space
            .wait_timeout(link, POLL_INTERVAL)
            .map_err(|_| Error::Lock)?;
        link = guard;
    }
    transmit_i_frame(shared, &mut link, &mut frame)
}

/// Stamps the counts, writes the frame and books the pending ack.
fn transmit_i_frame(
    shared: &Shared,
    link: &mut Link,
    frame: &mut Frame,
) -> Result<(), Error> {
    frame.prepare_to_send(link.send_count, link.receive_count)?;
    write_link_frame(&shared.params, link, frame.buffer())?;
    link.pending_acks.push_back(SentFrame {
        count: link.send_count,
        sent_at: Instant::now(),
    });
    link.send_count = (link.send_count + 1) % SEQUENCE_MODULO;
    // the I-frame carries NR, a piggyback acknowledgement
    link.unconfirmed_received = 0;
    link.last_ack_time = Instant::now();
    Ok(())
}

fn write_link_frame(
    params: &ConnectionParameters,
    link: &mut Link,
    bytes: &[u8],
) -> Result<(), Error> {
    if params.debug_output {
        trace!("TX {:02X?}", bytes);
    }
    let stream = link.stream.as_mut().ok_or(Error::NotConnected)?;
    stream.write_all(bytes)?;
    link.last_frame_time = Instant::now();
    Ok(())
}

fn send_s_frame(shared: &Shared, link: &mut Link) -> Result<(), Error> {
    let frame = Frame::s_frame(link.receive_count);
    write_link_frame(&shared.params, link, frame.buffer())?;
    link.unconfirmed_received = 0;
    link.last_ack_time = Instant::now();
    Ok(())
}

/// Drops every pending ack the peer's NR covers.
fn confirm_up_to(shared: &Shared, link: &mut Link, receive_count: u16) {
    let mut confirmed = false;
    while let Some(front) = link.pending_acks.front() {
        let distance = (receive_count + SEQUENCE_MODULO - front.count) % SEQUENCE_MODULO;
        if distance >= 1 && distance <= shared.params.k {
            link.pending_acks.pop_front();
            confirmed = true;
        } else {
            break;
        }
    }
    if confirmed {
        shared.ack_space.notify_all();
    }
}

fn emit_event(shared: &Arc<Shared>, event: ConnectionEvent) {
    debug!("connection event {:?}", event);
    if let Ok(mut guard) = shared.event_handler.lock() {
        if let Some(handler) = guard.as_mut() {
            handler(event);
        }
    }
}

fn reader_loop(shared: Arc<Shared>, mut stream: TcpStream) {
    let mut buffer = [0u8; 1024];
    let mut pending: Vec<u8> = Vec::new();

    let reason = loop {
        match shared.link.lock() {
            Ok(link) => {
                if link.phase == Phase::Closing || link.phase == Phase::Idle {
                    break None;
                }
            }
            Err(_) => break Some(Error::Lock),
        }

        match stream.read(&mut buffer) {
            Ok(0) => break Some(Error::IOError(ErrorKind::UnexpectedEof)),
            Ok(n) => {
                pending.extend_from_slice(&buffer[..n]);
                if let Err(e) = drain_frames(&shared, &mut pending) {
                    break Some(e);
                }
                if let Err(e) = check_timers(&shared) {
                    break Some(e);
                }
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                if let Err(e) = check_timers(&shared) {
                    break Some(e);
                }
            }
            Err(e) => break Some(Error::IOError(e.kind())),
        }
    };

    cleanup(&shared, reason);
}

/// Consumes every complete frame buffered so far.
///
/// Partial frames stay in `pending` until the missing octets arrive; the
/// length-prefixed layout never relies on one read returning one frame.
fn drain_frames(shared: &Arc<Shared>, pending: &mut Vec<u8>) -> Result<(), Error> {
    loop {
        if pending.len() < 2 {
            return Ok(());
        }
        if pending[0] != START_BYTE {
            return Err(Error::Framing(format!(
                "bad start octet 0x{:02X}",
                pending[0]
            )));
        }
        let length = pending[1] as usize;
        if length < APCI_MIN_LENGTH as usize || length > APCI_MAX_LENGTH as usize {
            return Err(Error::Framing(format!("impossible APCI length {}", length)));
        }
        if pending.len() < length + 2 {
            return Ok(());
        }
        let frame: Vec<u8> = pending.drain(..length + 2).collect();
        handle_frame(shared, &frame)?;
    }
}

fn handle_frame(shared: &Arc<Shared>, frame: &[u8]) -> Result<(), Error> {
    if shared.params.debug_output {
        trace!("RX {:02X?}", frame);
    }
    let control = &frame[2..6];
    if control[0] & 0x01 == 0 {
        handle_i_frame(shared, frame)
    } else if control[0] & 0x03 == 0x01 {
        handle_s_frame(shared, control)
    } else {
        handle_u_frame(shared, control)
    }
}

fn handle_i_frame(shared: &Arc<Shared>, frame: &[u8]) -> Result<(), Error> {
    if frame.len() < APCI_SIZE + 1 {
        return Err(Error::Framing("I-frame shorter than 7 octets".to_string()));
    }
    let control = &frame[2..6];
    if shared.params.debug_output {
        trace!(
            "I-frame NS={} NR={}",
            read_send_count(control),
            read_receive_count(control)
        );
    }
    {
        let mut link = shared.lock_link()?;
        link.receive_count = (link.receive_count + 1) % SEQUENCE_MODULO;
        link.unconfirmed_received += 1;
        link.last_frame_time = Instant::now();
        confirm_up_to(shared, &mut link, read_receive_count(control));
        flush_deferred_replies(shared, &mut link);
    }

    let asdu = Asdu::decode(&shared.params, &frame[APCI_SIZE..])?;

    // a test command in the activation direction is confirmed by the
    // engine itself; the handler still sees it
    if asdu.type_code() == TypeId::TestCommandCp56 as u8
        && asdu.raw_cause() == Cot::Activation as u8
    {
        let mut reply = asdu.clone();
        reply.set_cause(Cot::ActivationCon);
        if let Err(e) = confirm_test_command(shared, reply) {
            warn!("test command confirmation failed: {}", e);
        }
    }

    match shared.asdu_handler.lock() {
        Ok(mut guard) => {
            if let Some(handler) = guard.as_mut() {
                handler(&asdu);
            }
        }
        Err(_) => return Err(Error::Lock),
    }

    let mut link = shared.lock_link()?;
    if link.unconfirmed_received >= shared.params.w
        || (link.unconfirmed_received > 0 && link.last_ack_time.elapsed() >= shared.params.t2)
    {
        send_s_frame(shared, &mut link)?;
    }
    Ok(())
}

/// Engine-internal I-frame send for the test command confirmation.
///
/// The reader is the only thread that drains the ack condvar, so it can
/// never wait on window space. With `pending_acks` at k the confirmation
/// is parked instead and goes out from [`flush_deferred_replies`] once the
/// peer's next acknowledgement frees a slot; `|pending_acks| <= k` holds
/// on this path too.
fn confirm_test_command(shared: &Arc<Shared>, reply: Asdu) -> Result<(), Error> {
    let mut link = shared.lock_link()?;
    if link.phase != Phase::Active {
        return Err(Error::NotConnected);
    }
    if link.pending_acks.len() >= shared.params.k as usize {
        debug!("send window full, deferring test command confirmation");
        link.deferred_replies.push_back(reply);
        return Ok(());
    }
    let mut frame = Frame::new();
    reply.encode(&mut frame)?;
    transmit_i_frame(shared, &mut link, &mut frame)
}

/// Transmits parked confirmations while the window has space.
fn flush_deferred_replies(shared: &Shared, link: &mut Link) {
    while link.phase == Phase::Active
        && link.pending_acks.len() < shared.params.k as usize
    {
        let reply = match link.deferred_replies.pop_front() {
            Some(reply) => reply,
            None => break,
        };
        let mut frame = Frame::new();
        if let Err(e) = reply.encode(&mut frame) {
            warn!("deferred test command confirmation dropped: {}", e);
            continue;
        }
        if let Err(e) = transmit_i_frame(shared, link, &mut frame) {
            warn!("deferred test command confirmation failed: {}", e);
            break;
        }
    }
}

fn handle_s_frame(shared: &Arc<Shared>, control: &[u8]) -> Result<(), Error> {
    let mut link = shared.lock_link()?;
    link.last_frame_time = Instant::now();
    confirm_up_to(shared, &mut link, read_receive_count(control));
    flush_deferred_replies(shared, &mut link);
    Ok(())
}

fn handle_u_frame(shared: &Arc<Shared>, control: &[u8]) -> Result<(), Error> {
    if control[1] != 0 || control[2] != 0 || control[3] != 0 {
        return Err(Error::Framing(
            "U-frame with non-zero trailing control octets".to_string(),
        ));
    }
    let kind = UFrameKind::from_control_byte(control[0])?;
    debug!("U-frame {:?} received", kind);

    match kind {
        UFrameKind::StartDtAct => {
            let mut link = shared.lock_link()?;
            link.last_frame_time = Instant::now();
            write_link_frame(
                &shared.params,
                &mut link,
                Frame::u_frame(UFrameKind::StartDtCon).buffer(),
            )?;
        }
        UFrameKind::StartDtCon => {
            {
                let mut link = shared.lock_link()?;
                link.phase = Phase::Active;
                link.u_frame_pending = None;
                link.last_frame_time = Instant::now();
            }
            shared.ack_space.notify_all();
            emit_event(shared, ConnectionEvent::StartDtConReceived);
        }
        UFrameKind::StopDtAct => {
            let mut link = shared.lock_link()?;
            link.last_frame_time = Instant::now();
            // confirm received I-frames before the transfer stops
            if link.unconfirmed_received > 0 {
                send_s_frame(shared, &mut link)?;
            }
            write_link_frame(
                &shared.params,
                &mut link,
                Frame::u_frame(UFrameKind::StopDtCon).buffer(),
            )?;
        }
        UFrameKind::StopDtCon => {
            {
                let mut link = shared.lock_link()?;
                link.phase = Phase::UnconfirmedOpen;
                link.u_frame_pending = None;
                link.last_frame_time = Instant::now();
            }
            shared.ack_space.notify_all();
            emit_event(shared, ConnectionEvent::StopDtConReceived);
        }
        UFrameKind::TestFrAct => {
            let mut link = shared.lock_link()?;
            link.last_frame_time = Instant::now();
            write_link_frame(
                &shared.params,
                &mut link,
                Frame::u_frame(UFrameKind::TestFrCon).buffer(),
            )?;
        }
        UFrameKind::TestFrCon => {
            let mut link = shared.lock_link()?;
            link.test_pending = None;
            link.last_frame_time = Instant::now();
        }
    }
    Ok(())
}

/// t1/t2/t3 bookkeeping, run on every reader wakeup.
fn check_timers(shared: &Arc<Shared>) -> Result<(), Error> {
    let mut link = shared.lock_link()?;
    if link.phase != Phase::Active && link.phase != Phase::UnconfirmedOpen {
        return Ok(());
    }
    let now = Instant::now();
    let t1 = shared.params.t1;

    if let Some(front) = link.pending_acks.front() {
        if now.duration_since(front.sent_at) >= t1 {
            return Err(Error::ProtocolTimeout);
        }
    }
    if let Some(sent_at) = link.u_frame_pending {
        if now.duration_since(sent_at) >= t1 {
            return Err(Error::ProtocolTimeout);
        }
    }
    if let Some(sent_at) = link.test_pending {
        if now.duration_since(sent_at) >= t1 {
            return Err(Error::ProtocolTimeout);
        }
    }

    if link.unconfirmed_received > 0
        && now.duration_since(link.last_ack_time) >= shared.params.t2
    {
        send_s_frame(shared, &mut link)?;
    }

    if now.duration_since(link.last_frame_time) >= shared.params.t3 && link.test_pending.is_none()
    {
        write_link_frame(
            &shared.params,
            &mut link,
            Frame::u_frame(UFrameKind::TestFrAct).buffer(),
        )?;
        link.test_pending = Some(now);
    }
    Ok(())
}

/// The single exit path: whatever killed the link, the endpoint is
/// released and the engine returns to idle.
fn cleanup(shared: &Arc<Shared>, reason: Option<Error>) {
    match &reason {
        Some(e) => warn!("link closed: {}", e),
        None => debug!("link closed"),
    }
    {
        let mut link = match shared.link.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(stream) = &link.stream {
            stream.shutdown(Shutdown::Both).ok();
        }
        link.stream = None;
        link.pending_acks.clear();
        link.unconfirmed_received = 0;
        link.test_pending = None;
        link.u_frame_pending = None;
        link.deferred_replies.clear();
        link.phase = Phase::Idle;
    }
    shared.ack_space.notify_all();
    emit_event(shared, ConnectionEvent::Closed);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> Shared {
        Shared {
            params: ConnectionParameters::default(),
            link: Mutex::new(Link::new()),
            ack_space: Condvar::new(),
            asdu_handler: Mutex::new(None),
            event_handler: Mutex::new(None),
        }
    }

    fn pending(counts: &[u16]) -> VecDeque<SentFrame> {
        counts
            .iter()
            .map(|count| SentFrame {
                count: *count,
                sent_at: Instant::now(),
            })
            .collect()
    }

    #[test]
    fn test_confirm_drops_acknowledged_frames() {
        let shared = shared();
        let mut link = Link::new();
        link.pending_acks = pending(&[4, 5, 6]);

        // NR=6 confirms frames 4 and 5
        confirm_up_to(&shared, &mut link, 6);
        assert_eq!(link.pending_acks.len(), 1);
        assert_eq!(link.pending_acks.front().unwrap().count, 6);

        confirm_up_to(&shared, &mut link, 7);
        assert!(link.pending_acks.is_empty());
    }

    #[test]
    fn test_confirm_handles_wraparound() {
        let shared = shared();
        let mut link = Link::new();
        link.pending_acks = pending(&[32766, 32767, 0]);

        confirm_up_to(&shared, &mut link, 1);
        assert!(link.pending_acks.is_empty());
    }

    #[test]
    fn test_confirm_ignores_stale_count() {
        let shared = shared();
        let mut link = Link::new();
        link.pending_acks = pending(&[100]);

        // NR equal to the pending count acknowledges nothing
        confirm_up_to(&shared, &mut link, 100);
        assert_eq!(link.pending_acks.len(), 1);
    }
}
