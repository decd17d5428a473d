use crate::payloads::{Event, Frame, Hello, IdentifyData, Opcode, Payload};
use crate::{CloseEvent, GatewayError, GuildSet, Result};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::value::RawValue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot, Mutex, RwLock};
use tokio::time::sleep;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

type WebSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WebSocketTx = SplitSink<WebSocket, Message>;
type WebSocketRx = SplitStream<WebSocket>;

/// A serialized frame, and where to report whether it was written.
type WriteRequest = (String, oneshot::Sender<std::result::Result<(), tungstenite::Error>>);

pub const DEFAULT_GATEWAY_URL: &str = "wss://gateway.discord.gg/?v=10&encoding=json";

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// A single gateway connection. Dispatches are forwarded to `event_tx`; the shard keeps no state
/// beyond what it needs to stay connected and the set of guilds it has been told about.
pub struct Shard {
    identify: Frame<IdentifyData>,
    gateway_url: Box<str>,
    guilds: Arc<GuildSet>,
    event_tx: mpsc::Sender<Event>,
    seq: RwLock<Option<u64>>,
    writer: RwLock<Option<mpsc::Sender<WriteRequest>>>,
    kill_heartbeat: Mutex<Option<oneshot::Sender<()>>>,
    heartbeat_acked: AtomicBool,
    kill_shard_tx: mpsc::Sender<()>,
    kill_shard_rx: Mutex<mpsc::Receiver<()>>,
}

impl Shard {
    pub fn new(
        token: String,
        intents: u64,
        gateway_url: impl Into<Box<str>>,
        guilds: Arc<GuildSet>,
        event_tx: mpsc::Sender<Event>,
    ) -> Arc<Shard> {
        let (kill_shard_tx, kill_shard_rx) = mpsc::channel(1);

        Arc::new(Shard {
            identify: Frame::identify(token, intents),
            gateway_url: gateway_url.into(),
            guilds,
            event_tx,
            seq: RwLock::new(None),
            writer: RwLock::new(None),
            kill_heartbeat: Mutex::new(None),
            heartbeat_acked: AtomicBool::new(true),
            kill_shard_tx,
            kill_shard_rx: Mutex::new(kill_shard_rx),
        })
    }

    /// Keeps the shard connected until the gateway closes with a fatal code, or the event receiver
    /// is dropped.
    pub async fn run(self: Arc<Self>) -> Result<()> {
        loop {
            match Arc::clone(&self).connect().await {
                Ok(Some(close)) if !close.should_reconnect() => {
                    self.stop_heartbeat().await;
                    return GatewayError::Fatal(close).into();
                }
                Ok(_) => info!("Gateway connection closed, reconnecting"),
                Err(GatewayError::EventReceiverClosed) => {
                    self.stop_heartbeat().await;
                    return Ok(());
                }
                Err(e) => error!(error = %e, "Gateway connection failed, reconnecting"),
            }

            self.stop_heartbeat().await;
            *self.writer.write().await = None;

            sleep(RECONNECT_DELAY).await;
        }
    }

    async fn connect(self: Arc<Self>) -> Result<Option<CloseEvent>> {
        let (wss, _) = connect_async(&*self.gateway_url).await?;
        let (ws_tx, ws_rx) = wss.split();

        // start writer
        let (writer_tx, writer_rx) = mpsc::channel(16);
        tokio::spawn(Shard::handle_writes(ws_tx, writer_rx));
        *self.writer.write().await = Some(writer_tx);

        self.listen(ws_rx).await
    }

    async fn handle_writes(mut ws_tx: WebSocketTx, mut rx: mpsc::Receiver<WriteRequest>) {
        while let Some((text, result_tx)) = rx.recv().await {
            let res = ws_tx.send(Message::Text(text)).await;

            if result_tx.send(res).is_err() {
                debug!("Caller stopped waiting for write result");
            }
        }
    }

    async fn write<T: Serialize>(&self, msg: T) -> Result<()> {
        let writer = self
            .writer
            .read()
            .await
            .clone()
            .ok_or(GatewayError::NotConnected)?;

        let text = serde_json::to_string(&msg)?;
        let (result_tx, result_rx) = oneshot::channel();

        writer
            .send((text, result_tx))
            .await
            .map_err(|_| GatewayError::WriterClosed)?;

        result_rx.await??;
        Ok(())
    }

    fn kill(&self) {
        // a full channel means a kill is already pending
        if self.kill_shard_tx.try_send(()).is_err() {
            debug!("Kill already pending");
        }
    }

    async fn listen(self: Arc<Self>, mut ws_rx: WebSocketRx) -> Result<Option<CloseEvent>> {
        let mut kill_rx = self.kill_shard_rx.lock().await;

        // discard kills aimed at the previous connection
        while kill_rx.try_recv().is_ok() {}

        loop {
            tokio::select! {
                _ = kill_rx.recv() => {
                    info!("Received kill message");
                    return Ok(None);
                }

                payload = ws_rx.next() => {
                    match payload {
                        None => {
                            warn!("Websocket stream ended");
                            return Ok(None);
                        }

                        Some(Err(e)) => return Err(e.into()),

                        Some(Ok(Message::Close(frame))) => {
                            let close = frame.map(|frame| CloseEvent::new(frame.code.into(), frame.reason.to_string()));
                            warn!(?close, "Got close from gateway");
                            return Ok(close);
                        }

                        Some(Ok(Message::Text(data))) => {
                            match Arc::clone(&self).process_payload(&data).await {
                                Err(GatewayError::EventReceiverClosed) => return Err(GatewayError::EventReceiverClosed),
                                Err(e) => error!(error = %e, "An error occurred while processing a payload"),
                                Ok(()) => {}
                            }
                        }

                        _ => {}
                    }
                }
            }
        }
    }

    async fn process_payload(self: Arc<Self>, raw: &str) -> Result<()> {
        let payload: Payload = serde_json::from_str(raw)?;

        if let Some(seq) = payload.seq {
            *self.seq.write().await = Some(seq);
        }

        match payload.opcode {
            Opcode::Dispatch => {
                let event_name = payload
                    .event_name
                    .as_deref()
                    .ok_or(GatewayError::MissingEventData("t"))?;

                if let Some(event) = Event::parse(event_name, payload.data.as_deref())? {
                    self.handle_event(event).await?;
                }
            }

            Opcode::Heartbeat => self.do_heartbeat().await?,

            Opcode::Reconnect => {
                info!("Received reconnect payload from Discord");
                self.kill();
            }

            Opcode::InvalidSession => {
                warn!("Received invalid session payload from Discord");
                *self.seq.write().await = None;
                self.kill();
            }

            Opcode::Hello => {
                let data = payload
                    .data
                    .as_deref()
                    .map(RawValue::get)
                    .ok_or(GatewayError::MissingEventData("d"))?;

                let hello: Hello = serde_json::from_str(data)?;
                let interval = Duration::from_millis(hello.heartbeat_interval);

                // sessions are never resumed, so every connection starts from scratch
                *self.seq.write().await = None;

                if let Err(e) = self.do_identify().await {
                    error!(error = %e, "Error identifying, killing");
                    self.kill();
                    return Err(e);
                }

                info!("Identified");
                Arc::clone(&self).start_heartbeat(interval).await;
            }

            Opcode::HeartbeatAck => self.heartbeat_acked.store(true, Ordering::Relaxed),

            _ => {}
        }

        Ok(())
    }

    async fn handle_event(&self, event: Event) -> Result<()> {
        match &event {
            Event::Ready(ready) => self.guilds.reset(&ready.guilds),
            Event::GuildCreate(guild) => self.guilds.insert(guild),
            Event::GuildDelete(guild) => self.guilds.remove(guild),
            _ => {}
        }

        self.event_tx
            .send(event)
            .await
            .map_err(|_| GatewayError::EventReceiverClosed)
    }

    async fn start_heartbeat(self: Arc<Self>, interval: Duration) {
        self.stop_heartbeat().await;

        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        self.heartbeat_acked.store(true, Ordering::Relaxed);

        let shard = Arc::clone(&self);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut cancel_rx => break,
                    _ = sleep(interval) => {}
                }

                if !shard.heartbeat_acked.swap(false, Ordering::Relaxed) {
                    warn!("Hasn't received heartbeat ack, killing");
                    shard.kill();
                    break;
                }

                if let Err(e) = shard.do_heartbeat().await {
                    error!(error = %e, "Error sending heartbeat, killing");
                    shard.kill();
                    break;
                }
            }
        });

        *self.kill_heartbeat.lock().await = Some(cancel_tx);
    }

    async fn stop_heartbeat(&self) {
        if let Some(cancel_tx) = self.kill_heartbeat.lock().await.take() {
            // the task may have already exited after killing the shard
            let _ = cancel_tx.send(());
        }
    }

    async fn do_heartbeat(&self) -> Result<()> {
        let seq = *self.seq.read().await;
        self.write(Frame::heartbeat(seq)).await
    }

    async fn do_identify(&self) -> Result<()> {
        self.write(&self.identify).await
    }
}
