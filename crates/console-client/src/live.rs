use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use vigil_console_interface::{ConsoleEvent, ControlMessage};

use crate::{ConsoleClient, Error};

/// Inbound events are buffered up to this depth before the read task applies
/// backpressure to the transport.
const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, WsMessage>;

enum LoopAction {
    Continue,
    Break,
}

/// One live subscription to the event channel.
///
/// Events come out of the paired receiver in transport order. Teardown is
/// unconditional: dropping the handle when the consuming view goes away
/// cancels the read task and closes the receiver, so no handler can mutate
/// state after unmount. [`stop`](Subscription::stop) does the same and also
/// waits for the task to finish.
pub struct Subscription {
    cancel: CancellationToken,
    state: watch::Receiver<ConnectionState>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Watch connection-state transitions; useful for a status indicator.
    pub fn state_watch(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    /// Tear the subscription down and wait for the read task to finish.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl ConsoleClient {
    /// Connect and start demultiplexing channel events.
    ///
    /// Returns the subscription handle and the ordered event stream. The
    /// client performs no reconnection: when the transport drops, the read
    /// task logs, flips the state to `Disconnected`, and closes the stream.
    /// The console then freezes on its last state until the owner
    /// resubscribes.
    pub async fn subscribe(
        &self,
    ) -> Result<(Subscription, mpsc::Receiver<ConsoleEvent>), Error> {
        let request = self.build_request()?;
        let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);

        tracing::debug!(endpoint = %self.endpoint(), "channel_connecting");
        let (stream, _response) = tokio_tungstenite::connect_async(request).await?;
        state_tx.send_replace(ConnectionState::Connected);
        tracing::info!(endpoint = %self.endpoint(), "channel_connected");

        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(read_loop(
            stream,
            event_tx,
            state_tx,
            cancel.clone(),
            self.keep_alive(),
        ));

        Ok((
            Subscription {
                cancel,
                state: state_rx,
                task: Some(task),
            },
            event_rx,
        ))
    }
}

async fn read_loop(
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    events: mpsc::Sender<ConsoleEvent>,
    state: watch::Sender<ConnectionState>,
    cancel: CancellationToken,
    keep_alive: Option<Duration>,
) {
    let (mut sink, mut source) = stream.split();

    let mut keep_alive = keep_alive.map(|period| {
        tokio::time::interval_at(tokio::time::Instant::now() + period, period)
    });

    loop {
        let action = tokio::select! {
            _ = cancel.cancelled() => {
                farewell(&mut sink).await;
                tracing::info!("subscription_cancelled");
                LoopAction::Break
            }
            _ = keep_alive_tick(&mut keep_alive) => {
                match sink.send(control_frame(&ControlMessage::KeepAlive)).await {
                    Ok(()) => LoopAction::Continue,
                    Err(error) => {
                        tracing::warn!(%error, "keep_alive_send_failed");
                        LoopAction::Break
                    }
                }
            }
            message = source.next() => handle_channel_message(message, &events).await,
        };

        if matches!(action, LoopAction::Break) {
            break;
        }
    }

    state.send_replace(ConnectionState::Disconnected);
}

async fn handle_channel_message(
    message: Option<Result<WsMessage, tokio_tungstenite::tungstenite::Error>>,
    events: &mpsc::Sender<ConsoleEvent>,
) -> LoopAction {
    let Some(message) = message else {
        tracing::info!("channel_stream_ended");
        return LoopAction::Break;
    };

    let message = match message {
        Ok(message) => message,
        Err(error) => {
            tracing::warn!(%error, "channel_receive_error");
            return LoopAction::Break;
        }
    };

    match message {
        WsMessage::Text(raw) => match serde_json::from_str::<ConsoleEvent>(raw.as_str()) {
            Ok(event) => {
                if events.send(event).await.is_err() {
                    tracing::debug!("event_receiver_dropped");
                    return LoopAction::Break;
                }
                LoopAction::Continue
            }
            Err(error) => {
                // Unknown tags and malformed payloads are skipped, not fatal.
                tracing::warn!(%error, "event_decode_failed");
                LoopAction::Continue
            }
        },
        WsMessage::Close(_) => {
            tracing::info!("channel_closed_by_peer");
            LoopAction::Break
        }
        _ => LoopAction::Continue,
    }
}

async fn keep_alive_tick(keep_alive: &mut Option<tokio::time::Interval>) {
    match keep_alive {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn farewell(sink: &mut WsSink) {
    if let Err(error) = sink.send(control_frame(&ControlMessage::CloseStream)).await {
        tracing::debug!(%error, "close_stream_send_failed");
    }
    let _ = sink.close().await;
}

fn control_frame(message: &ControlMessage) -> WsMessage {
    WsMessage::Text(serde_json::to_string(message).unwrap().into())
}
