use bytes::Bytes;
use std::sync::Arc;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf},
    sync::mpsc,
};
use tracing::{debug, warn};

use crate::GateError;
use crate::gate::ConnectionGate;
use crate::shared_types::PortId;
use crate::wire::LineDecoder;

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

const READ_CAPACITY_HINT: usize = 1024;

// -----------------------------------------------------------------------------
// ----- Port ------------------------------------------------------------------

/// One client's channel to the gate. Reads lines, hands them to the gate and
/// queues replies on a dedicated writer task so a slow client never holds the
/// read loop.
#[derive(Debug)]
pub struct Port<S> {
    id: PortId,
    reader: ReadHalf<S>,
    decoder: LineDecoder,
    outbox: mpsc::UnboundedSender<Bytes>,
}

// -----------------------------------------------------------------------------
// ----- Port: Static ----------------------------------------------------------

impl<S> Port<S>
where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    pub fn new(id: PortId, stream: S, max_frame_len: usize) -> Self {
        let (reader, writer) = tokio::io::split(stream);

        let (outbox_tx, outbox_rx) = mpsc::unbounded_channel::<Bytes>();
        spawn_writer_task(id, writer, outbox_rx);

        Self {
            id,
            reader,
            decoder: LineDecoder::new(max_frame_len),
            outbox: outbox_tx,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Port: Public ----------------------------------------------------------

impl<S> Port<S>
where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    pub fn id(&self) -> PortId {
        self.id
    }

    /// Begins receiving. Runs until the client goes away; errors end this port only.
    pub async fn start(self, gate: Arc<ConnectionGate>) {
        let id = self.id;
        debug!("port {id} attached");

        match self.serve(&gate).await {
            Ok(()) => debug!("port {id} detached"),
            Err(e) => warn!("port {id} error: {e}"),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Port: Private ---------------------------------------------------------

impl<S> Port<S>
where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    async fn serve(mut self, gate: &ConnectionGate) -> Result<(), GateError> {
        loop {
            let inbox = self.decoder.inbox_mut();
            inbox.reserve(READ_CAPACITY_HINT);

            let n = self.reader.read_buf(inbox).await?;
            if n == 0 {
                break;
            }

            while let Some(frame) = self.decoder.next_frame()? {
                let Some(reply) = gate.handle_message(self.id, &frame) else {
                    continue;
                };

                if self.outbox.send(reply.to_line()).is_err() {
                    // writer is gone, the client cannot hear us anymore
                    return Ok(());
                }
            }
        }

        if self.decoder.pending() > 0 {
            debug!(
                "port {}: dropping {} bytes of unterminated input",
                self.id,
                self.decoder.pending()
            );
        }

        Ok(())
    }
}

// -----------------------------------------------------------------------------
// ----- Internal: Helpers -----------------------------------------------------

fn spawn_writer_task<S>(
    id: PortId,
    mut writer: WriteHalf<S>,
    mut rx: mpsc::UnboundedReceiver<Bytes>,
) where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    tokio::spawn(async move {
        'outer: while let Some(mut buf) = rx.recv().await {
            if let Err(e) = writer.write_all_buf(&mut buf).await {
                debug!("port {id}: write failed: {e}");
                break;
            }

            // coalesce bursts to cut syscalls
            while let Ok(mut more) = rx.try_recv() {
                if let Err(e) = writer.write_all_buf(&mut more).await {
                    debug!("port {id}: write failed: {e}");
                    break 'outer;
                }
            }

            if writer.flush().await.is_err() {
                break;
            }
        }

        let _ = writer.shutdown().await;
    });
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
