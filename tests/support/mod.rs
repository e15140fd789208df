use futures_util::StreamExt;
use std::{
    net::TcpListener,
    process::Command,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::{TcpStream, tcp::OwnedReadHalf, tcp::OwnedWriteHalf};
use tokio::time::sleep;

// -----------------------------------------------------------------------------
// ----- Fake upstream ---------------------------------------------------------

/// A WebSocket server that only counts completed handshakes and keeps every
/// connection open until the peer leaves.
#[allow(dead_code)]
pub struct FakeUpstream {
    pub url: String,
    handshakes: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl FakeUpstream {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake upstream");
        let addr = listener.local_addr().unwrap();
        let handshakes = Arc::new(AtomicUsize::new(0));

        let counter = handshakes.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let counter = counter.clone();
                tokio::spawn(async move {
                    let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else {
                        return;
                    };
                    counter.fetch_add(1, Ordering::SeqCst);
                    while let Some(Ok(_)) = ws.next().await {}
                });
            }
        });

        Self {
            url: format!("ws://{addr}/wschat/1"),
            handshakes,
        }
    }

    pub fn handshakes(&self) -> usize {
        self.handshakes.load(Ordering::SeqCst)
    }

    /// Waits until at least `n` handshakes happened, then gives stragglers a
    /// moment so an extra connection would be noticed.
    pub async fn settle_at(&self, n: usize) -> usize {
        for _ in 0..100 {
            if self.handshakes() >= n {
                break;
            }
            sleep(Duration::from_millis(20)).await;
        }
        sleep(Duration::from_millis(100)).await;
        self.handshakes()
    }
}

// -----------------------------------------------------------------------------
// ----- Line client -----------------------------------------------------------

#[allow(dead_code)]
pub struct LineClient {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

#[allow(dead_code)]
impl LineClient {
    pub async fn connect(host: &str, port: u16) -> Self {
        let stream = TcpStream::connect((host, port))
            .await
            .expect("connect to wsgate");
        let (reader, writer) = stream.into_split();

        Self {
            lines: BufReader::new(reader).lines(),
            writer,
        }
    }

    pub async fn send(&mut self, line: &str) {
        self.writer
            .write_all(format!("{line}\n").as_bytes())
            .await
            .expect("write line");
    }

    pub async fn recv(&mut self) -> String {
        tokio::time::timeout(Duration::from_secs(5), self.lines.next_line())
            .await
            .expect("reply timed out")
            .expect("read reply")
            .expect("connection closed before reply")
    }

    pub async fn request(&mut self, line: &str) -> String {
        self.send(line).await;
        self.recv().await
    }
}

// -----------------------------------------------------------------------------
// ----- Process helpers -------------------------------------------------------

#[allow(dead_code)]
pub fn reserve_port(host: &str) -> u16 {
    let addr = format!("{host}:0");
    let listener = TcpListener::bind(&addr).expect("bind ephemeral port");
    listener.local_addr().unwrap().port()
}

#[allow(dead_code)]
pub fn spawn_wsgate(host: &str, port: u16, endpoint: &str) -> std::process::Child {
    let exe = env!("CARGO_BIN_EXE_wsgate");

    Command::new(exe)
        .env("WSGATE_HOST", host)
        .env("WSGATE_PORT", port.to_string())
        .env("WSGATE_ENDPOINT", endpoint)
        .env("WSGATE_LOG", "warn")
        .env_remove("WSGATE_CONFIG_FILE")
        .spawn()
        .expect("spawn wsgate")
}

#[allow(dead_code)]
pub async fn wait_for_listen(host: &str, port: u16) {
    let addr = format!("{host}:{port}");
    for _ in 0..100 {
        if std::net::TcpStream::connect(&addr).is_ok() {
            return;
        }
        sleep(Duration::from_millis(50)).await;
    }
    panic!("wsgate did not start listening on {addr}");
}
