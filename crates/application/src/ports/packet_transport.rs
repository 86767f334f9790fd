use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use schedule_dns_domain::{CapturedPacket, DomainError, LinkAddress};
use std::sync::Arc;
use tracing::warn;

#[async_trait]
pub trait PacketTransport: Send + Sync {
    /// Waits for the next network-layer packet seen on the capture interface.
    async fn receive(&self) -> Result<CapturedPacket, DomainError>;

    /// Sends every frame of one response back through `link`.
    ///
    /// Frames of a single call are never interleaved with frames of another.
    async fn send(&self, frames: &[Vec<u8>], link: &LinkAddress) -> Result<(), DomainError>;
}

/// Turns a transport into an endless stream of captured packets.
///
/// Receive errors are logged and skipped; the stream only ends once the
/// transport reports [`DomainError::TransportClosed`]. The stream owns the
/// transport handle and cannot be restarted.
pub fn packet_stream(transport: Arc<dyn PacketTransport>) -> BoxStream<'static, CapturedPacket> {
    stream::unfold(transport, |transport| async move {
        loop {
            match transport.receive().await {
                Ok(packet) => return Some((packet, transport)),
                Err(DomainError::TransportClosed) => return None,
                Err(e) => warn!(error = %e, "Packet capture failed"),
            }
        }
    })
    .boxed()
}
