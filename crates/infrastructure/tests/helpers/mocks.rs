use async_trait::async_trait;
use schedule_dns_application::ports::PacketTransport;
use schedule_dns_domain::{CapturedPacket, DomainError, LinkAddress};
use std::sync::Mutex;

/// Records every send; never yields packets.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(Vec<Vec<u8>>, LinkAddress)>>,
    fail_with: Option<DomainError>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(error),
        }
    }

    pub fn sent(&self) -> Vec<(Vec<Vec<u8>>, LinkAddress)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl PacketTransport for RecordingTransport {
    async fn receive(&self) -> Result<CapturedPacket, DomainError> {
        Err(DomainError::TransportClosed)
    }

    async fn send(&self, frames: &[Vec<u8>], link: &LinkAddress) -> Result<(), DomainError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        self.sent.lock().unwrap().push((frames.to_vec(), *link));
        Ok(())
    }
}
