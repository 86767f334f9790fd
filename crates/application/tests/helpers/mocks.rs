use async_trait::async_trait;
use schedule_dns_application::ports::{PacketTransport, ScheduleSource};
use schedule_dns_domain::{CapturedPacket, DomainError, LinkAddress, LoadError, Talk};
use std::collections::VecDeque;
use std::sync::Mutex;

pub struct MockScheduleSource {
    result: Result<Vec<Talk>, LoadError>,
}

impl MockScheduleSource {
    pub fn with_talks(talks: Vec<Talk>) -> Self {
        Self { result: Ok(talks) }
    }

    pub fn failing(error: LoadError) -> Self {
        Self { result: Err(error) }
    }
}

impl ScheduleSource for MockScheduleSource {
    fn load_talks(&self) -> Result<Vec<Talk>, LoadError> {
        self.result.clone()
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

/// Replays a fixed script of receive results, then reports the transport closed.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<CapturedPacket, DomainError>>>,
    sent: Mutex<Vec<Vec<Vec<u8>>>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<CapturedPacket, DomainError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<Vec<Vec<u8>>> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PacketTransport for ScriptedTransport {
    async fn receive(&self) -> Result<CapturedPacket, DomainError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(DomainError::TransportClosed))
    }

    async fn send(&self, frames: &[Vec<u8>], _link: &LinkAddress) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push(frames.to_vec());
        Ok(())
    }
}
