use super::guard::SelfTrafficGuard;
use super::packet::{build_ip_frames, build_udp_segment, parse_udp_datagram};
use super::query_parser::parse_query;
use super::txt_response::build_txt_response;
use schedule_dns_application::ports::PacketTransport;
use schedule_dns_application::use_cases::AnswerScheduleQueryUseCase;
use schedule_dns_domain::{CapturedPacket, Config, ConfigError, DomainError};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What happened to one captured packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketOutcome {
    /// UDP traffic that does not involve the listening port.
    Ignored,
    Answered { records: usize, frames: usize },
}

/// Frames ready to go back out, plus what they answer.
#[derive(Debug, Clone)]
pub struct PreparedReply {
    pub frames: Vec<Vec<u8>>,
    pub query_name: String,
    pub records: usize,
}

/// Turns captured packets into TXT replies and hands them to the transport.
pub struct SchedulePacketHandler {
    use_case: Arc<AnswerScheduleQueryUseCase>,
    transport: Arc<dyn PacketTransport>,
    guard: SelfTrafficGuard,
    dns_port: u16,
    ttl: u32,
    fragment_size: usize,
}

impl SchedulePacketHandler {
    pub fn new(
        use_case: Arc<AnswerScheduleQueryUseCase>,
        transport: Arc<dyn PacketTransport>,
        config: &Config,
    ) -> Result<Self, ConfigError> {
        let listen = config.server.listen_addr()?;
        Ok(Self {
            use_case,
            transport,
            guard: SelfTrafficGuard::new(listen),
            dns_port: listen.port(),
            ttl: config.response.ttl,
            fragment_size: config.response.fragment_size,
        })
    }

    /// Parses, answers and assembles the reply for one packet without sending it.
    ///
    /// Returns `Ok(None)` for UDP traffic not addressed to the listening port.
    /// Packets leaving the listening port are only checked against the
    /// self-traffic guard.
    pub fn prepare_reply(&self, packet: &CapturedPacket) -> Result<Option<PreparedReply>, DomainError> {
        let datagram = parse_udp_datagram(&packet.data)?;
        if self.guard.is_self_traffic(datagram.source) {
            return Err(DomainError::SelfTraffic);
        }
        if datagram.destination.port() != self.dns_port {
            return Ok(None);
        }

        let query = parse_query(datagram.payload)?;
        if query.is_response() {
            return Err(DomainError::InvalidPacket("DNS response, not a query".to_string()));
        }

        info!(
            client = %datagram.source,
            query = %query.name,
            qtype = query.qtype,
            "DNS query received"
        );

        let answer = self
            .use_case
            .execute(&query.name, packet.received_at.fixed_offset());

        let message = build_txt_response(&query, datagram.payload, &answer.records, self.ttl)?;
        let segment = build_udp_segment(datagram.destination, datagram.source, &message)?;
        let frames = build_ip_frames(
            datagram.destination.ip(),
            datagram.source.ip(),
            &segment,
            self.fragment_size,
        )?;

        Ok(Some(PreparedReply {
            frames,
            query_name: query.name,
            records: answer.records.len(),
        }))
    }

    /// Runs one packet to completion, including the send.
    pub async fn handle(&self, packet: &CapturedPacket) -> Result<PacketOutcome, DomainError> {
        let Some(reply) = self.prepare_reply(packet)? else {
            return Ok(PacketOutcome::Ignored);
        };

        self.transport.send(&reply.frames, &packet.link).await?;

        info!(
            query = %reply.query_name,
            records = reply.records,
            frames = reply.frames.len(),
            "Reply sent"
        );

        Ok(PacketOutcome::Answered {
            records: reply.records,
            frames: reply.frames.len(),
        })
    }

    /// Like [`handle`](Self::handle), but logs failures at the level their
    /// kind warrants instead of returning them.
    pub async fn process(&self, packet: CapturedPacket) {
        match self.handle(&packet).await {
            Ok(_) => {}
            Err(DomainError::SelfTraffic) => debug!("Dropped own packet"),
            Err(e) if e.is_silent_drop() => debug!(error = %e, bytes = packet.data.len(), "Packet dropped"),
            Err(e @ DomainError::Formatting(_)) => warn!(error = %e, "Reply could not be assembled"),
            Err(e) => error!(error = %e, "Reply could not be sent"),
        }
    }
}
