use chrono::{DateTime, Duration, Utc};
use schedule_dns_domain::Talk;
use std::net::{IpAddr, SocketAddr};

pub fn utc(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value).unwrap().to_utc()
}

pub struct TalkBuilder {
    id: String,
    start: String,
    minutes: i64,
    title: String,
    speakers: Vec<String>,
    track: String,
}

impl TalkBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            start: "2025-09-13T10:10:00+05:30".to_string(),
            minutes: 30,
            title: "Intro".to_string(),
            speakers: vec![],
            track: "Track 1".to_string(),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn speaker(mut self, name: &str) -> Self {
        self.speakers.push(name.to_string());
        self
    }

    pub fn track(mut self, track: &str) -> Self {
        self.track = track.to_string();
        self
    }

    pub fn build(self) -> Talk {
        Talk::new(
            self.id,
            DateTime::parse_from_rfc3339(&self.start).unwrap(),
            Duration::minutes(self.minutes),
            self.title,
            self.speakers,
            self.track,
        )
        .unwrap()
    }
}

/// A standard query with RD set and one question of type TXT, class IN.
pub fn dns_query(id: u16, name: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&[0x01, 0x00]); // flags: RD
    buf.extend_from_slice(&[0x00, 0x01]); // QDCOUNT = 1
    buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    for label in name.split('.').filter(|l| !l.is_empty()) {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0x00);
    buf.extend_from_slice(&[0x00, 0x10]); // QTYPE = TXT
    buf.extend_from_slice(&[0x00, 0x01]); // QCLASS = IN
    buf
}

/// IP + UDP around `payload`, checksums left at zero.
pub fn ip_packet(source: SocketAddr, destination: SocketAddr, payload: &[u8]) -> Vec<u8> {
    let mut udp = Vec::new();
    udp.extend_from_slice(&source.port().to_be_bytes());
    udp.extend_from_slice(&destination.port().to_be_bytes());
    udp.extend_from_slice(&((8 + payload.len()) as u16).to_be_bytes());
    udp.extend_from_slice(&[0x00, 0x00]);
    udp.extend_from_slice(payload);

    let mut packet = Vec::new();
    match (source.ip(), destination.ip()) {
        (IpAddr::V4(src), IpAddr::V4(dst)) => {
            packet.extend_from_slice(&[0x45, 0x00]);
            packet.extend_from_slice(&((20 + udp.len()) as u16).to_be_bytes());
            packet.extend_from_slice(&[0x12, 0x34, 0x40, 0x00, 64, 17, 0x00, 0x00]);
            packet.extend_from_slice(&src.octets());
            packet.extend_from_slice(&dst.octets());
        }
        (IpAddr::V6(src), IpAddr::V6(dst)) => {
            packet.extend_from_slice(&[0x60, 0x00, 0x00, 0x00]);
            packet.extend_from_slice(&(udp.len() as u16).to_be_bytes());
            packet.extend_from_slice(&[17, 64]);
            packet.extend_from_slice(&src.octets());
            packet.extend_from_slice(&dst.octets());
        }
        _ => panic!("mixed address families"),
    }
    packet.extend_from_slice(&udp);
    packet
}

/// Joins IPv4 fragments back into the UDP segment they carry.
pub fn reassemble_ipv4(frames: &[Vec<u8>]) -> Vec<u8> {
    let mut pieces: Vec<(usize, &[u8])> = frames
        .iter()
        .map(|frame| {
            assert_eq!(frame[0], 0x45, "expected a plain IPv4 header");
            let total = u16::from_be_bytes([frame[2], frame[3]]) as usize;
            assert_eq!(total, frame.len());
            let offset = (u16::from_be_bytes([frame[6], frame[7]]) & 0x1FFF) as usize * 8;
            (offset, &frame[20..])
        })
        .collect();
    pieces.sort_by_key(|(offset, _)| *offset);

    let mut segment = Vec::new();
    for (offset, piece) in pieces {
        assert_eq!(offset, segment.len(), "fragments leave a gap");
        segment.extend_from_slice(piece);
    }
    segment
}

/// Joins IPv6 frames (fragmented or not) back into the UDP segment.
pub fn reassemble_ipv6(frames: &[Vec<u8>]) -> Vec<u8> {
    if frames.len() == 1 && frames[0][6] == 17 {
        return frames[0][40..].to_vec();
    }

    let mut pieces: Vec<(usize, &[u8])> = frames
        .iter()
        .map(|frame| {
            assert_eq!(frame[6], 44, "expected a Fragment header");
            let offset = (u16::from_be_bytes([frame[42], frame[43]]) & 0xFFF8) as usize;
            (offset, &frame[48..])
        })
        .collect();
    pieces.sort_by_key(|(offset, _)| *offset);

    let mut segment = Vec::new();
    for (offset, piece) in pieces {
        assert_eq!(offset, segment.len(), "fragments leave a gap");
        segment.extend_from_slice(piece);
    }
    segment
}

/// Ports and payload of a UDP segment.
pub fn udp_payload(segment: &[u8]) -> (u16, u16, &[u8]) {
    let source = u16::from_be_bytes([segment[0], segment[1]]);
    let destination = u16::from_be_bytes([segment[2], segment[3]]);
    let len = u16::from_be_bytes([segment[4], segment[5]]) as usize;
    assert_eq!(len, segment.len());
    (source, destination, &segment[8..len])
}
