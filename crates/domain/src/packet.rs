use chrono::{DateTime, Utc};

/// Link-layer coordinates of a captured packet: the interface it arrived on
/// and the hardware address of the sender. Replies are sent back through the
/// same coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkAddress {
    pub if_index: i32,
    pub hw_addr: [u8; 8],
    pub hw_len: u8,
}

impl LinkAddress {
    pub fn new(if_index: i32, hw_addr: &[u8]) -> Self {
        let mut buf = [0u8; 8];
        let len = hw_addr.len().min(buf.len());
        buf[..len].copy_from_slice(&hw_addr[..len]);
        Self {
            if_index,
            hw_addr: buf,
            hw_len: len as u8,
        }
    }
}

/// A network-layer packet (IPv4 or IPv6 header onwards) as delivered by the
/// capture transport.
#[derive(Debug, Clone)]
pub struct CapturedPacket {
    pub data: Vec<u8>,
    pub link: LinkAddress,
    pub received_at: DateTime<Utc>,
}

impl CapturedPacket {
    pub fn new(data: Vec<u8>, link: LinkAddress) -> Self {
        Self {
            data,
            link,
            received_at: Utc::now(),
        }
    }

    pub fn with_received_at(mut self, at: DateTime<Utc>) -> Self {
        self.received_at = at;
        self
    }
}
