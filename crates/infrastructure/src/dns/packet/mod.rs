//! Network and transport layer codecs for the raw capture path.
//!
//! Captured packets start at the IP header (the capture socket strips the
//! link layer), and replies are produced in the same shape.
pub mod checksum;
pub mod fragment;
pub mod ip;

pub use fragment::build_ip_frames;
pub use ip::{build_udp_segment, parse_udp_datagram, UdpDatagram};

pub const IPPROTO_UDP: u8 = 17;
pub const IPV6_FRAGMENT_HEADER: u8 = 44;
pub const UDP_HEADER_LEN: usize = 8;
pub const DEFAULT_HOP_LIMIT: u8 = 64;
