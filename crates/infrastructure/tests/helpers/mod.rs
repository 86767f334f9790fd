#![allow(dead_code)]
mod builders;
mod mocks;

pub use builders::{
    dns_query, ip_packet, reassemble_ipv4, reassemble_ipv6, udp_payload, utc, TalkBuilder,
};
pub use mocks::RecordingTransport;
