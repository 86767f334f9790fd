use super::checksum::Checksum;
use super::{IPPROTO_UDP, IPV6_FRAGMENT_HEADER, UDP_HEADER_LEN};
use schedule_dns_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

const IPV4_MIN_HEADER_LEN: usize = 20;
const IPV6_HEADER_LEN: usize = 40;

// Extension headers that may precede the UDP header and share the
// `next header, length in 8-octet units - 1` layout.
const IPV6_HOP_BY_HOP: u8 = 0;
const IPV6_ROUTING: u8 = 43;
const IPV6_DESTINATION_OPTIONS: u8 = 60;

/// A UDP datagram lifted out of an IP packet. `payload` borrows the
/// captured buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpDatagram<'a> {
    pub source: SocketAddr,
    pub destination: SocketAddr,
    pub payload: &'a [u8],
}

/// Parses an IPv4 or IPv6 packet carrying an unfragmented UDP datagram.
///
/// * IP version other than 4 or 6 → [`DomainError::UnsupportedNetworkLayer`]
/// * truncated headers, non-UDP protocols and fragments → [`DomainError::InvalidPacket`]
pub fn parse_udp_datagram(data: &[u8]) -> Result<UdpDatagram<'_>, DomainError> {
    let first = *data
        .first()
        .ok_or_else(|| invalid("empty packet"))?;

    let (source, destination, segment) = match first >> 4 {
        4 => parse_ipv4(data)?,
        6 => parse_ipv6(data)?,
        version => return Err(DomainError::UnsupportedNetworkLayer(version)),
    };

    if segment.len() < UDP_HEADER_LEN {
        return Err(invalid("truncated UDP header"));
    }
    let source_port = u16::from_be_bytes([segment[0], segment[1]]);
    let destination_port = u16::from_be_bytes([segment[2], segment[3]]);
    let udp_len = u16::from_be_bytes([segment[4], segment[5]]) as usize;

    if udp_len < UDP_HEADER_LEN || udp_len > segment.len() {
        return Err(invalid("UDP length out of bounds"));
    }

    Ok(UdpDatagram {
        source: SocketAddr::new(source, source_port),
        destination: SocketAddr::new(destination, destination_port),
        payload: &segment[UDP_HEADER_LEN..udp_len],
    })
}

fn parse_ipv4(data: &[u8]) -> Result<(IpAddr, IpAddr, &[u8]), DomainError> {
    if data.len() < IPV4_MIN_HEADER_LEN {
        return Err(invalid("truncated IPv4 header"));
    }

    let header_len = usize::from(data[0] & 0x0F) * 4;
    let total_len = u16::from_be_bytes([data[2], data[3]]) as usize;
    if header_len < IPV4_MIN_HEADER_LEN || total_len < header_len || total_len > data.len() {
        return Err(invalid("IPv4 length out of bounds"));
    }

    let flags_offset = u16::from_be_bytes([data[6], data[7]]);
    if flags_offset & 0x3FFF != 0 {
        return Err(invalid("IPv4 fragment"));
    }
    if data[9] != IPPROTO_UDP {
        return Err(invalid("not UDP"));
    }

    let source = Ipv4Addr::new(data[12], data[13], data[14], data[15]);
    let destination = Ipv4Addr::new(data[16], data[17], data[18], data[19]);

    Ok((
        IpAddr::V4(source),
        IpAddr::V4(destination),
        &data[header_len..total_len],
    ))
}

fn parse_ipv6(data: &[u8]) -> Result<(IpAddr, IpAddr, &[u8]), DomainError> {
    if data.len() < IPV6_HEADER_LEN {
        return Err(invalid("truncated IPv6 header"));
    }

    let payload_len = u16::from_be_bytes([data[4], data[5]]) as usize;
    let end = IPV6_HEADER_LEN + payload_len;
    if end > data.len() {
        return Err(invalid("IPv6 length out of bounds"));
    }

    let source = ipv6_at(data, 8);
    let destination = ipv6_at(data, 24);

    let mut next_header = data[6];
    let mut pos = IPV6_HEADER_LEN;
    loop {
        match next_header {
            IPPROTO_UDP => break,
            IPV6_HOP_BY_HOP | IPV6_ROUTING | IPV6_DESTINATION_OPTIONS => {
                if pos + 2 > end {
                    return Err(invalid("truncated IPv6 extension header"));
                }
                next_header = data[pos];
                pos += (usize::from(data[pos + 1]) + 1) * 8;
                if pos > end {
                    return Err(invalid("truncated IPv6 extension header"));
                }
            }
            IPV6_FRAGMENT_HEADER => return Err(invalid("IPv6 fragment")),
            _ => return Err(invalid("not UDP")),
        }
    }

    Ok((
        IpAddr::V6(source),
        IpAddr::V6(destination),
        &data[pos..end],
    ))
}

fn ipv6_at(data: &[u8], offset: usize) -> Ipv6Addr {
    let mut octets = [0u8; 16];
    octets.copy_from_slice(&data[offset..offset + 16]);
    Ipv6Addr::from(octets)
}

/// Builds a UDP header plus `payload`, with the checksum computed over the
/// IPv4 or IPv6 pseudo-header of `source` → `destination`.
pub fn build_udp_segment(
    source: SocketAddr,
    destination: SocketAddr,
    payload: &[u8],
) -> Result<Vec<u8>, DomainError> {
    let udp_len = u16::try_from(UDP_HEADER_LEN + payload.len())
        .map_err(|_| DomainError::Formatting("UDP datagram exceeds 65535 bytes".to_string()))?;

    let mut segment = Vec::with_capacity(usize::from(udp_len));
    segment.extend_from_slice(&source.port().to_be_bytes());
    segment.extend_from_slice(&destination.port().to_be_bytes());
    segment.extend_from_slice(&udp_len.to_be_bytes());
    segment.extend_from_slice(&[0, 0]);
    segment.extend_from_slice(payload);

    let mut sum = Checksum::new();
    match (source.ip(), destination.ip()) {
        (IpAddr::V4(src), IpAddr::V4(dst)) => {
            sum.add(&src.octets())
                .add(&dst.octets())
                .add(&[0, IPPROTO_UDP])
                .add_u16(udp_len);
        }
        (IpAddr::V6(src), IpAddr::V6(dst)) => {
            sum.add(&src.octets())
                .add(&dst.octets())
                .add(&u32::from(udp_len).to_be_bytes())
                .add(&[0, 0, 0, IPPROTO_UDP]);
        }
        _ => {
            return Err(DomainError::Formatting(
                "source and destination address families differ".to_string(),
            ))
        }
    }
    sum.add(&segment);

    // A computed zero is sent as all ones; zero means "no checksum".
    let checksum = match sum.finish() {
        0 => 0xFFFF,
        value => value,
    };
    segment[6..8].copy_from_slice(&checksum.to_be_bytes());

    Ok(segment)
}

fn invalid(reason: &str) -> DomainError {
    DomainError::InvalidPacket(reason.to_string())
}
