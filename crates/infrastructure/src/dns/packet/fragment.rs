use super::checksum::checksum;
use super::{DEFAULT_HOP_LIMIT, IPPROTO_UDP, IPV6_FRAGMENT_HEADER};
use schedule_dns_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

const IPV4_HEADER_LEN: usize = 20;
const IPV6_HEADER_LEN: usize = 40;
const IPV6_FRAGMENT_HEADER_LEN: usize = 8;
const FRAGMENT_UNIT: usize = 8;

const IPV4_MORE_FRAGMENTS: u16 = 0x2000;
const IPV6_MORE_FRAGMENTS: u16 = 0x0001;

/// Wraps a transport segment into one or more IP frames.
///
/// When the segment is longer than `fragment_size`, it is split into
/// fragments carrying at most `fragment_size` bytes each (rounded down to
/// the 8-byte fragment unit). IPv4 uses header fragment offsets, IPv6 a
/// Fragment extension header. All fragments of one call share an
/// identification value.
pub fn build_ip_frames(
    source: IpAddr,
    destination: IpAddr,
    segment: &[u8],
    fragment_size: usize,
) -> Result<Vec<Vec<u8>>, DomainError> {
    let fragment_size = (fragment_size / FRAGMENT_UNIT * FRAGMENT_UNIT).max(FRAGMENT_UNIT);

    match (source, destination) {
        (IpAddr::V4(src), IpAddr::V4(dst)) => ipv4_frames(src, dst, segment, fragment_size),
        (IpAddr::V6(src), IpAddr::V6(dst)) => ipv6_frames(src, dst, segment, fragment_size),
        _ => Err(DomainError::Formatting(
            "source and destination address families differ".to_string(),
        )),
    }
}

fn ipv4_frames(
    source: Ipv4Addr,
    destination: Ipv4Addr,
    segment: &[u8],
    fragment_size: usize,
) -> Result<Vec<Vec<u8>>, DomainError> {
    let identification = fastrand::u16(..);

    if segment.len() <= fragment_size {
        return Ok(vec![ipv4_frame(source, destination, identification, 0, segment)?]);
    }

    let pieces = segment.chunks(fragment_size);
    let last = pieces.len() - 1;
    pieces
        .enumerate()
        .map(|(i, piece)| {
            let offset_units = (i * fragment_size / FRAGMENT_UNIT) as u16;
            let more = if i < last { IPV4_MORE_FRAGMENTS } else { 0 };
            ipv4_frame(source, destination, identification, more | offset_units, piece)
        })
        .collect()
}

fn ipv4_frame(
    source: Ipv4Addr,
    destination: Ipv4Addr,
    identification: u16,
    flags_offset: u16,
    payload: &[u8],
) -> Result<Vec<u8>, DomainError> {
    let total_len = u16::try_from(IPV4_HEADER_LEN + payload.len())
        .map_err(|_| DomainError::Formatting("IPv4 packet exceeds 65535 bytes".to_string()))?;

    let mut frame = Vec::with_capacity(usize::from(total_len));
    frame.push(0x45);
    frame.push(0x00);
    frame.extend_from_slice(&total_len.to_be_bytes());
    frame.extend_from_slice(&identification.to_be_bytes());
    frame.extend_from_slice(&flags_offset.to_be_bytes());
    frame.push(DEFAULT_HOP_LIMIT);
    frame.push(IPPROTO_UDP);
    frame.extend_from_slice(&[0, 0]);
    frame.extend_from_slice(&source.octets());
    frame.extend_from_slice(&destination.octets());

    let header_checksum = checksum(&frame);
    frame[10..12].copy_from_slice(&header_checksum.to_be_bytes());

    frame.extend_from_slice(payload);
    Ok(frame)
}

fn ipv6_frames(
    source: Ipv6Addr,
    destination: Ipv6Addr,
    segment: &[u8],
    fragment_size: usize,
) -> Result<Vec<Vec<u8>>, DomainError> {
    if segment.len() <= fragment_size {
        let mut frame = ipv6_header(source, destination, IPPROTO_UDP, segment.len())?;
        frame.extend_from_slice(segment);
        return Ok(vec![frame]);
    }

    let identification = fastrand::u32(..);
    let pieces = segment.chunks(fragment_size);
    let last = pieces.len() - 1;

    pieces
        .enumerate()
        .map(|(i, piece)| {
            let mut frame = ipv6_header(
                source,
                destination,
                IPV6_FRAGMENT_HEADER,
                IPV6_FRAGMENT_HEADER_LEN + piece.len(),
            )?;

            let offset = u16::try_from(i * fragment_size)
                .map_err(|_| DomainError::Formatting("IPv6 fragment offset overflow".to_string()))?;
            let more = if i < last { IPV6_MORE_FRAGMENTS } else { 0 };

            frame.push(IPPROTO_UDP);
            frame.push(0);
            // Offset is in 8-byte units in the upper 13 bits, so the byte
            // offset already sits in place.
            frame.extend_from_slice(&(offset | more).to_be_bytes());
            frame.extend_from_slice(&identification.to_be_bytes());
            frame.extend_from_slice(piece);
            Ok(frame)
        })
        .collect()
}

fn ipv6_header(
    source: Ipv6Addr,
    destination: Ipv6Addr,
    next_header: u8,
    payload_len: usize,
) -> Result<Vec<u8>, DomainError> {
    let payload_len = u16::try_from(payload_len)
        .map_err(|_| DomainError::Formatting("IPv6 payload exceeds 65535 bytes".to_string()))?;

    let mut header = Vec::with_capacity(IPV6_HEADER_LEN + usize::from(payload_len));
    header.extend_from_slice(&[0x60, 0, 0, 0]);
    header.extend_from_slice(&payload_len.to_be_bytes());
    header.push(next_header);
    header.push(DEFAULT_HOP_LIMIT);
    header.extend_from_slice(&source.octets());
    header.extend_from_slice(&destination.octets());
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    const V4_SRC: IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));
    const V4_DST: IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 2));

    #[test]
    fn test_small_segment_is_single_unfragmented_frame() {
        let frames = build_ip_frames(V4_SRC, V4_DST, &[7u8; 100], 512).unwrap();

        assert_eq!(frames.len(), 1);
        let frame = &frames[0];
        assert_eq!(frame.len(), 120);
        assert_eq!(u16::from_be_bytes([frame[6], frame[7]]), 0);
        assert_eq!(checksum(&frame[..20]), 0);
    }

    #[test]
    fn test_segment_at_threshold_is_not_fragmented() {
        let frames = build_ip_frames(V4_SRC, V4_DST, &[3u8; 512], 512).unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), 532);
        assert_eq!(u16::from_be_bytes([frames[0][6], frames[0][7]]), 0);
    }

    #[test]
    fn test_one_byte_over_threshold_splits_in_two() {
        let frames = build_ip_frames(V4_SRC, V4_DST, &[3u8; 513], 512).unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].len() - 20, 512);
        assert_eq!(frames[1].len() - 20, 1);
        let first = u16::from_be_bytes([frames[0][6], frames[0][7]]);
        let second = u16::from_be_bytes([frames[1][6], frames[1][7]]);
        assert_eq!(first, IPV4_MORE_FRAGMENTS);
        assert_eq!(second, 512 / 8);
    }

    #[test]
    fn test_ipv6_threshold_boundary() {
        let source: IpAddr = "::1".parse().unwrap();

        let at = build_ip_frames(source, source, &[0u8; 512], 512).unwrap();
        let over = build_ip_frames(source, source, &[0u8; 513], 512).unwrap();

        assert_eq!(at.len(), 1);
        assert_eq!(at[0][6], IPPROTO_UDP);
        assert_eq!(over.len(), 2);
        assert_eq!(over[1].len(), 40 + 8 + 1);
    }

    #[test]
    fn test_ipv4_fragments_cover_segment_in_order() {
        let segment: Vec<u8> = (0..1300u32).map(|i| i as u8).collect();

        let frames = build_ip_frames(V4_SRC, V4_DST, &segment, 512).unwrap();

        assert_eq!(frames.len(), 3);
        let id = &frames[0][4..6];
        let mut reassembled = Vec::new();
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(&frame[4..6], id);
            assert_eq!(checksum(&frame[..20]), 0);
            let flags_offset = u16::from_be_bytes([frame[6], frame[7]]);
            assert_eq!(usize::from(flags_offset & 0x1FFF) * 8, i * 512);
            assert_eq!(flags_offset & IPV4_MORE_FRAGMENTS != 0, i < 2);
            assert!(frame.len() - 20 <= 512);
            reassembled.extend_from_slice(&frame[20..]);
        }
        assert_eq!(reassembled, segment);
    }

    #[test]
    fn test_fragment_size_rounds_down_to_unit() {
        let frames = build_ip_frames(V4_SRC, V4_DST, &[0u8; 30], 12).unwrap();

        let sizes: Vec<usize> = frames.iter().map(|f| f.len() - 20).collect();
        assert_eq!(sizes, vec![8, 8, 8, 6]);
    }

    #[test]
    fn test_ipv6_fragments_use_extension_header() {
        let source: IpAddr = "::1".parse().unwrap();
        let segment = vec![1u8; 600];

        let frames = build_ip_frames(source, source, &segment, 512).unwrap();

        assert_eq!(frames.len(), 2);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame[6], IPV6_FRAGMENT_HEADER);
            assert_eq!(frame[40], IPPROTO_UDP);
            let payload_len = u16::from_be_bytes([frame[4], frame[5]]) as usize;
            assert_eq!(payload_len, frame.len() - 40);
            let offset_flags = u16::from_be_bytes([frame[42], frame[43]]);
            assert_eq!(usize::from(offset_flags & 0xFFF8), i * 512);
            assert_eq!(offset_flags & IPV6_MORE_FRAGMENTS != 0, i == 0);
        }
        assert_eq!(&frames[0][44..48], &frames[1][44..48]);
    }

    #[test]
    fn test_ipv6_small_segment_has_no_fragment_header() {
        let source: IpAddr = "::1".parse().unwrap();

        let frames = build_ip_frames(source, source, &[0u8; 64], 512).unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0][6], IPPROTO_UDP);
        assert_eq!(frames[0].len(), 104);
    }
}
