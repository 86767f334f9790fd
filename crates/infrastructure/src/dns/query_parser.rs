use schedule_dns_domain::DomainError;

const HEADER_LEN: usize = 12;
const MAX_NAME_LEN: usize = 255;

const QR_BIT: u16 = 0x8000;

/// The parts of a captured DNS query needed to answer it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    /// First question name in presentation form, always with a trailing dot
    /// (`"now.talks.example."`, `"."` for the root).
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
    /// Byte offset in the original buffer where the question section ends.
    pub question_end: usize,
}

impl ScheduleQuery {
    pub fn is_response(&self) -> bool {
        self.flags & QR_BIT != 0
    }
}

/// Parses the header and question section of a raw DNS message.
///
/// Every question is walked so the whole section can be echoed, but only the
/// first one is decoded. The record type is not checked. Fails with
/// [`DomainError::InvalidPacket`] when:
///
/// * the buffer is shorter than the 12-byte header
/// * QDCOUNT is zero
/// * the first question name uses compression or an extended label type
/// * any question runs past the end of the buffer
///
/// Responses (QR set) parse successfully; callers decide what to do with them.
pub fn parse_query(buf: &[u8]) -> Result<ScheduleQuery, DomainError> {
    if buf.len() < HEADER_LEN {
        return Err(invalid("shorter than DNS header"));
    }

    let id = u16::from_be_bytes([buf[0], buf[1]]);
    let flags = u16::from_be_bytes([buf[2], buf[3]]);
    let qdcount = u16::from_be_bytes([buf[4], buf[5]]);

    if qdcount == 0 {
        return Err(invalid("no question"));
    }

    let (name, mut pos) = read_first_name(buf, HEADER_LEN)?;
    if pos + 4 > buf.len() {
        return Err(invalid("truncated question"));
    }
    let qtype = u16::from_be_bytes([buf[pos], buf[pos + 1]]);
    let qclass = u16::from_be_bytes([buf[pos + 2], buf[pos + 3]]);
    pos += 4;

    for _ in 1..qdcount {
        pos = skip_name(buf, pos)?;
        if pos + 4 > buf.len() {
            return Err(invalid("truncated question"));
        }
        pos += 4;
    }

    Ok(ScheduleQuery {
        id,
        flags,
        qdcount,
        name,
        qtype,
        qclass,
        question_end: pos,
    })
}

fn read_first_name(buf: &[u8], mut pos: usize) -> Result<(String, usize), DomainError> {
    let mut name = String::new();
    let mut wire_len = 1;

    loop {
        let label_len = *buf.get(pos).ok_or_else(|| invalid("truncated name"))? as usize;
        pos += 1;
        if label_len == 0 {
            break;
        }
        if label_len & 0xC0 != 0 {
            return Err(invalid("compressed or extended label in first question"));
        }
        wire_len += label_len + 1;
        if wire_len > MAX_NAME_LEN {
            return Err(invalid("name too long"));
        }
        let label = buf
            .get(pos..pos + label_len)
            .ok_or_else(|| invalid("truncated label"))?;
        name.push_str(&String::from_utf8_lossy(label));
        name.push('.');
        pos += label_len;
    }

    if name.is_empty() {
        name.push('.');
    }
    Ok((name, pos))
}

/// Steps over a name in a later question; these may point back into the
/// message, which ends the name.
fn skip_name(buf: &[u8], mut pos: usize) -> Result<usize, DomainError> {
    loop {
        let label_len = *buf.get(pos).ok_or_else(|| invalid("truncated name"))? as usize;
        match label_len & 0xC0 {
            0x00 if label_len == 0 => return Ok(pos + 1),
            0x00 => {
                pos += 1 + label_len;
                if pos > buf.len() {
                    return Err(invalid("truncated label"));
                }
            }
            0xC0 => {
                if pos + 2 > buf.len() {
                    return Err(invalid("truncated pointer"));
                }
                return Ok(pos + 2);
            }
            _ => return Err(invalid("extended label type")),
        }
    }
}

fn invalid(reason: &str) -> DomainError {
    DomainError::InvalidPacket(reason.to_string())
}
