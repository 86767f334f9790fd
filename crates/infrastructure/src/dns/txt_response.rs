use super::query_parser::ScheduleQuery;
use schedule_dns_domain::DomainError;

const HEADER_LEN: usize = 12;
const TYPE_TXT: u16 = 16;
const CLASS_IN: u16 = 1;
/// Compression pointer to the first question name, which always starts
/// right after the header.
const QNAME_POINTER: [u8; 2] = [0xC0, 0x0C];

const QR_AA: u16 = 0x8400;
const OPCODE_MASK: u16 = 0x7800;
const RD_BIT: u16 = 0x0100;

/// Builds an authoritative TXT answer for `query` in wire format.
///
/// The transaction id, opcode, RD bit and the original question section are
/// echoed. Each entry of `records` becomes one TXT record owned by the first
/// question name; its strings become consecutive character-strings.
pub fn build_txt_response(
    query: &ScheduleQuery,
    query_buf: &[u8],
    records: &[Vec<String>],
    ttl: u32,
) -> Result<Vec<u8>, DomainError> {
    if query.question_end > query_buf.len() || query.question_end < HEADER_LEN {
        return Err(DomainError::Formatting(
            "question section out of bounds".to_string(),
        ));
    }
    let ancount = u16::try_from(records.len())
        .map_err(|_| DomainError::Formatting(format!("{} answers do not fit", records.len())))?;

    let question = &query_buf[HEADER_LEN..query.question_end];
    let flags = QR_AA | (query.flags & (OPCODE_MASK | RD_BIT));

    let mut buf = Vec::with_capacity(512);
    buf.extend_from_slice(&query.id.to_be_bytes());
    buf.extend_from_slice(&flags.to_be_bytes());
    buf.extend_from_slice(&query.qdcount.to_be_bytes());
    buf.extend_from_slice(&ancount.to_be_bytes());
    buf.extend_from_slice(&[0, 0, 0, 0]);
    buf.extend_from_slice(question);

    for strings in records {
        buf.extend_from_slice(&QNAME_POINTER);
        buf.extend_from_slice(&TYPE_TXT.to_be_bytes());
        buf.extend_from_slice(&CLASS_IN.to_be_bytes());
        buf.extend_from_slice(&ttl.to_be_bytes());

        let rdlength_at = buf.len();
        buf.extend_from_slice(&[0, 0]);

        for string in strings {
            let len = u8::try_from(string.len()).map_err(|_| {
                DomainError::Formatting(format!(
                    "character-string of {} bytes exceeds 255",
                    string.len()
                ))
            })?;
            buf.push(len);
            buf.extend_from_slice(string.as_bytes());
        }

        let rdlength = u16::try_from(buf.len() - rdlength_at - 2)
            .map_err(|_| DomainError::Formatting("TXT rdata exceeds 65535 bytes".to_string()))?;
        buf[rdlength_at..rdlength_at + 2].copy_from_slice(&rdlength.to_be_bytes());
    }

    Ok(buf)
}
