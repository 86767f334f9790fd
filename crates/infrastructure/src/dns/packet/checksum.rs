/// RFC 1071 one's complement sum, fed incrementally.
///
/// Slices of odd length are carried over, so a pseudo-header and a segment
/// can be added separately without realigning.
#[derive(Debug, Default, Clone, Copy)]
pub struct Checksum {
    sum: u32,
    pending: Option<u8>,
}

impl Checksum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bytes: &[u8]) -> &mut Self {
        let mut rest = bytes;

        if let Some(high) = self.pending.take() {
            match rest.split_first() {
                Some((&low, tail)) => {
                    self.add_word(u16::from_be_bytes([high, low]));
                    rest = tail;
                }
                None => {
                    self.pending = Some(high);
                    return self;
                }
            }
        }

        let mut words = rest.chunks_exact(2);
        for word in &mut words {
            self.add_word(u16::from_be_bytes([word[0], word[1]]));
        }
        if let [last] = words.remainder() {
            self.pending = Some(*last);
        }
        self
    }

    pub fn add_u16(&mut self, value: u16) -> &mut Self {
        self.add(&value.to_be_bytes())
    }

    pub fn finish(&self) -> u16 {
        let mut sum = self.sum;
        if let Some(high) = self.pending {
            sum += u32::from(high) << 8;
        }
        while sum >> 16 != 0 {
            sum = (sum & 0xFFFF) + (sum >> 16);
        }
        !(sum as u16)
    }

    fn add_word(&mut self, word: u16) {
        self.sum += u32::from(word);
        if self.sum >> 16 != 0 {
            self.sum = (self.sum & 0xFFFF) + (self.sum >> 16);
        }
    }
}

pub fn checksum(bytes: &[u8]) -> u16 {
    Checksum::new().add(bytes).finish()
}
