//! Schedule DNS infrastructure: dataset files, raw packet codecs and the
//! capture transport.
pub mod dns;
pub mod schedule;
