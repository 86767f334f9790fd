mod packet_transport;
mod schedule_source;

pub use packet_transport::{packet_stream, PacketTransport};
pub use schedule_source::ScheduleSource;
