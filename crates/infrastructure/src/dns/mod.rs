pub mod guard;
pub mod packet;
pub mod query_parser;
pub mod server;
pub mod transport;
pub mod txt_response;

pub use guard::SelfTrafficGuard;
pub use server::{PacketOutcome, SchedulePacketHandler};
