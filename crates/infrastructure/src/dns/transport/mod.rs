//! Link-level packet transport.
//!
//! Queries are read straight off the interface instead of from a bound UDP
//! socket, and replies are written back as complete IP datagrams.
#[cfg(target_os = "linux")]
pub mod capture;
pub mod port_reservation;

#[cfg(target_os = "linux")]
pub use capture::PacketCapture;
pub use port_reservation::PortReservation;
