use std::net::SocketAddr;

/// Recognises packets the server sent itself.
///
/// The capture transport also sees outbound replies on the interface, so a
/// packet from the listening port is ours when its source address is the
/// listening address, when both are loopback, or when the server listens on
/// the unspecified address.
#[derive(Debug, Clone, Copy)]
pub struct SelfTrafficGuard {
    listen: SocketAddr,
}

impl SelfTrafficGuard {
    pub fn new(listen: SocketAddr) -> Self {
        Self { listen }
    }

    pub fn is_self_traffic(&self, source: SocketAddr) -> bool {
        if source.port() != self.listen.port() {
            return false;
        }

        let listen_ip = self.listen.ip();
        let source_ip = source.ip();
        listen_ip.is_unspecified()
            || listen_ip == source_ip
            || (listen_ip.is_loopback() && source_ip.is_loopback())
    }
}
