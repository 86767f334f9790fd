use schedule_dns_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, trace};

/// Holds the listening UDP port open so the kernel does not answer captured
/// queries with ICMP port-unreachable. Everything it receives is discarded;
/// replies come from the capture transport.
pub struct PortReservation {
    socket: UdpSocket,
    local_addr: SocketAddr,
}

impl PortReservation {
    pub fn bind(addr: SocketAddr) -> Result<Self, DomainError> {
        let domain = if addr.is_ipv4() {
            Domain::IPV4
        } else {
            Domain::IPV6
        };

        let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))
            .map_err(|e| reservation_error(addr, e))?;
        if addr.is_ipv6() {
            socket
                .set_only_v6(false)
                .map_err(|e| reservation_error(addr, e))?;
        }
        socket
            .set_reuse_address(true)
            .map_err(|e| reservation_error(addr, e))?;
        socket
            .bind(&addr.into())
            .map_err(|e| reservation_error(addr, e))?;
        socket
            .set_nonblocking(true)
            .map_err(|e| reservation_error(addr, e))?;

        let std_socket: std::net::UdpSocket = socket.into();
        let socket = UdpSocket::from_std(std_socket).map_err(|e| reservation_error(addr, e))?;
        let local_addr = socket.local_addr().map_err(|e| reservation_error(addr, e))?;

        debug!(address = %local_addr, "UDP port reserved");
        Ok(Self { socket, local_addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Reads and drops datagrams until the task is cancelled.
    pub async fn drain(self) {
        let mut buf = vec![0u8; 2048];
        loop {
            match self.socket.recv_from(&mut buf).await {
                Ok((len, from)) => trace!(client = %from, bytes = len, "Reserved port datagram dropped"),
                Err(e) => debug!(error = %e, "Reserved port receive error"),
            }
        }
    }
}

fn reservation_error(addr: SocketAddr, e: std::io::Error) -> DomainError {
    DomainError::Transport(format!("Failed to reserve {}: {}", addr, e))
}
