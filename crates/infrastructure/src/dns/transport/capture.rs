use async_trait::async_trait;
use schedule_dns_application::ports::PacketTransport;
use schedule_dns_domain::{CapturedPacket, DomainError, LinkAddress};
use std::ffi::CString;
use std::io;
use std::mem;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
use tokio::io::unix::AsyncFd;
use tokio::io::Interest;
use tokio::sync::Mutex;
use tracing::{debug, info, trace};

/// Largest frame the capture socket hands back.
const MAX_FRAME_LEN: usize = 65536;

/// `AF_PACKET`/`SOCK_DGRAM` socket bound to one interface.
///
/// The kernel strips and rebuilds the link-layer header, so captured data
/// starts at the IP header and replies are handed over the same way.
/// Copies of our own outgoing frames are skipped at receive time.
pub struct PacketCapture {
    fd: AsyncFd<OwnedFd>,
    if_index: i32,
    send_lock: Mutex<()>,
}

impl PacketCapture {
    pub fn open(interface: &str) -> Result<Self, DomainError> {
        let name = CString::new(interface).map_err(|_| {
            DomainError::Transport(format!("Invalid interface name '{}'", interface))
        })?;

        let if_index = unsafe { libc::if_nametoindex(name.as_ptr()) };
        if if_index == 0 {
            return Err(os_error(
                &format!("Unknown interface '{}'", interface),
                io::Error::last_os_error(),
            ));
        }
        let if_index = if_index as i32;

        let protocol = (libc::ETH_P_ALL as u16).to_be();
        let raw = unsafe {
            libc::socket(
                libc::AF_PACKET,
                libc::SOCK_DGRAM | libc::SOCK_NONBLOCK | libc::SOCK_CLOEXEC,
                i32::from(protocol),
            )
        };
        if raw < 0 {
            return Err(os_error(
                "Failed to open packet socket",
                io::Error::last_os_error(),
            ));
        }
        let fd = unsafe { OwnedFd::from_raw_fd(raw) };

        let mut addr: libc::sockaddr_ll = unsafe { mem::zeroed() };
        addr.sll_family = libc::AF_PACKET as u16;
        addr.sll_protocol = protocol;
        addr.sll_ifindex = if_index;
        let rc = unsafe {
            libc::bind(
                fd.as_raw_fd(),
                &addr as *const libc::sockaddr_ll as *const libc::sockaddr,
                mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
            )
        };
        if rc < 0 {
            return Err(os_error(
                &format!("Failed to bind packet socket to '{}'", interface),
                io::Error::last_os_error(),
            ));
        }

        let fd = AsyncFd::with_interest(fd, Interest::READABLE | Interest::WRITABLE)
            .map_err(|e| os_error("Failed to register packet socket", e))?;

        info!(interface = %interface, if_index, "Packet capture opened");

        Ok(Self {
            fd,
            if_index,
            send_lock: Mutex::new(()),
        })
    }

    fn destination(&self, frame: &[u8], link: &LinkAddress) -> Result<libc::sockaddr_ll, DomainError> {
        let ethertype = match frame.first().map(|b| b >> 4) {
            Some(4) => libc::ETH_P_IP as u16,
            Some(6) => libc::ETH_P_IPV6 as u16,
            _ => {
                return Err(DomainError::Transport(
                    "Frame is neither IPv4 nor IPv6".to_string(),
                ))
            }
        };

        let mut addr: libc::sockaddr_ll = unsafe { mem::zeroed() };
        addr.sll_family = libc::AF_PACKET as u16;
        addr.sll_protocol = ethertype.to_be();
        addr.sll_ifindex = if link.if_index != 0 {
            link.if_index
        } else {
            self.if_index
        };
        addr.sll_halen = link.hw_len;
        addr.sll_addr = link.hw_addr;
        Ok(addr)
    }
}

#[async_trait]
impl PacketTransport for PacketCapture {
    async fn receive(&self) -> Result<CapturedPacket, DomainError> {
        let mut buf = vec![0u8; MAX_FRAME_LEN];

        loop {
            let mut guard = self
                .fd
                .readable()
                .await
                .map_err(|e| os_error("Packet socket poll failed", e))?;

            let (len, addr) = match guard.try_io(|fd| recv_frame(fd.get_ref(), &mut buf)) {
                Ok(Ok(received)) => received,
                Ok(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Ok(Err(e)) => return Err(os_error("Packet receive failed", e)),
                Err(_would_block) => continue,
            };

            if addr.sll_pkttype == libc::PACKET_OUTGOING as u8 {
                continue;
            }
            let ethertype = u16::from_be(addr.sll_protocol);
            if ethertype != libc::ETH_P_IP as u16 && ethertype != libc::ETH_P_IPV6 as u16 {
                trace!(ethertype, "Skipping non-IP frame");
                continue;
            }

            let hw_len = usize::from(addr.sll_halen).min(addr.sll_addr.len());
            let link = LinkAddress::new(addr.sll_ifindex, &addr.sll_addr[..hw_len]);
            buf.truncate(len);
            return Ok(CapturedPacket::new(buf, link));
        }
    }

    async fn send(&self, frames: &[Vec<u8>], link: &LinkAddress) -> Result<(), DomainError> {
        let _serialized = self.send_lock.lock().await;

        for frame in frames {
            let addr = self.destination(frame, link)?;
            loop {
                let mut guard = self
                    .fd
                    .writable()
                    .await
                    .map_err(|e| os_error("Packet socket poll failed", e))?;

                match guard.try_io(|fd| send_frame(fd.get_ref(), frame, &addr)) {
                    Ok(Ok(())) => break,
                    Ok(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Ok(Err(e)) => return Err(os_error("Packet send failed", e)),
                    Err(_would_block) => continue,
                }
            }
        }

        debug!(frames = frames.len(), if_index = link.if_index, "Frames sent");
        Ok(())
    }
}

fn recv_frame(fd: &OwnedFd, buf: &mut [u8]) -> io::Result<(usize, libc::sockaddr_ll)> {
    let mut addr: libc::sockaddr_ll = unsafe { mem::zeroed() };
    let mut addr_len = mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t;

    let n = unsafe {
        libc::recvfrom(
            fd.as_raw_fd(),
            buf.as_mut_ptr() as *mut libc::c_void,
            buf.len(),
            0,
            &mut addr as *mut libc::sockaddr_ll as *mut libc::sockaddr,
            &mut addr_len,
        )
    };
    if n < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok((n as usize, addr))
}

fn send_frame(fd: &OwnedFd, frame: &[u8], addr: &libc::sockaddr_ll) -> io::Result<()> {
    let n = unsafe {
        libc::sendto(
            fd.as_raw_fd(),
            frame.as_ptr() as *const libc::c_void,
            frame.len(),
            0,
            addr as *const libc::sockaddr_ll as *const libc::sockaddr,
            mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
        )
    };
    if n < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Interface loss ends the capture for good; everything else is per-packet.
fn os_error(context: &str, e: io::Error) -> DomainError {
    match e.raw_os_error() {
        Some(libc::ENETDOWN) | Some(libc::ENODEV) | Some(libc::ENXIO) | Some(libc::EBADF) => {
            DomainError::TransportClosed
        }
        _ => DomainError::Transport(format!("{}: {}", context, e)),
    }
}
