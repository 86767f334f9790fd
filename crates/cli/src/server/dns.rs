use crate::di::DnsServices;
use futures::StreamExt;
use schedule_dns_application::ports::packet_stream;
use schedule_dns_domain::Config;
use schedule_dns_infrastructure::dns::transport::PortReservation;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Reserves the port, then answers captured packets one at a time until
/// Ctrl-C or until the capture goes away.
pub async fn start_dns_server(config: &Config, services: DnsServices) -> anyhow::Result<()> {
    let listen = config.server.listen_addr()?;
    let reservation = PortReservation::bind(listen)?;

    let mut background: JoinSet<()> = JoinSet::new();
    background.spawn(reservation.drain());

    info!(
        bind_address = %listen,
        interface = %config.server.interface_name,
        talks = services.store.len(),
        "DNS server ready"
    );
    info!(
        "Try: dig @{} -p {} now.talks TXT",
        listen.ip(),
        listen.port()
    );

    let mut packets = packet_stream(services.transport.clone());
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            packet = packets.next() => match packet {
                Some(packet) => services.handler.process(packet).await,
                None => {
                    warn!("Packet capture closed");
                    break;
                }
            },
            result = &mut shutdown => {
                if let Err(e) = result {
                    warn!(error = %e, "Failed to listen for shutdown signal");
                }
                info!("Shutdown signal received");
                break;
            }
        }
    }

    background.shutdown().await;
    Ok(())
}
