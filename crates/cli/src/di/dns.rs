use schedule_dns_application::ports::PacketTransport;
use schedule_dns_application::services::TxtFormatter;
use schedule_dns_application::use_cases::AnswerScheduleQueryUseCase;
use schedule_dns_domain::{Config, ScheduleStore};
use schedule_dns_infrastructure::dns::SchedulePacketHandler;
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub store: Arc<ScheduleStore>,
    pub transport: Arc<dyn PacketTransport>,
    pub handler: Arc<SchedulePacketHandler>,
}

impl DnsServices {
    pub fn new(config: &Config, store: Arc<ScheduleStore>) -> anyhow::Result<Self> {
        let formatter = TxtFormatter::new(config.response.help_text.as_str());
        let use_case = Arc::new(AnswerScheduleQueryUseCase::new(store.clone(), formatter));

        let transport = Self::open_transport(config)?;
        let handler = Arc::new(SchedulePacketHandler::new(
            use_case,
            transport.clone(),
            config,
        )?);

        info!(
            talks = store.len(),
            tracks = store.tracks().len(),
            interface = %config.server.interface_name,
            "DNS services initialized"
        );

        Ok(Self {
            store,
            transport,
            handler,
        })
    }

    #[cfg(target_os = "linux")]
    fn open_transport(config: &Config) -> anyhow::Result<Arc<dyn PacketTransport>> {
        use schedule_dns_infrastructure::dns::transport::PacketCapture;

        let capture = PacketCapture::open(&config.server.interface_name)?;
        Ok(Arc::new(capture))
    }

    #[cfg(not(target_os = "linux"))]
    fn open_transport(_config: &Config) -> anyhow::Result<Arc<dyn PacketTransport>> {
        anyhow::bail!("Packet capture is only supported on Linux")
    }
}
