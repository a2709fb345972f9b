use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use tracing::debug;

use super::ServiceCatalog;
use crate::domain::{Price, Service};
use crate::errors::Result;

/// The clinic's fixed service list, shared by the selection and summary screens.
pub static SERVICE_CATALOG: Lazy<Vec<Service>> = Lazy::new(|| {
    vec![
        Service::new(
            "1",
            "Consulta Inicial",
            "Avaliação completa para novos pacientes",
            60,
            Price::from_reais(250),
        ),
        Service::new(
            "2",
            "Retorno",
            "Consulta de acompanhamento",
            30,
            Price::from_reais(180),
        ),
        Service::new(
            "3",
            "Procedimento Especializado",
            "Tratamento específico conforme necessidade",
            45,
            Price::from_reais(320),
        ),
        Service::new(
            "4",
            "Consulta Online",
            "Atendimento remoto via videoconferência",
            40,
            Price::from_reais(200),
        ),
    ]
});

/// Serves [`SERVICE_CATALOG`] after a fixed delay.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    latency: Duration,
}

impl StaticCatalog {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl ServiceCatalog for StaticCatalog {
    async fn services(&self) -> Result<Vec<Service>> {
        tokio::time::sleep(self.latency).await;
        debug!(count = SERVICE_CATALOG.len(), "service catalog loaded");
        Ok(SERVICE_CATALOG.clone())
    }

    fn lookup(&self, id: &str) -> Option<Service> {
        SERVICE_CATALOG
            .iter()
            .find(|service| service.id == id)
            .cloned()
    }
}
