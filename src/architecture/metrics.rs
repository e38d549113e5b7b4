use crate::architecture::model::ServiceConfig;
use crate::architecture::quantity::{parse_cpu, parse_memory};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Aggregates over a service list. Always recomputed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureMetrics {
    pub total_services: usize,
    pub total_replicas: u64,
    /// Millicores across all replicas
    pub total_cpu: u64,
    /// Mebibytes across all replicas
    pub total_memory: u64,
}

pub fn compute_metrics(services: &[ServiceConfig]) -> ArchitectureMetrics {
    services
        .iter()
        .fold(ArchitectureMetrics::default(), |mut acc, service| {
            let replicas = u64::from(service.replicas);
            let cpu = parse_cpu(&service.resources.cpu).unwrap_or_else(|e| {
                warn!(service = %service.name, "{}, counting as 0", e);
                0
            });
            let memory = parse_memory(&service.resources.memory).unwrap_or_else(|e| {
                warn!(service = %service.name, "{}, counting as 0", e);
                0
            });

            acc.total_services += 1;
            acc.total_replicas = acc.total_replicas.saturating_add(replicas);
            acc.total_cpu = acc.total_cpu.saturating_add(cpu.saturating_mul(replicas));
            acc.total_memory = acc
                .total_memory
                .saturating_add(memory.saturating_mul(replicas));
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::architecture::model::{ResourceRequirements, ServiceType};

    fn service(name: &str, replicas: u32, cpu: &str, memory: &str) -> ServiceConfig {
        ServiceConfig {
            replicas,
            resources: ResourceRequirements {
                cpu: cpu.to_string(),
                memory: memory.to_string(),
            },
            ..ServiceConfig::named(name, ServiceType::Web)
        }
    }

    #[test]
    fn test_single_service_scaled_by_replicas() {
        let metrics = compute_metrics(&[service("web", 2, "250m", "256Mi")]);
        assert_eq!(
            metrics,
            ArchitectureMetrics {
                total_services: 1,
                total_replicas: 2,
                total_cpu: 500,
                total_memory: 512,
            }
        );
    }

    #[test]
    fn test_mixed_units() {
        let metrics = compute_metrics(&[
            service("web", 1, "1", "1Gi"),
            service("api", 3, "0.5", "512Mi"),
        ]);
        assert_eq!(metrics.total_cpu, 1000 + 1500);
        assert_eq!(metrics.total_memory, 1024 + 1536);
        assert_eq!(metrics.total_replicas, 4);
    }

    #[test]
    fn test_unparseable_quantities_count_as_zero() {
        let metrics = compute_metrics(&[
            service("web", 2, "lots", "some"),
            service("api", 1, "100m", "64Mi"),
        ]);
        assert_eq!(metrics.total_cpu, 100);
        assert_eq!(metrics.total_memory, 64);
        assert_eq!(metrics.total_services, 2);
    }

    #[test]
    fn test_metrics_are_pure() {
        let services = vec![service("a", 1, "100m", "128Mi"), service("b", 1, "200m", "256Mi")];
        let first = compute_metrics(&services);
        assert_eq!(first, compute_metrics(&services));
        assert_eq!(first.total_replicas as usize, first.total_services);
    }

    #[test]
    fn test_empty_services() {
        assert_eq!(compute_metrics(&[]), ArchitectureMetrics::default());
    }
}
