//! Architecture model: services, derived networking and aggregate metrics.

pub mod metrics;
pub mod model;
pub mod quantity;

pub use metrics::{compute_metrics, ArchitectureMetrics};
pub use model::{
    ArchitectureIssue, Environment, HealthCheck, IngressConfig, IngressPath, LoadBalancerConfig,
    LoadBalancerType, NetworkConfig, PortMapping, ProjectArchitecture, ResourceRequirements,
    ServiceConfig, ServicePatch, ServiceType,
};
pub use quantity::{format_mebibytes, format_millicpu, parse_cpu, parse_memory, QuantityError};
