use crate::architecture::metrics::{compute_metrics, ArchitectureMetrics};
use crate::error::ResolverError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    #[default]
    Web,
    Api,
    Database,
    Worker,
    Cache,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Web => "web",
            ServiceType::Api => "api",
            ServiceType::Database => "database",
            ServiceType::Worker => "worker",
            ServiceType::Cache => "cache",
        }
    }

    /// Whether the service gets an ingress path.
    pub fn is_exposed(&self) -> bool {
        matches!(self, ServiceType::Web | ServiceType::Api)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequirements {
    /// Millicores (`"500m"`) or whole cores (`"1"`)
    pub cpu: String,
    /// Binary-suffixed quantity (`"512Mi"`, `"1Gi"`)
    pub memory: String,
}

impl Default for ResourceRequirements {
    fn default() -> Self {
        Self {
            cpu: "100m".to_string(),
            memory: "128Mi".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    pub container: u16,
    pub service: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub path: String,
    /// Seconds between probes
    pub interval: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub replicas: u32,
    pub resources: ResourceRequirements,
    #[serde(default)]
    pub ports: Vec<PortMapping>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
}

impl ServiceConfig {
    /// Preset used when a service is added interactively.
    pub fn default_service() -> Self {
        Self {
            name: String::new(),
            service_type: ServiceType::Web,
            replicas: 1,
            resources: ResourceRequirements::default(),
            ports: vec![PortMapping {
                container: 3000,
                service: 80,
            }],
            health_check: Some(HealthCheck {
                path: "/health".to_string(),
                interval: 30,
            }),
        }
    }

    pub fn named(name: impl Into<String>, service_type: ServiceType) -> Self {
        Self {
            name: name.into(),
            service_type,
            ..Self::default_service()
        }
    }

    /// Every service except databases needs a build configuration.
    pub fn is_buildable(&self) -> bool {
        self.service_type != ServiceType::Database
    }
}

/// Shallow partial update for a service; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub service_type: Option<ServiceType>,
    pub replicas: Option<u32>,
    pub resources: Option<ResourceRequirements>,
    pub ports: Option<Vec<PortMapping>>,
    pub health_check: Option<HealthCheck>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressPath {
    pub path: String,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressConfig {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub paths: Vec<IngressPath>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadBalancerType {
    #[default]
    Internal,
    External,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancerConfig {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub lb_type: LoadBalancerType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub ingress: IngressConfig,
    pub load_balancer: LoadBalancerConfig,
}

impl NetworkConfig {
    /// Ingress path `/{name}/*` for every web/api service; load balancer off.
    pub fn derive_from(services: &[ServiceConfig], domain: Option<String>) -> Self {
        Self {
            ingress: IngressConfig {
                enabled: true,
                domain,
                paths: services
                    .iter()
                    .filter(|s| s.service_type.is_exposed())
                    .map(|s| IngressPath {
                        path: format!("/{}/*", s.name),
                        service: s.name.clone(),
                    })
                    .collect(),
            },
            load_balancer: LoadBalancerConfig {
                enabled: false,
                lb_type: LoadBalancerType::Internal,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ArchitectureIssue {
    EmptyName,
    NoServices,
    UnnamedService { index: usize },
}

impl fmt::Display for ArchitectureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchitectureIssue::EmptyName => write!(f, "project name is empty"),
            ArchitectureIssue::NoServices => write!(f, "architecture has no services"),
            ArchitectureIssue::UnnamedService { index } => {
                write!(f, "service #{} has no name", index + 1)
            }
        }
    }
}

/// Wire shape accepted on input. `networking` is always re-derived, never trusted.
#[derive(Debug, Deserialize)]
struct ArchitectureInput {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    services: Vec<ServiceConfig>,
    #[serde(default)]
    networking: Option<NetworkConfig>,
    #[serde(default)]
    environment: Environment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ArchitectureInput")]
pub struct ProjectArchitecture {
    pub name: String,
    pub description: String,
    services: Vec<ServiceConfig>,
    networking: NetworkConfig,
    pub environment: Environment,
}

impl From<ArchitectureInput> for ProjectArchitecture {
    fn from(input: ArchitectureInput) -> Self {
        let domain = input.networking.and_then(|n| n.ingress.domain);
        let mut architecture = ProjectArchitecture::new(input.name, input.description, input.services);
        architecture.environment = input.environment;
        architecture.set_ingress_domain(domain);
        architecture
    }
}

impl ProjectArchitecture {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        services: Vec<ServiceConfig>,
    ) -> Self {
        let networking = NetworkConfig::derive_from(&services, None);
        Self {
            name: name.into(),
            description: description.into(),
            services,
            networking,
            environment: Environment::Development,
        }
    }

    pub fn services(&self) -> &[ServiceConfig] {
        &self.services
    }

    pub fn networking(&self) -> &NetworkConfig {
        &self.networking
    }

    pub fn set_ingress_domain(&mut self, domain: Option<String>) {
        self.networking.ingress.domain = domain;
    }

    /// Non-database services in their original order.
    pub fn buildable_services(&self) -> Vec<&ServiceConfig> {
        self.services.iter().filter(|s| s.is_buildable()).collect()
    }

    pub fn validation_issues(&self) -> Vec<ArchitectureIssue> {
        let mut issues = Vec::new();
        if self.name.trim().is_empty() {
            issues.push(ArchitectureIssue::EmptyName);
        }
        if self.services.is_empty() {
            issues.push(ArchitectureIssue::NoServices);
        }
        for (index, service) in self.services.iter().enumerate() {
            if service.name.trim().is_empty() {
                issues.push(ArchitectureIssue::UnnamedService { index });
            }
        }
        issues
    }

    pub fn is_valid(&self) -> bool {
        self.validation_issues().is_empty()
    }

    pub fn metrics(&self) -> ArchitectureMetrics {
        compute_metrics(&self.services)
    }

    /// Appends a preset service named `service-{n}`; returns its index.
    pub fn add_service(&mut self) -> usize {
        let mut service = ServiceConfig::default_service();
        service.name = format!("service-{}", self.services.len() + 1);
        self.services.push(service);
        self.refresh_networking();
        self.services.len() - 1
    }

    pub fn push_service(&mut self, service: ServiceConfig) -> usize {
        self.services.push(service);
        self.refresh_networking();
        self.services.len() - 1
    }

    pub fn remove_service(&mut self, index: usize) -> Result<ServiceConfig, ResolverError> {
        self.check_index(index)?;
        if self.services.len() == 1 {
            return Err(ResolverError::LastService);
        }
        let removed = self.services.remove(index);
        self.refresh_networking();
        Ok(removed)
    }

    pub fn update_service(&mut self, index: usize, patch: ServicePatch) -> Result<(), ResolverError> {
        self.check_index(index)?;
        let service = &mut self.services[index];
        if let Some(name) = patch.name {
            service.name = name;
        }
        if let Some(service_type) = patch.service_type {
            service.service_type = service_type;
        }
        if let Some(replicas) = patch.replicas {
            service.replicas = replicas;
        }
        if let Some(resources) = patch.resources {
            service.resources = resources;
        }
        if let Some(ports) = patch.ports {
            service.ports = ports;
        }
        if let Some(health_check) = patch.health_check {
            service.health_check = Some(health_check);
        }
        self.refresh_networking();
        Ok(())
    }

    pub fn can_remove_service(&self) -> bool {
        self.services.len() > 1
    }

    fn check_index(&self, index: usize) -> Result<(), ResolverError> {
        if index >= self.services.len() {
            return Err(ResolverError::ServiceIndexOutOfRange {
                index,
                len: self.services.len(),
            });
        }
        Ok(())
    }

    fn refresh_networking(&mut self) {
        let domain = self.networking.ingress.domain.take();
        self.networking = NetworkConfig::derive_from(&self.services, domain);
    }
}
