use super::write_image_env;
use crate::catalog::DockerfileFlavor;
use crate::dockerfile::{BuildFileStrategy, DockerfileWriter, RenderContext};

/// Public image used as-is, with project config files layered in and a fixed entrypoint.
pub struct VendorImageStrategy {
    pub flavor: DockerfileFlavor,
    pub image: &'static str,
    /// `(source, destination)` pairs
    pub files: &'static [(&'static str, &'static str)],
    pub prepare: &'static [&'static str],
    /// Variable the image reads its listen port from
    pub port_env: Option<&'static str>,
    pub entrypoint: fn(u16) -> Vec<String>,
}

impl BuildFileStrategy for VendorImageStrategy {
    fn flavor(&self) -> DockerfileFlavor {
        self.flavor
    }

    fn render(&self, out: &mut DockerfileWriter, ctx: &RenderContext<'_>) {
        out.from_image(self.image).workdir(ctx.workdir).blank();
        for (source, destination) in self.files {
            out.copy(source, destination);
        }
        out.run_all(self.prepare.iter().copied()).blank();

        write_image_env(out, ctx);
        if let Some(key) = self.port_env {
            out.env(key, &ctx.port.to_string());
        }

        let entrypoint = (self.entrypoint)(ctx.port);
        let args: Vec<&str> = entrypoint.iter().map(String::as_str).collect();
        out.expose(ctx.port).entrypoint(&args);
    }
}

fn grafana_entrypoint(_port: u16) -> Vec<String> {
    [
        "grafana",
        "server",
        "--homepath=/usr/share/grafana",
        "--config=/etc/grafana/grafana.ini",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn prometheus_entrypoint(port: u16) -> Vec<String> {
    vec![
        "/bin/prometheus".to_string(),
        "--config.file=/etc/prometheus/prometheus.yml".to_string(),
        "--storage.tsdb.path=/prometheus".to_string(),
        format!("--web.listen-address=:{}", port),
    ]
}

fn terraform_entrypoint(_port: u16) -> Vec<String> {
    ["terraform", "apply", "-auto-approve"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub static GRAFANA: VendorImageStrategy = VendorImageStrategy {
    flavor: DockerfileFlavor::Grafana,
    image: "grafana/grafana:latest",
    files: &[
        ("grafana.ini", "/etc/grafana/grafana.ini"),
        ("dashboards/", "/var/lib/grafana/dashboards/"),
    ],
    prepare: &[],
    port_env: Some("GF_SERVER_HTTP_PORT"),
    entrypoint: grafana_entrypoint,
};

pub static PROMETHEUS: VendorImageStrategy = VendorImageStrategy {
    flavor: DockerfileFlavor::Prometheus,
    image: "prom/prometheus:latest",
    files: &[
        ("prometheus.yml", "/etc/prometheus/prometheus.yml"),
        ("rules/", "/etc/prometheus/rules/"),
    ],
    prepare: &[],
    port_env: None,
    entrypoint: prometheus_entrypoint,
};

pub static TERRAFORM: VendorImageStrategy = VendorImageStrategy {
    flavor: DockerfileFlavor::Terraform,
    image: "hashicorp/terraform:latest",
    files: &[(".", ".")],
    prepare: &["terraform init"],
    port_env: None,
    entrypoint: terraform_entrypoint,
};
