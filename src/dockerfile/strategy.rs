use super::flavors::compiled::{DotNetStrategy, GodotStrategy, GO, RUST};
use super::flavors::generic::GenericStrategy;
use super::flavors::jvm::{MAVEN, SBT};
use super::flavors::managed::{
    JupyterStrategy, ELM, FLUTTER, NEXTJS, NODEJS, PHP, PYTHON, RUBY, R_SCRIPT,
};
use super::flavors::static_site::StaticSiteStrategy;
use super::flavors::vendor::{GRAFANA, PROMETHEUS, TERRAFORM};
use super::{DockerfileWriter, RenderContext};
use crate::catalog::DockerfileFlavor;

/// Writes one build file layout.
pub trait BuildFileStrategy: Sync {
    fn flavor(&self) -> DockerfileFlavor;

    fn render(&self, out: &mut DockerfileWriter, ctx: &RenderContext<'_>);

    /// Port the final image listens on.
    fn exposed_port(&self, ctx: &RenderContext<'_>) -> u16 {
        ctx.port
    }
}

/// The closed flavor-to-strategy table.
pub fn strategy_for(flavor: DockerfileFlavor) -> &'static dyn BuildFileStrategy {
    match flavor {
        DockerfileFlavor::Spa => &StaticSiteStrategy,
        DockerfileFlavor::NextJs => &NEXTJS,
        DockerfileFlavor::NodeJs => &NODEJS,
        DockerfileFlavor::Python => &PYTHON,
        DockerfileFlavor::Jupyter => &JupyterStrategy,
        DockerfileFlavor::Go => &GO,
        DockerfileFlavor::Java => &MAVEN,
        DockerfileFlavor::Php => &PHP,
        DockerfileFlavor::Ruby => &RUBY,
        DockerfileFlavor::Rust => &RUST,
        DockerfileFlavor::DotNet => &DotNetStrategy,
        DockerfileFlavor::R => &R_SCRIPT,
        DockerfileFlavor::Scala => &SBT,
        DockerfileFlavor::Grafana => &GRAFANA,
        DockerfileFlavor::Prometheus => &PROMETHEUS,
        DockerfileFlavor::Terraform => &TERRAFORM,
        DockerfileFlavor::Godot => &GodotStrategy,
        DockerfileFlavor::Flutter => &FLUTTER,
        DockerfileFlavor::Elm => &ELM,
        DockerfileFlavor::Generic => &GenericStrategy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{BuildConfig, EnvironmentVar};
    use crate::catalog::{LanguageId, TemplateCatalog};
    use crate::dockerfile::{BuildFileGenerator, GeneratorOptions, UNCONFIGURED_CMD};
    use yare::parameterized;

    fn from_framework(name: &str) -> BuildConfig {
        let defaults = TemplateCatalog::global()
            .framework_defaults(name)
            .expect("framework in catalog");
        BuildConfig {
            language: defaults.language,
            framework: Some(defaults.framework),
            build_commands: defaults.build_commands,
            run_command: defaults.run_command,
            ..Default::default()
        }
    }

    fn render(config: &BuildConfig) -> String {
        BuildFileGenerator::new(GeneratorOptions::default()).generate(config)
    }

    fn stages(text: &str) -> Vec<&str> {
        text.split("\nFROM ").collect()
    }

    #[test]
    fn test_every_flavor_has_a_strategy() {
        for flavor in DockerfileFlavor::all() {
            assert_eq!(strategy_for(*flavor).flavor(), *flavor);
        }
    }

    #[test]
    fn test_every_flavor_renders_deterministically() {
        let options = GeneratorOptions::default();
        let config = BuildConfig {
            language: LanguageId::Python,
            build_commands: vec!["make".to_string()],
            run_command: "./server --port 8080".to_string(),
            environment_vars: vec![EnvironmentVar::new("MODE", "prod")],
            ..Default::default()
        };
        for flavor in DockerfileFlavor::all() {
            let first = crate::dockerfile::generate(&config, *flavor, &options);
            let second = crate::dockerfile::generate(&config, *flavor, &options);
            assert_eq!(first, second, "{} is not deterministic", flavor);
            assert!(first.starts_with("FROM "), "{} output: {}", flavor, first);
            assert!(first.contains("WORKDIR /app"), "{} ignores workdir", flavor);
            assert!(first.contains("EXPOSE "), "{} exposes nothing", flavor);
        }
    }

    #[parameterized(
        spa = { DockerfileFlavor::Spa },
        go = { DockerfileFlavor::Go },
        java = { DockerfileFlavor::Java },
        rust = { DockerfileFlavor::Rust },
        dotnet = { DockerfileFlavor::DotNet },
        scala = { DockerfileFlavor::Scala },
    )]
    fn test_multi_stage_flavors_split_builder_and_runtime(flavor: DockerfileFlavor) {
        assert!(flavor.is_multi_stage());
        let config = BuildConfig {
            language: LanguageId::Go,
            run_command: "./app".to_string(),
            ..Default::default()
        };
        let out = crate::dockerfile::generate(&config, flavor, &GeneratorOptions::default());
        let stages = stages(&out);
        assert_eq!(stages.len(), 2, "{}", out);
        assert!(stages[0].contains(" AS build"));
        assert!(stages[1].contains("COPY --from=build "));
        assert!(!stages[1].contains(" AS "));
    }

    #[test]
    fn test_react_serves_static_bundle_on_80() {
        let out = render(&from_framework("react"));
        let stages = stages(&out);
        assert!(stages[0].starts_with("FROM node:18-alpine AS build"));
        assert!(stages[0].contains("RUN npm install\nRUN npm run build"));
        assert!(stages[0].contains("dist"));
        assert!(stages[0].contains("build"));
        assert!(stages[1].starts_with("nginx:alpine"));
        assert!(stages[1].contains("COPY --from=build /static /usr/share/nginx/html"));
        assert!(stages[1].contains("EXPOSE 80\n"));
        assert!(stages[1].contains(r#"CMD ["nginx", "-g", "daemon off;"]"#));
        assert!(!stages[1].contains("sed -i"));
    }

    #[test]
    fn test_static_site_explicit_port_rewrites_listen() {
        let mut config = from_framework("vue");
        config.container_port = Some(8080);
        let out = render(&config);
        assert!(out.contains("sed -i"));
        assert!(out.contains("listen\\18080;"));
        assert!(out.contains("EXPOSE 8080\n"));
    }

    #[test]
    fn test_go_copies_only_the_binary() {
        let out = render(&from_framework("gin"));
        let stages = stages(&out);
        assert!(stages[0].starts_with("FROM golang:1.21-alpine AS build"));
        assert!(stages[0].contains("COPY go.mod go.sum* ./"));
        assert!(stages[0].contains("RUN go build -o app ."));
        assert!(!stages[0].contains("CGO_ENABLED"));
        assert!(stages[1].starts_with("alpine:3.19"));
        assert!(stages[1].contains("COPY --from=build /app/app ./app"));
        assert!(stages[1].contains("EXPOSE 8080"));
        assert!(stages[1].contains(r#"CMD ["./app"]"#));
        assert!(!stages[1].contains("go build"));
    }

    #[test]
    fn test_rust_artifact_follows_run_command() {
        let mut config = from_framework("actix-web");
        config.run_command = "./target/release/shop-api --bind 0.0.0.0".to_string();
        let out = render(&config);
        assert!(out.contains(
            "COPY --from=build /app/target/release/shop-api ./target/release/shop-api"
        ));
        assert!(out.contains("FROM debian:bookworm-slim"));
        assert!(out.contains(r#"CMD ["./target/release/shop-api", "--bind", "0.0.0.0"]"#));
    }

    #[test]
    fn test_bare_binary_name_is_installed_on_path() {
        let mut config = from_framework("gin");
        config.build_commands = vec!["go build -o server .".to_string()];
        config.run_command = "server --port 8080".to_string();
        let out = render(&config);
        assert!(out.contains("COPY --from=build /app/server /usr/local/bin/server"));
        assert!(!out.contains("./app"));
        assert!(out.contains(r#"CMD ["server", "--port", "8080"]"#));

        let mut config = from_framework("actix-web");
        config.run_command = "shop-api".to_string();
        assert!(render(&config)
            .contains("COPY --from=build /app/target/release/shop-api /usr/local/bin/shop-api"));
    }

    #[test]
    fn test_java_runs_renamed_jar() {
        let out = render(&from_framework("spring boot"));
        let stages = stages(&out);
        assert!(stages[0].starts_with("FROM maven:3.9-eclipse-temurin-17 AS build"));
        assert!(stages[0].contains("RUN mvn clean package"));
        assert!(!stages[0].contains("-DskipTests\n"));
        assert!(stages[1].starts_with("eclipse-temurin:17-jre"));
        assert!(stages[1].contains("COPY --from=build /app/target/*.jar app.jar"));
        assert!(stages[1].contains(r#"CMD ["java", "-jar", "app.jar"]"#));
        assert!(!stages[1].contains("mvn"));
    }

    #[test]
    fn test_scala_adds_packaging_step() {
        let out = render(&from_framework("spark"));
        assert!(out.contains("RUN sbt compile\nRUN sbt clean package"));
        assert!(out.contains("target/scala-*/*.jar"));
    }

    #[test]
    fn test_dotnet_binds_resolved_port() {
        let out = render(&from_framework("asp.net core"));
        assert!(out.starts_with("FROM mcr.microsoft.com/dotnet/sdk:8.0 AS build"));
        assert!(out.contains("FROM mcr.microsoft.com/dotnet/aspnet:8.0"));
        assert!(out.contains("ENV ASPNETCORE_URLS=\"http://+:5000\""));
        assert!(out.contains(r#"CMD ["dotnet", "out/app.dll"]"#));
        assert_eq!(out.matches("dotnet publish").count(), 1);
    }

    #[test]
    fn test_python_installs_requirements_first() {
        let out = render(&from_framework("fastapi"));
        let install = out.find("RUN pip install --no-cache-dir").unwrap();
        let copy_all = out.find("COPY . .").unwrap();
        assert!(install < copy_all);
        assert!(out.contains(
            r#"CMD ["uvicorn", "main:app", "--host", "0.0.0.0", "--port", "8000"]"#
        ));
    }

    #[test]
    fn test_jupyter_binds_port() {
        let mut config = from_framework("jupyter");
        config.container_port = Some(9999);
        let out = render(&config);
        assert!(out.contains("EXPOSE 9999"));
        assert!(out.contains("\"--port=9999\""));
    }

    #[parameterized(
        grafana = { "grafana", "FROM grafana/grafana:latest", "EXPOSE 3000" },
        prometheus = { "prometheus", "FROM prom/prometheus:latest", "--web.listen-address=:9090" },
        terraform = { "terraform", "FROM hashicorp/terraform:latest", "RUN terraform init" },
    )]
    fn test_vendor_images_pass_through(framework: &str, image_line: &str, marker: &str) {
        let out = render(&from_framework(framework));
        assert!(out.starts_with(image_line), "{}", out);
        assert!(out.contains(marker), "{}", out);
        assert!(out.contains("ENTRYPOINT ["));
        assert_eq!(stages(&out).len(), 1);
    }

    #[test]
    fn test_empty_run_command_degrades_to_placeholder() {
        for flavor in DockerfileFlavor::all() {
            if flavor.is_vendor_passthrough() || *flavor == DockerfileFlavor::Spa {
                continue;
            }
            let config = BuildConfig::empty(LanguageId::JavaScript);
            let out = crate::dockerfile::generate(&config, *flavor, &GeneratorOptions::default());
            assert!(out.contains(UNCONFIGURED_CMD), "{} output: {}", flavor, out);
        }
    }

    #[test]
    fn test_secrets_never_baked_in() {
        let mut config = from_framework("express");
        config.environment_vars = vec![
            EnvironmentVar::new("LOG_FORMAT", "json"),
            EnvironmentVar::secret("DATABASE_PASSWORD", "hunter2"),
        ];
        let out = render(&config);
        assert!(out.contains("ENV LOG_FORMAT=\"json\""));
        assert!(!out.contains("DATABASE_PASSWORD"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn test_blank_build_commands_skipped() {
        let mut config = from_framework("express");
        config.build_commands = vec!["npm install".to_string(), "  ".to_string(), String::new()];
        let out = render(&config);
        assert!(!out.contains("RUN \n"));
        assert!(!out.lines().any(|l| l.trim() == "RUN"));
    }

    #[test]
    fn test_custom_working_directory_everywhere() {
        for flavor in DockerfileFlavor::all() {
            let config = BuildConfig {
                working_directory: Some("/srv/service".to_string()),
                run_command: "./bin/run".to_string(),
                ..Default::default()
            };
            let out = crate::dockerfile::generate(&config, *flavor, &GeneratorOptions::default());
            assert!(out.contains("WORKDIR /srv/service"), "{}", flavor);
            assert!(!out.contains("WORKDIR /app"), "{}", flavor);
        }
    }
}
