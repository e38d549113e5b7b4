use super::{write_runtime_tail, BUILD_STAGE};
use crate::catalog::DockerfileFlavor;
use crate::dockerfile::{BuildFileStrategy, DockerfileWriter, RenderContext};

/// Native binary built in a toolchain stage, copied alone into a slim runtime.
pub struct NativeBinaryStrategy {
    pub flavor: DockerfileFlavor,
    pub manifests: &'static [&'static str],
    pub fetch: Option<&'static str>,
    /// Build step guaranteed to run; added unless a build command already contains it
    pub compile: &'static str,
    pub compile_marker: &'static str,
    /// Binary path relative to the working directory when the run command names none
    pub default_artifact: &'static str,
    pub runtime_image: &'static str,
    pub runtime_setup: &'static str,
}

const BIN_DIR: &str = "/usr/local/bin";

impl NativeBinaryStrategy {
    /// Build-stage path of the binary and where the runtime stage puts it.
    ///
    /// A path in the run command is kept as is. A bare program name is looked up
    /// next to the default artifact and installed on `PATH`, so the command
    /// resolves it unchanged.
    fn artifact(&self, ctx: &RenderContext<'_>) -> (String, String) {
        let program = ctx.run_command().split_whitespace().next();
        match program {
            Some(program) if !program.contains('/') => {
                let built = match self.default_artifact.rsplit_once('/') {
                    Some((dir, _)) => format!("{}/{}", dir, program),
                    None => program.to_string(),
                };
                (ctx.in_workdir(&built), format!("{}/{}", BIN_DIR, program))
            }
            Some(path) => Self::placed(ctx, path.trim_start_matches("./")),
            None => Self::placed(ctx, self.default_artifact),
        }
    }

    fn placed(ctx: &RenderContext<'_>, artifact: &str) -> (String, String) {
        if artifact.starts_with('/') {
            (artifact.to_string(), artifact.to_string())
        } else {
            (ctx.in_workdir(artifact), format!("./{}", artifact))
        }
    }
}

impl BuildFileStrategy for NativeBinaryStrategy {
    fn flavor(&self) -> DockerfileFlavor {
        self.flavor
    }

    fn render(&self, out: &mut DockerfileWriter, ctx: &RenderContext<'_>) {
        out.from_stage(ctx.base_image, BUILD_STAGE)
            .workdir(ctx.workdir)
            .blank();
        if !self.manifests.is_empty() {
            out.copy(&self.manifests.join(" "), "./");
        }
        if let Some(fetch) = self.fetch {
            out.run(fetch);
        }
        out.blank().copy(".", ".").run_all(ctx.build_commands());
        if !ctx.has_build_step(self.compile_marker) {
            out.run(self.compile);
        }

        let (source, target) = self.artifact(ctx);

        out.from_image(self.runtime_image)
            .run(self.runtime_setup)
            .workdir(ctx.workdir)
            .blank()
            .copy_from(BUILD_STAGE, &source, &target);
        write_runtime_tail(out, ctx);
    }
}

pub static GO: NativeBinaryStrategy = NativeBinaryStrategy {
    flavor: DockerfileFlavor::Go,
    manifests: &["go.mod", "go.sum*"],
    fetch: Some("go mod download"),
    compile: "CGO_ENABLED=0 go build -o app .",
    compile_marker: "go build",
    default_artifact: "app",
    runtime_image: "alpine:3.19",
    runtime_setup: "apk --no-cache add ca-certificates",
};

pub static RUST: NativeBinaryStrategy = NativeBinaryStrategy {
    flavor: DockerfileFlavor::Rust,
    manifests: &[],
    fetch: None,
    compile: "cargo build --release",
    compile_marker: "cargo build",
    default_artifact: "target/release/app",
    runtime_image: "debian:bookworm-slim",
    runtime_setup: "apt-get update && apt-get install -y --no-install-recommends ca-certificates && rm -rf /var/lib/apt/lists/*",
};

const DOTNET_SDK_IMAGE: &str = "mcr.microsoft.com/dotnet/sdk:8.0";
const DOTNET_RUNTIME_IMAGE: &str = "mcr.microsoft.com/dotnet/aspnet:8.0";
const DOTNET_PUBLISH: &str = "dotnet publish -c Release -o out";

/// Publishes with the SDK image, runs the `out` directory on the ASP.NET runtime.
pub struct DotNetStrategy;

impl BuildFileStrategy for DotNetStrategy {
    fn flavor(&self) -> DockerfileFlavor {
        DockerfileFlavor::DotNet
    }

    fn render(&self, out: &mut DockerfileWriter, ctx: &RenderContext<'_>) {
        out.from_stage(DOTNET_SDK_IMAGE, BUILD_STAGE)
            .workdir(ctx.workdir)
            .blank()
            .copy("*.csproj", "./")
            .run("dotnet restore")
            .blank()
            .copy(".", ".")
            .run_all(ctx.build_commands());
        if !ctx.has_build_step("dotnet publish") {
            out.run(DOTNET_PUBLISH);
        }

        out.from_image(DOTNET_RUNTIME_IMAGE)
            .workdir(ctx.workdir)
            .blank()
            .copy_from(BUILD_STAGE, &ctx.in_workdir("out"), "./out")
            .env("ASPNETCORE_URLS", &format!("http://+:{}", ctx.port));
        write_runtime_tail(out, ctx);
    }
}

/// Exports a headless Linux build inside the Godot CI image.
pub struct GodotStrategy;

impl BuildFileStrategy for GodotStrategy {
    fn flavor(&self) -> DockerfileFlavor {
        DockerfileFlavor::Godot
    }

    fn render(&self, out: &mut DockerfileWriter, ctx: &RenderContext<'_>) {
        out.from_image(ctx.base_image)
            .workdir(ctx.workdir)
            .blank()
            .copy(".", ".")
            .run_all(ctx.build_commands());
        if !ctx.has_build_step("--export") {
            out.run("mkdir -p build && godot --no-window --export \"Linux/X11\" build/game.x86_64");
        }
        write_runtime_tail(out, ctx);
    }
}
