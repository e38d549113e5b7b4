//! Interpreted runtimes driven by a package manager: dependencies are installed
//! from their manifests before the source is copied, so the install layer caches.

use super::{write_image_env, write_runtime_tail};
use crate::catalog::DockerfileFlavor;
use crate::dockerfile::{BuildFileStrategy, DockerfileWriter, RenderContext};

pub struct ManagedAppStrategy {
    pub flavor: DockerfileFlavor,
    /// Tooling installed before anything is copied
    pub setup: &'static [&'static str],
    /// Dependency manifests, copied ahead of the source tree
    pub manifests: &'static [&'static str],
    pub install: Option<&'static str>,
    pub runtime_env: &'static [(&'static str, &'static str)],
}

impl BuildFileStrategy for ManagedAppStrategy {
    fn flavor(&self) -> DockerfileFlavor {
        self.flavor
    }

    fn render(&self, out: &mut DockerfileWriter, ctx: &RenderContext<'_>) {
        out.from_image(ctx.base_image).workdir(ctx.workdir).blank();

        out.run_all(self.setup.iter().copied()).blank();

        if !self.manifests.is_empty() {
            out.copy(&self.manifests.join(" "), "./");
        }
        if let Some(install) = self.install {
            out.run(install);
        }
        out.blank();

        out.copy(".", ".").run_all(ctx.build_commands());

        if !self.runtime_env.is_empty() {
            out.blank();
            for (key, value) in self.runtime_env {
                out.env(key, value);
            }
        }
        write_runtime_tail(out, ctx);
    }
}

pub static NEXTJS: ManagedAppStrategy = ManagedAppStrategy {
    flavor: DockerfileFlavor::NextJs,
    setup: &[],
    manifests: &["package*.json"],
    install: Some("npm ci"),
    runtime_env: &[("NODE_ENV", "production"), ("NEXT_TELEMETRY_DISABLED", "1")],
};

pub static NODEJS: ManagedAppStrategy = ManagedAppStrategy {
    flavor: DockerfileFlavor::NodeJs,
    setup: &[],
    manifests: &["package*.json"],
    install: Some("npm ci"),
    runtime_env: &[],
};

pub static PYTHON: ManagedAppStrategy = ManagedAppStrategy {
    flavor: DockerfileFlavor::Python,
    setup: &[],
    manifests: &["requirements.txt"],
    install: Some("pip install --no-cache-dir -r requirements.txt"),
    runtime_env: &[("PYTHONUNBUFFERED", "1")],
};

pub static PHP: ManagedAppStrategy = ManagedAppStrategy {
    flavor: DockerfileFlavor::Php,
    setup: &[
        "curl -sS https://getcomposer.org/installer | php -- --install-dir=/usr/local/bin --filename=composer",
    ],
    manifests: &["composer.json", "composer.lock*"],
    install: Some("composer install --no-dev --no-interaction --no-scripts"),
    runtime_env: &[],
};

pub static RUBY: ManagedAppStrategy = ManagedAppStrategy {
    flavor: DockerfileFlavor::Ruby,
    setup: &[],
    manifests: &["Gemfile", "Gemfile.lock*"],
    install: Some("bundle install"),
    runtime_env: &[],
};

pub static R_SCRIPT: ManagedAppStrategy = ManagedAppStrategy {
    flavor: DockerfileFlavor::R,
    setup: &[
        "apt-get update && apt-get install -y --no-install-recommends libcurl4-openssl-dev libssl-dev && rm -rf /var/lib/apt/lists/*",
    ],
    manifests: &[],
    install: None,
    runtime_env: &[],
};

pub static FLUTTER: ManagedAppStrategy = ManagedAppStrategy {
    flavor: DockerfileFlavor::Flutter,
    setup: &[],
    manifests: &["pubspec.yaml", "pubspec.lock*"],
    install: Some("flutter pub get"),
    runtime_env: &[],
};

pub static ELM: ManagedAppStrategy = ManagedAppStrategy {
    flavor: DockerfileFlavor::Elm,
    setup: &["npm install -g elm"],
    manifests: &["elm.json"],
    install: None,
    runtime_env: &[],
};

/// Notebook server bound to the resolved port.
pub struct JupyterStrategy;

impl BuildFileStrategy for JupyterStrategy {
    fn flavor(&self) -> DockerfileFlavor {
        DockerfileFlavor::Jupyter
    }

    fn render(&self, out: &mut DockerfileWriter, ctx: &RenderContext<'_>) {
        out.from_image(ctx.base_image)
            .workdir(ctx.workdir)
            .blank()
            .copy("requirements.txt", ".")
            .run("pip install --no-cache-dir jupyter -r requirements.txt")
            .blank()
            .copy(".", ".")
            .run_all(ctx.build_commands())
            .blank();
        write_image_env(out, ctx);
        out.expose(ctx.port);

        if ctx.run_command().is_empty() {
            out.cmd("");
        } else {
            let port_flag = format!("--port={}", ctx.port);
            out.cmd_exec(&[
                "jupyter",
                "notebook",
                "--ip=0.0.0.0",
                &port_flag,
                "--no-browser",
                "--allow-root",
            ]);
        }
    }
}
