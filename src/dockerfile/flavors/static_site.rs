use super::{write_image_env, BUILD_STAGE};
use crate::catalog::DockerfileFlavor;
use crate::dockerfile::{BuildFileStrategy, DockerfileWriter, RenderContext};

const NGINX_IMAGE: &str = "nginx:alpine";
const NGINX_ROOT: &str = "/usr/share/nginx/html";
const NGINX_CONF: &str = "/etc/nginx/conf.d/default.conf";
const NGINX_PORT: u16 = 80;

/// Where the builder stage gathers the bundle, whichever of `dist`/`build` the tool wrote.
const ASSET_DIR: &str = "/static";

/// Single-page app: bundle in a node stage, serve the bundle from nginx.
pub struct StaticSiteStrategy;

impl StaticSiteStrategy {
    fn collect_assets() -> String {
        format!(
            "mkdir -p {out} && if [ -d dist ]; then cp -r dist/. {out}/; elif [ -d build ]; then cp -r build/. {out}/; fi",
            out = ASSET_DIR
        )
    }

    fn listen_on(port: u16) -> String {
        format!(
            "sed -i -e 's/listen\\(\\s*\\){default};/listen\\1{port};/' -e 's/\\[::\\]:{default};/[::]:{port};/' {conf}",
            default = NGINX_PORT,
            port = port,
            conf = NGINX_CONF
        )
    }
}

impl BuildFileStrategy for StaticSiteStrategy {
    fn flavor(&self) -> DockerfileFlavor {
        DockerfileFlavor::Spa
    }

    fn render(&self, out: &mut DockerfileWriter, ctx: &RenderContext<'_>) {
        out.from_stage(ctx.base_image, BUILD_STAGE)
            .workdir(ctx.workdir)
            .blank()
            .copy("package*.json", "./")
            .run("npm ci")
            .blank();
        // Bundlers inline variables at build time, so they belong to this stage.
        write_image_env(out, ctx);
        out.copy(".", ".")
            .run_all(ctx.build_commands())
            .run(&Self::collect_assets());

        out.from_image(NGINX_IMAGE)
            .copy_from(BUILD_STAGE, ASSET_DIR, NGINX_ROOT)
            .blank();

        let port = self.exposed_port(ctx);
        if port != NGINX_PORT {
            out.run(&Self::listen_on(port));
        }
        out.expose(port).cmd_exec(&["nginx", "-g", "daemon off;"]);
    }

    fn exposed_port(&self, ctx: &RenderContext<'_>) -> u16 {
        if ctx.port_overridden {
            ctx.port
        } else {
            NGINX_PORT
        }
    }
}
