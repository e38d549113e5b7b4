//! Strategy implementations, grouped by how the image is produced.

pub mod compiled;
pub mod generic;
pub mod jvm;
pub mod managed;
pub mod static_site;
pub mod vendor;

use super::{DockerfileWriter, RenderContext};

/// Name of the builder stage in multi-stage files.
pub const BUILD_STAGE: &str = "build";

pub(crate) fn write_image_env(out: &mut DockerfileWriter, ctx: &RenderContext<'_>) {
    for var in ctx.image_env() {
        out.env(var.key.trim(), &var.value);
    }
}

/// Image variables, exposed port and run command: the tail shared by runtime stages.
pub(crate) fn write_runtime_tail(out: &mut DockerfileWriter, ctx: &RenderContext<'_>) {
    out.blank();
    write_image_env(out, ctx);
    out.expose(ctx.port).cmd(ctx.run_command());
}
