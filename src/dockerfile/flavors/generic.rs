use super::write_runtime_tail;
use crate::catalog::DockerfileFlavor;
use crate::dockerfile::{BuildFileStrategy, DockerfileWriter, RenderContext};

/// Copies the working tree and runs the declared build commands as-is.
pub struct GenericStrategy;

impl BuildFileStrategy for GenericStrategy {
    fn flavor(&self) -> DockerfileFlavor {
        DockerfileFlavor::Generic
    }

    fn render(&self, out: &mut DockerfileWriter, ctx: &RenderContext<'_>) {
        out.from_image(ctx.base_image).workdir(ctx.workdir).blank();
        out.copy(".", ".").run_all(ctx.build_commands());
        write_runtime_tail(out, ctx);
    }
}
