use super::{write_image_env, BUILD_STAGE};
use crate::catalog::DockerfileFlavor;
use crate::dockerfile::{BuildFileStrategy, DockerfileWriter, RenderContext};

const JRE_IMAGE: &str = "eclipse-temurin:17-jre";

/// Every JVM build is renamed to this in the runtime stage.
pub const JAR_NAME: &str = "app.jar";

/// Packages a jar with the build tool's image and runs it on a bare JRE.
pub struct JvmStrategy {
    pub flavor: DockerfileFlavor,
    pub builder_image: &'static str,
    /// `(source, destination)` pairs copied before dependencies resolve
    pub manifests: &'static [(&'static str, &'static str)],
    pub resolve: &'static str,
    pub package: &'static str,
    /// Build steps that already produce a jar
    pub package_markers: &'static [&'static str],
    pub jar_glob: &'static str,
}

impl BuildFileStrategy for JvmStrategy {
    fn flavor(&self) -> DockerfileFlavor {
        self.flavor
    }

    fn render(&self, out: &mut DockerfileWriter, ctx: &RenderContext<'_>) {
        out.from_stage(self.builder_image, BUILD_STAGE)
            .workdir(ctx.workdir)
            .blank();
        for (source, destination) in self.manifests {
            out.copy(source, destination);
        }
        out.run(self.resolve)
            .blank()
            .copy(".", ".")
            .run_all(ctx.build_commands());
        if !self.package_markers.iter().any(|m| ctx.has_build_step(m)) {
            out.run(self.package);
        }

        out.from_image(JRE_IMAGE)
            .workdir(ctx.workdir)
            .blank()
            .copy_from(BUILD_STAGE, &ctx.in_workdir(self.jar_glob), JAR_NAME)
            .blank();
        write_image_env(out, ctx);
        out.expose(ctx.port);
        if ctx.run_command().is_empty() {
            out.cmd("");
        } else {
            out.cmd_exec(&["java", "-jar", JAR_NAME]);
        }
    }
}

pub static MAVEN: JvmStrategy = JvmStrategy {
    flavor: DockerfileFlavor::Java,
    builder_image: "maven:3.9-eclipse-temurin-17",
    manifests: &[("pom.xml", "./")],
    resolve: "mvn -q dependency:go-offline",
    package: "mvn -q clean package -DskipTests",
    package_markers: &["package"],
    jar_glob: "target/*.jar",
};

pub static SBT: JvmStrategy = JvmStrategy {
    flavor: DockerfileFlavor::Scala,
    builder_image: "sbtscala/scala-sbt:eclipse-temurin-17.0.10_7_1.9.9_2.13.13",
    manifests: &[("build.sbt", "./"), ("project", "./project")],
    resolve: "sbt update",
    package: "sbt clean package",
    package_markers: &["package", "assembly"],
    jar_glob: "target/scala-*/*.jar",
};
