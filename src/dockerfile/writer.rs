use super::command::{escape, exec_form, format_cmd};

/// Line-oriented build-file assembler.
///
/// Blank separators collapse, so strategies can call [`blank`](Self::blank)
/// freely without producing runs of empty lines.
#[derive(Debug, Default)]
pub struct DockerfileWriter {
    lines: Vec<String>,
}

impl DockerfileWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_image(&mut self, image: &str) -> &mut Self {
        self.stage_break();
        self.push(format!("FROM {}", image))
    }

    /// Starts a named stage that later stages copy from.
    pub fn from_stage(&mut self, image: &str, name: &str) -> &mut Self {
        self.stage_break();
        self.push(format!("FROM {} AS {}", image, name))
    }

    pub fn workdir(&mut self, dir: &str) -> &mut Self {
        self.push(format!("WORKDIR {}", dir))
    }

    pub fn copy(&mut self, src: &str, dest: &str) -> &mut Self {
        self.push(format!("COPY {} {}", src, dest))
    }

    pub fn copy_from(&mut self, stage: &str, src: &str, dest: &str) -> &mut Self {
        self.push(format!("COPY --from={} {} {}", stage, src, dest))
    }

    pub fn run(&mut self, command: &str) -> &mut Self {
        self.push(format!("RUN {}", command))
    }

    pub fn run_all<'a>(&mut self, commands: impl IntoIterator<Item = &'a str>) -> &mut Self {
        for command in commands {
            self.run(command);
        }
        self
    }

    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.push(format!("ENV {}=\"{}\"", key, escape(value)))
    }

    pub fn expose(&mut self, port: u16) -> &mut Self {
        self.push(format!("EXPOSE {}", port))
    }

    pub fn cmd(&mut self, run_command: &str) -> &mut Self {
        self.push(format_cmd(run_command))
    }

    pub fn cmd_exec(&mut self, args: &[&str]) -> &mut Self {
        self.push(format!("CMD {}", exec_form(args)))
    }

    pub fn entrypoint(&mut self, args: &[&str]) -> &mut Self {
        self.push(format!("ENTRYPOINT {}", exec_form(args)))
    }

    pub fn blank(&mut self) -> &mut Self {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
        self
    }

    pub fn finish(mut self) -> String {
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    fn stage_break(&mut self) {
        self.blank();
    }

    fn push(&mut self, line: String) -> &mut Self {
        self.lines.push(line);
        self
    }
}
