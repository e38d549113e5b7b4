//! Exec-form rendering of run commands.

/// Placeholder emitted when no run command is configured.
pub const UNCONFIGURED_CMD: &str = r#"CMD ["echo", "Please configure your run command"]"#;

const SHELL_OPERATORS: &[&str] = &["&&", "|", ";", "\n"];

/// Renders `CMD` for a run command.
///
/// Commands chaining with `&&`, `|`, `;` or a line break are wrapped in `sh -c`;
/// anything else is split on whitespace into exec-form arguments.
pub fn format_cmd(command: &str) -> String {
    let command = command.trim();
    if command.is_empty() {
        return UNCONFIGURED_CMD.to_string();
    }

    if needs_shell(command) {
        return format!("CMD {}", exec_form(&["sh", "-c", command]));
    }

    let parts: Vec<&str> = command.split_whitespace().collect();
    format!("CMD {}", exec_form(&parts))
}

pub fn needs_shell(command: &str) -> bool {
    SHELL_OPERATORS.iter().any(|op| command.contains(op))
}

/// JSON-array argument list: `["a", "b"]`.
pub fn exec_form<S: AsRef<str>>(args: &[S]) -> String {
    let quoted: Vec<String> = args
        .iter()
        .map(|arg| format!("\"{}\"", escape(arg.as_ref())))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Escapes a value for a double-quoted string so it stays on one line.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}
