//! Build descriptor flavors
//!
//! A flavor selects which generation strategy renders a service's build file.
//! The set is closed: anything unrecognised resolves to [`DockerfileFlavor::Generic`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DockerfileFlavor {
    /// Static single-page app: node builder, nginx runtime
    Spa,
    NextJs,
    NodeJs,
    Python,
    Jupyter,
    Go,
    Java,
    Php,
    Ruby,
    Rust,
    DotNet,
    R,
    Scala,
    Grafana,
    Prometheus,
    Terraform,
    Godot,
    Flutter,
    Elm,
    #[default]
    #[serde(other)]
    Generic,
}

impl DockerfileFlavor {
    pub fn all() -> &'static [DockerfileFlavor] {
        &[
            Self::Spa,
            Self::NextJs,
            Self::NodeJs,
            Self::Python,
            Self::Jupyter,
            Self::Go,
            Self::Java,
            Self::Php,
            Self::Ruby,
            Self::Rust,
            Self::DotNet,
            Self::R,
            Self::Scala,
            Self::Grafana,
            Self::Prometheus,
            Self::Terraform,
            Self::Godot,
            Self::Flutter,
            Self::Elm,
            Self::Generic,
        ]
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Spa => "spa",
            Self::NextJs => "nextjs",
            Self::NodeJs => "nodejs",
            Self::Python => "python",
            Self::Jupyter => "jupyter",
            Self::Go => "go",
            Self::Java => "java",
            Self::Php => "php",
            Self::Ruby => "ruby",
            Self::Rust => "rust",
            Self::DotNet => "dotnet",
            Self::R => "r",
            Self::Scala => "scala",
            Self::Grafana => "grafana",
            Self::Prometheus => "prometheus",
            Self::Terraform => "terraform",
            Self::Godot => "godot",
            Self::Flutter => "flutter",
            Self::Elm => "elm",
            Self::Generic => "generic",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|flavor| flavor.tag().eq_ignore_ascii_case(tag.trim()))
            .unwrap_or(Self::Generic)
    }

    /// Flavors whose final image is a separate runtime stage fed only by the build artifact.
    pub fn is_multi_stage(&self) -> bool {
        matches!(
            self,
            Self::Spa | Self::Go | Self::Java | Self::Rust | Self::DotNet | Self::Scala
        )
    }

    /// Flavors that wrap a prebuilt vendor image with mounted config and a fixed entry command.
    pub fn is_vendor_passthrough(&self) -> bool {
        matches!(self, Self::Grafana | Self::Prometheus | Self::Terraform)
    }
}

impl fmt::Display for DockerfileFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        spa = { "spa", DockerfileFlavor::Spa },
        nextjs = { "nextjs", DockerfileFlavor::NextJs },
        dotnet = { "DotNet", DockerfileFlavor::DotNet },
        padded = { " go ", DockerfileFlavor::Go },
        unknown = { "cobol", DockerfileFlavor::Generic },
        empty = { "", DockerfileFlavor::Generic },
    )]
    fn test_from_tag(tag: &str, expected: DockerfileFlavor) {
        assert_eq!(DockerfileFlavor::from_tag(tag), expected);
    }

    #[test]
    fn test_tags_match_serde_names() {
        for flavor in DockerfileFlavor::all() {
            let json = serde_json::to_string(flavor).unwrap();
            assert_eq!(json, format!("\"{}\"", flavor.tag()));
        }
    }

    #[test]
    fn test_unknown_tag_deserializes_to_generic() {
        let flavor: DockerfileFlavor = serde_json::from_str("\"haskell\"").unwrap();
        assert_eq!(flavor, DockerfileFlavor::Generic);
    }

    #[test]
    fn test_flavor_count() {
        assert_eq!(DockerfileFlavor::all().len(), 20);
        assert_eq!(
            DockerfileFlavor::all()
                .iter()
                .filter(|f| f.is_vendor_passthrough())
                .count(),
            3
        );
    }
}
