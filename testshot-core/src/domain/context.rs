//! Execution context domain types

use serde::{Deserialize, Serialize};

/// Where the pipeline invocation originates from.
///
/// The context decides which identifiers are available for the test run
/// query: a build pipeline only knows its build id, a release pipeline
/// additionally carries the release and release-environment ids.
///
/// Built once from the pipeline environment at task start and treated
/// as immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionContext {
    /// Invocation from a build pipeline
    Build {
        /// The build that produced the test run
        build_id: i32,
    },
    /// Invocation from a release (deployment) pipeline
    Release {
        /// The build the release was created from
        build_id: i32,
        /// The release being deployed
        release_id: i32,
        /// The environment (stage) within the release
        release_environment_id: i32,
    },
    /// A host type this task does not know how to query for.
    ///
    /// Resolution treats this as "no run id" rather than a hard
    /// failure, so a misconfigured pipeline degrades gracefully.
    Unsupported {
        /// The raw `System.HostType` value as reported by the agent
        host_type: String,
    },
}

impl ExecutionContext {
    /// Classifies a `System.HostType` value.
    ///
    /// `build` maps to [`ExecutionContext::Build`]; `release` and
    /// `deployment` map to [`ExecutionContext::Release`] and require
    /// the release identifiers. Anything else becomes
    /// [`ExecutionContext::Unsupported`].
    pub fn from_host_type(
        host_type: &str,
        build_id: i32,
        release_id: Option<i32>,
        release_environment_id: Option<i32>,
    ) -> Self {
        match host_type.to_ascii_lowercase().as_str() {
            "build" => Self::Build { build_id },
            "release" | "deployment" => match (release_id, release_environment_id) {
                (Some(release_id), Some(release_environment_id)) => Self::Release {
                    build_id,
                    release_id,
                    release_environment_id,
                },
                // A release host without release ids cannot be queried.
                _ => Self::Unsupported {
                    host_type: host_type.to_string(),
                },
            },
            _ => Self::Unsupported {
                host_type: host_type.to_string(),
            },
        }
    }

    /// The build id carried by this context, if any.
    pub fn build_id(&self) -> Option<i32> {
        match self {
            Self::Build { build_id } | Self::Release { build_id, .. } => Some(*build_id),
            Self::Unsupported { .. } => None,
        }
    }
}
