//! Task configuration
//!
//! Reads the pipeline environment once at task entry and turns it into
//! an explicit config value passed to the resolver and uploader.
//! Missing mandatory values fail fast here, before any network call.
//!
//! Task inputs arrive as `INPUT_*` variables, agent state as `SYSTEM_*`
//! and `BUILD_*`/`RELEASE_*` variables; the access token comes from the
//! job's service connection endpoint.

use anyhow::{Context, Result, bail};

use testshot_core::domain::ExecutionContext;

/// Default screenshot root, matching where the Android connected-test
/// runner writes failure screenshots.
const DEFAULT_SCREENSHOT_FOLDER: &str =
    "./app/build/reports/androidTests/connected/screenshots/failures/";

const VAR_ACCESS_TOKEN: &str = "ENDPOINT_AUTH_PARAMETER_SYSTEMVSSCONNECTION_ACCESSTOKEN";
const VAR_PROJECT: &str = "SYSTEM_TEAMPROJECT";
const VAR_HOST_TYPE: &str = "SYSTEM_HOSTTYPE";
const VAR_BUILD_ID: &str = "BUILD_BUILDID";
const VAR_RELEASE_ID: &str = "RELEASE_RELEASEID";
const VAR_RELEASE_ENVIRONMENT_ID: &str = "RELEASE_ENVIRONMENTID";
const INPUT_ORGANIZATION: &str = "INPUT_ORGANIZATION";
const INPUT_SCREENSHOT_FOLDER: &str = "INPUT_SCREENSHOTFOLDER";

/// Read-only key/value lookup over the pipeline environment.
///
/// A trait so tests can drive [`TaskConfig::load`] from a map instead
/// of mutating process-global environment variables.
pub trait PipelineEnv {
    fn get(&self, key: &str) -> Option<String>;
}

/// The agent's real environment.
pub struct AgentEnv;

impl PipelineEnv for AgentEnv {
    fn get(&self, key: &str) -> Option<String> {
        // The agent exports unset inputs as empty strings.
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

/// Task configuration
///
/// Built once at entry; the resolver and uploader only ever borrow it.
#[derive(Debug, Clone)]
pub struct TaskConfig {
    /// Azure DevOps organization name
    pub organization: String,
    /// Team project name
    pub project: String,
    /// Access token for the Test API
    pub access_token: String,
    /// Screenshot root folder, with a guaranteed trailing slash
    pub screenshot_folder: String,
    /// Build or release context for the run query
    pub context: ExecutionContext,
}

impl TaskConfig {
    /// Loads the configuration from a pipeline environment
    ///
    /// # Errors
    /// Fails with a descriptive message when a mandatory value is
    /// absent or a numeric identifier does not parse.
    pub fn load(env: &dyn PipelineEnv) -> Result<Self> {
        let Some(access_token) = env.get(VAR_ACCESS_TOKEN) else {
            bail!("Could not get access token. Please check the endpoint configuration.");
        };

        let Some(project) = env.get(VAR_PROJECT) else {
            bail!("Could not get project name. Please check the endpoint configuration.");
        };

        let Some(build_id) = env.get(VAR_BUILD_ID) else {
            bail!("Could not get build id. Please check the endpoint configuration.");
        };
        let build_id: i32 = build_id
            .parse()
            .with_context(|| format!("Build id is not numeric: {}", build_id))?;

        let Some(organization) = env.get(INPUT_ORGANIZATION) else {
            bail!("Organization is mandatory");
        };

        let host_type = env
            .get(VAR_HOST_TYPE)
            .unwrap_or_else(|| "build".to_string());
        let release_id = parse_optional_id(env, VAR_RELEASE_ID)?;
        let release_environment_id = parse_optional_id(env, VAR_RELEASE_ENVIRONMENT_ID)?;
        let context =
            ExecutionContext::from_host_type(&host_type, build_id, release_id, release_environment_id);

        Ok(Self {
            organization,
            project,
            access_token,
            screenshot_folder: normalize_folder(env.get(INPUT_SCREENSHOT_FOLDER)),
            context,
        })
    }
}

fn parse_optional_id(env: &dyn PipelineEnv, key: &str) -> Result<Option<i32>> {
    env.get(key)
        .map(|v| {
            v.parse()
                .with_context(|| format!("{} is not numeric: {}", key, v))
        })
        .transpose()
}

/// Applies the folder default and guarantees a trailing slash, so path
/// derivation can concatenate without caring.
fn normalize_folder(input: Option<String>) -> String {
    match input {
        None => DEFAULT_SCREENSHOT_FOLDER.to_string(),
        Some(folder) if folder.ends_with('/') => folder,
        Some(folder) => format!("{}/", folder),
    }
}
