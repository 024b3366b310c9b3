/// Logging configuration shared by all binaries of the workspace.
#[derive(Clone, Debug)]
pub struct Config {
    /// `EnvFilter` directives, e.g. `warn,fee_calculator=debug`.
    pub env_filter: String,
    pub use_json_format: bool,
}

impl Config {
    pub fn new(env_filter: &str, use_json_format: bool) -> Self {
        Self {
            env_filter: env_filter.to_string(),
            use_json_format,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("info", false)
    }
}
