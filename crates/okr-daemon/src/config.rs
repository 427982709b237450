/// Runtime settings for the daemon, resolved from the CLI.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Start with an empty store instead of the demo data.
    pub skip_seed: bool,
    /// Interval for the due-reminder sweep, in seconds. 0 disables it.
    pub reminder_sweep_seconds: u64,
}
