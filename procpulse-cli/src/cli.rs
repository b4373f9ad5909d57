//! Command-line argument parsing.

use clap::Parser;

/// procpulse - CPU utilization sampler
#[derive(Parser, Debug)]
#[command(name = "procpulse")]
#[command(about = "Prints per-state CPU utilization percentages once per second")]
#[command(version)]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    /// Log output format (pretty, json)
    #[arg(long, default_value = "pretty")]
    pub log_format: String,

    /// Path to the kernel counter source
    #[arg(long, default_value = "/proc/stat")]
    pub stat_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_are_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_target_the_kernel_source() {
        let args = Args::parse_from(["procpulse"]);
        assert_eq!(args.stat_path, "/proc/stat");
        assert_eq!(args.log_level, "warn");
    }
}
