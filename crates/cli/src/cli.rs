use clap::{Parser, Subcommand};

/// Edit recurrence expressions and weekly/monthly schedules.
///
/// Every command that takes a VALUE reads it from the argument, or from
/// stdin when the argument is omitted or `-`.
#[derive(Parser, Debug)]
#[command(name = "tempo", about = "Edit recurrence expressions and schedules")]
pub struct CliArgs {
    /// Path to config file (default: ~/.config/tempo/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the default expression
    New,

    /// Render an expression as a tree
    Show { value: Option<String> },

    /// Print the canonical form of an expression
    Format { value: Option<String> },

    /// Validate an expression, or a schedule when the value is a JSON object
    Validate {
        value: Option<String>,

        /// Treat NOT nodes with other than one operand as errors
        #[arg(long)]
        strict: bool,
    },

    /// Apply edit operations and print the resulting value
    Edit {
        value: Option<String>,

        /// add-leaf PATH [JSON] | add-set PATH [JSON] | remove PATH |
        /// operator PATH OP | set PATH from|to|unit|recurrence TEXT
        #[arg(long = "op", required = true)]
        ops: Vec<String>,
    },

    /// Drive the weekly/monthly schedule widget
    Schedule {
        value: Option<String>,

        /// Switch repeat mode: weekly or monthly
        #[arg(long)]
        repeats: Option<String>,

        /// Append a weekly segment, "WEEKDAY FROM TO" (e.g. "2 9 17.5")
        #[arg(long = "add-segment")]
        add_segments: Vec<String>,

        /// Remove the weekly segment at this index (must be the last one)
        #[arg(long = "remove-segment")]
        remove_segments: Vec<usize>,

        /// Monthly day number
        #[arg(long)]
        repeat_on: Option<String>,
    },
}
