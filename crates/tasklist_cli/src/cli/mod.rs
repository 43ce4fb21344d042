use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: add "Buy milk" --date 2025-12-24 --time 14:30
    Add {
        text: Option<String>,
        /// Secondary description
        #[arg(long)]
        desc: Option<String>,
        /// Scheduled date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Scheduled time of day (HH:MM)
        #[arg(long)]
        time: Option<String>,
        /// Attached photo; only the filename is kept
        #[arg(long)]
        photo: Option<String>,
    },
    /// List tasks, newest first
    List,
    /// Show details of a task
    ///
    /// Example: show task-1
    Show { id: String },
    /// Toggle a task's completed flag
    ///
    /// Example: toggle task-1
    Toggle { id: String },
    /// Delete a task
    ///
    /// Example: delete task-1
    Delete { id: String },
    /// Edit a task
    ///
    /// With field flags the edit is applied immediately; without them
    /// an editing session starts (save or cancel to leave it).
    ///
    /// Example: edit task-1 --text "Buy organic milk"
    /// Example: edit task-1
    Edit {
        id: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        photo: Option<String>,
    },
    /// Set the draft text of the task being edited
    Text { value: String },
    /// Set the draft description of the task being edited
    Desc { value: String },
    /// Set (or clear, with no value) the draft scheduled date
    Date { value: Option<String> },
    /// Set (or clear, with no value) the draft scheduled time
    Time { value: Option<String> },
    /// Set (or clear, with no value) the draft photo
    Photo { value: Option<String> },
    /// Show the in-progress draft
    Draft,
    /// Commit the in-progress edit
    Save,
    /// Discard the in-progress edit
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    Alias(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override into a structured target. Keys are
/// `theme` or `alias.NAME`.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let (key, value) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;
    let value = value.trim().to_string();

    let (field, alias_name) = match key.split_once('.') {
        Some((field, rest)) => (field.trim(), Some(rest.trim())),
        None => (key.trim(), None),
    };

    match field.to_ascii_lowercase().as_str() {
        "theme" => {
            if alias_name.is_some() {
                return Err("theme override cannot have subfields".to_string());
            }
            Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::Theme,
                value,
            })
        }
        "alias" | "aliases" => {
            let name = alias_name
                .filter(|segment| !segment.is_empty())
                .ok_or_else(|| "alias override requires an alias name".to_string())?;
            Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::Alias(name.to_string()),
                value,
            })
        }
        other => Err(format!("unknown config field '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigOverrideTarget, parse_config_override};

    #[test]
    fn parse_config_override_reads_theme() {
        let parsed = parse_config_override(" Theme = noir ").unwrap();
        assert_eq!(parsed.target, ConfigOverrideTarget::Theme);
        assert_eq!(parsed.value, "noir");
    }

    #[test]
    fn parse_config_override_reads_alias() {
        let parsed = parse_config_override("alias.ls=list").unwrap();
        assert_eq!(parsed.target, ConfigOverrideTarget::Alias("ls".to_string()));
        assert_eq!(parsed.value, "list");
    }

    #[test]
    fn parse_config_override_rejects_missing_equals() {
        let err = parse_config_override("theme").unwrap_err();
        assert!(err.contains("KEY=VALUE"));
    }

    #[test]
    fn parse_config_override_rejects_blank_alias_name() {
        let err = parse_config_override("alias. =list").unwrap_err();
        assert!(err.contains("alias name"));
    }

    #[test]
    fn parse_config_override_rejects_unknown_field() {
        let err = parse_config_override("palette=noir").unwrap_err();
        assert!(err.contains("unknown config field"));
    }

    #[test]
    fn parse_config_override_rejects_theme_subfield() {
        let err = parse_config_override("theme.accent=red").unwrap_err();
        assert!(err.contains("subfields"));
    }
}
