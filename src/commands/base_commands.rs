use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::services::timeline_prediction::DEFAULT_TRIAL_COUNT;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Yaml,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict a construction timeline with Monte Carlo simulation
    Predict {
        /// Project YAML file; flags given on the command line override its values
        #[arg(short, long)]
        input: Option<String>,
        /// Project type: road_widening, flyover, bridge, tunnel, interchange, resurfacing or
        /// brt_corridor; other types use the road_widening rate [default: road_widening]
        #[arg(short, long)]
        project_type: Option<String>,
        /// Project length in kilometres [default: 1.0]
        #[arg(short, long)]
        length_km: Option<f64>,
        /// ISO-3166 alpha-2 country code [default: IN]
        #[arg(short, long)]
        country_code: Option<String>,
        /// Complexity tier: low, medium, high or very_high [default: medium]
        #[arg(short = 'x', long)]
        complexity: Option<String>,
        /// Project start date (YYYY-MM-DD) [default: today]
        #[arg(short, long)]
        start_date: Option<String>,
        /// Number of simulation trials
        #[arg(short = 'n', long, default_value_t = DEFAULT_TRIAL_COUNT)]
        trials: usize,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Output report file
        #[arg(short, long)]
        output: String,
        /// Output report format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Yaml)]
        format: ReportFormat,
        /// Optional YAML file overriding the built-in reference tables
        #[arg(short, long)]
        tables: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tables::TimelineTables;
    use clap::CommandFactory;

    #[test]
    fn predict_defaults_trials_and_format() {
        let args = CliArgs::parse_from(["infra-timeline", "predict", "-o", "report.yaml"]);

        if let Commands::Predict {
            trials,
            format,
            seed,
            start_date,
            input,
            ..
        } = args.command
        {
            assert_eq!(trials, DEFAULT_TRIAL_COUNT);
            assert_eq!(format, ReportFormat::Yaml);
            assert!(seed.is_none());
            assert!(start_date.is_none());
            assert!(input.is_none());
        } else {
            panic!("expected predict command");
        }
    }

    #[test]
    fn predict_accepts_project_flags() {
        let args = CliArgs::parse_from([
            "infra-timeline",
            "predict",
            "-p",
            "flyover",
            "-l",
            "2.5",
            "-c",
            "BR",
            "-x",
            "high",
            "-s",
            "2026-04-01",
            "-n",
            "200",
            "--seed",
            "7",
            "-f",
            "json",
            "-o",
            "report.json",
        ]);

        if let Commands::Predict {
            project_type,
            length_km,
            country_code,
            complexity,
            trials,
            seed,
            format,
            ..
        } = args.command
        {
            assert_eq!(project_type.as_deref(), Some("flyover"));
            assert_eq!(length_km, Some(2.5));
            assert_eq!(country_code.as_deref(), Some("BR"));
            assert_eq!(complexity.as_deref(), Some("high"));
            assert_eq!(trials, 200);
            assert_eq!(seed, Some(7));
            assert_eq!(format, ReportFormat::Json);
        } else {
            panic!("expected predict command");
        }
    }

    #[test]
    fn project_type_help_lists_only_built_in_types() {
        let command = CliArgs::command();
        let predict = command.find_subcommand("predict").unwrap();
        let arg = predict
            .get_arguments()
            .find(|arg| arg.get_id() == "project_type")
            .unwrap();
        let help = arg.get_help().unwrap().to_string();
        let listed = help
            .split(';')
            .next()
            .unwrap()
            .trim_start_matches("Project type:")
            .replace(" or ", ", ");

        let tables = TimelineTables::default();
        let fallback = tables.construction_rate("road_widening");
        let types: Vec<&str> = listed.split(',').map(str::trim).filter(|t| !t.is_empty()).collect();
        assert_eq!(types.len(), 7, "{types:?}");
        for project_type in types.iter().filter(|t| **t != "road_widening") {
            assert_ne!(
                tables.construction_rate(project_type),
                fallback,
                "{project_type} has no rate entry"
            );
        }
    }
}
