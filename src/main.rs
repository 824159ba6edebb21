use anyhow::Result;
use clap::Parser;
use drillmap::cli::{Cli, Commands};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Aggregate {
            input,
            format,
            output,
            days_back,
            from,
            to,
            type_filter,
            config,
        } => {
            let aggregate_config = drillmap::commands::AggregateConfig {
                input,
                format: format.into(),
                output,
                days_back,
                from,
                to,
                type_filter,
                config_file: config,
            };
            drillmap::commands::handle_aggregate(aggregate_config)
        }
        Commands::Stats {
            input,
            group_by,
            days_back,
            sector,
            type_filter,
            role,
            json,
            config,
        } => {
            let stats_config = drillmap::commands::StatsConfig {
                input,
                group_by: group_by.into(),
                days_back,
                sector,
                type_filter,
                role,
                json,
                config_file: config,
            };
            drillmap::commands::handle_stats(stats_config)
        }
        Commands::List {
            input,
            days_back,
            type_filter,
            sector,
            name,
            limit,
            config,
        } => {
            let list_config = drillmap::commands::ListConfig {
                input,
                days_back,
                type_filter,
                sector,
                name,
                limit,
                config_file: config,
            };
            drillmap::commands::handle_list(list_config)
        }
        Commands::Summary {
            input,
            id,
            copy,
            config,
        } => {
            let summary_config = drillmap::commands::SummaryConfig {
                input,
                id,
                copy,
                config_file: config,
            };
            drillmap::commands::handle_summary(summary_config)
        }
        Commands::Export {
            input,
            output,
            config,
        } => {
            let export_config = drillmap::commands::ExportConfig {
                input,
                output,
                config_file: config,
            };
            drillmap::commands::handle_export(export_config)
        }
    }
}
