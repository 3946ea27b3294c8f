//! Command line interface.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use ems_filter::{parse_date, DateRange, ExactPredicate, SortSpec};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::fixtures::Fixtures;
use crate::render::{render_view, serialize_structured, OutputMode};
use crate::views::{self, ViewKind, ViewQuery};

/// Search the employee directory, leave history and audit log.
#[derive(Debug, Parser)]
#[command(name = "ems")]
#[command(version)]
#[command(about = "Search the employee directory, leave history and audit log")]
pub struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputMode::Auto, global = true)]
    pub output: OutputMode,

    /// Config file with view presets (default: $EMS_CONFIG)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory with employees.json, leave.json and audit.json
    #[arg(long, value_name = "DIR", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the employee directory
    Directory(ViewArgs),

    /// Browse leave requests
    Leave(ViewArgs),

    /// Review the audit log
    Audit(ViewArgs),

    /// List the fields a view can filter and sort on
    Fields {
        #[arg(value_enum)]
        view: ViewKind,
    },
}

/// Filter controls shared by every view.
#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Case-insensitive text searched in the view's search fields
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact match on a field; repeatable. A value of "all" disables it
    #[arg(short, long = "filter", value_name = "FIELD=VALUE")]
    pub filters: Vec<ExactPredicate>,

    /// Earliest date kept, inclusive
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Latest date kept, inclusive
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Sort order, e.g. "name" or "hire_date:desc"
    #[arg(long, value_name = "FIELD[:DIR]")]
    pub sort: Option<SortSpec>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Records per page (default from the view preset)
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl ViewArgs {
    /// Converts the flags into view control state.
    pub fn to_query(&self) -> Result<ViewQuery> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                bail!("--from {} is after --to {}", from, to);
            }
        }

        Ok(ViewQuery {
            search: self.search.clone(),
            filters: self.filters.clone(),
            dates: DateRange::new(self.from, self.to),
            sort: self.sort.clone(),
            page: self.page,
            page_size: self.page_size,
        })
    }
}

#[derive(Debug, Serialize)]
struct FieldInfo {
    name: &'static str,
    search: bool,
    date: bool,
}

/// Runs a parsed command line and returns what to print.
pub fn run(cli: &Cli) -> Result<String> {
    let config = Config::load(cli.config.as_deref()).context("failed to load config")?;

    let (view, args) = match &cli.command {
        Command::Directory(args) => (ViewKind::Directory, args),
        Command::Leave(args) => (ViewKind::Leave, args),
        Command::Audit(args) => (ViewKind::Audit, args),
        Command::Fields { view } => return describe_fields(&config, *view, cli.output),
    };

    let data = Fixtures::load(cli.data.as_deref()).context("failed to load data")?;
    let query = args.to_query()?;
    debug!(%view, ?query, "running view");

    let output = match view {
        ViewKind::Directory => render_view(&views::directory(&data, &config, &query), view, cli.output),
        ViewKind::Leave => render_view(&views::leave(&data, &config, &query), view, cli.output),
        ViewKind::Audit => render_view(&views::audit(&data, &config, &query), view, cli.output),
    }
    .with_context(|| format!("failed to render {} view", view))?;

    Ok(output)
}

fn describe_fields(config: &Config, view: ViewKind, mode: OutputMode) -> Result<String> {
    let preset = config.preset(view);
    let fields: Vec<FieldInfo> = view
        .fields()
        .iter()
        .map(|&name| FieldInfo {
            name,
            search: preset.search_fields.iter().any(|f| f == name),
            date: preset.date_field == name,
        })
        .collect();

    if mode.is_structured() {
        return serialize_structured(&fields, mode).context("failed to serialize fields");
    }

    let mut out = format!("{} fields:\n", view);
    for field in &fields {
        let mut tags = Vec::new();
        if field.search {
            tags.push("search");
        }
        if field.date {
            tags.push("date range");
        }
        out.push_str(format!("  {:<12} {}", field.name, tags.join(", ")).trim_end());
        out.push('\n');
    }
    Ok(out)
}
