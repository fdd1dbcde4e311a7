use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use regional_dashboard::server::{self, AppState};
use regional_dashboard::table::{PAGE_SIZE, SortKey};
use regional_dashboard::{Dashboard, DashboardConfig, Dataset, Selection, Unit, YearRange};
use regional_dashboard::{filter_selection, storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rdash",
    version,
    about = "Filter, chart, summarize & serve a regional cars/euro/units dataset"
)]
struct Cli {
    /// Settings file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// CSV to load instead of the bundled sample (same header as the sample).
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the chart title, summary cards and one table page.
    Show(ShowArgs),
    /// Write the filtered rows to CSV or JSON.
    Export(ExportArgs),
    /// Render the chart to an image (.svg or .png).
    Plot(PlotArgs),
    /// List regions (with country counts), units and the year range.
    Options,
    /// Start the HTTP dashboard.
    Serve(ServeArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct SelectionArgs {
    /// Region name (e.g. Europe or World). Defaults to the first region.
    #[arg(short, long)]
    region: Option<String>,
    /// Country within the region; omit to aggregate the whole region.
    #[arg(short, long)]
    country: Option<String>,
    /// Units separated by comma or semicolon (e.g. cars,euro). Defaults to all.
    #[arg(short, long)]
    units: Option<String>,
    /// Year (YYYY) or inclusive range (YYYY:YYYY). Defaults to the full range.
    #[arg(short, long)]
    years: Option<String>,
}

#[derive(Args, Debug)]
struct ShowArgs {
    #[command(flatten)]
    selection: SelectionArgs,
    /// Sort keys, e.g. `value:desc,year`.
    #[arg(long)]
    sort: Option<String>,
    /// Table page (0-based).
    #[arg(long, default_value_t = 0)]
    page: usize,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    selection: SelectionArgs,
    /// Output file (format inferred by --format or extension).
    #[arg(long)]
    out: PathBuf,
    /// Output format (csv or json). If omitted: JSON for a .json path, CSV otherwise.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

#[derive(Args, Debug)]
struct PlotArgs {
    #[command(flatten)]
    selection: SelectionArgs,
    /// Chart path (.svg or .png).
    #[arg(long)]
    out: PathBuf,
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Interface to bind; overrides the config file.
    #[arg(long)]
    host: Option<String>,
    /// Port to bind; overrides the config file.
    #[arg(long)]
    port: Option<u16>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut config = DashboardConfig::load_or_default(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_path = Some(data);
    }
    let dataset = match &config.data_path {
        Some(p) => Dataset::from_path(p)?,
        None => Dataset::load()?,
    };
    let dashboard = Dashboard::new(dataset, config.chart_style()?).with_locale(config.locale.clone());

    match cli.cmd {
        Command::Show(args) => cmd_show(&dashboard, args),
        Command::Export(args) => cmd_export(&dashboard, args),
        Command::Plot(args) => cmd_plot(&dashboard, &config, args),
        Command::Options => cmd_options(&dashboard),
        Command::Serve(args) => cmd_serve(dashboard, config, args),
    }
}

fn selection(dashboard: &Dashboard, args: &SelectionArgs) -> Result<Selection> {
    let mut sel = dashboard.default_selection();
    if let Some(region) = &args.region {
        sel = sel.with_region(region.clone());
    }
    if let Some(country) = &args.country {
        sel = sel.with_country(country.clone());
    }
    if let Some(units) = &args.units {
        sel.units = Unit::parse_list(units)?;
    }
    if let Some(years) = &args.years {
        sel.years = years.parse::<YearRange>()?;
    }
    dashboard.validate(&sel)?;
    Ok(sel)
}

fn cmd_show(dashboard: &Dashboard, args: ShowArgs) -> Result<()> {
    let sel = selection(dashboard, &args.selection)?;
    let sort = SortKey::parse_list(args.sort.as_deref().unwrap_or(""))?;
    let mut views = dashboard.views(&sel);
    views.table.sort_by(&sort);

    println!("{}", views.chart.title);
    for (label, total) in views.summary.entries() {
        println!("{label:<12} {total:>16}");
    }
    println!();

    let table = &views.table;
    let header: Vec<&str> = table.columns.iter().map(|c| c.as_str()).collect();
    println!("{:<6} {:<6} {:>16}", header[0], header[1], header[2]);
    for row in table.page(args.page) {
        println!("{:<6} {:<6} {:>16}", row.year, row.unit, row.value);
    }
    println!(
        "page {} of {} ({} rows, {} per page)",
        args.page + 1,
        table.page_count(),
        table.rows.len(),
        PAGE_SIZE
    );
    Ok(())
}

fn cmd_export(dashboard: &Dashboard, args: ExportArgs) -> Result<()> {
    let sel = selection(dashboard, &args.selection)?;
    let filtered = filter_selection(dashboard.dataset(), &sel);
    let path = &args.out;
    match args.format {
        Some(OutFormat::Csv) => storage::save_csv(&filtered, path)?,
        Some(OutFormat::Json) => storage::save_json(&filtered, path)?,
        // .json writes JSON, anything else CSV
        None => storage::save_by_extension(&filtered, path)?,
    }
    eprintln!("Saved {} rows to {}", filtered.len(), path.display());
    Ok(())
}

fn cmd_plot(dashboard: &Dashboard, config: &DashboardConfig, args: PlotArgs) -> Result<()> {
    let sel = selection(dashboard, &args.selection)?;
    let views = dashboard.views(&sel);
    viz::render_chart_with_font(
        &views.chart,
        &args.out,
        args.width,
        args.height,
        config.font_path.as_deref(),
    )?;
    eprintln!("Wrote plot to {}", args.out.display());
    Ok(())
}

fn cmd_options(dashboard: &Dashboard) -> Result<()> {
    let options = dashboard.options();
    println!("Regions:");
    for region in &options.regions {
        println!("  {} ({} countries)", region.name, region.countries.len());
    }
    let units: Vec<&str> = options.units.iter().map(Unit::as_str).collect();
    println!("Units: {}", units.join(", "));
    println!(
        "Years: {}..{} (step {})",
        options.years.min, options.years.max, options.years.step
    );
    Ok(())
}

fn cmd_serve(dashboard: Dashboard, mut config: DashboardConfig, args: ServeArgs) -> Result<()> {
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    let addr = config.bind_addr();
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(AppState::new(dashboard, config), &addr))
}
