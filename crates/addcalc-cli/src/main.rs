//! Addcalc CLI: keypad addition calculator
//!
//! ## Usage
//!
//! ```bash
//! addcalc eval "2+3="                 # Sum through the service (query params)
//! addcalc eval "2+3=" --method path   # GET {endpoint}/2/3
//! addcalc eval "12.5~=" --json        # Local result as JSON
//! addcalc tui                         # Interactive keypad
//! ```

use addcalc::config::CalcConfig;
use addcalc::request::{Method, RandomIds};
use addcalc::service::HttpArithmetic;
use addcalc::session::Session;
use addcalc_cli::{
    logging, script, tui, Cli, CliConfig, CliResult, ColorChoice, Commands, EvalArgs,
    OutputFormat, Reporter, TuiArgs, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli);

    match cli.command {
        Commands::Eval(args) => {
            logging::init(&config);
            run_eval(config, &args)
        }
        Commands::Tui(args) => run_tui(config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();
    CliConfig::new().with_verbosity(verbosity).with_color(color)
}

fn calc_config(endpoint: Option<&str>) -> CalcConfig {
    endpoint.map_or_else(CalcConfig::new, |url| CalcConfig::new().with_endpoint(url))
}

fn run_eval(config: CliConfig, args: &EvalArgs) -> CliResult<()> {
    let keys = script::parse_script(&args.keys)?;
    let config = config.with_calc(calc_config(args.endpoint.as_deref()));
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet())
        .with_format(format);

    let service = HttpArithmetic::from_config(&config.calc);
    let mut session = Session::new(config.calc.clone());
    let method = Method::from(args.method);

    let runtime = tokio::runtime::Runtime::new()?;
    let sent = runtime.block_on(script::replay(
        &mut session,
        &keys,
        method,
        &service,
        &mut RandomIds::new(),
        &reporter,
    ))?;
    tracing::debug!(sent, keys = keys.len(), "key script replayed");

    reporter.print_session(&session)
}

fn run_tui(config: CliConfig, args: &TuiArgs) -> CliResult<()> {
    let calc = calc_config(args.endpoint.as_deref())
        .with_long_press(Duration::from_millis(args.long_press_ms));
    let config = config.with_calc(calc);
    logging::init_for_tui(&config);
    tui::run(&config)
}
