use clap::{Parser, Subcommand};
use colored::Colorize;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;
use subnet_advisor::config::AppConfig;
use subnet_advisor::cost::{CostInput, Provider};
use subnet_advisor::models::{ComplianceTier, Ipv4};
use subnet_advisor::output::{
    allocations_csv, blocks_csv, render_estimate, render_plan, render_report,
};
use subnet_advisor::processing::{builtin_scenarios, find_scenario};
use subnet_advisor::{Calculator, ErrorReport};

/// IPv4 subnet and cloud networking cost calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// JSON rate table (overrides SUBNET_ADVISOR_RATES)
    #[arg(long, global = true)]
    rates: Option<std::path::PathBuf>,

    /// Append calculation events to this JSON-lines file
    #[arg(long, global = true)]
    event_log: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Network, broadcast, usable range and VLSM advice for an address
    Subnet {
        /// IPv4 address, e.g. 192.168.1.10
        ip: String,
        /// Prefix length, 8-32 (a leading / is accepted)
        #[arg(short, long, default_value = "24")]
        prefix: String,
        /// Hosts the subnet must hold
        #[arg(short = 'n', long, default_value = "254")]
        hosts: String,
        /// Availability zones the subnet is spread across
        #[arg(long, default_value_t = 3)]
        azs: u32,
        /// standard, enhanced or strict
        #[arg(long, default_value = "standard")]
        compliance: ComplianceTier,
        /// Print VLSM blocks as CSV instead of the summary
        #[arg(long)]
        csv: bool,
    },
    /// Monthly networking cost estimate
    Cost {
        /// aws, azure or gcp
        #[arg(long, default_value = "aws")]
        provider: Provider,
        #[arg(long, default_value = "us-east-1")]
        region: String,
        #[arg(long, default_value_t = 5)]
        instances: u32,
        /// Monthly data transfer in GB
        #[arg(long, default_value_t = 1000.0)]
        data_transfer: f64,
        #[arg(long, default_value_t = 3)]
        azs: u32,
    },
    /// Lay out a reference architecture inside a parent block
    Scenarios {
        /// Parent block, e.g. 10.0.0.0/22. Lists the scenarios when omitted.
        parent: Option<String>,
        /// Scenario name or prefix; all scenarios when omitted
        #[arg(short, long)]
        name: Option<String>,
        /// Print allocations as CSV
        #[arg(long)]
        csv: bool,
    },
}

fn init_logging(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    if Path::new(&config.log_config).exists() {
        log4rs::init_file(&config.log_config, Default::default())?;
    } else {
        let stderr = ConsoleAppender::builder()
            .target(log4rs::append::console::Target::Stderr)
            .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
            .build();
        let log_config = Config::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)))
            .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
        log4rs::init_config(log_config)?;
    }
    Ok(())
}

/// Print an input error the same way for every subcommand and exit with 2.
fn exit_invalid(json: bool, report: ErrorReport) -> ! {
    match serde_json::to_string_pretty(&report) {
        Ok(text) if json => println!("{text}"),
        _ => eprintln!(
            "{} {}: {}",
            "error".on_red(),
            report.error_field,
            report.error_message
        ),
    }
    std::process::exit(2);
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if args.rates.is_some() {
        config.rates_path = args.rates.clone();
    }
    if args.event_log.is_some() {
        config.event_log = args.event_log.clone();
    }
    init_logging(&config)?;
    log::info!("#Start main() {:?}", args.command);

    let rates = match config.load_rate_table() {
        Ok(rates) => rates,
        Err(e) => exit_invalid(args.json, e.report()),
    };
    let mut calculator = Calculator::new(config.event_sink(), rates);

    match args.command {
        Command::Subnet {
            ip,
            prefix,
            hosts,
            azs,
            compliance,
            csv,
        } => match calculator.subnet(&ip, &prefix, &hosts, azs, compliance) {
            Ok(report) => {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else if csv {
                    print!("{}", blocks_csv(report.vlsm_blocks.as_deref().unwrap_or(&[])));
                } else {
                    print!("{}", render_report(&report));
                }
            }
            Err(e) => exit_invalid(args.json, e.report()),
        },
        Command::Cost {
            provider,
            region,
            instances,
            data_transfer,
            azs,
        } => {
            let input = CostInput {
                provider,
                region,
                instance_count: instances,
                data_transfer_gb: data_transfer,
                az_count: azs,
            };
            let estimate = match calculator.cost(&input) {
                Ok(estimate) => estimate,
                Err(e) => exit_invalid(args.json, e.report()),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&estimate)?);
            } else {
                print!("{}", render_estimate(&estimate));
            }
        }
        Command::Scenarios { parent, name, csv } => {
            let scenarios = match &name {
                Some(n) => match find_scenario(n) {
                    Some(scenario) => vec![scenario],
                    None => exit_invalid(
                        args.json,
                        ErrorReport {
                            error_field: "scenario".to_string(),
                            error_message: format!("Unknown scenario {n}"),
                        },
                    ),
                },
                None => builtin_scenarios(),
            };
            let Some(parent) = parent else {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&scenarios)?);
                } else {
                    for s in &scenarios {
                        println!(
                            "{} - {} ({} hosts, ${}/month est. savings)",
                            s.name.bold(),
                            s.description,
                            s.total_hosts(),
                            s.estimated_savings
                        );
                    }
                }
                return Ok(());
            };
            let parent = match Ipv4::new(&parent) {
                Ok(parent) => parent,
                Err(e) => exit_invalid(args.json, e.report()),
            };
            for scenario in &scenarios {
                match calculator.scenario(scenario, parent) {
                    Ok(plan) if args.json => println!("{}", serde_json::to_string_pretty(&plan)?),
                    Ok(plan) if csv => print!("{}", allocations_csv(&plan.allocations)),
                    Ok(plan) => print!("{}", render_plan(&plan)),
                    Err(e) => eprintln!("{} {}: {e}", "error".on_red(), scenario.name),
                }
            }
        }
    }

    Ok(())
}
