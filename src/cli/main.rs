//

use precrec::cli::workflows::evaluate::evaluate;
use precrec::cli::workflows::split::split;
use precrec::cli::AppArgs;

const HELP: &str = "\
USAGE: precrec evaluate [OPTIONS] -p <SUBMISSION> -a <ANCESTORS> -b <BENCHMARK>
       precrec split [OPTIONS] -p <SUBMISSION> -m <NAMESPACE_MAP> -o <OUT_PREFIX>

SUBCOMMANDS:
  evaluate  Score a submission against a benchmark and report Fmax
  split     Split a submission into per-namespace files
OPTIONS:
  -t, --threads <THREADS>    Number of threads to use
  -h, --help                 Print this help menu
";

fn parse_arg() -> Result<AppArgs, Box<dyn std::error::Error>> {
    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        Some("evaluate") => {
            Ok(AppArgs::Evaluate {
                prediction: args.opt_value_from_str(["-p", "--prediction"])?,
                ancestors: args.opt_value_from_str(["-a", "--ancestors"])?,
                benchmark: args.opt_value_from_str(["-b", "--benchmark"])?,
                namespace: args.value_from_str(["-n", "--namespace"]).unwrap_or("BPO".to_string()),
                config: args.opt_value_from_str(["-c", "--config"])?,
                curve: args.opt_value_from_str("--curve")?,
                dump_confidence: args.opt_value_from_str("--dump-confidence")?,
                format: args.value_from_str(["-f", "--format"]).unwrap_or("default".to_string()),
                threads: args.value_from_str(["-t", "--threads"]).unwrap_or(1),
                verbose: args.contains(["-v", "--verbose"]),
                help: args.contains(["-h", "--help"]),
            })
        }
        Some("split") => {
            Ok(AppArgs::Split {
                prediction: args.opt_value_from_str(["-p", "--prediction"])?,
                namespace_map: args.opt_value_from_str(["-m", "--namespace-map"])?,
                output_prefix: args.opt_value_from_str(["-o", "--output"])?,
                verbose: args.contains(["-v", "--verbose"]),
                help: args.contains(["-h", "--help"]),
            })
        }
        Some(_) => {
            Err("Invalid subcommand".into())
        }
        None => {
            Ok(AppArgs::Global {
                help: args.contains(["-h", "--help"]),
            })
        }
    }
}

fn main() {
    let parsed_args = parse_arg().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    match parsed_args {
        AppArgs::Global { help } => {
            if help {
                println!("{}", HELP);
            } else {
                println!("No subcommand specified. Try `precrec --help` for more information.");
            }
        }
        env @ AppArgs::Evaluate { .. } => evaluate(env),
        env @ AppArgs::Split { .. } => split(env),
    }
}
