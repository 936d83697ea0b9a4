use anyhow::Result;
use clap::{Parser, Subcommand};
use neuronet_lib::app::{self, Overrides};
use neuronet_lib::model::AppConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "neuronet.toml", global = true)]
    config: PathBuf,

    /// Seed for weight initialization (overrides the config)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train a network on XOR
    Train {
        /// Maximum number of epochs
        #[arg(long)]
        epochs: Option<usize>,

        /// Learning rate
        #[arg(long)]
        learning_rate: Option<f64>,

        /// Write the trained parameters to this JSON file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Describe the configured network's graph
    Inspect {
        /// Load parameters from this JSON file first
        #[arg(long)]
        params: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    neuronet_core::init_logging();
    let args = Args::parse();

    let mut overrides = Overrides {
        seed: args.seed,
        ..Default::default()
    };
    if let Command::Train {
        epochs,
        learning_rate,
        ..
    } = &args.command
    {
        overrides.epochs = *epochs;
        overrides.learning_rate = *learning_rate;
    }
    let config = app::load_config(&args.config, &overrides)?;

    match args.command {
        Command::Train { save, .. } => {
            let outcome = app::train(&config, save.as_deref())?;
            for (input, output) in &outcome.outputs {
                println!("{input:?} -> {output:.4?}");
            }
            println!(
                "epochs: {}  error: {:.6}  converged: {}",
                outcome.report.epochs, outcome.report.final_error, outcome.report.converged
            );
            if let Some(path) = save {
                println!("Parameters saved to {}", path.display());
            }
        }
        Command::Inspect { params, json } => {
            let inspection = app::inspect(&config, params.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&inspection.summary)?);
            } else {
                let s = &inspection.summary;
                println!("neurons: {}  synapses: {}", s.neurons, s.synapses);
                println!("levels: {:?}", inspection.levels);
                println!(
                    "acyclic: {}  components: {}  max in/out degree: {}/{}",
                    s.acyclic, s.components, s.max_in_degree, s.max_out_degree
                );
                if let Some(error) = inspection.xor_error {
                    println!("XOR mean squared error: {error:.6}");
                }
            }
        }
        Command::Config => print_config(&config)?,
    }

    Ok(())
}

fn print_config(config: &AppConfig) -> Result<()> {
    println!("# fingerprint: {}", config.fingerprint());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
