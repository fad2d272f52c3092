//! Runs a greeter in the terminal.

use std::io;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use greeter_core::{GreeterConfig, Locale, Variant};
use greeter_tui::TuiAppBuilder;

#[derive(Debug, Parser)]
#[command(name = "greeter-tui", version, about = "Greeter widget in the terminal")]
struct Args {
    /// Widget variant (`reactive` or `vanilla`).
    #[arg(long, default_value = "reactive")]
    variant: Variant,

    /// Message catalogue (`en` or `es`).
    #[arg(long, default_value = "en")]
    lang: Locale,

    /// Initial display name.
    #[arg(long)]
    name: Option<String>,

    /// Initial click count. Parsed leniently, like the `count` attribute.
    #[arg(long)]
    count: Option<String>,

    /// Content projected into the widget's slot.
    #[arg(long)]
    slot: Option<String>,

    /// JSON configuration; overrides the other flags.
    #[arg(long)]
    config: Option<String>,

    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, default_value = "warn")]
    log: String,
}

impl Args {
    fn greeter_config(&self) -> Result<GreeterConfig> {
        if let Some(json) = &self.config {
            return GreeterConfig::from_json(json).wrap_err("invalid --config");
        }

        let mut builder = GreeterConfig::builder()
            .variant(self.variant)
            .locale(self.lang);
        if let Some(name) = &self.name {
            builder = builder.initial_name(name.clone());
        }
        if let Some(count) = &self.count {
            builder = builder.initial_count_from(count);
        }
        Ok(builder.build())
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    greeter::logging::install_tracing_with(&args.log);
    greeter::logging::install_panic_logger();

    let config = args.greeter_config()?;
    let mut app = TuiAppBuilder::new()
        .with_config(config)
        .with_slot(args.slot)
        .build()
        .wrap_err("failed to open terminal")?;

    app.run(io::stdin().lock()).wrap_err("terminal session failed")?;
    Ok(())
}
