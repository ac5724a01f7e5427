use std::io::Write;

use anyhow::Context;
use clap::Parser;
use mfcc_app::cli::Cli;
use mfcc_app::pipeline;
use mfcc_core::frame::SpectralFrame;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = pipeline::load_config(&cli)?;
    log::info!("Reading spectral frame: {}", cli.spectrum.display());
    let frame = SpectralFrame::load(&cli.spectrum)?;

    let output = pipeline::compute(&cli, &config, &frame)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(pipeline::render(&output).as_bytes())
        .context("Impossible d'écrire sur stdout")?;
    Ok(())
}
