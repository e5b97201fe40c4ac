use anyhow::Context;
use plate_scanner::config::ScannerConfig;
use plate_scanner::scanner::ExitReason;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ScannerConfig::default();
    let scanner = plate_scanner::open(config).context("cannot start plate scanner")?;

    match scanner.run()? {
        ExitReason::Quit => log::info!("Stopped by operator"),
        ExitReason::StreamEnded => log::info!("Camera stopped producing frames"),
    }
    Ok(())
}
