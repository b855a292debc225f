mod config;

use {
    amr::MuteDecoder,
    amr2wav::{convert, Partial},
    anyhow::{Result as Anyhow, Context},
    config::{Config, MUTED_NOTICE, USAGE},
};

fn main() {
    let config = match Config::from_env() {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("{USAGE}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("amr2wav: {err:#}");
            std::process::exit(1);
        }
    };

    log_init(config.log_level);

    if let Err(err) = run(&config) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Anyhow<()> {
    let Config{input, output, ..} = config;

    let amr = std::fs::read(input)
        .with_context(|| format!("reading {input}"))?;
    log::debug!("read {input}: {} bytes", amr.len());

    let start = std::time::Instant::now();
    let mut decoder = MuteDecoder::new();
    log::warn!("{MUTED_NOTICE}");

    let converted = convert(&mut decoder, &amr, config.partial)
        .with_context(|| format!("converting {input}"))?;

    if let Some(damage) = &converted.damage {
        debug_assert_eq!(config.partial, Partial::Keep);
        log::warn!("{input}: {damage}; keeping the {:.2}s decoded before it",
            converted.duration.as_secs_f32());
    }

    std::fs::write(output, &converted.wav)
        .with_context(|| format!("writing {output}"))?;

    if let Some(tally) = decoder.last_stream() {
        log::debug!("{input}: {} speech, {} comfort noise, {} no-data frames",
            tally.speech, tally.comfort, tally.no_data);
    }

    log::info!("converted {input} to {output}: {} samples, {:.2}s of muted audio, {} bytes; took {:.3}s",
        converted.samples,
        converted.duration.as_secs_f32(),
        converted.wav.len(),
        start.elapsed().as_secs_f32());

    Ok(())
}

fn log_init(filter: log::LevelFilter) {
    use simplelog::*;
    let term = TermLogger::new(
        filter,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
    // only fails if a logger is already installed
    let _ = CombinedLogger::init(vec![term]);
}
