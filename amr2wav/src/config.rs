use {
    amr2wav::Partial,
    anyhow::{Result as Anyhow, Context, bail},
    camino::Utf8PathBuf as PathBuf,
    log::LevelFilter,
};

pub const MUTED_NOTICE: &str =
    "speech synthesis not available, output is muted: frames are checked and timed but decode to silence";

pub const USAGE: &str = "usage: amr2wav <input.amr> <output.wav>

note: speech synthesis not available, output is muted

environment:
  AMR2WAV_LOG            log level: off, error, warn, info (default), debug, trace
  AMR2WAV_KEEP_PARTIAL   1/true/yes: write what decoded before a corrupt frame";

#[derive(Debug, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub log_level: LevelFilter,
    pub partial: Partial,
}

impl Config {
    /// `None` when the arguments call for the usage text instead.
    pub fn from_env() -> Anyhow<Option<Self>> {
        Self::parse(
            std::env::args().skip(1),
            |key| std::env::var(key).ok(),
        )
    }

    pub fn parse<Args, Env>(args: Args, env: Env) -> Anyhow<Option<Self>>
    where
        Args: IntoIterator<Item = String>,
        Env: Fn(&str) -> Option<String>,
    {
        let args = args.into_iter().collect::<Vec<_>>();
        let [input, output] = &args[..] else {return Ok(None)};

        let log_level = match env("AMR2WAV_LOG") {
            Some(level) => level.parse::<LevelFilter>().ok()
                .with_context(|| format!("AMR2WAV_LOG: bad log level '{level}'"))?,
            None => LevelFilter::Info,
        };

        let partial = match env("AMR2WAV_KEEP_PARTIAL").as_deref() {
            None | Some("" | "0" | "false" | "no") => Partial::Discard,
            Some("1" | "true" | "yes") => Partial::Keep,
            Some(other) => bail!("AMR2WAV_KEEP_PARTIAL: expected a yes/no value, got '{other}'"),
        };

        Ok(Some(Config {
            input: input.clone().into(),
            output: output.clone().into(),
            log_level,
            partial,
        }))
    }
}
