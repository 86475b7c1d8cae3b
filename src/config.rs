use crate::error::ViewerError;
use crate::model::Team;
use clap::Parser;

pub const DEFAULT_FPS: u32 = 60;

#[derive(Parser, Debug)]
#[command(name = "f1viewer", version)]
#[command(about = "Procedural Formula 1 car rendered in the terminal")]
pub struct Cli {
    /// Team livery to paint the car in
    #[arg(long, value_enum, default_value_t = Team::Mercedes)]
    pub livery: Team,

    /// Target frame rate
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(10..=240))]
    pub fps: u32,

    /// Fixed viewport size in terminal cells, e.g. 120x40 (default: whole terminal)
    #[arg(long, value_parser = parse_size)]
    pub size: Option<(u16, u16)>,

    /// Start in wireframe mode
    #[arg(long)]
    pub wireframe: bool,

    /// Start with the debug panel shown
    #[arg(long)]
    pub debug: bool,
}

/// Parses `COLSxROWS`
pub fn parse_size(value: &str) -> Result<(u16, u16), ViewerError> {
    let invalid = || ViewerError::InvalidSize(value.to_string());
    let (columns, rows) = value
        .split_once(|c: char| c.eq_ignore_ascii_case(&'x'))
        .ok_or_else(invalid)?;
    let columns: u16 = columns.trim().parse().map_err(|_| invalid())?;
    let rows: u16 = rows.trim().parse().map_err(|_| invalid())?;
    if columns == 0 || rows == 0 {
        return Err(invalid());
    }
    Ok((columns, rows))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewerConfig {
    pub team: Team,
    pub target_fps: u32,
    pub size: Option<(u16, u16)>,
    pub wireframe: bool,
    pub debug: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            team: Team::Mercedes,
            target_fps: DEFAULT_FPS,
            size: None,
            wireframe: false,
            debug: false,
        }
    }
}

impl From<Cli> for ViewerConfig {
    fn from(cli: Cli) -> Self {
        ViewerConfig {
            team: cli.livery,
            target_fps: cli.fps,
            size: cli.size,
            wireframe: cli.wireframe,
            debug: cli.debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ViewerConfig, clap::Error> {
        let argv = std::iter::once("f1viewer").chain(args.iter().copied());
        Cli::try_parse_from(argv).map(ViewerConfig::from)
    }

    #[test]
    fn no_arguments_gives_defaults() {
        assert_eq!(parse(&[]).unwrap(), ViewerConfig::default());
    }

    #[test]
    fn all_options() {
        let config = parse(&[
            "--livery",
            "red-bull",
            "--fps",
            "30",
            "--size",
            "120x40",
            "--wireframe",
            "--debug",
        ])
        .unwrap();
        assert_eq!(config.team, Team::RedBull);
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.size, Some((120, 40)));
        assert!(config.wireframe && config.debug);
    }

    #[test]
    fn rejects_out_of_range_fps_and_unknown_livery() {
        assert!(parse(&["--fps", "5"]).is_err());
        assert!(parse(&["--fps", "500"]).is_err());
        assert!(parse(&["--livery", "williams"]).is_err());
    }

    #[test]
    fn size_parsing() {
        assert_eq!(parse_size("80x24").unwrap(), (80, 24));
        assert_eq!(parse_size("100X30").unwrap(), (100, 30));
        assert!(matches!(parse_size("80"), Err(ViewerError::InvalidSize(_))));
        assert!(parse_size("0x10").is_err());
        assert!(parse_size("axb").is_err());
        assert!(parse_size("70000x10").is_err());
    }
}
