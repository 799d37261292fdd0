//! Command-line interface definitions.
//!
//! One entry point, two pipeline tunables plus the output path and the
//! header configuration. All options can also come from the environment.

use clap::Parser;

/// Command-line arguments for the aggregation run.
///
/// # Examples
///
/// ```sh
/// # Defaults: 300 articles per outlet, 6 concurrent outlet jobs
/// prensa_politica
///
/// # Smaller test run
/// prensa_politica --limit 5 --workers 2 -o prueba.csv
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Maximum articles per outlet
    #[arg(short, long, default_value_t = 300)]
    pub limit: usize,

    /// Maximum concurrent outlet jobs
    #[arg(short, long, default_value_t = 6)]
    pub workers: usize,

    /// Output CSV path
    #[arg(short, long, default_value = "noticias_consolidadas.csv")]
    pub output: String,

    /// HTTP headers as a JSON object, e.g. '{"User-Agent": "..."}'
    #[arg(long, env = "HEADER")]
    pub header: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["prensa_politica"]);
        assert_eq!(cli.limit, 300);
        assert_eq!(cli.workers, 6);
        assert_eq!(cli.output, "noticias_consolidadas.csv");
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "prensa_politica",
            "--limit",
            "5",
            "--workers",
            "2",
            "-o",
            "/tmp/prueba.csv",
        ]);
        assert_eq!(cli.limit, 5);
        assert_eq!(cli.workers, 2);
        assert_eq!(cli.output, "/tmp/prueba.csv");
    }

    #[test]
    fn test_cli_header_flag() {
        let cli = Cli::parse_from([
            "prensa_politica",
            "--header",
            r#"{"User-Agent": "Mozilla/5.0"}"#,
        ]);
        assert_eq!(cli.header.as_deref(), Some(r#"{"User-Agent": "Mozilla/5.0"}"#));
    }
}
