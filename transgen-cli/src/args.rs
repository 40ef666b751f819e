use std::path::PathBuf;

use clap::Parser;
use transgen::{GeneratorOptions, Platform};

/// Generate Android and iOS string resources from a translations table.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Only write for the given platform (ios or android, case insensitive)
    #[arg(short, long, value_parser = parse_platform)]
    pub platform: Option<Platform>,

    /// Only write for the given client
    #[arg(short, long)]
    pub client: Option<String>,

    /// Folder with the settings and translations files, relative to the project
    /// (default: the current directory)
    #[arg(short = 'f', long)]
    pub csv_folder: Option<PathBuf>,

    /// Path to the project the client folders live in
    #[arg(short = 'P', long, default_value = "..")]
    pub project: PathBuf,

    /// Name of the default translations file
    #[arg(short = 'l', long, default_value = "translations.csv")]
    pub csv_filename: String,

    /// Name of the settings file
    #[arg(short, long, default_value = "settings.json")]
    pub settings: String,

    /// Print the clients found in the settings file and exit
    #[arg(long)]
    pub list_clients: bool,

    /// Replace every translation with its key
    #[arg(short, long)]
    pub debug: bool,

    /// Report missing and empty translations
    #[arg(short, long)]
    pub verbose: bool,

    /// Create missing output folders and files before writing
    #[arg(long)]
    pub create_missing_paths: bool,

    /// Column delimiter of the translations files
    #[arg(long, default_value = ";", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

impl Args {
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            project_path: self.project.clone(),
            csv_folder: self.csv_folder.clone(),
            settings_filename: self.settings.clone(),
            csv_filename: self.csv_filename.clone(),
            client: self.client.clone(),
            platform: self.platform,
            debug: self.debug,
            verbose: self.verbose,
            delimiter: self.delimiter,
        }
    }
}

/// Parse a platform name
pub fn parse_platform(value: &str) -> Result<Platform, String> {
    value.parse::<Platform>().map_err(|e| e.to_string())
}

/// Parse a single-byte delimiter; `tab` and `\t` stand for a tab
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                value
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["transgen"]).unwrap();
        let options = args.generator_options();
        assert_eq!(options, GeneratorOptions::default());
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "transgen",
            "-p",
            "iOS",
            "-c",
            "clientOne",
            "-f",
            "translations",
            "-P",
            "app",
            "-l",
            "strings.csv",
            "--delimiter",
            ",",
            "-d",
            "-v",
        ])
        .unwrap();
        let options = args.generator_options();
        assert_eq!(options.platform, Some(Platform::Ios));
        assert_eq!(options.client.as_deref(), Some("clientOne"));
        assert_eq!(options.csv_path(), PathBuf::from("app/translations/strings.csv"));
        assert_eq!(options.delimiter, b',');
        assert!(options.debug);
        assert!(options.verbose);
    }

    #[test]
    fn test_invalid_platform() {
        assert!(Args::try_parse_from(["transgen", "-p", "windows"]).is_err());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("ä").is_err());
    }
}
