use transgen::{Error, GenerationReport, Generator, TranslationsSettings};

use crate::args::Args;

/// What a run ended with.
#[derive(Debug)]
pub enum Outcome {
    /// The client names were printed.
    Listed,
    /// Files were generated, possibly with failures.
    Generated(GenerationReport),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        match self {
            Outcome::Listed => true,
            Outcome::Generated(report) => report.is_success(),
        }
    }
}

/// Print the client names of the settings file on one line
pub fn list_clients(args: &Args) -> Result<(), Error> {
    let settings = TranslationsSettings::read_from(args.generator_options().settings_path())?;
    println!("{}", settings.client_names().join(" "));
    Ok(())
}

/// Run a full generation.
pub fn run(args: &Args) -> Result<Outcome, Error> {
    if args.list_clients {
        list_clients(args)?;
        return Ok(Outcome::Listed);
    }

    let generator = Generator::prepare(args.generator_options())?;

    if args.create_missing_paths {
        let created = generator.create_missing_paths()?;
        if !created.is_empty() {
            tracing::info!("created {} missing files", created.len());
        }
    } else {
        let missing: Vec<_> = generator
            .resolved_paths()
            .into_iter()
            .filter(|path| !path.exists())
            .collect();
        for path in &missing {
            tracing::warn!("file {} does not exist", path.display());
        }
        if !missing.is_empty() {
            tracing::warn!(
                "run with --create-missing-paths to create them, or fix the paths and target languages in the settings file"
            );
        }
    }

    let report = generator.write_all();
    for client in &report.clients {
        if !client.is_success() {
            tracing::error!("translations for client {} were not fully generated", client.client_name);
        }
    }
    Ok(Outcome::Generated(report))
}
