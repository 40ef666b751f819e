//! A full generation run: settings, default table, client overrides, and
//! every output file of every selected client.

use std::{
    collections::BTreeSet,
    fs::{self, File},
    path::PathBuf,
};

use crate::{
    error::Error,
    formats::{AndroidStringsEmitter, StringsEmitter, SwiftKeysEmitter, csv::IngestOptions},
    language::LanguageRegistry,
    merge::{OverrideReport, TranslationSetBuilder},
    settings::{TargetSetting, TranslationsSettings},
    traits::Emitter,
    types::{Catalog, Platform, TranslationSet},
    writer::{LanguageOutcome, TranslationWriter, WriteReport},
};

/// Options of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Root every client folder is resolved against.
    pub project_path: PathBuf,
    /// Folder holding the settings and tables, relative to the project.
    /// `None` means the current directory.
    pub csv_folder: Option<PathBuf>,
    pub settings_filename: String,
    pub csv_filename: String,
    /// Only generate for this client.
    pub client: Option<String>,
    /// Only generate for this platform.
    pub platform: Option<Platform>,
    /// Replace every translation with its key.
    pub debug: bool,
    /// Report skipped translations.
    pub verbose: bool,
    pub delimiter: u8,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            project_path: PathBuf::from(".."),
            csv_folder: None,
            settings_filename: "settings.json".to_string(),
            csv_filename: "translations.csv".to_string(),
            client: None,
            platform: None,
            debug: false,
            verbose: false,
            delimiter: b';',
        }
    }
}

impl GeneratorOptions {
    /// The folder the settings and tables are read from.
    pub fn csv_dir(&self) -> PathBuf {
        self.csv_folder
            .as_ref()
            .map(|folder| self.project_path.join(folder))
            .unwrap_or_default()
    }

    pub fn settings_path(&self) -> PathBuf {
        self.csv_dir().join(&self.settings_filename)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.csv_dir().join(&self.csv_filename)
    }
}

/// Everything needed to write one client.
#[derive(Debug, Clone)]
pub struct ClientPlan {
    pub target: TargetSetting,
    /// The platforms this run writes for the client.
    pub platforms: BTreeSet<Platform>,
    /// The default items with the client's overrides applied.
    pub catalog: Catalog,
    pub overrides: OverrideReport,
}

impl ClientPlan {
    pub fn does(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}

/// Outcomes of one client.
#[derive(Debug)]
pub struct ClientReport {
    pub client_name: String,
    pub android: Option<WriteReport>,
    pub ios_strings: Option<WriteReport>,
    pub ios_keys: Option<LanguageOutcome>,
}

impl ClientReport {
    pub fn is_success(&self) -> bool {
        self.android.as_ref().is_none_or(WriteReport::is_success)
            && self.ios_strings.as_ref().is_none_or(WriteReport::is_success)
            && self.ios_keys.as_ref().is_none_or(LanguageOutcome::is_success)
    }
}

/// Outcomes of a whole run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub clients: Vec<ClientReport>,
}

impl GenerationReport {
    /// Successful only if every file of every client was written.
    pub fn is_success(&self) -> bool {
        self.clients.iter().all(ClientReport::is_success)
    }
}

/// A prepared generation run.
#[derive(Debug)]
pub struct Generator {
    options: GeneratorOptions,
    settings: TranslationsSettings,
    registry: LanguageRegistry,
    clients: Vec<ClientPlan>,
}

impl Generator {
    /// Loads the settings and tables and merges every selected client.
    ///
    /// A missing settings file or default table is an error; a missing or
    /// broken client table only loses that client's overrides.
    pub fn prepare(options: GeneratorOptions) -> Result<Self, Error> {
        let settings = TranslationsSettings::read_from(options.settings_path())?;
        let registry = settings.language_registry();

        let csv_path = options.csv_path();
        if !csv_path.exists() {
            return Err(Error::MissingFile(csv_path));
        }

        let targets: Vec<&TargetSetting> = match &options.client {
            Some(name) => vec![
                settings
                    .find_target(name)
                    .ok_or_else(|| Error::UnknownClient(name.clone()))?,
            ],
            None => settings.targets.iter().collect(),
        };

        if let Some(platform) = options.platform {
            tracing::info!("generating for {}", platform);
        }

        let ingest = IngestOptions::new()
            .with_debug_mode(options.debug)
            .with_fallback_to_default_language(settings.write_english_if_missing)
            .with_delimiter(options.delimiter);
        let default_set = TranslationSet::read_from(&csv_path, &ingest, &registry)?;
        tracing::debug!(
            "{} default translations read from {}",
            default_set.len(),
            csv_path.display()
        );

        let mut clients = Vec::with_capacity(targets.len());
        for target in targets {
            let platforms = match options.platform {
                Some(platform) if !target.platforms().contains(&platform) => {
                    tracing::warn!(
                        "{} settings do not include {}, skipping",
                        target.client_name,
                        platform
                    );
                    continue;
                }
                Some(platform) => BTreeSet::from([platform]),
                None => target.platforms(),
            };

            let mut builder = TranslationSetBuilder::new(default_set.clone());
            let mut overrides = OverrideReport::default();
            if let Some(client_csv) = target.client_csv() {
                let client_set = TranslationSet::read_or_empty(
                    options.csv_dir().join(client_csv),
                    &ingest,
                    &registry,
                );
                overrides = builder.apply_overrides(&client_set.items);
                tracing::info!(
                    "{} translations overridden, {} translations added for client {}",
                    overrides.overridden,
                    overrides.added,
                    target.client_name
                );
                tracing::debug!(
                    "client {} catalog holds {} items after {} changes",
                    target.client_name,
                    builder.len(),
                    overrides.total()
                );
            }

            clients.push(ClientPlan {
                target: target.clone(),
                platforms,
                catalog: builder.finish(),
                overrides,
            });
        }

        Ok(Self {
            options,
            settings,
            registry,
            clients,
        })
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn settings(&self) -> &TranslationsSettings {
        &self.settings
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn clients(&self) -> &[ClientPlan] {
        &self.clients
    }

    fn writer<'a>(&'a self, plan: &'a ClientPlan, emitter: &'a dyn Emitter) -> TranslationWriter<'a> {
        TranslationWriter::new(
            &plan.target,
            &plan.catalog,
            &self.registry,
            emitter,
            &self.options.project_path,
        )
        .verbose(self.options.verbose)
    }

    fn swift_keys(&self, plan: &ClientPlan) -> SwiftKeysEmitter {
        SwiftKeysEmitter::new(plan.target.client_name.as_str(), self.settings.ios_key_case_type)
    }

    /// Every file this run writes, in writing order.
    ///
    /// Languages without a resolvable code are reported and left out.
    pub fn resolved_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for plan in &self.clients {
            if plan.does(Platform::Android) {
                paths.extend(self.writer(plan, &AndroidStringsEmitter).resolved_paths());
            }
            if plan.does(Platform::Ios) {
                paths.extend(self.writer(plan, &StringsEmitter).resolved_paths());
                let keys = self.swift_keys(plan);
                match self
                    .writer(plan, &keys)
                    .resolve_output_path(&plan.target.default_language)
                {
                    Ok(path) => paths.push(path),
                    Err(e) => tracing::warn!("{}: {}", plan.target.client_name, e),
                }
            }
        }
        paths
    }

    /// Creates every missing output file, along with its folders.
    ///
    /// Returns the created files.
    pub fn create_missing_paths(&self) -> Result<Vec<PathBuf>, Error> {
        let mut created = Vec::new();
        for path in self.resolved_paths() {
            if path.exists() {
                continue;
            }
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            File::create(&path)?;
            tracing::info!("created {}", path.display());
            created.push(path);
        }
        Ok(created)
    }

    /// Writes every file of every client.
    pub fn write_all(&self) -> GenerationReport {
        let mut report = GenerationReport::default();
        for plan in &self.clients {
            let client = self.write_client(plan);
            if client.is_success() {
                tracing::info!(
                    "translations for client {} generated successfully",
                    client.client_name
                );
            }
            report.clients.push(client);
        }
        report
    }

    fn write_client(&self, plan: &ClientPlan) -> ClientReport {
        let mut report = ClientReport {
            client_name: plan.target.client_name.clone(),
            android: None,
            ios_strings: None,
            ios_keys: None,
        };
        if plan.does(Platform::Android) {
            report.android = Some(self.writer(plan, &AndroidStringsEmitter).write_all());
        }
        if plan.does(Platform::Ios) {
            report.ios_strings = Some(self.writer(plan, &StringsEmitter).write_all());
            let keys = self.swift_keys(plan);
            report.ios_keys = Some(self.writer(plan, &keys).write_keys());
        }
        report
    }
}
