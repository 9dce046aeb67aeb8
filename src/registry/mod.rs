use crate::constants::REGISTRY_FILE_NAME;
use crate::error::AppError;
use crate::models::AppRecord;
use crate::platform::ForegroundProbe;
use directories::ProjectDirs;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default application-scoped location of the registry artifact.
pub fn default_registry_path() -> Result<PathBuf, AppError> {
    let proj_dirs = ProjectDirs::from("com", "kidsafe", "KidSafe").ok_or(AppError::NoDataDir)?;
    let data_dir = proj_dirs.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join(REGISTRY_FILE_NAME))
}

/// Durable allow/block registry of launchable applications.
///
/// The on-disk artifact is one JSON record per line, always read and
/// written as a whole. The registry owns the artifact exclusively; the
/// enforcement path re-reads it on every decision point instead of
/// holding a copy.
pub struct AppRegistry {
    path: PathBuf,
    probe: Arc<dyn ForegroundProbe>,
}

impl AppRegistry {
    /// Open the registry at `path`, seeding it from the live launchable
    /// application list on first-ever use.
    pub fn open(
        path: impl Into<PathBuf>,
        probe: Arc<dyn ForegroundProbe>,
    ) -> Result<Self, AppError> {
        let registry = Self {
            path: path.into(),
            probe,
        };

        if !registry.path.exists() {
            info!(
                "no registry artifact at {}, seeding from installed applications",
                registry.path.display()
            );
            let seeded = registry.installed_apps();
            registry.save_all(&seeded)?;
        }

        Ok(registry)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every application known to the system: persisted records plus any
    /// installed application not yet recorded, the latter unblocked.
    ///
    /// Read-only — newly discovered applications become durable only
    /// when the caller next invokes [`save_all`](Self::save_all).
    pub fn load_all(&self) -> Vec<AppRecord> {
        let mut records = self.read_records();

        let new_apps: Vec<AppRecord> = {
            let known: HashSet<(&str, &str)> = records.iter().map(AppRecord::identity).collect();
            self.installed_apps()
                .into_iter()
                .filter(|app| !known.contains(&app.identity()))
                .collect()
        };

        if !new_apps.is_empty() {
            debug!("discovered {} newly installed applications", new_apps.len());
        }
        records.extend(new_apps);
        records
    }

    /// Persisted records with `blocked == true`. No reconciliation with
    /// the live application set; this is the enforcement read path and
    /// must stay cheap.
    pub fn load_blocked(&self) -> Vec<AppRecord> {
        self.read_records()
            .into_iter()
            .filter(|record| record.blocked)
            .collect()
    }

    /// Overwrite the persisted registry with `records`.
    ///
    /// Writes to a sibling temporary file and renames it over the
    /// artifact, so a failed save leaves the prior contents readable.
    pub fn save_all(&self, records: &[AppRecord]) -> Result<(), AppError> {
        let tmp = self.path.with_extension("tmp");

        {
            let file = fs::File::create(&tmp)?;
            let mut writer = BufWriter::new(file);
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read the persisted records, degrading rather than failing.
    ///
    /// A missing or unreadable artifact reads as empty; a malformed line
    /// stops the reader, which returns the valid records parsed so far.
    fn read_records(&self) -> Vec<AppRecord> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                debug!("registry artifact not readable ({e}), treating as empty");
                return Vec::new();
            }
        };

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(
                        "registry read failed after {} records: {e}",
                        records.len()
                    );
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AppRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        "malformed registry record, keeping {} records read so far: {e}",
                        records.len()
                    );
                    break;
                }
            }
        }

        records
    }

    /// Live launchable set wrapped as unblocked records, in display
    /// order (lower-cased label).
    fn installed_apps(&self) -> Vec<AppRecord> {
        let mut apps: Vec<AppRecord> = self
            .probe
            .launchable_apps()
            .into_iter()
            .map(|app| AppRecord::new(app.label, app.package, app.component, false))
            .collect();
        apps.sort_by_key(AppRecord::sort_key);
        apps
    }
}
