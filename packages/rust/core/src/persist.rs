//! Writing rendered pages to disk, or checking that disk is up to date.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use moduledoc_shared::{ModuleDocError, RenderedPages, Result};

/// Persists [`RenderedPages`] as `modules_<id>.md` files in one directory.
#[derive(Debug, Clone)]
pub struct PagePersister {
    dir: PathBuf,
}

/// Outcome of [`PagePersister::check`]. Lists hold page file names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub up_to_date: Vec<String>,
    pub stale: Vec<String>,
    pub missing: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.stale.is_empty() && self.missing.is_empty()
    }
}

impl PagePersister {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a page is written to.
    pub fn page_path(&self, id: &str) -> PathBuf {
        self.dir.join(RenderedPages::file_name(id))
    }

    /// Write every page as UTF-8, overwriting existing files. Creates the
    /// directory if needed.
    ///
    /// Stops at the first failure; pages already written are left in place.
    #[instrument(skip_all, fields(dir = %self.dir.display(), pages = pages.len()))]
    pub fn save(&self, pages: &RenderedPages) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.dir).map_err(|e| ModuleDocError::io(&self.dir, e))?;

        let mut written = Vec::with_capacity(pages.len());
        for (id, text) in pages.iter() {
            let path = self.page_path(id);
            std::fs::write(&path, text).map_err(|e| ModuleDocError::io(&path, e))?;
            debug!(path = %path.display(), bytes = text.len(), "wrote page");
            written.push(path);
        }

        info!(count = written.len(), "pages written");
        Ok(written)
    }

    /// Compare rendered pages with the files on disk without writing.
    #[instrument(skip_all, fields(dir = %self.dir.display(), pages = pages.len()))]
    pub fn check(&self, pages: &RenderedPages) -> Result<CheckReport> {
        let mut report = CheckReport::default();

        for (id, text) in pages.iter() {
            let path = self.page_path(id);
            let file_name = RenderedPages::file_name(id);
            match std::fs::read_to_string(&path) {
                Ok(existing) if existing == text => report.up_to_date.push(file_name),
                Ok(_) => {
                    debug!(path = %path.display(), "page is stale");
                    report.stale.push(file_name);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "page is missing");
                    report.missing.push(file_name);
                }
                Err(e) => return Err(ModuleDocError::io(&path, e)),
            }
        }

        info!(
            up_to_date = report.up_to_date.len(),
            stale = report.stale.len(),
            missing = report.missing.len(),
            "page check complete"
        );
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_pages() -> RenderedPages {
        let mut pages = RenderedPages::new();
        pages.insert("main", "# Index\n".to_string()).unwrap();
        pages.insert("driver", "# Modules Reference: Driver\n".to_string()).unwrap();
        pages.insert("driver_imu", "# Modules Reference: Imu (Driver)\n".to_string()).unwrap();
        pages
    }

    #[test]
    fn save_writes_prefixed_files() {
        let tmp = tempfile::tempdir().unwrap();
        let persister = PagePersister::new(tmp.path().join("modules"));

        let written = persister.save(&make_pages()).unwrap();
        assert_eq!(written.len(), 3);

        let dir = tmp.path().join("modules");
        assert_eq!(
            std::fs::read_to_string(dir.join("modules_main.md")).unwrap(),
            "# Index\n"
        );
        assert!(dir.join("modules_driver.md").exists());
        assert!(dir.join("modules_driver_imu.md").exists());
    }

    #[test]
    fn save_overwrites_existing_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("modules_main.md"), "old content, much longer").unwrap();

        PagePersister::new(tmp.path()).save(&make_pages()).unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("modules_main.md")).unwrap(),
            "# Index\n"
        );
    }

    #[test]
    fn save_keeps_utf8_text() {
        let tmp = tempfile::tempdir().unwrap();
        let mut pages = RenderedPages::new();
        pages.insert("main", "Température °C — µs\n".to_string()).unwrap();

        PagePersister::new(tmp.path()).save(&pages).unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("modules_main.md")).unwrap(),
            "Température °C — µs\n"
        );
    }

    #[test]
    fn save_error_names_failing_path() {
        let tmp = tempfile::tempdir().unwrap();
        // a directory where a page file should go makes the write fail
        std::fs::create_dir(tmp.path().join("modules_driver_imu.md")).unwrap();

        let err = PagePersister::new(tmp.path()).save(&make_pages()).unwrap_err();
        assert!(err.to_string().contains("modules_driver_imu.md"));
        // pages before the failure stay written
        assert!(tmp.path().join("modules_driver.md").is_file());
    }

    #[test]
    fn check_reports_each_state() {
        let tmp = tempfile::tempdir().unwrap();
        let persister = PagePersister::new(tmp.path());
        std::fs::write(tmp.path().join("modules_main.md"), "# Index\n").unwrap();
        std::fs::write(tmp.path().join("modules_driver.md"), "outdated\n").unwrap();

        let report = persister.check(&make_pages()).unwrap();
        assert_eq!(report.up_to_date, vec!["modules_main.md".to_string()]);
        assert_eq!(report.stale, vec!["modules_driver.md".to_string()]);
        assert_eq!(report.missing, vec!["modules_driver_imu.md".to_string()]);
        assert!(!report.is_clean());
    }

    #[test]
    fn check_after_save_is_clean() {
        let tmp = tempfile::tempdir().unwrap();
        let persister = PagePersister::new(tmp.path());
        let pages = make_pages();

        persister.save(&pages).unwrap();
        let report = persister.check(&pages).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.up_to_date.len(), 3);
    }

    #[test]
    fn check_does_not_write() {
        let tmp = tempfile::tempdir().unwrap();
        PagePersister::new(tmp.path()).check(&make_pages()).unwrap();
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }
}
