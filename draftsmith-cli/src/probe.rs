use std::fs;
use std::path::PathBuf;

use draftsmith_core::meta::{ProbeError, RepoProbe};

/// Existence checks against a local checkout of the site repository.
pub struct LocalRepoProbe {
    root: PathBuf,
}

impl LocalRepoProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn lookup(&self, path: &str, want_dir: bool) -> Result<bool, ProbeError> {
        match fs::metadata(self.root.join(path)) {
            Ok(meta) => Ok(if want_dir { meta.is_dir() } else { meta.is_file() }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ProbeError::Unavailable(e.to_string())),
        }
    }
}

impl RepoProbe for LocalRepoProbe {
    fn folder_exists(&self, path: &str) -> Result<bool, ProbeError> {
        self.lookup(path, true)
    }

    fn file_exists(&self, path: &str) -> Result<bool, ProbeError> {
        self.lookup(path, false)
    }
}

/// Probe for `--offline` runs: every path reports absent, so planning
/// emits the complete new-subcategory instructions. `Err` stays reserved
/// for genuine probe faults like the permission path above.
pub struct OfflineProbe;

impl RepoProbe for OfflineProbe {
    fn folder_exists(&self, _path: &str) -> Result<bool, ProbeError> {
        Ok(false)
    }

    fn file_exists(&self, _path: &str) -> Result<bool, ProbeError> {
        Ok(false)
    }
}

/// Pick the probe a command run should use.
pub fn select(offline: bool, repo_root: &str) -> Box<dyn RepoProbe> {
    if offline {
        Box::new(OfflineProbe)
    } else {
        Box::new(LocalRepoProbe::new(repo_root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_probe_distinguishes_files_from_folders() {
        let dir = std::env::temp_dir().join("draftsmith-probe-test");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("concepts/algorithms")).unwrap();
        fs::write(dir.join("concepts/algorithms/meta.json"), "{}").unwrap();

        let probe = LocalRepoProbe::new(&dir);
        assert!(probe.folder_exists("concepts/algorithms").unwrap());
        assert!(!probe.folder_exists("concepts/hardware").unwrap());
        assert!(probe.file_exists("concepts/algorithms/meta.json").unwrap());
        assert!(!probe.file_exists("concepts/algorithms").unwrap());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn offline_runs_plan_the_full_new_subcategory_scenario() {
        use chrono::NaiveDate;
        use draftsmith_core::meta::{self, PlanStep};
        use draftsmith_core::{Document, DocumentMetadata, TemplateFamily};

        assert!(!OfflineProbe.folder_exists("research/optics").unwrap());
        assert!(!OfflineProbe.file_exists("research/optics/meta.json").unwrap());

        let doc = Document::new(
            TemplateFamily::Research,
            DocumentMetadata {
                title: "Cavity cooling".into(),
                custom_path: "research/optics/cavity-cooling.html".into(),
                ..Default::default()
            },
        );
        let plan = meta::plan(
            &doc,
            &OfflineProbe,
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        )
        .unwrap();

        // Absent everywhere means the complete instruction set, never the
        // degraded single-fragment fallback.
        assert_eq!(plan.steps.len(), 4);
        assert!(matches!(&plan.steps[0], PlanStep::CreateFolder { path } if path == "research/optics"));
        assert!(matches!(&plan.steps[1], PlanStep::AddSection { .. }));
        assert!(matches!(&plan.steps[2], PlanStep::AppendChild { .. }));
        assert!(matches!(&plan.steps[3], PlanStep::CreateIndex { .. }));
    }

    #[test]
    fn select_honors_the_offline_flag() {
        // The offline probe never touches the filesystem.
        let probe = select(true, "/nonexistent-root");
        assert!(!probe.folder_exists("concepts").unwrap());
    }
}
