//! Test helpers writing datasets and candidate files to a temporary directory.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use safar_core::RouteCandidate;
use safar_core::test_support::straight_route;
use tempfile::TempDir;

use super::*;

const HEADER: &str = "id,murder,rape,gangrape,robbery,theft,assault,harassment,total,area,lon,lat,ratio";

/// Centre of the violent neighbourhood.
pub(super) const HOTSPOT: (f64, f64) = (28.60, 77.20);
/// A quiet place far from every incident.
pub(super) const QUIET: (f64, f64) = (28.95, 77.70);

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write fixture");
}

/// Temporary workspace holding a crime dataset.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let workspace = Self { _dir: dir, root };
        write_utf8(&workspace.dataset(), dataset_csv().as_bytes());
        workspace
    }

    pub(super) fn dataset(&self) -> Utf8PathBuf {
        self.root.join("crime.csv")
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Two-zone model settings over this workspace's dataset.
    pub(super) fn model(&self) -> ModelConfig {
        ModelConfig::resolve(Some(self.dataset()), Some(2), None)
    }

    pub(super) fn write_candidates(&self, name: &str, candidates: &[RouteCandidate]) -> Utf8PathBuf {
        let path = self.path(name);
        let json = serde_json::to_vec(candidates).expect("serialise candidates");
        write_utf8(&path, &json);
        path
    }
}

/// Violent incidents clustered around [`HOTSPOT`] plus petty theft further
/// north-east.
fn dataset_csv() -> String {
    let mut text = format!("{HEADER}\n");
    for i in 0..6 {
        let offset = f64::from(i) * 0.001;
        text.push_str(&format!(
            "{i},4,2,1,0,1,3,2,0,a,{},{},0.4\n",
            HOTSPOT.1 + offset,
            HOTSPOT.0 + offset
        ));
    }
    for i in 6..12 {
        let offset = f64::from(i) * 0.001;
        text.push_str(&format!("{i},0,0,0,1,3,0,0,0,b,{},{},0.1\n", 77.40 + offset, 28.80 + offset));
    }
    text
}

/// A route whose every point sits at `at`.
pub(super) fn parked_route(at: (f64, f64), distance_km: f64) -> RouteCandidate {
    RouteCandidate::new(straight_route(at, (at.0 + 0.01, at.1 + 0.01), 20), distance_km, 15.0)
        .expect("valid candidate")
}
