//! Automatic fixes for migration findings.
//!
//! Every [`FixTarget`](ngstep_types::FixTarget) maps to at most one
//! [`Handler`]. Counting handlers rewrite files and report per-file results;
//! review-only handlers print guidance. Targets without a handler are
//! informational and are logged as unhandled.
//!
//! Each fix re-reads the tree from disk, applies all of its edits to a
//! file in memory and saves that file once, so fixes requested in the same
//! step run one after another and always see each other's output.

mod dispatch;
mod fixes;

pub use dispatch::{Dispatcher, Handler, handler_for};

#[cfg(test)]
pub(crate) mod test_support {
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    pub fn create_temp_repo(files: &[(&str, &str)]) -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path");
        for (rel, contents) in files {
            let path = root.join(rel);
            if let Some(parent) = path.parent() {
                fs_err::create_dir_all(parent).expect("create dirs");
            }
            fs_err::write(&path, contents).expect("write fixture");
        }
        (temp, root)
    }

    pub fn read(root: &camino::Utf8Path, rel: &str) -> String {
        fs_err::read_to_string(root.join(rel)).expect("read")
    }
}
