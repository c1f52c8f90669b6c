use std::fs;
use std::path::{Path, PathBuf};

/// Create a module directory with its manifest under `root`.
pub fn write_module(root: &Path, name: &str, enabled: bool) -> PathBuf {
    let module = root.join(name);
    fs::create_dir_all(&module).expect("create module dir");
    fs::write(
        module.join("manifest.json"),
        format!("{{\"enabled\": {enabled}}}"),
    )
    .expect("write manifest");
    module
}

/// Create a module directory without any manifest.
pub fn write_bare_module(root: &Path, name: &str) -> PathBuf {
    let module = root.join(name);
    fs::create_dir_all(&module).expect("create module dir");
    module
}

/// Add an empty file under `module/<dir>/<file>`, creating the category
/// directory as needed.
pub fn add_file(module: &Path, dir: &str, file: &str) -> PathBuf {
    let category = module.join(dir);
    fs::create_dir_all(&category).expect("create category dir");
    let path = category.join(file);
    fs::write(&path, "").expect("write file");
    path
}

/// Add an empty category directory with no files.
pub fn add_empty_dir(module: &Path, dir: &str) {
    fs::create_dir_all(module.join(dir)).expect("create empty category dir");
}
