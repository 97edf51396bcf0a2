use std::path::{Path, PathBuf};

/// Ensure a directory exists, creating it and any parents if needed.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Write `data` to `dir/filename`, creating `dir` first. Returns the written path.
pub fn write_file_in(dir: &Path, filename: &str, data: &[u8]) -> std::io::Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, data)?;
    Ok(path)
}
