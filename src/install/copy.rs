use std::fs::{self, File, FileTimes};
use std::io;
use std::path::Path;

/// Copy `src` to `dst` byte for byte, creating missing directories and
/// carrying over the access and modification times.
///
/// Only the copy itself can fail. Once the bytes are in place the install
/// stands, and a timestamp that cannot be applied is logged as a warning.
pub fn copy_preserving_times(src: &Path, dst: &Path) -> io::Result<()> {
    if let Some(dir) = dst.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let meta = fs::metadata(src)?;
    fs::copy(src, dst)?;

    if let Err(e) = apply_times(&meta, dst) {
        tracing::warn!(
            destination = %dst.display(),
            error = %e,
            "installed without the source timestamps"
        );
    }
    Ok(())
}

/// Set the access and modification times of `dst` from `meta`
fn apply_times(meta: &fs::Metadata, dst: &Path) -> io::Result<()> {
    let mut times = FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    File::options().write(true).open(dst)?.set_times(times)
}
