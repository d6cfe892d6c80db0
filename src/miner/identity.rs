use log::info;
use std::fs;
use std::io;
use std::path::Path;

/// Read the worker id stored at `path`, creating a fresh one if the file is absent or blank.
pub fn load_or_create(path: &Path) -> io::Result<String> {
    match fs::read_to_string(path) {
        Ok(contents) if !contents.trim().is_empty() => return Ok(contents.trim().to_string()),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let id = uuid::Uuid::new_v4().simple().to_string();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &id)?;
    info!("generated worker id {id} at {}", path.display());
    Ok(id)
}
