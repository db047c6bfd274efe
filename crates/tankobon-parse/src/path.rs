//! String-level path helpers. Paths are treated as text: both `/` and `\`
//! count as separators and nothing touches the file system.

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Final component of a path, including its extension.
pub fn file_name(path: &str) -> &str {
    match path.rfind(is_separator) {
        Some(ix) => &path[ix + 1..],
        None => path,
    }
}

/// Extension of the final component including the leading dot, or `""`.
pub fn extension(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(ix) if ix + 1 < name.len() => &name[ix..],
        _ => "",
    }
}

/// Final component without its extension.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    let ext = extension(name);
    &name[..name.len() - ext.len()]
}

/// Name of the directory a path points at, ignoring trailing separators.
pub fn directory_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return path;
    }
    file_name(trimmed)
}

/// Folder names between `full_path` and `root_path`, nearest first. The root
/// itself is not included.
pub fn folders_till_root(root_path: &str, full_path: &str) -> Vec<String> {
    let root = root_path.replace('\\', "/");
    let root = root.strip_suffix('/').unwrap_or(&root);
    let full = full_path.replace('\\', "/");
    let mut current = full.strip_suffix('/').unwrap_or(&full);

    if !extension(current).is_empty() {
        current = match current.rfind('/') {
            Some(ix) => &current[..ix],
            None => return Vec::new(),
        };
    }

    let mut folders = Vec::new();
    while current != root {
        let Some(ix) = current.rfind('/') else {
            break;
        };
        folders.push(current[ix + 1..].to_string());
        current = &current[..ix];
    }
    folders
}
