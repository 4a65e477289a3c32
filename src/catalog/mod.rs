// src/catalog/mod.rs

pub mod class_name;

use crate::config::CatalogConfig;
use class_name::ClassPattern;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A unit's slide and script sharing one class number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Two-digit class number, e.g. "07".
    pub class_number: String,
    pub display_name: String,
    pub slide_path: Option<PathBuf>,
    pub script_path: Option<PathBuf>,
}

impl CatalogEntry {
    fn new(class_number: &str) -> Self {
        Self {
            class_number: class_number.to_string(),
            display_name: String::new(),
            slide_path: None,
            script_path: None,
        }
    }

    pub fn number(&self) -> Option<u32> {
        self.class_number.parse().ok()
    }

    pub fn has_slides(&self) -> bool {
        self.slide_path.is_some()
    }

    pub fn has_script(&self) -> bool {
        self.script_path.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub name: String,
    pub path: PathBuf,
    pub entries: Vec<CatalogEntry>,
}

impl Unit {
    pub fn entry(&self, class_number: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.class_number == class_number)
    }
}

// -----------------------------------------------------------------------------
// DIRECTORY SCAN
// -----------------------------------------------------------------------------

/// Full scan of `root`: every immediate subdirectory whose name starts with
/// the unit prefix becomes a `Unit`, sorted by name.
pub fn scan(root: &Path, config: &CatalogConfig) -> Result<Vec<Unit>, String> {
    let pattern = ClassPattern::new(&config.class_marker)?;
    let read = fs::read_dir(root)
        .map_err(|e| format!("Failed to read course directory {}: {}", root.display(), e))?;

    let mut units = Vec::new();
    for item in read {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                eprintln!("Skipping unreadable entry in {}: {}", root.display(), e);
                continue;
            }
        };
        let path = item.path();
        let name = item.file_name().to_string_lossy().to_string();
        if !path.is_dir() || !name.starts_with(&config.unit_prefix) {
            continue;
        }
        let entries = scan_unit(&path, config, &pattern)?;
        units.push(Unit {
            name,
            path,
            entries,
        });
    }
    units.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(units)
}

/// Groups the slides and scripts of one unit directory by class number.
///
/// Slides are processed before scripts, each group in file name order. A later
/// file with the same number replaces the earlier path; the display name is
/// taken from the first file that sets it, so a slide name wins over a script
/// name.
pub fn scan_unit(
    dir: &Path,
    config: &CatalogConfig,
    pattern: &ClassPattern,
) -> Result<Vec<CatalogEntry>, String> {
    let slides = files_with_extension(dir, &config.slide_extension)?;
    let scripts = files_with_extension(dir, &config.script_extension)?;

    let mut by_number: BTreeMap<String, CatalogEntry> = BTreeMap::new();
    for (path, is_slide) in slides
        .into_iter()
        .map(|p| (p, true))
        .chain(scripts.into_iter().map(|p| (p, false)))
    {
        let file_name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => continue,
        };
        let number = match pattern.class_number(&file_name) {
            Some(number) => number,
            None => continue,
        };
        let entry = by_number
            .entry(number.clone())
            .or_insert_with(|| CatalogEntry::new(&number));
        if entry.display_name.is_empty() {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            entry.display_name = pattern.display_name(&stem);
        }
        if is_slide {
            entry.slide_path = Some(path);
        } else {
            entry.script_path = Some(path);
        }
    }

    let mut entries: Vec<CatalogEntry> = by_number.into_values().collect();
    entries.sort_by_key(|e| (e.number().unwrap_or(u32::MAX), e.class_number.clone()));
    Ok(entries)
}

fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, String> {
    let read = fs::read_dir(dir)
        .map_err(|e| format!("Failed to read unit directory {}: {}", dir.display(), e))?;
    let mut files: Vec<PathBuf> = read
        .filter_map(|item| item.ok().map(|i| i.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .map_or(false, |ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Entry for `class_number` in any unit.
pub fn find_entry<'a>(units: &'a [Unit], class_number: &str) -> Option<(&'a Unit, &'a CatalogEntry)> {
    units
        .iter()
        .find_map(|u| u.entry(class_number).map(|e| (u, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn slide_name_wins_and_later_script_replaces_path() {
        let root = tempfile::tempdir().unwrap();
        let unit = root.path().join("Unidad 02 Sistemas");
        fs::create_dir(&unit).unwrap();
        touch(&unit, "Clase 07 slides.pdf");
        touch(&unit, "Clase 07- Sistemas en tiempo discreto.py");
        touch(&unit, "Clase 7 - copia.py");

        let config = CatalogConfig::default();
        let entries = scan_unit(&unit, &config, &ClassPattern::default()).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.display_name, "Clase 07: slides");
        assert_eq!(
            entry.script_path.as_deref(),
            Some(unit.join("Clase 7 - copia.py").as_path())
        );
    }

    #[test]
    fn entries_sort_numerically() {
        let root = tempfile::tempdir().unwrap();
        let unit = root.path().join("Unidad 01");
        fs::create_dir(&unit).unwrap();
        for name in ["Clase 10- x.py", "Clase 9- y.py", "Clase 100- z.py", "readme.py"] {
            touch(&unit, name);
        }
        let entries =
            scan_unit(&unit, &CatalogConfig::default(), &ClassPattern::default()).unwrap();
        let numbers: Vec<&str> = entries.iter().map(|e| e.class_number.as_str()).collect();
        assert_eq!(numbers, vec!["09", "10", "100"]);
    }
}
