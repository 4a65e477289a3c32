use biomedical_dsp::catalog;
use biomedical_dsp::config::CatalogConfig;
use std::fs::{self, File};
use std::path::Path;

fn touch(dir: &Path, name: &str) {
    File::create(dir.join(name)).unwrap();
}

fn course_tree() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    let u2 = root.path().join("Unidad 2 - Sistemas");
    let u1 = root.path().join("Unidad 1 - Señales");
    let empty = root.path().join("Unidad 3 - Vacía");
    let other = root.path().join("Material extra");
    for dir in [&u1, &u2, &empty, &other] {
        fs::create_dir(dir).unwrap();
    }

    touch(&u1, "Clase 02 - Muestreo y aliasing.pdf");
    touch(&u1, "Clase 2- aliasing.py");
    touch(&u1, "Clase 01- Señales analógicas.pdf");
    touch(&u1, "Clase 05.py");
    touch(&u1, "notas.txt");

    touch(&u2, "Clase 10- Convolución.py");
    touch(&u2, "Clase 07- Sistemas LTI.pdf");
    touch(&u2, "Clase 07- Sistemas LTI.py");

    touch(&other, "Clase 99- no es una unidad.py");
    touch(root.path(), "Clase 98- suelta.py");
    root
}

#[test]
fn units_sorted_and_filtered_by_prefix() {
    let root = course_tree();
    let units = catalog::scan(root.path(), &CatalogConfig::default()).unwrap();
    let names: Vec<&str> = units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Unidad 1 - Señales", "Unidad 2 - Sistemas", "Unidad 3 - Vacía"]
    );
    assert!(units[2].entries.is_empty());
}

#[test]
fn slide_and_script_grouped_by_class_number() {
    let root = course_tree();
    let units = catalog::scan(root.path(), &CatalogConfig::default()).unwrap();

    let unit = &units[1];
    let numbers: Vec<&str> = unit.entries.iter().map(|e| e.class_number.as_str()).collect();
    assert_eq!(numbers, vec!["07", "10"]);

    let seven = unit.entry("07").unwrap();
    assert!(seven.has_slides() && seven.has_script());
    assert_eq!(seven.display_name, "Clase 07: Sistemas LTI");

    let ten = unit.entry("10").unwrap();
    assert!(!ten.has_slides());
    assert_eq!(ten.display_name, "Clase 10: Convolución");
}

#[test]
fn slide_name_wins_and_missing_topic_uses_table() {
    let root = course_tree();
    let units = catalog::scan(root.path(), &CatalogConfig::default()).unwrap();
    let unit = &units[0];

    let numbers: Vec<&str> = unit.entries.iter().map(|e| e.class_number.as_str()).collect();
    assert_eq!(numbers, vec!["01", "02", "05"]);

    let two = unit.entry("02").unwrap();
    assert_eq!(two.display_name, "Clase 02: Muestreo y aliasing");
    assert_eq!(
        two.script_path.as_ref().unwrap().file_name().unwrap(),
        "Clase 2- aliasing.py"
    );

    let five = unit.entry("05").unwrap();
    assert_eq!(five.display_name, "Clase 05: Reconstrucción de Señales");
    assert!(five.slide_path.is_none());
}

#[test]
fn files_outside_units_are_ignored() {
    let root = course_tree();
    let units = catalog::scan(root.path(), &CatalogConfig::default()).unwrap();
    assert!(catalog::find_entry(&units, "98").is_none());
    assert!(catalog::find_entry(&units, "99").is_none());
    let (unit, _) = catalog::find_entry(&units, "10").unwrap();
    assert_eq!(unit.name, "Unidad 2 - Sistemas");
}

#[test]
fn custom_prefix_and_marker() {
    let root = tempfile::tempdir().unwrap();
    let module = root.path().join("Modulo A");
    fs::create_dir(&module).unwrap();
    touch(&module, "Lecture 3 - Filters.py");
    touch(&module, "Clase 04- ignorada.py");

    let config = CatalogConfig {
        unit_prefix: "Modulo".to_string(),
        class_marker: "Lecture".to_string(),
        ..CatalogConfig::default()
    };
    let units = catalog::scan(root.path(), &config).unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].entries.len(), 1);
    assert_eq!(units[0].entries[0].display_name, "Lecture 03: Filters");
}

#[test]
fn missing_root_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    let err = catalog::scan(&root.path().join("nope"), &CatalogConfig::default()).unwrap_err();
    assert!(err.contains("Failed to read course directory"));
}
