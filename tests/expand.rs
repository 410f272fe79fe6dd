use std::fs;
use std::path::Path;
use tempfile::TempDir;
use xmldoc::{Error, ExpandConfig, Expander, FormatSettings, LineEnding, Result};

const INVENTORY: &str = include_str!("../fixtures/Inventory.cs");

fn settings() -> FormatSettings {
    FormatSettings::load(Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/fixtures/settings.json"
    )))
    .unwrap()
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Inventory.cs"), INVENTORY).unwrap();
    fs::write(dir.path().join("notes.txt"), "///\npublic class NotCode\n").unwrap();
    dir
}

#[test]
fn test_settings_fixture() {
    let settings = settings();
    assert_eq!(settings.tab_size, 4);
    assert!(settings.translate_tabs_to_spaces);
    assert_eq!(settings.default_line_ending, LineEnding::Unix);
}

#[test]
fn test_expand_directory() -> Result<()> {
    let dir = workspace();
    let reports = Expander::new(ExpandConfig::new(dir.path(), settings())).run()?;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].blocks, 6);

    let content = fs::read_to_string(dir.path().join("Inventory.cs"))?;
    assert_eq!(content, reports[0].content);

    let expected_constructor = "        /// <summary>
        ///\x20
        /// </summary>
        /// <param name=\"name\"></param>
        /// <param name=\"capacity\"></param>
        public Inventory(string name, int capacity)";
    assert!(content.contains(expected_constructor));

    let expected_void = "        /// </summary>
        /// <param name=\"sku\"></param>
        [Obsolete(\"Use Add(string, int) instead\")]
        public void Put(string sku)";
    assert!(content.contains(expected_void));

    let expected_count = "        /// </summary>
        /// <param name=\"sku\"></param>
        /// <param name=\"includeReserved\"></param>
        /// <returns></returns>
        public int Count(";
    assert!(content.contains(expected_count));

    let expected_generic = "        /// </summary>
        /// <typeparam name=\"T\"></typeparam>
        /// <param name=\"predicate\"></param>
        /// <param name=\"label\"></param>
        /// <returns></returns>
        public T Find<T>(";
    assert!(content.contains(expected_generic));

    let expected_field = "        /// </summary>
        private readonly Dictionary<string, int> _stock";
    assert!(content.contains(expected_field));

    // other files are left alone
    let notes = fs::read_to_string(dir.path().join("notes.txt"))?;
    assert_eq!(notes, "///\npublic class NotCode\n");

    Ok(())
}

#[test]
fn test_expand_twice_changes_nothing() -> Result<()> {
    let dir = workspace();
    let expander = Expander::new(ExpandConfig::new(dir.path(), settings()));

    expander.run()?;
    let first = fs::read_to_string(dir.path().join("Inventory.cs"))?;

    assert!(expander.run()?.is_empty());
    let second = fs::read_to_string(dir.path().join("Inventory.cs"))?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_dry_run_does_not_write() -> Result<()> {
    let dir = workspace();
    let mut config = ExpandConfig::new(dir.path().join("Inventory.cs"), settings());
    config.dry_run = true;

    let reports = Expander::new(config).run()?;
    assert_eq!(reports.len(), 1);
    assert_ne!(reports[0].content, INVENTORY);
    assert_eq!(fs::read_to_string(dir.path().join("Inventory.cs"))?, INVENTORY);

    Ok(())
}

#[test]
fn test_ignore_files_are_respected() -> Result<()> {
    let dir = workspace();
    fs::create_dir(dir.path().join("generated"))?;
    fs::write(dir.path().join("generated/Proxy.cs"), "///\npublic class Proxy\n")?;
    fs::write(dir.path().join(".ignore"), "generated/\n")?;

    let reports = Expander::new(ExpandConfig::new(dir.path(), settings())).run()?;
    assert_eq!(reports.len(), 1);
    assert!(reports[0].path.ends_with("Inventory.cs"));

    let proxy = fs::read_to_string(dir.path().join("generated/Proxy.cs"))?;
    assert_eq!(proxy, "///\npublic class Proxy\n");

    Ok(())
}

#[test]
fn test_custom_extensions() -> Result<()> {
    let dir = workspace();
    fs::write(dir.path().join("Script.csx"), "///\npublic void Main()\n")?;

    let mut config = ExpandConfig::new(dir.path(), settings());
    config.extensions = vec!["csx".to_string()];

    let reports = Expander::new(config).run()?;
    assert_eq!(reports.len(), 1);
    assert!(reports[0].path.ends_with("Script.csx"));
    assert_eq!(
        fs::read_to_string(dir.path().join("Inventory.cs"))?,
        INVENTORY
    );

    Ok(())
}

#[test]
fn test_rejects_unhandled_file() {
    let dir = workspace();
    let expander = Expander::new(ExpandConfig::new(dir.path().join("notes.txt"), settings()));
    assert!(matches!(expander.run(), Err(Error::InvalidConfig(_))));
}
