//! Integration tests for scaffolding and the template registry public API.

use scriptorium::registry::TemplateRegistry;
use scriptorium::scaffold::{create, expand, unresolved, ScaffoldOptions, Substitution};
use scriptorium::ScriptoriumError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn write_template(root: &Path, name: &str) -> std::path::PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("setup.tex"), "% setup").unwrap();
    fs::write(
        dir.join("frontmatter.mmd"),
        "Title: $TITLE\nAuthor: $AUTHOR_NAME\nlatexfooter: $TEMPLATE/footer.tex\n",
    )
    .unwrap();
    fs::write(dir.join("metadata.tex"), "\\def\\mytitle{$TITLE}\n").unwrap();
    dir
}

#[test]
fn substitution_matches_uppercase_placeholders_only() {
    let subst = Substitution::new(&config(&[("title", "Graphs")])).unwrap();
    assert_eq!(subst.apply("$TITLE / $Title / $title"), "Graphs / $Title / $title");
}

#[test]
fn inline_math_survives_substitution() {
    let subst = Substitution::new(&config(&[("X", "42"), ("N", "7")])).unwrap();
    assert_eq!(
        subst.apply("Let $x$ and $n^2$ hold for $X and $N"),
        "Let $x$ and $n^2$ hold for 42 and 7"
    );
}

#[test]
fn longest_name_wins() {
    let subst = Substitution::new(&config(&[("AUTHOR", "x"), ("AUTHOR_NAME", "Ada")])).unwrap();
    assert_eq!(subst.apply("$AUTHOR_NAME and $AUTHOR"), "Ada and x");
}

#[test]
fn replacement_values_are_not_rescanned() {
    let subst = Substitution::new(&config(&[("A", "$B"), ("B", "never")])).unwrap();
    assert_eq!(subst.apply("$A"), "$B");
}

#[test]
fn empty_config_leaves_text_unchanged() {
    let subst = Substitution::new(&BTreeMap::new()).unwrap();
    assert!(subst.is_empty());
    assert_eq!(subst.apply("$TITLE"), "$TITLE");
}

#[test]
fn expand_then_unresolved() {
    let mut texts = BTreeMap::new();
    texts.insert("paper.mmd".to_string(), "$TITLE by $AUTHOR".to_string());
    texts.insert("metadata.tex".to_string(), "$VENUE $TITLE".to_string());

    let expanded = expand(&texts, &config(&[("TITLE", "T")])).unwrap();
    let left = unresolved(expanded.values().map(String::as_str));

    assert_eq!(expanded["paper.mmd"], "T by $AUTHOR");
    assert_eq!(
        left.into_iter().collect::<Vec<_>>(),
        vec!["author".to_string(), "venue".to_string()]
    );
}

#[test]
fn unresolved_ignores_lowercase_dollar_words() {
    let left = unresolved(["costs $5 and $x"]);
    assert_eq!(left.into_iter().collect::<Vec<_>>(), vec!["5".to_string()]);
}

#[test]
fn registry_finds_nested_templates_and_skips_git() {
    let temp = TempDir::new().unwrap();
    write_template(&temp.path().join("collection"), "ieee");
    write_template(temp.path(), "acm");
    write_template(&temp.path().join("collection").join(".git"), "hidden");

    let registry = TemplateRegistry::new(temp.path());

    assert_eq!(registry.names().unwrap(), vec!["acm", "ieee"]);
    assert_eq!(
        registry.find("ieee").unwrap().path,
        temp.path().join("collection").join("ieee")
    );
    assert!(matches!(
        registry.find("hidden").unwrap_err(),
        ScriptoriumError::TemplateNotInstalled { .. }
    ));
}

#[test]
fn create_full_paper() {
    let templates = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let dir = write_template(templates.path(), "ieee");
    fs::write(dir.join("defaults.yml"), "AUTHOR_NAME: Anonymous\nYEAR: 2024\n").unwrap();
    let registry = TemplateRegistry::new(templates.path());
    let dest = out.path().join("draft");

    let options = ScaffoldOptions {
        config: config(&[("title", "Results")]),
        ..Default::default()
    };
    let left = create(&registry, &dest, "ieee", &options).unwrap();

    assert!(left.is_empty());
    assert_eq!(
        fs::read_to_string(dest.join("paper.mmd")).unwrap(),
        "Title: Results\nAuthor: Anonymous\nlatexfooter: ieee/footer.tex\n"
    );
    assert_eq!(
        fs::read_to_string(dest.join("metadata.tex")).unwrap(),
        "\\def\\mytitle{Results}\n"
    );
    assert!(!dest.join(".gitignore").exists());
}

#[test]
fn template_variables_lists_sources_and_defaults() {
    let templates = TempDir::new().unwrap();
    let dir = write_template(templates.path(), "ieee");
    fs::write(dir.join("defaults.yml"), "YEAR: 2024\n").unwrap();
    let registry = TemplateRegistry::new(templates.path());

    let variables = registry.find("ieee").unwrap().variables().unwrap();

    let names: Vec<_> = variables.keys().cloned().collect();
    assert_eq!(names, vec!["AUTHOR_NAME", "TITLE", "YEAR"]);
    assert_eq!(variables["YEAR"].as_deref(), Some("2024"));
    assert_eq!(variables["TITLE"], None);
}
