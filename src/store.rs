//! Seed files in, JSON trees out.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use chrono::Local;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::model::{ModelEntry, SeedNode, TreeEntry};
use crate::{info_time, Error, Result};

/// Reads a JSON array of `{name, value}` seeds. A missing file is `Error::MissingInput`.
pub async fn load_seeds(path: impl AsRef<Path>) -> Result<Vec<SeedNode>> {
    read_json(path.as_ref()).await
}

/// Reads back a tree written by `write_tree`.
pub async fn load_tree<C: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<TreeEntry<C>>> {
    read_json(path.as_ref()).await
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::MissingInput(path.to_path_buf()),
        _ => Error::Io(e),
    })?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Seeds picked by name, plus the names that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub found: Vec<SeedNode>,
    pub unknown: Vec<String>,
}

/// Picks seeds by case-insensitive name, in the order they were asked for.
pub fn select_seeds(all: &[SeedNode], names: &[&str]) -> Selection {
    let mut selection = Selection::default();
    for name in names {
        let wanted = name.to_lowercase();
        match all.iter().find(|seed| seed.name.to_lowercase() == wanted) {
            Some(seed) => selection.found.push(seed.clone()),
            None => selection.unknown.push(name.to_string()),
        }
    }
    selection
}

/// Overwrites `path` with the whole tree, pretty printed.
pub async fn write_tree<C: Serialize>(path: impl AsRef<Path>, tree: &[TreeEntry<C>]) -> Result<()> {
    let path = path.as_ref();
    let local_now = Local::now();
    let bytes = serde_json::to_vec_pretty(tree)?;
    tokio::fs::write(path, bytes).await?;
    info_time!(local_now, "Wrote {} entries to file: {}", tree.len(), path.display());
    Ok(())
}

/// File name a brand is stored under: lower case, each whitespace run becomes `-`,
/// and so does any path separator.
pub fn brand_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len() + 5);
    let mut in_space = false;
    for c in name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        slug.push(if matches!(c, '/' | '\\') { '-' } else { c });
    }
    slug.push_str(".json");
    slug
}

/// What changed for one brand file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub filename: String,
    pub models_count: usize,
    pub previous_models_count: usize,
    pub new_model_names: Vec<String>,
}

/// Outcome of a crawl over named brands.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CrawlSummary {
    pub reports: Vec<CrawlReport>,
    /// Requested names with no seed behind them.
    pub not_found: Vec<String>,
}

#[derive(Serialize)]
struct BrandFile<'a> {
    #[serde(flatten)]
    entry: &'a TreeEntry<ModelEntry>,
    updated_at: String,
}

// Only what's needed to diff against; anything else in an old file is ignored.
#[derive(Deserialize)]
struct PreviousBrand {
    #[serde(default)]
    children: Vec<PreviousModel>,
}

#[derive(Deserialize)]
struct PreviousModel {
    #[serde(default)]
    model_id: Option<String>,
}

/// Writes one file per brand into `dir` and reports models that weren't in the previous file.
pub async fn write_brand_files(
    dir: impl AsRef<Path>,
    tree: &[TreeEntry<ModelEntry>],
) -> Result<Vec<CrawlReport>> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;

    let mut reports = Vec::with_capacity(tree.len());
    for entry in tree {
        let filename = brand_slug(&entry.name);
        let path = dir.join(&filename);

        let previous = read_previous(&path).await;
        let known: HashSet<_> = previous
            .iter()
            .filter_map(|m| m.model_id.as_deref())
            .collect();
        let new_model_names = entry
            .children
            .iter()
            .filter(|m| m.model_id.as_deref().map_or(true, |id| !known.contains(id)))
            .filter_map(|m| m.model_name.clone())
            .collect();

        let file = BrandFile {
            entry,
            updated_at: Local::now().to_rfc3339(),
        };
        tokio::fs::write(&path, serde_json::to_vec_pretty(&file)?).await?;

        let report = CrawlReport {
            filename,
            models_count: entry.children.len(),
            previous_models_count: previous.len(),
            new_model_names,
        };
        info_time!(
            "Created: {} ({} models, +{} new)",
            report.filename,
            report.models_count,
            report.new_model_names.len()
        );
        reports.push(report);
    }
    Ok(reports)
}

/// An absent or unreadable previous file counts as empty.
async fn read_previous(path: &Path) -> Vec<PreviousModel> {
    let Ok(raw) = tokio::fs::read(path).await else {
        return Vec::new();
    };
    serde_json::from_slice::<PreviousBrand>(&raw)
        .map(|b| b.children)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeds() -> Vec<SeedNode> {
        vec![
            SeedNode::new("Toyota", "t"),
            SeedNode::new("Mercedes Benz", "m"),
            SeedNode::new("Kia", "k"),
        ]
    }

    #[test]
    fn select_is_case_insensitive_and_ordered() {
        let picked = select_seeds(&seeds(), &["kia", "TOYOTA"]);
        assert_eq!(
            picked.found,
            vec![SeedNode::new("Kia", "k"), SeedNode::new("Toyota", "t")]
        );
        assert!(picked.unknown.is_empty());
    }

    #[test]
    fn select_keeps_known_names_and_lists_unknown_ones() {
        let picked = select_seeds(&seeds(), &["Lada", "Kia", "Lada"]);
        assert_eq!(picked.found, vec![SeedNode::new("Kia", "k")]);
        assert_eq!(picked.unknown, ["Lada", "Lada"]);
    }

    #[test]
    fn slugs() {
        assert_eq!(brand_slug("Mercedes Benz"), "mercedes-benz.json");
        assert_eq!(brand_slug("Land \t Rover"), "land-rover.json");
        assert_eq!(brand_slug("KIA"), "kia.json");
        assert_eq!(brand_slug(" Kia "), "-kia-.json");
    }

    #[test]
    fn slugs_never_leave_the_directory() {
        assert_eq!(brand_slug("A/B"), "a-b.json");
        assert_eq!(brand_slug("../etc/x"), "..-etc-x.json");
        assert_eq!(brand_slug("C\\D"), "c-d.json");
    }

    #[tokio::test]
    async fn brand_with_separator_is_written_inside_dir() {
        let dir = tempfile::tempdir().unwrap();
        let tree = vec![TreeEntry::<ModelEntry>::empty(&SeedNode::new("Rolls/Royce", "r"))];

        let reports = write_brand_files(dir.path(), &tree).await.unwrap();

        assert_eq!(reports[0].filename, "rolls-royce.json");
        assert!(dir.path().join("rolls-royce.json").exists());
    }

    #[tokio::test]
    async fn empty_tree_is_written_as_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_tree::<ModelEntry>(&path, &[]).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "[]");
    }

    #[tokio::test]
    async fn missing_seed_file_is_fatal_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_seeds(dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
    }
}
