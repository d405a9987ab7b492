use itertools::Itertools;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

mod question;


pub use question::{ColumnRole, QuestionPair};

#[derive(Clone, Copy, Debug)]
pub struct LoaderSettings {
    pub delimiter: u8,
    pub question_column: ColumnRole,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        LoaderSettings {
            delimiter: b';',
            question_column: ColumnRole::Right,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Resource directory {0:?} not found")]
    DirectoryNotFound(PathBuf),
    #[error("Could not list resource directory {path:?}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Clone, Debug)]
pub struct Category {
    name: String,
    questions: Vec<QuestionPair>,
}

impl Category {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_questions(&self) -> &[QuestionPair] {
        &self.questions
    }

    /// First pair in deck order whose question is exactly `question`.
    pub fn find_question(&self, question: &str) -> Option<&QuestionPair> {
        self.questions.iter().find(|pair| pair.question == question)
    }
}

/// Every deck loaded at startup, keyed by category name.
///
/// Categories keep the order in which their files were read (sorted by file
/// name). The store never changes once built; picking up edited decks means
/// restarting the process.
#[derive(Debug, Default)]
pub struct QuestionStore {
    categories: Vec<Category>,
    index: HashMap<String, usize>,
}

impl QuestionStore {
    pub fn load_from_directory(
        settings: &LoaderSettings,
        directory: &Path,
    ) -> Result<QuestionStore, LoadError> {
        if !directory.is_dir() {
            return Err(LoadError::DirectoryNotFound(directory.to_owned()));
        }

        let entries = fs::read_dir(directory).map_err(|source| LoadError::DirectoryUnreadable {
            path: directory.to_owned(),
            source,
        })?;

        let deck_paths = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!("Could not read entry in {:?}: {}", directory, e);
                    None
                }
            })
            .filter(|path| is_deck_file(path))
            .sorted();

        let mut store = QuestionStore::default();
        for path in deck_paths {
            let name = match category_name(&path) {
                Some(name) => name,
                None => {
                    warn!("Skipping deck with non UTF-8 name: {:?}", path);
                    continue;
                }
            };
            match read_deck(settings, &path) {
                Ok(questions) => {
                    debug!("Read {} questions from {:?}", questions.len(), path);
                    store.append(name, questions);
                }
                Err(e) => warn!("Skipping deck {:?}: {}", path, e),
            }
        }

        info!(
            "Loaded {} questions in {} categories from {:?}",
            store.question_count(),
            store.len(),
            directory
        );
        Ok(store)
    }

    pub fn from_categories<I, S>(categories: I) -> QuestionStore
    where
        I: IntoIterator<Item = (S, Vec<QuestionPair>)>,
        S: Into<String>,
    {
        let mut store = QuestionStore::default();
        for (name, questions) in categories {
            store.append(name.into(), questions);
        }
        store
    }

    // Empty categories are never listed. Decks sharing a name are concatenated.
    fn append(&mut self, name: String, questions: Vec<QuestionPair>) {
        if questions.is_empty() {
            return;
        }
        match self.index.get(&name) {
            Some(&position) => self.categories[position].questions.extend(questions),
            None => {
                self.index.insert(name.clone(), self.categories.len());
                self.categories.push(Category { name, questions });
            }
        }
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(Category::get_name)
    }

    pub fn get_category(&self, name: &str) -> Option<&Category> {
        self.index.get(name).map(|&position| &self.categories[position])
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn question_count(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }
}

fn is_deck_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.starts_with('.'));
    !hidden && path.is_file()
}

// Literal file stem: `Robot_Arms.csv` is the `Robot_Arms` category.
fn category_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
}

fn read_deck(settings: &LoaderSettings, path: &Path) -> Result<Vec<QuestionPair>, csv::Error> {
    let file = File::open(path)?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(settings.delimiter)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut questions = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != 2 {
            let line = record.position().map_or(0, |position| position.line());
            warn!(
                "Skipping line {} of {:?}: expected 2 fields, found {}",
                line,
                path,
                record.len()
            );
            continue;
        }
        questions.push(settings.question_column.assign(&record[0], &record[1]));
    }

    Ok(questions)
}
