//! Word-list compiler and the on-disk table format.
//!
//! A word list has one synset per line: whitespace-separated surface forms of
//! one lemma. The synset id of a line is its 1-based line number. Compiling
//! yields two coupled tables, written as `keys.<c>` (form to ids) and
//! `dict.<c>` (id to forms), where `<c>` is the class letter.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use morphsearch_types::{SynsetId, WordClass};
use tracing::{debug, warn};

use crate::error::{LexiconError, Result};

/// Both tables of one word class.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexiconTables {
    class: WordClass,
    form_to_synsets: BTreeMap<String, Vec<SynsetId>>,
    synset_to_forms: BTreeMap<SynsetId, Vec<String>>,
}

impl LexiconTables {
    /// Assemble tables from already-built maps without checking them.
    ///
    /// [`LexiconTables::check_integrity`] (or loading through
    /// [`crate::IrregularLexicon::from_tables`]) validates the result.
    pub fn from_parts(
        class: WordClass,
        form_to_synsets: BTreeMap<String, Vec<SynsetId>>,
        synset_to_forms: BTreeMap<SynsetId, Vec<String>>,
    ) -> Self {
        Self {
            class,
            form_to_synsets,
            synset_to_forms,
        }
    }

    pub fn class(&self) -> WordClass {
        self.class
    }

    pub fn form_to_synsets(&self) -> &BTreeMap<String, Vec<SynsetId>> {
        &self.form_to_synsets
    }

    pub fn synset_to_forms(&self) -> &BTreeMap<SynsetId, Vec<String>> {
        &self.synset_to_forms
    }

    /// Synset ids a surface form belongs to (exact, case-sensitive match).
    pub fn ids_for(&self, form: &str) -> Option<&[SynsetId]> {
        self.form_to_synsets.get(form).map(Vec::as_slice)
    }

    /// Surface forms of a synset in word-list order.
    pub fn forms_for(&self, id: SynsetId) -> Option<&[String]> {
        self.synset_to_forms.get(&id).map(Vec::as_slice)
    }

    /// Verify that both tables reference each other consistently.
    pub fn check_integrity(&self) -> Result<()> {
        for (form, ids) in &self.form_to_synsets {
            if ids.is_empty() {
                return Err(self.integrity(format!("form `{form}` has no synset ids")));
            }
            for id in ids {
                let Some(forms) = self.synset_to_forms.get(id) else {
                    return Err(
                        self.integrity(format!("form `{form}` references missing synset {id}"))
                    );
                };
                if !forms.iter().any(|f| f == form) {
                    return Err(self.integrity(format!("synset {id} does not list form `{form}`")));
                }
            }
        }

        for (id, forms) in &self.synset_to_forms {
            if id.get() == 0 {
                return Err(self.integrity("synset id 0 is reserved".to_string()));
            }
            if forms.is_empty() {
                return Err(self.integrity(format!("synset {id} has no forms")));
            }
            for form in forms {
                let listed = self
                    .form_to_synsets
                    .get(form)
                    .is_some_and(|ids| ids.contains(id));
                if !listed {
                    return Err(self.integrity(format!(
                        "form `{form}` of synset {id} is missing from the form table"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Write `keys.<c>` and `dict.<c>` into `dir`, returning both paths.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<(PathBuf, PathBuf)> {
        let dir = dir.as_ref();
        let keys_path = dir.join(keys_file_name(self.class));
        let dict_path = dir.join(dict_file_name(self.class));

        let keys: BTreeMap<&str, Vec<u32>> = self
            .form_to_synsets
            .iter()
            .map(|(form, ids)| (form.as_str(), ids.iter().map(|id| id.get()).collect()))
            .collect();
        let dict: BTreeMap<u32, &[String]> = self
            .synset_to_forms
            .iter()
            .map(|(id, forms)| (id.get(), forms.as_slice()))
            .collect();

        write_json(&keys_path, &keys)?;
        write_json(&dict_path, &dict)?;
        debug!(
            "wrote {} table to {} and {}",
            self.class,
            keys_path.display(),
            dict_path.display()
        );
        Ok((keys_path, dict_path))
    }

    /// Read the `keys.<c>`/`dict.<c>` pair for `class` from `dir`.
    pub fn read_from(dir: impl AsRef<Path>, class: WordClass) -> Result<Self> {
        let dir = dir.as_ref();
        let keys_path = dir.join(keys_file_name(class));
        let dict_path = dir.join(dict_file_name(class));

        let keys: BTreeMap<String, Vec<u32>> = read_json(&keys_path)?;
        let dict: BTreeMap<u32, Vec<String>> = read_json(&dict_path)?;

        Ok(Self {
            class,
            form_to_synsets: keys
                .into_iter()
                .map(|(form, ids)| (form, ids.into_iter().map(SynsetId).collect()))
                .collect(),
            synset_to_forms: dict
                .into_iter()
                .map(|(id, forms)| (SynsetId(id), forms))
                .collect(),
        })
    }

    fn integrity(&self, detail: String) -> LexiconError {
        LexiconError::Integrity {
            class: self.class,
            detail,
        }
    }
}

/// Compile word-list lines into the tables of one class.
///
/// Line `n` (1-based) becomes synset `n`. A form repeated on several lines
/// maps to all of their ids, in line order. Blank lines and tokens that are
/// not purely alphabetic abort the whole compilation.
pub fn compile<I, S>(class: WordClass, lines: I) -> Result<LexiconTables>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut form_to_synsets: BTreeMap<String, Vec<SynsetId>> = BTreeMap::new();
    let mut synset_to_forms = BTreeMap::new();

    for (idx, line) in lines.into_iter().enumerate() {
        let lineno = idx + 1;
        let id = SynsetId::from_line(lineno).ok_or_else(|| LexiconError::MalformedInput {
            line: lineno,
            reason: "too many lines".to_string(),
        })?;
        let forms = parse_line(line.as_ref()).map_err(|reason| LexiconError::MalformedInput {
            line: lineno,
            reason,
        })?;

        for form in &forms {
            let ids = form_to_synsets.entry(form.clone()).or_default();
            if ids.last() == Some(&id) {
                warn!("{} list line {}: `{}` repeated", class, lineno, form);
            } else {
                ids.push(id);
            }
        }
        synset_to_forms.insert(id, forms);
    }

    debug!(
        "compiled {} {} synsets covering {} forms",
        synset_to_forms.len(),
        class,
        form_to_synsets.len()
    );
    Ok(LexiconTables {
        class,
        form_to_synsets,
        synset_to_forms,
    })
}

/// Compile a word-list file. The file is closed before this returns, on
/// success and on failure alike.
pub fn compile_file(class: WordClass, path: impl AsRef<Path>) -> Result<LexiconTables> {
    let path = path.as_ref();
    let lines = {
        let file = File::open(path).map_err(|e| LexiconError::io(path, e))?;
        BufReader::new(file)
            .lines()
            .collect::<std::io::Result<Vec<String>>>()
            .map_err(|e| LexiconError::io(path, e))?
    };
    compile(class, lines)
}

pub fn keys_file_name(class: WordClass) -> String {
    format!("keys.{}", class.to_char())
}

pub fn dict_file_name(class: WordClass) -> String {
    format!("dict.{}", class.to_char())
}

fn parse_line(line: &str) -> std::result::Result<Vec<String>, String> {
    let forms: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
    if forms.is_empty() {
        return Err("line has no word forms".to_string());
    }
    if let Some(bad) = forms.iter().find(|f| !f.chars().all(char::is_alphabetic)) {
        return Err(format!("`{bad}` is not an alphabetic word form"));
    }
    Ok(forms)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| LexiconError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| LexiconError::format(path, e))?;
    writer.write_all(b"\n").map_err(|e| LexiconError::io(path, e))?;
    writer.flush().map_err(|e| LexiconError::io(path, e))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| LexiconError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| LexiconError::format(path, e))
}
