use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use clap::Subcommand;
use idibon::IdibonClient;
use idibon::builders::{
    Annotation, Classification, Collection, ConfidenceThreshold, DocumentQuery, Label, Phrase,
    PhrasePattern, Subtask, Task, TuningDictionary,
};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::CliError;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all collections
    ListCollections,

    /// Create a collection
    CreateCollection {
        name: String,
        description: String,
    },

    /// Delete a document from a collection
    DeleteDocument {
        collection: String,
        document: String,
    },

    /// Upload documents from a file with one JSON document per line
    CreateDocuments {
        collection: String,
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print every document of a collection, one JSON object per line
    FetchDocuments { collection: String },

    /// Show a task
    FetchTask { collection: String, task: String },

    /// Create a task
    CreateTask {
        collection: String,
        name: String,
        description: String,
        #[arg(long, default_value = "document", value_parser = ["document", "span"])]
        scope: String,
    },

    /// Add a label to a task
    AddLabel {
        collection: String,
        task: String,
        name: String,
        description: String,
    },

    /// Remove a label from a task
    RemoveLabel {
        collection: String,
        task: String,
        label: String,
    },

    /// Attach subtasks to a label
    CreateSubtasks {
        collection: String,
        task: String,
        label: String,
        #[arg(required = true)]
        subtasks: Vec<String>,
    },

    /// Set a tuning dictionary entry for a label
    SetTuning {
        collection: String,
        task: String,
        label: String,
        phrase: String,
        weight: f64,
        /// Treat PHRASE as a regular expression
        #[arg(long)]
        regex: bool,
        /// Match the pattern case-insensitively (with --regex)
        #[arg(long, requires = "regex")]
        ignore_case: bool,
        /// Match the pattern in multiline mode (with --regex)
        #[arg(long, requires = "regex")]
        multiline: bool,
    },

    /// Set a label's suggested confidence threshold
    SetThreshold {
        collection: String,
        task: String,
        label: String,
        threshold: f64,
    },

    /// Add a bootstrapped annotation to a document
    CreateAnnotation {
        collection: String,
        document: String,
        task: String,
        label: String,
    },

    /// Delete an annotation from a document
    DeleteAnnotation {
        collection: String,
        document: String,
        uuid: String,
    },

    /// Classify new content against a task
    Classify {
        collection: String,
        task: String,
        content: String,
    },

    /// Update a collection description, a task, or a label name
    ///
    /// Valid combinations: --collection with --description; --collection and
    /// --task with --name and/or --description; --collection, --task and
    /// --label with --name.
    Update {
        #[arg(short, long)]
        collection: String,
        #[arg(short, long)]
        task: Option<String>,
        #[arg(short, long)]
        label: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        name: Option<String>,
    },
}

fn print(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

fn read_documents(path: &Path) -> Result<Vec<Value>, CliError> {
    let read_error = |source| CliError::Read {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(read_error)?);

    let mut documents = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(read_error)?;
        if line.trim().is_empty() {
            continue;
        }
        let document = serde_json::from_str(&line).map_err(|source| CliError::Document {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        documents.push(document);
    }
    Ok(documents)
}

impl Commands {
    pub async fn run(self, client: &IdibonClient) -> Result<(), CliError> {
        match self {
            Self::ListCollections => print(&client.list_collections().await?),

            Self::CreateCollection { name, description } => {
                let options = Collection::for_name(&name, &description)?.to_options()?;
                print(&client.create_collection(&options).await?);
            }

            Self::DeleteDocument { collection, document } => {
                print(&client.delete_document(&collection, &document).await?);
            }

            Self::CreateDocuments { collection, file } => {
                let documents = read_documents(&file)?;
                info!(count = documents.len(), "uploading documents");
                print(&client.create_documents(&collection, &documents).await?);
            }

            Self::FetchDocuments { collection } => {
                let query = DocumentQuery::new().in_ascending_order().to_options()?;
                let summary = client
                    .fetch_documents(&collection, Some(&query), |item| {
                        if let Ok(document) = item {
                            println!("{document}");
                        }
                    })
                    .await?;
                info!(pages = summary.pages, documents = summary.documents, "fetched documents");
            }

            Self::FetchTask { collection, task } => {
                print(&client.fetch_task(&collection, &task).await?);
            }

            Self::CreateTask {
                collection,
                name,
                description,
                scope,
            } => {
                let options = Task::new()
                    .with_name(&name)?
                    .with_description(description)
                    .with_scope_str(&scope)?
                    .to_options()?;
                print(&client.create_task(&collection, &options).await?);
            }

            Self::AddLabel {
                collection,
                task,
                name,
                description,
            } => {
                let labels = Label::new()
                    .add_described_label(&name, description)?
                    .to_options()?;
                print(&client.add_task_labels(&collection, &task, &labels).await?);
            }

            Self::RemoveLabel { collection, task, label } => {
                print(&client.remove_task_label(&collection, &task, &label).await?);
            }

            Self::CreateSubtasks {
                collection,
                task,
                label,
                subtasks,
            } => {
                let options = Subtask::new().add_subtask(&label, subtasks)?.to_options()?;
                print(&client.create_subtasks(&collection, &task, &options).await?);
            }

            Self::SetTuning {
                collection,
                task,
                label,
                phrase,
                weight,
                regex,
                ignore_case,
                multiline,
            } => {
                let phrase = if regex {
                    Phrase::Pattern(
                        PhrasePattern::new(phrase)?
                            .case_insensitive(ignore_case)
                            .multiline(multiline),
                    )
                } else {
                    Phrase::Text(phrase)
                };
                let dictionary = TuningDictionary::new()
                    .add_dict(&label, phrase, weight)?
                    .to_options()?;
                print(&client.set_tuning_dictionary(&collection, &task, &dictionary).await?);
            }

            Self::SetThreshold {
                collection,
                task,
                label,
                threshold,
            } => {
                let thresholds = ConfidenceThreshold::new()
                    .add_threshold(&label, threshold)?
                    .to_options()?;
                print(
                    &client
                        .set_confidence_thresholds(&collection, &task, &thresholds)
                        .await?,
                );
            }

            Self::CreateAnnotation {
                collection,
                document,
                task,
                label,
            } => {
                let annotations = Annotation::for_label(&task, &label)?
                    .bootstrapped()
                    .to_options()?;
                print(&client.create_annotations(&collection, &document, &annotations).await?);
            }

            Self::DeleteAnnotation {
                collection,
                document,
                uuid,
            } => {
                print(&client.delete_annotation(&collection, &document, &uuid).await?);
            }

            Self::Classify {
                collection,
                task,
                content,
            } => {
                let options = Classification::new().with_content(content).to_options()?;
                print(&client.create_classification(&collection, &task, &options).await?);
            }

            Self::Update {
                collection,
                task,
                label,
                description,
                name,
            } => match (task, label, description, name) {
                (None, None, Some(description), None) => {
                    print(&client.update_collection(&collection, &description).await?);
                }
                (Some(task), None, description, name) if description.is_some() || name.is_some() => {
                    let mut changes = Map::new();
                    if let Some(name) = name {
                        changes.insert("name".into(), Value::String(name));
                    }
                    if let Some(description) = description {
                        changes.insert("description".into(), Value::String(description));
                    }
                    print(&client.update_task(&collection, &task, &changes).await?);
                }
                (Some(task), Some(label), None, Some(name)) => {
                    let rename = client.rename_label(&collection, &task, &label, &name).await?;
                    info!(uuid = %rename.uuid, from = %rename.old_name, to = %rename.new_name, "label renamed");
                    print(&rename.response);
                }
                _ => {
                    return Err(CliError::Usage(
                        "improper combination of options; provide either:\n  \
                         1) --collection and --description to update a collection\n  \
                         2) --collection, --task and --name and/or --description to update a task\n  \
                         3) --collection, --task, --label and --name to rename a label"
                            .to_string(),
                    ));
                }
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_documents_skips_blank_lines() {
        let dir = std::env::temp_dir().join(format!("idibon-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("docs.jsonl");
        let mut file = File::create(&path).unwrap();
        writeln!(file, r#"{{"content": "one"}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"content": "two", "name": "b"}}"#).unwrap();

        let documents = read_documents(&path).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1]["name"], "b");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_read_documents_reports_line() {
        let dir = std::env::temp_dir().join(format!("idibon-cli-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("docs.jsonl");
        std::fs::write(&path, "{\"content\": \"ok\"}\nnot json\n").unwrap();

        let err = read_documents(&path).unwrap_err();
        assert!(matches!(err, CliError::Document { line: 2, .. }));
        std::fs::remove_dir_all(&dir).ok();
    }
}
