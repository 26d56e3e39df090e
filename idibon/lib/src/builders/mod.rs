//! Fluent builders for request payloads.
//!
//! Each builder accumulates fields through chained setters and produces a
//! validated payload from `to_options`. Setters that can reject their input
//! return `Result<Self, BuilderError>`, so a chain reads:
//!
//! ```rust
//! use idibon::builders::ConfidenceThreshold;
//!
//! let thresholds = ConfidenceThreshold::new()
//!     .add_threshold("pop", 0.4)?
//!     .add_threshold("country", 0.7)?
//!     .to_options()?;
//! assert_eq!(thresholds["pop"].suggested, 0.4);
//! # Ok::<(), idibon::BuilderError>(())
//! ```
//!
//! Unset fields are `None` and never reach the wire; `false` and `0` are
//! ordinary values and are sent.
//!
//! ## Builders
//!
//! | Builder | Payload |
//! |---------|---------|
//! | [`Annotation`] | [`AnnotationOptions`] (wrapped in a one-element list) |
//! | [`Classification`] | [`ClassificationOptions`] |
//! | [`Collection`] | [`CollectionOptions`] |
//! | [`ConfidenceThreshold`] | [`ConfidenceThresholdOptions`] |
//! | [`Document`] | [`DocumentOptions`] |
//! | [`DocumentQuery`] | [`DocumentQueryOptions`] |
//! | [`Label`] | list of [`LabelOptions`] |
//! | [`Subtask`] | [`SubtaskOptions`] |
//! | [`Task`] | [`TaskOptions`] |
//! | [`TuningDictionary`] | [`TuningDictionaryOptions`] |

mod annotation;
mod classification;
mod collection;
mod confidence_threshold;
mod document;
mod document_query;
mod label;
mod one_or_many;
mod subtask;
mod task;
mod tuning_dictionary;

pub use annotation::{Annotation, AnnotationOptions, AnnotationStatus, Provenance};
pub use classification::{Classification, ClassificationOptions};
pub use collection::{Collection, CollectionOptions};
pub use confidence_threshold::{ConfidenceThreshold, ConfidenceThresholdOptions, ThresholdOptions};
pub use document::{Document, DocumentOptions};
pub use document_query::{DocumentQuery, DocumentQueryOptions, SortField, SortOrder};
pub use label::{Label, LabelOptions};
pub use one_or_many::OneOrMany;
pub use subtask::{Subtask, SubtaskOptions};
pub use task::{Task, TaskOptions, TaskScope};
pub use tuning_dictionary::{Phrase, PhrasePattern, TuningDictionary, TuningDictionaryOptions};
